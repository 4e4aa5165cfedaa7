use axum::{
    http::header,
    response::{Html, IntoResponse},
};
use common::ControlPanel;
use tracing::instrument;

/// Page heading
pub const PAGE_HEADING: &str = "Daily load demand for each zone";

const PAGE_DESCRIPTION: &str = "The timeseries plot shows daily load (in kW) measurements for 5 geographic sub-areas (e.g., residential and industrial zones).";

/// Render the page with both controls filled in from the panel declaration
pub fn render_page(panel: &ControlPanel) -> String {
    let zone_options: String = panel
        .zone_options
        .iter()
        .map(|option| {
            let selected = if option.value == panel.default_zone {
                " selected"
            } else {
                ""
            };
            format!(
                "<option value=\"{}\"{}>{}</option>",
                option.value, selected, option.label
            )
        })
        .collect();

    let marks: String = panel
        .range_marks
        .iter()
        .map(|mark| format!("<option value=\"{}\" label=\"{}\"></option>", mark.index, mark.label))
        .collect();

    let labels: Vec<&str> = panel.range_marks.iter().map(|m| m.label.as_str()).collect();
    let labels_json = serde_json::to_string(&labels).unwrap_or_else(|_| "[]".to_string());

    PAGE_TEMPLATE
        .replace("{{HEADING}}", PAGE_HEADING)
        .replace("{{DESCRIPTION}}", PAGE_DESCRIPTION)
        .replace("{{ZONE_OPTIONS}}", &zone_options)
        .replace("{{RANGE_MARKS}}", &marks)
        .replace("{{MARK_LABELS}}", &labels_json)
        .replace("{{RANGE_MIN}}", &panel.range_min.to_string())
        .replace("{{RANGE_MAX}}", &panel.range_max.to_string())
        .replace("{{RANGE_START}}", &panel.default_range[0].to_string())
        .replace("{{RANGE_END}}", &panel.default_range[1].to_string())
}

/// Serve the interactive chart page
#[utoipa::path(
    get,
    path = "/",
    tag = "page",
    responses(
        (status = 200, description = "Chart page", content_type = "text/html", body = String)
    )
)]
#[instrument]
pub async fn index_page() -> impl IntoResponse {
    (
        [(header::CACHE_CONTROL, "no-cache")],
        Html(render_page(&ControlPanel::standard())),
    )
}

const PAGE_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{{HEADING}}</title>
    <script src="https://cdn.plot.ly/plotly-2.35.2.min.js" charset="utf-8"></script>
    <style>
        body { font-family: Helvetica, Arial, sans-serif; margin: 0; }
        .banner { padding: 50px; background-color: yellow; }
        .control { width: 400px; font-size: 20px; padding-left: 100px; display: inline-block; }
        .control select { width: 100%; font-size: 16px; padding: 4px; }
        .slider { width: 80%; font-size: 20px; padding-left: 100px; display: inline-block; }
        .slider input[type=range] { width: 100%; }
        .range-labels { font-size: 14px; color: #333; margin-top: 6px; }
        #notice { display: none; margin: 10px 100px; padding: 10px; background: #fde2e1; border: 1px solid #e57373; font-size: 14px; }
        #plot { min-height: 450px; }
    </style>
</head>
<body>
    <div class="banner">
        <h1>{{HEADING}}</h1>
        <p>{{DESCRIPTION}}</p>
    </div>

    <p class="control">
        <label for="opt">Choose each zone to display energy load plot</label>
        <select id="opt">{{ZONE_OPTIONS}}</select>
    </p>

    <div id="notice"></div>
    <div id="plot"></div>

    <p class="slider">
        <label>Time Period</label>
        <datalist id="marks">{{RANGE_MARKS}}</datalist>
        <input id="range-start" type="range" min="{{RANGE_MIN}}" max="{{RANGE_MAX}}" step="1" value="{{RANGE_START}}" list="marks">
        <input id="range-end" type="range" min="{{RANGE_MIN}}" max="{{RANGE_MAX}}" step="1" value="{{RANGE_END}}" list="marks">
        <span class="range-labels" id="range-labels"></span>
    </p>

    <script>
    const MARK_LABELS = {{MARK_LABELS}};
    const zoneSelect = document.getElementById('opt');
    const startInput = document.getElementById('range-start');
    const endInput = document.getElementById('range-end');
    const rangeLabels = document.getElementById('range-labels');
    const notice = document.getElementById('notice');

    let sessionId = null;
    let latestRequest = 0;

    function axis(a) {
        const out = {
            title: { text: '<b>' + a.title + '</b>' },
            linecolor: a.line_color,
            linewidth: a.line_width,
        };
        if (a.range_slider) {
            out.rangeslider = { visible: true };
        }
        if (a.range_buttons.length) {
            out.rangeselector = {
                buttons: a.range_buttons.map(b => {
                    const button = { label: b.label, step: b.step };
                    if (b.count !== null) button.count = b.count;
                    if (b.step_mode) button.stepmode = b.step_mode;
                    return button;
                }),
            };
        }
        return out;
    }

    function render(spec) {
        const s = spec.series;
        const l = spec.layout;
        const trace = {
            type: 'scatter',
            mode: 'lines',
            name: s.name,
            x: s.points.map(p => p.timestamp),
            y: s.points.map(p => p.value),
            line: { width: s.line.width, color: s.line.color },
        };
        const layout = {
            title: { text: '<b>' + l.title + '</b>', y: 0.9, x: 0.5, font: { size: l.title_font_size } },
            hovermode: l.hover_mode,
            hoverlabel: { font: { color: l.hover_font_color } },
            xaxis: axis(l.x_axis),
            yaxis: axis(l.y_axis),
            font: l.font,
            paper_bgcolor: l.paper_bgcolor,
            showlegend: true,
        };
        Plotly.react('plot', [trace], layout);
    }

    function showNotice(text) {
        notice.textContent = text || '';
        notice.style.display = text ? 'block' : 'none';
    }

    function updateRangeLabels() {
        rangeLabels.textContent = MARK_LABELS[startInput.value] + ' to ' + MARK_LABELS[endInput.value];
    }

    async function sendEvent() {
        if (sessionId === null) return;
        const seq = ++latestRequest;
        const event = {
            zone: zoneSelect.value,
            range: [Number(startInput.value), Number(endInput.value)],
        };
        try {
            const response = await fetch('/api/v1/sessions/' + sessionId + '/events', {
                method: 'POST',
                headers: { 'Content-Type': 'application/json' },
                body: JSON.stringify(event),
            });
            if (response.status === 404) {
                await startSession();
                return;
            }
            const body = await response.json();
            if (seq !== latestRequest || body.data.outcome === 'superseded') return;
            if (body.data.chart) render(body.data.chart);
            showNotice(body.data.notice);
        } catch (err) {
            if (seq === latestRequest) showNotice('Update failed: ' + err);
        }
    }

    async function startSession() {
        const response = await fetch('/api/v1/sessions', { method: 'POST' });
        const body = await response.json();
        sessionId = body.data.session_id;
        render(body.data.chart);
        if (zoneSelect.value !== body.data.controls.default_zone
            || Number(startInput.value) !== body.data.controls.default_range[0]
            || Number(endInput.value) !== body.data.controls.default_range[1]) {
            await sendEvent();
        }
    }

    zoneSelect.addEventListener('change', sendEvent);
    startInput.addEventListener('input', () => {
        if (Number(startInput.value) > Number(endInput.value)) endInput.value = startInput.value;
        updateRangeLabels();
    });
    endInput.addEventListener('input', () => {
        if (Number(endInput.value) < Number(startInput.value)) startInput.value = endInput.value;
        updateRangeLabels();
    });
    startInput.addEventListener('change', sendEvent);
    endInput.addEventListener('change', sendEvent);

    updateRangeLabels();
    startSession().catch(err => showNotice('Could not start session: ' + err));
    </script>
</body>
</html>
"##;
