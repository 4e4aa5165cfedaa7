use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use utoipa::ToSchema;

/// Line colour of the rendered series.
pub const SERIES_COLOR: &str = "rgb(106, 181, 135)";

/// A single (timestamp, value) sample of the plotted series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ChartPoint {
    /// Record timestamp
    pub timestamp: NaiveDateTime,
    /// Load in kW for the selected zone
    pub value: f64,
}

impl ChartPoint {
    pub fn new(timestamp: NaiveDateTime, value: f64) -> Self {
        Self { timestamp, value }
    }
}

/// Stroke of a line series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LineStyle {
    pub width: f64,
    pub color: String,
}

/// The one named line series of a chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ChartSeries {
    /// Display label of the selected zone
    pub name: String,
    /// Points in table order
    pub points: Vec<ChartPoint>,
    pub line: LineStyle,
}

/// A quick-zoom button above the x axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RangeButton {
    /// Number of `step` units to go back; absent for the "all" button
    pub count: Option<u32>,
    pub label: String,
    /// `month`, `year` or `all`
    pub step: String,
    /// `backward` for relative buttons
    pub step_mode: Option<String>,
}

impl RangeButton {
    fn backward(count: u32, label: &str, step: &str) -> Self {
        Self {
            count: Some(count),
            label: label.to_string(),
            step: step.to_string(),
            step_mode: Some("backward".to_string()),
        }
    }

    fn all(label: &str) -> Self {
        Self {
            count: None,
            label: label.to_string(),
            step: "all".to_string(),
            step_mode: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AxisLayout {
    pub title: String,
    pub line_color: String,
    pub line_width: u32,
    /// Show the range slider under the axis
    pub range_slider: bool,
    pub range_buttons: Vec<RangeButton>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FontStyle {
    pub family: String,
    pub size: u32,
    pub color: String,
}

/// Selection-independent layout metadata attached to every chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ChartLayout {
    pub title: String,
    pub title_font_size: u32,
    /// Plotly hover mode, `x` for a shared vertical hover line
    pub hover_mode: String,
    pub hover_font_color: String,
    pub x_axis: AxisLayout,
    pub y_axis: AxisLayout,
    pub font: FontStyle,
    pub paper_bgcolor: String,
}

static STANDARD_LAYOUT: LazyLock<ChartLayout> = LazyLock::new(|| ChartLayout {
    title: "Timeseries plot for daily demand of energy loads".to_string(),
    title_font_size: 18,
    hover_mode: "x".to_string(),
    hover_font_color: "white".to_string(),
    x_axis: AxisLayout {
        title: "Time".to_string(),
        line_color: "black".to_string(),
        line_width: 1,
        range_slider: true,
        range_buttons: vec![
            RangeButton::backward(1, "1 month", "month"),
            RangeButton::backward(6, "6 month", "month"),
            RangeButton::backward(1, "1 year", "year"),
            RangeButton::all("full data"),
        ],
    },
    y_axis: AxisLayout {
        title: "Energy Load (in kW)".to_string(),
        line_color: "black".to_string(),
        line_width: 1,
        range_slider: false,
        range_buttons: Vec::new(),
    },
    font: FontStyle {
        family: "Helvetica".to_string(),
        size: 12,
        color: "black".to_string(),
    },
    paper_bgcolor: "white".to_string(),
});

impl ChartLayout {
    /// The shared layout used for every chart the service renders.
    pub fn standard() -> &'static ChartLayout {
        &STANDARD_LAYOUT
    }
}

/// Everything the page needs to draw one update cycle.
///
/// Built fresh for every control change and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ChartSpec {
    pub series: ChartSeries,
    pub layout: ChartLayout,
}

impl ChartSpec {
    /// Wraps `points` as a series named `series_name` under the standard layout.
    pub fn new(series_name: impl Into<String>, points: Vec<ChartPoint>) -> Self {
        Self {
            series: ChartSeries {
                name: series_name.into(),
                points,
                line: LineStyle {
                    width: 2.0,
                    color: SERIES_COLOR.to_string(),
                },
            },
            layout: ChartLayout::standard().clone(),
        }
    }

    pub fn series_name(&self) -> &str {
        &self.series.name
    }

    pub fn points(&self) -> &[ChartPoint] {
        &self.series.points
    }

    pub fn len(&self) -> usize {
        self.series.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.points.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn new_chart_uses_standard_layout() {
        let chart = ChartSpec::new("ZONE 2", Vec::new());
        assert_eq!(chart.series_name(), "ZONE 2");
        assert!(chart.is_empty());
        assert_eq!(&chart.layout, ChartLayout::standard());
        assert_eq!(chart.series.line.color, SERIES_COLOR);
    }

    #[test]
    fn standard_layout_has_range_buttons() {
        let layout = ChartLayout::standard();
        let labels: Vec<&str> = layout
            .x_axis
            .range_buttons
            .iter()
            .map(|b| b.label.as_str())
            .collect();
        assert_eq!(labels, vec!["1 month", "6 month", "1 year", "full data"]);
        assert!(layout.x_axis.range_slider);
        assert_eq!(layout.y_axis.title, "Energy Load (in kW)");
    }

    #[test]
    fn chart_serializes_points_in_order() {
        let ts = |m| {
            NaiveDate::from_ymd_opt(2004, m, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap()
        };
        let chart = ChartSpec::new(
            "ZONE 1",
            vec![ChartPoint::new(ts(2), 10.0), ChartPoint::new(ts(6), 20.0)],
        );

        let json = serde_json::to_value(&chart).unwrap();
        assert_eq!(json["series"]["name"], "ZONE 1");
        assert_eq!(json["series"]["points"][0]["timestamp"], "2004-02-01T00:00:00");
        assert_eq!(json["series"]["points"][1]["value"], 20.0);
        assert_eq!(json["layout"]["hover_mode"], "x");
    }

    #[test]
    fn missing_reading_serializes_as_null() {
        let timestamp = NaiveDate::from_ymd_opt(2004, 2, 2)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let json = serde_json::to_value(ChartPoint::new(timestamp, f64::NAN)).unwrap();
        assert!(json["value"].is_null());
    }
}
