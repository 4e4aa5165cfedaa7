use anyhow::Result;
use compute::DataSource;
use tracing::{debug, error, info, trace};

pub async fn summary(data_source: &str) -> Result<()> {
    trace!("Entering summary function");
    let source: DataSource = data_source.parse()?;
    debug!("Data source: {}", source);

    let table = match compute::load(&source).await {
        Ok(table) => table,
        Err(e) => {
            error!("Failed to load dataset from {}: {}", source, e);
            return Err(e.into());
        }
    };

    let summary = compute::summarize(&table);
    info!("Summarized {} records", summary.records);

    println!("Source:   {}", summary.source);
    println!("Records:  {}", summary.records);
    match (summary.first_timestamp, summary.last_timestamp) {
        (Some(first), Some(last)) => println!("Coverage: {} .. {}", first, last),
        _ => println!("Coverage: (empty)"),
    }
    println!();
    println!("{:<8} {:>14} {:>14} {:>14}", "Zone", "Min (kW)", "Max (kW)", "Mean (kW)");
    for zone in &summary.zones {
        let fmt = |v: Option<f64>| v.map_or_else(|| "-".to_string(), |v| format!("{:.2}", v));
        println!(
            "{:<8} {:>14} {:>14} {:>14}",
            zone.label,
            fmt(zone.min),
            fmt(zone.max),
            fmt(zone.mean)
        );
    }

    Ok(())
}
