//! Metrics command implementation
//!
//! Runs the metrics chart flow once and prints the four chart
//! configurations, either as text or as the JSON handed to a renderer.

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use tracing::info;

use cloud_economics::{
    charts::ChartConfig,
    client::ApiClient,
    config::Config,
    dashboard::{metrics_chart::FETCH_FAILED_ALERT, MetricsChart, Submission},
};

use crate::cli::OutputFormat;

#[derive(Serialize)]
struct MetricsOutput<'a> {
    instance_id: &'a str,
    charts: &'a [ChartConfig],
}

/// Execute the metrics command
pub async fn execute(cfg: &Config, instance_id: String, format: OutputFormat) -> Result<()> {
    let mut chart = MetricsChart::new();
    chart.instance_id = instance_id;

    let query = match chart.submit() {
        Submission::Send(query) => query,
        Submission::Rejected(alert) => anyhow::bail!(alert),
    };

    let client = ApiClient::new(&cfg.api)?;
    info!(base_url = client.base_url(), instance_id = %query.instance_id, "Requesting metrics");

    match client.fetch_metrics(&query).await {
        Ok(report) => {
            chart.resolve(query, Ok(report));
        }
        Err(e) => {
            let detail = e.to_string();
            let alert = chart.resolve(query, Err(e)).unwrap_or(FETCH_FAILED_ALERT);
            return Err(anyhow::anyhow!(detail).context(alert));
        }
    }

    let instance = chart.shown_instance().unwrap_or_default();
    match format {
        OutputFormat::Text => print_charts(instance, chart.charts()),
        OutputFormat::Json => println!("{}", charts_json(instance, chart.charts())?),
    }

    Ok(())
}

fn charts_json(instance_id: &str, charts: &[ChartConfig]) -> Result<String> {
    let output = MetricsOutput {
        instance_id,
        charts,
    };
    Ok(serde_json::to_string_pretty(&output)?)
}

fn print_charts(instance: &str, charts: &[ChartConfig]) {
    println!("AWS Live Metrics for Instance: {}", instance.blue().bold());
    println!();

    for chart in charts {
        println!(
            "{} {}",
            chart.title.cyan().bold(),
            format!("({} points)", chart.values().len()).dimmed()
        );
        if chart.categories.is_empty() {
            println!("  {}", "No data".dimmed());
        } else {
            println!("  {:<32} {}", chart.x_axis_title.yellow(), chart.y_axis_title.yellow());
            for (time, value) in chart.points() {
                println!("  {:<32} {:.3}", time, value);
            }
        }
        println!();
    }
}
