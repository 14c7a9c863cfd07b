//! Cost command implementation
//!
//! Runs the cost calculator flow once: validate, one request, print.

use anyhow::Result;
use colored::Colorize;
use tracing::info;

use cloud_economics::{
    client::ApiClient,
    config::Config,
    dashboard::{cost_calculator::FETCH_FAILED_ALERT, CostCalculator, Submission},
    models::CostReport,
};

use crate::cli::OutputFormat;

/// Execute the cost command
pub async fn execute(
    cfg: &Config,
    users: String,
    instance_capacity: String,
    format: OutputFormat,
) -> Result<()> {
    let mut calculator = CostCalculator::new();
    calculator.users = users;
    calculator.instance_capacity = instance_capacity;

    let query = match calculator.submit() {
        Submission::Send(query) => query,
        Submission::Rejected(alert) => anyhow::bail!(alert),
    };

    let client = ApiClient::new(&cfg.api)?;
    info!(base_url = client.base_url(), "Requesting cost calculation");

    match client.compute_costs(&query).await {
        Ok(report) => {
            calculator.resolve(Ok(report));
        }
        Err(e) => {
            let detail = e.to_string();
            let alert = calculator.resolve(Err(e)).unwrap_or(FETCH_FAILED_ALERT);
            return Err(anyhow::anyhow!(detail).context(alert));
        }
    }

    if let Some(report) = calculator.results() {
        match format {
            OutputFormat::Text => print_report(report),
            OutputFormat::Json => println!("{}", report_json(report)?),
        }
    }

    Ok(())
}

/// The report as returned by the backend; absent fields are omitted
fn report_json(report: &CostReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

fn print_report(report: &CostReport) {
    for section in report.sections() {
        println!("{}", section.title.cyan().bold());
        for line in section.lines {
            let value = if line.label == "Company's Profit" {
                line.value.green().bold()
            } else {
                line.value.normal()
            };
            println!("  {}: {}", line.label.yellow(), value);
        }
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_config;
    use cloud_economics::dashboard::cost_calculator::MISSING_INPUT_ALERT;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_missing_input_fails_with_alert() {
        // Rejected before any client is built, so the address is never used
        let cfg = test_config("http://127.0.0.1:1");
        let err = execute(&cfg, "1000".to_string(), String::new(), OutputFormat::Text)
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), MISSING_INPUT_ALERT);
    }

    #[tokio::test]
    async fn test_backend_error_uses_alert_as_context() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/costs/compiled"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .expect(1)
            .mount(&server)
            .await;

        let cfg = test_config(&server.uri());
        let err = execute(&cfg, "1000".to_string(), "300".to_string(), OutputFormat::Json)
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), FETCH_FAILED_ALERT);
        let chain = format!("{:#}", err);
        assert!(chain.contains("500"));
        assert!(chain.contains("boom"));
    }

    #[tokio::test]
    async fn test_successful_calculation() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/costs/compiled"))
            .and(query_param("users", "1000"))
            .and(query_param("instance_capacity", "300"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "instances_needed": 4,
                "profit_to_company": "$2169.286"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let cfg = test_config(&server.uri());
        execute(&cfg, "1000".to_string(), "300".to_string(), OutputFormat::Json)
            .await
            .unwrap();
    }

    #[test]
    fn test_report_json_shape() {
        let report: CostReport = serde_json::from_value(json!({
            "instances_needed": 4,
            "breakdown": {"EC2": "$2.448 (for 4 instances)", "NAT Gateway": "$0.045"},
            "profit_to_company": "$2169.286"
        }))
        .unwrap();

        let value: serde_json::Value = serde_json::from_str(&report_json(&report).unwrap()).unwrap();
        assert_eq!(
            value,
            json!({
                "instances_needed": 4,
                "breakdown": {"EC2": "$2.448 (for 4 instances)", "NAT Gateway": "$0.045"},
                "profit_to_company": "$2169.286"
            })
        );
    }
}
