use serde::{Deserialize, Serialize};
use std::fmt;

/// Placeholder rendered for any absent figure
pub const PLACEHOLDER: &str = "-";

/// Cost report returned by `POST /costs/compiled`
///
/// Every field is optional: a missing figure renders as [`PLACEHOLDER`]
/// instead of failing the whole response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CostReport {
    /// Number of compute instances required to serve the load
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instances_needed: Option<CostValue>,
    /// Per-service cost breakdown
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breakdown: Option<CostBreakdown>,
    /// Total AWS cloud cost (the backend spells this key twice)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cloud_cloud_total_cost: Option<CostValue>,
    /// Amount charged to the client
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_total_cost: Option<CostValue>,
    /// Client charge minus cloud cost
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profit_to_company: Option<CostValue>,
}

/// Closed set of AWS services priced by the backend
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    #[serde(rename = "EC2", default, skip_serializing_if = "Option::is_none")]
    pub ec2: Option<CostValue>,
    #[serde(rename = "RDS", default, skip_serializing_if = "Option::is_none")]
    pub rds: Option<CostValue>,
    #[serde(rename = "NAT Gateway", default, skip_serializing_if = "Option::is_none")]
    pub nat_gateway: Option<CostValue>,
    #[serde(rename = "Load Balancer", default, skip_serializing_if = "Option::is_none")]
    pub load_balancer: Option<CostValue>,
    #[serde(rename = "AWS Shield", default, skip_serializing_if = "Option::is_none")]
    pub aws_shield: Option<CostValue>,
    #[serde(rename = "S3 Bucket", default, skip_serializing_if = "Option::is_none")]
    pub s3_bucket: Option<CostValue>,
    #[serde(rename = "Elastic IPs", default, skip_serializing_if = "Option::is_none")]
    pub elastic_ips: Option<CostValue>,
    #[serde(rename = "Auto Scaling Groups", default, skip_serializing_if = "Option::is_none")]
    pub auto_scaling_groups: Option<CostValue>,
    #[serde(rename = "Launch Templates", default, skip_serializing_if = "Option::is_none")]
    pub launch_templates: Option<CostValue>,
}

/// A cost figure as sent by the backend: usually a preformatted string
/// like `"$12.500"`, occasionally a bare number
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CostValue {
    Text(String),
    Number(serde_json::Number),
}

impl CostValue {
    /// True when the value carries nothing worth displaying
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Text(s) => s.trim().is_empty(),
            Self::Number(_) => false,
        }
    }
}

impl fmt::Display for CostValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Number(n) => write!(f, "{}", n),
        }
    }
}

/// Render an optional figure verbatim, or the placeholder when absent
pub fn display_value(value: Option<&CostValue>) -> String {
    match value {
        Some(v) if !v.is_blank() => v.to_string(),
        _ => PLACEHOLDER.to_string(),
    }
}

/// One labelled line of the rendered cost report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CostLine {
    pub label: &'static str,
    pub value: String,
}

/// A titled group of cost lines
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CostSection {
    pub title: &'static str,
    pub lines: Vec<CostLine>,
}

impl CostReport {
    /// Lay the report out in display order
    ///
    /// Sections and labels are fixed; only the values depend on the
    /// response.
    pub fn sections(&self) -> Vec<CostSection> {
        let breakdown = self.breakdown.clone().unwrap_or_default();
        let line = |label, value: &Option<CostValue>| CostLine {
            label,
            value: display_value(value.as_ref()),
        };

        vec![
            CostSection {
                title: "Your Cloud Economics",
                lines: vec![line("Total Instances Required", &self.instances_needed)],
            },
            CostSection {
                title: "AWS Services Cost Breakdown",
                lines: vec![
                    line("EC2 Instances", &breakdown.ec2),
                    line("RDS Databases", &breakdown.rds),
                    line("NAT Gateway", &breakdown.nat_gateway),
                    line("Load Balancer", &breakdown.load_balancer),
                    line("AWS Shield", &breakdown.aws_shield),
                    line("S3 Bucket", &breakdown.s3_bucket),
                    line("Elastic IPs", &breakdown.elastic_ips),
                    line("Auto Scaling Groups", &breakdown.auto_scaling_groups),
                    line("Launch Templates", &breakdown.launch_templates),
                ],
            },
            CostSection {
                title: "AWS Cloud Costing Summary",
                lines: vec![
                    line("AWS Cloud Costing", &self.cloud_cloud_total_cost),
                    line("Client Charged", &self.client_total_cost),
                    line("Company's Profit", &self.profit_to_company),
                ],
            },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn all_values(report: &CostReport) -> Vec<String> {
        report
            .sections()
            .into_iter()
            .flat_map(|s| s.lines.into_iter().map(|l| l.value))
            .collect()
    }

    #[test]
    fn test_full_report_renders_verbatim() {
        let report: CostReport = serde_json::from_value(json!({
            "instances_needed": 3,
            "breakdown": {
                "EC2": "$1.836 (for 3 instances)",
                "RDS": "$0.100",
                "NAT Gateway": "$0.045",
                "Load Balancer": "$0.025",
                "AWS Shield": "$3.000",
                "S3 Bucket": "$98.305",
                "Elastic IPs": "$52.255 (for 7 elastically alloted IPs)",
                "Auto Scaling Groups": "$5.000",
                "Launch Templates": "$0.250"
            },
            "cloud_cloud_total_cost": "$160.816",
            "client_total_cost": "$305.408",
            "profit_to_company": "$144.592"
        }))
        .unwrap();

        assert_eq!(
            all_values(&report),
            vec![
                "3",
                "$1.836 (for 3 instances)",
                "$0.100",
                "$0.045",
                "$0.025",
                "$3.000",
                "$98.305",
                "$52.255 (for 7 elastically alloted IPs)",
                "$5.000",
                "$0.250",
                "$160.816",
                "$305.408",
                "$144.592",
            ]
        );
    }

    #[test]
    fn test_empty_report_renders_placeholders() {
        let report: CostReport = serde_json::from_value(json!({})).unwrap();
        let values = all_values(&report);
        assert_eq!(values.len(), 13);
        assert!(values.iter().all(|v| v == PLACEHOLDER));
    }

    #[test]
    fn test_partial_breakdown_and_blank_strings() {
        let report: CostReport = serde_json::from_value(json!({
            "breakdown": { "RDS": "$0.100", "EC2": "" },
            "client_total_cost": 42.5,
            "unexpected": "ignored"
        }))
        .unwrap();

        let sections = report.sections();
        let breakdown = &sections[1].lines;
        assert_eq!(breakdown[0].value, PLACEHOLDER);
        assert_eq!(breakdown[1].value, "$0.100");
        assert_eq!(breakdown[2].value, PLACEHOLDER);
        assert_eq!(sections[2].lines[1].value, "42.5");
    }

    #[test]
    fn test_zero_instances_is_shown() {
        let report = CostReport {
            instances_needed: Some(CostValue::Number(0.into())),
            ..Default::default()
        };
        assert_eq!(report.sections()[0].lines[0].value, "0");
    }
}
