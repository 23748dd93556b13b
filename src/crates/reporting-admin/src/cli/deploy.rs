//! Deployment checks for the systems that feed the reporting API

use std::time::Duration;

use chrono::{DateTime, Utc};
use colored::Colorize;
use reqwest::Client;
use serde_json::{json, Value};
use tabled::{Table, Tabled};

use reporting::config::{DeploymentTarget, ServerConfig};

use crate::error::{AdminError, Result};

/// Per-request timeout for every check
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

const TEST_RUNS_PATH: &str = "/api/v1/results/test-runs";

#[derive(Tabled)]
struct CheckRow {
    #[tabled(rename = "Target")]
    target: String,
    #[tabled(rename = "URL")]
    url: String,
    #[tabled(rename = "Status")]
    status: String,
}

/// Outcome of checking one URL
#[derive(Debug, Clone, PartialEq)]
pub enum CheckOutcome {
    Status(u16),
    Unreachable(String),
}

impl CheckOutcome {
    pub fn is_ok(&self) -> bool {
        matches!(self, CheckOutcome::Status(code) if (200..400).contains(code))
    }

    fn render(&self) -> String {
        let text = match self {
            CheckOutcome::Status(code) => code.to_string(),
            CheckOutcome::Unreachable(reason) => format!("unreachable: {}", reason),
        };
        if self.is_ok() {
            format!("✓ {}", text)
        } else {
            format!("✗ {}", text)
        }
    }
}

/// Absolute URLs to check; the base URL alone when no endpoints are listed
pub fn target_urls(target: &DeploymentTarget) -> Vec<String> {
    let base = target.base_url.trim_end_matches('/');
    if target.endpoints.is_empty() {
        return vec![base.to_string()];
    }
    target
        .endpoints
        .iter()
        .map(|endpoint| format!("{}/{}", base, endpoint.trim_start_matches('/')))
        .collect()
}

/// A single TEST_RUN event in the shape external runners post
pub fn sample_test_run_batch(now: DateTime<Utc>) -> Value {
    let stamp = now.format("%Y%m%d_%H%M%S");
    json!({
        "customerId": 9999,
        "testRunId": format!("ADMIN_CHECK_{}", stamp),
        "sourceSystem": "reporting-admin",
        "events": [{
            "kind": "TEST_RUN",
            "testCase": {
                "id": "ADMIN_DEPLOYMENT_CHECK",
                "title": "Deployment connectivity check",
                "component": "Reporting API"
            },
            "result": "Pass",
            "executedBy": "reporting-admin",
            "executionDate": now.to_rfc3339(),
            "observedTimeMs": 0,
            "remarks": "Sample event posted by check-deployed"
        }]
    })
}

fn client() -> Result<Client> {
    Ok(Client::builder().timeout(REQUEST_TIMEOUT).build()?)
}

async fn check(client: &Client, url: &str) -> CheckOutcome {
    match client.get(url).send().await {
        Ok(response) => CheckOutcome::Status(response.status().as_u16()),
        Err(e) => CheckOutcome::Unreachable(e.to_string()),
    }
}

/// Handle check-deployed command
///
/// Fails when any check or the sample post fails.
pub async fn handle_check_deployed(config: &ServerConfig, post_sample: Option<String>) -> Result<()> {
    let client = client()?;
    let mut failures = 0;

    let targets = &config.deployment.targets;
    if targets.is_empty() {
        println!("{}", "No deployment targets configured under [[deployment.targets]]".yellow());
    } else {
        let mut rows = Vec::new();
        for target in targets {
            for url in target_urls(target) {
                let outcome = check(&client, &url).await;
                tracing::debug!(target_name = %target.name, url = %url, ?outcome, "Checked endpoint");
                if !outcome.is_ok() {
                    failures += 1;
                }
                rows.push(CheckRow {
                    target: target.name.clone(),
                    url,
                    status: outcome.render(),
                });
            }
        }
        println!("{}", Table::new(rows));
    }

    if let Some(base_url) = post_sample {
        if !post_sample_batch(&client, config, &base_url).await {
            failures += 1;
        }
    }

    if failures > 0 {
        println!("{}", format!("✗ {} check(s) failed", failures).red().bold());
        return Err(AdminError::ChecksFailed(failures));
    }
    println!("{}", "✓ All deployment checks passed".green().bold());
    Ok(())
}

async fn post_sample_batch(client: &Client, config: &ServerConfig, base_url: &str) -> bool {
    let url = format!("{}{}", base_url.trim_end_matches('/'), TEST_RUNS_PATH);
    let mut request = client.post(&url).json(&sample_test_run_batch(Utc::now()));
    if let Some(key) = config.security.secret_key.as_deref().filter(|key| !key.is_empty()) {
        request = request.bearer_auth(key);
    }

    let response = match request.send().await {
        Ok(response) => response,
        Err(e) => {
            println!("{} {}: {}", "✗ Sample post failed".red(), url, e);
            return false;
        }
    };

    let status = response.status();
    let body: Value = response.json().await.unwrap_or(Value::Null);
    if status.is_success() && body["accepted"].as_u64().unwrap_or(0) > 0 {
        println!("{} {} ({} accepted)", "✓ Sample test run posted to".green(), url, body["accepted"]);
        true
    } else {
        println!("{} {}: HTTP {} {}", "✗ Sample post rejected by".red(), url, status.as_u16(), body);
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reporting::ingest::TestRunsEnvelope;

    fn target(endpoints: &[&str]) -> DeploymentTarget {
        DeploymentTarget {
            name: "crm".to_string(),
            base_url: "https://crm.example.com/".to_string(),
            endpoints: endpoints.iter().map(|e| e.to_string()).collect(),
        }
    }

    #[test]
    fn test_target_urls() {
        assert_eq!(target_urls(&target(&[])), vec!["https://crm.example.com"]);
        assert_eq!(
            target_urls(&target(&["/health", "api/customers"])),
            vec!["https://crm.example.com/health", "https://crm.example.com/api/customers"]
        );
    }

    #[test]
    fn test_check_outcome() {
        assert!(CheckOutcome::Status(200).is_ok());
        assert!(CheckOutcome::Status(302).is_ok());
        assert!(!CheckOutcome::Status(503).is_ok());
        assert!(!CheckOutcome::Unreachable("timeout".to_string()).is_ok());
    }

    #[test]
    fn test_sample_batch_is_a_valid_envelope() {
        let batch = sample_test_run_batch(Utc::now());
        let envelope: TestRunsEnvelope = serde_json::from_value(batch).unwrap();
        assert_eq!(envelope.customer_id, Some(9999));
        assert_eq!(envelope.events.len(), 1);
        assert!(envelope.test_run_id.unwrap().starts_with("ADMIN_CHECK_"));
    }

    #[tokio::test]
    async fn test_no_targets_passes() {
        handle_check_deployed(&ServerConfig::default(), None).await.unwrap();
    }
}
