//! Service status command

use anyhow::Result;
use tabled::Tabled;

use crate::client::{ApiClient, ConfigSnapshot, HealthSnapshot, ReadinessSnapshot};
use crate::output::{color_status, format_temp, print_success, print_warning, OutputFormat};

/// Row for the component health table
#[derive(Tabled)]
struct ComponentRow {
    #[tabled(rename = "Component")]
    name: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Message")]
    message: String,
}

/// Query readiness, health, and configuration and render them
pub async fn run(client: &ApiClient, format: OutputFormat) -> Result<()> {
    let readiness: ReadinessSnapshot = client.get_probe("readyz").await?;
    let health: HealthSnapshot = client.get_probe("healthz").await?;
    let config: ConfigSnapshot = client.get("api/v1/config").await?;

    match format {
        OutputFormat::Json => {
            let combined = serde_json::json!({
                "readiness": readiness,
                "health": health,
                "config": config,
            });
            println!("{}", serde_json::to_string_pretty(&combined)?);
        }
        OutputFormat::Table => {
            if readiness.ready {
                print_success("Service is ready");
            } else {
                print_warning(&format!(
                    "Service not ready: {}",
                    readiness.reason.unwrap_or_else(|| "unknown".to_string())
                ));
            }
            println!("Overall health: {}", color_status(&health.status));
            println!();

            let mut rows: Vec<ComponentRow> = health
                .components
                .iter()
                .map(|(name, component)| ComponentRow {
                    name: name.clone(),
                    status: color_status(&component.status),
                    message: component.message.clone().unwrap_or_default(),
                })
                .collect();
            rows.sort_by(|a, b| a.name.cmp(&b.name));

            let table = tabled::Table::new(rows)
                .with(tabled::settings::Style::rounded())
                .to_string();
            println!("{}", table);
            println!();

            println!(
                "Reference temperature: {}",
                format_temp(config.reference_temperature)
            );
            println!(
                "Warning threshold:     {}",
                format_temp(config.warning_threshold)
            );
            println!(
                "Critical threshold:    {}",
                format_temp(config.critical_threshold)
            );
            println!("Max supported sensors: {}", config.max_supported_sensors);
            println!(
                "Valid reading range:   ({}, {})",
                format_temp(config.min_valid_temperature),
                format_temp(config.max_valid_temperature)
            );
        }
    }

    Ok(())
}
