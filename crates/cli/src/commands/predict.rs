//! Classification command

use anyhow::Result;
use tabled::Tabled;

use crate::client::{ApiClient, PredictRequest, PredictResponse};
use crate::output::{color_confidence, color_status, format_temp, print_warning, OutputFormat};

/// Row for the feature breakdown table
#[derive(Tabled)]
struct FeatureRow {
    #[tabled(rename = "Feature")]
    name: String,
    #[tabled(rename = "Value")]
    value: String,
}

/// Classify a batch of readings and render the result
pub async fn run(client: &ApiClient, readings: &[f64], format: OutputFormat) -> Result<()> {
    let request = PredictRequest {
        sensor_data: readings.to_vec(),
    };
    let response: PredictResponse = client.post("api/v1/predict", &request).await?;

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&response)?;
            println!("{}", json);
        }
        OutputFormat::Table => {
            println!("Status:     {}", color_status(&response.prediction));
            println!("Confidence: {}", color_confidence(response.confidence));
            println!("Mean:       {}", format_temp(response.raw_prediction));
            println!("Timestamp:  {}", format_timestamp(&response.timestamp));
            println!();

            let rows = vec![
                FeatureRow {
                    name: "Mean temperature".to_string(),
                    value: format_temp(response.features.mean_temp),
                },
                FeatureRow {
                    name: "Std deviation".to_string(),
                    value: format!("{:.1}", response.features.temp_std),
                },
                FeatureRow {
                    name: "Range".to_string(),
                    value: format!("{:.1}", response.features.temp_range),
                },
                FeatureRow {
                    name: "Max deviation".to_string(),
                    value: format!("{:.1}", response.features.max_deviation),
                },
                FeatureRow {
                    name: "Active sensors".to_string(),
                    value: response.features.active_sensors.to_string(),
                },
            ];

            let table = tabled::Table::new(rows)
                .with(tabled::settings::Style::rounded())
                .to_string();
            println!("{}", table);

            let filtered = response.input_sensors - response.features.active_sensors;
            if filtered > 0 {
                print_warning(&format!(
                    "{} of {} readings failed validity filtering",
                    filtered, response.input_sensors
                ));
            }
        }
    }

    Ok(())
}

/// Format an RFC 3339 timestamp for display
fn format_timestamp(ts: &str) -> String {
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(ts) {
        dt.format("%Y-%m-%d %H:%M:%S").to_string()
    } else {
        ts.to_string()
    }
}
