use std::io::{self, BufRead, Write};

use anyhow::Result;
use facebridge::{bridge, FaceClient, FaceConfig};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Reads newline-delimited `FaceApiRequest` JSON messages on stdin and
/// writes one `FaceApiResponse` JSON message per line on stdout. Logs go to
/// stderr so the message stream stays clean.
fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "facebridge=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    info!("Starting Face API bridge");

    let config = FaceConfig::from_env()?;
    if config.subscription_key.is_empty() {
        anyhow::bail!("FACE_API_KEY is not set");
    }
    info!(endpoint = %config.endpoint, "Configuration loaded");

    let client = FaceClient::new(config);

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let message: bridge::FaceApiRequest = match serde_json::from_str(&line) {
            Ok(message) => message,
            Err(e) => {
                error!("Skipping unparseable request message: {}", e);
                continue;
            }
        };

        let response = match bridge::dispatch(&client, &message) {
            Ok(response) => response,
            Err(e) => {
                error!(opcode = message.request_type, "Request failed: {}", e);
                bridge::FaceApiResponse {
                    response_type: e.status().map(i32::from).unwrap_or(0),
                    response: e.to_string(),
                }
            }
        };

        serde_json::to_writer(&mut out, &response)?;
        out.write_all(b"\n")?;
        out.flush()?;
    }

    info!("Bridge shutdown complete");
    Ok(())
}
