use crate::events::AppEvent;
use async_channel::Sender;
use dial::settings::parse_toggle;
use serde_json::Value;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::net::UnixListener;

pub async fn run_server(tx: Sender<AppEvent>, socket_path: PathBuf) {
    // Cleanup old socket if it exists
    if std::fs::metadata(&socket_path).is_ok() {
        let _ = std::fs::remove_file(&socket_path);
    }

    let listener = match UnixListener::bind(&socket_path) {
        Ok(l) => l,
        Err(e) => {
            log::error!(
                "Failed to bind unix socket {}: {}",
                socket_path.display(),
                e
            );
            return;
        }
    };
    log::info!("Listening on {}", socket_path.display());

    loop {
        match listener.accept().await {
            Ok((mut stream, _)) => {
                let tx = tx.clone();
                tokio::spawn(async move {
                    let reader = BufReader::new(&mut stream);
                    let mut lines = reader.lines();

                    while let Ok(Some(line)) = lines.next_line().await {
                        if let Some(event) = parse_command(&line) {
                            let _ = tx.send(event).await;
                        }
                    }
                });
            }
            Err(e) => {
                log::error!("Failed to accept connection: {}", e);
            }
        }
    }
}

/// One control line:
///
/// - `tap`
/// - `bluetooth connected|disconnected`
/// - `set <key> <value>`
/// - `settings {"key": value, ...}`
pub fn parse_command(line: &str) -> Option<AppEvent> {
    let line = line.trim();
    let (command, rest) = line
        .split_once(char::is_whitespace)
        .map(|(c, r)| (c, r.trim()))
        .unwrap_or((line, ""));

    match command {
        "" => None,
        "tap" => Some(AppEvent::Tap),
        "bluetooth" => match rest {
            "connected" => Some(AppEvent::Bluetooth(true)),
            "disconnected" => Some(AppEvent::Bluetooth(false)),
            other => match parse_toggle(other) {
                Some(connected) => Some(AppEvent::Bluetooth(connected)),
                None => {
                    log::warn!("Unknown bluetooth state {:?}", other);
                    None
                }
            },
        },
        "set" => match rest.split_once(char::is_whitespace) {
            Some((key, value)) => Some(AppEvent::Settings(vec![(
                key.to_string(),
                value.trim().to_string(),
            )])),
            None => {
                log::warn!("Usage: set <key> <value>");
                None
            }
        },
        "settings" => parse_settings(rest).map(AppEvent::Settings),
        other => {
            log::warn!("Unknown command {:?}", other);
            None
        }
    }
}

/// Flattens a settings object into key/value strings. Numbers and booleans
/// are stringified so they decode like any other settings value.
fn parse_settings(json: &str) -> Option<Vec<(String, String)>> {
    let object = match serde_json::from_str::<serde_json::Map<String, Value>>(json) {
        Ok(o) => o,
        Err(e) => {
            log::error!("Malformed settings message: {}", e);
            return None;
        }
    };

    let pairs = object
        .into_iter()
        .filter_map(|(key, value)| match value {
            Value::String(s) => Some((key, s)),
            Value::Bool(b) => Some((key, b.to_string())),
            Value::Number(n) => Some((key, n.to_string())),
            other => {
                log::warn!("Ignoring settings value for {}: {}", key, other);
                None
            }
        })
        .collect();

    Some(pairs)
}
