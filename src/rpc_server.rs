//! Tele Clipper RPC server. JSON-lines over stdin/stdout for the web front-end.
//!
//! Protocol: one JSON object per line.
//! Request:  {"id":1, "method":"form.submit", "params":{"note":"..."}}
//! Response: {"id":1, "result":{"effects":[...]}} or {"id":1, "error":"..."}
//! Async:    {"event":"effects","effects":[...]} when an in-flight submission finishes.
//!
//! Logs go to stderr; stdout carries only protocol lines.

use std::io::Write;

use serde_json::{json, Value};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use teleclipper::app::App;
use teleclipper::rpc_handler::{effects_value, handle_method};
use teleclipper::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use teleclipper::types::errors::TransportError;
use teleclipper::types::submission::TransportResponse;

const LOG_ENV: &str = "TELECLIPPER_LOG";

fn emit(line: &Value) {
    let mut stdout = std::io::stdout().lock();
    if writeln!(stdout, "{}", line).and_then(|_| stdout.flush()).is_err() {
        tracing::error!("stdout closed, dropping protocol line");
    }
}

fn init_logging(default_filter: &str) {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let mut engine = SettingsEngine::new(None);
    let settings = match engine.load() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("teleclipper: {}", e);
            std::process::exit(2);
        }
    };
    init_logging(&settings.logging.filter);
    tracing::info!(config = engine.get_config_path(), endpoint = %settings.endpoint.url, "starting");

    let mut app = match App::new(settings) {
        Ok(app) => app,
        Err(e) => {
            tracing::error!(error = %e, "failed to initialize");
            std::process::exit(1);
        }
    };

    emit(&json!({"event": "ready", "version": env!("CARGO_PKG_VERSION")}));

    let (done_tx, mut done_rx) =
        mpsc::unbounded_channel::<Result<TransportResponse, TransportError>>();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let line = match line {
                    Ok(Some(line)) => line,
                    Ok(None) => break,
                    Err(e) => {
                        tracing::error!(error = %e, "stdin read failed");
                        break;
                    }
                };
                if line.trim().is_empty() {
                    continue;
                }

                let req: Value = match serde_json::from_str(&line) {
                    Ok(v) => v,
                    Err(e) => {
                        emit(&json!({"id": null, "error": format!("parse error: {}", e)}));
                        continue;
                    }
                };

                let id = req.get("id").cloned().unwrap_or(Value::Null);
                let method = req.get("method").and_then(|v| v.as_str()).unwrap_or("");
                let params = req.get("params").cloned().unwrap_or(json!({}));

                match handle_method(&mut app, method, &params) {
                    Ok(reply) => {
                        emit(&json!({"id": id, "result": reply.result}));
                        if let Some(payload) = reply.dispatch {
                            let transport = app.transport();
                            let done = done_tx.clone();
                            let handle = tokio::spawn(async move { transport.send(payload).await });
                            tokio::spawn(async move {
                                // A panicking transport still has to end the attempt.
                                let result = handle
                                    .await
                                    .unwrap_or_else(|e| Err(TransportError::Network(e.to_string())));
                                let _ = done.send(result);
                            });
                        }
                    }
                    Err(err) => emit(&json!({"id": id, "error": err})),
                }
            }
            Some(result) = done_rx.recv() => {
                let effects = app.finish_submit(result);
                match effects_value(&effects) {
                    Ok(mut value) => {
                        value["event"] = json!("effects");
                        emit(&value);
                    }
                    Err(e) => tracing::error!(error = %e, "failed to encode effects"),
                }
            }
        }
    }

    tracing::info!("stdin closed, shutting down");
}
