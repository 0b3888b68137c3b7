//! RPC method handler for the Tele Clipper JSON-lines protocol.
//!
//! Kept apart from `rpc_server.rs` so it can be unit-tested independently.
//! `handle_method` translates front-end events into `App` calls and returns
//! the resulting UI effects. A submission payload, when produced, is handed
//! back to the caller, which owns the transport round-trip.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde_json::{json, Value};

use crate::app::App;
use crate::types::form::{Attachment, FormFields};
use crate::types::submission::SubmissionPayload;
use crate::types::ui::UiEffect;

/// Result of one RPC call.
#[derive(Debug)]
pub struct RpcReply {
    pub result: Value,
    /// Set by `form.submit` when a request must be sent.
    pub dispatch: Option<SubmissionPayload>,
}

impl RpcReply {
    fn value(result: Value) -> Self {
        Self {
            result,
            dispatch: None,
        }
    }
}

/// Encode bytes to base64 string.
pub fn base64_encode(data: &[u8]) -> String {
    BASE64.encode(data)
}

/// Decode base64 string to bytes.
pub fn base64_decode(input: &str) -> Result<Vec<u8>, String> {
    BASE64.decode(input).map_err(|e| format!("base64 decode error: {}", e))
}

/// Wraps effects in the response envelope.
pub fn effects_value(effects: &[UiEffect]) -> Result<Value, String> {
    let effects = serde_json::to_value(effects).map_err(|e| e.to_string())?;
    Ok(json!({ "effects": effects }))
}

fn str_param<'a>(params: &'a Value, name: &str) -> &'a str {
    params.get(name).and_then(|v| v.as_str()).unwrap_or("")
}

/// Reads the form fields from `form.submit` params.
pub fn parse_form(params: &Value) -> Result<FormFields, String> {
    let attachment = match params.get("file") {
        None | Some(Value::Null) => None,
        Some(file) => {
            let name = file
                .get("name")
                .and_then(|v| v.as_str())
                .ok_or("missing file.name")?;
            let data = file
                .get("data_base64")
                .and_then(|v| v.as_str())
                .ok_or("missing file.data_base64")?;
            let content_type = file.get("content_type").and_then(|v| v.as_str());
            Some(Attachment::new(name, content_type, base64_decode(data)?))
        }
    };

    Ok(FormFields {
        url: str_param(params, "url").to_string(),
        note: str_param(params, "note").to_string(),
        attachment,
    })
}

/// Dispatch a JSON-RPC method call.
///
/// Returns `Ok(RpcReply)` on success or `Err(String)` with an error message.
pub fn handle_method(app: &mut App, method: &str, params: &Value) -> Result<RpcReply, String> {
    match method {
        "ping" => Ok(RpcReply::value(json!({"pong": true}))),

        // ─── Gate ───
        "app.init" => {
            let resume = params.get("session_id").and_then(|v| v.as_str());
            let effects = app.init(resume);
            let mut result = effects_value(&effects)?;
            result["session_id"] = json!(app.session_id());
            Ok(RpcReply::value(result))
        }
        "gate.unlock" => {
            let password = str_param(params, "password");
            let effects = app.unlock(password);
            Ok(RpcReply::value(effects_value(&effects)?))
        }

        // ─── Form ───
        "form.url_changed" => {
            let effects = app.url_changed(str_param(params, "url"));
            Ok(RpcReply::value(effects_value(&effects)?))
        }
        "form.submit" => {
            let fields = parse_form(params)?;
            let (effects, dispatch) = app.begin_submit(fields);
            Ok(RpcReply {
                result: effects_value(&effects)?,
                dispatch,
            })
        }
        "form.reset" => {
            let effects = app.reset_form();
            Ok(RpcReply::value(effects_value(&effects)?))
        }

        // ─── Introspection ───
        "state.get" => Ok(RpcReply::value(json!({
            "gate": app.gate_state(),
            "submission": app.submission_state(),
            "session_id": app.session_id(),
        }))),

        _ => Err(format!("unknown method: {}", method)),
    }
}
