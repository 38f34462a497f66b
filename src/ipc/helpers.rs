use crate::ipc::error::HandlerErr;

pub fn required_str(params: &serde_json::Value, key: &str) -> Result<String, HandlerErr> {
    match params.get(key) {
        None | Some(serde_json::Value::Null) => {
            Err(HandlerErr::bad_params(format!("missing {}", key)))
        }
        Some(v) => v
            .as_str()
            .map(|s| s.to_string())
            .ok_or_else(|| HandlerErr::bad_params(format!("{} must be a string", key))),
    }
}

/// Absent, null and blank all read as `None`.
pub fn optional_str(params: &serde_json::Value, key: &str) -> Result<Option<String>, HandlerErr> {
    match params.get(key) {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(v) => {
            let Some(s) = v.as_str() else {
                return Err(HandlerErr::bad_params(format!("{} must be string or null", key)));
            };
            let t = s.trim();
            Ok((!t.is_empty()).then(|| t.to_string()))
        }
    }
}
