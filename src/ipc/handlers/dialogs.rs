use super::views::view_mut;
use crate::ipc::error::{respond, HandlerErr};
use crate::ipc::helpers::required_str;
use crate::ipc::types::{AppState, Request};
use serde_json::json;

fn dialog_open(
    state: &mut AppState,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let dialog = required_str(params, "dialog")?;
    let (view_id, view) = view_mut(state, params)?;
    let changed = view
        .open_dialog(&dialog)
        .map_err(|e| HandlerErr::bad_params(e.to_string()))?;
    Ok(json!({
        "viewId": view_id,
        "dialog": dialog.trim(),
        "changed": changed,
        "openDialogs": view.open_dialogs(),
    }))
}

fn dialog_close(
    state: &mut AppState,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let dialog = required_str(params, "dialog")?;
    let (view_id, view) = view_mut(state, params)?;
    let changed = view.close_dialog(&dialog);
    Ok(json!({
        "viewId": view_id,
        "dialog": dialog.trim(),
        "changed": changed,
        "openDialogs": view.open_dialogs(),
    }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "dialog.open" => Some(respond(&req.id, dialog_open(state, &req.params))),
        "dialog.close" => Some(respond(&req.id, dialog_close(state, &req.params))),
        _ => None,
    }
}
