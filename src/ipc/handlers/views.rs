use crate::ipc::error::{respond, HandlerErr};
use crate::ipc::helpers::required_str;
use crate::ipc::types::{AppState, Request};
use crate::views::{MountedView, ViewError, ViewKind};
use serde_json::json;
use tracing::{debug, info};
use uuid::Uuid;

pub(super) fn view_mut<'a>(
    state: &'a mut AppState,
    params: &serde_json::Value,
) -> Result<(String, &'a mut MountedView), HandlerErr> {
    let view_id = required_str(params, "viewId")?;
    match state.views.get_mut(&view_id) {
        Some(view) => Ok((view_id, view)),
        None => Err(HandlerErr::not_found("view not mounted")
            .with_details(json!({ "viewId": view_id }))),
    }
}

fn view_err(e: ViewError) -> HandlerErr {
    HandlerErr::bad_params(e.to_string())
}

fn view_mount(
    state: &mut AppState,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let raw_kind = required_str(params, "kind")?;
    let Some(kind) = ViewKind::parse(&raw_kind) else {
        let known: Vec<&str> = ViewKind::ALL.iter().map(|k| k.as_str()).collect();
        return Err(HandlerErr::bad_params(format!("unknown view kind: {}", raw_kind))
            .with_details(json!({ "kinds": known })));
    };
    let view = MountedView::mount(kind).map_err(|e| HandlerErr {
        code: "seed_failed",
        message: e.to_string(),
        details: None,
    })?;
    let view_id = Uuid::new_v4().to_string();
    let total = view.total();
    state.views.insert(view_id.clone(), view);
    info!(view_id = %view_id, kind = kind.as_str(), total, "view mounted");
    Ok(json!({
        "viewId": view_id,
        "kind": kind,
        "total": total,
    }))
}

fn view_unmount(
    state: &mut AppState,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let view_id = required_str(params, "viewId")?;
    let removed = state.views.remove(&view_id);
    if let Some(view) = &removed {
        info!(view_id = %view_id, kind = view.kind.as_str(), "view unmounted");
    }
    Ok(json!({ "viewId": view_id, "unmounted": removed.is_some() }))
}

fn view_list(
    state: &mut AppState,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let (view_id, view) = view_mut(state, params)?;
    let mut listed = view.list(params.get("filters")).map_err(view_err)?;
    if let Some(obj) = listed.as_object_mut() {
        obj.insert("viewId".to_string(), json!(view_id));
        obj.insert("kind".to_string(), json!(view.kind));
    }
    Ok(listed)
}

fn view_toggle(
    state: &mut AppState,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let record_id = required_str(params, "recordId")?;
    let flag = required_str(params, "flag")?;
    let (view_id, view) = view_mut(state, params)?;
    let record = view.toggle(&record_id, &flag).map_err(view_err)?;
    debug!(
        view_id = %view_id,
        record_id = %record_id,
        flag = %flag,
        updated = record.is_some(),
        "toggle"
    );
    Ok(json!({
        "viewId": view_id,
        "recordId": record_id,
        "updated": record.is_some(),
        "record": record,
    }))
}

fn view_set_field(
    state: &mut AppState,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let record_id = required_str(params, "recordId")?;
    let field = required_str(params, "field")?;
    let value = required_str(params, "value")?;
    let (view_id, view) = view_mut(state, params)?;
    let record = view
        .set_field(&record_id, &field, &value)
        .map_err(view_err)?;
    debug!(
        view_id = %view_id,
        record_id = %record_id,
        field = %field,
        updated = record.is_some(),
        "set field"
    );
    Ok(json!({
        "viewId": view_id,
        "recordId": record_id,
        "updated": record.is_some(),
        "record": record,
    }))
}

fn view_options(
    state: &mut AppState,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let (view_id, view) = view_mut(state, params)?;
    Ok(json!({
        "viewId": view_id,
        "kind": view.kind,
        "options": view.options(),
    }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    let result = match req.method.as_str() {
        "view.mount" => view_mount(state, &req.params),
        "view.unmount" => view_unmount(state, &req.params),
        "view.list" => view_list(state, &req.params),
        "view.toggle" => view_toggle(state, &req.params),
        "view.setField" => view_set_field(state, &req.params),
        "view.options" => view_options(state, &req.params),
        _ => return None,
    };
    Some(respond(&req.id, result))
}
