use crate::ipc::error::{respond, HandlerErr};
use crate::ipc::helpers::{optional_str, required_str};
use crate::ipc::types::{AppState, Request};
use crate::weather::{WeatherSnapshot, WeatherWidget};
use serde_json::json;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

fn snapshot_json(
    widget_id: &str,
    snapshot: &WeatherSnapshot,
) -> Result<serde_json::Value, HandlerErr> {
    let mut v = serde_json::to_value(snapshot).map_err(|e| HandlerErr {
        code: "internal",
        message: e.to_string(),
        details: None,
    })?;
    if let Some(obj) = v.as_object_mut() {
        obj.insert("widgetId".to_string(), json!(widget_id));
    }
    Ok(v)
}

fn weather_mount(
    state: &mut AppState,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let location = optional_str(params, "location")?
        .unwrap_or_else(|| state.config.weather.location.clone());
    let widget = WeatherWidget::mount(
        Arc::clone(&state.weather_provider),
        Some(location),
        state.config.weather.refresh,
    )
    .map_err(|e| HandlerErr {
        code: "weather_mount_failed",
        message: format!("{e:#}"),
        details: None,
    })?;
    let widget_id = Uuid::new_v4().to_string();
    let snapshot = widget.snapshot();
    state.widgets.insert(widget_id.clone(), widget);
    snapshot_json(&widget_id, &snapshot)
}

fn weather_get(
    state: &mut AppState,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let widget_id = required_str(params, "widgetId")?;
    let Some(widget) = state.widgets.get(&widget_id) else {
        return Err(HandlerErr::not_found("weather widget not mounted")
            .with_details(json!({ "widgetId": widget_id })));
    };
    snapshot_json(&widget_id, &widget.snapshot())
}

fn weather_unmount(
    state: &mut AppState,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let widget_id = required_str(params, "widgetId")?;
    let removed = state.widgets.remove(&widget_id);
    if removed.is_some() {
        info!(widget_id = %widget_id, "weather widget unmounted");
    }
    Ok(json!({ "widgetId": widget_id, "unmounted": removed.is_some() }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    let result = match req.method.as_str() {
        "weather.mount" => weather_mount(state, &req.params),
        "weather.get" => weather_get(state, &req.params),
        "weather.unmount" => weather_unmount(state, &req.params),
        _ => return None,
    };
    Some(respond(&req.id, result))
}
