use crate::dashboard::{self, RouteEntry};
use crate::ipc::error::{respond, HandlerErr};
use crate::ipc::helpers::required_str;
use crate::ipc::types::{AppState, Request};
use serde_json::json;

fn nav_routes() -> Result<serde_json::Value, HandlerErr> {
    Ok(json!({ "routes": dashboard::routes() }))
}

fn nav_resolve(params: &serde_json::Value) -> Result<serde_json::Value, HandlerErr> {
    let path = required_str(params, "path")?;
    let role = dashboard::resolve(&path)
        .map_err(|e| HandlerErr::not_found(e.to_string()).with_details(json!({ "path": path })))?;
    Ok(json!(RouteEntry::from(role)))
}

pub fn try_handle(_state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "nav.routes" => Some(respond(&req.id, nav_routes())),
        "nav.resolve" => Some(respond(&req.id, nav_resolve(&req.params))),
        _ => None,
    }
}
