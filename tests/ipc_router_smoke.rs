use serde_json::json;
use std::io::{BufRead, BufReader, Write};
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};

fn spawn_sidecar() -> (Child, ChildStdin, BufReader<ChildStdout>) {
    let exe = env!("CARGO_BIN_EXE_transitd");
    let mut child = Command::new(exe)
        .env("TRANSITD_WEATHER_PROVIDER", "mock")
        .env("TRANSITD_WEATHER_DELAY_MS", "20")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("spawn transitd");
    let stdin = child.stdin.take().expect("child stdin");
    let stdout = child.stdout.take().expect("child stdout");
    (child, stdin, BufReader::new(stdout))
}

fn read_line(reader: &mut BufReader<ChildStdout>) -> serde_json::Value {
    let mut line = String::new();
    reader.read_line(&mut line).expect("read response line");
    assert!(!line.trim().is_empty(), "empty response");
    serde_json::from_str(line.trim()).expect("parse response json")
}

fn request(
    stdin: &mut ChildStdin,
    reader: &mut BufReader<ChildStdout>,
    id: &str,
    method: &str,
    params: serde_json::Value,
) -> serde_json::Value {
    let payload = json!({
        "id": id,
        "method": method,
        "params": params,
    });
    writeln!(stdin, "{}", payload).expect("write request");
    stdin.flush().expect("flush request");

    let value = read_line(reader);
    assert_eq!(value.get("id").and_then(|v| v.as_str()), Some(id));
    if value.get("ok").and_then(|v| v.as_bool()) == Some(false) {
        let code = value
            .get("error")
            .and_then(|e| e.get("code"))
            .and_then(|v| v.as_str())
            .unwrap_or("unknown");
        assert_ne!(
            code, "not_implemented",
            "unexpected unknown method for {}",
            method
        );
    }
    value
}

fn result_str(value: &serde_json::Value, key: &str) -> String {
    value
        .get("result")
        .and_then(|v| v.get(key))
        .and_then(|v| v.as_str())
        .unwrap_or_else(|| panic!("missing result.{} in {}", key, value))
        .to_string()
}

#[test]
fn router_dispatch_smoke_covers_handler_families() {
    let (mut child, mut stdin, mut reader) = spawn_sidecar();

    let health = request(&mut stdin, &mut reader, "1", "health", json!({}));
    assert_eq!(health["result"]["weatherProvider"], json!("mock"));
    let _ = request(&mut stdin, &mut reader, "2", "nav.routes", json!({}));
    let _ = request(
        &mut stdin,
        &mut reader,
        "3",
        "nav.resolve",
        json!({ "path": "/dashboard/driver" }),
    );

    let mounted = request(
        &mut stdin,
        &mut reader,
        "4",
        "view.mount",
        json!({ "kind": "checkIns" }),
    );
    let view_id = result_str(&mounted, "viewId");
    let _ = request(
        &mut stdin,
        &mut reader,
        "5",
        "view.list",
        json!({ "viewId": view_id, "filters": { "query": "" } }),
    );
    let _ = request(
        &mut stdin,
        &mut reader,
        "6",
        "view.toggle",
        json!({ "viewId": view_id, "recordId": "3", "flag": "checkedIn" }),
    );
    let _ = request(
        &mut stdin,
        &mut reader,
        "7",
        "view.options",
        json!({ "viewId": view_id }),
    );
    let _ = request(
        &mut stdin,
        &mut reader,
        "8",
        "dialog.open",
        json!({ "viewId": view_id, "dialog": "reportIssue" }),
    );
    let _ = request(
        &mut stdin,
        &mut reader,
        "9",
        "dialog.close",
        json!({ "viewId": view_id, "dialog": "reportIssue" }),
    );

    let roster = request(
        &mut stdin,
        &mut reader,
        "10",
        "view.mount",
        json!({ "kind": "studentRoster" }),
    );
    let roster_id = result_str(&roster, "viewId");
    let _ = request(
        &mut stdin,
        &mut reader,
        "11",
        "view.setField",
        json!({ "viewId": roster_id, "recordId": "S-06", "field": "status", "value": "active" }),
    );

    let widget = request(&mut stdin, &mut reader, "12", "weather.mount", json!({}));
    let widget_id = result_str(&widget, "widgetId");
    let _ = request(
        &mut stdin,
        &mut reader,
        "13",
        "weather.get",
        json!({ "widgetId": widget_id }),
    );
    let _ = request(
        &mut stdin,
        &mut reader,
        "14",
        "weather.unmount",
        json!({ "widgetId": widget_id }),
    );
    let _ = request(
        &mut stdin,
        &mut reader,
        "15",
        "view.unmount",
        json!({ "viewId": view_id }),
    );

    let health = request(&mut stdin, &mut reader, "16", "health", json!({}));
    assert_eq!(health["result"]["mountedViews"], json!(1));
    assert_eq!(health["result"]["mountedWidgets"], json!(0));

    drop(stdin);
    let _ = child.wait();
}

#[test]
fn unknown_methods_and_bad_json_get_error_envelopes() {
    let (mut child, mut stdin, mut reader) = spawn_sidecar();

    writeln!(stdin, "{}", json!({ "id": "x1", "method": "trips.export", "params": {} }))
        .expect("write request");
    stdin.flush().expect("flush");
    let resp = read_line(&mut reader);
    assert_eq!(resp["ok"], json!(false));
    assert_eq!(resp["error"]["code"], json!("not_implemented"));

    writeln!(stdin, "{{not json").expect("write garbage");
    stdin.flush().expect("flush");
    let resp = read_line(&mut reader);
    assert_eq!(resp["ok"], json!(false));
    assert_eq!(resp["error"]["code"], json!("bad_json"));

    // The loop survives both.
    let health = request(&mut stdin, &mut reader, "x2", "health", json!({}));
    assert_eq!(health["ok"], json!(true));

    drop(stdin);
    let _ = child.wait();
}
