use serde_json::json;
use std::io::{BufRead, BufReader, Write};
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};

fn spawn_sidecar() -> (Child, ChildStdin, BufReader<ChildStdout>) {
    let exe = env!("CARGO_BIN_EXE_transitd");
    let mut child = Command::new(exe)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("spawn transitd");
    let stdin = child.stdin.take().expect("child stdin");
    let stdout = child.stdout.take().expect("child stdout");
    (child, stdin, BufReader::new(stdout))
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

    let mut line = String::new();
    reader.read_line(&mut line).expect("read response line");
    assert!(!line.trim().is_empty(), "empty response for {}", method);
    let value: serde_json::Value = serde_json::from_str(line.trim()).expect("parse response json");
    assert_eq!(value.get("id").and_then(|v| v.as_str()), Some(id));
    value
}

fn request_ok(
    stdin: &mut ChildStdin,
    reader: &mut BufReader<ChildStdout>,
    id: &str,
    method: &str,
    params: serde_json::Value,
) -> serde_json::Value {
    let value = request(stdin, reader, id, method, params);
    assert!(
        value.get("ok").and_then(|v| v.as_bool()).unwrap_or(false),
        "{} failed: {}",
        method,
        value
    );
    value.get("result").cloned().unwrap_or_else(|| json!({}))
}

fn mount(
    stdin: &mut ChildStdin,
    reader: &mut BufReader<ChildStdout>,
    id: &str,
    kind: &str,
) -> String {
    request_ok(stdin, reader, id, "view.mount", json!({ "kind": kind }))
        .get("viewId")
        .and_then(|v| v.as_str())
        .expect("viewId")
        .to_string()
}

fn row_field<'a>(rows: &'a serde_json::Value, key: &str) -> Vec<&'a str> {
    rows.as_array()
        .expect("rows array")
        .iter()
        .map(|r| r.get(key).and_then(|v| v.as_str()).unwrap_or(""))
        .collect()
}

#[test]
fn text_query_matches_names_case_insensitively() {
    let (_child, mut stdin, mut reader) = spawn_sidecar();
    let view_id = mount(&mut stdin, &mut reader, "1", "checkIns");

    let listed = request_ok(
        &mut stdin,
        &mut reader,
        "2",
        "view.list",
        json!({ "viewId": view_id, "filters": { "query": "alex" } }),
    );
    assert_eq!(listed["total"], json!(7));
    assert_eq!(listed["matched"], json!(1));
    assert_eq!(row_field(&listed["rows"], "name"), vec!["Alex Thompson"]);

    let upper = request_ok(
        &mut stdin,
        &mut reader,
        "3",
        "view.list",
        json!({ "viewId": view_id, "filters": { "query": "ALEX" } }),
    );
    assert_eq!(upper["rows"], listed["rows"]);
}

#[test]
fn route_selection_keeps_source_order() {
    let (_child, mut stdin, mut reader) = spawn_sidecar();
    let view_id = mount(&mut stdin, &mut reader, "1", "checkIns");

    let all = request_ok(
        &mut stdin,
        &mut reader,
        "2",
        "view.list",
        json!({ "viewId": view_id }),
    );
    let expected: Vec<&str> = all["rows"]
        .as_array()
        .expect("rows")
        .iter()
        .filter(|r| r["route"] == json!("Morning Route #103"))
        .map(|r| r["id"].as_str().unwrap_or(""))
        .collect();

    let filtered = request_ok(
        &mut stdin,
        &mut reader,
        "3",
        "view.list",
        json!({
            "viewId": view_id,
            "filters": { "query": "", "categories": { "route": "Morning Route #103" } }
        }),
    );
    assert_eq!(row_field(&filtered["rows"], "id"), expected);
    assert_eq!(expected, vec!["1", "2", "4", "7"]);

    let everything = request_ok(
        &mut stdin,
        &mut reader,
        "4",
        "view.list",
        json!({ "viewId": view_id, "filters": { "categories": { "route": "all" } } }),
    );
    assert_eq!(everything["matched"], json!(7));
}

#[test]
fn single_day_range_on_trip_history() {
    let (_child, mut stdin, mut reader) = spawn_sidecar();
    let view_id = mount(&mut stdin, &mut reader, "1", "tripHistory");

    let listed = request_ok(
        &mut stdin,
        &mut reader,
        "2",
        "view.list",
        json!({
            "viewId": view_id,
            "filters": { "startDate": "2025-04-18", "endDate": "2025-04-18" }
        }),
    );
    assert_eq!(listed["total"], json!(7));
    assert_eq!(listed["matched"], json!(1));
    assert_eq!(row_field(&listed["rows"], "date"), vec!["2025-04-18"]);

    let open_ended = request_ok(
        &mut stdin,
        &mut reader,
        "3",
        "view.list",
        json!({ "viewId": view_id, "filters": { "startDate": "2025-04-18" } }),
    );
    assert_eq!(
        row_field(&open_ended["rows"], "date"),
        vec!["2025-04-18", "2025-04-21", "2025-04-22"]
    );
}

#[test]
fn empty_result_is_a_normal_state() {
    let (_child, mut stdin, mut reader) = spawn_sidecar();
    let view_id = mount(&mut stdin, &mut reader, "1", "tripHistory");

    let listed = request_ok(
        &mut stdin,
        &mut reader,
        "2",
        "view.list",
        json!({
            "viewId": view_id,
            "filters": { "query": "emma", "categories": { "status": "cancelled" } }
        }),
    );
    assert_eq!(listed["matched"], json!(0));
    assert_eq!(listed["empty"], json!(true));
    assert_eq!(listed["total"], json!(7));
}

#[test]
fn malformed_filters_are_rejected() {
    let (_child, mut stdin, mut reader) = spawn_sidecar();
    let view_id = mount(&mut stdin, &mut reader, "1", "tripHistory");

    for (i, filters) in [
        json!({ "categories": { "colour": "red" } }),
        json!({ "startDate": "next tuesday" }),
        json!({ "query": 7 }),
        json!("route 103"),
    ]
    .into_iter()
    .enumerate()
    {
        let resp = request(
            &mut stdin,
            &mut reader,
            &format!("bad-{}", i),
            "view.list",
            json!({ "viewId": view_id, "filters": filters }),
        );
        assert_eq!(resp["ok"], json!(false), "{}", resp);
        assert_eq!(resp["error"]["code"], json!("bad_params"));
    }

    let missing = request(
        &mut stdin,
        &mut reader,
        "2",
        "view.list",
        json!({ "viewId": "not-mounted" }),
    );
    assert_eq!(missing["error"]["code"], json!("not_found"));
}
