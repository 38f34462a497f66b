mod config;
mod dashboard;
mod domain;
mod ipc;
mod records;
mod seed;
mod views;
mod weather;

use std::io::{self, BufRead, Write};
use tracing::{debug, info, warn};
use tracing_subscriber::{fmt, EnvFilter};

fn main() {
    // stdout carries responses; logs go to stderr.
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("transitd=info")),
        )
        .with_writer(io::stderr)
        .init();

    let config = config::Config::load();
    let mut state = ipc::AppState::new(config);
    info!(
        version = env!("CARGO_PKG_VERSION"),
        weather_provider = state.weather_provider.name(),
        "transitd ready"
    );

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(v) => v,
            Err(e) => {
                warn!(error = %e, "stdin read failed");
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        let req: ipc::Request = match serde_json::from_str(&line) {
            Ok(v) => v,
            Err(e) => {
                // Can't reply without id.
                warn!(error = %e, "dropping malformed request");
                let _ = writeln!(
                    stdout,
                    "{}",
                    serde_json::json!({
                        "ok": false,
                        "error": { "code": "bad_json", "message": e.to_string() }
                    })
                );
                let _ = stdout.flush();
                continue;
            }
        };

        debug!(id = %req.id, method = %req.method, "request");
        let resp = ipc::handle_request(&mut state, req);
        let _ = writeln!(
            stdout,
            "{}",
            serde_json::to_string(&resp).unwrap_or_else(|_| "{\"ok\":false}".to_string())
        );
        let _ = stdout.flush();
    }

    info!(
        views = state.views.len(),
        widgets = state.widgets.len(),
        "stdin closed, shutting down"
    );
}
