//! HTML pages.
//!
//! Pages never fail on sampler errors: they render documented fallback values
//! (or the snapshot's error line) with a 200.

pub mod quotes;

use axum::{extract::State, response::Html};

use crate::app_state::AppState;
use crate::error::ApiError;
use crate::humanize::{escape_html, format_timestamp, format_uptime, unix_now};
use crate::ops::{api, system};

const STYLE: &str = "\
body { font-family: Arial, sans-serif; margin: 40px; background: #f5f5f5; }
.container { max-width: 800px; margin: 0 auto; background: white; padding: 30px; border-radius: 10px; box-shadow: 0 2px 10px rgba(0,0,0,0.1); }
.quote { font-size: 24px; color: #333; margin-bottom: 20px; padding: 20px; background: #f8f9fa; border-left: 4px solid #007bff; }
.info { color: #666; margin: 10px 0; padding: 8px; }
.status { color: #28a745; font-weight: bold; }
.nav-links { margin-top: 20px; }
.nav-links a { display: inline-block; margin: 5px 10px; padding: 10px 15px; background: #007bff; color: white; text-decoration: none; border-radius: 5px; }
.nav-links a:hover { background: #0056b3; }
pre { background: #f8f9fa; padding: 15px; overflow-x: auto; }
";

fn layout(title: &str, body: &str) -> Html<String> {
    Html(format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title}</title>\n<style>\n{STYLE}</style>\n</head>\n<body>\n\
         <div class=\"container\">\n{body}\n\
         <div class=\"nav-links\"><a href=\"/\">Home</a></div>\n</div>\n</body>\n</html>\n",
        title = escape_html(title),
    ))
}

fn info_row(label: &str, value: &str) -> String {
    format!(
        "<div class=\"info\"><strong>{}:</strong> {}</div>\n",
        escape_html(label),
        escape_html(value)
    )
}

pub async fn home(State(state): State<AppState>) -> Html<String> {
    let hostname = state.sampler().hostname().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "hostname lookup failed");
        "Error".to_string()
    });
    let body = format!(
        "<h1>Beacon</h1>\n\
         <div class=\"quote\">\"{quote}\"</div>\n\
         {host}\
         {env}\
         <div class=\"status\">Application is running successfully</div>\n\
         <div class=\"nav-links\">\n\
         <h3>Standard Endpoints:</h3>\n\
         <a href=\"/health\">Health Check (JSON)</a>\n\
         <a href=\"/info\">System Info (JSON)</a>\n\
         <a href=\"/metrics\">Prometheus Metrics</a>\n\
         <h3>Pages:</h3>\n\
         <a href=\"/health-page\">Health Check</a>\n\
         <a href=\"/system-info-page\">System Info</a>\n\
         <a href=\"/metrics-page\">Metrics</a>\n\
         </div>",
        quote = escape_html(quotes::random_quote()),
        host = info_row("Host", &hostname),
        env = info_row("Environment", &state.cfg().service.environment),
    );
    layout("Beacon", &body)
}

pub async fn health_page(State(state): State<AppState>) -> Html<String> {
    let now = unix_now();
    let uptime = match state.sampler().boot_time() {
        Ok(boot) => format_uptime(beacon_core::snapshot::uptime_seconds(boot, now)),
        Err(e) => {
            tracing::warn!(error = %e, "boot time lookup failed");
            "0m".to_string()
        }
    };
    let svc = &state.cfg().service;
    let body = format!(
        "<h1>Health Check</h1>\n<div class=\"status\">Status: healthy</div>\n{}{}{}{}{}",
        info_row("Service", &svc.name),
        info_row("Version", env!("CARGO_PKG_VERSION")),
        info_row("Uptime", &uptime),
        info_row("Time", &format_timestamp(now)),
        info_row("Timestamp", &now.to_string()),
    );
    layout("Health Check", &body)
}

pub async fn system_info_page(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    let sampler = state.sampler();
    let cfg = state.cfg().sampler.clone();
    let info = tokio::task::spawn_blocking(move || {
        system::collect(sampler.as_ref(), &cfg.disk_path, cfg.page_cpu_interval())
    })
    .await?
    .unwrap_or_else(|e| {
        tracing::warn!(error = %e, "system info page rendered with fallback values");
        system::SystemInfo::fallback(&e)
    });

    let body = format!(
        "<h1>System Info</h1>\n{}{}{}{}{}{}{}{}",
        info_row("Hostname", &info.hostname),
        info_row("Platform", &info.platform),
        info_row("CPU cores", &info.cpu_cores.to_string()),
        info_row("Total memory", &format!("{} GB", info.total_memory)),
        info_row("CPU usage", &info.cpu_usage),
        info_row("Memory usage", &info.memory_usage),
        info_row("Disk usage", &info.disk_usage),
        info_row("Uptime", &info.uptime),
    );
    Ok(layout("System Info", &body))
}

pub async fn metrics_page(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    let text = match api::snapshot(&state).await? {
        Ok(text) => text,
        Err(error_line) => error_line,
    };
    let body = format!(
        "<h1>Metrics</h1>\n<pre id=\"metrics\">{}</pre>",
        escape_html(&text)
    );
    Ok(layout("Metrics", &body))
}
