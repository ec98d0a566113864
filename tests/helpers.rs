// Shared test helpers: fake backend responses and session setup.
//
// Included by the integration test files with `mod helpers;`.

#![allow(dead_code)] // Each test file uses a different subset

use std::time::Duration;

use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use gpu_thermal_dashboard::initialization::api_endpoint;
use gpu_thermal_dashboard::resolver::HostnameResolver;
use gpu_thermal_dashboard::session::DashboardSession;
use gpu_thermal_dashboard::submit::{FormValues, QuerySubmitter};
use gpu_thermal_dashboard::DnsMode;

pub const DFW2_DEVICE: &str = "10.4.11.38";
pub const DFW2_HOSTNAME: &str = "gpu-dfw2-c1-038";

/// The throttled record of the DFW2 July 2025 window.
pub fn dfw2_throttled_record() -> Value {
    json!({
        "site": "DFW2",
        "cluster": "C1",
        "device": DFW2_DEVICE,
        "gpu_id": "GPU_23",
        "max_temp": 93.0,
        "first_date": "2025-07-25 00:00:00",
        "last_date": "2025-07-25 16:00:00",
        "days_throttled": 1,
        "alert_count": 3
    })
}

pub fn analysis_body(throttled: Vec<Value>, thermally_failed: Vec<Value>) -> Value {
    json!({
        "success": true,
        "results": {
            "summary": {
                "throttled_count": throttled.len(),
                "total_devices": 253,
                "planned_gpu_nodes": 254,
                "planned_total_gpus": 2032,
                "total_records": 28052
            },
            "throttled": throttled,
            "thermally_failed": thermally_failed
        },
        "raw_output": "THROTTLED GPUs\nSummary:",
        "site": "DFW2",
        "start_date": "2025-07-18",
        "end_date": "2025-07-25",
        "alert_type": "both"
    })
}

/// The DFW2 query form for 2025-07-18..2025-07-25.
pub fn dfw2_form() -> FormValues {
    let mut form = FormValues::new();
    form.push("site", "DFW2")
        .push("start_date", "2025-07-18")
        .push("end_date", "2025-07-25");
    form
}

pub async fn mount_analysis(server: &MockServer, body: Value) {
    Mock::given(method("GET"))
        .and(path("/api/analysis"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

pub async fn mount_slow_analysis(server: &MockServer, body: Value, delay: Duration) {
    Mock::given(method("GET"))
        .and(path("/api/analysis"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body).set_delay(delay))
        .mount(server)
        .await;
}

pub async fn mount_dns(server: &MockServer, ip: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/api/dns-lookup"))
        .and(query_param("ip", ip))
        .respond_with(response)
        .mount(server)
        .await;
}

pub fn dns_reply(hostname: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({"success": true, "hostname": hostname}))
}

pub fn submitter_for(server: &MockServer) -> QuerySubmitter {
    QuerySubmitter::new(reqwest::Client::new(), &server.uri()).expect("valid mock server URI")
}

pub fn http_resolver_for(server: &MockServer) -> HostnameResolver {
    let endpoint = api_endpoint(&server.uri(), "api/dns-lookup").expect("valid mock server URI");
    HostnameResolver::http(reqwest::Client::new(), endpoint).with_domain_suffix("voltagepark.net")
}

pub fn session_for(server: &MockServer, mode: DnsMode) -> DashboardSession {
    DashboardSession::new(submitter_for(server), http_resolver_for(server), mode)
}
