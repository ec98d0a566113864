//! End-to-end rendering scenarios against a fake analysis backend.

mod helpers;

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use gpu_thermal_dashboard::render::{CellStyle, HostnameCell};
use gpu_thermal_dashboard::session::QueryResult;
use gpu_thermal_dashboard::DnsMode;

use helpers::*;

#[tokio::test]
async fn test_dfw2_scenario_renders_expected_row() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/analysis"))
        .and(query_param("site", "DFW2"))
        .and(query_param("start_date", "2025-07-18"))
        .and(query_param("end_date", "2025-07-25"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(analysis_body(vec![dfw2_throttled_record()], vec![])),
        )
        .expect(1)
        .mount(&server)
        .await;
    mount_dns(
        &server,
        DFW2_DEVICE,
        dns_reply(&format!("{DFW2_HOSTNAME}.voltagepark.net")),
    )
    .await;

    let mut session = session_for(&server, DnsMode::Blocking);
    let result = session.run_query(&dfw2_form(), None).await;
    assert!(matches!(result, QueryResult::Rendered { ref pending, .. } if pending.is_empty()));

    let results = session.page().results().expect("results rendered");
    assert_eq!(results.throttled.rows.len(), 1);
    let row = &results.throttled.rows[0];
    assert_eq!(
        row.cells(),
        vec![
            "DFW2",
            "C1",
            DFW2_DEVICE,
            DFW2_HOSTNAME,
            "GPU_23",
            "93°C",
            "07/25/2025",
            "07/25/2025",
            "1 day",
            "3"
        ]
    );
    assert_eq!(row.duration_style, CellStyle::Neutral);

    let html = session.to_html();
    assert!(html.contains("93°C"));
    assert!(html.contains("<strong class=\"text-success\">1 day</strong>"));
    assert!(html.contains("<span class=\"badge bg-dark\">3</span>"));
    assert!(html.contains(&format!("href=\"http://{DFW2_DEVICE}/\"")));
    assert!(html.contains(DFW2_HOSTNAME));
    assert!(html.contains("No thermally failed GPUs found"));
    assert!(session.controls().results_visible);
}

#[tokio::test]
async fn test_async_mode_renders_placeholders_then_fills_them() {
    let server = MockServer::start().await;
    mount_analysis(&server, analysis_body(vec![dfw2_throttled_record()], vec![])).await;
    mount_dns(&server, DFW2_DEVICE, dns_reply("gpu-dfw2-c1-038.voltagepark.net.")).await;

    let mut session = session_for(&server, DnsMode::Async);
    let QueryResult::Rendered { pending, .. } = session.run_query(&dfw2_form(), None).await else {
        panic!("expected rendered results");
    };
    assert_eq!(pending.len(), 1);

    // Table is complete except for the hostname cell
    let before = session.to_html();
    assert!(before.contains("Resolving..."));
    assert!(before.contains("93°C"));

    let stats = session.enrich(pending).await;
    assert_eq!(stats.applied, 1);
    let row = &session.page().results().unwrap().throttled.rows[0];
    assert_eq!(row.hostname, HostnameCell::Resolved(DFW2_HOSTNAME.into()));
    assert!(!session.to_html().contains("Resolving..."));
}

#[tokio::test]
async fn test_hostname_failures_degrade_per_row() {
    let server = MockServer::start().await;
    let records = vec![
        json!({"device": "10.4.11.1", "days_throttled": 2}),
        json!({"device": "10.4.11.2", "days_throttled": 0}),
        json!({"device": "10.4.11.3", "days_throttled": 1}),
        json!({"device": "10.4.11.4"}),
    ];
    mount_analysis(&server, analysis_body(records, vec![])).await;
    mount_dns(&server, "10.4.11.1", ResponseTemplate::new(500)).await;
    mount_dns(
        &server,
        "10.4.11.2",
        ResponseTemplate::new(200).set_body_string("<html>not json</html>"),
    )
    .await;
    mount_dns(
        &server,
        "10.4.11.3",
        ResponseTemplate::new(200).set_body_json(json!({"success": false})),
    )
    .await;
    mount_dns(&server, "10.4.11.4", dns_reply("gpu-dfw2-c1-004.voltagepark.net")).await;

    let mut session = session_for(&server, DnsMode::Blocking);
    session.run_query(&dfw2_form(), None).await;

    let rows = &session.page().results().unwrap().throttled.rows;
    let hostnames: Vec<_> = rows.iter().map(|r| r.hostname.text().to_string()).collect();
    assert_eq!(
        hostnames,
        vec!["10.4.11.1", "10.4.11.2", "10.4.11.3", "gpu-dfw2-c1-004"]
    );
    let durations: Vec<_> = rows.iter().map(|r| (r.duration.as_str(), r.duration_style)).collect();
    assert_eq!(
        durations,
        vec![
            ("2 days", CellStyle::Alert),
            ("0 days", CellStyle::Alert),
            ("1 day", CellStyle::Neutral),
            ("N/A", CellStyle::Muted)
        ]
    );
}

#[tokio::test]
async fn test_unreachable_dns_endpoint_keeps_addresses() {
    let server = MockServer::start().await;
    mount_analysis(&server, analysis_body(vec![dfw2_throttled_record()], vec![])).await;
    // No dns-lookup mock: wiremock answers 404

    let mut session = session_for(&server, DnsMode::Blocking);
    session.run_query(&dfw2_form(), None).await;
    let row = &session.page().results().unwrap().throttled.rows[0];
    assert_eq!(row.hostname, HostnameCell::Resolved(DFW2_DEVICE.into()));
}

#[tokio::test]
async fn test_empty_lists_render_single_placeholder() {
    let server = MockServer::start().await;
    mount_analysis(&server, analysis_body(vec![], vec![])).await;

    let mut session = session_for(&server, DnsMode::Async);
    session.run_query(&dfw2_form(), None).await;

    let results = session.page().results().unwrap();
    assert!(results.throttled.rows.is_empty());
    assert!(results.thermally_failed.rows.is_empty());
    assert!(!results.thermally_failed.visible);

    let html = session.to_html();
    assert_eq!(html.matches("No throttled GPUs found").count(), 1);
    assert_eq!(html.matches("No thermally failed GPUs found").count(), 1);
    assert_eq!(html.matches("class=\"alert-row\"").count(), 0);
    assert!(html.contains("id=\"thermally-failed-section\" class=\"alert-section\" style=\"display: none\""));
}

#[tokio::test]
async fn test_rows_follow_input_order_in_both_tables() {
    let server = MockServer::start().await;
    let throttled: Vec<_> = (1..=6)
        .map(|i| json!({"device": format!("10.4.11.{i}"), "gpu_id": format!("GPU_2{i}")}))
        .collect();
    let failed = vec![
        json!({"device": "device-10.4.21.9", "temp": 45.2, "avg_temp": 32.1, "timestamp": "2024-08-09T22:30:00"}),
        "garbage".into(),
        json!({"device": "10.4.21.3", "max_temp": 47, "days_failed": 3}),
    ];
    mount_analysis(&server, analysis_body(throttled, failed)).await;

    let mut session = session_for(&server, DnsMode::Off);
    session.run_query(&dfw2_form(), None).await;
    let results = session.page().results().unwrap();

    let gpus: Vec<_> = results.throttled.rows.iter().map(|r| r.gpu_id.as_str()).collect();
    assert_eq!(gpus, vec!["GPU_21", "GPU_22", "GPU_23", "GPU_24", "GPU_25", "GPU_26"]);

    // The non-object element is dropped, its neighbours survive
    let failed_rows = &results.thermally_failed.rows;
    assert_eq!(failed_rows.len(), 2);
    assert!(results.thermally_failed.visible);
    assert_eq!(
        failed_rows[0].cells(),
        vec![
            "Unknown", "Unknown", "10.4.21.9", "10.4.21.9", "Unknown", "45.2°C", "08/09/2024",
            "N/A", "N/A", "1"
        ]
    );
    assert_eq!(failed_rows[1].temperature, "47°C");
    assert_eq!(failed_rows[1].duration, "3 days");
}

#[tokio::test]
async fn test_summary_without_optional_counters() {
    let server = MockServer::start().await;
    mount_analysis(
        &server,
        json!({"success": true, "results": {"summary": {"total_devices": "N/A"}}}),
    )
    .await;

    let mut session = session_for(&server, DnsMode::Off);
    session.run_query(&dfw2_form(), None).await;
    let cards = &session.page().results().unwrap().summary;
    let shown: Vec<_> = cards.iter().map(|c| (c.field.label(), c.value.as_str())).collect();
    assert_eq!(
        shown,
        vec![("GPU Nodes", "N/A"), ("Total GPUs", "N/A"), ("GPU Devices Found", "0")]
    );
}

#[tokio::test]
async fn test_raw_output_included_on_request() {
    let server = MockServer::start().await;
    mount_analysis(&server, analysis_body(vec![], vec![])).await;

    let mut session = session_for(&server, DnsMode::Off).with_raw_output(true);
    session.run_query(&dfw2_form(), None).await;
    let html = session.to_html();
    assert!(html.contains("<pre class=\"raw-output\">THROTTLED GPUs\nSummary:</pre>"));
}
