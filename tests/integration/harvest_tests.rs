//! Integration tests for the harvest pipeline
//!
//! These tests use wiremock to stand in for the marketplace API and run the
//! whole Collect, Dedupe, Enrich, Aggregate sequence end to end.

use std::path::Path;
use std::time::{Duration, Instant};
use tempfile::TempDir;
use vin_ledger::config::{ApiConfig, Config, OutputConfig, PacingConfig, SearchConfig};
use vin_ledger::harvest::{Harvester, PartitionOutcome, SkipReason};
use vin_ledger::model::{Listing, VehicleHistory};
use vin_ledger::output::read_json_snapshot;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration pointing at the mock server
fn create_test_config(base_url: &str, partitions: &[&str], dir: &Path, delay_ms: u64) -> Config {
    Config {
        api: ApiConfig {
            base_url: format!("{}/v2", base_url),
            api_key: "test-key".to_string(),
            timeout_secs: 5,
            connect_timeout_secs: 2,
        },
        search: SearchConfig {
            make: "Honda".to_string(),
            model: "Accord".to_string(),
            year: 2021,
            partitions: partitions.iter().map(|p| p.to_string()).collect(),
            page_limit: 100,
        },
        pacing: PacingConfig {
            history_delay_ms: delay_ms,
            progress_interval: 2,
        },
        output: OutputConfig {
            listings_path: dir.join("listings.json").display().to_string(),
            history_path: dir.join("history.json").display().to_string(),
            summary_path: dir.join("summary.csv").display().to_string(),
            report_path: Some(dir.join("report.md").display().to_string()),
            quote_fields: true,
        },
    }
}

fn listing_json(vin: &str, price: u64, trim: &str, state: &str) -> String {
    format!(
        r#"{{"id":"{vin}-{state}","vin":"{vin}","price":{price},"miles":30000,
            "build":{{"year":2021,"make":"Honda","model":"Accord","trim":"{trim}"}},
            "dealer":{{"name":"Dealer {state}","city":"Somewhere","state":"{state}"}}}}"#
    )
}

fn listings_body(num_found: u64, listings: &[String]) -> String {
    format!(
        r#"{{"num_found":{},"listings":[{}]}}"#,
        num_found,
        listings.join(",")
    )
}

async fn mount_listings(server: &MockServer, state: &str, body: String) {
    Mock::given(method("GET"))
        .and(path("/v2/search/car/recents"))
        .and(query_param("state", state))
        .and(query_param("api_key", "test-key"))
        .and(query_param("make", "Honda"))
        .and(query_param("year", "2021"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .expect(1)
        .mount(server)
        .await;
}

async fn mount_history(server: &MockServer, vin: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(format!("/v2/history/car/{}", vin)))
        .and(query_param("api_key", "test-key"))
        .respond_with(response)
        .expect(1)
        .mount(server)
        .await;
}

fn history_body(prices: &[i64]) -> String {
    // Most recent first: later records get earlier timestamps
    let records: Vec<String> = prices
        .iter()
        .enumerate()
        .map(|(i, price)| {
            let offset = i as i64 * 2_592_000;
            format!(
                r#"{{"price":{},"miles":{},"first_seen_at":{},"last_seen_at":{}}}"#,
                price,
                30000 - i as i64 * 1000,
                1_700_000_000 - offset - 1_000_000,
                1_700_995_200 - offset
            )
        })
        .collect();
    format!("[{}]", records.join(","))
}

#[tokio::test]
async fn test_end_to_end_with_overlap_and_one_failed_vin() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    mount_listings(
        &server,
        "NJ",
        listings_body(
            57,
            &[
                listing_json("VIN1", 24995, "Sport", "NJ"),
                listing_json("VIN2", 22995, "LX", "NJ"),
                listing_json("VIN3", 26995, "EX-L", "NJ"),
            ],
        ),
    )
    .await;
    mount_listings(
        &server,
        "PA",
        listings_body(
            31,
            &[
                listing_json("VIN3", 25995, "EX-L", "PA"),
                listing_json("VIN4", 21995, "LX", "PA"),
            ],
        ),
    )
    .await;

    mount_history(
        &server,
        "VIN1",
        ResponseTemplate::new(200).set_body_string(history_body(&[24995, 25995, 0])),
    )
    .await;
    mount_history(
        &server,
        "VIN2",
        ResponseTemplate::new(200).set_body_string(history_body(&[22995])),
    )
    .await;
    mount_history(&server, "VIN3", ResponseTemplate::new(500)).await;
    mount_history(
        &server,
        "VIN4",
        ResponseTemplate::new(200).set_body_string(history_body(&[21995, 23995])),
    )
    .await;

    let config = create_test_config(&server.uri(), &["NJ", "PA"], dir.path(), 10);
    let mut harvester = Harvester::new(config).expect("Failed to create harvester");
    let report = harvester.run().await.expect("Harvest failed");

    // Report
    assert_eq!(report.partitions_fetched(), 2);
    assert_eq!(report.reported_total(), 88);
    assert_eq!(report.listings_collected, 5);
    assert_eq!(report.unique_vins, 4);
    assert_eq!(report.vins_enriched, 3);
    assert_eq!(report.summary_rows, 3);
    assert_eq!(report.vin_skips.len(), 1);
    assert_eq!(report.vin_skips[0].key, "VIN3");
    assert!(matches!(report.vin_skips[0].reason, SkipReason::Transport(_)));

    // Raw listings snapshot keeps the duplicate
    let listings: Vec<Listing> = read_json_snapshot(&dir.path().join("listings.json")).unwrap();
    assert_eq!(listings.len(), 5);
    let raw = std::fs::read_to_string(dir.path().join("listings.json")).unwrap();
    assert!(raw.contains("\"id\": \"VIN3-PA\""));

    // History snapshot excludes the failed VIN
    let histories: Vec<VehicleHistory> =
        read_json_snapshot(&dir.path().join("history.json")).unwrap();
    let vins: Vec<&str> = histories.iter().map(|h| h.vin.as_str()).collect();
    assert_eq!(vins, vec!["VIN1", "VIN2", "VIN4"]);

    // Summary: header plus three rows
    let summary = std::fs::read_to_string(dir.path().join("summary.csv")).unwrap();
    let lines: Vec<&str> = summary.lines().collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(
        lines[0],
        "VIN,Make,Model,Year,Trim,Current_Price,Current_Miles,First_Seen,Last_Seen,Price_History_Count,Lowest_Price,Highest_Price"
    );
    assert!(lines.iter().all(|l| !l.starts_with("VIN3,")));
    assert_eq!(
        lines[1],
        "VIN1,Honda,Accord,2021,Sport,24995,30000,2023-09-04,2023-11-26,3,24995,25995"
    );

    let report_md = std::fs::read_to_string(dir.path().join("report.md")).unwrap();
    assert!(report_md.contains("| VIN3 |"));
    assert!(!report_md.contains("test-key"));
}

#[tokio::test]
async fn test_failed_partition_contributes_nothing() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    mount_listings(
        &server,
        "NJ",
        listings_body(1, &[listing_json("VIN1", 24995, "Sport", "NJ")]),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/v2/search/car/recents"))
        .and(query_param("state", "PA"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"num_found\": \"lots\""))
        .mount(&server)
        .await;
    mount_listings(
        &server,
        "NY",
        listings_body(1, &[listing_json("VIN5", 19995, "LX", "NY")]),
    )
    .await;

    mount_history(
        &server,
        "VIN1",
        ResponseTemplate::new(200).set_body_string(history_body(&[24995])),
    )
    .await;
    mount_history(
        &server,
        "VIN5",
        ResponseTemplate::new(200).set_body_string("[]"),
    )
    .await;

    let config = create_test_config(&server.uri(), &["NJ", "PA", "NY"], dir.path(), 0);
    let report = Harvester::new(config).unwrap().run().await.unwrap();

    assert_eq!(report.partitions_fetched(), 2);
    assert!(matches!(
        &report.partitions[1],
        PartitionOutcome::Skipped { partition, reason: SkipReason::Decode(_) } if partition == "PA"
    ));

    let listings: Vec<Listing> = read_json_snapshot(&dir.path().join("listings.json")).unwrap();
    let vins: Vec<&str> = listings.iter().filter_map(|l| l.vin.as_deref()).collect();
    assert_eq!(vins, vec!["VIN1", "VIN5"]);

    // VIN5 returned an empty history: no history entry, no summary row
    assert_eq!(report.vins_enriched, 1);
    assert_eq!(report.vin_skips[0].reason, SkipReason::EmptyHistory);
    let summary = std::fs::read_to_string(dir.path().join("summary.csv")).unwrap();
    assert_eq!(summary.lines().count(), 2);
}

#[tokio::test]
async fn test_history_requests_are_paced() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let delay = Duration::from_millis(60);

    mount_listings(
        &server,
        "NJ",
        listings_body(
            3,
            &[
                listing_json("VIN1", 24995, "Sport", "NJ"),
                listing_json("VIN2", 22995, "LX", "NJ"),
                listing_json("VIN3", 26995, "EX-L", "NJ"),
            ],
        ),
    )
    .await;
    for vin in ["VIN1", "VIN2", "VIN3"] {
        mount_history(
            &server,
            vin,
            ResponseTemplate::new(200)
                .set_body_string(history_body(&[20000]))
                .set_delay(Duration::from_millis(20)),
        )
        .await;
    }

    let config = create_test_config(&server.uri(), &["NJ"], dir.path(), delay.as_millis() as u64);
    let mut harvester = Harvester::new(config).unwrap();

    let start = Instant::now();
    let report = harvester.run().await.unwrap();
    let elapsed = start.elapsed();

    assert_eq!(report.vins_enriched, 3);
    // Three full pacing waits plus three non-overlapping 20ms responses
    assert!(
        elapsed >= delay * 3 + Duration::from_millis(60),
        "run took {:?}",
        elapsed
    );
}

#[tokio::test]
async fn test_all_partitions_fail_still_writes_artifacts() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let config = create_test_config(&server.uri(), &["NJ", "PA"], dir.path(), 0);
    let report = Harvester::new(config).unwrap().run().await.unwrap();

    assert_eq!(report.partitions_skipped(), 2);
    assert_eq!(report.unique_vins, 0);

    let listings = std::fs::read_to_string(dir.path().join("listings.json")).unwrap();
    assert_eq!(listings.trim(), "[]");
    let summary = std::fs::read_to_string(dir.path().join("summary.csv")).unwrap();
    assert_eq!(summary.lines().count(), 1);
}

#[tokio::test]
async fn test_mistyped_fields_keep_listing_and_history() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    let odd = r#"{"vin":"ODD1","price":"call for price","miles":null,
        "build":{"year":"2021","make":"Honda","model":"Accord","trim":"LX"}}"#;
    mount_listings(
        &server,
        "NJ",
        listings_body(2, &[listing_json("VIN1", 24995, "Sport", "NJ"), odd.to_string()]),
    )
    .await;

    mount_history(
        &server,
        "VIN1",
        ResponseTemplate::new(200).set_body_string(
            r#"[{"price":24995,"first_seen_at":1690000000.0,"last_seen_at":1700995200.0}]"#,
        ),
    )
    .await;
    mount_history(
        &server,
        "ODD1",
        ResponseTemplate::new(200)
            .set_body_string(r#"[{"price":"n/a","first_seen_at":"soon","last_seen_at":null}]"#),
    )
    .await;

    let config = create_test_config(&server.uri(), &["NJ"], dir.path(), 0);
    let report = Harvester::new(config).unwrap().run().await.unwrap();

    assert_eq!(report.partitions_fetched(), 1);
    assert_eq!(report.unique_vins, 2);
    assert_eq!(report.vins_enriched, 2);

    // The odd listing is in the snapshot with its raw values
    let raw: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(dir.path().join("listings.json")).unwrap())
            .unwrap();
    assert_eq!(raw[1]["price"], "call for price");
    assert_eq!(raw[1]["miles"], serde_json::Value::Null);
    assert_eq!(raw[1]["build"]["year"], "2021");

    let summary = std::fs::read_to_string(dir.path().join("summary.csv")).unwrap();
    let lines: Vec<&str> = summary.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(
        lines[1],
        "VIN1,Honda,Accord,2021,Sport,24995,30000,2023-07-22,2023-11-26,1,24995,24995"
    );
    assert_eq!(
        lines[2],
        "ODD1,Honda,Accord,N/A,LX,N/A,N/A,N/A,N/A,1,N/A,N/A"
    );
}
