//! End-to-end tests for the HTTP endpoints.

use serde_json::json;

#[path = "helpers.rs"]
mod helpers;

use helpers::start_server;

const HEADER: &str = "IP,Region,DateTime,longLat\n";

#[tokio::test]
async fn test_capture_list_and_same_day_duplicate() {
    let server = start_server().await;

    let (status, body) = server
        .capture(json!({
            "ip": "1.2.3.4",
            "region": "NA",
            "dateTime": "2024-01-01T10:00:00Z",
            "longLat": "1,2"
        }))
        .await;
    assert_eq!(status, 200);
    assert_eq!(body, json!({ "success": true }));
    assert_eq!(
        server.file_contents(),
        format!("{}1.2.3.4,NA,2024-01-01T10:00:00Z,1,2\n", HEADER)
    );

    let (status, records) = server.get_json("/fetchRecord").await;
    assert_eq!(status, 200);
    assert_eq!(
        records,
        json!([{
            "ip": "1.2.3.4",
            "region": "NA",
            "dateTime": "2024-01-01T10:00:00Z",
            "longLat": "1,2"
        }])
    );

    let before = server.file_contents();
    let (status, body) = server
        .capture(json!({
            "ip": "1.2.3.4",
            "region": "EU",
            "dateTime": "2024-01-01T22:15:00Z",
            "longLat": "3,4"
        }))
        .await;
    assert_eq!(status, 200);
    assert_eq!(
        body,
        json!({ "success": true, "message": "Data already exists for today" })
    );
    assert_eq!(server.file_contents(), before);

    server.stop().await;
}

#[tokio::test]
async fn test_same_ip_on_different_days_is_stored_twice() {
    let server = start_server().await;

    for date_time in ["2024-01-01T10:00:00Z", "2024-01-02T10:00:00Z"] {
        let (status, body) = server
            .capture(json!({
                "ip": "1.2.3.4",
                "region": "NA",
                "dateTime": date_time,
                "longLat": "1,2"
            }))
            .await;
        assert_eq!(status, 200);
        assert_eq!(body, json!({ "success": true }));
    }

    let (_, records) = server.get_json("/fetchRecord").await;
    let stored: Vec<&str> = records
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["dateTime"].as_str().unwrap())
        .collect();
    assert_eq!(stored, vec!["2024-01-01T10:00:00Z", "2024-01-02T10:00:00Z"]);

    server.stop().await;
}

#[tokio::test]
async fn test_missing_field_is_rejected_without_writing() {
    let server = start_server().await;
    // Make sure the store exists before snapshotting it
    let (status, _) = server.get_json("/fetchRecord").await;
    assert_eq!(status, 200);
    let before = server.file_contents();

    let (status, body) = server
        .capture(json!({
            "ip": "1.2.3.4",
            "dateTime": "2024-01-01T10:00:00Z",
            "longLat": "1,2"
        }))
        .await;
    assert_eq!(status, 400);
    assert_eq!(body, json!({ "error": "Missing data" }));

    let (status, body) = server
        .capture(json!({
            "ip": "",
            "region": "NA",
            "dateTime": "2024-01-01T10:00:00Z",
            "longLat": "1,2"
        }))
        .await;
    assert_eq!(status, 400);
    assert_eq!(body, json!({ "error": "Missing data" }));

    assert_eq!(server.file_contents(), before);
    server.stop().await;
}

#[tokio::test]
async fn test_unparseable_body_is_missing_data() {
    let server = start_server().await;

    let (status, body) = server.capture_raw("not json".to_string()).await;
    assert_eq!(status, 400);
    assert_eq!(body, json!({ "error": "Missing data" }));

    let (status, body) = server
        .capture(json!({ "ip": 1234, "region": "NA", "dateTime": "x", "longLat": "y" }))
        .await;
    assert_eq!(status, 400);
    assert_eq!(body, json!({ "error": "Missing data" }));

    server.stop().await;
}

#[tokio::test]
async fn test_field_that_would_corrupt_the_file_is_invalid() {
    let server = start_server().await;

    let (status, body) = server
        .capture(json!({
            "ip": "1.2.3.4",
            "region": "North, America",
            "dateTime": "2024-01-01T10:00:00Z",
            "longLat": "1,2"
        }))
        .await;
    assert_eq!(status, 400);
    assert_eq!(body, json!({ "error": "Invalid data" }));

    server.stop().await;
}

#[tokio::test]
async fn test_unknown_routes_are_json_404() {
    let server = start_server().await;

    let (status, body) = server.get_json("/nope").await;
    assert_eq!(status, 404);
    assert_eq!(body, json!({ "error": "API not found" }));

    // Known path, wrong method
    let (status, body) = server.get_json("/capture").await;
    assert_eq!(status, 404);
    assert_eq!(body, json!({ "error": "API not found" }));

    server.stop().await;
}

#[tokio::test]
async fn test_download_returns_raw_file_as_attachment() {
    let server = start_server().await;
    server
        .capture(json!({
            "ip": "9.9.9.9",
            "region": "EU",
            "dateTime": "2024-05-05T05:05:05Z",
            "longLat": "52.5,13.4"
        }))
        .await;

    let response = server
        .client
        .get(server.url("/download"))
        .send()
        .await
        .expect("download request failed");
    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(
        response
            .headers()
            .get(reqwest::header::CONTENT_DISPOSITION)
            .and_then(|v| v.to_str().ok()),
        Some("attachment; filename=\"index.csv\"")
    );

    let body = response.text().await.unwrap();
    assert_eq!(body, server.file_contents());
    assert_eq!(body, format!("{}9.9.9.9,EU,2024-05-05T05:05:05Z,52.5,13.4\n", HEADER));

    server.stop().await;
}

#[tokio::test]
async fn test_concurrent_captures_store_one_record_per_day() {
    let server = start_server().await;

    let mut requests = Vec::new();
    for second in 0..10 {
        let client = server.client.clone();
        let url = server.url("/capture");
        requests.push(tokio::spawn(async move {
            let payload = json!({
                "ip": "7.7.7.7",
                "region": "AS",
                "dateTime": format!("2024-03-03T12:00:{:02}Z", second),
                "longLat": "0,0"
            });
            client
                .post(url)
                .header(reqwest::header::CONTENT_TYPE, "application/json")
                .body(payload.to_string())
                .send()
                .await
                .expect("capture request failed")
                .status()
                .as_u16()
        }));
    }
    for request in requests {
        assert_eq!(request.await.unwrap(), 200);
    }

    let (_, records) = server.get_json("/fetchRecord").await;
    assert_eq!(records.as_array().unwrap().len(), 1);

    server.stop().await;
}
