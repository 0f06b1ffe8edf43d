//! Assertion helpers for tests.

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use regex::Regex;

use super::app::TestResponse;

/// Assert response has expected status code
pub fn assert_status(response: &TestResponse, expected: StatusCode) {
    assert_eq!(
        response.status, expected,
        "Expected status {}, got {}. Body: {}",
        expected,
        response.status,
        response.text()
    );
}

/// Assert response is OK (200)
pub fn assert_ok(response: &TestResponse) {
    assert_status(response, StatusCode::OK);
}

/// Assert response is a valid PNG image
pub fn assert_png(response: &TestResponse) {
    assert_ok(response);
    assert!(
        response.is_png(),
        "Expected PNG image, got {} bytes starting with {:?}",
        response.body.len(),
        &response.body[..8.min(response.body.len())]
    );

    assert_eq!(
        response.header("content-type"),
        Some("image/png"),
        "Expected Content-Type: image/png"
    );
}

/// Assert a JSON error body with the given status
pub fn assert_json_error(response: &TestResponse, expected: StatusCode) {
    assert_status(response, expected);
    let json: serde_json::Value = response.json();
    assert_eq!(
        json["status"].as_u64(),
        Some(u64::from(expected.as_u16())),
        "Expected JSON status {}, got {}",
        expected.as_u16(),
        serde_json::to_string_pretty(&json).unwrap()
    );
    assert!(json["error"].is_string(), "Expected error message");
}

/// Assert every code is six lower-case hex digits
pub fn assert_canonical_codes<'a>(codes: impl IntoIterator<Item = &'a str>) {
    let pattern = Regex::new("^[0-9a-f]{6}$").unwrap();
    for code in codes {
        assert!(pattern.is_match(code), "Not a canonical color code: {code:?}");
    }
}

/// Assert a `/api/mosaic` JSON body has the expected shape and return its tiles
pub fn assert_grid_response(
    response: &TestResponse,
    rows: usize,
    columns: usize,
) -> Vec<Vec<String>> {
    assert_ok(response);
    let json: serde_json::Value = response.json();

    assert_eq!(json["rows"].as_u64(), Some(rows as u64));
    assert_eq!(json["columns"].as_u64(), Some(columns as u64));

    let tiles: Vec<Vec<String>> =
        serde_json::from_value(json["tiles"].clone()).expect("tiles should be string rows");
    assert_eq!(tiles.len(), rows);
    assert!(tiles.iter().all(|row| row.len() == columns));
    assert_canonical_codes(tiles.iter().flatten().map(String::as_str));
    tiles
}
