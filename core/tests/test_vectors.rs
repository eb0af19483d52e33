//! Verify encoding and request building against JSON test vectors stored in
//! `test-vectors/`.
//!
//! Parameter lists are stored as `[key, value]` pairs so the expected order
//! does not depend on JSON object key order.

use cors_core::{build_request, encode_params, HttpMethod, ParamMap};

/// Parse the method string from test vectors into `HttpMethod`.
fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        "PUT" => HttpMethod::Put,
        "DELETE" => HttpMethod::Delete,
        other => panic!("unknown method: {other}"),
    }
}

fn parse_headers(value: &serde_json::Value) -> Vec<(String, String)> {
    value
        .as_array()
        .unwrap()
        .iter()
        .map(|h| {
            let arr = h.as_array().unwrap();
            (
                arr[0].as_str().unwrap().to_string(),
                arr[1].as_str().unwrap().to_string(),
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Encoding
// ---------------------------------------------------------------------------

#[test]
fn encode_test_vectors() {
    let raw = include_str!("../../test-vectors/encode.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let params: ParamMap = serde_json::from_value(case["params"].clone()).unwrap();
        let expected = case["expected"].as_str().unwrap();

        assert_eq!(encode_params(&params), expected, "{name}: encoded");
    }
}

// ---------------------------------------------------------------------------
// Request building
// ---------------------------------------------------------------------------

#[test]
fn request_test_vectors() {
    let raw = include_str!("../../test-vectors/requests.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let method = parse_method(case["method"].as_str().unwrap());
        let url = case["url"].as_str().unwrap();
        let data: Option<ParamMap> = serde_json::from_value(case["data"].clone()).unwrap();
        let expected_req = &case["expected_request"];

        let req = build_request(method, url, data.as_ref());
        assert_eq!(req.method, method, "{name}: method");
        assert_eq!(req.url, url, "{name}: url");
        assert_eq!(req.headers, parse_headers(&expected_req["headers"]), "{name}: headers");
        assert_eq!(
            req.body.as_deref(),
            expected_req["body"].as_str(),
            "{name}: body"
        );
    }
}
