use axum::{
    extract::Path,
    http::{header, HeaderMap, Method, StatusCode},
    routing::any,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;

/// What `/echo` saw of the incoming request.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Echo {
    pub method: String,
    pub content_type: Option<String>,
    pub body: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StatusReply {
    pub status: u16,
}

pub const NOT_JSON: &str = "this body is not json";

/// JSON object whose string value is the single byte 0xFF, not valid UTF-8.
pub const INVALID_UTF8_JSON: &[u8] = b"{\"a\":\"\xff\"}";

pub fn app() -> Router {
    Router::new()
        .route("/echo", any(echo))
        .route("/status/{code}", any(status))
        .route("/text", any(text))
        .route("/large/{len}", any(large))
        .route("/invalid-utf8", any(invalid_utf8))
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn echo(method: Method, headers: HeaderMap, body: String) -> Json<Echo> {
    log::info!("{method} /echo ({} bytes)", body.len());
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    Json(Echo {
        method: method.to_string(),
        content_type,
        body,
    })
}

async fn status(
    method: Method,
    Path(code): Path<u16>,
) -> Result<(StatusCode, Json<StatusReply>), StatusCode> {
    log::info!("{method} /status/{code}");
    let status = StatusCode::from_u16(code).map_err(|_| StatusCode::BAD_REQUEST)?;
    Ok((status, Json(StatusReply { status: code })))
}

async fn text(method: Method) -> &'static str {
    log::info!("{method} /text");
    NOT_JSON
}

/// A JSON string literal of `len` ASCII characters.
async fn large(method: Method, Path(len): Path<usize>) -> String {
    log::info!("{method} /large/{len}");
    let mut body = String::with_capacity(len + 2);
    body.push('"');
    body.extend(std::iter::repeat('x').take(len));
    body.push('"');
    body
}

async fn invalid_utf8(method: Method) -> Vec<u8> {
    log::info!("{method} /invalid-utf8");
    INVALID_UTF8_JSON.to_vec()
}
