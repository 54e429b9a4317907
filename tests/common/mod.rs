//! Common test utilities: a local stand-in for an IPFS gateway

#![allow(dead_code)]

use axum::{
    extract::Path,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde_json::json;
use std::net::SocketAddr;

/// Metadata CIDs the fake gateway knows about
pub const META_GOOD: &str = "meta-good";
pub const META_BARE: &str = "meta-bare";
pub const META_EMPTY_IMAGE: &str = "meta-empty";
pub const META_NO_IMAGE: &str = "meta-noimage";
pub const META_MALFORMED: &str = "meta-malformed";
pub const META_SERVER_ERROR: &str = "meta-error";
pub const META_UNKNOWN: &str = "meta-unknown";

async fn metadata(Path(cid): Path<String>) -> Response {
    match cid.as_str() {
        META_GOOD => Json(json!({"name": "Good", "image": "ipfs://img-good"})).into_response(),
        META_BARE => Json(json!({"name": "Bare", "image": "img-bare"})).into_response(),
        META_EMPTY_IMAGE => Json(json!({"name": "Empty", "image": ""})).into_response(),
        META_NO_IMAGE => Json(json!({"name": "NoImage"})).into_response(),
        META_MALFORMED => (StatusCode::OK, "this is not json").into_response(),
        META_SERVER_ERROR => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        _ => StatusCode::NOT_FOUND.into_response(),
    }
}

/// Start the fake gateway on an ephemeral port
pub async fn spawn_gateway() -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = Router::new().route("/ipfs/{cid}", get(metadata));

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    addr
}

/// Gateway URL template pointing at a fake gateway
pub fn gateway_template(addr: SocketAddr) -> String {
    format!("http://{addr}/ipfs/{{cid}}")
}

/// Record JSON with the given id and image id
pub fn record_json(id: i64, image_id: &str) -> serde_json::Value {
    json!({
        "id": id,
        "imageId": image_id,
        "rarity": 5,
        "attributes": [{"type": "Eyes", "value": "Laser", "rarity": 1.5}],
        "percentage": 1.0
    })
}
