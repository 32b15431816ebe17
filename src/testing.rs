//! In-process stub of the prediction service for tests.

use axum::{http::StatusCode, routing::{get, post}, Json, Router};
use serde_json::Value;

use crate::config::ClientConfig;
use crate::logic::service::RentClient;

/// Serve `router` on an ephemeral localhost port, returning its origin
pub(crate) async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

pub(crate) fn client_for(origin: &str) -> RentClient {
    RentClient::new(ClientConfig::with_api_url(origin)).unwrap()
}

/// `POST /predict` always answering `status` with `body`
pub(crate) fn predict_answering(status: StatusCode, body: Value) -> Router {
    Router::new().route(
        "/predict",
        post(move || {
            let body = body.clone();
            async move { (status, Json(body)) }
        }),
    )
}

/// `GET /neighborhoods` always answering `status` with `body`
pub(crate) fn neighborhoods_answering(status: StatusCode, body: Value) -> Router {
    Router::new().route(
        "/neighborhoods",
        get(move || {
            let body = body.clone();
            async move { (status, Json(body)) }
        }),
    )
}
