use super::common::{chain, CountingSource};
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use metadeps::server::{create_router, AppState};
use metadeps::{Component, DependencyResolver, GraphSerializer, MetadataSource};
use tower::ServiceExt;

fn state(source: CountingSource) -> AppState {
    let boxed: Box<dyn MetadataSource> = Box::new(source);
    AppState::new(DependencyResolver::new(boxed), GraphSerializer::new("61.0"))
}

async fn get(state: &AppState, uri: &str) -> (StatusCode, String) {
    let response = create_router(state.clone())
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

#[tokio::test]
async fn requests_share_one_resolver() {
    let source = CountingSource::new(chain());
    let state = state(source.clone());

    let (status, _) = get(&state, "/api/metadata").await;
    assert_eq!(status, StatusCode::OK);

    let uri = "/api/metadata/usage/ApexClass/C?recursive=true";
    let (_, first) = get(&state, uri).await;
    let queries = source.batches().len();
    let (_, second) = get(&state, uri).await;

    assert_eq!(first, second);
    assert_eq!(source.batches().len(), queries);

    let parsed: Vec<Component> = serde_json::from_str(&first).unwrap();
    let ids: Vec<&str> = parsed.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["C", "B", "A"]);
}

#[tokio::test]
async fn recursive_requires_literal_true() {
    let state = state(CountingSource::new(chain()));
    get(&state, "/api/metadata").await;

    let (_, body) = get(&state, "/api/metadata/references/ApexClass/A?recursive=yes").await;
    let parsed: Vec<Component> = serde_json::from_str(&body).unwrap();
    assert_eq!(parsed.len(), 1);
}

#[tokio::test]
async fn error_body_carries_status() {
    let state = state(CountingSource::new(chain()));
    let (status, body) = get(&state, "/api/metadata/usage/ApexClass/A?format=pdf").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["status"], 400);
    assert!(json["error"].as_str().unwrap().contains("pdf"));
}
