use axum::routing::post;
use axum::{Json, Router};
use serde_json::json;
use tokio::net::TcpListener;

use ragwire::client::PipelineClient;
use ragwire::config::Config;
use ragwire::params::{self, RawParams};
use ragwire::pipeline::Pipeline;

// Stage receipts: index needs a successful crawl, ask needs a successful
// index. The type system carries the ordering; these tests exercise the
// receipt issuance rules against a mock backend.

async fn spawn_backend(app: Router) -> Pipeline {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    let config = Config {
        base_url: format!("http://{addr}"),
        api_prefix: "/api".to_string(),
        request_timeout: None,
    };
    Pipeline::new(PipelineClient::new(config).unwrap())
}

fn healthy_backend() -> Router {
    Router::new()
        .route(
            "/api/crawl",
            post(|| async { Json(json!({"page_count": 5, "skipped_count": 0, "urls": []})) }),
        )
        .route(
            "/api/index",
            post(|| async { Json(json!({"vector_count": 64, "errors": []})) }),
        )
        .route(
            "/api/ask",
            post(|| async { Json(json!({"answer": "books", "sources": []})) }),
        )
}

#[tokio::test]
async fn receipts_flow_through_all_three_stages() {
    let pipeline = spawn_backend(healthy_backend()).await;

    let crawl_request = params::resolve_crawl(
        &RawParams::new().set("start_url", "https://books.toscrape.com/"),
    )
    .unwrap();
    let (crawled, crawl_outcome) = pipeline.crawl(&crawl_request).await.unwrap();
    assert!(crawl_outcome.is_success());
    let crawled = crawled.expect("successful crawl issues a receipt");

    let index_request = params::resolve_index(&RawParams::new());
    let (indexed, index_outcome) = pipeline.index(&crawled, &index_request).await.unwrap();
    assert!(index_outcome.is_success());
    let indexed = indexed.expect("successful index issues a receipt");

    let ask_request =
        params::resolve_ask(&RawParams::new().set("question", "what is sold?")).unwrap();
    let ask_outcome = pipeline.ask(&indexed, &ask_request).await.unwrap();
    assert_eq!(ask_outcome.payload(), &json!({"answer": "books", "sources": []}));
}

#[tokio::test]
async fn failed_crawl_issues_no_receipt() {
    let app = Router::new().route(
        "/api/crawl",
        post(|| async { Json(json!({"error": "robots.txt forbids crawling"})) }),
    );
    let pipeline = spawn_backend(app).await;

    let crawl_request =
        params::resolve_crawl(&RawParams::new().set("start_url", "https://example.com")).unwrap();
    let (crawled, outcome) = pipeline.crawl(&crawl_request).await.unwrap();
    assert!(crawled.is_none());
    assert!(!outcome.is_success());
}

#[tokio::test]
async fn failed_index_issues_no_receipt() {
    let app = Router::new()
        .route(
            "/api/crawl",
            post(|| async { Json(json!({"page_count": 1, "skipped_count": 0, "urls": []})) }),
        )
        .route(
            "/api/index",
            post(|| async {
                Json(json!({"vector_count": 0, "errors": ["Failed to load pages: missing"]}))
            }),
        );
    let pipeline = spawn_backend(app).await;

    let crawl_request =
        params::resolve_crawl(&RawParams::new().set("start_url", "https://example.com")).unwrap();
    let (crawled, _) = pipeline.crawl(&crawl_request).await.unwrap();
    let crawled = crawled.unwrap();

    let (indexed, outcome) = pipeline
        .index(&crawled, &params::resolve_index(&RawParams::new()))
        .await
        .unwrap();
    assert!(indexed.is_none());
    assert!(!outcome.is_success());
}
