//! Integration tests for the table loader against an in-process rdb stub.
//!
//! The stub binds a real listener on port 0 and records what the loader
//! sent, so these tests cover the full request path: URL composition,
//! CSV body, headers, and status handling.

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use rdb_loader::{Dataset, RdbClient, TableLoader};
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};

/// One request captured by the stub server.
#[derive(Clone, Debug)]
struct ReceivedLoad {
    table: String,
    content_type: String,
    body: String,
}

#[derive(Clone)]
struct StubState {
    received: Arc<Mutex<Vec<ReceivedLoad>>>,
    status: StatusCode,
    response: Value,
}

async fn load_handler(
    Path(table): Path<String>,
    State(state): State<StubState>,
    headers: HeaderMap,
    body: String,
) -> (StatusCode, Json<Value>) {
    let content_type = headers
        .get("content-type")
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string();
    state.received.lock().unwrap().push(ReceivedLoad {
        table,
        content_type,
        body,
    });
    (state.status, Json(state.response.clone()))
}

/// Start a stub rdb server and return its port plus the captured requests.
async fn spawn_stub(status: StatusCode, response: Value) -> (u16, Arc<Mutex<Vec<ReceivedLoad>>>) {
    let received = Arc::new(Mutex::new(Vec::new()));
    let state = StubState {
        received: received.clone(),
        status,
        response,
    };
    let app = Router::new()
        .route("/api/v1/schema/{table}/load", post(load_handler))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (port, received)
}

fn sample_dataset() -> Dataset {
    Dataset::try_new(
        vec![
            "col2_string".to_string(),
            "col1_int".to_string(),
            "col3_string".to_string(),
            "col4_int".to_string(),
        ],
        vec![
            vec!["AMP".into(), "1234".into(), "APAC".into(), 1234.into()],
            vec!["ANZ".into(), "4564".into(), "APAC".into(), 5678.into()],
        ],
    )
    .unwrap()
}

#[tokio::test]
async fn test_load_round_trip() {
    let (port, received) = spawn_stub(
        StatusCode::OK,
        json!({"Status": "Succesfully loaded data"}),
    )
    .await;

    let client = RdbClient::try_new("127.0.0.1", port.to_string()).unwrap();
    let loader = TableLoader::new(client, "t1", sample_dataset());
    assert_eq!(
        loader.endpoint(),
        format!("http://127.0.0.1:{}/api/v1/schema/t1/load", port)
    );

    let result = loader.load().await.unwrap();
    assert_eq!(result.status_code, 200);
    assert!(result.succeeded());
    assert_eq!(result.error, None);

    let received = received.lock().unwrap();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].table, "t1");
    assert_eq!(received[0].content_type, "text/csv");
    assert_eq!(
        received[0].body,
        "col2_string,col1_int,col3_string,col4_int\nAMP,1234,APAC,1234\nANZ,4564,APAC,5678\n"
    );
}

#[tokio::test]
async fn test_rejection_surfaces_server_error() {
    let (port, _received) = spawn_stub(
        StatusCode::INTERNAL_SERVER_ERROR,
        json!({"error": "error loading data"}),
    )
    .await;

    let client = RdbClient::try_new("127.0.0.1", port.to_string()).unwrap();
    let loader = TableLoader::new(client, "t1", sample_dataset());

    // A rejection is a normal result, not an Err
    let result = loader.load().await.unwrap();
    assert_eq!(result.status_code, 500);
    assert!(!result.succeeded());
    assert_eq!(result.error.as_deref(), Some("error loading data"));
}

#[tokio::test]
async fn test_empty_dataset_still_posts() {
    let (port, received) = spawn_stub(StatusCode::OK, json!({"Status": "ok"})).await;

    let dataset =
        Dataset::try_new(vec!["a".to_string(), "b".to_string()], Vec::new()).unwrap();
    let client = RdbClient::try_new("127.0.0.1", port.to_string()).unwrap();
    let loader = TableLoader::new(client, "empty", dataset);

    let result = loader.load().await.unwrap();
    assert!(result.succeeded());

    let received = received.lock().unwrap();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].body, "a,b\n");
}

#[tokio::test]
async fn test_unreachable_host_is_transport_error() {
    // Grab a free port, then release it so nothing is listening there
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let client = RdbClient::try_new("127.0.0.1", port.to_string()).unwrap();
    let loader = TableLoader::new(client, "t1", sample_dataset());

    let result = loader.load().await;
    assert!(result.is_err());
}
