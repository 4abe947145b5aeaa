use axum::routing::get;
use axum::Router;
use bea_api::{ApiKey, DataFetcher, FetchError};
use serde_json::{json, Value};

// Serve `body` on a local port.
async fn mock_server(body: String) -> String {
    let app = Router::new().route(
        "/api/data",
        get(move || {
            let body = body.clone();
            async move { body }
        }),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{addr}/api/data")
}

#[tokio::test]
async fn get_dataset_list_types_the_directory() {
    let body = json!({"BEAAPI": {"Results": {"Dataset": [
        {"DatasetName": "NIPA", "DatasetDescription": "Standard NIPA tables"},
        {"DatasetName": "Regional", "DatasetDescription": "Regional data sets"},
    ]}}});
    let url = mock_server(body.to_string()).await;

    let fetcher = DataFetcher::with_base_url(url);
    let datasets = fetcher
        .get_dataset_list(&ApiKey::new("KEY123"))
        .await
        .unwrap();

    assert_eq!(datasets.len(), 2);
    assert_eq!(datasets[0].name, "NIPA");
    assert_eq!(datasets[1].name, "Regional");
    assert_eq!(datasets[1].description, "Regional data sets");
}

#[tokio::test]
async fn missing_dataset_path_is_an_api_error() {
    let body = r#"{"BEAAPI":{"Error":{"APIErrorCode":"2","APIErrorDescription":"UserId missing"}}}"#;
    let url = mock_server(body.to_string()).await;

    let fetcher = DataFetcher::with_base_url(url);
    let err = fetcher
        .get_dataset_list(&ApiKey::new("KEY123"))
        .await
        .unwrap_err();

    match err {
        FetchError::Api { payload } => {
            assert_eq!(payload, serde_json::from_str::<Value>(body).unwrap());
        }
        other => panic!("expected an API error, got {other:?}"),
    }
}
