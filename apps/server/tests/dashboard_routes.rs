use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::Value;
use std::path::Path;
use tempfile::{tempdir, TempDir};
use tower::ServiceExt;
use tradeboard_server::{api::app_router, build_state, config::Config};

fn write_fixture(dir: &Path) {
    std::fs::write(
        dir.join("meta.json"),
        r#"{"equity": 1000, "cash": 250, "daily_pnl": -4.5, "total_pl": 120, "as_of": "2024-01-08T21:00:00Z"}"#,
    )
    .unwrap();
    std::fs::write(
        dir.join("positions_20240108.csv"),
        "Ticker,Shares,Total Value\nAAPL,2,300\nMSFT,1,450\n",
    )
    .unwrap();
    std::fs::write(
        dir.join("trades_20240108.csv"),
        "Date,Ticker,Side,Shares,OrderStatus\n2024-01-08,MSFT,BUY,1,filled\n",
    )
    .unwrap();
}

fn app_for(dir: &TempDir, public_base_url: Option<&str>) -> Router {
    let data_dir = dir.path().to_string_lossy().to_string();
    let public_base_url = public_base_url.map(str::to_string);
    let config = Config::from_lookup(|key| match key {
        "TB_DATA_DIR" => Some(data_dir.clone()),
        "TB_PUBLIC_BASE_URL" => public_base_url.clone(),
        _ => None,
    })
    .unwrap();
    let state = build_state(&config).unwrap();
    app_router(state, &config)
}

async fn get(app: Router, uri: &str, host: Option<&str>) -> (StatusCode, Vec<u8>) {
    let mut request = Request::builder().uri(uri);
    if let Some(host) = host {
        request = request.header("host", host);
    }
    let response = app
        .oneshot(request.body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, body.to_vec())
}

async fn get_json(app: Router, uri: &str, host: Option<&str>) -> (StatusCode, Value) {
    let (status, body) = get(app, uri, host).await;
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn dashboard_reflects_data_directory() {
    let dir = tempdir().unwrap();
    write_fixture(dir.path());
    let app = app_for(&dir, None);

    let (status, view) = get_json(app, "/api/v1/dashboard", Some("desk.local:8080")).await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(view["account"]["equity"], 1000.0);
    assert_eq!(view["account"]["asOf"], "2024-01-08T21:00:00Z");
    assert_eq!(view["metrics"]["totalPositionsValue"], 750.0);
    assert_eq!(view["metrics"]["topHolding"]["ticker"], "MSFT");
    assert_eq!(view["metrics"]["dailyPnlBadge"]["direction"], "down");
    assert_eq!(view["featuredSymbol"], "MSFT");
    assert_eq!(view["positions"].as_array().unwrap().len(), 2);
    assert_eq!(view["trades"][0]["side"], "Buy");
    assert_eq!(
        view["links"]["positions"],
        "http://desk.local:8080/files/positions_20240108.csv"
    );
    assert_eq!(view["links"]["equityImage"], Value::Null);
    assert_eq!(view["sources"]["trades"], "trades_20240108.csv");
    assert_eq!(view["refreshIntervalSecs"], 300);
    assert_eq!(view["session"]["serverNow"], view["generatedAt"]);
}

#[tokio::test]
async fn dashboard_uses_configured_base_url() {
    let dir = tempdir().unwrap();
    write_fixture(dir.path());
    let app = app_for(&dir, Some("https://desk.example.com/files/"));

    let (_, view) = get_json(app, "/api/v1/dashboard", Some("internal:8080")).await;
    assert_eq!(
        view["links"]["trades"],
        "https://desk.example.com/files/trades_20240108.csv"
    );
}

#[tokio::test]
async fn empty_directory_renders_empty_dashboard() {
    let dir = tempdir().unwrap();
    let app = app_for(&dir, None);

    let (status, view) = get_json(app, "/api/v1/dashboard", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["account"]["equity"], Value::Null);
    assert_eq!(view["metrics"]["exposurePct"], 0.0);
    assert_eq!(view["featuredSymbol"], "NASDAQ:SPY");
    assert_eq!(view["links"]["positions"], Value::Null);
}

#[tokio::test]
async fn snapshot_and_metrics_endpoints() {
    let dir = tempdir().unwrap();
    write_fixture(dir.path());
    let app = app_for(&dir, None);

    let (status, snapshot) = get_json(app.clone(), "/api/v1/snapshot", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(snapshot["cash"], 250.0);
    assert_eq!(snapshot["totalPnl"], 120.0);
    assert_eq!(snapshot["positions"][0]["Ticker"], "AAPL");
    assert_eq!(snapshot["positionsSource"]["fileName"], "positions_20240108.csv");
    assert!(snapshot["positionsSource"].get("path").is_none());

    let (status, metrics) = get_json(app, "/api/v1/metrics", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(metrics["positionCount"], 2);
    assert_eq!(metrics["tradeCount"], 1);
    assert_eq!(metrics["exposurePct"], 0.75);
}

#[tokio::test]
async fn session_at_explicit_instant() {
    let dir = tempdir().unwrap();
    let app = app_for(&dir, None);

    // Monday 2024-01-08 10:00 in New York
    let (status, session) =
        get_json(app, "/api/v1/session?at=2024-01-08T15:00:00Z", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(session["isOpen"], true);
    assert_eq!(session["statusText"], "NASDAQ OPEN");
    assert_eq!(session["label"], "Closes in");
    assert_eq!(session["target"], "2024-01-08T21:00:00Z");
    assert_eq!(session["targetIso"], "2024-01-08T22:00:00+01:00");
    assert_eq!(session["remainingText"], "06:00:00");
}

#[tokio::test]
async fn session_rejects_invalid_instant() {
    let dir = tempdir().unwrap();
    let app = app_for(&dir, None);

    let (status, body) = get_json(app, "/api/v1/session?at=tomorrow", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 400);
    assert!(body["message"].as_str().unwrap().contains("tomorrow"));
}

#[tokio::test]
async fn files_are_served_from_data_directory() {
    let dir = tempdir().unwrap();
    write_fixture(dir.path());
    let app = app_for(&dir, None);

    let (status, body) = get(app.clone(), "/files/trades_20240108.csv", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(String::from_utf8(body).unwrap().starts_with("Date,Ticker"));

    let (status, _) = get(app, "/files/missing.csv", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
