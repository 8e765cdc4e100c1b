use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::extract::{Path, Query};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::get;
use axum::{Json, Router};
use chrono::NaiveDate;
use moneyboard_api::{BudgetClient, BudgetSource, Dashboard, FetchError, ViewSettings};
use moneyboard_core::{Applied, DateWindow, MonthQuery};
use moneyboard_ingest::IngestMode;
use serde_json::{json, Value};

/// Serve `app` on an ephemeral port and return its base URL.
async fn spawn(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

async fn categories(Query(q): Query<HashMap<String, String>>) -> (StatusCode, Json<Value>) {
    if q.get("month").map(String::as_str) != Some("3") || q.get("year").map(String::as_str) != Some("2024") {
        return (StatusCode::NOT_FOUND, Json(json!({"detail": "Budget not found"})));
    }
    (
        StatusCode::OK,
        Json(json!([
            {"_id": "a1", "category": "Groceries", "value": 400, "spent": 310.4},
            {"_id": "a2", "category": "Transport", "value": 120, "spent": 45},
            {"_id": "a3", "category": "Broken", "value": 10}
        ])),
    )
}

async fn ranged(Path((start, end)): Path<(String, String)>) -> Json<Value> {
    assert_eq!(start, "2024-02-29");
    assert_eq!(end, "2024-03-07");
    // newest first, like the real backend
    Json(json!([
        {"date": "2024-03-07", "price": 12.5},
        {"date": "2024-03-07", "price": 7.5},
        {"date": "2024-03-05", "price": 3},
        {"date": "2024-03-01", "price": 40.1}
    ]))
}

fn app() -> Router {
    Router::new()
        .route("/budget/category/all", get(categories))
        .route("/expense/ranged/:start/:end", get(ranged))
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 7).unwrap()
}

#[tokio::test]
async fn test_fetch_category_budgets() {
    let base = spawn(app()).await;
    let client = BudgetClient::new(&base).unwrap();

    let records = client
        .category_budgets(MonthQuery { month: 3, year: 2024 })
        .await
        .unwrap();

    // The malformed entry is dropped at the boundary
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].category_name, "Groceries");
    assert_eq!(records[1].spent, 45.0);
}

#[tokio::test]
async fn test_strict_ingest_surfaces_bad_record() {
    let base = spawn(app()).await;
    let client = BudgetClient::builder(&base)
        .ingest_mode(IngestMode::Strict)
        .build()
        .unwrap();

    let err = client
        .category_budgets(MonthQuery { month: 3, year: 2024 })
        .await
        .unwrap_err();
    assert!(matches!(err, FetchError::Ingest(_)), "got {err:?}");
}

#[tokio::test]
async fn test_http_error_status() {
    let base = spawn(app()).await;
    let client = BudgetClient::new(&base).unwrap();

    let err = client
        .category_budgets(MonthQuery { month: 1, year: 1999 })
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(404));
    assert!(err.to_string().contains("Budget not found"));
}

#[tokio::test]
async fn test_fetch_ranged_expenses_keeps_server_order() {
    let base = spawn(app()).await;
    let client = BudgetClient::new(&base).unwrap();

    let records = client
        .ranged_expenses(DateWindow::trailing(today(), 7))
        .await
        .unwrap();
    let dates: Vec<&str> = records.iter().map(|r| r.date.as_str()).collect();
    assert_eq!(dates, vec!["2024-03-07", "2024-03-07", "2024-03-05", "2024-03-01"]);
}

#[tokio::test]
async fn test_bearer_token_is_sent() {
    async fn echo(headers: HeaderMap) -> Json<Value> {
        let auth = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        Json(json!([{"_id": "x", "category": auth, "value": 1, "spent": 0}]))
    }
    let base = spawn(Router::new().route("/budget/category/all", get(echo))).await;
    let client = BudgetClient::builder(&base)
        .bearer_token(Some("s3cret".to_string()))
        .build()
        .unwrap();

    let records = client
        .category_budgets(MonthQuery { month: 3, year: 2024 })
        .await
        .unwrap();
    assert_eq!(records[0].category_name, "Bearer s3cret");
}

#[tokio::test]
async fn test_dashboard_end_to_end() {
    let base = spawn(app()).await;
    let client = BudgetClient::new(&base).unwrap();
    let mut dash = Dashboard::new(client, ViewSettings::default());

    let (c, t) = dash.refresh_all(today()).await;
    assert_eq!((c, t), (Applied::Updated, Applied::Updated));

    let view = dash.categories.data().unwrap();
    assert_eq!(view.header.amount, "$355");
    assert_eq!(view.progress.ratio_label, "68%");

    let series = dash.trend.data().unwrap();
    let ys: Vec<&str> = series.points.iter().map(|p| p.y.as_str()).collect();
    assert_eq!(ys, vec!["40.10", "3.00", "20.00"]);
}

#[tokio::test]
async fn test_failed_refresh_keeps_stale_series() {
    // First call succeeds, every later call is a 500
    let calls = Arc::new(AtomicUsize::new(0));
    let handler_calls = calls.clone();
    let flaky = Router::new().route(
        "/expense/ranged/:start/:end",
        get(move || {
            let calls = handler_calls.clone();
            async move {
                if calls.fetch_add(1, Ordering::SeqCst) == 0 {
                    (StatusCode::OK, Json(json!([{"date": "2024-03-06", "price": 9}])))
                } else {
                    (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({"detail": "db down"})))
                }
            }
        }),
    );
    let base = spawn(flaky).await;
    let mut dash = Dashboard::new(BudgetClient::new(&base).unwrap(), ViewSettings::default());

    assert_eq!(dash.refresh_trend(today()).await, Applied::Updated);
    assert_eq!(dash.refresh_trend(today()).await, Applied::Failed);

    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert!(dash.trend.error().unwrap().contains("500"));
    let stale = dash.trend.data().expect("stale series kept");
    assert_eq!(stale.points[0].y, "9.00");
}

#[tokio::test]
async fn test_unreachable_server_is_transport_error() {
    // Bind then drop to get a port nobody listens on
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = BudgetClient::new(&format!("http://{addr}")).unwrap();
    let err = client
        .ranged_expenses(DateWindow::trailing(today(), 7))
        .await
        .unwrap_err();
    assert!(matches!(err, FetchError::Transport { .. }), "got {err:?}");
}
