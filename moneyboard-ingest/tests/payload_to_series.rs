use moneyboard_core::{compress_response, compute_totals, AreaSeries, CategoryView, MonthQuery, Palette};
use moneyboard_ingest::{ingest_categories, ingest_expenses, IngestMode};
use serde_json::json;

/// A month of category budgets straight from the API, one entry malformed.
#[test]
fn test_category_payload_to_view() {
    let payload = json!([
        {"_id": "65a1", "email": "a@b.c", "month": 3, "year": 2024, "category": "Groceries", "value": 400, "spent": 310.4},
        {"_id": "65a2", "email": "a@b.c", "month": 3, "year": 2024, "category": "Transport", "value": 120, "spent": 45},
        {"_id": "65a3", "email": "a@b.c", "month": 3, "year": 2024, "category": "Broken", "value": 50}
    ]);

    let report = ingest_categories(&payload, IngestMode::Lenient).unwrap();
    assert_eq!(report.accepted.len(), 2);
    assert_eq!(report.rejected.len(), 1);

    let summary = compute_totals(&report.accepted, &Palette::default());
    let view = CategoryView::build(&summary, MonthQuery { month: 3, year: 2024 }, "$");

    assert_eq!(view.header.amount, "$355");
    assert_eq!(view.progress.ratio_label, "68%");
    // 520 - 355.4 = 164.6 -> 165
    assert_eq!(view.ring.last().unwrap().value, 165.0);
}

/// Newest-first expenses as the ranged endpoint returns them.
#[test]
fn test_expense_payload_to_area_series() {
    let payload = json!([
        {"date": "2024-03-07", "price": 12.5},
        {"date": "2024-03-07", "price": 7.5},
        {"date": "2024-03-05", "price": 3},
        {"date": "2024-03-01", "price": 40.1}
    ]);

    let report = ingest_expenses(&payload, IngestMode::Strict).unwrap();
    let points = compress_response(report.accepted).unwrap();
    let series = AreaSeries::from_points(points);

    let ys: Vec<&str> = series.points.iter().map(|p| p.y.as_str()).collect();
    assert_eq!(ys, vec!["40.10", "3.00", "20.00"]);
    assert!(series.points.windows(2).all(|w| w[0].x < w[1].x));
    assert_eq!(series.max_y, 40.1);
}
