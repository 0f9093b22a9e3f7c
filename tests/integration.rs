//! Integration tests for the staffing match HTTP API.
//!
//! Every test drives the router built over `fixtures/staffing.yaml` with the
//! clock pinned to 2026-10-19. Covered:
//! - Requirement listing
//! - Candidate matching and tier buckets
//! - Error envelopes (404, 400, 503)
//! - Revenue dashboard
//! - Employee drill-down
//! - Nationality import

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde_json::Value;
use std::str::FromStr;
use std::sync::Arc;
use tower::ServiceExt;

use staffing_match::api::{AppState, Clock, create_router};
use staffing_match::config::ConfigLoader;
use staffing_match::store::InMemoryStore;

// =============================================================================
// Test Helpers
// =============================================================================

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
}

fn load_store() -> Arc<InMemoryStore> {
    let config = ConfigLoader::load("./config/default").expect("Failed to load config");
    let store = InMemoryStore::load("./fixtures/staffing.yaml", config.proficiency().clone())
        .expect("Failed to load fixture");
    Arc::new(store)
}

fn create_router_over(store: Arc<InMemoryStore>) -> Router {
    let config = ConfigLoader::load("./config/default").expect("Failed to load config");
    let state = AppState::new(store, config).with_clock(Clock::Fixed(today()));
    create_router(state)
}

fn create_router_for_test() -> Router {
    create_router_over(load_store())
}

fn decimal(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn decimal_at(value: &Value) -> Decimal {
    decimal(value.as_str().expect("decimal fields serialize as strings"))
}

async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.oneshot(request).await.unwrap();

    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

async fn get(router: Router, uri: &str) -> (StatusCode, Value) {
    send(router, Request::builder().uri(uri).body(Body::empty()).unwrap()).await
}

async fn post_csv(router: Router, csv: &str) -> (StatusCode, Value) {
    send(
        router,
        Request::builder()
            .method("POST")
            .uri("/employees/nationalities")
            .header("Content-Type", "text/csv")
            .body(Body::from(csv.to_string()))
            .unwrap(),
    )
    .await
}

fn bucket_ids(result: &Value, bucket: &str) -> Vec<String> {
    result["matches"][bucket]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["id"].as_str().unwrap().to_string())
        .collect()
}

fn find_candidate<'a>(result: &'a Value, bucket: &str, id: &str) -> &'a Value {
    result["matches"][bucket]
        .as_array()
        .unwrap()
        .iter()
        .find(|c| c["id"] == id)
        .unwrap_or_else(|| panic!("{} not found in {} bucket", id, bucket))
}

// =============================================================================
// SECTION 1: Requirement Listing
// =============================================================================

#[tokio::test]
async fn test_lists_only_open_requirements() {
    let (status, result) = get(create_router_for_test(), "/requirements").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["success"], true);

    let ids: Vec<&str> = result["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["REQ-0001", "REQ-0002"]);
}

#[tokio::test]
async fn test_requirement_listing_carries_skills_and_age_window() {
    let (_, result) = get(create_router_for_test(), "/requirements").await;
    let first = &result["data"][0];

    assert_eq!(first["customer"], "Sakura Systems");
    assert_eq!(first["minimum_age"], 25);
    assert_eq!(first["maximum_age"], 35);
    assert_eq!(first["number_of_positions"], 2);
    assert_eq!(first["start_date"], "2026-11-01");
    assert_eq!(first["required"][0]["name"], "Java");
    assert_eq!(first["required"][0]["required_level"], 2);
    assert_eq!(first["preferred"][0]["name"], "AWS");
    assert_eq!(first["preferred"][0]["required_level"], 1);
}

// =============================================================================
// SECTION 2: Candidate Matching
// =============================================================================

#[tokio::test]
async fn test_matches_bucket_candidates_by_tier() {
    let (status, result) = get(create_router_for_test(), "/requirements/REQ-0001/matches").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["success"], true);
    assert_eq!(result["requirement"]["id"], "REQ-0001");
    assert_eq!(result["requirement"]["age"], "25-35");
    assert_eq!(result["requirement"]["positions"], 2);

    assert_eq!(bucket_ids(&result, "exceeds"), vec!["EMP-0001"]);
    assert_eq!(bucket_ids(&result, "exact"), vec!["EMP-0003"]);
    assert!(bucket_ids(&result, "near").is_empty());
    assert_eq!(bucket_ids(&result, "potential"), vec!["EMP-0004"]);
}

#[tokio::test]
async fn test_exceeding_japanese_candidate_snapshot() {
    let (_, result) = get(create_router_for_test(), "/requirements/REQ-0001/matches").await;
    let candidate = find_candidate(&result, "exceeds", "EMP-0001");

    assert_eq!(candidate["name"], "Aiko Tanaka");
    assert_eq!(candidate["req_exceeds"], 1);
    assert_eq!(candidate["req_missing"], 0);
    assert_eq!(candidate["pref_matched"], 1);
    assert_eq!(candidate["pref_total"], 1);
    assert!(candidate.get("age_note").is_none());
    assert!(candidate.get("contract_info").is_none());
}

#[tokio::test]
async fn test_other_nationality_is_never_shown() {
    let (_, result) = get(create_router_for_test(), "/requirements/REQ-0001/matches").await;

    for bucket in ["exceeds", "exact", "near", "potential"] {
        assert!(!bucket_ids(&result, bucket).contains(&"EMP-0002".to_string()));
    }
}

#[tokio::test]
async fn test_age_within_tolerance_carries_note() {
    let (_, result) = get(create_router_for_test(), "/requirements/REQ-0001/matches").await;
    let candidate = find_candidate(&result, "exact", "EMP-0003");

    assert_eq!(candidate["age"], 37);
    assert_eq!(candidate["age_note"], "Within ±2 tolerance");
}

#[tokio::test]
async fn test_contract_limited_candidate_reports_availability() {
    // EMP-0004 is placed until 2026-11-05, inside the 10-day window after 2026-11-01
    let (_, result) = get(create_router_for_test(), "/requirements/REQ-0001/matches").await;
    let candidate = find_candidate(&result, "potential", "EMP-0004");

    assert_eq!(candidate["req_near"], 1);
    assert_eq!(candidate["contract_info"]["has_contract"], true);
    assert_eq!(candidate["contract_info"]["ends_on"], "2026-11-05");
    assert_eq!(candidate["contract_info"]["days_until_available"], 17);
}

#[tokio::test]
async fn test_excluded_and_ineligible_employees_are_hidden() {
    let (_, result) = get(create_router_for_test(), "/requirements/REQ-0001/matches").await;
    let shown: Vec<String> = ["exceeds", "exact", "near", "potential"]
        .iter()
        .flat_map(|b| bucket_ids(&result, b))
        .collect();

    // Contract runs past the window
    assert!(!shown.contains(&"EMP-0005".to_string()));
    // Left the company
    assert!(!shown.contains(&"EMP-0006".to_string()));
    // No recorded age
    assert!(!shown.contains(&"EMP-0007".to_string()));
}

#[tokio::test]
async fn test_second_requirement_uses_its_own_nationality() {
    let (status, result) = get(create_router_for_test(), "/requirements/REQ-0002/matches").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(bucket_ids(&result, "potential"), vec!["EMP-0002"]);
    let candidate = find_candidate(&result, "potential", "EMP-0002");
    assert_eq!(candidate["req_exact"], 2);
    assert_eq!(candidate["contract_info"]["days_until_available"], 12);
}

#[tokio::test]
async fn test_closed_requirement_can_still_be_matched_by_id() {
    let (status, result) = get(create_router_for_test(), "/requirements/REQ-0003/matches").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["requirement"]["id"], "REQ-0003");
}

#[tokio::test]
async fn test_repeated_runs_are_identical() {
    let router = create_router_for_test();
    let (_, first) = get(router.clone(), "/requirements/REQ-0001/matches").await;
    let (_, second) = get(router, "/requirements/REQ-0001/matches").await;

    assert_eq!(first, second);
}

// =============================================================================
// SECTION 3: Error Envelopes
// =============================================================================

#[tokio::test]
async fn test_unknown_requirement_is_not_found() {
    let (status, result) = get(create_router_for_test(), "/requirements/REQ-9999/matches").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(result["success"], false);
    assert_eq!(result["code"], "NOT_FOUND");
    assert!(result["message"].as_str().unwrap().contains("REQ-9999"));
}

#[tokio::test]
async fn test_offline_store_is_service_unavailable() {
    let store = load_store();
    let router = create_router_over(store.clone());
    store.set_online(false);

    let (status, result) = get(router.clone(), "/requirements/REQ-0001/matches").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(result["code"], "STORE_UNAVAILABLE");

    let (status, _) = get(router, "/dashboard").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_store_recovers_after_coming_back_online() {
    let store = load_store();
    let router = create_router_over(store.clone());

    store.set_online(false);
    let (status, _) = get(router.clone(), "/requirements").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);

    store.set_online(true);
    let (status, _) = get(router, "/requirements").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_month_out_of_range_is_rejected() {
    // Months are 0-11, so 12 is already past December.
    for uri in ["/dashboard?month=12&year=2026", "/dashboard?month=13&year=2026"] {
        let (status, result) = get(create_router_for_test(), uri).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(result["code"], "VALIDATION");
        assert_eq!(result["details"], "field: month");
    }
}

// =============================================================================
// SECTION 4: Revenue Dashboard
// =============================================================================

#[tokio::test]
async fn test_dashboard_defaults_to_current_month() {
    let (status, result) = get(create_router_for_test(), "/dashboard").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["data"]["selected_month"], 10);
    assert_eq!(result["data"]["selected_year"], 2026);
}

#[tokio::test]
async fn test_dashboard_month_zero_is_january() {
    let (status, result) = get(create_router_for_test(), "/dashboard?month=0&year=2026").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["data"]["selected_month"], 1);
    assert_eq!(result["data"]["selected_year"], 2026);

    // Only CON-0005 runs in January 2026
    let summary = &result["data"]["revenue_summary"];
    assert_eq!(decimal_at(&summary["active_revenue"]), decimal("1000000"));
    assert_eq!(summary["billable_count"], 1);
}

#[tokio::test]
async fn test_dashboard_query_month_is_zero_based() {
    let (_, result) = get(create_router_for_test(), "/dashboard?month=9&year=2026").await;
    assert_eq!(result["data"]["selected_month"], 10);

    let (_, default) = get(create_router_for_test(), "/dashboard").await;
    assert_eq!(result, default);
}

#[tokio::test]
async fn test_dashboard_revenue_and_utilization() {
    let (_, result) = get(create_router_for_test(), "/dashboard?month=9&year=2026").await;
    let summary = &result["data"]["revenue_summary"];
    let utilization = &result["data"]["utilization"];

    // CON-0002 + CON-0004 + CON-0005 run in October
    assert_eq!(decimal_at(&summary["active_revenue"]), decimal("2300000"));
    assert_eq!(summary["billable_count"], 3);
    // 365,000 + 365,000 + 730,000 monthly salary
    assert_eq!(decimal_at(&summary["total_salary_costs"]), decimal("1460000"));
    assert_eq!(decimal_at(&summary["net_margin"]), decimal("840000"));
    assert_eq!(decimal_at(&summary["margin_percentage"]), decimal("36.52"));

    assert_eq!(utilization["total"], 6);
    assert_eq!(utilization["billable"], 3);
    assert_eq!(utilization["on_bench"], 3);
    assert_eq!(decimal_at(&utilization["utilization_percentage"]), decimal("50"));
}

#[tokio::test]
async fn test_dashboard_summary_cards() {
    let (_, result) = get(create_router_for_test(), "/dashboard?month=9&year=2026").await;
    let cards = &result["data"]["summary_cards"];

    // (24,000 + 18,000) daily cost over 31 days
    assert_eq!(cards["on_bench_now"]["count"], 3);
    assert_eq!(decimal_at(&cards["on_bench_now"]["amount"]), decimal("1302000"));

    assert_eq!(cards["expiring_this_month"]["count"], 1);
    assert_eq!(decimal_at(&cards["expiring_this_month"]["amount"]), decimal("0"));

    // 12,000 daily from 2026-11-05 to 2026-11-30
    assert_eq!(cards["expiring_next_month"]["count"], 1);
    assert_eq!(decimal_at(&cards["expiring_next_month"]["amount"]), decimal("300000"));

    // 12,000 daily from 2026-11-05 to 2027-01-30
    assert_eq!(
        decimal_at(&cards["expiring_next_3_months"]["amount"]),
        decimal("1032000")
    );
    assert_eq!(decimal_at(&result["data"]["total_at_risk"]), decimal("1332000"));
    assert_eq!(result["data"]["revenue_summary"]["action_items"], 5);
}

#[tokio::test]
async fn test_dashboard_bench_list_is_costliest_first() {
    let (_, result) = get(create_router_for_test(), "/dashboard?month=9&year=2026").await;
    let bench = result["data"]["on_bench"]["employees"].as_array().unwrap();

    let ids: Vec<&str> = bench.iter().map(|e| e["employee_id"].as_str().unwrap()).collect();
    assert_eq!(ids, vec!["EMP-0001", "EMP-0003", "EMP-0007"]);

    let aiko = &bench[0];
    assert_eq!(aiko["days_on_bench"], 18);
    assert_eq!(aiko["last_client"], "Sakura Systems");
    assert_eq!(aiko["last_contract_end"], "2026-09-30");
    assert_eq!(decimal_at(&aiko["total_loss"]), decimal("432000"));

    let kenji = &bench[1];
    assert_eq!(kenji["days_on_bench"], 0);
    assert!(kenji["last_client"].is_null());
}

#[tokio::test]
async fn test_dashboard_expiring_lists() {
    let (_, result) = get(create_router_for_test(), "/dashboard?month=9&year=2026").await;
    let this_month = &result["data"]["expiring_this_month"];

    let contract = &this_month["contracts"][0];
    assert_eq!(contract["contract_id"], "CON-0002");
    assert_eq!(contract["current_client"], "Siam Retail");
    assert_eq!(contract["days_left"], 12);
    assert_eq!(decimal_at(&this_month["potential_loss_daily"]), decimal("12000"));
    assert_eq!(decimal_at(&this_month["potential_loss_monthly"]), decimal("360000"));
}

// =============================================================================
// SECTION 5: Employee Drill-down
// =============================================================================

#[tokio::test]
async fn test_employee_details_order_skills_and_history() {
    let (status, result) = get(create_router_for_test(), "/employees/EMP-0001").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["success"], true);

    let data = &result["data"];
    assert_eq!(data["employee"]["id"], "EMP-0001");
    assert_eq!(data["employee"]["name"], "Aiko Tanaka");
    assert_eq!(decimal_at(&data["employee"]["annual_ctc"]), decimal("8760000"));

    let skills: Vec<&str> = data["skills"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["name"].as_str().unwrap())
        .collect();
    assert_eq!(skills, vec!["Java", "AWS"]);

    // Full history, cancelled included, latest end first
    let contracts: Vec<&str> = data["contracts"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["id"].as_str().unwrap())
        .collect();
    assert_eq!(contracts, vec!["CON-0007", "CON-0001"]);
    assert_eq!(data["contracts"][0]["status"], "cancelled");
    assert_eq!(data["contracts"][1]["end_date"], "2026-09-30");
}

#[tokio::test]
async fn test_employee_details_cover_former_employees() {
    let (status, result) = get(create_router_for_test(), "/employees/EMP-0006").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["data"]["employee"]["status"], "left");
    assert_eq!(result["data"]["contracts"], serde_json::json!([]));
}

#[tokio::test]
async fn test_unknown_employee_is_not_found() {
    let (status, result) = get(create_router_for_test(), "/employees/EMP-9999").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(result["success"], false);
    assert_eq!(result["code"], "NOT_FOUND");
    assert_eq!(result["message"], "Employee not found: EMP-9999");
}

// =============================================================================
// SECTION 6: Nationality Import
// =============================================================================

#[tokio::test]
async fn test_import_reports_updates_and_skips() {
    let csv = "employee_id,nationality\nEMP-0002,JP\nEMP-9999,JP\nEMP-0003,\n";
    let (status, result) = post_csv(create_router_for_test(), csv).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["data"]["updated"], 1);
    assert_eq!(
        result["data"]["skipped"],
        serde_json::json!(["Row 3: Employee EMP-9999 not found", "Row 4: empty value"])
    );
    assert_eq!(result["data"]["errors"], serde_json::json!([]));
}

#[tokio::test]
async fn test_imported_nationality_changes_matches() {
    let router = create_router_for_test();
    let (status, _) = post_csv(router.clone(), "employee_id,nationality\nEMP-0002,JP\n").await;
    assert_eq!(status, StatusCode::OK);

    // Now Japanese, but placed until 2026-10-31
    let (_, result) = get(router, "/requirements/REQ-0001/matches").await;
    assert_eq!(bucket_ids(&result, "potential"), vec!["EMP-0002", "EMP-0004"]);
}

#[tokio::test]
async fn test_import_without_header_row_data_updates_nothing() {
    let (status, result) = post_csv(create_router_for_test(), "employee_id,nationality\n").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["data"]["updated"], 0);
}
