//! Integration tests for the salary apportionment engine.
//!
//! This test suite covers:
//! - Explicit pay cycle ranges (before, within and after the cycle)
//! - Weekly, fortnightly and monthly recurring cycles
//! - Non-standard working days and leap years
//! - The `/apportion` HTTP endpoint, including error responses

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde_json::{json, Value};
use std::str::FromStr;
use tower::ServiceExt;

use salary_apportionment::api::{create_router, AppState};
use salary_apportionment::calculation::calculate_apportioned_salary;
use salary_apportionment::config::ConfigLoader;
use salary_apportionment::error::EngineError;
use salary_apportionment::models::{
    EmploymentContract, PayCycle, PayCycleKind, PayCycleRange, WorkingDays,
};

// =============================================================================
// Test Helpers
// =============================================================================

fn create_test_state() -> AppState {
    let config = ConfigLoader::load("./config/payroll.yaml").expect("Failed to load config");
    AppState::new(config)
}

fn create_router_for_test() -> Router {
    create_router(create_test_state())
}

fn decimal(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn date(s: &str) -> NaiveDate {
    NaiveDate::from_str(s).unwrap()
}

/// The reference contract: 1000 per cycle, Monday to Friday, starting Tuesday 2023-01-17.
fn base_contract() -> EmploymentContract {
    EmploymentContract {
        salary: decimal("1000"),
        working_days: WorkingDays::MONDAY_TO_FRIDAY,
        start_date: date("2023-01-17"),
    }
}

fn january_2023() -> PayCycleRange {
    PayCycleRange::new(date("2023-01-01"), date("2023-01-31")).unwrap()
}

fn assert_amount_approx(actual: Decimal, expected: &str) {
    assert_eq!(
        actual.round_dp(2),
        decimal(expected).round_dp(2),
        "Expected amount {}, got {}",
        expected,
        actual
    );
}

async fn post_apportion(router: Router, body: Value) -> (StatusCode, Value) {
    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/apportion")
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

fn create_request(salary: &str, working_days: Option<Vec<u8>>, start_date: &str, pay_cycle: Value) -> Value {
    let mut contract = json!({
        "salary": salary,
        "start_date": start_date,
    });
    if let Some(days) = working_days {
        contract["working_days"] = json!(days);
    }
    json!({
        "contract": contract,
        "pay_cycle": pay_cycle,
    })
}

fn assert_amount_field(result: &Value, field: &str, expected: &str) {
    let actual = result[field].as_str().unwrap();
    assert_eq!(
        decimal(actual).normalize(),
        decimal(expected).normalize(),
        "Expected {} {}, got {}",
        field,
        expected,
        actual
    );
}

// =============================================================================
// Pay Cycle Range
// =============================================================================

#[test]
fn test_range_full_salary_when_started_before_cycle() {
    let contract = EmploymentContract {
        start_date: date("2022-12-15"),
        ..base_contract()
    };
    let amount = calculate_apportioned_salary(&contract, january_2023()).unwrap();
    assert_eq!(amount, decimal("1000"));
}

#[test]
fn test_range_zero_when_started_after_cycle() {
    let contract = EmploymentContract {
        start_date: date("2023-02-01"),
        ..base_contract()
    };
    let amount = calculate_apportioned_salary(&contract, january_2023()).unwrap();
    assert_eq!(amount, Decimal::ZERO);
}

#[test]
fn test_range_mid_cycle_start() {
    // 11 working days out of 22
    let amount = calculate_apportioned_salary(&base_contract(), january_2023()).unwrap();
    assert_amount_approx(amount, "500");
}

#[test]
fn test_range_custom_june_window() {
    // June 2023 has 22 weekdays; 9 remain from Tuesday 20th
    let contract = EmploymentContract {
        salary: decimal("6000"),
        start_date: date("2023-06-20"),
        ..base_contract()
    };
    let range = PayCycleRange::new(date("2023-06-01"), date("2023-06-30")).unwrap();
    let amount = calculate_apportioned_salary(&contract, range).unwrap();
    assert_amount_approx(amount, "2454.55");
}

#[test]
fn test_range_without_working_days_is_zero() {
    let range = PayCycleRange::new(date("2023-01-21"), date("2023-01-22")).unwrap();
    let contract = EmploymentContract {
        start_date: date("2023-01-22"),
        ..base_contract()
    };
    let amount = calculate_apportioned_salary(&contract, range).unwrap();
    assert_eq!(amount, Decimal::ZERO);
}

// =============================================================================
// Recurring Cycles
// =============================================================================

#[test]
fn test_weekly_full_week() {
    let contract = EmploymentContract {
        start_date: date("2023-01-16"),
        ..base_contract()
    };
    let amount = calculate_apportioned_salary(&contract, PayCycleKind::Weekly).unwrap();
    assert_eq!(amount, decimal("1000"));
}

#[test]
fn test_weekly_partial_week() {
    // 4 out of 5 working days
    let amount = calculate_apportioned_salary(&base_contract(), PayCycleKind::Weekly).unwrap();
    assert_amount_approx(amount, "800");
}

#[test]
fn test_weekly_mid_week_start_wednesday() {
    let contract = EmploymentContract {
        start_date: date("2023-06-07"),
        ..base_contract()
    };
    let amount = calculate_apportioned_salary(&contract, PayCycleKind::Weekly).unwrap();
    assert_amount_approx(amount, "600");
}

#[test]
fn test_fortnightly_full_fortnight() {
    let contract = EmploymentContract {
        start_date: date("2023-01-16"),
        ..base_contract()
    };
    let amount = calculate_apportioned_salary(&contract, PayCycleKind::Fortnightly).unwrap();
    assert_eq!(amount, decimal("1000"));
}

#[test]
fn test_fortnightly_partial_fortnight() {
    let amount =
        calculate_apportioned_salary(&base_contract(), PayCycleKind::Fortnightly).unwrap();
    assert_amount_approx(amount, "900");
}

#[test]
fn test_fortnightly_second_block_of_june() {
    // Block 2023-06-01..=2023-06-14 has 10 weekdays; 8 remain from Monday 5th
    let contract = EmploymentContract {
        salary: decimal("2000"),
        start_date: date("2023-06-05"),
        ..base_contract()
    };
    let amount = calculate_apportioned_salary(&contract, PayCycleKind::Fortnightly).unwrap();
    assert_amount_approx(amount, "1600");
}

#[test]
fn test_monthly_full_month() {
    let contract = EmploymentContract {
        start_date: date("2023-01-01"),
        ..base_contract()
    };
    let amount = calculate_apportioned_salary(&contract, PayCycleKind::Monthly).unwrap();
    assert_eq!(amount, decimal("1000"));
}

#[test]
fn test_monthly_partial_month() {
    // 11 out of 22 working days
    let amount = calculate_apportioned_salary(&base_contract(), PayCycleKind::Monthly).unwrap();
    assert_amount_approx(amount, "500");
}

// =============================================================================
// Edge Cases
// =============================================================================

#[test]
fn test_non_standard_working_days() {
    let contract = EmploymentContract {
        working_days: WorkingDays::from_day_numbers(&[0, 6]).unwrap(),
        start_date: date("2023-01-21"),
        ..base_contract()
    };
    let amount = calculate_apportioned_salary(&contract, PayCycleKind::Weekly).unwrap();
    assert_amount_approx(amount, "1000");
}

#[test]
fn test_part_time_monday_wednesday_friday() {
    // June 2023 has 13 Mon/Wed/Fri days; 11 remain from Wednesday 7th
    let contract = EmploymentContract {
        salary: decimal("3000"),
        working_days: WorkingDays::from_day_numbers(&[1, 3, 5]).unwrap(),
        start_date: date("2023-06-07"),
    };
    let amount = calculate_apportioned_salary(&contract, PayCycleKind::Monthly).unwrap();
    assert_amount_approx(amount, "2538.46");
}

#[test]
fn test_leap_year_february() {
    let contract = EmploymentContract {
        start_date: date("2024-02-01"),
        ..base_contract()
    };
    let amount = calculate_apportioned_salary(&contract, PayCycleKind::Monthly).unwrap();
    assert_eq!(amount, decimal("1000"));
}

#[test]
fn test_different_salary_amounts() {
    let contract = EmploymentContract {
        salary: decimal("5000"),
        start_date: date("2023-01-16"),
        ..base_contract()
    };
    let amount = calculate_apportioned_salary(&contract, PayCycleKind::Monthly).unwrap();
    assert_amount_approx(amount, "2727.27");
}

#[test]
fn test_unsupported_pay_cycle() {
    let result = PayCycle::from_value(&json!("UNSUPPORTED"));
    match result {
        Err(err @ EngineError::UnsupportedPayCycle { .. }) => {
            assert_eq!(err.to_string(), "Unsupported pay cycle: UNSUPPORTED");
        }
        _ => panic!("Expected UnsupportedPayCycle error"),
    }
}

#[test]
fn test_resolved_pay_cycle_dispatches_to_same_result() {
    let cycle = PayCycle::from_value(&json!({
        "start_date": "2023-01-01",
        "end_date": "2023-01-31"
    }))
    .unwrap();
    let via_value = calculate_apportioned_salary(&base_contract(), cycle).unwrap();
    let via_type = calculate_apportioned_salary(&base_contract(), january_2023()).unwrap();
    assert_eq!(via_value, via_type);
}

// =============================================================================
// HTTP API
// =============================================================================

#[tokio::test]
async fn test_api_monthly_partial() {
    let router = create_router_for_test();
    let request = create_request("1000", Some(vec![1, 2, 3, 4, 5]), "2023-01-17", json!("MONTHLY"));

    let (status, result) = post_apportion(router, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_amount_field(&result, "amount", "500");
    assert_amount_field(&result, "rounded_amount", "500.00");
    assert_eq!(result["pay_cycle_kind"], "MONTHLY");
    assert_eq!(result["cycle"]["start_date"], "2023-01-01");
    assert_eq!(result["cycle"]["end_date"], "2023-01-31");
    assert_eq!(result["days_worked"], 11);
    assert_eq!(result["working_days_in_cycle"], 22);
    assert_eq!(result["basis"], "pro_rata");
    assert!(result["calculation_id"].is_string());
}

#[tokio::test]
async fn test_api_weekly_uses_default_working_days() {
    let router = create_router_for_test();
    let request = create_request("1000", None, "2023-01-17", json!("WEEKLY"));

    let (status, result) = post_apportion(router, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_amount_field(&result, "amount", "800");
    assert_eq!(result["working_days_in_cycle"], 5);
}

#[tokio::test]
async fn test_api_rounds_amount() {
    let router = create_router_for_test();
    let request = create_request("5000", None, "2023-01-16", json!("MONTHLY"));

    let (status, result) = post_apportion(router, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_amount_field(&result, "rounded_amount", "2727.27");
    assert_ne!(result["amount"], result["rounded_amount"]);
}

#[tokio::test]
async fn test_api_range_with_timestamps() {
    let router = create_router_for_test();
    let request = create_request(
        "1000",
        None,
        "2023-01-17T16:30:00",
        json!({ "start_date": "2023-01-01T00:00:00Z", "end_date": "2023-01-31T23:59:59Z" }),
    );

    let (status, result) = post_apportion(router, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_amount_field(&result, "amount", "500");
    assert_eq!(result["pay_cycle_kind"], Value::Null);
}

#[tokio::test]
async fn test_api_started_before_range() {
    let router = create_router_for_test();
    let request = create_request(
        "1000",
        None,
        "2022-12-15",
        json!({ "start_date": "2023-01-01", "end_date": "2023-01-31" }),
    );

    let (status, result) = post_apportion(router, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_amount_field(&result, "amount", "1000");
    assert_eq!(result["basis"], "started_before_cycle");
}

#[tokio::test]
async fn test_api_audit_trace_records_steps() {
    let router = create_router_for_test();
    let request = create_request("1000", None, "2023-01-17", json!("FORTNIGHTLY"));

    let (status, result) = post_apportion(router, request).await;

    assert_eq!(status, StatusCode::OK);
    let steps = result["audit_trace"]["steps"].as_array().unwrap();
    let rule_ids: Vec<&str> = steps.iter().map(|s| s["rule_id"].as_str().unwrap()).collect();
    assert_eq!(
        rule_ids,
        vec!["pay_cycle_resolution", "working_days_in_cycle", "days_worked", "proration"]
    );
    assert_eq!(steps[3]["reasoning"], "$1000 x 9 / 10 = $900");
}

#[tokio::test]
async fn test_api_fortnight_crossing_month_warns() {
    let router = create_router_for_test();
    let request = create_request("1000", None, "2023-01-30", json!("FORTNIGHTLY"));

    let (status, result) = post_apportion(router, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["cycle"]["end_date"], "2023-02-11");
    let warnings = result["audit_trace"]["warnings"].as_array().unwrap();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0]["code"], "FORTNIGHT_CROSSES_MONTH");
}

#[tokio::test]
async fn test_api_no_working_days_warns() {
    let router = create_router_for_test();
    let request = create_request(
        "1000",
        None,
        "2023-01-21",
        json!({ "start_date": "2023-01-21", "end_date": "2023-01-22" }),
    );

    let (status, result) = post_apportion(router, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_amount_field(&result, "amount", "0");
    assert_eq!(result["basis"], "no_working_days");
    assert_eq!(
        result["audit_trace"]["warnings"][0]["code"],
        "NO_WORKING_DAYS_IN_CYCLE"
    );
}

#[tokio::test]
async fn test_api_unsupported_pay_cycle() {
    let router = create_router_for_test();
    let request = create_request("1000", None, "2023-01-17", json!("UNSUPPORTED"));

    let (status, result) = post_apportion(router, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(result["code"], "UNSUPPORTED_PAY_CYCLE");
    assert_eq!(result["message"], "Unsupported pay cycle: UNSUPPORTED");
}

#[tokio::test]
async fn test_api_lower_case_pay_cycle_is_unsupported() {
    let router = create_router_for_test();
    let request = create_request("1000", None, "2023-01-17", json!("weekly"));

    let (status, result) = post_apportion(router, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(result["code"], "UNSUPPORTED_PAY_CYCLE");
    assert_eq!(result["message"], "Unsupported pay cycle: weekly");
}

#[tokio::test]
async fn test_api_very_large_salary_is_bounded() {
    let router = create_router_for_test();
    let salary = (Decimal::MAX / Decimal::from(10)).to_string();
    let request = create_request(&salary, None, "2023-01-17", json!("MONTHLY"));

    let (status, result) = post_apportion(router, request).await;

    assert_eq!(status, StatusCode::OK);
    let amount = decimal(result["amount"].as_str().unwrap());
    assert!(amount > Decimal::ZERO);
    assert!(amount <= decimal(&salary));
}

#[tokio::test]
async fn test_api_pay_cycle_object_without_dates() {
    let router = create_router_for_test();
    let request = create_request("1000", None, "2023-01-17", json!({ "kind": "WEEKLY" }));

    let (status, result) = post_apportion(router, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(result["code"], "UNSUPPORTED_PAY_CYCLE");
}

#[tokio::test]
async fn test_api_inverted_range() {
    let router = create_router_for_test();
    let request = create_request(
        "1000",
        None,
        "2023-01-17",
        json!({ "start_date": "2023-01-31", "end_date": "2023-01-01" }),
    );

    let (status, result) = post_apportion(router, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(result["code"], "INVALID_PAY_CYCLE_RANGE");
}

#[tokio::test]
async fn test_api_negative_salary() {
    let router = create_router_for_test();
    let request = create_request("-10", None, "2023-01-17", json!("WEEKLY"));

    let (status, result) = post_apportion(router, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(result["code"], "INVALID_CONTRACT");
}

#[tokio::test]
async fn test_api_invalid_working_day_number() {
    let router = create_router_for_test();
    let request = create_request("1000", Some(vec![1, 9]), "2023-01-17", json!("WEEKLY"));

    let (status, result) = post_apportion(router, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(result["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_api_missing_contract() {
    let router = create_router_for_test();

    let (status, result) = post_apportion(router, json!({ "pay_cycle": "WEEKLY" })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(result["code"], "VALIDATION_ERROR");
    assert!(result["message"].as_str().unwrap().contains("missing field"));
}

#[tokio::test]
async fn test_api_malformed_json() {
    let router = create_router_for_test();
    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/apportion")
                .header("Content-Type", "application/json")
                .body(Body::from("{ not json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body_bytes).unwrap();
    assert_eq!(json["code"], "MALFORMED_JSON");
}

#[tokio::test]
async fn test_api_missing_content_type() {
    let router = create_router_for_test();
    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/apportion")
                .body(Body::from(
                    create_request("1000", None, "2023-01-17", json!("WEEKLY")).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body_bytes).unwrap();
    assert_eq!(json["code"], "MISSING_CONTENT_TYPE");
}
