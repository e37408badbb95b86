mod common;

use axum::http::StatusCode;
use chrono::Duration;
use serde_json::{json, Value};

use common::{empty_context, request_json, request_raw, seeded_context};

fn new_risk() -> Value {
  json!({
    "description": "Vendor Lock-in",
    "category": "Technical",
    "severity": 3,
    "impact": "Migration cost grows every sprint",
    "probability": "Medium"
  })
}

fn descriptions(body: &Value) -> Vec<String> {
  body["risks"]
    .as_array()
    .expect("risks array")
    .iter()
    .map(|risk| risk["description"].as_str().unwrap_or_default().to_string())
    .collect()
}

// Status
// ======

#[tokio::test]
async fn test_health() {
  let ctx = empty_context();
  let (status, body, request_id) = request_raw(&ctx.app, "GET", "/api/health", "").await;

  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["status"], "healthy");
  assert_eq!(body["version"], "1.0.0");
  assert_eq!(body["timestamp"], "2025-06-02T09:00:00.000Z");
  assert!(request_id.is_some());
}

#[tokio::test]
async fn test_unknown_route() {
  let ctx = empty_context();
  let (status, body) = request_json(&ctx.app, "GET", "/api/velocity", None).await;

  assert_eq!(status, StatusCode::NOT_FOUND);
  assert_eq!(body["error"], "ROUTE_NOT_FOUND");
}

#[tokio::test]
async fn test_schema_lists_record_types() {
  let ctx = empty_context();
  let (status, body) = request_json(&ctx.app, "GET", "/api/schema", None).await;

  assert_eq!(status, StatusCode::OK);
  assert!(body["schemas"]["RiskEntry"].is_object());
  assert!(body["schemas"]["ScheduleView"].is_object());
}

// Schedule
// ========

#[tokio::test]
async fn test_reference_schedule() {
  let ctx = seeded_context().await;
  let (status, body) = request_json(&ctx.app, "GET", "/api/schedule", None).await;

  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["sprintNumber"], 12);
  assert_eq!(body["plannedPoints"], 89);
  assert_eq!(body["completionPercentage"], 73);
  assert_eq!(body["status"], "On Track");
  assert_eq!(body["lastUpdated"], body["createdAt"]);
  assert_eq!(body["burndownData"]["actual"][10], Value::Null);
}

#[tokio::test]
async fn test_missing_schedule() {
  let ctx = empty_context();
  let (status, body) = request_json(&ctx.app, "GET", "/api/schedule", None).await;

  assert_eq!(status, StatusCode::NOT_FOUND);
  assert_eq!(body, json!({ "message": "No schedule data found", "error": "SCHEDULE_NOT_FOUND" }));
}

#[tokio::test]
async fn test_new_schedule_becomes_latest() {
  let ctx = seeded_context().await;
  ctx.clock.advance(Duration::minutes(1));

  let sprint = json!({
    "sprintNumber": 13,
    "plannedPoints": 40,
    "completedPoints": 23,
    "daysRemaining": 9,
    "burndownData": { "ideal": [40, 20, 0], "actual": [40, null, null] }
  });
  let (status, created) = request_json(&ctx.app, "POST", "/api/schedule", Some(sprint)).await;
  assert_eq!(status, StatusCode::CREATED);
  assert_eq!(created["completionPercentage"], 58);

  let (_, latest) = request_json(&ctx.app, "GET", "/api/schedule", None).await;
  assert_eq!(latest["id"], created["id"]);
  assert_eq!(latest["status"], "Behind Schedule");
}

#[tokio::test]
async fn test_schedule_validation() {
  let ctx = empty_context();
  let sprint = json!({
    "sprintNumber": 1,
    "plannedPoints": 0,
    "completedPoints": 0,
    "daysRemaining": 10,
    "burndownData": { "ideal": [], "actual": [] }
  });
  let (status, body) = request_json(&ctx.app, "POST", "/api/schedule", Some(sprint)).await;

  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert_eq!(body["message"], "Failed to create schedule");
  assert!(body["error"].as_str().unwrap().contains("plannedPoints"));
}

#[tokio::test]
async fn test_schedule_update_merges() {
  let ctx = seeded_context().await;
  let (_, current) = request_json(&ctx.app, "GET", "/api/schedule", None).await;
  let uri = format!("/api/schedule/{}", current["id"].as_str().unwrap());

  let (status, updated) = request_json(&ctx.app, "PUT", &uri, Some(json!({ "completedPoints": 80 }))).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(updated["completedPoints"], 80);
  assert_eq!(updated["plannedPoints"], 89);
  assert_eq!(updated["completionPercentage"], 90);

  let (status, body) = request_json(&ctx.app, "PUT", "/api/schedule/not-an-id", Some(json!({}))).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
  assert_eq!(body["error"], "SCHEDULE_NOT_FOUND");
}

// Budget
// ======

#[tokio::test]
async fn test_reference_budget() {
  let ctx = seeded_context().await;
  let (status, body) = request_json(&ctx.app, "GET", "/api/budget", None).await;

  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["remainingBudget"], 27500.0);
  assert_eq!(body["status"], "At Risk");
  assert_eq!(body["monthlySpend"]["Jun"], 22000.0);
  assert_eq!(body["lastUpdated"], body["createdAt"]);
}

#[tokio::test]
async fn test_missing_budget() {
  let ctx = empty_context();
  let (status, body) = request_json(&ctx.app, "GET", "/api/budget", None).await;

  assert_eq!(status, StatusCode::NOT_FOUND);
  assert_eq!(body, json!({ "message": "No budget data found", "error": "BUDGET_NOT_FOUND" }));
}

#[tokio::test]
async fn test_budget_overspend() {
  let ctx = empty_context();
  let budget = json!({
    "totalBudget": 1000,
    "spentAmount": 1250,
    "burnRate": 125,
    "projectedCompletion": 1400,
    "monthlySpend": {}
  });
  let (status, created) = request_json(&ctx.app, "POST", "/api/budget", Some(budget)).await;

  assert_eq!(status, StatusCode::CREATED);
  assert_eq!(created["remainingBudget"], -250.0);
  assert_eq!(created["status"], "Over Budget");

  let uri = format!("/api/budget/{}", created["id"].as_str().unwrap());
  let (status, body) = request_json(&ctx.app, "PUT", &uri, Some(json!({ "spentAmount": -1 }))).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert_eq!(body["message"], "Failed to update budget");
}

// Risks
// =====

#[tokio::test]
async fn test_reference_risks() {
  let ctx = seeded_context().await;
  let (status, body) = request_json(&ctx.app, "GET", "/api/risks", None).await;

  assert_eq!(status, StatusCode::OK);
  assert_eq!(
    descriptions(&body),
    vec!["API Dependencies", "Resource Allocation", "Scope Creep", "Performance Issues", "Security Compliance"]
  );
  assert_eq!(body["summary"], json!({ "total": 5, "high": 3, "medium": 1, "low": 1 }));
  assert_eq!(body["lastUpdated"], "2025-06-02T09:00:00Z");
}

#[tokio::test]
async fn test_risk_filters() {
  let ctx = seeded_context().await;

  let (_, body) = request_json(&ctx.app, "GET", "/api/risks?minSeverity=4", None).await;
  assert_eq!(body["summary"]["total"], 3);
  assert_eq!(body["summary"]["low"], 0);

  let (_, body) = request_json(&ctx.app, "GET", "/api/risks?minSeverity=3&limit=2", None).await;
  assert_eq!(descriptions(&body), vec!["API Dependencies", "Resource Allocation"]);
  assert_eq!(body["summary"], json!({ "total": 2, "high": 2, "medium": 0, "low": 0 }));

  let (_, body) = request_json(&ctx.app, "GET", "/api/risks?minSeverity=abc&limit=", None).await;
  assert_eq!(body["summary"]["total"], 5);

  let (_, body) = request_json(&ctx.app, "GET", "/api/risks?limit=-1", None).await;
  assert_eq!(body["summary"]["total"], 4);
  assert_eq!(body["summary"]["low"], 0);

  let (_, body) = request_json(&ctx.app, "GET", "/api/risks?minSeverity=9", None).await;
  assert_eq!(body["risks"], json!([]));
}

#[tokio::test]
async fn test_risk_query_edge_cases() {
  let ctx = seeded_context().await;

  // A repeated key is not a number, so it is ignored rather than rejected
  let (status, body, _) = request_raw(&ctx.app, "GET", "/api/risks?limit=1&limit=2", "").await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["summary"]["total"], 5);

  let (_, body) = request_json(&ctx.app, "GET", "/api/risks?limit=1&limit=2&minSeverity=4", None).await;
  assert_eq!(body["summary"]["total"], 3);

  let (_, body) = request_json(&ctx.app, "GET", "/api/risks?limit=-inf", None).await;
  assert_eq!(body["summary"]["total"], 5);

  // Whitespace reads as 0
  let (_, body) = request_json(&ctx.app, "GET", "/api/risks?limit=%20", None).await;
  assert_eq!(body["risks"], json!([]));

  let (_, body) = request_json(&ctx.app, "GET", "/api/risks?minSeverity=%204%20", None).await;
  assert_eq!(body["summary"]["total"], 3);
}

#[tokio::test]
async fn test_create_risk_defaults_to_open() {
  let ctx = seeded_context().await;
  let (status, created) = request_json(&ctx.app, "POST", "/api/risks", Some(new_risk())).await;

  assert_eq!(status, StatusCode::CREATED);
  assert_eq!(created["status"], "open");
  assert!(created["id"].is_string());
  assert!(created.get("owner").is_none());

  let (_, body) = request_json(&ctx.app, "GET", "/api/risks", None).await;
  assert_eq!(body["summary"]["medium"], 2);
  // Equal severity keeps insertion order
  assert_eq!(descriptions(&body)[3], "Performance Issues");
  assert_eq!(descriptions(&body)[4], "Vendor Lock-in");
}

#[tokio::test]
async fn test_create_risk_validation() {
  let ctx = empty_context();

  let mut missing = new_risk();
  missing.as_object_mut().unwrap().remove("impact");
  let (status, body) = request_json(&ctx.app, "POST", "/api/risks", Some(missing)).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert_eq!(body["message"], "Failed to create risk");
  assert!(body["error"].is_string());

  let mut severe = new_risk();
  severe["severity"] = json!(6);
  let (status, body) = request_json(&ctx.app, "POST", "/api/risks", Some(severe)).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert!(body["error"].as_str().unwrap().contains("severity"));

  let (status, _, _) = request_raw(&ctx.app, "POST", "/api/risks", "{ not json").await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_risk_merges_supplied_fields() {
  let ctx = seeded_context().await;
  let (_, body) = request_json(&ctx.app, "GET", "/api/risks", None).await;
  let original = body["risks"][0].clone();
  let uri = format!("/api/risks/{}", original["id"].as_str().unwrap());

  let (status, updated) = request_json(&ctx.app, "PUT", &uri, Some(json!({ "status": "mitigated" }))).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(updated["status"], "mitigated");
  for field in ["id", "description", "category", "severity", "impact", "probability", "owner", "createdAt"] {
    assert_eq!(updated[field], original[field], "{field} changed");
  }

  let (_, cleared) = request_json(&ctx.app, "PUT", &uri, Some(json!({ "owner": null }))).await;
  assert!(cleared.get("owner").is_none());
  assert_eq!(cleared["status"], "mitigated");
}

#[tokio::test]
async fn test_update_risk_errors() {
  let ctx = seeded_context().await;
  let missing = format!("/api/risks/{}", uuid::Uuid::new_v4());

  let (status, body) = request_json(&ctx.app, "PUT", &missing, Some(json!({ "status": "open" }))).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
  assert_eq!(body, json!({ "message": "Risk not found", "error": "RISK_NOT_FOUND" }));

  let (status, body) = request_json(&ctx.app, "PUT", &missing, Some(json!({ "severity": 9 }))).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert_eq!(body["message"], "Failed to update risk");

  let (status, _) = request_json(&ctx.app, "PUT", &missing, Some(json!({ "status": "closed" }))).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_risk() {
  let ctx = seeded_context().await;
  let (_, created) = request_json(&ctx.app, "POST", "/api/risks", Some(new_risk())).await;
  let uri = format!("/api/risks/{}", created["id"].as_str().unwrap());

  let (status, body) = request_json(&ctx.app, "DELETE", &uri, None).await;
  assert_eq!(status, StatusCode::NO_CONTENT);
  assert_eq!(body, Value::Null);

  let (status, body) = request_json(&ctx.app, "DELETE", &uri, None).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
  assert_eq!(body["error"], "RISK_NOT_FOUND");

  let (_, body) = request_json(&ctx.app, "GET", "/api/risks", None).await;
  assert_eq!(body["summary"]["total"], 5);
}

// Insights
// ========

fn three_high_risks() -> Value {
  json!({
    "scheduleData": { "completionPercentage": 73 },
    "budgetData": { "burnRate": 78 },
    "riskData": [{ "severity": 4 }, { "severity": 5 }, { "severity": 4 }, { "severity": 2 }]
  })
}

#[tokio::test]
async fn test_reference_insights() {
  let ctx = seeded_context().await;
  let (status, body) = request_json(&ctx.app, "GET", "/api/insights", None).await;

  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["generatedAt"], body["lastGenerated"]);
  assert_eq!(body["recommendations"][0]["title"], "Critical API Dependency Risk");
  assert_eq!(body["performanceMetrics"]["budgetEfficiency"]["value"], 97);
  assert_eq!(body["actionItems"][2]["priority"], "opportunity");
}

#[tokio::test]
async fn test_missing_insights() {
  let ctx = empty_context();
  let (status, body) = request_json(&ctx.app, "GET", "/api/insights", None).await;

  assert_eq!(status, StatusCode::NOT_FOUND);
  assert_eq!(body["error"], "INSIGHTS_NOT_FOUND");
  assert_eq!(
    body["message"],
    "No insights available. Generate insights by posting project data to /api/insights"
  );
}

#[tokio::test]
async fn test_fresh_report_is_returned_unchanged() {
  let ctx = seeded_context().await;
  let (_, seeded) = request_json(&ctx.app, "GET", "/api/insights", None).await;

  ctx.clock.advance(Duration::minutes(9) + Duration::seconds(59));
  let (status, body) = request_json(&ctx.app, "POST", "/api/insights", Some(three_high_risks())).await;

  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["id"], seeded["id"]);
  assert_eq!(body["lastGenerated"], seeded["lastGenerated"]);
}

#[tokio::test]
async fn test_stale_report_is_regenerated() {
  let ctx = seeded_context().await;
  let (_, seeded) = request_json(&ctx.app, "GET", "/api/insights", None).await;

  ctx.clock.advance(Duration::minutes(10));
  let (status, body) = request_json(&ctx.app, "POST", "/api/insights", Some(three_high_risks())).await;

  assert_eq!(status, StatusCode::OK);
  assert_ne!(body["id"], seeded["id"]);
  assert_eq!(body["lastGenerated"], "2025-06-02T09:10:00Z");
  assert_eq!(body["generatedAt"], body["lastGenerated"]);

  let titles: Vec<&str> =
    body["recommendations"].as_array().unwrap().iter().map(|r| r["title"].as_str().unwrap()).collect();
  assert_eq!(titles, vec!["Budget optimization opportunity", "Urgent: Address high-severity risks"]);
  assert!(body["recommendations"][1]["description"].as_str().unwrap().starts_with("3 high-severity"));
  assert_eq!(body["actionItems"], json!([{
    "priority": "high", "title": "Risk mitigation strategy review", "dueDate": "2 days", "category": "risk"
  }]));
  assert_eq!(body["performanceMetrics"]["riskMitigationRate"]["value"], -8);

  // The regenerated report is now the latest
  let (_, latest) = request_json(&ctx.app, "GET", "/api/insights", None).await;
  assert_eq!(latest["id"], body["id"]);
}

#[tokio::test]
async fn test_first_report_is_generated_from_posted_data() {
  let ctx = empty_context();
  let body = json!({ "scheduleData": { "completionPercentage": 62 }, "riskData": "not a list" });
  let (status, report) = request_json(&ctx.app, "POST", "/api/insights", Some(body)).await;

  assert_eq!(status, StatusCode::OK);
  assert_eq!(report["recommendations"][0]["title"], "Schedule recovery needed");
  assert_eq!(report["actionItems"][0]["dueDate"], "3 days");
  assert_eq!(report["performanceMetrics"]["teamVelocityTrend"]["value"], -5);
  assert_eq!(report["performanceMetrics"]["codeQualityScore"]["value"], 92);
}

#[tokio::test]
async fn test_empty_insight_request() {
  let ctx = empty_context();
  let (status, report, _) = request_raw(&ctx.app, "POST", "/api/insights", "").await;

  assert_eq!(status, StatusCode::OK);
  assert_eq!(report["recommendations"], json!([]));
  assert_eq!(report["performanceMetrics"]["riskMitigationRate"]["comparison"], "0 high-priority risks successfully mitigated");

  let (status, _, _) = request_raw(&ctx.app, "POST", "/api/insights", "{ broken").await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_numeric_strings_in_insight_request() {
  let ctx = empty_context();
  let body = json!({
    "scheduleData": { "completionPercentage": "60" },
    "budgetData": { "burnRate": "90" },
    "riskData": [{ "severity": "5" }, { "severity": "4" }, { "severity": "4" }]
  });
  let (status, report) = request_json(&ctx.app, "POST", "/api/insights", Some(body)).await;

  assert_eq!(status, StatusCode::OK);
  let titles: Vec<&str> =
    report["recommendations"].as_array().unwrap().iter().map(|r| r["title"].as_str().unwrap()).collect();
  assert_eq!(
    titles,
    vec!["Schedule recovery needed", "Critical: Budget overrun risk", "Urgent: Address high-severity risks"]
  );
  let due: Vec<&str> = report["actionItems"].as_array().unwrap().iter().map(|a| a["dueDate"].as_str().unwrap()).collect();
  assert_eq!(due, vec!["3 days", "1 day", "2 days"]);
}

#[tokio::test]
async fn test_null_completion_reads_as_zero() {
  let ctx = empty_context();
  let body = json!({ "scheduleData": { "completionPercentage": null }, "budgetData": { "burnRate": "high" } });
  let (status, report) = request_json(&ctx.app, "POST", "/api/insights", Some(body)).await;

  assert_eq!(status, StatusCode::OK);
  assert_eq!(report["recommendations"].as_array().unwrap().len(), 1);
  assert_eq!(report["recommendations"][0]["title"], "Schedule recovery needed");
}
