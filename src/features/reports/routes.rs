use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::reports::handlers;
use crate::features::reports::services::ReportService;

/// Create routes for the reports feature
///
/// All routes are protected; the auth middleware is applied by the caller.
pub fn routes(service: Arc<ReportService>) -> Router {
    Router::new()
        .route(
            "/api/reports",
            get(handlers::list_reports).post(handlers::create_report),
        )
        .route(
            "/api/reports/{id}",
            get(handlers::get_report)
                .put(handlers::update_report)
                .delete(handlers::delete_report),
        )
        .with_state(service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::auth::model::Employee;
    use crate::features::reports::store::MemoryReportStore;
    use crate::shared::test_helpers::{
        create_admin_employee, create_general_employee, with_employee_auth,
    };
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::{json, Value};

    fn server_for(service: &Arc<ReportService>, employee: Employee) -> TestServer {
        let app = with_employee_auth(routes(Arc::clone(service)), employee);
        TestServer::new(app).unwrap()
    }

    fn service() -> Arc<ReportService> {
        Arc::new(ReportService::new(Arc::new(MemoryReportStore::new())))
    }

    fn body(date: &str, content: &str) -> Value {
        json!({
            "report_date": date,
            "title": "Daily report",
            "content": content,
        })
    }

    #[tokio::test]
    async fn test_create_and_get_report() {
        let service = service();
        let server = server_for(&service, create_general_employee("E001", "Alice"));

        let response = server
            .post("/api/reports")
            .json(&body("2024-01-10", "standup notes"))
            .await;
        response.assert_status(StatusCode::CREATED);
        let created: Value = response.json();
        assert_eq!(created["success"], true);
        assert_eq!(created["data"]["employee_code"], "E001");
        assert_eq!(created["data"]["delete_flag"], false);

        let id = created["data"]["id"].as_str().unwrap().to_string();
        let fetched: Value = server.get(&format!("/api/reports/{}", id)).await.json();
        assert_eq!(fetched["data"]["content"], "standup notes");
        assert_eq!(fetched["data"]["report_date"], "2024-01-10");
    }

    #[tokio::test]
    async fn test_duplicate_date_returns_datecheck_error() {
        let service = service();
        let server = server_for(&service, create_general_employee("E001", "Alice"));

        server
            .post("/api/reports")
            .json(&body("2024-01-10", "first"))
            .await
            .assert_status(StatusCode::CREATED);

        let response = server
            .post("/api/reports")
            .json(&body("2024-01-10", "second"))
            .await;
        response.assert_status(StatusCode::CONFLICT);
        let error: Value = response.json();
        assert_eq!(error["success"], false);
        assert_eq!(error["message"], "既に登録されている日付です");
        assert_eq!(error["errors"][0], "DATECHECK_ERROR");
    }

    #[tokio::test]
    async fn test_invalid_input_returns_field_errors() {
        let service = service();
        let server = server_for(&service, create_general_employee("E001", "Alice"));

        let response = server
            .post("/api/reports")
            .json(&json!({ "title": "", "content": "text" }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let error: Value = response.json();
        let errors = error["errors"].as_array().unwrap();
        assert_eq!(errors[0], "VALIDATION_ERROR");
        assert!(errors
            .iter()
            .any(|e| e.as_str().unwrap().starts_with("report_date:")));
        assert!(errors
            .iter()
            .any(|e| e.as_str().unwrap().starts_with("title:")));
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let service = service();
        let server = server_for(&service, create_general_employee("E001", "Alice"));

        let response = server
            .post("/api/reports")
            .json(&json!({ "report_date": "not-a-date", "title": "t", "content": "c" }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_get_missing_report_is_not_found() {
        let service = service();
        let server = server_for(&service, create_general_employee("E001", "Alice"));

        let response = server
            .get(&format!("/api/reports/{}", uuid::Uuid::now_v7()))
            .await;
        response.assert_status(StatusCode::NOT_FOUND);
        let error: Value = response.json();
        assert_eq!(error["errors"][0], "NOT_FOUND_ERROR");
    }

    #[tokio::test]
    async fn test_update_and_delete_report() {
        let service = service();
        let server = server_for(&service, create_general_employee("E001", "Alice"));

        let created: Value = server
            .post("/api/reports")
            .json(&body("2024-01-10", "before"))
            .await
            .json();
        let id = created["data"]["id"].as_str().unwrap().to_string();

        let updated = server
            .put(&format!("/api/reports/{}", id))
            .json(&body("2024-01-10", "after"))
            .await;
        updated.assert_status_ok();
        let updated: Value = updated.json();
        assert_eq!(updated["data"]["content"], "after");
        assert_eq!(updated["data"]["created_at"], created["data"]["created_at"]);

        let deleted = server.delete(&format!("/api/reports/{}", id)).await;
        deleted.assert_status_ok();
        let deleted: Value = deleted.json();
        assert_eq!(deleted["data"]["delete_flag"], true);

        let fetched: Value = server.get(&format!("/api/reports/{}", id)).await.json();
        assert_eq!(fetched["data"]["delete_flag"], true);
    }

    #[tokio::test]
    async fn test_update_and_delete_missing_report() {
        let service = service();
        let server = server_for(&service, create_general_employee("E001", "Alice"));
        let path = format!("/api/reports/{}", uuid::Uuid::now_v7());

        let response = server.put(&path).json(&body("2024-01-10", "x")).await;
        response.assert_status(StatusCode::NOT_FOUND);
        let error: Value = response.json();
        assert_eq!(error["errors"][0], "NOT_FOUND_ERROR");

        server
            .delete(&path)
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_listing_depends_on_role() {
        let service = service();
        let alice = server_for(&service, create_general_employee("E001", "Alice"));
        let bob = server_for(&service, create_general_employee("E002", "Bob"));
        let admin = server_for(&service, create_admin_employee());

        alice
            .post("/api/reports")
            .json(&body("2024-01-10", "a1"))
            .await
            .assert_status(StatusCode::CREATED);
        alice
            .post("/api/reports")
            .json(&body("2024-01-11", "a2"))
            .await
            .assert_status(StatusCode::CREATED);
        bob.post("/api/reports")
            .json(&body("2024-01-10", "b1"))
            .await
            .assert_status(StatusCode::CREATED);

        let own: Value = alice.get("/api/reports").await.json();
        assert_eq!(own["meta"]["total"], 2);
        assert!(own["data"]
            .as_array()
            .unwrap()
            .iter()
            .all(|r| r["employee_code"] == "E001"));

        let all: Value = admin.get("/api/reports").await.json();
        assert_eq!(all["meta"]["total"], 3);
    }

    #[tokio::test]
    async fn test_requests_without_identity_are_unauthorized() {
        let server = TestServer::new(routes(service())).unwrap();

        server
            .get("/api/reports")
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }
}
