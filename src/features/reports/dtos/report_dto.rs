use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::reports::models::Report;

/// Request DTO for submitting or updating a daily report
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct ReportInputDto {
    /// Date the report covers
    #[validate(required(message = "Report date is required"))]
    pub report_date: Option<NaiveDate>,

    #[validate(length(min = 1, max = 100, message = "Title must be 1-100 characters"))]
    #[serde(default)]
    pub title: String,

    #[validate(length(min = 1, max = 600, message = "Content must be 1-600 characters"))]
    #[serde(default)]
    pub content: String,
}

/// Response DTO for report
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReportResponseDto {
    pub id: Uuid,
    pub employee_code: String,
    pub employee_name: String,
    pub report_date: NaiveDate,
    pub title: String,
    pub content: String,
    pub delete_flag: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Report> for ReportResponseDto {
    fn from(r: Report) -> Self {
        Self {
            id: r.id,
            employee_code: r.employee_code,
            employee_name: r.employee_name,
            report_date: r.report_date,
            title: r.title,
            content: r.content,
            delete_flag: r.delete_flag,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(title: &str, content: &str) -> ReportInputDto {
        ReportInputDto {
            report_date: NaiveDate::from_ymd_opt(2024, 1, 10),
            title: title.to_string(),
            content: content.to_string(),
        }
    }

    #[test]
    fn test_valid_input() {
        assert!(input("Standup", "standup notes").validate().is_ok());
    }

    #[test]
    fn test_missing_date_is_rejected() {
        let mut dto = input("Standup", "standup notes");
        dto.report_date = None;

        let errors = dto.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("report_date"));
    }

    #[test]
    fn test_length_limits_count_characters() {
        // 100 multi-byte characters are within the limit
        assert!(input(&"日".repeat(100), "ok").validate().is_ok());
        assert!(input(&"日".repeat(101), "ok").validate().is_err());
        assert!(input("ok", &"a".repeat(600)).validate().is_ok());
        assert!(input("ok", &"a".repeat(601)).validate().is_err());
    }

    #[test]
    fn test_empty_fields_are_rejected() {
        let errors = input("", "").validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("title"));
        assert!(fields.contains_key("content"));
    }

    #[test]
    fn test_missing_fields_deserialize_for_validation() {
        let dto: ReportInputDto = serde_json::from_str("{}").unwrap();
        assert!(dto.report_date.is_none());
        assert!(dto.validate().is_err());
    }
}
