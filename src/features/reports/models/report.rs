use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use crate::features::auth::model::Employee;

/// Database model for a daily report
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Report {
    pub id: Uuid,
    pub employee_code: String,
    /// Name of the employee at submission time
    pub employee_name: String,
    pub report_date: NaiveDate,
    pub title: String,
    pub content: String,
    /// Soft delete marker; deleted reports stay in the table
    pub delete_flag: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Report {
    pub fn is_owned_by(&self, employee_code: &str) -> bool {
        self.employee_code == employee_code
    }

    pub fn is_active(&self) -> bool {
        !self.delete_flag
    }
}

/// Record handed to the store for an upsert.
///
/// `id` is `None` for a new report and the store assigns one.
#[derive(Debug, Clone)]
pub struct SaveReport {
    pub id: Option<Uuid>,
    pub employee_code: String,
    pub employee_name: String,
    pub report_date: NaiveDate,
    pub title: String,
    pub content: String,
    pub delete_flag: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SaveReport {
    /// New, active report owned by `owner` with both timestamps at `now`
    pub fn new(
        owner: &Employee,
        report_date: NaiveDate,
        title: String,
        content: String,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: None,
            employee_code: owner.code.clone(),
            employee_name: owner.name.clone(),
            report_date,
            title,
            content,
            delete_flag: false,
            created_at: now,
            updated_at: now,
        }
    }
}

impl From<Report> for SaveReport {
    fn from(r: Report) -> Self {
        Self {
            id: Some(r.id),
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
