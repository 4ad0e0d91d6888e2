//! Persistence port for reports.
//!
//! Stores contain no business rules. Every `save` is a single atomic
//! upsert; the only rule a store enforces is the (employee, date)
//! uniqueness among active reports, as a backstop behind the service check.

mod memory;
mod postgres;

pub use memory::MemoryReportStore;
pub use postgres::PgReportStore;

use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

use crate::features::reports::models::{Report, SaveReport};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Active report already exists for {employee_code} on {report_date}")]
    Duplicate {
        employee_code: String,
        report_date: NaiveDate,
    },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Report persistence. Listings are ordered by report date, newest first.
#[async_trait]
pub trait ReportStore: Send + Sync {
    /// Every report, soft-deleted ones included
    async fn find_all(&self) -> Result<Vec<Report>, StoreError>;

    /// Every report owned by the employee, soft-deleted ones included
    async fn find_by_owner(&self, employee_code: &str) -> Result<Vec<Report>, StoreError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Report>, StoreError>;

    async fn find_by_owner_and_date(
        &self,
        employee_code: &str,
        report_date: NaiveDate,
    ) -> Result<Vec<Report>, StoreError>;

    /// Insert when `report.id` is `None`, otherwise overwrite the stored row.
    ///
    /// `created_at` of an existing row is never changed.
    ///
    /// # Errors
    ///
    /// - `Duplicate` if an active report would share employee and date
    /// - `Database` on persistence failure
    async fn save(&self, report: SaveReport) -> Result<Report, StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_store_is_object_safe() {
        fn _accepts_dyn(_store: &dyn ReportStore) {}
    }
}
