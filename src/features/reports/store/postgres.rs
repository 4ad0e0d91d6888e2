use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use super::{ReportStore, StoreError};
use crate::features::reports::models::{Report, SaveReport};

/// PostgreSQL-backed report store
pub struct PgReportStore {
    pool: PgPool,
}

impl PgReportStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReportStore for PgReportStore {
    async fn find_all(&self) -> Result<Vec<Report>, StoreError> {
        sqlx::query_as::<_, Report>(
            r#"
            SELECT id, employee_code, employee_name, report_date, title, content,
                   delete_flag, created_at, updated_at
            FROM reports
            ORDER BY report_date DESC, created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list reports: {:?}", e);
            StoreError::Database(e)
        })
    }

    async fn find_by_owner(&self, employee_code: &str) -> Result<Vec<Report>, StoreError> {
        sqlx::query_as::<_, Report>(
            r#"
            SELECT id, employee_code, employee_name, report_date, title, content,
                   delete_flag, created_at, updated_at
            FROM reports
            WHERE employee_code = $1
            ORDER BY report_date DESC, created_at DESC
            "#,
        )
        .bind(employee_code)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list reports for {}: {:?}", employee_code, e);
            StoreError::Database(e)
        })
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Report>, StoreError> {
        sqlx::query_as::<_, Report>(
            r#"
            SELECT id, employee_code, employee_name, report_date, title, content,
                   delete_flag, created_at, updated_at
            FROM reports
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get report {}: {:?}", id, e);
            StoreError::Database(e)
        })
    }

    async fn find_by_owner_and_date(
        &self,
        employee_code: &str,
        report_date: NaiveDate,
    ) -> Result<Vec<Report>, StoreError> {
        sqlx::query_as::<_, Report>(
            r#"
            SELECT id, employee_code, employee_name, report_date, title, content,
                   delete_flag, created_at, updated_at
            FROM reports
            WHERE employee_code = $1 AND report_date = $2
            ORDER BY created_at DESC
            "#,
        )
        .bind(employee_code)
        .bind(report_date)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(
                "Failed to look up reports for {} on {}: {:?}",
                employee_code,
                report_date,
                e
            );
            StoreError::Database(e)
        })
    }

    async fn save(&self, report: SaveReport) -> Result<Report, StoreError> {
        sqlx::query_as::<_, Report>(
            r#"
            INSERT INTO reports (
                id, employee_code, employee_name, report_date, title, content,
                delete_flag, created_at, updated_at
            )
            VALUES (COALESCE($1, gen_random_uuid()), $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT (id) DO UPDATE SET
                employee_code = EXCLUDED.employee_code,
                employee_name = EXCLUDED.employee_name,
                report_date = EXCLUDED.report_date,
                title = EXCLUDED.title,
                content = EXCLUDED.content,
                delete_flag = EXCLUDED.delete_flag,
                updated_at = EXCLUDED.updated_at
            RETURNING id, employee_code, employee_name, report_date, title, content,
                      delete_flag, created_at, updated_at
            "#,
        )
        .bind(report.id)
        .bind(&report.employee_code)
        .bind(&report.employee_name)
        .bind(report.report_date)
        .bind(&report.title)
        .bind(&report.content)
        .bind(report.delete_flag)
        .bind(report.created_at)
        .bind(report.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db) = e {
                if db.is_unique_violation() {
                    return StoreError::Duplicate {
                        employee_code: report.employee_code.clone(),
                        report_date: report.report_date,
                    };
                }
            }
            tracing::error!("Failed to save report: {:?}", e);
            StoreError::Database(e)
        })
    }
}
