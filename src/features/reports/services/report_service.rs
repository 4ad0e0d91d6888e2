use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use uuid::Uuid;
use validator::Validate;

use crate::features::auth::model::Employee;
use crate::features::reports::dtos::ReportInputDto;
use crate::features::reports::error::ReportError;
use crate::features::reports::models::{Report, SaveReport};
use crate::features::reports::store::ReportStore;

pub type Result<T> = std::result::Result<T, ReportError>;

/// Business rules for daily reports.
///
/// Every write runs the same pipeline, each step short-circuiting:
/// field validation, then the one-report-per-employee-per-date check,
/// then persistence.
pub struct ReportService {
    store: Arc<dyn ReportStore>,
}

impl ReportService {
    pub fn new(store: Arc<dyn ReportStore>) -> Self {
        Self { store }
    }

    /// Reports visible to `viewer`: all of them for admins, otherwise only
    /// the viewer's own. Soft-deleted reports are not filtered out.
    pub async fn list_for_viewer(&self, viewer: &Employee) -> Result<Vec<Report>> {
        let reports = if viewer.is_admin() {
            self.store.find_all().await?
        } else {
            self.store.find_by_owner(&viewer.code).await?
        };
        Ok(reports)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Report>> {
        Ok(self.store.find_by_id(id).await?)
    }

    pub async fn find_by_owner_and_date(
        &self,
        employee_code: &str,
        report_date: NaiveDate,
    ) -> Result<Vec<Report>> {
        Ok(self
            .store
            .find_by_owner_and_date(employee_code, report_date)
            .await?)
    }

    /// Submit a new report owned by `owner`
    pub async fn create_report(&self, dto: &ReportInputDto, owner: &Employee) -> Result<Report> {
        let report_date = Self::validated_date(dto)?;
        self.ensure_date_available(&owner.code, report_date, None)
            .await?;

        let report = SaveReport::new(
            owner,
            report_date,
            dto.title.clone(),
            dto.content.clone(),
            Utc::now(),
        );
        let report = self.store.save(report).await?;

        tracing::info!(
            "Created report: {} for employee: {} on {}",
            report.id,
            report.employee_code,
            report.report_date
        );

        Ok(report)
    }

    /// Replace the content of an existing report.
    ///
    /// Ownership and `created_at` carry over from the stored report.
    /// The date check only runs when the report date changes or the report
    /// is being restored from a soft delete.
    pub async fn update_report(
        &self,
        id: Uuid,
        dto: &ReportInputDto,
        editor: &Employee,
    ) -> Result<Report> {
        let report_date = Self::validated_date(dto)?;
        let existing = self
            .store
            .find_by_id(id)
            .await?
            .ok_or(ReportError::NotFound(id))?;

        // Restoring a deleted report reclaims its date as well
        if existing.report_date != report_date || !existing.is_active() {
            self.ensure_date_available(&existing.employee_code, report_date, Some(id))
                .await?;
        }

        let mut report = SaveReport::from(existing);
        report.report_date = report_date;
        report.title = dto.title.clone();
        report.content = dto.content.clone();
        report.delete_flag = false;
        report.updated_at = Utc::now();
        let report = self.store.save(report).await?;

        tracing::info!(
            "Updated report: {} (owner: {}, editor: {})",
            report.id,
            report.employee_code,
            editor.code
        );

        Ok(report)
    }

    /// Soft delete: the report is flagged and kept.
    ///
    /// Any authenticated employee may delete any report; `actor` is only
    /// recorded in the log.
    pub async fn delete_report(&self, id: Uuid, actor: &Employee) -> Result<Report> {
        let existing = self
            .store
            .find_by_id(id)
            .await?
            .ok_or(ReportError::NotFound(id))?;

        let mut report = SaveReport::from(existing);
        report.delete_flag = true;
        report.updated_at = Utc::now();
        let report = self.store.save(report).await?;

        tracing::info!(
            "Deleted report: {} (owner: {}, actor: {})",
            report.id,
            report.employee_code,
            actor.code
        );

        Ok(report)
    }

    fn validated_date(dto: &ReportInputDto) -> Result<NaiveDate> {
        dto.validate()?;
        // `required` passed, so the date is present
        dto.report_date.ok_or_else(|| {
            let mut errors = validator::ValidationErrors::new();
            errors.add("report_date", validator::ValidationError::new("required"));
            ReportError::Validation(errors)
        })
    }

    /// Fail with `DateConflict` if an active report other than `except`
    /// exists for the employee on `report_date`
    async fn ensure_date_available(
        &self,
        employee_code: &str,
        report_date: NaiveDate,
        except: Option<Uuid>,
    ) -> Result<()> {
        let taken = self
            .find_by_owner_and_date(employee_code, report_date)
            .await?
            .iter()
            .any(|r| r.is_active() && Some(r.id) != except);

        if taken {
            tracing::info!(
                "Rejected report for employee: {} on {}: date already registered",
                employee_code,
                report_date
            );
            return Err(ReportError::DateConflict {
                employee_code: employee_code.to_string(),
                report_date,
            });
        }

        Ok(())
    }
}
