use std::collections::HashMap;

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{ReportStore, StoreError};
use crate::features::reports::models::{Report, SaveReport};

/// In-process report store. Contents are lost on restart.
#[derive(Default)]
pub struct MemoryReportStore {
    reports: RwLock<HashMap<Uuid, Report>>,
}

impl MemoryReportStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn listing<'a>(reports: impl Iterator<Item = &'a Report>) -> Vec<Report> {
        let mut listed: Vec<Report> = reports.cloned().collect();
        listed.sort_by(|a, b| {
            b.report_date
                .cmp(&a.report_date)
                .then_with(|| b.created_at.cmp(&a.created_at))
        });
        listed
    }
}

#[async_trait]
impl ReportStore for MemoryReportStore {
    async fn find_all(&self) -> Result<Vec<Report>, StoreError> {
        let reports = self.reports.read().await;
        Ok(Self::listing(reports.values()))
    }

    async fn find_by_owner(&self, employee_code: &str) -> Result<Vec<Report>, StoreError> {
        let reports = self.reports.read().await;
        Ok(Self::listing(
            reports.values().filter(|r| r.is_owned_by(employee_code)),
        ))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Report>, StoreError> {
        let reports = self.reports.read().await;
        Ok(reports.get(&id).cloned())
    }

    async fn find_by_owner_and_date(
        &self,
        employee_code: &str,
        report_date: NaiveDate,
    ) -> Result<Vec<Report>, StoreError> {
        let reports = self.reports.read().await;
        Ok(Self::listing(reports.values().filter(|r| {
            r.is_owned_by(employee_code) && r.report_date == report_date
        })))
    }

    async fn save(&self, report: SaveReport) -> Result<Report, StoreError> {
        let mut reports = self.reports.write().await;
        let id = report.id.unwrap_or_else(Uuid::now_v7);

        if !report.delete_flag {
            let taken = reports.values().any(|r| {
                r.id != id
                    && r.is_active()
                    && r.is_owned_by(&report.employee_code)
                    && r.report_date == report.report_date
            });
            if taken {
                return Err(StoreError::Duplicate {
                    employee_code: report.employee_code,
                    report_date: report.report_date,
                });
            }
        }

        let created_at = reports
            .get(&id)
            .map(|existing| existing.created_at)
            .unwrap_or(report.created_at);

        let stored = Report {
            id,
            employee_code: report.employee_code,
            employee_name: report.employee_name,
            report_date: report.report_date,
            title: report.title,
            content: report.content,
            delete_flag: report.delete_flag,
            created_at,
            updated_at: report.updated_at,
        };
        reports.insert(id, stored.clone());

        Ok(stored)
    }
}
