//! Daily reports submitted by employees.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/api/reports` | Yes | List reports (all for admins, own otherwise) |
//! | POST | `/api/reports` | Yes | Submit a report |
//! | GET | `/api/reports/{id}` | Yes | Get report |
//! | PUT | `/api/reports/{id}` | Yes | Update report |
//! | DELETE | `/api/reports/{id}` | Yes | Soft delete report |
//!
//! An employee has at most one active report per date. Deleted reports are
//! flagged, never removed.

pub mod dtos;
pub mod error;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod store;

pub use error::ReportError;
pub use services::ReportService;
