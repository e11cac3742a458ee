//! # Coopcomply Reports
//!
//! Renders the ledger's attendance and compliance reports as CSV, JSON or
//! Markdown.
//!
//! ## Example
//!
//! ```rust,ignore
//! use coopcomply_ledger::seed;
//! use coopcomply_reports::{render, ReportFormat};
//!
//! let report = seed::demo()?.generate_compliance_report();
//! let markdown = render(&report, ReportFormat::Markdown)?;
//! ```

pub mod attendance;
pub mod compliance;
pub mod render;

pub use render::{render, RenderError, RenderResult, Report, ReportFormat};
