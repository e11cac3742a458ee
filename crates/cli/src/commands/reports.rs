//! Report command

use anyhow::{Context, Result};
use coopcomply_ledger::Ledger;
use coopcomply_reports::render;
use std::fs;
use std::path::PathBuf;

use crate::{ReportFormat, ReportKind};

/// Generate a report
pub fn generate(
    ledger: &Ledger,
    kind: ReportKind,
    format: ReportFormat,
    output: Option<PathBuf>,
) -> Result<()> {
    let format = format.to_render_format();
    let content = match kind {
        ReportKind::Attendance => render(&ledger.generate_attendance_report(), format),
        ReportKind::Compliance => render(&ledger.generate_compliance_report(), format),
    }
    .context("Failed to render report")?;

    match output {
        Some(path) => {
            fs::write(&path, &content)
                .with_context(|| format!("Failed to write report file {:?}", path))?;
            println!("✅ Report generated: {:?} ({})", path, format.extension());
        }
        None => {
            println!("{}", content);
        }
    }

    Ok(())
}
