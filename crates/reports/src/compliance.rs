//! Compliance report: officers grouped by status, outstanding ones first.

use crate::render::{md_text, Report};
use coopcomply_core::ComplianceStatus;
use coopcomply_ledger::{ComplianceReport, ComplianceSnapshot};
use std::fmt::{self, Write};

impl Report for ComplianceReport {
    fn title(&self) -> &'static str {
        "Compliance Report"
    }

    fn columns(&self) -> &'static [&'static str] {
        &[
            "officer_id",
            "name",
            "cooperative",
            "position",
            "status",
            "missing_requirements",
            "trainings_completed",
            "certificates",
        ]
    }

    fn records(&self) -> Vec<Vec<String>> {
        self.officers
            .iter()
            .map(|o| {
                vec![
                    o.officer_id.to_string(),
                    o.name.clone(),
                    o.cooperative.clone(),
                    o.position.clone(),
                    o.status.as_str().to_string(),
                    o.missing_list(),
                    o.trainings_completed.to_string(),
                    o.certificates.to_string(),
                ]
            })
            .collect()
    }

    fn totals(&self) -> Vec<(&'static str, usize)> {
        vec![
            ("Officers", self.officers.len()),
            ("Compliant", self.compliant_count()),
            ("Non-compliant", self.non_compliant_count()),
        ]
    }

    fn write_markdown(&self, out: &mut String) -> fmt::Result {
        if self.is_empty() {
            return writeln!(out, "No officers registered.");
        }
        for status in [ComplianceStatus::NonCompliant, ComplianceStatus::Compliant] {
            let group: Vec<&ComplianceSnapshot> =
                self.officers.iter().filter(|o| o.status == status).collect();
            if group.is_empty() {
                continue;
            }
            writeln!(out, "## {} ({})", status, group.len())?;
            writeln!(out)?;
            writeln!(out, "| Officer | Cooperative | Position | Trainings | Certificates | Missing |")?;
            writeln!(out, "|---|---|---|---:|---:|---|")?;
            for o in group {
                writeln!(
                    out,
                    "| {} | {} | {} | {} | {} | {} |",
                    md_text(&o.name),
                    md_text(&o.cooperative),
                    md_text(&o.position),
                    o.trainings_completed,
                    o.certificates,
                    md_text(&o.missing_list())
                )?;
            }
            writeln!(out)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::{render, ReportFormat};
    use coopcomply_ledger::seed;

    #[test]
    fn test_markdown_groups_by_status() {
        let report = seed::demo().unwrap().generate_compliance_report();
        let md = render(&report, ReportFormat::Markdown).unwrap();

        assert!(md.contains("- **Compliant**: 2"));
        assert!(md.contains("- **Non-compliant**: 1"));
        let outstanding = md.find("## Non-compliant (1)").unwrap();
        let compliant = md.find("## Compliant (2)").unwrap();
        assert!(outstanding < compliant);
        assert!(md.contains(
            "| Maria Clara | Naga Fisherfolk Coop | Secretary | 1 | 0 | Financial Literacy Training |"
        ));
    }

    #[test]
    fn test_csv_records() {
        let report = seed::demo().unwrap().generate_compliance_report();
        let csv = render(&report, ReportFormat::Csv).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 4);
        assert_eq!(
            lines[1],
            "officer-456,Juan Dela Cruz,Naga Farmers Coop,Treasurer,Compliant,None,2,1"
        );
    }

    #[test]
    fn test_json_status_names() {
        let report = seed::demo().unwrap().generate_compliance_report();
        let json = render(&report, ReportFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["totals"]["Non-compliant"], 1);
        assert_eq!(value["report"]["officers"][1]["status"], "Non-compliant");
        assert_eq!(value["report"]["officers"][0]["missing_requirements"], serde_json::json!([]));
    }
}
