//! Payment report generation.
//!
//! Aggregates a user's payment records into totals and builds a
//! tabular report document as a plain value: ordered rows, header
//! metadata and footer totals. Rendering to text and writing a file
//! are separate steps, so the document itself stays pure.

use anyhow::Result;
use chrono::{DateTime, Utc};
use log::{error, info};
use std::fs;
use std::path::PathBuf;

use crate::domain::errors::DomainError;
use crate::domain::models::identity::Identity;
use crate::domain::models::payment::PaymentRecord;

/// Aggregated totals over a set of payment records.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportTotals {
    pub count: usize,
    pub total_amount: f64,
}

/// One line of the report table.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    pub payer_name: String,
    pub email: Option<String>,
    pub amount: f64,
    pub address: String,
    pub phone: String,
    pub date: String,
}

/// A payment report as a value: everything needed to render the
/// document, with rows in the same order as the input records.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentReport {
    pub title: String,
    pub identity_label: String,
    pub generated_at: DateTime<Utc>,
    pub rows: Vec<ReportRow>,
    pub totals: ReportTotals,
    pub filename: String,
}

/// Report service for a user's payment history.
#[derive(Clone)]
pub struct ReportService;

impl ReportService {
    pub fn new() -> Self {
        Self
    }

    /// Sum up a record sequence. Empty input yields zeros, not an
    /// error.
    pub fn aggregate(&self, records: &[PaymentRecord]) -> ReportTotals {
        ReportTotals {
            count: records.len(),
            total_amount: records.iter().map(|record| record.amount).sum(),
        }
    }

    /// Build the report document. Fails with `EmptyReport` over zero
    /// records rather than producing a title-only document.
    pub fn build_report(
        &self,
        records: &[PaymentRecord],
        identity: &Identity,
        generated_at: DateTime<Utc>,
    ) -> Result<PaymentReport, DomainError> {
        if records.is_empty() {
            return Err(DomainError::EmptyReport);
        }

        let rows = records
            .iter()
            .map(|record| ReportRow {
                payer_name: record.payer_name.clone(),
                email: record.email.clone(),
                amount: record.amount,
                address: record.address.clone(),
                phone: record.phone.clone(),
                date: record.date.format("%Y-%m-%d").to_string(),
            })
            .collect();

        let filename = format!(
            "bill-report-{}-{}.csv",
            identity.user_id,
            generated_at.timestamp_millis()
        );

        let report = PaymentReport {
            title: "Bill Payment Report".to_string(),
            identity_label: identity.label().to_string(),
            generated_at,
            rows,
            totals: self.aggregate(records),
            filename,
        };

        info!(
            "Built report for {} with {} rows totalling {:.2}",
            report.identity_label, report.totals.count, report.totals.total_amount
        );
        Ok(report)
    }

    /// Render the report as CSV text: header metadata, the table, and
    /// footer totals.
    pub fn render(&self, report: &PaymentReport) -> String {
        let mut content = String::new();
        content.push_str(&format!("{}\n", report.title));
        content.push_str(&format!(
            "Generated on: {}\n",
            report.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));
        content.push_str(&format!("User: {}\n\n", report.identity_label));

        content.push_str("payer_name,email,amount,address,phone,date\n");
        for row in &report.rows {
            content.push_str(&format!(
                "\"{}\",\"{}\",{:.2},\"{}\",\"{}\",{}\n",
                escape(&row.payer_name),
                escape(row.email.as_deref().unwrap_or("N/A")),
                row.amount,
                escape(&row.address),
                escape(&row.phone),
                row.date,
            ));
        }

        content.push_str(&format!("\nTotal Bills Paid: {}\n", report.totals.count));
        content.push_str(&format!("Total Amount: {:.2}\n", report.totals.total_amount));
        content
    }

    /// Write the rendered report to a directory, defaulting to the
    /// Documents folder (then the temp dir) when no path is given.
    /// Returns the full path of the written file.
    pub fn export_to_path(
        &self,
        report: &PaymentReport,
        custom_path: Option<&str>,
    ) -> Result<PathBuf> {
        let export_dir = match custom_path {
            Some(path) if !path.trim().is_empty() => PathBuf::from(path.trim()),
            _ => dirs::document_dir().unwrap_or_else(std::env::temp_dir),
        };

        fs::create_dir_all(&export_dir)?;
        let file_path = export_dir.join(&report.filename);

        match fs::write(&file_path, self.render(report)) {
            Ok(()) => {
                info!(
                    "Exported report with {} rows to {}",
                    report.totals.count,
                    file_path.display()
                );
                Ok(file_path)
            }
            Err(e) => {
                error!("Failed to write report to {}: {}", file_path.display(), e);
                Err(e.into())
            }
        }
    }
}

impl Default for ReportService {
    fn default() -> Self {
        Self::new()
    }
}

fn escape(value: &str) -> String {
    value.replace('"', "\"\"")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};

    fn record(amount: f64) -> PaymentRecord {
        PaymentRecord {
            id: PaymentRecord::generate_id(1),
            bill_id: "bill-1".to_string(),
            bill_title: "Electricity".to_string(),
            user_id: "user-a".to_string(),
            payer_name: "Alice".to_string(),
            email: Some("alice@example.com".to_string()),
            address: "12 Green Road".to_string(),
            phone: "01700000000".to_string(),
            note: None,
            amount,
            date: NaiveDate::from_ymd_opt(2025, 7, 10).unwrap(),
            paid_at: Utc.with_ymd_and_hms(2025, 7, 10, 9, 0, 0).unwrap(),
        }
    }

    fn identity() -> Identity {
        Identity {
            user_id: "user-a".to_string(),
            email: Some("alice@example.com".to_string()),
            display_name: Some("Alice".to_string()),
        }
    }

    #[test]
    fn test_aggregate_empty_is_zero() {
        let service = ReportService::new();
        let totals = service.aggregate(&[]);
        assert_eq!(totals.count, 0);
        assert_eq!(totals.total_amount, 0.0);
    }

    #[test]
    fn test_aggregate_sums_amounts() {
        let service = ReportService::new();
        let totals = service.aggregate(&[record(100.0), record(250.0)]);
        assert_eq!(totals.count, 2);
        assert_eq!(totals.total_amount, 350.0);
    }

    #[test]
    fn test_build_report_over_zero_records_fails() {
        let service = ReportService::new();
        let err = service
            .build_report(&[], &identity(), Utc::now())
            .unwrap_err();
        assert!(matches!(err, DomainError::EmptyReport));
    }

    #[test]
    fn test_report_rows_follow_input_order() {
        let service = ReportService::new();
        let mut first = record(100.0);
        first.payer_name = "First".to_string();
        let mut second = record(250.0);
        second.payer_name = "Second".to_string();

        let generated_at = Utc.with_ymd_and_hms(2025, 7, 15, 12, 0, 0).unwrap();
        let report = service
            .build_report(&[first, second], &identity(), generated_at)
            .unwrap();

        let names: Vec<&str> = report.rows.iter().map(|r| r.payer_name.as_str()).collect();
        assert_eq!(names, ["First", "Second"]);
        assert_eq!(report.totals.total_amount, 350.0);
        assert_eq!(report.identity_label, "Alice");
    }

    #[test]
    fn test_filename_includes_user_and_generation_time() {
        let service = ReportService::new();
        let generated_at = Utc.with_ymd_and_hms(2025, 7, 15, 12, 0, 0).unwrap();
        let report = service
            .build_report(&[record(10.0)], &identity(), generated_at)
            .unwrap();
        assert_eq!(
            report.filename,
            format!("bill-report-user-a-{}.csv", generated_at.timestamp_millis())
        );
    }

    #[test]
    fn test_render_contains_rows_and_totals() {
        let service = ReportService::new();
        let report = service
            .build_report(&[record(100.0), record(250.0)], &identity(), Utc::now())
            .unwrap();
        let content = service.render(&report);

        assert!(content.starts_with("Bill Payment Report\n"));
        assert!(content.contains("payer_name,email,amount,address,phone,date"));
        assert!(content.contains("\"Alice\",\"alice@example.com\",100.00"));
        assert!(content.contains("Total Bills Paid: 2"));
        assert!(content.contains("Total Amount: 350.00"));
    }

    #[test]
    fn test_export_writes_rendered_file() {
        let service = ReportService::new();
        let report = service
            .build_report(&[record(42.0)], &identity(), Utc::now())
            .unwrap();

        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = service
            .export_to_path(&report, Some(temp_dir.path().to_str().unwrap()))
            .unwrap();

        assert!(path.exists());
        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(written, service.render(&report));
    }
}
