//! Report writers.
//!
//! - `risk_summary.csv`: one row per metric with base and stressed values
//! - `loss_histogram.csv`: equal-width bins of the baseline losses
//! - stdout rendering as a table, JSON or CSV

use std::io::Write;
use std::path::{Path, PathBuf};

use credit_engine::mc::{HistogramBin, ScenarioLosses};
use credit_engine::stress::ComparisonReport;
use serde::Serialize;
use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use crate::Result;

/// File name of the metric summary.
pub const RISK_SUMMARY_FILE: &str = "risk_summary.csv";

/// File name of the baseline loss histogram.
pub const HISTOGRAM_FILE: &str = "loss_histogram.csv";

/// Stdout rendering of the summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Aligned table.
    #[default]
    Table,
    /// Pretty-printed JSON.
    Json,
    /// CSV with the summary file's columns.
    Csv,
}

/// One row of the summary.
#[derive(Debug, Clone, Serialize)]
pub struct SummaryRow {
    /// Metric label.
    #[serde(rename = "Metric")]
    pub metric: &'static str,
    /// Baseline value.
    #[serde(rename = "Base Scenario")]
    pub base: f64,
    /// Stressed value.
    #[serde(rename = "Stress Scenario")]
    pub stressed: f64,
    /// Stressed minus baseline; shown in the table only.
    #[serde(skip)]
    pub change: f64,
}

#[derive(Tabled)]
struct TableRow {
    #[tabled(rename = "Metric")]
    metric: &'static str,
    #[tabled(rename = "Base Scenario")]
    base: String,
    #[tabled(rename = "Stress Scenario")]
    stressed: String,
    #[tabled(rename = "Change")]
    change: String,
}

impl From<&SummaryRow> for TableRow {
    fn from(row: &SummaryRow) -> Self {
        Self {
            metric: row.metric,
            base: format!("{:.2}", row.base),
            stressed: format!("{:.2}", row.stressed),
            change: format!("{:+.2}", row.change),
        }
    }
}

/// Flattens a report into rows in report order.
pub fn summary_rows(report: &ComparisonReport) -> Vec<SummaryRow> {
    report
        .iter()
        .map(|entry| SummaryRow {
            metric: entry.metric.label(),
            base: entry.base,
            stressed: entry.stressed,
            change: entry.change(),
        })
        .collect()
}

/// Writes the summary CSV (`Metric,Base Scenario,Stress Scenario`).
pub fn write_summary<W: Write>(writer: W, report: &ComparisonReport) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for row in summary_rows(report) {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Writes histogram bins as CSV (`lower,upper,count,frequency`).
pub fn write_histogram<W: Write>(writer: W, bins: &[HistogramBin]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for bin in bins {
        wtr.serialize(bin)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Paths written by [`write_reports`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportFiles {
    /// Metric summary.
    pub summary: PathBuf,
    /// Baseline loss histogram.
    pub histogram: PathBuf,
}

/// Creates `dir` if needed and writes both report files into it.
pub fn write_reports(
    dir: &Path,
    report: &ComparisonReport,
    base_losses: &ScenarioLosses,
    histogram_bins: usize,
) -> Result<ReportFiles> {
    std::fs::create_dir_all(dir)?;

    let files = ReportFiles {
        summary: dir.join(RISK_SUMMARY_FILE),
        histogram: dir.join(HISTOGRAM_FILE),
    };
    write_summary(std::fs::File::create(&files.summary)?, report)?;
    write_histogram(
        std::fs::File::create(&files.histogram)?,
        &base_losses.histogram(histogram_bins),
    )?;

    Ok(files)
}

/// Renders the summary for stdout.
pub fn render(report: &ComparisonReport, format: OutputFormat) -> Result<String> {
    let rows = summary_rows(report);
    match format {
        OutputFormat::Table => Ok(Table::new(rows.iter().map(TableRow::from))
            .with(Style::rounded())
            .with(Modify::new(Columns::first()).with(Alignment::left()))
            .with(Modify::new(Columns::new(1..)).with(Alignment::right()))
            .to_string()),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&rows)?),
        OutputFormat::Csv => {
            let mut buf = Vec::new();
            write_summary(&mut buf, report)?;
            Ok(String::from_utf8_lossy(&buf).into_owned())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use credit_engine::metrics::RiskMetrics;

    fn report() -> ComparisonReport {
        let base = RiskMetrics {
            mean_loss: 100.0,
            var_95: 250.0,
            var_99: 400.0,
            es_95: 320.0,
            es_99: 450.0,
            worst_case_loss: 600.0,
        };
        let stressed = RiskMetrics {
            mean_loss: 150.0,
            var_95: 375.5,
            ..base
        };
        ComparisonReport::new(&base, &stressed)
    }

    #[test]
    fn test_summary_csv_layout() {
        let mut buf = Vec::new();
        write_summary(&mut buf, &report()).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Metric,Base Scenario,Stress Scenario");
        assert_eq!(lines.len(), 7);
        assert!(lines[1].starts_with("Mean Loss,100"));
        assert!(lines[2].starts_with("VaR 95%,250"));
        assert!(lines[6].starts_with("Worst Case Loss,600"));
    }

    #[test]
    fn test_summary_rows_carry_change() {
        let rows = summary_rows(&report());
        assert_eq!(rows[0].change, 50.0);
        assert_eq!(rows[1].change, 125.5);
        assert_eq!(rows[5].change, 0.0);
    }

    #[test]
    fn test_summary_round_trips_through_csv_reader() {
        let mut buf = Vec::new();
        write_summary(&mut buf, &report()).unwrap();

        let mut rdr = csv::Reader::from_reader(buf.as_slice());
        let rows: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();
        let stressed: f64 = rows[1][2].parse().unwrap();
        assert_eq!(stressed, 375.5);
    }

    #[test]
    fn test_histogram_csv_layout() {
        let losses = ScenarioLosses::new(vec![0.0, 0.0, 10.0, 20.0]);
        let mut buf = Vec::new();
        write_histogram(&mut buf, &losses.histogram(4)).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "lower,upper,count,frequency");
        assert_eq!(lines.len(), 5);
        assert!(lines[1].contains(",2,0.5"));
    }

    #[test]
    fn test_render_formats() {
        let table = render(&report(), OutputFormat::Table).unwrap();
        assert!(table.contains("Base Scenario"));
        assert!(table.contains("+50.00"));

        let json = render(&report(), OutputFormat::Json).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.as_array().unwrap().len(), 6);
        assert_eq!(parsed[0]["Metric"], "Mean Loss");
        assert_eq!(parsed[0]["Stress Scenario"], 150.0);

        let csv = render(&report(), OutputFormat::Csv).unwrap();
        assert!(csv.starts_with("Metric,Base Scenario,Stress Scenario"));
    }

    #[test]
    fn test_write_reports_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("nested").join("outputs");
        let losses = ScenarioLosses::new((0..100).map(|i| i as f64).collect());

        let files = write_reports(&out, &report(), &losses, 50).unwrap();
        assert!(files.summary.exists());
        assert!(files.histogram.exists());

        let histogram = std::fs::read_to_string(&files.histogram).unwrap();
        assert_eq!(histogram.lines().count(), 51);
    }
}
