//! Output formatting for CLI display.
//!
//! Provides the [`Printer`] trait and [`TablePrinter`], which renders reports
//! as terminal tables or, with `--json`, as arrays of heading-keyed objects.

use std::io::{self, Write};

use serde_json::Value;
use tabled::builder::Builder;
use tabled::settings::Style;
use url::Url;

use crate::config::asset_url;
use crate::error::Result;
use crate::models::display_value;
use crate::report::Report;

/// Sink for finished reports.
pub trait Printer {
    /// Render one report.
    fn print_report(&mut self, report: &Report) -> Result<()>;

    /// Render a group of related reports as one unit.
    fn print_reports(&mut self, reports: &[Report]) -> Result<()> {
        for report in reports {
            self.print_report(report)?;
        }
        Ok(())
    }

    /// Print the web link for an asset.
    fn print_asset_url(&mut self, id: &str) -> Result<()>;
}

/// Renders reports to a writer as tables or JSON.
pub struct TablePrinter<W> {
    out: W,
    base_url: Url,
    json: bool,
}

impl TablePrinter<io::Stdout> {
    /// Printer writing to standard output.
    pub fn stdout(base_url: Url, json: bool) -> Self {
        Self::new(io::stdout(), base_url, json)
    }
}

impl<W: Write> TablePrinter<W> {
    pub fn new(out: W, base_url: Url, json: bool) -> Self {
        Self {
            out,
            base_url,
            json,
        }
    }

    /// Consume the printer and return its writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Printer for TablePrinter<W> {
    fn print_report(&mut self, report: &Report) -> Result<()> {
        if self.json {
            writeln!(
                self.out,
                "{}",
                serde_json::to_string_pretty(&report.to_json_document())?
            )?;
            return Ok(());
        }

        if let Some(ref title) = report.title {
            writeln!(self.out, "\n{title}")?;
        }
        writeln!(self.out, "{}", render_table(report))?;
        writeln!(self.out, "{} rows", report.len())?;
        Ok(())
    }

    fn print_reports(&mut self, reports: &[Report]) -> Result<()> {
        if !self.json {
            for report in reports {
                self.print_report(report)?;
            }
            return Ok(());
        }

        let documents: Vec<Value> = reports.iter().map(Report::to_json_document).collect();
        writeln!(self.out, "{}", serde_json::to_string_pretty(&documents)?)?;
        Ok(())
    }

    fn print_asset_url(&mut self, id: &str) -> Result<()> {
        if !self.json {
            writeln!(self.out, "{}", asset_url(&self.base_url, id))?;
        }
        Ok(())
    }
}

/// Render a report as a bordered text table.
pub fn render_table(report: &Report) -> String {
    let mut builder = Builder::default();
    builder.push_record(report.headings.iter().cloned());
    for row in &report.rows {
        builder.push_record(row.iter().map(display_value));
    }

    let mut table = builder.build();
    table.with(Style::modern());
    table.to_string()
}
