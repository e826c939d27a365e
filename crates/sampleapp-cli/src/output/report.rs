// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeMap;
use std::io::{self, Write};
use std::time::Duration;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use sampleapp_core::{Control, DemoReport, Profile, Step, StepObserver, StepOutcome, StepReport};

use crate::cli::{OutputContext, OutputFormat};

use super::Renderable;

/// Streams one status line per finished step (text format only).
pub struct StepPrinter<W: Write> {
    out: W,
    ctx: OutputContext,
    spinner: Option<ProgressBar>,
    error: Option<io::Error>,
}

impl<W: Write> StepPrinter<W> {
    /// Creates a printer writing to `out`.
    pub fn new(out: W, ctx: &OutputContext) -> Self {
        Self {
            out,
            ctx: ctx.clone(),
            spinner: None,
            error: None,
        }
    }

    fn is_text(&self) -> bool {
        matches!(self.ctx.format, OutputFormat::Text)
    }

    /// Prints the startup line.
    pub fn intro(&mut self, profile: Profile) -> io::Result<()> {
        if !self.is_text() {
            return Ok(());
        }
        match profile {
            Profile::Insecure => {
                writeln!(self.out, "Starting application with compliance issues...")
            }
            Profile::Hardened => writeln!(self.out, "Starting application (hardened profile)..."),
        }
    }

    /// Returns the first write error encountered while streaming, if any.
    pub fn finish(mut self) -> io::Result<()> {
        if let Some(s) = self.spinner.take() {
            s.finish_and_clear();
        }
        match self.error.take() {
            Some(e) => Err(e),
            None => self.out.flush(),
        }
    }

    fn write_report(&mut self, report: &StepReport) -> io::Result<()> {
        match &report.outcome {
            StepOutcome::Completed(message) => {
                writeln!(self.out, "{} {message}", style("*").green().bold())?;
            }
            StepOutcome::Failed(message) => {
                writeln!(self.out, "{} {message}", style("!").yellow().bold())?;
            }
        }
        for warning in &report.warnings {
            writeln!(self.out, "  {} {warning}", style("WARNING:").yellow())?;
        }
        if self.ctx.verbose {
            for finding in &report.findings {
                writeln!(
                    self.out,
                    "  {} {} ({:?})",
                    style(format!("[{}]", finding.control)).red(),
                    finding.description,
                    finding.severity
                )?;
            }
        }
        Ok(())
    }
}

impl<W: Write> StepObserver for StepPrinter<W> {
    fn step_started(&mut self, step: Step) {
        if !self.ctx.is_interactive() {
            return;
        }
        if matches!(step, Step::FetchData | Step::DatabaseConnection) {
            let s = ProgressBar::new_spinner();
            s.set_style(
                ProgressStyle::default_spinner()
                    .template("{spinner:.cyan} {msg}")
                    .expect("Invalid spinner template"),
            );
            s.set_message(format!("{}...", step.label()));
            s.enable_steady_tick(Duration::from_millis(100));
            self.spinner = Some(s);
        }
    }

    fn step_finished(&mut self, report: &StepReport) {
        if let Some(s) = self.spinner.take() {
            s.finish_and_clear();
        }
        if !self.is_text() || self.error.is_some() {
            return;
        }
        if let Err(e) = self.write_report(report) {
            self.error = Some(e);
        }
    }
}

/// Counts findings per control, in control order.
fn findings_by_control(report: &DemoReport) -> BTreeMap<Control, usize> {
    let mut counts = BTreeMap::new();
    for finding in report.findings() {
        *counts.entry(finding.control).or_insert(0) += 1;
    }
    counts
}

impl Renderable for DemoReport {
    fn render_text(&self, w: &mut dyn Write, ctx: &OutputContext) -> io::Result<()> {
        let counts = findings_by_control(self);
        if !counts.is_empty() {
            let total: usize = counts.values().sum();
            let summary: Vec<String> = counts
                .iter()
                .map(|(control, n)| format!("{control} x{n}"))
                .collect();
            writeln!(
                w,
                "{} {total} compliance findings: {}",
                style("!").red().bold(),
                summary.join(", ")
            )?;
            if !ctx.verbose {
                writeln!(w, "{}", style("Use --verbose to list them.").dim())?;
            }
        }
        writeln!(w, "{}", self.completion_message())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sampleapp_core::{Finding, Severity};

    fn ctx(format: OutputFormat, verbose: bool) -> OutputContext {
        OutputContext {
            format,
            verbose,
            is_tty: false,
        }
    }

    fn failed_fetch() -> StepReport {
        StepReport {
            step: Step::FetchData,
            outcome: StepOutcome::Failed("API request failed: refused".to_string()),
            warnings: vec![],
            findings: vec![],
            detail: None,
        }
    }

    fn sample_report() -> DemoReport {
        DemoReport {
            profile: Profile::Insecure,
            steps: vec![StepReport {
                step: Step::NetworkConfig,
                outcome: StepOutcome::Completed("Network configured".to_string()),
                warnings: vec![],
                findings: vec![Finding {
                    control: Control::Ac3,
                    severity: Severity::High,
                    description: "Inbound traffic permitted from any source".to_string(),
                }],
                detail: None,
            }],
            completed: true,
        }
    }

    #[test]
    fn test_printer_streams_failure_once() {
        let mut buf = Vec::new();
        let mut printer = StepPrinter::new(&mut buf, &ctx(OutputFormat::Text, false));
        printer.step_started(Step::FetchData);
        printer.step_finished(&failed_fetch());
        printer.finish().expect("finish");

        let out = String::from_utf8(buf).expect("utf8");
        assert_eq!(out.matches("API request failed").count(), 1);
    }

    #[test]
    fn test_printer_silent_for_json() {
        let mut buf = Vec::new();
        let mut printer = StepPrinter::new(&mut buf, &ctx(OutputFormat::Json, false));
        printer.intro(Profile::Insecure).expect("intro");
        printer.step_finished(&failed_fetch());
        printer.finish().expect("finish");

        assert!(buf.is_empty());
    }

    #[test]
    fn test_printer_verbose_lists_findings() {
        let mut buf = Vec::new();
        let mut printer = StepPrinter::new(&mut buf, &ctx(OutputFormat::Text, true));
        printer.step_finished(&sample_report().steps[0]);
        printer.finish().expect("finish");

        let out = String::from_utf8(buf).expect("utf8");
        assert!(out.contains("AC-3"));
        assert!(out.contains("any source"));
    }

    #[test]
    fn test_report_text_summary() {
        let mut buf = Vec::new();
        sample_report()
            .render_text(&mut buf, &ctx(OutputFormat::Text, false))
            .expect("render");

        let out = String::from_utf8(buf).expect("utf8");
        assert!(out.contains("1 compliance findings: AC-3 x1"));
        assert!(out.ends_with("Application started (with security vulnerabilities)\n"));
    }

    #[test]
    fn test_report_json() {
        let mut buf = Vec::new();
        super::super::render_to(&sample_report(), &ctx(OutputFormat::Json, false), &mut buf)
            .expect("render");

        let json: serde_json::Value = serde_json::from_slice(&buf).expect("valid json");
        assert_eq!(json["completed"], true);
        assert_eq!(json["profile"], "insecure");
        assert_eq!(json["steps"][0]["findings"][0]["control"], "AC-3");
    }
}
