use super::{ColorMode, ReportEntry};
use crate::Result;
use crate::metrics::weights::weight_of;
use crate::metrics::{MetricValue, Score};
use crate::rating::{RatingOutcome, RatingResult, Unavailability};
use core::fmt::{self, Write};
use owo_colors::OwoColorize;
use std::io::{IsTerminal, stdout};

const SEPARATOR_WIDTH: usize = 40;
const TABLE_INDENT: usize = 4;
const COLUMN_GAP: usize = 2;
const SCORE_WIDTH: usize = 6;
const WEIGHT_WIDTH: usize = 6;
const LATENCY_WIDTH: usize = 8;
const MAX_NOTES_WIDTH: usize = 80;

/// Write a human-readable report of `entries`.
///
/// With `short` set, each artifact gets a single line with its id, status, and net score.
pub fn generate<W: Write>(entries: &[ReportEntry], pass_threshold: f64, color: ColorMode, short: bool, writer: &mut W) -> Result<()> {
    ConsoleReporter::new(writer, pass_threshold, color).generate_report(entries, short)
}

struct ConsoleReporter<'a, W: Write> {
    writer: &'a mut W,
    colors: ColorScheme,
}

impl<'a, W: Write> ConsoleReporter<'a, W> {
    fn new(writer: &'a mut W, pass_threshold: f64, color_mode: ColorMode) -> Self {
        Self {
            writer,
            colors: ColorScheme::new(pass_threshold, color_mode),
        }
    }

    fn generate_report(&mut self, entries: &[ReportEntry], short: bool) -> Result<()> {
        if short {
            for entry in entries {
                self.write_short_line(entry)?;
            }
            return Ok(());
        }

        for (index, entry) in entries.iter().enumerate() {
            if index > 0 {
                self.write_separator()?;
            }

            self.write_header(entry)?;
            if let Some(result) = entry.outcome.result() {
                self.write_metrics_table(result)?;
            }
        }

        Ok(())
    }

    fn write_short_line(&mut self, entry: &ReportEntry) -> Result<()> {
        write!(self.writer, "{} {} ", entry.id, status_label(&entry.outcome))?;
        match entry.outcome.result() {
            Some(result) => self.colors.write_colorized_score(self.writer, result.net_score)?,
            None => write!(self.writer, "-")?,
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_separator(&mut self) -> Result<()> {
        writeln!(self.writer)?;
        self.colors.write_styled_line(self.writer, "═", SEPARATOR_WIDTH, TextStyle::Dimmed)?;
        writeln!(self.writer)?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_header(&mut self, entry: &ReportEntry) -> Result<()> {
        writeln!(self.writer, "Artifact   : {}", entry.id)?;
        writeln!(self.writer, "Status     : {}", status_label(&entry.outcome))?;

        match &entry.outcome {
            RatingOutcome::Completed(result) | RatingOutcome::Disqualified(result) => {
                write!(self.writer, "Net Score  : ")?;
                self.colors.write_colorized_score(self.writer, result.net_score)?;
                writeln!(self.writer, " (computed in {}ms)", result.net_score_latency_ms)?;
            }
            RatingOutcome::Unavailable(Unavailability::Failed(reason)) => writeln!(self.writer, "Reason     : {reason}")?,
            RatingOutcome::Unavailable(Unavailability::TimedOut) => {
                writeln!(self.writer, "Reason     : the rating is still being computed")?;
            }
        }

        Ok(())
    }

    fn write_metrics_table(&mut self, result: &RatingResult) -> Result<()> {
        let metric_width = result.per_metric.keys().map(String::len).max().unwrap_or(0).max("Metric".len());
        let width = TABLE_INDENT + metric_width + SCORE_WIDTH + WEIGHT_WIDTH + LATENCY_WIDTH + 4 * COLUMN_GAP + "Notes".len();

        writeln!(self.writer)?;
        self.colors.write_styled_line(self.writer, "─", width, TextStyle::Dimmed)?;
        writeln!(self.writer)?;

        write!(self.writer, "{:TABLE_INDENT$}", "")?;
        for (title, column_width, left) in [
            ("Metric", metric_width, true),
            ("Score", SCORE_WIDTH, false),
            ("Weight", WEIGHT_WIDTH, false),
            ("Latency", LATENCY_WIDTH, false),
        ] {
            let padded = if left {
                format!("{title:<column_width$}")
            } else {
                format!("{title:>column_width$}")
            };
            self.colors.write_styled_text(self.writer, &padded, TextStyle::Bold)?;
            write!(self.writer, "{:COLUMN_GAP$}", "")?;
        }
        self.colors.write_styled_text(self.writer, "Notes", TextStyle::Bold)?;
        writeln!(self.writer)?;

        self.colors.write_styled_line(self.writer, "─", width, TextStyle::Dimmed)?;
        writeln!(self.writer)?;

        for (name, value) in &result.per_metric {
            let weight = weight_of(name).map_or_else(|| "-".to_string(), |w| format!("{w:.2}"));
            let latency = format!("{}ms", value.latency_ms);

            write!(self.writer, "{:TABLE_INDENT$}{name:<metric_width$}  ", "")?;
            self.colors.write_colorized_score_padded(self.writer, value.value.scalar(), SCORE_WIDTH)?;
            writeln!(
                self.writer,
                "  {weight:>WEIGHT_WIDTH$}  {latency:>LATENCY_WIDTH$}  {}",
                truncate(&notes(value), MAX_NOTES_WIDTH)
            )?;
        }

        Ok(())
    }
}

fn status_label(outcome: &RatingOutcome) -> &'static str {
    match outcome {
        RatingOutcome::Completed(_) => "completed",
        RatingOutcome::Disqualified(_) => "disqualified",
        RatingOutcome::Unavailable(Unavailability::Failed(_)) => "failed",
        RatingOutcome::Unavailable(Unavailability::TimedOut) => "unavailable",
    }
}

/// The notes column: per-target scores, then any findings.
fn notes(value: &MetricValue) -> String {
    let mut parts = Vec::new();

    if let Score::ByTarget(targets) = &value.value {
        parts.push(targets.iter().map(|(target, score)| format!("{target} {score:.2}")).collect::<Vec<_>>().join(", "));
    }

    if let Some(findings) = &value.findings {
        if !findings.summary.is_empty() {
            parts.push(findings.summary.clone());
        }

        if !findings.flags.is_empty() {
            parts.push(format!("flags: {}", findings.flags.join(", ")));
        }
    }

    parts.join("; ")
}

fn truncate(text: &str, max_width: usize) -> String {
    if text.chars().count() <= max_width {
        return text.to_string();
    }

    let mut result: String = text.chars().take(max_width.saturating_sub(1)).collect();
    result.push('…');
    result
}

#[derive(Copy, Clone)]
enum TextStyle {
    Bold,
    Dimmed,
}

struct ColorScheme {
    pass_threshold: f64,
    enabled: bool,
}

impl ColorScheme {
    fn new(pass_threshold: f64, color_mode: ColorMode) -> Self {
        let enabled = matches!(color_mode, ColorMode::Always) || (matches!(color_mode, ColorMode::Auto) && stdout().is_terminal());
        Self { pass_threshold, enabled }
    }

    fn write_styled_text<W: Write>(&self, writer: &mut W, text: &str, style: TextStyle) -> fmt::Result {
        if !self.enabled {
            return write!(writer, "{text}");
        }
        match style {
            TextStyle::Bold => write!(writer, "{}", text.bold()),
            TextStyle::Dimmed => write!(writer, "{}", text.dimmed()),
        }
    }

    fn write_styled_line<W: Write>(&self, writer: &mut W, ch: &str, width: usize, style: TextStyle) -> fmt::Result {
        self.write_styled_text(writer, &ch.repeat(width), style)
    }

    fn write_colorized_score<W: Write>(&self, writer: &mut W, score: f64) -> fmt::Result {
        self.write_colorized_score_padded(writer, score, 0)
    }

    fn write_colorized_score_padded<W: Write>(&self, writer: &mut W, score: f64, width: usize) -> fmt::Result {
        let text = format!("{score:>width$.2}");
        if !self.enabled {
            return write!(writer, "{text}");
        }

        if score >= self.pass_threshold {
            write!(writer, "{}", text.green())
        } else {
            write!(writer, "{}", text.red())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facts::{ArtifactKind, ArtifactRef};
    use crate::metrics::Findings;
    use std::collections::BTreeMap;
    use std::sync::Arc;

    fn entry(outcome: RatingOutcome) -> ReportEntry {
        ReportEntry {
            id: ArtifactRef::new(ArtifactKind::Model, "org/model", None).id(),
            outcome,
        }
    }

    fn result() -> Arc<RatingResult> {
        let risk = MetricValue {
            name: "readme_risk".to_string(),
            value: Score::Scalar(0.7),
            latency_ms: 3,
            findings: Some(Findings {
                summary: "Package includes: examples".to_string(),
                flags: vec!["missing_license".to_string()],
            }),
        };

        Arc::new(RatingResult {
            per_metric: BTreeMap::from([("readme_risk".to_string(), risk)]),
            net_score: 0.42,
            net_score_latency_ms: 0,
        })
    }

    #[test]
    fn full_report_lists_metrics_and_findings() {
        let mut out = String::new();
        generate(&[entry(RatingOutcome::Completed(result()))], 0.5, ColorMode::Never, false, &mut out).unwrap();

        assert!(out.contains("Artifact   : model/org/model"));
        assert!(out.contains("Net Score  : 0.42"));
        assert!(out.contains("readme_risk"));
        assert!(out.contains("flags: missing_license"));
    }

    #[test]
    fn short_report_has_one_line_per_artifact() {
        let mut out = String::new();
        let entries = [
            entry(RatingOutcome::Disqualified(result())),
            entry(RatingOutcome::Unavailable(Unavailability::TimedOut)),
        ];
        generate(&entries, 0.5, ColorMode::Never, true, &mut out).unwrap();

        assert_eq!(out.lines().collect::<Vec<_>>(), vec!["model/org/model disqualified 0.42", "model/org/model unavailable -"]);
    }

    #[test]
    fn truncation_marks_cut_text() {
        assert_eq!(truncate("abcdef", 4), "abc…");
        assert_eq!(truncate("abc", 4), "abc");
    }
}
