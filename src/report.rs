// 📋 Merger Report - what the presentation layer shows
//
// Turns a MergerResult into display-ready pieces: a two-column comparison
// table, three post-merger metrics (4 decimal places), commentary, and the
// two stake slices for a proportion chart. Used by the CLI, TUI and server.

use crate::calculator::MergerResult;
use crate::financials::{Company, MergerInputs};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// REPORT PIECES
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRow {
    pub metric: String,
    pub company_a: f64,
    pub company_b: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricDisplay {
    pub label: String,
    pub value: f64,
    /// `value` to 4 decimal places
    pub formatted: String,
}

impl MetricDisplay {
    fn new(label: &str, value: f64) -> Self {
        MetricDisplay {
            label: label.to_string(),
            value,
            formatted: format!("{:.4}", value),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StakeSlice {
    pub label: String,
    pub percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Commentary {
    pub merger_type: String,
    pub stake_comment: String,
    pub de_comment: String,
}

// ============================================================================
// MERGER REPORT
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergerReport {
    pub comparison: Vec<ComparisonRow>,
    pub post_merger: Vec<MetricDisplay>,
    pub commentary: Commentary,
    pub stakes: Vec<StakeSlice>,
    pub result: MergerResult,
}

impl MergerReport {
    pub fn from_result(result: &MergerResult) -> Self {
        let row = |metric: &str, a: f64, b: f64| ComparisonRow {
            metric: metric.to_string(),
            company_a: a,
            company_b: b,
        };

        let comparison = vec![
            row("Earnings Per Share", result.eps_a, result.eps_b),
            row("Price-To-Earnings Ratio", result.pe_a, result.pe_b),
            row("Debt-To-Equity Ratio", result.de_a, result.de_b),
            row("Return on Equity", result.roe_a, result.roe_b),
            row("Stake owned (%)", result.stake_a_pct, result.stake_b_pct),
        ];

        let post_merger = vec![
            MetricDisplay::new("Post Merger EPS", result.post_merger_eps),
            MetricDisplay::new("Post Merger D/E", result.post_merger_de),
            MetricDisplay::new("Post Merger P/E (using A's share price)", result.post_merger_pe),
        ];

        let stakes = vec![
            StakeSlice {
                label: Company::A.label().to_string(),
                percent: result.stake_a_pct,
            },
            StakeSlice {
                label: Company::B.label().to_string(),
                percent: result.stake_b_pct,
            },
        ];

        MergerReport {
            comparison,
            post_merger,
            commentary: Commentary {
                merger_type: result.merger_type.label().to_string(),
                stake_comment: result.stake_comment.clone(),
                de_comment: result.de_comment.clone(),
            },
            stakes,
            result: result.clone(),
        }
    }

    pub fn summary(&self) -> String {
        format!(
            "{}: A {:.2}% / B {:.2}%, post-merger EPS {}, D/E {}",
            self.commentary.merger_type,
            self.result.stake_a_pct,
            self.result.stake_b_pct,
            self.post_merger[0].formatted,
            self.post_merger[1].formatted,
        )
    }

    /// Plain-text rendering for terminals and logs
    pub fn render_text(&self) -> String {
        let mut out = String::new();

        out.push_str("Merger Analysis Results\n");
        out.push_str(&format!("{:<26} {:>16} {:>16}\n", "Metrics", "Company A", "Company B"));
        out.push_str(&format!("{}\n", "─".repeat(60)));
        for row in &self.comparison {
            out.push_str(&format!(
                "{:<26} {:>16.4} {:>16.4}\n",
                row.metric, row.company_a, row.company_b
            ));
        }

        out.push('\n');
        for metric in &self.post_merger {
            out.push_str(&format!("{:<42} {}\n", metric.label, metric.formatted));
        }

        out.push_str("\nMerger Type\n");
        out.push_str(&format!("  {}\n", self.commentary.merger_type));
        out.push_str("Stake Comment\n");
        out.push_str(&format!("  {}\n", self.commentary.stake_comment));
        out.push_str("D/E Ratio Comment\n");
        out.push_str(&format!("  {}\n", self.commentary.de_comment));

        out.push_str("\nOwnership Stake Post-Merger\n");
        for slice in &self.stakes {
            out.push_str(&format!(
                "  {:<10} {:>7.2}% {}\n",
                slice.label,
                slice.percent,
                stake_bar(slice.percent, 40)
            ));
        }

        out
    }
}

/// Horizontal bar of `width` cells filled in proportion to `percent`
pub fn stake_bar(percent: f64, width: usize) -> String {
    let filled = ((percent.clamp(0.0, 100.0) / 100.0) * width as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

// ============================================================================
// ENVELOPE (JSON output)
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisEnvelope {
    pub inputs: MergerInputs,
    pub report: MergerReport,
    pub analyzed_at: DateTime<Utc>,
}

impl AnalysisEnvelope {
    pub fn new(inputs: MergerInputs, report: MergerReport) -> Self {
        AnalysisEnvelope {
            inputs,
            report,
            analyzed_at: Utc::now(),
        }
    }
}
