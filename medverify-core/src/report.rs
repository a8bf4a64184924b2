//! Result rendering
//!
//! Pure functions from a `VerificationResult` to what the dashboard shows:
//! a severity band for the score, a human label for the judgment, and the
//! full analysis report as text or JSON.

use std::fmt::Write as _;

use serde::Serialize;

use crate::models::{AnalysisStage, VerificationResult};

pub const REPORT_TITLE: &str = "Analysis Report";

pub const DISCLAIMER: &str =
    "This is an AI-powered analysis and not a substitute for professional medical advice.";

/// Label for any judgment outside the known table.
pub const INCONCLUSIVE_LABEL: &str = "Analysis Inconclusive";

/// Three-way credibility classification of a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SeverityBand {
    Unreliable,
    Uncertain,
    Reliable,
}

impl SeverityBand {
    /// Lower bounds are inclusive: 30 is uncertain, 70 is reliable.
    pub fn for_score(score: u8) -> Self {
        if score < 30 {
            SeverityBand::Unreliable
        } else if score < 70 {
            SeverityBand::Uncertain
        } else {
            SeverityBand::Reliable
        }
    }

    pub fn color_name(self) -> &'static str {
        match self {
            SeverityBand::Unreliable => "red",
            SeverityBand::Uncertain => "amber",
            SeverityBand::Reliable => "green",
        }
    }

    pub fn color_hex(self) -> &'static str {
        match self {
            SeverityBand::Unreliable => "#ef4444",
            SeverityBand::Uncertain => "#f59e0b",
            SeverityBand::Reliable => "#22c55e",
        }
    }
}

pub fn verdict_label(judgment: &str) -> &'static str {
    match judgment {
        "Contradicted" => "Highly Unreliable",
        "Supported" => "Likely Reliable",
        "Unsupported/Neutral" => "Uncertain / Neutral",
        _ => INCONCLUSIVE_LABEL,
    }
}

/// Display model of one verification result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub score: u8,
    pub score_text: String,
    pub band: SeverityBand,
    pub color: &'static str,
    pub verdict_label: &'static str,
    pub verdict: String,
    pub evidence_summary: String,
    pub tags: Vec<String>,
    pub source_analyzed: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trusted_reference: Option<String>,
    pub disclaimer: &'static str,
}

impl Report {
    pub fn from_result(result: &VerificationResult) -> Self {
        let band = SeverityBand::for_score(result.credibility_score);
        Self {
            score: result.credibility_score,
            score_text: format!("{}/100", result.credibility_score),
            band,
            color: band.color_hex(),
            verdict_label: verdict_label(&result.llm_judgment),
            verdict: result.llm_judgment.clone(),
            evidence_summary: result.reasoning.clone(),
            tags: result.extracted_terms.clone(),
            source_analyzed: result.source_origin.clone(),
            trusted_reference: result.trusted_reference.clone(),
            disclaimer: DISCLAIMER,
        }
    }

    /// Plain-text rendering for terminals.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", REPORT_TITLE);
        let _ = writeln!(out, "{}", "=".repeat(REPORT_TITLE.len()));
        let _ = writeln!(
            out,
            "Score:    {} [{}]",
            self.score_text,
            self.band.color_name()
        );
        let _ = writeln!(out, "Label:    {}", self.verdict_label);
        let _ = writeln!(out, "Verdict:  {}", self.verdict);
        let _ = writeln!(out, "\nEvidence Summary\n  {}", self.evidence_summary);

        let _ = writeln!(out, "\nKey Terms Extracted");
        if !self.tags.is_empty() {
            let tags: Vec<String> = self.tags.iter().map(|t| format!("[{}]", t)).collect();
            let _ = writeln!(out, "  {}", tags.join(" "));
        }

        let _ = writeln!(out, "\nSource Analyzed\n  {}", self.source_analyzed);
        if let Some(reference) = &self.trusted_reference {
            let _ = writeln!(out, "\nTrusted Reference\n  {}", reference);
        }
        let _ = write!(out, "\nDisclaimer: {}", self.disclaimer);
        out
    }
}

/// One progress line for the loading overlay, or `None` when idle.
pub fn stage_line(stage: AnalysisStage) -> Option<String> {
    stage
        .label()
        .map(|label| format!("[{}/3] {}", stage.index(), label))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(score: u8, judgment: &str, terms: &[&str]) -> VerificationResult {
        VerificationResult {
            credibility_score: score,
            llm_judgment: judgment.to_string(),
            reasoning: "Evidence summary text".to_string(),
            extracted_terms: terms.iter().map(|t| t.to_string()).collect(),
            source_origin: "The MMR vaccine causes autism.".to_string(),
            trusted_reference: None,
        }
    }

    #[test]
    fn test_band_boundaries() {
        assert_eq!(SeverityBand::for_score(0), SeverityBand::Unreliable);
        assert_eq!(SeverityBand::for_score(29), SeverityBand::Unreliable);
        assert_eq!(SeverityBand::for_score(30), SeverityBand::Uncertain);
        assert_eq!(SeverityBand::for_score(69), SeverityBand::Uncertain);
        assert_eq!(SeverityBand::for_score(70), SeverityBand::Reliable);
        assert_eq!(SeverityBand::for_score(100), SeverityBand::Reliable);
    }

    #[test]
    fn test_verdict_labels() {
        assert_eq!(verdict_label("Supported"), "Likely Reliable");
        assert_eq!(verdict_label("Contradicted"), "Highly Unreliable");
        assert_eq!(verdict_label("Unsupported/Neutral"), "Uncertain / Neutral");
        assert_eq!(verdict_label("Foo"), INCONCLUSIVE_LABEL);
        assert_eq!(verdict_label("ERROR"), INCONCLUSIVE_LABEL);
        assert_eq!(verdict_label("contradicted"), INCONCLUSIVE_LABEL);
    }

    #[test]
    fn test_mmr_report_shows_red_unreliable() {
        let report = Report::from_result(&result(5, "Contradicted", &["MMR vaccine", "autism"]));
        assert_eq!(report.score_text, "5/100");
        assert_eq!(report.band, SeverityBand::Unreliable);
        assert_eq!(report.color, "#ef4444");
        assert_eq!(report.verdict_label, "Highly Unreliable");
        assert_eq!(report.tags, vec!["MMR vaccine", "autism"]);

        let text = report.to_text();
        assert!(text.contains("5/100 [red]"));
        assert!(text.contains("[MMR vaccine] [autism]"));
        assert!(text.contains(DISCLAIMER));
        assert!(!text.contains("Trusted Reference"));
    }

    #[test]
    fn test_empty_terms_render_no_tags() {
        let report = Report::from_result(&result(75, "Supported", &[]));
        assert!(report.tags.is_empty());
        let text = report.to_text();
        assert!(text.contains("Key Terms Extracted\n\nSource Analyzed"));
    }

    #[test]
    fn test_trusted_reference_rendered_when_present() {
        let mut r = result(50, "Unsupported/Neutral", &["lemon water"]);
        r.trusted_reference = Some("National Cancer Institute".to_string());
        let report = Report::from_result(&r);
        assert!(report.to_text().contains("Trusted Reference\n  National Cancer Institute"));

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["band"], "uncertain");
        assert_eq!(json["trusted_reference"], "National Cancer Institute");
    }

    #[test]
    fn test_stage_line() {
        assert_eq!(stage_line(AnalysisStage::Idle), None);
        assert_eq!(
            stage_line(AnalysisStage::ExtractingKeywords).as_deref(),
            Some("[0/3] Extracting keywords")
        );
        assert_eq!(
            stage_line(AnalysisStage::FinalVerdict).as_deref(),
            Some("[3/3] Final verdict")
        );
    }
}
