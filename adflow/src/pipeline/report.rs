//! Final report aggregation and rendering.

use serde::{Deserialize, Serialize};

use super::RunContext;
use crate::stages::StageBinding;

/// One labeled section of the final report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSection {
    /// Section heading.
    pub heading: String,
    /// Stage output, or the substituted fallback.
    pub body: String,
}

/// The aggregated result of one pipeline run.
///
/// Always constructible once a run reaches its terminal point; failed stages
/// contribute their fallback text and are listed under warnings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalReport {
    /// Names of failed stages, in stage order. Empty on a clean run.
    pub warnings: Vec<String>,
    /// One section per stage, in stage order.
    pub sections: Vec<ReportSection>,
}

impl FinalReport {
    /// Builds the report from a finished run.
    #[must_use]
    pub fn from_run(context: &RunContext, stages: &[StageBinding]) -> Self {
        let warnings = context.failed_stage_names();
        let sections = stages
            .iter()
            .zip(context.outcomes())
            .map(|(binding, outcome)| ReportSection {
                heading: binding.definition.report_heading.to_string(),
                body: outcome.output.clone(),
            })
            .collect();

        Self { warnings, sections }
    }

    /// Returns true when at least one stage failed.
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Looks up a section by heading.
    #[must_use]
    pub fn section(&self, heading: &str) -> Option<&ReportSection> {
        self.sections
            .iter()
            .find(|section| section.heading == heading)
    }

    /// Renders the report as a Markdown document.
    ///
    /// The warnings block is present only when a stage failed; sections
    /// follow in stage order.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();

        if self.has_warnings() {
            out.push_str("### Warnings\n");
            for name in &self.warnings {
                out.push_str(&format!("- {name} failed; fallback text used\n"));
            }
            out.push('\n');
        }

        for section in &self.sections {
            out.push_str(&format!("### {}\n{}\n\n", section.heading, section.body));
        }

        let mut rendered = out.trim_end().to_string();
        rendered.push('\n');
        rendered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_report(warnings: Vec<String>) -> FinalReport {
        FinalReport {
            warnings,
            sections: vec![
                ReportSection {
                    heading: "Show Structure".to_string(),
                    body: "S1".to_string(),
                },
                ReportSection {
                    heading: "Ad Format".to_string(),
                    body: "S2".to_string(),
                },
            ],
        }
    }

    #[test]
    fn clean_render_has_no_warnings_block() {
        let rendered = sample_report(Vec::new()).render();
        assert_eq!(rendered, "### Show Structure\nS1\n\n### Ad Format\nS2\n");
        assert!(!rendered.contains("Warnings"));
    }

    #[test]
    fn warnings_block_leads_and_lists_failed_stages() {
        let rendered = sample_report(vec!["Route-format".to_string()]).render();

        assert!(rendered.starts_with("### Warnings\n- Route-format failed"));
        let warnings_at = rendered.find("### Warnings").unwrap();
        let first_section_at = rendered.find("### Show Structure").unwrap();
        assert!(warnings_at < first_section_at);
    }

    #[test]
    fn section_lookup() {
        let report = sample_report(Vec::new());
        assert_eq!(report.section("Ad Format").map(|s| s.body.as_str()), Some("S2"));
        assert!(report.section("Validation Report").is_none());
    }

    #[test]
    fn report_round_trips_through_json() {
        let report = sample_report(vec!["Validate".to_string()]);
        let json = serde_json::to_string(&report).unwrap();
        let round_trip: FinalReport = serde_json::from_str(&json).unwrap();

        assert_eq!(report, round_trip);
    }
}
