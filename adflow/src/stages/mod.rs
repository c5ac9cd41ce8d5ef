//! Stage definitions for the ad-script pipeline.
//!
//! A stage is a named, opaque text-to-text transformation with a fixed
//! instruction profile. The five definitions returned by
//! [`standard_stages`] are created once per orchestrator, immutable, and
//! shared read-only across runs.

mod executor;
mod outcome;
pub mod profiles;

pub use executor::StageExecutor;
pub use outcome::StageOutcome;

use std::fmt;
use std::sync::Arc;

use crate::capability::GenerationCapability;

/// How a failed stage's output is substituted downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackRule {
    /// A fixed substitute string.
    Static(&'static str),
    /// A fixed prefix followed by the original request text.
    PrefixedRequest(&'static str),
}

/// One fixed transformation step in the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageDefinition {
    /// Stage identifier (e.g. `Route-format`).
    pub name: &'static str,
    /// Label used when this stage's output is composed into a later stage's
    /// input.
    pub context_label: &'static str,
    /// Section heading in the final report.
    pub report_heading: &'static str,
    /// Human-readable progress detail shown while the stage runs.
    pub progress_detail: &'static str,
    /// System instruction profile handed to the generation capability.
    pub instructions: &'static str,
    /// Substitution applied by the orchestrator when the stage fails.
    pub fallback: FallbackRule,
}

impl StageDefinition {
    /// Resolves the fallback text for a failed execution of this stage.
    #[must_use]
    pub fn fallback_text(&self, request_text: &str) -> String {
        match self.fallback {
            FallbackRule::Static(text) => text.to_string(),
            FallbackRule::PrefixedRequest(prefix) => format!("{prefix} {request_text}"),
        }
    }
}

/// A stage definition bound to the capability that executes it.
#[derive(Clone)]
pub struct StageBinding {
    /// The immutable stage definition.
    pub definition: StageDefinition,
    /// The capability invoked for this stage.
    pub capability: Arc<dyn GenerationCapability>,
}

impl fmt::Debug for StageBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StageBinding")
            .field("definition", &self.definition.name)
            .finish_non_exhaustive()
    }
}

/// Returns the fixed stage sequence, in execution order.
#[must_use]
pub fn standard_stages() -> Vec<StageDefinition> {
    vec![
        StageDefinition {
            name: "Structure",
            context_label: "Structure",
            report_heading: "Show Structure",
            progress_detail: "Analyzing show structure...",
            instructions: profiles::STRUCTURER,
            fallback: FallbackRule::PrefixedRequest("(Structurer failed — using raw input)"),
        },
        StageDefinition {
            name: "Route-format",
            context_label: "Format",
            report_heading: "Ad Format",
            progress_detail: "Selecting ad format...",
            instructions: profiles::ROUTER,
            fallback: FallbackRule::Static("Multi-Speaker format (fallback)"),
        },
        StageDefinition {
            name: "Define-speakers",
            context_label: "Speakers",
            report_heading: "Speaker Profiles",
            progress_detail: "Creating speaker profiles...",
            instructions: profiles::SPEAKER,
            fallback: FallbackRule::Static("Speaker 0: High energy narrator (fallback)"),
        },
        StageDefinition {
            name: "Draft-script",
            context_label: "Script",
            report_heading: "Generated Ad Script",
            progress_detail: "Drafting ad script...",
            instructions: profiles::SCRIPTWRITER,
            fallback: FallbackRule::Static("(Script generation failed)"),
        },
        StageDefinition {
            name: "Validate",
            context_label: "Validation",
            report_heading: "Validation Report",
            progress_detail: "Validating final script...",
            instructions: profiles::VALIDATOR,
            fallback: FallbackRule::Static("(Validation skipped)"),
        },
    ]
}

/// Binds each stage definition to a capability produced by `bind`.
pub fn bind_stages<F>(definitions: Vec<StageDefinition>, bind: F) -> Vec<StageBinding>
where
    F: Fn(&StageDefinition) -> Arc<dyn GenerationCapability>,
{
    definitions
        .into_iter()
        .map(|definition| {
            let capability = bind(&definition);
            StageBinding {
                definition,
                capability,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::EchoCapability;

    #[test]
    fn standard_sequence_is_fixed() {
        let stages = standard_stages();
        let names: Vec<_> = stages.iter().map(|stage| stage.name).collect();
        assert_eq!(
            names,
            vec![
                "Structure",
                "Route-format",
                "Define-speakers",
                "Draft-script",
                "Validate"
            ]
        );
    }

    #[test]
    fn report_headings_match_sections() {
        let headings: Vec<_> = standard_stages()
            .iter()
            .map(|stage| stage.report_heading)
            .collect();
        assert_eq!(
            headings,
            vec![
                "Show Structure",
                "Ad Format",
                "Speaker Profiles",
                "Generated Ad Script",
                "Validation Report"
            ]
        );
    }

    #[test]
    fn fallback_table_is_verbatim() {
        let stages = standard_stages();

        assert_eq!(
            stages[1].fallback_text("ignored"),
            "Multi-Speaker format (fallback)"
        );
        assert_eq!(
            stages[2].fallback_text("ignored"),
            "Speaker 0: High energy narrator (fallback)"
        );
        assert_eq!(stages[3].fallback_text("ignored"), "(Script generation failed)");
        assert_eq!(stages[4].fallback_text("ignored"), "(Validation skipped)");
    }

    #[test]
    fn structure_fallback_carries_request() {
        let structure = &standard_stages()[0];
        let text = structure.fallback_text("EP 12 raw log");

        assert!(text.starts_with("(Structurer failed — using raw input)"));
        assert!(text.ends_with("EP 12 raw log"));
    }

    #[test]
    fn every_stage_has_instructions() {
        for stage in standard_stages() {
            assert!(!stage.instructions.trim().is_empty(), "{}", stage.name);
        }
    }

    #[test]
    fn bind_stages_keeps_order() {
        let bindings = bind_stages(standard_stages(), |_| Arc::new(EchoCapability));
        assert_eq!(bindings.len(), 5);
        assert_eq!(bindings[3].definition.name, "Draft-script");
    }
}
