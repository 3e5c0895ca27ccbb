//! Replay of recorded user interaction.
//!
//! A script is a JSON list of steps; each step names its target by element
//! id:
//!
//! ```json
//! [
//!   {"change": {"target": "status", "value": "active"}},
//!   {"check": "mode-advanced"},
//!   {"click": "remove-1"},
//!   {"drop": {"target": "zone", "files": ["a.pdf"]}},
//!   {"trigger": {"target": "tag-red", "event": "dblclick"}}
//! ]
//! ```

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use tracing::{debug, info_span};

use formwire_core::{DispatchOutcome, FormEnhancer};
use formwire_model::{Document, Event, EventType, NodeId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Step {
    Change { target: String, value: String },
    Check(String),
    Click(String),
    Drop { target: String, files: Vec<String> },
    Trigger { target: String, event: String },
}

impl Step {
    pub fn target(&self) -> &str {
        match self {
            Step::Change { target, .. }
            | Step::Drop { target, .. }
            | Step::Trigger { target, .. } => target,
            Step::Check(target) | Step::Click(target) => target,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Step::Change { .. } => "change",
            Step::Check(_) => "check",
            Step::Click(_) => "click",
            Step::Drop { .. } => "drop",
            Step::Trigger { .. } => "trigger",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepReport {
    pub step: &'static str,
    pub target: String,
    pub handled: usize,
    pub default_prevented: bool,
}

pub fn load_script(path: &Path) -> Result<Vec<Step>> {
    let text =
        fs::read_to_string(path).with_context(|| format!("read script {}", path.display()))?;
    parse_script(&text).with_context(|| format!("parse script {}", path.display()))
}

pub fn parse_script(text: &str) -> Result<Vec<Step>> {
    Ok(serde_json::from_str(text)?)
}

/// Apply `steps` in order. Stops at the first step whose target is missing
/// or whose handlers fail.
pub fn run_script(
    document: &mut Document,
    enhancer: &mut FormEnhancer,
    steps: &[Step],
) -> Result<Vec<StepReport>> {
    let mut reports = Vec::with_capacity(steps.len());
    for (index, step) in steps.iter().enumerate() {
        let span = info_span!("step", index, step = step.name(), target = step.target());
        let _guard = span.enter();
        let target = resolve_target(document, step.target())
            .with_context(|| format!("step {}", index + 1))?;
        let outcome = apply_step(document, enhancer, target, step)
            .with_context(|| format!("step {} ({} #{})", index + 1, step.name(), step.target()))?;
        debug!(handled = outcome.handled, "step applied");
        reports.push(StepReport {
            step: step.name(),
            target: step.target().to_string(),
            handled: outcome.handled,
            default_prevented: outcome.default_prevented,
        });
    }
    Ok(reports)
}

fn resolve_target(document: &Document, id: &str) -> Result<NodeId> {
    document
        .element_by_id(id)
        .ok_or_else(|| anyhow!("no element with id '{id}'"))
}

fn apply_step(
    document: &mut Document,
    enhancer: &mut FormEnhancer,
    target: NodeId,
    step: &Step,
) -> Result<DispatchOutcome> {
    let outcome = match step {
        Step::Change { value, .. } => enhancer.change_value(document, target, value)?,
        Step::Check(_) => enhancer.check(document, target)?,
        Step::Click(_) => enhancer.click(document, target)?,
        Step::Drop { files, .. } => enhancer.drop_files(document, target, files.clone())?,
        Step::Trigger { event, .. } => {
            enhancer.dispatch(document, target, &Event::new(EventType::from_name(event)))?
        }
    };
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_step_shape() {
        let steps = parse_script(
            r#"[
                {"change": {"target": "a", "value": "x"}},
                {"check": "b"},
                {"click": "c"},
                {"drop": {"target": "d", "files": ["f.txt"]}},
                {"trigger": {"target": "e", "event": "dragover"}}
            ]"#,
        )
        .unwrap();
        assert_eq!(
            steps,
            [
                Step::Change {
                    target: "a".to_string(),
                    value: "x".to_string()
                },
                Step::Check("b".to_string()),
                Step::Click("c".to_string()),
                Step::Drop {
                    target: "d".to_string(),
                    files: vec!["f.txt".to_string()]
                },
                Step::Trigger {
                    target: "e".to_string(),
                    event: "dragover".to_string()
                },
            ]
        );
        let targets: Vec<&str> = steps.iter().map(Step::target).collect();
        assert_eq!(targets, ["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn unknown_step_is_rejected() {
        assert!(parse_script(r#"[{"hover": "a"}]"#).is_err());
    }
}
