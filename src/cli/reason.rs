//! CLI `reason` command: run one reasoning request and print the trace.

use anyhow::Result;

use crate::config::NoesisConfig;
use crate::introspection;
use crate::reasoning::{ReasoningMethod, ReasoningRequest};

pub fn reason(
    config: &NoesisConfig,
    premises: Vec<String>,
    goal: String,
    method: &str,
    json: bool,
) -> Result<()> {
    let method: ReasoningMethod = method.parse()?;
    let (store, mut reasoner) = super::open(config)?;

    let request = ReasoningRequest {
        premises,
        goal,
        method,
    };
    let result = introspection::reason_and_record(
        &mut reasoner,
        &store,
        &request,
        config.reasoning.record_sessions,
    )?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!("Method:      {}", result.method);
    println!("Conclusion:  {}", result.conclusion);
    println!("Found:       {}", if result.found { "yes" } else { "no" });
    println!("Confidence:  {:.2}", result.confidence);

    if !result.steps.is_empty() {
        println!();
        println!("Steps:");
        for (i, step) in result.steps.iter().enumerate() {
            println!("  {}. {step}", i + 1);
        }
    }

    if !result.explanations.is_empty() {
        println!();
        println!("Explanations:");
        for e in &result.explanations {
            println!(
                "  [{}] {} (confidence {:.2}, plausibility {:.2})",
                e.source,
                e.premises.join(" ∧ "),
                e.confidence,
                e.plausibility
            );
        }
    }

    Ok(())
}
