//! CLI `assess` command: score a statement and print the breakdown.

use anyhow::Result;

use crate::config::NoesisConfig;
use crate::introspection::Introspector;

pub fn assess(config: &NoesisConfig, statement: &str, evidence: &[String]) -> Result<()> {
    let (store, reasoner) = super::open(config)?;

    let assessment = Introspector::new(&store, &reasoner)
        .with_config(config.introspection.clone())
        .assess_confidence(statement, evidence)?;

    let b = &assessment.breakdown;
    println!("Confidence Assessment");
    println!("{}", "=".repeat(40));
    println!("  Statement:           {}", assessment.statement);
    println!("  Level:               {}", assessment.level);
    println!("  Score:               {:.2}", assessment.score);
    println!();
    println!("Breakdown:");
    println!("  Memory support:      {:.2}", b.memory_support);
    println!(
        "  Reasoning support:   {:.2} ({})",
        b.reasoning_support,
        assessment.reasoning_method.as_str()
    );
    println!("  Consistency:         {:.2}", b.consistency);
    println!("  Source reliability:  {:.2}", b.source_reliability);
    println!();
    println!("Factors:");
    for factor in &assessment.factors {
        println!("  - {factor}");
    }

    Ok(())
}
