// SPDX-FileCopyrightText: 2026 Plaza Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `plaza chat` command implementation.
//!
//! Interactive REPL over one [`ChatSession`] with readline history and
//! colored output. `/traits` shows the current personality.

use std::sync::Arc;

use colored::Colorize;
use plaza_agent::{ChatSession, ExchangeOutcome, build_orchestrator};
use plaza_config::PlazaConfig;
use plaza_core::{PlazaError, TraitVector};
use plaza_personality::{average_trait, hue_degrees};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use crate::serve::init_tracing;
use crate::wiring::{build_provider, build_stores};

const BAR_WIDTH: usize = 20;

/// Runs the `plaza chat` REPL.
pub async fn run_chat(config: PlazaConfig) -> Result<(), PlazaError> {
    init_tracing("warn");

    let provider = build_provider(&config);
    let stores = build_stores(&config).await;
    let orchestrator = Arc::new(build_orchestrator(
        &config,
        provider.provider,
        stores.personality,
        stores.memories,
    ));
    let mut session = ChatSession::start(orchestrator).await;

    let mut rl = DefaultEditor::new()
        .map_err(|e| PlazaError::Internal(format!("failed to initialize readline: {e}")))?;

    let name = config.agent.display_name.clone();
    println!("{}", format!("plaza chat with {name}").bold().green());
    println!(
        "Type {} to see {name}'s personality, {} to exit.\n",
        "/traits".yellow(),
        "/quit".yellow()
    );

    let prompt = format!("{} ", "you>".cyan().bold());
    loop {
        match rl.readline(&prompt) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                if trimmed == "/quit" || trimmed == "/exit" {
                    break;
                }
                let _ = rl.add_history_entry(&line);

                if trimmed == "/traits" {
                    print_traits(&session.snapshot().traits, session.snapshot().exchange_count);
                    continue;
                }

                match session.send(trimmed).await {
                    Ok(outcome) => print_outcome(&name, &outcome),
                    Err(e) => eprintln!("{} {e}", "error:".red().bold()),
                }
            }
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("{} {e}", "readline error:".red());
                break;
            }
        }
    }

    println!("{}", "goodbye".dimmed());
    Ok(())
}

fn print_outcome(name: &str, outcome: &ExchangeOutcome) {
    println!(
        "{} {}",
        format!("{}>", name.to_lowercase()).magenta().bold(),
        outcome.agent_text
    );

    let changes = outcome
        .deltas
        .iter()
        .map(|(t, d)| format!("{t} {d:+}"))
        .collect::<Vec<_>>()
        .join(", ");
    let mut status = format!(
        "[{} | learning {:.2} | hue {}]",
        outcome.emotion,
        outcome.learning_value,
        hue_degrees(&outcome.traits)
    );
    if !changes.is_empty() {
        status.push_str(&format!(" {changes}"));
    }
    if let Some(kind) = outcome.memory {
        status.push_str(&format!(" remembered ({kind})"));
    }
    println!("{}\n", status.dimmed());
}

fn print_traits(traits: &TraitVector, exchange_count: u64) {
    for (t, value) in traits.entries() {
        println!("  {:<14} {} {value:>5.1}", t.as_str(), trait_bar(value));
    }
    println!(
        "{}\n",
        format!(
            "  average {:.1}, hue {}, {exchange_count} exchanges",
            average_trait(traits),
            hue_degrees(traits)
        )
        .dimmed()
    );
}

/// Fixed-width bar for a value in `[0, 100]`.
fn trait_bar(value: f64) -> String {
    let filled = ((value / 100.0) * BAR_WIDTH as f64).round() as usize;
    let filled = filled.min(BAR_WIDTH);
    format!("{}{}", "#".repeat(filled), ".".repeat(BAR_WIDTH - filled))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bar_scales_with_value() {
        assert_eq!(trait_bar(0.0), ".".repeat(BAR_WIDTH));
        assert_eq!(trait_bar(100.0), "#".repeat(BAR_WIDTH));
        assert_eq!(trait_bar(50.0).matches('#').count(), BAR_WIDTH / 2);
    }
}
