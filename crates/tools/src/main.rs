use anyhow::{Context, Result, ensure};
use bomber_core::strategy::rmap::{RMap, fill_rmap};
use bomber_core::{SimpleAgent, State};
use clap::Parser;
use serde::Deserialize;
use std::fs;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the scenario JSON file to run
    #[arg(short = 'f', long)]
    scenario: String,
    /// Number of decision rounds to run
    #[arg(short, long, default_value_t = 1)]
    ticks: u32,
    /// Render the reachability map of this agent after the run
    #[arg(long)]
    rmap: Option<usize>,
}

/// A board snapshot plus one RNG seed per agent.
#[derive(Deserialize)]
struct Scenario {
    state: State,
    seeds: Vec<u64>,
}

fn load_scenario(path: &str) -> Result<Scenario> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("Failed to read scenario file: {path}"))?;
    let scenario: Scenario =
        serde_json::from_str(&data).with_context(|| "Failed to deserialize scenario JSON")?;
    ensure!(
        scenario.seeds.len() == scenario.state.agents.len(),
        "Scenario carries {} seeds for {} agents",
        scenario.seeds.len(),
        scenario.state.agents.len()
    );
    Ok(scenario)
}

fn main() -> Result<()> {
    let args = Args::parse();

    let scenario = load_scenario(&args.scenario)?;
    let state = scenario.state;

    let mut agents: Vec<SimpleAgent> = scenario
        .seeds
        .iter()
        .enumerate()
        .map(|(id, seed)| SimpleAgent::new(id, *seed))
        .collect();

    for tick in 0..args.ticks {
        for agent in &mut agents {
            if state.agent(agent.id()).dead {
                continue;
            }
            let action = agent.act(&state);
            let reason = agent.log().last().map(|event| format!("{event:?}"));
            println!(
                "tick {tick}: agent {} -> {action:?} ({})",
                agent.id(),
                reason.unwrap_or_default()
            );
        }
    }

    if let Some(id) = args.rmap {
        ensure!(id < state.agents.len(), "No agent with id {id}");
        let mut r = RMap::new();
        fill_rmap(&state, &mut r, id);
        println!("Reachability of agent {id}:");
        print!("{}", r.render());
    }

    println!("Snapshot Hash: {}", state.snapshot_hash());

    Ok(())
}
