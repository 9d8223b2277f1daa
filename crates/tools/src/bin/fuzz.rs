use anyhow::Result;
use bomber_core::{AGENT_COUNT, BOARD_SIZE, Item, Move, Pos, SimpleAgent, State};
use clap::Parser;
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    #[arg(short = 'n', long, default_value_t = 1000)]
    scenarios: u32,
    /// Decision rounds per scenario
    #[arg(short, long, default_value_t = 10)]
    ticks: u32,
}

fn random_state(rng: &mut ChaCha8Rng) -> State {
    let mut state = State::new();
    for y in 0..BOARD_SIZE as i32 {
        for x in 0..BOARD_SIZE as i32 {
            let item = match rng.next_u64() % 100 {
                0..=11 => Item::Rigid,
                12..=29 => Item::Wood,
                30..=32 => Item::ExtraBomb,
                33 => Item::IncrRange,
                34 => Item::Kick,
                _ => Item::Passage,
            };
            state.set_item(Pos { y, x }, item);
        }
    }
    let corners = [
        Pos { y: 1, x: 1 },
        Pos { y: 1, x: 9 },
        Pos { y: 9, x: 1 },
        Pos { y: 9, x: 9 },
    ];
    for corner in corners {
        state.set_item(corner, Item::Passage);
        state.add_agent(corner);
    }
    for _ in 0..rng.next_u64() % 4 {
        let pos = Pos {
            y: (rng.next_u64() % BOARD_SIZE as u64) as i32,
            x: (rng.next_u64() % BOARD_SIZE as u64) as i32,
        };
        if state.item_at(pos) == Item::Passage && !corners.contains(&pos) {
            let strength = 1 + (rng.next_u64() % 4) as i32;
            let fuse = 1 + (rng.next_u64() % 9) as u32;
            state.drop_bomb(pos, strength, fuse);
        }
    }
    state
}

fn run(state: &State, seeds: &[u64], ticks: u32) -> Vec<Move> {
    let mut agents: Vec<SimpleAgent> = seeds
        .iter()
        .enumerate()
        .map(|(id, seed)| SimpleAgent::new(id, *seed))
        .collect();
    let mut actions = Vec::new();
    for _ in 0..ticks {
        for agent in &mut agents {
            actions.push(agent.act(state));
        }
    }
    actions
}

fn main() -> Result<()> {
    let args = Args::parse();

    println!(
        "Starting decision fuzz on seed {} for {} scenarios x {} ticks...",
        args.seed, args.scenarios, args.ticks
    );
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);

    for scenario in 0..args.scenarios {
        let state = random_state(&mut rng);
        let hash_before = state.snapshot_hash();
        let seeds: Vec<u64> = (0..AGENT_COUNT as u64).map(|id| args.seed ^ id).collect();

        let first = run(&state, &seeds, args.ticks);
        let second = run(&state, &seeds, args.ticks);
        assert_eq!(first, second, "Scenario {scenario} diverged between identical runs");
        assert_eq!(
            state.snapshot_hash(),
            hash_before,
            "Scenario {scenario} mutated the board snapshot"
        );
        assert_eq!(
            first.len(),
            AGENT_COUNT * args.ticks as usize,
            "Scenario {scenario} skipped a decision"
        );
    }

    println!("Fuzzing completed successfully.");
    Ok(())
}
