use std::{error::Error, fs, path::Path};

use line_agent::{
    host::EpisodeHost, policy::RandomPolicy, LineAgent, LineAgentConfig, Spawner, SpawnerConfig,
};
use rand::{rngs::StdRng, SeedableRng};

const NUM_EPISODES: u32 = 200;
const MAX_STEPS: u32 = 500;
/// Seconds of simulated time per step
const DT: f32 = 0.1;
/// A new donut is dropped every this many steps
const SPAWN_EVERY: u32 = 10;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let path = Path::new("demos/out");
    fs::create_dir_all(path)?;

    let spawner = Spawner::new(SpawnerConfig::default())?;
    let mut agent = LineAgent::new(LineAgentConfig::default(), spawner)?;
    let mut policy = RandomPolicy::seeded(0);
    let mut host = EpisodeHost::new(Some(MAX_STEPS));
    let mut rng = StdRng::seed_from_u64(1);

    let mut wtr = csv::Writer::from_path(path.join("episodes.csv"))?;
    wtr.write_record(["episode", "steps", "reward", "outcome"])?;

    for _ in 0..NUM_EPISODES {
        let mut tick = 0;
        let summary = host.run_with(&mut agent, &mut policy, |spawner| {
            if tick % SPAWN_EVERY == 0 {
                spawner.spawn_random(&mut rng);
            }
            spawner.advance(DT);
            tick += 1;
        });

        let outcome = summary
            .outcome
            .map_or(String::from("Truncated"), |o| format!("{:?}", o.cause));
        wtr.write_record([
            summary.episode.to_string(),
            summary.steps.to_string(),
            summary.reward.to_string(),
            outcome,
        ])?;
    }
    wtr.flush()?;

    let report = agent.report.take();
    log::info!(
        "{} steps over {NUM_EPISODES} episodes: {} collisions, {} out of bounds",
        report["steps"],
        report["collisions"],
        report["out_of_bounds"]
    );

    Ok(())
}
