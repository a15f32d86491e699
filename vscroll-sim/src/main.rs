mod error;
mod scenario;

use std::fs::File;

use simplelog::{Config, WriteLogger};

use error::ScenarioError;
use scenario::Scenario;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), ScenarioError> {
    let path = std::env::args().nth(1).ok_or(ScenarioError::Usage)?;
    let scenario = Scenario::from_json(&std::fs::read_to_string(&path)?)?;

    let log_file = File::create("vscroll-sim.log")?;
    WriteLogger::init(scenario.log_level()?, Config::default(), log_file)?;
    log::info!(
        "[sim] replaying {} event(s) from {}",
        scenario.events.len(),
        path
    );

    let report = scenario::play(&scenario).await?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
