mod cli;
mod controller;
mod effects;

use anyhow::anyhow;
use clap::Parser;
use engine_logging::engine_info;

use crate::controller::{Controller, RunOutcome};

fn main() -> anyhow::Result<()> {
    let args = cli::Cli::parse();
    engine_logging::initialize(args.log_destination());
    engine_info!("educomic starting against {}", args.service_url);

    let mut controller = Controller::new(args.settings(), args.policy(), args.out_dir.clone())
        .map_err(|err| anyhow!("engine startup failed: {}", err.message))?;

    match controller.run_to_completion(args.form()) {
        RunOutcome::Exported(path) => {
            println!("Saved {}", path.display());
            Ok(())
        }
        RunOutcome::Rejected => Err(anyhow!("request rejected; see the log above")),
        RunOutcome::Failed(message) => Err(anyhow!(message)),
    }
}
