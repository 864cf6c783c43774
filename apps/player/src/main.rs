use std::process::ExitCode;

use clap::Parser;
use symcanvas_player_lib::{run, Cli};

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("symcanvas-player: {}", err);
            ExitCode::FAILURE
        }
    }
}
