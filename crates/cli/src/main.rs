use std::process::ExitCode;

use commands::{BuildInfo, Command};
use log::LevelFilter;

mod commands;
mod import;
mod trim;

#[tokio::main]
async fn main() -> ExitCode {
    let build_info = BuildInfo::current();
    let cli = commands::parse(&build_info);

    env_logger::builder()
        .filter_level(LevelFilter::from(cli.log_level))
        .parse_default_env()
        .init();

    let result = match cli.command {
        Command::Import(args) => import::run(args).await,
        Command::Trim(args) => trim::run(args).await,
        Command::Version => {
            println!("{}", build_info);
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(why) => {
            log::error!("{}", why);
            ExitCode::FAILURE
        }
    }
}
