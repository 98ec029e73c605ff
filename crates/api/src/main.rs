//! Agenda - scheduled message dispatches from the terminal

use std::io::{self, Write};
use std::process::ExitCode;

use agenda_lib::utils::logging::init_tracing;
use agenda_lib::utils::prompt::LinePrompt;
use agenda_lib::{commands, resolve_time_zone, AppContext, Cli};
use clap::Parser;

#[tokio::main]
async fn main() -> ExitCode {
    // .env may carry AGENDA_* values that clap and the config loader read
    let dotenv = dotenvy::dotenv();
    let cli = Cli::parse();
    init_tracing(cli.log_json);

    match dotenv {
        Ok(path) => tracing::debug!(path = %path.display(), "Loaded .env"),
        Err(err) if err.not_found() => {}
        Err(err) => tracing::warn!(error = %err, "Could not load .env file"),
    }

    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            #[allow(clippy::print_stderr)]
            {
                eprintln!("error: {err:#}");
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = agenda_infra::config::load(cli.config.clone())?;
    let tz = resolve_time_zone(cli.tz.as_deref())?;
    let ctx = AppContext::new(config, tz)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut confirm = LinePrompt::new(io::stdin().lock(), io::stderr());
    commands::execute(&ctx, &cli.command, &mut out, &mut confirm).await?;
    out.flush()?;
    Ok(())
}
