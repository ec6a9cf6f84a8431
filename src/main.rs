use anyhow::Context;
use clap::Parser;
use colored::*;
use procrunner::cli::Cli;
use procrunner::{logging, Command, Config, RunnerError, RunnerFacade};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {:#}", "[X]".red().bold(), e);
            failure_exit_code(&e)
        }
    }
}

async fn run(cli: &Cli) -> anyhow::Result<()> {
    let mut config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("failed to load configuration")?;

    if cli.no_mirror {
        config.mirror_console = false;
    }

    let _log_guard = logging::init_tracing(cli.log_level(), config.log_dir.as_deref())?;

    let mut commands: Vec<Command> = cli.commands.iter().map(|c| Command::from(c.as_str())).collect();
    if !cli.argv.is_empty() {
        commands.push(Command::Args(cli.argv.clone()));
    }

    let mut runner = RunnerFacade::new(config);

    // 하나라도 실패하면 이후 명령어는 실행하지 않음
    let mut outcome = Ok(());
    for command in commands {
        if let Err(e) = runner.run_command(command).await {
            outcome = Err(e);
            break;
        }
    }

    if cli.history {
        println!("{}", runner.history_table());
    }

    if let Some(path) = &cli.history_json {
        std::fs::write(path, runner.history().to_json()?)
            .with_context(|| format!("failed to write history to {}", path.display()))?;
    }

    outcome?;
    Ok(())
}

/// 자식 프로세스 실패면 그 종료 코드로, 나머지는 1 로 종료
fn failure_exit_code(error: &anyhow::Error) -> ExitCode {
    let code = error
        .downcast_ref::<RunnerError>()
        .and_then(RunnerError::exit_code)
        .filter(|code| (1..=255).contains(code))
        .unwrap_or(1);

    ExitCode::from(code as u8)
}
