use anyhow::Result;
use clap::Parser;
use colored::control as color_control;
use schema_assoc::cli::commands::analyze::{AnalyzeCommand, AnalyzeCommandHandler};
use schema_assoc::cli::{Cli, Commands};
use schema_assoc::core::naming::LOG_TARGET;
use std::env;
use std::path::PathBuf;
use std::process;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

fn main() {
    // CLIをパースして実行
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    match run_command(cli) {
        Ok(output) => {
            if !output.is_empty() {
                println!("{}", output);
            }
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            process::exit(1);
        }
    }
}

/// ログ出力を初期化する（RUST_LOG が優先）
fn init_tracing(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("{}={}", LOG_TARGET, level).into());

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// コマンドを実行する
fn run_command(cli: Cli) -> Result<String> {
    // --no-color フラグの処理
    if cli.no_color {
        color_control::set_override(false);
    }

    // プロジェクトのルートパスを取得
    let project_path = env::current_dir()?;

    // --config フラグの処理（絶対パスに変換）
    let config_path: Option<PathBuf> = cli.config.map(|p| {
        if p.is_absolute() {
            p
        } else {
            project_path.join(p)
        }
    });

    match cli.command {
        Commands::Analyze { path } => {
            let handler = AnalyzeCommandHandler::new();
            let command = AnalyzeCommand {
                project_path,
                config_path,
                schema_path: path,
                format: cli.format,
            };
            handler.execute(&command)
        }
    }
}
