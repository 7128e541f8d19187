//! lintscope CLI entry point

use clap::Parser;
use lintscope::cli::common::{EXIT_ERROR, EXIT_SUCCESS};
use lintscope::cli::init::InitOutcome;
use lintscope::cli::{Command, args::Cli};
use std::path::Path;
use std::process;

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();

    let config = cli.config.as_deref();

    let exit_code = match cli.command {
        Command::Init { force } => match lintscope::cli::init::run_init(Path::new("."), force) {
            Ok(result) => {
                match result.outcome {
                    InitOutcome::Created => println!("Created {}", result.path.display()),
                    InitOutcome::Overwritten => println!("Overwrote {}", result.path.display()),
                    InitOutcome::Skipped => println!(
                        "{} already exists; use --force to overwrite it",
                        result.path.display()
                    ),
                }
                EXIT_SUCCESS
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                EXIT_ERROR
            }
        },
        Command::Check { paths, format } => {
            lintscope::cli::check::run_check(&paths, format, config, cli.color, cli.verbose)
        }
        Command::Resolve { paths, format } => {
            lintscope::cli::resolve::run_resolve(&paths, format, config, cli.color)
        }
        Command::List { file, format } => {
            lintscope::cli::list::run_list(file.as_deref(), format, config)
        }
        Command::Config => lintscope::cli::show_config::run_show_config(config),
    };

    process::exit(exit_code);
}
