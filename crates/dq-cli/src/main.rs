//! Data-quality rule set CLI.

use clap::{ColorChoice, Parser};
use std::io::{self, IsTerminal};

use dq_cli::cli::{Cli, Command, LogFormatArg};
use dq_cli::commands::{
    run_add_multi, run_add_single, run_apply, run_create, run_list, run_prune, run_remove,
};
use dq_cli::logging::{LogConfig, LogFormat, init_logging};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    init_logging(&log_config_from_cli(&cli));

    let root = cli
        .data_dir
        .clone()
        .unwrap_or_else(dq_store::data_root);
    let store = match dq_store::RuleSetStore::open(&root) {
        Ok(store) => store,
        Err(error) => {
            eprintln!("error: {error}");
            std::process::exit(1);
        }
    };

    let result = match &cli.command {
        Command::Create(args) => run_create(&store, args),
        Command::List(args) => run_list(&store, args),
        Command::AddSingle(args) => run_add_single(&store, args),
        Command::AddMulti(args) => run_add_multi(&store, args),
        Command::Remove(args) => run_remove(&store, args),
        Command::Prune => run_prune(&store),
        Command::Apply(args) => run_apply(&store, args),
    };
    if let Err(error) = result {
        eprintln!("error: {error:#}");
        std::process::exit(1);
    }
}

fn log_config_from_cli(cli: &Cli) -> LogConfig {
    LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        format: match cli.log_format {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Compact => LogFormat::Compact,
            LogFormatArg::Json => LogFormat::Json,
        },
        with_ansi: match cli.color.color {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => io::stderr().is_terminal(),
        },
    }
}
