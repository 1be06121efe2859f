// src/cli.rs
use anyhow::Result;
use clap::{Arg, ArgAction, Command};
use rust_i18n::t;
use std::str::FromStr;
use std::{env, path::PathBuf};

use crate::commands;
use crate::core::config::EvalMode;

/// Pre-parses the command line arguments to find the language setting.
/// This allows i18n to be initialized before the full CLI is built.
/// It looks for a `--lang <VALUE>` argument.
fn pre_parse_language() -> String {
    let args: Vec<String> = env::args().collect();
    if let Some(pos) = args.iter().position(|arg| arg == "--lang") {
        if let Some(lang) = args.get(pos + 1) {
            return lang.clone();
        }
    }
    // Fallback to system language detection
    sys_locale::get_locale().unwrap_or_else(|| "en".to_string())
}

fn build_cli(locale: &str) -> Command {
    Command::new("ark-harness")
        .author(env!("CARGO_PKG_AUTHORS"))
        .version(env!("CARGO_PKG_VERSION"))
        .about(t!("cli_about", locale = locale).to_string())
        .arg(
            Arg::new("lang")
                .long("lang")
                .help(t!("cli_lang", locale = locale).to_string())
                .value_name("LANGUAGE")
                .global(true)
                .action(ArgAction::Set),
        )
        .subcommand(
            Command::new("run")
                .about(t!("cmd_run_about", locale = locale).to_string())
                .arg(
                    Arg::new("jobs")
                        .short('j')
                        .long("jobs")
                        .help(t!("arg_jobs", locale = locale).to_string())
                        .value_name("JOBS")
                        .value_parser(clap::value_parser!(usize))
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("config")
                        .short('c')
                        .long("config")
                        .help(t!("arg_config", locale = locale).to_string())
                        .value_name("CONFIG")
                        .default_value("Harness.toml")
                        .value_parser(clap::value_parser!(PathBuf))
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("frontend-tool")
                        .long("frontend-tool")
                        .help(t!("arg_frontend_tool", locale = locale).to_string())
                        .value_name("FRONTEND_TOOL")
                        .value_parser(clap::value_parser!(PathBuf))
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("ark-tool")
                        .long("ark-tool")
                        .help(t!("arg_ark_tool", locale = locale).to_string())
                        .value_name("ARK_TOOL")
                        .value_parser(clap::value_parser!(PathBuf))
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("out-dir")
                        .long("out-dir")
                        .help(t!("arg_out_dir", locale = locale).to_string())
                        .value_name("OUT_DIR")
                        .value_parser(clap::value_parser!(PathBuf))
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("timeout")
                        .long("timeout")
                        .help(t!("arg_timeout", locale = locale).to_string())
                        .value_name("SECONDS")
                        .value_parser(clap::value_parser!(u64))
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("mode")
                        .long("mode")
                        .help(t!("arg_mode", locale = locale).to_string())
                        .value_name("MODE")
                        .value_parser(["default", "strict", "both"])
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("html")
                        .long("html")
                        .help(t!("arg_html", locale = locale).to_string())
                        .value_name("HTML")
                        .value_parser(clap::value_parser!(PathBuf))
                        .action(ArgAction::Set),
                ),
        )
        .subcommand(
            Command::new("init")
                .about(t!("cmd_init_about", locale = locale).to_string())
                .arg(
                    Arg::new("non-interactive")
                        .long("non-interactive")
                        .help("Create a default config file without launching the interactive wizard.")
                        .action(ArgAction::SetTrue),
                ),
        )
}

pub async fn run() -> Result<()> {
    // Pre-parse language and initialize i18n first.
    let language = pre_parse_language();
    rust_i18n::set_locale(&language);

    let matches = build_cli(&language).get_matches();
    let lang_flag = env::args().any(|arg| arg == "--lang");

    match matches.subcommand() {
        Some(("run", run_matches)) => {
            let mode = match run_matches.get_one::<String>("mode") {
                Some(mode) => Some(EvalMode::from_str(mode)?),
                None => None,
            };

            let args = commands::run::RunArgs {
                config: run_matches
                    .get_one::<PathBuf>("config")
                    .unwrap() // Has default
                    .clone(),
                jobs: run_matches.get_one::<usize>("jobs").copied(),
                frontend_tool: run_matches.get_one::<PathBuf>("frontend-tool").cloned(),
                ark_tool: run_matches.get_one::<PathBuf>("ark-tool").cloned(),
                out_dir: run_matches.get_one::<PathBuf>("out-dir").cloned(),
                timeout_secs: run_matches.get_one::<u64>("timeout").copied(),
                mode,
                html: run_matches.get_one::<PathBuf>("html").cloned(),
                lang: lang_flag.then(|| language.clone()),
            };

            commands::run::execute(args).await?;
        }
        Some(("init", init_matches)) => {
            let non_interactive = init_matches.get_flag("non-interactive");
            commands::init::run_init_wizard(&language, non_interactive)?;
        }
        _ => {
            // This case handles when no subcommand is given.
            // Clap will have already printed help info.
        }
    }
    Ok(())
}
