// src/commands/run.rs

use anyhow::{Context, Result};
use chrono::Local;
use colored::*;
use rust_i18n::t;
use std::collections::HashSet;
use std::path::PathBuf;
use std::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::core::{
    config::{self, EvalMode, HarnessConfig},
    execution, planner,
};
use crate::infra::{fs as fs_util, git, npm};
use crate::reporting::{console, html};

/// CLI overrides applied on top of the loaded configuration file.
/// 应用在已加载配置文件之上的 CLI 覆盖项。
pub struct RunArgs {
    pub config: PathBuf,
    pub jobs: Option<usize>,
    pub frontend_tool: Option<PathBuf>,
    pub ark_tool: Option<PathBuf>,
    pub out_dir: Option<PathBuf>,
    pub timeout_secs: Option<u64>,
    pub mode: Option<EvalMode>,
    pub html: Option<PathBuf>,
    pub lang: Option<String>,
}

/// Runs the configured suite: prepare the environment, execute every planned
/// case and report. Only environment-setup failures propagate out of here;
/// per-test failures are part of a normal run and never affect the exit code.
///
/// 运行配置的套件：准备环境、执行所有已规划用例并报告。
/// 只有环境准备失败会从这里传播出去；单个测试的失败属于正常运行的
/// 一部分，绝不影响退出码。
pub async fn execute(args: RunArgs) -> Result<()> {
    let (mut config, config_path) = HarnessConfig::load(&args.config)?;
    apply_overrides(&mut config, &args);
    rust_i18n::set_locale(&config.language);

    println!("{}", t!("run.loading_config", path = config_path.display()));

    let started_at = Local::now();
    let run_timer = Instant::now();

    // Fatal bootstrap: an unusable corpus or toolchain halts the run here,
    // before any test executes.
    // 致命的引导阶段：不可用的语料或工具链会在任何测试执行之前在此中止运行。
    prepare_suite_sources(&config).await?;

    let mut setup_warnings = Vec::new();
    if let Some(warning) = npm::install_frontend_deps(&config.toolchain.frontend_tool).await {
        println!("{}", warning.yellow());
        setup_warnings.push(warning);
    }

    // The output tree is rebuilt on every run.
    // 输出目录树在每次运行时重建。
    fs_util::remove_dir(&config.suite.out_dir)?;
    fs_util::mk_dir(&config.suite.out_dir)?;

    let skip_list = config::load_skip_list(config.suite.skip_list.as_deref())?;
    let import_list = config::load_import_list(config.suite.import_list.as_deref())?;
    if !skip_list.is_empty() {
        println!("{}", t!("run.skip_list_loaded", count = skip_list.len()).cyan());
    }

    // An unreadable test list is a fatal setup error: silently running the
    // whole corpus instead of the requested sub-corpus would be misleading.
    // 不可读的测试列表是致命的准备错误：静默地运行整个语料而非请求的
    // 子语料会产生误导。
    let test_filter = match &config.suite.test_list {
        Some(path) => {
            let ids: HashSet<String> = fs_util::read_lines(path)?
                .into_iter()
                .map(|line| line.trim().to_string())
                .filter(|line| !line.is_empty() && !line.starts_with('#'))
                .collect();
            println!(
                "{}",
                t!("run.test_list_loaded", count = ids.len(), path = path.display()).cyan()
            );
            Some(ids)
        }
        None => None,
    };

    let plan = planner::plan_execution(&config, &skip_list, &import_list, test_filter.as_ref())?;
    if plan.cases.is_empty() && plan.skipped.is_empty() {
        println!(
            "{}",
            t!("run.no_cases", dir = config.suite.test_dir.display()).yellow()
        );
        return Ok(());
    }
    println!(
        "{}",
        t!(
            "run.planned_cases",
            count = plan.cases.len(),
            skipped = plan.skipped.len()
        )
        .bold()
    );

    let result_path = config.suite.out_dir.join(&config.suite.result_file);
    fs_util::clean_file(&result_path)?;
    fs_util::write_append(
        &result_path,
        &format!("# {}\n", started_at.format("%Y-%m-%d %H:%M:%S")),
    )?;
    for outcome in &plan.skipped {
        fs_util::write_append(&result_path, &format!("{}\n", outcome.result_line()))?;
    }

    let stop_token = setup_signal_handler();
    let executed = execution::run_all(plan.cases, &config, &result_path, stop_token).await?;

    let mut outcomes = plan.skipped;
    outcomes.extend(executed);
    outcomes.sort_by(|a, b| a.case_id().cmp(b.case_id()));

    console::print_summary(&outcomes, &setup_warnings, run_timer.elapsed());

    if let Some(report_path) = &args.html {
        println!("\n{}", t!("report.generating", path = report_path.display()));
        if let Err(e) = html::generate_report(
            &outcomes,
            &setup_warnings,
            started_at,
            run_timer.elapsed(),
            report_path,
        ) {
            eprintln!("{} {}", t!("report.failed").red(), e);
        }
    }

    println!("{}", t!("run.result_file", path = result_path.display()));
    Ok(())
}

fn apply_overrides(config: &mut HarnessConfig, args: &RunArgs) {
    if let Some(jobs) = args.jobs {
        config.run.jobs = Some(jobs);
    }
    if let Some(tool) = &args.frontend_tool {
        config.toolchain.frontend_tool = tool.clone();
    }
    if let Some(tool) = &args.ark_tool {
        config.toolchain.ark_tool = tool.clone();
    }
    if let Some(out_dir) = &args.out_dir {
        config.suite.out_dir = out_dir.clone();
    }
    if let Some(timeout) = args.timeout_secs {
        config.run.timeout_secs = timeout;
    }
    if let Some(mode) = args.mode {
        config.run.mode = mode;
    }
    if let Some(lang) = &args.lang {
        // An explicit --lang wins over the configuration file.
        // 显式的 --lang 优先于配置文件。
        config.language = lang.clone();
    }
}

/// Clones, pins and patches every configured suite source. Any failure here
/// is fatal: the corpus would not match the expected outputs.
///
/// 克隆、固定并打补丁所有配置的套件源仓库。这里的任何失败都是致命的：
/// 语料将无法与期望输出匹配。
async fn prepare_suite_sources(config: &HarnessConfig) -> Result<()> {
    for source in &config.suite.sources {
        if source.dir.exists() {
            // Discard local modifications so the pinned checkout and the
            // patches apply cleanly on a reused checkout.
            // 丢弃本地修改，使固定检出和补丁能在复用的检出上干净地应用。
            git::clean(&source.dir).await;
        } else {
            println!(
                "{}",
                t!("run.cloning", url = source.url, dir = source.dir.display()).cyan()
            );
            git::clone(&source.url, &source.dir).await?;
        }
        git::checkout(&source.rev, &source.dir).await?;
        for patch in &source.patches {
            let patch = std::fs::canonicalize(patch)
                .with_context(|| format!("failed to locate patch file: {}", patch.display()))?;
            git::apply(&patch, &source.dir).await?;
        }
        if let Some(subdir) = &source.copy_from {
            let from = source.dir.join(subdir);
            println!(
                "{}",
                t!(
                    "run.copying_corpus",
                    from = from.display(),
                    to = config.suite.test_dir.display()
                )
                .cyan()
            );
            fs_util::copy_dir(&from, &config.suite.test_dir)?;
        }
    }
    Ok(())
}

fn setup_signal_handler() -> CancellationToken {
    let token = CancellationToken::new();
    let handler_token = token.clone();

    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            println!("\n{}", t!("run.shutdown_signal").yellow());
            handler_token.cancel();
        }
    });

    token
}
