//! # Console Reporting Module / 控制台报告模块
//!
//! This module handles the generation and display of run summaries in the
//! console. It provides functionality for printing colorful, formatted
//! summaries with internationalization support.
//!
//! 此模块处理控制台中运行摘要的生成和显示。
//! 它提供打印彩色格式化摘要的功能，支持国际化。

use colored::*;
use rust_i18n::t;
use std::time::Duration;

use crate::core::models::{FailureReason, TestOutcome};

/// Prints the final summary of a run after all cases have completed.
/// Failures are listed with their classification, skipped cases with their
/// reason, followed by setup warnings and the overall counts.
///
/// 在所有用例完成后打印运行的最终摘要。
/// 失败的用例带分类列出，跳过的用例带原因列出，随后是准备阶段警告
/// 和总体计数。
pub fn print_summary(outcomes: &[TestOutcome], setup_warnings: &[String], duration: Duration) {
    let passed = outcomes.iter().filter(|o| o.is_passed()).count();
    let failed: Vec<&TestOutcome> = outcomes.iter().filter(|o| o.is_failure()).collect();
    let skipped: Vec<&TestOutcome> = outcomes.iter().filter(|o| o.is_skipped()).collect();

    println!("\n{}", t!("summary.banner").cyan());

    if !failed.is_empty() {
        println!("\n{}", t!("summary.failed_banner").red().bold());
        for outcome in &failed {
            println!(
                "  - {} ({})",
                outcome.case_id().red(),
                reason_label(outcome.failure_reason())
            );
        }
    }

    if !skipped.is_empty() {
        println!("\n{}", t!("summary.skipped_banner").yellow());
        for outcome in &skipped {
            if let TestOutcome::Skipped { id, reason } = outcome {
                println!("  - {} ({})", id.yellow(), reason);
            }
        }
    }

    if !setup_warnings.is_empty() {
        println!("\n{}", t!("summary.warnings_banner").yellow().bold());
        for warning in setup_warnings {
            println!("  - {warning}");
        }
    }

    println!(
        "\n{}",
        t!(
            "summary.counts",
            passed = passed,
            failed = failed.len(),
            skipped = skipped.len(),
            duration = format!("{:.2}", duration.as_secs_f64())
        )
        .bold()
    );

    // Per-test failures are reported here but never change the exit code;
    // only an unusable environment does.
    // 单个测试的失败在此报告，但绝不改变退出码；只有不可用的环境才会。
    if failed.is_empty() {
        println!("{}", t!("summary.all_passed").green().bold());
    } else {
        println!(
            "{}",
            t!("summary.has_failures", count = failed.len()).red().bold()
        );
    }
}

/// The localized label for a failure classification.
/// 失败分类的本地化标签。
pub fn reason_label(reason: Option<FailureReason>) -> String {
    match reason {
        Some(FailureReason::Compile) => t!("summary.reason_compile").to_string(),
        Some(FailureReason::Execute) => t!("summary.reason_execute").to_string(),
        Some(FailureReason::Timeout) => t!("summary.reason_timeout").to_string(),
        Some(FailureReason::Mismatch) => t!("summary.reason_mismatch").to_string(),
        None => String::new(),
    }
}
