//! # HTML Reporting Module / HTML 报告模块
//!
//! This module handles the generation of HTML run reports.
//! It creates a standalone styled HTML file with run metadata, count tiles,
//! a detailed results table and toggles for viewing failure output.
//!
//! 此模块处理 HTML 运行报告的生成。
//! 它创建一个独立的样式化 HTML 文件，包含运行元数据、计数卡片、
//! 详细结果表格和查看失败输出的开关。

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use rust_i18n::t;
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::core::models::TestOutcome;
use crate::reporting::console::reason_label;

/// Embedded CSS styles for HTML reports / HTML 报告的嵌入式 CSS 样式
const HTML_STYLE: &str = "\
body{font-family:sans-serif;margin:2em;background:#fafafa;color:#222}\
h1{font-size:1.4em}\
.meta{color:#666;margin-bottom:1em}\
.summary-container{display:flex;gap:1em;margin:1em 0}\
.summary-item{background:#fff;border:1px solid #ddd;border-radius:6px;padding:.8em 1.4em;text-align:center}\
.summary-item .count{display:block;font-size:1.6em;font-weight:bold}\
.passed-text{color:#2e7d32}.failed-text{color:#c62828}.skipped-text{color:#f9a825}\
.warnings{background:#fff8e1;border:1px solid #f9a825;border-radius:6px;padding:.6em 1em;margin:1em 0}\
table{border-collapse:collapse;width:100%;background:#fff}\
th,td{border:1px solid #ddd;padding:.4em .8em;text-align:left}\
th{background:#f0f0f0}\
.status-cell{font-weight:bold;text-align:center;border-radius:4px;padding:.1em .6em}\
.status-passed{color:#2e7d32}.status-failed{color:#c62828}\
.status-timeout{color:#ad1457}.status-skipped{color:#f9a825}\
.duration-cell{text-align:right;white-space:nowrap}\
.output-toggle{color:#1565c0;cursor:pointer;font-size:.85em}\
.output-content{white-space:pre-wrap;background:#272822;color:#f8f8f2;padding:1em;border-radius:4px}";

/// Embedded JavaScript for HTML report interactivity / HTML 报告交互性的嵌入式 JavaScript
const HTML_SCRIPT: &str = "\
function toggleOutput(id){\
var el=document.getElementById(id);\
el.style.display=el.style.display==='none'?'table-row':'none';}";

/// Generates a standalone HTML report from the run's outcomes.
///
/// 从运行结果生成独立的 HTML 报告。
///
/// # Arguments / 参数
/// * `outcomes` - All recorded outcomes, one per planned case
///                所有已记录的结果，每个已规划用例一个
/// * `setup_warnings` - Best-effort setup failures surfaced by the run
///                      运行呈现的尽力而为准备阶段失败
/// * `started_at` - When the run started / 运行开始时间
/// * `duration` - Total wall-clock duration / 总耗时
/// * `output_path` - The file path where the HTML report will be saved
///                   保存 HTML 报告的文件路径
pub fn generate_report(
    outcomes: &[TestOutcome],
    setup_warnings: &[String],
    started_at: DateTime<Local>,
    duration: Duration,
    output_path: &Path,
) -> Result<()> {
    let mut html = String::new();
    html.push_str(&format!(
        "<!DOCTYPE html><html><head><meta charset='utf-8'><title>{}</title>",
        t!("html_report.title")
    ));
    html.push_str("<style>");
    html.push_str(HTML_STYLE);
    html.push_str("</style>");
    html.push_str("</head><body>");
    html.push_str(&format!("<h1>{}</h1>", t!("html_report.main_header")));
    html.push_str(&format!(
        "<div class='meta'>{}</div>",
        t!(
            "html_report.meta",
            time = started_at.format("%Y-%m-%d %H:%M:%S"),
            duration = format!("{:.2}", duration.as_secs_f64())
        )
    ));

    // Add summary statistics
    let total = outcomes.len();
    let passed = outcomes.iter().filter(|o| o.is_passed()).count();
    let failed = outcomes.iter().filter(|o| o.is_failure()).count();
    let skipped = outcomes.iter().filter(|o| o.is_skipped()).count();

    html.push_str("<div class='summary-container'>");
    for (count, class, label) in [
        (total, "", t!("html_report.summary.total")),
        (passed, " passed-text", t!("html_report.summary.passed")),
        (failed, " failed-text", t!("html_report.summary.failed")),
        (skipped, " skipped-text", t!("html_report.summary.skipped")),
    ] {
        html.push_str(&format!(
            "<div class='summary-item'><span class='count{}'>{}</span><span class='label'>{}</span></div>",
            class, count, label
        ));
    }
    html.push_str("</div>");

    if !setup_warnings.is_empty() {
        html.push_str("<div class='warnings'><ul>");
        for warning in setup_warnings {
            html.push_str(&format!("<li>{}</li>", escape_html(warning)));
        }
        html.push_str("</ul></div>");
    }

    // Add results table
    html.push_str("<table><thead><tr>");
    html.push_str(&format!("<th>{}</th>", t!("html_report.table.header.name")));
    html.push_str(&format!(
        "<th class='status-col'>{}</th>",
        t!("html_report.table.header.status")
    ));
    html.push_str(&format!(
        "<th class='duration-cell'>{}</th>",
        t!("html_report.table.header.duration")
    ));
    html.push_str("</tr></thead><tbody>");

    for (i, outcome) in outcomes.iter().enumerate() {
        let duration_str = outcome
            .duration()
            .map(|d| format!("{:.2}s", d.as_secs_f64()))
            .unwrap_or_else(|| "N/A".to_string());

        let status_str = if outcome.is_failure() {
            format!(
                "{} ({})",
                outcome.status_label(),
                reason_label(outcome.failure_reason())
            )
        } else {
            outcome.status_label().to_string()
        };

        let output_id = format!("output-{}", i);
        let (output_toggle, output_details) = if outcome.is_failure() {
            (
                format!(
                    "<div class='output-toggle' onclick=\"toggleOutput('{}')\">{}</div>",
                    output_id,
                    t!("html_report.toggle_output")
                ),
                format!(
                    "<tr id='{}' style='display:none;'><td colspan='3'><pre class='output-content'>{}</pre></td></tr>",
                    output_id,
                    escape_html(outcome.output())
                ),
            )
        } else {
            (String::new(), String::new())
        };

        html.push_str("<tr>");
        html.push_str(&format!("<td>{}</td>", escape_html(outcome.case_id())));
        html.push_str(&format!(
            "<td class='status-col'><div class='status-cell {}'>{}</div>{}</td>",
            outcome.status_class(),
            status_str,
            output_toggle
        ));
        html.push_str(&format!("<td class='duration-cell'>{}</td>", duration_str));
        html.push_str("</tr>");
        html.push_str(&output_details);
    }

    html.push_str("</tbody></table>");
    html.push_str("<script>");
    html.push_str(HTML_SCRIPT);
    html.push_str("</script></body></html>");

    fs::write(output_path, html)
        .with_context(|| format!("failed to write HTML report: {}", output_path.display()))
}

/// Simple HTML escape function to replace special characters with their HTML entities
/// 简单的 HTML 转义函数，用 HTML 实体替换特殊字符
fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
