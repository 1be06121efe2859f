//! # Ark Harness Library / Ark 测试套件库
//!
//! This library provides the core functionality for the Ark Harness tool,
//! a configuration-driven conformance harness that drives the test262 and
//! TypeScript suites against the Ark JavaScript VM and its bytecode front end.
//!
//! 此库为 Ark Harness 工具提供核心功能，
//! 这是一个配置驱动的一致性测试执行器，针对 Ark JavaScript 虚拟机
//! 及其字节码前端运行 test262 与 TypeScript 测试套件。
//!
//! ## Modules / 模块
//!
//! - `core` - Configuration, data models and the test execution engine
//! - `infra` - Infrastructure services: subprocess, filesystem, git and npm
//! - `reporting` - Test result reporting and visualization
//! - `cli` - Command-line interface and commands
//!
//! - `core` - 配置、核心数据模型和测试执行引擎
//! - `infra` - 基础设施服务：子进程、文件系统、git 与 npm
//! - `reporting` - 测试结果报告和可视化
//! - `cli` - 命令行接口和命令

pub mod cli;
pub mod commands;
pub mod core;
pub mod infra;
pub mod reporting;

// Re-export commonly used items
pub use self::core::config;
pub use self::core::execution;
pub use self::core::models;

/// Initializes the application's internationalization (i18n) based on the system locale.
///
/// This function detects the user's system locale and sets the appropriate
/// language for the application's user interface. It attempts to match the full
/// locale (e.g., "zh-CN"), then just the language code (e.g., "en"), and
/// finally falls back to the default language ("en").
pub fn init() {
    // Detect system locale and set it for i18n.
    // Fallback to "en" if detection fails.
    let locale = sys_locale::get_locale().unwrap_or_else(|| "en".to_string());
    let available_locales = rust_i18n::available_locales!();

    // Try to match the full locale first (e.g., "zh-CN")
    // Then try to match the language part only (e.g., "en" from "en-US")
    // Finally, fall back to "en"
    let lang = if available_locales.contains(&locale.as_str()) {
        &locale
    } else {
        locale
            .split('-')
            .next()
            .filter(|lang_code| available_locales.contains(lang_code))
            .unwrap_or("en")
    };

    rust_i18n::set_locale(lang);
}

// Initialize i18n
rust_i18n::i18n!("locales", fallback = "en");
