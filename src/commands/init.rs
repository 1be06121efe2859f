//! # Harness Initialization Module / 测试套件初始化模块
//!
//! This module provides functionality for initializing a new harness
//! configuration through an interactive command-line wizard. It helps users
//! create a `Harness.toml` file preset for either the TypeScript suite or
//! the test262 suite layout.
//!
//! 此模块通过交互式命令行向导提供初始化新套件配置的功能。
//! 它帮助用户创建预设为 TypeScript 套件或 test262 套件布局的
//! `Harness.toml` 文件。

use anyhow::{Context, Result};
use colored::*;
use dialoguer::{Confirm, Input, Select, theme::ColorfulTheme};
use rust_i18n::t;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::config::{
    EvalMode, HarnessConfig, RunConfig, SuiteConfig, SuiteSource, ToolchainConfig,
};

/// Runs the interactive wizard to generate a `Harness.toml` file.
///
/// The wizard confirms before overwriting an existing configuration, lets the
/// user pick a suite layout preset and prompts for the toolchain paths.
/// `non_interactive` writes the TypeScript-suite defaults unprompted.
///
/// 运行交互式向导以生成 `Harness.toml` 文件。
///
/// 向导在覆盖现有配置前进行确认，让用户选择套件布局预设并提示输入
/// 工具链路径。`non_interactive` 则不经提示直接写入 TypeScript 套件默认值。
pub fn run_init_wizard(language: &str, non_interactive: bool) -> Result<()> {
    let config_path = Path::new("Harness.toml");
    let theme = ColorfulTheme::default();

    if !non_interactive {
        println!("\n{}", t!("init.welcome", locale = language).cyan().bold());
        println!("{}", t!("init.description", locale = language));
    }

    if config_path.exists() && !non_interactive {
        let confirmation = Confirm::with_theme(&theme)
            .with_prompt(
                t!(
                    "init.overwrite_prompt",
                    locale = language,
                    path = config_path.display()
                )
                .to_string(),
            )
            .default(false)
            .interact()
            .context(t!("init.confirm_failed", locale = language).to_string())?;
        if !confirmation {
            println!("{}", t!("init.aborted", locale = language));
            return Ok(());
        }
    }

    if non_interactive {
        let mut config = typescript_preset();
        config.language = language.to_string();
        return write_config(config_path, &config, language);
    }

    // Interactive part starts here
    let layouts = [
        t!("init.layout_ts", locale = language).to_string(),
        t!("init.layout_test262", locale = language).to_string(),
    ];
    let selection = Select::with_theme(&theme)
        .with_prompt(t!("init.layout_prompt", locale = language).to_string())
        .items(&layouts)
        .default(0)
        .interact()
        .context(t!("init.confirm_failed", locale = language).to_string())?;

    let mut config = if selection == 1 {
        test262_preset()
    } else {
        typescript_preset()
    };
    config.language = language.to_string();

    let frontend_tool: String = Input::with_theme(&theme)
        .with_prompt(t!("init.frontend_prompt", locale = language).to_string())
        .default(config.toolchain.frontend_tool.display().to_string())
        .interact_text()?;
    config.toolchain.frontend_tool = PathBuf::from(frontend_tool);

    let ark_tool: String = Input::with_theme(&theme)
        .with_prompt(t!("init.ark_prompt", locale = language).to_string())
        .default(config.toolchain.ark_tool.display().to_string())
        .interact_text()?;
    config.toolchain.ark_tool = PathBuf::from(ark_tool);

    write_config(config_path, &config, language)
}

/// The TypeScript-suite layout: sources under `testTs/test`, one expected
/// `.txt` per test under `testTs/expect`, pinned TypeScript checkout.
///
/// TypeScript 套件布局：源文件在 `testTs/test` 下，每个测试在
/// `testTs/expect` 下有一个期望 `.txt`，TypeScript 检出固定版本。
fn typescript_preset() -> HarnessConfig {
    HarnessConfig {
        language: "en".to_string(),
        toolchain: default_toolchain(),
        suite: SuiteConfig {
            test_dir: PathBuf::from("testTs/test"),
            expect_dir: PathBuf::from("testTs/expect"),
            out_dir: PathBuf::from("out/testTs"),
            result_file: "result.txt".to_string(),
            skip_list: Some(PathBuf::from("testTs/skip_tests.json")),
            import_list: Some(PathBuf::from("testTs/import_tests.json")),
            test_list: None,
            sources: vec![SuiteSource {
                url: "https://gitee.com/zhangrengao1/TypeScript.git".to_string(),
                dir: PathBuf::from("third_party/TypeScript"),
                rev: "v4.3.5".to_string(),
                patches: vec![],
                copy_from: None,
            }],
        },
        run: RunConfig {
            jobs: None,
            timeout_secs: 60,
            mode: EvalMode::Default,
        },
    }
}

/// The test262 layout: the corpus, harness and eshost checkouts pinned to
/// known-good revisions, strict-only evaluation.
///
/// test262 布局：语料、harness 和 eshost 检出固定在已知可用的修订版本，
/// 仅严格模式求值。
fn test262_preset() -> HarnessConfig {
    HarnessConfig {
        language: "en".to_string(),
        toolchain: default_toolchain(),
        suite: SuiteConfig {
            test_dir: PathBuf::from("test262/data/test"),
            expect_dir: PathBuf::from("test262/expect"),
            out_dir: PathBuf::from("out/test262"),
            result_file: "result.txt".to_string(),
            skip_list: Some(PathBuf::from("test262/skip_tests.json")),
            import_list: None,
            test_list: Some(PathBuf::from("test262/es2015_tests.txt")),
            sources: vec![
                SuiteSource {
                    url: "https://gitee.com/Han00000000/test262.git".to_string(),
                    dir: PathBuf::from("test262/data"),
                    rev: "9ca13b12728b7e0089c7eb03fa2bd17f8abe297f".to_string(),
                    patches: vec![],
                    copy_from: None,
                },
                SuiteSource {
                    url: "https://gitee.com/Han00000000/test262-harness.git".to_string(),
                    dir: PathBuf::from("test262/harness"),
                    rev: "9c499f028eb24e67781435c0bb442e00343eb39d".to_string(),
                    patches: vec![],
                    copy_from: None,
                },
                SuiteSource {
                    url: "https://gitee.com/Han00000000/eshost.git".to_string(),
                    dir: PathBuf::from("test262/eshost"),
                    rev: "fa2d4d27d9d6152002bdef36ee2d17e98b886268".to_string(),
                    patches: vec![],
                    copy_from: None,
                },
            ],
        },
        run: RunConfig {
            jobs: Some(8),
            timeout_secs: 60,
            mode: EvalMode::Strict,
        },
    }
}

/// Toolchain paths as laid out in the Ark build-output tree.
/// 按 Ark 构建输出树布局的工具链路径。
fn default_toolchain() -> ToolchainConfig {
    let ark_dir = "out/hi3516dv300/clang_x64/ark/ark";
    let runtime_dir = "out/hi3516dv300/clang_x64/ark/ark_js_runtime";
    let icu_dir = "out/hi3516dv300/clang_x64/global/i18n_standard";

    ToolchainConfig {
        node: PathBuf::from("node"),
        frontend_tool: PathBuf::from(format!("{ark_dir}/build/src/index.js")),
        ark_tool: PathBuf::from(format!("{runtime_dir}/ark_js_vm")),
        icu_data_dir: Some(PathBuf::from(icu_dir)),
        lib_dirs: vec![
            PathBuf::from(ark_dir),
            PathBuf::from(icu_dir),
            PathBuf::from(runtime_dir),
        ],
        frontend_args: String::new(),
    }
}

fn write_config(path: &Path, config: &HarnessConfig, language: &str) -> Result<()> {
    let toml_string = toml::to_string_pretty(config)
        .context(t!("init.serialize_failed", locale = language).to_string())?;

    fs::write(path, toml_string)
        .with_context(|| t!("init.write_failed", locale = language, path = path.display()).to_string())?;

    println!(
        "\n{} {}",
        "✔".green(),
        t!("init.created", locale = language, path = path.display()).bold()
    );
    println!("{}", t!("init.usage_hint", locale = language));

    Ok(())
}
