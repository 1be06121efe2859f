//! # Configuration Module / 配置模块
//!
//! Defines the harness configuration loaded from `Harness.toml` together with
//! the loaders for the skip-list and import-list JSON files. The configuration
//! is constructed once at process start and passed by reference to every
//! component; nothing in this module runs at import time.
//!
//! 定义从 `Harness.toml` 加载的测试套件配置，以及跳过列表和导入列表
//! JSON 文件的加载器。配置在进程启动时构造一次，并按引用传递给所有组件；
//! 此模块中没有任何代码在导入时执行。

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// JavaScript evaluation mode for a suite run.
/// `Both` doubles every case into a default-mode and a strict-mode variant.
///
/// 套件运行的 JavaScript 求值模式。
/// `Both` 会将每个用例展开为默认模式和严格模式两个变体。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvalMode {
    Default,
    Strict,
    Both,
}

impl FromStr for EvalMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "default" => Ok(EvalMode::Default),
            "strict" => Ok(EvalMode::Strict),
            "both" => Ok(EvalMode::Both),
            other => anyhow::bail!("unknown evaluation mode '{other}' (expected default, strict or both)"),
        }
    }
}

/// Paths to the toolchain under test.
/// 被测工具链的路径。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolchainConfig {
    /// The node binary used to run the front-end compiler script.
    /// 用于运行前端编译器脚本的 node 可执行文件。
    #[serde(default = "default_node")]
    pub node: PathBuf,
    /// The front-end compiler entry point (e.g. `ts2abc/build/src/index.js`).
    /// 前端编译器入口（例如 `ts2abc/build/src/index.js`）。
    pub frontend_tool: PathBuf,
    /// The VM executable (e.g. `ark_js_vm`).
    /// 虚拟机可执行文件（例如 `ark_js_vm`）。
    pub ark_tool: PathBuf,
    /// Directory holding the ICU data the VM is pointed at via `--icu-data-path`.
    /// 虚拟机通过 `--icu-data-path` 使用的 ICU 数据目录。
    #[serde(default)]
    pub icu_data_dir: Option<PathBuf>,
    /// Directories prepended to `LD_LIBRARY_PATH` when running the VM.
    /// 运行虚拟机时加入 `LD_LIBRARY_PATH` 的目录。
    #[serde(default)]
    pub lib_dirs: Vec<PathBuf>,
    /// Extra arguments appended to every front-end invocation,
    /// written as a single string and split shell-style.
    /// 追加到每次前端调用的额外参数，按 shell 规则拆分的单个字符串。
    #[serde(default)]
    pub frontend_args: String,
}

/// A git repository the suite depends on, pinned to a revision.
/// 套件依赖的 git 仓库，固定在某个修订版本。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuiteSource {
    pub url: String,
    pub dir: PathBuf,
    /// Commit hash or tag checked out after cloning.
    /// 克隆后检出的提交哈希或标签。
    pub rev: String,
    /// Patch files applied on top of the checkout, in order.
    /// 在检出之上按顺序应用的补丁文件。
    #[serde(default)]
    pub patches: Vec<PathBuf>,
    /// Subdirectory of the checkout copied into the suite test directory
    /// once the revision is pinned.
    /// 固定修订版本后，从检出复制到套件测试目录的子目录。
    #[serde(default)]
    pub copy_from: Option<PathBuf>,
}

/// Layout of the test corpus on disk.
/// 测试语料在磁盘上的布局。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuiteConfig {
    /// Directory scanned recursively for test sources.
    /// 递归扫描测试源文件的目录。
    pub test_dir: PathBuf,
    /// Directory holding one expected-output `.txt` file per test, by basename.
    /// 按文件名对应、每个测试一个期望输出 `.txt` 文件的目录。
    pub expect_dir: PathBuf,
    /// Output directory, rebuilt on every run.
    /// 每次运行都会重建的输出目录。
    #[serde(default = "default_out_dir")]
    pub out_dir: PathBuf,
    /// Name of the cumulative result file inside the output directory.
    /// 输出目录中累积结果文件的名称。
    #[serde(default = "default_result_file")]
    pub result_file: String,
    #[serde(default)]
    pub skip_list: Option<PathBuf>,
    #[serde(default)]
    pub import_list: Option<PathBuf>,
    /// Line-oriented file of test ids restricting the run to a sub-corpus
    /// (blank lines and `#` comments ignored).
    /// 按行组织的测试 id 文件，将运行限制在子语料内
    /// （忽略空行和 `#` 注释）。
    #[serde(default)]
    pub test_list: Option<PathBuf>,
    /// Repositories cloned and pinned before any test runs.
    /// 在任何测试运行之前克隆并固定的仓库。
    #[serde(default)]
    pub sources: Vec<SuiteSource>,
}

/// Execution options for a run.
/// 一次运行的执行选项。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    /// Number of cases compiled and executed concurrently.
    /// 并发编译和执行的用例数量。
    #[serde(default)]
    pub jobs: Option<usize>,
    /// Per-case timeout covering VM execution.
    /// 覆盖虚拟机执行阶段的单用例超时。
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_mode")]
    pub mode: EvalMode,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            jobs: None,
            timeout_secs: default_timeout_secs(),
            mode: default_mode(),
        }
    }
}

/// The complete harness configuration, loaded from `Harness.toml`.
/// 从 `Harness.toml` 加载的完整测试套件配置。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HarnessConfig {
    /// The language for the harness's output messages (e.g., "en", "zh-CN").
    /// 套件输出消息的语言（例如 "en"、"zh-CN"）。
    #[serde(default = "default_language")]
    pub language: String,
    pub toolchain: ToolchainConfig,
    pub suite: SuiteConfig,
    #[serde(default)]
    pub run: RunConfig,
}

impl HarnessConfig {
    /// Loads and parses the configuration file, expanding `~` and environment
    /// variables in the toolchain paths.
    ///
    /// 加载并解析配置文件，展开工具链路径中的 `~` 和环境变量。
    pub fn load(path: &Path) -> Result<(Self, PathBuf)> {
        let config_path = fs::canonicalize(path)
            .with_context(|| format!("failed to locate configuration file: {}", path.display()))?;

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("failed to read configuration file: {}", config_path.display()))?;

        let mut config: HarnessConfig = toml::from_str(&content)
            .with_context(|| format!("failed to parse configuration file: {}", config_path.display()))?;
        config.expand_paths()?;

        Ok((config, config_path))
    }

    /// Expands `~` and `$VAR` references in the configured tool paths.
    fn expand_paths(&mut self) -> Result<()> {
        self.toolchain.node = expand_path(&self.toolchain.node)?;
        self.toolchain.frontend_tool = expand_path(&self.toolchain.frontend_tool)?;
        self.toolchain.ark_tool = expand_path(&self.toolchain.ark_tool)?;
        if let Some(icu) = &self.toolchain.icu_data_dir {
            self.toolchain.icu_data_dir = Some(expand_path(icu)?);
        }
        let mut lib_dirs = Vec::with_capacity(self.toolchain.lib_dirs.len());
        for dir in &self.toolchain.lib_dirs {
            lib_dirs.push(expand_path(dir)?);
        }
        self.toolchain.lib_dirs = lib_dirs;
        Ok(())
    }

    /// Splits the configured extra front-end argument string shell-style.
    /// 按 shell 规则拆分配置的额外前端参数字符串。
    pub fn frontend_extra_args(&self) -> Result<Vec<String>> {
        if self.toolchain.frontend_args.trim().is_empty() {
            return Ok(Vec::new());
        }
        shlex::split(&self.toolchain.frontend_args).ok_or_else(|| {
            anyhow::anyhow!(
                "failed to parse toolchain.frontend_args: {}",
                self.toolchain.frontend_args
            )
        })
    }
}

fn expand_path(path: &Path) -> Result<PathBuf> {
    let raw = path.to_string_lossy();
    let expanded = shellexpand::full(raw.as_ref())
        .with_context(|| format!("failed to expand path: {raw}"))?;
    Ok(PathBuf::from(expanded.as_ref()))
}

/// One group of skipped tests sharing a reason, as stored in the skip-list
/// JSON file.
///
/// 跳过列表 JSON 文件中共享同一原因的一组被跳过的测试。
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SkipEntry {
    #[serde(default)]
    pub reason: String,
    pub files: Vec<String>,
}

/// The flattened skip list: test id to skip reason.
/// Ids present here are never compiled or executed.
///
/// 扁平化的跳过列表：测试 id 到跳过原因。
/// 出现在这里的 id 永远不会被编译或执行。
#[derive(Debug, Clone, Default)]
pub struct SkipList {
    reasons: HashMap<String, String>,
}

impl SkipList {
    pub fn contains(&self, id: &str) -> bool {
        self.reasons.contains_key(id)
    }

    pub fn reason_for(&self, id: &str) -> Option<&str> {
        self.reasons.get(id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.reasons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reasons.is_empty()
    }
}

impl FromIterator<(String, String)> for SkipList {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            reasons: iter.into_iter().collect(),
        }
    }
}

/// Mapping of test id to companion source files compiled alongside it.
/// 测试 id 到与其一并编译的伴随源文件的映射。
pub type ImportList = HashMap<String, Vec<PathBuf>>;

/// Loads the skip list from its JSON file. `None` means no skip list is
/// configured and yields an empty list; a configured but unreadable or
/// malformed file is an explicit error.
///
/// 从 JSON 文件加载跳过列表。`None` 表示未配置跳过列表，返回空列表；
/// 已配置但不可读或格式错误的文件是显式错误。
pub fn load_skip_list(path: Option<&Path>) -> Result<SkipList> {
    let Some(path) = path else {
        return Ok(SkipList::default());
    };
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read skip list: {}", path.display()))?;
    let entries: Vec<SkipEntry> = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse skip list: {}", path.display()))?;

    Ok(entries
        .into_iter()
        .flat_map(|entry| {
            let reason = entry.reason;
            entry
                .files
                .into_iter()
                .map(move |file| (file, reason.clone()))
        })
        .collect())
}

/// Loads the import list from its JSON file, with the same contract as
/// [`load_skip_list`].
///
/// 从 JSON 文件加载导入列表，契约与 [`load_skip_list`] 相同。
pub fn load_import_list(path: Option<&Path>) -> Result<ImportList> {
    let Some(path) = path else {
        return Ok(ImportList::default());
    };
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read import list: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("failed to parse import list: {}", path.display()))
}

fn default_language() -> String {
    "en".to_string()
}

fn default_node() -> PathBuf {
    PathBuf::from("node")
}

fn default_out_dir() -> PathBuf {
    PathBuf::from("out")
}

fn default_result_file() -> String {
    "result.txt".to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_mode() -> EvalMode {
    EvalMode::Default
}
