//! # Config Module Unit Tests / Config 模块单元测试
//!
//! This module contains unit tests for the `core::config` module, testing
//! the `HarnessConfig` structures, their TOML round-trip, and the explicit
//! skip-list / import-list loaders.
//!
//! 此模块包含 `core::config` 模块的单元测试，
//! 测试 `HarnessConfig` 结构体、其 TOML 往返，以及显式的
//! 跳过列表 / 导入列表加载器。

use ark_harness::config::{
    EvalMode, HarnessConfig, load_import_list, load_skip_list,
};
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;
use tempfile::TempDir;

const MINIMAL_CONFIG: &str = r#"
[toolchain]
frontend_tool = "ark/build/src/index.js"
ark_tool = "ark_js_runtime/ark_js_vm"

[suite]
test_dir = "testTs/test"
expect_dir = "testTs/expect"
"#;

#[cfg(test)]
mod harness_config_tests {
    use super::*;

    #[test]
    fn test_minimal_config_applies_defaults() {
        let config: HarnessConfig = toml::from_str(MINIMAL_CONFIG).unwrap();

        assert_eq!(config.language, "en");
        assert_eq!(config.toolchain.node, PathBuf::from("node"));
        assert_eq!(config.suite.out_dir, PathBuf::from("out"));
        assert_eq!(config.suite.result_file, "result.txt");
        assert!(config.suite.skip_list.is_none());
        assert!(config.suite.sources.is_empty());
        assert!(config.run.jobs.is_none());
        assert_eq!(config.run.timeout_secs, 60);
        assert_eq!(config.run.mode, EvalMode::Default);
    }

    #[test]
    fn test_full_config_round_trips() {
        let toml_str = r#"
language = "zh-CN"

[toolchain]
node = "/usr/bin/node"
frontend_tool = "ark/build/src/index.js"
ark_tool = "ark_js_runtime/ark_js_vm"
icu_data_dir = "i18n_standard"
lib_dirs = ["ark", "i18n_standard"]
frontend_args = "--save-compiled"

[suite]
test_dir = "test262/data/test"
expect_dir = "test262/expect"
out_dir = "out/test262"
result_file = "result.txt"
skip_list = "test262/skip_tests.json"
test_list = "test262/es2015_tests.txt"

[[suite.sources]]
url = "https://example.invalid/test262.git"
dir = "test262/data"
rev = "9ca13b12728b7e0089c7eb03fa2bd17f8abe297f"
patches = ["local.patch"]
copy_from = "test"

[run]
jobs = 8
timeout_secs = 120
mode = "both"
"#;
        let config: HarnessConfig = toml::from_str(toml_str).unwrap();

        assert_eq!(config.language, "zh-CN");
        assert_eq!(config.toolchain.lib_dirs.len(), 2);
        assert_eq!(config.suite.sources.len(), 1);
        assert_eq!(config.suite.sources[0].patches, vec![PathBuf::from("local.patch")]);
        assert_eq!(
            config.suite.sources[0].copy_from,
            Some(PathBuf::from("test"))
        );
        assert_eq!(
            config.suite.test_list,
            Some(PathBuf::from("test262/es2015_tests.txt"))
        );
        assert_eq!(config.run.jobs, Some(8));
        assert_eq!(config.run.timeout_secs, 120);
        assert_eq!(config.run.mode, EvalMode::Both);

        // Serialize back and reparse: nothing is lost.
        let serialized = toml::to_string_pretty(&config).unwrap();
        let reparsed: HarnessConfig = toml::from_str(&serialized).unwrap();
        assert_eq!(reparsed.run.mode, EvalMode::Both);
        assert_eq!(reparsed.suite.sources[0].rev, config.suite.sources[0].rev);
    }

    #[test]
    fn test_load_reports_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("Harness.toml");

        let err = HarnessConfig::load(&missing).unwrap_err();
        assert!(err.to_string().contains("Harness.toml"));
    }

    #[test]
    fn test_load_expands_environment_variables() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("Harness.toml");
        fs::write(
            &config_path,
            r#"
[toolchain]
frontend_tool = "$ARK_HARNESS_TEST_ROOT/index.js"
ark_tool = "vm"

[suite]
test_dir = "t"
expect_dir = "e"
"#,
        )
        .unwrap();

        unsafe { std::env::set_var("ARK_HARNESS_TEST_ROOT", "/opt/ark") };
        let (config, _) = HarnessConfig::load(&config_path).unwrap();
        assert_eq!(
            config.toolchain.frontend_tool,
            PathBuf::from("/opt/ark/index.js")
        );
    }

    #[test]
    fn test_frontend_extra_args_split_shell_style() {
        let mut config: HarnessConfig = toml::from_str(MINIMAL_CONFIG).unwrap();
        config.toolchain.frontend_args = "--modules --opt-level 2".to_string();

        assert_eq!(
            config.frontend_extra_args().unwrap(),
            vec!["--modules", "--opt-level", "2"]
        );

        config.toolchain.frontend_args = String::new();
        assert!(config.frontend_extra_args().unwrap().is_empty());
    }
}

#[cfg(test)]
mod eval_mode_tests {
    use super::*;

    #[test]
    fn test_eval_mode_from_str() {
        assert_eq!(EvalMode::from_str("default").unwrap(), EvalMode::Default);
        assert_eq!(EvalMode::from_str("strict").unwrap(), EvalMode::Strict);
        assert_eq!(EvalMode::from_str("both").unwrap(), EvalMode::Both);
        assert!(EvalMode::from_str("sloppy").is_err());
    }
}

#[cfg(test)]
mod skip_list_tests {
    use super::*;

    #[test]
    fn test_no_path_yields_empty_list() {
        let skip_list = load_skip_list(None).unwrap();
        assert!(skip_list.is_empty());
        assert!(!skip_list.contains("anything"));
    }

    #[test]
    fn test_groups_flatten_into_lookup() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("skip_tests.json");
        fs::write(
            &path,
            r#"[
                {"reason": "unsupported intl", "files": ["intl/collator", "intl/segmenter"]},
                {"reason": "", "files": ["flaky/timer"]}
            ]"#,
        )
        .unwrap();

        let skip_list = load_skip_list(Some(&path)).unwrap();
        assert_eq!(skip_list.len(), 3);
        assert!(skip_list.contains("intl/collator"));
        assert_eq!(skip_list.reason_for("intl/segmenter"), Some("unsupported intl"));
        assert_eq!(skip_list.reason_for("flaky/timer"), Some(""));
        assert!(!skip_list.contains("intl"));
    }

    #[test]
    fn test_configured_but_missing_file_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("skip_tests.json");

        assert!(load_skip_list(Some(&missing)).is_err());
    }

    #[test]
    fn test_malformed_json_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("skip_tests.json");
        fs::write(&path, "{not json").unwrap();

        let err = load_skip_list(Some(&path)).unwrap_err();
        assert!(err.to_string().contains("skip_tests.json"));
    }
}

#[cfg(test)]
mod import_list_tests {
    use super::*;

    #[test]
    fn test_import_list_maps_companions() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("import_tests.json");
        fs::write(
            &path,
            r#"{"module/test_import": ["testTs/test/module/test_export.ts"]}"#,
        )
        .unwrap();

        let import_list = load_import_list(Some(&path)).unwrap();
        assert_eq!(
            import_list.get("module/test_import").unwrap(),
            &vec![PathBuf::from("testTs/test/module/test_export.ts")]
        );
        assert!(import_list.get("other").is_none());
    }

    #[test]
    fn test_no_path_yields_empty_map() {
        assert!(load_import_list(None).unwrap().is_empty());
    }
}
