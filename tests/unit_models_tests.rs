//! # Models Module Unit Tests / 模型模块单元测试
//!
//! Unit tests for the `core::models` outcome accessors and the result-file
//! line format.
//!
//! `core::models` 结果访问器和结果文件行格式的单元测试。

use ark_harness::models::{FailureReason, TestCase, TestOutcome};
use std::path::PathBuf;
use std::time::Duration;

fn sample_case(id: &str) -> TestCase {
    TestCase {
        id: id.to_string(),
        source: PathBuf::from(format!("suite/test/{id}.ts")),
        expect: PathBuf::from(format!("suite/expect/{id}.txt")),
        artifact: PathBuf::from(format!("out/{id}.abc")),
        diff_file: PathBuf::from(format!("out/{id}.diff")),
        strict: false,
        imports: vec![],
    }
}

#[cfg(test)]
mod outcome_tests {
    use super::*;

    #[test]
    fn test_passed_outcome_accessors() {
        let outcome = TestOutcome::Passed {
            case: sample_case("a"),
            duration: Duration::from_millis(1500),
        };

        assert_eq!(outcome.case_id(), "a");
        assert!(outcome.is_passed());
        assert!(!outcome.is_failure());
        assert!(!outcome.is_skipped());
        assert_eq!(outcome.status_label(), "PASS");
        assert_eq!(outcome.result_line(), "a: PASS");
        assert_eq!(outcome.status_class(), "status-passed");
        assert_eq!(outcome.duration(), Some(Duration::from_millis(1500)));
        assert_eq!(outcome.output(), "");
        assert!(outcome.failure_reason().is_none());
    }

    #[test]
    fn test_failed_outcome_accessors() {
        let outcome = TestOutcome::Failed {
            case: sample_case("sub/b"),
            output: "@ line 1\n- 42\n+ 43\n".to_string(),
            reason: FailureReason::Mismatch,
            duration: Duration::from_secs(2),
        };

        assert_eq!(outcome.case_id(), "sub/b");
        assert!(outcome.is_failure());
        assert_eq!(outcome.result_line(), "sub/b: FAIL");
        assert_eq!(outcome.status_class(), "status-failed");
        assert_eq!(outcome.failure_reason(), Some(FailureReason::Mismatch));
        assert!(outcome.output().contains("+ 43"));
    }

    #[test]
    fn test_timeout_failure_has_own_status_class() {
        let outcome = TestOutcome::Failed {
            case: sample_case("slow"),
            output: String::new(),
            reason: FailureReason::Timeout,
            duration: Duration::from_secs(60),
        };

        assert_eq!(outcome.status_class(), "status-timeout");
        assert_eq!(outcome.status_label(), "FAIL");
    }

    #[test]
    fn test_skipped_outcome_accessors() {
        let outcome = TestOutcome::Skipped {
            id: "intl/collator".to_string(),
            reason: "unsupported intl".to_string(),
        };

        assert_eq!(outcome.case_id(), "intl/collator");
        assert!(outcome.is_skipped());
        assert_eq!(outcome.result_line(), "intl/collator: SKIP");
        assert_eq!(outcome.status_class(), "status-skipped");
        assert!(outcome.duration().is_none());
    }
}
