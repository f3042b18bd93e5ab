// Typed payloads for host lifecycle notifications

use serde::{Deserialize, Serialize};

/// The host's description of a test case
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestCaseInfo {
    pub name: String,
    pub file: Option<String>,
    pub line: Option<u32>,
}

impl TestCaseInfo {
    /// Case known only by name
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            file: None,
            line: None,
        }
    }
}

/// One evaluated assertion; the host reports both passing and failing ones
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssertInfo {
    /// Source expression, e.g. `x == 1`
    pub expression: String,
    /// Decomposed value the expression evaluated to, e.g. `2`
    pub decomposed: String,
    pub passed: bool,
}

impl AssertInfo {
    pub fn failed(expression: impl Into<String>, decomposed: impl Into<String>) -> Self {
        Self {
            expression: expression.into(),
            decomposed: decomposed.into(),
            passed: false,
        }
    }

    pub fn passed(expression: impl Into<String>, decomposed: impl Into<String>) -> Self {
        Self {
            expression: expression.into(),
            decomposed: decomposed.into(),
            passed: true,
        }
    }
}

/// A message logged from inside a test case
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageInfo {
    pub text: String,
}

impl MessageInfo {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// An exception that escaped a test case body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseException {
    pub message: String,
    pub is_crash: bool,
}

/// Why a test case counts as failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FailureFlags(u32);

impl FailureFlags {
    pub const NONE: Self = Self(0);
    pub const ASSERT_FAILURE: Self = Self(1);
    pub const UNEXPECTED_EXCEPTION: Self = Self(1 << 1);
    pub const TIMEOUT: Self = Self(1 << 2);
    pub const TOO_MANY_FAILED_ASSERTS: Self = Self(1 << 3);

    /// Any reason set means the case failed
    pub fn is_failure(self) -> bool {
        self.0 != 0
    }

    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl std::ops::BitOr for FailureFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl std::ops::BitOrAssign for FailureFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

/// Per-case payload delivered at test case end
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CaseStats {
    pub failure_flags: FailureFlags,
    /// Host-measured wall time for the case
    pub seconds: f64,
}

impl CaseStats {
    pub fn passed() -> Self {
        Self::default()
    }

    pub fn failed(flags: FailureFlags) -> Self {
        Self {
            failure_flags: flags,
            seconds: 0.0,
        }
    }
}

/// Whole-run payload delivered at run end
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RunStats {
    pub num_cases: usize,
    pub num_cases_failed: usize,
    pub num_asserts: usize,
    pub num_asserts_failed: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_flags_none_is_not_failure() {
        assert!(!FailureFlags::NONE.is_failure());
        assert!(!FailureFlags::default().is_failure());
    }

    #[test]
    fn test_failure_flags_combine() {
        let flags = FailureFlags::ASSERT_FAILURE | FailureFlags::TIMEOUT;
        assert!(flags.is_failure());
        assert!(flags.contains(FailureFlags::ASSERT_FAILURE));
        assert!(flags.contains(FailureFlags::TIMEOUT));
        assert!(!flags.contains(FailureFlags::UNEXPECTED_EXCEPTION));
    }

    #[test]
    fn test_failure_flags_or_assign() {
        let mut flags = FailureFlags::NONE;
        flags |= FailureFlags::UNEXPECTED_EXCEPTION;
        assert!(flags.is_failure());
    }
}
