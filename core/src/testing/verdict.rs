use std::time::Duration;

use serde::Serialize;

use super::failure::TestFailure;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
pub enum Status {
    #[strum(serialize = "PASS")]
    Pass,
    #[strum(serialize = "FAIL")]
    Fail,
}

/// Outcome of a single test. Serializes as `{"name", "pass", "reason"}`.
#[derive(Debug, Clone, Serialize)]
pub struct TestVerdict {
    name: String,
    #[serde(rename = "pass")]
    passed: bool,
    #[serde(rename = "reason")]
    message: String,
    #[serde(skip)]
    execution_time: Duration,
}

impl TestVerdict {
    pub fn pass(name: impl Into<String>, execution_time: Duration) -> Self {
        Self {
            name: name.into(),
            passed: true,
            message: String::new(),
            execution_time,
        }
    }

    pub fn fail(name: impl Into<String>, failure: &TestFailure, execution_time: Duration) -> Self {
        Self {
            name: name.into(),
            passed: false,
            message: failure.to_string(),
            execution_time,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn passed(&self) -> bool {
        self.passed
    }

    /// Empty for passing tests.
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn execution_time(&self) -> Duration {
        self.execution_time
    }

    pub fn status(&self) -> Status {
        if self.passed {
            Status::Pass
        } else {
            Status::Fail
        }
    }
}
