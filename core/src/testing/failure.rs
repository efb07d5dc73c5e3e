use std::{
    any::Any,
    backtrace::{Backtrace, BacktraceStatus},
    fmt,
};

use super::compare::CompareError;
use crate::error::Error;

/// Why a test body did not succeed, whatever it failed with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestFailure {
    pub kind: String,
    pub message: String,
    pub causes: Vec<String>,
    /// One frame per entry. Empty unless backtraces are enabled
    /// (`RUST_BACKTRACE` / `RUST_LIB_BACKTRACE`).
    pub trace: Vec<String>,
}

impl TestFailure {
    pub const KIND_ERROR: &str = "Error";
    pub const KIND_PANIC: &str = "Panic";

    pub fn from_error(err: &Error) -> Self {
        let kind = match err.downcast_ref::<CompareError>() {
            Some(e) => e.kind(),
            None => Self::KIND_ERROR,
        };
        Self {
            kind: kind.to_owned(),
            message: err.to_string(),
            causes: err.chain().skip(1).map(|e| e.to_string()).collect(),
            trace: render_backtrace(err.backtrace()),
        }
    }

    pub fn from_panic(payload: &(dyn Any + Send)) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            (*s).to_owned()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "Box<dyn Any>".to_owned()
        };
        Self {
            kind: Self::KIND_PANIC.to_owned(),
            message,
            causes: Vec::new(),
            trace: Vec::new(),
        }
    }

    /// `<kind>: <message>` followed by the cause chain.
    pub fn description(&self) -> String {
        let mut s = format!("{}: {}", self.kind, self.message);
        for cause in &self.causes {
            s.push_str("\nCaused by: ");
            s.push_str(cause);
        }
        s
    }
}

impl fmt::Display for TestFailure {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.description())?;
        for frame in &self.trace {
            write!(f, "\n\t{}", frame)?;
        }
        Ok(())
    }
}

fn render_backtrace(bt: &Backtrace) -> Vec<String> {
    if bt.status() != BacktraceStatus::Captured {
        return Vec::new();
    }
    bt.to_string()
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_owned)
        .collect()
}
