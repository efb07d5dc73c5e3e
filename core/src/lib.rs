pub mod console;
pub mod report;
pub mod style;
pub mod testing;

pub use crate::testing::{run_test, TestCase, TestRunner, TestVerdict};

/// The error types used through out this crate.
pub mod error {
    #[allow(unused_imports)]
    pub(crate) use anyhow::{anyhow, bail, ensure, Context as _};
    pub use anyhow::{Error, Result};
}
