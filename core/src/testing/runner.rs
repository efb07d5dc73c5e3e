use std::{
    fmt,
    panic::{self, AssertUnwindSafe},
    time::Instant,
};

use super::{
    capture::{Redirect, StreamCapture},
    failure::TestFailure,
    verdict::TestVerdict,
};
use crate::error::Result;

pub type TestBody = Box<dyn FnOnce() -> Result<()>>;

pub struct TestCase {
    name: String,
    body: TestBody,
}

impl TestCase {
    pub fn new<F>(name: impl Into<String>, body: F) -> Self
    where
        F: FnOnce() -> Result<()> + 'static,
    {
        Self {
            name: name.into(),
            body: Box::new(body),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn run(self) -> TestVerdict {
        self.run_with(Redirect::default())
    }

    pub fn run_with(self, redirect: Redirect) -> TestVerdict {
        run_test_with(redirect, self.name, self.body)
    }
}

impl fmt::Debug for TestCase {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("TestCase")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Runs `body` with stdout/stderr captured and turns whatever happens into a verdict.
///
/// Errors returned by the body and panics raised inside it both become a
/// failing verdict; nothing escapes to the caller. The streams are restored
/// before this function returns.
pub fn run_test<F>(name: impl Into<String>, body: F) -> TestVerdict
where
    F: FnOnce() -> Result<()>,
{
    run_test_with(Redirect::default(), name, body)
}

pub fn run_test_with<F>(redirect: Redirect, name: impl Into<String>, body: F) -> TestVerdict
where
    F: FnOnce() -> Result<()>,
{
    let name = name.into();
    log::debug!("Running test '{}'", name);

    let start_at = Instant::now();
    let res = {
        let _capture = StreamCapture::begin_with(redirect);
        panic::catch_unwind(AssertUnwindSafe(body))
    };
    let execution_time = start_at.elapsed();

    let failure = match res {
        Ok(Ok(())) => return TestVerdict::pass(name, execution_time),
        Ok(Err(e)) => TestFailure::from_error(&e),
        Err(payload) => TestFailure::from_panic(payload.as_ref()),
    };
    log::info!("Test '{}' failed: {}", name, failure.description());
    TestVerdict::fail(name, &failure, execution_time)
}

/// Ordered list of tests, run one after another on the calling thread.
#[derive(Debug, Default)]
pub struct TestRunner {
    cases: Vec<TestCase>,
    redirect: Redirect,
}

impl TestRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn redirect(mut self, redirect: Redirect) -> Self {
        self.redirect = redirect;
        self
    }

    pub fn get_redirect(&self) -> Redirect {
        self.redirect
    }

    pub fn test<F>(mut self, name: impl Into<String>, body: F) -> Self
    where
        F: FnOnce() -> Result<()> + 'static,
    {
        self.cases.push(TestCase::new(name, body));
        self
    }

    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    pub fn run(self) -> Vec<TestVerdict> {
        self.run_each(|_| {})
    }

    /// Like [`TestRunner::run`], calling `on_verdict` right after each test finishes.
    pub fn run_each(self, mut on_verdict: impl FnMut(&TestVerdict)) -> Vec<TestVerdict> {
        let mut results = Vec::with_capacity(self.cases.len());
        for t in self.cases {
            let res = t.run_with(self.redirect);
            on_verdict(&res);
            results.push(res);
        }
        results
    }
}

impl IntoIterator for TestRunner {
    type Item = TestCase;
    type IntoIter = std::vec::IntoIter<TestCase>;

    fn into_iter(self) -> Self::IntoIter {
        self.cases.into_iter()
    }
}
