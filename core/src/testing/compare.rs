use std::fmt::Write as _;

use super::normalize::Normalizer;

pub type CompareResult = std::result::Result<(), CompareError>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CompareError {
    #[error("Expected '{}' on line {} but found '{}'.", .expected, .line_index + 1, .actual)]
    Mismatch {
        line_index: usize,
        expected: String,
        actual: String,
    },

    #[error("Output has {} unexpected extra line(s):\n{}", .0.len(), block(.0))]
    ExtraLines(Vec<String>),

    #[error("Output is missing {} expected line(s):\n{}", .0.len(), block(.0))]
    MissingLines(Vec<String>),
}

impl CompareError {
    pub fn kind(&self) -> &'static str {
        use CompareError::*;
        match self {
            Mismatch { .. } => "MismatchError",
            ExtraLines(_) => "ExtraLinesError",
            MissingLines(_) => "MissingLinesError",
        }
    }
}

const BLOCK_BAR: &str = "----------";

fn block(lines: &[String]) -> String {
    let mut s = String::with_capacity(lines.iter().map(|l| l.len() + 1).sum::<usize>() + 24);
    s.push_str(BLOCK_BAR);
    s.push('\n');
    for line in lines {
        let _ = writeln!(s, "{}", line);
    }
    s.push_str(BLOCK_BAR);
    s
}

/// Compares normalized lines, reporting only the first difference.
///
/// A differing line within the common prefix wins over any length difference.
pub fn compare_lines<A, E>(actual: &[A], expected: &[E]) -> CompareResult
where
    A: AsRef<str>,
    E: AsRef<str>,
{
    let n = actual.len().min(expected.len());

    if let Some(i) = (0..n).find(|&i| actual[i].as_ref() != expected[i].as_ref()) {
        return Err(CompareError::Mismatch {
            line_index: i,
            expected: expected[i].as_ref().to_owned(),
            actual: actual[i].as_ref().to_owned(),
        });
    }

    if actual.len() > n {
        let extra = actual[n..].iter().map(|s| s.as_ref().to_owned()).collect();
        return Err(CompareError::ExtraLines(extra));
    }
    if expected.len() > n {
        let missing = expected[n..].iter().map(|s| s.as_ref().to_owned()).collect();
        return Err(CompareError::MissingLines(missing));
    }
    Ok(())
}

/// Normalizes both texts with the default normalizer and compares them.
pub fn compare_output(actual: &str, expected: &str) -> CompareResult {
    compare_output_with(Normalizer::default(), actual, expected)
}

pub fn compare_output_with(normalizer: Normalizer, actual: &str, expected: &str) -> CompareResult {
    compare_lines(&normalizer.apply(actual), &normalizer.apply(expected))
}

/// Returns early from the enclosing test body when the output does not match.
///
/// ```
/// use stdcheck_core::{assert_output_eq, cprintln, testing::read_stdout};
///
/// let verdict = stdcheck_core::run_test("greet", || {
///     cprintln!("Hello world");
///     assert_output_eq!(read_stdout(), "Hello world\n");
///     Ok(())
/// });
/// assert!(verdict.passed());
/// ```
#[macro_export]
macro_rules! assert_output_eq {
    ($actual:expr, $expected:expr $(,)?) => {
        $crate::testing::compare_output(&$actual, &$expected)?
    };
    ($actual:expr, $expected:expr, $normalizer:expr $(,)?) => {
        $crate::testing::compare_output_with($normalizer, &$actual, &$expected)?
    };
}
