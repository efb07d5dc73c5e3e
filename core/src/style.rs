//! Human-readable rendering of verdicts on stderr.

use colored::{Color, ColoredString, Colorize};
use crossterm::terminal;

use crate::testing::{Status, TestVerdict};

pub fn is_truecolor_supported() -> bool {
    let Ok(v) = std::env::var("COLORTERM") else {
        return false
    };
    matches!(v.as_str(), "truecolor" | "24bit")
}

pub trait ColorTheme {
    fn color(&self) -> Color;
}

impl ColorTheme for Status {
    fn color(&self) -> Color {
        use Status::*;
        if !self::is_truecolor_supported() {
            return match self {
                Pass => Color::Green,
                Fail => Color::Red,
            };
        }

        match self {
            Pass => Color::TrueColor {
                r: 30,
                g: 180,
                b: 40,
            },
            Fail => Color::TrueColor {
                r: 220,
                g: 42,
                b: 42,
            },
        }
    }
}

pub fn status_badge(status: Status) -> ColoredString {
    let fg = if is_truecolor_supported() {
        Color::TrueColor {
            r: 255,
            g: 255,
            b: 255,
        }
    } else {
        Color::BrightBlack
    };
    format!(" {} ", status)
        .on_color(status.color())
        .bold()
        .color(fg)
}

/// One-line summary, e.g. `----- 1/3 tests failed -----`.
pub fn summary_line(results: &[TestVerdict]) -> String {
    let bar = "-".repeat(5);

    let num_total_test = results.len();
    let num_passed = results.iter().filter(|r| r.passed()).count();
    let num_failed = num_total_test - num_passed;

    let msg = if num_failed == 0 {
        format!("All {} tests passed", num_total_test).green()
    } else if num_passed > 0 {
        format!("{}/{} tests failed", num_failed, num_total_test).bright_red()
    } else {
        format!("All {} tests failed", num_total_test).bright_red()
    };
    format!("{} {} {}", bar, msg, bar)
}

pub fn print_test_result_summary(results: &[TestVerdict]) {
    eprintln!("{}", self::summary_line(results));
}

pub fn print_test_result_detail(res: &TestVerdict) {
    let (cols, _) = terminal::size().unwrap_or((40, 40));

    const BOLD_LINE: &str = "━";

    let bold_bar = BOLD_LINE.repeat(cols as usize).blue().bold();

    eprintln!(
        "\n{}: {} [{}ms]\n{}",
        res.name().color(Color::BrightYellow).bold(),
        self::status_badge(res.status()),
        res.execution_time().as_millis(),
        bold_bar,
    );

    if res.message().is_empty() {
        eprintln!("{}", "<EMPTY>".magenta().dimmed());
    } else {
        eprintln!("{}", res.message());
    }

    eprintln!("{}", bold_bar);
}

#[cfg(test)]
mod test {
    use std::time::Duration;

    use super::*;
    use crate::testing::TestFailure;

    fn results(pass: usize, fail: usize) -> Vec<TestVerdict> {
        let failure = TestFailure {
            kind: "Error".into(),
            message: "x".into(),
            causes: vec![],
            trace: vec![],
        };
        let mut v: Vec<_> = (0..pass)
            .map(|i| TestVerdict::pass(format!("p{}", i), Duration::ZERO))
            .collect();
        v.extend((0..fail).map(|i| TestVerdict::fail(format!("f{}", i), &failure, Duration::ZERO)));
        v
    }

    #[test]
    fn summary_counts() {
        colored::control::set_override(false);
        assert_eq!(summary_line(&results(3, 0)), "----- All 3 tests passed -----");
        assert_eq!(summary_line(&results(2, 1)), "----- 1/3 tests failed -----");
        assert_eq!(summary_line(&results(0, 2)), "----- All 2 tests failed -----");
    }
}
