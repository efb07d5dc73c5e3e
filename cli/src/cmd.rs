use std::path::PathBuf;

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use stdcheck_core::{report, style, TestVerdict};

use crate::{config::Config, suite};

pub const USAGE: &str = "Usage: stdcheck [label] [destfile]";
pub const USAGE_EXIT_CODE: i32 = 1;

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = None,
    disable_help_flag = true,
    disable_version_flag = true
)]
pub struct Args {
    /// `[label] [destfile]`. With a destfile the JSON report is written there,
    /// otherwise it is printed to stdout.
    #[arg(allow_hyphen_values = true, trailing_var_arg = true)]
    pub positional: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    Usage,
    Stdout { label: Option<String> },
    File { label: String, dest: PathBuf },
}

impl Invocation {
    pub fn from_positional(args: &[String]) -> Self {
        match args {
            [] => Invocation::Stdout { label: None },
            [label] => Invocation::Stdout {
                label: Some(label.clone()),
            },
            [_, second] if second.trim() == "-h" => Invocation::Usage,
            [label, dest] => Invocation::File {
                label: label.clone(),
                dest: dest.into(),
            },
            _ => Invocation::Usage,
        }
    }
}

impl Args {
    /// Returns the process exit code.
    pub fn exec(&self) -> anyhow::Result<i32> {
        let dest = match Invocation::from_positional(&self.positional) {
            Invocation::Usage => {
                println!("{}", USAGE);
                return Ok(USAGE_EXIT_CODE);
            }
            Invocation::Stdout { label } => {
                log::info!("label={:?}, writing results to stdout", label);
                None
            }
            Invocation::File { label, dest } => {
                log::info!("label={:?}, writing results to {:?}", label, dest);
                Some(dest)
            }
        };

        let cfg = Config::from_env()?;
        log::debug!("{:?}", cfg);

        let results = run_suite(&cfg);

        match dest {
            None => report::print_json(&results, cfg.indent)?,
            Some(dest) => match report::write_json_file(&dest, &results, cfg.indent) {
                Ok(path) => println!("Wrote test results to {}", path.to_string_lossy()),
                Err(e) => {
                    log::error!("{:#}", e);
                    eprintln!("Failed to save test results: {}", e);
                }
            },
        }
        Ok(0)
    }
}

fn run_suite(cfg: &Config) -> Vec<TestVerdict> {
    let runner = suite::runner();
    if !cfg.summary {
        return runner.run();
    }

    let spinner_style = ProgressStyle::default_spinner()
        .template("{spinner} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());

    let redirect = runner.get_redirect();
    let mut results = Vec::with_capacity(runner.len());
    for t in runner {
        let bar = ProgressBar::new_spinner()
            .with_style(spinner_style.clone())
            .with_message(format!("Test {} ...", t.name()));
        // Drawn once up front: a ticking thread would draw into the redirected stderr.
        bar.tick();

        let res = t.run_with(redirect);
        bar.finish_with_message(
            format!(
                "Test {} ... {} [{}ms]",
                res.name(),
                style::status_badge(res.status()),
                res.execution_time().as_millis(),
            )
            .cyan()
            .to_string(),
        );
        results.push(res);
    }

    results
        .iter()
        .filter(|x| !x.passed())
        .for_each(style::print_test_result_detail);

    style::print_test_result_summary(&results);
    results
}

#[cfg(test)]
mod test {
    use super::*;

    fn args(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn zero_or_one_arg_prints_to_stdout() {
        assert_eq!(
            Invocation::from_positional(&args(&[])),
            Invocation::Stdout { label: None }
        );
        assert_eq!(
            Invocation::from_positional(&args(&["run"])),
            Invocation::Stdout {
                label: Some("run".into())
            }
        );
    }

    #[test]
    fn two_args_write_file() {
        assert_eq!(
            Invocation::from_positional(&args(&["run", "out.json"])),
            Invocation::File {
                label: "run".into(),
                dest: "out.json".into()
            }
        );
    }

    #[test]
    fn help_or_too_many_args_is_usage() {
        assert_eq!(
            Invocation::from_positional(&args(&["run", "-h"])),
            Invocation::Usage
        );
        assert_eq!(
            Invocation::from_positional(&args(&["run", "  -h "])),
            Invocation::Usage
        );
        assert_eq!(
            Invocation::from_positional(&args(&["a", "b", "c"])),
            Invocation::Usage
        );
    }

    #[test]
    fn hyphen_args_reach_positional() {
        use clap::Parser;
        let a = Args::try_parse_from(["stdcheck", "run", "-h"]).unwrap();
        assert_eq!(a.positional, ["run", "-h"]);
        let a = Args::try_parse_from(["stdcheck"]).unwrap();
        assert!(a.positional.is_empty());
    }

    #[test]
    fn help_and_version_flags_are_plain_labels() {
        use clap::Parser;
        for flag in ["--version", "-V", "--help", "-h"] {
            let a = Args::try_parse_from(["stdcheck", flag]).unwrap();
            assert_eq!(a.positional, [flag]);
            assert_eq!(
                Invocation::from_positional(&a.positional),
                Invocation::Stdout {
                    label: Some(flag.into())
                }
            );
        }
    }
}
