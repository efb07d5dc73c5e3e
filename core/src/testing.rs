pub mod capture;
pub mod compare;
pub mod failure;
pub mod normalize;
pub mod runner;
pub mod verdict;

pub use capture::{read_stderr, read_stdout, Redirect, StreamCapture};
pub use compare::*;
pub use failure::*;
pub use normalize::*;
pub use runner::*;
pub use verdict::*;
