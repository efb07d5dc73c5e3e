//! Thread-local console for test bodies.
//!
//! [`cprint!`], [`cprintln!`], [`ceprint!`] and [`ceprintln!`] write into the
//! innermost console-only [`StreamCapture`](crate::testing::StreamCapture) of
//! the current thread. Otherwise they write to the real stdout/stderr, which a
//! process-wide capture has redirected, so they interleave with `println!`.

use std::{
    fmt,
    io::{self, Write},
};

use crate::testing::capture;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stream {
    Stdout,
    Stderr,
}

pub fn write(stream: Stream, args: fmt::Arguments) -> io::Result<()> {
    let text = fmt::format(args);
    if capture::append(stream, &text) {
        return Ok(());
    }
    match stream {
        Stream::Stdout => {
            let mut out = io::stdout().lock();
            out.write_all(text.as_bytes())?;
            out.flush()
        }
        Stream::Stderr => io::stderr().lock().write_all(text.as_bytes()),
    }
}

#[doc(hidden)]
pub fn _print(stream: Stream, args: fmt::Arguments) {
    // Broken pipes are not the test's business.
    let _ = self::write(stream, args);
}

#[macro_export]
macro_rules! cprint {
    ($($arg:tt)*) => {
        $crate::console::_print($crate::console::Stream::Stdout, format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! cprintln {
    () => {
        $crate::cprint!("\n")
    };
    ($($arg:tt)*) => {
        $crate::console::_print(
            $crate::console::Stream::Stdout,
            format_args!("{}\n", format_args!($($arg)*)),
        )
    };
}

#[macro_export]
macro_rules! ceprint {
    ($($arg:tt)*) => {
        $crate::console::_print($crate::console::Stream::Stderr, format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! ceprintln {
    () => {
        $crate::ceprint!("\n")
    };
    ($($arg:tt)*) => {
        $crate::console::_print(
            $crate::console::Stream::Stderr,
            format_args!("{}\n", format_args!($($arg)*)),
        )
    };
}
