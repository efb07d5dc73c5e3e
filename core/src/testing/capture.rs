use std::{
    cell::RefCell,
    io::{self, Read, Write},
    marker::PhantomData,
};

use gag::BufferRedirect;

use crate::console::Stream;

thread_local! {
    static CAPTURES: RefCell<Vec<CaptureBuffers>> = RefCell::new(Vec::new());
}

/// What a [`StreamCapture`] takes over.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Redirect {
    /// File descriptors 1 and 2 of the process, which also catches
    /// `println!`, `eprintln!`, panic messages and output of libraries.
    #[default]
    Process,
    /// Only the crate console (`cprint!` and friends) of the current thread.
    Console,
}

struct FdRedirect {
    stdout: BufferRedirect,
    stderr: BufferRedirect,
}

impl FdRedirect {
    fn begin() -> io::Result<Self> {
        // Whatever was buffered before the capture belongs to the real stdout.
        io::stdout().flush()?;
        Ok(Self {
            stdout: BufferRedirect::stdout()?,
            stderr: BufferRedirect::stderr()?,
        })
    }

    fn drain(&mut self, stream: Stream, dst: &mut String) {
        let res = match stream {
            Stream::Stdout => io::stdout()
                .flush()
                .and_then(|_| self.stdout.read_to_string(dst)),
            Stream::Stderr => self.stderr.read_to_string(dst),
        };
        if let Err(e) = res {
            log::warn!("Failed to read captured {:?}: {}", stream, e);
        }
    }
}

#[derive(Default)]
struct CaptureBuffers {
    stdout: String,
    stderr: String,
    fd: Option<FdRedirect>,
}

impl CaptureBuffers {
    fn get_mut(&mut self, stream: Stream) -> &mut String {
        match stream {
            Stream::Stdout => &mut self.stdout,
            Stream::Stderr => &mut self.stderr,
        }
    }

    fn drain(&mut self, stream: Stream) -> String {
        let mut s = std::mem::take(self.get_mut(stream));
        if let Some(fd) = &mut self.fd {
            fd.drain(stream, &mut s);
        }
        s
    }
}

/// Redirects standard output and standard error into in-memory buffers.
///
/// Captures nest: a new capture shadows the enclosing one, and dropping it
/// gives the streams back to whatever was active when it began (the real
/// stdio or the enclosing capture). The restore runs in `Drop`, so it also
/// happens while unwinding out of a panicking test body.
///
/// Only one capture per process can hold the file descriptors. A nested or
/// concurrent [`Redirect::Process`] capture that cannot get them logs a
/// warning and captures the console only.
#[must_use = "output is only captured while the guard is alive"]
pub struct StreamCapture {
    depth: usize,
    // Captures are per-thread; the guard must be dropped where it was created.
    _not_send: PhantomData<*const ()>,
}

impl StreamCapture {
    pub fn begin() -> Self {
        Self::begin_with(Redirect::default())
    }

    pub fn begin_with(redirect: Redirect) -> Self {
        // Logged before the redirect so it cannot end up in the captured stderr.
        log::trace!("Begin capture (redirect={:?})", redirect);
        let fd = match redirect {
            Redirect::Console => None,
            Redirect::Process => FdRedirect::begin()
                .map_err(|e| {
                    log::warn!("Cannot redirect stdout/stderr, capturing console only: {}", e)
                })
                .ok(),
        };
        let depth = CAPTURES.with(|c| {
            let mut c = c.borrow_mut();
            c.push(CaptureBuffers {
                fd,
                ..Default::default()
            });
            c.len() - 1
        });
        Self {
            depth,
            _not_send: PhantomData,
        }
    }

    /// Drains this capture's stdout buffer.
    pub fn read_stdout(&self) -> String {
        self.drain(Stream::Stdout)
    }

    /// Drains this capture's stderr buffer.
    pub fn read_stderr(&self) -> String {
        self.drain(Stream::Stderr)
    }

    fn drain(&self, stream: Stream) -> String {
        CAPTURES.with(|c| {
            c.borrow_mut()
                .get_mut(self.depth)
                .map(|buf| buf.drain(stream))
                .unwrap_or_default()
        })
    }
}

impl Drop for StreamCapture {
    fn drop(&mut self) {
        // Pending `print!` text must land in the buffer, not after the restore.
        let _ = io::stdout().flush();
        // `try_with` because the guard may outlive the thread-local during thread teardown.
        let _ = CAPTURES.try_with(|c| c.borrow_mut().truncate(self.depth));
        log::trace!("End capture (depth={})", self.depth);
    }
}

/// Returns everything written to stdout since the last read and clears the
/// buffer of the innermost capture. Returns an empty string when nothing is
/// captured.
pub fn read_stdout() -> String {
    drain_innermost(Stream::Stdout)
}

/// Same as [`read_stdout`] for stderr. The two buffers are independent.
pub fn read_stderr() -> String {
    drain_innermost(Stream::Stderr)
}

fn drain_innermost(stream: Stream) -> String {
    CAPTURES.with(|c| {
        c.borrow_mut()
            .last_mut()
            .map(|buf| buf.drain(stream))
            .unwrap_or_default()
    })
}

/// Returns `false` when the text was not consumed: no capture is active, or
/// the innermost one holds the file descriptors and the text must go through
/// the real (redirected) stdio to keep its order with `println!` output.
pub(crate) fn append(stream: Stream, text: &str) -> bool {
    CAPTURES.with(|c| match c.borrow_mut().last_mut() {
        Some(buf) if buf.fd.is_none() => {
            buf.get_mut(stream).push_str(text);
            true
        }
        _ => false,
    })
}
