//! The reusable formatting buffer.

use crate::args::FormatArgs;
use crate::buffer::CharBuf;
use crate::constants::output_estimate;
use crate::diag::{Diagnostic, LogDiagnostic};
use crate::error::Error;
use crate::strategy::{DefaultStrategy, Strategy};

/// A printf-style renderer over one exclusively-owned [`CharBuf`].
///
/// One value serves one logical call site, reused across calls; the result
/// of a `print` stays valid until the next `print` on the same value.
/// Renders are never truncated: the buffer grows until the full text fits.
///
/// ```
/// use printf_buf::{fmt_args, PrintfBuf};
///
/// let mut buf = PrintfBuf::new();
/// let line = buf.print("%s scored %d points", &fmt_args!["Alice", 42]);
/// assert_eq!(line, "Alice scored 42 points");
/// ```
pub struct PrintfBuf<S: Strategy = DefaultStrategy> {
    buf: CharBuf,
    strategy: S,
    diag: Box<dyn Diagnostic>,
}

impl PrintfBuf<DefaultStrategy> {
    /// A renderer using the build's default strategy.
    pub fn new() -> Self {
        Self::with_strategy(DefaultStrategy::default())
    }
}

impl Default for PrintfBuf<DefaultStrategy> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Strategy> PrintfBuf<S> {
    pub fn with_strategy(strategy: S) -> Self {
        Self {
            buf: CharBuf::new(),
            strategy,
            diag: Box::new(LogDiagnostic),
        }
    }

    /// Replace the default 512-byte starting capacity.
    pub fn with_start_capacity(mut self, capacity: usize) -> Self {
        self.buf = CharBuf::with_capacity(capacity);
        self
    }

    /// Replace the default `log`-facade diagnostic sink.
    pub fn with_diagnostic(mut self, diag: impl Diagnostic + 'static) -> Self {
        self.diag = Box::new(diag);
        self
    }

    /// Render `fmt` with `args` and return the result.
    ///
    /// Failures never escape: they are reported through the diagnostic
    /// channel and the empty (still terminated) result comes back, so a
    /// misbehaving format call degrades to "no message" instead of a fault.
    pub fn print(&mut self, fmt: &str, args: &FormatArgs) -> &str {
        if let Err(err) = self.render(fmt, args) {
            self.diag.error(&err.to_string());
            self.buf.terminate(0);
        }
        self.buf.as_str()
    }

    /// Like [`print`](Self::print), but hands the failure to the caller
    /// instead of the diagnostic channel.
    pub fn try_print(&mut self, fmt: &str, args: &FormatArgs) -> Result<&str, Error> {
        match self.render(fmt, args) {
            Ok(()) => Ok(self.buf.as_str()),
            Err(err) => {
                self.buf.terminate(0);
                Err(err)
            }
        }
    }

    fn render(&mut self, fmt: &str, args: &FormatArgs) -> Result<(), Error> {
        let estimate = output_estimate(fmt.len());
        if estimate > self.buf.capacity() {
            self.buf.reserve(estimate);
        }
        let printed = self.strategy.render(&mut self.buf, fmt, args)?;
        self.buf.terminate(printed);
        Ok(())
    }

    /// The most recent result (empty before the first `print`).
    pub fn last(&self) -> &str {
        self.buf.as_str()
    }

    /// The buffer backing this renderer.
    pub fn buffer(&self) -> &CharBuf {
        &self.buf
    }
}
