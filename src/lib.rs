//! Exact-size printf-style formatting into a reusable growable buffer.
//!
//! A [`PrintfBuf`] renders a printf-style format string and an owned
//! argument snapshot into a buffer it grows until the whole result fits:
//! format once, get a correctly sized, terminated result, never a silently
//! truncated one. Two rendering strategies cover the two kinds of formatting
//! primitive platforms historically offer — bounded-with-truncation-sentinel
//! and unbounded-measure-then-render — with the build default picked by the
//! `two-pass` cargo feature.

pub mod args;
pub mod buffer;
pub mod constants;
pub mod diag;
pub mod error;
pub mod fmt;
pub mod renderer;
pub mod strategy;

pub use crate::args::{FormatArg, FormatArgs};
pub use crate::buffer::CharBuf;
pub use crate::constants::{NULL_DEVICE, START_BUF_SIZE};
pub use crate::diag::{Diagnostic, LogDiagnostic};
pub use crate::error::Error;
pub use crate::fmt::Bounded;
pub use crate::renderer::PrintfBuf;
pub use crate::strategy::{
    BoundedRetry, DefaultStrategy, MeasureRender, MeasureSink, NullDevice, Strategy,
};

pub type Result<T> = std::result::Result<T, Error>;

/// One-shot render into a fresh `String`.
///
/// ```
/// use printf_buf::{fmt_args, sprintf};
///
/// let line = sprintf("%05d", &fmt_args![42])?;
/// assert_eq!(line, "00042");
/// # Ok::<(), printf_buf::Error>(())
/// ```
pub fn sprintf(fmt: &str, args: &FormatArgs) -> Result<String> {
    let mut buf = PrintfBuf::new();
    buf.try_print(fmt, args).map(str::to_owned)
}
