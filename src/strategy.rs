//! The two rendering algorithms.
//!
//! Which one a build reaches for by default is fixed at compile time (the
//! `two-pass` feature), the way a platform fixes which formatting primitives
//! exist. Both are always compiled; a renderer can be constructed with either.

use std::fs::File;
use std::io;
use std::sync::OnceLock;

use crate::args::FormatArgs;
use crate::buffer::CharBuf;
use crate::constants::NULL_DEVICE;
use crate::error::Error;
use crate::fmt::{self, Bounded};

/// One rendering algorithm: produce the exact text for `(fmt, args)` inside
/// `buf`, growing it as needed, and return the rendered length. The caller
/// terminates the buffer.
pub trait Strategy {
    fn render(&mut self, buf: &mut CharBuf, fmt: &str, args: &FormatArgs) -> Result<usize, Error>;
}

/// Bounded-retry: attempt within `capacity - 1`, double on the truncation
/// sentinel, repeat until everything fits. A result of exactly
/// `capacity - 1` is a fit (the reserved slot takes the terminator).
#[derive(Debug, Clone, Copy, Default)]
pub struct BoundedRetry;

impl Strategy for BoundedRetry {
    fn render(&mut self, buf: &mut CharBuf, fmt: &str, args: &FormatArgs) -> Result<usize, Error> {
        loop {
            let limit = buf.capacity() - 1;
            match fmt::format_bounded(fmt, args, &mut buf.as_mut_slice()[..limit])? {
                Bounded::Fit(printed) => return Ok(printed),
                Bounded::Truncated => {
                    let doubled = buf.capacity() * 2;
                    buf.reserve(doubled);
                }
            }
        }
    }
}

/// Where the measuring pass discards its output. Opened lazily on first use
/// and reused for every later call; an open failure is remembered, not
/// retried.
pub trait MeasureSink {
    fn writer(&mut self) -> Result<&mut dyn io::Write, Error>;
}

/// The platform null device, shared process-wide.
///
/// The handle is opened at most once per process (safe under concurrent
/// first use); every `NullDevice` value writes through the same file.
#[derive(Debug, Default)]
pub struct NullDevice {
    handle: Option<&'static File>,
}

static NULL_DEVICE_HANDLE: OnceLock<Option<File>> = OnceLock::new();

impl NullDevice {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MeasureSink for NullDevice {
    fn writer(&mut self) -> Result<&mut dyn io::Write, Error> {
        let shared = NULL_DEVICE_HANDLE.get_or_init(|| File::create(NULL_DEVICE).ok());
        let file = shared.as_ref().ok_or(Error::NullDeviceUnavailable {
            device: NULL_DEVICE,
        })?;
        Ok(self.handle.insert(file))
    }
}

/// Measure-then-render: one unbounded pass into the discard sink to learn
/// the exact length, one unbounded pass into the exactly-sized buffer.
#[derive(Debug, Default)]
pub struct MeasureRender<S = NullDevice> {
    sink: S,
}

impl MeasureRender<NullDevice> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S: MeasureSink> MeasureRender<S> {
    pub fn with_sink(sink: S) -> Self {
        Self { sink }
    }
}

impl<S: MeasureSink> Strategy for MeasureRender<S> {
    fn render(&mut self, buf: &mut CharBuf, fmt: &str, args: &FormatArgs) -> Result<usize, Error> {
        let measured = {
            let writer = self.sink.writer()?;
            fmt::format_unbounded(fmt, args, writer)?
        };
        buf.reserve(measured + 1);
        // The same snapshot rendered again must produce the same count; a
        // primitive disagreeing with itself is a consistency violation, so
        // trust the measure in release builds.
        match fmt::format_bounded(fmt, args, &mut buf.as_mut_slice()[..measured])? {
            Bounded::Fit(printed) => {
                debug_assert_eq!(printed, measured);
                Ok(printed.min(measured))
            }
            Bounded::Truncated => {
                debug_assert!(false, "render pass exceeded its own measure");
                Ok(measured)
            }
        }
    }
}

/// The strategy a plain `PrintfBuf::new()` uses, fixed per build.
#[cfg(not(feature = "two-pass"))]
pub type DefaultStrategy = BoundedRetry;
#[cfg(feature = "two-pass")]
pub type DefaultStrategy = MeasureRender<NullDevice>;
