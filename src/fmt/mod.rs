//! The formatting primitive surface.
//!
//! Two entry points mirror the two kinds of C-library primitive the
//! strategies are written against: [`format_bounded`] writes at most the
//! space it is given and reports a truncation sentinel, [`format_unbounded`]
//! writes everything to an `io::Write` and reports the exact count. Both
//! interpret the same printf directive grammar over the same argument
//! snapshot, so a measure pass and a render pass agree byte for byte.

pub(crate) mod directive;
pub(crate) mod render;

use std::io;

use memchr::memchr;

use crate::args::{ArgCursor, FormatArg, FormatArgs};
use crate::error::Error;
use directive::{Count, Directive};

/// Outcome of a bounded formatting attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bounded {
    /// Everything fit; the payload is the number of bytes written.
    Fit(usize),
    /// The output would not fit in the space given.
    Truncated,
}

#[derive(Debug)]
pub(crate) enum SinkError {
    Full,
    Io(io::Error),
}

#[derive(Debug)]
enum EngineError {
    Sink(SinkError),
    Format(Error),
}

impl From<SinkError> for EngineError {
    fn from(err: SinkError) -> Self {
        EngineError::Sink(err)
    }
}

impl From<Error> for EngineError {
    fn from(err: Error) -> Self {
        EngineError::Format(err)
    }
}

/// Byte-oriented output target for the directive renderers.
pub(crate) trait FmtSink {
    fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), SinkError>;

    fn pad(&mut self, byte: u8, mut count: usize) -> Result<(), SinkError> {
        let block = [byte; 32];
        while count > 0 {
            let take = count.min(block.len());
            self.write_bytes(&block[..take])?;
            count -= take;
        }
        Ok(())
    }
}

impl FmtSink for Vec<u8> {
    fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), SinkError> {
        self.extend_from_slice(bytes);
        Ok(())
    }
}

/// Writes into a fixed slice; reports `Full` once the slice is exhausted.
/// Bytes that fit before the overflow are still written, like a bounded
/// C primitive that fills the window it was given.
struct SliceSink<'a> {
    dest: &'a mut [u8],
    len: usize,
}

impl FmtSink for SliceSink<'_> {
    fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), SinkError> {
        let take = bytes.len().min(self.dest.len() - self.len);
        self.dest[self.len..self.len + take].copy_from_slice(&bytes[..take]);
        self.len += take;
        if take < bytes.len() {
            Err(SinkError::Full)
        } else {
            Ok(())
        }
    }
}

/// Counts every byte it forwards to the underlying writer.
struct CountingSink<W> {
    inner: W,
    written: usize,
}

impl<W: io::Write> FmtSink for CountingSink<W> {
    fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), SinkError> {
        self.inner.write_all(bytes).map_err(SinkError::Io)?;
        self.written += bytes.len();
        Ok(())
    }
}

/// Render at most `dest.len()` bytes. A result of exactly `dest.len()` is a
/// fit, not a truncation.
pub fn format_bounded(fmt: &str, args: &FormatArgs, dest: &mut [u8]) -> Result<Bounded, Error> {
    let mut sink = SliceSink { dest, len: 0 };
    match run(fmt, &mut args.cursor(), &mut sink) {
        Ok(()) => Ok(Bounded::Fit(sink.len)),
        Err(EngineError::Sink(SinkError::Full)) => Ok(Bounded::Truncated),
        Err(EngineError::Sink(SinkError::Io(err))) => Err(Error::DiscardWrite(err)),
        Err(EngineError::Format(err)) => Err(err),
    }
}

/// Render everything into `writer` and return the exact byte count.
pub fn format_unbounded<W: io::Write>(
    fmt: &str,
    args: &FormatArgs,
    writer: W,
) -> Result<usize, Error> {
    let mut sink = CountingSink {
        inner: writer,
        written: 0,
    };
    match run(fmt, &mut args.cursor(), &mut sink) {
        Ok(()) => Ok(sink.written),
        Err(EngineError::Sink(SinkError::Full)) => unreachable!("counting sink has no bound"),
        Err(EngineError::Sink(SinkError::Io(err))) => Err(Error::DiscardWrite(err)),
        Err(EngineError::Format(err)) => Err(err),
    }
}

/// Walk the format string: literal runs verbatim, `%%` as a percent sign,
/// malformed directives emitted literally, everything else dispatched.
fn run(fmt: &str, args: &mut ArgCursor<'_>, sink: &mut dyn FmtSink) -> Result<(), EngineError> {
    let mut rest = fmt.as_bytes();
    loop {
        let at = match memchr(b'%', rest) {
            Some(at) => at,
            None => {
                sink.write_bytes(rest)?;
                return Ok(());
            }
        };
        sink.write_bytes(&rest[..at])?;
        rest = &rest[at + 1..];
        match rest.first() {
            None => {
                // Trailing '%' with nothing after it.
                sink.write_bytes(b"%")?;
                return Ok(());
            }
            Some(b'%') => {
                sink.write_bytes(b"%")?;
                rest = &rest[1..];
            }
            Some(_) => match directive::parse_directive(rest) {
                Some((parsed, used)) => {
                    rest = &rest[used..];
                    dispatch(&parsed, args, sink)?;
                }
                None => sink.write_bytes(b"%")?,
            },
        }
    }
}

fn dispatch(
    d: &Directive,
    args: &mut ArgCursor<'_>,
    sink: &mut dyn FmtSink,
) -> Result<(), EngineError> {
    let conversion = char::from(d.conversion);
    let mut flags = d.flags;

    // '*' fields consume arguments in order, ahead of the value itself.
    let width = match d.width {
        Count::Omitted => 0,
        Count::Given(w) => w,
        Count::Star => {
            let w = take_count(args, conversion)?;
            if w < 0 {
                // POSIX: a negative '*' width means left-justified.
                flags.minus = true;
                flags.zero = false;
            }
            w.unsigned_abs() as usize
        }
    };
    let precision = match d.precision {
        Count::Omitted => None,
        Count::Given(p) => Some(p),
        Count::Star => {
            let p = take_count(args, conversion)?;
            // POSIX: a negative '*' precision is as if it were omitted.
            usize::try_from(p).ok()
        }
    };

    match d.conversion {
        b'd' | b'i' => {
            let value = match take(args, conversion)? {
                FormatArg::Int(v) => *v,
                FormatArg::Uint(u) => *u as i64,
                FormatArg::Char(c) => i64::from(u32::from(*c)),
                other => return Err(mismatch(args, conversion, other).into()),
            };
            render::signed(value, flags, width, precision, sink)?;
        }
        b'u' | b'o' | b'x' | b'X' => {
            let value = match take(args, conversion)? {
                FormatArg::Uint(u) => *u,
                FormatArg::Int(v) => *v as u64,
                FormatArg::Char(c) => u64::from(u32::from(*c)),
                other => return Err(mismatch(args, conversion, other).into()),
            };
            render::unsigned(value, d.conversion, flags, width, precision, sink)?;
        }
        b'f' | b'F' | b'e' | b'E' | b'g' | b'G' => {
            let value = match take(args, conversion)? {
                FormatArg::Float(v) => *v,
                other => return Err(mismatch(args, conversion, other).into()),
            };
            render::float(value, d.conversion, flags, width, precision, sink)?;
        }
        b'c' => {
            let value = match take(args, conversion)? {
                FormatArg::Char(c) => *c,
                FormatArg::Int(v) => codepoint(args, conversion, *v as u32 as u64)?,
                FormatArg::Uint(u) => codepoint(args, conversion, *u)?,
                other => return Err(mismatch(args, conversion, other).into()),
            };
            render::chr(value, flags, width, sink)?;
        }
        b's' => {
            let value = match take(args, conversion)? {
                FormatArg::Str(s) => s.as_str(),
                other => return Err(mismatch(args, conversion, other).into()),
            };
            render::string(value, flags, width, precision, sink)?;
        }
        b'p' => {
            let addr = match take(args, conversion)? {
                FormatArg::Ptr(p) => *p,
                FormatArg::Uint(u) => *u as usize,
                other => return Err(mismatch(args, conversion, other).into()),
            };
            render::pointer(addr, flags, width, sink)?;
        }
        // '%n' writes back through its argument; '%a'/'%A' hex floats are
        // not rendered here. Both are refused rather than misrendered.
        _ => return Err(Error::UnsupportedDirective { conversion }.into()),
    }
    Ok(())
}

fn take<'a>(args: &mut ArgCursor<'a>, conversion: char) -> Result<&'a FormatArg, Error> {
    let index = args.position();
    let supplied = args.supplied();
    args.next().ok_or(Error::MissingArgument {
        conversion,
        index,
        supplied,
    })
}

fn take_count(args: &mut ArgCursor<'_>, conversion: char) -> Result<i64, Error> {
    match take(args, conversion)? {
        FormatArg::Int(v) => Ok(*v),
        FormatArg::Uint(u) => Ok(*u as i64),
        other => Err(mismatch(args, conversion, other)),
    }
}

fn codepoint(args: &ArgCursor<'_>, conversion: char, value: u64) -> Result<char, Error> {
    u32::try_from(value)
        .ok()
        .and_then(char::from_u32)
        .ok_or(Error::MismatchedArgument {
            conversion,
            kind: "non-codepoint",
            index: args.position() - 1,
        })
}

fn mismatch(args: &ArgCursor<'_>, conversion: char, arg: &FormatArg) -> Error {
    Error::MismatchedArgument {
        conversion,
        kind: arg.kind(),
        // The offending argument is the one just consumed.
        index: args.position() - 1,
    }
}
