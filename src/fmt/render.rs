//! Per-conversion renderers. Each one honors flags, width, and precision for
//! its conversion and writes through a [`FmtSink`].

use super::directive::Flags;
use super::{FmtSink, SinkError};

/// The resolved parts of one conversion, emitted in order around padding.
struct Piece<'a> {
    sign: Option<u8>,
    prefix: &'a [u8],
    zeros: usize,
    body: &'a [u8],
}

impl<'a> Piece<'a> {
    fn body(body: &'a [u8]) -> Self {
        Piece {
            sign: None,
            prefix: b"",
            zeros: 0,
            body,
        }
    }
}

/// Field-width padding around a piece: spaces outside, zero padding between
/// the sign/prefix and the digits.
fn emit(
    out: &mut dyn FmtSink,
    flags: Flags,
    width: usize,
    zero_pad: bool,
    piece: Piece<'_>,
) -> Result<(), SinkError> {
    let content = usize::from(piece.sign.is_some())
        + piece.prefix.len()
        + piece.zeros
        + piece.body.len();
    let pad = width.saturating_sub(content);

    if !flags.minus && !zero_pad {
        out.pad(b' ', pad)?;
    }
    if let Some(sign) = piece.sign {
        out.write_bytes(&[sign])?;
    }
    out.write_bytes(piece.prefix)?;
    if !flags.minus && zero_pad {
        out.pad(b'0', pad)?;
    }
    out.pad(b'0', piece.zeros)?;
    out.write_bytes(piece.body)?;
    if flags.minus {
        out.pad(b' ', pad)?;
    }
    Ok(())
}

fn sign_byte(negative: bool, flags: Flags) -> Option<u8> {
    if negative {
        Some(b'-')
    } else if flags.plus {
        Some(b'+')
    } else if flags.space {
        Some(b' ')
    } else {
        None
    }
}

/// Precision for integers means minimum digits; explicit precision 0 with
/// value 0 emits no digits at all.
fn precision_zeros(body: &[u8], precision: Option<usize>) -> (&[u8], usize) {
    match precision {
        Some(0) if body == b"0" => (b"", 0),
        Some(p) => (body, p.saturating_sub(body.len())),
        None => (body, 0),
    }
}

fn radix_digits(mut value: u64, radix: u64, upper: bool, buf: &mut [u8; 24]) -> &[u8] {
    let alpha = if upper { b'A' } else { b'a' };
    let mut pos = buf.len();
    loop {
        pos -= 1;
        let digit = (value % radix) as u8;
        buf[pos] = if digit < 10 {
            b'0' + digit
        } else {
            alpha + (digit - 10)
        };
        value /= radix;
        if value == 0 {
            break;
        }
    }
    &buf[pos..]
}

pub(crate) fn signed(
    value: i64,
    flags: Flags,
    width: usize,
    precision: Option<usize>,
    out: &mut dyn FmtSink,
) -> Result<(), SinkError> {
    let mut digits = itoa::Buffer::new();
    let body = digits.format(value.unsigned_abs()).as_bytes();
    let (body, zeros) = precision_zeros(body, precision);
    // POSIX: the '0' flag is ignored when a precision is given.
    let zero_pad = flags.zero && precision.is_none();
    emit(
        out,
        flags,
        width,
        zero_pad,
        Piece {
            sign: sign_byte(value < 0, flags),
            prefix: b"",
            zeros,
            body,
        },
    )
}

pub(crate) fn unsigned(
    value: u64,
    conversion: u8,
    flags: Flags,
    width: usize,
    precision: Option<usize>,
    out: &mut dyn FmtSink,
) -> Result<(), SinkError> {
    let mut decimal = itoa::Buffer::new();
    let mut radix_buf = [0u8; 24];
    let body: &[u8] = match conversion {
        b'o' => radix_digits(value, 8, false, &mut radix_buf),
        b'x' => radix_digits(value, 16, false, &mut radix_buf),
        b'X' => radix_digits(value, 16, true, &mut radix_buf),
        _ => decimal.format(value).as_bytes(),
    };
    let prefix: &[u8] = if flags.hash && value != 0 {
        match conversion {
            b'o' => b"0",
            b'x' => b"0x",
            b'X' => b"0X",
            _ => b"",
        }
    } else {
        b""
    };
    let (body, zeros) = precision_zeros(body, precision);
    let zero_pad = flags.zero && precision.is_none();
    emit(
        out,
        flags,
        width,
        zero_pad,
        Piece {
            sign: None,
            prefix,
            zeros,
            body,
        },
    )
}

pub(crate) fn float(
    value: f64,
    conversion: u8,
    flags: Flags,
    width: usize,
    precision: Option<usize>,
    out: &mut dyn FmtSink,
) -> Result<(), SinkError> {
    let upper = conversion.is_ascii_uppercase();

    if value.is_nan() {
        let body = if upper { "NAN" } else { "nan" };
        return emit(out, flags, width, false, Piece::body(body.as_bytes()));
    }
    if value.is_infinite() {
        let body = if upper { "INF" } else { "inf" };
        return emit(
            out,
            flags,
            width,
            false,
            Piece {
                sign: sign_byte(value < 0.0, flags),
                prefix: b"",
                zeros: 0,
                body: body.as_bytes(),
            },
        );
    }

    let abs = value.abs();
    let precision = precision.unwrap_or(6);
    let body = match conversion.to_ascii_lowercase() {
        b'f' => body_fixed(abs, precision, flags.hash),
        b'e' => body_exponential(abs, precision, upper, flags.hash),
        _ => body_shortest(abs, precision, upper, flags.hash),
    };
    emit(
        out,
        flags,
        width,
        flags.zero,
        Piece {
            sign: sign_byte(value.is_sign_negative(), flags),
            prefix: b"",
            zeros: 0,
            body: body.as_bytes(),
        },
    )
}

/// `%f` body: fixed-point decimal of the absolute value.
fn body_fixed(abs: f64, precision: usize, hash: bool) -> String {
    let mut body = format!("{abs:.precision$}");
    if precision == 0 && hash {
        body.push('.');
    }
    body
}

/// `%e` body: mantissa, exponent mark, signed two-digit-minimum exponent.
fn body_exponential(abs: f64, precision: usize, upper: bool, hash: bool) -> String {
    let formatted = format!("{abs:.precision$e}");
    let (mantissa, exponent) = split_exponent(&formatted);
    let mut body = String::with_capacity(formatted.len() + 3);
    body.push_str(mantissa);
    if precision == 0 && hash {
        body.push('.');
    }
    body.push(if upper { 'E' } else { 'e' });
    body.push(if exponent < 0 { '-' } else { '+' });
    let magnitude = exponent.unsigned_abs();
    if magnitude < 10 {
        body.push('0');
    }
    let mut digits = itoa::Buffer::new();
    body.push_str(digits.format(magnitude));
    body
}

/// `%g` body: fixed or exponential, whichever the exponent rule picks, with
/// trailing zeros trimmed unless `#` keeps them.
fn body_shortest(abs: f64, precision: usize, upper: bool, hash: bool) -> String {
    let significant = precision.max(1);
    let exponent = decimal_exponent(abs, significant);
    let mut body = if exponent >= -4 && exponent < significant as i32 {
        let fractional = (significant as i32 - 1 - exponent).max(0) as usize;
        body_fixed(abs, fractional, false)
    } else {
        body_exponential(abs, significant - 1, upper, false)
    };
    if !hash {
        trim_zeros(&mut body);
    }
    body
}

/// Decimal exponent of the value after rounding to `significant` digits; the
/// exponential formatter does the rounding so 9.99 at one digit reports 1.
fn decimal_exponent(abs: f64, significant: usize) -> i32 {
    if abs == 0.0 {
        return 0;
    }
    let digits = significant - 1;
    let formatted = format!("{abs:.digits$e}");
    split_exponent(&formatted).1
}

fn split_exponent(formatted: &str) -> (&str, i32) {
    match formatted.split_once('e') {
        Some((mantissa, exponent)) => {
            (mantissa, exponent.parse().expect("std exponent is numeric"))
        }
        None => (formatted, 0),
    }
}

fn trim_zeros(body: &mut String) {
    match body.find(['e', 'E']) {
        Some(at) if body[..at].contains('.') => {
            let keep = body[..at].trim_end_matches('0').trim_end_matches('.').len();
            body.replace_range(keep..at, "");
        }
        None if body.contains('.') => {
            let keep = body.trim_end_matches('0').trim_end_matches('.').len();
            body.truncate(keep);
        }
        _ => {}
    }
}

pub(crate) fn string(
    value: &str,
    flags: Flags,
    width: usize,
    precision: Option<usize>,
    out: &mut dyn FmtSink,
) -> Result<(), SinkError> {
    let mut end = precision.map_or(value.len(), |p| p.min(value.len()));
    // Precision counts bytes; never split a multi-byte character.
    while !value.is_char_boundary(end) {
        end -= 1;
    }
    emit(
        out,
        flags,
        width,
        false,
        Piece::body(&value.as_bytes()[..end]),
    )
}

pub(crate) fn chr(
    value: char,
    flags: Flags,
    width: usize,
    out: &mut dyn FmtSink,
) -> Result<(), SinkError> {
    let mut utf8 = [0u8; 4];
    let body = value.encode_utf8(&mut utf8).as_bytes();
    emit(out, flags, width, false, Piece::body(body))
}

pub(crate) fn pointer(
    addr: usize,
    flags: Flags,
    width: usize,
    out: &mut dyn FmtSink,
) -> Result<(), SinkError> {
    if addr == 0 {
        return emit(out, flags, width, false, Piece::body(b"(nil)"));
    }
    let mut radix_buf = [0u8; 24];
    let digits = radix_digits(addr as u64, 16, false, &mut radix_buf);
    emit(
        out,
        flags,
        width,
        false,
        Piece {
            sign: None,
            prefix: b"0x",
            zeros: 0,
            body: digits,
        },
    )
}
