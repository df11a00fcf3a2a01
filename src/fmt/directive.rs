//! Parser for `%[flags][width][.precision][length]conversion` directives.
//!
//! Reference: POSIX.1-2024 fprintf, ISO C11 7.21.6.1.

/// Flags parsed from a directive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Flags {
    pub minus: bool, // '-'
    pub plus: bool,  // '+'
    pub space: bool, // ' '
    pub hash: bool,  // '#'
    pub zero: bool,  // '0'
}

/// A width or precision field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum Count {
    #[default]
    Omitted,
    Given(usize),
    /// `*` — taken from the argument list.
    Star,
}

/// Length modifier. Parsed for grammar fidelity; the argument snapshot
/// already carries full-width values, so these do not change rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum Length {
    #[default]
    None,
    Char,       // hh
    Short,      // h
    Long,       // l
    LongLong,   // ll
    Size,       // z
    Ptrdiff,    // t
    IntMax,     // j
    LongDouble, // L
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Directive {
    pub flags: Flags,
    pub width: Count,
    pub precision: Count,
    pub length: Length,
    pub conversion: u8,
}

const CONVERSIONS: &[u8] = b"diuoxXfFeEgGaAcspn";

/// Parse one directive starting at the first byte AFTER `%`.
///
/// Returns the directive and the number of bytes consumed, or `None` when
/// the bytes do not form a directive (the caller then emits `%` literally).
pub(crate) fn parse_directive(fmt: &[u8]) -> Option<(Directive, usize)> {
    let mut pos = 0;

    let mut flags = Flags::default();
    while let Some(&byte) = fmt.get(pos) {
        match byte {
            b'-' => flags.minus = true,
            b'+' => flags.plus = true,
            b' ' => flags.space = true,
            b'#' => flags.hash = true,
            b'0' => flags.zero = true,
            _ => break,
        }
        pos += 1;
    }
    // POSIX: '+' overrides ' '; '-' overrides '0'.
    if flags.plus {
        flags.space = false;
    }
    if flags.minus {
        flags.zero = false;
    }

    let width = parse_count(fmt, &mut pos);

    let precision = if fmt.get(pos) == Some(&b'.') {
        pos += 1;
        match parse_count(fmt, &mut pos) {
            // '.' with nothing after it means precision zero.
            Count::Omitted => Count::Given(0),
            count => count,
        }
    } else {
        Count::Omitted
    };

    let length = parse_length(fmt, &mut pos);

    let conversion = *fmt.get(pos)?;
    pos += 1;
    if !CONVERSIONS.contains(&conversion) {
        return None;
    }

    Some((
        Directive {
            flags,
            width,
            precision,
            length,
            conversion,
        },
        pos,
    ))
}

fn parse_count(fmt: &[u8], pos: &mut usize) -> Count {
    if fmt.get(*pos) == Some(&b'*') {
        *pos += 1;
        return Count::Star;
    }
    let start = *pos;
    let mut value = 0_usize;
    while let Some(&byte) = fmt.get(*pos) {
        if !byte.is_ascii_digit() {
            break;
        }
        value = value
            .saturating_mul(10)
            .saturating_add(usize::from(byte - b'0'));
        *pos += 1;
    }
    if *pos > start {
        Count::Given(value)
    } else {
        Count::Omitted
    }
}

fn parse_length(fmt: &[u8], pos: &mut usize) -> Length {
    let length = match fmt.get(*pos) {
        Some(b'h') => {
            *pos += 1;
            if fmt.get(*pos) == Some(&b'h') {
                *pos += 1;
                Length::Char
            } else {
                Length::Short
            }
        }
        Some(b'l') => {
            *pos += 1;
            if fmt.get(*pos) == Some(&b'l') {
                *pos += 1;
                Length::LongLong
            } else {
                Length::Long
            }
        }
        Some(b'z') => Length::Size,
        Some(b't') => Length::Ptrdiff,
        Some(b'j') => Length::IntMax,
        Some(b'L') => Length::LongDouble,
        _ => return Length::None,
    };
    if matches!(
        length,
        Length::Size | Length::Ptrdiff | Length::IntMax | Length::LongDouble
    ) {
        *pos += 1;
    }
    length
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> (Directive, usize) {
        parse_directive(s.as_bytes()).expect("directive should parse")
    }

    #[test]
    fn bare_conversion() {
        let (d, used) = parse("d");
        assert_eq!(used, 1);
        assert_eq!(d.conversion, b'd');
        assert_eq!(d.flags, Flags::default());
        assert_eq!(d.width, Count::Omitted);
        assert_eq!(d.precision, Count::Omitted);
    }

    #[test]
    fn flags_width_precision_length() {
        let (d, used) = parse("-+ #08.3llx");
        assert_eq!(used, 11);
        assert!(d.flags.minus && d.flags.plus && d.flags.hash);
        // '-' overrides '0', '+' overrides ' '.
        assert!(!d.flags.zero && !d.flags.space);
        assert_eq!(d.width, Count::Given(8));
        assert_eq!(d.precision, Count::Given(3));
        assert_eq!(d.length, Length::LongLong);
        assert_eq!(d.conversion, b'x');
    }

    #[test]
    fn star_width_and_precision() {
        let (d, used) = parse("*.*f");
        assert_eq!(used, 4);
        assert_eq!(d.width, Count::Star);
        assert_eq!(d.precision, Count::Star);
    }

    #[test]
    fn lone_dot_means_precision_zero() {
        let (d, _) = parse(".s");
        assert_eq!(d.precision, Count::Given(0));
    }

    #[test]
    fn length_modifiers() {
        assert_eq!(parse("hhd").0.length, Length::Char);
        assert_eq!(parse("hd").0.length, Length::Short);
        assert_eq!(parse("ld").0.length, Length::Long);
        assert_eq!(parse("zu").0.length, Length::Size);
        assert_eq!(parse("jd").0.length, Length::IntMax);
        assert_eq!(parse("Lf").0.length, Length::LongDouble);
    }

    #[test]
    fn unknown_conversion_is_rejected() {
        assert!(parse_directive(b"q").is_none());
        assert!(parse_directive(b"08!").is_none());
        assert!(parse_directive(b"").is_none());
    }

    #[test]
    fn oversized_width_saturates() {
        let (d, _) = parse("99999999999999999999999d");
        assert_eq!(d.width, Count::Given(usize::MAX));
    }
}
