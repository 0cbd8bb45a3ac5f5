//! crates/sshlog/src/format/printf.rs
//! Runtime `printf`-style templates rendered from typed arguments.
//!
//! Templates handed to these helpers are trusted, host-owned input. Unlike C,
//! a malformed template cannot read past the argument list: a conversion with
//! no argument left, or with an unknown conversion character, is copied to the
//! output verbatim.
//!
//! Supported: flags `- + space # 0`, field width and precision (literal or
//! `*`), the conversions `d i u o x X c s p f F e E g G` and `%%`. Length
//! modifiers (`hh h l ll j z t L q`) are accepted and ignored because every
//! [`Arg`] already carries its full-width value.

use ::core::fmt::{self, Write};
use ::core::slice;

use super::MessageBuffer;

const SCRATCH_WIDTH: usize = 160;

type Scratch = MessageBuffer<SCRATCH_WIDTH>;

/// A single argument for a `printf`-style template.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Arg<'a> {
    /// Signed integer.
    Int(i64),
    /// Unsigned integer.
    Uint(u64),
    /// Floating point value.
    Float(f64),
    /// Unicode scalar.
    Char(char),
    /// Borrowed string.
    Str(&'a str),
    /// Address rendered by `%p`.
    Ptr(usize),
    /// Boolean, rendered as `1`/`0` by numeric conversions.
    Bool(bool),
}

impl Arg<'_> {
    fn as_signed(&self) -> Option<i128> {
        match *self {
            Self::Int(value) => Some(i128::from(value)),
            Self::Uint(value) => Some(i128::from(value)),
            Self::Float(value) => Some(value as i128),
            Self::Char(value) => Some(i128::from(u32::from(value))),
            Self::Ptr(value) => Some(value as i128),
            Self::Bool(value) => Some(i128::from(value)),
            Self::Str(_) => None,
        }
    }

    fn as_unsigned(&self) -> Option<u64> {
        match *self {
            // Reinterpret like C does for `%u` of a negative int.
            Self::Int(value) => Some(value as u64),
            Self::Uint(value) => Some(value),
            Self::Float(value) => Some(value as u64),
            Self::Char(value) => Some(u64::from(u32::from(value))),
            Self::Ptr(value) => Some(value as u64),
            Self::Bool(value) => Some(u64::from(value)),
            Self::Str(_) => None,
        }
    }

    fn as_float(&self) -> Option<f64> {
        match *self {
            Self::Float(value) => Some(value),
            Self::Int(value) => Some(value as f64),
            Self::Uint(value) => Some(value as f64),
            Self::Bool(value) => Some(f64::from(u8::from(value))),
            Self::Char(_) | Self::Str(_) | Self::Ptr(_) => None,
        }
    }

    fn as_count(&self) -> Option<i64> {
        match *self {
            Self::Int(value) => Some(value),
            Self::Uint(value) => Some(i64::try_from(value).unwrap_or(i64::MAX)),
            Self::Ptr(value) => Some(i64::try_from(value).unwrap_or(i64::MAX)),
            _ => None,
        }
    }
}

impl fmt::Display for Arg<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(value) => write!(f, "{value}"),
            Self::Uint(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
            Self::Char(value) => f.write_char(*value),
            Self::Str(value) => f.write_str(value),
            Self::Ptr(value) => write!(f, "{value:#x}"),
            Self::Bool(value) => write!(f, "{value}"),
        }
    }
}

macro_rules! impl_from_for_arg {
    ($variant:ident, $target:ty; $($source:ty),* $(,)?) => {
        $(
            impl From<$source> for Arg<'_> {
                fn from(value: $source) -> Self {
                    Self::$variant(<$target>::from(value))
                }
            }
        )*
    };
}

impl_from_for_arg!(Int, i64; i8, i16, i32, i64);
impl_from_for_arg!(Uint, u64; u8, u16, u32, u64);
impl_from_for_arg!(Float, f64; f32, f64);

impl From<isize> for Arg<'_> {
    fn from(value: isize) -> Self {
        Self::Int(value as i64)
    }
}

impl From<usize> for Arg<'_> {
    fn from(value: usize) -> Self {
        Self::Uint(value as u64)
    }
}

impl From<char> for Arg<'_> {
    fn from(value: char) -> Self {
        Self::Char(value)
    }
}

impl From<bool> for Arg<'_> {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl<'a> From<&'a str> for Arg<'a> {
    fn from(value: &'a str) -> Self {
        Self::Str(value)
    }
}

impl<'a> From<&'a String> for Arg<'a> {
    fn from(value: &'a String) -> Self {
        Self::Str(value.as_str())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct Flags {
    left: bool,
    plus: bool,
    space: bool,
    alternate: bool,
    zero: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Count {
    Fixed(usize),
    FromArg,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Spec {
    flags: Flags,
    width: Option<Count>,
    precision: Option<Count>,
    conversion: char,
}

/// Parses the conversion that follows a `%`.
///
/// Returns the spec and the number of bytes consumed after the `%`, or `None`
/// when the template ends before a conversion character.
fn parse_spec(input: &str) -> Option<(Spec, usize)> {
    let bytes = input.as_bytes();
    let mut index = 0;
    let mut flags = Flags::default();

    while let Some(&byte) = bytes.get(index) {
        match byte {
            b'-' => flags.left = true,
            b'+' => flags.plus = true,
            b' ' => flags.space = true,
            b'#' => flags.alternate = true,
            b'0' => flags.zero = true,
            _ => break,
        }
        index += 1;
    }

    let (width, consumed) = parse_count(&bytes[index..]);
    index += consumed;

    let mut precision = None;
    if bytes.get(index) == Some(&b'.') {
        index += 1;
        let (count, consumed) = parse_count(&bytes[index..]);
        index += consumed;
        precision = Some(count.unwrap_or(Count::Fixed(0)));
    }

    while matches!(
        bytes.get(index),
        Some(b'h' | b'l' | b'L' | b'j' | b'z' | b't' | b'q')
    ) {
        index += 1;
    }

    let conversion = input.get(index..)?.chars().next()?;
    Some((
        Spec {
            flags,
            width,
            precision,
            conversion,
        },
        index + conversion.len_utf8(),
    ))
}

fn parse_count(bytes: &[u8]) -> (Option<Count>, usize) {
    if bytes.first() == Some(&b'*') {
        return (Some(Count::FromArg), 1);
    }

    let digits = bytes.iter().take_while(|byte| byte.is_ascii_digit()).count();
    if digits == 0 {
        return (None, 0);
    }

    let value = bytes[..digits].iter().fold(0usize, |acc, byte| {
        acc.saturating_mul(10)
            .saturating_add(usize::from(byte - b'0'))
    });
    (Some(Count::Fixed(value)), digits)
}

/// Renders `template` into `out`, substituting `args` in order.
///
/// Extra arguments are ignored. The only error is the one reported by `out`
/// itself, for example a full [`MessageBuffer`].
///
/// ```
/// use sshlog::{Arg, MessageBuffer, write_printf};
///
/// let mut buffer = MessageBuffer::<64>::new();
/// let _ = write_printf(&mut buffer, "disk %s at %3d%%", &[Arg::from("full"), Arg::from(97)]);
/// assert_eq!(buffer.as_str(), "disk full at  97%");
/// ```
pub fn write_printf<W>(out: &mut W, template: &str, args: &[Arg<'_>]) -> fmt::Result
where
    W: Write + ?Sized,
{
    let mut args = args.iter();
    let mut rest = template;

    while let Some(position) = rest.find('%') {
        out.write_str(&rest[..position])?;
        let directive = &rest[position..];

        let Some((spec, consumed)) = parse_spec(&directive[1..]) else {
            // Dangling '%' at the end of the template.
            return out.write_str(directive);
        };

        let raw = &directive[..=consumed];
        render_directive(out, spec, raw, &mut args)?;
        rest = &directive[1 + consumed..];
    }

    out.write_str(rest)
}

fn render_directive<W>(out: &mut W, spec: Spec, raw: &str, args: &mut slice::Iter<'_, Arg<'_>>) -> fmt::Result
where
    W: Write + ?Sized,
{
    if spec.conversion == '%' {
        return out.write_char('%');
    }

    if !matches!(
        spec.conversion,
        'd' | 'i' | 'u' | 'o' | 'x' | 'X' | 'c' | 's' | 'p' | 'f' | 'F' | 'e' | 'E' | 'g' | 'G'
    ) {
        return out.write_str(raw);
    }

    let mut flags = spec.flags;

    let width = match spec.width {
        None => None,
        Some(Count::Fixed(width)) => Some(width),
        Some(Count::FromArg) => {
            let Some(count) = args.next().and_then(Arg::as_count) else {
                return out.write_str(raw);
            };
            if count < 0 {
                flags.left = true;
            }
            Some(usize::try_from(count.unsigned_abs()).unwrap_or(usize::MAX))
        }
    };

    let precision = match spec.precision {
        None => None,
        Some(Count::Fixed(precision)) => Some(precision),
        Some(Count::FromArg) => {
            let Some(count) = args.next().and_then(Arg::as_count) else {
                return out.write_str(raw);
            };
            // A negative precision counts as omitted.
            usize::try_from(count).ok()
        }
    };

    let Some(arg) = args.next() else {
        return out.write_str(raw);
    };

    let field = Field {
        flags,
        width,
        precision,
    };

    match spec.conversion {
        'd' | 'i' => match arg.as_signed() {
            Some(value) => field.signed(out, value),
            None => field.text(out, arg),
        },
        'u' | 'o' | 'x' | 'X' => match arg.as_unsigned() {
            Some(value) => field.unsigned(out, value, spec.conversion),
            None => field.text(out, arg),
        },
        'c' => {
            let value = match *arg {
                Arg::Char(value) => value,
                Arg::Str(value) => value.chars().next().unwrap_or('\u{FFFD}'),
                _ => arg
                    .as_unsigned()
                    .and_then(|code| u32::try_from(code).ok())
                    .and_then(char::from_u32)
                    .unwrap_or('\u{FFFD}'),
            };
            let mut encoded = [0u8; 4];
            field.pad(out, "", "", value.encode_utf8(&mut encoded), false)
        }
        's' => field.text(out, arg),
        'p' => match arg.as_unsigned() {
            Some(value) => {
                let mut digits = Scratch::new();
                let _ = write!(digits, "{value:x}");
                field.pad(out, "", "0x", digits.as_str(), false)
            }
            None => field.text(out, arg),
        },
        _ => match arg.as_float() {
            Some(value) => field.float(out, value, spec.conversion),
            None => field.text(out, arg),
        },
    }
}

struct Field {
    flags: Flags,
    width: Option<usize>,
    precision: Option<usize>,
}

impl Field {
    fn signed<W>(&self, out: &mut W, value: i128) -> fmt::Result
    where
        W: Write + ?Sized,
    {
        let sign = if value < 0 {
            "-"
        } else if self.flags.plus {
            "+"
        } else if self.flags.space {
            " "
        } else {
            ""
        };

        let mut digits = Scratch::new();
        self.digits(&mut digits, value.unsigned_abs(), 'd');
        self.pad(out, sign, "", digits.as_str(), self.precision.is_none())
    }

    fn unsigned<W>(&self, out: &mut W, value: u64, conversion: char) -> fmt::Result
    where
        W: Write + ?Sized,
    {
        let mut digits = Scratch::new();
        self.digits(&mut digits, u128::from(value), conversion);

        let prefix = match conversion {
            'x' if self.flags.alternate && value != 0 => "0x",
            'X' if self.flags.alternate && value != 0 => "0X",
            'o' if self.flags.alternate && !digits.as_str().starts_with('0') => "0",
            _ => "",
        };
        self.pad(out, "", prefix, digits.as_str(), self.precision.is_none())
    }

    fn digits(&self, scratch: &mut Scratch, magnitude: u128, conversion: char) {
        if self.precision == Some(0) && magnitude == 0 {
            return;
        }

        let mut digits = Scratch::new();
        let _ = match conversion {
            'o' => write!(digits, "{magnitude:o}"),
            'x' => write!(digits, "{magnitude:x}"),
            'X' => write!(digits, "{magnitude:X}"),
            _ => write!(digits, "{magnitude}"),
        };

        let minimum = self.precision.unwrap_or(1);
        for _ in digits.len()..minimum {
            if scratch.write_char('0').is_err() {
                return;
            }
        }
        let _ = scratch.write_str(digits.as_str());
    }

    fn float<W>(&self, out: &mut W, value: f64, conversion: char) -> fmt::Result
    where
        W: Write + ?Sized,
    {
        let upper = conversion.is_ascii_uppercase();
        let sign = if value.is_sign_negative() && !value.is_nan() {
            "-"
        } else if self.flags.plus {
            "+"
        } else if self.flags.space {
            " "
        } else {
            ""
        };
        let magnitude = value.abs();

        if !magnitude.is_finite() {
            let body = match (magnitude.is_nan(), upper) {
                (true, false) => "nan",
                (true, true) => "NAN",
                (false, false) => "inf",
                (false, true) => "INF",
            };
            return self.pad(out, sign, "", body, false);
        }

        let precision = self.precision.unwrap_or(6);
        let mut body = Scratch::new();
        match conversion.to_ascii_lowercase() {
            'e' => write_exponential(&mut body, magnitude, precision, upper),
            'g' => write_general(&mut body, magnitude, precision, self.flags.alternate, upper),
            _ => {
                let _ = write!(body, "{magnitude:.precision$}");
            }
        }
        self.pad(out, sign, "", body.as_str(), true)
    }

    fn text<W>(&self, out: &mut W, arg: &Arg<'_>) -> fmt::Result
    where
        W: Write + ?Sized,
    {
        let mut owned = Scratch::new();
        let text = match *arg {
            Arg::Str(value) => value,
            _ => {
                let _ = write!(owned, "{arg}");
                owned.as_str()
            }
        };

        let text = match self.precision {
            Some(limit) => match text.char_indices().nth(limit) {
                Some((end, _)) => &text[..end],
                None => text,
            },
            None => text,
        };
        self.pad(out, "", "", text, false)
    }

    fn pad<W>(&self, out: &mut W, sign: &str, prefix: &str, body: &str, zero_allowed: bool) -> fmt::Result
    where
        W: Write + ?Sized,
    {
        let used = sign.len() + prefix.len() + body.chars().count();
        let fill = self.width.unwrap_or(0).saturating_sub(used);

        if self.flags.left {
            out.write_str(sign)?;
            out.write_str(prefix)?;
            out.write_str(body)?;
            repeat(out, ' ', fill)
        } else if self.flags.zero && zero_allowed {
            out.write_str(sign)?;
            out.write_str(prefix)?;
            repeat(out, '0', fill)?;
            out.write_str(body)
        } else {
            repeat(out, ' ', fill)?;
            out.write_str(sign)?;
            out.write_str(prefix)?;
            out.write_str(body)
        }
    }
}

fn repeat<W>(out: &mut W, fill: char, count: usize) -> fmt::Result
where
    W: Write + ?Sized,
{
    for _ in 0..count {
        out.write_char(fill)?;
    }
    Ok(())
}

/// Routes a `{:e}` rendering: mantissa to `mantissa`, exponent digits kept aside.
///
/// The exponent survives even when the mantissa overflows its buffer.
struct ExponentSplit<'a> {
    mantissa: &'a mut Scratch,
    exponent: MessageBuffer<8>,
    in_exponent: bool,
}

impl<'a> ExponentSplit<'a> {
    fn new(mantissa: &'a mut Scratch) -> Self {
        Self {
            mantissa,
            exponent: MessageBuffer::new(),
            in_exponent: false,
        }
    }

    fn exponent(&self) -> i32 {
        self.exponent.as_str().parse().unwrap_or(0)
    }
}

impl Write for ExponentSplit<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let (head, tail) = if self.in_exponent {
            ("", s)
        } else if let Some((head, tail)) = s.split_once('e') {
            self.in_exponent = true;
            (head, tail)
        } else {
            (s, "")
        };
        let _ = self.mantissa.write_str(head);
        self.exponent.write_str(tail)
    }
}

/// Decimal exponent of `magnitude` once rounded to `digits` decimals in `e` form.
fn decimal_exponent(magnitude: f64, digits: usize) -> i32 {
    let mut discard = Scratch::new();
    let mut split = ExponentSplit::new(&mut discard);
    let _ = write!(split, "{magnitude:.digits$e}");
    split.exponent()
}

/// Writes `magnitude` as `d.ddde+XX`, matching C's exponent layout.
fn write_exponential(body: &mut Scratch, magnitude: f64, precision: usize, upper: bool) {
    let mut split = ExponentSplit::new(body);
    let _ = write!(split, "{magnitude:.precision$e}");
    let exponent = split.exponent();

    let _ = write!(
        body,
        "{}{}{:02}",
        if upper { 'E' } else { 'e' },
        if exponent < 0 { '-' } else { '+' },
        exponent.unsigned_abs()
    );
}

/// Implements `%g`: the shorter of fixed and exponential notation.
fn write_general(body: &mut Scratch, magnitude: f64, precision: usize, alternate: bool, upper: bool) {
    let significant = precision.max(1);

    let exponent = if magnitude == 0.0 {
        0
    } else {
        decimal_exponent(magnitude, significant - 1)
    };

    let mut rendered = Scratch::new();
    let limit = i32::try_from(significant).unwrap_or(i32::MAX);
    if exponent < -4 || exponent >= limit {
        write_exponential(&mut rendered, magnitude, significant - 1, upper);
    } else {
        let decimals = usize::try_from(limit - 1 - exponent).unwrap_or(0);
        let _ = write!(rendered, "{magnitude:.decimals$}");
    }

    let text = rendered.as_str();
    if alternate || !text.contains('.') {
        let _ = body.write_str(text);
        return;
    }

    let split = text.find(['e', 'E']).unwrap_or(text.len());
    let (mantissa, exponent) = text.split_at(split);
    let mantissa = mantissa.trim_end_matches('0').trim_end_matches('.');
    let _ = body.write_str(mantissa);
    let _ = body.write_str(exponent);
}
