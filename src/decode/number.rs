use crate::decode::cursor::Cursor;
use crate::error::{Error, Result};
use crate::value::Value;

/// The lexical pieces of a numeric literal, scanned without interpreting
/// magnitude. Classification is purely lexical: a fraction or exponent
/// component makes the literal Real, otherwise it is Integer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NumberParts {
    pub positive: bool,
    pub int_digits: String,
    pub frac_digits: String,
    pub exp_positive: bool,
    pub exp_digits: String,
}

impl NumberParts {
    pub fn is_real(&self) -> bool {
        !self.frac_digits.is_empty() || !self.exp_digits.is_empty()
    }

    /// The literal reassembled from its components.
    fn literal(&self) -> String {
        let mut s = String::with_capacity(
            self.int_digits.len() + self.frac_digits.len() + self.exp_digits.len() + 4,
        );
        if !self.positive {
            s.push('-');
        }
        s.push_str(&self.int_digits);
        if !self.frac_digits.is_empty() {
            s.push('.');
            s.push_str(&self.frac_digits);
        }
        if !self.exp_digits.is_empty() {
            s.push('e');
            if !self.exp_positive {
                s.push('-');
            }
            s.push_str(&self.exp_digits);
        }
        s
    }

    /// Converts the components to any primitive integer type, failing with
    /// a range error outside `[T::MIN, T::MAX]`. A `-0` literal normalizes
    /// to `0`.
    pub fn to_integer<T>(&self) -> Result<T>
    where
        T: TryFrom<i128>,
    {
        let out_of_range = || {
            Error::range(format!(
                "the numeric value {} cannot fit into the target integer type",
                self.literal()
            ))
        };

        let mut magnitude: u128 = 0;
        for digit in self.int_digits.bytes() {
            magnitude = magnitude * 10 + u128::from(digit - b'0');
            // past every primitive target, stop before u128 itself wraps
            if magnitude > u64::MAX as u128 {
                return Err(out_of_range());
            }
        }
        let signed = if self.positive {
            magnitude as i128
        } else {
            -(magnitude as i128)
        };
        T::try_from(signed).map_err(|_| out_of_range())
    }

    pub fn to_i64(&self) -> Result<i64> {
        self.to_integer()
    }

    fn has_nonzero_mantissa(&self) -> bool {
        self.int_digits
            .bytes()
            .chain(self.frac_digits.bytes())
            .any(|d| d != b'0')
    }

    fn check_real_range(
        &self,
        infinite: bool,
        zero: bool,
        literal: &str,
        target: &str,
    ) -> Result<()> {
        if infinite {
            return Err(Error::range(format!(
                "the numeric value {literal} overflows the {target} range"
            )));
        }
        if zero && self.has_nonzero_mantissa() {
            return Err(Error::range(format!(
                "the numeric value {literal} underflows the {target} range"
            )));
        }
        Ok(())
    }

    /// Converts the components to a double with correct rounding, failing
    /// with a range error on overflow to infinity or underflow to zero.
    pub fn to_f64(&self) -> Result<f64> {
        let literal = self.literal();
        let value: f64 = literal
            .parse()
            .map_err(|_| Error::range(format!("{literal} is not a representable number")))?;
        self.check_real_range(value.is_infinite(), value == 0.0, &literal, "double")?;
        Ok(value)
    }

    /// Single-precision counterpart of [`NumberParts::to_f64`]; the
    /// narrower exponent range overflows and underflows sooner.
    pub fn to_f32(&self) -> Result<f32> {
        let literal = self.literal();
        let value: f32 = literal
            .parse()
            .map_err(|_| Error::range(format!("{literal} is not a representable number")))?;
        self.check_real_range(value.is_infinite(), value == 0.0, &literal, "float")?;
        Ok(value)
    }

    /// Converts to a [`Value`] according to the lexical classification.
    pub fn to_value(&self) -> Result<Value> {
        if self.is_real() {
            Ok(Value::Real(self.to_f64()?))
        } else {
            Ok(Value::Integer(self.to_i64()?))
        }
    }
}

fn digit_error<C: Cursor>(cursor: &mut C) -> Error {
    match cursor.try_peek() {
        Ok(None) => cursor.unexpected_ends(),
        _ => Error::parse("Expecting a numeric value", cursor.line(), cursor.column()),
    }
}

/// Appends one-or-more digits to `out`; fails when the next scalar is not
/// a digit.
fn lex_digits<C: Cursor>(cursor: &mut C, out: &mut String) -> Result<()> {
    match cursor.try_peek()? {
        Some(c) if c.is_ascii_digit() => {}
        _ => return Err(digit_error(cursor)),
    }
    while let Some(c) = cursor.try_peek()? {
        if !c.is_ascii_digit() {
            break;
        }
        out.push(cursor.advance()?);
    }
    Ok(())
}

/// Scans a numeric literal into its components, starting at the first
/// character of the literal.
///
/// The integer part is a single `0` or a nonzero digit followed by more
/// digits; after a leading `0` the scan deliberately stops, so `0123`
/// lexes as `0` and leaves `123` unconsumed for the caller to deal with.
/// A `+` sign is never part of a literal. A `.` or exponent marker with
/// no following digit fails.
pub fn lex_number<C: Cursor>(cursor: &mut C) -> Result<NumberParts> {
    let mut parts = NumberParts {
        positive: true,
        exp_positive: true,
        ..NumberParts::default()
    };

    if cursor.try_peek()? == Some('-') {
        cursor.advance()?;
        parts.positive = false;
    }

    match cursor.try_peek()? {
        Some('0') => {
            parts.int_digits.push(cursor.advance()?);
        }
        Some(c) if c.is_ascii_digit() => {
            lex_digits(cursor, &mut parts.int_digits)?;
        }
        _ => return Err(digit_error(cursor)),
    }

    if cursor.try_peek()? == Some('.') {
        cursor.advance()?;
        lex_digits(cursor, &mut parts.frac_digits)?;
    }

    if matches!(cursor.try_peek()?, Some('e') | Some('E')) {
        cursor.advance()?;
        match cursor.try_peek()? {
            Some('+') => {
                cursor.advance()?;
            }
            Some('-') => {
                cursor.advance()?;
                parts.exp_positive = false;
            }
            _ => {}
        }
        lex_digits(cursor, &mut parts.exp_digits)?;
    }

    Ok(parts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::cursor::SliceCursor;

    fn lex(input: &str) -> Result<(NumberParts, usize)> {
        let mut cursor = SliceCursor::new(input.as_bytes());
        let parts = lex_number(&mut cursor)?;
        Ok((parts, cursor.offset()))
    }

    #[rstest::rstest]
    #[case("0", true, "0", "", true, "")]
    #[case("-0", false, "0", "", true, "")]
    #[case("123", true, "123", "", true, "")]
    #[case("-987654", false, "987654", "", true, "")]
    #[case("0.5", true, "0", "5", true, "")]
    #[case("12.034", true, "12", "034", true, "")]
    #[case("1e0", true, "1", "", true, "0")]
    #[case("1E10", true, "1", "", true, "10")]
    #[case("2.5e-3", true, "2", "5", false, "3")]
    #[case("-1.25E+6", false, "1", "25", true, "6")]
    fn test_lex_components(
        #[case] input: &str,
        #[case] positive: bool,
        #[case] int_digits: &str,
        #[case] frac_digits: &str,
        #[case] exp_positive: bool,
        #[case] exp_digits: &str,
    ) {
        let (parts, used) = lex(input).unwrap();
        assert_eq!(used, input.len());
        assert_eq!(parts.positive, positive);
        assert_eq!(parts.int_digits, int_digits);
        assert_eq!(parts.frac_digits, frac_digits);
        assert_eq!(parts.exp_positive, exp_positive);
        assert_eq!(parts.exp_digits, exp_digits);
    }

    #[rstest::rstest]
    #[case("0", false)]
    #[case("123", false)]
    #[case("0.0", true)]
    #[case("1e0", true)]
    #[case("1.1e1", true)]
    fn test_lexical_classification(#[case] input: &str, #[case] real: bool) {
        let (parts, _) = lex(input).unwrap();
        assert_eq!(parts.is_real(), real);
    }

    #[rstest::rstest]
    fn test_leading_zero_stops_the_scan() {
        let (parts, used) = lex("0123").unwrap();
        assert_eq!(parts.int_digits, "0");
        assert_eq!(used, 1);

        let (parts, used) = lex("-0123").unwrap();
        assert!(!parts.positive);
        assert_eq!(parts.int_digits, "0");
        assert_eq!(used, 2);

        // a fraction attached to the leading zero is still consumed
        let (parts, used) = lex("0.25x").unwrap();
        assert_eq!(parts.frac_digits, "25");
        assert_eq!(used, 4);
    }

    #[rstest::rstest]
    #[case(".5")]
    #[case("-")]
    #[case("-x")]
    #[case("+5")]
    fn test_missing_integer_part(#[case] input: &str) {
        assert!(lex(input).is_err());
    }

    #[rstest::rstest]
    #[case("1.")]
    #[case("1.e5")]
    #[case("1e")]
    #[case("1e+")]
    #[case("1E-")]
    #[case("1e-x")]
    fn test_missing_digits_after_marker(#[case] input: &str) {
        assert!(lex(input).is_err());
    }

    #[rstest::rstest]
    fn test_to_i64_range() {
        let (parts, _) = lex("9223372036854775807").unwrap();
        assert_eq!(parts.to_i64().unwrap(), i64::MAX);

        let (parts, _) = lex("9223372036854775808").unwrap();
        assert!(parts.to_i64().unwrap_err().is_range());

        let (parts, _) = lex("-9223372036854775808").unwrap();
        assert_eq!(parts.to_i64().unwrap(), i64::MIN);

        let (parts, _) = lex("-9223372036854775809").unwrap();
        assert!(parts.to_i64().unwrap_err().is_range());

        // far past any 64-bit magnitude
        let (parts, _) = lex("99999999999999999999999999999999999999990").unwrap();
        assert!(parts.to_i64().unwrap_err().is_range());

        let (parts, _) = lex("-0").unwrap();
        assert_eq!(parts.to_i64().unwrap(), 0);
    }

    #[rstest::rstest]
    fn test_to_integer_narrow_targets() {
        let (parts, _) = lex("255").unwrap();
        assert_eq!(parts.to_integer::<u8>().unwrap(), 255u8);
        assert!(parts.to_integer::<i8>().unwrap_err().is_range());

        let (parts, _) = lex("-128").unwrap();
        assert_eq!(parts.to_integer::<i8>().unwrap(), i8::MIN);
        assert!(parts.to_integer::<u32>().unwrap_err().is_range());

        let (parts, _) = lex("18446744073709551615").unwrap();
        assert_eq!(parts.to_integer::<u64>().unwrap(), u64::MAX);
        assert!(parts.to_integer::<i64>().unwrap_err().is_range());

        let (parts, _) = lex("18446744073709551616").unwrap();
        assert!(parts.to_integer::<u64>().unwrap_err().is_range());
    }

    #[rstest::rstest]
    fn test_to_f64_conversion() {
        let (parts, _) = lex("0.0").unwrap();
        assert_eq!(parts.to_f64().unwrap(), 0.0);

        let (parts, _) = lex("2.5e-3").unwrap();
        assert_eq!(parts.to_f64().unwrap(), 0.0025);

        let (parts, _) = lex("-12.75").unwrap();
        assert_eq!(parts.to_f64().unwrap(), -12.75);

        // correctly rounded: nearest double to the decimal literal
        let (parts, _) = lex("0.1").unwrap();
        assert_eq!(parts.to_f64().unwrap(), 0.1f64);
    }

    #[rstest::rstest]
    fn test_to_f64_overflow_and_underflow() {
        let (parts, _) = lex("1e999").unwrap();
        assert!(parts.to_f64().unwrap_err().is_range());

        let (parts, _) = lex("-1e999").unwrap();
        assert!(parts.to_f64().unwrap_err().is_range());

        let (parts, _) = lex("1e-999").unwrap();
        assert!(parts.to_f64().unwrap_err().is_range());

        // a genuine zero is not an underflow
        let (parts, _) = lex("0e999").unwrap();
        assert_eq!(parts.to_f64().unwrap(), 0.0);

        let (parts, _) = lex("0.000e-999").unwrap();
        assert_eq!(parts.to_f64().unwrap(), 0.0);
    }

    #[rstest::rstest]
    fn test_to_f32_narrower_range() {
        let (parts, _) = lex("2.5").unwrap();
        assert_eq!(parts.to_f32().unwrap(), 2.5f32);

        // fits a double but not a float
        let (parts, _) = lex("3.5e38").unwrap();
        assert!(parts.to_f32().unwrap_err().is_range());
        assert_eq!(parts.to_f64().unwrap(), 3.5e38);

        let (parts, _) = lex("1e-46").unwrap();
        assert!(parts.to_f32().unwrap_err().is_range());
        assert_eq!(parts.to_f64().unwrap(), 1e-46);
    }

    #[rstest::rstest]
    fn test_to_value_classification() {
        let (parts, _) = lex("0").unwrap();
        assert_eq!(parts.to_value().unwrap(), Value::Integer(0));

        let (parts, _) = lex("1e1").unwrap();
        assert_eq!(parts.to_value().unwrap(), Value::Real(10.0));

        let (parts, _) = lex("1.1e1").unwrap();
        assert_eq!(parts.to_value().unwrap(), Value::Real(11.0));
    }
}
