//! Scaled decimal numbers.
//!
//! A `Decimal` is an arbitrary-precision integer mantissa and a base-10
//! scale: `mantissa * 10^-scale`. Arithmetic is exact; the result is then
//! rounded (half away from zero) to at most [`MAX_DIGITS`] significant digits
//! by dropping fractional digits. A result whose integer part alone is wider
//! than that fails with `precision-overflow`.

use std::cmp::Ordering;
use std::fmt;

use num_bigint::BigInt;
use num_traits::{Signed, ToPrimitive, Zero};

use crate::errors::{invalid_syntax, precision_overflow, zero_divide, EvalError};

/// Maximum significant digits a decimal may carry.
pub const MAX_DIGITS: u32 = 34;

/// Scaled decimal: `mantissa * 10^-scale`.
#[derive(Clone, Debug)]
pub struct Decimal {
    mantissa: BigInt,
    scale: u32,
}

fn digit_count(mantissa: &BigInt) -> u32 {
    if mantissa.is_zero() {
        return 1;
    }
    u32::try_from(mantissa.magnitude().to_string().len()).unwrap_or(u32::MAX)
}

fn pow10(exp: u32) -> BigInt {
    BigInt::from(10u8).pow(exp)
}

/// Integer division rounding half away from zero.
fn div_round(numerator: &BigInt, divisor: &BigInt) -> BigInt {
    let quotient = numerator / divisor;
    let remainder = numerator % divisor;
    if !remainder.is_zero() && remainder.abs() * 2u32 >= divisor.abs() {
        if numerator.is_negative() == divisor.is_negative() {
            quotient + 1u32
        } else {
            quotient - 1u32
        }
    } else {
        quotient
    }
}

impl Decimal {
    /// Zero with scale 0.
    pub fn zero() -> Self {
        Decimal {
            mantissa: BigInt::zero(),
            scale: 0,
        }
    }

    /// Create a decimal, rejecting more than [`MAX_DIGITS`] significant
    /// digits. The scale itself is unbounded.
    pub fn new(mantissa: impl Into<BigInt>, scale: u32) -> Result<Self, EvalError> {
        let mantissa = mantissa.into();
        let digits = digit_count(&mantissa);
        if digits > MAX_DIGITS {
            return Err(precision_overflow(digits));
        }
        Ok(Decimal { mantissa, scale })
    }

    /// Exact conversion from an integer.
    pub fn from_i64(value: i64) -> Self {
        Decimal {
            mantissa: BigInt::from(value),
            scale: 0,
        }
    }

    /// Parse `[-+]digits[.digits]`.
    pub fn parse(text: &str) -> Result<Self, EvalError> {
        let (negative, body) = match text.as_bytes().first() {
            Some(b'-') => (true, &text[1..]),
            Some(b'+') => (false, &text[1..]),
            _ => (false, text),
        };
        let (int_part, frac_part) = body.split_once('.').unwrap_or((body, ""));
        let well_formed = !(int_part.is_empty() && frac_part.is_empty())
            && int_part.bytes().all(|b| b.is_ascii_digit())
            && frac_part.bytes().all(|b| b.is_ascii_digit());
        if !well_formed {
            return Err(invalid_syntax("decimal", text));
        }

        let digits: String = int_part.chars().chain(frac_part.chars()).collect();
        let significant = digits.trim_start_matches('0').len();
        if significant > MAX_DIGITS as usize {
            return Err(precision_overflow(
                u32::try_from(significant).unwrap_or(u32::MAX),
            ));
        }
        let magnitude = if significant == 0 {
            BigInt::zero()
        } else {
            digits
                .parse::<BigInt>()
                .map_err(|_| invalid_syntax("decimal", text))?
        };
        let scale = u32::try_from(frac_part.len()).map_err(|_| precision_overflow(u32::MAX))?;
        Decimal::new(if negative { -magnitude } else { magnitude }, scale)
    }

    /// The unscaled integer digits.
    #[inline]
    pub fn mantissa(&self) -> &BigInt {
        &self.mantissa
    }

    /// Number of digits after the decimal point.
    #[inline]
    pub fn scale(&self) -> u32 {
        self.scale
    }

    /// Whether the value is zero at any scale.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.mantissa.is_zero()
    }

    /// Significant digits in the mantissa.
    pub fn digits(&self) -> u32 {
        digit_count(&self.mantissa)
    }

    /// Negation.
    #[must_use]
    pub fn neg(&self) -> Self {
        Decimal {
            mantissa: -&self.mantissa,
            scale: self.scale,
        }
    }

    /// Drop trailing fractional zeros: `1.500` becomes `1.5`.
    #[must_use]
    pub fn normalized(&self) -> Self {
        let ten = BigInt::from(10u8);
        let mut result = self.clone();
        while result.scale > 0 && (&result.mantissa % &ten).is_zero() && !result.is_zero() {
            result.mantissa /= &ten;
            result.scale -= 1;
        }
        if result.is_zero() {
            result.scale = 0;
        }
        result
    }

    /// Re-express at `scale`, rounding when digits are dropped.
    pub fn rescale(&self, scale: u32) -> Result<Self, EvalError> {
        match scale.cmp(&self.scale) {
            Ordering::Equal => Ok(self.clone()),
            Ordering::Greater => Decimal::new(&self.mantissa * pow10(scale - self.scale), scale),
            Ordering::Less => Decimal::new(
                div_round(&self.mantissa, &pow10(self.scale - scale)),
                scale,
            ),
        }
    }

    /// Round away fractional digits until at most [`MAX_DIGITS`] remain.
    fn fit(mantissa: BigInt, scale: u32) -> Result<Self, EvalError> {
        let excess = digit_count(&mantissa).saturating_sub(MAX_DIGITS);
        let drop = excess.min(scale);
        if drop == 0 {
            return Decimal::new(mantissa, scale);
        }
        let mut mantissa = div_round(&mantissa, &pow10(drop));
        let mut scale = scale - drop;
        // Rounding up can carry into one more digit: 9.99 -> 10.0.
        if scale > 0 && digit_count(&mantissa) > MAX_DIGITS {
            mantissa /= 10u32;
            scale -= 1;
        }
        Decimal::new(mantissa, scale)
    }

    /// Both mantissas at the larger of the two scales.
    fn align(&self, other: &Decimal) -> (BigInt, BigInt, u32) {
        let scale = self.scale.max(other.scale);
        let widen = |d: &Decimal| &d.mantissa * pow10(scale - d.scale);
        (widen(self), widen(other), scale)
    }

    /// Addition, rounded to fit.
    pub fn checked_add(&self, other: &Decimal) -> Result<Self, EvalError> {
        let (a, b, scale) = self.align(other);
        Decimal::fit(a + b, scale)
    }

    /// Subtraction, rounded to fit.
    pub fn checked_sub(&self, other: &Decimal) -> Result<Self, EvalError> {
        let (a, b, scale) = self.align(other);
        Decimal::fit(a - b, scale)
    }

    /// Multiplication, rounded to fit.
    pub fn checked_mul(&self, other: &Decimal) -> Result<Self, EvalError> {
        Decimal::fit(&self.mantissa * &other.mantissa, self.scale + other.scale)
    }

    /// Division carrying up to [`MAX_DIGITS`] significant digits.
    pub fn checked_div(&self, other: &Decimal) -> Result<Self, EvalError> {
        if other.is_zero() {
            return Err(zero_divide());
        }
        // Widen until the truncated quotient has at least one digit past the
        // limit, so `fit` makes the only rounding decision.
        let extra = (MAX_DIGITS + 1 + other.digits()).saturating_sub(self.digits());
        let quotient = (&self.mantissa * pow10(extra)) / &other.mantissa;
        let scale = i64::from(self.scale) + i64::from(extra) - i64::from(other.scale);
        let (mantissa, scale) = match u32::try_from(scale) {
            Ok(scale) => (quotient, scale),
            Err(_) => {
                let shift = u32::try_from(-scale).unwrap_or(u32::MAX);
                (quotient * pow10(shift), 0)
            }
        };
        Ok(Decimal::fit(mantissa, scale)?.normalized())
    }

    /// Numeric ordering, independent of scale.
    pub fn numeric_cmp(&self, other: &Decimal) -> Ordering {
        let (a, b, _) = self.align(other);
        a.cmp(&b)
    }

    /// Nearest `f64`.
    pub fn to_f64(&self) -> f64 {
        self.to_string().parse().unwrap_or(f64::NAN)
    }

    /// The integer value, if the decimal has no fractional part and fits.
    pub fn to_i64(&self) -> Option<i64> {
        let normalized = self.normalized();
        if normalized.scale != 0 {
            return None;
        }
        normalized.mantissa.to_i64()
    }
}

impl PartialEq for Decimal {
    fn eq(&self, other: &Self) -> bool {
        self.numeric_cmp(other) == Ordering::Equal
    }
}

impl PartialOrd for Decimal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.numeric_cmp(other))
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.mantissa.is_negative() { "-" } else { "" };
        let digits = self.mantissa.magnitude().to_string();
        let scale = self.scale as usize;
        if scale == 0 {
            return write!(f, "{sign}{digits}.0");
        }
        let padded = if digits.len() <= scale {
            format!("{}{digits}", "0".repeat(scale + 1 - digits.len()))
        } else {
            digits
        };
        let (int_part, frac_part) = padded.split_at(padded.len() - scale);
        write!(f, "{sign}{int_part}.{frac_part}")
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
mod tests;
