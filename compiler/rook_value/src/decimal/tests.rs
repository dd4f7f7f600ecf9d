use super::*;
use num_bigint::BigInt;
use crate::errors::ErrorId;
use pretty_assertions::assert_eq;

fn dec(text: &str) -> Decimal {
    Decimal::parse(text).unwrap_or_else(|_| Decimal::zero())
}

#[test]
fn parse_keeps_scale() {
    let d = dec("1.50");
    assert_eq!(d.mantissa(), &BigInt::from(150));
    assert_eq!(d.scale(), 2);
    assert_eq!(d.to_string(), "1.50");
}

#[test]
fn parse_signs_and_bare_fraction() {
    assert_eq!(dec("-0.05").to_string(), "-0.05");
    assert_eq!(dec("+3").to_string(), "3.0");
    assert_eq!(dec(".5").to_string(), "0.5");
}

#[test]
fn parse_rejects_garbage() {
    let err = Decimal::parse("1.2.3").err().map(|e| e.id);
    assert_eq!(err, Some(ErrorId::InvalidSyntax));
    assert!(Decimal::parse("").is_err());
    assert!(Decimal::parse("-").is_err());
}

#[test]
fn parse_rejects_more_than_34_digits() {
    let text = "1".repeat(35);
    let err = Decimal::parse(&text).err().map(|e| e.id);
    assert_eq!(err, Some(ErrorId::PrecisionOverflow));
    assert!(Decimal::parse(&"9".repeat(34)).is_ok());
}

#[test]
fn leading_zeros_are_not_significant() {
    let text = format!("0.{}1", "0".repeat(20));
    assert!(Decimal::parse(&text).is_ok());
}

#[test]
fn scale_beyond_digit_limit_is_allowed() {
    let text = format!("0.{}1", "0".repeat(34));
    let tiny = Decimal::parse(&text).unwrap();
    assert_eq!(tiny.scale(), 35);
    assert_eq!(tiny.digits(), 1);
    assert_eq!(tiny.to_string(), text);
    assert!(tiny > Decimal::zero());
}

#[test]
fn zero_with_many_fraction_digits() {
    let zero = dec("0.000");
    assert!(zero.is_zero());
    assert_eq!(zero.to_string(), "0.000");
    assert_eq!(zero.normalized().to_string(), "0.0");
}

#[test]
fn equality_ignores_trailing_zero_scale() {
    assert_eq!(dec("1.0"), dec("1.00"));
    assert_ne!(dec("1.01"), dec("1.1"));
    assert!(dec("2.5") > dec("2.49"));
}

#[test]
fn add_aligns_scales() {
    let sum = dec("1.5").checked_add(&dec("0.25"));
    assert_eq!(sum.map(|d| d.to_string()).ok(), Some("1.75".to_string()));
}

#[test]
fn add_rounds_mixed_scales_to_fit() {
    let sum = dec("12345678901234567890.0")
        .checked_add(&dec("0.12345678901234567890"))
        .unwrap();
    assert_eq!(sum.digits(), MAX_DIGITS);
    assert_eq!(sum.to_string(), "12345678901234567890.12345678901235");
}

#[test]
fn sub_cancels_wide_operands() {
    let a = dec("1234567890123456789012345678901234");
    let b = dec(&format!("0.{}1", "0".repeat(33)));
    let diff = a.checked_sub(&b).unwrap();
    // The tiny operand is far below the last kept digit.
    assert_eq!(diff.to_string(), "1234567890123456789012345678901234.0");
    assert!(diff.checked_sub(&a).unwrap().is_zero());
}

#[test]
fn mul_of_wide_operands_is_exact_before_rounding() {
    let x = dec("10000000000.0000000001");
    let product = x.checked_mul(&x).unwrap();
    assert_eq!(product.to_string(), "100000000000000000002.0000000000000");
}

#[test]
fn integer_part_too_wide_overflows() {
    let big = dec(&"9".repeat(34));
    let err = big.checked_mul(&dec("10")).err().map(|e| e.id);
    assert_eq!(err, Some(ErrorId::PrecisionOverflow));
    let carry = big.checked_add(&dec("0.5")).err().map(|e| e.id);
    assert_eq!(carry, Some(ErrorId::PrecisionOverflow));
}

#[test]
fn rounding_carry_drops_a_fraction_digit() {
    let nines = dec(&format!("9.{}", "9".repeat(33)));
    let sum = nines.checked_add(&dec(&format!("0.{}5", "0".repeat(33)))).unwrap();
    assert_eq!(sum.digits(), MAX_DIGITS);
    assert_eq!(sum.to_string(), format!("10.{}", "0".repeat(32)));
}

#[test]
fn sub_and_mul() {
    assert_eq!(dec("3.0").checked_sub(&dec("0.5")).ok(), Some(dec("2.5")));
    let product = dec("1.5").checked_mul(&dec("1.5"));
    assert_eq!(product.map(|d| d.to_string()).ok(), Some("2.25".to_string()));
}

#[test]
fn div_exact_and_repeating() {
    assert_eq!(
        dec("10").checked_div(&dec("4")).map(|d| d.to_string()).ok(),
        Some("2.5".to_string())
    );
    let third = dec("1").checked_div(&dec("3")).unwrap();
    assert_eq!(third.digits(), MAX_DIGITS);
    assert_eq!(third.scale(), MAX_DIGITS);
    assert_eq!(
        dec("-2").checked_div(&dec("3")).map(|d| d.to_string()).ok(),
        Some(format!("-0.{}7", "6".repeat(33)))
    );
    assert_eq!(
        dec("1").checked_div(&dec("7")).map(|d| d.to_string()).ok(),
        Some("0.1428571428571428571428571428571429".to_string())
    );
}

#[test]
fn div_by_zero_is_math_error() {
    let err = dec("1").checked_div(&Decimal::zero()).err().map(|e| e.id);
    assert_eq!(err, Some(ErrorId::ZeroDivide));
}

#[test]
fn mul_rounds_fraction_to_fit() {
    let near_one = Decimal::new(10i128.pow(17) + 1, 17).unwrap();
    let product = near_one.checked_mul(&near_one).unwrap();
    assert_eq!(product.digits(), MAX_DIGITS);
    assert_eq!(product.scale(), 33);
    assert_eq!(product.to_string(), "1.000000000000000020000000000000000");
}

#[test]
fn rescale_rounds_half_away_from_zero() {
    assert_eq!(dec("1.25").rescale(1).map(|d| d.to_string()).ok(), Some("1.3".to_string()));
    assert_eq!(dec("-1.25").rescale(1).map(|d| d.to_string()).ok(), Some("-1.3".to_string()));
    assert_eq!(dec("1.2").rescale(3).map(|d| d.to_string()).ok(), Some("1.200".to_string()));
}

#[test]
fn integer_conversions() {
    assert_eq!(Decimal::from_i64(42).to_string(), "42.0");
    assert_eq!(dec("42.00").to_i64(), Some(42));
    assert_eq!(dec("42.5").to_i64(), None);
    assert!((dec("0.5").to_f64() - 0.5).abs() < f64::EPSILON);
}
