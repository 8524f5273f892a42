//! The field of rational numbers.

use std::fmt::{self, Display, Formatter};

use rand::Rng;
use rug::Rational as MultiPrecisionRational;

use super::integer::Integer;
use super::{EuclideanDomain, Field, Ring};
use crate::printer::PrintState;

/// The field of rational numbers.
pub type Q = RationalField;
/// The field of rational numbers.
pub const Q: RationalField = RationalField::new();

/// The field of rational numbers.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct RationalField;

impl RationalField {
    pub const fn new() -> RationalField {
        RationalField
    }
}

impl Display for RationalField {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("Q")
    }
}

/// An arbitrary-precision rational number, always in canonical form
/// (coprime numerator and denominator, positive denominator).
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Rational(MultiPrecisionRational);

impl Rational {
    pub fn zero() -> Rational {
        Rational(MultiPrecisionRational::new())
    }

    pub fn one() -> Rational {
        Rational(MultiPrecisionRational::from(1))
    }

    pub fn new(numerator: Integer, denominator: Integer) -> Rational {
        if denominator.is_zero() {
            panic!("rational with zero denominator: {}/0", numerator);
        }
        Rational(MultiPrecisionRational::from((
            numerator.to_large(),
            denominator.to_large(),
        )))
    }

    pub fn numerator(&self) -> Integer {
        Integer::from_large(self.0.numer().clone())
    }

    pub fn denominator(&self) -> Integer {
        Integer::from_large(self.0.denom().clone())
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn is_one(&self) -> bool {
        self.0 == 1
    }

    pub fn is_negative(&self) -> bool {
        self.0 < 0
    }
}

impl From<i64> for Rational {
    fn from(value: i64) -> Rational {
        Rational(MultiPrecisionRational::from(value))
    }
}

impl From<i32> for Rational {
    fn from(value: i32) -> Rational {
        Rational(MultiPrecisionRational::from(value))
    }
}

impl From<(i64, i64)> for Rational {
    fn from((n, d): (i64, i64)) -> Rational {
        Rational::new(Integer::from(n), Integer::from(d))
    }
}

impl From<Integer> for Rational {
    fn from(value: Integer) -> Rational {
        Rational(MultiPrecisionRational::from(value.to_large()))
    }
}

impl Display for Rational {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl fmt::Debug for Rational {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(self, f)
    }
}

impl Ring for RationalField {
    type Element = Rational;

    fn add(&self, a: &Rational, b: &Rational) -> Rational {
        Rational(MultiPrecisionRational::from(&a.0 + &b.0))
    }

    fn sub(&self, a: &Rational, b: &Rational) -> Rational {
        Rational(MultiPrecisionRational::from(&a.0 - &b.0))
    }

    fn mul(&self, a: &Rational, b: &Rational) -> Rational {
        Rational(MultiPrecisionRational::from(&a.0 * &b.0))
    }

    fn add_assign(&self, a: &mut Rational, b: &Rational) {
        a.0 += &b.0;
    }

    fn sub_assign(&self, a: &mut Rational, b: &Rational) {
        a.0 -= &b.0;
    }

    fn mul_assign(&self, a: &mut Rational, b: &Rational) {
        a.0 *= &b.0;
    }

    fn add_mul_assign(&self, a: &mut Rational, b: &Rational, c: &Rational) {
        a.0 += MultiPrecisionRational::from(&b.0 * &c.0);
    }

    fn sub_mul_assign(&self, a: &mut Rational, b: &Rational, c: &Rational) {
        a.0 -= MultiPrecisionRational::from(&b.0 * &c.0);
    }

    fn neg(&self, a: &Rational) -> Rational {
        Rational(MultiPrecisionRational::from(-&a.0))
    }

    fn zero(&self) -> Rational {
        Rational::zero()
    }

    fn one(&self) -> Rational {
        Rational::one()
    }

    fn nth(&self, n: Integer) -> Rational {
        Rational(MultiPrecisionRational::from(n.to_large()))
    }

    fn pow(&self, b: &Rational, e: u64) -> Rational {
        let e = u32::try_from(e).expect("exponent does not fit in u32");
        Rational(MultiPrecisionRational::from(rug::ops::Pow::pow(&b.0, e)))
    }

    fn is_zero(a: &Rational) -> bool {
        a.is_zero()
    }

    fn is_one(&self, a: &Rational) -> bool {
        a.is_one()
    }

    fn try_div(&self, a: &Rational, b: &Rational) -> Option<Rational> {
        if b.is_zero() {
            None
        } else {
            Some(self.div(a, b))
        }
    }

    fn sample(&self, rng: &mut impl rand::RngCore, range: (i64, i64)) -> Rational {
        let n = rng.gen_range(range.0..=range.1);
        let d = rng.gen_range(1..=range.1.abs().max(1));
        Rational::new(Integer::from(n), Integer::from(d))
    }

    fn format<W: fmt::Write>(&self, element: &Rational, state: PrintState, f: &mut W) -> fmt::Result {
        let needs_parens = if state.in_product {
            element.is_negative() || !element.denominator().is_one()
        } else {
            state.in_sum && element.is_negative()
        };
        if needs_parens {
            write!(f, "({})", element)
        } else {
            write!(f, "{}", element)
        }
    }
}

impl EuclideanDomain for RationalField {
    fn rem(&self, a: &Rational, b: &Rational) -> Rational {
        if b.is_zero() {
            panic!("rational division by zero: {} / {}", a, b);
        }
        Rational::zero()
    }

    fn quot_rem(&self, a: &Rational, b: &Rational) -> (Rational, Rational) {
        (self.div(a, b), Rational::zero())
    }

    fn gcd(&self, a: &Rational, b: &Rational) -> Rational {
        if a.is_zero() && b.is_zero() {
            Rational::zero()
        } else {
            Rational::one()
        }
    }

    fn degree(&self, a: &Rational) -> Integer {
        if a.is_zero() {
            Integer::zero()
        } else {
            Integer::one()
        }
    }

    fn is_normalized(&self, a: &Rational) -> bool {
        a.is_zero() || a.is_one()
    }

    fn normalizing_unit(&self, a: &Rational) -> Rational {
        if a.is_zero() {
            Rational::one()
        } else {
            self.inv(a)
        }
    }
}

impl Field for RationalField {
    fn div(&self, a: &Rational, b: &Rational) -> Rational {
        if b.is_zero() {
            panic!("rational division by zero: {} / {}", a, b);
        }
        Rational(MultiPrecisionRational::from(&a.0 / &b.0))
    }

    fn div_assign(&self, a: &mut Rational, b: &Rational) {
        if b.is_zero() {
            panic!("rational division by zero: {} / {}", a, b);
        }
        a.0 /= &b.0;
    }

    fn inv(&self, a: &Rational) -> Rational {
        if a.is_zero() {
            panic!("inverse of zero rational");
        }
        Rational(MultiPrecisionRational::from(a.0.recip_ref()))
    }
}
