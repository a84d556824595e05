use crate::error::{Error, Result};
use num_integer::Integer;
use num_rational::Ratio;
use num_traits::{CheckedAdd, CheckedDiv, CheckedMul, CheckedSub, One, Zero};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Coefficients are exact rationals so that integer-ring division stays exact.
pub type Coefficient = Ratio<i64>;

pub type Exponent = u16;

/// The coefficient ring a computation session works over.
///
/// A ring is chosen once and threaded explicitly through every term and
/// polynomial constructor. It decides the canonical representative of a
/// coefficient (`normalize`) and of an exponent (`power`); all arithmetic is
/// "apply the raw operator, then normalize".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ring {
    /// Ordinary integer (and rational) arithmetic, unrestricted exponents.
    #[default]
    Integers,
    /// Integers modulo 2 with idempotent variables (`x^2 = x`), the ring
    /// Boolean equation systems are translated into.
    #[serde(rename = "mod2", alias = "integers-mod-2")]
    IntegersMod2,
}

impl Ring {
    /// Canonical representative of `value`.
    ///
    /// Over Z/2 a fraction is only meaningful when its denominator is odd
    /// (`2` is the ring's zero), and then its class is that of the numerator.
    /// `i64::MIN` is rejected in either ring so that negation and absolute
    /// values of stored coefficients cannot overflow.
    pub fn normalize(&self, value: Coefficient) -> Result<Coefficient> {
        if *value.numer() == i64::MIN || *value.denom() == i64::MIN {
            return Err(Error::Overflow {
                ring: *self,
                operation: "normalize",
            });
        }
        match self {
            Ring::Integers => Ok(value),
            Ring::IntegersMod2 => {
                if value.denom().is_even() {
                    return Err(Error::UnsupportedOperation {
                        ring: *self,
                        operation: "fraction with even denominator",
                    });
                }
                Ok(Coefficient::from_integer(value.numer().rem_euclid(2)))
            },
        }
    }

    /// A small integer constant; always representable in both rings.
    pub fn integer(&self, value: i32) -> Coefficient {
        let value = i64::from(value);
        match self {
            Ring::Integers => Coefficient::from_integer(value),
            Ring::IntegersMod2 => Coefficient::from_integer(value.rem_euclid(2)),
        }
    }

    pub fn power(&self, exponent: Exponent) -> Exponent {
        match self {
            Ring::Integers => exponent,
            Ring::IntegersMod2 => {
                if exponent == 0 {
                    0
                } else {
                    1
                }
            },
        }
    }

    pub fn zero(&self) -> Coefficient {
        Coefficient::zero()
    }

    pub fn one(&self) -> Coefficient {
        Coefficient::one()
    }

    pub fn is_zero(&self, value: &Coefficient) -> bool {
        self.normalize(*value).map_or(false, |v| v.is_zero())
    }

    pub fn is_one(&self, value: &Coefficient) -> bool {
        self.normalize(*value).map_or(false, |v| v.is_one())
    }

    fn checked(&self, operation: &'static str, value: Option<Coefficient>) -> Result<Coefficient> {
        let value = value.ok_or(Error::Overflow {
            ring: *self,
            operation,
        })?;
        self.normalize(value)
    }

    pub fn add(&self, a: &Coefficient, b: &Coefficient) -> Result<Coefficient> {
        self.checked("addition", a.checked_add(b))
    }

    pub fn subtract(&self, a: &Coefficient, b: &Coefficient) -> Result<Coefficient> {
        self.checked("subtraction", a.checked_sub(b))
    }

    pub fn multiply(&self, a: &Coefficient, b: &Coefficient) -> Result<Coefficient> {
        self.checked("multiplication", a.checked_mul(b))
    }

    pub fn negate(&self, a: &Coefficient) -> Result<Coefficient> {
        let numer = a.numer().checked_neg();
        self.checked("negation", numer.map(|n| Coefficient::new_raw(n, *a.denom())))
    }

    /// Total division; only division by the ring's zero is rejected.
    pub fn divide(&self, a: &Coefficient, b: &Coefficient) -> Result<Coefficient> {
        if self.is_zero(b) {
            return Err(Error::UnsupportedOperation {
                ring: *self,
                operation: "division by zero",
            });
        }
        self.checked("division", a.checked_div(b))
    }

    /// Least common multiple of two coefficients: the integer LCM of the
    /// numerators over the GCD of the denominators, never negative.
    pub fn lcm(&self, a: &Coefficient, b: &Coefficient) -> Result<Coefficient> {
        let (x, y) = (a.numer().abs(), b.numer().abs());
        let numer = if x == 0 || y == 0 {
            Some(0)
        } else {
            (x / x.gcd(&y)).checked_mul(y)
        };
        let denom = a.denom().gcd(b.denom());
        self.checked("lcm", numer.map(|n| Coefficient::new(n, denom)))
    }

    pub fn name(&self) -> &'static str {
        match self {
            Ring::Integers => "Z",
            Ring::IntegersMod2 => "Z/2Z",
        }
    }
}

impl fmt::Display for Ring {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Ring {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "integers" | "int" | "z" => Ok(Ring::Integers),
            "mod2" | "integers-mod-2" | "z2" | "z/2z" => Ok(Ring::IntegersMod2),
            other => Err(format!("unknown ring `{other}`, expected `integers` or `mod2`")),
        }
    }
}
