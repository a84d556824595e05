use crate::{
    error::{Error, Result},
    poly::{
        monomial::Monomial,
        ring::{Coefficient, Exponent, Ring},
    },
};
use std::fmt;

/// A coefficient times a monomial. Immutable: every operation returns a new
/// term whose coefficient and exponents are already normalized by the ring.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Term {
    coefficient: Coefficient,
    monomial: Monomial,
}

impl Term {
    pub fn new(ring: Ring, coefficient: Coefficient, exponents: Vec<Exponent>) -> Result<Self> {
        Self::from_monomial(ring, coefficient, Monomial::new(exponents))
    }

    /// Infallible constructor for small integer coefficients.
    pub fn from_integer(ring: Ring, coefficient: i32, exponents: Vec<Exponent>) -> Self {
        Self {
            coefficient: ring.integer(coefficient),
            monomial: Monomial::new(exponents).powered(ring),
        }
    }

    pub fn from_monomial(ring: Ring, coefficient: Coefficient, monomial: Monomial) -> Result<Self> {
        Ok(Self {
            coefficient: ring.normalize(coefficient)?,
            monomial: monomial.powered(ring),
        })
    }

    pub fn constant(ring: Ring, coefficient: Coefficient, num_of_vars: usize) -> Result<Self> {
        Self::from_monomial(ring, coefficient, Monomial::one(num_of_vars))
    }

    pub fn coefficient(&self) -> &Coefficient {
        &self.coefficient
    }

    pub fn monomial(&self) -> &Monomial {
        &self.monomial
    }

    pub fn num_of_vars(&self) -> usize {
        self.monomial.len()
    }

    pub fn is_zero(&self) -> bool {
        use num_traits::Zero;
        self.coefficient.is_zero()
    }

    pub fn is_constant(&self) -> bool {
        self.monomial.is_constant()
    }

    /// Monomial divisibility only; the coefficient is divided by the ring's
    /// total division operator.
    pub fn divisible_by(&self, other: &Self) -> bool {
        self.monomial.divisible_by(&other.monomial)
    }

    pub fn divide(&self, other: &Self, ring: Ring) -> Result<Self> {
        let monomial = (&self.monomial / &other.monomial)
            .ok_or_else(|| Error::NotDivisible(format!("{:?} by {:?}", self, other)))?;
        let coefficient = ring.divide(&self.coefficient, &other.coefficient)?;
        Self::from_monomial(ring, coefficient, monomial)
    }

    pub fn multiply(&self, other: &Self, ring: Ring) -> Result<Self> {
        let monomial = self
            .monomial
            .checked_mul(&other.monomial)
            .ok_or(Error::Overflow {
                ring,
                operation: "exponent",
            })?;
        Self::from_monomial(
            ring,
            ring.multiply(&self.coefficient, &other.coefficient)?,
            monomial,
        )
    }

    pub fn negate(&self, ring: Ring) -> Result<Self> {
        Ok(Self {
            coefficient: ring.negate(&self.coefficient)?,
            monomial: self.monomial.clone(),
        })
    }

    /// Least common multiple of two (leading) terms: componentwise maximum of
    /// the exponents, ring LCM of the coefficients.
    pub fn lcm(&self, other: &Self, ring: Ring) -> Result<Self> {
        Self::from_monomial(
            ring,
            ring.lcm(&self.coefficient, &other.coefficient)?,
            self.monomial.lcm(&other.monomial),
        )
    }

    pub(crate) fn into_parts(self) -> (Coefficient, Monomial) {
        (self.coefficient, self.monomial)
    }
}

impl fmt::Debug for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.monomial.is_constant() {
            write!(f, "{}", self.coefficient)
        } else {
            write!(f, "{}*{:?}", self.coefficient, self.monomial)
        }
    }
}
