use crate::{
    error::{Error, Result},
    poly::{
        monomial::Monomial,
        polynomial::Polynomial,
        ring::{Coefficient, Exponent, Ring},
        term::Term,
    },
};
use hashbrown::HashSet;

/// The ordered variable list that gives exponent positions their meaning.
///
/// A polynomial's exponent vectors are only meaningful together with the
/// field they were built against, so the field is passed explicitly wherever
/// monomials are constructed or rendered.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Field {
    names: Vec<String>,
}

impl Field {
    pub fn new<S: Into<String>>(names: impl IntoIterator<Item = S>) -> Result<Self> {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        {
            let mut seen = HashSet::with_capacity(names.len());
            for name in &names {
                if name.trim().is_empty() {
                    return Err(Error::MalformedField("empty variable name".to_owned()));
                }
                if !seen.insert(name.as_str()) {
                    return Err(Error::MalformedField(format!("duplicate variable `{name}`")));
                }
            }
        }
        Ok(Self { names })
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn name(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    pub fn check(&self, exponents: &[Exponent]) -> Result<()> {
        if exponents.len() != self.len() {
            return Err(Error::MalformedField(format!(
                "expected {} exponents, found {}",
                self.len(),
                exponents.len()
            )));
        }
        Ok(())
    }

    pub fn term(&self, ring: Ring, coefficient: Coefficient, exponents: Vec<Exponent>) -> Result<Term> {
        self.check(&exponents)?;
        Term::new(ring, coefficient, exponents)
    }

    pub fn polynomial(&self, ring: Ring, terms: Vec<Term>) -> Result<Polynomial> {
        Polynomial::new(ring, self.len(), terms)
    }

    /// The polynomial consisting of the single variable `name`.
    pub fn variable(&self, ring: Ring, name: &str) -> Result<Polynomial> {
        let index = self
            .position(name)
            .ok_or_else(|| Error::MalformedField(format!("unknown variable `{name}`")))?;
        Polynomial::from_term(
            ring,
            Term::from_monomial(ring, ring.one(), Monomial::var(index, self.len()))?,
        )
    }

    pub fn constant(&self, ring: Ring, value: Coefficient) -> Result<Polynomial> {
        Polynomial::constant(ring, value, self.len())
    }
}
