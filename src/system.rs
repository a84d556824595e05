//! Serializable description of polynomial systems, as read by the binary.
//!
//! ```json
//! {
//!   "name": "hyperbola",
//!   "ring": "integers",
//!   "order": "lex",
//!   "field": ["x", "y"],
//!   "polynomials": [
//!     [{"coefficient": 1, "exponents": [2, 0]}, {"coefficient": -1, "exponents": [0, 1]}],
//!     [{"coefficient": 1, "exponents": [1, 1]}, {"coefficient": -1, "exponents": [0, 0]}]
//!   ]
//! }
//! ```

use crate::{
    error::{Error, Result},
    groebner::{self, GroebnerConfig},
    poly::{
        field::Field,
        monomial::{DegRevLexOrder, LexOrder},
        polynomial::Polynomial,
        printer::ideal_to_string,
        ring::{Coefficient, Exponent, Ring},
        term::Term,
    },
};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use tracing::info;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderKind {
    #[default]
    Lex,
    #[serde(alias = "grevlex")]
    DegRevLex,
}

impl fmt::Display for OrderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderKind::Lex => write!(f, "lex"),
            OrderKind::DegRevLex => write!(f, "degrevlex"),
        }
    }
}

impl FromStr for OrderKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lex" | "plex" => Ok(OrderKind::Lex),
            "degrevlex" | "grevlex" => Ok(OrderKind::DegRevLex),
            other => Err(format!("unknown order `{other}`, expected `lex` or `degrevlex`")),
        }
    }
}

impl OrderKind {
    pub fn run(&self, F: &[Polynomial], config: &GroebnerConfig) -> Result<Vec<Polynomial>> {
        match self {
            OrderKind::Lex => groebner::run_with(F, &LexOrder, config),
            OrderKind::DegRevLex => groebner::run_with(F, &DegRevLexOrder, config),
        }
    }

    pub fn render(&self, basis: &[Polynomial], field: &Field) -> Result<String> {
        match self {
            OrderKind::Lex => ideal_to_string(basis, field, &LexOrder),
            OrderKind::DegRevLex => ideal_to_string(basis, field, &DegRevLexOrder),
        }
    }
}

/// One term as `coefficient / denominator * x_0^e_0 * ... * x_n^e_n`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermSpec {
    pub coefficient: i64,
    #[serde(default = "TermSpec::default_denominator")]
    pub denominator: i64,
    pub exponents: Vec<Exponent>,
}

impl TermSpec {
    fn default_denominator() -> i64 {
        1
    }

    pub fn new(coefficient: i64, exponents: Vec<Exponent>) -> Self {
        Self {
            coefficient,
            denominator: 1,
            exponents,
        }
    }

    fn to_term(&self, ring: Ring, field: &Field) -> Result<Term> {
        if self.coefficient == i64::MIN || self.denominator == i64::MIN {
            return Err(Error::Overflow {
                ring,
                operation: "normalize",
            });
        }
        if self.denominator == 0 {
            return Err(Error::UnsupportedOperation {
                ring,
                operation: "division by zero",
            });
        }
        field.term(
            ring,
            Coefficient::new(self.coefficient, self.denominator),
            self.exponents.clone(),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquationSystem {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub ring: Ring,
    #[serde(default)]
    pub order: OrderKind,
    pub field: Vec<String>,
    pub polynomials: Vec<Vec<TermSpec>>,
}

impl EquationSystem {
    pub fn field(&self) -> Result<Field> {
        Field::new(self.field.iter().cloned())
    }

    /// Builds the input polynomials over `field`, normalized in the system's ring.
    pub fn polynomials(&self, field: &Field) -> Result<Vec<Polynomial>> {
        self.polynomials
            .iter()
            .map(|terms| {
                let terms = terms
                    .iter()
                    .map(|spec| spec.to_term(self.ring, field))
                    .collect::<Result<Vec<_>>>()?;
                field.polynomial(self.ring, terms)
            })
            .collect()
    }

    pub fn solve(&self, config: &GroebnerConfig) -> Result<Solution> {
        let field = self.field()?;
        let F = self.polynomials(&field)?;
        info!(
            name = self.name.as_deref().unwrap_or("<unnamed>"),
            ring = %self.ring,
            order = %self.order,
            generators = F.len(),
            "solving system"
        );
        let basis = self.order.run(&F, config)?;
        Ok(Solution {
            name: self.name.clone(),
            field,
            order: self.order,
            basis,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    pub name: Option<String>,
    pub field: Field,
    pub order: OrderKind,
    pub basis: Vec<Polynomial>,
}

impl Solution {
    /// One basis element per line, leading term first.
    pub fn render(&self) -> Result<String> {
        self.order.render(&self.basis, &self.field)
    }
}

/// Input file contents: a single system or a batch of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SystemFile {
    Single(EquationSystem),
    Batch(Vec<EquationSystem>),
}

impl SystemFile {
    pub fn into_systems(self) -> Vec<EquationSystem> {
        match self {
            SystemFile::Single(system) => vec![system],
            SystemFile::Batch(systems) => systems,
        }
    }
}

/// Solves independent systems in parallel, keeping input order.
pub fn solve_all(systems: &[EquationSystem], config: &GroebnerConfig) -> Vec<Result<Solution>> {
    systems.par_iter().map(|system| system.solve(config)).collect()
}
