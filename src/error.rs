use crate::poly::ring::Ring;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Failures of the algebra engine. Every variant is raised where the
/// violation is detected; nothing is retried or silently skipped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("operation `{operation}` is not defined in ring {ring}")]
    UnsupportedOperation { ring: Ring, operation: &'static str },

    #[error("coefficient overflow in `{operation}` over {ring}")]
    Overflow { ring: Ring, operation: &'static str },

    #[error("invalid divisor: {0}")]
    InvalidDivisor(String),

    #[error("malformed field: {0}")]
    MalformedField(String),

    #[error("term is not divisible: {0}")]
    NotDivisible(String),

    #[error("{0} is undefined for the zero polynomial")]
    ZeroPolynomial(&'static str),

    #[error("resource exhausted after {passes} closure passes with {generators} generators")]
    ResourceExhausted { passes: usize, generators: usize },
}
