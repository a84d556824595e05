pub mod field;
pub mod monomial;
pub mod polynomial;
pub mod printer;
pub mod ring;
pub mod term;
