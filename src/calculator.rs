//! Calculator session: the caller side of the polynomial engine.
//!
//! Takes the operation and the raw operand strings (two polynomials, or a polynomial and
//! a value for evaluation), turns parse failures into invalid operand errors, builds the
//! message shown to the user and remembers the last result line so it can be appended
//! to the results file.
use crate::Utils::config_parser::SessionConfig;
use crate::Utils::logger::append_line;
use crate::polynomial::poly_engine::{DivisionResult, Polynomial};
use crate::polynomial::poly_errors::PolyError;
use crate::polynomial::poly_parser::parse;
use log::{info, warn};
use std::io;
use std::path::{Path, PathBuf};
use strum_macros::{Display, EnumIter, EnumString};

/// operations offered by the calculator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, EnumIter)]
#[strum(ascii_case_insensitive)]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
    Divide,
    Evaluate,
}

impl Operation {
    /// true when the second operand is a number rather than a polynomial
    pub fn takes_value(&self) -> bool {
        matches!(self, Operation::Evaluate)
    }

    /// what the second operand of this operation is, for prompts and usage errors
    pub fn second_operand(&self) -> &'static str {
        if self.takes_value() {
            "the value of x"
        } else {
            "a second polynomial"
        }
    }
}

/// what a successful calculation produced
#[derive(Debug, Clone, PartialEq)]
pub enum CalcOutcome {
    Polynomial(Polynomial),
    Division(DivisionResult),
    Value(f64),
}

impl CalcOutcome {
    /// the line shown to the user
    pub fn message(&self) -> String {
        match self {
            CalcOutcome::Polynomial(p) => format!("Result: {}", p),
            CalcOutcome::Division(d) if d.is_exact() => format!("Result: {}", d.quotient),
            CalcOutcome::Division(d) => format!(
                "Polynomials do not divide evenly. Remainder: {}",
                d.remainder
            ),
            CalcOutcome::Value(v) => format!("Result: {}", v),
        }
    }

    /// the line kept for saving; a division always keeps its quotient
    pub fn result_line(&self) -> String {
        match self {
            CalcOutcome::Division(d) => format!("Result: {}", d.quotient),
            _ => self.message(),
        }
    }

    /// polynomial to show in a term table, if any
    pub fn polynomial(&self) -> Option<&Polynomial> {
        match self {
            CalcOutcome::Polynomial(p) => Some(p),
            CalcOutcome::Division(d) => Some(&d.quotient),
            CalcOutcome::Value(_) => None,
        }
    }
}

/// parses one operand; a failed parse becomes an invalid operand error naming it
fn operand(text: &str, label: &str) -> Result<Polynomial, PolyError> {
    parse(text).map_err(|e| {
        warn!("Parsing error: {}", e);
        warn!("Invalid polynomial input for {}: {}", label, text);
        PolyError::InvalidOperand(format!("{}: {}", label, e.cause()))
    })
}

fn value(text: &str) -> Result<f64, PolyError> {
    text.trim().parse::<f64>().map_err(|_| {
        warn!("Invalid input for value: {}", text);
        PolyError::InvalidOperand(format!("value: '{}' is not a number", text.trim()))
    })
}

#[derive(Debug, Clone)]
pub struct Calculator {
    results_file: PathBuf,
    last_result: Option<String>,
}

impl Calculator {
    pub fn new(results_file: impl Into<PathBuf>) -> Self {
        Self {
            results_file: results_file.into(),
            last_result: None,
        }
    }

    pub fn from_config(config: &SessionConfig) -> Self {
        Self::new(config.results_file.clone())
    }

    pub fn results_file(&self) -> &Path {
        &self.results_file
    }

    pub fn last_result(&self) -> Option<&str> {
        self.last_result.as_deref()
    }

    /// runs one operation. `second` is the second polynomial, or the value for `Evaluate`.
    /// A failure leaves the last result untouched.
    pub fn calculate(
        &mut self,
        operation: Operation,
        first: &str,
        second: &str,
    ) -> Result<CalcOutcome, PolyError> {
        let p1 = operand(first, "Polynomial 1")?;
        let outcome = match operation {
            Operation::Add => CalcOutcome::Polynomial(p1.add(&operand(second, "Polynomial 2")?)),
            Operation::Subtract => {
                CalcOutcome::Polynomial(p1.subtract(&operand(second, "Polynomial 2")?))
            }
            Operation::Multiply => {
                CalcOutcome::Polynomial(p1.multiply(&operand(second, "Polynomial 2")?))
            }
            Operation::Divide => {
                let p2 = operand(second, "Polynomial 2")?;
                let division = p1.divide(&p2).map_err(|e| {
                    warn!("Invalid polynomial input for Polynomial 2: {} ({})", second, e);
                    e
                })?;
                CalcOutcome::Division(division)
            }
            Operation::Evaluate => CalcOutcome::Value(p1.evaluate(value(second)?)),
        };
        info!("{}: {}", operation, outcome.message());
        self.last_result = Some(outcome.result_line());
        Ok(outcome)
    }

    /// appends the last result line to the results file; Ok(false) when there is none
    pub fn save_last_result(&self) -> io::Result<bool> {
        let Some(line) = self.last_result.as_deref() else {
            warn!("No result to save");
            return Ok(false);
        };
        append_line(&self.results_file, line).map_err(|e| {
            warn!("Error writing to file: {}", e);
            e
        })?;
        info!("Result saved to {}", self.results_file.display());
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::polynomial::poly_errors::ErrorKind;
    use std::fs;
    use std::str::FromStr;
    use strum::IntoEnumIterator;
    use tempfile::tempdir;

    #[test]
    fn test_operation_from_str() {
        assert_eq!(Operation::from_str("add").unwrap(), Operation::Add);
        assert_eq!(Operation::from_str("DIVIDE").unwrap(), Operation::Divide);
        assert!(Operation::from_str("power").is_err());
        assert_eq!(Operation::iter().count(), 5);
        assert_eq!(Operation::Multiply.to_string(), "Multiply");
        assert!(Operation::Evaluate.takes_value());
        assert!(!Operation::Add.takes_value());
        assert_eq!(Operation::Evaluate.second_operand(), "the value of x");
        assert_eq!(Operation::Divide.second_operand(), "a second polynomial");
    }

    #[test]
    fn test_multiply_highest_exponents() {
        let mut calc = Calculator::new("unused.txt");
        let product = calc.calculate(Operation::Multiply, "x^4294967295", "x").unwrap();
        assert_eq!(product.message(), "Result: x^4294967296");
    }

    #[test]
    fn test_binary_operations() {
        let mut calc = Calculator::new("unused.txt");
        let sum = calc.calculate(Operation::Add, "x+1", "x-1").unwrap();
        assert_eq!(sum.message(), "Result: 2x");
        let product = calc.calculate(Operation::Multiply, "x+1", "x-1").unwrap();
        assert_eq!(product.message(), "Result: x^2 -1");
        let diff = calc.calculate(Operation::Subtract, "x^2", "x^2").unwrap();
        assert_eq!(diff.message(), "Result: 0");
        assert_eq!(calc.last_result(), Some("Result: 0"));
    }

    #[test]
    fn test_divide_messages() {
        let mut calc = Calculator::new("unused.txt");
        let exact = calc.calculate(Operation::Divide, "x^2-1", "x-1").unwrap();
        assert_eq!(exact.message(), "Result: x + 1");

        let inexact = calc.calculate(Operation::Divide, "x^2+1", "x-1").unwrap();
        assert_eq!(
            inexact.message(),
            "Polynomials do not divide evenly. Remainder: 2"
        );
        // the quotient is remembered even when the division is inexact
        assert_eq!(calc.last_result(), Some("Result: x + 1"));
    }

    #[test]
    fn test_evaluate() {
        let mut calc = Calculator::new("unused.txt");
        let outcome = calc.calculate(Operation::Evaluate, "2x^2+3x-5", " 2 ").unwrap();
        assert_eq!(outcome, CalcOutcome::Value(9.0));
        assert_eq!(outcome.message(), "Result: 9");
        assert!(outcome.polynomial().is_none());
    }

    #[test]
    fn test_invalid_operands() {
        let mut calc = Calculator::new("unused.txt");
        calc.calculate(Operation::Add, "x", "1").unwrap();

        let err = calc.calculate(Operation::Add, "abc", "x").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidOperand);
        assert!(err.cause().starts_with("Polynomial 1"));

        let err = calc.calculate(Operation::Multiply, "x", "").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidOperand);
        assert_eq!(err.cause(), "Polynomial 2: no valid terms found");

        let err = calc.calculate(Operation::Evaluate, "x", "two").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidOperand);
        assert!(err.cause().starts_with("value"));

        // failures keep the previous result
        assert_eq!(calc.last_result(), Some("Result: x + 1"));
    }

    #[test]
    fn test_divide_by_zero() {
        let mut calc = Calculator::new("unused.txt");
        let err = calc.calculate(Operation::Divide, "x^2", "3-3").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DivisionByZero);
        assert_eq!(calc.last_result(), None);
    }

    #[test]
    fn test_save_last_result() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("PolynomialResults.txt");
        let mut calc = Calculator::new(&path);
        assert!(!calc.save_last_result().unwrap());
        assert!(!path.exists());

        calc.calculate(Operation::Add, "x", "x").unwrap();
        assert!(calc.save_last_result().unwrap());
        calc.calculate(Operation::Evaluate, "x^2", "3").unwrap();
        assert!(calc.save_last_result().unwrap());

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().collect::<Vec<_>>(), vec!["Result: 2x", "Result: 9"]);
    }

    #[test]
    fn test_from_config() {
        let config = SessionConfig::default();
        let calc = Calculator::from_config(&config);
        assert_eq!(calc.results_file(), config.results_file.as_path());
    }
}
