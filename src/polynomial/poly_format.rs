//! printing of polynomials: descending exponents, zero terms skipped,
//! `x` instead of `1x`, the zero polynomial as `0`
//!
//! Finite coefficients print in plain decimal notation, which `parse` reads back to
//! the same value. Non-finite ones (an overflowing product or quotient) print as `inf`,
//! `-inf` or `NaN`; the parser has no spelling for them, so such text does not parse.
use crate::polynomial::poly_engine::Polynomial;
use std::fmt;
use tabled::settings::Style;
use tabled::{Table, Tabled};

impl fmt::Display for Polynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut written = false;
        for (&exponent, &coefficient) in self.terms().iter().rev() {
            if coefficient == 0.0 {
                continue;
            }
            // a negative coefficient brings its own minus sign
            if written {
                f.write_str(if coefficient > 0.0 { " + " } else { " " })?;
            }
            match exponent {
                0 => write!(f, "{}", coefficient)?,
                1 if coefficient == 1.0 => f.write_str("x")?,
                1 => write!(f, "{}x", coefficient)?,
                _ if coefficient == 1.0 => write!(f, "x^{}", exponent)?,
                _ => write!(f, "{}x^{}", coefficient, exponent)?,
            }
            written = true;
        }
        if !written {
            f.write_str("0")?;
        }
        Ok(())
    }
}

#[derive(Debug, PartialEq, Tabled)]
pub struct TermRow {
    exponent: u64,
    coefficient: f64,
}

impl Polynomial {
    /// one row per stored term, highest exponent first
    pub fn term_rows(&self) -> Vec<TermRow> {
        self.terms()
            .iter()
            .rev()
            .map(|(&exponent, &coefficient)| TermRow {
                exponent,
                coefficient,
            })
            .collect()
    }

    /// pretty table of the terms for the terminal
    pub fn terms_table(&self) -> String {
        let mut table = Table::new(self.term_rows());
        table.with(Style::modern_rounded());
        table.to_string()
    }
}
