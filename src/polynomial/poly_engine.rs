//! # Polynomial Engine Module
//!
//! Sparse single-variable polynomials with floating point coefficients and the exact
//! arithmetic over them: addition, subtraction, multiplication, long division with
//! remainder and numerical evaluation.
//!
//! ## Main Structures and Methods
//!
//! ### `Polynomial`
//! A map exponent -> coefficient (`BTreeMap<u64, f64>`), so terms are kept sorted by
//! exponent and the degree is the last key. The zero polynomial is the empty map.
//! Parsed exponents never exceed `u32::MAX`, so the product of two parsed polynomials
//! cannot overflow the exponent.
//! - `add`, `subtract`, `multiply` - return new polynomials pruned of zero terms
//! - `divide` - long division returning a `DivisionResult`
//! - `evaluate` - sum of `coefficient * value^exponent`
//!
//! ### `DivisionResult`
//! Quotient and remainder of a division; a non-empty remainder means the division is
//! not exact, which is not an error.
//!
//! ## Interesting Code Features
//!
//! 1. **Operator Overloading**: `&p + &q`, `&p - &q`, `&p * &q` and `-&p` work on borrowed
//!    polynomials, the operands are never consumed
//! 2. **Terminating division**: every step removes the leading term of the remainder
//!    outright, so the remainder degree strictly decreases even when floating point
//!    rounding would leave a tiny residue at that exponent
//! 3. **approx support**: `Polynomial` implements `AbsDiffEq` and `RelativeEq`, absent
//!    exponents compare as zero coefficients

use crate::polynomial::poly_errors::PolyError;
use approx::{AbsDiffEq, RelativeEq};
use log::debug;
use std::collections::BTreeMap;
use std::ops::{Add, Mul, Neg, Sub};

/// relative bound on what may be left of a leading term after a division step
pub const CANCELLATION_TOLERANCE: f64 = 1e-12;

/// Single-variable polynomial stored as exponent -> coefficient.
///
/// # Examples
/// ```
/// use RustedPoly::polynomial::poly_engine::Polynomial;
/// let p = Polynomial::from_terms([(2, 2.0), (1, 3.0), (0, -5.0)]);
/// assert_eq!(p.degree(), 2);
/// assert_eq!(p.evaluate(2.0), 9.0);
/// ```
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Polynomial {
    terms: BTreeMap<u64, f64>,
}

/// Quotient and remainder of a polynomial long division
#[derive(Clone, Debug, PartialEq)]
pub struct DivisionResult {
    pub quotient: Polynomial,
    pub remainder: Polynomial,
}

impl DivisionResult {
    /// true when the divisor divides the dividend evenly
    pub fn is_exact(&self) -> bool {
        self.remainder.is_zero()
    }
}

/// One iteration of the long division loop
#[derive(Clone, Debug, PartialEq)]
pub struct DivisionStep {
    /// degree of the remainder before the step
    pub degree_before: u64,
    /// degree of the remainder after the step, `None` when it became empty
    pub degree_after: Option<u64>,
    /// term appended to the quotient
    pub quotient_term: (u64, f64),
    /// what the subtraction left at `degree_before` before that term was dropped,
    /// zero up to rounding
    pub residue: f64,
}

impl Polynomial {
    /// the zero polynomial
    pub fn new() -> Self {
        Self {
            terms: BTreeMap::new(),
        }
    }

    /// builds a polynomial from (exponent, coefficient) pairs, summing pairs with the
    /// same exponent. Zero coefficients are kept.
    pub fn from_terms<I>(terms: I) -> Self
    where
        I: IntoIterator<Item = (u64, f64)>,
    {
        let mut poly = Self::new();
        for (exponent, coefficient) in terms {
            poly.accumulate(exponent, coefficient);
        }
        poly
    }

    /// single term polynomial coefficient*x^exponent
    pub fn monomial(exponent: u64, coefficient: f64) -> Self {
        let mut terms = BTreeMap::new();
        terms.insert(exponent, coefficient);
        Self { terms }
    }

    pub fn terms(&self) -> &BTreeMap<u64, f64> {
        &self.terms
    }

    /// coefficient at the given exponent, 0.0 when the term is absent
    pub fn coefficient(&self, exponent: u64) -> f64 {
        self.terms.get(&exponent).copied().unwrap_or(0.0)
    }

    /// highest exponent stored; 0 for the zero polynomial
    pub fn degree(&self) -> u64 {
        self.terms.keys().next_back().copied().unwrap_or(0)
    }

    /// (degree, leading coefficient), `None` for the empty polynomial
    pub fn leading_term(&self) -> Option<(u64, f64)> {
        self.terms.iter().next_back().map(|(&e, &c)| (e, c))
    }

    /// number of stored terms
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// no terms stored at all
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// empty, or every stored coefficient is zero
    pub fn is_zero(&self) -> bool {
        self.terms.values().all(|&c| c == 0.0)
    }

    /// adds `coefficient` to the term at `exponent`, creating it if needed
    pub(crate) fn accumulate(&mut self, exponent: u64, coefficient: f64) {
        *self.terms.entry(exponent).or_insert(0.0) += coefficient;
    }

    /// removes zero coefficient entries
    pub fn prune(&mut self) {
        self.terms.retain(|_, c| *c != 0.0);
    }

    fn pruned(mut self) -> Self {
        self.prune();
        self
    }

    /// per-exponent sum, zero terms pruned
    pub fn add(&self, other: &Polynomial) -> Polynomial {
        let mut sum = self.clone();
        for (&exponent, &coefficient) in &other.terms {
            sum.accumulate(exponent, coefficient);
        }
        sum.pruned()
    }

    /// per-exponent difference self - other, zero terms pruned
    pub fn subtract(&self, other: &Polynomial) -> Polynomial {
        let mut difference = self.clone();
        for (&exponent, &coefficient) in &other.terms {
            difference.accumulate(exponent, -coefficient);
        }
        difference.pruned()
    }

    /// every term of self times every term of other, products with equal exponents summed
    pub fn multiply(&self, other: &Polynomial) -> Polynomial {
        let mut product = Polynomial::new();
        for (&e1, &c1) in &self.terms {
            for (&e2, &c2) in &other.terms {
                product.accumulate(e1 + e2, c1 * c2);
            }
        }
        product.pruned()
    }

    /// polynomial long division self / divisor.
    ///
    /// Fails with `PolyError::DivisionByZero` when the divisor has no non-zero term.
    ///
    /// # Examples
    /// ```
    /// use RustedPoly::polynomial::poly_engine::Polynomial;
    /// let p = Polynomial::from_terms([(2, 1.0), (0, 1.0)]);
    /// let d = Polynomial::from_terms([(1, 1.0), (0, -1.0)]);
    /// let res = p.divide(&d).unwrap();
    /// assert_eq!(res.quotient, Polynomial::from_terms([(1, 1.0), (0, 1.0)]));
    /// assert_eq!(res.remainder, Polynomial::monomial(0, 2.0));
    /// ```
    pub fn divide(&self, divisor: &Polynomial) -> Result<DivisionResult, PolyError> {
        self.divide_with(divisor, |step| {
            debug!(
                "division step: quotient term {}x^{}, remainder degree {} -> {:?}",
                step.quotient_term.1, step.quotient_term.0, step.degree_before, step.degree_after
            )
        })
    }

    /// same as `divide`, calling `observer` after every iteration of the loop
    pub fn divide_with<F>(
        &self,
        divisor: &Polynomial,
        mut observer: F,
    ) -> Result<DivisionResult, PolyError>
    where
        F: FnMut(&DivisionStep),
    {
        // zero coefficients stored in the operands would otherwise pose as leading terms
        let divisor = divisor.clone().pruned();
        let Some((divisor_degree, divisor_lead)) = divisor.leading_term() else {
            return Err(PolyError::DivisionByZero(
                "divisor has no non-zero terms".to_string(),
            ));
        };

        let mut quotient = Polynomial::new();
        let mut remainder = self.clone().pruned();
        while let Some((remainder_degree, remainder_lead)) = remainder.leading_term() {
            if remainder_degree < divisor_degree {
                break;
            }
            let new_degree = remainder_degree - divisor_degree;
            let new_coefficient = remainder_lead / divisor_lead;
            quotient.accumulate(new_degree, new_coefficient);

            let product = Polynomial::monomial(new_degree, new_coefficient).multiply(&divisor);
            let mut next = remainder.subtract(&product);
            // the leading term must cancel up to rounding; it is then dropped so the
            // degree strictly decreases
            let residue = next.coefficient(remainder_degree);
            debug_assert!(
                !new_coefficient.is_finite()
                    || residue.abs() <= CANCELLATION_TOLERANCE * remainder_lead.abs(),
                "leading term {}x^{} not cancelled, residue {}",
                remainder_lead,
                remainder_degree,
                residue
            );
            next.terms.remove(&remainder_degree);
            remainder = next;

            observer(&DivisionStep {
                degree_before: remainder_degree,
                degree_after: remainder.leading_term().map(|(d, _)| d),
                quotient_term: (new_degree, new_coefficient),
                residue,
            });
        }

        Ok(DivisionResult {
            quotient: quotient.pruned(),
            remainder,
        })
    }

    /// sum of coefficient * value^exponent over all terms
    pub fn evaluate(&self, value: f64) -> f64 {
        self.terms
            .iter()
            .map(|(&exponent, &coefficient)| coefficient * value.powf(exponent as f64))
            .sum()
    }
}

impl Add for &Polynomial {
    type Output = Polynomial;

    fn add(self, rhs: Self) -> Polynomial {
        Polynomial::add(self, rhs)
    }
}

impl Sub for &Polynomial {
    type Output = Polynomial;

    fn sub(self, rhs: Self) -> Polynomial {
        self.subtract(rhs)
    }
}

impl Mul for &Polynomial {
    type Output = Polynomial;

    fn mul(self, rhs: Self) -> Polynomial {
        self.multiply(rhs)
    }
}

impl Neg for &Polynomial {
    type Output = Polynomial;

    fn neg(self) -> Polynomial {
        Polynomial {
            terms: self.terms.iter().map(|(&e, &c)| (e, -c)).collect(),
        }
    }
}

impl AbsDiffEq for Polynomial {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.terms
            .keys()
            .chain(other.terms.keys())
            .all(|&e| {
                self.coefficient(e)
                    .abs_diff_eq(&other.coefficient(e), epsilon)
            })
    }
}

impl RelativeEq for Polynomial {
    fn default_max_relative() -> f64 {
        f64::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: f64, max_relative: f64) -> bool {
        self.terms
            .keys()
            .chain(other.terms.keys())
            .all(|&e| {
                self.coefficient(e)
                    .relative_eq(&other.coefficient(e), epsilon, max_relative)
            })
    }
}
