//! turns a polynomial written like "2x^2 + 3x - 5" into a `Polynomial`
//!
//! Whitespace is stripped first, then the text is read left to right as a chain of
//! terms. Every term but the first must start with a sign. A term is one of
//!  - `coefficient x [^exponent]`   e.g. `3x`, `-2.5x^4`
//!  - `number`                      e.g. `7`, `-0.5`
//!  - `x [^exponent]`               e.g. `x`, `-x^3`
//!
//! The tokenizer below is the only definition of the accepted language: text it
//! cannot consume completely is rejected.
use crate::polynomial::poly_engine::Polynomial;
use crate::polynomial::poly_errors::PolyError;
use nom::{
    IResult, Parser,
    branch::alt,
    character::complete::{char, digit1, one_of},
    combinator::{map, opt, recognize},
    error::{Error, ErrorKind},
    multi::many0,
    sequence::{pair, preceded},
};
use std::str::FromStr;

/// which alternative of the grammar matched a term
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TermShape {
    /// explicit coefficient times x, e.g. `3x^2`
    Scaled,
    /// free-standing number
    Constant,
    /// x without a coefficient, e.g. `-x^3`
    BareX,
}

/// a term as it was spelled in the input
#[derive(Debug, Clone, PartialEq)]
pub struct RawTerm<'a> {
    pub sign: Option<char>,
    pub shape: TermShape,
    pub coefficient: Option<&'a str>,
    pub exponent: Option<&'a str>,
}

impl RawTerm<'_> {
    /// (exponent, coefficient) of the term with the grammar defaults applied
    pub fn value(&self) -> Result<(u64, f64), PolyError> {
        let magnitude = match self.coefficient {
            Some(digits) => digits.parse::<f64>().map_err(|_| {
                PolyError::Format(format!("invalid coefficient '{}'", digits))
            })?,
            None => 1.0,
        };
        let coefficient = if self.sign == Some('-') {
            -magnitude
        } else {
            magnitude
        };
        let exponent = match (self.shape, self.exponent) {
            (TermShape::Constant, _) => 0,
            (_, None) => 1,
            // written exponents are capped at u32 so any product of two parsed
            // polynomials still fits the u64 exponents of the engine
            (_, Some(digits)) => digits.parse::<u32>().map(u64::from).map_err(|_| {
                PolyError::Format(format!("exponent out of range '{}'", digits))
            })?,
        };
        Ok((exponent, coefficient))
    }
}

/// `12`, `12.`, `12.5` or `.5`
fn unsigned_number(input: &str) -> IResult<&str, &str> {
    alt((
        recognize(pair(digit1, opt(pair(char('.'), opt(digit1))))),
        recognize(pair(char('.'), digit1)),
    ))
    .parse(input)
}

/// `x` with an optional `^digits` suffix, returns the digits
fn x_power(input: &str) -> IResult<&str, Option<&str>> {
    preceded(char('x'), opt(preceded(char('^'), digit1))).parse(input)
}

fn term(input: &str) -> IResult<&str, RawTerm<'_>> {
    let (input, sign) = opt(one_of("+-")).parse(input)?;
    // order matters: a number is only a constant when no x follows it
    let scaled = map(pair(unsigned_number, x_power), |(c, e)| {
        (TermShape::Scaled, Some(c), e)
    });
    let constant = map(unsigned_number, |c| (TermShape::Constant, Some(c), None::<&str>));
    let bare = map(x_power, |e| (TermShape::BareX, None::<&str>, e));
    let (input, (shape, coefficient, exponent)) = alt((scaled, constant, bare)).parse(input)?;
    Ok((
        input,
        RawTerm {
            sign,
            shape,
            coefficient,
            exponent,
        },
    ))
}

/// every term after the first must carry its own sign
fn signed_term(input: &str) -> IResult<&str, RawTerm<'_>> {
    let (rest, raw) = term(input)?;
    if raw.sign.is_none() {
        return Err(nom::Err::Error(Error::new(input, ErrorKind::Verify)));
    }
    Ok((rest, raw))
}

fn term_chain(input: &str) -> IResult<&str, Vec<RawTerm<'_>>> {
    let (input, (first, rest)) = pair(term, many0(signed_term)).parse(input)?;
    let mut terms = Vec::with_capacity(rest.len() + 1);
    terms.push(first);
    terms.extend(rest);
    Ok((input, terms))
}

/// splits whitespace-free text into raw terms; the whole input must be consumed
pub fn tokenize(input: &str) -> Result<Vec<RawTerm<'_>>, PolyError> {
    // a lone sign is well formed but holds no term
    if input.is_empty() || input == "+" || input == "-" {
        return Err(PolyError::Format("no valid terms found".to_string()));
    }
    match term_chain(input) {
        Ok(("", terms)) => Ok(terms),
        Ok((rest, _)) => Err(PolyError::Format(format!(
            "invalid characters at '{}'",
            rest
        ))),
        Err(_) => Err(PolyError::Format(format!(
            "invalid characters at '{}'",
            input
        ))),
    }
}

/// parses polynomial text into a coefficient map.
///
/// Terms landing on the same exponent are summed and zero sums are kept, so
/// `"3 - 3"` gives `{0: 0.0}`.
///
/// # Examples
/// ```
/// use RustedPoly::polynomial::poly_parser::parse;
/// let p = parse("2x^2 + 3x - 5").unwrap();
/// assert_eq!(p.coefficient(2), 2.0);
/// assert_eq!(p.coefficient(0), -5.0);
/// assert!(parse("abc").is_err());
/// ```
pub fn parse(text: &str) -> Result<Polynomial, PolyError> {
    let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    let raw_terms = tokenize(&compact)?;

    let mut poly = Polynomial::new();
    for raw in &raw_terms {
        let (exponent, coefficient) = raw.value()?;
        poly.accumulate(exponent, coefficient);
    }
    if poly.is_empty() {
        return Err(PolyError::Format("no valid terms found".to_string()));
    }
    Ok(poly)
}

impl FromStr for Polynomial {
    type Err = PolyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::polynomial::poly_errors::ErrorKind as PolyErrorKind;

    fn poly(terms: &[(u64, f64)]) -> Polynomial {
        Polynomial::from_terms(terms.iter().copied())
    }

    #[test]
    fn test_unsigned_number() {
        assert_eq!(unsigned_number("12x").unwrap(), ("x", "12"));
        assert_eq!(unsigned_number("2.5x").unwrap(), ("x", "2.5"));
        assert_eq!(unsigned_number("3.+x").unwrap(), ("+x", "3."));
        assert_eq!(unsigned_number(".75").unwrap(), ("", ".75"));
        // fraction digits at the very end of the input
        assert_eq!(unsigned_number("1.05").unwrap(), ("", "1.05"));
        assert_eq!(unsigned_number("12.").unwrap(), ("", "12."));
        assert!(unsigned_number(".x").is_err());
        assert!(unsigned_number("x").is_err());
    }

    #[test]
    fn test_x_power() {
        assert_eq!(x_power("x^12+1").unwrap(), ("+1", Some("12")));
        assert_eq!(x_power("x-1").unwrap(), ("-1", None));
        // a caret without digits is left unconsumed
        assert_eq!(x_power("x^").unwrap(), ("^", None));
    }

    #[test]
    fn test_term_shapes() {
        let (rest, t) = term("-3x^2+1").unwrap();
        assert_eq!(rest, "+1");
        assert_eq!(t.shape, TermShape::Scaled);
        assert_eq!(t.sign, Some('-'));
        assert_eq!(t.value().unwrap(), (2, -3.0));

        let (_, t) = term("+7").unwrap();
        assert_eq!(t.shape, TermShape::Constant);
        assert_eq!(t.value().unwrap(), (0, 7.0));

        let (_, t) = term("-x^3").unwrap();
        assert_eq!(t.shape, TermShape::BareX);
        assert_eq!(t.value().unwrap(), (3, -1.0));

        let (_, t) = term("x").unwrap();
        assert_eq!(t.value().unwrap(), (1, 1.0));
    }

    #[test]
    fn test_parse_scenario() {
        assert_eq!(
            parse("2x^2+3x-5").unwrap(),
            poly(&[(2, 2.0), (1, 3.0), (0, -5.0)])
        );
    }

    #[test]
    fn test_parse_strips_whitespace() {
        assert_eq!(
            parse("  2 x ^ 2 +\t3x  - 5 ").unwrap(),
            poly(&[(2, 2.0), (1, 3.0), (0, -5.0)])
        );
    }

    #[test]
    fn test_parse_sums_repeated_exponents() {
        assert_eq!(parse("x + x").unwrap(), poly(&[(1, 2.0)]));
        // zero sums are not pruned at parse time
        let p = parse("3 - 3").unwrap();
        assert_eq!(p.len(), 1);
        assert_eq!(p.coefficient(0), 0.0);
    }

    #[test]
    fn test_parse_defaults() {
        assert_eq!(parse("+x").unwrap(), poly(&[(1, 1.0)]));
        assert_eq!(parse("-x").unwrap(), poly(&[(1, -1.0)]));
        assert_eq!(parse("x^0").unwrap(), poly(&[(0, 1.0)]));
        assert_eq!(parse("-2x").unwrap(), poly(&[(1, -2.0)]));
        assert_eq!(parse(".5x^3-4.").unwrap(), poly(&[(3, 0.5), (0, -4.0)]));
        assert_eq!(parse("-1x^2+x").unwrap(), poly(&[(2, -1.0), (1, 1.0)]));
    }

    #[test]
    fn test_parse_trailing_fractional_constant() {
        assert_eq!(parse("3.75").unwrap(), poly(&[(0, 3.75)]));
        assert_eq!(parse("x+0.5").unwrap(), poly(&[(1, 1.0), (0, 0.5)]));
        assert_eq!(parse("x^2-2.5").unwrap(), poly(&[(2, 1.0), (0, -2.5)]));
        assert_eq!(parse("12.5").unwrap(), poly(&[(0, 12.5)]));
        assert_eq!(parse("0.0000001").unwrap(), poly(&[(0, 1e-7)]));
    }

    #[test]
    fn test_parse_leading_zero_term_kept() {
        let p = parse("0x^3 + x").unwrap();
        assert_eq!(p.len(), 2);
        assert_eq!(p.degree(), 3);
    }

    #[test]
    fn test_parse_empty_input() {
        let err = parse("").unwrap_err();
        assert_eq!(err, PolyError::Format("no valid terms found".to_string()));
        let err = parse("   \n ").unwrap_err();
        assert_eq!(err.cause(), "no valid terms found");
    }

    #[test]
    fn test_parse_lone_sign() {
        for input in ["+", "-", " - "] {
            let err = parse(input).unwrap_err();
            assert_eq!(err, PolyError::Format("no valid terms found".to_string()));
        }
        // two signs are still malformed
        assert!(parse("+-").unwrap_err().cause().starts_with("invalid characters"));
    }

    #[test]
    fn test_parse_invalid_characters() {
        for input in ["abc", "2y+1", "x^", "x^-2", "2x^2 3x", "1++x", "x*2", "."] {
            let err = parse(input).unwrap_err();
            assert_eq!(err.kind(), PolyErrorKind::Format, "input {}", input);
            assert!(
                err.cause().starts_with("invalid characters"),
                "input {} gave {}",
                input,
                err
            );
        }
    }

    #[test]
    fn test_parse_exponent_out_of_range() {
        let err = parse("x^99999999999").unwrap_err();
        assert_eq!(err.kind(), PolyErrorKind::Format);
        assert!(err.cause().starts_with("exponent out of range"));
        let p = parse("x^4294967295").unwrap();
        assert_eq!(p.degree(), u64::from(u32::MAX));
    }

    #[test]
    fn test_from_str() {
        let p: Polynomial = "x^2-1".parse().unwrap();
        assert_eq!(p, poly(&[(2, 1.0), (0, -1.0)]));
        assert!("".parse::<Polynomial>().is_err());
    }
}
