/// # Polynomial engine
/// a module
/// 1) turns a String like "2x^2+3x-5" into a sparse map exponent -> coefficient
/// 2) adds, subtracts, multiplies, divides (with remainder) and evaluates such maps
/// 3) prints them back in descending order of exponents
///# Example#
/// ```
/// use RustedPoly::polynomial::poly_parser::parse;
/// let p = parse("x^2 - 1").unwrap();
/// let d = parse("x - 1").unwrap();
/// let division = p.divide(&d).unwrap();
/// assert!(division.is_exact());
/// assert_eq!(division.quotient.to_string(), "x + 1");
/// let product = &division.quotient * &d;
/// assert_eq!(product, p);
/// assert_eq!(p.evaluate(3.0), 8.0);
/// ```
/// ________________________________________________________________________________________________________________________________
pub mod poly_engine;
pub mod poly_errors;
/// descending-exponent printing and term tables
pub mod poly_format;
/// nom based tokenizer for polynomial text
pub mod poly_parser;
