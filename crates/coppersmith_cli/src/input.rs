//! Text formats accepted on the command line
//!
//! - integer lists: `c0,c1,c2`
//! - bivariate terms: `ix,iy:c;ix,iy:c`
//! - matrices: `a,b,c;d,e,f`

use num_bigint::BigInt;
use std::str::FromStr;

use coppersmith_core::BivarPoly;

use crate::CliError;

pub fn parse_int(s: &str) -> Result<BigInt, CliError> {
    BigInt::from_str(s.trim()).map_err(|_| CliError::InvalidInteger(s.trim().to_string()))
}

pub fn parse_int_list(s: &str) -> Result<Vec<BigInt>, CliError> {
    s.split(',').filter(|t| !t.trim().is_empty()).map(parse_int).collect()
}

pub fn parse_rows(s: &str) -> Result<Vec<Vec<BigInt>>, CliError> {
    s.split(';')
        .filter(|r| !r.trim().is_empty())
        .map(parse_int_list)
        .collect()
}

pub fn parse_terms(s: &str) -> Result<BivarPoly, CliError> {
    let mut terms = Vec::new();
    for term in s.split(';').filter(|t| !t.trim().is_empty()) {
        let bad = || CliError::InvalidTerm(term.trim().to_string());
        let (exps, coeff) = term.split_once(':').ok_or_else(bad)?;
        let (ix, iy) = exps.split_once(',').ok_or_else(bad)?;
        let ix = ix.trim().parse::<i64>().map_err(|_| bad())?;
        let iy = iy.trim().parse::<i64>().map_err(|_| bad())?;
        terms.push((ix, iy, parse_int(coeff)?));
    }
    Ok(BivarPoly::from_terms(terms)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use coppersmith_core::CoppersmithError;

    #[test]
    fn test_int_list() {
        let v = parse_int_list("272889, 0,1").unwrap();
        assert_eq!(v, vec![BigInt::from(272889), BigInt::from(0), BigInt::from(1)]);
        assert!(matches!(parse_int_list("1,x"), Err(CliError::InvalidInteger(s)) if s == "x"));
    }

    #[test]
    fn test_rows() {
        let rows = parse_rows("1,2;3,4;").unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1], vec![BigInt::from(3), BigInt::from(4)]);
    }

    #[test]
    fn test_terms() {
        let f = parse_terms("2,0:1; 0,1:1; 0,0:4").unwrap();
        assert_eq!(f.coeff(2, 0), BigInt::from(1));
        assert_eq!(f.coeff(0, 0), BigInt::from(4));
        assert!(matches!(parse_terms("2:1"), Err(CliError::InvalidTerm(_))));
        assert!(matches!(
            parse_terms("-1,0:1"),
            Err(CliError::Core(CoppersmithError::NegativeExponent(-1)))
        ));
    }
}
