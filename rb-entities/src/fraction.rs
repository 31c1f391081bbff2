use std::{fmt, num::ParseIntError, str::FromStr};

use thiserror::Error;

/// The Unicode character used to render vulgar fractions (e.g. `1⁄2`),
/// distinct from the ASCII slash.
pub const FRACTION_SLASH: char = '\u{2044}';

pub type FractionValue = u32;

/// An exact quantity as an integer numerator/denominator pair.
///
/// Common cooking fractions stay free of floating point error through
/// arbitrary multiply/reduce cycles.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Fraction {
    numer: FractionValue,
    denom: FractionValue,
}

impl Fraction {
    pub fn new(numer: FractionValue, denom: FractionValue) -> Self {
        debug_assert!(denom != 0);
        Self { numer, denom }
    }

    pub const fn numer(self) -> FractionValue {
        self.numer
    }

    pub const fn denom(self) -> FractionValue {
        self.denom
    }

    /// Returns the equivalent fraction in lowest terms.
    pub fn reduce(self) -> Self {
        let divisor = gcd(self.numer, self.denom);
        Self {
            numer: self.numer / divisor,
            denom: self.denom / divisor,
        }
    }

    /// Scales a plain decimal value by this fraction.
    pub fn scale_number(self, number: f64) -> f64 {
        number * f64::from(self.numer) / f64::from(self.denom)
    }

    pub fn is_identity(self) -> bool {
        self.numer == self.denom
    }
}

impl std::ops::Mul for Fraction {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self {
            numer: self.numer * rhs.numer,
            denom: self.denom * rhs.denom,
        }
    }
}

fn gcd(a: FractionValue, b: FractionValue) -> FractionValue {
    let (mut a, mut b) = (a, b);
    while b != 0 {
        let t = b;
        b = a % b;
        a = t;
    }
    a
}

impl fmt::Display for Fraction {
    /// Renders as a mixed number, e.g. `3 1⁄2`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.numer / self.denom;
        let rest = self.numer % self.denom;
        match (whole, rest) {
            (0, 0) => f.write_str("0"),
            (w, 0) => write!(f, "{w}"),
            (0, r) => write!(f, "{r}{FRACTION_SLASH}{}", self.denom),
            (w, r) => write!(f, "{w} {r}{FRACTION_SLASH}{}", self.denom),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseFractionError {
    #[error("no fraction slash found")]
    MissingSlash,
    #[error("invalid integer component")]
    Integer(#[from] ParseIntError),
    #[error("denominator is zero")]
    ZeroDenominator,
}

impl FromStr for Fraction {
    type Err = ParseFractionError;

    /// Parses `1⁄2` or the mixed form `3 1⁄2`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (numer, denom) = s
            .split_once(FRACTION_SLASH)
            .ok_or(ParseFractionError::MissingSlash)?;
        let (whole, numer) = match numer.trim().rsplit_once(' ') {
            Some((whole, numer)) => (whole.trim().parse::<FractionValue>()?, numer),
            None => (0, numer),
        };
        let numer: FractionValue = numer.trim().parse()?;
        let denom: FractionValue = denom.trim().parse()?;
        if denom == 0 {
            return Err(ParseFractionError::ZeroDenominator);
        }
        Ok(Self::new(whole * denom + numer, denom))
    }
}
