//! Random password generator.
//!
//! Characters are drawn independently and uniformly (with replacement)
//! from the union of the selected classes.

use rand::Rng;

use crate::errors::{Result, SecurePassError};

pub const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
pub const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
pub const DIGITS: &str = "0123456789";
pub const SYMBOLS: &str = "!@#$%^&*()-_=+[]{}|;:,.<>?/";

/// Shortest password the generator will produce.
pub const MIN_LENGTH: usize = 8;

/// Longest password the generator will produce.
pub const MAX_LENGTH: usize = 32;

/// Default password length.
pub const DEFAULT_LENGTH: usize = 16;

/// Which character classes to draw from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharClasses {
    pub upper: bool,
    pub lower: bool,
    pub digits: bool,
    pub symbols: bool,
}

impl CharClasses {
    /// Every class selected.
    pub const fn all() -> Self {
        Self {
            upper: true,
            lower: true,
            digits: true,
            symbols: true,
        }
    }

    /// No class selected.
    pub const fn none() -> Self {
        Self {
            upper: false,
            lower: false,
            digits: false,
            symbols: false,
        }
    }

    /// The allowed characters, in class order.
    pub fn charset(&self) -> Vec<char> {
        [
            (self.upper, UPPERCASE),
            (self.lower, LOWERCASE),
            (self.digits, DIGITS),
            (self.symbols, SYMBOLS),
        ]
        .into_iter()
        .filter(|(selected, _)| *selected)
        .flat_map(|(_, chars)| chars.chars())
        .collect()
    }
}

impl Default for CharClasses {
    fn default() -> Self {
        Self::all()
    }
}

/// Generate a password of `length` characters.
///
/// Fails with `Validation` if `length` is outside 8..=32 and with
/// `Config` if no character class is selected.
pub fn generate(length: usize, classes: CharClasses) -> Result<String> {
    if !(MIN_LENGTH..=MAX_LENGTH).contains(&length) {
        return Err(SecurePassError::Validation(format!(
            "password length must be between {MIN_LENGTH} and {MAX_LENGTH} (got {length})"
        )));
    }

    let charset = classes.charset();
    if charset.is_empty() {
        return Err(SecurePassError::Config(
            "select at least one character type".into(),
        ));
    }

    let mut rng = rand::rng();
    Ok((0..length)
        .map(|_| charset[rng.random_range(0..charset.len())])
        .collect())
}
