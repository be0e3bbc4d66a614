use lazy_static::lazy_static;
use std::fmt;
use thiserror::Error;

/// Hash of a declared contract class, as a `0x`-prefixed hex string.
///
/// The hash identifies the on-chain class the submitted sources are
/// matched against. It is computed by external tooling and only validated
/// here.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct ClassHash(String);

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClassHashError {
    #[error("{0} is not a valid class hash")]
    Match(String),
    #[error("Class hash regex error")]
    Regex,
}

fn class_hash_regex() -> Result<&'static regex::Regex, ClassHashError> {
    lazy_static! {
        static ref CLASS_HASH_REGEX: Result<regex::Regex, regex::Error> =
            regex::Regex::new(r"^0x[a-fA-F0-9]+$");
    }

    CLASS_HASH_REGEX.as_ref().map_err(|_| ClassHashError::Regex)
}

impl ClassHash {
    const NORMALIZED_LENGTH: usize = 66;

    /// # Errors
    ///
    /// Will fail unless `raw` is "0x" followed by at most 64 hexadecimal
    /// digits.
    pub fn new(raw: &str) -> Result<Self, ClassHashError> {
        let regex = class_hash_regex()?;

        if raw.len() <= Self::NORMALIZED_LENGTH && regex.is_match(raw) {
            Ok(Self(raw.into()))
        } else {
            Err(ClassHashError::Match(raw.to_string()))
        }
    }
}

impl fmt::Display for ClassHash {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for ClassHash {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_class_hash_normalized() {
        let valid = "0x044dc2b3239382230d8b1e943df23b96f52eebcac93efe6e8bde92f9a2f1da18";
        assert!(ClassHash::new(valid).is_ok());
    }

    #[test]
    fn test_valid_class_hash_without_leading_zeros() {
        let valid = "0x44dc2b3239382230d8b1e943df23b96f52eebcac93efe6e8bde92f9a2f1da18";
        assert!(ClassHash::new(valid).is_ok());
    }

    #[test]
    fn test_invalid_class_hash_pattern() {
        assert!(ClassHash::new("0xGHIJKLMNOP").is_err());
    }

    #[test]
    fn test_invalid_class_hash_no_prefix() {
        let raw = "1234567890abcdef1234567890abcdef1234567890abcdef1234567890abcdef";
        assert!(ClassHash::new(raw).is_err());
    }

    #[test]
    fn test_invalid_class_hash_too_long() {
        let raw = "0x044dc2b3239382230d8b1e943df23b96f52eebcac93efe6e8bde92f9a2f1da1812345";
        assert!(ClassHash::new(raw).is_err());
    }

    #[test]
    fn test_empty_class_hash() {
        assert!(ClassHash::new("").is_err());
    }

    #[test]
    fn test_class_hash_display() {
        let raw = "0x044dc2b3239382230d8b1e943df23b96f52eebcac93efe6e8bde92f9a2f1da18";
        let hash = ClassHash::new(raw).unwrap();
        assert_eq!(format!("{hash}"), raw);
    }

    #[test]
    fn test_class_hash_error_display() {
        let error = ClassHashError::Match("bogus".to_string());
        assert_eq!(format!("{error}"), "bogus is not a valid class hash");
    }
}
