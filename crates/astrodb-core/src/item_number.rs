//! Program item numbers such as `65` or `65a`.

use std::{fmt, str::FromStr};

use crate::FieldError;

/// A program item number: a numeric part and an optional alphabetic suffix.
///
/// Ordering is natural: by number first, then by suffix, so `2 < 10 < 10a`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemNumber {
    number: u32,
    suffix: String,
}

impl ItemNumber {
    pub fn new(number: u32, suffix: impl Into<String>) -> Self {
        Self {
            number,
            suffix: suffix.into(),
        }
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn suffix(&self) -> &str {
        &self.suffix
    }
}

impl FromStr for ItemNumber {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || FieldError::InvalidItemNumber {
            field: s.to_string(),
        };
        let text = s.trim();
        let split = text
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(text.len());
        let (digits, suffix) = text.split_at(split);

        if digits.is_empty() || !suffix.chars().all(char::is_alphabetic) {
            return Err(invalid());
        }
        let number = digits.parse::<u32>().map_err(|_| invalid())?;
        Ok(Self::new(number, suffix))
    }
}

impl fmt::Display for ItemNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.number, self.suffix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!("65".parse::<ItemNumber>(), Ok(ItemNumber::new(65, "")));
        assert_eq!("65a".parse::<ItemNumber>(), Ok(ItemNumber::new(65, "a")));
        assert_eq!(" 007 ".parse::<ItemNumber>(), Ok(ItemNumber::new(7, "")));
    }

    #[test]
    fn test_parse_errors() {
        for text in ["", "a65", "12.5", "65-b", "99999999999"] {
            assert_eq!(
                text.parse::<ItemNumber>(),
                Err(FieldError::InvalidItemNumber {
                    field: text.to_string()
                }),
                "{text}"
            );
        }
    }

    #[test]
    fn test_natural_ordering() {
        let mut items: Vec<ItemNumber> = ["10a", "2", "10", "1b", "1a"]
            .iter()
            .map(|text| text.parse().unwrap())
            .collect();
        items.sort();
        let ordered: Vec<String> = items.iter().map(ToString::to_string).collect();
        assert_eq!(ordered, vec!["1a", "1b", "2", "10", "10a"]);
    }

    #[test]
    fn test_display_keeps_suffix() {
        assert_eq!(ItemNumber::new(110, "b").to_string(), "110b");
    }
}
