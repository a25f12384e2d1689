//! Keystroke filtering for form fields.

/// Filter applied to text typed into a field before it is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputRule {
    /// Stored verbatim.
    Free,
    /// ASCII digits only, optionally capped to `max` characters.
    Digits { max: Option<usize> },
}

impl InputRule {
    /// Returns the raw value a field stores for the typed `text`.
    pub fn apply(self, text: &str) -> String {
        match self {
            Self::Free => text.to_string(),
            Self::Digits { max } => {
                let digits = text.chars().filter(char::is_ascii_digit);
                match max {
                    Some(max) => digits.take(max).collect(),
                    None => digits.collect(),
                }
            }
        }
    }
}
