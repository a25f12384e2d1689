//! Fixed-position separator masks.
//!
//! A mask is a table of raw-digit boundaries. A boundary `b` means "a
//! separator sits between raw digit `b` and raw digit `b + 1`".
//!
//! # Invariants
//! - `strip_separators(mask.apply(s).display()) == s` for any digit string
//!   `s` no longer than the mask.
//! - `display_to_raw(raw_to_display(o)) == o` for every raw offset `o`.
//! - Offsets are clamped to the text they index, never out of range.

/// When a separator is emitted relative to the digits around it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeparatorPlacement {
    /// Emitted right after the digit that precedes it (`"123"` -> `"123."`).
    Eager,
    /// Emitted only once a digit follows it (`"12"` -> `"12"`).
    Lazy,
}

/// Stateless digit mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DigitMask {
    name: &'static str,
    max_len: usize,
    separators: &'static [(usize, char)],
    placement: SeparatorPlacement,
}

/// `DDD.DDD.DDD-DD`
pub const CPF_MASK: DigitMask = DigitMask {
    name: "cpf",
    max_len: 11,
    separators: &[(3, '.'), (6, '.'), (9, '-')],
    placement: SeparatorPlacement::Eager,
};

/// `DD.DDD.DDD/DDDD-DD`
pub const CNPJ_MASK: DigitMask = DigitMask {
    name: "cnpj",
    max_len: 14,
    separators: &[(2, '.'), (5, '.'), (8, '/'), (12, '-')],
    placement: SeparatorPlacement::Eager,
};

/// `DD/MM/YYYY`
pub const DATE_MASK: DigitMask = DigitMask {
    name: "date",
    max_len: 8,
    separators: &[(2, '/'), (4, '/')],
    placement: SeparatorPlacement::Lazy,
};

/// Picks the mask for the combined CPF/CNPJ field by raw length.
///
/// Returns `None` past CNPJ length; input filtering makes that unreachable.
pub fn cpf_cnpj_mask_for(raw_len: usize) -> Option<&'static DigitMask> {
    match raw_len {
        0..=11 => Some(&CPF_MASK),
        12..=14 => Some(&CNPJ_MASK),
        _ => None,
    }
}

/// Keeps only ASCII digits from a display string.
pub fn strip_separators(display: &str) -> String {
    display.chars().filter(char::is_ascii_digit).collect()
}

impl DigitMask {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn max_len(&self) -> usize {
        self.max_len
    }

    pub fn placement(&self) -> SeparatorPlacement {
        self.placement
    }

    /// Formats `raw`, truncated to the mask length first.
    ///
    /// Non-digit characters are expected to be filtered by the caller; they
    /// are passed through like digits.
    pub fn format(&self, raw: &str) -> String {
        let mut display = String::with_capacity(self.max_len + self.separators.len());
        for (index, ch) in raw.chars().take(self.max_len).enumerate() {
            if self.placement == SeparatorPlacement::Lazy {
                if let Some(separator) = self.separator_at(index) {
                    display.push(separator);
                }
            }
            display.push(ch);
            if self.placement == SeparatorPlacement::Eager {
                if let Some(separator) = self.separator_at(index + 1) {
                    display.push(separator);
                }
            }
        }
        display
    }

    /// Formats `raw` and keeps both coordinate spaces for offset mapping.
    pub fn apply(&self, raw: &str) -> MaskedText {
        let raw: String = raw.chars().take(self.max_len).collect();
        let display = self.format(&raw);
        MaskedText {
            mask: *self,
            raw_len: raw.chars().count(),
            display_len: display.chars().count(),
            raw,
            display,
        }
    }

    fn separator_at(&self, boundary: usize) -> Option<char> {
        self.separators
            .iter()
            .find(|(at, _)| *at == boundary)
            .map(|(_, separator)| *separator)
    }

    /// Number of separators displayed before raw offset `offset`.
    fn separators_before_raw(&self, offset: usize) -> usize {
        self.separators
            .iter()
            .filter(|(at, _)| match self.placement {
                SeparatorPlacement::Eager => *at <= offset,
                SeparatorPlacement::Lazy => *at < offset,
            })
            .count()
    }
}

/// Result of applying a [`DigitMask`] to one raw value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaskedText {
    mask: DigitMask,
    raw: String,
    display: String,
    raw_len: usize,
    display_len: usize,
}

impl MaskedText {
    pub fn mask(&self) -> &DigitMask {
        &self.mask
    }

    /// Raw value after truncation to the mask length.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn display(&self) -> &str {
        &self.display
    }

    pub fn into_display(self) -> String {
        self.display
    }

    /// Maps a caret offset in the raw value to the display string.
    pub fn raw_to_display(&self, offset: usize) -> usize {
        let offset = offset.min(self.raw_len);
        (offset + self.mask.separators_before_raw(offset)).min(self.display_len)
    }

    /// Maps a caret offset in the display string back to the raw value.
    ///
    /// A caret sitting right before a separator stays on the digit run to its
    /// left.
    pub fn display_to_raw(&self, offset: usize) -> usize {
        let offset = offset.min(self.display_len);
        let separators_before = self
            .display
            .chars()
            .take(offset)
            .enumerate()
            .filter(|(position, _)| self.is_separator_position(*position))
            .count();
        (offset - separators_before).min(self.raw_len)
    }

    fn is_separator_position(&self, position: usize) -> bool {
        // The display position of separator k is its boundary plus the k
        // separators placed before it.
        self.mask
            .separators
            .iter()
            .enumerate()
            .any(|(k, (at, _))| at + k == position && self.separator_emitted(*at))
    }

    fn separator_emitted(&self, boundary: usize) -> bool {
        match self.mask.placement {
            SeparatorPlacement::Eager => boundary <= self.raw_len,
            SeparatorPlacement::Lazy => boundary < self.raw_len,
        }
    }
}
