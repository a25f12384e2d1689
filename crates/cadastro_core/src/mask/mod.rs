//! Masked text input helpers.
//!
//! # Responsibility
//! - Format raw digit strings into punctuated display strings (CPF, CNPJ, date).
//! - Map caret offsets between raw and display coordinates.
//! - Filter keystrokes down to the raw value a field stores.
//!
//! # Invariants
//! - Masks only insert separators; digits are never reordered or dropped
//!   below the mask length.
//! - Masks are stateless `const` tables.

mod digit_mask;
mod input;

pub use digit_mask::{
    cpf_cnpj_mask_for, strip_separators, DigitMask, MaskedText, SeparatorPlacement, CNPJ_MASK,
    CPF_MASK, DATE_MASK,
};
pub use input::InputRule;
