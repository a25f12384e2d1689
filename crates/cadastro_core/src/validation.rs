//! Client record validation.
//!
//! # Responsibility
//! - Check required-field presence and simple formats on submit.
//! - Produce field-keyed messages for display next to each input.
//!
//! # Invariants
//! - Validation never mutates its input; it returns a copy with `errors`
//!   recomputed from scratch.
//! - A record is submittable only when the resulting mapping is empty.
//! - CPF/CNPJ is checked by length only; no check-digit algorithm runs.

use crate::model::cliente::{Cliente, ClienteField, FieldErrors};

pub const ID_REQUIRED_MESSAGE: &str = "ID obrigatório";
pub const NOME_REQUIRED_MESSAGE: &str = "Nome do Cliente é obrigatório";
pub const CPF_CNPJ_LENGTH_MESSAGE: &str = "CPF/CNPJ deve ter entre 11 e 14 dígitos";
pub const EMAIL_INVALID_MESSAGE: &str = "E-mail inválido";

const CPF_CNPJ_LEN_RANGE: std::ops::RangeInclusive<usize> = 11..=14;

/// Returns a copy of `cliente` with `errors` replaced by this pass's result.
pub fn validate_cliente(cliente: &Cliente) -> Cliente {
    cliente.with_errors(collect_errors(cliente))
}

/// Computes the field-keyed error mapping for `cliente`.
pub fn collect_errors(cliente: &Cliente) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if cliente.id_cliente.trim().is_empty() {
        insert(&mut errors, ClienteField::IdCliente, ID_REQUIRED_MESSAGE);
    }
    if cliente.nome.trim().is_empty() {
        insert(&mut errors, ClienteField::Nome, NOME_REQUIRED_MESSAGE);
    }
    if !CPF_CNPJ_LEN_RANGE.contains(&cliente.cpf_cnpj.chars().count()) {
        insert(&mut errors, ClienteField::CpfCnpj, CPF_CNPJ_LENGTH_MESSAGE);
    }
    if !cliente.e_mail.contains('@') {
        insert(&mut errors, ClienteField::EMail, EMAIL_INVALID_MESSAGE);
    }

    errors
}

/// Pre-check used to enable the save action before full validation runs.
pub fn is_submittable(cliente: &Cliente) -> bool {
    !cliente.id_cliente.trim().is_empty() && !cliente.nome.trim().is_empty()
}

fn insert(errors: &mut FieldErrors, field: ClienteField, message: &str) {
    errors.insert(field.key().to_string(), message.to_string());
}
