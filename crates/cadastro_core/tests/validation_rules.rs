use cadastro_core::validation::{
    CPF_CNPJ_LENGTH_MESSAGE, EMAIL_INVALID_MESSAGE, ID_REQUIRED_MESSAGE, NOME_REQUIRED_MESSAGE,
};
use cadastro_core::{collect_errors, is_submittable, validate_cliente, Cliente, ClienteField};

fn valid_cliente() -> Cliente {
    Cliente::default()
        .with_field(ClienteField::IdCliente, "000042")
        .with_field(ClienteField::Nome, "Ana Lima")
        .with_field(ClienteField::CpfCnpj, "12345678901")
        .with_field(ClienteField::EMail, "ana@example.com")
}

#[test]
fn complete_record_has_no_errors() {
    let validated = validate_cliente(&valid_cliente());
    assert!(validated.errors.is_empty());
}

#[test]
fn blank_id_and_name_yield_exactly_those_keys() {
    let cliente = valid_cliente()
        .with_field(ClienteField::IdCliente, "")
        .with_field(ClienteField::Nome, "   ");

    let validated = validate_cliente(&cliente);
    let keys = validated.errors.keys().map(String::as_str).collect::<Vec<_>>();
    assert_eq!(keys, vec!["idCliente", "nome"]);
    assert_eq!(validated.error_for("idCliente"), Some(ID_REQUIRED_MESSAGE));
    assert_eq!(validated.error_for("nome"), Some(NOME_REQUIRED_MESSAGE));
}

#[test]
fn document_length_must_be_between_11_and_14() {
    for (document, ok) in [
        ("", false),
        ("1234567890", false),
        ("12345678901", true),
        ("1234567890123", true),
        ("12345678000199", true),
        ("123456780001990", false),
    ] {
        let errors = collect_errors(&valid_cliente().with_field(ClienteField::CpfCnpj, document));
        assert_eq!(errors.get("cpfCnpj").is_none(), ok, "document `{document}`");
    }

    let errors = collect_errors(&valid_cliente().with_field(ClienteField::CpfCnpj, "123"));
    assert_eq!(errors["cpfCnpj"], CPF_CNPJ_LENGTH_MESSAGE);
}

#[test]
fn email_requires_at_sign() {
    let errors = collect_errors(&valid_cliente().with_field(ClienteField::EMail, "ana.example.com"));
    assert_eq!(errors.len(), 1);
    assert_eq!(errors["eMail"], EMAIL_INVALID_MESSAGE);
}

#[test]
fn validation_replaces_stale_errors_and_leaves_input_untouched() {
    let mut stale = valid_cliente();
    stale
        .errors
        .insert("nome".to_string(), "old message".to_string());

    let validated = validate_cliente(&stale);
    assert!(validated.errors.is_empty());
    assert_eq!(stale.errors.len(), 1);
}

#[test]
fn unit_error_keys_are_never_produced() {
    let cliente = Cliente::default().with_unidade_added();
    let errors = collect_errors(&cliente);
    assert!(errors.keys().all(|key| !key.starts_with("uc")));
}

#[test]
fn submit_precheck_needs_id_and_name_only() {
    assert!(is_submittable(
        &Cliente::default()
            .with_field(ClienteField::IdCliente, "1")
            .with_field(ClienteField::Nome, "Ana")
    ));
    assert!(!is_submittable(
        &Cliente::default().with_field(ClienteField::IdCliente, "1")
    ));
}
