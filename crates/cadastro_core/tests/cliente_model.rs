use cadastro_core::{unidade_error_key, Cliente, ClienteField, EditError, InputRule, InversorField};

#[test]
fn new_record_starts_with_one_unit_and_one_inverter() {
    let cliente = Cliente::default();

    assert!(cliente.id_cliente.is_empty());
    assert_eq!(cliente.unidade_consumidora.len(), 1);
    assert_eq!(cliente.inversores.len(), 1);
    assert!(cliente.errors.is_empty());
}

#[test]
fn with_field_returns_new_value_and_keeps_original() {
    let original = Cliente::default();
    let updated = original
        .with_field(ClienteField::Nome, "Maria Souza")
        .with_field(ClienteField::EMail, "maria@example.com");

    assert_eq!(updated.nome, "Maria Souza");
    assert_eq!(updated.e_mail, "maria@example.com");
    assert!(original.nome.is_empty());
    assert_eq!(updated.field(ClienteField::Nome), "Maria Souza");
}

#[test]
fn sub_records_append_and_edit_by_index() {
    let cliente = Cliente::default()
        .with_unidade_added()
        .with_unidade_numero(1, "4455667788")
        .unwrap()
        .with_inversor_added()
        .with_inversor_field(1, InversorField::Marca, "Growatt")
        .unwrap()
        .with_inversor_field(1, InversorField::Potencia, "5 kW")
        .unwrap();

    assert_eq!(cliente.unidade_consumidora.len(), 2);
    assert_eq!(cliente.unidade_consumidora[0].numero, "");
    assert_eq!(cliente.unidade_consumidora[1].numero, "4455667788");
    assert_eq!(cliente.inversores[1].marca, "Growatt");
    assert_eq!(cliente.inversores[1].potencia, "5 kW");
    assert_eq!(cliente.inversores[0].marca, "");
}

#[test]
fn out_of_range_sub_record_edit_is_rejected() {
    let cliente = Cliente::default();

    assert_eq!(
        cliente.with_unidade_numero(3, "1").unwrap_err(),
        EditError::UnidadeOutOfRange { index: 3, len: 1 }
    );
    assert_eq!(
        cliente
            .with_inversor_field(1, InversorField::Sn, "SN-1")
            .unwrap_err(),
        EditError::InversorOutOfRange { index: 1, len: 1 }
    );
}

#[test]
fn serialization_uses_file_field_names() {
    let cliente = Cliente::default()
        .with_field(ClienteField::IdCliente, "000123")
        .with_field(ClienteField::CpfCnpj, "12345678901")
        .with_field(ClienteField::EMail, "ana@example.com")
        .with_field(ClienteField::TrtCft, "TRT-9");

    let json = serde_json::to_value(&cliente).unwrap();
    assert_eq!(json["idCliente"], "000123");
    assert_eq!(json["cpfCnpj"], "12345678901");
    assert_eq!(json["eMail"], "ana@example.com");
    assert_eq!(json["trtCft"], "TRT-9");
    assert_eq!(json["unidadeConsumidora"][0]["numero"], "");
    assert_eq!(json["inversores"][0]["sn"], "");
    assert!(json["errors"].as_object().unwrap().is_empty());

    let decoded: Cliente = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, cliente);
}

#[test]
fn older_files_without_newer_fields_load_with_defaults() {
    let value = serde_json::json!({
        "idCliente": "7",
        "nome": "Carlos",
        "inversores": [{ "marca": "Fronius", "sn": "X1", "login": "c", "senha": "s" }],
        "campoDesconhecido": true
    });

    let cliente: Cliente = serde_json::from_value(value).unwrap();
    assert_eq!(cliente.id_cliente, "7");
    assert_eq!(cliente.inversores[0].marca, "Fronius");
    assert_eq!(cliente.inversores[0].potencia, "");
    assert_eq!(cliente.unidade_consumidora.len(), 1);
    assert!(cliente.data_nascimento.is_empty());
}

#[test]
fn field_keys_round_trip_and_rules_match_form() {
    for field in ClienteField::ALL {
        assert_eq!(ClienteField::from_key(field.key()), Some(field));
    }
    assert_eq!(ClienteField::from_key("desconhecido"), None);

    assert_eq!(
        ClienteField::IdCliente.input_rule(),
        InputRule::Digits { max: Some(6) }
    );
    assert_eq!(
        ClienteField::CpfCnpj.input_rule(),
        InputRule::Digits { max: Some(14) }
    );
    assert_eq!(
        ClienteField::DataAprovacaoVistoria.input_rule(),
        InputRule::Digits { max: Some(8) }
    );
    assert_eq!(
        ClienteField::Protocolo.input_rule(),
        InputRule::Digits { max: None }
    );
    assert_eq!(ClienteField::SenhaCelesc.input_rule(), InputRule::Free);
}

#[test]
fn reserved_unit_error_key_uses_index() {
    assert_eq!(unidade_error_key(0), "uc0");
    assert_eq!(unidade_error_key(12), "uc12");
}
