use cadastro_core::{cpf_cnpj_mask_for, strip_separators, CNPJ_MASK, CPF_MASK, DATE_MASK};

const DIGITS: &str = "12345678901234";

#[test]
fn formats_full_values() {
    assert_eq!(CPF_MASK.format("12345678901"), "123.456.789-01");
    assert_eq!(CNPJ_MASK.format("12345678000199"), "12.345.678/0001-99");
    assert_eq!(DATE_MASK.format("01012020"), "01/01/2020");
}

#[test]
fn every_prefix_survives_stripping() {
    for (mask, max) in [(CPF_MASK, 11), (CNPJ_MASK, 14), (DATE_MASK, 8)] {
        for len in 0..=max {
            let raw = &DIGITS[..len];
            assert_eq!(
                strip_separators(&mask.format(raw)),
                raw,
                "mask {} len {len}",
                mask.name()
            );
        }
    }
}

#[test]
fn input_longer_than_mask_is_truncated() {
    assert_eq!(CPF_MASK.format("123456789012345"), "123.456.789-01");
    assert_eq!(DATE_MASK.format("0101202099"), "01/01/2020");
    assert_eq!(CPF_MASK.apply("123456789012345").raw(), "12345678901");
}

#[test]
fn cpf_and_cnpj_emit_separators_eagerly() {
    assert_eq!(CPF_MASK.format("123"), "123.");
    assert_eq!(CPF_MASK.format("123456789"), "123.456.789-");
    assert_eq!(CNPJ_MASK.format("12"), "12.");
}

#[test]
fn date_emits_separators_only_before_a_digit() {
    assert_eq!(DATE_MASK.format("01"), "01");
    assert_eq!(DATE_MASK.format("010"), "01/0");
    assert_eq!(DATE_MASK.format("0101"), "01/01");
    assert_eq!(DATE_MASK.format(""), "");
}

#[test]
fn raw_to_display_offsets_follow_separators() {
    let cpf = CPF_MASK.apply("12345678901");
    assert_eq!(cpf.raw_to_display(0), 0);
    assert_eq!(cpf.raw_to_display(2), 2);
    assert_eq!(cpf.raw_to_display(3), 4);
    assert_eq!(cpf.raw_to_display(9), 12);
    assert_eq!(cpf.raw_to_display(11), 14);

    let date = DATE_MASK.apply("01012020");
    assert_eq!(date.raw_to_display(2), 2);
    assert_eq!(date.raw_to_display(3), 4);
    assert_eq!(date.raw_to_display(8), 10);
}

#[test]
fn raw_offsets_round_trip_exactly() {
    for (mask, max) in [(CPF_MASK, 11), (CNPJ_MASK, 14), (DATE_MASK, 8)] {
        for len in 0..=max {
            let masked = mask.apply(&DIGITS[..len]);
            for offset in 0..=len {
                let display = masked.raw_to_display(offset);
                assert!(display <= masked.display().chars().count());
                assert_eq!(
                    masked.display_to_raw(display),
                    offset,
                    "mask {} len {len} offset {offset}",
                    mask.name()
                );
            }
        }
    }
}

#[test]
fn display_offsets_on_separators_snap_left() {
    let cnpj = CNPJ_MASK.apply("12345678000199");
    // "12.345.678/0001-99": caret right before '.' and right after it.
    assert_eq!(cnpj.display_to_raw(2), 2);
    assert_eq!(cnpj.display_to_raw(3), 2);
    assert_eq!(cnpj.display_to_raw(18), 14);
}

#[test]
fn offsets_are_clamped() {
    let date = DATE_MASK.apply("0101");
    assert_eq!(date.raw_to_display(99), 5);
    assert_eq!(date.display_to_raw(99), 4);
}

#[test]
fn cpf_cnpj_field_picks_mask_by_length() {
    assert_eq!(cpf_cnpj_mask_for(0), Some(&CPF_MASK));
    assert_eq!(cpf_cnpj_mask_for(11), Some(&CPF_MASK));
    assert_eq!(cpf_cnpj_mask_for(12), Some(&CNPJ_MASK));
    assert_eq!(cpf_cnpj_mask_for(14), Some(&CNPJ_MASK));
    assert_eq!(cpf_cnpj_mask_for(15), None);
}
