//! FFI use-case API for the desktop form shell.
//!
//! # Responsibility
//! - Expose form-session and mask functions to the UI via FRB.
//! - Flatten core types into plain UI view structs.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - One form session exists per process, created on first use.
//! - Failures come back as messages inside the response envelope.

use cadastro_core::{
    core_version as core_version_inner, cpf_cnpj_mask_for, default_log_dir, filter_clientes,
    init_logging as init_logging_inner, ping as ping_inner, resolve_data_path, unidade_error_key,
    ClienteField, ClienteSummary, DigitMask, FormConfig, FormController, InversorField,
    JsonFileClienteRepository, SubmitOutcome, CNPJ_MASK, CPF_MASK, DATE_MASK,
};
use log::warn;
use std::path::Path;
use std::sync::{Mutex, OnceLock};
use std::time::Instant;

type FormSession = FormController<JsonFileClienteRepository>;

static FORM_SESSION: OnceLock<Mutex<FormSession>> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path, or empty to log next to the data
///   file.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    let result = if log_dir.trim().is_empty() {
        resolve_data_path()
            .map_err(|err| err.to_string())
            .and_then(|data_path| {
                init_logging_inner(level.as_str(), &default_log_dir(&data_path))
                    .map_err(|err| err.to_string())
            })
    } else {
        init_logging_inner(level.as_str(), Path::new(log_dir.as_str()))
            .map_err(|err| err.to_string())
    };

    match result {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Masked value plus caret maps for one input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaskedValue {
    pub raw: String,
    pub display: String,
    /// `raw_to_display[o]` is the display caret for raw caret `o`.
    pub raw_to_display: Vec<u32>,
    /// `display_to_raw[o]` is the raw caret for display caret `o`.
    pub display_to_raw: Vec<u32>,
}

/// Formats `raw` with a named mask: `cpf`, `cnpj`, `date` or `cpf_cnpj`
/// (picked by length).
///
/// Unknown mask names and overlong `cpf_cnpj` input come back unmasked.
#[flutter_rust_bridge::frb(sync)]
pub fn mask_format(kind: String, raw: String) -> MaskedValue {
    let mask: Option<&DigitMask> = match kind.trim() {
        "cpf" => Some(&CPF_MASK),
        "cnpj" => Some(&CNPJ_MASK),
        "date" => Some(&DATE_MASK),
        "cpf_cnpj" => cpf_cnpj_mask_for(raw.chars().count()),
        _ => None,
    };

    match mask {
        Some(mask) => {
            let masked = mask.apply(&raw);
            let raw_len = masked.raw().chars().count();
            let display_len = masked.display().chars().count();
            MaskedValue {
                raw: masked.raw().to_string(),
                display: masked.display().to_string(),
                raw_to_display: (0..=raw_len)
                    .map(|offset| to_u32(masked.raw_to_display(offset)))
                    .collect(),
                display_to_raw: (0..=display_len)
                    .map(|offset| to_u32(masked.display_to_raw(offset)))
                    .collect(),
            }
        }
        None => {
            let identity = (0..=raw.chars().count()).map(to_u32).collect::<Vec<_>>();
            MaskedValue {
                display: raw.clone(),
                raw,
                raw_to_display: identity.clone(),
                display_to_raw: identity,
            }
        }
    }
}

/// One scalar input of the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormFieldView {
    pub key: String,
    pub raw: String,
    pub display: String,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnidadeView {
    pub numero: String,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InversorView {
    pub marca: String,
    pub potencia: String,
    pub sn: String,
    pub login: String,
    pub senha: String,
}

/// Full form state for one render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSnapshot {
    pub fields: Vec<FormFieldView>,
    pub unidades: Vec<UnidadeView>,
    pub inversores: Vec<InversorView>,
    pub can_submit: bool,
    pub editing_existing: bool,
    pub search_query: String,
    /// Transient message, present only within its display window.
    pub notification: Option<String>,
}

/// Response envelope for form actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormResponse {
    pub ok: bool,
    pub message: String,
    pub snapshot: Option<FormSnapshot>,
}

impl FormResponse {
    fn success(message: impl Into<String>, snapshot: FormSnapshot) -> Self {
        Self {
            ok: true,
            message: message.into(),
            snapshot: Some(snapshot),
        }
    }

    fn failure(message: impl Into<String>, snapshot: Option<FormSnapshot>) -> Self {
        Self {
            ok: false,
            message: message.into(),
            snapshot,
        }
    }
}

/// List row for the client selection view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClienteListItem {
    pub id_cliente: String,
    pub title: String,
    pub caption: String,
}

/// Returns the current form state.
#[flutter_rust_bridge::frb(sync)]
pub fn form_snapshot() -> FormResponse {
    run_form_action("form_snapshot", |form| Ok((String::new(), snapshot(form))))
}

/// Starts a new empty record.
#[flutter_rust_bridge::frb(sync)]
pub fn form_reset() -> FormResponse {
    run_form_action("form_reset", |form| {
        form.reset();
        Ok((String::new(), snapshot(form)))
    })
}

/// Applies typed text to a scalar field identified by its JSON key.
#[flutter_rust_bridge::frb(sync)]
pub fn form_edit_field(key: String, text: String) -> FormResponse {
    run_form_action("form_edit_field", |form| {
        let field =
            ClienteField::from_key(key.trim()).ok_or_else(|| format!("unknown field `{key}`"))?;
        form.edit_field(field, &text);
        Ok((String::new(), snapshot(form)))
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn form_add_unidade() -> FormResponse {
    run_form_action("form_add_unidade", |form| {
        form.add_unidade();
        Ok((String::new(), snapshot(form)))
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn form_edit_unidade(index: u32, numero: String) -> FormResponse {
    run_form_action("form_edit_unidade", |form| {
        form.edit_unidade(index as usize, &numero)
            .map_err(|err| err.to_string())?;
        Ok((String::new(), snapshot(form)))
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn form_add_inversor() -> FormResponse {
    run_form_action("form_add_inversor", |form| {
        form.add_inversor();
        Ok((String::new(), snapshot(form)))
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn form_edit_inversor(index: u32, key: String, text: String) -> FormResponse {
    run_form_action("form_edit_inversor", |form| {
        let field = InversorField::from_key(key.trim())
            .ok_or_else(|| format!("unknown inverter field `{key}`"))?;
        form.edit_inversor(index as usize, field, &text)
            .map_err(|err| err.to_string())?;
        Ok((String::new(), snapshot(form)))
    })
}

/// Loads a stored record by id (zero-padded) or exact name.
#[flutter_rust_bridge::frb(sync)]
pub fn form_select(query: String) -> FormResponse {
    run_form_action("form_select", |form| {
        if form.select_by_query(query.trim()) {
            Ok(("Cliente carregado.".to_string(), snapshot(form)))
        } else {
            Err("Cliente não encontrado.".to_string())
        }
    })
}

/// Validates and saves the current record.
///
/// `ok` is `false` for validation rejections and save failures; the
/// snapshot carries the per-field errors either way.
#[flutter_rust_bridge::frb(sync)]
pub fn form_submit() -> FormResponse {
    let session = match form_session() {
        Ok(session) => session,
        Err(err) => return FormResponse::failure(format!("form_submit failed: {err}"), None),
    };
    let Ok(mut form) = session.lock() else {
        return FormResponse::failure("form_submit failed: form session lock poisoned", None);
    };

    match form.submit() {
        Ok(SubmitOutcome::Saved(_)) => {
            let message = current_notification(&mut form);
            FormResponse::success(message, snapshot(&mut form))
        }
        Ok(SubmitOutcome::Rejected { .. }) => {
            let message = current_notification(&mut form);
            FormResponse::failure(message, Some(snapshot(&mut form)))
        }
        Err(err) => {
            warn!("event=ffi_call module=ffi call=form_submit status=error error={err}");
            FormResponse::failure(err.to_string(), Some(snapshot(&mut form)))
        }
    }
}

/// Filters the cached client list for the selection view.
///
/// Returns an empty list when the session cannot be opened.
#[flutter_rust_bridge::frb(sync)]
pub fn clientes_search(query: String) -> Vec<ClienteListItem> {
    let Ok(session) = form_session() else {
        return Vec::new();
    };
    let Ok(form) = session.lock() else {
        return Vec::new();
    };

    filter_clientes(form.clientes(), &query)
        .into_iter()
        .map(|cliente| to_list_item(ClienteSummary::from(cliente)))
        .collect()
}

fn form_session() -> Result<&'static Mutex<FormSession>, String> {
    if let Some(session) = FORM_SESSION.get() {
        return Ok(session);
    }
    let data_path = resolve_data_path().map_err(|err| err.to_string())?;
    let form = FormController::open(
        JsonFileClienteRepository::new(data_path),
        FormConfig::default(),
    );
    Ok(FORM_SESSION.get_or_init(|| Mutex::new(form)))
}

fn run_form_action(
    call: &str,
    f: impl FnOnce(&mut FormSession) -> Result<(String, FormSnapshot), String>,
) -> FormResponse {
    let session = match form_session() {
        Ok(session) => session,
        Err(err) => return FormResponse::failure(format!("{call} failed: {err}"), None),
    };
    let Ok(mut form) = session.lock() else {
        return FormResponse::failure(format!("{call} failed: form session lock poisoned"), None);
    };

    match f(&mut form) {
        Ok((message, snapshot)) => FormResponse::success(message, snapshot),
        Err(err) => {
            warn!("event=ffi_call module=ffi call={call} status=error");
            FormResponse::failure(err, Some(snapshot(&mut form)))
        }
    }
}

fn snapshot(form: &mut FormSession) -> FormSnapshot {
    let cliente = form.cliente().clone();
    let fields = ClienteField::ALL
        .into_iter()
        .map(|field| FormFieldView {
            key: field.key().to_string(),
            raw: cliente.field(field).to_string(),
            display: form.display_value(field),
            error: cliente.error_for(field.key()).map(str::to_string),
        })
        .collect();
    let unidades = cliente
        .unidade_consumidora
        .iter()
        .enumerate()
        .map(|(index, unidade)| UnidadeView {
            numero: unidade.numero.clone(),
            error: cliente
                .error_for(&unidade_error_key(index))
                .map(str::to_string),
        })
        .collect();
    let inversores = cliente
        .inversores
        .iter()
        .map(|inversor| InversorView {
            marca: inversor.marca.clone(),
            potencia: inversor.potencia.clone(),
            sn: inversor.sn.clone(),
            login: inversor.login.clone(),
            senha: inversor.senha.clone(),
        })
        .collect();
    let notification = form
        .active_notification(Instant::now())
        .map(|notification| notification.message.clone());

    FormSnapshot {
        fields,
        unidades,
        inversores,
        can_submit: form.can_submit(),
        editing_existing: form.is_editing_existing(),
        search_query: form.search_query().to_string(),
        notification,
    }
}

fn current_notification(form: &mut FormSession) -> String {
    form.active_notification(Instant::now())
        .map(|notification| notification.message.clone())
        .unwrap_or_default()
}

fn to_list_item(summary: ClienteSummary) -> ClienteListItem {
    ClienteListItem {
        id_cliente: summary.id_cliente,
        title: summary.title,
        caption: summary.caption,
    }
}

fn to_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}
