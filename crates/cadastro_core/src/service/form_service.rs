//! Client form controller.
//!
//! # Responsibility
//! - Own the in-edit record and route every edit through input filtering.
//! - Validate on submit and upsert only error-free records.
//! - Keep the cached client list, search query and transient notification.
//!
//! # Invariants
//! - Every edit replaces the record with a new value; nothing is shared.
//! - `errors` changes only on submit.
//! - Store failures never abort the session; they become notifications.

use crate::config::{AfterSavePolicy, FormConfig};
use crate::mask::{cpf_cnpj_mask_for, MaskedText, DATE_MASK};
use crate::model::cliente::{Cliente, ClienteField, EditError, FieldErrors, InversorField};
use crate::repo::cliente_repo::{ClienteRepository, LoadOutcome, RepoError, UpsertOutcome};
use crate::search::filter_clientes;
use crate::validation::{is_submittable, validate_cliente};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

pub const SAVED_MESSAGE: &str = "Cliente salvo com sucesso!";
pub const REJECTED_MESSAGE: &str = "Corrija os campos obrigatórios";
pub const CORRUPT_STORE_MESSAGE: &str =
    "Arquivo de dados ilegível; a lista de clientes foi carregada vazia";

/// Controller-level failure.
#[derive(Debug)]
pub enum FormError {
    /// The validated record could not be written.
    Save(RepoError),
}

impl Display for FormError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Save(err) => write!(f, "Falha ao salvar: {err}"),
        }
    }
}

impl Error for FormError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Save(err) => Some(err),
        }
    }
}

impl From<RepoError> for FormError {
    fn from(value: RepoError) -> Self {
        Self::Save(value)
    }
}

/// Result of a submit that did not fail on I/O.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Saved(UpsertOutcome),
    /// Validation failed; the record now carries these errors.
    Rejected { errors: FieldErrors },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Warning,
    Error,
}

/// Transient message shown for [`FormConfig::notification_ttl`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
    pub shown_at: Instant,
}

/// Form session over one repository.
pub struct FormController<R: ClienteRepository> {
    repo: R,
    config: FormConfig,
    cliente: Cliente,
    editing_existing: bool,
    clientes: Vec<Cliente>,
    search_query: String,
    notification: Option<Notification>,
}

impl<R: ClienteRepository> FormController<R> {
    /// Opens a session and loads the client list.
    ///
    /// An unreadable or corrupt store opens with an empty list and a
    /// notification instead of failing.
    pub fn open(repo: R, config: FormConfig) -> Self {
        let mut controller = Self {
            repo,
            config,
            cliente: Cliente::default(),
            editing_existing: false,
            clientes: Vec::new(),
            search_query: String::new(),
            notification: None,
        };
        controller.reload();
        controller
    }

    pub fn cliente(&self) -> &Cliente {
        &self.cliente
    }

    /// Whether the record on screen came from the store.
    pub fn is_editing_existing(&self) -> bool {
        self.editing_existing
    }

    pub fn clientes(&self) -> &[Cliente] {
        &self.clientes
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn config(&self) -> &FormConfig {
        &self.config
    }

    pub fn repo(&self) -> &R {
        &self.repo
    }

    /// Filters keystrokes for `field` and stores the result.
    pub fn edit_field(&mut self, field: ClienteField, text: &str) {
        let value = field.input_rule().apply(text);
        let next = self.cliente.with_field(field, value);
        self.replace(next);
    }

    pub fn add_unidade(&mut self) {
        let next = self.cliente.with_unidade_added();
        self.replace(next);
    }

    pub fn edit_unidade(&mut self, index: usize, numero: &str) -> Result<(), EditError> {
        let next = self.cliente.with_unidade_numero(index, numero)?;
        self.replace(next);
        Ok(())
    }

    pub fn add_inversor(&mut self) {
        let next = self.cliente.with_inversor_added();
        self.replace(next);
    }

    pub fn edit_inversor(
        &mut self,
        index: usize,
        field: InversorField,
        text: &str,
    ) -> Result<(), EditError> {
        let next = self.cliente.with_inversor_field(index, field, text)?;
        self.replace(next);
        Ok(())
    }

    /// Masked view of a field, or `None` for unmasked fields.
    pub fn masked_field(&self, field: ClienteField) -> Option<MaskedText> {
        let raw = self.cliente.field(field);
        if field.is_date() {
            return Some(DATE_MASK.apply(raw));
        }
        match field {
            ClienteField::CpfCnpj => {
                cpf_cnpj_mask_for(raw.chars().count()).map(|mask| mask.apply(raw))
            }
            _ => None,
        }
    }

    /// Text shown in the input for `field`.
    pub fn display_value(&self, field: ClienteField) -> String {
        match self.masked_field(field) {
            Some(masked) => masked.into_display(),
            None => self.cliente.field(field).to_string(),
        }
    }

    /// Starts a new empty record.
    pub fn reset(&mut self) {
        self.cliente = Cliente::default();
        self.editing_existing = false;
        self.search_query.clear();
    }

    /// Loads `cliente` into the form, e.g. from a list click.
    pub fn select(&mut self, cliente: &Cliente) {
        self.search_query = cliente.nome.clone();
        self.cliente = cliente.clone();
        self.editing_existing = true;
    }

    /// Loads the stored record matching `query` by id, then by name.
    ///
    /// Returns whether a record was found.
    pub fn select_by_query(&mut self, query: &str) -> bool {
        match self.repo.find(query) {
            Some(found) => {
                self.select(&found);
                true
            }
            None => false,
        }
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
    }

    /// Client list filtered by the current search query.
    pub fn filtered_clientes(&self) -> Vec<&Cliente> {
        filter_clientes(&self.clientes, &self.search_query)
    }

    /// Whether the save action should be enabled.
    pub fn can_submit(&self) -> bool {
        is_submittable(&self.cliente)
    }

    /// Validates and saves the current record.
    ///
    /// # Errors
    /// - Returns [`FormError::Save`] when the store write fails. The record
    ///   on screen is kept so nothing typed is lost.
    pub fn submit(&mut self) -> Result<SubmitOutcome, FormError> {
        let validated = validate_cliente(&self.cliente);
        if !validated.errors.is_empty() {
            info!(
                "event=form_submit module=service status=rejected error_count={}",
                validated.errors.len()
            );
            let errors = validated.errors.clone();
            self.cliente = validated;
            self.notify(REJECTED_MESSAGE, NotificationLevel::Warning);
            return Ok(SubmitOutcome::Rejected { errors });
        }

        let outcome = match self.repo.upsert(&validated) {
            Ok(outcome) => outcome,
            Err(err) => {
                self.notify(format!("Erro ao salvar: {err}"), NotificationLevel::Error);
                return Err(FormError::from(err));
            }
        };

        info!(
            "event=form_submit module=service status=ok position={}",
            outcome.position()
        );
        self.notify(SAVED_MESSAGE, NotificationLevel::Info);
        self.clientes = self.repo.load_all();
        match self.config.after_save {
            AfterSavePolicy::ResetToEmpty => self.reset(),
            AfterSavePolicy::KeepSaved => {
                self.cliente = validated;
                self.editing_existing = true;
            }
        }
        Ok(SubmitOutcome::Saved(outcome))
    }

    /// Re-reads the client list from the store.
    pub fn reload(&mut self) {
        match self.repo.load() {
            Ok(LoadOutcome::Corrupt { .. }) => {
                warn!("event=form_reload module=service status=degraded outcome=corrupt");
                self.clientes = Vec::new();
                self.notify(CORRUPT_STORE_MESSAGE, NotificationLevel::Warning);
            }
            Ok(outcome) => self.clientes = outcome.into_clientes(),
            Err(err) => {
                warn!("event=form_reload module=service status=error error={err}");
                self.clientes = Vec::new();
                self.notify(
                    format!("Erro ao carregar dados: {err}"),
                    NotificationLevel::Error,
                );
            }
        }
    }

    /// Returns the notification while it is still within its TTL.
    ///
    /// An expired notification is cleared on read.
    pub fn active_notification(&mut self, now: Instant) -> Option<&Notification> {
        let ttl = self.config.notification_ttl;
        let expired = self
            .notification
            .as_ref()
            .is_some_and(|shown| now.saturating_duration_since(shown.shown_at) >= ttl);
        if expired {
            self.notification = None;
        }
        self.notification.as_ref()
    }

    fn notify(&mut self, message: impl Into<String>, level: NotificationLevel) {
        self.notification = Some(Notification {
            message: message.into(),
            level,
            shown_at: Instant::now(),
        });
    }

    fn replace(&mut self, next: Cliente) {
        self.search_query = next.nome.clone();
        self.cliente = next;
    }
}
