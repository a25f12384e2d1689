//! Core domain logic for the client registration form.
//! This crate is the single source of truth for record invariants.

pub mod config;
pub mod logging;
pub mod mask;
pub mod model;
pub mod repo;
pub mod search;
pub mod service;
pub mod validation;

pub use config::{
    data_path_from, default_log_dir, resolve_data_path, AfterSavePolicy, ConfigError, FormConfig,
};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use mask::{
    cpf_cnpj_mask_for, strip_separators, DigitMask, InputRule, MaskedText, CNPJ_MASK, CPF_MASK,
    DATE_MASK,
};
pub use model::cliente::{
    unidade_error_key, Cliente, ClienteField, EditError, FieldErrors, Inversor, InversorField,
    UnidadeConsumidora,
};
pub use repo::cliente_repo::{
    ClienteRepository, JsonFileClienteRepository, LoadOutcome, RepoError, RepoResult,
    UpsertOutcome,
};
pub use search::{filter_clientes, ClienteSummary};
pub use service::form_service::{
    FormController, FormError, Notification, NotificationLevel, SubmitOutcome,
};
pub use validation::{collect_errors, is_submittable, validate_cliente};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
