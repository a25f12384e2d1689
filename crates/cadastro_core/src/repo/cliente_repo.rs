//! Client repository contract and JSON file implementation.
//!
//! # Responsibility
//! - Load the full client list from one JSON document.
//! - Upsert one record by `idCliente` and rewrite the whole document.
//! - Look records up by id (zero-padded) or by name.
//!
//! # Invariants
//! - Writes go to a temp file in the target directory, then rename over the
//!   target; a failed write leaves the previous file intact.
//! - Reads distinguish "missing" and "corrupt" from real I/O failures.
//! - Log events carry counts and positions only, never record contents.

use crate::model::cliente::Cliente;
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tempfile::NamedTempFile;

pub type RepoResult<T> = Result<T, RepoError>;

/// Store error for client persistence.
#[derive(Debug)]
pub enum RepoError {
    /// The data file exists but could not be read.
    Read { path: PathBuf, source: io::Error },
    /// The data file (or its directory) could not be written.
    Write { path: PathBuf, source: io::Error },
    /// The client list could not be encoded as JSON.
    Encode(serde_json::Error),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Read { path, source } => {
                write!(f, "failed to read `{}`: {source}", path.display())
            }
            Self::Write { path, source } => {
                write!(f, "failed to write `{}`: {source}", path.display())
            }
            Self::Encode(err) => write!(f, "failed to encode client list: {err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Read { source, .. } => Some(source),
            Self::Write { source, .. } => Some(source),
            Self::Encode(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for RepoError {
    fn from(value: serde_json::Error) -> Self {
        Self::Encode(value)
    }
}

/// Typed result of reading the data file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded(Vec<Cliente>),
    /// No data file yet. Not an error.
    Missing,
    /// The file exists but is not a JSON client list.
    Corrupt { reason: String },
}

impl LoadOutcome {
    /// Collapses recoverable outcomes into a (possibly empty) list.
    pub fn into_clientes(self) -> Vec<Cliente> {
        match self {
            Self::Loaded(clientes) => clientes,
            Self::Missing | Self::Corrupt { .. } => Vec::new(),
        }
    }

    pub fn is_corrupt(&self) -> bool {
        matches!(self, Self::Corrupt { .. })
    }
}

/// What an upsert did to the stored list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Inserted { position: usize },
    Replaced { position: usize },
}

impl UpsertOutcome {
    pub fn position(self) -> usize {
        match self {
            Self::Inserted { position } | Self::Replaced { position } => position,
        }
    }
}

/// Repository interface for the client list.
pub trait ClienteRepository {
    /// Reads the whole list with a typed outcome.
    fn load(&self) -> RepoResult<LoadOutcome>;

    /// Replaces the first record with the same `idCliente`, or appends.
    fn upsert(&self, cliente: &Cliente) -> RepoResult<UpsertOutcome>;

    /// Reads the whole list; every failure degrades to an empty list.
    fn load_all(&self) -> Vec<Cliente> {
        match self.load() {
            Ok(outcome) => outcome.into_clientes(),
            Err(err) => {
                error!("event=store_load module=repo status=error error={err}");
                Vec::new()
            }
        }
    }

    /// First record whose id equals `id`, left-padded with zeros to the
    /// stored id width.
    fn find_by_id(&self, id: &str) -> Option<Cliente> {
        self.load_all()
            .into_iter()
            .find(|cliente| id_matches(&cliente.id_cliente, id))
    }

    /// First record whose name equals `nome`, ignoring case.
    fn find_by_name(&self, nome: &str) -> Option<Cliente> {
        self.load_all()
            .into_iter()
            .find(|cliente| name_matches(&cliente.nome, nome))
    }

    /// Search flow lookup: id first, then name.
    fn find(&self, query: &str) -> Option<Cliente> {
        let clientes = self.load_all();
        clientes
            .iter()
            .find(|cliente| id_matches(&cliente.id_cliente, query))
            .or_else(|| {
                clientes
                    .iter()
                    .find(|cliente| name_matches(&cliente.nome, query))
            })
            .cloned()
    }
}

/// JSON-document repository over a single file path.
#[derive(Debug, Clone)]
pub struct JsonFileClienteRepository {
    path: PathBuf,
}

impl JsonFileClienteRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_all(&self, clientes: &[Cliente]) -> RepoResult<()> {
        let encoded = serde_json::to_vec(clientes)?;
        let dir = parent_dir(&self.path);
        fs::create_dir_all(dir).map_err(|source| self.write_error(source))?;

        let mut staged = NamedTempFile::new_in(dir).map_err(|source| self.write_error(source))?;
        staged
            .write_all(&encoded)
            .and_then(|()| staged.as_file().sync_all())
            .map_err(|source| self.write_error(source))?;
        staged
            .persist(&self.path)
            .map_err(|err| self.write_error(err.error))?;
        Ok(())
    }

    fn write_error(&self, source: io::Error) -> RepoError {
        RepoError::Write {
            path: self.path.clone(),
            source,
        }
    }
}

impl ClienteRepository for JsonFileClienteRepository {
    fn load(&self) -> RepoResult<LoadOutcome> {
        let started_at = Instant::now();
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                info!("event=store_load module=repo status=ok outcome=missing");
                return Ok(LoadOutcome::Missing);
            }
            Err(source) => {
                error!(
                    "event=store_load module=repo status=error duration_ms={} error={}",
                    started_at.elapsed().as_millis(),
                    source
                );
                return Err(RepoError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        match serde_json::from_slice::<Vec<Cliente>>(&bytes) {
            Ok(clientes) => {
                info!(
                    "event=store_load module=repo status=ok outcome=loaded count={} duration_ms={}",
                    clientes.len(),
                    started_at.elapsed().as_millis()
                );
                Ok(LoadOutcome::Loaded(clientes))
            }
            Err(err) => {
                warn!(
                    "event=store_load module=repo status=degraded outcome=corrupt line={} column={}",
                    err.line(),
                    err.column()
                );
                Ok(LoadOutcome::Corrupt {
                    reason: err.to_string(),
                })
            }
        }
    }

    fn upsert(&self, cliente: &Cliente) -> RepoResult<UpsertOutcome> {
        let started_at = Instant::now();
        // A corrupt file is replaced by the new list, as a fresh store would be.
        let mut clientes = self.load()?.into_clientes();

        let outcome = match clientes
            .iter()
            .position(|existing| existing.id_cliente == cliente.id_cliente)
        {
            Some(position) => {
                clientes[position] = cliente.clone();
                UpsertOutcome::Replaced { position }
            }
            None => {
                clientes.push(cliente.clone());
                UpsertOutcome::Inserted {
                    position: clientes.len() - 1,
                }
            }
        };

        match self.write_all(&clientes) {
            Ok(()) => {
                info!(
                    "event=store_upsert module=repo status=ok action={} position={} count={} duration_ms={}",
                    upsert_action_label(outcome),
                    outcome.position(),
                    clientes.len(),
                    started_at.elapsed().as_millis()
                );
                Ok(outcome)
            }
            Err(err) => {
                error!(
                    "event=store_upsert module=repo status=error duration_ms={} error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err)
            }
        }
    }
}

/// Compares a stored id against a query id, zero-padding the query to the
/// stored width (`"42"` matches `"0042"`).
pub fn id_matches(stored: &str, query: &str) -> bool {
    let query = query.trim();
    if query.is_empty() {
        return false;
    }
    if stored == query {
        return true;
    }
    let width = stored.chars().count();
    query.chars().count() < width && format!("{query:0>width$}") == stored
}

/// Case-insensitive full-name equality.
pub fn name_matches(stored: &str, query: &str) -> bool {
    let query = query.trim();
    !query.is_empty() && stored.trim().to_lowercase() == query.to_lowercase()
}

fn upsert_action_label(outcome: UpsertOutcome) -> &'static str {
    match outcome {
        UpsertOutcome::Inserted { .. } => "inserted",
        UpsertOutcome::Replaced { .. } => "replaced",
    }
}

fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}
