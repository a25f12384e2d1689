//! Repository layer for client records.
//!
//! # Responsibility
//! - Define the store contract used by the form controller.
//! - Keep file and JSON details out of controller orchestration.
//!
//! # Invariants
//! - `idCliente` is the upsert key; the first match is replaced in place.
//! - A missing or unparsable file reads as an empty list, never a crash.
//! - Write failures surface as [`cliente_repo::RepoError::Write`].

pub mod cliente_repo;
