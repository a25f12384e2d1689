//! Client record domain model.
//!
//! # Responsibility
//! - Define the canonical client record persisted to the data file.
//! - Provide pure copy-on-write updates used by the form controller.
//!
//! # Invariants
//! - `idCliente` identifies a record inside the store.
//! - `errors` is derived state, recomputed by validation only.

pub mod cliente;
