//! Client list search for the selection view.
//!
//! # Responsibility
//! - Filter the cached client list by a free-text query.
//! - Shape list rows for display.
//!
//! # Invariants
//! - Matching is a case-insensitive substring test on `nome` or `idCliente`.
//! - A blank query, or a query without matches, yields the full list.

mod filter;

pub use filter::{filter_clientes, ClienteSummary};
