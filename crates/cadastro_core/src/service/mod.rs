//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate masks, validation and the store behind one form session.
//! - Keep UI/FFI layers decoupled from storage details.

pub mod form_service;
