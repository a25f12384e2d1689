//! Desktop UI bridge for the client registration core.

pub mod api;
