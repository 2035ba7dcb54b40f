//! Atención a Clientes Core
//!
//! Layered like the UI expects:
//! - domain: lookup DTOs, filter state machines, hierarchical selection
//! - services: token auth and parameter lookups over an injected transport

pub mod domain;
pub mod services;

pub use domain::*;
pub use services::*;
