//! Módulo central - configuración, estado y errores del servidor
//!
//! # Estructura
//!
//! - [`Config`] - configuración del servidor
//! - [`ServerState`] - estado compartido
//! - [`Server`] - servidor HTTP
//! - [`ServerError`] - errores de arranque

pub mod config;
pub mod error;
pub mod server;
pub mod state;

pub use config::Config;
pub use error::{Result, ServerError};
pub use server::Server;
pub use state::ServerState;
