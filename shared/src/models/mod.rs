//! Modelos de datos
//!
//! Compartidos entre el servidor y el panel (vía API). Los campos de fecha
//! viajan como texto crudo (celdas de planilla) y se parsean recién donde
//! hace falta. Todos los IDs son `i64`.

pub mod alumno;
pub mod pago;
pub mod stats;

// Re-exports
pub use alumno::*;
pub use pago::*;
pub use stats::*;
