//! Seguimiento de suscripciones - el núcleo de decisión del sistema
//!
//! Dos componentes, ambos funciones puras sobre datos ya traídos del
//! storage (acá no hay I/O):
//!
//! - [`status`]: clasifica un pago en Pagado / Pendiente / Vencido /
//!   No renovado / Indefinido a partir de sus fechas y de "hoy".
//! - [`reconcile`]: junta cada alumno con su pago vigente, le aplica el
//!   clasificador y agrega las estadísticas del panel.
//!
//! "Hoy" es siempre un parámetro explícito: el reloj del sistema se lee
//! una sola vez en el handler, nunca acá adentro.

pub mod reconcile;
pub mod status;

pub use reconcile::{governing_payment, reconcile};
pub use status::{StatusRules, classify};
