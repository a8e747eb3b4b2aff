//! RM Admin - tipos compartidos
//!
//! Modelos de datos y DTOs compartidos entre el servidor y sus tests de
//! integración. Los nombres de campo siguen el contrato de datos de las
//! planillas originales (`nombre`, `modalidad`, `fecha_de_vencimiento`).

pub mod client;
pub mod models;

pub use client::{LoginRequest, LoginResponse, UserInfo};
pub use models::*;
