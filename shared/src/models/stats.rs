//! Tipos derivados del panel de estadísticas
//!
//! Nada de esto se persiste: se recalcula en cada `GET /api/statistics`.

use serde::{Deserialize, Serialize};

use super::{Alumno, EstadoPago};

/// Alumno enriquecido con su pago vigente y el estado derivado
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlumnoConEstado {
    #[serde(flatten)]
    pub alumno: Alumno,
    pub estado: EstadoPago,
    /// ID del pago vigente (el que gobierna el estado), si existe
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pago_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monto: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fecha_de_pago: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fecha_de_vencimiento: Option<String>,
}

/// Participación de una modalidad en la distribución
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModalidadShare {
    pub modalidad: String,
    pub cantidad: u32,
    /// Porcentaje redondeado sobre los alumnos activos (0 si no hay)
    pub porcentaje: u32,
}

/// Estadísticas agregadas del panel
///
/// "Activo" = estado ≠ No renovado. Los no renovados quedan fuera de
/// todas las sumas y del denominador de fidelidad; los Indefinidos
/// cuentan como activos.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_pagado: f64,
    pub total_vencido: f64,
    pub alumnos_pagados: u32,
    pub alumnos_vencidos: u32,
    pub alumnos_activos: u32,
    /// round(100 · pagados / activos); 0 cuando no hay activos
    pub porcentaje_fidelidad: u32,
    pub distribucion_modalidad: Vec<ModalidadShare>,
    /// Modalidad con más alumnos activos (empates: orden de declaración)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modalidad_top: Option<String>,
}
