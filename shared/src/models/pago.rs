//! Pago Model

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Pago entity (un pago de cuota, siempre de exactamente un alumno)
///
/// `alumno_id` es el nombre canónico de la clave foránea; los alias
/// históricos (`id_estudiante`, `studentId`, `id_student`) se normalizan
/// al ingresar desde el storage y no existen más allá de esa frontera.
/// Borrar un alumno NO borra sus pagos.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pago {
    pub id: i64,
    pub alumno_id: i64,
    /// Nombre del alumno al momento del pago (denormalizado en la planilla)
    pub nombre: Option<String>,
    /// Monto en pesos; celdas ilegibles se leen como 0
    pub monto: f64,
    /// Fecha en que se registró el pago; ausente = sin pago confirmado
    pub fecha_de_pago: Option<String>,
    /// Fecha límite del próximo pago; el único ancla temporal del estado
    pub fecha_de_vencimiento: Option<String>,
    /// Modalidad al momento del pago
    pub modalidad: Option<String>,
    pub telefono: Option<String>,
}

/// Create pago payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PagoCreate {
    pub alumno_id: i64,
    pub nombre: Option<String>,
    /// No negativo; el storage no conoce reintegros
    #[validate(range(min = 0.0, message = "El monto no puede ser negativo"))]
    pub monto: f64,
    pub fecha_de_pago: Option<String>,
    pub fecha_de_vencimiento: Option<String>,
    pub modalidad: Option<String>,
    pub telefono: Option<String>,
}

/// Update pago payload (reemplazo completo)
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PagoUpdate {
    pub alumno_id: i64,
    pub nombre: Option<String>,
    #[validate(range(min = 0.0, message = "El monto no puede ser negativo"))]
    pub monto: f64,
    pub fecha_de_pago: Option<String>,
    pub fecha_de_vencimiento: Option<String>,
    pub modalidad: Option<String>,
    pub telefono: Option<String>,
}

/// Estado de suscripción derivado de un pago
///
/// Se recalcula en cada lectura, nunca se persiste. Las etiquetas
/// serializadas son las que muestra el panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EstadoPago {
    /// Al día: vencimiento no alcanzado y pago registrado
    Pagado,
    /// Vencimiento futuro pero sin pago registrado (quinto estado,
    /// configurable; ver `StatusRules`)
    Pendiente,
    /// Vencido hace 31 días o menos
    Vencido,
    /// Vencido hace más de 31 días: abandono, no mora
    #[serde(rename = "No renovado")]
    NoRenovado,
    /// Sin vencimiento utilizable (o sin pagos): no clasificable
    Indefinido,
}

impl EstadoPago {
    /// Orden de presentación: `Pagado < Vencido < Pendiente < Indefinido
    /// < NoRenovado` (los primeros arriba en el panel).
    pub fn rango(&self) -> u8 {
        match self {
            EstadoPago::Pagado => 0,
            EstadoPago::Vencido => 1,
            EstadoPago::Pendiente => 2,
            EstadoPago::Indefinido => 3,
            EstadoPago::NoRenovado => 4,
        }
    }

    pub fn etiqueta(&self) -> &'static str {
        match self {
            EstadoPago::Pagado => "Pagado",
            EstadoPago::Pendiente => "Pendiente",
            EstadoPago::Vencido => "Vencido",
            EstadoPago::NoRenovado => "No renovado",
            EstadoPago::Indefinido => "Indefinido",
        }
    }
}

/// Pago con su estado derivado (respuesta de `GET /api/pagos`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PagoConEstado {
    #[serde(flatten)]
    pub pago: Pago,
    pub estado: EstadoPago,
}
