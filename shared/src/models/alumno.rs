//! Alumno Model

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Alumno entity (un miembro del gimnasio)
///
/// `id` lo asigna el storage al crear y es inmutable: en la planilla es la
/// posición de la fila de datos (fila 2 → id 1), en Supabase la columna `id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alumno {
    pub id: i64,
    pub nombre: String,
    /// Modalidad contratada. Conjunto de etiquetas abierto y configurable
    /// (por defecto Presencial / Online / Híbrido), nunca un enum fijo.
    pub modalidad: String,
    pub fecha_de_nacimiento: Option<String>,
    pub telefono: Option<String>,
    /// Resumen de agenda, formato `"<días> - <HH:MM>"` (ej. `"Lun, Mié - 18:30"`)
    pub dias: Option<String>,
    pub fecha_de_inicio: Option<String>,
    pub ultima_antro: Option<String>,
    /// URL del documento de planificación
    pub plan: Option<String>,
    pub email: Option<String>,
}

/// Días de la semana seleccionables para la agenda
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Agenda {
    #[serde(default)]
    pub monday: bool,
    #[serde(default)]
    pub tuesday: bool,
    #[serde(default)]
    pub wednesday: bool,
    #[serde(default)]
    pub thursday: bool,
    #[serde(default)]
    pub friday: bool,
    #[serde(default)]
    pub saturday: bool,
    #[serde(default)]
    pub sunday: bool,
}

impl Agenda {
    /// Abreviaturas en el orden de la semana, sólo los días marcados.
    pub fn dias_abreviados(&self) -> Vec<&'static str> {
        [
            (self.monday, "Lun"),
            (self.tuesday, "Mar"),
            (self.wednesday, "Mié"),
            (self.thursday, "Jue"),
            (self.friday, "Vie"),
            (self.saturday, "Sáb"),
            (self.sunday, "Dom"),
        ]
        .into_iter()
        .filter_map(|(marcado, abrev)| marcado.then_some(abrev))
        .collect()
    }

    /// Arma el resumen de agenda como lo hacía la planilla:
    /// `"Lun, Mié - 18:30"`, o `"No definido"` sin días marcados.
    pub fn resumen(&self, hora: Option<&str>) -> String {
        let dias = self.dias_abreviados();
        match (dias.is_empty(), hora) {
            (true, _) => "No definido".to_string(),
            (false, Some(hora)) => format!("{} - {}", dias.join(", "), hora),
            (false, None) => dias.join(", "),
        }
    }
}

/// Create alumno payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AlumnoCreate {
    #[validate(length(min = 1, message = "El nombre es obligatorio"))]
    pub nombre: String,
    #[validate(length(min = 1, message = "La modalidad es obligatoria"))]
    pub modalidad: String,
    pub fecha_de_nacimiento: Option<String>,
    pub telefono: Option<String>,
    /// Días marcados + hora; el servidor arma el string `dias`
    #[serde(default)]
    pub agenda: Agenda,
    pub hora: Option<String>,
    pub fecha_de_inicio: Option<String>,
    pub ultima_antro: Option<String>,
    pub plan: Option<String>,
    pub email: Option<String>,
}

impl AlumnoCreate {
    pub fn dias_string(&self) -> String {
        self.agenda.resumen(self.hora.as_deref())
    }
}

/// Update alumno payload (reemplazo completo de los campos mutables)
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AlumnoUpdate {
    #[validate(length(min = 1, message = "El nombre es obligatorio"))]
    pub nombre: String,
    #[validate(length(min = 1, message = "La modalidad es obligatoria"))]
    pub modalidad: String,
    pub fecha_de_nacimiento: Option<String>,
    pub telefono: Option<String>,
    #[serde(default)]
    pub agenda: Agenda,
    pub hora: Option<String>,
    pub fecha_de_inicio: Option<String>,
    pub ultima_antro: Option<String>,
    pub plan: Option<String>,
    pub email: Option<String>,
}

impl AlumnoUpdate {
    pub fn dias_string(&self) -> String {
        self.agenda.resumen(self.hora.as_deref())
    }
}
