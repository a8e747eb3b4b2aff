//! Clasificador de estado de suscripción
//!
//! Regla central del negocio: del par (fecha de pago, fecha de
//! vencimiento) y de "hoy" sale uno de los cinco estados. El vencimiento
//! es el único ancla temporal; la fecha de pago sólo distingue Pagado de
//! Pendiente cuando el plan todavía no venció.

use chrono::NaiveDate;
use shared::models::EstadoPago;

/// Días de gracia después del vencimiento antes de dar el plan por
/// abandonado (No renovado en lugar de Vencido).
pub const DIAS_ABANDONO: i64 = 31;

/// Variantes del clasificador a través de las revisiones del sistema.
///
/// La versión vieja del panel devolvía Pagado siempre que el plan no
/// estuviera vencido; la actual distingue Pendiente (vencimiento futuro
/// sin pago registrado). Ambas conviven detrás de esta config.
#[derive(Debug, Clone, Copy)]
pub struct StatusRules {
    /// `true`: regla de cinco estados (con Pendiente).
    /// `false`: regla histórica de cuatro (Pendiente colapsa en Pagado).
    pub pendiente_habilitado: bool,
}

impl Default for StatusRules {
    fn default() -> Self {
        Self {
            pendiente_habilitado: true,
        }
    }
}

/// Clasifica un pago.
///
/// Fechas ya parseadas a calendario (ver `utils::dates`): acá una fecha
/// ausente y una ilegible son lo mismo, `None`. Nunca falla; el dato
/// faltante degrada a [`EstadoPago::Indefinido`].
///
/// Orden de evaluación:
/// 1. sin vencimiento → Indefinido (terminal)
/// 2. vencido hace más de [`DIAS_ABANDONO`] días → No renovado
/// 3. vencido → Vencido (el mismo día del vencimiento NO está vencido)
/// 4. con pago registrado → Pagado
/// 5. sin pago registrado → Pendiente (o Pagado con la regla histórica)
pub fn classify(
    fecha_de_pago: Option<NaiveDate>,
    fecha_de_vencimiento: Option<NaiveDate>,
    hoy: NaiveDate,
    rules: &StatusRules,
) -> EstadoPago {
    let Some(vencimiento) = fecha_de_vencimiento else {
        return EstadoPago::Indefinido;
    };

    // Negativo si todavía no venció
    let dias_vencido = (hoy - vencimiento).num_days();

    if dias_vencido > DIAS_ABANDONO {
        return EstadoPago::NoRenovado;
    }

    if hoy > vencimiento {
        return EstadoPago::Vencido;
    }

    if fecha_de_pago.is_some() {
        return EstadoPago::Pagado;
    }

    if rules.pendiente_habilitado {
        EstadoPago::Pendiente
    } else {
        EstadoPago::Pagado
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::dates::parse_fecha;

    fn fecha(s: &str) -> NaiveDate {
        parse_fecha(s).unwrap()
    }

    fn cinco_estados() -> StatusRules {
        StatusRules::default()
    }

    fn cuatro_estados() -> StatusRules {
        StatusRules {
            pendiente_habilitado: false,
        }
    }

    #[test]
    fn test_sin_vencimiento_es_indefinido() {
        let hoy = fecha("2024-02-05");
        assert_eq!(
            classify(None, None, hoy, &cinco_estados()),
            EstadoPago::Indefinido
        );
        // El vencimiento ausente es terminal: el pago no rescata nada
        assert_eq!(
            classify(Some(fecha("2024-01-10")), None, hoy, &cinco_estados()),
            EstadoPago::Indefinido
        );
    }

    #[test]
    fn test_pagado_antes_del_vencimiento() {
        let estado = classify(
            Some(fecha("2024-01-10")),
            Some(fecha("2024-02-10")),
            fecha("2024-02-05"),
            &cinco_estados(),
        );
        assert_eq!(estado, EstadoPago::Pagado);
    }

    #[test]
    fn test_mismo_dia_no_esta_vencido() {
        let d = fecha("2024-02-10");
        let estado = classify(Some(fecha("2024-01-10")), Some(d), d, &cinco_estados());
        assert_eq!(estado, EstadoPago::Pagado);
        // Tampoco con la regla histórica ni sin pago
        assert_ne!(
            classify(None, Some(d), d, &cuatro_estados()),
            EstadoPago::Vencido
        );
    }

    #[test]
    fn test_vencido_dentro_de_la_gracia() {
        // 10 días después del vencimiento
        let estado = classify(
            Some(fecha("2024-01-10")),
            Some(fecha("2024-02-10")),
            fecha("2024-02-20"),
            &cinco_estados(),
        );
        assert_eq!(estado, EstadoPago::Vencido);
    }

    #[test]
    fn test_dia_31_sigue_vencido() {
        // Exactamente 31 días: borde de la gracia, todavía Vencido
        let estado = classify(
            None,
            Some(fecha("2024-02-10")),
            fecha("2024-03-12"),
            &cinco_estados(),
        );
        assert_eq!(estado, EstadoPago::Vencido);
    }

    #[test]
    fn test_dia_32_es_no_renovado() {
        let estado = classify(
            None,
            Some(fecha("2024-02-10")),
            fecha("2024-03-13"),
            &cinco_estados(),
        );
        assert_eq!(estado, EstadoPago::NoRenovado);
    }

    #[test]
    fn test_no_renovado_aun_con_pago() {
        // El abandono tiene prioridad sobre el pago registrado
        let estado = classify(
            Some(fecha("2024-01-10")),
            Some(fecha("2024-02-10")),
            fecha("2024-03-15"),
            &cinco_estados(),
        );
        assert_eq!(estado, EstadoPago::NoRenovado);
    }

    #[test]
    fn test_pendiente_sin_pago_registrado() {
        let estado = classify(
            None,
            Some(fecha("2024-02-10")),
            fecha("2024-02-05"),
            &cinco_estados(),
        );
        assert_eq!(estado, EstadoPago::Pendiente);
    }

    #[test]
    fn test_regla_historica_colapsa_pendiente_en_pagado() {
        let estado = classify(
            None,
            Some(fecha("2024-02-10")),
            fecha("2024-02-05"),
            &cuatro_estados(),
        );
        assert_eq!(estado, EstadoPago::Pagado);
    }

    #[test]
    fn test_muy_vencido_siempre_no_renovado() {
        // Más de 31 días en el pasado, con y sin pago, en ambas reglas
        let vencimiento = Some(fecha("2023-06-01"));
        let hoy = fecha("2024-02-05");
        for pago in [None, Some(fecha("2023-05-01"))] {
            for rules in [cinco_estados(), cuatro_estados()] {
                assert_eq!(
                    classify(pago, vencimiento, hoy, &rules),
                    EstadoPago::NoRenovado
                );
            }
        }
    }
}
