//! Aritmética de montos con rust_decimal
//!
//! Los montos viajan como `f64` en los modelos (son celdas de planilla),
//! pero toda suma se hace en `Decimal` y se redondea a 2 decimales
//! (half-up) antes de volver a `f64` para serializar.

use rust_decimal::prelude::*;

/// Decimales de redondeo para valores monetarios
const DECIMAL_PLACES: u32 = 2;

/// `f64` → `Decimal`. Valores no finitos caen a cero.
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or(Decimal::ZERO)
}

/// `Decimal` → `f64` redondeado a 2 decimales (half-up).
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or(0.0)
}

/// Parsea una celda de monto de planilla.
///
/// Tolera `$`, espacios y separadores de miles (`$ 15.000` / `15,000`).
/// Una celda ilegible vale 0: un registro roto no puede dejar el panel
/// en blanco.
pub fn parse_monto(celda: &str) -> f64 {
    let limpio: String = celda
        .trim()
        .trim_start_matches('$')
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    if limpio.is_empty() {
        return 0.0;
    }

    // Sin separador decimal a la vista, los puntos/comas son de miles
    let normalizado = match (limpio.rfind('.'), limpio.rfind(',')) {
        // "15.000,50" → coma decimal
        (Some(p), Some(c)) if c > p => limpio.replace('.', "").replace(',', "."),
        // "15,000.50" → punto decimal
        (Some(_), Some(_)) => limpio.replace(',', ""),
        // Un solo separador: decimal si deja 1-2 dígitos, de miles si deja 3
        (Some(p), None) if limpio.len() - p - 1 == 3 => limpio.replace('.', ""),
        (None, Some(c)) if limpio.len() - c - 1 == 3 => limpio.replace(',', ""),
        (None, Some(_)) => limpio.replace(',', "."),
        _ => limpio,
    };

    let valor = normalizado.parse::<f64>().unwrap_or(0.0);
    if valor.is_finite() && valor >= 0.0 { valor } else { 0.0 }
}
