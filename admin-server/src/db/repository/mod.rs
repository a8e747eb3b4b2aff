//! Repositorios tipados
//!
//! Única frontera entre las filas crudas del storage y los modelos de
//! `shared`. La normalización de nombres de campo (y de formas de valor:
//! string de celda vs. número JSON) pasa acá y en ningún otro lado.

pub mod alumnos;
pub mod pagos;

use serde_json::Value;

use super::RawRow;
use crate::utils::money::parse_monto;

/// Primer campo presente y no vacío entre los alias dados, como texto.
pub(crate) fn campo_texto(row: &RawRow, alias: &[&str]) -> Option<String> {
    for nombre in alias {
        match row.get(*nombre) {
            Some(Value::String(s)) if !s.trim().is_empty() => return Some(s.trim().to_string()),
            Some(Value::Number(n)) => return Some(n.to_string()),
            _ => {}
        }
    }
    None
}

/// Primer campo presente entre los alias, como entero.
///
/// Acepta número JSON (Supabase) o string numérico (celda de planilla).
pub(crate) fn campo_i64(row: &RawRow, alias: &[&str]) -> Option<i64> {
    for nombre in alias {
        match row.get(*nombre) {
            Some(Value::Number(n)) => {
                if let Some(v) = n.as_i64() {
                    return Some(v);
                }
            }
            Some(Value::String(s)) => {
                if let Ok(v) = s.trim().parse::<i64>() {
                    return Some(v);
                }
            }
            _ => {}
        }
    }
    None
}

/// Monto del primer alias presente; celdas ilegibles valen 0.
pub(crate) fn campo_monto(row: &RawRow, alias: &[&str]) -> f64 {
    for nombre in alias {
        match row.get(*nombre) {
            Some(Value::Number(n)) => {
                let v = n.as_f64().unwrap_or(0.0);
                return if v.is_finite() && v >= 0.0 { v } else { 0.0 };
            }
            Some(Value::String(s)) if !s.trim().is_empty() => return parse_monto(s),
            _ => {}
        }
    }
    0.0
}

#[cfg(test)]
pub(crate) fn fila_de_pares(pares: &[(&str, Value)]) -> RawRow {
    pares
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_campo_texto_toma_el_primer_alias() {
        let fila = fila_de_pares(&[("whatsapp", json!("351123")), ("telefono", json!("999"))]);
        assert_eq!(
            campo_texto(&fila, &["telefono", "whatsapp"]).as_deref(),
            Some("999")
        );
    }

    #[test]
    fn test_campo_texto_saltea_vacios() {
        let fila = fila_de_pares(&[("telefono", json!("   ")), ("whatsapp", json!("351123"))]);
        assert_eq!(
            campo_texto(&fila, &["telefono", "whatsapp"]).as_deref(),
            Some("351123")
        );
    }

    #[test]
    fn test_campo_i64_ambas_formas() {
        let numerico = fila_de_pares(&[("alumno_id", json!(7))]);
        let textual = fila_de_pares(&[("alumno_id", json!("7"))]);
        assert_eq!(campo_i64(&numerico, &["alumno_id"]), Some(7));
        assert_eq!(campo_i64(&textual, &["alumno_id"]), Some(7));
    }

    #[test]
    fn test_campo_monto_degrada_a_cero() {
        let roto = fila_de_pares(&[("monto", json!("a convenir"))]);
        assert_eq!(campo_monto(&roto, &["monto"]), 0.0);
        assert_eq!(campo_monto(&fila_de_pares(&[]), &["monto"]), 0.0);
    }
}
