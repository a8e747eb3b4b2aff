//! Parseo permisivo de fechas de planilla
//!
//! Las celdas llegan en dos formas: ISO (`2024-03-15`, con o sin hora) o
//! día-primero con barras (`15/03/2024`). La forma con barras se parsea
//! extrayendo campos a mano, nunca con un parser genérico sensible a
//! locale, para no transponer día y mes. Cualquier otra cosa es `None`:
//! el dato de planilla viene sucio seguido y acá se degrada, no se falla.

use chrono::NaiveDate;

/// Parsea una celda de fecha a fecha calendario (normalizada a medianoche
/// por construcción: `NaiveDate` no carga hora).
///
/// Acepta `YYYY-MM-DD`, timestamps ISO (se toma el prefijo de fecha) y
/// `DD/MM/YYYY`. Devuelve `None` ante celdas vacías, con formato ajeno o
/// con fechas calendario inválidas (`31/02/2024`).
pub fn parse_fecha(celda: &str) -> Option<NaiveDate> {
    let celda = celda.trim();
    if celda.is_empty() {
        return None;
    }

    if celda.contains('/') {
        return parse_dia_primero(celda);
    }

    // ISO: con timestamp alcanza el prefijo YYYY-MM-DD
    let prefijo = celda.get(..10).unwrap_or(celda);
    NaiveDate::parse_from_str(prefijo, "%Y-%m-%d").ok()
}

/// `DD/MM/YYYY` por extracción explícita de campos, día primero siempre.
fn parse_dia_primero(celda: &str) -> Option<NaiveDate> {
    let mut partes = celda.splitn(3, '/');
    let dia: u32 = partes.next()?.trim().parse().ok()?;
    let mes: u32 = partes.next()?.trim().parse().ok()?;
    let anio: i32 = partes.next()?.trim().parse().ok()?;
    NaiveDate::from_ymd_opt(anio, mes, dia)
}

/// Igual que [`parse_fecha`] pero sobre un campo opcional.
pub fn parse_fecha_opt(celda: Option<&str>) -> Option<NaiveDate> {
    celda.and_then(parse_fecha)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fecha(anio: i32, mes: u32, dia: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(anio, mes, dia).unwrap()
    }

    #[test]
    fn test_iso_simple() {
        assert_eq!(parse_fecha("2024-03-15"), Some(fecha(2024, 3, 15)));
    }

    #[test]
    fn test_iso_con_timestamp() {
        assert_eq!(
            parse_fecha("2024-03-15T10:30:00.000Z"),
            Some(fecha(2024, 3, 15))
        );
    }

    #[test]
    fn test_dia_primero() {
        assert_eq!(parse_fecha("15/03/2024"), Some(fecha(2024, 3, 15)));
    }

    #[test]
    fn test_mismo_dia_en_ambas_formas() {
        // Regresión contra transposición día/mes
        assert_eq!(parse_fecha("15/03/2024"), parse_fecha("2024-03-15"));
        // Un día ≤ 12 es el caso que un parser con locale arruinaría
        assert_eq!(parse_fecha("03/04/2024"), Some(fecha(2024, 4, 3)));
    }

    #[test]
    fn test_con_espacios() {
        assert_eq!(parse_fecha("  2024-03-15  "), Some(fecha(2024, 3, 15)));
    }

    #[test]
    fn test_celdas_invalidas() {
        assert_eq!(parse_fecha(""), None);
        assert_eq!(parse_fecha("   "), None);
        assert_eq!(parse_fecha("N/A"), None);
        assert_eq!(parse_fecha("pendiente"), None);
        assert_eq!(parse_fecha("15-03-2024"), None);
        assert_eq!(parse_fecha("2024/03"), None);
    }

    #[test]
    fn test_fecha_calendario_invalida() {
        assert_eq!(parse_fecha("31/02/2024"), None);
        assert_eq!(parse_fecha("2024-02-31"), None);
        assert_eq!(parse_fecha("00/00/0000"), None);
    }

    #[test]
    fn test_opcional() {
        assert_eq!(parse_fecha_opt(Some("15/03/2024")), Some(fecha(2024, 3, 15)));
        assert_eq!(parse_fecha_opt(Some("basura")), None);
        assert_eq!(parse_fecha_opt(None), None);
    }
}
