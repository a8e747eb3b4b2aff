//! Reconciliación alumnos ↔ pagos y estadísticas del panel
//!
//! Transformación pura y total: con listas bien formadas (aunque vacías)
//! siempre devuelve un resultado completo. Un registro roto degrada a un
//! valor neutro y el resto sigue; acá no se corta nada.

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use shared::models::{
    Alumno, AlumnoConEstado, DashboardStats, EstadoPago, ModalidadShare, Pago,
};

use crate::utils::dates::parse_fecha_opt;
use crate::utils::money::{to_decimal, to_f64};

use super::status::{StatusRules, classify};

/// Elige el pago vigente de un alumno.
///
/// El vigente es el de fecha de pago válida más reciente; si ningún pago
/// del grupo tiene fecha de pago parseable, el de vencimiento más
/// reciente; grupo vacío → `None`.
///
/// Desempate documentado: a igual fecha gana el `id` más alto. El orden
/// de llegada del storage no participa nunca, así el resultado es
/// idéntico entre corridas.
pub fn governing_payment<'a>(pagos: &[&'a Pago]) -> Option<&'a Pago> {
    let por_fecha_de_pago = pagos
        .iter()
        .filter_map(|p| parse_fecha_opt(p.fecha_de_pago.as_deref()).map(|f| (f, p.id, *p)))
        .max_by_key(|(fecha, id, _)| (*fecha, *id));

    if let Some((_, _, pago)) = por_fecha_de_pago {
        return Some(pago);
    }

    pagos
        .iter()
        .filter_map(|p| parse_fecha_opt(p.fecha_de_vencimiento.as_deref()).map(|f| (f, p.id, *p)))
        .max_by_key(|(fecha, id, _)| (*fecha, *id))
        .map(|(_, _, pago)| pago)
}

/// Reconcilia el padrón completo contra el registro de pagos.
///
/// Devuelve los alumnos enriquecidos (ordenados por estado para el
/// panel) y las estadísticas agregadas. `modalidades` fija el orden de
/// declaración de las modalidades conocidas; etiquetas no declaradas se
/// agregan al final en orden de aparición.
pub fn reconcile(
    alumnos: &[Alumno],
    pagos: &[Pago],
    hoy: NaiveDate,
    rules: &StatusRules,
    modalidades: &[String],
) -> (Vec<AlumnoConEstado>, DashboardStats) {
    // 1. Agrupar pagos por alumno
    let mut por_alumno: HashMap<i64, Vec<&Pago>> = HashMap::new();
    for pago in pagos {
        por_alumno.entry(pago.alumno_id).or_default().push(pago);
    }

    // 2-5. Pago vigente + clasificación por alumno
    let mut enriquecidos: Vec<AlumnoConEstado> = alumnos
        .iter()
        .map(|alumno| {
            let grupo = por_alumno.get(&alumno.id).map(Vec::as_slice).unwrap_or(&[]);
            let vigente = governing_payment(grupo);

            let estado = match vigente {
                Some(pago) => classify(
                    parse_fecha_opt(pago.fecha_de_pago.as_deref()),
                    parse_fecha_opt(pago.fecha_de_vencimiento.as_deref()),
                    hoy,
                    rules,
                ),
                None => EstadoPago::Indefinido,
            };

            AlumnoConEstado {
                alumno: alumno.clone(),
                estado,
                pago_id: vigente.map(|p| p.id),
                monto: vigente.map(|p| p.monto),
                fecha_de_pago: vigente.and_then(|p| p.fecha_de_pago.clone()),
                fecha_de_vencimiento: vigente.and_then(|p| p.fecha_de_vencimiento.clone()),
            }
        })
        .collect();

    let stats = aggregate(&enriquecidos, modalidades);

    // 10. Orden de presentación: por rango de estado, estable adentro
    enriquecidos.sort_by_key(|e| e.estado.rango());

    (enriquecidos, stats)
}

/// Agrega las estadísticas sobre el padrón enriquecido.
///
/// Los No renovados quedan afuera de todo: sumas, conteos y el
/// denominador de fidelidad. Un Indefinido sigue siendo un alumno activo.
fn aggregate(enriquecidos: &[AlumnoConEstado], modalidades: &[String]) -> DashboardStats {
    let activos: Vec<&AlumnoConEstado> = enriquecidos
        .iter()
        .filter(|e| e.estado != EstadoPago::NoRenovado)
        .collect();

    let mut total_pagado = Decimal::ZERO;
    let mut total_vencido = Decimal::ZERO;
    let mut alumnos_pagados = 0u32;
    let mut alumnos_vencidos = 0u32;

    for e in &activos {
        let monto = to_decimal(e.monto.unwrap_or(0.0));
        match e.estado {
            EstadoPago::Pagado => {
                total_pagado += monto;
                alumnos_pagados += 1;
            }
            EstadoPago::Vencido => {
                total_vencido += monto;
                alumnos_vencidos += 1;
            }
            _ => {}
        }
    }

    let alumnos_activos = activos.len() as u32;
    let porcentaje_fidelidad = porcentaje(alumnos_pagados, alumnos_activos);

    // Distribución por modalidad: declaradas primero, el resto en orden
    // de aparición
    let mut orden: Vec<String> = modalidades.to_vec();
    let mut conteo: HashMap<&str, u32> = HashMap::new();
    for e in &activos {
        let etiqueta = e.alumno.modalidad.as_str();
        *conteo.entry(etiqueta).or_insert(0) += 1;
        if !orden.iter().any(|m| m == etiqueta) {
            orden.push(etiqueta.to_string());
        }
    }

    let distribucion_modalidad: Vec<ModalidadShare> = orden
        .iter()
        .map(|m| {
            let cantidad = conteo.get(m.as_str()).copied().unwrap_or(0);
            ModalidadShare {
                modalidad: m.clone(),
                cantidad,
                porcentaje: porcentaje(cantidad, alumnos_activos),
            }
        })
        .collect();

    // Top por cantidad; a igual cantidad gana la declarada antes, por eso
    // sólo se reemplaza con cantidad estrictamente mayor
    let mut top: Option<&ModalidadShare> = None;
    for share in &distribucion_modalidad {
        if share.cantidad > 0 && top.is_none_or(|t| share.cantidad > t.cantidad) {
            top = Some(share);
        }
    }
    let modalidad_top = top.map(|s| s.modalidad.clone());

    DashboardStats {
        total_pagado: to_f64(total_pagado),
        total_vencido: to_f64(total_vencido),
        alumnos_pagados,
        alumnos_vencidos,
        alumnos_activos,
        porcentaje_fidelidad,
        distribucion_modalidad,
        modalidad_top,
    }
}

/// round(100 · parte / total), 0 con total en cero.
fn porcentaje(parte: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    ((100.0 * f64::from(parte)) / f64::from(total)).round() as u32
}
