//! Repositorio de pagos
//!
//! Acá se resuelve la deriva histórica de la clave foránea: según la
//! revisión del sistema la columna se llamó `alumno_id`, `id_estudiante`,
//! `studentId` o `id_student`. El canónico es `alumno_id` y los alias no
//! pasan de esta frontera.

use serde_json::Value;
use shared::models::{Pago, PagoCreate, PagoUpdate};

use super::{campo_i64, campo_monto, campo_texto};
use crate::db::{RawRow, StoreError, StoreResult, TabularStore};

/// Alias históricos de la clave foránea, el canónico primero.
const ALIAS_ALUMNO_ID: &[&str] = &["alumno_id", "id_estudiante", "studentId", "id_student"];

/// Fila cruda → modelo. Sin `id` o sin alumno referenciado no hay registro.
fn pago_de(row: &RawRow) -> Option<Pago> {
    let id = campo_i64(row, &["id"])?;
    let alumno_id = campo_i64(row, ALIAS_ALUMNO_ID)?;
    Some(Pago {
        id,
        alumno_id,
        nombre: campo_texto(row, &["nombre", "name"]),
        monto: campo_monto(row, &["monto", "amount"]),
        fecha_de_pago: campo_texto(row, &["fecha_de_pago", "date"]),
        fecha_de_vencimiento: campo_texto(row, &["fecha_de_vencimiento", "dueDate"]),
        modalidad: campo_texto(row, &["modalidad", "modality"]),
        telefono: campo_texto(row, &["telefono", "whatsapp", "phone"]),
    })
}

fn fila_de(
    alumno_id: i64,
    nombre: Option<&str>,
    monto: f64,
    fecha_de_pago: Option<&str>,
    fecha_de_vencimiento: Option<&str>,
    modalidad: Option<&str>,
    telefono: Option<&str>,
) -> RawRow {
    let mut row = RawRow::new();
    row.insert("alumno_id".into(), Value::from(alumno_id));
    row.insert("nombre".into(), Value::from(nombre.unwrap_or_default()));
    row.insert("monto".into(), Value::from(monto));
    row.insert(
        "fecha_de_pago".into(),
        Value::from(fecha_de_pago.unwrap_or_default()),
    );
    row.insert(
        "fecha_de_vencimiento".into(),
        Value::from(fecha_de_vencimiento.unwrap_or_default()),
    );
    row.insert(
        "modalidad".into(),
        Value::from(modalidad.unwrap_or_default()),
    );
    row.insert("telefono".into(), Value::from(telefono.unwrap_or_default()));
    row
}

/// Todos los pagos, en el orden del storage (el orden significativo lo
/// impone la reconciliación, no esta lista).
pub async fn find_all(store: &dyn TabularStore) -> StoreResult<Vec<Pago>> {
    let filas = store.fetch_all().await?;
    let pagos = filas
        .iter()
        .filter_map(|fila| {
            let pago = pago_de(fila);
            if pago.is_none() {
                tracing::warn!(?fila, "Fila de pago sin id o sin alumno, salteada");
            }
            pago
        })
        .collect();
    Ok(pagos)
}

pub async fn find_by_id(store: &dyn TabularStore, id: i64) -> StoreResult<Option<Pago>> {
    let pagos = find_all(store).await?;
    Ok(pagos.into_iter().find(|p| p.id == id))
}

pub async fn create(store: &dyn TabularStore, data: PagoCreate) -> StoreResult<Pago> {
    let row = fila_de(
        data.alumno_id,
        data.nombre.as_deref(),
        data.monto,
        data.fecha_de_pago.as_deref(),
        data.fecha_de_vencimiento.as_deref(),
        data.modalidad.as_deref(),
        data.telefono.as_deref(),
    );

    let id = store.insert(row).await?;
    Ok(Pago {
        id,
        alumno_id: data.alumno_id,
        nombre: data.nombre,
        monto: data.monto,
        fecha_de_pago: data.fecha_de_pago,
        fecha_de_vencimiento: data.fecha_de_vencimiento,
        modalidad: data.modalidad,
        telefono: data.telefono,
    })
}

pub async fn update(store: &dyn TabularStore, id: i64, data: PagoUpdate) -> StoreResult<Pago> {
    if find_by_id(store, id).await?.is_none() {
        return Err(StoreError::NotFound(format!("Pago {id}")));
    }

    let row = fila_de(
        data.alumno_id,
        data.nombre.as_deref(),
        data.monto,
        data.fecha_de_pago.as_deref(),
        data.fecha_de_vencimiento.as_deref(),
        data.modalidad.as_deref(),
        data.telefono.as_deref(),
    );
    store.update(id, row).await?;

    Ok(Pago {
        id,
        alumno_id: data.alumno_id,
        nombre: data.nombre,
        monto: data.monto,
        fecha_de_pago: data.fecha_de_pago,
        fecha_de_vencimiento: data.fecha_de_vencimiento,
        modalidad: data.modalidad,
        telefono: data.telefono,
    })
}

/// Borra por id. `false` si el pago ya no estaba. Independiente del
/// alumno: borrar pagos nunca toca el padrón.
pub async fn delete(store: &dyn TabularStore, id: i64) -> StoreResult<bool> {
    match store.delete(id).await {
        Ok(()) => Ok(true),
        Err(StoreError::NotFound(_)) => Ok(false),
        Err(e) => Err(e),
    }
}
