//! Repositorio de alumnos

use serde_json::Value;
use shared::models::{Alumno, AlumnoCreate, AlumnoUpdate};

use super::{campo_i64, campo_texto};
use crate::db::{RawRow, StoreError, StoreResult, TabularStore};

/// Fila cruda → modelo. Sin `id` no hay registro.
fn alumno_de(row: &RawRow) -> Option<Alumno> {
    let id = campo_i64(row, &["id"])?;
    Some(Alumno {
        id,
        nombre: campo_texto(row, &["nombre", "name"]).unwrap_or_default(),
        modalidad: campo_texto(row, &["modalidad", "modality"]).unwrap_or_default(),
        fecha_de_nacimiento: campo_texto(row, &["fecha_de_nacimiento", "birthDate"]),
        telefono: campo_texto(row, &["telefono", "whatsapp", "phone"]),
        dias: campo_texto(row, &["dias", "schedule"]),
        fecha_de_inicio: campo_texto(row, &["fecha_de_inicio", "startService"]),
        ultima_antro: campo_texto(row, &["ultima_antro", "lastAntro"]),
        plan: campo_texto(row, &["plan", "planUrl"]),
        email: campo_texto(row, &["email"]),
    })
}

fn fila_de(
    nombre: &str,
    modalidad: &str,
    fecha_de_nacimiento: Option<&str>,
    telefono: Option<&str>,
    dias: &str,
    fecha_de_inicio: Option<&str>,
    ultima_antro: Option<&str>,
    plan: Option<&str>,
    email: Option<&str>,
) -> RawRow {
    let mut row = RawRow::new();
    row.insert("nombre".into(), Value::from(nombre));
    row.insert("modalidad".into(), Value::from(modalidad));
    row.insert(
        "fecha_de_nacimiento".into(),
        Value::from(fecha_de_nacimiento.unwrap_or_default()),
    );
    row.insert("telefono".into(), Value::from(telefono.unwrap_or_default()));
    row.insert("dias".into(), Value::from(dias));
    row.insert(
        "fecha_de_inicio".into(),
        Value::from(fecha_de_inicio.unwrap_or_default()),
    );
    row.insert(
        "ultima_antro".into(),
        Value::from(ultima_antro.unwrap_or_default()),
    );
    row.insert("plan".into(), Value::from(plan.unwrap_or_default()));
    row.insert("email".into(), Value::from(email.unwrap_or_default()));
    row
}

/// Todos los alumnos, ordenados por nombre (case-insensitive), como
/// siempre los listó el panel.
pub async fn find_all(store: &dyn TabularStore) -> StoreResult<Vec<Alumno>> {
    let filas = store.fetch_all().await?;
    let mut alumnos: Vec<Alumno> = filas
        .iter()
        .filter_map(|fila| {
            let alumno = alumno_de(fila);
            if alumno.is_none() {
                tracing::warn!(?fila, "Fila de alumno sin id, salteada");
            }
            alumno
        })
        .collect();

    alumnos.sort_by_key(|a| a.nombre.to_lowercase());
    Ok(alumnos)
}

pub async fn find_by_id(store: &dyn TabularStore, id: i64) -> StoreResult<Option<Alumno>> {
    let alumnos = find_all(store).await?;
    Ok(alumnos.into_iter().find(|a| a.id == id))
}

pub async fn create(store: &dyn TabularStore, data: AlumnoCreate) -> StoreResult<Alumno> {
    let dias = data.dias_string();
    let row = fila_de(
        &data.nombre,
        &data.modalidad,
        data.fecha_de_nacimiento.as_deref(),
        data.telefono.as_deref(),
        &dias,
        data.fecha_de_inicio.as_deref(),
        data.ultima_antro.as_deref(),
        data.plan.as_deref(),
        data.email.as_deref(),
    );

    let id = store.insert(row).await?;
    Ok(Alumno {
        id,
        nombre: data.nombre,
        modalidad: data.modalidad,
        fecha_de_nacimiento: data.fecha_de_nacimiento,
        telefono: data.telefono,
        dias: Some(dias),
        fecha_de_inicio: data.fecha_de_inicio,
        ultima_antro: data.ultima_antro,
        plan: data.plan,
        email: data.email,
    })
}

pub async fn update(
    store: &dyn TabularStore,
    id: i64,
    data: AlumnoUpdate,
) -> StoreResult<Alumno> {
    if find_by_id(store, id).await?.is_none() {
        return Err(StoreError::NotFound(format!("Alumno {id}")));
    }

    let dias = data.dias_string();
    let row = fila_de(
        &data.nombre,
        &data.modalidad,
        data.fecha_de_nacimiento.as_deref(),
        data.telefono.as_deref(),
        &dias,
        data.fecha_de_inicio.as_deref(),
        data.ultima_antro.as_deref(),
        data.plan.as_deref(),
        data.email.as_deref(),
    );
    store.update(id, row).await?;

    Ok(Alumno {
        id,
        nombre: data.nombre,
        modalidad: data.modalidad,
        fecha_de_nacimiento: data.fecha_de_nacimiento,
        telefono: data.telefono,
        dias: Some(dias),
        fecha_de_inicio: data.fecha_de_inicio,
        ultima_antro: data.ultima_antro,
        plan: data.plan,
        email: data.email,
    })
}

/// Borra por id. `false` si el alumno ya no estaba.
pub async fn delete(store: &dyn TabularStore, id: i64) -> StoreResult<bool> {
    match store.delete(id).await {
        Ok(()) => Ok(true),
        Err(StoreError::NotFound(_)) => Ok(false),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::fila_de_pares;
    use serde_json::json;

    #[test]
    fn test_alumno_de_fila_de_planilla() {
        // Celdas: todo string, id posicional
        let fila = fila_de_pares(&[
            ("id", json!(3)),
            ("nombre", json!("Carlos Rodríguez")),
            ("modalidad", json!("Presencial")),
            ("fecha_de_nacimiento", json!("15/03/1990")),
            ("whatsapp", json!("3513274314")),
            ("dias", json!("Lun, Mié - 18:30")),
            ("plan", json!("https://drive.google.com/abc")),
        ]);

        let alumno = alumno_de(&fila).unwrap();
        assert_eq!(alumno.id, 3);
        assert_eq!(alumno.nombre, "Carlos Rodríguez");
        // whatsapp cae en telefono
        assert_eq!(alumno.telefono.as_deref(), Some("3513274314"));
        assert_eq!(alumno.email, None);
    }

    #[test]
    fn test_alumno_de_fila_sin_id() {
        let fila = fila_de_pares(&[("nombre", json!("Sin Id"))]);
        assert!(alumno_de(&fila).is_none());
    }

    #[tokio::test]
    async fn test_find_all_ordena_por_nombre() {
        let store = crate::db::memory::MemoryStore::new();
        for nombre in ["zulema", "Ana", "beto"] {
            let mut row = RawRow::new();
            row.insert("nombre".into(), json!(nombre));
            row.insert("modalidad".into(), json!("Online"));
            store.insert(row).await.unwrap();
        }

        let alumnos = find_all(&store).await.unwrap();
        let nombres: Vec<&str> = alumnos.iter().map(|a| a.nombre.as_str()).collect();
        assert_eq!(nombres, vec!["Ana", "beto", "zulema"]);
    }

    #[tokio::test]
    async fn test_create_arma_dias() {
        let store = crate::db::memory::MemoryStore::new();
        let data = AlumnoCreate {
            nombre: "Ana".into(),
            modalidad: "Online".into(),
            fecha_de_nacimiento: None,
            telefono: None,
            agenda: shared::models::Agenda {
                monday: true,
                wednesday: true,
                ..Default::default()
            },
            hora: Some("18:30".into()),
            fecha_de_inicio: None,
            ultima_antro: None,
            plan: None,
            email: None,
        };

        let alumno = create(&store, data).await.unwrap();
        assert_eq!(alumno.dias.as_deref(), Some("Lun, Mié - 18:30"));

        let releido = find_by_id(&store, alumno.id).await.unwrap().unwrap();
        assert_eq!(releido.dias.as_deref(), Some("Lun, Mié - 18:30"));
    }

    #[tokio::test]
    async fn test_update_inexistente() {
        let store = crate::db::memory::MemoryStore::new();
        let data = AlumnoUpdate {
            nombre: "Ana".into(),
            modalidad: "Online".into(),
            fecha_de_nacimiento: None,
            telefono: None,
            agenda: Default::default(),
            hora: None,
            fecha_de_inicio: None,
            ultima_antro: None,
            plan: None,
            email: None,
        };
        assert!(matches!(
            update(&store, 42, data).await,
            Err(StoreError::NotFound(_))
        ));
    }
}
