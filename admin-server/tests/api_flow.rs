//! Tests de integración del API sobre el backend en memoria
//!
//! Levantan el router completo (sin red) y lo ejercitan con requests
//! reales. Las fechas se generan relativas a hoy porque el handler de
//! estadísticas clasifica contra el reloj de la zona del negocio.

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use chrono::{Duration, Utc};
use serde_json::{Value, json};
use tower::util::ServiceExt;

use admin_server::core::{Config, ServerState};

fn app() -> Router {
    let mut config = Config::with_overrides("memory", 0);
    config.admin_username = "admin".to_string();
    config.admin_password = "secreto".to_string();
    config.reminder_enabled = false;
    let state = ServerState::for_tests(config).expect("estado de test");
    admin_server::api::router(state)
}

/// Fecha ISO a `dias` días de hoy (negativo = pasado).
fn fecha_relativa(dias: i64) -> String {
    (Utc::now().date_naive() + Duration::days(dias))
        .format("%Y-%m-%d")
        .to_string()
}

async fn request(app: &Router, metodo: &str, uri: &str, cuerpo: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder()
        .method(metodo)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");

    let req = match cuerpo {
        Some(v) => builder.body(Body::from(v.to_string())).unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}

fn alumno_payload(nombre: &str, modalidad: &str) -> Value {
    json!({
        "nombre": nombre,
        "modalidad": modalidad,
        "agenda": { "monday": true, "wednesday": true },
        "hora": "18:30",
    })
}

fn pago_payload(alumno_id: i64, monto: f64, pago: Option<String>, venc: Option<String>) -> Value {
    json!({
        "alumno_id": alumno_id,
        "monto": monto,
        "fecha_de_pago": pago,
        "fecha_de_vencimiento": venc,
        "modalidad": "Presencial",
    })
}

#[tokio::test]
async fn test_health() {
    let app = app();
    let (status, body) = request(&app, "GET", "/api/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["storage_backend"], "memory");
}

#[tokio::test]
async fn test_login() {
    let app = app();

    let (status, body) = request(
        &app,
        "POST",
        "/api/auth/login",
        Some(json!({"username": "admin", "password": "secreto"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["token"].as_str().is_some_and(|t| !t.is_empty()));

    let (status, _) = request(
        &app,
        "POST",
        "/api/auth/login",
        Some(json!({"username": "admin", "password": "otra"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_crud_alumnos() {
    let app = app();

    // Alta: el servidor arma el string de días
    let (status, creado) = request(
        &app,
        "POST",
        "/api/alumnos",
        Some(alumno_payload("Carlos Rodríguez", "Presencial")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(creado["dias"], "Lun, Mié - 18:30");
    let id = creado["id"].as_i64().unwrap();

    // Listado ordenado por nombre
    request(&app, "POST", "/api/alumnos", Some(alumno_payload("Ana", "Online"))).await;
    let (_, lista) = request(&app, "GET", "/api/alumnos", None).await;
    let nombres: Vec<&str> = lista
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["nombre"].as_str().unwrap())
        .collect();
    assert_eq!(nombres, vec!["Ana", "Carlos Rodríguez"]);

    // Edición
    let mut editado = alumno_payload("Carlos R.", "Online");
    editado["hora"] = json!("19:00");
    let (status, actualizado) =
        request(&app, "PUT", &format!("/api/alumnos/{id}"), Some(editado)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(actualizado["nombre"], "Carlos R.");
    assert_eq!(actualizado["modalidad"], "Online");

    // Baja
    let (status, borrado) = request(&app, "DELETE", &format!("/api/alumnos/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(borrado, json!(true));

    // Editar lo borrado es 404
    let (status, _) = request(
        &app,
        "PUT",
        &format!("/api/alumnos/{id}"),
        Some(alumno_payload("Nadie", "Online")),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_validacion_de_payloads() {
    let app = app();

    let (status, _) = request(
        &app,
        "POST",
        "/api/alumnos",
        Some(alumno_payload("", "Presencial")),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = request(
        &app,
        "POST",
        "/api/pagos",
        Some(pago_payload(1, -50.0, None, None)),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_pagos_llevan_estado_derivado() {
    let app = app();

    // Pago al día: vence en 10 días, pago ya registrado
    let (status, _) = request(
        &app,
        "POST",
        "/api/pagos",
        Some(pago_payload(
            1,
            15000.0,
            Some(fecha_relativa(-5)),
            Some(fecha_relativa(10)),
        )),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // Vencido hace una semana
    request(
        &app,
        "POST",
        "/api/pagos",
        Some(pago_payload(2, 12000.0, Some(fecha_relativa(-40)), Some(fecha_relativa(-7)))),
    )
    .await;

    let (_, lista) = request(&app, "GET", "/api/pagos", None).await;
    let estados: Vec<&str> = lista
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["estado"].as_str().unwrap())
        .collect();
    assert_eq!(estados, vec!["Pagado", "Vencido"]);
}

#[tokio::test]
async fn test_statistics_fin_a_fin() {
    let app = app();

    for (nombre, modalidad) in [
        ("Carlos", "Presencial"),
        ("María", "Online"),
        ("Juan", "Presencial"),
        ("Laura", "Híbrido"),
    ] {
        request(&app, "POST", "/api/alumnos", Some(alumno_payload(nombre, modalidad))).await;
    }
    // Ids por orden de alta: Carlos=1, María=2, Juan=3, Laura=4

    // Carlos (id 1): pagado, vence en 5 días
    request(
        &app,
        "POST",
        "/api/pagos",
        Some(pago_payload(1, 15000.0, Some(fecha_relativa(-25)), Some(fecha_relativa(5)))),
    )
    .await;
    // María (id 2): vencida hace 5 días
    request(
        &app,
        "POST",
        "/api/pagos",
        Some(pago_payload(2, 12000.0, Some(fecha_relativa(-35)), Some(fecha_relativa(-5)))),
    )
    .await;
    // Juan (id 3): abandonó hace 3 meses
    request(
        &app,
        "POST",
        "/api/pagos",
        Some(pago_payload(3, 10000.0, Some(fecha_relativa(-120)), Some(fecha_relativa(-90)))),
    )
    .await;
    // Laura (id 4): sin pagos

    let (status, body) = request(&app, "GET", "/api/statistics", None).await;
    assert_eq!(status, StatusCode::OK);

    let stats = &body["stats"];
    assert_eq!(stats["alumnos_activos"], 3);
    assert_eq!(stats["alumnos_pagados"], 1);
    assert_eq!(stats["alumnos_vencidos"], 1);
    assert_eq!(stats["total_pagado"], 15000.0);
    assert_eq!(stats["total_vencido"], 12000.0);
    assert_eq!(stats["porcentaje_fidelidad"], 33);

    // Orden de presentación: Pagado primero, No renovado al final
    let alumnos = body["alumnos"].as_array().unwrap();
    assert_eq!(alumnos.len(), 4);
    assert_eq!(alumnos[0]["estado"], "Pagado");
    assert_eq!(alumnos[3]["estado"], "No renovado");
}

#[tokio::test]
async fn test_statistics_padron_vacio() {
    let app = app();
    let (status, body) = request(&app, "GET", "/api/statistics", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["stats"]["porcentaje_fidelidad"], 0);
    assert_eq!(body["stats"]["total_pagado"], 0.0);
    assert_eq!(body["alumnos"], json!([]));
}
