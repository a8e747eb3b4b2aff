//! API de recordatorios

mod handler;

use axum::{Router, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route(
        "/api/mailing/recordatorios",
        post(handler::enviar_recordatorios),
    )
}
