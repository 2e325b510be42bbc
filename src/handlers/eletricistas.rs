// src/handlers/eletricistas.rs
//
// Buscas do cadastro usadas pelas telas de registro: autocomplete por
// nome e por prefixo.

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;

use crate::{
    common::error::AppError,
    config::AppState,
    models::equipes::{Eletricista, PrefixoResumo},
};

#[derive(Debug, Deserialize)]
pub struct BuscaQuery {
    // Termo parcial; busca case-insensitive
    pub q: String,
}

// GET /api/eletricistas/busca?q=
#[utoipa::path(
    get,
    path = "/api/eletricistas/busca",
    tag = "Eletricistas",
    params(("q" = String, Query, description = "Termo parcial do nome")),
    responses(
        (status = 200, description = "Eletricistas que batem com o termo", body = Vec<Eletricista>),
        (status = 401, description = "Não autorizado")
    ),
    security(("api_jwt" = []))
)]
pub async fn buscar_eletricistas(
    State(app_state): State<AppState>,
    Query(query): Query<BuscaQuery>,
) -> Result<Json<Vec<Eletricista>>, AppError> {
    // Menos de 3 caracteres devolveria o cadastro quase inteiro
    let termo = query.q.trim();
    if termo.len() < 3 {
        return Ok(Json(Vec::new()));
    }

    let eletricistas = app_state.eletricista_repo.buscar_por_nome(termo).await?;
    Ok(Json(eletricistas))
}

// GET /api/eletricistas/prefixos?q=
#[utoipa::path(
    get,
    path = "/api/eletricistas/prefixos",
    tag = "Eletricistas",
    params(("q" = String, Query, description = "Termo parcial do prefixo")),
    responses(
        (status = 200, description = "Prefixos que batem com o termo", body = Vec<PrefixoResumo>),
        (status = 401, description = "Não autorizado")
    ),
    security(("api_jwt" = []))
)]
pub async fn buscar_prefixos(
    State(app_state): State<AppState>,
    Query(query): Query<BuscaQuery>,
) -> Result<Json<Vec<PrefixoResumo>>, AppError> {
    let prefixos = app_state.eletricista_repo.buscar_prefixos(&query.q).await?;
    Ok(Json(prefixos))
}
