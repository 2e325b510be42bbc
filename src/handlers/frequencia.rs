// src/handlers/frequencia.rs
//
// Registros diários: frequência em lote, indisponibilidade, remanejamento
// e a visão de pendentes do supervisor. Tudo atrás do auth_guard.

use axum::{
    Json,
    extract::{Query, State},
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::{Value, json};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::UsuarioLogado,
    models::registros::{
        Indisponibilidade, MotivoIndisponibilidade, Remanejamento, RemanejarPayload,
        SalvarFrequenciaPayload, SalvarIndisponibilidadePayload,
    },
    models::relatorios::{PendentesResposta, ResumoDiaResposta},
};

// POST /api/frequencia
#[utoipa::path(
    post,
    path = "/api/frequencia",
    tag = "Registros",
    request_body = SalvarFrequenciaPayload,
    responses(
        (status = 200, description = "Lote salvo; retorna o total de associações gravadas"),
        (status = 409, description = "Alguma associação conflita com registro existente"),
        (status = 401, description = "Não autorizado")
    ),
    security(("api_jwt" = []))
)]
pub async fn salvar_frequencia(
    State(app_state): State<AppState>,
    UsuarioLogado(usuario): UsuarioLogado,
    Json(payload): Json<SalvarFrequenciaPayload>,
) -> Result<Json<Value>, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let total = app_state
        .frequencia_service
        .salvar_frequencia(&usuario, &payload)
        .await?;

    Ok(Json(json!({ "totalSalvo": total })))
}

// POST /api/indisponibilidades
#[utoipa::path(
    post,
    path = "/api/indisponibilidades",
    tag = "Registros",
    request_body = SalvarIndisponibilidadePayload,
    responses(
        (status = 200, description = "Indisponibilidade registrada", body = Indisponibilidade),
        (status = 409, description = "Conflita com registro existente no dia"),
        (status = 404, description = "Eletricista ou motivo não encontrado"),
        (status = 401, description = "Não autorizado")
    ),
    security(("api_jwt" = []))
)]
pub async fn salvar_indisponibilidade(
    State(app_state): State<AppState>,
    UsuarioLogado(usuario): UsuarioLogado,
    Json(payload): Json<SalvarIndisponibilidadePayload>,
) -> Result<Json<Indisponibilidade>, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let indisponibilidade = app_state
        .frequencia_service
        .salvar_indisponibilidade(&usuario, &payload)
        .await?;

    Ok(Json(indisponibilidade))
}

// POST /api/remanejamentos
#[utoipa::path(
    post,
    path = "/api/remanejamentos",
    tag = "Registros",
    request_body = RemanejarPayload,
    responses(
        (status = 200, description = "Remanejamento registrado", body = Remanejamento),
        (status = 409, description = "Eletricista já tem registro ou remanejamento no dia"),
        (status = 404, description = "Eletricista não encontrado"),
        (status = 401, description = "Não autorizado")
    ),
    security(("api_jwt" = []))
)]
pub async fn remanejar(
    State(app_state): State<AppState>,
    UsuarioLogado(usuario): UsuarioLogado,
    Json(payload): Json<RemanejarPayload>,
) -> Result<Json<Remanejamento>, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let remanejamento = app_state
        .remanejamento_service
        .remanejar(&usuario, &payload)
        .await?;

    Ok(Json(remanejamento))
}

#[derive(Debug, Deserialize)]
pub struct PendentesQuery {
    pub supervisor: Option<String>,
    pub data: Option<NaiveDate>,
}

// GET /api/frequencia/pendentes
#[utoipa::path(
    get,
    path = "/api/frequencia/pendentes",
    tag = "Registros",
    params(
        ("supervisor" = Option<String>, Query, description = "Supervisão a consultar; padrão é a do usuário"),
        ("data" = Option<NaiveDate>, Query, description = "Dia consultado; padrão é hoje")
    ),
    responses(
        (status = 200, description = "Eletricistas ainda sem registro no dia", body = PendentesResposta),
        (status = 400, description = "Usuário sem supervisão e sem parâmetro"),
        (status = 401, description = "Não autorizado")
    ),
    security(("api_jwt" = []))
)]
pub async fn pendentes(
    State(app_state): State<AppState>,
    UsuarioLogado(usuario): UsuarioLogado,
    Query(query): Query<PendentesQuery>,
) -> Result<Json<PendentesResposta>, AppError> {
    let resposta = app_state
        .frequencia_service
        .pendentes(&usuario, query.supervisor.as_deref(), query.data)
        .await?;

    Ok(Json(resposta))
}

// GET /api/frequencia/resumo
#[utoipa::path(
    get,
    path = "/api/frequencia/resumo",
    tag = "Registros",
    params(
        ("supervisor" = Option<String>, Query, description = "Supervisão a consultar; padrão é a do usuário"),
        ("data" = Option<NaiveDate>, Query, description = "Dia consultado; padrão é hoje")
    ),
    responses(
        (status = 200, description = "Estado resolvido de cada eletricista da supervisão no dia", body = ResumoDiaResposta),
        (status = 400, description = "Usuário sem supervisão e sem parâmetro"),
        (status = 401, description = "Não autorizado")
    ),
    security(("api_jwt" = []))
)]
pub async fn resumo_do_dia(
    State(app_state): State<AppState>,
    UsuarioLogado(usuario): UsuarioLogado,
    Query(query): Query<PendentesQuery>,
) -> Result<Json<ResumoDiaResposta>, AppError> {
    let resposta = app_state
        .frequencia_service
        .resumo_do_dia(&usuario, query.supervisor.as_deref(), query.data)
        .await?;

    Ok(Json(resposta))
}

// GET /api/motivos (catálogo, para o formulário de indisponibilidade)
#[utoipa::path(
    get,
    path = "/api/motivos",
    tag = "Registros",
    responses(
        (status = 200, description = "Catálogo de motivos", body = Vec<MotivoIndisponibilidade>),
        (status = 401, description = "Não autorizado")
    ),
    security(("api_jwt" = []))
)]
pub async fn listar_motivos(
    State(app_state): State<AppState>,
) -> Result<Json<Vec<MotivoIndisponibilidade>>, AppError> {
    let motivos = app_state.motivo_repo.list_all().await?;
    Ok(Json(motivos))
}
