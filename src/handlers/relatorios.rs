// src/handlers/relatorios.rs
//
// Relatórios agregados por faixa de datas. A faixa é inclusiva nas duas
// pontas; sem parâmetros, o relatório é só do dia corrente.

use axum::{
    Json,
    extract::{Query, State},
};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::{
    common::error::AppError,
    config::AppState,
    models::relatorios::{
        RelatorioDisponibilidade, RelatorioGeral, RelatorioPrefixos, RelatorioSupervisores,
    },
};

#[derive(Debug, Deserialize)]
pub struct FaixaQuery {
    pub data_inicio: Option<NaiveDate>,
    pub data_fim: Option<NaiveDate>,
}

// GET /api/relatorios/geral
#[utoipa::path(
    get,
    path = "/api/relatorios/geral",
    tag = "Relatorios",
    params(
        ("data_inicio" = Option<NaiveDate>, Query, description = "Início da faixa (inclusivo); padrão é hoje"),
        ("data_fim" = Option<NaiveDate>, Query, description = "Fim da faixa (inclusivo); padrão é data_inicio")
    ),
    responses(
        (status = 200, description = "Distribuição Presente/motivos/Não registrado na faixa", body = RelatorioGeral),
        (status = 400, description = "Faixa de datas invertida"),
        (status = 401, description = "Não autorizado")
    ),
    security(("api_jwt" = []))
)]
pub async fn relatorio_geral(
    State(app_state): State<AppState>,
    Query(faixa): Query<FaixaQuery>,
) -> Result<Json<RelatorioGeral>, AppError> {
    let relatorio = app_state
        .relatorio_service
        .relatorio_geral(faixa.data_inicio, faixa.data_fim)
        .await?;
    Ok(Json(relatorio))
}

// GET /api/relatorios/supervisores
#[utoipa::path(
    get,
    path = "/api/relatorios/supervisores",
    tag = "Relatorios",
    params(
        ("data_inicio" = Option<NaiveDate>, Query, description = "Início da faixa (inclusivo)"),
        ("data_fim" = Option<NaiveDate>, Query, description = "Fim da faixa (inclusivo)")
    ),
    responses(
        (status = 200, description = "Presença por supervisão, da maior para a menor", body = RelatorioSupervisores),
        (status = 400, description = "Faixa de datas invertida"),
        (status = 401, description = "Não autorizado")
    ),
    security(("api_jwt" = []))
)]
pub async fn relatorio_supervisores(
    State(app_state): State<AppState>,
    Query(faixa): Query<FaixaQuery>,
) -> Result<Json<RelatorioSupervisores>, AppError> {
    let relatorio = app_state
        .relatorio_service
        .relatorio_supervisores(faixa.data_inicio, faixa.data_fim)
        .await?;
    Ok(Json(relatorio))
}

// GET /api/relatorios/prefixos
#[utoipa::path(
    get,
    path = "/api/relatorios/prefixos",
    tag = "Relatorios",
    params(
        ("data_inicio" = Option<NaiveDate>, Query, description = "Início da faixa (inclusivo)"),
        ("data_fim" = Option<NaiveDate>, Query, description = "Fim da faixa (inclusivo)")
    ),
    responses(
        (status = 200, description = "Indisponibilidades por prefixo na faixa", body = RelatorioPrefixos),
        (status = 400, description = "Faixa de datas invertida"),
        (status = 401, description = "Não autorizado")
    ),
    security(("api_jwt" = []))
)]
pub async fn relatorio_prefixos(
    State(app_state): State<AppState>,
    Query(faixa): Query<FaixaQuery>,
) -> Result<Json<RelatorioPrefixos>, AppError> {
    let relatorio = app_state
        .relatorio_service
        .relatorio_prefixos(faixa.data_inicio, faixa.data_fim)
        .await?;
    Ok(Json(relatorio))
}

// GET /api/relatorios/disponibilidade
#[utoipa::path(
    get,
    path = "/api/relatorios/disponibilidade",
    tag = "Relatorios",
    params(
        ("data_inicio" = Option<NaiveDate>, Query, description = "Início da faixa (inclusivo)"),
        ("data_fim" = Option<NaiveDate>, Query, description = "Fim da faixa (inclusivo)")
    ),
    responses(
        (status = 200, description = "Eletricistas sem nenhum registro em toda a faixa", body = RelatorioDisponibilidade),
        (status = 400, description = "Faixa de datas invertida"),
        (status = 401, description = "Não autorizado")
    ),
    security(("api_jwt" = []))
)]
pub async fn relatorio_disponibilidade(
    State(app_state): State<AppState>,
    Query(faixa): Query<FaixaQuery>,
) -> Result<Json<RelatorioDisponibilidade>, AppError> {
    let relatorio = app_state
        .relatorio_service
        .relatorio_disponibilidade(faixa.data_inicio, faixa.data_fim)
        .await?;
    Ok(Json(relatorio))
}
