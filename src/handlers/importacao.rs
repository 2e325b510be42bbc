// src/handlers/importacao.rs

use axum::{
    Json,
    body::Bytes,
    extract::{Query, State},
};
use serde::Deserialize;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::UsuarioLogado,
    models::importacao::ResultadoImportacao,
};

#[derive(Debug, Deserialize)]
pub struct ImportacaoQuery {
    pub arquivo: Option<String>,
}

// POST /api/importacao/estrutura (apenas ADMIN)
// O corpo é o arquivo CSV cru; o nome vem na query para o registro do lote.
#[utoipa::path(
    post,
    path = "/api/importacao/estrutura",
    tag = "Importacao",
    params(("arquivo" = Option<String>, Query, description = "Nome do arquivo importado")),
    request_body(content = String, content_type = "text/csv"),
    responses(
        (status = 200, description = "Resumo da importação", body = ResultadoImportacao),
        (status = 400, description = "Arquivo ilegível ou sem linhas válidas"),
        (status = 403, description = "Apenas administradores importam a estrutura"),
        (status = 401, description = "Não autorizado")
    ),
    security(("api_jwt" = []))
)]
pub async fn importar_estrutura(
    State(app_state): State<AppState>,
    UsuarioLogado(usuario): UsuarioLogado,
    Query(query): Query<ImportacaoQuery>,
    corpo: Bytes,
) -> Result<Json<ResultadoImportacao>, AppError> {
    if !usuario.is_admin() {
        return Err(AppError::AcessoNegado);
    }

    let nome_arquivo = query.arquivo.as_deref().unwrap_or("estrutura.csv");
    let resultado = app_state
        .importacao_service
        .importar_estrutura(&usuario, nome_arquivo, &corpo)
        .await?;

    Ok(Json(resultado))
}
