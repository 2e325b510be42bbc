// src/handlers/admin.rs
//
// Gestão de usuários, catálogo de motivos e correções manuais do cadastro.
// Todas as rotas exigem perfil ADMIN.

use axum::{
    Json,
    extract::{Path, State},
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::UsuarioLogado,
    models::auth::{AtualizarUsuarioPayload, CriarUsuarioPayload, Usuario},
    models::equipes::{AtualizarEletricistaPayload, Eletricista},
    models::registros::{CriarMotivoPayload, MotivoIndisponibilidade},
};

fn exigir_admin(usuario: &Usuario) -> Result<(), AppError> {
    if usuario.is_admin() { Ok(()) } else { Err(AppError::AcessoNegado) }
}

// POST /api/admin/usuarios
#[utoipa::path(
    post,
    path = "/api/admin/usuarios",
    tag = "Admin",
    request_body = CriarUsuarioPayload,
    responses(
        (status = 200, description = "Usuário criado", body = Usuario),
        (status = 409, description = "Login já em uso"),
        (status = 403, description = "Apenas administradores")
    ),
    security(("api_jwt" = []))
)]
pub async fn criar_usuario(
    State(app_state): State<AppState>,
    UsuarioLogado(usuario): UsuarioLogado,
    Json(payload): Json<CriarUsuarioPayload>,
) -> Result<Json<Usuario>, AppError> {
    exigir_admin(&usuario)?;
    payload.validate().map_err(AppError::ValidationError)?;

    let criado = app_state.auth_service.criar_usuario(&payload).await?;
    Ok(Json(criado))
}

// GET /api/admin/usuarios
#[utoipa::path(
    get,
    path = "/api/admin/usuarios",
    tag = "Admin",
    responses(
        (status = 200, description = "Todos os usuários", body = Vec<Usuario>),
        (status = 403, description = "Apenas administradores")
    ),
    security(("api_jwt" = []))
)]
pub async fn listar_usuarios(
    State(app_state): State<AppState>,
    UsuarioLogado(usuario): UsuarioLogado,
) -> Result<Json<Vec<Usuario>>, AppError> {
    exigir_admin(&usuario)?;
    let usuarios = app_state.usuario_repo.list_all().await?;
    Ok(Json(usuarios))
}

// PATCH /api/admin/usuarios/{id}
#[utoipa::path(
    patch,
    path = "/api/admin/usuarios/{id}",
    tag = "Admin",
    params(("id" = Uuid, Path, description = "ID do usuário")),
    request_body = AtualizarUsuarioPayload,
    responses(
        (status = 200, description = "Usuário atualizado", body = Usuario),
        (status = 404, description = "Usuário não encontrado"),
        (status = 403, description = "Apenas administradores")
    ),
    security(("api_jwt" = []))
)]
pub async fn atualizar_usuario(
    State(app_state): State<AppState>,
    UsuarioLogado(usuario): UsuarioLogado,
    Path(id): Path<Uuid>,
    Json(payload): Json<AtualizarUsuarioPayload>,
) -> Result<Json<Usuario>, AppError> {
    exigir_admin(&usuario)?;
    payload.validate().map_err(AppError::ValidationError)?;

    let atualizado = app_state
        .usuario_repo
        .update_flags(
            &app_state.db_pool,
            id,
            payload.ativo,
            payload.base_responsavel.as_deref(),
        )
        .await?;
    Ok(Json(atualizado))
}

// POST /api/admin/motivos
#[utoipa::path(
    post,
    path = "/api/admin/motivos",
    tag = "Admin",
    request_body = CriarMotivoPayload,
    responses(
        (status = 200, description = "Motivo criado", body = MotivoIndisponibilidade),
        (status = 409, description = "Descrição já cadastrada"),
        (status = 403, description = "Apenas administradores")
    ),
    security(("api_jwt" = []))
)]
pub async fn criar_motivo(
    State(app_state): State<AppState>,
    UsuarioLogado(usuario): UsuarioLogado,
    Json(payload): Json<CriarMotivoPayload>,
) -> Result<Json<MotivoIndisponibilidade>, AppError> {
    exigir_admin(&usuario)?;
    payload.validate().map_err(AppError::ValidationError)?;

    let motivo = app_state.motivo_repo.create(&payload.descricao).await?;
    Ok(Json(motivo))
}

// PATCH /api/admin/motivos/{id}/ativo/{ativo}
// Motivos nunca são apagados, só inativados: os registros antigos
// continuam apontando para eles.
#[utoipa::path(
    patch,
    path = "/api/admin/motivos/{id}/ativo/{ativo}",
    tag = "Admin",
    params(
        ("id" = Uuid, Path, description = "ID do motivo"),
        ("ativo" = bool, Path, description = "Novo estado")
    ),
    responses(
        (status = 200, description = "Motivo atualizado", body = MotivoIndisponibilidade),
        (status = 404, description = "Motivo não encontrado"),
        (status = 403, description = "Apenas administradores")
    ),
    security(("api_jwt" = []))
)]
pub async fn ativar_motivo(
    State(app_state): State<AppState>,
    UsuarioLogado(usuario): UsuarioLogado,
    Path((id, ativo)): Path<(Uuid, bool)>,
) -> Result<Json<MotivoIndisponibilidade>, AppError> {
    exigir_admin(&usuario)?;
    let motivo = app_state.motivo_repo.set_ativo(id, ativo).await?;
    Ok(Json(motivo))
}

// PATCH /api/admin/eletricistas/{id}
#[utoipa::path(
    patch,
    path = "/api/admin/eletricistas/{id}",
    tag = "Admin",
    params(("id" = Uuid, Path, description = "ID do eletricista")),
    request_body = AtualizarEletricistaPayload,
    responses(
        (status = 200, description = "Cadastro atualizado", body = Eletricista),
        (status = 404, description = "Eletricista não encontrado"),
        (status = 403, description = "Apenas administradores")
    ),
    security(("api_jwt" = []))
)]
pub async fn atualizar_eletricista(
    State(app_state): State<AppState>,
    UsuarioLogado(usuario): UsuarioLogado,
    Path(id): Path<Uuid>,
    Json(payload): Json<AtualizarEletricistaPayload>,
) -> Result<Json<Eletricista>, AppError> {
    exigir_admin(&usuario)?;
    payload.validate().map_err(AppError::ValidationError)?;

    let eletricista = app_state.eletricista_repo.atualizar(id, &payload).await?;
    Ok(Json(eletricista))
}
