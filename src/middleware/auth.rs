// src/middleware/auth.rs

use axum::{
    extract::{FromRequestParts, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};

use crate::{common::error::AppError, config::AppState, models::auth::Usuario};

// Valida o Bearer token e injeta o usuário nos extensions da requisição.
// Todas as rotas protegidas passam por aqui.
pub async fn auth_guard(
    State(app_state): State<AppState>,
    mut request: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get("Authorization")
        .and_then(|value| value.to_str().ok());

    if let Some(auth_header) = auth_header {
        if let Some(token) = auth_header.strip_prefix("Bearer ") {
            let usuario = app_state.auth_service.validate_token(token).await?;
            request.extensions_mut().insert(usuario);
            return Ok(next.run(request).await);
        }
    }

    Err(AppError::TokenInvalido)
}

// Extrator para obter o usuário autenticado diretamente nos handlers
pub struct UsuarioLogado(pub Usuario);

impl<S> FromRequestParts<S> for UsuarioLogado
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Usuario>()
            .cloned()
            .map(UsuarioLogado)
            .ok_or(AppError::TokenInvalido)
    }
}
