use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Credenciais inválidas")]
    CredenciaisInvalidas,

    #[error("Usuário inativo")]
    UsuarioInativo,

    #[error("Token inválido")]
    TokenInvalido,

    #[error("Acesso negado")]
    AcessoNegado,

    #[error("{0} não encontrado")]
    NaoEncontrado(String),

    #[error("{0}")]
    DataInvalida(String),

    #[error("Login já existe")]
    LoginJaExiste,

    #[error("Motivo já cadastrado")]
    MotivoJaCadastrado,

    // Rejeições de regra de negócio (duplicidade de frequência,
    // indisponibilidade no mesmo dia, remanejamento repetido...).
    // A mensagem nomeia o conflito e é devolvida ao chamador.
    #[error("{0}")]
    ConflitoDeRegistro(String),

    // Variante para erros de banco de dados
    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    // Variante genérica para qualquer outro erro inesperado.
    // `anyhow::Error` é ótimo para capturar o contexto do erro.
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            // Retorna todos os detalhes da validação, campo a campo.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "Um ou mais campos são inválidos.",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::CredenciaisInvalidas => {
                (StatusCode::UNAUTHORIZED, "Login ou senha inválidos.".to_string())
            }
            AppError::UsuarioInativo => {
                (StatusCode::UNAUTHORIZED, "Usuário inativo.".to_string())
            }
            AppError::TokenInvalido => (
                StatusCode::UNAUTHORIZED,
                "Token de autenticação inválido ou ausente.".to_string(),
            ),
            AppError::AcessoNegado => (
                StatusCode::FORBIDDEN,
                "Seu perfil não tem acesso a esta operação.".to_string(),
            ),
            AppError::NaoEncontrado(ref o) => {
                (StatusCode::NOT_FOUND, format!("{o} não encontrado."))
            }
            AppError::DataInvalida(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::LoginJaExiste => {
                (StatusCode::CONFLICT, "Este login já está em uso.".to_string())
            }
            AppError::MotivoJaCadastrado => (
                StatusCode::CONFLICT,
                "Já existe um motivo com esta descrição.".to_string(),
            ),
            AppError::ConflitoDeRegistro(msg) => (StatusCode::CONFLICT, msg),

            // Todos os outros erros (DatabaseError, InternalServerError) viram 500.
            // O `tracing` vai logar a mensagem detalhada que `thiserror` nos deu.
            ref e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Ocorreu um erro inesperado: {e}"),
                )
            }
        };

        // Resposta padrão para erros simples que só têm uma mensagem.
        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
