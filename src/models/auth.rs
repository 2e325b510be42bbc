// src/models/auth.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// Perfis aceitos no cadastro de usuários
pub const PERFIL_ADMIN: &str = "ADMIN";
pub const PERFIL_SUPERVISOR: &str = "SUPERVISOR";
pub const PERFIL_FISCAL: &str = "FISCAL";

// Sentinela de escopo: usuário responsável por todas as supervisões
pub const ESCOPO_TODAS: &str = "ALL";

// Representa um usuário vindo do banco de dados
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Usuario {
    pub id: Uuid,
    pub nome: String,
    pub login: String,

    #[serde(skip_serializing)] // IMPORTANTE para segurança
    pub senha_hash: String,

    pub perfil: String,
    pub base_responsavel: Option<String>,
    pub ativo: bool,
    pub criado_em: DateTime<Utc>,
}

impl Usuario {
    pub fn is_admin(&self) -> bool {
        self.perfil == PERFIL_ADMIN
    }
}

// Dados para login
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginPayload {
    #[validate(length(min = 3, message = "O login deve ter no mínimo 3 caracteres."))]
    pub login: String,
    #[validate(length(min = 6, message = "A senha deve ter no mínimo 6 caracteres."))]
    pub senha: String,
}

// Dados para criação de usuário (apenas ADMIN)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CriarUsuarioPayload {
    #[validate(length(min = 3, message = "O nome deve ter no mínimo 3 caracteres."))]
    pub nome: String,
    #[validate(length(min = 3, message = "O login deve ter no mínimo 3 caracteres."))]
    pub login: String,
    #[validate(length(min = 6, message = "A senha deve ter no mínimo 6 caracteres."))]
    pub senha: String,
    #[validate(custom(function = "validar_perfil"))]
    pub perfil: String,
    pub base_responsavel: Option<String>,
}

// Ativação/desativação e troca de escopo de um usuário existente
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AtualizarUsuarioPayload {
    pub ativo: Option<bool>,
    pub base_responsavel: Option<String>,
}

fn validar_perfil(perfil: &str) -> Result<(), validator::ValidationError> {
    match perfil {
        PERFIL_ADMIN | PERFIL_SUPERVISOR | PERFIL_FISCAL => Ok(()),
        _ => {
            let mut err = validator::ValidationError::new("perfil_invalido");
            err.message = Some("Perfil deve ser ADMIN, SUPERVISOR ou FISCAL.".into());
            Err(err)
        }
    }
}

// Resposta de autenticação com o token
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    pub token: String,
}

// Estrutura de dados ("claims") dentro do JWT
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,  // Subject (ID do usuário)
    pub exp: usize, // Expiration time (quando o token expira)
    pub iat: usize, // Issued At (quando o token foi criado)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perfil_fora_do_catalogo_e_rejeitado() {
        let payload = CriarUsuarioPayload {
            nome: "Fulano de Tal".to_string(),
            login: "fulano".to_string(),
            senha: "segredo1".to_string(),
            perfil: "GERENTE".to_string(),
            base_responsavel: None,
        };
        assert!(payload.validate().is_err());
    }

    #[test]
    fn perfis_conhecidos_passam_na_validacao() {
        for perfil in [PERFIL_ADMIN, PERFIL_SUPERVISOR, PERFIL_FISCAL] {
            let payload = CriarUsuarioPayload {
                nome: "Fulano de Tal".to_string(),
                login: "fulano".to_string(),
                senha: "segredo1".to_string(),
                perfil: perfil.to_string(),
                base_responsavel: Some("SUP CAMPO LESTE".to_string()),
            };
            assert!(payload.validate().is_ok(), "perfil {perfil} deveria ser aceito");
        }
    }
}
