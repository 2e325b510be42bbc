// src/services/auth.rs

use bcrypt::{hash, verify};
use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::UsuarioRepository,
    models::auth::{Claims, CriarUsuarioPayload, Usuario},
};

#[derive(Clone)]
pub struct AuthService {
    usuario_repo: UsuarioRepository,
    jwt_secret: String,
}

impl AuthService {
    pub fn new(usuario_repo: UsuarioRepository, jwt_secret: String) -> Self {
        Self { usuario_repo, jwt_secret }
    }

    pub async fn login(&self, login: &str, senha: &str) -> Result<String, AppError> {
        let usuario = self
            .usuario_repo
            .find_by_login(login)
            .await?
            .ok_or(AppError::CredenciaisInvalidas)?;

        let senha_clone = senha.to_owned();
        let senha_hash_clone = usuario.senha_hash.clone();

        // Executa a verificação bcrypt em um thread separado
        let senha_valida = tokio::task::spawn_blocking(move || {
            verify(&senha_clone, &senha_hash_clone)
        })
        .await
        .map_err(|e| anyhow::anyhow!("Falha na task de verificação de senha: {}", e))??;

        if !senha_valida {
            return Err(AppError::CredenciaisInvalidas);
        }

        // Usuário desativado não entra, mesmo com a senha certa
        if !usuario.ativo {
            return Err(AppError::UsuarioInativo);
        }

        self.create_token(usuario.id)
    }

    // Criação de usuário pela tela de admin
    pub async fn criar_usuario(&self, payload: &CriarUsuarioPayload) -> Result<Usuario, AppError> {
        let senha_clone = payload.senha.clone();
        let senha_hash = tokio::task::spawn_blocking(move || {
            hash(&senha_clone, bcrypt::DEFAULT_COST)
        })
        .await
        .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;

        self.usuario_repo
            .create(
                &payload.nome,
                &payload.login,
                &senha_hash,
                &payload.perfil,
                payload.base_responsavel.as_deref(),
            )
            .await
    }

    pub async fn validate_token(&self, token: &str) -> Result<Usuario, AppError> {
        let validation = Validation::default();
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_ref()),
            &validation,
        )
        .map_err(|_| AppError::TokenInvalido)?;

        let usuario = self
            .usuario_repo
            .find_by_id(token_data.claims.sub)
            .await?
            .ok_or_else(|| AppError::NaoEncontrado("Usuário".to_string()))?;

        if !usuario.ativo {
            return Err(AppError::UsuarioInativo);
        }

        Ok(usuario)
    }

    fn create_token(&self, user_id: Uuid) -> Result<String, AppError> {
        let now = Utc::now();
        let expires_at = now + chrono::Duration::days(7);

        let claims = Claims {
            sub: user_id,
            exp: expires_at.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_ref()),
        )?)
    }
}
