// src/db/usuario_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{common::error::AppError, models::auth::Usuario};

// O repositório de usuários, responsável por todas as interações com a tabela 'usuarios'
#[derive(Clone)]
pub struct UsuarioRepository {
    pool: PgPool,
}

impl UsuarioRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Busca um usuário pelo seu login
    pub async fn find_by_login(&self, login: &str) -> Result<Option<Usuario>, AppError> {
        let usuario = sqlx::query_as::<_, Usuario>("SELECT * FROM usuarios WHERE login = $1")
            .bind(login)
            .fetch_optional(&self.pool)
            .await?;
        Ok(usuario)
    }

    // Busca um usuário pelo seu ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Usuario>, AppError> {
        let usuario = sqlx::query_as::<_, Usuario>("SELECT * FROM usuarios WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(usuario)
    }

    pub async fn list_all(&self) -> Result<Vec<Usuario>, AppError> {
        let usuarios = sqlx::query_as::<_, Usuario>("SELECT * FROM usuarios ORDER BY nome")
            .fetch_all(&self.pool)
            .await?;
        Ok(usuarios)
    }

    // Cria um novo usuário, com tratamento específico para login duplicado
    pub async fn create(
        &self,
        nome: &str,
        login: &str,
        senha_hash: &str,
        perfil: &str,
        base_responsavel: Option<&str>,
    ) -> Result<Usuario, AppError> {
        let usuario = sqlx::query_as::<_, Usuario>(
            r#"
            INSERT INTO usuarios (nome, login, senha_hash, perfil, base_responsavel)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(nome)
        .bind(login)
        .bind(senha_hash)
        .bind(perfil)
        .bind(base_responsavel)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::LoginJaExiste;
                }
            }
            AppError::DatabaseError(e)
        })?;

        Ok(usuario)
    }

    // Ativação/desativação e troca de escopo. COALESCE mantém o valor atual
    // quando o campo não veio no payload.
    pub async fn update_flags<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        ativo: Option<bool>,
        base_responsavel: Option<&str>,
    ) -> Result<Usuario, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let usuario = sqlx::query_as::<_, Usuario>(
            r#"
            UPDATE usuarios
            SET ativo = COALESCE($2, ativo),
                base_responsavel = COALESCE($3, base_responsavel)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(ativo)
        .bind(base_responsavel)
        .fetch_optional(executor)
        .await?
        .ok_or_else(|| AppError::NaoEncontrado("Usuário".to_string()))?;

        Ok(usuario)
    }
}
