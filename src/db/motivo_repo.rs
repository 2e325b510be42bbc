// src/db/motivo_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{common::error::AppError, models::registros::MotivoIndisponibilidade};

// Catálogo de motivos: nunca apagamos um motivo, apenas inativamos,
// porque as indisponibilidades antigas continuam referenciando ele.
#[derive(Clone)]
pub struct MotivoRepository {
    pool: PgPool,
}

impl MotivoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<MotivoIndisponibilidade>, AppError> {
        let motivo = sqlx::query_as::<_, MotivoIndisponibilidade>(
            "SELECT * FROM motivos_indisponibilidade WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(motivo)
    }

    pub async fn list_all(&self) -> Result<Vec<MotivoIndisponibilidade>, AppError> {
        let motivos = sqlx::query_as::<_, MotivoIndisponibilidade>(
            "SELECT * FROM motivos_indisponibilidade ORDER BY descricao",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(motivos)
    }

    pub async fn create(&self, descricao: &str) -> Result<MotivoIndisponibilidade, AppError> {
        let motivo = sqlx::query_as::<_, MotivoIndisponibilidade>(
            "INSERT INTO motivos_indisponibilidade (descricao) VALUES ($1) RETURNING *",
        )
        .bind(descricao)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::MotivoJaCadastrado;
                }
            }
            AppError::DatabaseError(e)
        })?;

        Ok(motivo)
    }

    pub async fn set_ativo(
        &self,
        id: Uuid,
        ativo: bool,
    ) -> Result<MotivoIndisponibilidade, AppError> {
        let motivo = sqlx::query_as::<_, MotivoIndisponibilidade>(
            "UPDATE motivos_indisponibilidade SET ativo = $2 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(ativo)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NaoEncontrado("Motivo".to_string()))?;

        Ok(motivo)
    }
}
