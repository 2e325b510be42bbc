// src/db/remanejamento_repo.rs

use chrono::NaiveDate;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{common::error::AppError, models::registros::Remanejamento};

#[derive(Clone)]
pub struct RemanejamentoRepository {
    pool: PgPool,
}

impl RemanejamentoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn remanejamentos_do_dia(
        &self,
        data: NaiveDate,
    ) -> Result<Vec<Remanejamento>, AppError> {
        let remanejamentos = sqlx::query_as::<_, Remanejamento>(
            "SELECT * FROM remanejamentos WHERE data_remanejamento = $1",
        )
        .bind(data)
        .fetch_all(&self.pool)
        .await?;
        Ok(remanejamentos)
    }

    // No máximo um remanejamento por (eletricista, dia); a aplicação
    // garante isso atualizando o destino em vez de inserir outro.
    pub async fn find_por_eletricista_e_data<'e, E>(
        &self,
        executor: E,
        eletricista_id: Uuid,
        data: NaiveDate,
    ) -> Result<Option<Remanejamento>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let remanejamento = sqlx::query_as::<_, Remanejamento>(
            "SELECT * FROM remanejamentos WHERE eletricista_id = $1 AND data_remanejamento = $2",
        )
        .bind(eletricista_id)
        .bind(data)
        .fetch_optional(executor)
        .await?;
        Ok(remanejamento)
    }

    pub async fn inserir<'e, E>(
        &self,
        executor: E,
        eletricista_id: Uuid,
        supervisor_origem: &str,
        supervisor_destino: &str,
        data: NaiveDate,
        usuario_registro: Uuid,
        observacoes: Option<&str>,
    ) -> Result<Remanejamento, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let remanejamento = sqlx::query_as::<_, Remanejamento>(
            r#"
            INSERT INTO remanejamentos (
                eletricista_id, supervisor_origem, supervisor_destino,
                data_remanejamento, temporario, usuario_registro, observacoes
            )
            VALUES ($1, $2, $3, $4, TRUE, $5, $6)
            RETURNING *
            "#,
        )
        .bind(eletricista_id)
        .bind(supervisor_origem)
        .bind(supervisor_destino)
        .bind(data)
        .bind(usuario_registro)
        .bind(observacoes)
        .fetch_one(executor)
        .await?;

        Ok(remanejamento)
    }

    // Um segundo supervisor "reivindica" o eletricista no mesmo dia:
    // o destino é trocado na mesma linha, sem criar duplicata.
    pub async fn atualizar_destino<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        supervisor_destino: &str,
        usuario_registro: Uuid,
    ) -> Result<Remanejamento, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let remanejamento = sqlx::query_as::<_, Remanejamento>(
            r#"
            UPDATE remanejamentos
            SET supervisor_destino = $2, usuario_registro = $3
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(supervisor_destino)
        .bind(usuario_registro)
        .fetch_one(executor)
        .await?;

        Ok(remanejamento)
    }
}
