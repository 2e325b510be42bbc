// src/db/frequencia_repo.rs

use chrono::NaiveDate;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::registros::{EquipeDia, Indisponibilidade, IndisponibilidadeDia},
    models::relatorios::DisponibilidadeItem,
};

// Repositório dos dois registros diários que se excluem mutuamente:
// frequência (equipes_dia) e indisponibilidades.
#[derive(Clone)]
pub struct FrequenciaRepository {
    pool: PgPool,
}

impl FrequenciaRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ------------------------------------------------------------------
    // Frequência (equipes_dia)
    // ------------------------------------------------------------------

    pub async fn presencas_do_dia(&self, data: NaiveDate) -> Result<Vec<EquipeDia>, AppError> {
        let presencas =
            sqlx::query_as::<_, EquipeDia>("SELECT * FROM equipes_dia WHERE data = $1")
                .bind(data)
                .fetch_all(&self.pool)
                .await?;
        Ok(presencas)
    }

    // Consulta dentro da transação de escrita: a unicidade por
    // (eletricista, data) é verificada aqui antes do INSERT.
    pub async fn presenca_existente<'e, E>(
        &self,
        executor: E,
        eletricista_id: Uuid,
        data: NaiveDate,
    ) -> Result<Option<EquipeDia>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let presenca = sqlx::query_as::<_, EquipeDia>(
            "SELECT * FROM equipes_dia WHERE eletricista_id = $1 AND data = $2",
        )
        .bind(eletricista_id)
        .bind(data)
        .fetch_optional(executor)
        .await?;
        Ok(presenca)
    }

    pub async fn inserir_presenca<'e, E>(
        &self,
        executor: E,
        eletricista_id: Uuid,
        prefixo: &str,
        data: NaiveDate,
        supervisor_registro: &str,
        usuario_registro: Uuid,
        observacoes: Option<&str>,
    ) -> Result<EquipeDia, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let presenca = sqlx::query_as::<_, EquipeDia>(
            r#"
            INSERT INTO equipes_dia (
                eletricista_id, prefixo, data, supervisor_registro,
                usuario_registro, observacoes
            )
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(eletricista_id)
        .bind(prefixo)
        .bind(data)
        .bind(supervisor_registro)
        .bind(usuario_registro)
        .bind(observacoes)
        .fetch_one(executor)
        .await?;

        Ok(presenca)
    }

    // ------------------------------------------------------------------
    // Indisponibilidades
    // ------------------------------------------------------------------

    // Indisponibilidades de um dia já com a descrição do motivo,
    // na forma que os relatórios consomem
    pub async fn indisponibilidades_do_dia(
        &self,
        data: NaiveDate,
    ) -> Result<Vec<IndisponibilidadeDia>, AppError> {
        let indisponiveis = sqlx::query_as::<_, IndisponibilidadeDia>(
            r#"
            SELECT i.eletricista_id, i.prefixo, m.descricao AS motivo
            FROM indisponibilidades i
            JOIN motivos_indisponibilidade m ON i.motivo_id = m.id
            WHERE i.data = $1
            ORDER BY i.criado_em
            "#,
        )
        .bind(data)
        .fetch_all(&self.pool)
        .await?;
        Ok(indisponiveis)
    }

    pub async fn indisponibilidade_existente<'e, E>(
        &self,
        executor: E,
        eletricista_id: Uuid,
        data: NaiveDate,
    ) -> Result<Option<Indisponibilidade>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let indisponibilidade = sqlx::query_as::<_, Indisponibilidade>(
            "SELECT * FROM indisponibilidades WHERE eletricista_id = $1 AND data = $2",
        )
        .bind(eletricista_id)
        .bind(data)
        .fetch_optional(executor)
        .await?;
        Ok(indisponibilidade)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn inserir_indisponibilidade<'e, E>(
        &self,
        executor: E,
        data: NaiveDate,
        eletricista_id: Uuid,
        eletricista2_id: Option<Uuid>,
        matricula: &str,
        prefixo: &str,
        tipo: &str,
        motivo_id: Uuid,
        observacao: Option<&str>,
        usuario_registro: Uuid,
    ) -> Result<Indisponibilidade, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let indisponibilidade = sqlx::query_as::<_, Indisponibilidade>(
            r#"
            INSERT INTO indisponibilidades (
                data, eletricista_id, eletricista2_id, matricula, prefixo,
                tipo, motivo_id, observacao, usuario_registro
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(data)
        .bind(eletricista_id)
        .bind(eletricista2_id)
        .bind(matricula)
        .bind(prefixo)
        .bind(tipo)
        .bind(motivo_id)
        .bind(observacao)
        .bind(usuario_registro)
        .fetch_one(executor)
        .await?;

        Ok(indisponibilidade)
    }

    // ------------------------------------------------------------------
    // Relatório de disponibilidade
    // ------------------------------------------------------------------

    // Eletricistas sem NENHUM registro (frequência ou indisponibilidade)
    // em toda a faixa. Ordenado por polo, base e matrícula.
    pub async fn nunca_registrados(
        &self,
        data_inicio: NaiveDate,
        data_fim: NaiveDate,
    ) -> Result<Vec<DisponibilidadeItem>, AppError> {
        let eletricistas = sqlx::query_as::<_, DisponibilidadeItem>(
            r#"
            SELECT e.id, e.matricula, e.colaborador, e.polo, e.base, e.prefixo, e.superv_campo
            FROM eletricistas e
            WHERE NOT EXISTS (
                SELECT 1 FROM equipes_dia q
                WHERE q.eletricista_id = e.id AND q.data BETWEEN $1 AND $2
            )
            AND NOT EXISTS (
                SELECT 1 FROM indisponibilidades i
                WHERE i.eletricista_id = e.id AND i.data BETWEEN $1 AND $2
            )
            ORDER BY e.polo, e.base, e.matricula
            "#,
        )
        .bind(data_inicio)
        .bind(data_fim)
        .fetch_all(&self.pool)
        .await?;

        Ok(eletricistas)
    }
}
