// src/db/eletricista_repo.rs

use chrono::{DateTime, Utc};
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::equipes::{AtualizarEletricistaPayload, Eletricista, PrefixoResumo},
    models::importacao::LinhaEstrutura,
};

// Repositório do cadastro vivo (estrutura de equipes) e do seu histórico
#[derive(Clone)]
pub struct EletricistaRepository {
    pool: PgPool,
}

impl EletricistaRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Busca dentro da transação de escrita
    pub async fn find_by_id_tx<'e, E>(
        &self,
        executor: E,
        id: Uuid,
    ) -> Result<Option<Eletricista>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let eletricista =
            sqlx::query_as::<_, Eletricista>("SELECT * FROM eletricistas WHERE id = $1")
                .bind(id)
                .fetch_optional(executor)
                .await?;
        Ok(eletricista)
    }

    pub async fn find_by_matricula<'e, E>(
        &self,
        executor: E,
        matricula: &str,
    ) -> Result<Option<Eletricista>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let eletricista =
            sqlx::query_as::<_, Eletricista>("SELECT * FROM eletricistas WHERE matricula = $1")
                .bind(matricula)
                .fetch_optional(executor)
                .await?;
        Ok(eletricista)
    }

    // Cadastro completo, usado pelos relatórios para montar o universo do dia
    pub async fn list_all(&self) -> Result<Vec<Eletricista>, AppError> {
        let eletricistas =
            sqlx::query_as::<_, Eletricista>("SELECT * FROM eletricistas ORDER BY colaborador")
                .fetch_all(&self.pool)
                .await?;
        Ok(eletricistas)
    }

    // Busca por nome (case-insensitive), para o autocomplete da tela de registro
    pub async fn buscar_por_nome(&self, termo: &str) -> Result<Vec<Eletricista>, AppError> {
        let eletricistas = sqlx::query_as::<_, Eletricista>(
            r#"
            SELECT * FROM eletricistas
            WHERE colaborador ILIKE '%' || $1 || '%'
            ORDER BY colaborador
            LIMIT 10
            "#,
        )
        .bind(termo)
        .fetch_all(&self.pool)
        .await?;
        Ok(eletricistas)
    }

    // Prefixos únicos que batem com a busca, com a contagem de eletricistas
    pub async fn buscar_prefixos(&self, termo: &str) -> Result<Vec<PrefixoResumo>, AppError> {
        let prefixos = sqlx::query_as::<_, PrefixoResumo>(
            r#"
            SELECT prefixo, base, COUNT(id) AS total_eletricistas
            FROM eletricistas
            WHERE prefixo ILIKE '%' || $1 || '%'
            GROUP BY prefixo, base
            ORDER BY prefixo
            LIMIT 15
            "#,
        )
        .bind(termo)
        .fetch_all(&self.pool)
        .await?;
        Ok(prefixos)
    }

    // Arquiva o cadastro inteiro no histórico com um único timestamp de lote.
    // Retorna quantas linhas foram copiadas.
    pub async fn archive_all<'e, E>(
        &self,
        executor: E,
        arquivado_em: DateTime<Utc>,
        arquivado_por: Uuid,
        observacao: &str,
    ) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query(
            r#"
            INSERT INTO eletricistas_historico (
                eletricista_id, regional, polo, base, prefixo, matricula, colaborador,
                descr_secao, descr_situacao, placas, tipo_equipe, processo_equipe,
                superv_campo, superv_operacao, coordenador,
                arquivado_em, arquivado_por, observacao
            )
            SELECT
                id, regional, polo, base, prefixo, matricula, colaborador,
                descr_secao, descr_situacao, placas, tipo_equipe, processo_equipe,
                superv_campo, superv_operacao, coordenador,
                $1, $2, $3
            FROM eletricistas
            "#,
        )
        .bind(arquivado_em)
        .bind(arquivado_por)
        .bind(observacao)
        .execute(executor)
        .await?;

        Ok(result.rows_affected())
    }

    // Atualiza os campos mutáveis de uma linha existente, preservando o id
    // (os registros de frequência/indisponibilidade continuam apontando pra ela)
    pub async fn update_from_import<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        linha: &LinhaEstrutura,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query(
            r#"
            UPDATE eletricistas
            SET colaborador = $2, regional = $3, polo = $4, base = $5, prefixo = $6,
                descr_secao = $7, descr_situacao = $8, placas = $9,
                tipo_equipe = $10, processo_equipe = $11,
                superv_campo = $12, superv_operacao = $13, coordenador = $14,
                atualizado_em = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(&linha.colaborador)
        .bind(&linha.regional)
        .bind(&linha.polo)
        .bind(&linha.base)
        .bind(&linha.prefixo)
        .bind(&linha.descr_secao)
        .bind(&linha.descr_situacao)
        .bind(&linha.placas)
        .bind(&linha.tipo_equipe)
        .bind(&linha.processo_equipe)
        .bind(&linha.superv_campo)
        .bind(&linha.superv_operacao)
        .bind(&linha.coordenador)
        .execute(executor)
        .await?;

        Ok(())
    }

    pub async fn insert_from_import<'e, E>(
        &self,
        executor: E,
        linha: &LinhaEstrutura,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query(
            r#"
            INSERT INTO eletricistas (
                matricula, colaborador, regional, polo, base, prefixo,
                descr_secao, descr_situacao, placas, tipo_equipe, processo_equipe,
                superv_campo, superv_operacao, coordenador
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            "#,
        )
        .bind(&linha.matricula)
        .bind(&linha.colaborador)
        .bind(&linha.regional)
        .bind(&linha.polo)
        .bind(&linha.base)
        .bind(&linha.prefixo)
        .bind(&linha.descr_secao)
        .bind(&linha.descr_situacao)
        .bind(&linha.placas)
        .bind(&linha.tipo_equipe)
        .bind(&linha.processo_equipe)
        .bind(&linha.superv_campo)
        .bind(&linha.superv_operacao)
        .bind(&linha.coordenador)
        .execute(executor)
        .await?;

        Ok(())
    }

    // Edição manual pela tela de admin
    pub async fn atualizar(
        &self,
        id: Uuid,
        payload: &AtualizarEletricistaPayload,
    ) -> Result<Eletricista, AppError> {
        let eletricista = sqlx::query_as::<_, Eletricista>(
            r#"
            UPDATE eletricistas
            SET regional = COALESCE($2, regional),
                polo = COALESCE($3, polo),
                base = COALESCE($4, base),
                prefixo = COALESCE($5, prefixo),
                colaborador = COALESCE($6, colaborador),
                descr_secao = COALESCE($7, descr_secao),
                descr_situacao = COALESCE($8, descr_situacao),
                placas = COALESCE($9, placas),
                tipo_equipe = COALESCE($10, tipo_equipe),
                processo_equipe = COALESCE($11, processo_equipe),
                superv_campo = COALESCE($12, superv_campo),
                superv_operacao = COALESCE($13, superv_operacao),
                coordenador = COALESCE($14, coordenador),
                atualizado_em = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&payload.regional)
        .bind(&payload.polo)
        .bind(&payload.base)
        .bind(&payload.prefixo)
        .bind(&payload.colaborador)
        .bind(&payload.descr_secao)
        .bind(&payload.descr_situacao)
        .bind(&payload.placas)
        .bind(&payload.tipo_equipe)
        .bind(&payload.processo_equipe)
        .bind(&payload.superv_campo)
        .bind(&payload.superv_operacao)
        .bind(&payload.coordenador)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NaoEncontrado("Eletricista".to_string()))?;

        Ok(eletricista)
    }
}
