// src/services/remanejamento_service.rs
//
// Remanejamento temporário de eletricistas entre supervisões. As
// pré-condições são verificadas em ordem fixa e cada uma tem sua própria
// rejeição; a decisão em si é pura para poder ser testada isolada.

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{EletricistaRepository, FrequenciaRepository, RemanejamentoRepository},
    models::auth::Usuario,
    models::registros::{Remanejamento, RemanejarPayload},
    services::frequencia_service::{hoje, supervisao_padrao},
};

// Resultado da avaliação das pré-condições de um remanejamento
#[derive(Debug, PartialEq, Eq)]
pub enum DecisaoRemanejamento {
    // Sem registro e sem remanejamento anterior: cria a linha
    Inserir,
    // Já remanejado no dia para outro destino: troca o destino na mesma linha
    AtualizarDestino(Uuid),
    RejeitarNaFrequencia,
    RejeitarIndisponivel,
    RejeitarMesmoDestino,
}

// Avalia as pré-condições na ordem do fluxo: frequência, indisponibilidade,
// remanejamento repetido, remanejamento concorrente.
pub fn decidir_remanejamento(
    tem_frequencia: bool,
    tem_indisponibilidade: bool,
    existente: Option<&Remanejamento>,
    destino: &str,
) -> DecisaoRemanejamento {
    if tem_frequencia {
        return DecisaoRemanejamento::RejeitarNaFrequencia;
    }
    if tem_indisponibilidade {
        return DecisaoRemanejamento::RejeitarIndisponivel;
    }
    match existente {
        Some(r) if r.supervisor_destino == destino => DecisaoRemanejamento::RejeitarMesmoDestino,
        // Outro supervisor reivindicou primeiro: o último pedido vence
        Some(r) => DecisaoRemanejamento::AtualizarDestino(r.id),
        None => DecisaoRemanejamento::Inserir,
    }
}

#[derive(Clone)]
pub struct RemanejamentoService {
    eletricista_repo: EletricistaRepository,
    frequencia_repo: FrequenciaRepository,
    remanejamento_repo: RemanejamentoRepository,
    pool: PgPool,
}

impl RemanejamentoService {
    pub fn new(
        eletricista_repo: EletricistaRepository,
        frequencia_repo: FrequenciaRepository,
        remanejamento_repo: RemanejamentoRepository,
        pool: PgPool,
    ) -> Self {
        Self {
            eletricista_repo,
            frequencia_repo,
            remanejamento_repo,
            pool,
        }
    }

    pub async fn remanejar(
        &self,
        usuario: &Usuario,
        payload: &RemanejarPayload,
    ) -> Result<Remanejamento, AppError> {
        let data = payload.data.unwrap_or_else(hoje);

        // Sem destino explícito, o eletricista vem para a supervisão do usuário
        let destino = payload
            .supervisor_destino
            .clone()
            .or_else(|| supervisao_padrao(usuario))
            .unwrap_or_else(|| usuario.nome.clone());

        let mut tx = self.pool.begin().await?;

        let eletricista = self
            .eletricista_repo
            .find_by_id_tx(&mut *tx, payload.eletricista_id)
            .await?
            .ok_or_else(|| AppError::NaoEncontrado("Eletricista".to_string()))?;

        let tem_frequencia = self
            .frequencia_repo
            .presenca_existente(&mut *tx, eletricista.id, data)
            .await?
            .is_some();
        let tem_indisponibilidade = self
            .frequencia_repo
            .indisponibilidade_existente(&mut *tx, eletricista.id, data)
            .await?
            .is_some();
        let existente = self
            .remanejamento_repo
            .find_por_eletricista_e_data(&mut *tx, eletricista.id, data)
            .await?;

        let decisao =
            decidir_remanejamento(tem_frequencia, tem_indisponibilidade, existente.as_ref(), &destino);

        let remanejamento = match decisao {
            DecisaoRemanejamento::RejeitarNaFrequencia => {
                return Err(AppError::ConflitoDeRegistro(format!(
                    "{} já está na frequência de {} e não pode ser remanejado.",
                    eletricista.colaborador,
                    data.format("%d/%m/%Y")
                )));
            }
            DecisaoRemanejamento::RejeitarIndisponivel => {
                return Err(AppError::ConflitoDeRegistro(format!(
                    "{} já possui indisponibilidade registrada em {} e não pode ser remanejado.",
                    eletricista.colaborador,
                    data.format("%d/%m/%Y")
                )));
            }
            DecisaoRemanejamento::RejeitarMesmoDestino => {
                return Err(AppError::ConflitoDeRegistro(
                    "Eletricista já foi remanejado hoje para sua supervisão.".to_string(),
                ));
            }
            DecisaoRemanejamento::AtualizarDestino(id) => {
                self.remanejamento_repo
                    .atualizar_destino(&mut *tx, id, &destino, usuario.id)
                    .await?
            }
            DecisaoRemanejamento::Inserir => {
                // A origem é a supervisão viva do eletricista no momento do pedido
                let origem = eletricista
                    .superv_campo
                    .clone()
                    .unwrap_or_default();
                self.remanejamento_repo
                    .inserir(
                        &mut *tx,
                        eletricista.id,
                        &origem,
                        &destino,
                        data,
                        usuario.id,
                        payload.observacoes.as_deref(),
                    )
                    .await?
            }
        };

        tx.commit().await?;

        tracing::info!(
            "Eletricista {} remanejado para {} em {}",
            eletricista.colaborador,
            remanejamento.supervisor_destino,
            data
        );
        Ok(remanejamento)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};

    fn remanejamento_existente(destino: &str) -> Remanejamento {
        Remanejamento {
            id: Uuid::new_v4(),
            eletricista_id: Uuid::new_v4(),
            supervisor_origem: "SUP1".to_string(),
            supervisor_destino: destino.to_string(),
            data_remanejamento: NaiveDate::from_ymd_opt(2025, 2, 1).unwrap(),
            temporario: true,
            usuario_registro: None,
            criado_em: Utc::now(),
            observacoes: None,
        }
    }

    #[test]
    fn frequencia_impede_remanejamento() {
        let decisao = decidir_remanejamento(true, false, None, "SUP2");
        assert_eq!(decisao, DecisaoRemanejamento::RejeitarNaFrequencia);
    }

    #[test]
    fn indisponibilidade_impede_remanejamento() {
        let decisao = decidir_remanejamento(false, true, None, "SUP2");
        assert_eq!(decisao, DecisaoRemanejamento::RejeitarIndisponivel);
    }

    // A frequência é verificada antes da indisponibilidade: se os dois
    // existirem (estado inválido), a rejeição é a de frequência.
    #[test]
    fn ordem_das_pre_condicoes_e_fixa() {
        let decisao = decidir_remanejamento(true, true, None, "SUP2");
        assert_eq!(decisao, DecisaoRemanejamento::RejeitarNaFrequencia);
    }

    #[test]
    fn repetir_o_mesmo_destino_e_rejeitado() {
        let existente = remanejamento_existente("SUP2");
        let decisao = decidir_remanejamento(false, false, Some(&existente), "SUP2");
        assert_eq!(decisao, DecisaoRemanejamento::RejeitarMesmoDestino);
    }

    #[test]
    fn destino_diferente_atualiza_a_mesma_linha() {
        let existente = remanejamento_existente("SUP2");
        let decisao = decidir_remanejamento(false, false, Some(&existente), "SUP3");
        assert_eq!(decisao, DecisaoRemanejamento::AtualizarDestino(existente.id));
    }

    #[test]
    fn sem_registros_anteriores_insere() {
        let decisao = decidir_remanejamento(false, false, None, "SUP2");
        assert_eq!(decisao, DecisaoRemanejamento::Inserir);
    }
}
