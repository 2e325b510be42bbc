// src/services/frequencia_service.rs
//
// Escrita dos registros diários (frequência e indisponibilidade) com as
// verificações de exclusão mútua, e a visão de pendentes do supervisor.

use chrono::{Local, NaiveDate};
use sqlx::PgPool;

use crate::{
    common::error::AppError,
    db::{EletricistaRepository, FrequenciaRepository, MotivoRepository, RemanejamentoRepository},
    models::auth::{ESCOPO_TODAS, Usuario},
    models::registros::{
        Indisponibilidade, SalvarFrequenciaPayload, SalvarIndisponibilidadePayload,
    },
    models::relatorios::{PendentesResposta, ResumoDiaItem, ResumoDiaResposta},
    services::resolucao_diaria,
};

// Resultado da verificação de exclusão mútua de um registro diário.
// Vale para os dois sentidos: frequência contra indisponibilidade e o inverso.
#[derive(Debug, PartialEq, Eq)]
pub enum DecisaoRegistro {
    Inserir,
    // Já existe registro do mesmo tipo para o (eletricista, dia)
    RejeitarDuplicado,
    // Existe registro do tipo oposto no mesmo dia
    RejeitarConflito,
}

// O duplicado é verificado antes do conflito com o tipo oposto
pub fn decidir_registro(duplicado: bool, tipo_oposto: bool) -> DecisaoRegistro {
    if duplicado {
        return DecisaoRegistro::RejeitarDuplicado;
    }
    if tipo_oposto {
        return DecisaoRegistro::RejeitarConflito;
    }
    DecisaoRegistro::Inserir
}

// Supervisão padrão do usuário. O escopo ALL cobre todas as supervisões e
// não serve como valor concreto de registro ou de consulta.
pub fn supervisao_padrao(usuario: &Usuario) -> Option<String> {
    usuario.base_responsavel.clone().filter(|b| b != ESCOPO_TODAS)
}

#[derive(Clone)]
pub struct FrequenciaService {
    eletricista_repo: EletricistaRepository,
    frequencia_repo: FrequenciaRepository,
    motivo_repo: MotivoRepository,
    remanejamento_repo: RemanejamentoRepository,
    pool: PgPool,
}

impl FrequenciaService {
    pub fn new(
        eletricista_repo: EletricistaRepository,
        frequencia_repo: FrequenciaRepository,
        motivo_repo: MotivoRepository,
        remanejamento_repo: RemanejamentoRepository,
        pool: PgPool,
    ) -> Self {
        Self {
            eletricista_repo,
            frequencia_repo,
            motivo_repo,
            remanejamento_repo,
            pool,
        }
    }

    // Salva o lote de frequência do supervisor. Tudo dentro de uma única
    // transação: qualquer conflito desfaz o lote inteiro.
    pub async fn salvar_frequencia(
        &self,
        usuario: &Usuario,
        payload: &SalvarFrequenciaPayload,
    ) -> Result<u64, AppError> {
        let data = payload.data.unwrap_or_else(hoje);
        let supervisor_registro =
            supervisao_padrao(usuario).unwrap_or_else(|| usuario.nome.clone());

        let mut tx = self.pool.begin().await?;

        let mut total_salvo: u64 = 0;
        for assoc in &payload.associacoes {
            let eletricista = self
                .eletricista_repo
                .find_by_id_tx(&mut *tx, assoc.eletricista_id)
                .await?
                .ok_or_else(|| AppError::NaoEncontrado("Eletricista".to_string()))?;

            let ja_na_frequencia = self
                .frequencia_repo
                .presenca_existente(&mut *tx, eletricista.id, data)
                .await?
                .is_some();
            let indisponivel_no_dia = self
                .frequencia_repo
                .indisponibilidade_existente(&mut *tx, eletricista.id, data)
                .await?
                .is_some();

            // No máximo uma frequência por (eletricista, dia); quem está
            // indisponível no dia não pode entrar na frequência
            match decidir_registro(ja_na_frequencia, indisponivel_no_dia) {
                DecisaoRegistro::RejeitarDuplicado => {
                    return Err(AppError::ConflitoDeRegistro(format!(
                        "{} já está na frequência de {}.",
                        eletricista.colaborador,
                        data.format("%d/%m/%Y")
                    )));
                }
                DecisaoRegistro::RejeitarConflito => {
                    return Err(AppError::ConflitoDeRegistro(format!(
                        "{} já possui indisponibilidade registrada em {}.",
                        eletricista.colaborador,
                        data.format("%d/%m/%Y")
                    )));
                }
                DecisaoRegistro::Inserir => {}
            }

            self.frequencia_repo
                .inserir_presenca(
                    &mut *tx,
                    eletricista.id,
                    &assoc.prefixo,
                    data,
                    &supervisor_registro,
                    usuario.id,
                    assoc.observacoes.as_deref(),
                )
                .await?;
            total_salvo += 1;
        }

        tx.commit().await?;

        tracing::info!(
            "Frequência de {} salva: {} associação(ões) em {}",
            supervisor_registro,
            total_salvo,
            data
        );
        Ok(total_salvo)
    }

    pub async fn salvar_indisponibilidade(
        &self,
        usuario: &Usuario,
        payload: &SalvarIndisponibilidadePayload,
    ) -> Result<Indisponibilidade, AppError> {
        let data = payload.data.unwrap_or_else(hoje);

        // O motivo precisa existir e ainda estar no catálogo ativo
        let motivo = self
            .motivo_repo
            .find_by_id(payload.motivo_id)
            .await?
            .ok_or_else(|| AppError::NaoEncontrado("Motivo".to_string()))?;
        if !motivo.ativo {
            return Err(AppError::ConflitoDeRegistro(
                "Motivo está inativo e não aceita novos registros.".to_string(),
            ));
        }

        let mut tx = self.pool.begin().await?;

        let eletricista = self
            .eletricista_repo
            .find_by_id_tx(&mut *tx, payload.eletricista_id)
            .await?
            .ok_or_else(|| AppError::NaoEncontrado("Eletricista".to_string()))?;

        if let Some(segundo_id) = payload.eletricista2_id {
            self.eletricista_repo
                .find_by_id_tx(&mut *tx, segundo_id)
                .await?
                .ok_or_else(|| AppError::NaoEncontrado("Eletricista".to_string()))?;
        }

        let indisponivel_no_dia = self
            .frequencia_repo
            .indisponibilidade_existente(&mut *tx, eletricista.id, data)
            .await?
            .is_some();
        let ja_na_frequencia = self
            .frequencia_repo
            .presenca_existente(&mut *tx, eletricista.id, data)
            .await?
            .is_some();

        // No máximo uma indisponibilidade por (eletricista, dia); quem está
        // na frequência do dia não pode ficar indisponível
        match decidir_registro(indisponivel_no_dia, ja_na_frequencia) {
            DecisaoRegistro::RejeitarDuplicado => {
                return Err(AppError::ConflitoDeRegistro(format!(
                    "{} já possui indisponibilidade registrada em {}.",
                    eletricista.colaborador,
                    data.format("%d/%m/%Y")
                )));
            }
            DecisaoRegistro::RejeitarConflito => {
                return Err(AppError::ConflitoDeRegistro(format!(
                    "{} já está na frequência de {}.",
                    eletricista.colaborador,
                    data.format("%d/%m/%Y")
                )));
            }
            DecisaoRegistro::Inserir => {}
        }

        // matricula gravada desnormalizada, como evidência histórica
        let indisponibilidade = self
            .frequencia_repo
            .inserir_indisponibilidade(
                &mut *tx,
                data,
                eletricista.id,
                payload.eletricista2_id,
                &eletricista.matricula,
                &payload.prefixo,
                &payload.tipo,
                motivo.id,
                payload.observacao.as_deref(),
                usuario.id,
            )
            .await?;

        tx.commit().await?;
        Ok(indisponibilidade)
    }

    // Visão do supervisor: quem ainda não foi registrado no dia,
    // já considerando os remanejamentos de entrada e saída.
    pub async fn pendentes(
        &self,
        usuario: &Usuario,
        supervisor_param: Option<&str>,
        data: Option<NaiveDate>,
    ) -> Result<PendentesResposta, AppError> {
        let data = data.unwrap_or_else(hoje);
        let supervisor = supervisor_param
            .map(str::to_string)
            // Quem responde por todas as supervisões precisa dizer qual quer ver
            .or_else(|| supervisao_padrao(usuario))
            .ok_or_else(|| {
                AppError::DataInvalida("Informe a supervisão a consultar.".to_string())
            })?;

        let todos = self.eletricista_repo.list_all().await?;
        let presencas = self.frequencia_repo.presencas_do_dia(data).await?;
        let indisponiveis = self.frequencia_repo.indisponibilidades_do_dia(data).await?;
        let remanejamentos = self.remanejamento_repo.remanejamentos_do_dia(data).await?;

        let pendentes = resolucao_diaria::pendentes_do_supervisor(
            &supervisor,
            &todos,
            &resolucao_diaria::conjunto_presentes(&presencas),
            &resolucao_diaria::mapa_indisponiveis(&indisponiveis),
            &resolucao_diaria::mapa_remanejamentos(&remanejamentos),
        );

        Ok(PendentesResposta { data, supervisor, pendentes })
    }

    // Visão completa do dia: a base da supervisão mais quem entrou por
    // remanejamento, cada eletricista com o estado resolvido.
    pub async fn resumo_do_dia(
        &self,
        usuario: &Usuario,
        supervisor_param: Option<&str>,
        data: Option<NaiveDate>,
    ) -> Result<ResumoDiaResposta, AppError> {
        let data = data.unwrap_or_else(hoje);
        let supervisor = supervisor_param
            .map(str::to_string)
            // Quem responde por todas as supervisões precisa dizer qual quer ver
            .or_else(|| supervisao_padrao(usuario))
            .ok_or_else(|| {
                AppError::DataInvalida("Informe a supervisão a consultar.".to_string())
            })?;

        let todos = self.eletricista_repo.list_all().await?;
        let presencas = self.frequencia_repo.presencas_do_dia(data).await?;
        let indisponiveis = self.frequencia_repo.indisponibilidades_do_dia(data).await?;
        let remanejamentos = self.remanejamento_repo.remanejamentos_do_dia(data).await?;

        let remanejados = resolucao_diaria::mapa_remanejamentos(&remanejamentos);

        // Universo do dia: base própria mais os remanejados para cá
        let universo: Vec<_> = todos
            .into_iter()
            .filter(|e| {
                e.superv_campo.as_deref() == Some(supervisor.as_str())
                    || remanejados
                        .get(&e.id)
                        .is_some_and(|(_, destino)| *destino == supervisor)
            })
            .collect();

        let estados = resolucao_diaria::resolver_dia(
            &supervisor,
            &universo,
            &resolucao_diaria::conjunto_presentes(&presencas),
            &resolucao_diaria::mapa_indisponiveis(&indisponiveis),
            &remanejados,
        );

        let mut eletricistas: Vec<ResumoDiaItem> = universo
            .iter()
            .filter_map(|e| {
                estados.get(&e.id).map(|estado| ResumoDiaItem {
                    id: e.id,
                    matricula: e.matricula.clone(),
                    colaborador: e.colaborador.clone(),
                    prefixo: e.prefixo.clone(),
                    estado: estado.clone(),
                })
            })
            .collect();
        eletricistas.sort_by(|a, b| a.colaborador.cmp(&b.colaborador));

        Ok(ResumoDiaResposta { data, supervisor, eletricistas })
    }
}

pub fn hoje() -> NaiveDate {
    Local::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn usuario_com_base(base_responsavel: Option<&str>) -> Usuario {
        Usuario {
            id: Uuid::new_v4(),
            nome: "MARINA LOPES".to_string(),
            login: "marina".to_string(),
            senha_hash: "hash".to_string(),
            perfil: "SUPERVISOR".to_string(),
            base_responsavel: base_responsavel.map(str::to_string),
            ativo: true,
            criado_em: Utc::now(),
        }
    }

    #[test]
    fn registro_duplicado_e_rejeitado() {
        assert_eq!(decidir_registro(true, false), DecisaoRegistro::RejeitarDuplicado);
    }

    #[test]
    fn registro_do_tipo_oposto_impede_a_escrita() {
        assert_eq!(decidir_registro(false, true), DecisaoRegistro::RejeitarConflito);
    }

    // Se os dois registros existirem (estado inválido no banco), a rejeição
    // é sempre a de duplicidade.
    #[test]
    fn duplicado_e_verificado_antes_do_conflito() {
        assert_eq!(decidir_registro(true, true), DecisaoRegistro::RejeitarDuplicado);
    }

    #[test]
    fn sem_registros_no_dia_pode_inserir() {
        assert_eq!(decidir_registro(false, false), DecisaoRegistro::Inserir);
    }

    #[test]
    fn escopo_all_nao_vira_supervisao_concreta() {
        assert_eq!(supervisao_padrao(&usuario_com_base(Some(ESCOPO_TODAS))), None);
        assert_eq!(supervisao_padrao(&usuario_com_base(None)), None);
        assert_eq!(
            supervisao_padrao(&usuario_com_base(Some("SUP CAMPO LESTE"))).as_deref(),
            Some("SUP CAMPO LESTE")
        );
    }
}
