// src/services/relatorio_service.rs
//
// Relatórios por faixa de datas. O serviço busca os conjuntos de cada dia
// em lote (presenças, indisponibilidades) e dobra tudo em memória com as
// funções puras deste módulo; nenhuma consulta é feita dentro dos laços
// de agregação.

use std::collections::{BTreeMap, HashSet};

use chrono::NaiveDate;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{EletricistaRepository, FrequenciaRepository},
    models::equipes::situacao_elegivel,
    models::registros::{EquipeDia, IndisponibilidadeDia},
    models::relatorios::{
        ItemRelatorioGeral, MotivoContagem, ROTULO_NAO_REGISTRADO, ROTULO_PRESENTE,
        RelatorioDisponibilidade, RelatorioGeral, RelatorioPrefixoItem, RelatorioPrefixos,
        RelatorioSupervisorItem, RelatorioSupervisores,
    },
    services::frequencia_service::hoje,
};

#[derive(Clone)]
pub struct RelatorioService {
    eletricista_repo: EletricistaRepository,
    frequencia_repo: FrequenciaRepository,
}

impl RelatorioService {
    pub fn new(
        eletricista_repo: EletricistaRepository,
        frequencia_repo: FrequenciaRepository,
    ) -> Self {
        Self { eletricista_repo, frequencia_repo }
    }

    // Faixa inclusiva; sem parâmetros o relatório é só de hoje
    pub fn validar_faixa(
        data_inicio: Option<NaiveDate>,
        data_fim: Option<NaiveDate>,
    ) -> Result<(NaiveDate, NaiveDate), AppError> {
        let inicio = data_inicio.unwrap_or_else(hoje);
        let fim = data_fim.unwrap_or(inicio);
        if fim < inicio {
            return Err(AppError::DataInvalida(
                "A data final não pode ser anterior à data inicial.".to_string(),
            ));
        }
        Ok((inicio, fim))
    }

    pub async fn relatorio_geral(
        &self,
        data_inicio: Option<NaiveDate>,
        data_fim: Option<NaiveDate>,
    ) -> Result<RelatorioGeral, AppError> {
        let (inicio, fim) = Self::validar_faixa(data_inicio, data_fim)?;

        let elegiveis: HashSet<Uuid> = self
            .eletricista_repo
            .list_all()
            .await?
            .iter()
            .filter(|e| situacao_elegivel(e.descr_situacao.as_deref()))
            .map(|e| e.id)
            .collect();

        let mut acc = AcumuladorGeral::default();
        for dia in dias_da_faixa(inicio, fim) {
            let presencas = self.frequencia_repo.presencas_do_dia(dia).await?;
            let indisponiveis = self.frequencia_repo.indisponibilidades_do_dia(dia).await?;
            acumular_dia_geral(&mut acc, &presencas, &indisponiveis, &elegiveis);
        }

        let (total_geral, itens) = montar_itens_gerais(&acc);
        Ok(RelatorioGeral { data_inicio: inicio, data_fim: fim, total_geral, itens })
    }

    pub async fn relatorio_supervisores(
        &self,
        data_inicio: Option<NaiveDate>,
        data_fim: Option<NaiveDate>,
    ) -> Result<RelatorioSupervisores, AppError> {
        let (inicio, fim) = Self::validar_faixa(data_inicio, data_fim)?;

        // Universo de cada supervisor: vínculo vivo de superv_campo
        let mut universos: BTreeMap<String, HashSet<Uuid>> = BTreeMap::new();
        for eletricista in self.eletricista_repo.list_all().await? {
            if !situacao_elegivel(eletricista.descr_situacao.as_deref()) {
                continue;
            }
            if let Some(supervisor) = &eletricista.superv_campo {
                universos
                    .entry(supervisor.clone())
                    .or_default()
                    .insert(eletricista.id);
            }
        }

        let mut accs: BTreeMap<String, AcumuladorGeral> = BTreeMap::new();
        for dia in dias_da_faixa(inicio, fim) {
            let presencas = self.frequencia_repo.presencas_do_dia(dia).await?;
            let indisponiveis = self.frequencia_repo.indisponibilidades_do_dia(dia).await?;
            acumular_dia_supervisores(&mut accs, &universos, &presencas, &indisponiveis);
        }

        Ok(RelatorioSupervisores {
            data_inicio: inicio,
            data_fim: fim,
            supervisores: montar_relatorio_supervisores(&accs),
        })
    }

    pub async fn relatorio_prefixos(
        &self,
        data_inicio: Option<NaiveDate>,
        data_fim: Option<NaiveDate>,
    ) -> Result<RelatorioPrefixos, AppError> {
        let (inicio, fim) = Self::validar_faixa(data_inicio, data_fim)?;

        let mut acc: Vec<(String, AcumuladorPrefixo)> = Vec::new();
        for dia in dias_da_faixa(inicio, fim) {
            let indisponiveis = self.frequencia_repo.indisponibilidades_do_dia(dia).await?;
            acumular_dia_prefixos(&mut acc, dia, &indisponiveis);
        }

        Ok(RelatorioPrefixos {
            data_inicio: inicio,
            data_fim: fim,
            prefixos: montar_relatorio_prefixos(&acc),
        })
    }

    // Eletricistas sem nenhum registro em todos os dias da faixa
    pub async fn relatorio_disponibilidade(
        &self,
        data_inicio: Option<NaiveDate>,
        data_fim: Option<NaiveDate>,
    ) -> Result<RelatorioDisponibilidade, AppError> {
        let (inicio, fim) = Self::validar_faixa(data_inicio, data_fim)?;
        let eletricistas = self.frequencia_repo.nunca_registrados(inicio, fim).await?;
        Ok(RelatorioDisponibilidade { data_inicio: inicio, data_fim: fim, eletricistas })
    }
}

// ---------------------------------------------------------------------------
// Dobra em memória (funções puras)
// ---------------------------------------------------------------------------

pub fn dias_da_faixa(inicio: NaiveDate, fim: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    inicio.iter_days().take_while(move |d| *d <= fim)
}

// Percentual com uma casa decimal; total zero vira 0, não erro
pub fn percentual(parte: i64, total: i64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let bruto = parte as f64 * 100.0 / total as f64;
    (bruto * 10.0).round() / 10.0
}

// Somas acumuladas de uma faixa: um eletricista presente em 3 de 5 dias
// contribui com 3 para Presente, não com 1.
#[derive(Debug, Default, Clone)]
pub struct AcumuladorGeral {
    pub presentes: i64,
    // BTreeMap mantém os motivos em ordem alfabética para a saída
    pub motivos: BTreeMap<String, i64>,
    pub nao_registrados: i64,
}

pub fn acumular_dia_geral(
    acc: &mut AcumuladorGeral,
    presencas: &[EquipeDia],
    indisponiveis: &[IndisponibilidadeDia],
    elegiveis: &HashSet<Uuid>,
) {
    acc.presentes += presencas.len() as i64;

    let em_presenca: HashSet<Uuid> = presencas.iter().map(|p| p.eletricista_id).collect();
    let mut em_indisponibilidade: HashSet<Uuid> = HashSet::new();
    for indisp in indisponiveis {
        *acc.motivos.entry(indisp.motivo.clone()).or_insert(0) += 1;
        em_indisponibilidade.insert(indisp.eletricista_id);
    }

    acc.nao_registrados += elegiveis
        .iter()
        .filter(|id| !em_presenca.contains(id) && !em_indisponibilidade.contains(id))
        .count() as i64;
}

// Monta a lista ordenada: Presente primeiro, motivos em ordem alfabética,
// Não registrado por último. Motivo sem ocorrência não aparece.
pub fn montar_itens_gerais(acc: &AcumuladorGeral) -> (i64, Vec<ItemRelatorioGeral>) {
    let total_geral =
        acc.presentes + acc.motivos.values().sum::<i64>() + acc.nao_registrados;

    let mut itens = Vec::with_capacity(acc.motivos.len() + 2);
    itens.push(ItemRelatorioGeral {
        rotulo: ROTULO_PRESENTE.to_string(),
        total: acc.presentes,
        percentual: percentual(acc.presentes, total_geral),
    });
    for (motivo, total) in &acc.motivos {
        itens.push(ItemRelatorioGeral {
            rotulo: motivo.clone(),
            total: *total,
            percentual: percentual(*total, total_geral),
        });
    }
    itens.push(ItemRelatorioGeral {
        rotulo: ROTULO_NAO_REGISTRADO.to_string(),
        total: acc.nao_registrados,
        percentual: percentual(acc.nao_registrados, total_geral),
    });

    (total_geral, itens)
}

pub fn acumular_dia_supervisores(
    accs: &mut BTreeMap<String, AcumuladorGeral>,
    universos: &BTreeMap<String, HashSet<Uuid>>,
    presencas: &[EquipeDia],
    indisponiveis: &[IndisponibilidadeDia],
) {
    let em_presenca: HashSet<Uuid> = presencas.iter().map(|p| p.eletricista_id).collect();
    let em_indisponibilidade: HashSet<Uuid> =
        indisponiveis.iter().map(|i| i.eletricista_id).collect();

    for (supervisor, universo) in universos {
        let acc = accs.entry(supervisor.clone()).or_default();

        acc.presentes += universo.iter().filter(|id| em_presenca.contains(id)).count() as i64;

        for indisp in indisponiveis {
            if universo.contains(&indisp.eletricista_id) {
                *acc.motivos.entry(indisp.motivo.clone()).or_insert(0) += 1;
            }
        }

        acc.nao_registrados += universo
            .iter()
            .filter(|id| !em_presenca.contains(id) && !em_indisponibilidade.contains(id))
            .count() as i64;
    }
}

// Lista final por supervisor, ordenada por percentual de presença decrescente
pub fn montar_relatorio_supervisores(
    accs: &BTreeMap<String, AcumuladorGeral>,
) -> Vec<RelatorioSupervisorItem> {
    let mut itens: Vec<RelatorioSupervisorItem> = accs
        .iter()
        .map(|(supervisor, acc)| {
            let total =
                acc.presentes + acc.motivos.values().sum::<i64>() + acc.nao_registrados;
            RelatorioSupervisorItem {
                supervisor: supervisor.clone(),
                presentes: acc.presentes,
                nao_registrados: acc.nao_registrados,
                total,
                percentual_presenca: percentual(acc.presentes, total),
                motivos: acc
                    .motivos
                    .iter()
                    .map(|(descricao, total)| MotivoContagem {
                        descricao: descricao.clone(),
                        total: *total,
                    })
                    .collect(),
            }
        })
        .collect();

    itens.sort_by(|a, b| {
        b.percentual_presenca
            .partial_cmp(&a.percentual_presenca)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    itens
}

// Acumulador por prefixo; o Vec preserva a ordem de primeira aparição,
// que é o critério de desempate dos motivos mais frequentes.
#[derive(Debug, Clone)]
pub struct AcumuladorPrefixo {
    pub primeira_data: NaiveDate,
    pub total: i64,
    pub motivos: Vec<(String, i64)>,
}

pub fn acumular_dia_prefixos(
    acc: &mut Vec<(String, AcumuladorPrefixo)>,
    dia: NaiveDate,
    indisponiveis: &[IndisponibilidadeDia],
) {
    for indisp in indisponiveis {
        let posicao = match acc.iter().position(|(p, _)| *p == indisp.prefixo) {
            Some(i) => i,
            None => {
                acc.push((
                    indisp.prefixo.clone(),
                    AcumuladorPrefixo { primeira_data: dia, total: 0, motivos: Vec::new() },
                ));
                acc.len() - 1
            }
        };
        let entrada = &mut acc[posicao].1;

        entrada.total += 1;
        match entrada.motivos.iter_mut().find(|(m, _)| *m == indisp.motivo) {
            Some((_, n)) => *n += 1,
            None => entrada.motivos.push((indisp.motivo.clone(), 1)),
        }
    }
}

// Só entram prefixos com ao menos uma indisponibilidade na faixa; os dois
// motivos mais frequentes, com empate decidido pela ordem de aparição.
pub fn montar_relatorio_prefixos(
    acc: &[(String, AcumuladorPrefixo)],
) -> Vec<RelatorioPrefixoItem> {
    acc.iter()
        .map(|(prefixo, entrada)| {
            let mut motivos = entrada.motivos.clone();
            // sort_by é estável: empates mantêm a ordem de inserção
            motivos.sort_by(|a, b| b.1.cmp(&a.1));
            motivos.truncate(2);

            RelatorioPrefixoItem {
                prefixo: prefixo.clone(),
                primeira_data: entrada.primeira_data,
                total_indisponibilidades: entrada.total,
                principais_motivos: motivos
                    .into_iter()
                    .map(|(descricao, total)| MotivoContagem { descricao, total })
                    .collect(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Utc};

    fn data(dia: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, dia).unwrap()
    }

    fn presenca(eletricista_id: Uuid, dia: NaiveDate) -> EquipeDia {
        EquipeDia {
            id: Uuid::new_v4(),
            eletricista_id,
            prefixo: "VPL-1001".to_string(),
            data: dia,
            supervisor_registro: "SUP1".to_string(),
            usuario_registro: None,
            observacoes: None,
            criado_em: Utc::now(),
        }
    }

    fn indisponibilidade(eletricista_id: Uuid, prefixo: &str, motivo: &str) -> IndisponibilidadeDia {
        IndisponibilidadeDia {
            eletricista_id,
            prefixo: prefixo.to_string(),
            motivo: motivo.to_string(),
        }
    }

    #[test]
    fn percentual_arredonda_para_uma_casa() {
        assert_eq!(percentual(1, 3), 33.3);
        assert_eq!(percentual(2, 3), 66.7);
        assert_eq!(percentual(1, 1), 100.0);
    }

    #[test]
    fn percentual_sem_registros_e_zero() {
        assert_eq!(percentual(0, 0), 0.0);
        assert_eq!(percentual(5, 0), 0.0);
    }

    // Cenário de referência: dia único, A presente, B de férias, C sem nada.
    #[test]
    fn relatorio_geral_de_um_dia_com_tres_eletricistas() {
        let (a, b, c) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
        let elegiveis = HashSet::from([a, b, c]);
        let dia = data(10);

        let mut acc = AcumuladorGeral::default();
        acumular_dia_geral(
            &mut acc,
            &[presenca(a, dia)],
            &[indisponibilidade(b, "VPL-1001", "FERIAS")],
            &elegiveis,
        );

        let (total_geral, itens) = montar_itens_gerais(&acc);
        assert_eq!(total_geral, 3);
        assert_eq!(
            itens,
            vec![
                ItemRelatorioGeral {
                    rotulo: ROTULO_PRESENTE.to_string(),
                    total: 1,
                    percentual: 33.3
                },
                ItemRelatorioGeral {
                    rotulo: "FERIAS".to_string(),
                    total: 1,
                    percentual: 33.3
                },
                ItemRelatorioGeral {
                    rotulo: ROTULO_NAO_REGISTRADO.to_string(),
                    total: 1,
                    percentual: 33.3
                },
            ]
        );
    }

    // Conservação: Presente + motivos + Não registrado = universo elegível
    #[test]
    fn contagens_de_um_dia_conservam_o_universo() {
        let ids: Vec<Uuid> = (0..7).map(|_| Uuid::new_v4()).collect();
        let elegiveis: HashSet<Uuid> = ids.iter().copied().collect();
        let dia = data(10);

        let mut acc = AcumuladorGeral::default();
        acumular_dia_geral(
            &mut acc,
            &[presenca(ids[0], dia), presenca(ids[1], dia)],
            &[
                indisponibilidade(ids[2], "VPL-1001", "FERIAS"),
                indisponibilidade(ids[3], "VPL-1002", "ACIDENTE"),
            ],
            &elegiveis,
        );

        let (total_geral, _) = montar_itens_gerais(&acc);
        assert_eq!(total_geral, 7);
    }

    #[test]
    fn somas_acumulam_entre_os_dias_da_faixa() {
        let a = Uuid::new_v4();
        let elegiveis = HashSet::from([a]);

        let mut acc = AcumuladorGeral::default();
        // Presente em 3 dos 5 dias, sem registro nos outros 2
        for dia in dias_da_faixa(data(1), data(5)) {
            if dia.day() <= 3 {
                acumular_dia_geral(&mut acc, &[presenca(a, dia)], &[], &elegiveis);
            } else {
                acumular_dia_geral(&mut acc, &[], &[], &elegiveis);
            }
        }

        assert_eq!(acc.presentes, 3);
        assert_eq!(acc.nao_registrados, 2);
        let (total_geral, _) = montar_itens_gerais(&acc);
        assert_eq!(total_geral, 5);
    }

    #[test]
    fn motivos_saem_em_ordem_alfabetica_entre_presente_e_nao_registrado() {
        let ids: Vec<Uuid> = (0..3).map(|_| Uuid::new_v4()).collect();
        let elegiveis: HashSet<Uuid> = ids.iter().copied().collect();

        let mut acc = AcumuladorGeral::default();
        acumular_dia_geral(
            &mut acc,
            &[],
            &[
                indisponibilidade(ids[0], "VPL-1001", "FERIAS"),
                indisponibilidade(ids[1], "VPL-1002", "ACIDENTE"),
                indisponibilidade(ids[2], "VPL-1003", "TREINAMENTO"),
            ],
            &elegiveis,
        );

        let (_, itens) = montar_itens_gerais(&acc);
        let rotulos: Vec<&str> = itens.iter().map(|i| i.rotulo.as_str()).collect();
        assert_eq!(
            rotulos,
            vec![ROTULO_PRESENTE, "ACIDENTE", "FERIAS", "TREINAMENTO", ROTULO_NAO_REGISTRADO]
        );
    }

    #[test]
    fn supervisores_ordenados_por_percentual_de_presenca() {
        let (a1, a2, b1, b2) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
        let universos = BTreeMap::from([
            ("SUP A".to_string(), HashSet::from([a1, a2])),
            ("SUP B".to_string(), HashSet::from([b1, b2])),
        ]);
        let dia = data(10);

        let mut accs = BTreeMap::new();
        // SUP A: 1 de 2 presentes; SUP B: 2 de 2 presentes
        acumular_dia_supervisores(
            &mut accs,
            &universos,
            &[presenca(a1, dia), presenca(b1, dia), presenca(b2, dia)],
            &[],
        );

        let itens = montar_relatorio_supervisores(&accs);
        assert_eq!(itens[0].supervisor, "SUP B");
        assert_eq!(itens[0].percentual_presenca, 100.0);
        assert_eq!(itens[1].supervisor, "SUP A");
        assert_eq!(itens[1].percentual_presenca, 50.0);
        assert_eq!(itens[1].nao_registrados, 1);
    }

    #[test]
    fn presenca_de_fora_do_universo_nao_conta_para_o_supervisor() {
        let a1 = Uuid::new_v4();
        let estranho = Uuid::new_v4();
        let universos =
            BTreeMap::from([("SUP A".to_string(), HashSet::from([a1]))]);
        let dia = data(10);

        let mut accs = BTreeMap::new();
        acumular_dia_supervisores(&mut accs, &universos, &[presenca(estranho, dia)], &[]);

        let acc = accs.get("SUP A").unwrap();
        assert_eq!(acc.presentes, 0);
        assert_eq!(acc.nao_registrados, 1);
    }

    #[test]
    fn prefixo_sem_indisponibilidade_fica_fora_do_relatorio() {
        let mut acc = Vec::new();
        acumular_dia_prefixos(
            &mut acc,
            data(10),
            &[indisponibilidade(Uuid::new_v4(), "VPL-2001", "FERIAS")],
        );

        let itens = montar_relatorio_prefixos(&acc);
        assert_eq!(itens.len(), 1);
        assert_eq!(itens[0].prefixo, "VPL-2001");
    }

    #[test]
    fn prefixo_guarda_a_primeira_data_e_os_dois_motivos_mais_frequentes() {
        let mut acc = Vec::new();

        acumular_dia_prefixos(
            &mut acc,
            data(3),
            &[
                indisponibilidade(Uuid::new_v4(), "VPL-2001", "FERIAS"),
                indisponibilidade(Uuid::new_v4(), "VPL-2001", "ACIDENTE"),
            ],
        );
        acumular_dia_prefixos(
            &mut acc,
            data(4),
            &[
                indisponibilidade(Uuid::new_v4(), "VPL-2001", "FERIAS"),
                indisponibilidade(Uuid::new_v4(), "VPL-2001", "TREINAMENTO"),
            ],
        );

        let itens = montar_relatorio_prefixos(&acc);
        assert_eq!(itens[0].primeira_data, data(3));
        assert_eq!(itens[0].total_indisponibilidades, 4);
        // FERIAS tem 2; ACIDENTE e TREINAMENTO empatam com 1, vence o que
        // apareceu primeiro
        assert_eq!(
            itens[0].principais_motivos,
            vec![
                MotivoContagem { descricao: "FERIAS".to_string(), total: 2 },
                MotivoContagem { descricao: "ACIDENTE".to_string(), total: 1 },
            ]
        );
    }

    #[test]
    fn faixa_de_um_dia_so_itera_uma_vez() {
        let dias: Vec<NaiveDate> = dias_da_faixa(data(10), data(10)).collect();
        assert_eq!(dias, vec![data(10)]);
    }

    #[test]
    fn faixa_invertida_e_rejeitada() {
        let resultado = RelatorioService::validar_faixa(Some(data(10)), Some(data(5)));
        assert!(resultado.is_err());
    }
}
