// src/services/resolucao_diaria.rs
//
// Resolução do estado diário dos eletricistas. Tudo aqui é computação pura
// sobre os conjuntos já buscados do banco (presenças, indisponibilidades e
// remanejamentos de um dia), para que os relatórios não precisem reconsultar
// o banco dentro dos laços.

use std::collections::{HashMap, HashSet};

use uuid::Uuid;

use crate::models::{
    equipes::{Eletricista, situacao_elegivel},
    registros::{IndisponibilidadeDia, Remanejamento},
    relatorios::{EstadoDia, PendenteItem},
};

// Destino e origem de um remanejamento, indexados por eletricista
pub fn mapa_remanejamentos(
    remanejamentos: &[Remanejamento],
) -> HashMap<Uuid, (String, String)> {
    remanejamentos
        .iter()
        .map(|r| {
            (
                r.eletricista_id,
                (r.supervisor_origem.clone(), r.supervisor_destino.clone()),
            )
        })
        .collect()
}

pub fn conjunto_presentes(presencas: &[crate::models::registros::EquipeDia]) -> HashSet<Uuid> {
    presencas.iter().map(|p| p.eletricista_id).collect()
}

pub fn mapa_indisponiveis(indisponiveis: &[IndisponibilidadeDia]) -> HashMap<Uuid, String> {
    indisponiveis
        .iter()
        .map(|i| (i.eletricista_id, i.motivo.clone()))
        .collect()
}

// Estado de cada eletricista do conjunto, do ponto de vista de `supervisor`.
//
// Regra de desempate: registro (frequência OU indisponibilidade) sempre
// domina remanejamento. O remanejamento só decide em qual supervisão o
// eletricista aparece quando não há registro nenhum.
pub fn resolver_dia(
    supervisor: &str,
    eletricistas: &[Eletricista],
    presentes: &HashSet<Uuid>,
    indisponiveis: &HashMap<Uuid, String>,
    remanejados: &HashMap<Uuid, (String, String)>,
) -> HashMap<Uuid, EstadoDia> {
    let mut estados = HashMap::new();

    for eletricista in eletricistas {
        if presentes.contains(&eletricista.id) {
            estados.insert(eletricista.id, EstadoDia::Presente);
            continue;
        }
        if let Some(motivo) = indisponiveis.get(&eletricista.id) {
            estados.insert(eletricista.id, EstadoDia::Indisponivel(motivo.clone()));
            continue;
        }
        if let Some((_, destino)) = remanejados.get(&eletricista.id) {
            let estado = if destino == supervisor {
                EstadoDia::RemanejadoEntrada
            } else {
                EstadoDia::RemanejadoSaida
            };
            estados.insert(eletricista.id, estado);
            continue;
        }
        if situacao_elegivel(eletricista.descr_situacao.as_deref()) {
            estados.insert(eletricista.id, EstadoDia::NaoRegistrado);
        }
        // Situações não elegíveis (afastado, cedido...) ficam fora do mapa
    }

    estados
}

// Quem a supervisão ainda precisa registrar no dia: a base própria, menos
// quem saiu remanejado, mais quem entrou remanejado de outra supervisão,
// menos quem já tem registro de frequência ou indisponibilidade.
pub fn pendentes_do_supervisor(
    supervisor: &str,
    todos: &[Eletricista],
    presentes: &HashSet<Uuid>,
    indisponiveis: &HashMap<Uuid, String>,
    remanejados: &HashMap<Uuid, (String, String)>,
) -> Vec<PendenteItem> {
    let mut pendentes = Vec::new();

    for eletricista in todos {
        if !situacao_elegivel(eletricista.descr_situacao.as_deref()) {
            continue;
        }
        // Registro existente domina a visibilidade do remanejamento
        if presentes.contains(&eletricista.id) || indisponiveis.contains_key(&eletricista.id) {
            continue;
        }

        let da_base = eletricista.superv_campo.as_deref() == Some(supervisor);
        let (remanejado_para_ca, origem) = match remanejados.get(&eletricista.id) {
            Some((origem, destino)) if destino == supervisor => (true, Some(origem.clone())),
            Some(_) => {
                // Remanejado para outra supervisão: some da base de origem
                continue;
            }
            None => (false, None),
        };

        if da_base || remanejado_para_ca {
            pendentes.push(PendenteItem {
                id: eletricista.id,
                matricula: eletricista.matricula.clone(),
                colaborador: eletricista.colaborador.clone(),
                prefixo: eletricista.prefixo.clone(),
                remanejado_de: if remanejado_para_ca { origem } else { None },
            });
        }
    }

    pendentes.sort_by(|a, b| a.colaborador.cmp(&b.colaborador));
    pendentes
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};

    fn eletricista(nome: &str, superv: &str, situacao: &str) -> Eletricista {
        Eletricista {
            id: Uuid::new_v4(),
            regional: None,
            polo: Some("POLO LESTE".to_string()),
            base: Some("BASE A".to_string()),
            prefixo: Some("VPL-1001".to_string()),
            matricula: format!("M-{nome}"),
            colaborador: nome.to_string(),
            descr_secao: None,
            descr_situacao: Some(situacao.to_string()),
            placas: None,
            tipo_equipe: None,
            processo_equipe: None,
            superv_campo: Some(superv.to_string()),
            superv_operacao: None,
            coordenador: None,
            criado_em: Utc::now(),
            atualizado_em: Utc::now(),
        }
    }

    fn remanejamento(id: Uuid, origem: &str, destino: &str) -> Remanejamento {
        Remanejamento {
            id: Uuid::new_v4(),
            eletricista_id: id,
            supervisor_origem: origem.to_string(),
            supervisor_destino: destino.to_string(),
            data_remanejamento: NaiveDate::from_ymd_opt(2025, 1, 10).unwrap(),
            temporario: true,
            usuario_registro: None,
            criado_em: Utc::now(),
            observacoes: None,
        }
    }

    #[test]
    fn frequencia_domina_remanejamento() {
        let a = eletricista("ANA", "SUP1", "ATIVO");
        let presentes = HashSet::from([a.id]);
        let indisponiveis = HashMap::new();
        let remanejados = mapa_remanejamentos(&[remanejamento(a.id, "SUP1", "SUP2")]);

        let estados = resolver_dia("SUP1", &[a.clone()], &presentes, &indisponiveis, &remanejados);
        assert_eq!(estados.get(&a.id), Some(&EstadoDia::Presente));
    }

    #[test]
    fn indisponibilidade_domina_remanejamento() {
        let a = eletricista("BRUNO", "SUP1", "ATIVO");
        let presentes = HashSet::new();
        let indisponiveis = HashMap::from([(a.id, "FERIAS".to_string())]);
        let remanejados = mapa_remanejamentos(&[remanejamento(a.id, "SUP1", "SUP2")]);

        let estados = resolver_dia("SUP2", &[a.clone()], &presentes, &indisponiveis, &remanejados);
        assert_eq!(
            estados.get(&a.id),
            Some(&EstadoDia::Indisponivel("FERIAS".to_string()))
        );
    }

    #[test]
    fn remanejado_aparece_como_entrada_no_destino_e_saida_na_origem() {
        let a = eletricista("CARLA", "SUP1", "ATIVO");
        let presentes = HashSet::new();
        let indisponiveis = HashMap::new();
        let remanejados = mapa_remanejamentos(&[remanejamento(a.id, "SUP1", "SUP2")]);

        let na_origem = resolver_dia("SUP1", &[a.clone()], &presentes, &indisponiveis, &remanejados);
        assert_eq!(na_origem.get(&a.id), Some(&EstadoDia::RemanejadoSaida));

        let no_destino = resolver_dia("SUP2", &[a.clone()], &presentes, &indisponiveis, &remanejados);
        assert_eq!(no_destino.get(&a.id), Some(&EstadoDia::RemanejadoEntrada));
    }

    #[test]
    fn situacao_nao_elegivel_fica_fora_do_mapa() {
        let a = eletricista("DANIEL", "SUP1", "AFASTADO");
        let estados = resolver_dia(
            "SUP1",
            &[a.clone()],
            &HashSet::new(),
            &HashMap::new(),
            &HashMap::new(),
        );
        assert!(estados.is_empty());
    }

    #[test]
    fn sem_registro_e_sem_remanejamento_fica_nao_registrado() {
        let a = eletricista("EDUARDA", "SUP1", "RESERVA");
        let estados = resolver_dia(
            "SUP1",
            &[a.clone()],
            &HashSet::new(),
            &HashMap::new(),
            &HashMap::new(),
        );
        assert_eq!(estados.get(&a.id), Some(&EstadoDia::NaoRegistrado));
    }

    #[test]
    fn pendentes_trocam_de_supervisao_com_remanejamento() {
        let da_base = eletricista("FABIO", "SUP1", "ATIVO");
        let que_saiu = eletricista("GISELE", "SUP1", "ATIVO");
        let que_entrou = eletricista("HELIO", "SUP3", "ATIVO");
        let todos = vec![da_base.clone(), que_saiu.clone(), que_entrou.clone()];

        let remanejados = mapa_remanejamentos(&[
            remanejamento(que_saiu.id, "SUP1", "SUP2"),
            remanejamento(que_entrou.id, "SUP3", "SUP1"),
        ]);

        let pendentes = pendentes_do_supervisor(
            "SUP1",
            &todos,
            &HashSet::new(),
            &HashMap::new(),
            &remanejados,
        );

        let ids: Vec<Uuid> = pendentes.iter().map(|p| p.id).collect();
        assert!(ids.contains(&da_base.id));
        assert!(!ids.contains(&que_saiu.id));
        assert!(ids.contains(&que_entrou.id));

        let entrada = pendentes.iter().find(|p| p.id == que_entrou.id).unwrap();
        assert_eq!(entrada.remanejado_de.as_deref(), Some("SUP3"));
    }

    #[test]
    fn pendentes_excluem_quem_ja_tem_registro() {
        let presente = eletricista("IVAN", "SUP1", "ATIVO");
        let indisponivel = eletricista("JULIA", "SUP1", "ATIVO");
        let remanejado_registrado = eletricista("KARLA", "SUP3", "ATIVO");
        let todos = vec![
            presente.clone(),
            indisponivel.clone(),
            remanejado_registrado.clone(),
        ];

        let presentes = HashSet::from([presente.id, remanejado_registrado.id]);
        let indisponiveis = HashMap::from([(indisponivel.id, "ACIDENTE".to_string())]);
        // Mesmo remanejado para cá, quem já tem registro não entra nos pendentes
        let remanejados =
            mapa_remanejamentos(&[remanejamento(remanejado_registrado.id, "SUP3", "SUP1")]);

        let pendentes =
            pendentes_do_supervisor("SUP1", &todos, &presentes, &indisponiveis, &remanejados);
        assert!(pendentes.is_empty());
    }
}
