// src/models/relatorios.rs

use chrono::NaiveDate;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

// Rótulos fixos usados nos relatórios
pub const ROTULO_PRESENTE: &str = "Presente";
pub const ROTULO_NAO_REGISTRADO: &str = "Não registrado";

// Estado de um eletricista em um dia, do ponto de vista de uma supervisão.
// Frequência e indisponibilidade sempre dominam o remanejamento.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(tag = "estado", content = "detalhe", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EstadoDia {
    Presente,
    Indisponivel(String),
    RemanejadoSaida,
    RemanejadoEntrada,
    NaoRegistrado,
}

// Uma linha do relatório geral: rótulo (Presente, motivo ou Não registrado),
// total acumulado na faixa e percentual sobre o total geral.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemRelatorioGeral {
    pub rotulo: String,
    pub total: i64,
    pub percentual: f64,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RelatorioGeral {
    pub data_inicio: NaiveDate,
    pub data_fim: NaiveDate,
    pub total_geral: i64,
    pub itens: Vec<ItemRelatorioGeral>,
}

// Contagem de um motivo dentro de um agrupamento
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MotivoContagem {
    pub descricao: String,
    pub total: i64,
}

// Uma linha do relatório por supervisor
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RelatorioSupervisorItem {
    pub supervisor: String,
    pub presentes: i64,
    pub nao_registrados: i64,
    pub total: i64,
    pub percentual_presenca: f64,
    pub motivos: Vec<MotivoContagem>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RelatorioSupervisores {
    pub data_inicio: NaiveDate,
    pub data_fim: NaiveDate,
    pub supervisores: Vec<RelatorioSupervisorItem>,
}

// Uma linha do relatório por prefixo. Só entram prefixos que tiveram
// ao menos uma indisponibilidade na faixa.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RelatorioPrefixoItem {
    pub prefixo: String,
    pub primeira_data: NaiveDate,
    pub total_indisponibilidades: i64,
    pub principais_motivos: Vec<MotivoContagem>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RelatorioPrefixos {
    pub data_inicio: NaiveDate,
    pub data_fim: NaiveDate,
    pub prefixos: Vec<RelatorioPrefixoItem>,
}

// Eletricista sem nenhum registro (frequência ou indisponibilidade)
// em todos os dias da faixa.
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DisponibilidadeItem {
    pub id: Uuid,
    pub matricula: String,
    pub colaborador: String,
    pub polo: Option<String>,
    pub base: Option<String>,
    pub prefixo: Option<String>,
    pub superv_campo: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RelatorioDisponibilidade {
    pub data_inicio: NaiveDate,
    pub data_fim: NaiveDate,
    pub eletricistas: Vec<DisponibilidadeItem>,
}

// Uma linha da visão do dia: o eletricista e o estado resolvido
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResumoDiaItem {
    pub id: Uuid,
    pub matricula: String,
    pub colaborador: String,
    pub prefixo: Option<String>,
    pub estado: EstadoDia,
}

// Visão completa do dia de uma supervisão: a base própria mais quem
// entrou por remanejamento, cada um com seu estado resolvido.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResumoDiaResposta {
    pub data: NaiveDate,
    pub supervisor: String,
    pub eletricistas: Vec<ResumoDiaItem>,
}

// Visão do supervisor: quem ainda não foi registrado hoje
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PendenteItem {
    pub id: Uuid,
    pub matricula: String,
    pub colaborador: String,
    pub prefixo: Option<String>,
    // Preenchido quando o eletricista aparece nesta supervisão por remanejamento
    pub remanejado_de: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PendentesResposta {
    pub data: NaiveDate,
    pub supervisor: String,
    pub pendentes: Vec<PendenteItem>,
}
