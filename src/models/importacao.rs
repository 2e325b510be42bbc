// src/models/importacao.rs

use serde::Serialize;
use utoipa::ToSchema;

// Colunas reconhecidas no arquivo de estrutura exportado do ERP.
// `matricula` e `colaborador` são obrigatórias; o resto é opcional.
pub const COLUNA_MATRICULA: &str = "matricula";
pub const COLUNA_COLABORADOR: &str = "colaborador";
pub const COLUNAS_OPCIONAIS: [&str; 12] = [
    "regional",
    "polo",
    "base",
    "prefixo",
    "descr_secao",
    "descr_situacao",
    "placas",
    "tipo_equipe",
    "processo_equipe",
    "superv_campo",
    "superv_operacao",
    "coordenador",
];

// Uma linha já interpretada do arquivo de estrutura
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinhaEstrutura {
    pub matricula: String,
    pub colaborador: String,
    pub regional: Option<String>,
    pub polo: Option<String>,
    pub base: Option<String>,
    pub prefixo: Option<String>,
    pub descr_secao: Option<String>,
    pub descr_situacao: Option<String>,
    pub placas: Option<String>,
    pub tipo_equipe: Option<String>,
    pub processo_equipe: Option<String>,
    pub superv_campo: Option<String>,
    pub superv_operacao: Option<String>,
    pub coordenador: Option<String>,
}

// Resultado devolvido ao chamador depois da importação
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResultadoImportacao {
    pub arquivados: u64,
    pub inseridos: u64,
    pub atualizados: u64,
}
