// src/models/equipes.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// Situações funcionais que podem ser registradas no dia a dia.
// Eletricistas afastados, cedidos etc. ficam fora da frequência.
pub const SITUACOES_ELEGIVEIS: [&str; 2] = ["ATIVO", "RESERVA"];

pub fn situacao_elegivel(descr_situacao: Option<&str>) -> bool {
    descr_situacao.is_some_and(|s| SITUACOES_ELEGIVEIS.contains(&s))
}

// Uma linha da estrutura de equipes (cadastro vivo)
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Eletricista {
    pub id: Uuid,
    pub regional: Option<String>,
    pub polo: Option<String>,
    pub base: Option<String>,
    pub prefixo: Option<String>,
    pub matricula: String,
    pub colaborador: String,
    pub descr_secao: Option<String>,
    pub descr_situacao: Option<String>,
    pub placas: Option<String>,
    pub tipo_equipe: Option<String>,
    pub processo_equipe: Option<String>,
    pub superv_campo: Option<String>,
    pub superv_operacao: Option<String>,
    pub coordenador: Option<String>,
    pub criado_em: DateTime<Utc>,
    pub atualizado_em: DateTime<Utc>,
}

// Fotografia de uma linha do cadastro, tirada antes de uma reimportação.
// Nunca é alterada depois de gravada.
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EletricistaHistorico {
    pub id: Uuid,
    pub eletricista_id: Uuid,
    pub regional: Option<String>,
    pub polo: Option<String>,
    pub base: Option<String>,
    pub prefixo: Option<String>,
    pub matricula: String,
    pub colaborador: String,
    pub descr_secao: Option<String>,
    pub descr_situacao: Option<String>,
    pub placas: Option<String>,
    pub tipo_equipe: Option<String>,
    pub processo_equipe: Option<String>,
    pub superv_campo: Option<String>,
    pub superv_operacao: Option<String>,
    pub coordenador: Option<String>,
    pub arquivado_em: DateTime<Utc>,
    pub arquivado_por: Option<Uuid>,
    pub observacao: Option<String>,
}

// Edição manual de uma linha do cadastro (tela de admin)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AtualizarEletricistaPayload {
    pub regional: Option<String>,
    pub polo: Option<String>,
    pub base: Option<String>,
    pub prefixo: Option<String>,
    #[validate(length(min = 1, message = "O nome do colaborador não pode ficar vazio."))]
    pub colaborador: Option<String>,
    pub descr_secao: Option<String>,
    pub descr_situacao: Option<String>,
    pub placas: Option<String>,
    pub tipo_equipe: Option<String>,
    pub processo_equipe: Option<String>,
    pub superv_campo: Option<String>,
    pub superv_operacao: Option<String>,
    pub coordenador: Option<String>,
}

// Resultado da busca de prefixos (agrupado por prefixo + base)
#[derive(Debug, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PrefixoResumo {
    pub prefixo: Option<String>,
    pub base: Option<String>,
    pub total_eletricistas: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apenas_ativo_e_reserva_sao_elegiveis() {
        assert!(situacao_elegivel(Some("ATIVO")));
        assert!(situacao_elegivel(Some("RESERVA")));
        assert!(!situacao_elegivel(Some("AFASTADO")));
        assert!(!situacao_elegivel(None));
    }
}
