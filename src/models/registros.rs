// src/models/registros.rs
//
// Registros diários: frequência (equipes montadas), indisponibilidades
// e remanejamentos temporários entre supervisões.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// Tipos aceitos para uma indisponibilidade
pub const TIPO_PARCIAL: &str = "PARCIAL";
pub const TIPO_TOTAL: &str = "TOTAL";

// Motivo de indisponibilidade (catálogo gerenciado pelo admin)
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MotivoIndisponibilidade {
    pub id: Uuid,
    pub descricao: String,
    pub ativo: bool,
}

// Um eletricista associado a um prefixo em um dia (registro de frequência)
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EquipeDia {
    pub id: Uuid,
    pub eletricista_id: Uuid,
    pub prefixo: String,
    pub data: NaiveDate,
    pub supervisor_registro: String,
    pub usuario_registro: Option<Uuid>,
    pub observacoes: Option<String>,
    pub criado_em: DateTime<Utc>,
}

// Indisponibilidade registrada para um eletricista em um dia
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Indisponibilidade {
    pub id: Uuid,
    pub data: NaiveDate,
    pub eletricista_id: Uuid,
    pub eletricista2_id: Option<Uuid>,
    pub matricula: Option<String>,
    pub prefixo: String,
    pub tipo: String,
    pub motivo_id: Uuid,
    pub observacao: Option<String>,
    pub usuario_registro: Option<Uuid>,
    pub criado_em: DateTime<Utc>,
}

// Remanejamento temporário de um eletricista para outra supervisão
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Remanejamento {
    pub id: Uuid,
    pub eletricista_id: Uuid,
    pub supervisor_origem: String,
    pub supervisor_destino: String,
    pub data_remanejamento: NaiveDate,
    pub temporario: bool,
    pub usuario_registro: Option<Uuid>,
    pub criado_em: DateTime<Utc>,
    pub observacoes: Option<String>,
}

// Projeção usada pelos relatórios: indisponibilidade do dia já com a
// descrição do motivo resolvida pelo JOIN.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct IndisponibilidadeDia {
    pub eletricista_id: Uuid,
    pub prefixo: String,
    pub motivo: String,
}

// ---------------------------------------------------------------------------
// Payloads de entrada (estruturas explícitas, validadas na borda)
// ---------------------------------------------------------------------------

// Uma associação eletricista -> prefixo dentro do lote de frequência
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct AssociacaoFrequencia {
    pub eletricista_id: Uuid,
    #[validate(length(min = 1, message = "O prefixo é obrigatório."))]
    pub prefixo: String,
    pub observacoes: Option<String>,
}

// Lote de frequência enviado pelo supervisor
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SalvarFrequenciaPayload {
    // Quando ausente, o registro vale para hoje
    pub data: Option<NaiveDate>,
    #[validate(length(min = 1, message = "Nenhuma associação enviada."), nested)]
    pub associacoes: Vec<AssociacaoFrequencia>,
}

// Registro de indisponibilidade
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SalvarIndisponibilidadePayload {
    pub eletricista_id: Uuid,
    // Segundo componente da equipe, quando a dupla inteira fica parada
    pub eletricista2_id: Option<Uuid>,
    #[validate(length(min = 1, message = "O prefixo é obrigatório."))]
    pub prefixo: String,
    #[validate(custom(function = "validar_tipo"))]
    pub tipo: String,
    pub motivo_id: Uuid,
    pub observacao: Option<String>,
    pub data: Option<NaiveDate>,
}

// Pedido de remanejamento temporário
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RemanejarPayload {
    pub eletricista_id: Uuid,
    // Quando ausente, o destino é a supervisão do usuário logado
    pub supervisor_destino: Option<String>,
    pub observacoes: Option<String>,
    pub data: Option<NaiveDate>,
}

// Cadastro de motivo (admin)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CriarMotivoPayload {
    #[validate(length(min = 2, message = "A descrição deve ter no mínimo 2 caracteres."))]
    pub descricao: String,
}

fn validar_tipo(tipo: &str) -> Result<(), validator::ValidationError> {
    match tipo {
        TIPO_PARCIAL | TIPO_TOTAL => Ok(()),
        _ => {
            let mut err = validator::ValidationError::new("tipo_invalido");
            err.message = Some("Tipo deve ser PARCIAL ou TOTAL.".into());
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload_indisponibilidade(tipo: &str) -> SalvarIndisponibilidadePayload {
        SalvarIndisponibilidadePayload {
            eletricista_id: Uuid::new_v4(),
            eletricista2_id: None,
            prefixo: "VPL-1203".to_string(),
            tipo: tipo.to_string(),
            motivo_id: Uuid::new_v4(),
            observacao: None,
            data: None,
        }
    }

    #[test]
    fn tipo_de_indisponibilidade_e_restrito() {
        assert!(payload_indisponibilidade(TIPO_PARCIAL).validate().is_ok());
        assert!(payload_indisponibilidade(TIPO_TOTAL).validate().is_ok());
        assert!(payload_indisponibilidade("INTEGRAL").validate().is_err());
    }

    #[test]
    fn lote_de_frequencia_vazio_e_rejeitado() {
        let payload = SalvarFrequenciaPayload { data: None, associacoes: vec![] };
        assert!(payload.validate().is_err());
    }

    #[test]
    fn associacao_sem_prefixo_e_rejeitada() {
        let payload = SalvarFrequenciaPayload {
            data: None,
            associacoes: vec![AssociacaoFrequencia {
                eletricista_id: Uuid::new_v4(),
                prefixo: String::new(),
                observacoes: None,
            }],
        };
        assert!(payload.validate().is_err());
    }
}
