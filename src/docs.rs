// src/docs.rs

use utoipa::OpenApi;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::login,
        handlers::auth::get_me,

        // --- Eletricistas ---
        handlers::eletricistas::buscar_eletricistas,
        handlers::eletricistas::buscar_prefixos,

        // --- Registros diários ---
        handlers::frequencia::salvar_frequencia,
        handlers::frequencia::salvar_indisponibilidade,
        handlers::frequencia::remanejar,
        handlers::frequencia::pendentes,
        handlers::frequencia::resumo_do_dia,
        handlers::frequencia::listar_motivos,

        // --- Relatórios ---
        handlers::relatorios::relatorio_geral,
        handlers::relatorios::relatorio_supervisores,
        handlers::relatorios::relatorio_prefixos,
        handlers::relatorios::relatorio_disponibilidade,

        // --- Importação ---
        handlers::importacao::importar_estrutura,

        // --- Admin ---
        handlers::admin::criar_usuario,
        handlers::admin::listar_usuarios,
        handlers::admin::atualizar_usuario,
        handlers::admin::criar_motivo,
        handlers::admin::ativar_motivo,
        handlers::admin::atualizar_eletricista,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::Usuario,
            models::auth::LoginPayload,
            models::auth::CriarUsuarioPayload,
            models::auth::AtualizarUsuarioPayload,
            models::auth::AuthResponse,

            // --- Estrutura de equipes ---
            models::equipes::Eletricista,
            models::equipes::EletricistaHistorico,
            models::equipes::AtualizarEletricistaPayload,
            models::equipes::PrefixoResumo,

            // --- Registros diários ---
            models::registros::MotivoIndisponibilidade,
            models::registros::EquipeDia,
            models::registros::Indisponibilidade,
            models::registros::Remanejamento,
            models::registros::AssociacaoFrequencia,
            models::registros::SalvarFrequenciaPayload,
            models::registros::SalvarIndisponibilidadePayload,
            models::registros::RemanejarPayload,
            models::registros::CriarMotivoPayload,

            // --- Relatórios ---
            models::relatorios::EstadoDia,
            models::relatorios::ItemRelatorioGeral,
            models::relatorios::RelatorioGeral,
            models::relatorios::MotivoContagem,
            models::relatorios::RelatorioSupervisorItem,
            models::relatorios::RelatorioSupervisores,
            models::relatorios::RelatorioPrefixoItem,
            models::relatorios::RelatorioPrefixos,
            models::relatorios::DisponibilidadeItem,
            models::relatorios::RelatorioDisponibilidade,
            models::relatorios::ResumoDiaItem,
            models::relatorios::ResumoDiaResposta,
            models::relatorios::PendenteItem,
            models::relatorios::PendentesResposta,

            // --- Importação ---
            models::importacao::ResultadoImportacao,
        )
    ),
    tags(
        (name = "Auth", description = "Autenticação e dados do usuário logado"),
        (name = "Eletricistas", description = "Busca no cadastro de eletricistas"),
        (name = "Registros", description = "Frequência, indisponibilidades e remanejamentos do dia"),
        (name = "Relatorios", description = "Relatórios agregados por faixa de datas"),
        (name = "Importacao", description = "Importação do arquivo de estrutura de equipes"),
        (name = "Admin", description = "Usuários, motivos e correções do cadastro")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}
