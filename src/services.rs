pub mod auth;
pub use auth::AuthService;
pub mod resolucao_diaria;
pub mod frequencia_service;
pub use frequencia_service::FrequenciaService;
pub mod remanejamento_service;
pub use remanejamento_service::RemanejamentoService;
pub mod relatorio_service;
pub use relatorio_service::RelatorioService;
pub mod importacao_service;
pub use importacao_service::ImportacaoService;
