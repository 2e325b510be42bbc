pub mod usuario_repo;
pub use usuario_repo::UsuarioRepository;
pub mod eletricista_repo;
pub use eletricista_repo::EletricistaRepository;
pub mod motivo_repo;
pub use motivo_repo::MotivoRepository;
pub mod frequencia_repo;
pub use frequencia_repo::FrequenciaRepository;
pub mod remanejamento_repo;
pub use remanejamento_repo::RemanejamentoRepository;
