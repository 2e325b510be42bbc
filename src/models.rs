pub mod auth;
pub mod equipes;
pub mod importacao;
pub mod registros;
pub mod relatorios;
