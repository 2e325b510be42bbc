pub mod admin;
pub mod auth;
pub mod eletricistas;
pub mod frequencia;
pub mod importacao;
pub mod relatorios;
