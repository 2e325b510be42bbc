// src/config.rs

use sqlx::{PgPool, postgres::PgPoolOptions};
use std::{env, time::Duration};

use crate::{
    db::{
        EletricistaRepository, FrequenciaRepository, MotivoRepository, RemanejamentoRepository,
        UsuarioRepository,
    },
    services::{
        AuthService, FrequenciaService, ImportacaoService, RelatorioService, RemanejamentoService,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub auth_service: AuthService,
    pub frequencia_service: FrequenciaService,
    pub remanejamento_service: RemanejamentoService,
    pub relatorio_service: RelatorioService,
    pub importacao_service: ImportacaoService,
    // Repositórios usados direto pelos handlers de busca e de admin
    pub eletricista_repo: EletricistaRepository,
    pub motivo_repo: MotivoRepository,
    pub usuario_repo: UsuarioRepository,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL")
            .map_err(|_| anyhow::anyhow!("DATABASE_URL deve ser definida"))?;
        let jwt_secret = env::var("JWT_SECRET")
            .map_err(|_| anyhow::anyhow!("JWT_SECRET deve ser definido"))?;

        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        // --- Monta o gráfico de dependências ---
        let usuario_repo = UsuarioRepository::new(db_pool.clone());
        let eletricista_repo = EletricistaRepository::new(db_pool.clone());
        let motivo_repo = MotivoRepository::new(db_pool.clone());
        let frequencia_repo = FrequenciaRepository::new(db_pool.clone());
        let remanejamento_repo = RemanejamentoRepository::new(db_pool.clone());

        let auth_service = AuthService::new(usuario_repo.clone(), jwt_secret);
        let frequencia_service = FrequenciaService::new(
            eletricista_repo.clone(),
            frequencia_repo.clone(),
            motivo_repo.clone(),
            remanejamento_repo.clone(),
            db_pool.clone(),
        );
        let remanejamento_service = RemanejamentoService::new(
            eletricista_repo.clone(),
            frequencia_repo.clone(),
            remanejamento_repo,
            db_pool.clone(),
        );
        let relatorio_service =
            RelatorioService::new(eletricista_repo.clone(), frequencia_repo);
        let importacao_service =
            ImportacaoService::new(eletricista_repo.clone(), db_pool.clone());

        Ok(Self {
            db_pool,
            auth_service,
            frequencia_service,
            remanejamento_service,
            relatorio_service,
            importacao_service,
            eletricista_repo,
            motivo_repo,
            usuario_repo,
        })
    }
}
