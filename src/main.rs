//src/main.rs

use axum::{
    Router,
    middleware as axum_middleware,
    routing::{get, patch, post},
};
use tokio::net::TcpListener;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod middleware;
mod models;
mod services;

use crate::config::AppState;
use crate::middleware::auth::auth_guard;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_target(false).compact().init();

    // .expect() é bom aqui: se a configuração falhar, a aplicação não deve iniciar.
    let app_state = AppState::new()
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    // Roda as migrações do SQLx na inicialização
    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Falha ao rodar as migrações do banco de dados.");

    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    // Rotas públicas de autenticação
    let auth_routes = Router::new().route("/login", post(handlers::auth::login));

    // Rotas protegidas: tudo que mexe ou consulta registros do dia
    let registro_routes = Router::new()
        .route("/auth/me", get(handlers::auth::get_me))
        .route("/eletricistas/busca", get(handlers::eletricistas::buscar_eletricistas))
        .route("/eletricistas/prefixos", get(handlers::eletricistas::buscar_prefixos))
        .route("/frequencia", post(handlers::frequencia::salvar_frequencia))
        .route("/frequencia/pendentes", get(handlers::frequencia::pendentes))
        .route("/frequencia/resumo", get(handlers::frequencia::resumo_do_dia))
        .route("/indisponibilidades", post(handlers::frequencia::salvar_indisponibilidade))
        .route("/remanejamentos", post(handlers::frequencia::remanejar))
        .route("/motivos", get(handlers::frequencia::listar_motivos))
        .layer(axum_middleware::from_fn_with_state(app_state.clone(), auth_guard));

    let relatorio_routes = Router::new()
        .route("/geral", get(handlers::relatorios::relatorio_geral))
        .route("/supervisores", get(handlers::relatorios::relatorio_supervisores))
        .route("/prefixos", get(handlers::relatorios::relatorio_prefixos))
        .route("/disponibilidade", get(handlers::relatorios::relatorio_disponibilidade))
        .layer(axum_middleware::from_fn_with_state(app_state.clone(), auth_guard));

    // O perfil ADMIN é checado dentro dos handlers
    let admin_routes = Router::new()
        .route(
            "/usuarios",
            post(handlers::admin::criar_usuario).get(handlers::admin::listar_usuarios),
        )
        .route("/usuarios/{id}", patch(handlers::admin::atualizar_usuario))
        .route("/motivos", post(handlers::admin::criar_motivo))
        .route("/motivos/{id}/ativo/{ativo}", patch(handlers::admin::ativar_motivo))
        .route("/eletricistas/{id}", patch(handlers::admin::atualizar_eletricista))
        .layer(axum_middleware::from_fn_with_state(app_state.clone(), auth_guard));

    let importacao_routes = Router::new()
        .route("/estrutura", post(handlers::importacao::importar_estrutura))
        .layer(axum_middleware::from_fn_with_state(app_state.clone(), auth_guard));

    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/auth", auth_routes)
        .nest("/api", registro_routes)
        .nest("/api/relatorios", relatorio_routes)
        .nest("/api/admin", admin_routes)
        .nest("/api/importacao", importacao_routes)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", docs::ApiDoc::openapi()))
        .with_state(app_state);

    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("0.0.0.0:{port}");
    let listener = TcpListener::bind(&addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr().unwrap());
    axum::serve(listener, app).await.expect("Erro no servidor Axum");
}
