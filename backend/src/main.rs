mod api;
mod config;
mod telemetry;

use anyhow::Context;
use axum::extract::FromRef;
use axum::Router;
use launch_core::LaunchTable;
use leptos::get_configuration;
use leptos_axum::{generate_route_list, LeptosRoutes};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::api::ApiState;
use crate::config::ServerConfig;

#[derive(Clone)]
struct ServerState {
    api: ApiState,
    leptos_options: leptos::LeptosOptions,
}

impl FromRef<ServerState> for leptos::LeptosOptions {
    fn from_ref(state: &ServerState) -> leptos::LeptosOptions {
        state.leptos_options.clone()
    }
}

impl FromRef<ServerState> for ApiState {
    fn from_ref(state: &ServerState) -> ApiState {
        state.api.clone()
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::from_env();
    telemetry::init_tracing(&config.log_filter);

    let table = LaunchTable::from_path(&config.data_path)
        .with_context(|| format!("load launch records from {}", config.data_path.display()))?;
    let api = ApiState::new(table);

    let conf = get_configuration(None)
        .await
        .context("load leptos config")?;
    let leptos_options = conf.leptos_options;

    let server_state = ServerState {
        api: api.clone(),
        leptos_options: leptos_options.clone(),
    };

    let leptos_routes = generate_route_list(ui::App);
    let bootstrap = api.bootstrap.clone();

    let app = Router::new()
        .merge(api::routes())
        .leptos_routes_with_context(
            &server_state,
            leptos_routes,
            move || ui::provide_bootstrap(bootstrap.as_ref().clone()),
            ui::App,
        )
        .fallback_service(ServeDir::new(leptos_options.site_root.clone()))
        .layer(TraceLayer::new_for_http())
        .with_state(server_state);

    let addr = leptos_options.site_addr;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("bind {addr}"))?;
    tracing::info!(
        %addr,
        records = api.dashboard.table().len(),
        sites = api.dashboard.table().sites().len(),
        "dashboard listening (UI + API)"
    );
    axum::serve(listener, app).await.context("server failed")?;
    Ok(())
}
