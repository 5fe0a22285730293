use std::{process, sync::Arc};

use linkfeed::{
    application::{
        auth::SessionVerifier,
        error::AppError,
        feed::FeedService,
        links::LinkService,
        repos::{HealthRepo, LinkRelationsRepo, LinksRepo, LinksWriteRepo},
    },
    config,
    infra::{
        db::PostgresRepositories,
        error::InfraError,
        graphql::{build_schema, schema_sdl},
        http::{self, HttpState},
        telemetry,
    },
};
use tracing::{Dispatch, Level, dispatcher, error, info};
use tracing_subscriber::fmt as tracing_fmt;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        report_application_error(&error);
        process::exit(1);
    }
}

fn report_application_error(error: &AppError) {
    if dispatcher::has_been_set() {
        error!(error = %error, "application error");
        return;
    }

    let subscriber = tracing_fmt().with_max_level(Level::ERROR).finish();
    let dispatch = Dispatch::new(subscriber);
    dispatcher::with_default(&dispatch, || {
        error!(error = %error, "application error");
    });
}

async fn run() -> Result<(), AppError> {
    let (cli_args, settings) = config::load_with_cli()?;

    let command = cli_args
        .command
        .unwrap_or(config::Command::Serve(Box::<config::ServeArgs>::default()));

    if let config::Command::Schema = command {
        println!("{}", schema_sdl());
        return Ok(());
    }

    telemetry::init(&settings.logging)?;

    match command {
        config::Command::Serve(_) => run_serve(settings).await,
        config::Command::Migrate(_) => run_migrate(settings).await,
        config::Command::Schema => Ok(()),
    }
}

async fn run_serve(settings: config::Settings) -> Result<(), AppError> {
    let jwt_secret = settings
        .auth
        .jwt_secret
        .as_deref()
        .ok_or_else(|| InfraError::missing_setting("auth.jwt_secret", "verify session tokens"))?;
    let sessions = Arc::new(SessionVerifier::new(jwt_secret));

    let repositories = init_repositories(&settings).await?;
    let state = build_http_state(repositories, sessions, &settings);
    serve_http(&settings, state).await
}

async fn run_migrate(settings: config::Settings) -> Result<(), AppError> {
    init_repositories(&settings).await?;
    info!("migrations applied");
    Ok(())
}

async fn init_repositories(
    settings: &config::Settings,
) -> Result<Arc<PostgresRepositories>, AppError> {
    let database_url = settings
        .database
        .url
        .as_ref()
        .ok_or_else(|| InfraError::missing_setting("database.url", "reach the link store"))?;

    let pool =
        PostgresRepositories::connect(database_url, settings.database.max_connections.get())
            .await
            .map_err(InfraError::Connect)?;

    PostgresRepositories::run_migrations(&pool)
        .await
        .map_err(InfraError::from)?;

    Ok(Arc::new(PostgresRepositories::new(pool)))
}

fn build_http_state(
    repositories: Arc<PostgresRepositories>,
    sessions: Arc<SessionVerifier>,
    settings: &config::Settings,
) -> HttpState {
    let links_repo: Arc<dyn LinksRepo> = repositories.clone();
    let links_write_repo: Arc<dyn LinksWriteRepo> = repositories.clone();
    let relations_repo: Arc<dyn LinkRelationsRepo> = repositories.clone();
    let health_repo: Arc<dyn HealthRepo> = repositories;

    let feed = FeedService::new(links_repo.clone(), settings.feed.max_take);
    let links = LinkService::new(links_repo, links_write_repo);

    HttpState {
        schema: build_schema(feed, links),
        sessions,
        relations: relations_repo,
        health: health_repo,
    }
}

async fn serve_http(settings: &config::Settings, state: HttpState) -> Result<(), AppError> {
    let router = http::build_router(state);

    let addr = settings.server.addr;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| InfraError::Bind { addr, source })?;
    info!(%addr, "listening");

    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|err| AppError::unexpected(format!("server error: {err}")))?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!(error = %err, "failed to listen for shutdown signal");
    }
}
