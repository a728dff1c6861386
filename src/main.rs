use std::{process, sync::Arc};

use quotedrift::{
    application::{
        catalog::CatalogService,
        engagement::EngagementService,
        error::AppError,
        feed::FeedService,
        overlay::OverlayService,
        quotes::QuoteService,
        repos::{
            CategoriesRepo, EngagementRepo, EngagementWriteRepo, HealthRepo, QuotesRepo,
            QuotesWriteRepo, UsersRepo,
        },
    },
    cache::{CacheInvalidator, FeedCacheStore},
    config,
    infra::{db::PostgresRepositories, error::InfraError, http, telemetry},
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
    let (cli_args, settings) = config::load_with_cli()
        .map_err(|err| AppError::unexpected(format!("failed to load configuration: {err}")))?;

    let command = cli_args
        .command
        .unwrap_or(config::Command::Serve(Box::<config::ServeArgs>::default()));

    telemetry::init(&settings.logging).map_err(AppError::from)?;

    match command {
        config::Command::Serve(_) => run_serve(settings).await,
        config::Command::Migrate(_) => run_migrate(settings).await,
    }
}

async fn connect_pool(settings: &config::Settings) -> Result<sqlx::PgPool, AppError> {
    let database_url = settings
        .database
        .url
        .as_ref()
        .ok_or_else(|| InfraError::configuration("database url is not configured"))
        .map_err(AppError::from)?;

    PostgresRepositories::connect(database_url, settings.database.max_connections.get())
        .await
        .map_err(|err| AppError::from(InfraError::database(err.to_string())))
}

async fn run_migrate(settings: config::Settings) -> Result<(), AppError> {
    let pool = connect_pool(&settings).await?;
    PostgresRepositories::run_migrations(&pool)
        .await
        .map_err(|err| AppError::from(InfraError::database(err.to_string())))?;
    info!(target = "quotedrift::migrate", "migrations applied");
    Ok(())
}

async fn run_serve(settings: config::Settings) -> Result<(), AppError> {
    let pool = connect_pool(&settings).await?;
    PostgresRepositories::run_migrations(&pool)
        .await
        .map_err(|err| AppError::from(InfraError::database(err.to_string())))?;

    let repositories = Arc::new(PostgresRepositories::new(pool));
    let state = build_router_state(repositories, &settings);

    let listener = tokio::net::TcpListener::bind(settings.server.addr)
        .await
        .map_err(|err| AppError::from(InfraError::from(err)))?;

    info!(
        target = "quotedrift::serve",
        addr = %settings.server.addr,
        cache_enabled = settings.cache.enabled,
        "listening"
    );

    axum::serve(listener, http::build_router(state).into_make_service())
        .await
        .map_err(|err| AppError::unexpected(format!("server error: {err}")))?;

    Ok(())
}

fn build_router_state(
    repositories: Arc<PostgresRepositories>,
    settings: &config::Settings,
) -> http::RouterState {
    let categories_repo: Arc<dyn CategoriesRepo> = repositories.clone();
    let quotes_repo: Arc<dyn QuotesRepo> = repositories.clone();
    let quotes_write_repo: Arc<dyn QuotesWriteRepo> = repositories.clone();
    let engagement_repo: Arc<dyn EngagementRepo> = repositories.clone();
    let engagement_write_repo: Arc<dyn EngagementWriteRepo> = repositories.clone();
    let users_repo: Arc<dyn UsersRepo> = repositories.clone();
    let health_repo: Arc<dyn HealthRepo> = repositories.clone();

    let cache = Arc::new(FeedCacheStore::new(settings.cache.clone()));
    let invalidator = CacheInvalidator::new(cache.clone());

    let catalog = CatalogService::new(categories_repo, cache.clone());
    let overlay = OverlayService::new(engagement_repo.clone(), cache.clone());
    let feed = Arc::new(FeedService::new(
        quotes_repo.clone(),
        engagement_repo,
        users_repo,
        catalog.clone(),
        overlay,
        cache,
        settings.feed,
    ));
    let quotes = Arc::new(QuoteService::new(
        quotes_repo,
        quotes_write_repo,
        invalidator.clone(),
    ));
    let engagement = Arc::new(EngagementService::new(engagement_write_repo, invalidator));

    http::RouterState {
        feed,
        catalog,
        quotes,
        engagement,
        health: health_repo,
    }
}
