use migration::{Migrator, MigratorTrait};

mod settings;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let settings = settings::Settings::new()?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "finances={level},server={level},engine={level}",
            level = settings.app.level
        ))
        .init();

    let db = connect_database(&settings.server.database).await?;

    let engine = engine::Engine::builder()
        .database(db)
        .build()
        .await
        .map_err(|err| {
            tracing::error!("failed to build engine from database: {err}");
            err
        })?;

    let addr = settings.server.address();
    let listener = tokio::net::TcpListener::bind(&addr).await.map_err(|err| {
        tracing::error!("failed to bind server listener on {addr}: {err}");
        err
    })?;

    tokio::select! {
        result = server::run_with_listener(engine, listener) => {
            if let Err(err) = result {
                tracing::error!("server failed: {err}");
                return Err(err.into());
            }
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("shutting down");
        }
    }

    Ok(())
}

async fn connect_database(
    config: &settings::Database,
) -> Result<sea_orm::DatabaseConnection, Box<dyn std::error::Error + Send + Sync>> {
    let url = config.url();
    tracing::info!("connecting to {url}");

    let database = sea_orm::Database::connect(url).await?;
    Migrator::up(&database, None).await?;
    Ok(database)
}
