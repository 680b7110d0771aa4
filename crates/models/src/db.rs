use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::{info, warn};

pub use configs::DatabaseConfig;

fn connect_options(cfg: &DatabaseConfig) -> ConnectOptions {
    let mut opt = ConnectOptions::new(cfg.url.clone());
    opt.max_connections(cfg.max_connections)
        .min_connections(cfg.min_connections)
        .connect_timeout(Duration::from_secs(cfg.connect_timeout_secs))
        .idle_timeout(Duration::from_secs(cfg.idle_timeout_secs))
        .max_lifetime(Duration::from_secs(cfg.max_lifetime_secs))
        .acquire_timeout(Duration::from_secs(cfg.acquire_timeout_secs))
        .sqlx_logging(cfg.sqlx_logging);
    opt
}

/// Connect eagerly; fails if the database is unreachable.
pub async fn connect_with_config(cfg: &DatabaseConfig) -> anyhow::Result<DatabaseConnection> {
    let db = Database::connect(connect_options(cfg)).await?;
    Ok(db)
}

/// Build a pool without opening connections up front.
///
/// Used at server startup so an unreachable database does not stop the
/// process; queries fail individually until the database comes back.
pub async fn connect_lazy(cfg: &DatabaseConfig) -> anyhow::Result<DatabaseConnection> {
    let mut opt = connect_options(cfg);
    opt.connect_lazy(true);
    let db = Database::connect(opt).await?;
    Ok(db)
}

/// Ping the database and apply pending migrations, logging instead of failing.
/// Returns whether the database was reachable.
pub async fn warm_up(db: &DatabaseConnection) -> bool {
    use migration::MigratorTrait;

    if let Err(e) = db.ping().await {
        warn!(error = %e, "database unreachable at startup; requests will fail until it recovers");
        return false;
    }
    match migration::Migrator::up(db, None).await {
        Ok(()) => {
            info!("database connected and migrations applied");
            true
        }
        Err(e) => {
            warn!(error = %e, "database migration failed");
            false
        }
    }
}
