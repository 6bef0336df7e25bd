use std::sync::Arc;

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use tracing::{info, warn};

use gatehouse_auth::{MenuCatalog, UserDirectory};
use gatehouse_infra::{PgMenuCatalog, Seed};

use crate::config::AppConfig;

/// Stores the access middleware and the handlers read from.
#[derive(Clone)]
pub struct AppServices {
    pub directory: Arc<dyn UserDirectory>,
    pub catalog: Arc<dyn MenuCatalog>,
}

/// Wire the directory and catalog from configuration.
///
/// Users always come from the seed (empty when none is configured). Menus come
/// from Postgres when `database_url` is set, otherwise from the seed.
pub async fn build_services(config: &AppConfig) -> anyhow::Result<AppServices> {
    let seed = match &config.seed_path {
        Some(path) => Seed::from_path(path).with_context(|| format!("loading seed {path}"))?,
        None => {
            warn!("no seed configured; starting with empty stores");
            Seed::default()
        }
    };
    let (directory, seeded_catalog) = seed.into_stores();

    let catalog: Arc<dyn MenuCatalog> = match &config.database_url {
        Some(url) => {
            let pool = PgPoolOptions::new()
                .max_connections(5)
                .connect(url)
                .await
                .context("connecting to menu database")?;
            info!("menu catalog backed by postgres");
            Arc::new(PgMenuCatalog::new(pool))
        }
        None => Arc::new(seeded_catalog),
    };

    Ok(AppServices {
        directory: Arc::new(directory),
        catalog,
    })
}
