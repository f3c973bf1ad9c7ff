use tracing::{info, warn};

use crate::storage::AnyStorage;
use crate::App;

pub async fn run(app: App) -> anyhow::Result<()> {
    match app.storage {
        AnyStorage::Postgres(pg) => {
            pg.init_schema().await?;
            info!("schema ready");
        }
        AnyStorage::Memory(_) => {
            warn!("memory database has no schema, doing nothing");
        }
    }
    Ok(())
}
