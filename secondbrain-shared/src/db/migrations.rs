/// Schema migrations
///
/// The SQL files in the workspace-level `migrations/` directory are embedded
/// at compile time and applied at startup, before the server binds.
///
/// | File | Creates |
/// |---|---|
/// | `20250101000001_create_users.sql` | `users` |
/// | `20250101000002_create_contents.sql` | `content_type` enum, `contents` |
/// | `20250101000003_create_share_links.sql` | `share_links` |

use sqlx::postgres::PgPool;
use tracing::{info, warn};

/// Applies all pending migrations
///
/// Already-applied migrations are skipped, so this is safe to call on every
/// start.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    info!("Running database migrations");

    match sqlx::migrate!("../migrations").run(pool).await {
        Ok(()) => {
            info!("Database schema is up to date");
            Ok(())
        }
        Err(e) => {
            warn!("Migration failed: {}", e);
            Err(e)
        }
    }
}
