//! Bounded `PostgreSQL` connection pool for the task store.

use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool};
use std::time::Duration;

/// `PostgreSQL` connection pool type used by task adapters.
pub type TaskPgPool = Pool<ConnectionManager<PgConnection>>;

/// Sizing and timeout settings for [`build_pool`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolSettings {
    /// Connection URL.
    pub url: String,
    /// Upper bound on open connections.
    pub max_connections: u32,
    /// How long a checkout may wait before failing.
    pub checkout_timeout: Duration,
}

/// Builds a pool without opening any connection up front.
///
/// Connections are established on first checkout. A checkout that cannot be
/// served within `checkout_timeout` fails instead of blocking forever.
#[must_use]
pub fn build_pool(settings: &PoolSettings) -> TaskPgPool {
    let manager = ConnectionManager::<PgConnection>::new(settings.url.as_str());
    Pool::builder()
        .max_size(settings.max_connections)
        .min_idle(Some(0))
        .connection_timeout(settings.checkout_timeout)
        .build_unchecked(manager)
}
