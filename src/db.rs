//! Database connection management.
//!
//! Diesel-based MySQL connectivity with r2d2 connection pooling.

use std::sync::Arc;
use std::time::Duration;

use diesel::mysql::MysqlConnection;
use diesel::prelude::*;
use diesel::r2d2::{self, ConnectionManager};

use crate::config::DbConfig;
use crate::error::PipelineError;

pub type Pool = r2d2::Pool<ConnectionManager<MysqlConnection>>;
pub type PooledConnection = r2d2::PooledConnection<ConnectionManager<MysqlConnection>>;

/// Database connection pool manager
pub struct Database {
    pool: Arc<Pool>,
}

impl Database {
    /// Create a connection pool for the configured database
    pub fn connect(config: &DbConfig) -> Result<Self, PipelineError> {
        Self::connect_with(config, PoolConfig::default())
    }

    /// Create a connection pool with custom pool tuning
    pub fn connect_with(config: &DbConfig, pool_config: PoolConfig) -> Result<Self, PipelineError> {
        let manager = ConnectionManager::<MysqlConnection>::new(config.url());

        let pool = r2d2::Pool::builder()
            .max_size(pool_config.max_connections)
            .min_idle(Some(pool_config.min_idle))
            .connection_timeout(Duration::from_secs(pool_config.connection_timeout_secs))
            .idle_timeout(Some(Duration::from_secs(pool_config.idle_timeout_secs)))
            .max_lifetime(Some(Duration::from_secs(pool_config.max_lifetime_secs)))
            .build(manager)?;

        Ok(Database {
            pool: Arc::new(pool),
        })
    }

    /// Get a connection from the pool
    pub fn get_connection(&self) -> Result<PooledConnection, PipelineError> {
        self.pool
            .get()
            .map_err(|e| PipelineError::Connection(e.to_string()))
    }

    /// Test database connectivity
    pub fn test_connection(&self) -> Result<(), PipelineError> {
        let mut conn = self.get_connection()?;
        diesel::sql_query("SELECT 1").execute(&mut conn)?;
        Ok(())
    }

    /// Get a reference to the connection pool
    pub fn pool(&self) -> &Pool {
        &self.pool
    }
}

/// Pool tuning options
#[derive(Debug, Clone)]
pub struct PoolConfig {
    pub max_connections: u32,
    pub min_idle: u32,
    pub connection_timeout_secs: u64,
    pub idle_timeout_secs: u64,
    pub max_lifetime_secs: u64,
}

impl Default for PoolConfig {
    fn default() -> Self {
        PoolConfig {
            max_connections: 5,           // batch pipeline + dashboard startup need few
            min_idle: 1,
            connection_timeout_secs: 30,  // wait up to 30s for connection
            idle_timeout_secs: 600,       // close idle connections after 10 min
            max_lifetime_secs: 1800,      // recycle connections after 30 min
        }
    }
}
