use scylla::client::caching_session::CachingSession;
use scylla::client::session::Session;
use scylla::client::session_builder::SessionBuilder;
use std::time::Duration;

use crate::app::ScyllaConfig;
use crate::constants::PREPARED_STATEMENTS_CACHE_SIZE;
use crate::errors::EnamoriumError;
use crate::store::schema;

/// Client's should be alive during application runtime. It's usually related to external services like db clients.
#[allow(async_fn_in_trait)]
pub trait Client<'a>: Sized {
    type Cfg;

    async fn init_client(config: Self::Cfg) -> Result<Self, EnamoriumError>;
}

impl<'a> Client<'a> for CachingSession {
    type Cfg = &'a ScyllaConfig;

    async fn init_client(config: Self::Cfg) -> Result<Self, EnamoriumError> {
        let session: Session = SessionBuilder::new()
            .known_nodes(&config.hosts)
            .connection_timeout(Duration::from_secs(config.connection_timeout_secs))
            .build()
            .await
            .map_err(|e| {
                EnamoriumError::InternalServerError(format!(
                    "Unable to connect to scylla hosts: {:?}. \nError: {}",
                    config.hosts, e
                ))
            })?;

        if config.migrate {
            schema::migrate(&session, &config.keyspace, config.replication_factor).await?;
        } else {
            schema::use_keyspace(&session, &config.keyspace).await?;
        }

        Ok(CachingSession::from(session, PREPARED_STATEMENTS_CACHE_SIZE))
    }
}
