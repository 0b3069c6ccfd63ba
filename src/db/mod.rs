use std::time::Duration;

use mongodb::{
    bson::doc,
    options::{ClientOptions, ServerApi, ServerApiVersion},
    Client, Collection,
};

use crate::{config::Config, errors::AppResult};

/// Handle to the service database. Clones share one connection pool.
#[derive(Clone)]
pub struct Database {
    inner: mongodb::Database,
}

impl Database {
    pub async fn connect(config: &Config) -> AppResult<Self> {
        let mut options = ClientOptions::parse(&config.mongo_conn_string).await?;
        apply_pool_settings(&mut options, config);

        let client = Client::with_options(options)?;
        let inner = client.database(&config.mongo_db_name);
        inner.run_command(doc! { "ping": 1 }).await?;

        log::info!(
            "Connected to MongoDB database '{}' (pool {}..{}, timeout {}s)",
            config.mongo_db_name,
            config.mongo_min_pool_size,
            config.mongo_max_pool_size,
            config.mongo_timeout_secs
        );

        Ok(Self { inner })
    }

    pub fn get_collection<T>(&self, collection_name: &str) -> Collection<T>
    where
        T: Send + Sync,
    {
        self.inner.collection(collection_name)
    }
}

fn apply_pool_settings(options: &mut ClientOptions, config: &Config) {
    let timeout = Duration::from_secs(config.mongo_timeout_secs);

    options.server_api = Some(ServerApi::builder().version(ServerApiVersion::V1).build());
    options.app_name = Some("eduportal-server".to_string());
    options.max_pool_size = Some(config.mongo_max_pool_size);
    // Never ask for more idle connections than the pool can hold.
    options.min_pool_size = Some(config.mongo_min_pool_size.min(config.mongo_max_pool_size));
    options.connect_timeout = Some(timeout);
    options.server_selection_timeout = Some(timeout);
}
