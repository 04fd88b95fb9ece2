use std::time::Duration;

use mongodb::{
    bson::doc,
    options::{ClientOptions, ServerApi, ServerApiVersion},
    Client, Collection,
};

use crate::{
    config::Config,
    errors::AppResult,
    models::domain::{Quiz, User},
};

const USERS: &str = "users";
const QUIZZES: &str = "quizzes";
const TIMEOUT: Duration = Duration::from_secs(5);

/// Handle to the Factify database. Cloning shares the underlying pool.
#[derive(Clone)]
pub struct Database {
    client: Client,
    name: String,
}

impl Database {
    /// Connects and pings once so a bad connection string fails at startup.
    pub async fn connect(config: &Config) -> AppResult<Self> {
        let client = Client::with_options(client_options(config).await?)?;
        let database = Self {
            client,
            name: config.mongo_db_name.clone(),
        };

        database.ping().await?;
        log::info!("Connected to MongoDB database '{}'", database.name);

        Ok(database)
    }

    pub fn users(&self) -> Collection<User> {
        self.client.database(&self.name).collection(USERS)
    }

    pub fn quizzes(&self) -> Collection<Quiz> {
        self.client.database(&self.name).collection(QUIZZES)
    }

    pub async fn ping(&self) -> AppResult<()> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await?;
        Ok(())
    }
}

async fn client_options(config: &Config) -> AppResult<ClientOptions> {
    let mut options = ClientOptions::parse(&config.mongo_conn_string).await?;
    options.app_name = Some(env!("CARGO_PKG_NAME").to_string());
    options.server_api = Some(ServerApi::builder().version(ServerApiVersion::V1).build());
    options.min_pool_size = Some(2);
    options.max_pool_size = Some(10);
    options.connect_timeout = Some(TIMEOUT);
    options.server_selection_timeout = Some(TIMEOUT);
    Ok(options)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn database_is_shareable_across_workers() {
        fn assert_send_sync<T: Send + Sync + Clone>() {}
        assert_send_sync::<Database>();
    }

    #[tokio::test]
    async fn client_options_bound_pool_and_timeouts() {
        let options = client_options(&Config::test_config()).await.unwrap();

        assert_eq!(options.app_name.as_deref(), Some("factify-server"));
        assert_eq!(options.min_pool_size, Some(2));
        assert_eq!(options.max_pool_size, Some(10));
        assert_eq!(options.connect_timeout, Some(TIMEOUT));
        assert_eq!(options.server_selection_timeout, Some(TIMEOUT));
    }
}
