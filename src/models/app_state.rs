use diesel::r2d2::{self, ConnectionManager};
use diesel::PgConnection;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;

use crate::clients::{ChapaClient, EmailClient};
use crate::config::AppConfig;
use crate::tasks::Notifier;
use eyre::Result;

pub type DbPool = r2d2::Pool<ConnectionManager<PgConnection>>;

#[derive(Clone)]
pub struct AppState {
    pub db: DbPool,
    pub config: AppConfig,
    pub chapa: ChapaClient,
    pub notifier: Notifier,
}

impl AppState {
    pub fn new(db: DbPool, config: AppConfig) -> Result<Arc<Self>> {
        let http = Client::builder().timeout(Duration::from_secs(30)).build()?;

        let chapa = ChapaClient::new(
            http,
            &config.chapa.base_url,
            config.chapa.secret_key.clone(),
        )?;

        let email = EmailClient::new(&config.smtp)?;
        let notifier = Notifier::spawn(Arc::new(email));

        Ok(Arc::new(Self {
            db,
            config,
            chapa,
            notifier,
        }))
    }
}
