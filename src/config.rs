use anyhow::{Error, Result, anyhow};
use dotenvy::dotenv;
use serde::Deserialize;

#[derive(Clone, Deserialize, Debug)]
pub struct Config {
    pub slack_webhook_path: String,
    pub server_port: u16,
}

impl Config {
    pub fn load() -> Result<Self, Error> {
        dotenv().ok();

        let config = envy::from_env::<Self>()
            .map_err(|_| anyhow!("Invalid or missing environmental variable"))?;
        Ok(config)
    }
}
