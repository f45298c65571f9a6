use crate::config::{config_model::AuthSecret, stage::Stage};
use anyhow::{Ok, Result};

use super::config_model::DotEnvyConfig;

pub fn load() -> Result<DotEnvyConfig> {
    dotenvy::dotenv().ok();

    let server = super::config_model::Server {
        port: std::env::var("SERVER_PORT")
            .expect("SERVER_PORT is invalid")
            .parse()?,
        body_limit: std::env::var("SERVER_BODY_LIMIT")
            .expect("SERVER_BODY_LIMIT is invalid")
            .parse()?,
        timeout: std::env::var("SERVER_TIMEOUT")
            .expect("SERVER_TIMEOUT is invalid")
            .parse()?,
    };

    let database = super::config_model::Database {
        url: std::env::var("DATABASE_URL").expect("DATABASE_URL is invalid"),
    };

    let asaas = super::config_model::Asaas {
        api_key: std::env::var("ASAAS_API_KEY").expect("ASAAS_API_KEY is invalid"),
        webhook_token: std::env::var("ASAAS_WEBHOOK_TOKEN").expect("ASAAS_WEBHOOK_TOKEN is invalid"),
        base_url: std::env::var("ASAAS_BASE_URL")
            .unwrap_or_else(|_| "https://api.asaas.com/v3".to_string()),
    };

    Ok(DotEnvyConfig {
        server,
        database,
        asaas,
    })
}

pub fn get_stage() -> Stage {
    dotenvy::dotenv().ok();

    let stage_str = std::env::var("STAGE").unwrap_or("".to_string());
    Stage::try_from(&stage_str).unwrap_or_default()
}

pub fn get_auth_secret() -> Result<AuthSecret> {
    dotenvy::dotenv().ok();

    Ok(AuthSecret {
        secret: std::env::var("JWT_SECRET").expect("JWT_SECRET is invalid"),
    })
}
