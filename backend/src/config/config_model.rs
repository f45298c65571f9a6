#[derive(Debug, Clone)]
pub struct DotEnvyConfig {
    pub server: Server,
    pub database: Database,
    pub asaas: Asaas,
}

#[derive(Debug, Clone)]
pub struct Server {
    pub port: u16,
    pub body_limit: u64,
    pub timeout: u64,
}

#[derive(Debug, Clone)]
pub struct Database {
    pub url: String,
}

#[derive(Debug, Clone)]
pub struct Asaas {
    pub api_key: String,
    pub webhook_token: String,
    pub base_url: String,
}

#[derive(Debug, Clone)]
pub struct AuthSecret {
    pub secret: String,
}
