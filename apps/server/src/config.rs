use std::{net::SocketAddr, time::Duration};

pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: String,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    pub jwt_secret: String,
    pub token_ttl: Duration,
    pub admin_username: String,
    pub admin_password: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let listen_addr: SocketAddr = std::env::var("PT_LISTEN_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:8080".to_string())
            .parse()
            .expect("Invalid PT_LISTEN_ADDR");
        let db_path = std::env::var("PT_DB_PATH").unwrap_or_else(|_| "./db/pricetrack.db".into());
        let cors_allow = std::env::var("PT_CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|_| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let timeout_ms: u64 = std::env::var("PT_REQUEST_TIMEOUT_MS")
            .unwrap_or_else(|_| "30000".into())
            .parse()
            .unwrap_or(30000);
        let jwt_secret = std::env::var("PT_JWT_SECRET").expect("PT_JWT_SECRET must be set");
        let token_ttl_secs: u64 = std::env::var("PT_TOKEN_TTL_SECS")
            .unwrap_or_else(|_| "3600".into())
            .parse()
            .unwrap_or(3600);
        let admin_username =
            std::env::var("PT_ADMIN_USERNAME").unwrap_or_else(|_| "admin".to_string());
        let admin_password = std::env::var("PT_ADMIN_PASSWORD").ok();
        Self {
            listen_addr,
            db_path,
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
            jwt_secret,
            token_ttl: Duration::from_secs(token_ttl_secs),
            admin_username,
            admin_password,
        }
    }
}
