pub const MATCH_PAGE_SIZE: i64 = 50;
pub const REPORT_REASON_PREFIX: &str = "REPORT: ";

const DEFAULT_FRONTEND_URLS: &str =
    "http://localhost:3000,http://localhost:3001,http://localhost:5173,http://localhost:5174";

pub struct Env {
    pub jwt_secret: String,
    pub token_expiration: u64,
    pub database_url: String,
    pub database_max_connections: u32,
    pub frontend_urls: Vec<String>,
    pub ip: String,
    pub port: u16,
}

impl Env {
    fn new() -> Self {
        let jwt_secret = std::env::var("JWT_SECRET")
            .expect("JWT_SECRET must be set in .env file or environment variable");

        let token_expiration = std::env::var("TOKEN_EXPIRATION")
            .unwrap_or_else(|_| "86400".to_string())
            .parse::<u64>()
            .expect("TOKEN_EXPIRATION must be a valid u64 integer");

        let database_url = std::env::var("DATABASE_URL")
            .expect("DATABASE_URL must be set in .env file or environment variable");
        let database_max_connections = std::env::var("DATABASE_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "5".to_string())
            .parse::<u32>()
            .expect("DATABASE_MAX_CONNECTIONS must be a valid u32 integer");

        let frontend_urls = parse_origins(
            &std::env::var("FRONTEND_URLS").unwrap_or_else(|_| DEFAULT_FRONTEND_URLS.to_string()),
        );
        let ip = std::env::var("IP").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = std::env::var("PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse::<u16>()
            .expect("PORT must be a valid u16 integer");
        Env {
            jwt_secret,
            token_expiration,
            database_url,
            database_max_connections,
            frontend_urls,
            ip,
            port,
        }
    }
}

impl Default for Env {
    fn default() -> Self {
        Self::new()
    }
}

/// Splits a comma-separated origin list, dropping blanks and trailing slashes.
pub fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|origin| origin.trim().trim_end_matches('/'))
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}
