use std::env;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    /// Role assigned to newly registered users. Defaults to "client", which
    /// is not in the documented role choices; existing rows already carry it
    /// so the mismatch is kept.
    pub default_user_role: String,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = env::var("DATABASE_URL")?;
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(3000);
        let jwt_secret = env::var("JWT_SECRET")?;
        let default_user_role =
            env::var("DEFAULT_USER_ROLE").unwrap_or_else(|_| "client".to_string());
        Ok(Self {
            database_url,
            host,
            port,
            jwt_secret,
            default_user_role,
        })
    }
}
