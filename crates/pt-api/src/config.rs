use std::env;

/// Deployment environment. Drives cookie security, HSTS and log format.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    pub fn is_development(&self) -> bool {
        *self == Self::Development
    }

    pub fn is_production(&self) -> bool {
        *self == Self::Production
    }

    /// Parse from the `APP_ENV` variable; anything other than "production"
    /// is treated as development.
    fn from_env_var() -> Self {
        match env::var("APP_ENV").as_deref() {
            Ok("production") => Self::Production,
            _ => Self::Development,
        }
    }
}

#[derive(Clone, Debug)]
pub struct ApiConfig {
    pub database_url: String,
    pub jwt_secret: String,
    /// Key material for the private cookie jar; must be at least 64 bytes.
    pub cookie_secret: String,
    pub frontend_url: String,
    /// Comma-separated CORS origins
    pub allowed_origins: String,
    pub jwt_expiry_hours: i64,
    pub env: Environment,
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, env::VarError> {
        let frontend_url =
            env::var("FRONTEND_URL").unwrap_or_else(|_| "http://localhost:3000".to_string());
        let allowed_origins =
            env::var("ALLOWED_ORIGINS").unwrap_or_else(|_| frontend_url.clone());
        let jwt_expiry_hours = env::var("JWT_EXPIRY_HOURS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(24);

        Ok(Self {
            database_url: env::var("DATABASE_URL")?,
            jwt_secret: env::var("JWT_SECRET")?,
            cookie_secret: env::var("COOKIE_SECRET")?,
            frontend_url,
            allowed_origins,
            jwt_expiry_hours,
            env: Environment::from_env_var(),
        })
    }

    /// Split the configured origins list for the CORS layer.
    pub fn parsed_allowed_origins(&self) -> Vec<String> {
        self.allowed_origins
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_origins(origins: &str) -> ApiConfig {
        ApiConfig {
            database_url: "postgres://localhost/test".to_string(),
            jwt_secret: "secret".to_string(),
            cookie_secret: "cookie".to_string(),
            frontend_url: "http://localhost:3000".to_string(),
            allowed_origins: origins.to_string(),
            jwt_expiry_hours: 24,
            env: Environment::Development,
        }
    }

    #[test]
    fn parses_comma_separated_origins() {
        let config = config_with_origins("http://localhost:3000, https://preptrack.app");
        assert_eq!(
            config.parsed_allowed_origins(),
            vec![
                "http://localhost:3000".to_string(),
                "https://preptrack.app".to_string()
            ]
        );
    }

    #[test]
    fn skips_empty_origin_segments() {
        let config = config_with_origins("http://localhost:3000,,");
        assert_eq!(
            config.parsed_allowed_origins(),
            vec!["http://localhost:3000".to_string()]
        );
    }

    #[test]
    fn environment_predicates() {
        assert!(Environment::Development.is_development());
        assert!(!Environment::Development.is_production());
        assert!(Environment::Production.is_production());
    }
}
