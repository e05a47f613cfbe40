use std::{env, time::Duration};

/// Whether a page-level feature runs on seed data or against the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Mock,
    Real,
}

impl Mode {
    fn from_env(key: &str) -> Self {
        Self::parse(env::var(key).ok().as_deref())
    }

    /// Unset or `mock` is mock; any other value switches the feature to the
    /// backend.
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            None | Some("") | Some("mock") => Mode::Mock,
            Some(_) => Mode::Real,
        }
    }
}

const DEFAULT_SESSION_IDLE_MINUTES: u64 = 60;

#[derive(Debug, Clone)]
pub struct BackendConfig {
    pub url: String,
    pub anon_key: String,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub backend: Option<BackendConfig>,
    pub jwt_secret: Option<String>,
    pub cart_mode: Mode,
    pub checkout_mode: Mode,
    pub site_url: String,
    /// Cart and admin sessions untouched for this long are dropped.
    pub session_idle: Duration,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(3000);

        // Both values are needed; one without the other is the same as neither.
        let backend = match (non_empty("SUPABASE_URL"), non_empty("SUPABASE_ANON_KEY")) {
            (Some(url), Some(anon_key)) => Some(BackendConfig {
                url: url.trim_end_matches('/').to_string(),
                anon_key,
            }),
            _ => None,
        };

        let idle_minutes = env::var("SESSION_IDLE_MINUTES")
            .ok()
            .and_then(|v| v.trim().parse::<u64>().ok())
            .filter(|m| *m > 0)
            .unwrap_or(DEFAULT_SESSION_IDLE_MINUTES);

        let site_url = non_empty("SITE_URL").unwrap_or_else(|| "http://localhost:3000".to_string());

        Ok(Self {
            host,
            port,
            backend,
            jwt_secret: non_empty("SUPABASE_JWT_SECRET"),
            cart_mode: Mode::from_env("CART_MODE"),
            checkout_mode: Mode::from_env("CHECKOUT_MODE"),
            site_url: site_url.trim_end_matches('/').to_string(),
            session_idle: Duration::from_secs(idle_minutes * 60),
        })
    }

    /// Configuration with no backend and both pages in mock mode.
    pub fn local() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 0,
            backend: None,
            jwt_secret: None,
            cart_mode: Mode::Mock,
            checkout_mode: Mode::Mock,
            site_url: "http://localhost:3000".to_string(),
            session_idle: Duration::from_secs(DEFAULT_SESSION_IDLE_MINUTES * 60),
        }
    }
}

fn non_empty(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::Mode;

    #[test]
    fn only_mock_or_unset_is_mock() {
        assert_eq!(Mode::parse(None), Mode::Mock);
        assert_eq!(Mode::parse(Some("mock")), Mode::Mock);
        assert_eq!(Mode::parse(Some(" mock ")), Mode::Mock);
        assert_eq!(Mode::parse(Some("real")), Mode::Real);
        assert_eq!(Mode::parse(Some("live")), Mode::Real);
        assert_eq!(Mode::parse(Some("MOCK")), Mode::Real);
    }
}
