use anyhow::{Context, Result, anyhow};

const DEFAULT_CONTACT_INBOXES: &str = "info@itspopcast.com,contact@itspopcast.com";

#[derive(Debug, Clone)]
pub(crate) struct Settings {
    pub(crate) api_url: String,
    pub(crate) backend_timeout_secs: u64,
    pub(crate) session_secret: String,
    pub(crate) session_ttl_seconds: i64,
    pub(crate) session_cookie_secure: bool,
    pub(crate) http_addr: String,
    pub(crate) public_site_url: String,
    pub(crate) log_level: String,
    pub(crate) http_request_body_limit_bytes: usize,
    pub(crate) http_concurrency_limit: usize,
    pub(crate) http_request_timeout_secs: u64,
    pub(crate) smtp: SmtpSettings,
}

#[derive(Debug, Clone)]
pub(crate) struct SmtpSettings {
    pub(crate) host: String,
    pub(crate) port: u16,
    /// Also used as the sender address.
    pub(crate) username: Option<String>,
    pub(crate) password: Option<String>,
    pub(crate) inboxes: Vec<String>,
}

impl SmtpSettings {
    pub(crate) fn credentials(&self) -> Option<(&str, &str)> {
        Some((self.username.as_deref()?, self.password.as_deref()?))
    }
}

impl Settings {
    pub(crate) fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds settings from any key lookup; `from_env` passes the process environment.
    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = Env(lookup);

        let api_url = env
            .required("POPCAST_API_URL")
            .context("POPCAST_API_URL is required")?;
        url::Url::parse(&api_url).context("POPCAST_API_URL must be an absolute URL")?;
        let backend_timeout_secs = env.positive_u64("BACKEND_TIMEOUT_SECS", 60)?;

        let session_secret = env
            .required("SESSION_SECRET")
            .context("SESSION_SECRET is required")?;
        if session_secret.chars().count() < 32 {
            return Err(anyhow!("SESSION_SECRET must be at least 32 characters"));
        }
        let session_ttl_seconds: i64 = env
            .get("SESSION_TTL_SECONDS")
            .unwrap_or_else(|| "14400".to_string())
            .parse()
            .context("Failed to parse SESSION_TTL_SECONDS, expecting integer")?;
        if session_ttl_seconds <= 0 {
            return Err(anyhow!("SESSION_TTL_SECONDS must be > 0"));
        }
        let session_cookie_secure = env.flag("SESSION_COOKIE_SECURE", false)?;

        let http_addr = env
            .get("HTTP_ADDR")
            .unwrap_or_else(|| "0.0.0.0:3000".to_string());
        let public_site_url = env
            .get("PUBLIC_SITE_URL")
            .unwrap_or_else(|| "https://itspopcast.com".to_string())
            .trim_end_matches('/')
            .to_string();
        let log_level = env
            .get("LOG_LEVEL")
            .or_else(|| env.get("RUST_LOG"))
            .unwrap_or_else(|| "info".to_string());

        let http_request_body_limit_bytes =
            env.positive_usize("HTTP_REQUEST_BODY_LIMIT_BYTES", 200 * 1024 * 1024)?;
        let http_concurrency_limit = env.positive_usize("HTTP_CONCURRENCY_LIMIT", 256)?;
        let http_request_timeout_secs = env.positive_u64("HTTP_REQUEST_TIMEOUT_SECS", 120)?;

        let smtp_port = env
            .get("SMTP_PORT")
            .unwrap_or_else(|| "465".to_string())
            .parse::<u16>()
            .context("Failed to parse SMTP_PORT, expecting port number")?;
        let smtp = SmtpSettings {
            host: env
                .get("SMTP_HOST")
                .unwrap_or_else(|| "mail.itspopcast.com".to_string()),
            port: smtp_port,
            username: env.get("EMAIL_USER"),
            password: env.get("EMAIL_PASSWORD"),
            inboxes: split_list(
                &env.get("CONTACT_INBOXES")
                    .unwrap_or_else(|| DEFAULT_CONTACT_INBOXES.to_string()),
            ),
        };
        if smtp.inboxes.is_empty() {
            return Err(anyhow!("CONTACT_INBOXES must list at least one address"));
        }

        Ok(Self {
            api_url,
            backend_timeout_secs,
            session_secret,
            session_ttl_seconds,
            session_cookie_secure,
            http_addr,
            public_site_url,
            log_level,
            http_request_body_limit_bytes,
            http_concurrency_limit,
            http_request_timeout_secs,
            smtp,
        })
    }
}

struct Env<F>(F);

impl<F> Env<F>
where
    F: Fn(&str) -> Option<String>,
{
    /// Trimmed value; blank counts as unset.
    fn get(&self, key: &str) -> Option<String> {
        (self.0)(key)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    }

    fn required(&self, key: &str) -> Result<String> {
        self.get(key)
            .ok_or_else(|| anyhow!("{key} must be set and not empty"))
    }

    fn flag(&self, key: &str, default: bool) -> Result<bool> {
        match self.get(key) {
            None => Ok(default),
            Some(raw) => match raw.to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => Ok(true),
                "0" | "false" | "no" | "off" => Ok(false),
                _ => Err(anyhow!("{key} must be a boolean, got '{raw}'")),
            },
        }
    }

    fn positive_usize(&self, key: &str, default: usize) -> Result<usize> {
        let value = self
            .get(key)
            .unwrap_or_else(|| default.to_string())
            .parse::<usize>()
            .with_context(|| format!("Failed to parse {key}, expecting positive integer"))?;

        if value == 0 {
            return Err(anyhow!("{key} must be > 0"));
        }
        Ok(value)
    }

    fn positive_u64(&self, key: &str, default: u64) -> Result<u64> {
        let value = self
            .get(key)
            .unwrap_or_else(|| default.to_string())
            .parse::<u64>()
            .with_context(|| format!("Failed to parse {key}, expecting positive integer"))?;

        if value == 0 {
            return Err(anyhow!("{key} must be > 0"));
        }
        Ok(value)
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
impl Settings {
    pub(crate) fn for_tests() -> Self {
        Self {
            api_url: "http://backend.test".to_string(),
            backend_timeout_secs: 5,
            session_secret: "0123456789abcdef0123456789abcdef".to_string(),
            session_ttl_seconds: 4 * 60 * 60,
            session_cookie_secure: false,
            http_addr: "127.0.0.1:0".to_string(),
            public_site_url: "https://itspopcast.com".to_string(),
            log_level: "debug".to_string(),
            http_request_body_limit_bytes: 1024 * 1024,
            http_concurrency_limit: 16,
            http_request_timeout_secs: 5,
            smtp: SmtpSettings {
                host: "localhost".to_string(),
                port: 465,
                username: None,
                password: None,
                inboxes: split_list(DEFAULT_CONTACT_INBOXES),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::Settings;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    const BASE: [(&str, &str); 2] = [
        ("POPCAST_API_URL", "https://server.itspopcast.com"),
        ("SESSION_SECRET", "0123456789abcdef0123456789abcdef"),
    ];

    #[test]
    fn defaults_are_applied() {
        let settings = Settings::from_lookup(lookup(&BASE)).expect("settings must load");

        assert_eq!(settings.session_ttl_seconds, 14_400);
        assert_eq!(settings.http_addr, "0.0.0.0:3000");
        assert_eq!(settings.smtp.port, 465);
        assert_eq!(settings.smtp.inboxes.len(), 2);
        assert!(settings.smtp.credentials().is_none());
        assert!(!settings.session_cookie_secure);
    }

    #[test]
    fn short_session_secret_is_rejected() {
        let err = Settings::from_lookup(lookup(&[
            ("POPCAST_API_URL", "https://server.itspopcast.com"),
            ("SESSION_SECRET", "short"),
        ]))
        .expect_err("must fail");
        assert!(err.to_string().contains("SESSION_SECRET"));
    }

    #[test]
    fn zero_limits_are_rejected() {
        let mut pairs = BASE.to_vec();
        pairs.push(("HTTP_CONCURRENCY_LIMIT", "0"));
        assert!(Settings::from_lookup(lookup(&pairs)).is_err());
    }

    #[test]
    fn missing_backend_url_is_rejected() {
        let err = Settings::from_lookup(lookup(&[(
            "SESSION_SECRET",
            "0123456789abcdef0123456789abcdef",
        )]))
        .expect_err("must fail");
        assert!(err.to_string().contains("POPCAST_API_URL"));
    }

    #[test]
    fn public_site_url_loses_trailing_slash() {
        let mut pairs = BASE.to_vec();
        pairs.push(("PUBLIC_SITE_URL", "https://example.org/"));
        pairs.push(("SESSION_COOKIE_SECURE", "true"));
        let settings = Settings::from_lookup(lookup(&pairs)).expect("settings must load");
        assert_eq!(settings.public_site_url, "https://example.org");
        assert!(settings.session_cookie_secure);
    }
}
