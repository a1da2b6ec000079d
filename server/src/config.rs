use anyhow::{Context, Result};
use products_hr::DEFAULT_CREATE_ATTEMPTS;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub cors_allowed_origins: Vec<String>,
    pub create_attempts: u32,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let cors_allowed_origins = lookup("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|| "http://localhost:5173".into())
            .split(',')
            .filter_map(|s| {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.to_string())
                }
            })
            .collect::<Vec<_>>();

        let create_attempts = match lookup("EMPLOYEE_CREATE_ATTEMPTS") {
            Some(raw) => raw
                .trim()
                .parse::<u32>()
                .with_context(|| format!("invalid EMPLOYEE_CREATE_ATTEMPTS `{raw}`"))?
                .max(1),
            None => DEFAULT_CREATE_ATTEMPTS,
        };

        Ok(Self {
            cors_allowed_origins,
            create_attempts,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<AppConfig> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = load(&[]).unwrap();
        assert_eq!(config.cors_allowed_origins, ["http://localhost:5173"]);
        assert_eq!(config.create_attempts, DEFAULT_CREATE_ATTEMPTS);
    }

    #[test]
    fn origins_are_split_and_trimmed() {
        let config = load(&[("CORS_ALLOWED_ORIGINS", " https://a.test , ,https://b.test")]).unwrap();
        assert_eq!(
            config.cors_allowed_origins,
            ["https://a.test", "https://b.test"]
        );
    }

    #[test]
    fn create_attempts_must_be_a_number() {
        assert!(load(&[("EMPLOYEE_CREATE_ATTEMPTS", "lots")]).is_err());
        let config = load(&[("EMPLOYEE_CREATE_ATTEMPTS", "0")]).unwrap();
        assert_eq!(config.create_attempts, 1);
    }
}
