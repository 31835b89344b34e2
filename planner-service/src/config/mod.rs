use secrecy::Secret;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;

/// Default Gemini model for plan generation.
const DEFAULT_TEXT_MODEL: &str = "gemini-1.5-flash";

/// Default Gemini REST endpoint.
const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Frontend origin allowed by CORS when none is configured.
const DEFAULT_CORS_ORIGIN: &str = "http://localhost:3000";

#[derive(Debug, Clone)]
pub struct PlannerConfig {
    pub common: core_config::Config,
    pub supabase: SupabaseConfig,
    pub google: GoogleConfig,
    pub models: ModelConfig,
    pub cors: CorsConfig,
}

#[derive(Debug, Clone)]
pub struct SupabaseConfig {
    pub url: String,
    pub key: Secret<String>,
}

#[derive(Debug, Clone)]
pub struct GoogleConfig {
    /// Missing key only disables plan generation.
    pub api_key: Option<Secret<String>>,
}

#[derive(Debug, Clone)]
pub struct ModelConfig {
    /// Model used for structured plan output (e.g., gemini-1.5-flash)
    pub text_model: String,
    pub api_base: String,
}

#[derive(Debug, Clone)]
pub struct CorsConfig {
    pub allowed_origin: String,
}

impl PlannerConfig {
    pub fn load() -> Result<Self, AppError> {
        let common_config = core_config::Config::load()?;
        Self::from_lookup(common_config, |key| env::var(key).ok())
    }

    /// Build the service config from an arbitrary variable source.
    pub fn from_lookup<F>(common: core_config::Config, lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(PlannerConfig {
            common,
            supabase: SupabaseConfig {
                url: required(&lookup, "SUPABASE_URL")?,
                key: Secret::new(required(&lookup, "SUPABASE_KEY")?),
            },
            google: GoogleConfig {
                api_key: optional(&lookup, "GOOGLE_API_KEY").map(Secret::new),
            },
            models: ModelConfig {
                text_model: optional(&lookup, "GENAI_TEXT_MODEL")
                    .unwrap_or_else(|| DEFAULT_TEXT_MODEL.to_string()),
                api_base: optional(&lookup, "GEMINI_API_BASE")
                    .unwrap_or_else(|| DEFAULT_GEMINI_API_BASE.to_string()),
            },
            cors: CorsConfig {
                allowed_origin: optional(&lookup, "CORS_ALLOWED_ORIGIN")
                    .unwrap_or_else(|| DEFAULT_CORS_ORIGIN.to_string()),
            },
        })
    }
}

fn optional<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).filter(|v| !v.trim().is_empty())
}

fn required<F>(lookup: &F, key: &str) -> Result<String, AppError>
where
    F: Fn(&str) -> Option<String>,
{
    optional(lookup, key).ok_or_else(|| {
        AppError::ConfigError(anyhow::anyhow!(
            "{} is required but not set",
            key
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::collections::HashMap;

    fn common() -> core_config::Config {
        serde_json::from_value(serde_json::json!({ "port": 0 })).unwrap()
    }

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn loads_with_defaults() {
        let config = PlannerConfig::from_lookup(
            common(),
            lookup(&[
                ("SUPABASE_URL", "https://project.supabase.co"),
                ("SUPABASE_KEY", "service-key"),
                ("GOOGLE_API_KEY", "google-key"),
            ]),
        )
        .unwrap();

        assert_eq!(config.supabase.url, "https://project.supabase.co");
        assert_eq!(config.supabase.key.expose_secret(), "service-key");
        assert_eq!(
            config.google.api_key.as_ref().map(|k| k.expose_secret().as_str()),
            Some("google-key")
        );
        assert_eq!(config.models.text_model, DEFAULT_TEXT_MODEL);
        assert_eq!(config.models.api_base, DEFAULT_GEMINI_API_BASE);
        assert_eq!(config.cors.allowed_origin, DEFAULT_CORS_ORIGIN);
    }

    #[test]
    fn missing_storage_settings_is_fatal() {
        let err = PlannerConfig::from_lookup(common(), lookup(&[("SUPABASE_KEY", "k")]))
            .unwrap_err();

        assert!(matches!(err, AppError::ConfigError(_)));
        assert!(err.to_string().contains("SUPABASE_URL"));
    }

    #[test]
    fn missing_model_key_only_degrades() {
        let config = PlannerConfig::from_lookup(
            common(),
            lookup(&[
                ("SUPABASE_URL", "https://project.supabase.co"),
                ("SUPABASE_KEY", "k"),
                ("GOOGLE_API_KEY", "  "),
            ]),
        )
        .unwrap();

        assert!(config.google.api_key.is_none());
    }
}
