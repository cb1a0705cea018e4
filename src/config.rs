use serde::{Deserialize, Serialize};

pub const DEFAULT_ENDPOINT: &str = "https://westus.api.cognitive.microsoft.com/face/v1.0/";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaceConfig {
    pub subscription_key: String,
    pub endpoint: String,
}

impl Default for FaceConfig {
    fn default() -> Self {
        Self {
            subscription_key: String::new(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }
}

impl FaceConfig {
    pub fn new(subscription_key: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            subscription_key: subscription_key.into(),
            endpoint: normalize_endpoint(endpoint.into()),
        }
    }

    pub fn from_env() -> anyhow::Result<Self> {
        let mut config = Self::default();

        if let Ok(key) = std::env::var("FACE_API_KEY") {
            config.subscription_key = key;
        }

        if let Ok(endpoint) = std::env::var("FACE_API_ENDPOINT") {
            config.endpoint = normalize_endpoint(endpoint);
        }

        Ok(config)
    }

    /// Build a config from a JSON snippet of the form
    /// `{"subscriptionKey": "...", "uriBase": "..."}`.
    pub fn from_json_str(json: &str) -> crate::Result<Self> {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Init {
            subscription_key: String,
            uri_base: String,
        }

        let init: Init = serde_json::from_str(json)?;
        Ok(Self::new(init.subscription_key, init.uri_base))
    }
}

fn normalize_endpoint(mut endpoint: String) -> String {
    if !endpoint.ends_with('/') {
        endpoint.push('/');
    }
    endpoint
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_gets_trailing_slash() {
        let config = FaceConfig::new("key", "https://example.com/face/v1.0");
        assert_eq!(config.endpoint, "https://example.com/face/v1.0/");

        let config = FaceConfig::new("key", "https://example.com/face/v1.0/");
        assert_eq!(config.endpoint, "https://example.com/face/v1.0/");
    }

    #[test]
    fn from_json_str_reads_wire_names() {
        let config = FaceConfig::from_json_str(
            r#"{"subscriptionKey": "abc123", "uriBase": "https://eastus.example.com/face/v1.0"}"#,
        )
        .unwrap();
        assert_eq!(config.subscription_key, "abc123");
        assert_eq!(config.endpoint, "https://eastus.example.com/face/v1.0/");
    }

    #[test]
    fn from_json_str_rejects_missing_key() {
        assert!(FaceConfig::from_json_str(r#"{"uriBase": "https://example.com"}"#).is_err());
    }
}
