//! Default configuration values (`spec.md` §6).

use super::types::{Config, PromotionConfig, RemoteSection, ValidationSection};

impl Default for Config {
    fn default() -> Self {
        Self {
            storage_backend: "embedded_relational".to_string(),
            sync_backend: "none".to_string(),
            remote: RemoteSection::default(),
            validation: ValidationSection::default(),
            promotion: PromotionConfig::default(),
        }
    }
}

impl Default for RemoteSection {
    fn default() -> Self {
        Self {
            anchor: None,
            credentials_dir: None,
            tool_names: Default::default(),
            properties: Default::default(),
            concurrency: 4,
        }
    }
}

impl Default for ValidationSection {
    fn default() -> Self {
        Self {
            required_sections: default_required_sections(),
        }
    }
}

impl Default for PromotionConfig {
    fn default() -> Self {
        Self {
            temporal_stability_days: 7,
            duplicate_similarity_threshold: 0.98,
        }
    }
}

fn default_required_sections() -> std::collections::HashMap<String, Vec<String>> {
    let mut map = std::collections::HashMap::new();
    map.insert(
        "intent".to_string(),
        vec!["Goal".to_string(), "Success Criteria".to_string()],
    );
    map.insert(
        "implementation".to_string(),
        vec!["Component Impact Report".to_string()],
    );
    map
}
