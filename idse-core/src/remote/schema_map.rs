//! SchemaMap (C7) — declarative mapping from spine fields to remote
//! properties (`spec.md` §4.7).
//!
//! Minimum required remote properties: `Title`/`Session` (`create_only`),
//! `Stage`/`Status` (`always_sync`). Body content is always-sync but is
//! carried as the backend's dedicated `body` parameter, not a property.
//! Optional properties (`Layer`, `RunScope`, `Version`, `Feature`,
//! `UpstreamRelation`, `DownstreamRelation`) are sourced from session tags
//! and dependency lookups and included only when that source data exists.
//! Project identifier and `idse_id` are never sent — `remote_id` replaces
//! `idse_id` as the remote-side identity.

use std::collections::HashMap;

use serde_json::Value;

use crate::config::{RemotePropertyConfig, RemoteSection, WriteMode};
use crate::domain::{ArtifactRecord, Session};

/// Everything a property resolver needs to build one artifact's remote
/// property set. Assembled by the push path from already-loaded C2 data.
pub struct PropertyContext<'a> {
    pub artifact: &'a ArtifactRecord,
    pub session: &'a Session,
    pub title: String,
    pub tags: &'a HashMap<String, String>,
    pub upstream_remote_ids: &'a [String],
    pub downstream_remote_ids: &'a [String],
}

pub struct SchemaMap {
    properties: HashMap<String, RemotePropertyConfig>,
}

impl SchemaMap {
    #[must_use]
    pub fn new(config: &RemoteSection) -> Self {
        let mut properties = default_properties();
        for (field, cfg) in &config.properties {
            properties.insert(field.clone(), cfg.clone());
        }
        Self { properties }
    }

    /// `_build_create_properties`: `create_only` + `always_sync` fields,
    /// plus `optional` fields whose source data exists.
    #[must_use]
    pub fn build_create_properties(&self, ctx: &PropertyContext<'_>) -> HashMap<String, Value> {
        self.build(ctx, |mode| matches!(mode, WriteMode::CreateOnly | WriteMode::AlwaysSync))
    }

    /// `_build_update_properties`: `always_sync` fields plus `optional`
    /// fields with source data. `create_only` fields are excluded so a
    /// human-edited value like `Title` is never rewritten by a later push.
    #[must_use]
    pub fn build_update_properties(&self, ctx: &PropertyContext<'_>) -> HashMap<String, Value> {
        self.build(ctx, |mode| matches!(mode, WriteMode::AlwaysSync))
    }

    fn build(&self, ctx: &PropertyContext<'_>, required: impl Fn(WriteMode) -> bool) -> HashMap<String, Value> {
        let mut out = HashMap::new();
        for (field, cfg) in &self.properties {
            let include = required(cfg.write_mode) || matches!(cfg.write_mode, WriteMode::Optional);
            if !include {
                continue;
            }
            let Some(value) = resolve_value(field, ctx) else {
                continue;
            };
            out.insert(cfg.remote_name.clone(), value);
        }
        out
    }
}

fn resolve_value(field: &str, ctx: &PropertyContext<'_>) -> Option<Value> {
    match field {
        "Title" => Some(Value::String(ctx.title.clone())),
        "Session" => Some(Value::String(ctx.session.session_id.clone())),
        "Stage" => Some(Value::String(ctx.artifact.stage.to_string())),
        "Status" => Some(Value::String(ctx.session.status.to_string())),
        "Layer" => ctx.tags.get("layer").cloned().map(Value::String),
        "RunScope" => ctx.tags.get("run_scope").cloned().map(Value::String),
        "Version" => ctx.tags.get("version").cloned().map(Value::String),
        "Feature" => ctx
            .tags
            .get("feature")
            .or_else(|| ctx.tags.get("capability"))
            .cloned()
            .map(Value::String),
        "UpstreamRelation" => ids_to_value(ctx.upstream_remote_ids),
        "DownstreamRelation" => ids_to_value(ctx.downstream_remote_ids),
        _ => None,
    }
}

fn ids_to_value(ids: &[String]) -> Option<Value> {
    if ids.is_empty() {
        None
    } else {
        Some(Value::Array(ids.iter().cloned().map(Value::String).collect()))
    }
}

fn default_properties() -> HashMap<String, RemotePropertyConfig> {
    let defs = [
        ("Title", "Title", "string", WriteMode::CreateOnly),
        ("Session", "Session", "string", WriteMode::CreateOnly),
        ("Stage", "Stage", "string", WriteMode::AlwaysSync),
        ("Status", "Status", "string", WriteMode::AlwaysSync),
        ("Layer", "Layer", "string", WriteMode::Optional),
        ("RunScope", "RunScope", "string", WriteMode::Optional),
        ("Version", "Version", "string", WriteMode::Optional),
        ("Feature", "Feature", "string", WriteMode::Optional),
        ("UpstreamRelation", "UpstreamRelation", "relation", WriteMode::Optional),
        ("DownstreamRelation", "DownstreamRelation", "relation", WriteMode::Optional),
    ];
    defs.into_iter()
        .map(|(field, remote_name, remote_type, write_mode)| {
            (
                field.to_string(),
                RemotePropertyConfig {
                    remote_name: remote_name.to_string(),
                    remote_type: remote_type.to_string(),
                    write_mode,
                },
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use crate::domain::{ArtifactId, SessionRowId, SessionStatus, SessionType, Stage};

    use super::*;

    fn ctx() -> (ArtifactRecord, Session) {
        let artifact = ArtifactRecord {
            id: ArtifactId(1),
            session_id: SessionRowId(1),
            stage: Stage::Intent,
            content: "goal".to_string(),
            content_hash: String::new(),
            idse_id: "orch::s1::intent".to_string(),
            fingerprint: String::new(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let session = Session {
            id: SessionRowId(1),
            project_id: crate::domain::ProjectId(1),
            session_id: "s1".to_string(),
            session_type: SessionType::Feature,
            status: SessionStatus::InProgress,
            owner: None,
            created_at: Utc::now(),
        };
        (artifact, session)
    }

    #[test]
    fn update_properties_exclude_create_only_title() {
        let (artifact, session) = ctx();
        let tags = HashMap::new();
        let property_ctx = PropertyContext {
            artifact: &artifact,
            session: &session,
            title: "Intent – orch – s1".to_string(),
            tags: &tags,
            upstream_remote_ids: &[],
            downstream_remote_ids: &[],
        };
        let map = SchemaMap::new(&RemoteSection::default());
        let update_props = map.build_update_properties(&property_ctx);
        assert!(!update_props.contains_key("Title"));
        assert!(update_props.contains_key("Stage"));
    }

    #[test]
    fn create_properties_include_title() {
        let (artifact, session) = ctx();
        let tags = HashMap::new();
        let property_ctx = PropertyContext {
            artifact: &artifact,
            session: &session,
            title: "Intent – orch – s1".to_string(),
            tags: &tags,
            upstream_remote_ids: &[],
            downstream_remote_ids: &[],
        };
        let map = SchemaMap::new(&RemoteSection::default());
        let create_props = map.build_create_properties(&property_ctx);
        assert_eq!(create_props.get("Title"), Some(&Value::String("Intent – orch – s1".to_string())));
    }

    #[test]
    fn optional_field_omitted_without_source_data() {
        let (artifact, session) = ctx();
        let tags = HashMap::new();
        let property_ctx = PropertyContext {
            artifact: &artifact,
            session: &session,
            title: "t".to_string(),
            tags: &tags,
            upstream_remote_ids: &[],
            downstream_remote_ids: &[],
        };
        let map = SchemaMap::new(&RemoteSection::default());
        let props = map.build_create_properties(&property_ctx);
        assert!(!props.contains_key("Layer"));
    }
}
