//! Rule checks over a single artifact. Each function is a pure validator in
//! the teacher's `Validator<T> = fn(&T) -> Result<(), ValidationError>`
//! style, adapted to accumulate every failure rather than short-circuit on
//! the first — the report needs the full error list, not just one.

use crate::domain::{ArtifactRecord, Stage};

const PLACEHOLDER_MARKER: &str = "[REQUIRES INPUT]";

/// `spec.md` §4.4: "No unresolved placeholder markers... in any artifact
/// other than templates." Template artifacts are out of scope for this
/// spine (they live in the external scaffolder), so the check applies
/// unconditionally here.
pub fn check_no_placeholder_markers(artifact: &ArtifactRecord) -> Option<String> {
    if artifact.content.contains(PLACEHOLDER_MARKER) {
        Some(format!("unresolved placeholder marker {PLACEHOLDER_MARKER}"))
    } else {
        None
    }
}

/// `spec.md` §4.4: a stage's artifact must contain each configured required
/// section heading.
pub fn check_required_sections(artifact: &ArtifactRecord, required_sections: &[String]) -> Vec<String> {
    required_sections
        .iter()
        .filter(|section| !artifact.content.contains(section.as_str()))
        .map(|section| format!("missing required section \"{section}\""))
        .collect()
}

/// `spec.md` §4.4: "`implementation` artifact quality: rejects scaffold
/// placeholders; requires at least one component entry with a named parent
/// primitive."
pub fn check_implementation_quality(artifact: &ArtifactRecord) -> Vec<String> {
    if artifact.stage != Stage::Implementation {
        return Vec::new();
    }

    let mut errors = Vec::new();
    let Some(section) = extract_section(&artifact.content, "Component Impact Report") else {
        errors.push("missing Component Impact Report".to_string());
        return errors;
    };

    let has_entry = section
        .lines()
        .any(|line| line.trim_start().starts_with('-') && line.len() > 1);
    if !has_entry {
        errors.push(
            "Component Impact Report has no concrete component entry with a named parent primitive"
                .to_string(),
        );
    }

    errors
}

/// Returns the text of the named `##`/`#` markdown section, if present.
fn extract_section<'a>(content: &'a str, heading: &str) -> Option<&'a str> {
    let start = content.find(heading)?;
    let after_heading = &content[start..];
    let body_start = after_heading.find('\n').map_or(after_heading.len(), |i| i + 1);
    let rest = &after_heading[body_start..];
    let end = rest.find("\n#").unwrap_or(rest.len());
    Some(&rest[..end])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ArtifactId;
    use chrono::Utc;

    fn artifact(stage: Stage, content: &str) -> ArtifactRecord {
        ArtifactRecord {
            id: ArtifactId(1),
            session_id: crate::domain::SessionRowId(1),
            stage,
            content: content.to_string(),
            content_hash: String::new(),
            idse_id: "orch::s1::implementation".to_string(),
            fingerprint: String::new(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn placeholder_marker_is_flagged() {
        let a = artifact(Stage::Intent, "Goal: [REQUIRES INPUT]");
        assert!(check_no_placeholder_markers(&a).is_some());
    }

    #[test]
    fn missing_required_section_is_flagged() {
        let a = artifact(Stage::Intent, "no headings here");
        let errors = check_required_sections(&a, &["Goal".to_string(), "Success Criteria".to_string()]);
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn implementation_without_component_report_is_flagged() {
        let a = artifact(Stage::Implementation, "just some prose");
        let errors = check_implementation_quality(&a);
        assert_eq!(errors, vec!["missing Component Impact Report".to_string()]);
    }

    #[test]
    fn implementation_with_component_entry_passes() {
        let a = artifact(
            Stage::Implementation,
            "## Component Impact Report\n- auth::login_handler (parent: request_router)\n",
        );
        assert!(check_implementation_quality(&a).is_empty());
    }
}
