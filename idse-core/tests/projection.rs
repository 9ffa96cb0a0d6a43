//! ProjectionFileView (C5) end-to-end: writes reflect declared and
//! superseded claims (`spec.md` §4.5, §8).

mod common;

use idse_core::domain::{BLUEPRINT_SESSION_ID, Classification};
use idse_core::{claims, projection};

#[tokio::test]
async fn export_views_writes_both_files_and_includes_superseded_claims() {
    let fx = common::bootstrap("orch", BLUEPRINT_SESSION_ID).await;
    let old = claims::declare_claim(
        &fx.storage,
        fx.project.id,
        "Sessions are append-only.",
        Classification::Invariant,
        BLUEPRINT_SESSION_ID,
        "founder",
    )
    .await
    .expect("declare old");
    let new = claims::declare_claim(
        &fx.storage,
        fx.project.id,
        "Sessions are never physically deleted.",
        Classification::Invariant,
        BLUEPRINT_SESSION_ID,
        "founder",
    )
    .await
    .expect("declare new");
    claims::supersede_claim(&fx.storage, old.id, new.id, "clearer wording", "founder")
        .await
        .expect("supersede");

    let workspace = tempfile::tempdir().expect("tempdir");
    projection::export_views(fx.storage.pool(), workspace.path(), fx.project.id)
        .await
        .expect("export views");

    let project_dir = workspace.path().join("projects").join(&fx.project.name);
    let blueprint_text = std::fs::read_to_string(project_dir.join("blueprint.md")).expect("read blueprint.md");
    let meta_text = std::fs::read_to_string(project_dir.join("meta.md")).expect("read meta.md");

    assert!(blueprint_text.contains("Sessions are append-only."));
    assert!(blueprint_text.contains("superseded"));
    assert!(blueprint_text.contains("Sessions are never physically deleted."));
    assert!(meta_text.contains(BLUEPRINT_SESSION_ID));
}
