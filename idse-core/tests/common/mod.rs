//! Shared setup for integration tests: an in-memory spine with a project and
//! a feature session ready to receive artifacts.

use idse_core::domain::{Project, Session, SessionType};
use idse_core::repository::{project as project_repo, session as session_repo};
use idse_core::StorageEngine;

pub struct Fixture {
    pub storage: StorageEngine,
    pub project: Project,
    pub session: Session,
}

pub async fn bootstrap(project_name: &str, session_id: &str) -> Fixture {
    let storage = StorageEngine::open_in_memory().await.expect("open in-memory spine");
    let project = project_repo::save_project(storage.pool(), project_name, "embedded_relational")
        .await
        .expect("save project");
    let session = session_repo::save_session(
        storage.pool(),
        project.id,
        session_id,
        SessionType::Feature,
        Some("alice"),
    )
    .await
    .expect("save session");
    Fixture { storage, project, session }
}
