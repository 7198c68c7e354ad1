//! End-to-end session flows: login with the demo directory, persistence
//! across manager restarts, and routing decisions for each role.
//! These tests exercise positive and negative paths through the access gate.

use std::sync::Arc;

use anyhow::Result;
use tempfile::tempdir;

use schola::api::PortalApi;
use schola::error::PortalError;
use schola::identity::{MockDirectory, Role, SessionManager, SessionPhase, TOKEN_KEY, USER_KEY};
use schola::router::{dispatch, home_path, Dispatch, View};
use schola::storage::{FileStore, LocalStore, MemStore};

fn manager_with(store: Arc<dyn LocalStore>) -> SessionManager {
    SessionManager::new(Arc::new(MockDirectory::demo()), store)
}

fn mem_manager() -> SessionManager {
    manager_with(Arc::new(MemStore::new()))
}

#[test]
fn every_demo_role_logs_in_and_lands_on_its_home() -> Result<()> {
    let accounts = [
        ("aluno@escola.com", Role::Student, "/dashboard"),
        ("professor@escola.com", Role::Teacher, "/dashboard"),
        ("diretor@escola.com", Role::Admin, "/dashboard"),
        ("responsavel@escola.com", Role::Guardian, "/dashboard"),
        ("secretaria@escola.com", Role::Secretary, "/secretary/students"),
    ];
    for (email, role, home) in accounts {
        let mgr = mem_manager();
        let user = mgr.login(email, "senha123")?;
        assert_eq!(user.role, role, "role for {}", email);
        assert_eq!(home_path(user.role), home, "home for {}", email);

        // The login view bounces a signed-in user to their home
        assert_eq!(dispatch("/login", &mgr.phase()), Dispatch::Redirect(home));
    }
    Ok(())
}

#[test]
fn bad_credentials_leave_the_session_untouched() {
    let mgr = mem_manager();
    mgr.restore();
    assert!(mgr.login("aluno@escola.com", "errada").is_err());
    assert!(mgr.login("ninguem@escola.com", "senha123").is_err());
    assert_eq!(mgr.phase(), SessionPhase::SignedOut);

    // Same while already signed in: the live session survives a failed retry
    mgr.login("aluno@escola.com", "senha123").expect("login");
    let before = mgr.phase();
    assert!(mgr.login("aluno@escola.com", "errada").is_err());
    assert_eq!(mgr.phase(), before);
}

#[test]
fn session_survives_a_manager_restart() -> Result<()> {
    let tmp = tempdir()?;
    let store: Arc<dyn LocalStore> = Arc::new(FileStore::open(tmp.path())?);

    let first = manager_with(store.clone());
    first.login("responsavel@escola.com", "senha123")?;
    let token = first.token().expect("token after login");
    drop(first);

    // Fresh manager over the same profile directory
    let store2: Arc<dyn LocalStore> = Arc::new(FileStore::open(tmp.path())?);
    let second = manager_with(store2);
    let phase = second.restore();
    assert!(phase.is_signed_in());
    assert_eq!(second.token().as_deref(), Some(token.as_str()));
    let user = second.current_user().expect("restored user");
    assert_eq!(user.role, Role::Guardian);
    assert_eq!(user.linked_children().len(), 2);
    Ok(())
}

#[test]
fn profile_file_holds_both_keys_and_logout_clears_them() -> Result<()> {
    let tmp = tempdir()?;
    let store = Arc::new(FileStore::open(tmp.path())?);
    let file = store.path().to_path_buf();
    let mgr = manager_with(store);

    mgr.login("aluno@escola.com", "senha123")?;
    let body: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&file)?)?;
    assert!(body.get(TOKEN_KEY).is_some(), "token persisted");
    let user_raw = body
        .get(USER_KEY)
        .and_then(|v| v.as_str())
        .expect("user persisted as a JSON string");
    let user: serde_json::Value = serde_json::from_str(user_raw)?;
    assert_eq!(user["enrollmentId"], "20230001", "wire field names are camelCase");

    mgr.logout();
    let body: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&file)?)?;
    assert!(body.get(TOKEN_KEY).is_none());
    assert!(body.get(USER_KEY).is_none());
    Ok(())
}

#[test]
fn stored_profile_in_the_web_client_shape_restores() -> Result<()> {
    let tmp = tempdir()?;
    let store: Arc<dyn LocalStore> = Arc::new(FileStore::open(tmp.path())?);
    store.put(TOKEN_KEY, "abc123tok")?;
    store.put(
        USER_KEY,
        r#"{"id":"4","name":"Paulo Mendes","email":"responsavel@escola.com","role":"guardian","photoURL":"https://i.pravatar.cc/150?img=4","guardianId":"G20230001","childrenData":[{"id":"1","name":"João Silva","class":"9º Ano A","enrollmentId":"20230001"}]}"#,
    )?;

    let mgr = manager_with(store);
    let phase = mgr.restore();
    assert!(phase.is_signed_in());
    let user = mgr.current_user().expect("user");
    assert_eq!(user.role, Role::Guardian);
    assert_eq!(user.guardian_id.as_deref(), Some("G20230001"));
    assert_eq!(user.linked_children()[0].enrollment_id, "20230001");
    Ok(())
}

#[test]
fn corrupt_stored_profile_recovers_to_signed_out() -> Result<()> {
    let tmp = tempdir()?;
    let store: Arc<dyn LocalStore> = Arc::new(FileStore::open(tmp.path())?);
    store.put(TOKEN_KEY, "tok")?;
    store.put(USER_KEY, "{not json")?;

    let mgr = manager_with(store.clone());
    assert_eq!(mgr.restore(), SessionPhase::SignedOut);
    // Recovery clears the stale keys so the next start is clean
    assert!(store.get(TOKEN_KEY).is_none());
    assert!(store.get(USER_KEY).is_none());
    Ok(())
}

#[test]
fn gate_decisions_per_phase() -> Result<()> {
    // Before restore settles nothing renders
    let pending = SessionPhase::Pending;
    assert_eq!(dispatch("/dashboard", &pending), Dispatch::Loading);

    // Signed out: protected views bounce to login, login renders
    let out = SessionPhase::SignedOut;
    assert_eq!(dispatch("/dashboard", &out), Dispatch::Redirect("/login"));
    assert_eq!(dispatch("/guardian/finance", &out), Dispatch::Redirect("/login"));
    match dispatch("/login", &out) {
        Dispatch::Render(View::Login, _) => {}
        other => panic!("expected login render, got {:?}", other),
    }

    // Unknown paths are a straight 404 regardless of session
    match dispatch("/nope", &out) {
        Dispatch::Render(View::NotFound, _) => {}
        other => panic!("expected not-found render, got {:?}", other),
    }
    Ok(())
}

#[test]
fn role_scoped_views_hide_as_not_found_for_other_roles() -> Result<()> {
    let student = mem_manager();
    student.login("aluno@escola.com", "senha123")?;
    match dispatch("/secretary/students", &student.phase()) {
        Dispatch::Render(View::NotFound, _) => {}
        other => panic!("student should not see the roster, got {:?}", other),
    }
    match dispatch("/guardian/finance", &student.phase()) {
        Dispatch::Render(View::NotFound, _) => {}
        other => panic!("student should not see finance, got {:?}", other),
    }

    let guardian = mem_manager();
    guardian.login("responsavel@escola.com", "senha123")?;
    match dispatch("/grades", &guardian.phase()) {
        Dispatch::Render(View::NotFound, _) => {}
        other => panic!("guardian should not see grades, got {:?}", other),
    }
    Ok(())
}

#[test]
fn the_director_passes_every_scope() -> Result<()> {
    let mgr = mem_manager();
    mgr.login("diretor@escola.com", "senha123")?;
    let phase = mgr.phase();
    for (path, view) in [
        ("/grades", View::Grades),
        ("/guardian/finance", View::GuardianFinance),
        ("/secretary/documents", View::SecretaryDocuments),
    ] {
        match dispatch(path, &phase) {
            Dispatch::Render(v, _) if v == view => {}
            other => panic!("admin at {} got {:?}", path, other),
        }
    }
    Ok(())
}

#[test]
fn path_params_reach_the_view() -> Result<()> {
    let mgr = mem_manager();
    mgr.login("responsavel@escola.com", "senha123")?;
    match dispatch("/guardian/children/6", &mgr.phase()) {
        Dispatch::Render(View::GuardianChildDetail, params) => {
            assert_eq!(params.get("id").map(String::as_str), Some("6"));
        }
        other => panic!("expected child detail, got {:?}", other),
    }
    Ok(())
}

#[tokio::test]
async fn api_calls_require_a_live_token() -> Result<()> {
    let mgr = Arc::new(mem_manager());
    mgr.restore();
    let api = PortalApi::new(mgr.clone());

    let err = api.announcements().await.unwrap_err();
    assert!(matches!(err, PortalError::Unauthorized { .. }));
    assert_eq!(err.toast(), "Sua sessão expirou. Por favor, faça login novamente.");

    mgr.login("aluno@escola.com", "senha123")?;
    assert_eq!(api.announcements().await?.len(), 6);

    // Logging out invalidates the next call
    mgr.logout();
    assert!(api.student_grades().await.is_err());
    Ok(())
}
