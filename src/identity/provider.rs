use std::collections::HashSet;

use crate::error::{PortalError, PortalResult};
use crate::tprintln;

use super::user::{ChildSummary, Role, User};

/// Resolves a credential pair to a portal identity. The shipped implementation
/// is a fixed in-memory directory; a real backend slots in behind this trait
/// without touching session callers.
pub trait AuthProvider: Send + Sync {
    /// Exact-match check on both fields. The returned identity never carries
    /// the password. Unknown email and wrong password fail identically.
    fn authenticate(&self, email: &str, password: &str) -> PortalResult<User>;
}

/// One directory row: the public identity plus its login secret. The secret
/// lives only here and is not serializable.
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub user: User,
    pub password: String,
}

/// Fixed credential table backing the demo portal.
#[derive(Debug)]
pub struct MockDirectory {
    records: Vec<UserRecord>,
}

impl MockDirectory {
    /// Build a directory, rejecting duplicate emails. An email resolves to at
    /// most one account.
    pub fn with_users(records: Vec<UserRecord>) -> PortalResult<Self> {
        let mut seen: HashSet<&str> = HashSet::new();
        for rec in &records {
            if !seen.insert(rec.user.email.as_str()) {
                return Err(PortalError::conflict(format!(
                    "duplicate email in directory: {}",
                    rec.user.email
                )));
            }
        }
        Ok(Self { records })
    }

    /// The demo accounts the portal ships with. All use the password
    /// `senha123`.
    pub fn demo() -> Self {
        Self { records: demo_records() }
    }
}

impl AuthProvider for MockDirectory {
    fn authenticate(&self, email: &str, password: &str) -> PortalResult<User> {
        let found = self.records.iter().find(|r| r.user.email == email);
        match found {
            Some(rec) if rec.password == password => {
                tprintln!("auth.ok email={} role={}", email, rec.user.role);
                Ok(rec.user.clone())
            }
            _ => Err(PortalError::invalid_credentials()),
        }
    }
}

fn base_user(id: &str, name: &str, email: &str, role: Role) -> User {
    User {
        id: id.into(),
        name: name.into(),
        email: email.into(),
        role,
        photo_url: None,
        enrollment_id: None,
        teacher_id: None,
        admin_id: None,
        guardian_id: None,
        secretary_id: None,
        class: None,
        subjects: None,
        children: None,
    }
}

fn demo_records() -> Vec<UserRecord> {
    let mut student = base_user("1", "João Silva", "aluno@escola.com", Role::Student);
    student.enrollment_id = Some("20230001".into());
    student.class = Some("9º Ano A".into());

    let mut teacher = base_user("2", "Maria Oliveira", "professor@escola.com", Role::Teacher);
    teacher.teacher_id = Some("T20230001".into());
    teacher.subjects = Some(vec!["Matemática".into(), "Física".into()]);

    let mut admin = base_user("3", "Carlos Souza", "diretor@escola.com", Role::Admin);
    admin.admin_id = Some("A20230001".into());

    let mut guardian = base_user("4", "Paulo Mendes", "responsavel@escola.com", Role::Guardian);
    guardian.guardian_id = Some("G20230001".into());
    guardian.children = Some(vec![
        ChildSummary {
            id: "1".into(),
            name: "João Silva".into(),
            class: "9º Ano A".into(),
            enrollment_id: "20230001".into(),
        },
        ChildSummary {
            id: "6".into(),
            name: "Ana Clara Mendes".into(),
            class: "5º Ano B".into(),
            enrollment_id: "20230115".into(),
        },
    ]);

    let mut secretary = base_user("5", "Luciana Pereira", "secretaria@escola.com", Role::Secretary);
    secretary.secretary_id = Some("S20230001".into());

    [student, teacher, admin, guardian, secretary]
        .into_iter()
        .map(|user| UserRecord { user, password: "senha123".into() })
        .collect()
}
