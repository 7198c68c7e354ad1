use std::fmt;

use serde::{Deserialize, Serialize};

/// Portal roles. The role decides navigation, the landing view and which
/// role-scoped views resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Teacher,
    Admin,
    Guardian,
    Secretary,
}

impl Role {
    pub const ALL: [Role; 5] = [
        Role::Student,
        Role::Teacher,
        Role::Admin,
        Role::Guardian,
        Role::Secretary,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Teacher => "teacher",
            Role::Admin => "admin",
            Role::Guardian => "guardian",
            Role::Secretary => "secretary",
        }
    }

    /// Display label, in the portal's language.
    pub fn label(&self) -> &'static str {
        match self {
            Role::Student => "Aluno",
            Role::Teacher => "Professor",
            Role::Admin => "Diretor",
            Role::Guardian => "Responsável",
            Role::Secretary => "Secretaria",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Denormalized child row carried on a guardian account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChildSummary {
    pub id: String,
    pub name: String,
    pub class: String,
    pub enrollment_id: String,
}

/// Identity record for a portal account. Role-specific attributes ride along
/// as optionals; absent ones are skipped on write.
///
/// Field names on the wire (`photoURL`, `enrollmentId`, `childrenData`, ...)
/// are the ones the portal has always persisted, so a previously stored
/// profile restores unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(default, rename = "photoURL", skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enrollment_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub teacher_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guardian_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secretary_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subjects: Option<Vec<String>>,
    #[serde(default, rename = "childrenData", skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<ChildSummary>>,
}

impl User {
    /// First name, for greetings.
    pub fn first_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or(&self.name)
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    pub fn linked_children(&self) -> &[ChildSummary] {
        self.children.as_deref().unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn student() -> User {
        User {
            id: "1".into(),
            name: "João Silva".into(),
            email: "aluno@escola.com".into(),
            role: Role::Student,
            photo_url: Some("https://i.pravatar.cc/150?img=1".into()),
            enrollment_id: Some("20230001".into()),
            teacher_id: None,
            admin_id: None,
            guardian_id: None,
            secretary_id: None,
            class: Some("9º Ano A".into()),
            subjects: None,
            children: None,
        }
    }

    #[test]
    fn role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Guardian).unwrap(), "\"guardian\"");
        let r: Role = serde_json::from_str("\"secretary\"").unwrap();
        assert_eq!(r, Role::Secretary);
    }

    #[test]
    fn wire_field_names_are_stable() {
        let v = serde_json::to_value(student()).unwrap();
        assert_eq!(v["enrollmentId"], "20230001");
        assert_eq!(v["photoURL"], "https://i.pravatar.cc/150?img=1");
        assert!(v.get("teacherId").is_none());
        assert!(v.get("childrenData").is_none());
    }

    #[test]
    fn restores_record_written_by_the_web_client() {
        let raw = r#"{
            "id": "4",
            "name": "Paulo Mendes",
            "email": "responsavel@escola.com",
            "role": "guardian",
            "guardianId": "G20230001",
            "childrenData": [
                {"id": "1", "name": "João Silva", "class": "9º Ano A", "enrollmentId": "20230001"}
            ]
        }"#;
        let u: User = serde_json::from_str(raw).unwrap();
        assert_eq!(u.role, Role::Guardian);
        assert_eq!(u.linked_children().len(), 1);
        assert_eq!(u.linked_children()[0].enrollment_id, "20230001");
        assert_eq!(u.first_name(), "Paulo");
    }

    #[test]
    fn round_trip_preserves_children() {
        let mut u = student();
        u.children = Some(vec![ChildSummary {
            id: "6".into(),
            name: "Ana Clara Mendes".into(),
            class: "5º Ano B".into(),
            enrollment_id: "20230115".into(),
        }]);
        let raw = serde_json::to_string(&u).unwrap();
        let back: User = serde_json::from_str(&raw).unwrap();
        assert_eq!(back, u);
    }
}
