//! User account wire models.

use serde::{Deserialize, Serialize};

use super::email::Email;
use super::id::UserId;
use super::role::Role;

/// Phone number split the way the registration form collects it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phone {
    /// Country/area prefix, e.g. `+54 11`.
    pub prefix: String,
    /// Subscriber number.
    pub number: String,
}

/// Profile returned by `GET /auth/me`, `POST /auth/register` and the admin
/// user listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(rename = "_id", alias = "id")]
    pub id: UserId,
    pub email: Email,
    pub name: String,
    pub last_name: String,
    #[serde(default)]
    pub phone: Option<Phone>,
    #[serde(default)]
    pub role: Role,
}

impl UserProfile {
    /// `name last_name`.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.name, self.last_name)
    }
}

/// Body of `POST /auth/register`.
#[derive(Debug, Clone, Serialize)]
pub struct Registration {
    pub email: Email,
    pub name: String,
    pub last_name: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<Phone>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_accepts_either_id_spelling() {
        let a: UserProfile = serde_json::from_str(
            r#"{"_id": "u1", "email": "a@b.c", "name": "Ana", "last_name": "Paz", "role": "admin"}"#,
        )
        .unwrap();
        let b: UserProfile = serde_json::from_str(
            r#"{"id": "u1", "email": "a@b.c", "name": "Ana", "last_name": "Paz"}"#,
        )
        .unwrap();
        assert_eq!(a.id, b.id);
        assert!(a.role.is_admin());
        assert_eq!(b.role, Role::User);
        assert_eq!(a.full_name(), "Ana Paz");
    }

    #[test]
    fn test_registration_omits_missing_phone() {
        let registration = Registration {
            email: Email::parse("a@b.c").unwrap(),
            name: "Ana".to_string(),
            last_name: "Paz".to_string(),
            password: "hunter2hunter2".to_string(),
            phone: None,
        };
        let value = serde_json::to_value(&registration).unwrap();
        assert!(value.get("phone").is_none());
        assert_eq!(value["email"], "a@b.c");
    }
}
