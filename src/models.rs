//! Frontend Models
//!
//! Data structures matching the REST API entities.

use serde::{Deserialize, Serialize};

/// Ministry (top-level government body)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ministry {
    pub id: u32,
    pub code: String,
    pub name_en: String,
    pub name_fr: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Department within a ministry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Department {
    pub id: u32,
    pub ministry_id: u32,
    pub code: String,
    pub name_en: String,
    pub name_fr: String,
}

/// Position within a department
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub id: u32,
    pub department_id: u32,
    pub title_en: String,
    pub title_fr: String,
    #[serde(default)]
    pub grade: Option<String>,
    #[serde(default)]
    pub reports_to: Option<u32>,
    #[serde(default)]
    pub holder: Option<String>,
}

/// Value type of a custom position attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeKind {
    Text,
    Number,
    Date,
    Boolean,
}

impl AttributeKind {
    pub const ALL: [AttributeKind; 4] = [Self::Text, Self::Number, Self::Date, Self::Boolean];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Number => "number",
            Self::Date => "date",
            Self::Boolean => "boolean",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == value)
    }
}

/// Custom attribute definition attached to positions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    pub id: u32,
    pub name: String,
    pub kind: AttributeKind,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub description: Option<String>,
}

/// Access role of an application user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Editor,
    Viewer,
}

impl Role {
    pub const ALL: [Role; 3] = [Self::Admin, Self::Editor, Self::Viewer];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Editor => "editor",
            Self::Viewer => "viewer",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.as_str() == value)
    }

    /// Whether this role may create, update and delete records
    pub fn can_edit(&self) -> bool {
        matches!(self, Self::Admin | Self::Editor)
    }
}

/// Application user account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: u32,
    pub username: String,
    pub full_name: String,
    pub email: String,
    pub role: Role,
    #[serde(default)]
    pub ministry_id: Option<u32>,
    #[serde(default = "default_true")]
    pub active: bool,
}

fn default_true() -> bool {
    true
}

/// Authenticated user as returned by the auth endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: u32,
    pub username: String,
    pub full_name: String,
    pub role: Role,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_defaults_to_active() {
        let user: User = serde_json::from_str(
            r#"{"id":1,"username":"jdoe","full_name":"Jane Doe","email":"jdoe@gov.example","role":"editor"}"#,
        )
        .unwrap();
        assert!(user.active);
        assert_eq!(user.ministry_id, None);
        assert!(user.role.can_edit());
    }

    #[test]
    fn enum_names_match_wire_format() {
        for kind in AttributeKind::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.as_str()));
            assert_eq!(AttributeKind::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(Role::parse("viewer"), Some(Role::Viewer));
        assert!(!Role::Viewer.can_edit());
        assert_eq!(Role::parse("root"), None);
    }
}
