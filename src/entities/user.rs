use leptos::prelude::*;
use serde::Serialize;

use super::{checkbox, value, CrudEntity, FieldKind, FieldSpec, FilterSpec, FormValues, Lookups, OptionSource};
use crate::api::Resource;
use crate::models::{Role, User};
use crate::store::{AppStateStoreFields, AppStore};
use crate::validation::{self, ValidationError};

pub const MIN_PASSWORD_LEN: usize = 8;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserDraft {
    pub username: String,
    pub full_name: String,
    pub email: String,
    pub role: Role,
    pub ministry_id: Option<u32>,
    pub active: bool,
    /// Only sent when set; required for new accounts
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

const FIELDS: &[FieldSpec] = &[
    FieldSpec::new("username", "Username", FieldKind::Text),
    FieldSpec::new("full_name", "Full name", FieldKind::Text),
    FieldSpec::new("email", "Email", FieldKind::Text),
    FieldSpec::new("role", "Role", FieldKind::Select { source: OptionSource::Roles, optional: false }),
    FieldSpec::new("ministry_id", "Ministry", FieldKind::Select { source: OptionSource::Ministries, optional: true }),
    FieldSpec::new("active", "Active", FieldKind::Checkbox),
    FieldSpec::new("password", "Password", FieldKind::Password),
];

const FILTERS: &[FilterSpec] = &[
    FilterSpec {
        param: "role",
        label: "Role",
        source: OptionSource::Roles,
    },
    FilterSpec {
        param: "ministry_id",
        label: "Ministry",
        source: OptionSource::Ministries,
    },
];

impl CrudEntity for User {
    type Draft = UserDraft;

    const RESOURCE: Resource = Resource::Users;
    const SINGULAR: &'static str = "User";
    const PLURAL: &'static str = "Users";

    fn id(&self) -> u32 {
        self.id
    }

    fn columns() -> &'static [&'static str] {
        &["Username", "Name", "Email", "Role", "Ministry", "Status"]
    }

    fn cells(&self, lookups: &Lookups) -> Vec<String> {
        vec![
            self.username.clone(),
            self.full_name.clone(),
            self.email.clone(),
            self.role.as_str().to_string(),
            self.ministry_id.map(|id| lookups.ministry_name(id)).unwrap_or_default(),
            if self.active { "Active" } else { "Disabled" }.to_string(),
        ]
    }

    fn fields() -> &'static [FieldSpec] {
        FIELDS
    }

    fn filters() -> &'static [FilterSpec] {
        FILTERS
    }

    fn default_values() -> FormValues {
        FormValues::from([
            ("role", Role::Viewer.as_str().to_string()),
            ("active", "true".to_string()),
        ])
    }

    fn form_values(&self) -> FormValues {
        FormValues::from([
            ("username", self.username.clone()),
            ("full_name", self.full_name.clone()),
            ("email", self.email.clone()),
            ("role", self.role.as_str().to_string()),
            ("ministry_id", self.ministry_id.map(|id| id.to_string()).unwrap_or_default()),
            ("active", self.active.to_string()),
        ])
    }

    fn draft(values: &FormValues, is_new: bool) -> Result<UserDraft, ValidationError> {
        let username = validation::username("Username", value(values, "username"))?;
        let full_name = validation::required("Full name", value(values, "full_name"))?;
        let email = validation::email("Email", value(values, "email"))?;
        let role = Role::parse(value(values, "role")).ok_or(ValidationError::Required("Role"))?;
        let ministry_id = validation::optional_id("Ministry", value(values, "ministry_id"))?;

        // Passwords are not trimmed; blank on edit keeps the current one
        let raw_password = value(values, "password");
        let password = match (raw_password.is_empty(), is_new) {
            (true, true) => return Err(ValidationError::Required("Password")),
            (true, false) => None,
            (false, _) => Some(validation::min_len("Password", raw_password.to_string(), MIN_PASSWORD_LEN)?),
        };

        Ok(UserDraft {
            username,
            full_name: validation::max_len("Full name", full_name, 120)?,
            email,
            role,
            ministry_id,
            active: checkbox(values, "active"),
            password,
        })
    }

    fn replace_in_store(store: &AppStore, items: Vec<Self>) {
        *store.users().write() = items;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_values() -> FormValues {
        let mut values = User::default_values();
        values.insert("username", "mchen".to_string());
        values.insert("full_name", "Maya Chen".to_string());
        values.insert("email", "maya.chen@gov.example".to_string());
        values
    }

    #[test]
    fn new_users_need_a_password() {
        assert_eq!(User::draft(&base_values(), true), Err(ValidationError::Required("Password")));

        let mut values = base_values();
        values.insert("password", "short".to_string());
        assert!(matches!(User::draft(&values, true), Err(ValidationError::TooShort { .. })));

        values.insert("password", "correct horse".to_string());
        let draft = User::draft(&values, true).unwrap();
        assert_eq!(draft.role, Role::Viewer);
        assert!(draft.active);
    }

    #[test]
    fn blank_password_is_omitted_on_edit() {
        let draft = User::draft(&base_values(), false).unwrap();
        assert_eq!(draft.password, None);
        let json = serde_json::to_value(&draft).unwrap();
        assert!(json.get("password").is_none());
    }
}
