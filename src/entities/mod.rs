//! CRUD Entities
//!
//! Describes each server-backed resource to the generic list/form screen:
//! table columns, form fields, validation into a request draft and where
//! the loaded list lives in the global store.

mod attribute;
mod department;
mod ministry;
mod position;
mod user;

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::api::Resource;
use crate::models::{AttributeKind, Department, Ministry, Position, Role};
use crate::store::AppStore;
use crate::validation::ValidationError;
use crate::view_state::Language;

pub use attribute::AttributeDraft;
pub use department::DepartmentDraft;
pub use ministry::MinistryDraft;
pub use position::PositionDraft;
pub use user::UserDraft;

/// Raw form input keyed by field name
pub type FormValues = BTreeMap<&'static str, String>;

/// Where a select box gets its options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionSource {
    Ministries,
    Departments,
    Positions,
    Roles,
    AttributeKinds,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Password,
    TextArea,
    Checkbox,
    /// Select box; `optional` adds an empty choice
    Select { source: OptionSource, optional: bool },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
}

impl FieldSpec {
    pub const fn new(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self { name, label, kind }
    }
}

/// Server-side list filter rendered as a select above the table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterSpec {
    pub param: &'static str,
    pub label: &'static str,
    pub source: OptionSource,
}

/// Related records used to resolve ids into names
#[derive(Debug, Clone, Default)]
pub struct Lookups {
    pub ministries: Vec<Ministry>,
    pub departments: Vec<Department>,
    pub positions: Vec<Position>,
    pub language: Language,
}

impl Lookups {
    pub fn ministry_name(&self, id: u32) -> String {
        self.ministries
            .iter()
            .find(|m| m.id == id)
            .map(|m| pick(self.language, &m.name_en, &m.name_fr).to_string())
            .unwrap_or_else(|| format!("#{}", id))
    }

    pub fn department_name(&self, id: u32) -> String {
        self.departments
            .iter()
            .find(|d| d.id == id)
            .map(|d| pick(self.language, &d.name_en, &d.name_fr).to_string())
            .unwrap_or_else(|| format!("#{}", id))
    }

    pub fn position_title(&self, id: u32) -> String {
        self.positions
            .iter()
            .find(|p| p.id == id)
            .map(|p| pick(self.language, &p.title_en, &p.title_fr).to_string())
            .unwrap_or_else(|| format!("#{}", id))
    }

    /// `(value, label)` pairs for a select box
    pub fn options(&self, source: OptionSource) -> Vec<(String, String)> {
        let lang = self.language;
        match source {
            OptionSource::Ministries => self
                .ministries
                .iter()
                .map(|m| (m.id.to_string(), pick(lang, &m.name_en, &m.name_fr).to_string()))
                .collect(),
            OptionSource::Departments => self
                .departments
                .iter()
                .map(|d| (d.id.to_string(), pick(lang, &d.name_en, &d.name_fr).to_string()))
                .collect(),
            OptionSource::Positions => self
                .positions
                .iter()
                .map(|p| (p.id.to_string(), pick(lang, &p.title_en, &p.title_fr).to_string()))
                .collect(),
            OptionSource::Roles => Role::ALL
                .iter()
                .map(|r| (r.as_str().to_string(), capitalize(r.as_str())))
                .collect(),
            OptionSource::AttributeKinds => AttributeKind::ALL
                .iter()
                .map(|k| (k.as_str().to_string(), capitalize(k.as_str())))
                .collect(),
        }
    }
}

/// Choose the display string for a bilingual pair
pub fn pick<'a>(lang: Language, en: &'a str, fr: &'a str) -> &'a str {
    match lang {
        Language::Fr if !fr.is_empty() => fr,
        _ => en,
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Read a form value, empty when absent
pub fn value<'a>(values: &'a FormValues, name: &str) -> &'a str {
    values.get(name).map(String::as_str).unwrap_or("")
}

pub fn checkbox(values: &FormValues, name: &str) -> bool {
    value(values, name) == "true"
}

/// Fill empty required selects with their first option, so the stored
/// value matches what the select box shows
pub fn seed_required_selects(fields: &[FieldSpec], values: &mut FormValues, lookups: &Lookups) {
    for spec in fields {
        let FieldKind::Select { source, optional: false } = spec.kind else { continue };
        if !value(values, spec.name).is_empty() {
            continue;
        }
        if let Some((first, _)) = lookups.options(source).into_iter().next() {
            values.insert(spec.name, first);
        }
    }
}

/// Server values for an open edit form, unless the user has already edited it
pub fn refreshed_values(opened: &FormValues, current: &FormValues, fresh: FormValues) -> Option<FormValues> {
    (opened == current).then_some(fresh)
}

/// A resource editable through the generic CRUD screen
pub trait CrudEntity: Clone + PartialEq + Send + Sync + Serialize + DeserializeOwned + 'static {
    /// Request body for create/update
    type Draft: Serialize + 'static;

    const RESOURCE: Resource;
    const SINGULAR: &'static str;
    const PLURAL: &'static str;

    fn id(&self) -> u32;

    fn columns() -> &'static [&'static str];

    fn cells(&self, lookups: &Lookups) -> Vec<String>;

    fn fields() -> &'static [FieldSpec];

    fn filters() -> &'static [FilterSpec] {
        &[]
    }

    /// Initial values of a blank form
    fn default_values() -> FormValues {
        FormValues::new()
    }

    /// Values of the edit form for an existing record
    fn form_values(&self) -> FormValues;

    /// Validate form input into a request body
    fn draft(values: &FormValues, is_new: bool) -> Result<Self::Draft, ValidationError>;

    fn replace_in_store(store: &AppStore, items: Vec<Self>);

    /// Client-side text filter over the rendered cells
    fn matches(&self, needle: &str, lookups: &Lookups) -> bool {
        let needle = needle.trim().to_lowercase();
        needle.is_empty()
            || self
                .cells(lookups)
                .iter()
                .any(|cell| cell.to_lowercase().contains(&needle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::User;

    fn lookups() -> Lookups {
        Lookups {
            ministries: vec![Ministry {
                id: 1,
                code: "FIN".to_string(),
                name_en: "Finance".to_string(),
                name_fr: "Finances".to_string(),
                description: None,
            }],
            departments: vec![Department {
                id: 4,
                ministry_id: 1,
                code: "TAX".to_string(),
                name_en: "Tax Policy".to_string(),
                name_fr: String::new(),
            }],
            ..Lookups::default()
        }
    }

    #[test]
    fn names_follow_language_with_english_fallback() {
        let mut lookups = lookups();
        assert_eq!(lookups.ministry_name(1), "Finance");
        lookups.language = Language::Fr;
        assert_eq!(lookups.ministry_name(1), "Finances");
        assert_eq!(lookups.department_name(4), "Tax Policy");
        assert_eq!(lookups.department_name(99), "#99");
    }

    #[test]
    fn required_selects_start_on_first_option() {
        let lookups = lookups();
        let mut values = Department::default_values();
        seed_required_selects(Department::fields(), &mut values, &lookups);
        assert_eq!(value(&values, "ministry_id"), "1");

        values.insert("code", "TAX".to_string());
        values.insert("name_en", "Tax Policy".to_string());
        values.insert("name_fr", "Politique fiscale".to_string());
        assert_eq!(Department::draft(&values, true).map(|d| d.ministry_id), Ok(1));

        let mut values = Position::default_values();
        seed_required_selects(Position::fields(), &mut values, &lookups);
        assert_eq!(value(&values, "department_id"), "4");
        assert_eq!(value(&values, "reports_to"), "");
    }

    #[test]
    fn seeding_keeps_chosen_and_optional_values() {
        let lookups = lookups();
        let mut values = FormValues::from([("ministry_id", "7".to_string())]);
        seed_required_selects(Department::fields(), &mut values, &lookups);
        assert_eq!(value(&values, "ministry_id"), "7");

        let mut values = User::default_values();
        seed_required_selects(User::fields(), &mut values, &lookups);
        assert_eq!(value(&values, "ministry_id"), "");
        assert_eq!(value(&values, "role"), "viewer");

        // Nothing to choose from: left empty and reported as required
        let mut values = Department::default_values();
        seed_required_selects(Department::fields(), &mut values, &Lookups::default());
        assert_eq!(value(&values, "ministry_id"), "");
    }

    #[test]
    fn refresh_skips_edited_forms() {
        let opened = FormValues::from([("name", "Clearance".to_string())]);
        let fresh = FormValues::from([("name", "Security clearance".to_string())]);
        assert_eq!(refreshed_values(&opened, &opened.clone(), fresh.clone()), Some(fresh.clone()));

        let typed = FormValues::from([("name", "Clearance level".to_string())]);
        assert_eq!(refreshed_values(&opened, &typed, fresh), None);
    }

    #[test]
    fn option_lists() {
        let lookups = lookups();
        assert_eq!(lookups.options(OptionSource::Ministries), [("1".to_string(), "Finance".to_string())]);
        let roles: Vec<String> = lookups.options(OptionSource::Roles).into_iter().map(|(v, _)| v).collect();
        assert_eq!(roles, ["admin", "editor", "viewer"]);
        assert_eq!(lookups.options(OptionSource::AttributeKinds)[0].1, "Text");
    }
}
