use leptos::prelude::*;
use serde::Serialize;

use super::{checkbox, value, CrudEntity, FieldKind, FieldSpec, FormValues, Lookups, OptionSource};
use crate::api::Resource;
use crate::models::{Attribute, AttributeKind};
use crate::store::{AppStateStoreFields, AppStore};
use crate::validation::{self, ValidationError};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttributeDraft {
    pub name: String,
    pub kind: AttributeKind,
    pub required: bool,
    pub description: Option<String>,
}

const FIELDS: &[FieldSpec] = &[
    FieldSpec::new("name", "Name", FieldKind::Text),
    FieldSpec::new("kind", "Type", FieldKind::Select { source: OptionSource::AttributeKinds, optional: false }),
    FieldSpec::new("required", "Required", FieldKind::Checkbox),
    FieldSpec::new("description", "Description", FieldKind::TextArea),
];

impl CrudEntity for Attribute {
    type Draft = AttributeDraft;

    const RESOURCE: Resource = Resource::Attributes;
    const SINGULAR: &'static str = "Attribute";
    const PLURAL: &'static str = "Attributes";

    fn id(&self) -> u32 {
        self.id
    }

    fn columns() -> &'static [&'static str] {
        &["Name", "Type", "Required", "Description"]
    }

    fn cells(&self, _lookups: &Lookups) -> Vec<String> {
        vec![
            self.name.clone(),
            self.kind.as_str().to_string(),
            if self.required { "Yes" } else { "No" }.to_string(),
            self.description.clone().unwrap_or_default(),
        ]
    }

    fn fields() -> &'static [FieldSpec] {
        FIELDS
    }

    fn default_values() -> FormValues {
        FormValues::from([("kind", AttributeKind::Text.as_str().to_string())])
    }

    fn form_values(&self) -> FormValues {
        FormValues::from([
            ("name", self.name.clone()),
            ("kind", self.kind.as_str().to_string()),
            ("required", self.required.to_string()),
            ("description", self.description.clone().unwrap_or_default()),
        ])
    }

    fn draft(values: &FormValues, _is_new: bool) -> Result<AttributeDraft, ValidationError> {
        let name = validation::required("Name", value(values, "name"))?;
        let kind = AttributeKind::parse(value(values, "kind")).ok_or(ValidationError::Required("Type"))?;
        Ok(AttributeDraft {
            name: validation::max_len("Name", name, 80)?,
            kind,
            required: checkbox(values, "required"),
            description: validation::optional(value(values, "description")),
        })
    }

    fn replace_in_store(store: &AppStore, items: Vec<Self>) {
        *store.attributes().write() = items;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_form_defaults_to_text() {
        let mut values = Attribute::default_values();
        values.insert("name", "Security clearance".to_string());
        let draft = Attribute::draft(&values, true).unwrap();
        assert_eq!(draft.kind, AttributeKind::Text);
        assert!(!draft.required);
    }

    #[test]
    fn checkbox_and_kind_are_read() {
        let values = FormValues::from([
            ("name", "Start date".to_string()),
            ("kind", "date".to_string()),
            ("required", "true".to_string()),
        ]);
        let draft = Attribute::draft(&values, false).unwrap();
        assert_eq!(draft.kind, AttributeKind::Date);
        assert!(draft.required);
    }
}
