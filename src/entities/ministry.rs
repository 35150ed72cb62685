use leptos::prelude::*;
use serde::Serialize;

use super::{pick, value, CrudEntity, FieldKind, FieldSpec, FormValues, Lookups};
use crate::api::Resource;
use crate::models::Ministry;
use crate::store::{AppStateStoreFields, AppStore};
use crate::validation::{self, ValidationError};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MinistryDraft {
    pub code: String,
    pub name_en: String,
    pub name_fr: String,
    pub description: Option<String>,
}

const FIELDS: &[FieldSpec] = &[
    FieldSpec::new("code", "Code", FieldKind::Text),
    FieldSpec::new("name_en", "Name (English)", FieldKind::Text),
    FieldSpec::new("name_fr", "Name (French)", FieldKind::Text),
    FieldSpec::new("description", "Description", FieldKind::TextArea),
];

impl CrudEntity for Ministry {
    type Draft = MinistryDraft;

    const RESOURCE: Resource = Resource::Ministries;
    const SINGULAR: &'static str = "Ministry";
    const PLURAL: &'static str = "Ministries";

    fn id(&self) -> u32 {
        self.id
    }

    fn columns() -> &'static [&'static str] {
        &["Code", "Name", "Description"]
    }

    fn cells(&self, lookups: &Lookups) -> Vec<String> {
        vec![
            self.code.clone(),
            pick(lookups.language, &self.name_en, &self.name_fr).to_string(),
            self.description.clone().unwrap_or_default(),
        ]
    }

    fn fields() -> &'static [FieldSpec] {
        FIELDS
    }

    fn form_values(&self) -> FormValues {
        FormValues::from([
            ("code", self.code.clone()),
            ("name_en", self.name_en.clone()),
            ("name_fr", self.name_fr.clone()),
            ("description", self.description.clone().unwrap_or_default()),
        ])
    }

    fn draft(values: &FormValues, _is_new: bool) -> Result<MinistryDraft, ValidationError> {
        let code = validation::code("Code", value(values, "code"))?;
        let name_en = validation::required("Name (English)", value(values, "name_en"))?;
        let name_fr = validation::required("Name (French)", value(values, "name_fr"))?;
        let description = validation::optional(value(values, "description"))
            .map(|d| validation::max_len("Description", d, 500))
            .transpose()?;
        Ok(MinistryDraft {
            code,
            name_en: validation::max_len("Name (English)", name_en, 120)?,
            name_fr: validation::max_len("Name (French)", name_fr, 120)?,
            description,
        })
    }

    fn replace_in_store(store: &AppStore, items: Vec<Self>) {
        *store.ministries().write() = items;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edit_form_round_trips_into_draft() {
        let ministry = Ministry {
            id: 3,
            code: "HEALTH".to_string(),
            name_en: "Ministry of Health".to_string(),
            name_fr: "Ministère de la Santé".to_string(),
            description: None,
        };
        let draft = Ministry::draft(&ministry.form_values(), false).unwrap();
        assert_eq!(draft.code, "HEALTH");
        assert_eq!(draft.name_fr, "Ministère de la Santé");
        assert_eq!(draft.description, None);
    }

    #[test]
    fn french_name_is_required() {
        let values = FormValues::from([("code", "fin".to_string()), ("name_en", "Finance".to_string())]);
        assert_eq!(Ministry::draft(&values, true), Err(ValidationError::Required("Name (French)")));
    }
}
