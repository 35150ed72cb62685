use leptos::prelude::*;
use serde::Serialize;

use super::{pick, value, CrudEntity, FieldKind, FieldSpec, FilterSpec, FormValues, Lookups, OptionSource};
use crate::api::Resource;
use crate::models::Department;
use crate::store::{AppStateStoreFields, AppStore};
use crate::validation::{self, ValidationError};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DepartmentDraft {
    pub ministry_id: u32,
    pub code: String,
    pub name_en: String,
    pub name_fr: String,
}

const FIELDS: &[FieldSpec] = &[
    FieldSpec::new("ministry_id", "Ministry", FieldKind::Select { source: OptionSource::Ministries, optional: false }),
    FieldSpec::new("code", "Code", FieldKind::Text),
    FieldSpec::new("name_en", "Name (English)", FieldKind::Text),
    FieldSpec::new("name_fr", "Name (French)", FieldKind::Text),
];

const FILTERS: &[FilterSpec] = &[FilterSpec {
    param: "ministry_id",
    label: "Ministry",
    source: OptionSource::Ministries,
}];

impl CrudEntity for Department {
    type Draft = DepartmentDraft;

    const RESOURCE: Resource = Resource::Departments;
    const SINGULAR: &'static str = "Department";
    const PLURAL: &'static str = "Departments";

    fn id(&self) -> u32 {
        self.id
    }

    fn columns() -> &'static [&'static str] {
        &["Code", "Name", "Ministry"]
    }

    fn cells(&self, lookups: &Lookups) -> Vec<String> {
        vec![
            self.code.clone(),
            pick(lookups.language, &self.name_en, &self.name_fr).to_string(),
            lookups.ministry_name(self.ministry_id),
        ]
    }

    fn fields() -> &'static [FieldSpec] {
        FIELDS
    }

    fn filters() -> &'static [FilterSpec] {
        FILTERS
    }

    fn form_values(&self) -> FormValues {
        FormValues::from([
            ("ministry_id", self.ministry_id.to_string()),
            ("code", self.code.clone()),
            ("name_en", self.name_en.clone()),
            ("name_fr", self.name_fr.clone()),
        ])
    }

    fn draft(values: &FormValues, _is_new: bool) -> Result<DepartmentDraft, ValidationError> {
        let ministry_id = validation::required_id("Ministry", value(values, "ministry_id"))?;
        let code = validation::code("Code", value(values, "code"))?;
        let name_en = validation::required("Name (English)", value(values, "name_en"))?;
        let name_fr = validation::required("Name (French)", value(values, "name_fr"))?;
        Ok(DepartmentDraft {
            ministry_id,
            code,
            name_en: validation::max_len("Name (English)", name_en, 120)?,
            name_fr: validation::max_len("Name (French)", name_fr, 120)?,
        })
    }

    fn replace_in_store(store: &AppStore, items: Vec<Self>) {
        *store.departments().write() = items;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::AppState;

    #[test]
    fn ministry_must_be_chosen() {
        let values = FormValues::from([
            ("ministry_id", String::new()),
            ("code", "TAX".to_string()),
            ("name_en", "Tax Policy".to_string()),
            ("name_fr", "Politique de l'impôt".to_string()),
        ]);
        assert_eq!(Department::draft(&values, true), Err(ValidationError::Required("Ministry")));
    }

    #[test]
    fn loaded_list_replaces_store_slot() {
        let store = AppStore::new(AppState::default());
        let department = Department {
            id: 3,
            ministry_id: 1,
            code: "TAX".to_string(),
            name_en: "Tax Policy".to_string(),
            name_fr: "Politique fiscale".to_string(),
        };
        Department::replace_in_store(&store, vec![department.clone()]);
        assert_eq!(store.departments().get_untracked(), vec![department]);

        Department::replace_in_store(&store, Vec::new());
        assert!(store.departments().get_untracked().is_empty());
    }

    #[test]
    fn cells_resolve_ministry_name() {
        let department = Department {
            id: 1,
            ministry_id: 42,
            code: "TAX".to_string(),
            name_en: "Tax Policy".to_string(),
            name_fr: "Politique de l'impôt".to_string(),
        };
        let cells = department.cells(&Lookups::default());
        assert_eq!(cells, ["TAX", "Tax Policy", "#42"]);
        assert!(department.matches("tax", &Lookups::default()));
        assert!(!department.matches("health", &Lookups::default()));
    }
}
