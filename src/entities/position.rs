use leptos::prelude::*;
use serde::Serialize;

use super::{pick, value, CrudEntity, FieldKind, FieldSpec, FilterSpec, FormValues, Lookups, OptionSource};
use crate::api::Resource;
use crate::models::Position;
use crate::store::{AppStateStoreFields, AppStore};
use crate::validation::{self, ValidationError};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionDraft {
    pub department_id: u32,
    pub title_en: String,
    pub title_fr: String,
    pub grade: Option<String>,
    pub reports_to: Option<u32>,
    pub holder: Option<String>,
}

const FIELDS: &[FieldSpec] = &[
    FieldSpec::new("department_id", "Department", FieldKind::Select { source: OptionSource::Departments, optional: false }),
    FieldSpec::new("title_en", "Title (English)", FieldKind::Text),
    FieldSpec::new("title_fr", "Title (French)", FieldKind::Text),
    FieldSpec::new("grade", "Grade", FieldKind::Text),
    FieldSpec::new("reports_to", "Reports to", FieldKind::Select { source: OptionSource::Positions, optional: true }),
    FieldSpec::new("holder", "Holder", FieldKind::Text),
];

const FILTERS: &[FilterSpec] = &[FilterSpec {
    param: "department_id",
    label: "Department",
    source: OptionSource::Departments,
}];

impl CrudEntity for Position {
    type Draft = PositionDraft;

    const RESOURCE: Resource = Resource::Positions;
    const SINGULAR: &'static str = "Position";
    const PLURAL: &'static str = "Positions";

    fn id(&self) -> u32 {
        self.id
    }

    fn columns() -> &'static [&'static str] {
        &["Title", "Department", "Grade", "Reports to", "Holder"]
    }

    fn cells(&self, lookups: &Lookups) -> Vec<String> {
        vec![
            pick(lookups.language, &self.title_en, &self.title_fr).to_string(),
            lookups.department_name(self.department_id),
            self.grade.clone().unwrap_or_default(),
            self.reports_to.map(|id| lookups.position_title(id)).unwrap_or_default(),
            self.holder.clone().unwrap_or_else(|| "Vacant".to_string()),
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
            ("department_id", self.department_id.to_string()),
            ("title_en", self.title_en.clone()),
            ("title_fr", self.title_fr.clone()),
            ("grade", self.grade.clone().unwrap_or_default()),
            ("reports_to", self.reports_to.map(|id| id.to_string()).unwrap_or_default()),
            ("holder", self.holder.clone().unwrap_or_default()),
        ])
    }

    fn draft(values: &FormValues, _is_new: bool) -> Result<PositionDraft, ValidationError> {
        let department_id = validation::required_id("Department", value(values, "department_id"))?;
        let title_en = validation::required("Title (English)", value(values, "title_en"))?;
        let title_fr = validation::required("Title (French)", value(values, "title_fr"))?;
        let grade = validation::optional(value(values, "grade"))
            .map(|g| validation::max_len("Grade", g.to_uppercase(), 16))
            .transpose()?;
        Ok(PositionDraft {
            department_id,
            title_en: validation::max_len("Title (English)", title_en, 160)?,
            title_fr: validation::max_len("Title (French)", title_fr, 160)?,
            grade,
            reports_to: validation::optional_id("Reports to", value(values, "reports_to"))?,
            holder: validation::optional(value(values, "holder")),
        })
    }

    fn replace_in_store(store: &AppStore, items: Vec<Self>) {
        *store.positions().write() = items;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_fields_become_none() {
        let values = FormValues::from([
            ("department_id", "2".to_string()),
            ("title_en", "Director, Curriculum".to_string()),
            ("title_fr", "Directeur, Programmes d'études".to_string()),
            ("grade", " ex-01 ".to_string()),
            ("reports_to", String::new()),
            ("holder", "  ".to_string()),
        ]);
        let draft = Position::draft(&values, true).unwrap();
        assert_eq!(draft.department_id, 2);
        assert_eq!(draft.grade.as_deref(), Some("EX-01"));
        assert_eq!(draft.reports_to, None);
        assert_eq!(draft.holder, None);
    }

    #[test]
    fn vacant_positions_are_labelled() {
        let position = Position {
            id: 1,
            department_id: 2,
            title_en: "Analyst".to_string(),
            title_fr: "Analyste".to_string(),
            grade: None,
            reports_to: None,
            holder: None,
        };
        assert_eq!(position.cells(&Lookups::default())[4], "Vacant");
    }
}
