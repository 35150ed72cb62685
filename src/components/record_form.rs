//! Record Form Component
//!
//! Create/edit form built from an entity's field list. Validation errors
//! are shown next to the field they belong to.

use leptos::prelude::*;

use crate::entities::{checkbox, value, FieldKind, FieldSpec, FormValues, Lookups};
use crate::validation::ValidationError;

fn field_input(
    spec: FieldSpec,
    values: RwSignal<FormValues>,
    lookups: Signal<Lookups>,
) -> AnyView {
    let name = spec.name;
    let current = move || values.with(|v| value(v, name).to_string());
    let set_value = move |new_value: String| {
        values.update(|v| {
            v.insert(name, new_value);
        })
    };

    match spec.kind {
        FieldKind::Text | FieldKind::Password => {
            let input_type = if spec.kind == FieldKind::Password { "password" } else { "text" };
            view! {
                <input
                    type=input_type
                    name=name
                    prop:value=current
                    on:input=move |ev| set_value(event_target_value(&ev))
                />
            }
            .into_any()
        }
        FieldKind::TextArea => view! {
            <textarea
                name=name
                rows="3"
                prop:value=current
                on:input=move |ev| set_value(event_target_value(&ev))
            ></textarea>
        }
        .into_any(),
        FieldKind::Checkbox => view! {
            <input
                type="checkbox"
                name=name
                prop:checked=move || values.with(|v| checkbox(v, name))
                on:change=move |ev| set_value(event_target_checked(&ev).to_string())
            />
        }
        .into_any(),
        FieldKind::Select { source, optional } => view! {
            <select name=name on:change=move |ev| set_value(event_target_value(&ev))>
                {if optional {
                    view! { <option value="" selected=move || current().is_empty()>"(none)"</option> }.into_any()
                } else {
                    // Shown until a value is chosen; never submitted
                    view! { <option value="" disabled=true selected=move || current().is_empty()>"Select..."</option> }.into_any()
                }}
                {move || {
                    lookups
                        .get()
                        .options(source)
                        .into_iter()
                        .map(|(option_value, label)| {
                            let is_selected = {
                                let option_value = option_value.clone();
                                move || current() == option_value
                            };
                            view! { <option value=option_value selected=is_selected>{label}</option> }
                        })
                        .collect_view()
                }}
            </select>
        }
        .into_any(),
    }
}

#[component]
pub fn RecordForm(
    fields: &'static [FieldSpec],
    values: RwSignal<FormValues>,
    #[prop(into)] lookups: Signal<Lookups>,
    #[prop(into)] error: Signal<Option<ValidationError>>,
    #[prop(into)] saving: Signal<bool>,
    #[prop(into)] on_submit: Callback<()>,
    #[prop(into)] on_cancel: Callback<()>,
) -> impl IntoView {
    view! {
        <form
            class="record-form"
            on:submit=move |ev: web_sys::SubmitEvent| {
                ev.prevent_default();
                on_submit.run(());
            }
        >
            {fields
                .iter()
                .map(|spec| {
                    let label = spec.label;
                    let field_error = move || {
                        error
                            .get()
                            .filter(|e| e.field() == label)
                            .map(|e| view! { <span class="field-error">{e.to_string()}</span> })
                    };
                    let class = move || if field_error().is_some() { "form-field invalid" } else { "form-field" };
                    view! {
                        <label class=class>
                            <span class="form-label">{label}</span>
                            {field_input(*spec, values, lookups)}
                            {field_error}
                        </label>
                    }
                })
                .collect_view()}
            <div class="form-actions">
                <button type="button" class="btn" on:click=move |_| on_cancel.run(())>"Cancel"</button>
                <button type="submit" class="btn btn-primary" disabled=move || saving.get()>
                    {move || if saving.get() { "Saving..." } else { "Save" }}
                </button>
            </div>
        </form>
    }
}
