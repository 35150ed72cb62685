//! CRUD Page
//!
//! Generic list/create/edit/delete screen shared by every resource. The
//! list refetches whenever the resource's query version or a filter changes.

use std::collections::BTreeMap;

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{self, use_query_client, ApiClient, QueryKey};
use crate::components::{DeleteConfirmButton, Modal, RecordForm};
use crate::config::use_config;
use crate::context::use_app_context;
use crate::entities::{refreshed_values, seed_required_selects, CrudEntity, FilterSpec, FormValues, Lookups};
use crate::session::use_session;
use crate::store::{store_lookups, use_app_store};
use crate::validation::ValidationError;

/// `None` = create, `Some(id)` = edit
type EditTarget = Option<u32>;

fn filter_select(spec: FilterSpec, filters: RwSignal<BTreeMap<&'static str, String>>, lookups: Signal<Lookups>) -> impl IntoView {
    let param = spec.param;
    view! {
        <label class="filter">
            <span class="filter-label">{spec.label}</span>
            <select on:change=move |ev| {
                let selected = event_target_value(&ev);
                filters.update(|f| {
                    f.insert(param, selected);
                });
            }>
                <option value="">"All"</option>
                {move || {
                    lookups
                        .get()
                        .options(spec.source)
                        .into_iter()
                        .map(|(value, label)| view! { <option value=value>{label}</option> })
                        .collect_view()
                }}
            </select>
        </label>
    }
}

pub fn crud_page<T: CrudEntity>() -> impl IntoView {
    let ctx = use_app_context();
    let session = use_session();
    let queries = use_query_client();
    let store = use_app_store();
    let config = StoredValue::new(use_config());

    let items = RwSignal::new(Vec::<T>::new());
    let loading = RwSignal::new(false);
    let search = RwSignal::new(String::new());
    let filters = RwSignal::new(BTreeMap::<&'static str, String>::new());
    let request_seq = StoredValue::new(0u32);

    let editing = RwSignal::new(None::<EditTarget>);
    let values = RwSignal::new(FormValues::new());
    let form_error = RwSignal::new(None::<ValidationError>);
    let saving = RwSignal::new(false);

    let lookups = Signal::derive(move || store_lookups(&store, ctx.language.get()));
    let client = move || config.with_value(|config| ApiClient::for_session(config, &session));

    // Load list when filters or the resource version change
    Effect::new(move |_| {
        let _ = queries.version(T::RESOURCE);
        let key = filters.with(|f| {
            f.iter()
                .fold(QueryKey::list(T::RESOURCE), |key, (param, value)| key.with_param(param, value))
        });
        if !session.is_authenticated() {
            return;
        }
        request_seq.update_value(|seq| *seq += 1);
        let seq = request_seq.get_value();
        let client = client();
        loading.set(true);
        spawn_local(async move {
            let result = api::list::<T>(&queries, &client, key).await;
            // A newer request superseded this one, or the page is gone
            if request_seq.try_get_value() != Some(seq) {
                return;
            }
            match result {
                Ok(loaded) => {
                    web_sys::console::log_1(&format!("[API] Loaded {} {}", loaded.len(), T::PLURAL.to_lowercase()).into());
                    items.try_set(loaded);
                }
                Err(e) => ctx.report_error(&format!("Loading {}", T::PLURAL.to_lowercase()), &e),
            }
            loading.try_set(false);
        });
    });

    let visible = move || {
        let lookups = lookups.get();
        let needle = search.get();
        items.with(|items| {
            items
                .iter()
                .filter(|item| item.matches(&needle, &lookups))
                .map(|item| (item.clone(), item.cells(&lookups)))
                .collect::<Vec<_>>()
        })
    };

    let open_new = move || {
        let mut initial = T::default_values();
        seed_required_selects(T::fields(), &mut initial, &lookups.get_untracked());
        values.set(initial);
        form_error.set(None);
        editing.set(Some(None));
    };

    let open_edit = move |item: T| {
        let id = item.id();
        let opened = item.form_values();
        values.set(opened.clone());
        form_error.set(None);
        editing.set(Some(Some(id)));

        // Refresh the form from the detail endpoint in case the list is stale
        let client = client();
        spawn_local(async move {
            match api::get::<T>(&queries, &client, T::RESOURCE, id).await {
                Ok(fresh) if editing.try_get_untracked() == Some(Some(Some(id))) => {
                    // Keep whatever the user typed while the request was in flight
                    let refreshed = values.with_untracked(|current| refreshed_values(&opened, current, fresh.form_values()));
                    if let Some(refreshed) = refreshed {
                        values.set(refreshed);
                    }
                }
                Ok(_) => {}
                Err(e) => web_sys::console::error_1(&format!("[API] Could not refresh {} #{}: {}", T::SINGULAR, id, e).into()),
            }
        });
    };

    let close_editor = move || {
        editing.set(None);
        form_error.set(None);
    };

    let save = move || {
        let Some(target) = editing.get_untracked() else { return };
        if saving.get_untracked() {
            return;
        }
        let draft = match values.with_untracked(|v| T::draft(v, target.is_none())) {
            Ok(draft) => draft,
            Err(e) => {
                form_error.set(Some(e));
                return;
            }
        };
        form_error.set(None);
        saving.set(true);
        let client = client();

        spawn_local(async move {
            let result: Result<T, _> = match target {
                None => api::create(&queries, &client, T::RESOURCE, &draft).await,
                Some(id) => api::update(&queries, &client, T::RESOURCE, id, &draft).await,
            };
            let verb = if target.is_none() { "created" } else { "updated" };
            match result {
                Ok(saved) => {
                    ctx.notify_success(format!("{} #{} {}", T::SINGULAR, saved.id(), verb));
                    editing.try_set(None);
                }
                Err(e) => ctx.report_error(&format!("Saving {}", T::SINGULAR.to_lowercase()), &e),
            }
            saving.try_set(false);
        });
    };

    let remove = move |id: u32| {
        let client = client();
        spawn_local(async move {
            match api::delete(&queries, &client, T::RESOURCE, id).await {
                Ok(()) => ctx.notify_success(format!("{} #{} deleted", T::SINGULAR, id)),
                Err(e) => ctx.report_error(&format!("Deleting {}", T::SINGULAR.to_lowercase()), &e),
            }
        });
    };

    let modal_title = Signal::derive(move || match editing.get() {
        Some(Some(id)) => format!("Edit {} #{}", T::SINGULAR.to_lowercase(), id),
        _ => format!("New {}", T::SINGULAR.to_lowercase()),
    });

    view! {
        <section class="crud-page">
            <header class="page-header">
                <h1>{T::PLURAL}</h1>
                <Show when=move || session.can_edit()>
                    <button class="btn btn-primary" on:click=move |_| open_new()>
                        {format!("New {}", T::SINGULAR.to_lowercase())}
                    </button>
                </Show>
            </header>

            <div class="list-toolbar">
                <input
                    type="search"
                    class="search-input"
                    placeholder=format!("Search {}...", T::PLURAL.to_lowercase())
                    prop:value=move || search.get()
                    on:input=move |ev| search.set(event_target_value(&ev))
                />
                {T::filters().iter().map(|spec| filter_select(*spec, filters, lookups)).collect_view()}
                <Show when=move || loading.get()>
                    <span class="loading">"Loading..."</span>
                </Show>
            </div>

            <table class="data-table">
                <thead>
                    <tr>
                        {T::columns().iter().map(|col| view! { <th>{*col}</th> }).collect_view()}
                        <th class="actions-col"></th>
                    </tr>
                </thead>
                <tbody>
                    {move || {
                        let rows = visible();
                        if rows.is_empty() {
                            let colspan = (T::columns().len() + 1).to_string();
                            return view! {
                                <tr class="empty-row">
                                    <td colspan=colspan>{format!("No {} found", T::PLURAL.to_lowercase())}</td>
                                </tr>
                            }
                            .into_any();
                        }
                        rows.into_iter()
                            .map(|(item, cells)| {
                                let id = item.id();
                                let label = format!("{} #{}", T::SINGULAR.to_lowercase(), id);
                                view! {
                                    <tr>
                                        {cells.into_iter().map(|cell| view! { <td>{cell}</td> }).collect_view()}
                                        <td class="row-actions">
                                            <Show when=move || session.can_edit()>
                                                <button class="btn btn-small" on:click={
                                                    let item = item.clone();
                                                    move |_| open_edit(item.clone())
                                                }>"Edit"</button>
                                                <DeleteConfirmButton label=label.clone() on_confirm=move |_| remove(id) />
                                            </Show>
                                        </td>
                                    </tr>
                                }
                            })
                            .collect_view()
                            .into_any()
                    }}
                </tbody>
            </table>

            {move || editing.get().map(|_| view! {
                <Modal title=modal_title on_close=move |_| close_editor()>
                    <RecordForm
                        fields=T::fields()
                        values=values
                        lookups=lookups
                        error=form_error
                        saving=saving
                        on_submit=move |_| save()
                        on_cancel=move |_| close_editor()
                    />
                </Modal>
            })}
        </section>
    }
}
