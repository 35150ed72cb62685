//! Node Detail Component
//!
//! Dialog with both titles, holder, manager and direct reports of a position.

use leptos::prelude::*;

use crate::actions::use_shell;
use crate::components::Modal;
use crate::context::use_app_context;
use crate::org_chart::OrgChartState;
use crate::tree::find_path;
use crate::view_state::ModalState;

#[component]
pub fn NodeDetail(state: OrgChartState) -> impl IntoView {
    let ctx = use_app_context();
    let shell = use_shell();

    let show = move |id: String| {
        state.focus(&id);
        shell.modals.update(|m| m.show_detail(&id));
    };

    move || {
        let id = shell.modals.with(|m| m.detail_node.clone())?;
        let lang = ctx.language.get();

        // (node, manager as (id, title))
        let (node, manager) = state.root.with_value(|root| {
            let path = find_path(root, &id)?;
            let node = (*path.last()?).clone();
            let manager = path
                .len()
                .checked_sub(2)
                .map(|i| (path[i].id.clone(), path[i].title(lang).to_string()));
            Some((node, manager))
        })?;

        let title = node.title(lang).to_string();
        let report_count = node.children.len();
        let reports = node
            .children
            .iter()
            .map(|child| {
                let child_id = child.id.clone();
                view! {
                    <li>
                        <button class="link-btn" on:click=move |_| show(child_id.clone())>
                            {child.title(lang).to_string()}
                        </button>
                    </li>
                }
            })
            .collect_view();
        let manager_view = match manager {
            Some((parent_id, parent_title)) => view! {
                <button class="link-btn" on:click=move |_| show(parent_id.clone())>{parent_title}</button>
            }
            .into_any(),
            None => view! { <span>"(top of organization)"</span> }.into_any(),
        };

        Some(view! {
            <Modal title=title on_close=move |_| shell.modals.update(ModalState::close_all) class="node-detail">
                <dl class="detail-list">
                    <dt>"English title"</dt>
                    <dd>{node.titles.en}</dd>
                    <dt>"French title"</dt>
                    <dd>{node.titles.fr}</dd>
                    <dt>"Holder"</dt>
                    <dd>{node.holder.unwrap_or_else(|| "Vacant".to_string())}</dd>
                    <dt>"Department"</dt>
                    <dd>{node.department.unwrap_or_default()}</dd>
                    <dt>"Level"</dt>
                    <dd>{node.level}</dd>
                    <dt>"Reports to"</dt>
                    <dd>{manager_view}</dd>
                </dl>
                {(report_count > 0).then(|| view! {
                    <h3>{format!("Direct reports ({})", report_count)}</h3>
                    <ul class="detail-reports">{reports}</ul>
                })}
            </Modal>
        })
    }
}
