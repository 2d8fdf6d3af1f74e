//! Controls for search result list settings.

use common::{
    item_type::ItemType,
    reducer::FilterAction,
    search_query::{SearchParams, SortDirection, SortSpec},
};
use dioxus::prelude::*;
use dioxus_free_icons::{Icon, icons::md_navigation_icons::{MdArrowDownward, MdArrowUpward, MdClose}};

use crate::pages::search_page::SearchSessionState;

const SORT_FIELDS: [(&str, &str); 4] = [
    ("Date Created", "date_created"),
    ("Last Modified", "last_modified.date_modified"),
    ("Accession", "accession"),
    ("Title", "display_title"),
];

#[component]
pub fn SearchResultListControls() -> Element {
    rsx! {
        div {
            id: "x-search-panel-title-row",
            style: "
                display: flex;
                flex-direction: row;
                align-items: center;
                gap: 16px;
                padding: 7px 16px;
                height: 56px;
                width: 100%;
                flex-shrink: 0;
            ",
            h1 {
                style: "font-size: 20px; font-weight: 300; color:rgb(75, 87, 112);  border-bottom: 1px solid rgb(75, 87, 112);",
                SearchForResultsHitCountString { }
            }
            // empty space
            div {
                style: "
                flex-grow: 1;"
            }
            FilterResetButtons {}
            SortControls {}
        }
    }
}

#[component]
fn SearchForResultsHitCountString() -> Element {
    let session = use_context::<SearchSessionState>().session;
    let session = session.read();
    let loaded = session.pages().row_count();
    let total = session.total_count();

    if session.pages().is_empty() && session.is_loading() {
        return rsx! {"..."};
    }
    rsx! { "{total} results" span { style: "font-size: 14px; color: rgba(0,0,0,0.5);", " ({loaded} loaded)" } }
}

#[component]
fn FilterResetButtons() -> Element {
    let state = use_context::<SearchSessionState>();
    let session = state.session;
    let dispatch = state.dispatch;
    let baseline = use_memo(move || {
        let params = session.read().params();
        params.type_name().map(|t| ItemType::from(t).baseline_filters())
    });
    let has_filters = use_memo(move || !session.read().filters().is_empty());

    rsx! {
        if let Some(baseline) = baseline() {
            button {
                style: "height: 32px; padding: 0 10px; border-radius: 8px; background: white; border: 1px solid #D1D5DB; cursor: pointer;",
                onclick: move |_| dispatch(FilterAction::ResetToDefault { baseline: baseline.clone() }),
                "Reset filters"
            }
        }
        if has_filters() {
            button {
                style: "display: flex; align-items: center; gap: 4px; height: 32px; padding: 0 10px; border-radius: 8px; background: white; border: 1px solid #D1D5DB; cursor: pointer;",
                onclick: move |_| dispatch(FilterAction::clear_all()),
                Icon { icon: MdClose, style: "width: 16px; height: 16px;" }
                "Clear all"
            }
        }
    }
}

#[component]
fn SortControls() -> Element {
    let state = use_context::<SearchSessionState>();
    let session = state.session;
    let set_sort = state.set_sort;
    let current = use_memo(move || session.read().sort().cloned());
    let current_field = use_memo(move || current().map(|s| s.field).unwrap_or_default());
    let is_descending = use_memo(move || current().is_some_and(|s| s.direction == SortDirection::Descending));
    let type_default = use_memo(move || type_default_sort(&session.read().params()));
    let direction_label = if is_descending() { "Descending" } else { "Ascending" };

    rsx! {
        div {
            style: "display: flex; flex-direction: row; align-items: center; gap: 6px;",
            select {
                style: "height: 32px; border-radius: 8px; border: 1px solid #D1D5DB; padding: 0 6px;",
                value: "{current_field}",
                onchange: move |event: Event<FormData>| {
                    let field = event.value();
                    let sort = if field.is_empty() {
                        type_default()
                    } else if is_descending() {
                        Some(SortSpec::descending(field))
                    } else {
                        Some(SortSpec::ascending(field))
                    };
                    set_sort(sort);
                },
                option { value: "", "Default order" }
                for (label, field) in SORT_FIELDS {
                    option { key: "{field}", value: "{field}", selected: current_field() == field, "{label}" }
                }
            }
            button {
                style: "width: 32px; height: 32px; background: white; border-radius: 8px; padding: 4px; border: 1px solid #D1D5DB; cursor: pointer;",
                disabled: current().is_none(),
                title: direction_label,
                onclick: move |_| {
                    let Some(sort) = current() else { return };
                    let flipped = if is_descending() { SortSpec::ascending(sort.field) } else { SortSpec::descending(sort.field) };
                    set_sort(Some(flipped));
                },
                if is_descending() {
                    Icon { icon: MdArrowDownward, style: "width: 22px; height: 22px;" }
                } else {
                    Icon { icon: MdArrowUpward, style: "width: 22px; height: 22px;" }
                }
            }
        }
    }
}

fn type_default_sort(params: &SearchParams) -> Option<SortSpec> {
    params.type_name().and_then(|t| ItemType::from(t).default_sort())
}
