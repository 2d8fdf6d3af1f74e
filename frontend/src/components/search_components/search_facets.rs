use dioxus::prelude::*;
use common::{
    facets::{FacetTermView, FacetView},
    filter::FilterMode,
    reducer::FilterAction,
};
use dioxus_free_icons::{Icon, icons::md_toggle_icons::{MdCheckBox, MdCheckBoxOutlineBlank, MdIndeterminateCheckBox}};

use crate::pages::search_page::SearchSessionState;

#[component]
pub fn FacetPanelList() -> Element {
    let session = use_context::<SearchSessionState>().session;
    let facets = use_memo(move || session.read().facets());

    rsx! {
        div {
            id: "x-search-facets-wrapper",
            style: "
                display: flex;
                flex-direction: column;
                gap: 10px;
                padding: 10px;
            ",
            for facet in facets() {
                FacetPanel { key: "{facet.field}", facet }
            }
        }
    }
}

#[component]
fn FacetPanel(facet: ReadSignal<FacetView>) -> Element {
    let state = use_context::<SearchSessionState>();
    let session = state.session;
    let dispatch = state.dispatch;
    let field = use_memo(move || facet.read().field.clone());
    let mode = use_memo(move || session.read().filter_state().active_mode(&field()));
    let has_selection = use_memo(move || facet.read().has_selection());
    let border_color = use_memo(move || if has_selection() { "rgba(0,0,255,0.9)" } else { "rgba(0,0,0,0.2)" });
    let FacetView { title, terms, .. } = facet.read().clone();

    rsx! {
        div {
            style: "
                background: white;
                border: 1px solid {border_color};
                border-radius: 10px;
                padding: 10px;
                box-shadow: 0 0 10px 0 rgba(0, 0, 0, 0.05);
            ",
            div {
                style: "
                    display: flex;
                    flex-direction: row;
                    align-items: center;
                    gap: 6px;
                ",
                div { style: "font-size: 17px; font-weight: 500; flex: 1 1 auto; min-width: 0;", "{title}" }
                ModeSwitch {
                    mode,
                    onchange: move |mode: FilterMode| dispatch(FilterAction::set_mode(field(), mode)),
                }
                if has_selection() {
                    button {
                        style: "border: none; background: none; cursor: pointer; color: #4F46E5;",
                        onclick: move |_| dispatch(FilterAction::clear_field(field())),
                        "clear"
                    }
                }
            }
            ul {
                for term in terms {
                    li {
                        key: "{term.key}",
                        FacetCheckbox { field: field(), term }
                    }
                }
            }
        }
    }
}

#[component]
fn ModeSwitch(mode: ReadSignal<FilterMode>, onchange: Callback<FilterMode>) -> Element {
    let options = [("include", FilterMode::Include), ("exclude", FilterMode::Exclude)]
        .map(|(label, option)| (label, option, mode_background(mode() == option), mode_color(mode() == option)));
    rsx! {
        div {
            style: "display: flex; flex-direction: row; border: 1px solid rgba(0,0,0,0.2); border-radius: 6px; overflow: hidden;",
            for (label, option, background, color) in options {
                button {
                    key: "{label}",
                    style: "
                        border: none;
                        padding: 2px 8px;
                        font-size: 13px;
                        cursor: pointer;
                        background: {background};
                        color: {color};
                    ",
                    onclick: move |_| onchange(option),
                    "{label}"
                }
            }
        }
    }
}

fn mode_background(active: bool) -> &'static str {
    if active { "rgb(28, 33, 45)" } else { "white" }
}

fn mode_color(active: bool) -> &'static str {
    if active { "white" } else { "rgb(28, 33, 45)" }
}

#[component]
fn FacetCheckbox(field: ReadSignal<String>, term: ReadSignal<FacetTermView>) -> Element {
    let dispatch = use_context::<SearchSessionState>().dispatch;
    let FacetTermView { key, doc_count, selected } = term.read().clone();
    let label_decoration = if selected == Some(FilterMode::Exclude) { "line-through" } else { "none" };

    rsx! {
        div {
            class: "x-facet-list-item",
            style: "
                display: flex;
                flex-direction: row;
                gap: 10px;
                cursor: pointer;
                padding: 4px;
                margin: 2px;
                align-items: center;
            ",
            onclick: move |_e| {
                dispatch(FilterAction::toggle(field(), term.read().key.clone()));
            },

            // FACET CHECKBOX
            {match selected {
                Some(FilterMode::Include) => rsx! {
                    Icon { icon: MdCheckBox, style: "width: 22px; height: 22px; color: rgb(28, 33, 45); flex-shrink: 0;" }
                },
                Some(FilterMode::Exclude) => rsx! {
                    Icon { icon: MdIndeterminateCheckBox, style: "width: 22px; height: 22px; color: darkred; flex-shrink: 0;" }
                },
                None => rsx! {
                    Icon { icon: MdCheckBoxOutlineBlank, style: "width: 22px; height: 22px; color: black; flex-shrink: 0;" }
                },
            }}
            // FACET NAME
            div {
                style: "
                    font-size: 15px;
                    line-height: 22px;
                    color: rgb(0, 0, 0);
                    text-decoration: {label_decoration};
                    overflow: hidden;
                    text-overflow: ellipsis;
                    white-space: nowrap;
                    min-width: 0;
                ",
                "{key}"
            }

            // FACET SPACER
            div { style: "flex: 1 1 auto;", }

            // FACET COUNT
            div {
                style: "
                    font-size: 15px;
                    line-height: 22px;
                    color: rgba(28, 33, 45, 0.7);
                    flex-shrink: 0;
                ",
                "{doc_count}"
            }
        }
    }
}
