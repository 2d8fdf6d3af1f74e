use dioxus::prelude::*;
use common::item_type::ItemType;
use dioxus_free_icons::{Icon, icons::md_action_icons::MdSearch};
use crate::{pages::search_page::SearchSessionState, routes::Route};

const BROWSABLE_TYPES: [ItemType; 5] = [
    ItemType::ExperimentSetReplicate,
    ItemType::Experiment,
    ItemType::File,
    ItemType::Biosample,
    ItemType::Biosource,
];

#[component]
pub fn SearchInputTopBar() -> Element {
    let state = use_context::<SearchSessionState>();
    let session = state.session;
    let set_text_query = state.set_text_query;

    let original_text = use_memo(move || session.read().params().text_query.unwrap_or_default());
    let mut modified_text = use_signal(|| original_text.peek().clone());
    // when the url changes, the input follows it
    use_effect(move || {
        modified_text.set(original_text());
    });
    let text_has_changed = use_memo(move || modified_text() != original_text());
    let search_button_color = use_memo(move || if text_has_changed() { "blue" } else { "#6B7280" });
    let trigger_search = move |_: ()| {
        set_text_query(Some(modified_text.read().clone()));
    };

    rsx! {
        div {
            id: "x-search-input-search-box",
            style: "
                display:flex;
                align-items:center;
                gap: 16px;
                background-color: white;
                border-radius: 9999px;
                padding: 10px 14px;
                height: 44px;
                color: #111827;
                border: 1px solid rgba(101, 101, 101, 0.8);
                width: 500px;
                margin-left: 16px;
            ",

            button {
                style: "
                    border: none;
                    background: none;
                    cursor: pointer;
                ",
                onclick: move |_| {
                    trigger_search(())
                },
                Icon { icon: MdSearch, style: "width: 20px; height: 20px; color:{search_button_color()};" }
            }
            input {
                r#type: "text",
                placeholder: "Search within results",
                style: "
                    flex:1;
                    border: none;
                    outline: none;
                    background: transparent;
                    color: #111827;
                    font-size: 20px;
                    font-weight: 400;
                ",
                value: "{modified_text}",
                oninput: move |event: Event<FormData>| {
                    modified_text.set(event.value());
                },
                onkeydown: move |event: Event<KeyboardData>| {
                    if event.key() == Key::Enter {
                        trigger_search(());
                    }
                },
            }
        }
        ItemTypeChips {}
    }
}

#[component]
fn ItemTypeChips() -> Element {
    let session = use_context::<SearchSessionState>().session;
    let current_type = use_memo(move || session.read().params().type_name().map(ItemType::from));
    let chips = BROWSABLE_TYPES
        .iter()
        .map(|item_type| (item_type.clone(), chip_border(current_type().as_ref() == Some(item_type))))
        .collect::<Vec<_>>();

    rsx! {
        div {
            id: "x-search-input-type-chips-wrapper",
            style: "
                display: flex;
                flex-direction: row;
                align-items: center;
                gap: 12px;
                margin: 10px;
                padding: 10px;
            ",
            for (item_type, border) in chips {
                div {
                    key: "{item_type}",
                    style: "
                        border: 2px solid {border};
                        border-radius: 1000px;
                        background-color: white;
                        padding: 6px 12px;
                        font-size: 15px;
                        white-space: nowrap;
                    ",
                    Link {
                        to: Route::browse(&item_type),
                        "{item_type.display_name()}"
                    }
                }
            }
        }
    }
}

fn chip_border(active: bool) -> &'static str {
    if active { "rgba(0,0,255,0.9)" } else { "rgba(0,0,0,0.3)" }
}
