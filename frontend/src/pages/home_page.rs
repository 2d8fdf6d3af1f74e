use dioxus::prelude::*;
use dioxus_free_icons::icons::md_action_icons::MdSearch;
use dioxus_free_icons::Icon;

use common::item_type::ItemType;
use common::search_query::SearchParams;
use crate::routes::Route;

const BROWSE_CARDS: [(ItemType, &str); 4] = [
    (ItemType::ExperimentSetReplicate, "Replicate experiment sets, grouped by experiment type and organism."),
    (ItemType::Experiment, "Individual experiments across all sets."),
    (ItemType::File, "Raw and processed files, excluding deleted ones."),
    (ItemType::Biosample, "Biosamples and the biosources they come from."),
];

/// Home page
#[component]
pub fn HomePage() -> Element {
    rsx! {
        Title { "Data Portal - Home" }
        div {
            id: "x-home-container",
            style: "display: grid; grid-template-rows: auto auto 1fr; row-gap: 24px; height: 100%; padding: 32px 48px; background: #EEF1F5; overflow-y: auto;",

            h1 {
                style: "margin: 0; font-size: 36px; font-weight: 400; color: #1C212D;",
                "Browse the data portal"
            }
            TextSearchInput {}

            div {
                id: "x-home-browse-cards",
                style: "display: grid; grid-template-columns: repeat(auto-fill, minmax(280px, 1fr)); gap: 16px; align-content: start;",
                for (item_type, description) in BROWSE_CARDS {
                    BrowseCard { key: "{item_type}", item_type, description }
                }
            }
        }
    }
}

#[component]
fn BrowseCard(item_type: ItemType, description: String) -> Element {
    rsx! {
        Link {
            to: Route::browse(&item_type),
            div {
                style: "height: 100%; padding: 18px; border-radius: 12px; border-left: 6px solid #4F46E5; background: white; color: #1C212D;",
                h2 { style: "margin: 0 0 8px 0; font-size: 21px; font-weight: 500;", "{item_type.display_name()}" }
                p { style: "margin: 0; font-size: 15px; color: rgba(28, 33, 45, 0.7);", "{description}" }
            }
        }
    }
}

#[component]
fn TextSearchInput() -> Element {
    let nav = navigator();
    let mut text = use_signal(String::new);
    let submit = move || {
        let text = text.read().trim().to_string();
        let params = SearchParams {
            text_query: (!text.is_empty()).then_some(text),
            ..ItemType::ExperimentSetReplicate.baseline_params()
        };
        nav.push(Route::search_page(params));
    };
    rsx! {
        form {
            style: "display: flex; align-items: center; gap: 8px; max-width: 560px; padding: 8px 12px; border-radius: 8px; border: 1px solid #D1D5DB; background: white;",
            onsubmit: move |e| {
                e.prevent_default();
                submit();
            },
            Icon { icon: MdSearch, style: "width: 20px; height: 20px; color: #6B7280;" }
            input {
                r#type: "search",
                placeholder: "Search all experiment sets",
                style: "flex: 1; border: none; outline: none; font-size: 15px;",
                value: "{text}",
                oninput: move |e| text.set(e.value()),
            }
        }
    }
}
