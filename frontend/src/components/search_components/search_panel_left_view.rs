//! Loaded result pages with the "load more" affordance.

use dioxus::prelude::*;

use crate::{
    components::{search_components::search_result_item_card::SearchResultItemCard, suspend_boundary::LoadingIndicator},
    pages::search_page::SearchSessionState,
};

#[component]
pub fn SearchResultsPanel() -> Element {
    let state = use_context::<SearchSessionState>();
    let session = state.session;
    let load_more = state.load_more;
    let rows = use_memo(move || session.read().rows().cloned().collect::<Vec<_>>());
    let is_loading = use_memo(move || session.read().is_loading());
    let has_more = use_memo(move || session.read().has_more());

    rsx! {
        ul {
            id: "x-search-panel-results-wrapper",
            style: "
                width: 100%;
                flex-grow: 1;
                min-height: 0;
                overflow-y: auto;
                padding: 0 8px;
            ",
            for (index, row) in rows().into_iter().enumerate() {
                li {
                    key: "{row.row_id}",
                    SearchResultItemCard { row, position: index + 1 }
                }
            }
            li {
                style: "display: flex; justify-content: center; padding: 12px;",
                if is_loading() {
                    LoadingIndicator {}
                } else if has_more() {
                    button {
                        style: "
                            height: 36px;
                            padding: 0 16px;
                            font-size: 15px;
                            border-radius: 8px;
                            background: white;
                            color: #111827;
                            border: 1px solid #D1D5DB;
                            cursor: pointer;
                        ",
                        onclick: move |_| load_more(()),
                        "Load more"
                    }
                }
            }
        }
    }
}
