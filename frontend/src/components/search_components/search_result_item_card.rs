//! One search hit.

use dioxus::prelude::*;
use common::search_result::ResultRow;

/// Fields shown under the title when the row has them.
const DETAIL_FIELDS: [(&str, &str); 4] = [
    ("Lab", "lab.display_title"),
    ("Status", "status"),
    ("Accession", "accession"),
    ("Created", "date_created"),
];

#[component]
pub fn SearchResultItemCard(row: ReadSignal<ResultRow>, position: usize) -> Element {
    let row = row.read().clone();
    let type_label = row.item_type().map(|t| t.display_name().to_string()).unwrap_or_default();
    let details = DETAIL_FIELDS
        .iter()
        .filter_map(|(label, path)| row.field_str(path).map(|value| (*label, value.to_string())))
        .collect::<Vec<_>>();

    rsx! {
        div {
            style: "
                display: flex;
                flex-direction: column;
                gap: 6px;
                background: white;
                border: 1px solid #AAAAAA33;
                border-radius: 8px;
                padding: 12px 16px;
                margin: 8px 0;
            ",
            div {
                style: "
                    display: flex;
                    flex-direction: row;
                    align-items: center;
                    gap: 12px;
                ",
                span {
                    style: "font-size: 17px; font-weight: 200; color: rgba(0, 0, 0, 0.5);",
                    "{position}."
                }
                span { style: "font-size: 17px; font-weight: 500;", "{row.title()}" }
                div { style: "flex: 1 1 auto;" }
                span { style: "font-size: 13px; color: #4F46E5;", "{type_label}" }
            }
            div {
                style: "display: flex; flex-direction: row; flex-wrap: wrap; gap: 16px; font-size: 13px; color: rgba(28, 33, 45, 0.8);",
                for (label, value) in details {
                    span { key: "{label}", b { "{label}: " } "{value}" }
                }
                span { style: "color: rgba(28, 33, 45, 0.5);", "{row.row_id}" }
            }
        }
    }
}
