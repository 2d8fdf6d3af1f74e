//! Non-blocking notice for a failed search request.

use dioxus::prelude::*;
use common::error::FetchError;
use dioxus_free_icons::{Icon, icons::{md_alert_icons::MdErrorOutline, md_navigation_icons::MdRefresh}};

use crate::pages::search_page::SearchSessionState;

#[component]
pub fn FetchErrorBanner() -> Element {
    let state = use_context::<SearchSessionState>();
    let session = state.session;
    let retry = state.retry;
    let last_error = use_memo(move || session.read().last_error().cloned());

    let Some(error) = last_error() else {
        return rsx! {};
    };
    let message = match &error {
        FetchError::Timeout { .. } => "The search service took too long to answer.".to_string(),
        FetchError::Status { status, .. } if *status >= 500 => format!("The search service failed ({status})."),
        FetchError::Status { status, .. } => format!("The search service rejected the request ({status})."),
        FetchError::Network(_) => "The search service could not be reached.".to_string(),
        FetchError::Decode(_) => "The search service sent a response we could not read.".to_string(),
    };

    rsx! {
        div {
            id: "x-fetch-error-banner",
            style: "
                display: flex;
                flex-direction: row;
                align-items: center;
                gap: 10px;
                padding: 8px 16px;
                background-color: #FEF2F2;
                border-bottom: 1px solid #FCA5A5;
                color: darkred;
                font-size: 15px;
            ",
            Icon { icon: MdErrorOutline, style: "width: 20px; height: 20px; flex-shrink: 0;" }
            span { title: "{error}", "{message} Showing the last results that loaded." }
            div { style: "flex: 1 1 auto;" }
            button {
                style: "
                    display: flex;
                    align-items: center;
                    gap: 4px;
                    height: 30px;
                    padding: 0 10px;
                    border-radius: 8px;
                    background: white;
                    border: 1px solid #FCA5A5;
                    color: darkred;
                    cursor: pointer;
                ",
                onclick: move |_| retry(()),
                Icon { icon: MdRefresh, style: "width: 18px; height: 18px;" }
                "Retry"
            }
        }
    }
}
