//! Error boundaries for rendering failures.
//!
//! A failed search request is not a rendering failure: it is kept in the
//! session and shown by the fetch error banner. These boundaries only catch
//! errors thrown while rendering, such as a failed server function call.

use dioxus::prelude::*;

use crate::routes::Route;

#[component]
pub fn GlobalErrorBoundary(boundary_name: ReadSignal<String>, children: Element) -> Element {
    rsx! {
        ErrorBoundary {
            handle_error: move |err: ErrorContext| {
                rsx! {
                    div {
                        style: "display: flex; flex-direction: column; gap: 12px; margin: 24px;",
                        h1 {
                            style: "color: darkred; font-size: 34px; margin: 0;",
                            "Something went wrong"
                        }
                        p {
                            style: "color: rgba(0,0,0,0.6); font-size: 15px; margin: 0;",
                            "Caught by: {boundary_name}"
                        }
                        a {
                            href: "/",
                            style: "color: #4F46E5; font-size: 18px;",
                            "Return to Home Page"
                        }
                        pre {
                            style: "color: black; border: 1px solid #FCA5A5; padding: 10px; border-radius: 5px; text-wrap: auto;",
                            "{err:#?}"
                        }
                    }
                }
            },
            children
        }
    }
}

#[component]
pub fn ComponentErrorBoundary(children: Element) -> Element {
    rsx! {
        ErrorBoundary {
            handle_error: |err: ErrorContext| {
                let error_txt = match err.error() {
                    Some(e) => format!("{:#?}", e.0),
                    None => "Unknown error".to_string(),
                };
                rsx! {
                    ComponentErrorDisplay {
                        error_txt,
                        button {
                            style: "color: #4F46E5; font-size: 18px; border: 1px solid #4F46E5; background: white; padding: 6px 12px; border-radius: 8px; cursor: pointer;",
                            onclick: move |_| {
                                err.clear_errors();
                            },
                            "Try Again"
                        }
                        Link {
                            to: Route::HomePage {},
                            "Start a new search"
                        }
                    }
                }
            },
            div {
                width: "100%",
                height: "100%",
                {children}
            }
        }
    }
}

#[component]
pub fn ComponentErrorDisplay(error_txt: ReadSignal<String>, children: Element) -> Element {
    rsx! {
        div {
            width: "100%",
            height: "100%",
            display: "flex",
            flex_direction: "column",
            align_items: "center",
            justify_content: "center",
            gap: "10px",

            h1 {
                style: "color: darkred; font-size: 26px; margin: 0;",
                "Could not load this part of the page",
            }

            pre {
                style: "color: darkred; border: 1px solid #FCA5A5; padding: 10px; border-radius: 5px; text-wrap: auto; max-width: 500px; max-height: 400px; overflow-y: auto;",
                "{error_txt}"
            }

            {children}
        }
    }
}
