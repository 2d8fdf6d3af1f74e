use dioxus::prelude::*;

use crate::components::error_boundary::ComponentErrorBoundary;

/// Suspense plus error boundary around a child that waits on a resource.
#[component]
pub fn SuspendWrapper(#[props(default = "Loading...".to_string())] loading_label: String, children: Element) -> Element {
    rsx! {
        SuspenseBoundary {
            fallback: move |_: SuspenseContext| rsx! {
                div {
                    style: "width: 100%; height: 100%; display: flex; align-items: center; justify-content: center;",
                    LoadingIndicator { label: loading_label.clone() }
                }
            },
            ComponentErrorBoundary {
                children
            }
        }
    }
}

#[component]
pub fn LoadingIndicator(#[props(default = "Loading...".to_string())] label: String) -> Element {
    rsx! {
        div {
            style: "color: rgba(28, 33, 45, 0.7); font-size: 17px; border: 1px solid #D1D5DB; background: white; padding: 8px 16px; border-radius: 8px;",
            "{label}"
        }
    }
}
