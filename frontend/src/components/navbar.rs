//! Side navigation: home plus one entry per browsable item type.

use dioxus::prelude::*;
use dioxus_free_icons::icons::md_action_icons::MdHome;
use dioxus_free_icons::Icon;

use common::item_type::ItemType;
use crate::components::error_boundary::GlobalErrorBoundary;
use crate::routes::Route;

const NAV_TYPES: [(ItemType, &str); 4] = [
    (ItemType::ExperimentSetReplicate, "Sets"),
    (ItemType::Experiment, "Exps"),
    (ItemType::File, "Files"),
    (ItemType::Biosample, "Bios"),
];

#[component]
pub fn Navbar() -> Element {
    let route = use_route::<Route>();
    let active_type = match &route {
        Route::SearchPage { query } => query.0.type_name().map(ItemType::from),
        _ => None,
    };

    rsx! {
        div {
            id: "x-nav-container",
            style: "display: flex; flex-direction: row; width: 100%; height: 100%;",

            nav {
                id: "x-nav-sidebar",
                style: "
                    display: flex;
                    flex-direction: column;
                    align-items: center;
                    gap: 18px;
                    width: 70px;
                    height: 100%;
                    background-color: #1C212D;
                    padding: 16px 6px;
                ",
                Link {
                    to: Route::HomePage {},
                    span {
                        title: "Home",
                        style: "color: white;",
                        Icon { icon: MdHome, style: "width: 26px; height: 26px;" }
                    }
                }
                for (item_type, short) in NAV_TYPES {
                    NavTypeLink {
                        key: "{item_type}",
                        active: active_type.as_ref() == Some(&item_type),
                        item_type,
                        short,
                    }
                }
            }

            div {
                id: "x-page-container",
                style: "flex-grow: 1; min-width: 100px;",
                GlobalErrorBoundary {
                    boundary_name: "Navbar".to_string(),
                    Outlet::<Route> {}
                }
            }
        }
    }
}

#[component]
fn NavTypeLink(item_type: ItemType, short: &'static str, active: bool) -> Element {
    let background = if active { "#4F46E5" } else { "transparent" };
    rsx! {
        Link {
            to: Route::browse(&item_type),
            div {
                title: "{item_type.display_name()}",
                style: "
                    color: white;
                    font-size: 12px;
                    text-align: center;
                    width: 54px;
                    padding: 6px 0;
                    border-radius: 8px;
                    background: {background};
                ",
                "{short}"
            }
        }
    }
}
