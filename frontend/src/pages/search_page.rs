use dioxus::{logger::tracing, prelude::*};

use common::{
    config::ChartConfig,
    error::FetchError,
    item_type::ItemType,
    reducer::FilterAction,
    search_query::{SearchParams, SortSpec},
    search_result::FetchedPage,
    session::{FetchRequest, SearchSession},
};
use crate::{
    api::search_api::{chart_config, fetch_search_page},
    components::{
        error_boundary::ComponentErrorDisplay,
        search_components::{
            aggregation_chart::AggregationChart, fetch_error_banner::FetchErrorBanner, search_facets::FacetPanelList,
            search_input_top_bar::SearchInputTopBar, search_panel_left_view::SearchResultsPanel,
            search_result_list_controls::SearchResultListControls,
        },
        suspend_boundary::SuspendWrapper,
    },
    data_definitions::url_param::SearchUrl,
    routes::Route,
};

/// Everything the search view's components need: the session and the ways to change it.
#[derive(Clone, Copy)]
pub struct SearchSessionState {
    pub session: ReadSignal<SearchSession>,
    pub dispatch: Callback<FilterAction>,
    pub set_sort: Callback<Option<SortSpec>>,
    pub set_text_query: Callback<Option<String>>,
    pub load_more: Callback<()>,
    pub retry: Callback<()>,
}

/// Browse page
#[component]
pub fn SearchPage(query: SearchUrl) -> Element {
    let title = query
        .0
        .type_name()
        .map(|t| ItemType::from(t).display_name().to_string())
        .unwrap_or_else(|| "Search".to_string());

    rsx! {
        Title { "Browse: {title}" }
        SuspendWrapper {
            SearchPageLoader { params: query.0.clone() }
        }
    }
}

#[component]
fn SearchPageLoader(params: ReadSignal<SearchParams>) -> Element {
    let chart = use_resource(chart_config).suspend()?.cloned();
    let chart = match chart {
        Err(e) => return rsx! {ComponentErrorDisplay { error_txt: format!("{:#?}", e) }},
        Ok(c) => c,
    };
    rsx! {
        SearchPageRootComponent { params, chart }
    }
}

#[component]
fn SearchPageRootComponent(params: ReadSignal<SearchParams>, chart: ChartConfig) -> Element {
    let mut session = use_signal(move || SearchSession::new(params.peek().clone(), chart.clone()));

    // every request goes through here; the session decides on arrival whether it still counts
    let run = use_callback(move |request: Option<FetchRequest>| {
        let Some(request) = request else { return };
        spawn(async move {
            let ticket = request.ticket;
            let (result, fetched_at_ms) = match fetch_search_page(request).await {
                Ok(FetchedPage { result, fetched_at_ms }) => (result, fetched_at_ms),
                Err(e) => (Err(FetchError::Network(e.to_string())), 0),
            };
            let outcome = session.write().complete(ticket, result, fetched_at_ms);
            tracing::debug!("search request seq={} page={}: {outcome:?}", ticket.seq, ticket.page_index);
        });
    });

    // the URL is the source of truth: back/forward and pasted links land here
    use_effect(move || {
        let params = params.read().clone();
        let request = {
            let mut session = session.write();
            match session.sync_params(params) {
                Some(request) => Some(request),
                None if session.epoch() == 0 => Some(session.refresh()),
                None => None,
            }
        };
        run(request);
    });

    // after a local change, publish the new canonical URL; the effect above then finds nothing to do
    let push_url = move || {
        let params = session.peek().params();
        navigator().push(Route::search_page(params));
    };

    let dispatch = Callback::new(move |action: FilterAction| {
        let request = session.write().dispatch(&action);
        if request.is_some() {
            push_url();
        }
        run(request);
    });
    let set_sort = Callback::new(move |sort: Option<SortSpec>| {
        let request = session.write().set_sort(sort);
        if request.is_some() {
            push_url();
        }
        run(request);
    });
    let set_text_query = Callback::new(move |text_query: Option<String>| {
        let request = session.write().set_text_query(text_query);
        if request.is_some() {
            push_url();
        }
        run(request);
    });
    let load_more = Callback::new(move |_: ()| {
        let request = session.write().load_more();
        run(request);
    });
    let retry = Callback::new(move |_: ()| {
        let request = session.write().retry();
        run(request);
    });

    use_context_provider(move || SearchSessionState {
        session: session.into(),
        dispatch,
        set_sort,
        set_text_query,
        load_more,
        retry,
    });

    rsx! {
        div {
            id: "x-search-page-root-component",
            style: r#"
                height: 100%;
                width: 100%;
                display: flex;
                flex-direction: column;
            "#,
            div {
                id: "x-search-input-top-bar",
                style: "
                    border-bottom: 1px solid rgb(164, 164, 164);
                    background-color: #F8FCFF;
                    flex-shrink: 0;
                    display: flex;
                    flex-direction: row;
                    align-items: center;
                    height: 76px;
                    width: 100%;
                ",

                SearchInputTopBar {}
            }

            FetchErrorBanner {}

            div {
                id: "x-search-results-bottom-space",
                style: r#"
                    width: 100%;
                    display: flex;
                    flex-direction: row;
                    flex-grow: 1;
                    min-height: 0;
                "#,
                div {
                    id: "x-search-facets-left-panel",
                    style: "
                        height: 100%;
                        background-color: #ECEEF2;
                        min-width: 280px;
                        width: 25%;
                        overflow-y: auto;
                    ",
                    FacetPanelList {}
                }
                div {
                    id: "x-search-results-right-panel",
                    style: "
                        height: 100%;
                        flex-grow: 1;
                        min-width: 400px;
                        display: flex;
                        flex-direction: column;
                    ",
                    SearchResultListControls {}
                    AggregationChart {}
                    SearchResultsPanel {}
                }
            }
        }
    }
}
