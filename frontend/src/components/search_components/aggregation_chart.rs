//! Stacked bar chart of the aggregation buckets.

use dioxus::prelude::*;
use common::{
    aggregation::{ChartBar, ChartSegment},
    filter::FilterMode,
    reducer::FilterAction,
};

use crate::pages::search_page::SearchSessionState;

const SEGMENT_COLORS: [&str; 7] = ["#1F77B4", "#FF7F0E", "#2CA02C", "#D62728", "#9467BD", "#8C564B", "#7F7F7F"];

#[component]
pub fn AggregationChart() -> Element {
    let session = use_context::<SearchSessionState>().session;
    let bars = use_memo(move || session.read().bars());
    let max_total = use_memo(move || bars.read().iter().map(|b| b.total).max().unwrap_or(0));

    if bars.read().is_empty() {
        return rsx! {};
    }
    rsx! {
        div {
            id: "x-aggregation-chart",
            style: "
                display: flex;
                flex-direction: column;
                gap: 4px;
                padding: 10px 16px;
                max-height: 260px;
                overflow-y: auto;
                border-bottom: 1px solid rgba(0,0,0,0.1);
                background: white;
            ",
            for bar in bars() {
                ChartBarRow { key: "{bar.primary_key}", bar, max_total: max_total() }
            }
        }
    }
}

#[component]
fn ChartBarRow(bar: ReadSignal<ChartBar>, max_total: u64) -> Element {
    let state = use_context::<SearchSessionState>();
    let dispatch = state.dispatch;
    let session = state.session;
    let ChartBar { primary_key, total, selected, segments } = bar.read().clone();
    let label_weight = if selected == Some(FilterMode::Include) { 600 } else { 400 };
    let label_decoration = if selected == Some(FilterMode::Exclude) { "line-through" } else { "none" };
    let bar_width = if max_total == 0 { 0.0 } else { total as f64 * 100.0 / max_total as f64 };

    rsx! {
        div {
            style: "display: flex; flex-direction: row; align-items: center; gap: 8px; font-size: 13px;",
            div {
                style: "
                    width: 220px;
                    flex-shrink: 0;
                    cursor: pointer;
                    font-weight: {label_weight};
                    text-decoration: {label_decoration};
                    overflow: hidden;
                    text-overflow: ellipsis;
                    white-space: nowrap;
                ",
                title: "{primary_key}",
                onclick: move |_| {
                    let field = session.peek().chart_config().primary_field.clone();
                    dispatch(FilterAction::toggle(field, bar.read().primary_key.clone()));
                },
                "{primary_key}"
            }
            div {
                style: "flex: 1 1 auto; display: flex; flex-direction: row;",
                div {
                    style: "display: flex; flex-direction: row; width: {bar_width}%; height: 16px;",
                    for segment in segments {
                        ChartSegmentBlock { key: "{segment.secondary_key}", segment, bar_total: total }
                    }
                }
            }
            div { style: "width: 48px; text-align: right; color: rgba(28, 33, 45, 0.7);", "{total}" }
        }
    }
}

#[component]
fn ChartSegmentBlock(segment: ReadSignal<ChartSegment>, bar_total: u64) -> Element {
    let state = use_context::<SearchSessionState>();
    let dispatch = state.dispatch;
    let session = state.session;
    let ChartSegment { secondary_key, count, selected } = segment.read().clone();
    let color = segment_color(&session.read().chart_config().secondary_order, &secondary_key);
    let width = if bar_total == 0 { 0.0 } else { count as f64 * 100.0 / bar_total as f64 };
    let outline = match selected {
        Some(FilterMode::Include) => "2px solid black",
        Some(FilterMode::Exclude) => "2px dashed darkred",
        None => "none",
    };

    rsx! {
        div {
            class: "x-chart-segment",
            style: "width: {width}%; background: {color}; outline: {outline}; cursor: pointer;",
            title: "{secondary_key}: {count}",
            onclick: move |_| {
                let field = session.peek().chart_config().secondary_field.clone();
                dispatch(FilterAction::toggle(field, segment.read().secondary_key.clone()));
            },
        }
    }
}

/// Listed keys keep their palette slot; anything else is grey.
fn segment_color(order: &[String], key: &str) -> &'static str {
    match order.iter().position(|k| k == key) {
        Some(rank) if rank < SEGMENT_COLORS.len() - 1 => SEGMENT_COLORS[rank],
        _ => SEGMENT_COLORS[SEGMENT_COLORS.len() - 1],
    }
}
