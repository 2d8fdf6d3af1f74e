use clap::Parser;

use backend::{
    api::SearchApiClient,
    config::FetcherConfig,
    driver::SearchDriver,
    fetcher::ResultFetcher,
};
use common::{
    filter::FilterMode,
    item_type::ItemType,
    query_model::{parse_params, serialize_params},
    reducer::FilterAction,
    session::{CompletionOutcome, SearchSession},
};

/// Runs a faceted search against the data portal and prints what the search view would show.
#[derive(Parser)]
#[command(name = "portal-search")]
#[command(version)]
#[command(about = "Faceted search against the data portal's /search/ endpoint", long_about = None)]
struct Cli {
    /// Browse URL query string, e.g. "type=ExperimentSetReplicate&award.project=4DN"
    query: Option<String>,

    /// Start from the default filters of an item type instead of a query string
    #[arg(long = "type", conflicts_with = "query")]
    item_type: Option<String>,

    /// Toggle a facet term before searching ("field=term"); repeatable
    #[arg(long)]
    toggle: Vec<String>,

    /// Pages to load, the first one included
    #[arg(long, default_value_t = 1)]
    pages: u32,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    backend::init_logging()?;
    let cli = Cli::parse();

    let params = match (&cli.query, &cli.item_type) {
        (Some(query), _) => parse_params(query),
        (None, Some(item_type)) => ItemType::from(item_type.as_str()).baseline_params(),
        (None, None) => ItemType::ExperimentSetReplicate.baseline_params(),
    };

    let config = FetcherConfig::from_env();
    let fetcher = ResultFetcher::new(SearchApiClient::new(&config)?, &config);
    let mut session = SearchSession::new(params, config.chart.clone());
    for toggle in &cli.toggle {
        let Some((field, term)) = toggle.split_once('=') else {
            anyhow::bail!("--toggle expects field=term, got {toggle:?}");
        };
        // the session is not driving anything yet, so the request is dropped
        let _ = session.dispatch(&FilterAction::toggle(field, term));
    }
    println!("browse?{}", serialize_params(&session.params()));

    let mut driver = SearchDriver::new(session, fetcher);
    driver.refresh();
    for page in 0..cli.pages {
        for event in driver.settle().await {
            if let CompletionOutcome::Failed(e) = event.outcome {
                anyhow::bail!("page {} failed: {e}", event.ticket.page_index);
            }
        }
        if page + 1 < cli.pages && driver.load_more().is_none() {
            break;
        }
    }

    let session = driver.into_session();
    println!("{} results, {} loaded", session.total_count(), session.pages().row_count());
    for bar in session.bars() {
        println!("  {:<32} {:>6}{}", bar.primary_key, bar.total, mark(bar.selected));
        for segment in &bar.segments {
            println!("    {:<30} {:>6}{}", segment.secondary_key, segment.count, mark(segment.selected));
        }
    }
    for facet in session.facets() {
        println!("[{}]", facet.title);
        for term in &facet.terms {
            println!("  {:<40} {:>6}{}", term.key, term.doc_count, mark(term.selected));
        }
    }
    for (i, row) in session.rows().enumerate() {
        let item_type = row.item_type().map(|t| t.to_string()).unwrap_or_default();
        println!("{:>5}. {} ({item_type}) {}", i + 1, row.title(), row.row_id);
    }
    Ok(())
}

fn mark(selected: Option<FilterMode>) -> &'static str {
    match selected {
        Some(FilterMode::Include) => "  [x]",
        Some(FilterMode::Exclude) => "  [-]",
        None => "",
    }
}
