mod config;

extern crate dotenv;

use stash_common::telemetry::setup_telemetry;
use stash_model::{
    CachedTransport, CurrencyRates, DocumentCache, EventState, HttpTransport, Model, ModelEvent,
    Stash,
};
use tracing::info;

use crate::config::Configuration;

fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    setup_telemetry("stash-report")?;

    let config = Configuration::from_env()?;
    tracing::info!("Chosen configuration: {:#?}", config);

    let cache = DocumentCache::new(config.account_name.clone());
    let http = HttpTransport::new(config.http.clone())?;
    let transport = CachedTransport::new(http, cache.clone());

    let mut model = Model::new(transport, cache);
    model.subscribe(log_progress);

    model.authenticate(&config.account_name, config.session_id, false)?;

    let stash = model.get_full_stash(&config.league)?;
    print_report(&stash, &CurrencyRates::default());

    Ok(())
}

fn log_progress(event: &ModelEvent) {
    match event {
        ModelEvent::Authenticating {
            identity,
            state: EventState::Before,
        } => info!("Authenticating {}", identity),
        ModelEvent::StashLoading {
            index,
            number_of_tabs: Some(number_of_tabs),
            state: EventState::After,
        } => info!("Loaded tab {}/{}", index + 1, number_of_tabs),
        ModelEvent::ImageLoading {
            name,
            state: EventState::After,
        } => info!("Loaded image of {}", name),
        _ => {}
    }
}

fn print_report(stash: &Stash, rates: &CurrencyRates) {
    println!(
        "{} items in {} tabs",
        stash.items().len(),
        stash.number_of_tabs()
    );

    println!("\nUsed space");
    for (inventory_id, percentage) in stash.calculate_free_space() {
        println!("  {:<10} {:>6.2}%", inventory_id, percentage);
    }

    let duplicates = stash.duplicate_rares();
    if !duplicates.is_empty() {
        println!("\nDuplicate rares");
        for (name, gear) in duplicates {
            println!("  {} x{}", name, gear.len());
        }
    }

    let mut distribution: Vec<_> = stash.currency_value_distribution(rates).into_iter().collect();
    distribution.sort_by(|a, b| b.1.total_cmp(&a.1));

    println!(
        "\nCurrency worth {:.1} {}",
        stash.total_currency_value(rates),
        rates.base()
    );
    for (orb, value) in distribution {
        println!("  {:<24} {:>10.1}", orb.to_string(), value);
    }
}
