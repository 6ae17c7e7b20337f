mod cli;
mod config;
mod demo;
mod render;

use anyhow::Context;
use clap::Parser;
use encore_core::{BoxOffice, PurchaseError};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::Cli;
use crate::config::Config;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "encore_cli=info,encore_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let mut config = Config::load(&cli.config_dir)
        .with_context(|| format!("failed to load config from {}", cli.config_dir.display()))?;

    // CLI flags win over files and environment
    if let Some(tickets) = cli.tickets {
        config.event.total_tickets = tickets;
    }
    if let Some(capacity) = cli.capacity {
        config.event.venue_capacity = capacity;
    }
    if let Some(rate) = cli.success_rate {
        config.simulation.success_rate = rate;
    }
    if let Some(seed) = cli.seed {
        config.simulation.seed = Some(seed);
    }

    anyhow::ensure!(
        (0.0..=1.0).contains(&config.simulation.success_rate),
        "simulation.success_rate must be within [0, 1], got {}",
        config.simulation.success_rate
    );
    anyhow::ensure!(
        !config.simulation.payment_methods.is_empty(),
        "simulation.payment_methods must not be empty"
    );
    anyhow::ensure!(
        config.event.price_min <= config.event.price_max,
        "event.price_min must not exceed event.price_max"
    );

    let mut rng = match config.simulation.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let price = match cli.price {
        Some(price) => Decimal::from(price),
        None => Decimal::from(rng.gen_range(config.event.price_min..=config.event.price_max)),
    };

    tracing::info!(
        tickets = config.event.total_tickets,
        %price,
        capacity = config.event.venue_capacity,
        "encore ticketing simulation starting"
    );

    let mut office = BoxOffice::with_rng(
        config.event.total_tickets,
        price,
        config.event.venue_capacity,
        StdRng::seed_from_u64(rng.gen()),
    )
    .with_success_rate(config.simulation.success_rate);

    println!("{}", render::render_availability(&office.availability()));

    let methods = &config.simulation.payment_methods;
    for user in demo::demo_users() {
        let method = methods[rng.gen_range(0..methods.len())].as_str();
        match office.buy_ticket(&user, method) {
            Ok(ticket) => {
                tracing::info!(user = %user.name, ticket = ticket.id, method, "purchase complete");
            }
            Err(PurchaseError::SoldOut) => {
                tracing::warn!(user = %user.name, "no tickets left");
            }
            Err(PurchaseError::PaymentDeclined { payment }) => {
                tracing::warn!(user = %user.name, amount = %payment.amount, method, "payment declined");
            }
        }
    }

    office.track_attendance();

    let report = office.report();
    if cli.json {
        println!("{}", render::render_report_json(&report)?);
    } else {
        println!("{}", render::render_report(&report));
    }

    Ok(())
}
