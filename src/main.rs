//! choice-parley - two agents negotiating over an item catalog
//!
//! Loads configuration and a catalog, gives each agent its own criterion
//! ranking, lets the first agent propose an item and prints the dialogue
//! until it closes or the step budget runs out.

use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;

use choice_parley::adapters::InMemoryMessageBus;
use choice_parley::application::Negotiation;
use choice_parley::config::{AppConfig, LoggingConfig};
use choice_parley::domain::foundation::AgentId;
use choice_parley::domain::negotiation::{Agent, NegotiationEngine};
use choice_parley::domain::preferences::{Catalog, Preferences};
use clap::Parser;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "choice-parley")]
#[command(about = "Argumentation-based negotiation between two agents")]
#[command(version)]
struct Cli {
    /// Catalog file, overriding CHOICE_PARLEY__CATALOG__PATH
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// RNG seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Maximum number of bus ticks
    #[arg(long)]
    max_steps: Option<u32>,

    /// Give up instead of arguing when asked why
    #[arg(long)]
    no_argue: bool,

    /// Item to open with; random when absent
    #[arg(long)]
    item: Option<String>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let mut config = AppConfig::load()?;
    if let Some(path) = cli.catalog {
        config.catalog.path = path;
    }
    if let Some(seed) = cli.seed {
        config.negotiation.seed = Some(seed);
    }
    if let Some(max_steps) = cli.max_steps {
        config.simulation.max_steps = max_steps;
    }
    if cli.no_argue {
        config.negotiation.respond_with_argument = false;
    }
    config.validate()?;

    init_tracing(&config.logging);

    let catalog = Arc::new(config.catalog.source()?.load()?);
    info!(
        path = %config.catalog.path.display(),
        items = catalog.len(),
        criteria = catalog.criteria().len(),
        "catalog ready"
    );

    let mut rng = match config.negotiation.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let first = AgentId::new(config.simulation.first_agent.trim())?;
    let second = AgentId::new(config.simulation.second_agent.trim())?;
    let (first_ranking, second_ranking) = config.simulation.rankings(catalog.criteria())?;

    let engine = NegotiationEngine::new(config.negotiation.policy(), StdRng::from_rng(&mut rng)?);
    let mut negotiation = Negotiation::new(InMemoryMessageBus::new(), engine);
    negotiation.add_agent(Agent::new(
        first.clone(),
        Preferences::new(first_ranking, catalog.clone())?,
    ))?;
    negotiation.add_agent(Agent::new(
        second.clone(),
        Preferences::new(second_ranking, catalog.clone())?,
    ))?;

    let opening = match cli.item {
        Some(name) => name,
        None => pick_item(&catalog, &mut rng)?,
    };
    negotiation.propose(&first, &second, &opening)?;

    let mut printed = 0;
    for _ in 0..config.simulation.max_steps {
        negotiation.step()?;
        for message in &negotiation.transcript()[printed..] {
            println!("{}", message);
        }
        printed = negotiation.transcript().len();
        if negotiation.is_terminal() {
            break;
        }
    }

    match negotiation.outcome() {
        Some(outcome) if config.logging.json => println!("{}", serde_json::to_string(outcome)?),
        Some(outcome) => println!("Outcome: {}", outcome),
        None => {
            error!(steps = negotiation.steps(), "step budget exhausted before the dialogue closed");
            println!("Outcome: undecided after {} steps", negotiation.steps());
        }
    }
    Ok(())
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(logging.level.to_ascii_lowercase()));
    let registry = tracing_subscriber::registry().with(filter);

    if logging.json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry.with(fmt::layer().with_writer(std::io::stderr)).init();
    }
}

fn pick_item(catalog: &Catalog, rng: &mut StdRng) -> Result<String, Box<dyn Error>> {
    catalog
        .items()
        .choose(rng)
        .map(|item| item.name().to_string())
        .ok_or_else(|| "catalog has no items".into())
}
