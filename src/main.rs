use std::{io::Write, sync::Arc};

use anyhow::Result;
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cinerec::{
    ui::{input::HELP, render, Command},
    Config, HttpRecommendationProvider, SearchController,
};

#[derive(Parser, Debug)]
#[command(name = "cinerec")]
#[command(about = "Find movie recommendations from a title", long_about = None)]
struct Args {
    /// Base URL of the recommendation service (overrides RECOMMENDER_URL)
    #[arg(long)]
    url: Option<String>,

    /// Search once for this title, print the outcome and exit
    #[arg(short, long)]
    title: Option<String>,

    /// Check that the service answers and exit
    #[arg(long)]
    check: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cinerec=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();
    let config = Config::from_env()?.with_url(args.url);
    let provider = HttpRecommendationProvider::new(&config)?;
    tracing::debug!(url = %provider.api_url(), "Using recommendation service");

    let mut controller = SearchController::new(Arc::new(provider));

    if args.check {
        let message = controller.check_backend().await?;
        println!("{}", message);
        return Ok(());
    }

    if let Some(title) = args.title {
        controller.search(&title).await;
        print!("{}", render(controller.state()));
        return Ok(());
    }

    run_prompt(&mut controller).await
}

/// Read commands from stdin until EOF or `/quit`
async fn run_prompt(controller: &mut SearchController) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("{}", HELP);

    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        let command = match Command::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                println!("{}", e);
                continue;
            }
        };

        match command {
            Command::Search(title) => {
                controller.search(&title).await;
            }
            Command::Lookup(title) => {
                controller.lookup(&title).await;
            }
            Command::Select(position) => {
                let Some(id) = controller.state().candidate_at(position).map(|c| c.id) else {
                    println!("no match numbered {}", position);
                    continue;
                };
                controller.select_candidate(id).await;
            }
            Command::Help => {
                println!("{}", HELP);
                continue;
            }
            Command::Quit => break,
        }

        print!("{}", render(controller.state()));
    }

    Ok(())
}
