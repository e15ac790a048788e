use std::time::Duration;

use anyhow::Context as _;
use clap::Parser;

use stocktake_infra::{HttpItemSource, HttpStockWriter, StaticToken};

mod cli;
mod commands;
mod report;

use cli::{Cli, Command};
use commands::App;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    stocktake_observability::init();

    let Cli {
        api_url,
        api_token,
        command,
    } = Cli::parse();

    if api_token.is_none() {
        tracing::warn!("STOCKTAKE_API_TOKEN not set; calling the ERP API unauthenticated");
    }
    let tokens = match api_token {
        Some(token) => StaticToken::new(token),
        None => StaticToken::none(),
    };

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(30))
        .build()
        .context("failed to build the HTTP client")?;

    let app = App {
        items: HttpItemSource::new(client.clone(), api_url.clone(), tokens.clone()),
        writer: HttpStockWriter::new(client, api_url, tokens),
    };

    match command {
        Command::Template { category, out } => {
            commands::export_template(&app, category.into(), &out).await
        }
        Command::Check { file, category } => {
            commands::check_upload(&app, &file, category.into()).await
        }
        Command::Apply {
            file,
            category,
            yes,
        } => commands::apply_upload(&app, &file, category.into(), yes).await,
    }
}
