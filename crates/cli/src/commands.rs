//! Subcommand implementations.

use std::io::{self, Write};
use std::path::Path;

use anyhow::{bail, Context};

use stocktake_commit::{CommitError, CommitOutcome, Confirmation, PendingCommit};
use stocktake_infra::{DirExporter, FileExporter, HttpItemSource, HttpStockWriter, StaticToken};
use stocktake_inventory::{ItemCategory, ItemSource};
use stocktake_reconcile::{
    parse_upload, reconcile, template, ReconcilePolicy, RowError, StockAdjustment,
};

use crate::report;

/// Shared collaborators for all subcommands.
pub struct App {
    pub items: HttpItemSource<StaticToken>,
    pub writer: HttpStockWriter<StaticToken>,
}

pub async fn export_template(app: &App, category: ItemCategory, out: &Path) -> anyhow::Result<()> {
    let snapshot = app
        .items
        .fetch(category)
        .await
        .context("failed to fetch the item catalog")?;

    let rendered = template::render(snapshot.items(), category);
    let exporter = DirExporter::new(out);
    let path = exporter.export(&rendered.filename, &rendered.contents)?;

    println!("Wrote {} item(s) to {}", snapshot.len(), path.display());
    Ok(())
}

pub async fn check_upload(app: &App, file: &Path, category: ItemCategory) -> anyhow::Result<()> {
    let review = load_review(app, file, category).await?;
    print!("{}", report::render(&review.adjustments, &review.row_errors));
    if !review.adjustments.is_empty() {
        println!("Run `stocktake apply` to push these changes.");
    }
    Ok(())
}

pub async fn apply_upload(
    app: &App,
    file: &Path,
    category: ItemCategory,
    yes: bool,
) -> anyhow::Result<()> {
    let review = load_review(app, file, category).await?;
    print!("{}", report::render(&review.adjustments, &review.row_errors));

    if review.adjustments.is_empty() {
        return Ok(());
    }

    let mut pending = PendingCommit::new(review.adjustments)?;

    if !yes {
        let prompt = format!(
            "Apply {} update(s) ({} warning(s))? [y/N] ",
            pending.adjustments().len(),
            pending.warning_count()
        );
        if !confirm(&prompt)? {
            pending.resolve(Confirmation::Declined, &app.writer).await?;
            println!("Cancelled; no stock was changed.");
            return Ok(());
        }
    }

    loop {
        match pending.resolve(Confirmation::Approved, &app.writer).await {
            Ok(CommitOutcome::Committed(receipt)) => {
                println!("Applied {} update(s).", receipt.applied);
                return Ok(());
            }
            Ok(CommitOutcome::Cancelled) => return Ok(()),
            Err(CommitError::Write(error)) => {
                // The batch is still held in memory; retrying needs no
                // re-upload.
                eprintln!("Commit failed: {error}");
                if yes || !confirm("Retry with the same batch? [y/N] ")? {
                    bail!("the stock update was not applied");
                }
            }
            Err(error) => return Err(error.into()),
        }
    }
}

struct Review {
    adjustments: Vec<StockAdjustment>,
    row_errors: Vec<RowError>,
}

async fn load_review(app: &App, file: &Path, category: ItemCategory) -> anyhow::Result<Review> {
    ensure_csv(file)?;

    let contents = tokio::fs::read_to_string(file)
        .await
        .with_context(|| format!("failed to read {}", file.display()))?;

    let snapshot = app
        .items
        .fetch(category)
        .await
        .context("failed to fetch the item catalog")?;

    let outcome = parse_upload(&contents, &snapshot)?;
    let adjustments = reconcile(&outcome.rows, &snapshot, &ReconcilePolicy::default())?;

    Ok(Review {
        adjustments,
        row_errors: outcome.row_errors,
    })
}

fn ensure_csv(file: &Path) -> anyhow::Result<()> {
    match file.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("csv") => Ok(()),
        Some(ext) if ext.eq_ignore_ascii_case("xlsx") => bail!(
            "{} is an Excel workbook; save it as CSV and upload that instead",
            file.display()
        ),
        _ => bail!("unsupported file type (expected .csv): {}", file.display()),
    }
}

fn confirm(prompt: &str) -> anyhow::Result<bool> {
    print!("{prompt}");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin()
        .read_line(&mut line)
        .context("failed to read from stdin")?;

    let answer = line.trim().to_lowercase();
    Ok(answer == "y" || answer == "yes")
}
