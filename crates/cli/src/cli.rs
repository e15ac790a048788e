//! Command-line surface.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use stocktake_inventory::ItemCategory;

/// Bulk stock reconciliation against the ERP inventory store.
#[derive(Parser, Debug)]
#[command(name = "stocktake")]
#[command(about = "Stock count templates, reconciliation and bulk updates")]
#[command(version)]
pub struct Cli {
    /// Base URL of the ERP API
    #[arg(long, env = "STOCKTAKE_API_URL", default_value = "http://localhost:8080")]
    pub api_url: String,

    /// Bearer token for the ERP API
    #[arg(long, env = "STOCKTAKE_API_TOKEN", hide_env_values = true)]
    pub api_token: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate a stock count template pre-filled with current quantities
    Template {
        /// Which catalog to export
        #[arg(long, value_enum)]
        category: CategoryArg,

        /// Directory the template is written into
        #[arg(long, default_value = ".")]
        out: PathBuf,
    },

    /// Parse and reconcile an edited template without changing anything
    Check {
        /// The edited CSV file
        file: PathBuf,

        /// Which catalog the file was generated from
        #[arg(long, value_enum)]
        category: CategoryArg,
    },

    /// Reconcile an edited template and push the confirmed updates
    Apply {
        /// The edited CSV file
        file: PathBuf,

        /// Which catalog the file was generated from
        #[arg(long, value_enum)]
        category: CategoryArg,

        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

/// CLI-facing catalog names.
#[derive(ValueEnum, Debug, Copy, Clone, PartialEq, Eq)]
pub enum CategoryArg {
    RawMaterials,
    FinishedGoods,
}

impl From<CategoryArg> for ItemCategory {
    fn from(value: CategoryArg) -> Self {
        match value {
            CategoryArg::RawMaterials => ItemCategory::RawMaterial,
            CategoryArg::FinishedGoods => ItemCategory::FinishedGood,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_template_invocation() {
        let cli = Cli::try_parse_from([
            "stocktake",
            "--api-url",
            "http://erp.local",
            "template",
            "--category",
            "raw-materials",
            "--out",
            "/tmp/exports",
        ])
        .unwrap();

        assert_eq!(cli.api_url, "http://erp.local");
        match cli.command {
            Command::Template { category, out } => {
                assert_eq!(category, CategoryArg::RawMaterials);
                assert_eq!(out, PathBuf::from("/tmp/exports"));
            }
            other => panic!("Expected the template command, got {other:?}"),
        }
    }

    #[test]
    fn parses_an_apply_invocation_with_yes() {
        let cli = Cli::try_parse_from([
            "stocktake",
            "apply",
            "counts.csv",
            "--category",
            "finished-goods",
            "--yes",
        ])
        .unwrap();

        match cli.command {
            Command::Apply {
                file,
                category,
                yes,
            } => {
                assert_eq!(file, PathBuf::from("counts.csv"));
                assert_eq!(category, CategoryArg::FinishedGoods);
                assert!(yes);
            }
            other => panic!("Expected the apply command, got {other:?}"),
        }
    }

    #[test]
    fn a_subcommand_is_required() {
        assert!(Cli::try_parse_from(["stocktake"]).is_err());
    }
}
