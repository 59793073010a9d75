//! Command-line entry points.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};

use crate::catalog::TemplateId;
use crate::config::Config;
use crate::logging::{init_tracing, LogMode};
use crate::persist::{FileStore, KeyValueStore, MemoryStore};
use crate::store::Store;

#[derive(Debug, Parser)]
#[command(
    name = "stylecart",
    version,
    about = "Browse, buy and manage subtitle style templates"
)]
pub struct Cli {
    /// Config file (default: ~/.config/stylecart/config.toml)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// State file, overriding the config
    #[arg(long, value_name = "PATH", conflicts_with = "ephemeral")]
    pub state: Option<PathBuf>,

    /// Keep credits and purchases in memory only
    #[arg(long)]
    pub ephemeral: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Open the interactive storefront (default)
    Shop,
    /// List every template with its price and ownership
    Catalog,
    /// Show the credit balance and owned templates
    Status,
    /// Buy templates by id in a single transaction
    Buy {
        #[arg(required = true, value_name = "ID")]
        ids: Vec<u32>,
    },
    /// Forget all purchases and restore the starting balance
    Reset,
}

impl Cli {
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Shop)
    }

    pub fn log_mode(&self) -> LogMode {
        match self.command() {
            Command::Shop => LogMode::Interactive,
            _ => LogMode::Command,
        }
    }

    pub fn load_config(&self) -> anyhow::Result<Config> {
        let path = self.config.clone().unwrap_or_else(Config::config_path);
        Ok(Config::load_from(&path)?)
    }

    /// Open the store against the backend selected by flags and config.
    pub fn open_store(&self, config: &Config) -> anyhow::Result<Store> {
        let catalog = config.catalog()?;
        let backend: Box<dyn KeyValueStore> = if self.ephemeral {
            Box::new(MemoryStore::new())
        } else {
            let path = self.state.clone().unwrap_or_else(|| config.state_path());
            tracing::debug!(path = %path.display(), "Opening state file");
            Box::new(FileStore::open(path)?)
        };
        Ok(Store::open(catalog, backend, config.store.settings()))
    }
}

pub fn run(cli: Cli) -> anyhow::Result<()> {
    init_tracing(cli.log_mode());
    let config = cli.load_config()?;
    let mut store = cli.open_store(&config)?;

    match cli.command() {
        Command::Shop => crate::ui::run(
            store,
            config.ui.tick_rate(),
            config.store.checkout_delay(),
        )
        .context("Terminal UI failed"),
        command => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            execute(&command, &mut store, &mut out)
        }
    }
}

/// Run a one-shot command, writing its report to `out`.
pub fn execute(command: &Command, store: &mut Store, out: &mut impl Write) -> anyhow::Result<()> {
    match command {
        Command::Shop => anyhow::bail!("The storefront needs an interactive terminal"),
        Command::Catalog => print_catalog(store, out)?,
        Command::Status => print_status(store, out)?,
        Command::Buy { ids } => {
            for &id in ids {
                store.add_by_id(TemplateId(id))?;
            }
            let checkout = store.checkout();
            if let Ok(receipt) = &checkout {
                writeln!(
                    out,
                    "Purchase successful! {}. Remaining credits: {}",
                    receipt.names(),
                    receipt.remaining_credits
                )?;
                writeln!(out, "Receipt: {}", receipt.id)?;
            }
            print_warnings(store, out)?;
            checkout?;
        }
        Command::Reset => {
            let reset = store.reset();
            if reset.is_ok() {
                writeln!(out, "Store reset to default state!")?;
            }
            print_warnings(store, out)?;
            reset?;
        }
    }
    Ok(())
}

/// Report storage problems queued by the last operation.
fn print_warnings(store: &mut Store, out: &mut impl Write) -> io::Result<()> {
    for warning in store.take_warnings() {
        writeln!(out, "Warning: {}", warning.message)?;
    }
    Ok(())
}

fn print_catalog(store: &Store, out: &mut impl Write) -> io::Result<()> {
    let name_width = store
        .templates()
        .iter()
        .map(|t| t.name.chars().count())
        .chain(std::iter::once(4))
        .max()
        .unwrap_or(4);
    let tag_width = store
        .templates()
        .iter()
        .map(|t| t.tag.chars().count())
        .chain(std::iter::once(3))
        .max()
        .unwrap_or(3);

    writeln!(
        out,
        "{:>3}  {:<name_width$}  {:<tag_width$}  {:>6}  STATUS",
        "ID", "NAME", "TAG", "PRICE"
    )?;
    for template in store.templates() {
        let status = if store.is_purchased(template.id) {
            "owned".to_string()
        } else if template.cost > store.credits() {
            format!("need {} more", template.cost - store.credits())
        } else {
            "available".to_string()
        };
        let price = if template.is_free() {
            "Free".to_string()
        } else {
            template.cost.to_string()
        };
        writeln!(
            out,
            "{:>3}  {:<name_width$}  {:<tag_width$}  {:>6}  {}",
            template.id, template.name, template.tag, price, status
        )?;
    }
    Ok(())
}

fn print_status(store: &Store, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "Credits: {}", store.credits())?;
    let owned = store.purchased_templates();
    if owned.is_empty() {
        writeln!(out, "Owned: none")?;
    } else {
        writeln!(out, "Owned ({}):", owned.len())?;
        for template in owned {
            writeln!(out, "  {:>3}  {}", template.id, template.name)?;
        }
    }
    Ok(())
}
