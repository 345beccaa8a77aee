use clap::{Parser, Subcommand};
use std::path::PathBuf;
use wheelkit::control::{self, ControlCommand};
use wheelkit::spin::{SpinOutcome, SpinResolver};
use wheelkit::store::{self, JsonFileStore, OptionStore};
use wheelkit::{OptionList, layout};

#[derive(Parser, Debug)]
#[command(name = "wheelkit", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Read and write options at this path instead of the user data directory
    #[arg(short = 's', long, global = true)]
    store: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Print the saved options with their indices
    List,
    /// Add an option (surrounding whitespace is trimmed)
    Add {
        text: String,
        /// Send to the running spinwheel window instead
        #[arg(short, long)]
        remote: bool,
    },
    /// Remove the option at INDEX
    Remove {
        index: usize,
        #[arg(short, long)]
        remote: bool,
    },
    /// Pick a winner
    Spin {
        /// Seed the random source for a reproducible result
        #[arg(long)]
        seed: Option<u64>,
        /// Spin the running spinwheel window instead
        #[arg(short, long, conflicts_with = "seed")]
        remote: bool,
    },
    /// Print slice angles and display labels
    Layout,
    /// Raise the running spinwheel window
    Present,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let open_store = || -> anyhow::Result<JsonFileStore> {
        Ok(match &cli.store {
            Some(path) => JsonFileStore::new(path),
            None => JsonFileStore::open_default()?,
        })
    };

    match cli.command.clone() {
        Commands::Add { text, remote: true } => control::send(&ControlCommand::Add(text)),
        Commands::Remove {
            index,
            remote: true,
        } => control::send(&ControlCommand::Remove(index)),
        Commands::Spin { remote: true, .. } => control::send(&ControlCommand::Spin),
        Commands::Present => control::send(&ControlCommand::Present),
        Commands::List => {
            let items = open_store()?.load()?;
            for (i, item) in items.iter().enumerate() {
                println!("{}\t{}", i, item);
            }
            Ok(())
        }
        Commands::Add { text, .. } => {
            let store = open_store()?;
            let mut items = store.load()?;
            let added = items.add(&text)?.to_string();
            store.save(&items)?;
            log::info!("Added '{}' to {}", added, store.path().display());
            Ok(())
        }
        Commands::Remove { index, .. } => {
            let store = open_store()?;
            let mut items = store.load()?;
            let removed = items.remove(index)?;
            store.save(&items)?;
            log::info!("Removed '{}'", removed);
            Ok(())
        }
        Commands::Spin { seed, .. } => spin(&store::load_or_default(&open_store()?), seed),
        Commands::Layout => {
            let items = open_store()?.load()?;
            if items.is_empty() {
                println!("No options yet. Add some with `wheelkit add <TEXT>`.");
            }
            for slice in layout(items.as_slice()) {
                println!(
                    "{:>3}  {:>7.2}..{:>7.2}  label@{:>7.2}  {}",
                    slice.index, slice.start_angle, slice.end_angle, slice.label_angle, slice.label
                );
            }
            Ok(())
        }
    }
}

fn spin(items: &OptionList, seed: Option<u64>) -> anyhow::Result<()> {
    let mut resolver = match seed {
        Some(seed) => SpinResolver::seeded(seed),
        None => SpinResolver::from_entropy(),
    };
    let outcome = resolver.resolve(items.len())?;
    let winner = items.get(outcome.winner_index).unwrap_or_default();

    println!("{}", format_spin(winner, &outcome));
    log::info!("Winner #{}", outcome.winner_index);
    Ok(())
}

fn format_spin(winner: &str, outcome: &SpinOutcome) -> String {
    format!("{}\t{:.1}", winner, outcome.final_rotation)
}
