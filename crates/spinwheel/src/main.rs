use clap::Parser;
use relm4::prelude::*;
use spinwheel::config;
use spinwheel::gui::app::AppModel;
use spinwheel::sys::runtime;
use wheelkit::store::{MemoryStore, OptionStore};

#[derive(Parser, Debug)]
#[command(name = "spinwheel", version, about, long_about = None)]
struct Args {
    /// Write a commented config.toml (if none exists), print its path and exit
    #[arg(long)]
    write_config: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.write_config {
        let path = config::write_default_config()?;
        println!("{}", path.display());
        return Ok(());
    }

    let config = config::load_or_default();
    let store: Box<dyn OptionStore> = match config.open_store() {
        Ok(store) => {
            log::info!("Options stored at {}", store.path().display());
            Box::new(store)
        }
        Err(e) => {
            log::error!("Options will not be saved: {}", e);
            Box::new(MemoryStore::default())
        }
    };

    let (tx, rx) = async_channel::bounded(32);

    // socket server and config watcher
    runtime::start_background_services(tx);

    // flags are ours, not GTK's
    let app = RelmApp::new("org.dudu.spinwheel").with_args(Vec::new());

    app.run::<AppModel>((config, store, rx));
    Ok(())
}
