use crate::config::run_async_watcher;
use crate::events::AppEvent;
use crate::sys::server::run_server;
use async_channel::Sender;
use std::thread;
use tokio::runtime::Builder;

/// Starts the control socket and config watcher on a `spinwheel-io` thread.
/// Both forward into `tx`; the GTK thread never blocks on them.
pub fn start_background_services(tx: Sender<AppEvent>) {
    let spawned = thread::Builder::new()
        .name("spinwheel-io".into())
        .spawn(move || {
            let rt = match Builder::new_current_thread().enable_all().build() {
                Ok(rt) => rt,
                Err(e) => {
                    log::error!("No background runtime, socket and reload disabled: {}", e);
                    return;
                }
            };

            rt.block_on(async {
                tokio::join!(run_server(tx.clone()), run_async_watcher(tx));
            });
        });

    if let Err(e) = spawned {
        log::error!("Failed to start background thread: {}", e);
    }
}
