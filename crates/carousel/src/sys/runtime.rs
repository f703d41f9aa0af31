use crate::events::AppEvent;
use crate::sys::assets::{self, AssetRequest};
use async_channel::{Receiver, Sender};
use std::path::PathBuf;
use std::thread;
use tokio::runtime::Runtime;

pub fn start_background_services(
    tx: Sender<AppEvent>,
    requests: Receiver<AssetRequest>,
    config_path: Option<PathBuf>,
) {
    thread::spawn(move || {
        let rt = Runtime::new().expect("Failed to create Tokio runtime");

        rt.block_on(async {
            {
                let tx = tx.clone();
                tokio::spawn(async move {
                    assets::run_loader(requests, tx).await;
                });
            }

            if let Some(path) = config_path {
                let tx = tx.clone();
                tokio::spawn(async move {
                    crate::config::run_async_watcher(path, tx).await;
                });
            }

            std::future::pending::<()>().await;
        });
    });
}
