//! Background image fetching. Files are read on the tokio runtime and the
//! bytes handed back to the GTK thread, which decodes them.

use crate::events::AppEvent;
use async_channel::{Receiver, Sender};
use gdk_pixbuf::{Pixbuf, PixbufLoader};
use gdk_pixbuf::prelude::*;
use orbit::ResourceRef;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AssetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Loader task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
    #[error("Decode error: {0}")]
    Decode(#[from] glib::Error),
    #[error("Image decoded to nothing")]
    Empty,
}

#[derive(Debug, Clone)]
pub struct AssetRequest {
    pub resource: ResourceRef,
    pub path: PathBuf,
}

impl AssetRequest {
    pub fn new(assets_dir: &Path, resource: ResourceRef) -> Self {
        Self {
            path: assets_dir.join(resource.as_str()),
            resource,
        }
    }
}

pub async fn run_loader(requests: Receiver<AssetRequest>, tx: Sender<AppEvent>) {
    while let Ok(request) = requests.recv().await {
        let tx = tx.clone();
        tokio::spawn(async move {
            log::debug!("Loading {}", request.path.display());
            let result = read(request.path).await;
            let _ = tx
                .send(AppEvent::AssetLoaded {
                    resource: request.resource,
                    result,
                })
                .await;
        });
    }
}

async fn read(path: PathBuf) -> Result<Vec<u8>, AssetError> {
    Ok(tokio::task::spawn_blocking(move || fs_err::read(path)).await??)
}

pub fn decode(bytes: &[u8]) -> Result<Pixbuf, AssetError> {
    let loader = PixbufLoader::new();
    loader.write(bytes)?;
    loader.close()?;
    loader.pixbuf().ok_or(AssetError::Empty)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_path_joins_resource_name() {
        let request = AssetRequest::new(Path::new("/srv/images"), ResourceRef::for_index(13));
        assert_eq!(request.path, PathBuf::from("/srv/images/img4.jpg"));
    }

    #[test]
    fn test_garbage_bytes_fail_to_decode() {
        assert!(decode(b"definitely not a jpeg").is_err());
    }

    #[tokio::test]
    async fn test_missing_file_reports_io_error() {
        let result = read(PathBuf::from("/nonexistent/carousel/img1.jpg")).await;
        assert!(matches!(result, Err(AssetError::Io(_))));
    }
}
