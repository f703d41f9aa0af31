use crate::sys::assets::AssetError;
use orbit::ResourceRef;

#[derive(Debug)]
pub enum AppEvent {
    AssetLoaded {
        resource: ResourceRef,
        result: Result<Vec<u8>, AssetError>,
    },
    ConfigReload,
}
