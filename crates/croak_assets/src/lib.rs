//! Asset binding for croak.
//!
//! Loading model files is delegated to an [`AssetLoader`]; this crate routes
//! each completed load to its rig node by asset name, tolerating any
//! completion order.

pub mod binding;
pub mod loader;

pub use binding::{BindingTable, FROG_ASSETS, asset_name, bind_asset};
#[cfg(not(target_arch = "wasm32"))]
pub use loader::FsAssetLoader;
pub use loader::{
    AssetLoader, BoundAsset, LoadProgress, LoadQueue, LoadResult, LoadSender, LoadedAsset,
};
