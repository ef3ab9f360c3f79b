//! Rendering capability check.
//!
//! Run before any rig is built. When no graphics adapter is available the
//! application shows [`RENDER_UNAVAILABLE_MESSAGE`] instead of a scene.

use croak_core::{CroakError, Result};

/// Shown in place of the scene when rendering is unavailable.
pub const RENDER_UNAVAILABLE_MESSAGE: &str =
    "Your graphics card or browser does not support GPU rendering; the frog cannot be shown.";

/// Name and backend of the adapter that passed the probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderCapability {
    pub adapter_name: String,
    pub backend: String,
}

/// Requests a graphics adapter and reports what was found.
///
/// # Errors
///
/// Returns [`CroakError::RenderUnavailable`] when no adapter can be obtained.
pub async fn request_render_capability() -> Result<RenderCapability> {
    let instance = wgpu::Instance::default();
    let adapter = instance
        .request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::default(),
            compatible_surface: None,
            force_fallback_adapter: false,
        })
        .await
        .map_err(|e| CroakError::RenderUnavailable(e.to_string()))?;

    let info = adapter.get_info();
    log::info!("Using adapter {} ({:?})", info.name, info.backend);
    Ok(RenderCapability {
        adapter_name: info.name,
        backend: format!("{:?}", info.backend),
    })
}

/// Blocking form of [`request_render_capability`].
///
/// # Errors
///
/// Returns [`CroakError::RenderUnavailable`] when no adapter can be obtained.
#[cfg(not(target_arch = "wasm32"))]
pub fn probe_render_capability() -> Result<RenderCapability> {
    pollster::block_on(request_render_capability())
}
