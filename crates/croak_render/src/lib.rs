//! wgpu renderer for the croak frog.
//!
//! - [`FrogRenderer`]: the window sink that draws each posed frame
//! - [`OrbitCamera`]: mouse-driven orbit camera
//! - [`SceneStyle`]: ground, light, rim glow and camera placement
//! - [`mesh`]: part meshes decoded from binary glTF, and the ground plane
//! - [`uniforms`]: GPU layouts and the node-to-matrix-slot table
//! - [`context`]: device, surface and depth buffer
//!
//! ```rust,ignore
//! let renderer = FrogRenderer::new(SceneStyle::default())
//!     .with_skin_texture("STmap.jpeg", &skin_bytes)?;
//! App::new().run(session, renderer)?;
//! ```

pub mod camera;
pub mod context;
pub mod mesh;
pub mod renderer;
pub mod style;
pub mod uniforms;

pub use camera::OrbitCamera;
pub use context::RenderContext;
pub use mesh::{MeshData, Vertex};
pub use renderer::{FrogRenderer, SkinImage};
pub use style::SceneStyle;
pub use uniforms::{FrameUniforms, MAX_SLOTS, ModelUniforms, NodeSlots};
