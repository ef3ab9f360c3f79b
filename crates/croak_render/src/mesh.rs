//! CPU-side meshes: part geometry decoded from binary glTF, and the ground.

use bytemuck::{Pod, Zeroable};
use glam::{Mat3, Mat4, Vec3};

use croak_core::{CroakError, Result};

/// Interleaved vertex as uploaded to the GPU.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

impl Vertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 3] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3, 2 => Float32x2];

    #[must_use]
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Indexed triangle list in the space of the node it is drawn under.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    /// Decodes every triangle primitive of a binary glTF file.
    ///
    /// Node transforms inside the file are baked into the vertices, so the
    /// result sits in the space of the rig node the part is bound to.
    /// Missing normals are computed from the faces; missing texture
    /// coordinates become zero.
    ///
    /// # Errors
    ///
    /// Returns [`CroakError::AssetDecode`] if the bytes are not glTF or hold
    /// no triangles.
    pub fn from_glb(path: &str, bytes: &[u8]) -> Result<Self> {
        let gltf = gltf::Gltf::from_slice(bytes).map_err(|e| decode_error(path, e))?;
        let blob = gltf.blob.as_deref();

        let mut mesh = Self::default();
        let mut stack: Vec<(gltf::Node, Mat4)> =
            match gltf.default_scene().or_else(|| gltf.scenes().next()) {
                Some(scene) => scene.nodes().map(|n| (n, Mat4::IDENTITY)).collect(),
                None => {
                    // Files without a scene still carry their meshes.
                    for node_mesh in gltf.meshes() {
                        mesh.append_mesh(&node_mesh, Mat4::IDENTITY, blob);
                    }
                    Vec::new()
                }
            };

        while let Some((node, parent)) = stack.pop() {
            let world = parent * Mat4::from_cols_array_2d(&node.transform().matrix());
            if let Some(node_mesh) = node.mesh() {
                mesh.append_mesh(&node_mesh, world, blob);
            }
            stack.extend(node.children().map(|child| (child, world)));
        }

        if mesh.is_empty() {
            return Err(decode_error(path, "no triangle primitives"));
        }
        log::debug!(
            "Decoded '{path}': {} vertices, {} triangles",
            mesh.vertices.len(),
            mesh.indices.len() / 3
        );
        Ok(mesh)
    }

    /// A square in the XZ plane at `height`, facing up, `size` units wide.
    #[must_use]
    pub fn plane(size: f32, height: f32) -> Self {
        let h = size / 2.0;
        let corner = |x: f32, z: f32, uv: [f32; 2]| Vertex {
            position: [x, height, z],
            normal: [0.0, 1.0, 0.0],
            uv,
        };
        Self {
            vertices: vec![
                corner(-h, -h, [0.0, 0.0]),
                corner(-h, h, [0.0, 1.0]),
                corner(h, h, [1.0, 1.0]),
                corner(h, -h, [1.0, 0.0]),
            ],
            indices: vec![0, 1, 2, 0, 2, 3],
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    fn append_mesh(&mut self, mesh: &gltf::Mesh, world: Mat4, blob: Option<&[u8]>) {
        let normal_matrix = Mat3::from_mat4(world).inverse().transpose();

        for primitive in mesh.primitives() {
            if primitive.mode() != gltf::mesh::Mode::Triangles {
                log::debug!("Skipping {:?} primitive", primitive.mode());
                continue;
            }

            let reader = primitive.reader(|buffer| match buffer.source() {
                gltf::buffer::Source::Bin => blob,
                gltf::buffer::Source::Uri(_) => None,
            });
            let Some(positions) = reader.read_positions() else {
                continue;
            };
            let positions: Vec<[f32; 3]> = positions.collect();
            let indices: Vec<u32> = match reader.read_indices() {
                Some(indices) => indices.into_u32().collect(),
                None => (0..positions.len() as u32).collect(),
            };
            let normals: Vec<[f32; 3]> = match reader.read_normals() {
                Some(normals) => normals.collect(),
                None => face_normals(&positions, &indices),
            };
            let uvs: Vec<[f32; 2]> = reader
                .read_tex_coords(0)
                .map(|uvs| uvs.into_f32().collect())
                .unwrap_or_default();

            let base = self.vertices.len() as u32;
            self.vertices.extend(positions.iter().enumerate().map(|(i, p)| {
                let normal = normals.get(i).copied().unwrap_or([0.0, 1.0, 0.0]);
                Vertex {
                    position: world.transform_point3(Vec3::from(*p)).to_array(),
                    normal: (normal_matrix * Vec3::from(normal))
                        .normalize_or_zero()
                        .to_array(),
                    uv: uvs.get(i).copied().unwrap_or_default(),
                }
            }));
            self.indices.extend(indices.iter().map(|i| base + i));
        }
    }
}

/// Averages the normals of the faces around each vertex.
fn face_normals(positions: &[[f32; 3]], indices: &[u32]) -> Vec<[f32; 3]> {
    let mut sums = vec![Vec3::ZERO; positions.len()];
    for tri in indices.chunks_exact(3) {
        let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| i as usize);
        if a >= positions.len() || b >= positions.len() || c >= positions.len() {
            continue;
        }
        let (pa, pb, pc) = (
            Vec3::from(positions[a]),
            Vec3::from(positions[b]),
            Vec3::from(positions[c]),
        );
        let n = (pb - pa).cross(pc - pa);
        sums[a] += n;
        sums[b] += n;
        sums[c] += n;
    }
    sums.into_iter()
        .map(|n| n.normalize_or(Vec3::Y).to_array())
        .collect()
}

fn decode_error(path: &str, reason: impl std::fmt::Display) -> CroakError {
    CroakError::AssetDecode {
        path: path.to_string(),
        reason: reason.to_string(),
    }
}
