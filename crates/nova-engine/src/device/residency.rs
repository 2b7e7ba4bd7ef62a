use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use wgpu::util::DeviceExt;

use crate::geometry::{ChunkMesh, MeshStore};
use crate::textures::{AtlasPage, TextureManager};

/// Keys to (re)upload and keys to evict, given what is resident and what is wanted.
pub fn diff_revisions<K, I>(resident: &HashMap<K, u64>, wanted: I) -> (Vec<K>, Vec<K>)
where
    K: Eq + Hash + Clone,
    I: IntoIterator<Item = (K, u64)>,
{
    let mut upload = Vec::new();
    let mut keep = HashSet::new();
    for (key, revision) in wanted {
        if resident.get(&key) != Some(&revision) {
            upload.push(key.clone());
        }
        keep.insert(key);
    }
    let evict = resident
        .keys()
        .filter(|k| !keep.contains(*k))
        .cloned()
        .collect();
    (upload, evict)
}

struct ResidentTexture {
    revision: u64,
    _texture: wgpu::Texture,
    _view: wgpu::TextureView,
}

struct ResidentChunk {
    revision: u64,
    _vertices: wgpu::Buffer,
    _indices: wgpu::Buffer,
}

/// Texture pages to upload and to evict.
///
/// A changed page that cannot live on the device (empty, or larger than
/// `max_dimension`) is evicted, so no stale copy outlives its replacement.
fn plan_textures(
    resident: &HashMap<String, u64>,
    tm: &TextureManager,
    max_dimension: u32,
) -> (Vec<String>, Vec<String>) {
    let wanted = tm.pages().map(|(n, p)| (n.to_string(), p.revision));
    let (changed, mut evict) = diff_revisions(resident, wanted);

    let mut upload = Vec::with_capacity(changed.len());
    for name in changed {
        let Some(page) = tm.texture(&name) else { continue };
        if page.width == 0 || page.height == 0 {
            evict.push(name);
        } else if page.width > max_dimension || page.height > max_dimension {
            log::warn!(
                "texture {name} is {}x{}, device limit is {max_dimension}; not uploaded",
                page.width,
                page.height
            );
            evict.push(name);
        } else {
            upload.push(name);
        }
    }
    (upload, evict)
}

/// Device copies of engine-owned textures and chunk meshes.
#[derive(Default)]
pub struct GpuResidency {
    textures: HashMap<String, ResidentTexture>,
    chunks: HashMap<(String, i32), ResidentChunk>,
}

impl GpuResidency {
    pub fn new() -> Self {
        Self::default()
    }

    /// Brings the device copies in line with the engine tables.
    pub fn sync(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        textures: &TextureManager,
        meshes: &MeshStore,
    ) {
        self.sync_textures(device, queue, textures);
        self.sync_chunks(device, meshes);
    }

    fn sync_textures(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, tm: &TextureManager) {
        let resident: HashMap<String, u64> =
            self.textures.iter().map(|(k, v)| (k.clone(), v.revision)).collect();
        let (upload, evict) = plan_textures(&resident, tm, device.limits().max_texture_dimension_2d);

        for name in evict {
            self.textures.remove(&name);
        }
        for name in upload {
            let Some(page) = tm.texture(&name) else { continue };
            let resident = upload_texture(device, queue, &name, page);
            self.textures.insert(name, resident);
        }
    }

    fn sync_chunks(&mut self, device: &wgpu::Device, meshes: &MeshStore) {
        let resident: HashMap<(String, i32), u64> =
            self.chunks.iter().map(|(k, v)| (k.clone(), v.revision)).collect();
        let wanted = meshes
            .iter()
            .map(|(filter, id, mesh)| ((filter.to_string(), id), mesh.revision));
        let (upload, evict) = diff_revisions(&resident, wanted);

        for key in evict {
            self.chunks.remove(&key);
        }

        for key in upload {
            let Some(mesh) = meshes.get(&key.0, key.1) else { continue };
            if mesh.indices.is_empty() {
                self.chunks.remove(&key);
                continue;
            }
            let resident = upload_chunk(device, &key, mesh);
            self.chunks.insert(key, resident);
        }
    }
}

fn upload_texture(device: &wgpu::Device, queue: &wgpu::Queue, name: &str, page: &AtlasPage) -> ResidentTexture {
    let (format, bytes_per_pixel, data) = match page.components {
        1 => (wgpu::TextureFormat::R8Unorm, 1, None),
        2 => (wgpu::TextureFormat::Rg8Unorm, 2, None),
        // no 3-channel formats in wgpu
        3 => (
            wgpu::TextureFormat::Rgba8Unorm,
            4,
            Some(
                page.pixels
                    .chunks_exact(3)
                    .flat_map(|p| [p[0], p[1], p[2], u8::MAX])
                    .collect::<Vec<u8>>(),
            ),
        ),
        _ => (wgpu::TextureFormat::Rgba8Unorm, 4, None),
    };
    let data = data.as_deref().unwrap_or(&page.pixels);

    let size = wgpu::Extent3d {
        width: page.width,
        height: page.height,
        depth_or_array_layers: 1,
    };
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some(name),
        size,
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format,
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    });

    queue.write_texture(
        wgpu::TexelCopyTextureInfo {
            texture: &texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        data,
        wgpu::TexelCopyBufferLayout {
            offset: 0,
            bytes_per_row: Some(page.width * bytes_per_pixel),
            rows_per_image: Some(page.height),
        },
        size,
    );

    log::debug!("uploaded texture {name} ({}x{}, {format:?})", page.width, page.height);

    let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
    ResidentTexture { revision: page.revision, _texture: texture, _view: view }
}

fn upload_chunk(device: &wgpu::Device, key: &(String, i32), mesh: &ChunkMesh) -> ResidentChunk {
    let label = format!("chunk {} {}", key.0, key.1);
    let vertices = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(&label),
        contents: bytemuck::cast_slice(&mesh.vertices),
        usage: wgpu::BufferUsages::VERTEX,
    });
    let indices = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(&label),
        contents: bytemuck::cast_slice(&mesh.indices),
        usage: wgpu::BufferUsages::INDEX,
    });

    ResidentChunk {
        revision: mesh.revision,
        _vertices: vertices,
        _indices: indices,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::textures::TextureUpload;

    #[test]
    fn new_and_changed_keys_are_uploaded() {
        let resident = HashMap::from([("a", 1), ("b", 2)]);
        let (mut upload, evict) = diff_revisions(&resident, [("a", 1), ("b", 3), ("c", 1)]);
        upload.sort();
        assert_eq!(upload, ["b", "c"]);
        assert!(evict.is_empty());
    }

    #[test]
    fn missing_keys_are_evicted() {
        let resident = HashMap::from([("a", 1), ("gone", 4)]);
        let (upload, evict) = diff_revisions(&resident, [("a", 1)]);
        assert!(upload.is_empty());
        assert_eq!(evict, ["gone"]);
    }

    // ── textures ──────────────────────────────────────────────────────────

    fn page(name: &str, width: u32, height: u32) -> TextureUpload {
        TextureUpload {
            name: name.into(),
            width,
            height,
            components: 1,
            pixels: vec![0; (width * height) as usize],
        }
    }

    #[test]
    fn oversized_replacement_evicts_the_stale_copy() {
        let mut tm = TextureManager::new();
        tm.add_texture(page("atlas", 4, 4)).unwrap();
        let old = tm.texture("atlas").unwrap().revision;
        tm.add_texture(page("atlas", 64, 2)).unwrap();

        let resident = HashMap::from([("atlas".to_string(), old)]);
        let (upload, evict) = plan_textures(&resident, &tm, 32);
        assert!(upload.is_empty());
        assert!(evict.contains(&"atlas".to_string()));
    }

    #[test]
    fn fitting_page_is_uploaded() {
        let mut tm = TextureManager::new();
        tm.add_texture(page("atlas", 16, 16)).unwrap();
        let (upload, evict) = plan_textures(&HashMap::new(), &tm, 32);
        assert_eq!(upload, ["atlas"]);
        // the empty lightmap never goes to the device
        assert!(evict.iter().all(|n| n != "atlas"));
    }
}
