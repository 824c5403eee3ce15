//! Labeled voxel volumes and the per-layer occupancy masks derived from them.

mod mask;

pub use mask::OccupancyMask;

use crate::error::{Result, VolumeError};

/// Material identifier stored in each voxel.
pub type MaterialId = u8;

/// A dense `[Z][H][W]` grid of material ids.
///
/// Row 0 of every layer is the top row of the source image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoxelVolume {
    depth: usize,
    height: usize,
    width: usize,
    data: Vec<MaterialId>,
}

impl VoxelVolume {
    /// Wraps a flat buffer laid out as `z * height * width + y * width + x`.
    ///
    /// # Errors
    ///
    /// Returns [`VolumeError::ShapeMismatch`] if the buffer length does not
    /// match the dimensions.
    pub fn new(depth: usize, height: usize, width: usize, data: Vec<MaterialId>) -> Result<Self> {
        let expected = depth * height * width;
        if data.len() != expected {
            return Err(VolumeError::ShapeMismatch {
                depth,
                height,
                width,
                expected,
                actual: data.len(),
            }
            .into());
        }
        Ok(Self {
            depth,
            height,
            width,
            data,
        })
    }

    /// Creates a volume where every voxel holds `material`.
    #[must_use]
    pub fn filled(depth: usize, height: usize, width: usize, material: MaterialId) -> Self {
        Self {
            depth,
            height,
            width,
            data: vec![material; depth * height * width],
        }
    }

    /// Builds a volume from nested `[z][row]` vectors.
    ///
    /// # Errors
    ///
    /// Returns [`VolumeError::RaggedLayer`] if layers or rows differ in size.
    pub fn from_layers(layers: &[Vec<Vec<MaterialId>>]) -> Result<Self> {
        let depth = layers.len();
        let height = layers.first().map_or(0, Vec::len);
        let width = layers
            .first()
            .and_then(|layer| layer.first())
            .map_or(0, Vec::len);

        let mut data = Vec::with_capacity(depth * height * width);
        for (z, layer) in layers.iter().enumerate() {
            if layer.len() != height {
                return Err(VolumeError::RaggedLayer {
                    layer: z,
                    expected: height,
                    actual: layer.len(),
                }
                .into());
            }
            for row in layer {
                if row.len() != width {
                    return Err(VolumeError::RaggedLayer {
                        layer: z,
                        expected: width,
                        actual: row.len(),
                    }
                    .into());
                }
                data.extend_from_slice(row);
            }
        }
        Self::new(depth, height, width, data)
    }

    /// Number of Z layers.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Number of image rows per layer.
    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of image columns per layer.
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Material at `(z, y, x)`, or `None` when out of range.
    #[must_use]
    pub fn get(&self, z: usize, y: usize, x: usize) -> Option<MaterialId> {
        if z >= self.depth || y >= self.height || x >= self.width {
            return None;
        }
        Some(self.data[self.index(z, y, x)])
    }

    /// Sets the material at `(z, y, x)`. Out-of-range writes are ignored.
    pub fn set(&mut self, z: usize, y: usize, x: usize, material: MaterialId) {
        if z < self.depth && y < self.height && x < self.width {
            let idx = self.index(z, y, x);
            self.data[idx] = material;
        }
    }

    /// The raw material ids of layer `z` in row-major order.
    #[must_use]
    pub fn layer(&self, z: usize) -> &[MaterialId] {
        let size = self.height * self.width;
        let start = (z * size).min(self.data.len());
        let end = (start + size).min(self.data.len());
        &self.data[start..end]
    }

    /// Occupancy of `material` in layer `z`.
    #[must_use]
    pub fn mask(&self, z: usize, material: MaterialId) -> OccupancyMask {
        let cells = self.layer(z).iter().map(|&m| m == material).collect();
        OccupancyMask::from_cells(self.width, self.height, cells)
    }

    /// Distinct material ids present anywhere in the volume, ascending.
    #[must_use]
    pub fn materials(&self) -> Vec<MaterialId> {
        let mut seen = [false; 256];
        for &m in &self.data {
            seen[usize::from(m)] = true;
        }
        (0..=MaterialId::MAX)
            .filter(|&m| seen[usize::from(m)])
            .collect()
    }

    fn index(&self, z: usize, y: usize, x: usize) -> usize {
        (z * self.height + y) * self.width + x
    }
}
