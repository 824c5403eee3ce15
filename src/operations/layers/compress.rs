use crate::volume::{MaterialId, OccupancyMask, VoxelVolume};

/// A maximal run of consecutive Z layers sharing one occupancy mask.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerGroup {
    /// First layer of the run.
    pub start_z: usize,
    /// Last layer of the run (inclusive).
    pub end_z: usize,
    /// Occupancy shared by every layer in the run; never empty.
    pub mask: OccupancyMask,
}

impl LayerGroup {
    /// Number of layers covered.
    #[must_use]
    pub fn layer_count(&self) -> usize {
        self.end_z - self.start_z + 1
    }

    /// Whether layer `z` lies inside the run.
    #[must_use]
    pub fn contains(&self, z: usize) -> bool {
        (self.start_z..=self.end_z).contains(&z)
    }
}

/// Where a cross-section came from, carried into warnings about it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LayerOrigin {
    pub material: MaterialId,
    pub start_z: usize,
    pub end_z: usize,
}

impl LayerOrigin {
    #[must_use]
    pub fn new(material: MaterialId, start_z: usize, end_z: usize) -> Self {
        Self {
            material,
            start_z,
            end_z,
        }
    }
}

/// Merges consecutive layers with identical occupancy of one material.
///
/// Empty layers never produce a group, so a gap splits runs even when the
/// masks on either side are equal.
pub struct CompressLayers<'a> {
    volume: &'a VoxelVolume,
    material: MaterialId,
}

impl<'a> CompressLayers<'a> {
    /// Creates a new `CompressLayers` operation.
    #[must_use]
    pub fn new(volume: &'a VoxelVolume, material: MaterialId) -> Self {
        Self { volume, material }
    }

    /// Scans the volume bottom to top, returning groups in ascending `start_z`.
    #[must_use]
    pub fn execute(&self) -> Vec<LayerGroup> {
        let mut groups = Vec::new();
        let mut open: Option<(usize, OccupancyMask)> = None;

        for z in 0..self.volume.depth() {
            let mask = self.volume.mask(z, self.material);

            if mask.is_empty() {
                if let Some((start_z, prev)) = open.take() {
                    groups.push(LayerGroup {
                        start_z,
                        end_z: z - 1,
                        mask: prev,
                    });
                }
                continue;
            }

            open = match open.take() {
                None => Some((z, mask)),
                Some((start_z, prev)) if prev == mask => Some((start_z, prev)),
                Some((start_z, prev)) => {
                    groups.push(LayerGroup {
                        start_z,
                        end_z: z - 1,
                        mask: prev,
                    });
                    Some((z, mask))
                }
            };
        }

        if let Some((start_z, prev)) = open {
            groups.push(LayerGroup {
                start_z,
                end_z: self.volume.depth() - 1,
                mask: prev,
            });
        }

        groups
    }
}
