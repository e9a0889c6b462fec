use aomcx_core::error::try_alloc;
use aomcx_core::grid::{
    contains, coord_of, linear_index, row_major_coord_of, row_major_index, voxel_count, voxel_of,
};
use aomcx_core::types::{GridDims, MediumId, Voxel};
use aomcx_core::PrepError;
use glam::{UVec3, Vec3};

use crate::layout::{self, Layout};

/// Owns the medium grid of the simulation domain.
#[derive(Debug, Clone, PartialEq)]
pub struct VolumeStore {
    dims: GridDims,
    voxels: Vec<Voxel>,
    layout: Layout,
}

impl VolumeStore {
    /// Unpack raw volume bytes, checking every medium index against
    /// `medium_count` (air included).
    pub fn from_packed(
        dims: GridDims,
        bytes: &[u8],
        medium_count: usize,
        layout: Layout,
    ) -> Result<Self, PrepError> {
        let expected = voxel_count(dims)?;
        if bytes.len() != expected {
            return Err(PrepError::VolumeLength {
                expected,
                actual: bytes.len(),
            });
        }

        let mut voxels = try_alloc(expected)?;
        for (i, &byte) in bytes.iter().enumerate() {
            if byte as usize >= medium_count {
                let voxel = match layout {
                    Layout::ColumnMajor => coord_of(dims, i),
                    Layout::RowMajor => row_major_coord_of(dims, i),
                };
                return Err(PrepError::MediumOutOfRange {
                    index: byte,
                    voxel,
                    count: medium_count,
                });
            }
            voxels.push(Voxel::new(byte));
        }
        Ok(Self {
            dims,
            voxels,
            layout,
        })
    }

    /// A column-major volume filled with one medium.
    pub fn filled(dims: GridDims, medium: u8) -> Result<Self, PrepError> {
        let n = voxel_count(dims)?;
        let mut voxels = try_alloc(n)?;
        voxels.resize(n, Voxel::new(medium));
        Ok(Self {
            dims,
            voxels,
            layout: Layout::ColumnMajor,
        })
    }

    pub fn dims(&self) -> GridDims {
        self.dims
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn len(&self) -> usize {
        self.voxels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.voxels.is_empty()
    }

    pub fn voxels(&self) -> &[Voxel] {
        &self.voxels
    }

    /// Flat index of `coord` in the current storage order.
    pub fn index_of(&self, coord: UVec3) -> usize {
        match self.layout {
            Layout::ColumnMajor => linear_index(self.dims, coord),
            Layout::RowMajor => row_major_index(self.dims, coord),
        }
    }

    pub fn get(&self, coord: UVec3) -> Voxel {
        self.voxels[self.index_of(coord)]
    }

    pub fn set(&mut self, coord: UVec3, voxel: Voxel) {
        let idx = self.index_of(coord);
        self.voxels[idx] = voxel;
    }

    /// Medium of the voxel containing `pos`, or None outside the grid.
    pub fn medium_at(&self, pos: Vec3) -> Option<MediumId> {
        contains(self.dims, pos).then(|| self.get(voxel_of(pos)).medium)
    }

    /// Set the detector flag of the voxel at flat index `index`.
    pub fn set_detector(&mut self, index: usize) {
        self.voxels[index].detector = true;
    }

    /// Number of voxels carrying the detector flag.
    pub fn flagged_count(&self) -> usize {
        self.voxels.iter().filter(|v| v.detector).count()
    }

    /// Swap in a new voxel buffer, returning the old one.
    pub fn replace_voxels(&mut self, voxels: Vec<Voxel>, layout: Layout) -> Result<Vec<Voxel>, PrepError> {
        if voxels.len() != self.voxels.len() {
            return Err(PrepError::VolumeLength {
                expected: self.voxels.len(),
                actual: voxels.len(),
            });
        }
        self.layout = layout;
        Ok(std::mem::replace(&mut self.voxels, voxels))
    }

    /// Bring the store into column-major order. No-op when already there.
    pub fn normalize_layout(&mut self) -> Result<(), PrepError> {
        if self.layout == Layout::ColumnMajor {
            return Ok(());
        }
        let row = std::mem::take(&mut self.voxels);
        self.voxels = layout::row_to_col(row, self.dims)?;
        self.layout = Layout::ColumnMajor;
        log::debug!("converted volume {} from row-major to column-major", self.dims);
        Ok(())
    }

    /// Packed single-byte form, in the current storage order.
    pub fn to_packed(&self) -> Vec<u8> {
        self.voxels.iter().map(|v| v.pack()).collect()
    }
}
