use aomcx_core::error::try_alloc;
use aomcx_core::grid::{is_degenerate, linear_index, row_major_index};
use aomcx_core::types::GridDims;
use aomcx_core::PrepError;
use glam::UVec3;
use serde::{Deserialize, Serialize};

/// Storage order of a flattened grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Layout {
    /// z varies fastest (C arrays).
    RowMajor,
    /// x varies fastest (Matlab/Fortran arrays). The order every stage after
    /// loading works in.
    #[default]
    ColumnMajor,
}

/// Transpose a row-major grid into column-major order.
///
/// The input buffer is consumed and released. Degenerate dims or an empty
/// buffer return the input unchanged.
pub fn row_to_col<T: Copy>(data: Vec<T>, dims: GridDims) -> Result<Vec<T>, PrepError> {
    if is_degenerate(dims) || data.is_empty() {
        return Ok(data);
    }
    debug_assert_eq!(data.len(), dims.x as usize * dims.y as usize * dims.z as usize);
    let mut out = try_alloc(data.len())?;
    for z in 0..dims.z {
        for y in 0..dims.y {
            for x in 0..dims.x {
                out.push(data[row_major_index(dims, UVec3::new(x, y, z))]);
            }
        }
    }
    Ok(out)
}

/// Transpose a column-major grid into row-major order. Inverse of [`row_to_col`].
pub fn col_to_row<T: Copy>(data: Vec<T>, dims: GridDims) -> Result<Vec<T>, PrepError> {
    if is_degenerate(dims) || data.is_empty() {
        return Ok(data);
    }
    debug_assert_eq!(data.len(), dims.x as usize * dims.y as usize * dims.z as usize);
    let mut out = try_alloc(data.len())?;
    for x in 0..dims.x {
        for y in 0..dims.y {
            for z in 0..dims.z {
                out.push(data[linear_index(dims, UVec3::new(x, y, z))]);
            }
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_to_col_moves_each_voxel() {
        let dims = UVec3::new(2, 3, 4);
        // Row-major value encodes its own coordinate
        let mut row = vec![0u32; 24];
        for x in 0..2 {
            for y in 0..3 {
                for z in 0..4 {
                    row[row_major_index(dims, UVec3::new(x, y, z))] = x * 100 + y * 10 + z;
                }
            }
        }
        let col = row_to_col(row, dims).expect("transpose");
        for x in 0..2 {
            for y in 0..3 {
                for z in 0..4 {
                    assert_eq!(col[linear_index(dims, UVec3::new(x, y, z))], x * 100 + y * 10 + z);
                }
            }
        }
    }

    #[test]
    fn test_roundtrip_restores_bytes() {
        for dims in [
            UVec3::new(1, 1, 1),
            UVec3::new(5, 1, 1),
            UVec3::new(1, 1, 7),
            UVec3::new(3, 4, 5),
            UVec3::new(6, 2, 3),
        ] {
            let n = (dims.x * dims.y * dims.z) as usize;
            let original: Vec<u8> = (0..n).map(|i| (i * 37 % 251) as u8).collect();
            let col = row_to_col(original.clone(), dims).expect("row to col");
            let back = col_to_row(col, dims).expect("col to row");
            assert_eq!(back, original, "dims {dims}");
        }
    }

    #[test]
    fn test_degenerate_dims_noop() {
        let data = vec![1u8, 2, 3];
        assert_eq!(row_to_col(data.clone(), UVec3::new(3, 0, 1)).expect("noop"), data);
        assert!(row_to_col(Vec::<u8>::new(), UVec3::new(2, 2, 2))
            .expect("noop")
            .is_empty());
    }

    #[test]
    fn test_single_axis_is_identity() {
        // With only one non-unit axis both orders agree
        let data: Vec<u8> = (0..6).collect();
        assert_eq!(row_to_col(data.clone(), UVec3::new(6, 1, 1)).expect("x line"), data);
        assert_eq!(row_to_col(data.clone(), UVec3::new(1, 1, 6)).expect("z line"), data);
    }
}
