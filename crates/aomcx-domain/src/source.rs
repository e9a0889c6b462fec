use aomcx_core::grid::{contains, voxel_of};
use aomcx_core::types::Source;
use aomcx_core::PrepError;

use crate::volume::VolumeStore;

/// Make sure the source starts inside the medium.
///
/// A source on a background voxel is walked along its direction, one
/// direction vector per step, until it reaches a non-background voxel.
/// Fails if the start is outside the grid or the walk leaves it first.
pub fn place_source(source: Source, volume: &VolumeStore) -> Result<Source, PrepError> {
    let dims = volume.dims();
    if !contains(dims, source.pos) {
        return Err(PrepError::SourceOutside(source.pos));
    }
    if !volume.get(voxel_of(source.pos)).is_air() {
        return Ok(source);
    }

    log::warn!(
        "source {} is located outside the domain, voxel {} is background",
        source.pos,
        voxel_of(source.pos)
    );
    let mut pos = source.pos;
    loop {
        let next = pos + source.dir;
        // A step that does not move (zero or vanishing direction) can never arrive
        if !contains(dims, next) || next == pos {
            return Err(PrepError::SourceSearchExhausted {
                start: source.pos,
                exit: next,
            });
        }
        pos = next;
        if !volume.get(voxel_of(pos)).is_air() {
            break;
        }
    }
    log::info!("fixing source position to {pos}");
    Ok(Source::new(pos, source.dir))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{block, slab};
    use aomcx_core::ErrorKind;
    use glam::{UVec3, Vec3};

    #[test]
    fn test_source_in_medium_unchanged() {
        let volume = VolumeStore::filled(UVec3::new(4, 4, 4), 1).expect("volume");
        let source = Source::new(Vec3::new(1.5, 2.25, 0.0), Vec3::Z);
        assert_eq!(place_source(source, &volume).expect("in medium"), source);
    }

    #[test]
    fn test_source_walks_into_medium() {
        // Medium only at z >= 3
        let volume = block(UVec3::new(4, 4, 6), UVec3::new(0, 0, 3), UVec3::new(3, 3, 5), 1);
        let source = Source::new(Vec3::new(2.0, 2.0, 0.5), Vec3::Z);
        let placed = place_source(source, &volume).expect("reaches medium");
        assert_eq!(placed.pos, Vec3::new(2.0, 2.0, 3.5));
        assert_eq!(placed.dir, source.dir);
        assert_eq!(volume.medium_at(placed.pos).map(|m| m.0), Some(1));
    }

    #[test]
    fn test_source_walks_with_fractional_steps() {
        let volume = slab(UVec3::new(3, 3, 5), 4, 2);
        let source = Source::new(Vec3::new(1.0, 1.0, 0.0), Vec3::new(0.0, 0.0, 1.5));
        let placed = place_source(source, &volume).expect("reaches slab");
        assert_eq!(placed.pos.z, 4.5);
    }

    #[test]
    fn test_all_air_fails() {
        let volume = VolumeStore::filled(UVec3::new(3, 3, 3), 0).expect("volume");
        for dir in [Vec3::X, Vec3::NEG_Y, Vec3::new(0.3, 0.2, 0.9)] {
            let err = place_source(Source::new(Vec3::splat(1.5), dir), &volume)
                .expect_err("no medium to find");
            assert_eq!(err.kind(), ErrorKind::Domain);
            assert!(matches!(err, PrepError::SourceSearchExhausted { .. }));
        }
    }

    #[test]
    fn test_zero_direction_fails() {
        let volume = VolumeStore::filled(UVec3::new(3, 3, 3), 0).expect("volume");
        let result = place_source(Source::new(Vec3::splat(1.0), Vec3::ZERO), &volume);
        assert!(matches!(result, Err(PrepError::SourceSearchExhausted { .. })));
    }

    #[test]
    fn test_outside_start_fails() {
        let volume = VolumeStore::filled(UVec3::new(3, 3, 3), 1).expect("volume");
        for pos in [
            Vec3::new(-0.1, 1.0, 1.0),
            Vec3::new(3.0, 1.0, 1.0),
            Vec3::new(1.0, 1.0, 3.5),
        ] {
            let result = place_source(Source::new(pos, Vec3::Z), &volume);
            assert!(matches!(result, Err(PrepError::SourceOutside(_))), "{pos}");
        }
    }

    #[test]
    fn test_walk_away_from_medium_fails() {
        let volume = slab(UVec3::new(3, 3, 5), 4, 1);
        let source = Source::new(Vec3::new(1.0, 1.0, 2.0), Vec3::NEG_Z);
        let err = place_source(source, &volume).expect_err("walks out of the grid");
        match err {
            PrepError::SourceSearchExhausted { start, exit } => {
                assert_eq!(start, source.pos);
                assert!(exit.z < 0.0);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }
}
