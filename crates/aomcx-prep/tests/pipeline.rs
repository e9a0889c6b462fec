use std::path::{Path, PathBuf};

use aomcx_core::{ErrorKind, PrepError};
use aomcx_domain::PrepOutcome;
use aomcx_prep::manifest::{load_manifest, parse_manifest};
use glam::Vec3;

const N: usize = 10;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("aomcx-prep-it-{}-{name}", std::process::id()));
    std::fs::create_dir_all(&dir).expect("scratch dir");
    dir
}

/// 10^3 row-major volume, medium 1 for z >= 3, background below.
fn write_layered_volume(path: &Path) {
    let mut bytes = Vec::with_capacity(N * N * N);
    for _x in 0..N {
        for _y in 0..N {
            for z in 0..N {
                bytes.push(if z >= 3 { 1u8 } else { 0 });
            }
        }
    }
    std::fs::write(path, bytes).expect("write volume");
}

fn manifest_text(root: &Path, extra: &str) -> String {
    format!(
        r#"(
    session: "layered",
    root: {root:?},
    volume_file: Some("layered.bin"),
    dims: (10, 10, 10),
    source: (pos: (5.5, 5.5, 1.5), dir: (0.0, 0.0, 1.0)),
    media: [(mus: 10.0, g: 0.9, mua: 0.01, n: 1.37)],
    detectors: [(pos: (5.0, 5.0, 4.0)), (pos: (50.0, 50.0, 50.0))],
    {extra}
)"#,
        root = root.to_string_lossy()
    )
}

#[test]
fn test_manifest_to_prepared_domain() {
    let dir = scratch_dir("ready");
    write_layered_volume(&dir.join("layered.bin"));
    let manifest_path = dir.join("domain.ron");
    std::fs::write(&manifest_path, manifest_text(&dir, "")).expect("write manifest");

    let plan = load_manifest(&manifest_path)
        .expect("manifest parses")
        .resolve()
        .expect("manifest valid");
    let (outcome, summary) = aomcx_prep::run(&plan).expect("prepare");

    let domain = match outcome {
        PrepOutcome::Ready(domain) => domain,
        other => panic!("expected a ready domain, got {other:?}"),
    };

    // One-based (5.5, 5.5, 1.5) walks up to the first medium layer
    assert_eq!(domain.initial_source.pos, Vec3::new(4.5, 4.5, 0.5));
    assert_eq!(domain.source.pos, Vec3::new(4.5, 4.5, 3.5));

    assert_eq!(domain.report.coverage.len(), 2);
    assert!(domain.report.coverage[0] > 0);
    assert_eq!(domain.report.coverage[1], 0);
    assert_eq!(domain.report.warnings.len(), 1);
    assert_eq!(domain.volume.flagged_count(), domain.report.coverage[0] as usize);

    // Every flag sits on the exposed z = 3 face
    let packed = domain.packed_volume();
    for (i, byte) in packed.iter().enumerate() {
        if byte & 0x80 != 0 {
            assert_eq!(i / (N * N), 3, "flag off the interface at index {i}");
            assert_eq!(byte & 0x7F, 1);
        }
    }

    assert_eq!(domain.history.maxmedia, 1);
    assert_eq!(domain.history.detnum, 2);
    assert_eq!(summary.source_final, Some([4.5, 4.5, 3.5]));
    assert_eq!(summary.warnings.len(), 1);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_mask_dump_from_manifest() {
    let dir = scratch_dir("dump");
    write_layered_volume(&dir.join("layered.bin"));
    let manifest = parse_manifest(&manifest_text(&dir, "dump_mask: true,")).expect("parses");
    let plan = manifest.resolve().expect("valid");

    let (outcome, summary) = aomcx_prep::run(&plan).expect("prepare");
    let (path, report) = match outcome {
        PrepOutcome::MaskDumped { path, report } => (path, report),
        other => panic!("expected a mask dump, got {other:?}"),
    };
    assert_eq!(path, dir.join("layered.mask"));
    assert_eq!(summary.mask_dump.as_deref(), Some(path.as_path()));

    let mask = std::fs::read(&path).expect("mask written");
    assert_eq!(mask.len(), N * N * N);
    let flagged = mask.iter().filter(|&&b| b & 0x80 != 0).count();
    assert_eq!(flagged as u32, report.coverage[0]);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_savedet_off_skips_masking() {
    let dir = scratch_dir("nodet");
    write_layered_volume(&dir.join("layered.bin"));
    let plan = parse_manifest(&manifest_text(&dir, "save_detectors: false,"))
        .expect("parses")
        .resolve()
        .expect("valid");
    match aomcx_prep::run(&plan).expect("prepare").0 {
        PrepOutcome::Ready(domain) => assert_eq!(domain.volume.flagged_count(), 0),
        other => panic!("unexpected outcome {other:?}"),
    }
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_dumpmask_needs_savedet() {
    let dir = scratch_dir("nodump");
    write_layered_volume(&dir.join("layered.bin"));
    let plan = parse_manifest(&manifest_text(&dir, "save_detectors: false, dump_mask: true,"))
        .expect("parses")
        .resolve()
        .expect("valid");
    let (outcome, summary) = aomcx_prep::run(&plan).expect("prepare");
    assert!(matches!(outcome, PrepOutcome::Ready(_)));
    assert!(summary.mask_dump.is_none());
    assert!(!dir.join("layered.mask").exists());
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_short_volume_is_config_error() {
    let dir = scratch_dir("short");
    std::fs::write(dir.join("layered.bin"), vec![1u8; N * N * N - 1]).expect("write volume");
    let plan = parse_manifest(&manifest_text(&dir, ""))
        .expect("parses")
        .resolve()
        .expect("valid");
    let err = aomcx_prep::run(&plan).expect_err("short volume");
    assert!(matches!(err, PrepError::VolumeLength { .. }));
    assert_eq!(err.kind(), ErrorKind::Config);
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_short_acoustics_is_io_error() {
    let dir = scratch_dir("acoustics");
    write_layered_volume(&dir.join("layered.bin"));
    std::fs::write(dir.join("us.bin"), vec![0u8; N * N * N * 4 * 3]).expect("write acoustics");
    let plan = parse_manifest(&manifest_text(&dir, "acoustics_file: Some(\"us.bin\"),"))
        .expect("parses")
        .resolve()
        .expect("valid");
    let err = aomcx_prep::run(&plan).expect_err("three planes only");
    assert!(matches!(err, PrepError::AcousticsLength { .. }));
    assert_eq!(err.kind(), ErrorKind::Io);
    let _ = std::fs::remove_dir_all(&dir);
}
