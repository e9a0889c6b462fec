use std::path::PathBuf;
use std::process;

use aomcx_domain::PrepOutcome;
use aomcx_prep::manifest::load_manifest;
use aomcx_prep::report;

fn usage() {
    eprintln!("Usage: aomcx-prep <manifest.ron> [OPTIONS]");
    eprintln!("  --session <name>     Override the session name");
    eprintln!("  --root <dir>         Directory for input files and the mask dump");
    eprintln!("  --savedet <0|1>      Mask detector footprints (default: 1)");
    eprintln!("  --dumpmask           Write <session>.mask after masking and stop");
    eprintln!("  --summary <path>     Save the run summary as JSON");
}

fn value<'a>(args: &'a [String], i: usize, flag: &str) -> &'a str {
    match args.get(i) {
        Some(v) => v.as_str(),
        None => {
            eprintln!("Missing value for {flag}");
            process::exit(1);
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();

    let mut manifest_path: Option<PathBuf> = None;
    let mut session: Option<String> = None;
    let mut root: Option<PathBuf> = None;
    let mut save_detectors: Option<bool> = None;
    let mut dump_mask = false;
    let mut summary_path: Option<PathBuf> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--session" => {
                i += 1;
                session = Some(value(&args, i, "--session").to_string());
            }
            "--root" => {
                i += 1;
                root = Some(PathBuf::from(value(&args, i, "--root")));
            }
            "--savedet" => {
                i += 1;
                save_detectors = match value(&args, i, "--savedet") {
                    "0" => Some(false),
                    "1" => Some(true),
                    other => {
                        eprintln!("Invalid --savedet value: {other}");
                        process::exit(1);
                    }
                };
            }
            "--dumpmask" => dump_mask = true,
            "--summary" => {
                i += 1;
                summary_path = Some(PathBuf::from(value(&args, i, "--summary")));
            }
            "--help" | "-h" => {
                usage();
                process::exit(0);
            }
            other if other.starts_with('-') => {
                eprintln!("Unknown argument: {}", other);
                process::exit(1);
            }
            other => manifest_path = Some(PathBuf::from(other)),
        }
        i += 1;
    }

    let Some(manifest_path) = manifest_path else {
        usage();
        process::exit(1);
    };

    let mut manifest = match load_manifest(&manifest_path) {
        Ok(m) => m,
        Err(e) => {
            eprintln!("ERROR: {e}");
            process::exit(1);
        }
    };
    if let Some(session) = session {
        manifest.session = session;
    }
    if let Some(root) = root {
        manifest.root = root;
    }
    if let Some(save) = save_detectors {
        manifest.save_detectors = save;
    }
    manifest.dump_mask |= dump_mask;

    let plan = match manifest.resolve() {
        Ok(plan) => plan,
        Err(e) => {
            eprintln!("ERROR: {e}");
            process::exit(1);
        }
    };

    log::info!("Preparing domain '{}'...", plan.options.session);
    let (outcome, summary) = match aomcx_prep::run(&plan) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("ERROR ({:?}): {e}", e.kind());
            process::exit(1);
        }
    };

    println!("{}", report::format_markdown(&summary));

    if let Some(ref path) = summary_path {
        if let Err(e) = report::save_summary(path, &summary) {
            eprintln!("ERROR: {e}");
            process::exit(1);
        }
        log::info!("Saved summary to {}", path.display());
    }

    match outcome {
        PrepOutcome::MaskDumped { path, .. } => {
            log::info!("Mask dumped to {}, stopping.", path.display());
        }
        PrepOutcome::Ready(domain) => {
            log::info!(
                "Domain ready: {} voxels, {} flagged, {} media.",
                domain.volume.len(),
                domain.volume.flagged_count(),
                domain.media.len()
            );
        }
    }
}
