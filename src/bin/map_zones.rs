//! Map layout zones to OCR text across a directory of page documents.
//!
//! Usage:
//!
//!   cargo run --release --bin map_zones -- \
//!       --zone-dir pages/zones --ocr-dir pages/ocr --output-dir out \
//!       [--threshold 0.1] [--usecase zone-plus-ocr] [--verbose]

use std::path::PathBuf;
use std::process::ExitCode;
use zonemap::config::DEFAULT_IOU_THRESHOLD;
use zonemap::pipeline;
use zonemap::{MappingConfig, Usecase};

struct CliArgs {
    zone_dir: PathBuf,
    ocr_dir: PathBuf,
    output_dir: PathBuf,
    threshold: f64,
    usecase: Usecase,
    verbose: bool,
}

impl CliArgs {
    fn from_args() -> Result<Self, String> {
        let args: Vec<String> = std::env::args().collect();
        let mut zone_dir = None;
        let mut ocr_dir = None;
        let mut output_dir = None;
        let mut threshold = DEFAULT_IOU_THRESHOLD;
        let mut usecase = Usecase::ZonePlusOcr;
        let mut verbose = false;

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--zone-dir" | "-zx" => {
                    i += 1;
                    zone_dir = args.get(i).map(PathBuf::from);
                },
                "--ocr-dir" | "-ox" => {
                    i += 1;
                    ocr_dir = args.get(i).map(PathBuf::from);
                },
                "--output-dir" | "-s" => {
                    i += 1;
                    output_dir = args.get(i).map(PathBuf::from);
                },
                "--threshold" | "-t" => {
                    i += 1;
                    let raw = args
                        .get(i)
                        .ok_or_else(|| "--threshold requires a value".to_string())?;
                    threshold = raw
                        .parse()
                        .map_err(|_| format!("invalid threshold '{}'", raw))?;
                },
                "--usecase" | "-u" => {
                    i += 1;
                    let raw = args
                        .get(i)
                        .ok_or_else(|| "--usecase requires a value".to_string())?;
                    usecase = Usecase::from_name(raw).ok_or_else(|| {
                        format!(
                            "unknown usecase '{}' (expected ocr-only, zone-plus-ocr, \
                             or zone-plus-ocr-exclusive)",
                            raw
                        )
                    })?;
                },
                "--verbose" | "-v" => {
                    verbose = true;
                },
                other => return Err(format!("unknown argument '{}'", other)),
            }
            i += 1;
        }

        Ok(Self {
            zone_dir: zone_dir.ok_or("--zone-dir is required")?,
            ocr_dir: ocr_dir.ok_or("--ocr-dir is required")?,
            output_dir: output_dir.ok_or("--output-dir is required")?,
            threshold,
            usecase,
            verbose,
        })
    }
}

fn main() -> ExitCode {
    let args = match CliArgs::from_args() {
        Ok(args) => args,
        Err(msg) => {
            eprintln!("Error: {}", msg);
            return ExitCode::FAILURE;
        },
    };

    if args.verbose {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else {
        env_logger::init();
    }

    let config = MappingConfig::new()
        .with_threshold(args.threshold)
        .with_usecase(args.usecase);
    // Programmer errors are fatal before any page is touched.
    if let Err(err) = config.validate() {
        eprintln!("Error: {}", err);
        return ExitCode::FAILURE;
    }

    println!("Zone to OCR Mapper");
    println!("Zone directory:   {}", args.zone_dir.display());
    println!("OCR directory:    {}", args.ocr_dir.display());
    println!("Output directory: {}", args.output_dir.display());
    println!("IoU threshold:    {}", args.threshold);
    println!("Usecase:          {}\n", args.usecase.name());

    let summary = match pipeline::run(&args.zone_dir, &args.ocr_dir, &args.output_dir, &config) {
        Ok(summary) => summary,
        Err(err) => {
            eprintln!("Error: {}", err);
            return ExitCode::FAILURE;
        },
    };

    println!("{}", "=".repeat(60));
    println!("MAPPING COMPLETE");
    println!("{}", "=".repeat(60));
    println!("Page pairs:   {}", summary.attempted);
    println!("✓ Succeeded:  {}", summary.succeeded);
    println!("✗ Skipped:    {}", summary.failed);
    println!("Output:       {}", args.output_dir.display());

    // Per-page errors are non-fatal; attempting every discovered pair is a
    // successful run.
    ExitCode::SUCCESS
}
