use clap::Parser;
use pixmask::{pipeline, Rotation};
use std::{path::PathBuf, process::ExitCode};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Mask a cover image, describe it, recover it and verify the round trip")]
struct Args {
    /// Directory holding every input and output file
    #[arg(long, default_value = ".")]
    dir: PathBuf,

    /// First source pixel sampled by the descriptors
    #[arg(long, default_value_t = 100)]
    offset: usize,

    /// Per-byte rotation in bits, 1 to 7
    #[arg(long, default_value_t = 3)]
    rotation: u32,

    #[arg(long)]
    cover: Option<PathBuf>,

    #[arg(long)]
    distortion: Option<PathBuf>,

    #[arg(long)]
    mask: Option<PathBuf>,

    #[arg(long)]
    xored: Option<PathBuf>,

    #[arg(long)]
    rotated: Option<PathBuf>,

    #[arg(long)]
    reconstructed: Option<PathBuf>,

    #[arg(long)]
    descriptor: Option<PathBuf>,

    #[arg(long)]
    secondary_descriptor: Option<PathBuf>,

    #[arg(long)]
    reference_descriptor: Option<PathBuf>,

    #[arg(long)]
    secondary_reference: Option<PathBuf>,

    /// Log descriptor contents and per-step details
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn into_config(self) -> anyhow::Result<pipeline::Config> {
        let mut config = pipeline::Config::in_dir(&self.dir);
        config.offset = self.offset;
        config.rotation = Rotation::new(self.rotation)?;

        let overrides = [
            (&mut config.cover, self.cover),
            (&mut config.distortion, self.distortion),
            (&mut config.mask, self.mask),
            (&mut config.xored, self.xored),
            (&mut config.rotated, self.rotated),
            (&mut config.reconstructed, self.reconstructed),
            (&mut config.descriptor, self.descriptor),
            (&mut config.secondary_descriptor, self.secondary_descriptor),
            (&mut config.reference_descriptor, self.reference_descriptor),
            (&mut config.secondary_reference, self.secondary_reference),
        ];
        for (slot, path) in overrides {
            if let Some(path) = path {
                *slot = self.dir.join(path);
            }
        }

        Ok(config)
    }
}

fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    let config = args.into_config()?;
    let report = pipeline::run(&config);

    for (step, error) in report.failures() {
        println!("ERROR {step}: {error}");
    }
    for check in report.checks() {
        println!("{check}");
    }

    Ok(ExitCode::from(report.exit_code()))
}
