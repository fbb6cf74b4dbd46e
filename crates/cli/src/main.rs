//! `add_version(1)`: append a new version entry to a VPM repository manifest.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use clap_verbosity_flag::{Verbosity, WarnLevel};

/// Add a new version entry by copying a package's latest one.
///
/// The latest entry is duplicated and only its version number and download
/// URL are updated to the requested version.
#[derive(clap::Parser)]
#[command(name = "add_version")]
struct Opts {
    /// New version string, e.g. 0.3.2
    version: String,

    /// Path to the input repository manifest
    #[arg(long, default_value = "vpm-repo.json")]
    path: PathBuf,

    /// Path to write the updated manifest (defaults to the input path)
    #[arg(long)]
    output: Option<PathBuf>,

    /// Package identifier to update (defaults to the manifest's only package)
    #[arg(long)]
    package: Option<String>,

    #[command(flatten)]
    verbosity: Verbosity<WarnLevel>,
}

impl Opts {
    fn run(self) -> anyhow::Result<()> {
        let output = self.output.unwrap_or_else(|| self.path.clone());

        // Fail on a malformed version before reading anything from disk.
        let _ = vpm_manifest::Version::parse(&self.version)?;

        let mut repository = vpm_repository::load(&self.path)?;
        let package =
            vpm_repository::resolve_package(&repository, self.package.as_deref())?.to_owned();
        let added = vpm_repository::add_version(&mut repository, &package, &self.version)
            .with_context(|| {
                format!(
                    "could not add version {} to {}",
                    self.version,
                    self.path.display()
                )
            })?;
        vpm_repository::save(&repository, &output)?;

        println!(
            "Added version {} based on {} to {}.",
            added.version,
            added.base,
            output.display()
        );
        Ok(())
    }
}

fn main() -> ExitCode {
    let opts = Opts::parse();

    tracing_subscriber::fmt()
        .with_max_level(opts.verbosity.tracing_level_filter())
        .with_writer(std::io::stderr)
        .init();
    tracing::debug!(path = %opts.path.display(), "parsed arguments");

    match opts.run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("Error: {error:#}");
            ExitCode::FAILURE
        }
    }
}
