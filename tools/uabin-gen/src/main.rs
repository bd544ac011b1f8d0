use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;
use uabin_codegen::{GenerateOptions, IdTable, TypeDictionary, generate};

#[derive(Parser)]
#[command(
    name = "uabin-gen",
    about = "Generate Rust types and registry initializers from a type dictionary"
)]
struct Cli {
    /// Type dictionary in its JSON rendition
    #[arg(long = "in", default_value = "schema/Opc.Ua.Types.json")]
    input: PathBuf,

    /// Numeric identifier table (Name,Id,Kind CSV)
    #[arg(long)]
    ids: Option<PathBuf>,

    /// Output directory
    #[arg(long, default_value = "src/gen")]
    out: PathBuf,

    /// Module path imported by every generated file
    #[arg(long, default_value = "crate::gen_prelude")]
    prelude: String,
}

impl Cli {
    fn run(self) -> Result<()> {
        let text = fs::read_to_string(&self.input)
            .with_context(|| format!("failed to read {}", self.input.display()))?;
        let dict = TypeDictionary::from_json(&text)
            .with_context(|| format!("failed to parse {}", self.input.display()))?;

        let ids = match &self.ids {
            Some(path) => {
                let text = fs::read_to_string(path)
                    .with_context(|| format!("failed to read {}", path.display()))?;
                let table = IdTable::from_csv(&text)
                    .with_context(|| format!("failed to parse {}", path.display()))?;
                Some(table)
            }
            None => None,
        };

        let options = GenerateOptions {
            prelude: self.prelude,
            ..Default::default()
        };
        let files = generate(&dict, ids.as_ref(), &options)
            .with_context(|| format!("failed to generate code from {}", self.input.display()))?;
        files.write_to(&self.out)?;

        tracing::info!(
            out = %self.out.display(),
            files = files.files().len(),
            "generation complete"
        );
        Ok(())
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    Cli::parse().run()
}
