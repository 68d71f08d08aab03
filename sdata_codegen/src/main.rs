use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use env_logger::Env;
use sdata_codegen::{GenerateOptions, Output};

/// Data persistence made simple: generate a typed store for a struct.
#[derive(Debug, Parser)]
#[command(name = "sdata-gen", version)]
struct Cli {
    /// Path to the source file
    path: PathBuf,

    /// Name of the source struct
    #[arg(value_name = "STRUCT")]
    struct_name: String,

    /// Path to the destination file, or `stdout` / `-`
    #[arg(short, long, default_value = "stdout")]
    output: Output,

    /// Module name for the destination file
    #[arg(short, long)]
    package: Option<String>,

    /// Path to the template file
    #[arg(short, long)]
    template: Option<PathBuf>,
}

impl From<Cli> for GenerateOptions {
    fn from(cli: Cli) -> Self {
        GenerateOptions {
            source: cli.path,
            struct_name: cli.struct_name,
            output: cli.output,
            package: cli.package,
            template: cli.template,
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let generated = sdata_codegen::generate(&cli.into())?;
    log::debug!("wrote {} bytes", generated.code.len());
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("[ERROR] {err}");
            ExitCode::FAILURE
        }
    }
}
