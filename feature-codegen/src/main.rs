//! binary codegen tool.
//!
//! Takes a path to the feature registry table as input, and writes the
//! generated declaration to stdout (or to `--output`). A path to a `.toml`
//! codegen plan regenerates every file listed in the plan.

use std::{
    ffi::OsStr,
    path::{Path, PathBuf},
};

use clap::Parser;
use feature_codegen::{
    generate_file, generate_to_file, write_generated, CodegenPlan, ErrorReport,
};
use feature_registry::OutputFormat;
use miette::miette;

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Generate the list of default feature tags from the IFT feature registry (https://w3c.github.io/IFT/Overview.html#feature-tag-list)."
)]
struct Args {
    /// The feature registry table, or a codegen plan ending in '.toml'.
    input: PathBuf,

    /// The language to generate: 'rust' or 'cpp'.
    #[arg(short, long, default_value_t = OutputFormat::Rust)]
    format: OutputFormat,

    /// Write the generated code to this file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> miette::Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.input.extension() == Some(OsStr::new("toml")) {
        return run_plan(&args.input);
    }

    match &args.output {
        Some(target) => generate_to_file(&args.input, target, args.format)?,
        None => print!("{}", generate_file(&args.input, args.format)?),
    }

    Ok(())
}

fn run_plan(path: &Path) -> miette::Result<()> {
    ensure_correct_working_directory()?;
    let contents = read_contents(path)?;
    let plan: CodegenPlan =
        toml::from_str(&contents).map_err(|e| miette!("failed to parse plan: '{}'", e))?;

    // generate everything before touching any target
    let results = plan
        .generate
        .iter()
        .map(|op| -> miette::Result<String> {
            let format = op
                .output_format()
                .map_err(|e| miette!("bad format for '{}': {e}", op.target.display()))?;
            Ok(generate_file(&op.source, format)?)
        })
        .collect::<Result<Vec<_>, _>>()?;

    for (op, generated) in plan.generate.iter().zip(results.iter()) {
        write_generated(&op.target, generated)?;
    }
    Ok(())
}

fn ensure_correct_working_directory() -> miette::Result<()> {
    if !(Path::new("feature-registry").is_dir() && Path::new("resources").is_dir()) {
        return Err(miette!(
            "codegen tool must be run from the root of the workspace"
        ));
    }
    Ok(())
}

fn read_contents(path: &Path) -> miette::Result<String> {
    std::fs::read_to_string(path).map_err(|e| {
        { ErrorReport::message(format!("error reading '{}': {}", path.display(), e)) }.into()
    })
}

