use std::path::{Path, PathBuf};

use colored::Colorize;

use crate::cli::{InputArgs, OutputFormat};
use crate::error::{GridError, Result};
use crate::pipeline::{convert_file, Conversion};
use crate::renderer::Grid;
use crate::settings::load_settings;

fn write_json(grid: &Grid, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(grid)?;
    std::fs::write(path, format!("{json}\n"))?;
    Ok(())
}

fn summary(result: &Conversion) -> String {
    format!(
        "{} days, {} transactions, {} rows skipped",
        result.days, result.transactions, result.dropped
    )
}

pub fn run(
    input: &str,
    output: Option<String>,
    format: Option<OutputFormat>,
    input_args: &InputArgs,
) -> Result<()> {
    let settings = load_settings();
    let opts = input_args.resolve(&settings)?;

    let input_path = PathBuf::from(input);
    let format = format.unwrap_or_else(|| OutputFormat::infer(output.as_deref()));
    let output_path = output
        .map(PathBuf::from)
        .unwrap_or_else(|| input_path.with_extension(format.extension()));
    if output_path == input_path {
        return Err(GridError::OutputIsInput(output_path.display().to_string()));
    }

    // Nothing is written unless the whole grid rendered.
    let result = convert_file(&input_path, &opts)?;

    match format {
        #[cfg(feature = "xlsx")]
        OutputFormat::Xlsx => {
            crate::xlsx::write_workbook(&result.grid, &output_path, &settings.note_author)?
        }
        OutputFormat::Json => write_json(&result.grid, &output_path)?,
    }

    println!("Wrote {}", output_path.display());
    if result.grid.is_empty() {
        println!("{}", "No rows with a YYYY/MM/DD date were found.".yellow());
    }
    println!("{}", summary(&result).dimmed());
    Ok(())
}
