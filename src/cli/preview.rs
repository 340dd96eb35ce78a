use std::path::Path;

use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::cli::InputArgs;
use crate::error::Result;
use crate::pipeline::convert_file;
use crate::renderer::Grid;
use crate::settings::load_settings;

pub fn grid_table(grid: &Grid, notes: bool) -> Table {
    let mut table = Table::new();
    table.set_header(grid.columns.iter().map(|c| c.header.as_str()));

    for i in 0..grid.max_rows() {
        let row = grid.columns.iter().map(|column| match column.cells.get(i) {
            Some(cell) if notes => Cell::new(format!("{}\n{}", cell.value, cell.annotation.dimmed())),
            Some(cell) => Cell::new(&cell.value),
            None => Cell::new(""),
        });
        table.add_row(row);
    }
    table
}

pub fn run(input: &str, notes: bool, input_args: &InputArgs) -> Result<()> {
    let settings = load_settings();
    let opts = input_args.resolve(&settings)?;
    let result = convert_file(Path::new(input), &opts)?;

    if result.grid.is_empty() {
        println!("{}", "No rows with a YYYY/MM/DD date were found.".yellow());
        return Ok(());
    }
    println!("{}", grid_table(&result.grid, notes));
    Ok(())
}
