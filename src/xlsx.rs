use std::path::Path;

use rust_xlsxwriter::{Note, Workbook};

use crate::error::{GridError, Result};
use crate::renderer::Grid;

const MAX_COLUMNS: usize = 16_384;

/// Write the grid to a single-sheet workbook: day labels on row 1, one cell
/// per transaction below, the description attached as a note.
pub fn write_workbook(grid: &Grid, path: &Path, note_author: &str) -> Result<()> {
    if grid.columns.len() > MAX_COLUMNS {
        return Err(GridError::TooManyColumns(grid.columns.len()));
    }

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    for (col_idx, column) in grid.columns.iter().enumerate() {
        let col = col_idx as u16;
        worksheet.write_string(0, col, &column.header)?;
        for cell in &column.cells {
            let row = cell.row as u32;
            worksheet.write_string(row, col, &cell.value)?;
            let note = Note::new(&cell.annotation).set_author(note_author);
            worksheet.insert_note(row, col, &note)?;
        }
        worksheet.set_column_width(col, grid.column_width)?;
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    workbook.save(path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bucketizer::bucketize;
    use crate::renderer::{render, RenderOptions};
    use calamine::{open_workbook_auto, Data, Reader};

    fn sample_grid() -> Grid {
        let rows = vec![
            vec!["2024/01/01".to_string(), "desc1".to_string(), "100".to_string()],
            vec!["2024/01/01".to_string(), "desc1b".to_string(), "40".to_string()],
            vec!["2024/01/03".to_string(), "desc2".to_string(), "2500".to_string()],
        ];
        let opts = RenderOptions {
            amount_index: 1,
            description_index: 0,
            currency_symbol: "¥".to_string(),
        };
        render(&bucketize(rows, 0), &opts).unwrap()
    }

    fn text(d: Option<&Data>) -> Option<String> {
        match d {
            Some(Data::String(s)) => Some(s.clone()),
            _ => None,
        }
    }

    #[test]
    fn test_write_workbook_layout() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.xlsx");
        write_workbook(&sample_grid(), &path, "daygrid").unwrap();

        let mut wb = open_workbook_auto(&path).unwrap();
        let range = wb.worksheet_range("Sheet1").unwrap();
        assert_eq!(text(range.get_value((0, 0))).as_deref(), Some("01/01"));
        assert_eq!(text(range.get_value((0, 1))).as_deref(), Some("01/02"));
        assert_eq!(text(range.get_value((0, 2))).as_deref(), Some("01/03"));
        assert_eq!(text(range.get_value((1, 0))).as_deref(), Some("¥100"));
        assert_eq!(text(range.get_value((2, 0))).as_deref(), Some("¥40"));
        assert_eq!(text(range.get_value((1, 2))).as_deref(), Some("¥2,500"));
        assert_eq!(text(range.get_value((1, 1))), None);
    }

    fn part(path: &Path, name: &str) -> String {
        use std::io::Read;
        let file = std::fs::File::open(path).unwrap();
        let mut archive = zip::ZipArchive::new(file).unwrap();
        let mut xml = String::new();
        archive.by_name(name).unwrap().read_to_string(&mut xml).unwrap();
        xml
    }

    #[test]
    fn test_write_workbook_notes_and_widths() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.xlsx");
        write_workbook(&sample_grid(), &path, "Ledger Bot").unwrap();

        let comments = part(&path, "xl/comments1.xml");
        assert_eq!(comments.matches("<comment ").count(), 3);
        assert!(comments.contains("<author>Ledger Bot</author>"));
        for desc in ["desc1", "desc1b", "desc2"] {
            assert!(comments.contains(desc), "missing note {desc}");
        }

        let sheet = part(&path, "xl/worksheets/sheet1.xml");
        assert!(sheet.contains("<cols>"));
        assert!(sheet.contains("customWidth=\"1\""));
    }

    #[test]
    fn test_write_workbook_empty_grid() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("empty.xlsx");
        let grid = Grid {
            columns: Vec::new(),
            column_width: crate::renderer::column_width(),
        };
        write_workbook(&grid, &path, "daygrid").unwrap();
        assert!(path.exists());
    }
}
