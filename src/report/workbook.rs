//! XLSX rendering of a [`ReportLayout`].

use crate::report::layout::{ReportLayout, HEADERS, PANEL_COLUMN, SHEET_NAME};
use crate::report::summary::PriceBand;
use anyhow::{Context, Result};
use rust_xlsxwriter::{Color, Format, Workbook};
use std::path::Path;
use tracing::debug;

/// Fill for prices above the mean.
pub const HIGH_FILL: u32 = 0xFFC7CE;

/// Fill for prices at or below the mean.
pub const LOW_FILL: u32 = 0xC6EFCE;

/// Writes report layouts as XLSX workbooks.
pub struct WorkbookWriter {
    header: Format,
    high: Format,
    low: Format,
}

impl WorkbookWriter {
    pub fn new() -> Self {
        Self {
            header: Format::new().set_bold(),
            high: Format::new().set_background_color(Color::RGB(HIGH_FILL)),
            low: Format::new().set_background_color(Color::RGB(LOW_FILL)),
        }
    }

    /// Renders `layout` and saves it to `path`, replacing any existing file.
    pub fn save(&self, layout: &ReportLayout, path: &Path) -> Result<()> {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.set_name(SHEET_NAME)?;

        for (col, header) in HEADERS.iter().enumerate() {
            sheet.write_string_with_format(0, col as u16, *header, &self.header)?;
        }

        for (i, row) in layout.rows.iter().enumerate() {
            let r = i as u32 + 1;
            let fill = match row.band {
                PriceBand::High => &self.high,
                PriceBand::Low => &self.low,
            };

            sheet.write_string(r, 0, row.record.name())?;
            sheet.write_number_with_format(r, 1, row.record.price(), fill)?;
            sheet.write_string(r, 2, row.record.url())?;
        }

        for (i, line) in layout.panel.iter().enumerate() {
            sheet.write_string(i as u32, PANEL_COLUMN, line.as_str())?;
        }

        for (col, width) in layout.column_widths.iter().enumerate() {
            sheet.set_column_width(col as u16, *width)?;
        }

        debug!("Saving workbook with {} rows to {}", layout.rows.len(), path.display());
        workbook
            .save(path)
            .with_context(|| format!("Failed to write spreadsheet: {}", path.display()))
    }
}

impl Default for WorkbookWriter {
    fn default() -> Self {
        Self::new()
    }
}
