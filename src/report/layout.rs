//! In-memory model of the report sheet, independent of the file format.

use crate::listing::ProductRecord;
use crate::report::summary::{PriceBand, PriceSummary};

/// Name of the product sheet.
pub const SHEET_NAME: &str = "Produtos";

/// Column headers of the product table.
pub const HEADERS: [&str; 3] = ["name", "price", "url"];

/// Zero-based column of the summary panel (column D).
pub const PANEL_COLUMN: u16 = 3;

/// Padding added to the longest cell when sizing a column.
pub const COLUMN_PADDING: usize = 5;

/// One product row with its highlight band.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    pub record: ProductRecord,
    pub band: PriceBand,
}

/// Everything needed to render the report sheet.
#[derive(Debug, Clone)]
pub struct ReportLayout {
    pub query: String,
    pub summary: PriceSummary,
    pub rows: Vec<ReportRow>,
    pub panel: [String; 4],
    /// Width of columns A through D.
    pub column_widths: [f64; 4],
}

impl ReportLayout {
    /// Builds the layout for a set of records.
    pub fn build(records: &[ProductRecord], query: &str) -> Self {
        let summary = PriceSummary::from_records(records);

        let rows: Vec<ReportRow> = records
            .iter()
            .map(|r| ReportRow { record: r.clone(), band: summary.band(r.price()) })
            .collect();

        let panel = panel_lines(&summary);

        let mut columns: [Vec<String>; 4] = Default::default();
        for (column, header) in columns.iter_mut().zip(HEADERS) {
            column.push(header.to_string());
        }
        for row in &rows {
            columns[0].push(row.record.name().to_string());
            columns[1].push(price_text(row.record.price()));
            columns[2].push(row.record.url().to_string());
        }
        columns[PANEL_COLUMN as usize].extend(panel.iter().cloned());

        let column_widths = columns.map(|cells| column_width(&cells));

        Self { query: query.to_string(), summary, rows, panel, column_widths }
    }
}

/// The four summary lines shown next to the table.
pub fn panel_lines(summary: &PriceSummary) -> [String; 4] {
    [
        "Dashboard".to_string(),
        format!("Média de Preços: R$ {:.2}", summary.mean),
        format!("Produtos Acima da Média: {}", summary.above_mean),
        format!("Produtos Abaixo da Média: {}", summary.at_or_below_mean),
    ]
}

/// Text form of a price cell, always carrying a fractional part ("1000.0").
pub fn price_text(price: f64) -> String {
    format!("{:?}", price)
}

/// Width for a column: longest cell in characters plus padding.
pub fn column_width(cells: &[String]) -> f64 {
    let longest = cells.iter().map(|c| c.chars().count()).max().unwrap_or(0);
    (longest + COLUMN_PADDING) as f64
}
