//! Spreadsheet report: price statistics, sheet layout, and XLSX output.

pub mod layout;
pub mod summary;
pub mod workbook;

pub use layout::ReportLayout;
pub use summary::{PriceBand, PriceSummary};
pub use workbook::WorkbookWriter;

use std::path::{Path, PathBuf};

/// File-name stem shared by all outputs of a query.
///
/// Spaces become underscores. Path separators and characters that are not
/// allowed in file names also become underscores, so every output stays
/// directly inside the output directory.
pub fn output_stem(query: &str) -> String {
    let name: String = query
        .trim()
        .chars()
        .map(|c| match c {
            ' ' | '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    format!("mercadolivre_{}", name)
}

/// Path of the spreadsheet for a query.
pub fn report_path(output_dir: &Path, query: &str) -> PathBuf {
    output_dir.join(format!("{}_products.xlsx", output_stem(query)))
}

/// Path of the box plot for a query.
pub fn plot_path(output_dir: &Path, query: &str) -> PathBuf {
    output_dir.join(format!("{}_boxplot.svg", output_stem(query)))
}
