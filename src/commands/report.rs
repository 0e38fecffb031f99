//! One query cycle: fetch and extract, then report and plot.

use crate::config::Config;
use crate::listing::{FetchError, ListingSource, Parser, ProductRecord};
use crate::opener::{self, FileOpener};
use crate::plot::BoxPlot;
use crate::report::{self, PriceSummary, ReportLayout, WorkbookWriter};
use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Files written for a query that had products.
#[derive(Debug)]
pub struct CycleReport {
    pub count: usize,
    pub summary: PriceSummary,
    pub report_path: PathBuf,
    pub plot_path: Option<PathBuf>,
}

/// What a listing fetch yielded.
#[derive(Debug)]
pub enum Extraction {
    /// Product cards were found.
    Records(Vec<ProductRecord>),
    /// The page was fetched but had no product cards.
    Empty,
    /// The page could not be fetched.
    FetchFailed(FetchError),
}

/// Runs query cycles against a listing source.
pub struct ReportCommand {
    config: Config,
    parser: Parser,
    writer: WorkbookWriter,
    plot: BoxPlot,
    opener: Box<dyn FileOpener>,
}

impl ReportCommand {
    /// Creates a command whose file opener follows `config.open_files`.
    pub fn new(config: Config) -> Result<Self> {
        let opener = opener::opener_for(config.open_files);
        Self::with_opener(config, opener)
    }

    /// Creates a command with an explicit file opener.
    pub fn with_opener(config: Config, opener: Box<dyn FileOpener>) -> Result<Self> {
        let parser = Parser::from_origin(&config.site_origin)?;
        Ok(Self { config, parser, writer: WorkbookWriter::new(), plot: BoxPlot::new(), opener })
    }

    /// Fetches the listing for `query` and extracts its products.
    ///
    /// Never touches the filesystem.
    pub async fn extract(&self, source: &impl ListingSource, query: &str) -> Extraction {
        info!("Searching for: {}", query);

        let html = match source.fetch(query).await {
            Ok(html) => html,
            Err(e) => {
                warn!("{}", e);
                return Extraction::FetchFailed(e);
            }
        };

        let records = self.parser.parse_listing(&html);
        if records.is_empty() {
            debug!("No product cards for {}", query);
            return Extraction::Empty;
        }
        Extraction::Records(records)
    }

    /// Writes the spreadsheet and, when enabled, the box plot for `records`.
    ///
    /// Each file is handed to the opener right after it is saved.
    pub fn write_outputs(&self, records: &[ProductRecord], query: &str) -> Result<CycleReport> {
        let output_dir = &self.config.output_dir;
        std::fs::create_dir_all(output_dir).with_context(|| {
            format!("Failed to create output directory: {}", output_dir.display())
        })?;

        let layout = ReportLayout::build(records, query);
        let report_path = report::report_path(output_dir, query);
        self.writer.save(&layout, &report_path)?;
        info!("Saved report to {}", report_path.display());
        opener::open_best_effort(self.opener.as_ref(), &report_path);

        let plot_path = if self.config.plot {
            let path = report::plot_path(output_dir, query);
            self.plot.render(records, query, &path)?;
            info!("Saved plot to {}", path.display());
            opener::open_best_effort(self.opener.as_ref(), &path);
            Some(path)
        } else {
            None
        };

        Ok(CycleReport { count: records.len(), summary: layout.summary, report_path, plot_path })
    }
}
