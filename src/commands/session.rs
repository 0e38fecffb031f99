//! Interactive prompt loop around [`ReportCommand`].

use crate::commands::report::{CycleReport, Extraction, ReportCommand};
use crate::listing::ListingSource;
use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use tracing::error;

const QUERY_PROMPT: &str = "Digite o produto que deseja pesquisar: ";
const REPEAT_PROMPT: &str = "Deseja refazer a busca? 1 para Sim, 2 para Não: ";
const NOT_A_NUMBER: &str = "Entrada inválida! Digite um número (1 para Sim ou 2 para Não).";
const OUT_OF_RANGE: &str = "Entrada inválida! Digite 1 para Sim ou 2 para Não.";

/// Answer to the repeat prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepeatChoice {
    Again,
    Quit,
}

/// Line-oriented console over any reader/writer pair.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Consumes the console, returning the writer.
    pub fn into_output(self) -> W {
        self.output
    }

    /// Writes one line of output.
    pub fn say(&mut self, message: &str) -> Result<()> {
        writeln!(self.output, "{}", message).context("Failed to write to console")
    }

    fn prompt(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.output, "{}", prompt).context("Failed to write to console")?;
        self.output.flush().context("Failed to write to console")?;

        let mut line = String::new();
        let read = self.input.read_line(&mut line).context("Failed to read from console")?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    /// Asks for a search term. Returns `None` when input is exhausted.
    pub fn read_query(&mut self) -> Result<Option<String>> {
        self.prompt(QUERY_PROMPT)
    }

    /// Asks whether to search again until the answer is 1 or 2.
    ///
    /// End of input counts as 2.
    pub fn ask_repeat(&mut self) -> Result<RepeatChoice> {
        loop {
            let Some(answer) = self.prompt(REPEAT_PROMPT)? else {
                return Ok(RepeatChoice::Quit);
            };

            match answer.trim().parse::<i64>() {
                Ok(1) => return Ok(RepeatChoice::Again),
                Ok(2) => return Ok(RepeatChoice::Quit),
                Ok(_) => self.say(OUT_OF_RANGE)?,
                Err(_) => self.say(NOT_A_NUMBER)?,
            }
        }
    }

    /// Prints where a cycle's files were saved.
    pub fn show_report(&mut self, report: &CycleReport) -> Result<()> {
        self.say(&format!("Planilha salva em: {}", report.report_path.display()))?;
        if let Some(plot) = &report.plot_path {
            self.say(&format!("Gráfico salvo em: {}", plot.display()))?;
        }
        Ok(())
    }
}

/// Drives PROMPT → cycle → ASK_REPEAT until the user quits.
pub struct Session<'a, S> {
    command: &'a ReportCommand,
    source: &'a S,
    once: bool,
}

impl<'a, S: ListingSource> Session<'a, S> {
    pub fn new(command: &'a ReportCommand, source: &'a S) -> Self {
        Self { command, source, once: false }
    }

    /// Stops after the first cycle instead of asking to repeat.
    pub fn once(mut self, once: bool) -> Self {
        self.once = once;
        self
    }

    /// Runs the loop. `first_query` replaces the first prompt when given.
    pub async fn run<R: BufRead, W: Write>(
        &self,
        console: &mut Console<R, W>,
        first_query: Option<String>,
    ) -> Result<()> {
        let mut pending = first_query;

        loop {
            let query = match pending.take() {
                Some(query) => query,
                None => match console.read_query()? {
                    Some(query) => query,
                    None => break,
                },
            };

            match self.command.extract(self.source, &query).await {
                Extraction::Records(records) => {
                    // The count is shown before any file is written.
                    console.say(&format!("Itens encontrados: {}", records.len()))?;
                    match self.command.write_outputs(&records, &query) {
                        Ok(report) => console.show_report(&report)?,
                        Err(e) => {
                            error!("Cycle for {:?} failed: {:#}", query, e);
                            console.say(&format!("Erro: {:#}", e))?;
                        }
                    }
                }
                Extraction::Empty => console.say("Nenhum produto encontrado.")?,
                Extraction::FetchFailed(_) => console.say("Erro ao buscar a página.")?,
            }

            if self.once || console.ask_repeat()? == RepeatChoice::Quit {
                break;
            }
        }

        console.say("Fim da busca.")
    }
}
