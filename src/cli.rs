//! Interactive menu driver over a [`Ledger`].
//!
//! The driver only parses input and renders output; every ledger decision is
//! made by the core. It is generic over its reader and writer so tests can
//! run whole sessions against in-memory buffers.

use crate::blockchain::{Block, Ledger};
use crate::config::Config;
use crate::error::Result;
use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, ContentArrangement, Table};
use std::io::{BufRead, Write};
use tracing::debug;

/// Split raw input into transactions with `str::split` semantics, so an
/// empty line yields a single empty transaction.
pub fn parse_transactions(input: &str, delimiter: &str, trim: bool) -> Vec<String> {
    input
        .split(delimiter)
        .map(|tx| if trim { tx.trim() } else { tx })
        .map(str::to_string)
        .collect()
}

/// Shorten `hash` to `preview` characters; 0 keeps it whole.
pub fn abbreviate(hash: &str, preview: usize) -> String {
    if preview == 0 || hash.chars().count() <= preview {
        hash.to_string()
    } else {
        format!("{}...", hash.chars().take(preview).collect::<String>())
    }
}

/// Plain-text rendering of one block, one field per line.
pub fn render_block(block: &Block) -> String {
    let mut out = String::new();
    out.push_str(&format!("Block #{}\n", block.index));
    out.push_str(&format!("Timestamp: {}\n", block.timestamp));
    out.push_str("Transactions:\n");
    for transaction in &block.transactions {
        out.push_str(&format!("  {}\n", transaction));
    }
    out.push_str(&format!("Merkle Root: {}\n", block.merkle_root_text()));
    out.push_str(&format!("Previous Hash: {}\n", block.previous_hash));
    out.push_str(&format!("Hash: {}\n", block.hash));
    out
}

/// Table of every branch with its height and tip.
pub fn render_branches(ledger: &Ledger, hash_preview: usize) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Branch", "Blocks", "Latest Hash", "Active"]);

    for name in ledger.branch_names() {
        let blocks = ledger.branch(name).unwrap_or(&[]);
        let tip = blocks
            .last()
            .map(|b| abbreviate(&b.hash, hash_preview))
            .unwrap_or_else(|| "-".to_string());
        let active = if name == ledger.current_branch() { "*" } else { "" };
        table.add_row(vec![
            Cell::new(name),
            Cell::new(blocks.len()),
            Cell::new(tip),
            Cell::new(active),
        ]);
    }
    table.to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    AddBlock,
    PrintChain,
    Validate,
    SwitchBranch,
    Quit,
    ListBranches,
    ExportJson,
}

impl MenuChoice {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(MenuChoice::AddBlock),
            "2" => Some(MenuChoice::PrintChain),
            "3" => Some(MenuChoice::Validate),
            "4" => Some(MenuChoice::SwitchBranch),
            "5" => Some(MenuChoice::Quit),
            "6" => Some(MenuChoice::ListBranches),
            "7" => Some(MenuChoice::ExportJson),
            _ => None,
        }
    }
}

pub struct Session<R, W> {
    ledger: Ledger,
    config: Config,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(ledger: Ledger, config: Config, input: R, output: W) -> Self {
        Self {
            ledger,
            config,
            input,
            output,
        }
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn into_parts(self) -> (Ledger, W) {
        (self.ledger, self.output)
    }

    /// Run the menu until the user quits or input ends.
    pub fn run(&mut self) -> Result<()> {
        loop {
            self.print_menu()?;
            let Some(line) = self.prompt("Enter your choice: ")? else {
                break;
            };

            match MenuChoice::parse(&line) {
                Some(MenuChoice::AddBlock) => self.add_block()?,
                Some(MenuChoice::PrintChain) => self.print_chain()?,
                Some(MenuChoice::Validate) => self.validate()?,
                Some(MenuChoice::SwitchBranch) => self.switch_branch()?,
                Some(MenuChoice::ListBranches) => self.list_branches()?,
                Some(MenuChoice::ExportJson) => self.export_json()?,
                Some(MenuChoice::Quit) => {
                    writeln!(self.output, "Goodbye!")?;
                    return Ok(());
                }
                None => debug!(choice = %line, "unrecognised menu choice"),
            }
        }
        writeln!(self.output)?;
        Ok(())
    }

    fn print_menu(&mut self) -> Result<()> {
        let title = self.paint("Blockchain Menu:", |s| s.bright_cyan().bold());
        writeln!(self.output, "\n{}", title)?;
        writeln!(self.output, "1. Add a Block")?;
        writeln!(self.output, "2. Print Blockchain")?;
        writeln!(self.output, "3. Validate Blockchain")?;
        writeln!(self.output, "4. Switch Branch")?;
        writeln!(self.output, "5. Quit")?;
        writeln!(self.output, "6. List Branches")?;
        writeln!(self.output, "7. Export Branch as JSON")?;
        Ok(())
    }

    /// Write `message`, then read one line without its line terminator.
    /// `None` means end of input.
    fn prompt(&mut self, message: &str) -> Result<Option<String>> {
        write!(self.output, "{}", message)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.strip_suffix('\n').unwrap_or(&line);
        let trimmed = trimmed.strip_suffix('\r').unwrap_or(trimmed);
        Ok(Some(trimmed.to_string()))
    }

    fn add_block(&mut self) -> Result<()> {
        let message = format!(
            "Enter transactions ({}-separated): ",
            describe_delimiter(&self.config.ledger.transaction_delimiter)
        );
        let Some(line) = self.prompt(&message)? else {
            return Ok(());
        };
        let transactions = parse_transactions(
            &line,
            &self.config.ledger.transaction_delimiter,
            self.config.ledger.trim_transactions,
        );

        let outcome = self.ledger.add_block(transactions).map(|_| ());
        match outcome {
            Ok(()) => writeln!(self.output, "Block added to the blockchain.")?,
            Err(e) => {
                let text = self.paint(&format!("Could not add block: {}", e), |s| s.red());
                writeln!(self.output, "{}", text)?
            }
        }
        Ok(())
    }

    fn print_chain(&mut self) -> Result<()> {
        let rendered: Vec<String> = self.ledger.blocks().iter().map(render_block).collect();
        for block in rendered {
            writeln!(self.output, "{}", block)?;
        }
        Ok(())
    }

    fn validate(&mut self) -> Result<()> {
        let report = self.ledger.verify_chain();
        match &report.first_fault {
            None => {
                let text = self.paint("Blockchain is valid.", |s| s.bright_green());
                writeln!(self.output, "{}", text)?;
            }
            Some((position, fault)) => {
                let text = self.paint("Blockchain is NOT valid.", |s| s.red().bold());
                writeln!(self.output, "{}", text)?;
                writeln!(self.output, "  Block at position {}: {}", position, fault)?;
            }
        }
        Ok(())
    }

    fn switch_branch(&mut self) -> Result<()> {
        let Some(name) = self.prompt("Enter branch name: ")? else {
            return Ok(());
        };
        self.ledger.switch_branch(&name);
        writeln!(self.output, "Switched to branch: {}", name)?;
        Ok(())
    }

    fn list_branches(&mut self) -> Result<()> {
        let table = render_branches(&self.ledger, self.config.display.hash_preview);
        writeln!(self.output, "{}", table)?;
        Ok(())
    }

    fn export_json(&mut self) -> Result<()> {
        let json = self.ledger.export_json()?;
        writeln!(self.output, "{}", json)?;
        Ok(())
    }

    fn paint(&self, text: &str, style: impl Fn(&str) -> ColoredString) -> String {
        if self.config.display.color {
            style(text).to_string()
        } else {
            text.to_string()
        }
    }
}

fn describe_delimiter(delimiter: &str) -> &str {
    match delimiter {
        "," => "comma",
        ";" => "semicolon",
        "|" => "pipe",
        other => other,
    }
}
