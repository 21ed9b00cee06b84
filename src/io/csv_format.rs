//! Transaction row parsing and report output formats
//!
//! This module centralizes all format concerns, providing:
//! - Conversion of a raw CSV row into a cleaned transaction
//! - Report serialization as pretty JSON or as CSV tables
//!
//! Input rows carry one item per field and no fixed column count. Output CSV
//! tables join item lists with `;` so each list stays a single field.
//!
//! All functions are pure apart from writing to the given writer.

use crate::types::{AnalysisReport, MiningError, Transaction};
use clap::ValueEnum;
use csv::Writer;
use std::collections::HashSet;
use std::io::Write;

/// Separator used inside a CSV field holding several item labels
pub const ITEM_SEPARATOR: &str = ";";

/// Available report output formats
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Full report as pretty-printed JSON
    #[default]
    Json,
    /// Association rules as a CSV table
    RulesCsv,
    /// Frequent itemsets as a CSV table
    ItemsetsCsv,
}

/// Convert the fields of one CSV row into a transaction
///
/// This function:
/// - Trims surrounding whitespace from every field
/// - Drops empty fields (padding of short rows)
/// - Removes repeated labels, keeping the first occurrence
///
/// # Returns
///
/// `None` if no item is left, so blank rows never become transactions.
pub fn parse_fields<'a, I>(fields: I) -> Option<Transaction>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen: HashSet<&str> = HashSet::new();
    let mut transaction = Transaction::new();

    for field in fields {
        let label = field.trim();
        if label.is_empty() || !seen.insert(label) {
            continue;
        }
        transaction.push(label.to_string());
    }

    if transaction.is_empty() {
        None
    } else {
        Some(transaction)
    }
}

/// Write a report in the requested format
///
/// # Arguments
///
/// * `report` - The assembled analysis report
/// * `format` - Output format
/// * `output` - Mutable reference to a writer for the serialized report
///
/// # Errors
///
/// Returns `MiningError::OutputError` if serialization or writing fails.
pub fn write_report(
    report: &AnalysisReport,
    format: OutputFormat,
    output: &mut dyn Write,
) -> Result<(), MiningError> {
    match format {
        OutputFormat::Json => write_json(report, output),
        OutputFormat::RulesCsv => write_rules_csv(report, output),
        OutputFormat::ItemsetsCsv => write_itemsets_csv(report, output),
    }
}

/// Write the whole report as pretty JSON followed by a newline
pub fn write_json(report: &AnalysisReport, output: &mut dyn Write) -> Result<(), MiningError> {
    serde_json::to_writer_pretty(&mut *output, report)?;
    writeln!(output).map_err(output_error)?;
    output.flush().map_err(output_error)?;

    Ok(())
}

/// Write association rules as CSV
///
/// Columns: antecedents, consequents, support, confidence, lift,
/// antecedent_support, consequent_support, leverage, conviction. Conviction
/// is left empty for rules with confidence 1. Rows keep the report's order.
pub fn write_rules_csv(report: &AnalysisReport, output: &mut dyn Write) -> Result<(), MiningError> {
    let mut writer = Writer::from_writer(output);

    writer
        .write_record([
            "antecedents",
            "consequents",
            "support",
            "confidence",
            "lift",
            "antecedent_support",
            "consequent_support",
            "leverage",
            "conviction",
        ])
        .map_err(csv_output_error)?;

    for rule in &report.association_rules {
        writer
            .write_record(&[
                rule.antecedents.join(ITEM_SEPARATOR),
                rule.consequents.join(ITEM_SEPARATOR),
                rule.support.to_string(),
                rule.confidence.to_string(),
                rule.lift.to_string(),
                rule.antecedent_support.to_string(),
                rule.consequent_support.to_string(),
                rule.leverage.to_string(),
                rule.conviction.map(|c| c.to_string()).unwrap_or_default(),
            ])
            .map_err(csv_output_error)?;
    }

    writer.flush().map_err(output_error)?;
    Ok(())
}

/// Write frequent itemsets as CSV with columns itemset, support
pub fn write_itemsets_csv(
    report: &AnalysisReport,
    output: &mut dyn Write,
) -> Result<(), MiningError> {
    let mut writer = Writer::from_writer(output);

    writer
        .write_record(["itemset", "support"])
        .map_err(csv_output_error)?;

    for entry in &report.frequent_itemsets {
        writer
            .write_record(&[entry.itemset.join(ITEM_SEPARATOR), entry.support.to_string()])
            .map_err(csv_output_error)?;
    }

    writer.flush().map_err(output_error)?;
    Ok(())
}

fn output_error(error: std::io::Error) -> MiningError {
    MiningError::OutputError {
        message: error.to_string(),
    }
}

fn csv_output_error(error: csv::Error) -> MiningError {
    MiningError::OutputError {
        message: error.to_string(),
    }
}
