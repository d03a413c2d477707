//! Record export in JSON and CSV
//!
//! Both writers take records in sequence order and write them unchanged;
//! columns and keys follow the record boundary representation
//! (`id, date, timestamp, body, type, amount, sender, receiver, balance, fee, txid`).

use crate::types::{LedgerError, TransactionRecord};
use clap::ValueEnum;
use std::io::Write;

/// Output format for exported records
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// Pretty-printed JSON array
    Json,
    /// CSV with a header row
    Csv,
}

/// Write records in the chosen format
pub fn write_records(
    records: &[TransactionRecord],
    format: ExportFormat,
    output: &mut dyn Write,
) -> Result<(), LedgerError> {
    match format {
        ExportFormat::Json => write_records_json(records, output),
        ExportFormat::Csv => write_records_csv(records, output),
    }
}

/// Write records as a pretty-printed JSON array
pub fn write_records_json(
    records: &[TransactionRecord],
    output: &mut dyn Write,
) -> Result<(), LedgerError> {
    serde_json::to_writer_pretty(&mut *output, records)?;
    writeln!(output)?;
    Ok(())
}

/// Write records as CSV, one row per record
pub fn write_records_csv(
    records: &[TransactionRecord],
    output: &mut dyn Write,
) -> Result<(), LedgerError> {
    let mut writer = csv::Writer::from_writer(output);
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TransactionKind;

    fn record(id: u64, body: &str) -> TransactionRecord {
        TransactionRecord {
            id,
            date: "10 May 2024 4:30:58 PM".to_string(),
            timestamp: "1715351458724".to_string(),
            body: body.to_string(),
            kind: TransactionKind::Payment,
            amount: "1000".to_string(),
            sender: "Unknown".to_string(),
            receiver: "Jane Smith".to_string(),
            balance: "1000".to_string(),
            fee: "0".to_string(),
            txid: "73214484437".to_string(),
        }
    }

    #[test]
    fn test_json_export_round_trips() {
        let records = vec![record(1, "first"), record(2, "second, with comma")];
        let mut output = Vec::new();
        write_records(&records, ExportFormat::Json, &mut output).unwrap();

        let parsed: Vec<TransactionRecord> = serde_json::from_slice(&output).unwrap();
        assert_eq!(parsed, records);
    }

    #[test]
    fn test_csv_export_has_header_and_rows() {
        let records = vec![record(1, "first"), record(2, "second, with comma")];
        let mut output = Vec::new();
        write_records(&records, ExportFormat::Csv, &mut output).unwrap();

        let text = String::from_utf8(output).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines[0],
            "id,date,timestamp,body,type,amount,sender,receiver,balance,fee,txid"
        );
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("1,10 May 2024 4:30:58 PM,1715351458724,first,payment,1000"));
        assert!(lines[2].contains("\"second, with comma\""));
    }

    #[test]
    fn test_csv_export_of_nothing_is_empty() {
        let mut output = Vec::new();
        write_records_csv(&[], &mut output).unwrap();
        assert!(output.is_empty());
    }
}
