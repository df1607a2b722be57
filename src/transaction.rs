use crate::ecosystem::Ecosystem;
use crate::error::GraphError;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// One transfer between two nodes of the network.
/// Values are immutable once created; every view is recomputed from them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub date: NaiveDate,
    pub source_account: String,
    pub target_account: String,
    pub ecosystem: Ecosystem,
    /// Positive integer amount (smallest currency unit)
    pub amount: u64,
    pub transaction_type: String,
    pub channel: String,
}

impl Transaction {
    pub fn new(
        date: NaiveDate,
        source_account: &str,
        target_account: &str,
        ecosystem: Ecosystem,
        amount: u64,
        transaction_type: &str,
        channel: &str,
    ) -> Self {
        Self {
            date,
            source_account: source_account.to_string(),
            target_account: target_account.to_string(),
            ecosystem,
            amount,
            transaction_type: transaction_type.to_string(),
            channel: channel.to_string(),
        }
    }

    /// Check whether the node takes part in this transaction
    pub fn touches(&self, node: &str) -> bool {
        self.source_account == node || self.target_account == node
    }
}

// ============================================================================
// CSV INPUT
// ============================================================================

/// Row as it appears in a CSV file, before validation
#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(rename = "Date")]
    date: NaiveDate,

    #[serde(rename = "Source")]
    source: String,

    #[serde(rename = "Target")]
    target: String,

    #[serde(rename = "Ecosystem")]
    ecosystem: String,

    #[serde(rename = "Amount")]
    amount: i64,

    #[serde(rename = "Transaction_Type")]
    transaction_type: String,

    #[serde(rename = "Channel")]
    channel: String,
}

impl TryFrom<CsvRow> for Transaction {
    type Error = GraphError;

    fn try_from(row: CsvRow) -> std::result::Result<Self, Self::Error> {
        let ecosystem: Ecosystem = row.ecosystem.parse()?;

        if row.amount <= 0 {
            return Err(GraphError::InvalidAmount {
                source_account: row.source,
                target_account: row.target,
            });
        }

        Ok(Transaction {
            date: row.date,
            source_account: row.source,
            target_account: row.target,
            ecosystem,
            amount: row.amount as u64,
            transaction_type: row.transaction_type,
            channel: row.channel,
        })
    }
}

/// Load transactions from a CSV file with the header
/// `Date,Source,Target,Ecosystem,Amount,Transaction_Type,Channel`
pub fn load_csv(csv_path: &Path) -> Result<Vec<Transaction>> {
    let mut rdr = csv::Reader::from_path(csv_path)
        .with_context(|| format!("Failed to open CSV file {}", csv_path.display()))?;

    let mut transactions = Vec::new();

    for (index, result) in rdr.deserialize::<CsvRow>().enumerate() {
        // +2: header line and 1-based numbering
        let line = index + 2;
        let row = result.with_context(|| format!("Failed to deserialize transaction on line {}", line))?;
        let transaction = Transaction::try_from(row)
            .with_context(|| format!("Invalid transaction on line {}", line))?;
        transactions.push(transaction);
    }

    info!(path = %csv_path.display(), rows = transactions.len(), "loaded transactions from CSV");

    Ok(transactions)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const HEADER: &str = "Date,Source,Target,Ecosystem,Amount,Transaction_Type,Channel\n";

    fn write_csv(body: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(HEADER.as_bytes()).unwrap();
        file.write_all(body.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_csv() {
        let file = write_csv(
            "2024-03-01,ACC1234,ACC2345,MRT,15000,transfer,mobile\n\
             2024-03-02,ACC2345,ACC1234,PAM JAYA,2000,payment,web\n",
        );

        let transactions = load_csv(file.path()).unwrap();

        assert_eq!(transactions.len(), 2);
        assert_eq!(transactions[0].source_account, "ACC1234");
        assert_eq!(transactions[0].ecosystem, Ecosystem::Mrt);
        assert_eq!(transactions[0].amount, 15000);
        assert_eq!(transactions[1].ecosystem, Ecosystem::PamJaya);
        assert_eq!(transactions[1].date, NaiveDate::from_ymd_opt(2024, 3, 2).unwrap());
    }

    #[test]
    fn test_load_csv_rejects_unknown_ecosystem() {
        let file = write_csv("2024-03-01,ACC1234,ACC2345,KRL,15000,transfer,mobile\n");

        let err = load_csv(file.path()).unwrap_err();
        let message = format!("{:#}", err);

        assert!(message.contains("line 2"));
        assert!(message.contains("KRL"));
    }

    #[test]
    fn test_load_csv_ecosystem_tags_are_case_sensitive() {
        let file = write_csv(
            "2024-03-01,ACC1234,ACC2345,MRT,15000,transfer,mobile\n\
             2024-03-02,ACC1234,ACC2345,mrt,2000,transfer,mobile\n",
        );

        let message = format!("{:#}", load_csv(file.path()).unwrap_err());

        assert!(message.contains("line 3"));
        assert!(message.contains("mrt"));
    }

    #[test]
    fn test_load_csv_rejects_non_positive_amount() {
        let file = write_csv("2024-03-01,ACC1234,ACC2345,MRT,0,transfer,mobile\n");

        let err = load_csv(file.path()).unwrap_err();
        let root = err.root_cause().to_string();

        assert!(root.contains("non-positive amount"));
    }

    #[test]
    fn test_load_bundled_csv() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/transactions.csv");
        let transactions = load_csv(&path).unwrap();

        assert_eq!(transactions.len(), 8);
        assert!(transactions.iter().all(|t| t.amount > 0));
        assert_eq!(transactions.iter().filter(|t| t.touches("ACC1234")).count(), 5);
    }

    #[test]
    fn test_load_csv_missing_file() {
        let err = load_csv(Path::new("/nonexistent/transactions.csv")).unwrap_err();
        assert!(err.to_string().contains("Failed to open CSV file"));
    }

    #[test]
    fn test_touches() {
        let tx = Transaction::new(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            "A",
            "B",
            Ecosystem::Mrt,
            10,
            "transfer",
            "web",
        );

        assert!(tx.touches("A"));
        assert!(tx.touches("B"));
        assert!(!tx.touches("C"));
    }
}
