//! Transaction CSV loading.
//!
//! Expected columns: `date, fund_code, fund_name, transaction_type, transaction_count`.
//! Extra columns are ignored.

use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use finplan_core::{CoreError, Date, Fund, FundBook, Transaction, TransactionType};
use log::{debug, warn};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::categorize::categorize_fund;
use crate::error::{IngestError, IngestResult};
use crate::prices::PriceSource;

const REQUIRED_COLUMNS: [&str; 5] = [
    "date",
    "fund_code",
    "fund_name",
    "transaction_type",
    "transaction_count",
];

/// CSV record for one transaction.
#[derive(Debug, Deserialize)]
struct TransactionRecord {
    date: String,
    fund_code: String,
    fund_name: String,
    transaction_type: String,
    transaction_count: String,
}

/// Transactions and the fund book derived from them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Portfolio {
    /// Transactions in file order.
    pub transactions: Vec<Transaction>,
    /// One fund per distinct code, categorized from the first name seen.
    pub funds: FundBook,
}

impl Portfolio {
    /// Number of transactions.
    #[must_use]
    pub fn transaction_count(&self) -> usize {
        self.transactions.len()
    }

    /// Number of distinct funds.
    #[must_use]
    pub fn fund_count(&self) -> usize {
        self.funds.len()
    }

    /// Returns true if no transactions were loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}

/// Loads a portfolio from a CSV file.
///
/// # Errors
///
/// Returns [`IngestError::Io`] if the file cannot be opened; otherwise see
/// [`read_portfolio_csv`].
pub fn load_portfolio_csv(path: impl AsRef<Path>, prices: &dyn PriceSource) -> IngestResult<Portfolio> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| IngestError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    let portfolio = read_portfolio_csv(file, prices)?;
    debug!(
        "loaded {} transactions for {} funds from {}",
        portfolio.transaction_count(),
        portfolio.fund_count(),
        path.display()
    );
    Ok(portfolio)
}

/// Reads a portfolio from CSV text.
///
/// A fund is created the first time its code appears and categorized once
/// from its name. Funds without a price keep `current_price = None`.
///
/// # Errors
///
/// - [`IngestError::MissingColumn`] if the header lacks a required column
/// - [`IngestError::Csv`] for structurally malformed rows
/// - [`IngestError::InvalidField`] for unparseable dates, transaction types
///   or quantities
///
/// # Example
///
/// ```rust
/// use finplan_core::FundCategory;
/// use finplan_ingest::{read_portfolio_csv, StaticPriceTable};
///
/// let csv = "date,fund_code,fund_name,transaction_type,transaction_count\n\
///            2024-01-15,HDFC_DEBT,HDFC Short Term Debt Fund,buy,5000\n";
/// let portfolio = read_portfolio_csv(csv.as_bytes(), &StaticPriceTable::demo()).unwrap();
///
/// assert_eq!(portfolio.transaction_count(), 1);
/// assert_eq!(portfolio.funds.category_of("HDFC_DEBT"), Some(FundCategory::Debt));
/// ```
pub fn read_portfolio_csv<R: Read>(reader: R, prices: &dyn PriceSource) -> IngestResult<Portfolio> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader.headers().map_err(|e| IngestError::Csv {
        record: 0,
        message: e.to_string(),
    })?;
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(IngestError::MissingColumn { column });
        }
    }

    let mut portfolio = Portfolio::default();
    for (index, result) in reader.deserialize::<TransactionRecord>().enumerate() {
        let number = index + 1;
        let record = result.map_err(|e| IngestError::Csv {
            record: number,
            message: e.to_string(),
        })?;

        let tx = parse_record(number, record)?;
        if !portfolio.funds.contains(&tx.fund_code) {
            portfolio.funds.insert(new_fund(&tx, prices));
        }
        portfolio.transactions.push(tx);
    }

    Ok(portfolio)
}

fn parse_record(number: usize, record: TransactionRecord) -> IngestResult<Transaction> {
    let date = Date::parse(&record.date)
        .map_err(|e| IngestError::invalid_field(number, "date", e))?;
    let transaction_type = TransactionType::from_str(&record.transaction_type)
        .map_err(|e| IngestError::invalid_field(number, "transaction_type", e))?;
    let quantity = Decimal::from_str(&record.transaction_count)
        .or_else(|_| Decimal::from_scientific(&record.transaction_count))
        .map_err(|_| {
            IngestError::invalid_field(
                number,
                "transaction_count",
                CoreError::invalid_transaction(
                    record.fund_code.clone(),
                    format!("not a number: '{}'", record.transaction_count),
                ),
            )
        })?;

    if record.fund_code.is_empty() {
        return Err(IngestError::invalid_field(
            number,
            "fund_code",
            CoreError::invalid_transaction("", "empty fund code"),
        ));
    }

    Ok(Transaction::new(
        date,
        record.fund_code,
        record.fund_name,
        transaction_type,
        quantity,
    ))
}

fn new_fund(tx: &Transaction, prices: &dyn PriceSource) -> Fund {
    let fund = Fund::new(
        tx.fund_code.clone(),
        tx.fund_name.clone(),
        categorize_fund(&tx.fund_name),
    );
    match prices.price(&tx.fund_code) {
        Some(price) => fund.with_current_price(price),
        None => {
            warn!(
                "no price for fund {}; valuation will use the fallback unit price",
                tx.fund_code
            );
            fund
        }
    }
}
