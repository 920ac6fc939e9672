//! Demo statements - simulated upload results for testing
//!
//! Generates realistic statement transactions for exercising the grid
//! without a live backend: a month of dated movements with plausible
//! descriptions, amounts, and category assignments.

use chrono::{Duration, NaiveDate};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use uuid::Uuid;

use crate::transaction::Transaction;

const DESCRIPTIONS: &[&str] = &[
    "POS PURCHASE GROCERY MART",
    "WIRE TRANSFER IN",
    "ACH PAYROLL DEPOSIT",
    "CHECK PAYMENT",
    "MONTHLY SERVICE FEE",
    "CARD PAYMENT ONLINE STORE",
    "UTILITY BILL AUTOPAY",
    "ATM WITHDRAWAL",
    "VENDOR INVOICE SETTLEMENT",
    "INTEREST CREDIT",
];

const CATEGORIES: &[&str] = &["Revenue", "Operating Expense", "Payroll", "Taxes"];
const SUBCATEGORIES: &[&str] = &["Sales", "Services", "Supplies", "Utilities", "Salaries"];
const BANKS: &[&str] = &["Wells Fargo", "Chase", "Banco de Chile"];

/// Demo statement generator
pub struct StatementGenerator {
    rng: StdRng,
    start_date: NaiveDate,
}

impl Default for StatementGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl StatementGenerator {
    /// Generator with entropy seeding
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Deterministic generator for tests
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        let start_date =
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap_or(NaiveDate::MIN);
        StatementGenerator { rng, start_date }
    }

    /// Generate one batch of transactions, dated sequentially
    pub fn generate(&mut self, count: usize) -> Vec<Transaction> {
        let mut rows = Vec::with_capacity(count);
        let mut date = self.start_date;

        for _ in 0..count {
            date = date + Duration::days(self.rng.gen_range(0..3));
            rows.push(self.one(date));
        }
        rows
    }

    fn one(&mut self, date: NaiveDate) -> Transaction {
        let mut tx = Transaction::new(Uuid::new_v4().to_string());
        tx.date = Some(date);
        tx.description = DESCRIPTIONS.choose(&mut self.rng).map(|d| d.to_string());
        tx.bank = BANKS.choose(&mut self.rng).map(|b| b.to_string());
        tx.source = Some("demo.pdf".to_string());

        let amount = (self.rng.gen_range(10.0..5000.0_f64) * 100.0).round() / 100.0;
        if self.rng.gen_bool(0.4) {
            tx.credit_amount = Some(amount);
        } else {
            tx.debit_amount = Some(amount);
        }

        // Most rows arrive pre-classified, some are left for the reviewer
        if self.rng.gen_bool(0.8) {
            tx.category = CATEGORIES.choose(&mut self.rng).map(|c| c.to_string());
            tx.subcategory = SUBCATEGORIES.choose(&mut self.rng).map(|s| s.to_string());
        }
        tx
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate() {
        let mut gen = StatementGenerator::seeded(7);
        let rows = gen.generate(25);

        assert_eq!(rows.len(), 25);
        assert!(rows.iter().all(|r| !r.transaction_id.is_empty()));
        assert!(rows.iter().all(|r| r.date.is_some()));
        assert!(rows
            .iter()
            .all(|r| r.credit_amount.is_some() || r.debit_amount.is_some()));
    }

    #[test]
    fn test_seeded_is_deterministic() {
        let a = StatementGenerator::seeded(42).generate(10);
        let b = StatementGenerator::seeded(42).generate(10);
        let descs = |rows: &[Transaction]| {
            rows.iter()
                .map(|r| r.description.clone())
                .collect::<Vec<_>>()
        };
        assert_eq!(descs(&a), descs(&b));
    }
}
