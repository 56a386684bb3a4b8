use chrono::{Datelike, Local, Months, NaiveDate};

use crate::error::Result;
use crate::loader::{self, RawRecord};
use crate::settings::default_transactions_path;

struct DemoCustomer {
    user_id: &'static str,
    name: &'static str,
}

const CUSTOMERS: &[DemoCustomer] = &[
    DemoCustomer { user_id: "u1001", name: "Amara Okafor" },
    DemoCustomer { user_id: "u1002", name: "Ben Castillo" },
    DemoCustomer { user_id: "u1003", name: "Chloe Nguyen" },
    DemoCustomer { user_id: "u1004", name: "Dev Patel" },
    DemoCustomer { user_id: "u1005", name: "Elena Petrova" },
    DemoCustomer { user_id: "u1006", name: "Farid Haddad" },
];

/// Purchase amounts cycled across customers and months. The pool covers
/// all three reward tiers: under $50 (no points), $50–100, over $100.
const AMOUNTS: &[f64] = &[
    23.40, 47.99, 62.50, 75.00, 88.25, 104.90, 120.00, 151.75, 212.30, 39.95, 99.99, 180.45,
];

const DAYS: &[u32] = &[3, 7, 12, 17, 21, 26];

/// Clamp a day to the last valid day of the given year/month.
fn clamp_day(year: i32, month: u32, day: u32) -> u32 {
    let last_day = NaiveDate::from_ymd_opt(year, month + 1, 1)
        .unwrap_or_else(|| NaiveDate::from_ymd_opt(year + 1, 1, 1).unwrap())
        .pred_opt()
        .unwrap()
        .day();
    day.min(last_day)
}

fn make_date(year: i32, month: u32, day: u32) -> String {
    let d = clamp_day(year, month, day);
    format!("{year:04}-{month:02}-{d:02}")
}

/// Build three months of demo purchases ending at the current month.
/// Deterministic: purchase counts, amounts, and days are index-cycled,
/// so repeated runs produce the same file.
fn generate_records() -> Vec<RawRecord> {
    let today = Local::now().date_naive();
    let mut records = Vec::new();

    for i in 0..3u32 {
        let months_ago = 2 - i;
        let target = today - Months::new(months_ago);
        let year = target.year();
        let month = target.month();

        for (c, customer) in CUSTOMERS.iter().enumerate() {
            let purchases = (i as usize + c) % 3 + 1;
            for j in 0..purchases {
                let amount = AMOUNTS[(i as usize * 7 + c * 3 + j) % AMOUNTS.len()];
                let day = DAYS[(c + j * 2 + i as usize) % DAYS.len()];
                records.push(RawRecord {
                    user_id: customer.user_id.to_string(),
                    name: customer.name.to_string(),
                    amount,
                    date: make_date(year, month, day),
                });
            }
        }
    }

    records
}

pub fn run() -> Result<()> {
    let path = default_transactions_path();

    // Idempotency guard
    if path.exists() {
        println!("Demo data already present at {}.", path.display());
        return Ok(());
    }

    let records = generate_records();
    loader::save_json(&path, &records)?;

    println!("Demo data loaded!");
    println!("  File:         {}", path.display());
    println!("  Customers:    {}", CUSTOMERS.len());
    println!("  Transactions: {}", records.len());
    println!();
    println!("Try these next:");
    println!("  tally report rewards");
    println!("  tally report monthly");
    println!("  tally export");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rewards;

    #[test]
    fn test_generate_records_deterministic() {
        let a = generate_records();
        let b = generate_records();
        assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(&b) {
            assert_eq!(x.user_id, y.user_id);
            assert_eq!(x.amount, y.amount);
            assert_eq!(x.date, y.date);
        }
    }

    #[test]
    fn test_generate_records_span_three_months() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("transactions.json");
        loader::save_json(&path, &generate_records()).unwrap();
        let txns = loader::load(&path, None).unwrap();
        assert_eq!(rewards::month_columns(&txns).len(), 3);
    }

    #[test]
    fn test_generate_records_cover_all_tiers() {
        let records = generate_records();
        assert!(records.iter().any(|r| r.amount <= 50.0), "need a no-points purchase");
        assert!(
            records.iter().any(|r| r.amount > 50.0 && r.amount <= 100.0),
            "need a mid-tier purchase"
        );
        assert!(records.iter().any(|r| r.amount > 100.0), "need a top-tier purchase");
    }

    #[test]
    fn test_generated_dates_are_valid() {
        for record in generate_records() {
            assert!(
                NaiveDate::parse_from_str(&record.date, "%Y-%m-%d").is_ok(),
                "invalid date: {}",
                record.date
            );
        }
    }

    #[test]
    fn test_every_customer_appears() {
        let records = generate_records();
        for customer in CUSTOMERS {
            assert!(records.iter().any(|r| r.user_id == customer.user_id));
        }
    }
}
