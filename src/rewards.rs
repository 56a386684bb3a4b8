use std::collections::HashMap;

use chrono::NaiveDate;

use crate::models::Transaction;

// ---------------------------------------------------------------------------
// Month labels
// ---------------------------------------------------------------------------

/// Three-letter English month abbreviation ("Jan", "Feb", ...).
/// Shared by the column extractor and the aggregator so both always
/// produce the same grouping key.
pub fn month_label(date: NaiveDate) -> String {
    date.format("%b").to_string()
}

/// Distinct months present in the data, as column labels.
///
/// All dates are sorted ascending first, then reduced to labels and
/// deduplicated in first-occurrence order, so the columns come out
/// chronological no matter how the input file is ordered. Labels carry
/// no year: a program spanning Jan 2024 and Jan 2025 folds both into
/// one "Jan" column.
pub fn month_columns(transactions: &[Transaction]) -> Vec<String> {
    let mut dates: Vec<NaiveDate> = transactions.iter().map(|t| t.date).collect();
    dates.sort();

    let mut labels: Vec<String> = Vec::new();
    for date in dates {
        let label = month_label(date);
        if !labels.contains(&label) {
            labels.push(label);
        }
    }
    labels
}

/// Ordered table column identifiers: userId, name, one per month, total.
pub fn column_names(months: &[String]) -> Vec<String> {
    let mut columns = Vec::with_capacity(months.len() + 3);
    columns.push("userId".to_string());
    columns.push("name".to_string());
    columns.extend(months.iter().cloned());
    columns.push("total".to_string());
    columns
}

// ---------------------------------------------------------------------------
// Reward points
// ---------------------------------------------------------------------------

/// Points earned on one purchase: 2 per dollar over $100, 1 per dollar
/// between $50 and $100, nothing at $50 or below. The two tier deltas
/// are added, so $120 earns (120 - 100) + (120 - 50) = 90. Fractional
/// amounts pass through unchanged. Negative amounts never get here
/// (the loader rejects them) and clamp to zero regardless.
pub fn reward_points(amount: f64) -> f64 {
    let mut points = 0.0;
    if amount > 100.0 {
        points += amount - 100.0;
    }
    if amount > 50.0 {
        points += amount - 50.0;
    }
    points
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

/// One customer's aggregated rewards across every observed month.
#[derive(Debug, Clone, PartialEq)]
pub struct RewardRow {
    pub user_id: String,
    pub name: String,
    pub total: f64,
    pub monthly_points: HashMap<String, f64>,
}

impl RewardRow {
    /// Points for one month column; months the customer never earned
    /// in read as zero.
    pub fn points_for(&self, month: &str) -> f64 {
        self.monthly_points.get(month).copied().unwrap_or(0.0)
    }
}

/// Fold the transaction list into one row per customer.
///
/// Rows come back in first-seen `user_id` order: the order customers
/// appear in the input, not sorted by name or total. Each transaction
/// lands in exactly one row, one month bucket, and that row's total.
pub fn aggregate(transactions: &[Transaction]) -> Vec<RewardRow> {
    let mut rows: Vec<RewardRow> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for txn in transactions {
        let i = match index.get(&txn.user_id) {
            Some(&i) => i,
            None => {
                rows.push(RewardRow {
                    user_id: txn.user_id.clone(),
                    name: txn.name.clone(),
                    total: 0.0,
                    monthly_points: HashMap::new(),
                });
                index.insert(txn.user_id.clone(), rows.len() - 1);
                rows.len() - 1
            }
        };

        let points = reward_points(txn.amount);
        let month = month_label(txn.date);
        *rows[i].monthly_points.entry(month).or_insert(0.0) += points;
        rows[i].total += points;
    }

    rows
}

// ---------------------------------------------------------------------------
// Rewards table
// ---------------------------------------------------------------------------

pub struct RewardsTable {
    pub columns: Vec<String>,
    pub months: Vec<String>,
    pub rows: Vec<RewardRow>,
}

/// One-shot pipeline: transactions in, (rows, columns) out. Columns and
/// rows are derived independently from the same list and joined only at
/// render time by column-name lookup.
pub fn build_table(transactions: &[Transaction]) -> RewardsTable {
    let months = month_columns(transactions);
    let columns = column_names(&months);
    let rows = aggregate(transactions);
    RewardsTable { columns, months, rows }
}

// ---------------------------------------------------------------------------
// Monthly summary
// ---------------------------------------------------------------------------

pub struct MonthlyTotal {
    pub month: String,
    pub points: f64,
    pub customers: usize,
    pub running_total: f64,
}

/// Program-wide points per month with a running total, in the same
/// chronological order as the table columns.
pub fn monthly_totals(transactions: &[Transaction]) -> Vec<MonthlyTotal> {
    let months = month_columns(transactions);
    let rows = aggregate(transactions);

    let mut totals = Vec::with_capacity(months.len());
    let mut running = 0.0f64;
    for month in months {
        let points: f64 = rows.iter().map(|r| r.points_for(&month)).sum();
        let customers = rows
            .iter()
            .filter(|r| r.monthly_points.contains_key(&month))
            .count();
        running += points;
        totals.push(MonthlyTotal {
            month,
            points,
            customers,
            running_total: running,
        });
    }
    totals
}

#[cfg(test)]
mod tests {
    use super::*;

    fn txn(user_id: &str, name: &str, amount: f64, date: &str) -> Transaction {
        Transaction {
            user_id: user_id.to_string(),
            name: name.to_string(),
            amount,
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        }
    }

    #[test]
    fn test_reward_points_tiers() {
        assert_eq!(reward_points(0.0), 0.0);
        assert_eq!(reward_points(49.99), 0.0);
        assert_eq!(reward_points(50.0), 0.0);
        assert_eq!(reward_points(75.0), 25.0);
        assert_eq!(reward_points(100.0), 50.0);
        assert_eq!(reward_points(120.0), 90.0);
    }

    #[test]
    fn test_reward_points_fractional_passthrough() {
        assert_eq!(reward_points(100.5), 51.0);
        assert_eq!(reward_points(50.25), 0.25);
    }

    #[test]
    fn test_reward_points_clamps_negative() {
        assert_eq!(reward_points(-10.0), 0.0);
    }

    #[test]
    fn test_month_columns_chronological_any_input_order() {
        let txns = vec![
            txn("1", "Ana", 60.0, "2025-03-10"),
            txn("2", "Ben", 60.0, "2025-01-05"),
            txn("1", "Ana", 60.0, "2025-03-22"),
            txn("3", "Cam", 60.0, "2025-02-14"),
        ];
        assert_eq!(month_columns(&txns), vec!["Jan", "Feb", "Mar"]);
    }

    #[test]
    fn test_month_columns_dedup_across_years() {
        // Labels carry no year: Mar 2023 sorts before Jan 2024.
        let txns = vec![
            txn("1", "Ana", 60.0, "2024-01-10"),
            txn("2", "Ben", 60.0, "2023-03-05"),
        ];
        assert_eq!(month_columns(&txns), vec!["Mar", "Jan"]);
    }

    #[test]
    fn test_month_columns_empty() {
        assert!(month_columns(&[]).is_empty());
    }

    #[test]
    fn test_column_names() {
        let months = vec!["Jan".to_string(), "Feb".to_string()];
        assert_eq!(column_names(&months), vec!["userId", "name", "Jan", "Feb", "total"]);
        assert_eq!(column_names(&[]), vec!["userId", "name", "total"]);
    }

    #[test]
    fn test_aggregate_sums_same_user_same_month() {
        let txns = vec![
            txn("1", "Ana", 120.0, "2025-01-03"),
            txn("1", "Ana", 75.0, "2025-01-20"),
        ];
        let rows = aggregate(&txns);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].points_for("Jan"), 115.0);
        assert_eq!(rows[0].total, 115.0);
    }

    #[test]
    fn test_aggregate_first_seen_order() {
        let txns = vec![
            txn("9", "Zoe", 120.0, "2025-02-01"),
            txn("1", "Ana", 120.0, "2025-01-01"),
            txn("9", "Zoe", 120.0, "2025-01-15"),
        ];
        let rows = aggregate(&txns);
        let ids: Vec<&str> = rows.iter().map(|r| r.user_id.as_str()).collect();
        assert_eq!(ids, vec!["9", "1"]);
    }

    #[test]
    fn test_row_total_equals_sum_of_months() {
        let txns = vec![
            txn("1", "Ana", 120.0, "2025-01-03"),
            txn("1", "Ana", 200.0, "2025-02-11"),
            txn("1", "Ana", 55.0, "2025-03-07"),
            txn("2", "Ben", 80.0, "2025-02-09"),
        ];
        let table = build_table(&txns);
        for row in &table.rows {
            let sum: f64 = table.months.iter().map(|m| row.points_for(m)).sum();
            assert_eq!(row.total, sum, "total mismatch for {}", row.user_id);
        }
    }

    #[test]
    fn test_missing_month_reads_zero() {
        let txns = vec![
            txn("1", "Ana", 120.0, "2025-01-03"),
            txn("2", "Ben", 80.0, "2025-02-09"),
        ];
        let table = build_table(&txns);
        let ana = &table.rows[0];
        assert_eq!(ana.points_for("Feb"), 0.0);
        assert!(!ana.monthly_points.contains_key("Feb"));
    }

    #[test]
    fn test_empty_input() {
        let table = build_table(&[]);
        assert!(table.rows.is_empty());
        assert!(table.months.is_empty());
        assert_eq!(table.columns, vec!["userId", "name", "total"]);
    }

    #[test]
    fn test_aggregate_idempotent() {
        let txns = vec![
            txn("1", "Ana", 120.0, "2025-01-03"),
            txn("2", "Ben", 75.5, "2025-02-09"),
            txn("1", "Ana", 99.99, "2025-02-21"),
        ];
        assert_eq!(aggregate(&txns), aggregate(&txns));
    }

    #[test]
    fn test_monthly_totals_running() {
        let txns = vec![
            txn("1", "Ana", 120.0, "2025-01-03"),  // 90
            txn("2", "Ben", 75.0, "2025-01-20"),   // 25
            txn("1", "Ana", 150.0, "2025-02-02"),  // 150
        ];
        let totals = monthly_totals(&txns);
        assert_eq!(totals.len(), 2);
        assert_eq!(totals[0].month, "Jan");
        assert_eq!(totals[0].points, 115.0);
        assert_eq!(totals[0].customers, 2);
        assert_eq!(totals[0].running_total, 115.0);
        assert_eq!(totals[1].month, "Feb");
        assert_eq!(totals[1].points, 150.0);
        assert_eq!(totals[1].customers, 1);
        assert_eq!(totals[1].running_total, 265.0);
    }
}
