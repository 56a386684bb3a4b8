use chrono::NaiveDate;

/// A single purchase, validated by the loader before the core sees it.
/// `amount` is non-negative by the load policy; `date` is already parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub user_id: String,
    pub name: String,
    pub amount: f64,
    pub date: NaiveDate,
}
