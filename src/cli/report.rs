use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::error::Result;
use crate::fmt::points;
use crate::rewards;

pub fn rewards(file: Option<String>, format: Option<String>, year: Option<i32>) -> Result<()> {
    let transactions = super::load_transactions(&file, format.as_deref(), year)?;

    if transactions.is_empty() {
        println!("No transactions found.");
        return Ok(());
    }

    let data = rewards::build_table(&transactions);

    let mut table = Table::new();
    table.set_header(data.columns.clone());
    for row in &data.rows {
        let mut cells = vec![Cell::new(&row.user_id), Cell::new(&row.name)];
        for month in &data.months {
            cells.push(Cell::new(points(row.points_for(month))));
        }
        cells.push(Cell::new(points(row.total).bold().to_string()));
        table.add_row(cells);
    }
    println!("Customer Rewards\n{table}");
    Ok(())
}

pub fn monthly(file: Option<String>, format: Option<String>, year: Option<i32>) -> Result<()> {
    let transactions = super::load_transactions(&file, format.as_deref(), year)?;

    if transactions.is_empty() {
        println!("No transactions found.");
        return Ok(());
    }

    let totals = rewards::monthly_totals(&transactions);

    let mut table = Table::new();
    table.set_header(vec!["Month", "Points", "Customers", "Running"]);
    for m in &totals {
        table.add_row(vec![
            Cell::new(&m.month),
            Cell::new(points(m.points)),
            Cell::new(m.customers),
            Cell::new(points(m.running_total).green().to_string()),
        ]);
    }
    println!("Monthly Rewards\n{table}");
    Ok(())
}
