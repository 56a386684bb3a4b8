use std::path::PathBuf;

use colored::Colorize;

use crate::error::Result;
use crate::fmt::{money, points};
use crate::loader;
use crate::rewards;
use crate::settings::load_settings;

pub fn run() -> Result<()> {
    let settings = load_settings();
    let data_dir = PathBuf::from(&settings.data_dir);
    let file = data_dir.join(&settings.transactions_file);

    println!("Data dir:   {}", data_dir.display());
    println!("File:       {}", file.display());

    if file.exists() {
        let transactions = loader::load(&file, None)?;
        let data = rewards::build_table(&transactions);
        let total_spend: f64 = transactions.iter().map(|t| t.amount).sum();
        let total_points: f64 = data.rows.iter().map(|r| r.total).sum();

        println!();
        println!("Transactions:  {}", transactions.len());
        println!("Customers:     {}", data.rows.len());
        println!("Months:        {}", data.months.join(", "));
        println!("Total spend:   {}", money(total_spend));
        println!("Total points:  {}", points(total_points));
    } else {
        println!();
        println!(
            "{}",
            "Transactions file not found. Run `tally demo` to create sample data.".yellow()
        );
    }

    Ok(())
}
