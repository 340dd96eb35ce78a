use chrono::NaiveDate;

use crate::models::Amount;

/// Format an integer amount with a currency prefix and thousands separators: ¥12,000
pub fn currency(symbol: &str, amount: &Amount) -> String {
    let mut with_commas = String::new();
    for (i, c) in amount.digits().chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            with_commas.push(',');
        }
        with_commas.push(c);
    }
    let with_commas: String = with_commas.chars().rev().collect();

    if amount.is_negative() {
        format!("{symbol}-{with_commas}")
    } else {
        format!("{symbol}{with_commas}")
    }
}

/// Column header label for a day: MM/DD
pub fn day_label(date: NaiveDate) -> String {
    date.format("%m/%d").to_string()
}
