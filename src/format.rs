//! French display formatting for amounts, dates and months.

use chrono::{Datelike, NaiveDate};
use num_format::{Locale, ToFormattedString};

use crate::models::MonthKey;

const MONTH_NAMES: [&str; 12] = [
    "janvier",
    "février",
    "mars",
    "avril",
    "mai",
    "juin",
    "juillet",
    "août",
    "septembre",
    "octobre",
    "novembre",
    "décembre",
];

/// Format an amount as French euros, e.g. `1 234,56 €`.
///
/// Cents are rounded to currency granularity; negative amounts keep their
/// sign in front of the grouped figure.
pub fn format_currency(amount: f64) -> String {
    let cents = (amount * 100.0).round() as i64;
    let sign = if cents < 0 { "-" } else { "" };
    let euros = (cents.abs() / 100).to_formatted_string(&Locale::fr);
    format!("{sign}{euros},{:02} €", cents.abs() % 100)
}

/// `DD/MM/YYYY`, the short date format of the tables.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Long French date, e.g. `18 septembre 2025`.
pub fn format_date_long(date: NaiveDate) -> String {
    format!(
        "{} {} {}",
        date.day(),
        MONTH_NAMES[date.month0() as usize],
        date.year()
    )
}

/// French month heading, e.g. `septembre 2025`.
pub fn format_month(month: MonthKey) -> String {
    format!("{} {}", MONTH_NAMES[(month.month - 1) as usize], month.year)
}
