//! Formatting utilities used for CLI and JSON outputs.

use crate::models::Salary;

/// en-US currency rendering: `$1,234,567.89`.
pub fn format_currency(amount: Salary, symbol: &str) -> String {
    let cents = amount.cents();
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();

    format!(
        "{}{}{}.{:02}",
        sign,
        symbol,
        group_thousands(abs / 100),
        abs % 100
    )
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands_and_keeps_cents() {
        assert_eq!(format_currency(Salary::from_cents(0), "$"), "$0.00");
        assert_eq!(format_currency(Salary::from_cents(99_999), "$"), "$999.99");
        assert_eq!(format_currency(Salary::from_cents(100_000), "$"), "$1,000.00");
        assert_eq!(
            format_currency(Salary::from_cents(123_456_789_05), "$"),
            "$123,456,789.05"
        );
    }

    #[test]
    fn honors_the_configured_symbol() {
        assert_eq!(format_currency(Salary::from_cents(5_000_050), "€"), "€50,000.50");
    }
}
