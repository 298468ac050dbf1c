//! Formatting of amounts for display.

use std::sync::OnceLock;

use numfmt::{Formatter, Precision};

fn currency_formatter(prefix: &str) -> Option<Formatter> {
    Formatter::currency(prefix)
        .map(|formatter| formatter.precision(Precision::Decimals(2)))
        .ok()
}

/// Format `number` as dollars with thousands separators and two decimal
/// places, e.g. "$1,234.50" or "-$12.30".
pub fn format_currency(number: f64) -> String {
    static POSITIVE_FMT: OnceLock<Option<Formatter>> = OnceLock::new();
    static NEGATIVE_FMT: OnceLock<Option<Formatter>> = OnceLock::new();

    let formatter = if number < 0.0 {
        NEGATIVE_FMT.get_or_init(|| currency_formatter("-$"))
    } else {
        POSITIVE_FMT.get_or_init(|| currency_formatter("$"))
    };

    let formatted_string = match formatter {
        // Zero is hardcoded as "0", so we must specify the formatted string for zero
        _ if number == 0.0 => return "$0.00".to_owned(),
        Some(formatter) => formatter.fmt_string(number.abs()),
        None if number < 0.0 => format!("-${:.2}", number.abs()),
        None => format!("${number:.2}"),
    };

    pad_decimals(formatted_string)
}

/// numfmt omits trailing zeros, e.g. "12.30" is rendered as "12.3".
fn pad_decimals(mut formatted_string: String) -> String {
    match formatted_string.rfind('.') {
        Some(point) => {
            let decimals = formatted_string.len() - point - 1;
            for _ in decimals..2 {
                formatted_string.push('0');
            }
        }
        None => formatted_string.push_str(".00"),
    }

    formatted_string
}

#[cfg(test)]
mod tests {
    use super::{format_currency, pad_decimals};

    #[test]
    fn formats_zero() {
        assert_eq!(format_currency(0.0), "$0.00");
    }

    #[test]
    fn adds_trailing_zero() {
        assert_eq!(format_currency(12.3), "$12.30");
    }

    #[test]
    fn formats_negative_amounts() {
        assert_eq!(format_currency(-12.3), "-$12.30");
    }

    #[test]
    fn separates_thousands() {
        assert_eq!(format_currency(1234.5), "$1,234.50");
    }

    #[test]
    fn pads_whole_numbers() {
        assert_eq!(pad_decimals("$4,500".to_owned()), "$4,500.00");
        assert_eq!(pad_decimals("$4,500.5".to_owned()), "$4,500.50");
        assert_eq!(pad_decimals("$4,500.25".to_owned()), "$4,500.25");
    }
}
