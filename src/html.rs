//! Shared page layout and formatting helpers for server-rendered HTML.

use std::sync::OnceLock;

use maud::{DOCTYPE, Markup, PreEscaped, html};
use numfmt::{Formatter, Precision};
use rust_decimal::{Decimal, prelude::ToPrimitive};

use crate::endpoints;

// Link styles
pub const LINK_STYLE: &str = "link";

// Card styles
pub const CARD_STYLE: &str = "card";
pub const CARD_LABEL_STYLE: &str = "card-label";
pub const CARD_VALUE_STYLE: &str = "card-value";

// Form styles
pub const FORM_LABEL_STYLE: &str = "form-label";
pub const FORM_INPUT_STYLE: &str = "form-input";
pub const BUTTON_PRIMARY_STYLE: &str = "button-primary";
pub const BUTTON_DELETE_STYLE: &str = "button-delete";
pub const FORM_ERROR_STYLE: &str = "form-error";

// Table styles
pub const TABLE_STYLE: &str = "table";
pub const TABLE_HEADER_STYLE: &str = "table-header";
pub const TABLE_ROW_STYLE: &str = "table-row";
pub const TABLE_CELL_STYLE: &str = "table-cell";

// Category badge style
pub const CATEGORY_BADGE_STYLE: &str = "badge";

// Page container
pub const PAGE_CONTAINER_STYLE: &str = "page";

const STYLESHEET: &str = r#"
body {
    margin: 0;
    font-family: system-ui, sans-serif;
    background: #f9fafb;
    color: #111827;
}
.page { max-width: 72rem; margin: 0 auto; padding: 2rem 1.5rem; }
.link { color: #2563eb; text-decoration: underline; }
.link:hover { color: #3b82f6; }
.cards { display: grid; grid-template-columns: repeat(auto-fit, minmax(12rem, 1fr)); gap: 1rem; }
.card { background: #fff; border: 1px solid #e5e7eb; border-radius: 0.5rem; padding: 1rem; }
.card-label { font-size: 0.875rem; color: #4b5563; }
.card-value { font-size: 1.5rem; font-weight: 600; }
.bar { background: #e5e7eb; border-radius: 9999px; height: 0.5rem; }
.bar-fill { background: #3b82f6; border-radius: 9999px; height: 0.5rem; }
.filters { display: flex; flex-wrap: wrap; gap: 1rem; align-items: flex-end; margin: 2rem 0 1rem; }
.form-label { display: block; font-size: 0.875rem; font-weight: 500; margin-bottom: 0.25rem; }
.form-input { padding: 0.5rem; border: 1px solid #d1d5db; border-radius: 0.25rem; }
.button-primary { padding: 0.5rem 1rem; background: #3b82f6; color: #fff; border: none; border-radius: 0.25rem; }
.table { width: 100%; border-collapse: collapse; font-size: 0.875rem; }
.table-header { text-transform: uppercase; font-size: 0.75rem; background: #f3f4f6; text-align: left; }
.table-row { background: #fff; border-bottom: 1px solid #e5e7eb; }
.table-cell { padding: 0.75rem 1rem; }
.nav { display: flex; gap: 1.5rem; padding: 1rem 1.5rem; background: #fff; border-bottom: 1px solid #e5e7eb; }
.form { display: flex; flex-direction: column; gap: 1rem; max-width: 28rem; }
.form-error { color: #b91c1c; }
.button-delete { padding: 0.5rem 1rem; background: #dc2626; color: #fff; border: none; border-radius: 0.25rem; }
.sr-only { position: absolute; width: 1px; height: 1px; overflow: hidden; clip: rect(0, 0, 0, 0); }
.error-page { text-align: center; padding: 4rem 1.5rem; }
.error-page h1 { font-size: 6rem; color: #2563eb; margin: 0 0 1rem; }
.badge { padding: 0.125rem 0.625rem; font-size: 0.75rem; font-weight: 600; color: #1e40af; background: #dbeafe; border-radius: 9999px; }
"#;

pub fn base(title: &str, content: &Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en"
        {
            head
            {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " - Expense Tracker" }
                style { (PreEscaped(STYLESHEET)) }
            }

            body
            {
                (content)
            }
        }
    }
}

/// A page explaining an error, with a link back to the dashboard.
pub fn error_view(title: &str, header: &str, description: &str, fix: &str) -> Markup {
    let content = html!(
        section class="error-page"
        {
            h1 { (header) }

            p { strong { (description) } }

            p { (fix) }

            (link(endpoints::DASHBOARD_VIEW, "Back to Dashboard"))
        }
    );

    base(title, &content)
}

/// Format `amount` as dollars with thousands separators and two decimal
/// places, e.g. "$1,234.50".
///
/// The amount is rounded to cents before it is converted for display.
pub fn format_currency(amount: Decimal) -> String {
    static POSITIVE_FMT: OnceLock<Formatter> = OnceLock::new();

    let positive_fmt = POSITIVE_FMT.get_or_init(|| currency_formatter("$"));

    static NEGATIVE_FMT: OnceLock<Formatter> = OnceLock::new();

    let negative_fmt = NEGATIVE_FMT.get_or_init(|| currency_formatter("-$"));

    let number = amount.round_dp(2).to_f64().unwrap_or_default();

    let formatted_string = if number < 0.0 {
        negative_fmt.fmt_string(number.abs())
    } else if number > 0.0 {
        positive_fmt.fmt_string(number)
    } else {
        return "$0.00".to_owned();
    };

    pad_cents(formatted_string)
}

fn currency_formatter(prefix: &str) -> Formatter {
    Formatter::currency(prefix)
        .unwrap_or_else(|_| Formatter::new())
        .precision(Precision::Decimals(2))
}

/// numfmt drops trailing zeros, e.g. "$1.5" for 1.50 and "$12" for 12.00.
fn pad_cents(mut formatted_string: String) -> String {
    match formatted_string.rfind('.') {
        None => formatted_string.push_str(".00"),
        Some(point) if formatted_string.len() - point == 2 => formatted_string.push('0'),
        Some(_) => {}
    }

    formatted_string
}

/// Format a percentage with one decimal place, e.g. "85.7%".
pub fn format_percentage(percentage: Decimal) -> String {
    format!("{:.1}%", percentage.round_dp(1))
}

/// A link with blue text for use in a <p> tag.
pub fn link(url: &str, text: &str) -> Markup {
    html! (
        a href=(url) class=(LINK_STYLE) { (text) }
    )
}

#[cfg(test)]
mod format_tests {
    use rust_decimal::Decimal;

    use super::{format_currency, format_percentage};

    #[test]
    fn pads_to_two_decimal_places() {
        assert_eq!(format_currency(Decimal::new(123, 1)), "$12.30");
        assert_eq!(format_currency(Decimal::from(175)), "$175.00");
    }

    #[test]
    fn rounds_to_two_decimal_places() {
        let average = Decimal::from(175) / Decimal::from(3);

        assert_eq!(format_currency(average), "$58.33");
    }

    #[test]
    fn zero_has_no_sign() {
        assert_eq!(format_currency(Decimal::ZERO), "$0.00");
        assert_eq!(format_currency(Decimal::new(-1, 3)), "$0.00");
    }

    #[test]
    fn groups_thousands() {
        assert_eq!(
            format_currency(Decimal::new(123456750, 2)),
            "$1,234,567.50"
        );
        assert_eq!(format_currency(Decimal::from(1000)), "$1,000.00");
    }

    #[test]
    fn large_amounts_keep_cents() {
        assert_eq!(
            format_currency(Decimal::new(98765432101, 2)),
            "$987,654,321.01"
        );
    }

    #[test]
    fn negative_amounts_have_sign_before_dollar() {
        assert_eq!(format_currency(Decimal::new(-505, 2)), "-$5.05");
        assert_eq!(format_currency(Decimal::new(-250000, 2)), "-$2,500.00");
    }

    #[test]
    fn percentage_has_one_decimal_place() {
        let percentage = Decimal::from(150) / Decimal::from(175) * Decimal::ONE_HUNDRED;

        assert_eq!(format_percentage(percentage), "85.7%");
        assert_eq!(format_percentage(Decimal::ZERO), "0.0%");
    }
}
