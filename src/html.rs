//! Shared HTML layout, style constants and display formatting.

use maud::{DOCTYPE, Markup, PreEscaped, html};

use std::sync::OnceLock;

use numfmt::{Formatter, Precision};
use time::{OffsetDateTime, macros::format_description};

use crate::theme::Theme;

// Link styles
pub const LINK_STYLE: &str = "text-blue-600 hover:text-blue-500 \
    dark:text-blue-500 dark:hover:text-blue-400 underline";

// Button styles
pub const BUTTON_PRIMARY_STYLE: &str = "px-4 py-2 bg-blue-500 \
    dark:bg-blue-600 disabled:bg-blue-700 hover:enabled:bg-blue-600 \
    hover:enabled:dark:bg-blue-700 text-white rounded";

pub const BUTTON_SECONDARY_STYLE: &str = "py-2 px-4 text-sm font-medium \
    text-gray-900 bg-white rounded border border-gray-200 hover:bg-gray-100 \
    hover:text-blue-700 dark:bg-gray-800 dark:text-gray-400 \
    dark:border-gray-600 dark:hover:text-white dark:hover:bg-gray-700";

pub const BUTTON_DELETE_STYLE: &str = "text-red-600 hover:text-red-500 \
    dark:text-red-500 dark:hover:text-red-400 underline bg-transparent \
    border-none cursor-pointer";

// Form styles
pub const FORM_CONTAINER_STYLE: &str = "flex flex-col items-center px-6 py-8 \
    mx-auto lg:py-0 max-w-md text-gray-900 dark:text-white";
pub const FORM_LABEL_STYLE: &str = "block mb-2 text-sm font-medium text-gray-900 dark:text-white";
pub const FORM_TEXT_INPUT_STYLE: &str = "block w-full p-2.5 rounded text-sm \
    text-gray-900 dark:text-white disabled:text-gray-500 bg-gray-50 \
    dark:bg-gray-700 border border-gray-300 dark:border-gray-600 \
    dark:placeholder-gray-400 focus:ring-blue-600 focus:border-blue-600 \
    focus:dark:border-blue-500 focus:dark:ring-blue-500";

// Table styles
pub const TABLE_HEADER_STYLE: &str = "text-xs text-gray-700 uppercase \
    bg-gray-50 dark:bg-gray-700 dark:text-gray-400";

pub const TABLE_ROW_STYLE: &str = "bg-white border-b dark:bg-gray-800 dark:border-gray-700";

pub const TABLE_CELL_STYLE: &str = "px-6 py-4";

// Card styles
pub const CARD_STYLE: &str = "bg-white dark:bg-gray-800 rounded shadow \
    overflow-hidden flex flex-col";

// Page container
pub const PAGE_CONTAINER_STYLE: &str =
    "flex flex-col items-center px-6 py-8 mx-auto lg:py-5 text-gray-900 dark:text-white";

/// The base layout shared by all pages.
///
/// `theme` is the persisted theme preference. When it is absent the page
/// defers to the browser's `prefers-color-scheme` hint via a small inline
/// script, matching first-run behaviour before the user has toggled a theme.
pub fn base(title: &str, theme: Option<Theme>, content: &Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" class=[theme.and_then(|theme| match theme {
            Theme::Dark => Some("dark"),
            Theme::Light => None,
        })]
        {
            head
            {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " - Khata" }

                script src="https://cdn.tailwindcss.com" {}
                script
                {
                    (PreEscaped("tailwind.config = { darkMode: 'class' };"))
                }

                @if theme.is_none() {
                    script
                    {
                        (PreEscaped(
                            "if (window.matchMedia \
                            && window.matchMedia('(prefers-color-scheme: dark)').matches) \
                            { document.documentElement.classList.add('dark'); }"
                        ))
                    }
                }

                script src="https://unpkg.com/htmx.org@2.0.8" {}
                script src="https://unpkg.com/htmx-ext-response-targets@2.0.4" {}
            }

            body
                hx-ext="response-targets"
                class="container max-w-full min-h-screen bg-gray-50 dark:bg-gray-900"
            {
                (content)

                // Alert container, empty until an error fragment is swapped in
                div
                    id="alert-container"
                    class="w-full max-w-md px-4"
                    style="position: fixed; bottom: 1rem; left: 50%; transform: translateX(-50%); z-index: 9999;"
                {}
            }
        }
    }
}

/// A full-page error view used by the 404 and 500 pages.
pub fn error_view(title: &str, header: &str, description: &str, fix: &str) -> Markup {
    let content = html!(
        section class="bg-white dark:bg-gray-900"
        {
            div class="py-8 px-4 mx-auto max-w-screen-xl lg:py-16 lg:px-6"
            {
                div class="mx-auto max-w-screen-sm text-center"
                {
                    h1
                        class="mb-4 text-7xl tracking-tight font-extrabold
                            lg:text-9xl text-blue-600 dark:text-blue-500"
                    {
                        (header)
                    }

                    p
                        class="mb-4 text-3xl md:text-4xl tracking-tight
                            font-bold text-gray-900 dark:text-white"
                    {
                        (description)
                    }

                    p
                        class="mb-4 text-1xl md:text-2xl tracking-tight
                            text-gray-900 dark:text-white"
                    {
                        (fix)
                    }

                    a
                        href="/"
                        class="inline-flex text-white bg-blue-600
                            hover:bg-blue-800 focus:ring-4 focus:outline-hidden
                            focus:ring-blue-300 font-medium rounded text-sm px-5
                            py-2.5 text-center dark:focus:ring-blue-900 my-4"
                    {
                        "Back to Homepage"
                    }
                }
            }
        }
    );

    base(title, None, &content)
}

/// Format an amount of rupees with thousands grouping, e.g. "Rs. 4,537".
pub fn format_currency(number: f64) -> String {
    static POSITIVE_FMT: OnceLock<Formatter> = OnceLock::new();

    let positive_fmt = POSITIVE_FMT.get_or_init(|| {
        Formatter::currency("Rs. ")
            .unwrap()
            .precision(Precision::Decimals(0))
    });

    static NEGATIVE_FMT: OnceLock<Formatter> = OnceLock::new();

    let negative_fmt = NEGATIVE_FMT.get_or_init(|| {
        Formatter::currency("-Rs. ")
            .unwrap()
            .precision(Precision::Decimals(0))
    });

    let number = number.round();

    if number < 0.0 {
        negative_fmt.fmt_string(number.abs())
    } else if number > 0.0 {
        positive_fmt.fmt_string(number)
    } else {
        // Zero is hardcoded as "0", so we must specify the formatted string for zero
        "Rs. 0".to_owned()
    }
}

/// Format a timestamp as a dd/mm/yyyy date.
pub fn format_date(date_time: OffsetDateTime) -> String {
    let format = format_description!("[day]/[month]/[year]");

    date_time
        .format(&format)
        .unwrap_or_else(|_| date_time.date().to_string())
}

/// Format a timestamp as a dd/mm/yyyy date with a 24 hour wall-clock time.
pub fn format_date_time(date_time: OffsetDateTime) -> String {
    let format = format_description!("[day]/[month]/[year] [hour]:[minute]");

    date_time
        .format(&format)
        .unwrap_or_else(|_| date_time.to_string())
}

#[cfg(test)]
mod format_currency_tests {
    use super::format_currency;

    #[test]
    fn formats_zero() {
        assert_eq!(format_currency(0.0), "Rs. 0");
    }

    #[test]
    fn groups_thousands() {
        assert_eq!(format_currency(4537.0), "Rs. 4,537");
    }

    #[test]
    fn rounds_to_whole_rupees() {
        assert_eq!(format_currency(18148.2), "Rs. 18,148");
    }

    #[test]
    fn formats_negative_amounts() {
        assert_eq!(format_currency(-80.0), "-Rs. 80");
    }
}

#[cfg(test)]
mod format_date_tests {
    use time::macros::datetime;

    use super::{format_date, format_date_time};

    #[test]
    fn formats_day_month_year() {
        let date_time = datetime!(2025-06-03 14:30 UTC);

        assert_eq!(format_date(date_time), "03/06/2025");
    }

    #[test]
    fn formats_date_with_time() {
        let date_time = datetime!(2025-06-03 14:30 UTC);

        assert_eq!(format_date_time(date_time), "03/06/2025 14:30");
    }
}
