//! This file defines the templates and a convenience function for creating the navigation bar.

use maud::{Markup, PreEscaped, html};

use crate::endpoints;

/// Template for a link in the navigation bar.
///
/// It will change appearance if `is_current` is set to
/// `true`. Only one link should be set as active at any one time.
#[derive(Clone)]
struct Link<'a> {
    url: &'a str,
    title: &'a str,
    is_current: bool,
}

impl Link<'_> {
    fn into_html(self) -> Markup {
        let style = if self.is_current {
            "block py-2 px-3 text-white bg-blue-700 rounded-sm lg:bg-transparent
        lg:text-blue-700 lg:p-0 dark:text-white lg:dark:text-blue-500"
        } else {
            "block py-2 px-3 text-gray-900 rounded-sm hover:bg-gray-100
        lg:hover:bg-transparent lg:border-0 lg:hover:text-blue-700 lg:p-0
        dark:text-white lg:dark:hover:text-blue-500 dark:hover:bg-gray-700
        dark:hover:text-white lg:dark:hover:bg-transparent"
        };

        html!( a href=(self.url) class=(style) { (self.title) } )
    }
}

/// The navigation bar shown at the top of every page.
pub struct NavBar<'a> {
    links: Vec<Link<'a>>,
}

impl NavBar<'_> {
    /// Get the navigation bar.
    ///
    /// If a link matches `active_endpoint`, then that link will be
    /// marked as active and displayed differently in the HTML.
    pub fn new(active_endpoint: &str) -> NavBar<'_> {
        let links = vec![
            Link {
                url: endpoints::MENU_VIEW,
                title: "Menu",
                is_current: active_endpoint == endpoints::MENU_VIEW,
            },
            Link {
                url: endpoints::TRANSACTIONS_VIEW,
                title: "Transactions",
                is_current: active_endpoint == endpoints::TRANSACTIONS_VIEW,
            },
        ];

        NavBar { links }
    }

    /// Render the navigation bar as HTML.
    pub fn into_html(self) -> Markup {
        html! {
            nav class="bg-white border-gray-200 dark:bg-gray-800 shadow"
            {
                div class="max-w-screen-xl flex flex-wrap items-center justify-between mx-auto p-4"
                {
                    a
                        href=(endpoints::MENU_VIEW)
                        class="flex items-center space-x-3 text-xl font-semibold text-gray-900 dark:text-white"
                    {
                        "Khata"
                    }

                    div class="flex items-center gap-6"
                    {
                        @for link in self.links {
                            (link.into_html())
                        }

                        (theme_toggle())
                    }
                }
            }
        }
    }
}

/// The button that flips the colour theme.
///
/// The effective theme may come from the OS hint rather than a stored
/// preference, so the currently applied theme is read from the document at
/// request time and sent along with the toggle.
fn theme_toggle() -> Markup {
    html! {
        button
            type="button"
            title="Toggle theme"
            class="py-1 px-2 rounded border border-gray-200 dark:border-gray-600 cursor-pointer"
            hx-post=(endpoints::TOGGLE_THEME)
            hx-vals=(PreEscaped(
                "js:{current: document.documentElement.classList.contains('dark') ? 'dark' : 'light'}"
            ))
            hx-swap="none"
            hx-target-error="#alert-container"
        {
            span class="dark:hidden" { "🌙" }
            span class="hidden dark:inline" { "🌞" }
        }
    }
}
