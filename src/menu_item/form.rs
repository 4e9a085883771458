//! The add/edit form shared by the item creation and editing pages.

use maud::{Markup, html};

use crate::html::{
    BUTTON_PRIMARY_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, LINK_STYLE,
};
use crate::endpoints;

/// Where the item form submits to.
///
/// Creating appends a new item with a fresh ID; updating replaces the item
/// behind the endpoint's ID in place.
pub(crate) enum FormAction {
    /// POST to the item creation endpoint.
    Create,
    /// PUT to the update endpoint for one item.
    Update(String),
}

/// Render the item form.
///
/// For the edit page all fields are pre-filled from the item being edited;
/// for the create page they are empty. A non-empty `error_message` is shown
/// inline below the fields and the submitted values are kept.
pub(crate) fn item_form_view(
    action: &FormAction,
    name: &str,
    amount: &str,
    image: &str,
    error_message: &str,
) -> Markup {
    let submit_label = match action {
        FormAction::Create => "Add Menu Item",
        FormAction::Update(_) => "Save Changes",
    };

    html! {
        form
            hx-post=[match action {
                FormAction::Create => Some(endpoints::POST_ITEM),
                FormAction::Update(_) => None,
            }]
            hx-put=[match action {
                FormAction::Create => None,
                FormAction::Update(endpoint) => Some(endpoint.as_str()),
            }]
            hx-target="this"
            hx-swap="outerHTML"
            hx-target-error="#alert-container"
            class="w-full space-y-4 md:space-y-6"
        {
            div
            {
                label
                    for="name"
                    class=(FORM_LABEL_STYLE)
                {
                    "Name"
                }

                input
                    id="name"
                    type="text"
                    name="name"
                    placeholder="Item name"
                    required
                    autofocus
                    value=(name)
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label
                    for="amount"
                    class=(FORM_LABEL_STYLE)
                {
                    "Amount (Rs.)"
                }

                input
                    id="amount"
                    type="number"
                    name="amount"
                    placeholder="0"
                    min="0"
                    step="any"
                    required
                    value=(amount)
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label
                    for="image"
                    class=(FORM_LABEL_STYLE)
                {
                    "Image URL (optional)"
                }

                input
                    id="image"
                    type="url"
                    name="image"
                    placeholder="https://..."
                    value=(image)
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            @if !error_message.is_empty() {
                p class="text-red-600 dark:text-red-400"
                {
                    (error_message)
                }
            }

            div class="flex items-center gap-4"
            {
                button type="submit" class=(BUTTON_PRIMARY_STYLE) { (submit_label) }

                a href=(endpoints::MENU_VIEW) class=(LINK_STYLE) { "Cancel" }
            }
        }
    }
}
