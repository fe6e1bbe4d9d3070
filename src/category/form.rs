use maud::{Markup, html};

use crate::{
    category::PRESET_COLORS,
    html::{FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE},
};

// Keeps the color picker and the hex text input showing the same value.
const SYNC_PICKER_TO_TEXT: &str = "document.getElementById('color').value = this.value";
const SYNC_TEXT_TO_PICKER: &str = "if (/^#[0-9a-fA-F]{6}$/.test(this.value)) \
    document.getElementById('color-picker').value = this.value";
const APPLY_SWATCH: &str = "document.getElementById('color').value = this.dataset.color; \
    document.getElementById('color-picker').value = this.dataset.color";

/// The name input, color picker, hex input and preset swatches shared by the
/// new and edit category forms.
///
/// `color` should be a `#rrggbb` color so the native picker can show it.
pub fn category_form_fields(name: &str, color: &str) -> Markup {
    html! {
        div
        {
            label for="name" class=(FORM_LABEL_STYLE) { "Category Name" }

            input
                id="name"
                type="text"
                name="name"
                placeholder="e.g. Groceries"
                value=(name)
                required
                autofocus
                class=(FORM_TEXT_INPUT_STYLE);
        }

        fieldset class="space-y-2"
        {
            legend class=(FORM_LABEL_STYLE) { "Color" }

            div class="flex items-center gap-3"
            {
                input
                    id="color-picker"
                    type="color"
                    value=(color)
                    aria-label="Pick a color"
                    oninput=(SYNC_PICKER_TO_TEXT)
                    class="h-10 w-14 shrink-0 cursor-pointer rounded border
                        border-gray-300 dark:border-gray-600 bg-transparent";

                input
                    id="color"
                    type="text"
                    name="color"
                    value=(color)
                    required
                    pattern="#([0-9a-fA-F]{6}|[0-9a-fA-F]{3})"
                    title="A hex color such as #ff7b7b"
                    oninput=(SYNC_TEXT_TO_PICKER)
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div class="grid grid-cols-6 gap-2"
            {
                @for preset in PRESET_COLORS {
                    button
                        type="button"
                        data-color=(preset)
                        title=(preset)
                        aria-label={ "Use color " (preset) }
                        onclick=(APPLY_SWATCH)
                        class="h-8 w-full rounded border border-gray-300 dark:border-gray-600
                            focus:ring-2 focus:ring-blue-500"
                        style={ "background-color: " (preset) ";" }
                    {}
                }
            }
        }
    }
}
