//! The form fields shared by the new and edit transaction pages, and the
//! validation of what they submit.

use maud::{Markup, html};
use serde::Deserialize;
use time::Date;

use crate::{
    Error,
    category::CategoryLabel,
    endpoints,
    html::{
        FORM_LABEL_STYLE, FORM_RADIO_GROUP_STYLE, FORM_RADIO_INPUT_STYLE, FORM_RADIO_LABEL_STYLE,
        FORM_TEXT_INPUT_STYLE, LINK_STYLE,
    },
    transaction::{
        NewTransaction, TransactionType,
        domain::{normalize_note, parse_amount},
    },
};

/// What the transaction form submits.
#[derive(Debug, Clone, Deserialize)]
pub struct TransactionForm {
    /// Kept as text so that anything the browser lets through gets the same
    /// error message.
    pub amount: String,
    #[serde(rename = "type")]
    pub type_: TransactionType,
    #[serde(default)]
    pub category: String,
    pub date: Date,
    #[serde(default)]
    pub note: String,
}

impl TransactionForm {
    /// Validate the submitted fields.
    ///
    /// # Errors
    ///
    /// Returns [Error::InvalidAmount] if the amount is not a finite number
    /// greater than zero, or [Error::MissingCategory] if no category was chosen.
    pub fn validate(self) -> Result<NewTransaction, Error> {
        let amount = parse_amount(&self.amount)?;

        if self.category.trim().is_empty() {
            return Err(Error::MissingCategory);
        }

        Ok(NewTransaction {
            amount,
            type_: self.type_,
            category: self.category,
            date: self.date,
            note: normalize_note(&self.note),
        })
    }
}

/// The values the form starts with.
pub struct TransactionFormDefaults<'a> {
    pub transaction_type: TransactionType,
    pub amount: Option<f64>,
    pub category: &'a str,
    pub date: Date,
    pub note: &'a str,
}

pub fn transaction_form_fields(
    defaults: &TransactionFormDefaults<'_>,
    categories: &[CategoryLabel],
) -> Markup {
    let is_expense = matches!(defaults.transaction_type, TransactionType::Expense);
    // Shortest text that parses back to the stored value, so an unchanged
    // amount is saved unchanged.
    let amount_str = defaults.amount.map(|amount| amount.to_string());
    // A category that was renamed since the transaction was saved is still
    // offered so that saving the form does not change it.
    let orphaned_category = (!defaults.category.is_empty()
        && !categories
            .iter()
            .any(|category| category.name == defaults.category))
    .then_some(defaults.category);

    html! {
        fieldset class="space-y-2"
        {
            legend class=(FORM_LABEL_STYLE) { "Transaction type" }

            div class=(FORM_RADIO_GROUP_STYLE)
            {
                div class="flex items-center gap-3"
                {
                    input
                        name="type"
                        id="transaction-type-expense"
                        type="radio"
                        value="expense"
                        checked[is_expense]
                        required
                        class=(FORM_RADIO_INPUT_STYLE);

                    label
                        for="transaction-type-expense"
                        class=(FORM_RADIO_LABEL_STYLE)
                    {
                        "Expense"
                    }
                }

                div class="flex items-center gap-3"
                {
                    input
                        name="type"
                        id="transaction-type-income"
                        type="radio"
                        value="income"
                        checked[!is_expense]
                        required
                        class=(FORM_RADIO_INPUT_STYLE);

                    label
                        for="transaction-type-income"
                        class=(FORM_RADIO_LABEL_STYLE)
                    {
                        "Income"
                    }
                }
            }
        }

        div
        {
            label for="amount" class=(FORM_LABEL_STYLE) { "Amount" }

            div class="input-wrapper w-full"
            {
                input
                    name="amount"
                    id="amount"
                    type="text"
                    inputmode="decimal"
                    placeholder="0.00"
                    required
                    autofocus
                    value=[amount_str.as_deref()]
                    class=(FORM_TEXT_INPUT_STYLE);
            }
        }

        div
        {
            label for="category" class=(FORM_LABEL_STYLE) { "Category" }

            select
                name="category"
                id="category"
                required
                class=(FORM_TEXT_INPUT_STYLE)
            {
                option value="" selected[defaults.category.is_empty()] { "Select a category" }

                @if let Some(name) = orphaned_category {
                    option value=(name) selected { (name) }
                }

                @for category in categories {
                    option
                        value=(category.name)
                        selected[category.name == defaults.category]
                    {
                        (category.name)
                    }
                }
            }

            @if categories.is_empty() {
                p class="mt-2 text-sm text-gray-500 dark:text-gray-400"
                {
                    "No categories yet. "
                    a href=(endpoints::NEW_CATEGORY_VIEW) class=(LINK_STYLE)
                    {
                        "Create a category"
                    }
                }
            }
        }

        div
        {
            label for="date" class=(FORM_LABEL_STYLE) { "Date" }

            input
                name="date"
                id="date"
                type="date"
                value=(defaults.date)
                required
                class=(FORM_TEXT_INPUT_STYLE);
        }

        div
        {
            label for="note" class=(FORM_LABEL_STYLE) { "Note" }

            textarea
                name="note"
                id="note"
                rows="3"
                placeholder="Optional"
                class=(FORM_TEXT_INPUT_STYLE)
            {
                (defaults.note)
            }
        }
    }
}


#[cfg(test)]
mod transaction_form_fields_tests {
    use scraper::{Html, Selector};
    use time::macros::date;

    use crate::{
        category::CategoryLabel,
        transaction::{
            TransactionType,
            form::{TransactionFormDefaults, transaction_form_fields},
        },
    };

    fn labels(names: &[&str]) -> Vec<CategoryLabel> {
        names
            .iter()
            .enumerate()
            .map(|(i, name)| CategoryLabel {
                id: i as i64 + 1,
                name: (*name).to_owned(),
            })
            .collect()
    }

    fn render(defaults: &TransactionFormDefaults<'_>, categories: &[CategoryLabel]) -> Html {
        let fields = transaction_form_fields(defaults, categories);
        Html::parse_fragment(&maud::html! { form { (fields) } }.into_string())
    }

    fn defaults(type_: TransactionType, category: &str) -> TransactionFormDefaults<'_> {
        TransactionFormDefaults {
            transaction_type: type_,
            amount: None,
            category,
            date: date!(2024 - 01 - 05),
            note: "",
        }
    }

    fn options(html: &Html) -> Vec<(String, bool)> {
        html.select(&Selector::parse("select[name=category] option").unwrap())
            .map(|option| {
                (
                    option.value().attr("value").unwrap_or_default().to_owned(),
                    option.value().attr("selected").is_some(),
                )
            })
            .collect()
    }

    #[test]
    fn checks_selected_type() {
        for (type_, want) in [
            (TransactionType::Expense, "expense"),
            (TransactionType::Income, "income"),
        ] {
            let html = render(&defaults(type_, ""), &[]);

            let checked = html
                .select(&Selector::parse("input[type=radio][name=type]").unwrap())
                .find(|input| input.value().attr("checked").is_some())
                .and_then(|input| input.value().attr("value"));
            assert_eq!(checked, Some(want));
        }
    }

    #[test]
    fn lists_categories_with_placeholder_first() {
        let html = render(
            &defaults(TransactionType::Expense, ""),
            &labels(&["Food", "Salary"]),
        );

        assert_eq!(
            options(&html),
            vec![
                ("".to_owned(), true),
                ("Food".to_owned(), false),
                ("Salary".to_owned(), false),
            ]
        );
    }

    #[test]
    fn selects_stored_category() {
        let html = render(
            &defaults(TransactionType::Expense, "Salary"),
            &labels(&["Food", "Salary"]),
        );

        let selected = options(&html)
            .into_iter()
            .filter(|(_, selected)| *selected)
            .map(|(value, _)| value)
            .collect::<Vec<_>>();
        assert_eq!(selected, vec!["Salary"]);
    }

    #[test]
    fn offers_orphaned_category() {
        let html = render(
            &defaults(TransactionType::Expense, "Eating Out"),
            &labels(&["Food"]),
        );

        assert_eq!(
            options(&html),
            vec![
                ("".to_owned(), false),
                ("Eating Out".to_owned(), true),
                ("Food".to_owned(), false),
            ]
        );
    }
}
