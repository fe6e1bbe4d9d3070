//! The transactions page: the filter panel and the filtered transaction list.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use axum::{
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use axum_extra::extract::PrivateCookieJar;
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    alert::Alert,
    auth::Session,
    category::{CategoryLabel, get_all_categories},
    endpoints,
    flash::take_flash,
    html::{
        EXPENSE_BADGE_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, INCOME_BADGE_STYLE,
        LINK_STYLE, PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE,
        base, color_swatch, edit_delete_action_links, format_currency, truncate_text,
    },
    navigation::NavBar,
    transaction::{
        Transaction, TransactionType,
        delete::TRANSACTIONS_CHANGED_EVENT,
        filter::{FilterState, apply_filters},
        get_all_transactions,
    },
};

const DELETE_CONFIRM_MESSAGE: &str =
    "Are you sure you want to delete this transaction? This action cannot be undone.";

const NOTE_MAX_GRAPHEMES: usize = 40;

/// The state needed for the transactions page.
#[derive(Debug, Clone)]
pub struct TransactionsPageState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for TransactionsPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A transaction ready for display.
struct TransactionRow<'a> {
    transaction: &'a Transaction,
    /// `None` if the category was renamed since the transaction was saved.
    category_color: Option<&'a str>,
    edit_url: String,
    delete_url: String,
}

/// Render the transactions page with the filters from the query string applied.
pub async fn get_transactions_page(
    session: Session,
    State(state): State<TransactionsPageState>,
    Query(filters): Query<FilterState>,
    jar: PrivateCookieJar,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let transactions = get_all_transactions(session.user_id, &connection)
        .inspect_err(|error| tracing::error!("could not get transactions: {error}"))?;
    let categories = get_all_categories(session.user_id, &connection)
        .inspect_err(|error| tracing::error!("could not get categories: {error}"))?;
    drop(connection);

    let category_labels = categories.iter().map(CategoryLabel::from).collect::<Vec<_>>();

    let total_count = transactions.len();
    let visible = apply_filters(transactions, &filters);

    let colors_by_name = categories
        .iter()
        .map(|category| (category.name.as_ref(), category.color.as_ref()))
        .collect::<HashMap<_, _>>();
    let rows = visible
        .iter()
        .map(|transaction| TransactionRow {
            transaction,
            category_color: colors_by_name.get(transaction.category.as_str()).copied(),
            edit_url: endpoints::format_endpoint(endpoints::EDIT_TRANSACTION_VIEW, transaction.id),
            delete_url: endpoints::format_endpoint(endpoints::TRANSACTION, transaction.id),
        })
        .collect::<Vec<_>>();

    let (jar, flash) = take_flash(jar);

    Ok((
        jar,
        transactions_view(&rows, total_count, &filters, &category_labels, flash),
    )
        .into_response())
}

fn transactions_view(
    rows: &[TransactionRow<'_>],
    total_count: usize,
    filters: &FilterState,
    categories: &[CategoryLabel],
    flash: Option<String>,
) -> Markup {
    let nav_bar = NavBar::new(endpoints::TRANSACTIONS_VIEW).into_html();
    let query = filters.to_query_string();
    let list_url = if query.is_empty() {
        endpoints::TRANSACTIONS_VIEW.to_owned()
    } else {
        format!("{}?{query}", endpoints::TRANSACTIONS_VIEW)
    };

    let content = html!(
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            @if let Some(message) = flash {
                div class="w-full max-w-md" { (Alert::SuccessSimple { message }.into_html()) }
            }

            section class="space-y-4 w-full lg:max-w-5xl"
            {
                header class="flex justify-between flex-wrap items-end"
                {
                    h1 class="text-xl font-bold" { "Transactions" }

                    a href=(endpoints::NEW_TRANSACTION_VIEW) class=(LINK_STYLE)
                    {
                        "Add Transaction"
                    }
                }

                (filter_panel_view(filters, categories))

                div
                    id="transactions-list"
                    hx-get=(list_url)
                    hx-trigger={ (TRANSACTIONS_CHANGED_EVENT) " from:body" }
                    hx-select="#transactions-list"
                    hx-swap="outerHTML"
                    class="space-y-4"
                {
                    p class="text-sm text-gray-500 dark:text-gray-400" data-summary="true"
                    {
                        "Showing " (rows.len()) " of " (total_count) " transactions"
                    }

                    (transaction_cards_view(rows))
                    (transaction_table_view(rows))
                }
            }
        }
    );

    base("Transactions", &[], &content)
}

fn filter_panel_view(filters: &FilterState, categories: &[CategoryLabel]) -> Markup {
    let type_option = |type_: TransactionType, label: &str| {
        html! {
            option value=(type_.as_str()) selected[filters.type_ == type_.as_str()] { (label) }
        }
    };

    html! {
        details
            open[!filters.is_empty()]
            class="rounded border border-gray-200 bg-white px-4 py-3 dark:border-gray-700
                dark:bg-gray-800"
        {
            summary class="cursor-pointer font-semibold" { "Filters" }

            form
                hx-get=(endpoints::TRANSACTIONS_VIEW)
                hx-trigger="change"
                hx-target="#transactions-list"
                hx-select="#transactions-list"
                hx-swap="outerHTML"
                hx-push-url="true"
                hx-sync="this:replace"
                class="mt-4 grid gap-4 sm:grid-cols-2 lg:grid-cols-4"
            {
                div
                {
                    label for="filter-category" class=(FORM_LABEL_STYLE) { "Category" }

                    select id="filter-category" name="category" class=(FORM_TEXT_INPUT_STYLE)
                    {
                        option value="" selected[filters.category.is_empty()] { "All categories" }

                        @for category in categories {
                            option
                                value=(category.name)
                                selected[filters.category == category.name]
                            {
                                (category.name)
                            }
                        }
                    }
                }

                div
                {
                    label for="filter-type" class=(FORM_LABEL_STYLE) { "Type" }

                    select id="filter-type" name="type" class=(FORM_TEXT_INPUT_STYLE)
                    {
                        option value="" selected[filters.type_.is_empty()] { "All types" }
                        (type_option(TransactionType::Income, "Income"))
                        (type_option(TransactionType::Expense, "Expense"))
                    }
                }

                div
                {
                    label for="filter-start-date" class=(FORM_LABEL_STYLE) { "From" }

                    input
                        id="filter-start-date"
                        name="start_date"
                        type="date"
                        value=(filters.start_date)
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                div
                {
                    label for="filter-end-date" class=(FORM_LABEL_STYLE) { "To" }

                    input
                        id="filter-end-date"
                        name="end_date"
                        type="date"
                        value=(filters.end_date)
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                div class="sm:col-span-2 lg:col-span-4"
                {
                    a href=(endpoints::TRANSACTIONS_VIEW) class=(LINK_STYLE) { "Clear Filters" }
                }
            }
        }
    }
}

fn type_badge(type_: TransactionType) -> Markup {
    let (style, label) = match type_ {
        TransactionType::Income => (INCOME_BADGE_STYLE, "Income"),
        TransactionType::Expense => (EXPENSE_BADGE_STYLE, "Expense"),
    };

    html! { span class=(style) { (label) } }
}

fn amount_view(transaction: &Transaction) -> Markup {
    let style = match transaction.type_ {
        TransactionType::Income => "font-semibold tabular-nums text-green-600 dark:text-green-400",
        TransactionType::Expense => "font-semibold tabular-nums text-red-600 dark:text-red-400",
    };

    html! { span class=(style) { (format_currency(transaction.amount)) } }
}

fn category_view(row: &TransactionRow<'_>) -> Markup {
    html! {
        span class="inline-flex items-center gap-2"
        {
            @if let Some(color) = row.category_color {
                (color_swatch(color))
            }
            (row.transaction.category)
        }
    }
}

fn note_text(transaction: &Transaction) -> String {
    match transaction.note.as_deref() {
        Some(note) => truncate_text(note, NOTE_MAX_GRAPHEMES),
        None => "-".to_owned(),
    }
}

fn empty_state_view() -> Markup {
    html! {
        "No transactions found. "
        a href=(endpoints::NEW_TRANSACTION_VIEW) class=(LINK_STYLE)
        {
            "Add your first transaction"
        }
    }
}

fn transaction_table_view(rows: &[TransactionRow<'_>]) -> Markup {
    html! {
        section class="hidden lg:block dark:bg-gray-800"
        {
            table class="w-full text-sm text-left rtl:text-right text-gray-500 dark:text-gray-400"
            {
                thead class=(TABLE_HEADER_STYLE)
                {
                    tr
                    {
                        th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Type" }
                        th scope="col" class="px-6 py-4 text-right" { "Amount" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Note" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Actions" }
                    }
                }

                tbody
                {
                    @for row in rows {
                        tr class=(TABLE_ROW_STYLE) data-transaction-row=(row.transaction.id)
                        {
                            td class=(TABLE_CELL_STYLE)
                            {
                                time datetime=(row.transaction.date) { (row.transaction.date) }
                            }
                            td class=(TABLE_CELL_STYLE) { (category_view(row)) }
                            td class=(TABLE_CELL_STYLE) { (type_badge(row.transaction.type_)) }
                            td class="px-6 py-4 text-right" { (amount_view(row.transaction)) }
                            td class=(TABLE_CELL_STYLE) { (note_text(row.transaction)) }
                            td class=(TABLE_CELL_STYLE)
                            {
                                div class="flex gap-4"
                                {
                                    (edit_delete_action_links(
                                        &row.edit_url,
                                        &row.delete_url,
                                        DELETE_CONFIRM_MESSAGE,
                                        "#alert-container",
                                        "innerHTML",
                                    ))
                                }
                            }
                        }
                    }

                    @if rows.is_empty() {
                        tr
                        {
                            td
                                colspan="6"
                                class="px-6 py-4 text-center text-gray-500 dark:text-gray-400"
                            {
                                (empty_state_view())
                            }
                        }
                    }
                }
            }
        }
    }
}

fn transaction_cards_view(rows: &[TransactionRow<'_>]) -> Markup {
    html! {
        ul class="lg:hidden space-y-4"
        {
            @for row in rows {
                li class="rounded border border-gray-200 bg-white px-4 py-3 shadow-sm
                    dark:border-gray-700 dark:bg-gray-800"
                    data-transaction-card=(row.transaction.id)
                {
                    div class="flex items-start justify-between gap-3"
                    {
                        div class="space-y-1"
                        {
                            div class="text-sm font-medium text-gray-900 dark:text-white"
                            {
                                (category_view(row))
                            }
                            time
                                datetime=(row.transaction.date)
                                class="block text-xs text-gray-500 dark:text-gray-400"
                            {
                                (row.transaction.date)
                            }
                        }

                        div class="flex flex-col items-end gap-1"
                        {
                            (amount_view(row.transaction))
                            (type_badge(row.transaction.type_))
                        }
                    }

                    p class="mt-2 text-sm text-gray-700 dark:text-gray-300"
                    {
                        (note_text(row.transaction))
                    }

                    div class="mt-2 flex items-center gap-4 text-sm"
                    {
                        (edit_delete_action_links(
                            &row.edit_url,
                            &row.delete_url,
                            DELETE_CONFIRM_MESSAGE,
                            "#alert-container",
                            "innerHTML",
                        ))
                    }
                }
            }

            @if rows.is_empty() {
                li class="rounded border border-dashed border-gray-300 bg-white px-4 py-6
                    text-center text-sm text-gray-500 dark:border-gray-700 dark:bg-gray-800
                    dark:text-gray-400"
                {
                    (empty_state_view())
                }
            }
        }
    }
}
