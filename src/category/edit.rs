//! Category editing page and endpoint.

use std::sync::{Arc, Mutex};

use axum::{
    Form,
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::PrivateCookieJar;
use axum_htmx::HxRedirect;
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    auth::Session,
    category::{
        Category, CategoryId, CategoryName, Color, domain::CategoryFormData,
        form::category_form_fields, get_category, update_category,
    },
    endpoints,
    flash::set_flash,
    html::{BUTTON_PRIMARY_STYLE, BUTTON_SECONDARY_STYLE, FORM_CONTAINER_STYLE, base},
    navigation::NavBar,
};

pub const CATEGORY_UPDATED_MESSAGE: &str = "Category updated successfully";

/// The state needed for the edit category page and for updating a category.
#[derive(Debug, Clone)]
pub struct EditCategoryState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for EditCategoryState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Render the category editing page, or the 404 page if the user has no
/// category with the ID in the path.
pub async fn get_edit_category_page(
    session: Session,
    Path(category_id): Path<CategoryId>,
    State(state): State<EditCategoryState>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let category = get_category(session.user_id, category_id, &connection).inspect_err(
        |error| {
            if *error != Error::NotFound {
                tracing::error!("Failed to retrieve category {category_id}: {error}");
            }
        },
    )?;

    Ok(edit_category_view(&category).into_response())
}

/// Handle category update form submission.
///
/// Transactions keep the category name they were saved with.
pub async fn update_category_endpoint(
    session: Session,
    Path(category_id): Path<CategoryId>,
    State(state): State<EditCategoryState>,
    jar: PrivateCookieJar,
    Form(form_data): Form<CategoryFormData>,
) -> Response {
    let name = match CategoryName::new(&form_data.name) {
        Ok(name) => name,
        Err(error) => return error.into_alert_response(),
    };

    let color = match Color::new(&form_data.color) {
        Ok(color) => color,
        Err(error) => return error.into_alert_response(),
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    match update_category(session.user_id, category_id, name, color, &connection) {
        Ok(()) => (
            StatusCode::SEE_OTHER,
            HxRedirect(endpoints::CATEGORIES_VIEW.to_owned()),
            set_flash(jar, CATEGORY_UPDATED_MESSAGE),
        )
            .into_response(),
        Err(error @ (Error::UpdateMissingCategory | Error::DuplicateCategoryName(_))) => {
            error.into_alert_response()
        }
        Err(error) => {
            tracing::error!(
                "An unexpected error occurred while updating category {category_id}: {error}"
            );
            error.into_alert_response()
        }
    }
}

fn edit_category_view(category: &Category) -> Markup {
    let edit_endpoint = endpoints::format_endpoint(endpoints::EDIT_CATEGORY_VIEW, category.id);
    let update_endpoint = endpoints::format_endpoint(endpoints::CATEGORY, category.id);
    let nav_bar = NavBar::new(&edit_endpoint).into_html();

    let content = html! {
        (nav_bar)

        div class=(FORM_CONTAINER_STYLE)
        {
            h1 class="text-xl font-bold mb-4" { "Edit Category" }

            form
                hx-put=(update_endpoint)
                hx-target-error="#alert-container"
                hx-sync="this:drop"
                hx-disabled-elt="#submit-button"
                class="w-full space-y-4 md:space-y-6"
            {
                (category_form_fields(category.name.as_ref(), category.color.as_ref()))

                button type="submit" id="submit-button" class=(BUTTON_PRIMARY_STYLE)
                {
                    "Update Category"
                }

                a href=(endpoints::CATEGORIES_VIEW) class=(BUTTON_SECONDARY_STYLE) { "Cancel" }
            }
        }
    };

    base("Edit Category", &[], &content)
}
