//! Categories are named, colored labels that transactions are filed under.

mod create;
mod db;
mod domain;
mod edit;
mod form;
mod list;

pub use create::{create_category_endpoint, get_new_category_page};
pub use db::{
    create_category, create_category_table, get_all_categories, get_category,
    get_category_labels, update_category,
};
pub use domain::{
    Category, CategoryId, CategoryLabel, CategoryName, Color, DEFAULT_COLOR, PRESET_COLORS,
};
pub use edit::{get_edit_category_page, update_category_endpoint};
pub use list::get_categories_page;
