//! Ratatui widgets for the launcher screens

mod alert_dialog;
mod catalog_list;
mod help_bar;

pub use alert_dialog::{AlertDialog, AlertKind};
pub use catalog_list::CatalogList;
pub use help_bar::{HelpBar, KeyHint};
