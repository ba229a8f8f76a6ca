//! The transforms themselves, free of any file handling

mod cleanup;
mod styling;

pub use cleanup::{remove_duplicates, remove_empty_rows, sort_by_first_column};
pub use styling::{
    add_borders, auto_fit_columns, center_align, format_headers, format_numbers, freeze_header,
};

pub(crate) use styling::style_body;
