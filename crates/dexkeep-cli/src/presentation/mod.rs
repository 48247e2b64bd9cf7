//! Presentation utilities for CLI output.

pub mod tables;

pub use tables::{
    format_size, format_tags, print_entity_table, print_group_table, print_separator,
    truncate_string,
};
