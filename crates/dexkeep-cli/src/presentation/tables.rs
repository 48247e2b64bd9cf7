//! Table formatting utilities for CLI output.

use dexkeep_core::{EntityRef, Group, MAX_GROUP_MEMBERS};

/// Truncates a string to at most `max_len` characters, adding "..." if needed.
///
/// # Examples
///
/// ```rust
/// use dexkeep_cli::presentation::truncate_string;
///
/// assert_eq!(truncate_string("Hello", 10), "Hello");
/// assert_eq!(truncate_string("Hello World", 8), "Hello...");
/// ```
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}

/// Print a horizontal separator line.
pub fn print_separator(width: usize) {
    println!("{}", "-".repeat(width));
}

/// Join category tags for display, `--` when there are none.
pub fn format_tags(tags: &[String]) -> String {
    if tags.is_empty() {
        "--".to_string()
    } else {
        tags.join("/")
    }
}

/// Print entities as an id/name/tags table.
pub fn print_entity_table(entities: &[EntityRef]) {
    println!("{:<6} {:<20} Types", "ID", "Name");
    print_separator(48);
    for entity in entities {
        println!(
            "{:<6} {:<20} {}",
            entity.id,
            truncate_string(&entity.name, 19),
            format_tags(&entity.category_tags)
        );
    }
}

/// Print groups as an id/name/size/origin table.
pub fn print_group_table(groups: &[Group]) {
    println!("{:<36} {:<30} {:<7} Origin", "ID", "Name", "Members");
    print_separator(82);
    for group in groups {
        println!(
            "{:<36} {:<30} {:<7} {}",
            group.id,
            truncate_string(&group.name, 29),
            format_size(group),
            group.origin
        );
    }
}

/// `current/max` membership count.
pub fn format_size(group: &Group) -> String {
    format!("{}/{MAX_GROUP_MEMBERS}", group.members.len())
}
