//! # CLI Templates
//!
//! Terminal output is rendered from minijinja templates kept as stand-alone files in
//! `templates/` and included here as string constants.
//!
//! Layout math (column widths, truncation, bar lengths) happens in `render.rs`; the
//! templates only arrange pre-computed strings and pick styles through the `style`
//! filter. Each output line is written explicitly, with `-%}` trimming the newline the
//! tag itself would leave behind.

pub const LIST_TEMPLATE: &str = include_str!("templates/list.tmp");
pub const STATS_TEMPLATE: &str = include_str!("templates/stats.tmp");
pub const KEY_VALUES_TEMPLATE: &str = include_str!("templates/key_values.tmp");
pub const TEXT_LIST_TEMPLATE: &str = include_str!("templates/text_list.tmp");
pub const MESSAGES_TEMPLATE: &str = include_str!("templates/messages.tmp");

/// Every template, keyed by the name the renderer registers it under.
pub const TEMPLATES: [(&str, &str); 5] = [
    ("list", LIST_TEMPLATE),
    ("stats", STATS_TEMPLATE),
    ("key_values", KEY_VALUES_TEMPLATE),
    ("text_list", TEXT_LIST_TEMPLATE),
    ("messages", MESSAGES_TEMPLATE),
];
