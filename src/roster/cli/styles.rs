//! Styles for the roster CLI.
//!
//! Templates refer to styles by semantic name only (`student-id`, `active`, `muted`),
//! never by color. Each theme maps those names onto `console::Style` values, so light
//! and dark palettes differ only here.
//!
//! The theme is picked from the persisted `darkMode` preference rather than from the
//! terminal. Both themes are built once through `once_cell::sync::Lazy`.
//!
//! An unknown style name renders with a `(!?)` prefix so typos in templates show up
//! in the output instead of silently rendering unstyled.

use console::Style;
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Prefix shown when a template asks for a style the theme does not define.
pub const MISSING_STYLE_INDICATOR: &str = "(!?)";

/// Style identifiers shared between templates and renderers.
pub mod names {
    pub const REGULAR: &str = "regular";
    pub const MUTED: &str = "muted";
    pub const TITLE: &str = "title";
    pub const HEADER: &str = "header";
    pub const WARNING: &str = "warning";
    pub const SUCCESS: &str = "success";
    pub const INFO: &str = "info";
    // Student list styles
    pub const STUDENT_ID: &str = "student-id";
    pub const STUDENT_NAME: &str = "student-name";
    pub const ACTIVE: &str = "active";
    pub const INACTIVE: &str = "inactive";
    pub const DATE: &str = "date";
    // Stats styles
    pub const BAR: &str = "bar";
    pub const COUNT: &str = "count";
    // Settings and config styles
    pub const KEY: &str = "key";
    pub const ENABLED: &str = "enabled";
    pub const DISABLED: &str = "disabled";
}

/// A named collection of styles used when rendering templates.
#[derive(Clone, Default)]
pub struct Theme {
    styles: HashMap<&'static str, Style>,
}

impl Theme {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(mut self, name: &'static str, style: Style) -> Self {
        self.styles.insert(name, style);
        self
    }

    pub fn has(&self, name: &str) -> bool {
        self.styles.contains_key(name)
    }

    /// Applies the named style. With `use_color` off the text is returned as is,
    /// apart from the missing-style indicator.
    pub fn apply(&self, name: &str, text: &str, use_color: bool) -> String {
        match self.styles.get(name) {
            Some(style) if use_color => style.apply_to(text).force_styling(true).to_string(),
            Some(_) => text.to_string(),
            None => format!("{} {}", MISSING_STYLE_INDICATOR, text),
        }
    }
}

pub static LIGHT_THEME: Lazy<Theme> = Lazy::new(build_light_theme);
pub static DARK_THEME: Lazy<Theme> = Lazy::new(build_dark_theme);

/// Returns the theme matching the `darkMode` preference.
pub fn theme_for(dark_mode: bool) -> &'static Theme {
    if dark_mode {
        &DARK_THEME
    } else {
        &LIGHT_THEME
    }
}

/// Converts an RGB triplet to the nearest ANSI 256-color palette index.
pub fn rgb_to_ansi256((r, g, b): (u8, u8, u8)) -> u8 {
    if r == g && g == b {
        if r < 8 {
            16
        } else if r > 248 {
            231
        } else {
            232 + ((r as u16 - 8) * 24 / 247) as u8
        }
    } else {
        let red = (r as u16 * 5 / 255) as u8;
        let green = (g as u16 * 5 / 255) as u8;
        let blue = (b as u16 * 5 / 255) as u8;
        16 + 36 * red + 6 * green + blue
    }
}

fn build_light_theme() -> Theme {
    let regular = Style::new().black();
    let muted = Style::new().color256(rgb_to_ansi256((115, 115, 115)));
    let accent = Style::new().color256(rgb_to_ansi256((0, 95, 175)));
    let green = Style::new().color256(rgb_to_ansi256((0, 128, 0)));
    let red = Style::new().color256(rgb_to_ansi256((186, 33, 45)));

    Theme::new()
        .add(names::REGULAR, regular.clone())
        .add(names::MUTED, muted.clone())
        .add(names::TITLE, regular.clone().bold())
        .add(names::HEADER, muted.clone().bold())
        .add(names::WARNING, Style::new().yellow().bold())
        .add(names::SUCCESS, Style::new().green())
        .add(names::INFO, muted.clone())
        .add(names::STUDENT_ID, accent.clone())
        .add(names::STUDENT_NAME, regular.clone().bold())
        .add(names::ACTIVE, green.clone())
        .add(names::INACTIVE, red.clone())
        .add(names::DATE, muted.clone().italic())
        .add(names::BAR, accent.clone())
        .add(names::COUNT, regular.bold())
        .add(names::KEY, accent)
        .add(names::ENABLED, green)
        .add(names::DISABLED, muted)
}

fn build_dark_theme() -> Theme {
    let regular = Style::new().white();
    let muted = Style::new().color256(rgb_to_ansi256((180, 180, 180)));
    let accent = Style::new().color256(rgb_to_ansi256((95, 175, 255)));
    let green = Style::new().color256(rgb_to_ansi256((144, 238, 144)));
    let red = Style::new().color256(rgb_to_ansi256((255, 138, 128)));

    Theme::new()
        .add(names::REGULAR, regular.clone())
        .add(names::MUTED, muted.clone())
        .add(names::TITLE, regular.clone().bold())
        .add(names::HEADER, muted.clone().bold())
        .add(names::WARNING, Style::new().yellow().bold())
        .add(names::SUCCESS, Style::new().green())
        .add(names::INFO, muted.clone())
        .add(names::STUDENT_ID, accent.clone())
        .add(names::STUDENT_NAME, regular.clone().bold())
        .add(names::ACTIVE, green.clone())
        .add(names::INACTIVE, red.clone())
        .add(names::DATE, muted.clone().italic())
        .add(names::BAR, accent.clone())
        .add(names::COUNT, regular.bold())
        .add(names::KEY, accent)
        .add(names::ENABLED, green)
        .add(names::DISABLED, muted)
}
