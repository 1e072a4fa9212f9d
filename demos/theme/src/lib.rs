//! # Theme Context Example
//!
//! A [`ThemeProvider`] owns a dark/light flag. Components further down get
//! what they need from it explicitly: a read handle ([`ThemeProvider::use_theme`])
//! or a toggle ([`ThemeProvider::use_update_theme`]). Nothing in between has
//! to carry the value along.
//!
//! ```
//! use theme::{ThemePanel, ThemeProvider};
//!
//! let provider = ThemeProvider::new();
//! let mut panel = ThemePanel::new(provider.use_theme());
//! let toggle = provider.use_update_theme();
//!
//! assert_eq!(panel.render().background_color, "#333");
//! toggle.toggle();
//! assert_eq!(panel.render().background_color, "#ccc");
//! ```

use hooks_lab_core::context::{Context, ContextUpdater, ContextValue};
use serde::Serialize;

/// Inline styles for a themed panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeStyles {
    /// Panel background
    pub background_color: &'static str,
    /// Text color
    pub color: &'static str,
    /// Inner spacing
    pub padding: &'static str,
    /// Outer spacing
    pub margin: &'static str,
    /// Text alignment
    pub text_align: &'static str,
    /// Corner rounding
    pub border_radius: &'static str,
}

impl ThemeStyles {
    /// Styles for the dark or light theme
    #[must_use]
    pub const fn for_theme(dark: bool) -> Self {
        let (background_color, color) = if dark {
            ("#333", "#ccc")
        } else {
            ("#ccc", "#333")
        };
        Self {
            background_color,
            color,
            padding: "2rem",
            margin: "2rem",
            text_align: "center",
            border_radius: "10px",
        }
    }
}

/// Owner of the theme flag
///
/// Starts dark.
#[derive(Debug, Clone)]
pub struct ThemeProvider {
    dark: Context<bool>,
}

impl Default for ThemeProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl ThemeProvider {
    /// Provider with the dark theme selected
    #[must_use]
    pub fn new() -> Self {
        Self::with_dark(true)
    }

    /// Provider with an explicit starting theme
    #[must_use]
    pub fn with_dark(dark: bool) -> Self {
        Self {
            dark: Context::new(dark),
        }
    }

    /// Read handle for the current theme
    #[must_use]
    pub fn use_theme(&self) -> ContextValue<bool> {
        self.dark.value()
    }

    /// Handle that flips the theme
    #[must_use]
    pub fn use_update_theme(&self) -> ThemeToggle {
        ThemeToggle {
            updater: self.dark.updater(),
        }
    }

    /// True when the dark theme is selected
    #[must_use]
    pub fn is_dark(&self) -> bool {
        self.dark.get()
    }
}

/// Flips the theme of the provider it came from
#[derive(Debug, Clone)]
pub struct ThemeToggle {
    updater: ContextUpdater<bool>,
}

impl ThemeToggle {
    /// Dark becomes light and light becomes dark
    pub fn toggle(&self) {
        self.updater.update(|dark| *dark = !*dark);
        tracing::debug!("Theme toggled");
    }
}

/// Panel whose look follows the theme
#[derive(Debug)]
pub struct ThemePanel {
    theme: ContextValue<bool>,
    renders: u64,
}

impl ThemePanel {
    /// Panel reading from `theme`
    #[must_use]
    pub const fn new(theme: ContextValue<bool>) -> Self {
        Self { theme, renders: 0 }
    }

    /// Styles for the current theme
    pub fn render(&mut self) -> ThemeStyles {
        self.renders += 1;
        let dark = self.theme.get_and_mark_seen();
        ThemeStyles::for_theme(dark)
    }

    /// True when the theme changed since the last render
    #[must_use]
    pub fn needs_render(&self) -> bool {
        self.theme.has_changed()
    }

    /// Waits for the theme to change, then renders
    ///
    /// Returns `None` once the provider and every toggle are gone.
    pub async fn next_render(&mut self) -> Option<ThemeStyles> {
        if self.theme.changed().await {
            Some(self.render())
        } else {
            None
        }
    }

    /// Render passes so far
    #[must_use]
    pub const fn render_count(&self) -> u64 {
        self.renders
    }
}
