//! Everforest theme for the Parley terminal client.
//!
//! Dark and light variants with runtime switching. The selected variant is
//! persisted through [`crate::settings::Settings`].

use ratatui::style::{Color, Modifier, Style};
use serde::{Deserialize, Serialize};
use strum::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display)]
pub enum ThemeVariant {
    #[default]
    #[strum(to_string = "Everforest Dark")]
    EverforestDark,
    #[strum(to_string = "Everforest Light")]
    EverforestLight,
}

#[derive(Debug, Clone)]
pub struct ColorPalette {
    pub background: Color,
    pub foreground: Color,
    pub accent: Color,
    pub secondary: Color,
    pub info: Color,
    pub border: Color,
    pub selection: Color,
    pub warning: Color,
}

/// UI element types for styling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Element {
    /// Normal text content
    Text,
    /// Titles and headers
    Title,
    /// Borders and frames
    Border,
    /// Sender labels and the input prompt
    Accent,
    /// Error replies
    Secondary,
    /// Status line
    Info,
    Background,
    /// Input bar while it accepts keys
    Active,
    /// Input bar while a request is in flight
    Inactive,
    /// Notices
    Warning,
}

#[derive(Debug, Clone)]
pub struct Theme {
    variant: ThemeVariant,
    colors: ColorPalette,
}

impl Default for Theme {
    fn default() -> Self {
        Self::new(ThemeVariant::default())
    }
}

impl Theme {
    pub fn new(variant: ThemeVariant) -> Self {
        let colors = match variant {
            ThemeVariant::EverforestDark => ColorPalette {
                background: Color::Rgb(45, 53, 59),    // #2d353b
                foreground: Color::Rgb(211, 198, 170), // #d3c6aa
                accent: Color::Rgb(167, 192, 128),     // #a7c080
                secondary: Color::Rgb(230, 126, 128),  // #e67e80
                info: Color::Rgb(127, 187, 179),       // #7fbbb3
                border: Color::Rgb(116, 125, 135),     // #747d87
                selection: Color::Rgb(64, 72, 78),     // #40484e
                warning: Color::Rgb(219, 188, 127),    // #dbbc7f
            },
            ThemeVariant::EverforestLight => ColorPalette {
                background: Color::Rgb(253, 246, 227), // #fdf6e3
                foreground: Color::Rgb(92, 106, 114),  // #5c6a72
                accent: Color::Rgb(141, 161, 1),       // #8da101
                secondary: Color::Rgb(248, 85, 82),    // #f85552
                info: Color::Rgb(53, 167, 124),        // #35a77c
                border: Color::Rgb(150, 160, 170),     // #96a0aa
                selection: Color::Rgb(243, 236, 217),  // #f3ecd9
                warning: Color::Rgb(207, 131, 44),     // #cf832c
            },
        };

        Self { variant, colors }
    }

    pub fn variant(&self) -> ThemeVariant {
        self.variant
    }

    pub fn colors(&self) -> &ColorPalette {
        &self.colors
    }

    pub fn toggle(&mut self) {
        let next = match self.variant {
            ThemeVariant::EverforestDark => ThemeVariant::EverforestLight,
            ThemeVariant::EverforestLight => ThemeVariant::EverforestDark,
        };
        *self = Self::new(next);
    }

    pub fn ratatui_style(&self, element: Element) -> Style {
        let base = Style::default().bg(self.colors.background);
        match element {
            Element::Text | Element::Background => base.fg(self.colors.foreground),
            Element::Title | Element::Accent => {
                base.fg(self.colors.accent).add_modifier(Modifier::BOLD)
            }
            Element::Border | Element::Inactive => base.fg(self.colors.border),
            Element::Secondary => base.fg(self.colors.secondary),
            Element::Info => base.fg(self.colors.info).add_modifier(Modifier::ITALIC),
            Element::Active => Style::default()
                .fg(self.colors.foreground)
                .bg(self.colors.selection),
            Element::Warning => base.fg(self.colors.warning).add_modifier(Modifier::BOLD),
        }
    }
}
