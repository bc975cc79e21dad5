//! Document-level style variables.
//!
//! [`DocumentStyle`] is the root style scope every rendered page inherits
//! from. It is written by the theme resolver only; readers take snapshots.

use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::color::{contrast_color, hex_to_hsl, ColorError};

/// The three brand color roles a tenant theme defines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorRole {
    Primary,
    Secondary,
    Accent,
}

impl ColorRole {
    pub const ALL: [ColorRole; 3] = [ColorRole::Primary, ColorRole::Secondary, ColorRole::Accent];

    /// `--primary`
    pub fn var_name(&self) -> &'static str {
        match self {
            ColorRole::Primary => "--primary",
            ColorRole::Secondary => "--secondary",
            ColorRole::Accent => "--accent",
        }
    }

    /// `--primary-foreground`
    pub fn foreground_var_name(&self) -> &'static str {
        match self {
            ColorRole::Primary => "--primary-foreground",
            ColorRole::Secondary => "--secondary-foreground",
            ColorRole::Accent => "--accent-foreground",
        }
    }
}

/// Hex colors keyed by role. `None` leaves the role's variables untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThemeColors {
    pub primary: Option<String>,
    pub secondary: Option<String>,
    pub accent: Option<String>,
}

impl ThemeColors {
    /// All three roles set.
    pub fn full(primary: &str, secondary: &str, accent: &str) -> Self {
        Self {
            primary: Some(primary.to_string()),
            secondary: Some(secondary.to_string()),
            accent: Some(accent.to_string()),
        }
    }

    /// Palette applied whenever a tenant theme cannot be resolved.
    pub fn fallback() -> Self {
        Self::full(FALLBACK_PRIMARY, FALLBACK_SECONDARY, FALLBACK_ACCENT)
    }

    pub fn get(&self, role: ColorRole) -> Option<&str> {
        match role {
            ColorRole::Primary => self.primary.as_deref(),
            ColorRole::Secondary => self.secondary.as_deref(),
            ColorRole::Accent => self.accent.as_deref(),
        }
    }
}

pub const FALLBACK_PRIMARY: &str = "#ef4444";
pub const FALLBACK_SECONDARY: &str = "#3b82f6";
pub const FALLBACK_ACCENT: &str = "#8b5cf6";

/// Shared handle to the root style scope. Clones share the same properties.
#[derive(Debug, Clone, Default)]
pub struct DocumentStyle {
    props: Arc<RwLock<BTreeMap<String, String>>>,
}

impl DocumentStyle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_property(&self, name: impl Into<String>, value: impl Into<String>) {
        self.props.write().insert(name.into(), value.into());
    }

    pub fn get_property(&self, name: &str) -> Option<String> {
        self.props.read().get(name).cloned()
    }

    /// Apply several properties under one write lock.
    pub fn set_properties<I>(&self, entries: I)
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut props = self.props.write();
        for (name, value) in entries {
            props.insert(name, value);
        }
    }

    pub fn snapshot(&self) -> BTreeMap<String, String> {
        self.props.read().clone()
    }

    pub fn is_empty(&self) -> bool {
        self.props.read().is_empty()
    }

    /// Render as a `:root` rule.
    pub fn to_css(&self) -> String {
        let props = self.props.read();
        let mut css = String::from(":root {\n");
        for (name, value) in props.iter() {
            css.push_str(&format!("  {name}: {value};\n"));
        }
        css.push_str("}\n");
        css
    }
}

/// Set `--{role}` and `--{role}-foreground` for every role present in
/// `colors`.
///
/// All colors are converted before anything is written, so a malformed color
/// leaves the style scope unchanged.
pub fn apply_theme_colors_with_foreground(
    colors: &ThemeColors,
    style: &DocumentStyle,
) -> Result<(), ColorError> {
    let mut entries = Vec::with_capacity(ColorRole::ALL.len() * 2);
    for role in ColorRole::ALL {
        if let Some(hex) = colors.get(role) {
            entries.push((role.var_name().to_string(), hex_to_hsl(hex)?.to_string()));
            entries.push((
                role.foreground_var_name().to_string(),
                contrast_color(hex)?.to_string(),
            ));
        }
    }
    style.set_properties(entries);
    Ok(())
}
