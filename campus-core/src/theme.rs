//! Tenant branding as returned by the backend.

use crate::color::{ColorError, Rgb};
use crate::style::ThemeColors;

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TenantTheme {
    pub site_name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub logo_url: Option<String>,
    pub primary_color: String,
    pub secondary_color: String,
    pub accent_color: String,
}

impl TenantTheme {
    pub fn colors(&self) -> ThemeColors {
        ThemeColors::full(&self.primary_color, &self.secondary_color, &self.accent_color)
    }

    /// Check that every color field is a 6-digit hex color.
    pub fn validate(&self) -> Result<(), ColorError> {
        Rgb::from_hex(&self.primary_color)?;
        Rgb::from_hex(&self.secondary_color)?;
        Rgb::from_hex(&self.accent_color)?;
        Ok(())
    }
}
