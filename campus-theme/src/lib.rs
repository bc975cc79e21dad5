//! campus-theme: tenant theme resolution.
//!
//! A [`ThemeResolver`] fetches one tenant's branding through a
//! [`ThemeSource`] and keeps that tenant's [`campus_core::DocumentStyle`]
//! in sync with it. [`ThemeRegistry`] holds one resolver per tenant for a
//! server hosting many tenants.

mod error;
pub mod registry;
pub mod resolver;
pub mod source;

pub use error::ThemeFetchError;
pub use registry::{RegistryLimits, ThemeRegistry};
pub use resolver::{ThemeResolver, ThemeSnapshot, ThemeStatus};
pub use source::{HttpThemeSource, ThemeSource, THEME_ENDPOINT};
