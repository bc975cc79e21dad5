//! campus-core: framework-agnostic core for the Campus LMS edge.
//!
//! Tenant identity, configuration, structured errors, and the color and
//! style plumbing behind tenant theming.

pub mod app;
pub mod color;
pub mod config;
pub mod errors;
pub mod style;
pub mod tenant;
pub mod theme;

pub use app::CampusApp;
pub use color::{contrast_color, hex_to_hsl, ColorError, Hsl, Rgb};
pub use config::{CampusConfig, CampusConfigSnapshot};
pub use errors::{CampusError, CampusResult, ErrorKind};
pub use style::{apply_theme_colors_with_foreground, ColorRole, DocumentStyle, ThemeColors};
pub use tenant::{TenantContext, TenantDomain, TENANT_DOMAIN_HEADER};
pub use theme::TenantTheme;
