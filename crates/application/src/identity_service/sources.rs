use std::fmt::{Display, Formatter};
use std::str::FromStr;

use jitaccess_core::AppError;

use super::IdentityHints;

/// Default trusted proxy header carrying the caller login.
pub const DEFAULT_IDENTITY_HEADER: &str = "X-Remote-User";

/// Windows-auth server variables forwarded by the host, in lookup order.
const WINDOWS_AUTH_VARIABLES: &[&str] = &[
    "REMOTE_USER",
    "AUTH_USER",
    "LOGON_USER",
    "X-Forwarded-User",
];

/// Identity strategies known to the resolver, declared in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum IdentitySourceKind {
    /// Trusted reverse proxy header.
    ForwardedHeader,
    /// Windows-auth variables resolved by the hosting web server.
    WindowsAuth,
    /// Fake or process user, development mode only.
    Development,
}

impl IdentitySourceKind {
    /// Returns a stable configuration and log value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ForwardedHeader => "forwarded_header",
            Self::WindowsAuth => "windows_auth",
            Self::Development => "development",
        }
    }
}

impl Display for IdentitySourceKind {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for IdentitySourceKind {
    type Err = AppError;

    /// Parses a configured strategy. `development` is installed from the
    /// environment mode and cannot be listed explicitly.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "forwarded_header" => Ok(Self::ForwardedHeader),
            "windows_auth" => Ok(Self::WindowsAuth),
            other => Err(AppError::Validation(format!(
                "unknown identity source '{other}'"
            ))),
        }
    }
}

/// One strategy for extracting the caller login from transport hints.
pub trait IdentitySource: Send + Sync {
    /// Returns which strategy this is.
    fn kind(&self) -> IdentitySourceKind;

    /// Returns the login, if this strategy can see one.
    fn login(&self, hints: &IdentityHints) -> Option<String>;
}

/// Reads the login from a header set by a trusted reverse proxy.
#[derive(Debug, Clone)]
pub struct ForwardedHeaderSource {
    header_name: String,
}

impl ForwardedHeaderSource {
    /// Creates a source reading the given header.
    #[must_use]
    pub fn new(header_name: impl Into<String>) -> Self {
        Self {
            header_name: header_name.into(),
        }
    }
}

impl Default for ForwardedHeaderSource {
    fn default() -> Self {
        Self::new(DEFAULT_IDENTITY_HEADER)
    }
}

impl IdentitySource for ForwardedHeaderSource {
    fn kind(&self) -> IdentitySourceKind {
        IdentitySourceKind::ForwardedHeader
    }

    fn login(&self, hints: &IdentityHints) -> Option<String> {
        hints.get(&self.header_name).map(str::to_owned)
    }
}

/// Reads the Windows-auth identity the hosting web server resolved from the
/// caller's security token.
#[derive(Debug, Clone, Copy, Default)]
pub struct WindowsAuthSource;

impl IdentitySource for WindowsAuthSource {
    fn kind(&self) -> IdentitySourceKind {
        IdentitySourceKind::WindowsAuth
    }

    fn login(&self, hints: &IdentityHints) -> Option<String> {
        WINDOWS_AUTH_VARIABLES
            .iter()
            .find_map(|name| hints.get(name))
            .map(str::to_owned)
    }
}

/// Falls back to a configured fake user or the process user.
#[derive(Debug, Clone, Default)]
pub struct DevelopmentSource {
    login: Option<String>,
}

impl DevelopmentSource {
    /// Picks the first non-blank candidate, in order.
    #[must_use]
    pub fn new<I>(candidates: I) -> Self
    where
        I: IntoIterator<Item = Option<String>>,
    {
        let login = candidates
            .into_iter()
            .flatten()
            .map(|value| value.trim().to_owned())
            .find(|value| !value.is_empty());

        Self { login }
    }
}

impl IdentitySource for DevelopmentSource {
    fn kind(&self) -> IdentitySourceKind {
        IdentitySourceKind::Development
    }

    fn login(&self, _hints: &IdentityHints) -> Option<String> {
        self.login.clone()
    }
}
