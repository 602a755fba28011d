mod sources;

use std::sync::Arc;

use jitaccess_core::{AppError, AppResult, LoginName};
use jitaccess_domain::UserProfile;
use tracing::debug;

use crate::gateway_ports::{ProcedureGateway, SqlParam};
use crate::procedures;

pub use sources::{
    DEFAULT_IDENTITY_HEADER, DevelopmentSource, ForwardedHeaderSource, IdentitySource,
    IdentitySourceKind, WindowsAuthSource,
};

const MISSING_IDENTITY_MESSAGE: &str = "Missing X-Remote-User header.";
const UNKNOWN_USER_MESSAGE: &str =
    "User not found. Please contact your administrator to create your account.";

/// Case-insensitive view over inbound transport metadata.
#[derive(Debug, Clone, Default)]
pub struct IdentityHints {
    entries: Vec<(String, String)>,
}

impl IdentityHints {
    /// Creates an empty hint set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one hint.
    #[must_use]
    pub fn with(mut self, name: &str, value: &str) -> Self {
        self.insert(name, value);
        self
    }

    /// Adds one hint.
    pub fn insert(&mut self, name: &str, value: &str) {
        self.entries.push((name.to_owned(), value.to_owned()));
    }

    /// Returns the first trimmed non-blank value for the name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .filter(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.trim())
            .find(|value| !value.is_empty())
    }
}

impl<K, V> FromIterator<(K, V)> for IdentityHints
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut hints = Self::new();
        for (name, value) in iter {
            hints.insert(name.as_ref(), value.as_ref());
        }
        hints
    }
}

/// Login produced by the identity resolver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLogin {
    /// Presented login.
    pub login: LoginName,
    /// Strategy that produced it.
    pub source: IdentitySourceKind,
}

/// Identity strategies in fixed priority order; the first valid hit wins.
#[derive(Clone)]
pub struct IdentityResolver {
    sources: Vec<Arc<dyn IdentitySource>>,
}

impl IdentityResolver {
    /// Creates a resolver. Strategies are evaluated forwarded header first,
    /// then Windows auth, then the development fallback, whatever order they
    /// are passed in.
    #[must_use]
    pub fn new(mut sources: Vec<Arc<dyn IdentitySource>>) -> Self {
        sources.sort_by_key(|source| source.kind());
        Self { sources }
    }

    /// Returns configured strategies in evaluation order.
    #[must_use]
    pub fn source_kinds(&self) -> Vec<IdentitySourceKind> {
        self.sources.iter().map(|source| source.kind()).collect()
    }

    /// Resolves the caller login from transport hints.
    pub fn resolve(&self, hints: &IdentityHints) -> AppResult<ResolvedLogin> {
        for source in &self.sources {
            let Some(value) = source.login(hints) else {
                continue;
            };

            let login = match LoginName::new(&value) {
                Ok(login) => login,
                Err(error) => {
                    debug!(source = %source.kind(), %error, "ignoring unusable login hint");
                    continue;
                }
            };
            debug!(source = %source.kind(), login = %login, "resolved caller login");
            return Ok(ResolvedLogin {
                login,
                source: source.kind(),
            });
        }

        Err(AppError::Unauthenticated(MISSING_IDENTITY_MESSAGE.to_owned()))
    }
}

/// Application service mapping callers to active user rows.
#[derive(Clone)]
pub struct IdentityService {
    resolver: IdentityResolver,
}

impl IdentityService {
    /// Creates a new service from the configured resolver.
    #[must_use]
    pub fn new(resolver: IdentityResolver) -> Self {
        Self { resolver }
    }

    /// Returns the underlying resolver.
    #[must_use]
    pub fn resolver(&self) -> &IdentityResolver {
        &self.resolver
    }

    /// Resolves the caller and loads their active user row.
    pub async fn current_user(
        &self,
        gateway: &dyn ProcedureGateway,
        hints: &IdentityHints,
    ) -> AppResult<UserProfile> {
        let resolved = self.resolver.resolve(hints)?;
        self.find_active_user(gateway, &resolved.login).await
    }

    /// Loads the active user whose login equals `login` or ends in `\login`.
    pub async fn find_active_user(
        &self,
        gateway: &dyn ProcedureGateway,
        login: &LoginName,
    ) -> AppResult<UserProfile> {
        let rows = gateway
            .query(
                procedures::FIND_ACTIVE_USER_BY_LOGIN,
                vec![
                    SqlParam::from(login.as_str()),
                    SqlParam::from(login.domain_qualified_pattern()),
                ],
            )
            .await?;

        let Some(row) = rows.into_iter().next() else {
            debug!(login = %login, "no active user row for login");
            return Err(AppError::UserNotFound(UNKNOWN_USER_MESSAGE.to_owned()));
        };

        UserProfile::from_row(row)
    }
}
