use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use jitaccess_application::{
    DEFAULT_IDENTITY_HEADER, DevelopmentSource, ForwardedHeaderSource, IdentityResolver,
    IdentitySource, IdentitySourceKind, WindowsAuthSource,
};
use jitaccess_core::AppError;
use jitaccess_infrastructure::{DEFAULT_SQL_SERVER_PORT, SqlServerSettings};
use tracing_subscriber::EnvFilter;

const DEFAULT_CORS_ORIGINS: &str = "http://127.0.0.1:5173,http://localhost:5173";
const DEVELOPMENT_ENVIRONMENTS: [&str; 3] = ["dev", "development", "local"];

/// What the process was started to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiCommand {
    Serve,
    CheckDb,
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub command: ApiCommand,
    pub app_env: String,
    pub development_mode: bool,
    pub api_host: String,
    pub api_port: u16,
    pub sql_server: SqlServerSettings,
    pub cors_origins: Vec<String>,
    pub identity_header: String,
    pub identity_sources: Vec<IdentitySourceKind>,
    pub development_login: Option<String>,
}

impl ApiConfig {
    pub fn load() -> Result<Self, AppError> {
        Self::from_lookup(|name| env::var(name).ok(), env::args().nth(1).as_deref())
    }

    /// Builds the configuration from a variable lookup and the first CLI argument.
    pub fn from_lookup<F>(lookup: F, first_arg: Option<&str>) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let command = match first_arg {
            None | Some("serve") => ApiCommand::Serve,
            Some("check-db") => ApiCommand::CheckDb,
            Some(other) => {
                return Err(AppError::Validation(format!(
                    "unknown command '{other}', expected 'serve' or 'check-db'"
                )));
            }
        };

        let app_env = lookup("APP_ENV")
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| "dev".to_owned());
        let development_mode = DEVELOPMENT_ENVIRONMENTS
            .iter()
            .any(|candidate| app_env.trim().eq_ignore_ascii_case(candidate));

        let api_host = lookup("API_HOST").unwrap_or_else(|| "127.0.0.1".to_owned());
        let api_port = parse_or("API_PORT", lookup("API_PORT"), 8000_u16)?;

        let default_port = parse_or("DB_PORT", lookup("DB_PORT"), DEFAULT_SQL_SERVER_PORT)?;
        let (host, port) = SqlServerSettings::parse_server(
            &required_non_empty(&lookup, "DB_SERVER")?,
            default_port,
        )?;
        let connect_timeout_secs = parse_or(
            "DB_CONNECT_TIMEOUT_SECS",
            lookup("DB_CONNECT_TIMEOUT_SECS"),
            15_u64,
        )?;
        let sql_server = SqlServerSettings {
            host,
            port,
            database: required_non_empty(&lookup, "DB_NAME")?,
            username: required_non_empty(&lookup, "DB_USERNAME")?,
            password: required(&lookup, "DB_PASSWORD")?,
            encrypt: parse_flag("DB_ENCRYPT", lookup("DB_ENCRYPT"), true)?,
            trust_server_certificate: parse_flag(
                "DB_TRUST_SERVER_CERTIFICATE",
                lookup("DB_TRUST_SERVER_CERTIFICATE"),
                true,
            )?,
            connect_timeout: Duration::from_secs(connect_timeout_secs),
        };

        let cors_origins = comma_list(
            &lookup("CORS_ORIGINS").unwrap_or_else(|| DEFAULT_CORS_ORIGINS.to_owned()),
        );

        let identity_header = lookup("IDENTITY_HEADER")
            .map(|value| value.trim().to_owned())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_IDENTITY_HEADER.to_owned());
        let mut identity_sources = comma_list(
            &lookup("IDENTITY_SOURCES").unwrap_or_else(|| "forwarded_header".to_owned()),
        )
        .iter()
        .map(|value| IdentitySourceKind::from_str(value))
        .collect::<Result<Vec<_>, _>>()?;
        identity_sources.sort();
        identity_sources.dedup();
        if identity_sources.is_empty() {
            return Err(AppError::Validation(
                "IDENTITY_SOURCES must name at least one strategy".to_owned(),
            ));
        }

        let development_login = [lookup("JIT_FAKE_USER"), lookup("USERNAME"), lookup("USER")]
            .into_iter()
            .flatten()
            .map(|value| value.trim().to_owned())
            .find(|value| !value.is_empty());

        Ok(Self {
            command,
            app_env,
            development_mode,
            api_host,
            api_port,
            sql_server,
            cors_origins,
            identity_header,
            identity_sources,
            development_login,
        })
    }

    pub fn socket_address(&self) -> Result<SocketAddr, AppError> {
        let host = IpAddr::from_str(&self.api_host).map_err(|error| {
            AppError::Internal(format!("invalid API_HOST '{}': {error}", self.api_host))
        })?;
        Ok(SocketAddr::from((host, self.api_port)))
    }

    /// Builds the identity strategy chain. The development fallback is only
    /// appended in development mode.
    pub fn identity_resolver(&self) -> IdentityResolver {
        let mut sources = self
            .identity_sources
            .iter()
            .map(|kind| self.identity_source(*kind))
            .collect::<Vec<_>>();

        if self.development_mode && !self.identity_sources.contains(&IdentitySourceKind::Development)
        {
            sources.push(self.identity_source(IdentitySourceKind::Development));
        }

        IdentityResolver::new(sources)
    }

    fn identity_source(&self, kind: IdentitySourceKind) -> Arc<dyn IdentitySource> {
        match kind {
            IdentitySourceKind::ForwardedHeader => {
                Arc::new(ForwardedHeaderSource::new(self.identity_header.clone()))
            }
            IdentitySourceKind::WindowsAuth => Arc::new(WindowsAuthSource),
            IdentitySourceKind::Development => {
                Arc::new(DevelopmentSource::new([self.development_login.clone()]))
            }
        }
    }
}

pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

fn required<F>(lookup: &F, name: &str) -> Result<String, AppError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name).ok_or_else(|| AppError::Validation(format!("{name} is required")))
}

fn required_non_empty<F>(lookup: &F, name: &str) -> Result<String, AppError>
where
    F: Fn(&str) -> Option<String>,
{
    let value = required(lookup, name)?;
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{name} must not be empty")));
    }

    Ok(value.trim().to_owned())
}

fn parse_or<T>(name: &str, value: Option<String>, default: T) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match value.filter(|value| !value.trim().is_empty()) {
        Some(value) => value
            .trim()
            .parse::<T>()
            .map_err(|error| AppError::Validation(format!("invalid {name} '{value}': {error}"))),
        None => Ok(default),
    }
}

fn parse_flag(name: &str, value: Option<String>, default: bool) -> Result<bool, AppError> {
    let Some(value) = value.filter(|value| !value.trim().is_empty()) else {
        return Ok(default);
    };

    match value.trim().to_ascii_lowercase().as_str() {
        "yes" | "true" | "1" | "on" => Ok(true),
        "no" | "false" | "0" | "off" => Ok(false),
        _ => Err(AppError::Validation(format!(
            "{name} must be yes or no, got '{value}'"
        ))),
    }
}

fn comma_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}
