use std::fmt::{Debug, Formatter};
use std::time::Duration;

use jitaccess_core::{AppError, AppResult};
use tiberius::{AuthMethod, Config, EncryptionLevel};

/// Default SQL Server port used when the server value carries none.
pub const DEFAULT_SQL_SERVER_PORT: u16 = 1433;

/// Connection settings for the JIT database.
#[derive(Clone)]
pub struct SqlServerSettings {
    /// Server host name or address.
    pub host: String,
    /// TCP port.
    pub port: u16,
    /// Database name.
    pub database: String,
    /// SQL authentication login.
    pub username: String,
    /// SQL authentication password.
    pub password: String,
    /// Whether the connection is TLS encrypted.
    pub encrypt: bool,
    /// Whether self-signed server certificates are accepted.
    pub trust_server_certificate: bool,
    /// Bound on the TCP and login handshake.
    pub connect_timeout: Duration,
}

impl SqlServerSettings {
    /// Splits `host` or `host,port` into its parts.
    pub fn parse_server(server: &str, default_port: u16) -> AppResult<(String, u16)> {
        let server = server.trim();
        let (host, port) = match server.split_once(',') {
            Some((host, port)) => {
                let port = port.trim().parse::<u16>().map_err(|error| {
                    AppError::Validation(format!("invalid port in DB_SERVER '{server}': {error}"))
                })?;
                (host.trim(), port)
            }
            None => (server, default_port),
        };

        if host.is_empty() {
            return Err(AppError::Validation(
                "DB_SERVER must name a host".to_owned(),
            ));
        }

        Ok((host.to_owned(), port))
    }

    /// Builds the driver configuration.
    #[must_use]
    pub fn to_config(&self) -> Config {
        let mut config = Config::new();
        config.host(&self.host);
        config.port(self.port);
        config.database(&self.database);
        config.authentication(AuthMethod::sql_server(&self.username, &self.password));
        config.encryption(if self.encrypt {
            EncryptionLevel::Required
        } else {
            EncryptionLevel::Off
        });
        if self.trust_server_certificate {
            config.trust_cert();
        }
        config
    }
}

impl Debug for SqlServerSettings {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("SqlServerSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("encrypt", &self.encrypt)
            .field("trust_server_certificate", &self.trust_server_certificate)
            .field("connect_timeout", &self.connect_timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::{DEFAULT_SQL_SERVER_PORT, SqlServerSettings};

    #[test]
    fn server_without_port_uses_default() {
        let parsed = SqlServerSettings::parse_server("sql01.corp.local", DEFAULT_SQL_SERVER_PORT);
        assert_eq!(parsed.ok(), Some(("sql01.corp.local".to_owned(), 1433)));
    }

    #[test]
    fn server_with_port_is_split() {
        let parsed = SqlServerSettings::parse_server("sql01, 14330", DEFAULT_SQL_SERVER_PORT);
        assert_eq!(parsed.ok(), Some(("sql01".to_owned(), 14330)));
    }

    #[test]
    fn invalid_port_is_rejected() {
        assert!(SqlServerSettings::parse_server("sql01,abc", DEFAULT_SQL_SERVER_PORT).is_err());
        assert!(SqlServerSettings::parse_server(",1433", DEFAULT_SQL_SERVER_PORT).is_err());
    }

    #[test]
    fn debug_output_redacts_password() {
        let settings = SqlServerSettings {
            host: "sql01".to_owned(),
            port: 1433,
            database: "JIT".to_owned(),
            username: "jit_app".to_owned(),
            password: "hunter2".to_owned(),
            encrypt: true,
            trust_server_certificate: true,
            connect_timeout: Duration::from_secs(15),
        };

        let rendered = format!("{settings:?}");
        assert!(!rendered.contains("hunter2"));
        assert_eq!(settings.to_config().get_addr(), "sql01:1433");
    }
}
