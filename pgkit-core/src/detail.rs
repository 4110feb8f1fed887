//! PostgreSQL connection details and their URI form.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use url::Url;

use crate::error::{PgError, PgResult};

/// Scheme written in front of every serialized connection URI.
pub const SCHEME: &str = "postgresql";

/// The fields of a PostgreSQL connection URI.
///
/// This is a plain value: nothing stops a caller from building a detail that
/// makes no sense (a port without a host, say). Use [`validate`] or
/// [`is_valid`] to check the invariants before relying on it.
///
/// `Clone` produces a fully independent copy, options included, so a detail
/// can be copied and pointed at another database without touching the
/// original.
///
/// [`validate`]: ConnectionDetail::validate
/// [`is_valid`]: ConnectionDetail::is_valid
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectionDetail {
    /// Username, empty when not given.
    pub user: String,
    /// Password, empty when not given. Only meaningful with a user.
    pub password: String,
    /// Host name or address, kept verbatim.
    pub location: String,
    /// Port as written in the URI, empty when not given.
    pub port: String,
    /// Database name, empty when not given.
    pub database: String,
    /// Query string options such as `sslmode` or `application_name`.
    pub options: HashMap<String, String>,
}

impl ConnectionDetail {
    /// Create an empty connection detail.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder for a connection detail.
    pub fn builder() -> ConnectionDetailBuilder {
        ConnectionDetailBuilder::new()
    }

    /// Extract the connection details out of a connection URI.
    ///
    /// The scheme is not checked beyond the URI being well formed. A missing
    /// password and an empty one are both represented by an empty string.
    /// When an option key repeats, the last occurrence wins.
    pub fn parse(uri: &str) -> PgResult<Self> {
        let parsed = Url::parse(uri)?;

        let path = parsed.path();
        let database = path.strip_prefix('/').unwrap_or(path);

        let mut options = HashMap::new();
        for (key, value) in parsed.query_pairs() {
            options.insert(key.into_owned(), value.into_owned());
        }

        Ok(Self {
            user: decode(parsed.username()),
            password: parsed.password().map(decode).unwrap_or_default(),
            location: parsed.host_str().unwrap_or_default().to_string(),
            port: parsed
                .port()
                .map(|p| literal_port(uri).map_or_else(|| p.to_string(), str::to_string))
                .unwrap_or_default(),
            database: decode(database),
            options,
        })
    }

    /// Return a copy of this detail pointing at another database.
    pub fn with_database(&self, database: impl Into<String>) -> Self {
        let mut detail = self.clone();
        detail.database = database.into();
        detail
    }

    /// Check the invariants of the detail, reporting the first violation.
    pub fn validate(&self) -> PgResult<()> {
        if !self.password.is_empty() && self.user.is_empty() {
            return Err(PgError::invalid_detail("password is set without a user"));
        }

        if !self.port.is_empty() && self.location.is_empty() {
            return Err(PgError::invalid_detail("port is set without a location"));
        }

        if self.options.contains_key("") {
            return Err(PgError::invalid_detail("option has an empty key"));
        }

        if !self.port.is_empty() && self.port.parse::<u16>().is_err() {
            return Err(PgError::invalid_detail(format!(
                "port '{}' is not a number",
                self.port
            )));
        }

        Ok(())
    }

    /// Indicates if the detail can be used to construct a valid connection.
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

/// Writes the detail back out as a connection URI.
///
/// Nothing is escaped and nothing is validated: a detail holding characters
/// that are not allowed in a URI produces a string that will not parse. A port
/// is only written when a location is present. Options come out in no
/// particular order.
impl fmt::Display for ConnectionDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://", SCHEME)?;

        if !self.user.is_empty() {
            f.write_str(&self.user)?;

            if !self.password.is_empty() {
                write!(f, ":{}", self.password)?;
            }

            f.write_str("@")?;
        }

        if !self.location.is_empty() {
            f.write_str(&self.location)?;

            if !self.port.is_empty() {
                write!(f, ":{}", self.port)?;
            }
        }

        if !self.database.is_empty() {
            write!(f, "/{}", self.database)?;
        }

        let mut separator = '?';
        for (key, value) in &self.options {
            write!(f, "{}{}={}", separator, key, value)?;
            separator = '&';
        }

        Ok(())
    }
}

impl FromStr for ConnectionDetail {
    type Err = PgError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// The port exactly as written in the authority, e.g. `05432`.
fn literal_port(uri: &str) -> Option<&str> {
    let (_, rest) = uri.split_once("://")?;
    let authority = rest.split(['/', '?', '#']).next()?;
    let host_port = authority.rsplit_once('@').map_or(authority, |(_, hp)| hp);
    let after_host = match host_port.rfind(']') {
        Some(end) => &host_port[end + 1..],
        None => host_port,
    };
    after_host
        .rsplit_once(':')
        .map(|(_, port)| port)
        .filter(|port| !port.is_empty())
}

fn decode(component: &str) -> String {
    String::from_utf8_lossy(&urlencoding::decode_binary(component.as_bytes())).into_owned()
}

/// Builder for connection details.
#[derive(Debug, Default)]
pub struct ConnectionDetailBuilder {
    uri: Option<String>,
    user: Option<String>,
    password: Option<String>,
    location: Option<String>,
    port: Option<u16>,
    database: Option<String>,
    options: Vec<(String, String)>,
}

impl ConnectionDetailBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a connection URI; explicit values override its fields.
    pub fn uri(mut self, uri: impl Into<String>) -> Self {
        self.uri = Some(uri.into());
        self
    }

    /// Set the username.
    pub fn user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }

    /// Set the password.
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Set the host.
    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Set the port.
    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Set the database name.
    pub fn database(mut self, database: impl Into<String>) -> Self {
        self.database = Some(database.into());
        self
    }

    /// Add an option. A later value for the same key replaces an earlier one.
    pub fn option(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.push((key.into(), value.into()));
        self
    }

    /// Build the connection detail, rejecting it if it is not valid.
    pub fn build(self) -> PgResult<ConnectionDetail> {
        let mut detail = match self.uri {
            Some(uri) => ConnectionDetail::parse(&uri)?,
            None => ConnectionDetail::new(),
        };

        if let Some(user) = self.user {
            detail.user = user;
        }
        if let Some(password) = self.password {
            detail.password = password;
        }
        if let Some(location) = self.location {
            detail.location = location;
        }
        if let Some(port) = self.port {
            detail.port = port.to_string();
        }
        if let Some(database) = self.database {
            detail.database = database;
        }
        detail.options.extend(self.options);

        detail.validate()?;
        Ok(detail)
    }
}
