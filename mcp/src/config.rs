//! Connection configuration for the Remote Control endpoint
//!
//! Values come from environment variables with constant fallbacks. The port is wrapped in a
//! validated [`Port`] newtype so an out-of-range value is rejected before we ever try to connect.

use std::fmt;
use std::ops::Deref;
use std::str::FromStr;
use std::time::Duration;

use error_stack::Report;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use crate::constants::{
    CALL_TIMEOUT_ENV_VAR, DEFAULT_CALL_TIMEOUT_SECS, DEFAULT_PROBE_TIMEOUT_SECS,
    DEFAULT_UNREAL_HOST, DEFAULT_UNREAL_PORT, PROBE_TIMEOUT_ENV_VAR, REMOTE_HTTP_PROTOCOL,
    REMOTE_OBJECT_CALL_PATH, UNREAL_HOST_ENV_VAR, UNREAL_PORT_ENV_VAR, VALID_PORT_RANGE,
};
use crate::error::{Error, Result};

/// A validated port number for the Remote Control HTTP server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Port(pub u16);

impl Port {
    /// Validate a raw port number against [`VALID_PORT_RANGE`]
    pub fn new(port: u16) -> Result<Self> {
        if VALID_PORT_RANGE.contains(&port) {
            Ok(Self(port))
        } else {
            Err(Report::new(Error::invalid(
                "port",
                format!(
                    "{port} must be in range {}-{}",
                    VALID_PORT_RANGE.start(),
                    VALID_PORT_RANGE.end()
                ),
            )))
        }
    }
}

impl Default for Port {
    fn default() -> Self {
        Self(DEFAULT_UNREAL_PORT)
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl Deref for Port {
    type Target = u16;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromStr for Port {
    type Err = Report<Error>;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let raw = s
            .trim()
            .parse::<u16>()
            .map_err(|e| Report::new(Error::invalid("port", format!("'{s}': {e}"))))?;
        Self::new(raw)
    }
}

impl<'de> Deserialize<'de> for Port {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct PortVisitor;

        impl Visitor<'_> for PortVisitor {
            type Value = Port;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a port number as u16 or string")
            }

            fn visit_u64<E>(self, value: u64) -> std::result::Result<Port, E>
            where
                E: de::Error,
            {
                let port = u16::try_from(value)
                    .map_err(|_| E::custom(format!("port number {value} is out of u16 range")))?;
                Port::new(port).map_err(|report| E::custom(report.current_context()))
            }

            fn visit_str<E>(self, value: &str) -> std::result::Result<Port, E>
            where
                E: de::Error,
            {
                value
                    .parse::<Port>()
                    .map_err(|report| E::custom(report.current_context()))
            }
        }

        deserializer.deserialize_any(PortVisitor)
    }
}

/// Where and how to reach the engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnrealConfig {
    pub host:          String,
    pub port:          Port,
    pub probe_timeout: Duration,
    pub call_timeout:  Duration,
}

impl Default for UnrealConfig {
    fn default() -> Self {
        Self {
            host:          DEFAULT_UNREAL_HOST.to_string(),
            port:          Port::default(),
            probe_timeout: Duration::from_secs(DEFAULT_PROBE_TIMEOUT_SECS),
            call_timeout:  Duration::from_secs(DEFAULT_CALL_TIMEOUT_SECS),
        }
    }
}

impl UnrealConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let host = lookup(UNREAL_HOST_ENV_VAR)
            .map(|host| host.trim().to_string())
            .filter(|host| !host.is_empty())
            .unwrap_or(defaults.host);

        let port = match lookup(UNREAL_PORT_ENV_VAR) {
            Some(raw) => raw
                .parse::<Port>()
                .map_err(|report| report.attach(format!("Env var: {UNREAL_PORT_ENV_VAR}")))?,
            None => defaults.port,
        };

        let probe_timeout = timeout_from(lookup(PROBE_TIMEOUT_ENV_VAR), PROBE_TIMEOUT_ENV_VAR)?
            .unwrap_or(defaults.probe_timeout);
        let call_timeout = timeout_from(lookup(CALL_TIMEOUT_ENV_VAR), CALL_TIMEOUT_ENV_VAR)?
            .unwrap_or(defaults.call_timeout);

        Ok(Self {
            host,
            port,
            probe_timeout,
            call_timeout,
        })
    }

    /// Full URL of the object-call endpoint
    pub fn object_call_url(&self) -> String {
        format!(
            "{REMOTE_HTTP_PROTOCOL}://{}:{}{REMOTE_OBJECT_CALL_PATH}",
            self.host, self.port
        )
    }
}

fn timeout_from(raw: Option<String>, var: &str) -> Result<Option<Duration>> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Some(Duration::from_secs(secs))),
        _ => Err(Report::new(Error::invalid(
            "timeout",
            format!("{var}='{raw}' must be a positive number of seconds"),
        ))),
    }
}
