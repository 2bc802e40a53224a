//! Runtime configuration, resolved once at startup.
//!
//! Values come from the process environment. For local development a `.env`
//! file in the working directory is loaded first; variables already set in
//! the environment win over the file.
//!
//! | Variable         | Effect                                                  |
//! |------------------|---------------------------------------------------------|
//! | `NODE_ENV`       | `production` hides error details from `500` bodies      |
//! | `SERVER_TIMING`  | `0`, `false` or `off` disables the `Server-Timing` header |
//! | `NOT_FOUND_BODY` | body of `404` responses (default `<h1>404</h1>`)        |
//! | `LOCAL_ADDR`     | serve over plain HTTP on this address instead of Lambda |

use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::Path;

use crate::error::Error;

pub const DEFAULT_NOT_FOUND_BODY: &str = "<h1>404</h1>";

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    pub(crate) verbose_errors: bool,
    pub(crate) timing_enabled: bool,
    pub(crate) not_found_body: String,
    pub(crate) local_addr: Option<SocketAddr>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            verbose_errors: true,
            timing_enabled: true,
            not_found_body: DEFAULT_NOT_FOUND_BODY.to_owned(),
            local_addr: None,
        }
    }
}

impl Config {
    /// Reads the process environment, after loading `.env` if there is one.
    pub fn from_env() -> Result<Self, Error> {
        // No `.env` is the normal case on Lambda.
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the `.env`-formatted file at `path`, with the process
    /// environment taking precedence. Unlike [`from_env`](Self::from_env),
    /// the file must exist and nothing is written back to the environment.
    pub fn from_env_file(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let file: HashMap<String, String> = dotenvy::from_path_iter(path)
            .and_then(|vars| vars.collect())
            .map_err(|e| Error::Config(format!("{}: {e}", path.display())))?;
        Self::from_lookup(|key| std::env::var(key).ok().or_else(|| file.get(key).cloned()))
    }

    /// Resolves configuration from any key/value source.
    pub fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Result<Self, Error> {
        let mut config = Self::default();

        if var("NODE_ENV").is_some_and(|env| env == "production") {
            config.verbose_errors = false;
        }
        if let Some(flag) = var("SERVER_TIMING") {
            config.timing_enabled = !matches!(
                flag.trim().to_ascii_lowercase().as_str(),
                "0" | "false" | "off"
            );
        }
        if let Some(body) = var("NOT_FOUND_BODY") {
            config.not_found_body = body;
        }
        if let Some(addr) = var("LOCAL_ADDR").filter(|a| !a.trim().is_empty()) {
            let addr = addr.trim().parse()
                .map_err(|e| Error::Config(format!("LOCAL_ADDR `{addr}`: {e}")))?;
            config.local_addr = Some(addr);
        }

        Ok(config)
    }

    /// Whether `500` bodies embed the error. Off in production.
    pub fn verbose_errors(mut self, on: bool) -> Self {
        self.verbose_errors = on;
        self
    }

    /// Whether phases are timed and reported in `Server-Timing`.
    pub fn timing(mut self, on: bool) -> Self {
        self.timing_enabled = on;
        self
    }

    pub fn not_found_body(mut self, body: impl Into<String>) -> Self {
        self.not_found_body = body.into();
        self
    }

    pub fn local_addr(mut self, addr: SocketAddr) -> Self {
        self.local_addr = Some(addr);
        self
    }

    pub fn is_verbose(&self) -> bool { self.verbose_errors }
    pub fn is_timing_enabled(&self) -> bool { self.timing_enabled }
    pub fn local(&self) -> Option<SocketAddr> { self.local_addr }
}
