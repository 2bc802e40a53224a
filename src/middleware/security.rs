//! Security response headers.

use super::Middleware;
use crate::error::Error;
use crate::response::Response;

const DEFAULTS: [(&str, &str); 7] = [
    ("strict-transport-security", "max-age=15552000; includeSubDomains; preload"),
    ("x-content-type-options", "nosniff"),
    ("x-frame-options", "DENY"),
    ("referrer-policy", "no-referrer"),
    ("x-dns-prefetch-control", "off"),
    ("x-download-options", "noopen"),
    ("x-permitted-cross-domain-policies", "none"),
];

/// Adds security headers to every response.
///
/// A header the handler already set is left alone, so a page can relax one
/// (say, `x-frame-options` for an embeddable widget) without a custom stack.
#[derive(Clone, Debug)]
pub struct SecurityHeaders {
    headers: Vec<(String, String)>,
}

impl Default for SecurityHeaders {
    fn default() -> Self {
        Self {
            headers: DEFAULTS.iter()
                .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
                .collect(),
        }
    }
}

impl SecurityHeaders {
    /// Adds `name`, or replaces its default value.
    pub fn header(mut self, name: &str, value: &str) -> Self {
        match self.headers.iter_mut().find(|(k, _)| k.eq_ignore_ascii_case(name)) {
            Some(slot) => slot.1 = value.to_owned(),
            None => self.headers.push((name.to_ascii_lowercase(), value.to_owned())),
        }
        self
    }
}

impl Middleware for SecurityHeaders {
    fn name(&self) -> &'static str { "security-headers" }

    fn after(&self, res: &mut Response) -> Result<(), Error> {
        for (name, value) in &self.headers {
            res.insert_default_header(name, value);
        }
        Ok(())
    }
}
