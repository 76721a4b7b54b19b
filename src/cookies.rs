use std::collections::HashMap;

use cookie::Cookie;

/// Name of the cookie Django stores the CSRF token under.
pub const CSRF_COOKIE: &str = "csrftoken";

/// Read-only view of the session's cookies, parsed from the `Cookie` request
/// header the host captured. Values are percent-decoded on parse.
#[derive(Debug, Clone, Default)]
pub struct CookieJar {
    raw: String,
    values: HashMap<String, String>,
}

impl CookieJar {
    pub fn parse(header: &str) -> Self {
        let mut values = HashMap::new();
        for part in header.split(';') {
            let part = part.trim();
            if part.is_empty() {
                continue;
            }
            match Cookie::parse_encoded(part.to_owned()) {
                Ok(c) => {
                    values.insert(c.name().to_owned(), c.value().to_owned());
                }
                Err(_) => continue,
            }
        }
        Self {
            raw: header.to_owned(),
            values,
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn csrf_token(&self) -> Option<&str> {
        self.get(CSRF_COOKIE)
    }

    /// The header exactly as captured, for forwarding on outgoing requests.
    pub fn raw(&self) -> &str {
        &self.raw
    }
}
