//! Minimal cookie helpers over raw `Cookie` / `Set-Cookie` headers.

use axum::http::header::COOKIE;
use axum::http::HeaderMap;

/// Iterate `(name, value)` pairs across every `Cookie` header.
fn pairs(headers: &HeaderMap) -> impl Iterator<Item = (&str, &str)> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| {
            let (name, value) = pair.trim().split_once('=')?;
            Some((name.trim(), value.trim()))
        })
}

/// Value of the first cookie called `name`, if any and non-empty.
pub fn get_cookie<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    pairs(headers)
        .find(|(n, _)| *n == name)
        .map(|(_, v)| v)
        .filter(|v| !v.is_empty())
}

/// Names of all cookies starting with `prefix`, deduplicated.
pub fn cookie_names_with_prefix(headers: &HeaderMap, prefix: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for (name, _) in pairs(headers) {
        if name.starts_with(prefix) && !names.iter().any(|n| n == name) {
            names.push(name.to_string());
        }
    }
    names
}

/// Attributes for a cookie being set.
#[derive(Debug, Clone, Copy)]
pub struct CookieOptions {
    pub http_only: bool,
    pub secure: bool,
    pub max_age_secs: i64,
}

/// Render a `Set-Cookie` value with `Path=/` and `SameSite=Lax`.
pub fn set_cookie(name: &str, value: &str, opts: CookieOptions) -> String {
    let mut cookie = format!(
        "{name}={value}; Path=/; Max-Age={}; SameSite=Lax",
        opts.max_age_secs
    );
    if opts.http_only {
        cookie.push_str("; HttpOnly");
    }
    if opts.secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// Render a `Set-Cookie` value that expires `name` immediately.
pub fn expire_cookie(name: &str, secure: bool) -> String {
    set_cookie(
        name,
        "",
        CookieOptions {
            http_only: false,
            secure,
            max_age_secs: 0,
        },
    )
}
