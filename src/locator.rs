//! Destination locator parsing
//!
//! A locator is a URI-like string fully describing one log destination:
//! `[scheme:][//authority]path[?query][#fragment]` with
//! `authority = [userinfo@](host | "[" ipv6 "]")[:port]`. The fragment is a
//! level-filter expression, a final `.extension` path segment is a format
//! hint, and the scheme is inferred from the shape when absent.

use crate::core::{LogError, Result};
use percent_encoding::percent_decode_str;
use std::fmt;

/// The closed set of transport schemes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scheme {
    File,
    Udp,
    Console,
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Scheme::File => "file",
            Scheme::Udp => "udp",
            Scheme::Console => "tty",
        };
        write!(f, "{}", name)
    }
}

/// Parsed destination descriptor. Immutable after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Locator {
    pub scheme: Scheme,
    pub userinfo: Option<String>,
    pub host: Option<String>,
    pub port: Option<u16>,
    /// Full path including any format-hint extension.
    pub path: Option<String>,
    pub query: Option<String>,
    pub fragment: Option<String>,
    /// Final `.extension` path segment, if one exists.
    pub format_hint: Option<String>,
}

impl Locator {
    /// Percent-decode a raw locator once as a whole. The result doubles as
    /// the memoization key, so locators differing only in escaping share a
    /// transport.
    pub fn decode(raw: &str) -> Result<String> {
        percent_decode_str(raw)
            .decode_utf8()
            .map(|cow| cow.into_owned())
            .map_err(|_| LogError::locator(raw, "invalid UTF-8 in percent-encoding"))
    }

    /// Parse a whole-decoded locator string into a descriptor.
    pub fn parse(decoded: &str) -> Result<Locator> {
        let (rest, fragment) = split_once_opt(decoded, '#');
        let (rest, query) = split_once_opt(rest, '?');

        let (scheme_str, rest) = take_scheme(rest);
        let (authority, path_str) = take_authority(rest);

        let scheme_str = decode_component(decoded, scheme_str)?;
        let query = decode_component(decoded, query)?;
        let fragment = decode_component(decoded, fragment)?;
        let raw_path = decode_component(decoded, Some(path_str))?.unwrap_or_default();
        let path = if raw_path.is_empty() {
            None
        } else {
            Some(expand_path(&raw_path)?)
        };

        let (userinfo, host, port) = match authority {
            Some(auth) => parse_authority(decoded, auth)?,
            None => (None, None, None),
        };

        let (stem, format_hint) = split_extension(path.as_deref().unwrap_or(""));

        let scheme = match scheme_str.as_deref() {
            Some("file") => Scheme::File,
            Some("udp") => Scheme::Udp,
            Some("tty") | Some("console") => Scheme::Console,
            Some(other) => {
                return Err(LogError::UnsupportedScheme {
                    scheme: other.to_string(),
                })
            }
            None => {
                if host.is_none() && port.is_none() {
                    if stem.is_empty() || stem == "." {
                        Scheme::Console
                    } else {
                        Scheme::File
                    }
                } else {
                    Scheme::Udp
                }
            }
        };

        Ok(Locator {
            scheme,
            userinfo,
            host,
            port,
            path,
            query,
            fragment,
            format_hint,
        })
    }
}

fn split_once_opt(s: &str, sep: char) -> (&str, Option<&str>) {
    match s.split_once(sep) {
        Some((head, tail)) => (head, Some(tail)),
        None => (s, None),
    }
}

/// A scheme is a nonempty run of characters other than `:/?#` terminated by
/// `:` before any of the others.
fn take_scheme(s: &str) -> (Option<&str>, &str) {
    for (i, c) in s.char_indices() {
        match c {
            ':' if i > 0 => return (Some(&s[..i]), &s[i + 1..]),
            ':' | '/' | '?' | '#' => break,
            _ => {}
        }
    }
    (None, s)
}

/// An authority follows `//` and runs to the next `/` (the path keeps its
/// leading slash).
fn take_authority(s: &str) -> (Option<&str>, &str) {
    match s.strip_prefix("//") {
        Some(rest) => match rest.find('/') {
            Some(i) => (Some(&rest[..i]), &rest[i..]),
            None => (Some(rest), ""),
        },
        None => (None, s),
    }
}

fn decode_component(locator: &str, part: Option<&str>) -> Result<Option<String>> {
    match part {
        Some(p) if !p.is_empty() => {
            let decoded = percent_decode_str(p)
                .decode_utf8()
                .map_err(|_| LogError::locator(locator, "invalid UTF-8 in percent-encoding"))?;
            Ok(Some(decoded.into_owned()))
        }
        _ => Ok(None),
    }
}

fn parse_authority(
    locator: &str,
    auth: &str,
) -> Result<(Option<String>, Option<String>, Option<u16>)> {
    let (userinfo, host_port) = match auth.split_once('@') {
        Some((user, rest)) => (decode_component(locator, Some(user))?, rest),
        None => (None, auth),
    };

    let (host, port_str) = if let Some(rest) = host_port.strip_prefix('[') {
        let end = rest
            .find(']')
            .ok_or_else(|| LogError::locator(locator, "unterminated IPv6 bracket"))?;
        let host = &rest[..end];
        let tail = &rest[end + 1..];
        let port = match tail.strip_prefix(':') {
            Some(p) => Some(p),
            None if tail.is_empty() => None,
            None => return Err(LogError::locator(locator, "junk after IPv6 bracket")),
        };
        (host, port)
    } else {
        let (host, port) = split_once_opt(host_port, ':');
        (host, port)
    };

    let port = match port_str {
        Some(p) => Some(parse_port(p)?),
        None => None,
    };

    let host = decode_component(locator, Some(host))?;
    Ok((userinfo, host, port))
}

fn parse_port(p: &str) -> Result<u16> {
    if p.is_empty() || !p.bytes().all(|b| b.is_ascii_digit()) {
        return Err(LogError::InvalidPort { port: p.to_string() });
    }
    let value: u32 = p
        .parse()
        .map_err(|_| LogError::InvalidPort { port: p.to_string() })?;
    u16::try_from(value).map_err(|_| LogError::InvalidPort { port: p.to_string() })
}

/// Capture a trailing `.extension` containing neither `/` nor a further `.`
/// as the format hint; the extension stays part of the path.
fn split_extension(path: &str) -> (&str, Option<String>) {
    match path.rfind('.') {
        Some(i) => {
            let ext = &path[i + 1..];
            if !ext.is_empty() && !ext.contains('/') {
                (&path[..i], Some(ext.to_string()))
            } else {
                (path, None)
            }
        }
        None => (path, None),
    }
}

/// Shell-style tilde expansion on a destination path. A NUL byte anywhere
/// in the path is rejected.
fn expand_path(path: &str) -> Result<String> {
    if path.contains('\0') {
        return Err(LogError::path("NUL byte in path"));
    }
    let Some(rest) = path.strip_prefix('~') else {
        return Ok(path.to_string());
    };
    let env = |key: &str| std::env::var(key).unwrap_or_default();
    Ok(match rest.chars().next() {
        None => env("HOME"),
        Some('/') => format!("{}{}", env("HOME"), rest),
        Some('+') => format!("{}/{}", env("PWD"), &rest[1..]),
        Some('-') => format!("{}/{}", env("OLDPWD"), &rest[1..]),
        Some(_) => format!("/home/{}", rest),
    })
}
