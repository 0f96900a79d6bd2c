use crate::summary::constants::TIME_LOCAL_FORMAT;
use crate::summary::types::{ABSENT, Record};
use chrono::DateTime;
use smallvec::SmallVec;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ParseError {
    #[error("line is not valid UTF-8")]
    InvalidUtf8,

    #[error("missing field `{0}`")]
    MissingField(&'static str),

    #[error("unterminated field `{0}`")]
    Unterminated(&'static str),

    #[error("invalid value for `{field}`: {value:?}")]
    InvalidValue { field: &'static str, value: String },

    #[error("invalid timestamp {value:?}: {source}")]
    Timestamp {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("malformed request line {0:?}")]
    RequestLine(String),

    #[error("status {0} is outside 100-599")]
    StatusOutOfRange(u16),
}

impl ParseError {
    fn invalid(field: &'static str, value: &str) -> Self {
        Self::InvalidValue {
            field,
            value: value.to_string(),
        }
    }
}

/// Parse one access log line.
///
/// Expected layout:
///
/// ```text
/// $host $remote_addr - $remote_user [$time_local] "$request" $status $bytes
/// "$referer" "$user_agent" $cache_status "$server_name" $request_time [$upstream_status]
/// ```
pub fn parse_line(line: &str) -> Result<Record, ParseError> {
    let mut fields = Fields::new(line.trim_end_matches(['\r', '\n']));

    let hostname = fields.bare("hostname")?;
    let remote_addr = fields.bare("remote_addr")?;
    let ident = fields.bare("ident")?;
    if ident != ABSENT {
        return Err(ParseError::invalid("ident", ident));
    }
    let remote_user = fields.bare("remote_user")?;
    let time_local = fields.bracketed("time_local")?;
    let request = fields.quoted("request")?;
    let status = fields.bare("status")?;
    let bytes = fields.bare("bytes_sent")?;
    let referer = fields.quoted("referer")?;
    let user_agent = fields.quoted("user_agent")?;
    let cache_status = fields.bare("cache_status")?;
    let server = fields.quoted("server_name")?;
    let request_time = fields.bare("request_time")?;
    let upstream = fields.remainder();

    let timestamp = DateTime::parse_from_str(time_local, TIME_LOCAL_FORMAT).map_err(|source| {
        ParseError::Timestamp {
            value: time_local.to_string(),
            source,
        }
    })?;

    let (request_method, request_uri, protocol) = split_request(request)?;

    let status: u16 = number("status", status)?;
    if !(100..=599).contains(&status) {
        return Err(ParseError::StatusOutOfRange(status));
    }

    Ok(Record {
        hostname: hostname.to_string(),
        remote_addr: remote_addr.to_string(),
        remote_user: remote_user.to_string(),
        timestamp,
        request_method: request_method.to_string(),
        request_uri: request_uri.to_string(),
        protocol: protocol.to_string(),
        status,
        bytes_sent: number("bytes_sent", bytes)?,
        referer: referer.to_string(),
        user_agent: user_agent.to_string(),
        cache_status: cache_status.to_string(),
        server: server.to_string(),
        request_time_ms: seconds_to_millis(request_time)
            .ok_or_else(|| ParseError::invalid("request_time", request_time))?,
        upstream_status: parse_upstream_status(upstream)?,
    })
}

//-----------------------------------------------------------------------------
// Field splitting
//-----------------------------------------------------------------------------

struct Fields<'a> {
    rest: &'a str,
}

impl<'a> Fields<'a> {
    fn new(line: &'a str) -> Self {
        Self {
            rest: line.trim_start_matches(' '),
        }
    }

    fn bare(&mut self, field: &'static str) -> Result<&'a str, ParseError> {
        if self.rest.is_empty() {
            return Err(ParseError::MissingField(field));
        }
        let end = self.rest.find(' ').unwrap_or(self.rest.len());
        let value = &self.rest[..end];
        self.advance(end);
        Ok(value)
    }

    fn bracketed(&mut self, field: &'static str) -> Result<&'a str, ParseError> {
        self.delimited(field, '[', ']')
    }

    fn quoted(&mut self, field: &'static str) -> Result<&'a str, ParseError> {
        self.delimited(field, '"', '"')
    }

    fn delimited(
        &mut self,
        field: &'static str,
        open: char,
        close: char,
    ) -> Result<&'a str, ParseError> {
        let Some(inner) = self.rest.strip_prefix(open) else {
            return Err(if self.rest.is_empty() {
                ParseError::MissingField(field)
            } else {
                ParseError::invalid(field, self.rest)
            });
        };
        let end = inner.find(close).ok_or(ParseError::Unterminated(field))?;
        let value = &inner[..end];

        // The closing delimiter must end the field.
        let after = &inner[end + close.len_utf8()..];
        if !(after.is_empty() || after.starts_with(' ')) {
            return Err(ParseError::invalid(field, self.rest));
        }

        self.rest = after;
        self.advance(0);
        Ok(value)
    }

    /// Everything left after the fixed fields, with surrounding spaces removed.
    fn remainder(&mut self) -> &'a str {
        std::mem::take(&mut self.rest).trim()
    }

    fn advance(&mut self, end: usize) {
        self.rest = self.rest[end..].trim_start_matches(' ');
    }
}

//-----------------------------------------------------------------------------
// Value coercion
//-----------------------------------------------------------------------------

fn number<T: FromStr>(field: &'static str, value: &str) -> Result<T, ParseError> {
    // `FromStr` for integers accepts a leading `+`, the log never does.
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseError::invalid(field, value));
    }
    value.parse().map_err(|_| ParseError::invalid(field, value))
}

fn split_request(request: &str) -> Result<(&str, &str, &str), ParseError> {
    let mut parts = request.split(' ');
    let (Some(method), Some(uri), Some(protocol), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(ParseError::RequestLine(request.to_string()));
    };

    // Clients name their methods freely (e.g. CCM_POST), but always in this alphabet.
    let valid_method =
        !method.is_empty() && method.bytes().all(|b| b.is_ascii_uppercase() || b == b'_');

    if !valid_method || uri.is_empty() || protocol.is_empty() {
        return Err(ParseError::RequestLine(request.to_string()));
    }

    Ok((method, uri, protocol))
}

/// Convert nginx's `$request_time` (decimal seconds) to whole milliseconds,
/// truncating anything below a millisecond.
pub(crate) fn seconds_to_millis(value: &str) -> Option<u64> {
    let (whole, fraction) = match value.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (value, ""),
    };

    let digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    // `.5` is half a second, a lone `.` is nothing.
    if (whole.is_empty() && fraction.is_empty()) || !digits(whole) || !digits(fraction) {
        return None;
    }
    if value.ends_with('.') {
        return None;
    }

    let mut millis: u64 = 0;
    for i in 0..3 {
        let digit = fraction.as_bytes().get(i).map_or(0, |b| u64::from(b - b'0'));
        millis = millis * 10 + digit;
    }

    let whole: u64 = if whole.is_empty() { 0 } else { whole.parse().ok()? };
    whole.checked_mul(1000)?.checked_add(millis)
}

fn parse_upstream_status(value: &str) -> Result<SmallVec<[u16; 2]>, ParseError> {
    let mut codes = SmallVec::new();
    if value.is_empty() || value == ABSENT {
        return Ok(codes);
    }

    for entry in value.split([',', ':']).map(str::trim) {
        if entry == ABSENT {
            continue;
        }
        let code: u16 = number("upstream_status", entry)
            .map_err(|_| ParseError::invalid("upstream_status", value))?;
        if !(100..=599).contains(&code) {
            return Err(ParseError::invalid("upstream_status", value));
        }
        codes.push(code);
    }

    Ok(codes)
}
