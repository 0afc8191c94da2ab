//! Status text parsing.
//!
//! Turns the free-text reply of the status command into a [`VpnStatus`].
//! Matching is line oriented and case-sensitive: the first `Status:` line and
//! the first `City: ` line are taken, later matches are ignored. Parsing never
//! fails; text without either line degrades to [`ConnectionState::Unknown`].

use std::sync::OnceLock;

use regex::Regex;

use crate::constants;
use crate::state::{ConnectionState, VpnStatus};

fn compiled(cell: &'static OnceLock<Option<Regex>>, pattern: &str) -> Option<&'static Regex> {
    cell.get_or_init(|| Regex::new(pattern).ok()).as_ref()
}

fn status_regex() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    compiled(&RE, constants::STATUS_LINE_PATTERN)
}

fn city_regex() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    compiled(&RE, constants::CITY_LINE_PATTERN)
}

/// `$` stops before `\n` only, so CRLF output leaves a trailing `\r`.
fn strip_cr(line: &str) -> &str {
    line.strip_suffix('\r').unwrap_or(line)
}

/// Parse raw status output into a snapshot.
#[must_use]
pub fn parse(raw_text: &str) -> VpnStatus {
    let status_line = status_regex()
        .and_then(|re| re.find(raw_text))
        .map(|m| strip_cr(m.as_str()).to_string());

    let (city_line, city) = city_regex()
        .and_then(|re| re.captures(raw_text))
        .map_or((None, None), |caps| {
            let line = caps.get(0).map(|m| strip_cr(m.as_str()).to_string());
            let city = caps.get(1).map(|m| m.as_str().trim().to_string());
            (line, city)
        });

    let connection_state = if raw_text.contains(constants::CONNECTED_MARKER) {
        ConnectionState::Connected
    } else if status_line.is_some() {
        ConnectionState::Disconnected
    } else {
        ConnectionState::Unknown
    };

    VpnStatus::new(
        connection_state,
        city,
        status_line,
        city_line,
        raw_text.to_string(),
    )
}
