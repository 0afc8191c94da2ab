//! VPN status snapshot types.

/// Connection state as reported by the status command.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ConnectionState {
    /// The output contains `Status: Connected`.
    Connected,
    /// A status line was found but it does not report a connection.
    Disconnected,
    /// No status line was found at all.
    #[default]
    Unknown,
}

impl ConnectionState {
    /// Check if the VPN tunnel is up
    #[must_use]
    pub const fn is_connected(self) -> bool {
        matches!(self, Self::Connected)
    }
}

impl std::fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConnectionState::Connected => write!(f, "Connected"),
            ConnectionState::Disconnected => write!(f, "Disconnected"),
            ConnectionState::Unknown => write!(f, "Unknown"),
        }
    }
}

/// Parsed result of one successful probe.
///
/// Built once by [`crate::core::parser::parse`] and never mutated afterwards;
/// the fields are private so the snapshot can only be read.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VpnStatus {
    connection_state: ConnectionState,
    city: Option<String>,
    status_line: Option<String>,
    city_line: Option<String>,
    raw_text: String,
}

impl VpnStatus {
    pub(crate) fn new(
        connection_state: ConnectionState,
        city: Option<String>,
        status_line: Option<String>,
        city_line: Option<String>,
        raw_text: String,
    ) -> Self {
        Self {
            connection_state,
            city: city.filter(|c| !c.is_empty()),
            status_line,
            city_line,
            raw_text,
        }
    }

    #[must_use]
    pub const fn connection_state(&self) -> ConnectionState {
        self.connection_state
    }

    /// City name, only when a non-empty `City:` line was found.
    #[must_use]
    pub fn city(&self) -> Option<&str> {
        self.city.as_deref()
    }

    /// The first line matching `^Status:`, verbatim apart from a CRLF `\r`.
    #[must_use]
    pub fn status_line(&self) -> Option<&str> {
        self.status_line.as_deref()
    }

    /// The first line matching `^City: `, verbatim apart from a CRLF `\r`
    /// (kept even when the city is blank).
    #[must_use]
    pub fn city_line(&self) -> Option<&str> {
        self.city_line.as_deref()
    }

    /// Full trimmed probe output.
    #[must_use]
    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_city_is_absent() {
        let status = VpnStatus::new(
            ConnectionState::Connected,
            Some(String::new()),
            None,
            Some("City: ".to_string()),
            String::new(),
        );
        assert_eq!(status.city(), None);
        assert_eq!(status.city_line(), Some("City: "));
    }

    #[test]
    fn test_state_display() {
        assert_eq!(ConnectionState::Connected.to_string(), "Connected");
        assert_eq!(ConnectionState::Unknown.to_string(), "Unknown");
        assert!(!ConnectionState::Disconnected.is_connected());
    }
}
