//! Event types delivered by the Host Command event connection.

use std::fmt;
use std::str::FromStr;
use vantage_common::Vid;

/// A status category, as carried by `S:<CATEGORY>` event lines and the
/// `STATUS <CATEGORY>` subscription command.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StatusCategory {
    /// Load level changes.
    Load,
    /// Blind position changes.
    Blind,
    /// Button press/release.
    Btn,
    /// Task state changes.
    Task,
    /// Temperature changes.
    Temp,
    /// GMem (variable) changes.
    Variable,
    /// Button LED changes.
    Led,
    /// Object-interface status (`S:STATUS <vid> <method> …`).
    Status,
    /// Extended object-interface status.
    StatusEx,
    /// A category this client has no special handling for.
    Other(String),
}

impl StatusCategory {
    /// Parse a wire category name. Unknown names map to
    /// [`StatusCategory::Other`].
    pub fn from_wire(name: &str) -> Self {
        match name {
            "LOAD" => Self::Load,
            "BLIND" => Self::Blind,
            "BTN" => Self::Btn,
            "TASK" => Self::Task,
            "TEMP" => Self::Temp,
            "VARIABLE" => Self::Variable,
            "LED" => Self::Led,
            "STATUS" => Self::Status,
            "STATUSEX" => Self::StatusEx,
            other => Self::Other(other.to_string()),
        }
    }

    /// The wire name of the category.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Load => "LOAD",
            Self::Blind => "BLIND",
            Self::Btn => "BTN",
            Self::Task => "TASK",
            Self::Temp => "TEMP",
            Self::Variable => "VARIABLE",
            Self::Led => "LED",
            Self::Status => "STATUS",
            Self::StatusEx => "STATUSEX",
            Self::Other(name) => name,
        }
    }
}

impl FromStr for StatusCategory {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_wire(s))
    }
}

impl fmt::Display for StatusCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An event from the Host Command service, or a connection lifecycle change
/// of the event connection.
#[derive(Debug, Clone)]
pub enum Event {
    /// The event connection established its first connection.
    Connected,
    /// The event connection was lost; the reconnect loop is running.
    Disconnected,
    /// The event connection was re-established and subscriptions replayed.
    Reconnected,
    /// An `S:<CATEGORY>` status event.
    Status {
        /// The status category.
        category: StatusCategory,
        /// The VID of the object the status applies to.
        vid: Vid,
        /// The remaining tokens of the status line.
        args: Vec<String>,
    },
    /// An `EL:` enhanced-log event.
    EnhancedLog {
        /// The log line body (tokens: VID, method, result, arguments).
        log: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_roundtrip() {
        let names = [
            "LOAD", "BLIND", "BTN", "TASK", "TEMP", "VARIABLE", "LED", "STATUS", "STATUSEX",
        ];
        for name in names {
            let category: StatusCategory = name.parse().unwrap();
            assert_eq!(category.to_string(), name);
            assert!(!matches!(category, StatusCategory::Other(_)));
        }
    }

    #[test]
    fn test_unknown_category() {
        let category: StatusCategory = "THERMOP".parse().unwrap();
        assert_eq!(category, StatusCategory::Other("THERMOP".into()));
        assert_eq!(category.to_string(), "THERMOP");
    }
}
