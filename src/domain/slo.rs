//! SLO domain types
//!
//! Provides the parameters an SLO dashboard is built from, plus the
//! optional boundary validation applied to catalog entries.

use crate::error::DomainError;
use crate::queries::format_ratio;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// The kind of objective a dashboard tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SloKind {
    /// Share of requests served under a latency threshold
    Latency,
    /// Share of requests served without errors
    Availability,
}

impl fmt::Display for SloKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Latency => write!(f, "latency"),
            Self::Availability => write!(f, "availability"),
        }
    }
}

/// User-supplied SLO parameters
///
/// Immutable once a dashboard has been built from them. Nothing here is
/// validated on construction: the query templates embed whatever they are
/// given. Call [`SloParameters::validate`] at the boundary when needed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SloParameters {
    /// Dashboard uid
    pub uid: String,
    /// Display name, also used as the dashboard title
    pub name: String,
    /// Dashboard description
    pub description: String,
    /// Compliance window, e.g. `28d`
    pub time_window: String,
    /// Target ratio in (0, 1)
    pub target: f64,
    /// Query selecting good events (latency) or failed events (availability)
    pub success_query: String,
    /// Query selecting all events
    pub total_query: String,
}

impl SloParameters {
    /// Create a new set of SLO parameters
    pub fn new(
        uid: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        time_window: impl Into<String>,
        target: f64,
        success_query: impl Into<String>,
        total_query: impl Into<String>,
    ) -> Self {
        Self {
            uid: uid.into(),
            name: name.into(),
            description: description.into(),
            time_window: time_window.into(),
            target,
            success_query: success_query.into(),
            total_query: total_query.into(),
        }
    }

    /// Check the parameters for values that would produce meaningless queries
    ///
    /// # Errors
    /// Returns the first problem found.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.uid.trim().is_empty() {
            return Err(DomainError::EmptyField("uid"));
        }
        if self.name.trim().is_empty() {
            return Err(DomainError::EmptyField("name"));
        }
        if self.success_query.trim().is_empty() {
            return Err(DomainError::EmptyField("success_query"));
        }
        if self.total_query.trim().is_empty() {
            return Err(DomainError::EmptyField("total_query"));
        }
        if !self.target.is_finite() || self.target <= 0.0 || self.target >= 1.0 {
            return Err(DomainError::InvalidTarget(self.target));
        }
        // Queries embed the target with six decimals; it must not round to 0 or 1
        let formatted = format_ratio(self.target);
        if formatted == format_ratio(0.0) || formatted == format_ratio(1.0) {
            return Err(DomainError::InvalidTarget(self.target));
        }
        parse_time_window(&self.time_window)?;
        Ok(())
    }
}

/// Parse a single-unit Prometheus duration (`s`, `m`, `h`, `d`, `w`, `y`)
///
/// # Errors
/// Returns `DomainError::InvalidTimeWindow` for anything else, including
/// amounts too large to represent in seconds.
pub fn parse_time_window(raw: &str) -> Result<Duration, DomainError> {
    let invalid = || DomainError::InvalidTimeWindow(raw.to_string());

    let unit = raw.chars().last().ok_or_else(invalid)?;
    let amount: u64 = raw[..raw.len() - unit.len_utf8()]
        .parse()
        .map_err(|_| invalid())?;
    if amount == 0 {
        return Err(invalid());
    }

    let seconds_per_unit: u64 = match unit {
        's' => 1,
        'm' => 60,
        'h' => 3_600,
        'd' => 86_400,
        'w' => 604_800,
        'y' => 31_536_000,
        _ => return Err(invalid()),
    };

    let seconds = amount.checked_mul(seconds_per_unit).ok_or_else(invalid)?;
    Ok(Duration::from_secs(seconds))
}

/// Current time in unix seconds; 0 if the clock is before the epoch
pub fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> SloParameters {
        SloParameters::new(
            "svc-latency",
            "Svc Latency SLO",
            "desc",
            "28d",
            0.95,
            "histogram_bucket_expr",
            "histogram_count_expr",
        )
    }

    #[test]
    fn test_valid_parameters() {
        assert!(params().validate().is_ok());
    }

    #[test]
    fn test_target_out_of_range() {
        for target in [0.0, 1.0, 1.5, -0.1, f64::NAN, f64::INFINITY] {
            let mut p = params();
            p.target = target;
            assert!(matches!(p.validate(), Err(DomainError::InvalidTarget(_))));
        }
    }

    #[test]
    fn test_target_rounding_to_bounds_rejected() {
        for target in [0.99999995, 0.9999999, 0.0000004] {
            let mut p = params();
            p.target = target;
            assert!(
                matches!(p.validate(), Err(DomainError::InvalidTarget(_))),
                "{target} should be rejected"
            );
        }

        let mut p = params();
        p.target = 0.999999;
        assert!(p.validate().is_ok());
    }

    #[test]
    fn test_empty_queries_rejected() {
        let mut p = params();
        p.success_query = "  ".to_string();
        assert_eq!(p.validate(), Err(DomainError::EmptyField("success_query")));

        let mut p = params();
        p.total_query.clear();
        assert_eq!(p.validate(), Err(DomainError::EmptyField("total_query")));
    }

    #[test]
    fn test_time_window_parse() {
        assert_eq!(
            parse_time_window("28d").unwrap(),
            Duration::from_secs(28 * 86_400)
        );
        assert_eq!(parse_time_window("12h").unwrap(), Duration::from_secs(43_200));
        assert_eq!(parse_time_window("1w").unwrap(), Duration::from_secs(604_800));
    }

    #[test]
    fn test_time_window_invalid() {
        for raw in ["", "d", "28", "28x", "0d", "-1d", "2.5d"] {
            assert!(parse_time_window(raw).is_err(), "{raw} should be rejected");
        }
    }

    #[test]
    fn test_time_window_overflow() {
        assert_eq!(
            parse_time_window("1000000000000y"),
            Err(DomainError::InvalidTimeWindow("1000000000000y".to_string()))
        );

        let mut p = params();
        p.time_window = "1000000000000y".to_string();
        assert!(matches!(
            p.validate(),
            Err(DomainError::InvalidTimeWindow(_))
        ));
    }

    #[test]
    fn test_unix_now_after_epoch() {
        assert!(unix_now() > 1_600_000_000);
    }

    #[test]
    fn test_invalid_window_in_parameters() {
        let mut p = params();
        p.time_window = "four weeks".to_string();
        assert!(matches!(
            p.validate(),
            Err(DomainError::InvalidTimeWindow(_))
        ));
    }

    #[test]
    fn test_kind_serde() {
        let kind: SloKind = serde_json::from_str("\"availability\"").unwrap();
        assert_eq!(kind, SloKind::Availability);
        assert_eq!(SloKind::Latency.to_string(), "latency");
    }
}
