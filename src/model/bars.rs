/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 18/10/26
******************************************************************************/

//! Validation of historical bar queries.
//!
//! A bar query names a symbol, a period and a `[start, end]` range. The period
//! is a number of minutes or one of day / week / month. Range bounds are
//! timestamps `YYYY-MM-DD HH:MM[:SS]`, integers, and, with
//! [`BarRangeSyntax::Extended`], `.` for "now" or `-N` for a relative offset.

use crate::error::AppError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Serialize, Serializer};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

static TIMESTAMP: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d{4}-\d{2}-\d{2} \d{2}:\d{2}(:\d{2})?$").expect("timestamp pattern")
});
static RELATIVE_OFFSET: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^-\d*$").expect("relative offset pattern"));
static MINUTES: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+$").expect("minutes pattern"));

const PERIOD_PATTERN: &str = "^([Dd]|[Mm]|[Ww]).* (DAY,WEEK,MONTH)";

/// Which range-bound spellings a gateway accepts
///
/// Older gateways only understand absolute timestamps; newer ones also take
/// `.` (now) and negative relative offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BarRangeSyntax {
    /// `YYYY-MM-DD HH:MM[:SS]` or an integer
    Absolute,
    /// [`BarRangeSyntax::Absolute`] plus `.` and `-N`
    #[default]
    Extended,
}

/// A period as supplied by the caller, before validation
#[derive(Debug, Clone, PartialEq)]
pub enum PeriodArg {
    /// Number of minutes
    Minutes(i64),
    /// Free text, e.g. `"5"`, `"day"`, `"W"`
    Text(String),
}

impl From<i64> for PeriodArg {
    fn from(minutes: i64) -> Self {
        PeriodArg::Minutes(minutes)
    }
}

impl From<i32> for PeriodArg {
    fn from(minutes: i32) -> Self {
        PeriodArg::Minutes(i64::from(minutes))
    }
}

impl From<u32> for PeriodArg {
    fn from(minutes: u32) -> Self {
        PeriodArg::Minutes(i64::from(minutes))
    }
}

impl From<&str> for PeriodArg {
    fn from(text: &str) -> Self {
        PeriodArg::Text(text.to_string())
    }
}

impl From<String> for PeriodArg {
    fn from(text: String) -> Self {
        PeriodArg::Text(text)
    }
}

/// A validated bar period
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarPeriod {
    /// Bars of `n` minutes, sent as a JSON integer
    Minutes(u32),
    /// Daily bars, sent as `"D"`
    Day,
    /// Weekly bars, sent as `"W"`
    Week,
    /// Monthly bars, sent as `"M"`
    Month,
}

impl BarPeriod {
    /// Validates and normalises a caller-supplied period
    ///
    /// # Errors
    /// [`AppError::Value`] when the period is neither a positive minute count
    /// nor text starting with `d`, `w` or `m`.
    pub fn parse(arg: &PeriodArg) -> Result<Self, AppError> {
        match arg {
            PeriodArg::Minutes(minutes) => Self::from_minutes(*minutes, &minutes.to_string()),
            PeriodArg::Text(text) => {
                if MINUTES.is_match(text) {
                    let minutes = text.parse::<i64>().map_err(|_| {
                        AppError::Value(format!("period: {text:?} is out of range"))
                    })?;
                    return Self::from_minutes(minutes, text);
                }
                match text.chars().next().map(|c| c.to_ascii_uppercase()) {
                    Some('D') => Ok(BarPeriod::Day),
                    Some('W') => Ok(BarPeriod::Week),
                    Some('M') => Ok(BarPeriod::Month),
                    _ => Err(AppError::Value(format!(
                        "period: {text:?} must match {PERIOD_PATTERN}"
                    ))),
                }
            }
        }
    }

    /// Validates an untyped JSON period
    ///
    /// # Errors
    /// [`AppError::Type`] for anything but an integer or a string, otherwise as [`BarPeriod::parse`].
    pub fn from_json(value: &Value) -> Result<Self, AppError> {
        match value {
            Value::Number(n) => match n.as_i64() {
                Some(minutes) => Self::parse(&PeriodArg::Minutes(minutes)),
                None => Err(AppError::Type(format!("period: {value}"))),
            },
            Value::String(s) => Self::parse(&PeriodArg::Text(s.clone())),
            _ => Err(AppError::Type(format!("period: {value}"))),
        }
    }

    fn from_minutes(minutes: i64, shown: &str) -> Result<Self, AppError> {
        u32::try_from(minutes)
            .ok()
            .filter(|m| *m > 0)
            .map(BarPeriod::Minutes)
            .ok_or_else(|| {
                AppError::Value(format!("period: {shown:?} must be a positive number of minutes"))
            })
    }
}

impl FromStr for BarPeriod {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(&PeriodArg::Text(s.to_string()))
    }
}

impl fmt::Display for BarPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BarPeriod::Minutes(m) => write!(f, "{m}"),
            BarPeriod::Day => f.write_str("D"),
            BarPeriod::Week => f.write_str("W"),
            BarPeriod::Month => f.write_str("M"),
        }
    }
}

impl Serialize for BarPeriod {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            BarPeriod::Minutes(m) => serializer.serialize_u32(*m),
            BarPeriod::Day => serializer.serialize_str("D"),
            BarPeriod::Week => serializer.serialize_str("W"),
            BarPeriod::Month => serializer.serialize_str("M"),
        }
    }
}

/// One end of a bar range, passed to the gateway as given
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum BarBound {
    /// Timestamp text, `.` or `-N`
    Text(String),
    /// Integer bound
    Integer(i64),
}

impl From<&str> for BarBound {
    fn from(text: &str) -> Self {
        BarBound::Text(text.to_string())
    }
}

impl From<String> for BarBound {
    fn from(text: String) -> Self {
        BarBound::Text(text)
    }
}

impl From<i64> for BarBound {
    fn from(value: i64) -> Self {
        BarBound::Integer(value)
    }
}

impl BarBound {
    /// Checks the bound against the accepted spellings
    ///
    /// # Errors
    /// [`AppError::Value`] naming `label` when text does not match.
    pub fn validate(&self, label: &str, syntax: BarRangeSyntax) -> Result<(), AppError> {
        let BarBound::Text(text) = self else {
            return Ok(());
        };
        if TIMESTAMP.is_match(text) {
            return Ok(());
        }
        match syntax {
            BarRangeSyntax::Extended if text == "." || RELATIVE_OFFSET.is_match(text) => Ok(()),
            BarRangeSyntax::Extended => Err(AppError::Value(format!(
                "{label}: {text:?} must match pattern YYYY-MM-DD HH:MM[:SS], '.' or -N"
            ))),
            BarRangeSyntax::Absolute => Err(AppError::Value(format!(
                "{label}: {text:?} must match pattern YYYY-MM-DD HH:MM[:SS]"
            ))),
        }
    }

    /// Reads a bound from untyped JSON
    ///
    /// # Errors
    /// [`AppError::Type`] for anything but an integer or a string.
    pub fn from_json(label: &str, value: &Value) -> Result<Self, AppError> {
        match value {
            Value::String(s) => Ok(BarBound::Text(s.clone())),
            Value::Number(n) => n
                .as_i64()
                .map(BarBound::Integer)
                .ok_or_else(|| AppError::Type(format!("{label}: {value}"))),
            _ => Err(AppError::Type(format!("{label}: {value}"))),
        }
    }
}

/// Body of a `query_bars` call
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarsRequest {
    /// Symbol, passed through unchanged
    pub symbol: String,
    /// Validated period
    pub period: BarPeriod,
    /// Range start
    pub start: BarBound,
    /// Range end
    pub end: BarBound,
}

impl BarsRequest {
    /// Validates every field of a bar query
    ///
    /// # Errors
    /// [`AppError::Value`] for a malformed period or range bound.
    pub fn new(
        symbol: &str,
        period: impl Into<PeriodArg>,
        start: impl Into<BarBound>,
        end: impl Into<BarBound>,
        syntax: BarRangeSyntax,
    ) -> Result<Self, AppError> {
        let period = BarPeriod::parse(&period.into())?;
        Self::from_parts(symbol, period, start.into(), end.into(), syntax)
    }

    /// Builds a request from already-typed parts, validating the range
    ///
    /// # Errors
    /// [`AppError::Value`] for a malformed range bound.
    pub fn from_parts(
        symbol: &str,
        period: BarPeriod,
        start: BarBound,
        end: BarBound,
        syntax: BarRangeSyntax,
    ) -> Result<Self, AppError> {
        start.validate("start", syntax)?;
        end.validate("end", syntax)?;
        Ok(Self {
            symbol: symbol.to_string(),
            period,
            start,
            end,
        })
    }
}
