//! Remapping a resolved table onto a coarser key axis.
//!
//! Resampling only ever runs on a [`Resolution`](crate::Resolution) table,
//! never on workspace data.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, TimeDelta};
use tabview_model::{Key, Table};
use tracing::debug;

use crate::error::ResampleError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Aggregation {
    Mean,
    Sum,
    Min,
    Max,
    First,
    Last,
}

impl Aggregation {
    /// Aggregates the non-null values of one bucket.
    pub fn apply(self, values: &[f64]) -> Option<f64> {
        let (first, last) = (values.first()?, values.last()?);
        Some(match self {
            Self::Mean => values.iter().sum::<f64>() / values.len() as f64,
            Self::Sum => values.iter().sum(),
            Self::Min => values.iter().copied().fold(f64::INFINITY, f64::min),
            Self::Max => values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            Self::First => *first,
            Self::Last => *last,
        })
    }
}

impl fmt::Display for Aggregation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Mean => "mean",
            Self::Sum => "sum",
            Self::Min => "min",
            Self::Max => "max",
            Self::First => "first",
            Self::Last => "last",
        })
    }
}

impl FromStr for Aggregation {
    type Err = ResampleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mean" | "avg" => Ok(Self::Mean),
            "sum" => Ok(Self::Sum),
            "min" => Ok(Self::Min),
            "max" => Ok(Self::Max),
            "first" => Ok(Self::First),
            "last" => Ok(Self::Last),
            _ => Err(ResampleError::UnknownAggregation(s.to_string())),
        }
    }
}

/// Bucket size of the target axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frequency {
    /// Fixed time span for timestamp axes, at least one second.
    Span(TimeDelta),
    /// Fixed width for integer axes.
    Width(i64),
}

impl Frequency {
    /// Width of one bucket in key units, seconds for spans.
    ///
    /// Fails for widths below one, which includes sub-second spans.
    fn width(&self) -> Result<i64, ResampleError> {
        let width = match self {
            Self::Width(width) => *width,
            Self::Span(span) => span.num_seconds(),
        };
        if width < 1 {
            return Err(ResampleError::InvalidFrequency(self.to_string()));
        }
        Ok(width)
    }

    /// Start of the bucket holding `key`. Keys whose bucket start falls
    /// outside the representable range are unsupported.
    fn bucket(&self, key: &Key) -> Result<Key, ResampleError> {
        let floor = |value: i64, width: i64| value.div_euclid(width).checked_mul(width);
        match (self, key) {
            (Self::Width(_), Key::Int(value)) => floor(*value, self.width()?)
                .map(Key::Int)
                .ok_or_else(|| self.unsupported(key)),
            (Self::Span(_), Key::Timestamp(value)) => {
                floor(value.and_utc().timestamp(), self.width()?)
                    .and_then(|start| DateTime::from_timestamp(start, 0))
                    .map(|start| Key::Timestamp(start.naive_utc()))
                    .ok_or_else(|| self.unsupported(key))
            }
            _ => Err(self.unsupported(key)),
        }
    }

    fn unsupported(&self, key: &Key) -> ResampleError {
        ResampleError::UnsupportedKey {
            kind: key.kind_name(),
            frequency: self.to_string(),
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Width(width) => write!(f, "{width}"),
            Self::Span(span) => {
                let secs = span.num_seconds();
                if secs == 0 {
                    write!(f, "{}ms", span.num_milliseconds())
                } else if secs % 86_400 == 0 {
                    write!(f, "{}d", secs / 86_400)
                } else if secs % 3_600 == 0 {
                    write!(f, "{}h", secs / 3_600)
                } else if secs % 60 == 0 {
                    write!(f, "{}min", secs / 60)
                } else {
                    write!(f, "{secs}s")
                }
            }
        }
    }
}

impl FromStr for Frequency {
    type Err = ResampleError;

    /// Parses `15s`, `30min`, `1h`, `1d`, `2w`, or a bare integer width.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ResampleError::InvalidFrequency(s.to_string());
        let trimmed = s.trim();
        let split = trimmed
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(trimmed.len());
        let (count, unit) = trimmed.split_at(split);
        let count: i64 = count.parse().map_err(|_| invalid())?;
        if count <= 0 {
            return Err(invalid());
        }
        let span = match unit {
            "" => return Ok(Self::Width(count)),
            "s" => TimeDelta::try_seconds(count),
            "min" | "t" => TimeDelta::try_minutes(count),
            "h" => TimeDelta::try_hours(count),
            "d" => TimeDelta::try_days(count),
            "w" => TimeDelta::try_weeks(count),
            _ => None,
        };
        span.map(Self::Span).ok_or_else(invalid)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResampleRule {
    pub frequency: Frequency,
    pub aggregation: Aggregation,
}

/// Produces a table with the same columns over a coarser axis.
pub trait Resampler {
    fn resample(&self, table: &Table) -> Result<Table, ResampleError>;
}

/// Buckets keys to a fixed frequency and aggregates each bucket.
///
/// Nulls are ignored; a bucket whose values are all null aggregates to null.
/// Only buckets that contain at least one key are emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrequencyResampler {
    rule: ResampleRule,
}

impl FrequencyResampler {
    pub fn new(rule: ResampleRule) -> Self {
        Self { rule }
    }

    pub fn rule(&self) -> &ResampleRule {
        &self.rule
    }
}

impl Resampler for FrequencyResampler {
    fn resample(&self, table: &Table) -> Result<Table, ResampleError> {
        let mut buckets: Vec<(Key, Vec<usize>)> = Vec::new();
        for (row, key) in table.index().iter().enumerate() {
            let bucket = self.rule.frequency.bucket(key)?;
            match buckets.last_mut() {
                Some((last, rows)) if *last == bucket => rows.push(row),
                _ => buckets.push((bucket, vec![row])),
            }
        }

        let columns = (0..table.width())
            .map(|col| {
                let values = buckets
                    .iter()
                    .map(|(_, rows)| {
                        let present: Vec<f64> = rows
                            .iter()
                            .filter_map(|&row| table.value(row, col))
                            .collect();
                        self.rule.aggregation.apply(&present)
                    })
                    .collect();
                (table.columns()[col].name.clone(), values)
            })
            .collect();
        let index: Vec<Key> = buckets.into_iter().map(|(key, _)| key).collect();
        debug!(
            frequency = %self.rule.frequency,
            aggregation = %self.rule.aggregation,
            rows_in = table.height(),
            rows_out = index.len(),
            "table resampled"
        );
        Table::new(index, columns).map_err(ResampleError::from)
    }
}
