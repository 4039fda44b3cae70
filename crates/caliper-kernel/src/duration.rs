//! ISO-8601 durations (`PnYnMnWnDTnHnMnS`) with millisecond precision.

use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// A calendar-free duration kept component-wise, so `P1M` and `P30D` stay
/// distinct. Seconds are held as milliseconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct IsoDuration {
    pub years: u64,
    pub months: u64,
    pub weeks: u64,
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub millis: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid ISO-8601 duration `{0}`")]
pub struct DurationParseError(pub String);

fn duration_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"^P(?:(\d+)Y)?(?:(\d+)M)?(?:(\d+)W)?(?:(\d+)D)?(?:T(?:(\d+)H)?(?:(\d+)M)?(?:(\d+)(?:[.,](\d{1,3}))?S)?)?$",
        )
        .expect("duration regex should compile")
    })
}

impl IsoDuration {
    pub const ZERO: IsoDuration = IsoDuration {
        years: 0,
        months: 0,
        weeks: 0,
        days: 0,
        hours: 0,
        minutes: 0,
        millis: 0,
    };

    /// Express a std duration in hours, minutes and seconds.
    ///
    /// Sub-millisecond precision is truncated.
    pub fn from_std(duration: std::time::Duration) -> Self {
        let total_millis = duration.as_millis() as u64;
        let total_seconds = total_millis / 1000;
        Self {
            hours: total_seconds / 3600,
            minutes: (total_seconds % 3600) / 60,
            millis: (total_seconds % 60) * 1000 + total_millis % 1000,
            ..Self::ZERO
        }
    }

    pub fn from_seconds(seconds: u64) -> Self {
        Self::from_std(std::time::Duration::from_secs(seconds))
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }
}

impl FromStr for IsoDuration {
    type Err = DurationParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || DurationParseError(s.to_string());
        let text = s.trim();
        // A bare designator carries no component.
        if text == "P" || text.ends_with('T') {
            return Err(invalid());
        }
        let caps = duration_regex().captures(text).ok_or_else(invalid)?;

        let component = |index: usize| -> Result<u64, DurationParseError> {
            caps.get(index)
                .map(|m| m.as_str().parse::<u64>().map_err(|_| invalid()))
                .transpose()
                .map(|value| value.unwrap_or(0))
        };

        let seconds = component(7)?;
        let fraction = match caps.get(8) {
            Some(m) => {
                let digits = m.as_str();
                let scale = 10u64.pow(3 - digits.len() as u32);
                digits.parse::<u64>().map_err(|_| invalid())? * scale
            }
            None => 0,
        };

        Ok(Self {
            years: component(1)?,
            months: component(2)?,
            weeks: component(3)?,
            days: component(4)?,
            hours: component(5)?,
            minutes: component(6)?,
            millis: seconds
                .checked_mul(1000)
                .and_then(|ms| ms.checked_add(fraction))
                .ok_or_else(invalid)?,
        })
    }
}

impl fmt::Display for IsoDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return f.write_str("PT0S");
        }
        f.write_str("P")?;
        for (value, unit) in [
            (self.years, 'Y'),
            (self.months, 'M'),
            (self.weeks, 'W'),
            (self.days, 'D'),
        ] {
            if value > 0 {
                write!(f, "{value}{unit}")?;
            }
        }
        if self.hours > 0 || self.minutes > 0 || self.millis > 0 {
            f.write_str("T")?;
            if self.hours > 0 {
                write!(f, "{}H", self.hours)?;
            }
            if self.minutes > 0 {
                write!(f, "{}M", self.minutes)?;
            }
            if self.millis > 0 {
                let (seconds, millis) = (self.millis / 1000, self.millis % 1000);
                if millis == 0 {
                    write!(f, "{seconds}S")?;
                } else {
                    let fraction = format!("{millis:03}");
                    write!(f, "{seconds}.{}S", fraction.trim_end_matches('0'))?;
                }
            }
        }
        Ok(())
    }
}
