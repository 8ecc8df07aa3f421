use std::ops::Deref;

use serde::Deserialize;

/// A duration written as space separated components, e.g. `1d 2h 3m 4s`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Duration(pub std::time::Duration);

impl From<Duration> for std::time::Duration {
    fn from(value: Duration) -> Self {
        value.0
    }
}

impl Deref for Duration {
    type Target = std::time::Duration;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl std::str::FromStr for Duration {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split_whitespace()
            .try_fold(std::time::Duration::ZERO, |out, part| {
                let secs = parse_component(part)?;
                out.checked_add(std::time::Duration::from_secs(secs))
                    .ok_or(INVALID)
            })
            .map(Self)
    }
}

const INVALID: &str = "Invalid duration";

fn parse_component(part: &str) -> Result<u64, &'static str> {
    let unit_idx = part
        .find(|c: char| !c.is_ascii_digit())
        .ok_or(INVALID)?;
    let (value, unit) = part.split_at(unit_idx);
    let value = value.parse::<u64>().map_err(|_| INVALID)?;
    let factor = match unit {
        "s" => 1,
        "m" => 60,
        "h" => 60 * 60,
        "d" => 24 * 60 * 60,
        _ => return Err(INVALID),
    };

    value.checked_mul(factor).ok_or(INVALID)
}

impl<'de> Deserialize<'de> for Duration {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        String::deserialize(deserializer)?
            .parse()
            .map_err(serde::de::Error::custom)
    }
}
