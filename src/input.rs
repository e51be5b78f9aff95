//! Input records
//!
//! A record is a JSON document naming the share count and threshold plus one
//! entry per share, keyed by the share's x-coordinate:
//!
//! ```json
//! {
//!     "keys": { "n": 4, "k": 3 },
//!     "1": { "base": "10", "value": "4" },
//!     "2": { "base": "2",  "value": "111" },
//!     "3": { "base": "10", "value": "12" },
//!     "6": { "base": "4",  "value": "213" }
//! }
//! ```
//!
//! `n`/`k` may also sit at the top level. Entries keep document order.

use anyhow::{bail, Context, Result};
use num_bigint::BigInt;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::math::base;
use crate::point::{Point, PointSet};

#[derive(Debug, Deserialize)]
struct Keys {
    n: usize,
    k: usize,
}

#[derive(Debug, Deserialize)]
struct RawRecord {
    keys: Option<Keys>,
    n: Option<usize>,
    k: Option<usize>,
    #[serde(flatten)]
    entries: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Radix {
    Text(String),
    Number(u32),
}

/// A JSON number's decimal text is read as digits in the share's base.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Digits {
    Text(String),
    Number(u64),
}

#[derive(Debug, Deserialize)]
struct RawShare {
    base: Radix,
    value: Digits,
}

impl RawShare {
    fn decode(&self) -> crate::error::Result<BigInt> {
        let radix = match &self.base {
            Radix::Text(text) => base::parse_base(text)?,
            Radix::Number(n) => *n,
        };
        match &self.value {
            Digits::Text(text) => base::decode(text.trim(), radix),
            Digits::Number(n) => base::decode(&n.to_string(), radix),
        }
    }
}

/// Parses a record into its point set.
pub fn parse_record(json: &str) -> Result<PointSet> {
    let raw: RawRecord = serde_json::from_str(json).context("Record is not valid JSON")?;

    let (n, k) = match (&raw.keys, raw.n, raw.k) {
        (Some(keys), _, _) => (keys.n, keys.k),
        (None, Some(n), Some(k)) => (n, k),
        _ => bail!("Record is missing \"keys\": {{ \"n\": .., \"k\": .. }}"),
    };

    let mut points = Vec::with_capacity(raw.entries.len());
    for (key, value) in raw.entries {
        let x: BigInt = key
            .trim()
            .parse()
            .with_context(|| format!("Share key {:?} is not an integer x-coordinate", key))?;
        let share: RawShare = serde_json::from_value(value)
            .with_context(|| format!("Share {} needs fields \"base\" and \"value\"", key))?;
        let y = share
            .decode()
            .with_context(|| format!("Failed to decode share {}", key))?;
        points.push(Point::new(x, y));
    }

    Ok(PointSet::new(points, n, k)?)
}
