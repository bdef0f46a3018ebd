// src/record.rs
//! Wire-level data types shared by the fetch layer and the aggregation core.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A per-period score: a value in `[0, 100]`, or the "not applicable"
/// sentinel used when no report existed for that period. The sentinel is
/// propagated specially by the rollup, never treated as zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Score {
    Value(f64),
    NotApplicable,
}

// Scores serialize as a plain number, the sentinel as the string "N/A",
// matching the report format consumers already parse.
impl Serialize for Score {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Score::Value(v) => serializer.serialize_f64(*v),
            Score::NotApplicable => serializer.serialize_str("N/A"),
        }
    }
}

struct ScoreVisitor;

impl Visitor<'_> for ScoreVisitor {
    type Value = Score;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a number or the string \"N/A\"")
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Score, E> {
        Ok(Score::Value(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Score, E> {
        Ok(Score::Value(v as f64))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Score, E> {
        Ok(Score::Value(v as f64))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Score, E> {
        if v == "N/A" {
            Ok(Score::NotApplicable)
        } else {
            Err(E::invalid_value(de::Unexpected::Str(v), &self))
        }
    }
}

impl<'de> Deserialize<'de> for Score {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Score, D::Error> {
        deserializer.deserialize_any(ScoreVisitor)
    }
}

/// Violation/page counts for one issue group in one period.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueTally {
    pub violations: u64,
    pub pages: u64,
}

impl IssueTally {
    #[must_use]
    pub fn new(violations: u64, pages: u64) -> Self {
        Self { violations, pages }
    }
}

/// Issue-group name -> accumulated tally for one period. BTreeMap keeps the
/// serialized report deterministic.
pub type IssueMap = BTreeMap<String, IssueTally>;

/// A period label tagged with its period index. Indexes ascend
/// chronologically (0 = oldest window), so sorting by `id` restores
/// chronological order after out-of-order fetch completion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodStamp {
    pub id: usize,
    #[serde(rename = "z")]
    pub label: String,
}

/// A score tagged with its period index, as appended by the fetch layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaggedScore {
    pub id: usize,
    #[serde(rename = "z")]
    pub value: Score,
}

/// One fully-fetched record: an organization/project pair with its raw
/// per-period data, ready for forest assembly.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRecord {
    pub org_id: String,
    pub org_name: String,
    pub project_id: String,
    /// Colon-delimited hierarchical path under the organization.
    pub project_name: String,
    pub dates: Vec<PeriodStamp>,
    pub scores: Vec<TaggedScore>,
    /// One entry per period, in period order. A period with no issues is an
    /// empty mapping, not absent.
    pub issues: Vec<IssueMap>,
}
