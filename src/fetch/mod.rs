// src/fetch/mod.rs
//! Authenticated, throttled acquisition of per-project summary reports.
//!
//! Everything here is a collaborator of the aggregation core: it produces
//! fully-populated [`RawRecord`]s and never touches the trees.

pub mod auth;
pub mod throttle;

use std::fmt;
use std::sync::Mutex;
use std::time::Duration;

use colored::Colorize;
use rayon::prelude::*;
use reqwest::blocking::Client;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::Result;
use crate::issues::{filter_issues, IssueEntry};
use crate::periods::PeriodWindow;
use crate::record::{PeriodStamp, RawRecord, Score, TaggedScore};
use crate::runlog::RunLog;
use self::auth::AuthSession;
use self::throttle::Throttle;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

// Ids arrive as numbers from some instances and strings from others.
fn opaque_id<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<String, D::Error> {
    struct IdVisitor;

    impl serde::de::Visitor<'_> for IdVisitor {
        type Value = String;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a string or integer id")
        }

        fn visit_str<E: serde::de::Error>(self, v: &str) -> std::result::Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_u64<E: serde::de::Error>(self, v: u64) -> std::result::Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_i64<E: serde::de::Error>(self, v: i64) -> std::result::Result<String, E> {
            Ok(v.to_string())
        }
    }

    deserializer.deserialize_any(IdVisitor)
}

/// One organization/project pair as listed by the server.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectListing {
    #[serde(rename = "organizationId", deserialize_with = "opaque_id")]
    pub organization_id: String,
    #[serde(rename = "organizationName")]
    pub organization_name: String,
    #[serde(deserialize_with = "opaque_id")]
    pub id: String,
    /// Colon-delimited hierarchical path under the organization.
    pub name: String,
}

#[derive(Debug, Deserialize)]
struct ProjectsBody {
    #[serde(default)]
    projects: Vec<ProjectListing>,
}

#[derive(Debug, Deserialize)]
struct SummaryBody {
    report: Option<SummaryReport>,
}

#[derive(Debug, Deserialize)]
struct SummaryReport {
    #[serde(default)]
    score: Option<Value>,
    #[serde(default)]
    issuelist: Vec<IssueEntry>,
}

/// Fetches project listings and per-period summary reports, sharing one
/// throttle across all workers.
pub struct Fetcher {
    client: Client,
    auth: AuthSession,
    throttle: Throttle,
    server_url: String,
}

impl Fetcher {
    #[must_use]
    pub fn new(
        client: Client,
        auth: AuthSession,
        server_url: &str,
        requests: usize,
        milliseconds: u64,
    ) -> Self {
        Self {
            client,
            auth,
            throttle: Throttle::new(requests, Duration::from_millis(milliseconds)),
            server_url: server_url.trim_end_matches('/').to_string(),
        }
    }

    /// Lists every organization/project pair the user can see.
    ///
    /// # Errors
    /// `Http` on request failure, `Auth` if the token cannot be refreshed.
    pub fn list_projects(&self) -> Result<Vec<ProjectListing>> {
        let token = self.auth.bearer()?;
        let body: ProjectsBody = self
            .client
            .get(format!("{}/organizationprojects", self.server_url))
            .bearer_auth(token)
            .timeout(REQUEST_TIMEOUT)
            .send()?
            .error_for_status()?
            .json()?;
        Ok(body.projects)
    }

    /// Fetches one summary report per target and period window, in parallel
    /// across targets. Periods within a target are appended in timeline
    /// order, but the core re-sorts them anyway and makes no assumption
    /// about it.
    ///
    /// # Errors
    /// Fails on the first summary request that errors; no retry is
    /// attempted.
    pub fn fetch_records(
        &self,
        targets: &[ProjectListing],
        windows: &[PeriodWindow],
        log: &Mutex<RunLog>,
    ) -> Result<Vec<RawRecord>> {
        targets
            .par_iter()
            .map(|target| self.fetch_record(target, windows, log))
            .collect()
    }

    fn fetch_record(
        &self,
        target: &ProjectListing,
        windows: &[PeriodWindow],
        log: &Mutex<RunLog>,
    ) -> Result<RawRecord> {
        let mut dates = Vec::with_capacity(windows.len());
        let mut scores = Vec::with_capacity(windows.len());
        let mut issues = Vec::with_capacity(windows.len());

        for (t, window) in windows.iter().enumerate() {
            self.throttle.acquire();
            let token = self.auth.bearer()?;
            let begin = window.begin.format("%m-%d-%Y").to_string();
            let end = window.end.format("%m-%d-%Y").to_string();
            let url = format!(
                "{}/project/summaryReport/{}?begin={begin}&end={end}",
                self.server_url, target.id
            );
            let body: SummaryBody = self
                .client
                .get(&url)
                .bearer_auth(token)
                .timeout(REQUEST_TIMEOUT)
                .send()
                .and_then(reqwest::blocking::Response::error_for_status)
                .map_err(|e| {
                    push_log(
                        log,
                        format!("Could not get project summary for: {}", target.name),
                    );
                    e
                })?
                .json()?;

            if body.report.is_none() {
                push_log(
                    log,
                    format!("--- No report score found for {} on {begin}", target.name),
                );
            }
            dates.push(PeriodStamp {
                id: t,
                label: window.label.clone(),
            });
            scores.push(TaggedScore {
                id: t,
                value: body
                    .report
                    .as_ref()
                    .map_or(Score::NotApplicable, |r| score_value(r.score.as_ref())),
            });
            issues.push(filter_issues(
                &body.report.map(|r| r.issuelist).unwrap_or_default(),
            ));
            push_log(log, format!("Finished: {}/{} {url}", target.organization_name, target.name));
        }

        println!(
            "{}",
            format!("Finished: {}/{}", target.organization_name, target.name)
                .green()
                .bold()
        );
        Ok(RawRecord {
            org_id: target.organization_id.clone(),
            org_name: target.organization_name.clone(),
            project_id: target.id.clone(),
            project_name: target.name.clone(),
            dates,
            scores,
            issues,
        })
    }
}

fn push_log(log: &Mutex<RunLog>, message: String) {
    log.lock().unwrap_or_else(|e| e.into_inner()).push(message);
}

/// Normalizes the server's score field: numbers pass through (zero is a
/// real zero, not a missing value), numeric strings are parsed, anything
/// else becomes the N/A sentinel.
fn score_value(raw: Option<&Value>) -> Score {
    match raw {
        Some(Value::Number(n)) => n.as_f64().map_or(Score::NotApplicable, Score::Value),
        Some(Value::String(s)) => s
            .trim()
            .parse::<f64>()
            .map_or(Score::NotApplicable, Score::Value),
        _ => Score::NotApplicable,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn score_zero_is_a_real_zero() {
        assert_eq!(score_value(Some(&json!(0))), Score::Value(0.0));
        assert_eq!(score_value(Some(&json!("0"))), Score::Value(0.0));
    }

    #[test]
    fn missing_or_junk_scores_become_na() {
        assert_eq!(score_value(None), Score::NotApplicable);
        assert_eq!(score_value(Some(&json!(null))), Score::NotApplicable);
        assert_eq!(score_value(Some(&json!("pending"))), Score::NotApplicable);
    }

    #[test]
    fn listing_accepts_numeric_and_string_ids() {
        let listing: ProjectListing = serde_json::from_value(json!({
            "organizationId": 7,
            "organizationName": "Acme",
            "id": "42",
            "name": "Web:Store"
        }))
        .expect("listing should parse");
        assert_eq!(listing.organization_id, "7");
        assert_eq!(listing.id, "42");
    }
}
