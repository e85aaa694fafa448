//! Insights analytics: partner activity, providers and historical scores.
//!
//! Requires [`SleepIq::insights_login`]; the bed API session is not used.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use serde_json::Value;

use super::{ServiceError, SleepIq, api_response, require_id};
use crate::core::endpoint::Endpoint;
use crate::error::Result;
use crate::util::time::format_date;

// =============================================================================
// Activities
// =============================================================================

/// Activity imported from partner devices (watches, thermostats).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SleeperActivities {
    pub activities: Vec<PartnerActivity>,
    pub statuses: PartnerStatuses,
    #[serde(rename = "Error")]
    pub error: ServiceError,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PartnerActivity {
    pub sleeper_id: String,
    pub activity_date: String,
    pub partner: Partner,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Partner {
    pub nest: NestActivity,
    pub apple: AppleActivity,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct NestActivity {
    pub summary_data: String,
    pub status: Value,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppleActivity {
    pub summary_data: Value,
    pub goal_steps: Value,
    pub daily_steps: Value,
    pub status: Value,
}

/// Which partner integrations are connected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
#[allow(clippy::struct_excessive_bools)]
pub struct PartnerStatuses {
    pub fitbit: bool,
    pub underarmour: bool,
    pub nest: bool,
    pub withings: bool,
    pub health: bool,
    pub apple: bool,
    pub honeywell: bool,
    pub google: bool,
}

// =============================================================================
// Providers
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct InsightProvidersStatus {
    pub providers: Vec<Provider>,
    #[serde(rename = "Error")]
    pub error: ServiceError,
}

/// A supported activity monitor. Keys mix camel and snake case.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Provider {
    pub id: String,
    pub name: String,
    pub description: String,
    pub image: String,
    pub scope: Vec<String>,
    pub platforms: Vec<String>,
    pub data_types: Vec<String>,
    pub connected: bool,
    pub order: i64,
    #[serde(rename = "connectedAt")]
    pub connected_at: Option<DateTime<Utc>>,
    pub last_sync: Value,
    pub is_valid: Value,
    pub permissions: Vec<Value>,
}

// =============================================================================
// Historical insights
// =============================================================================

/// Historical scores of a comparison group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RelativeInsights {
    pub data: Vec<RelativeInsight>,
    #[serde(rename = "Error")]
    pub error: ServiceError,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RelativeInsight {
    pub count: i64,
    pub date: String,
    pub siq_score: i64,
    pub sleep_number: i64,
    pub time_in_bed: i64,
}

/// Historical scores of the sleeper themselves.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MyInsights {
    pub data: Vec<MyInsight>,
    #[serde(rename = "Error")]
    pub error: ServiceError,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MyInsight {
    pub count: i64,
    pub date: String,
    pub max_score: i64,
    pub max_score_date: String,
    pub max_time_in_bed: i64,
    pub max_time_in_bed_date: String,
    pub siq_score: i64,
    pub sleep_number: i64,
    pub time_in_bed: i64,
    pub total_time_in_bed: i64,
}

api_response!(
    SleeperActivities,
    InsightProvidersStatus,
    RelativeInsights,
    MyInsights,
);

fn historical(kind: &str, sleeper_id: &str, start: NaiveDate, end: NaiveDate) -> Endpoint {
    Endpoint::path("insights/historical")
        .segment(kind)
        .segment(sleeper_id)
        .query("start", format_date(start))
        .query("end", format_date(end))
}

impl SleepIq {
    /// Partner-device activity for a sleeper over a date range.
    ///
    /// # Errors
    ///
    /// Fails if not logged in to Insights, `sleeper_id` is empty, or on
    /// transport, decode or service errors.
    pub async fn insights_activity(
        &self,
        sleeper_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<SleeperActivities> {
        self.session.require_insights()?;
        let sleeper_id = require_id("sleeper_id", sleeper_id)?;
        let endpoint = Endpoint::path("activities")
            .query("sleeperId", sleeper_id)
            .query("startDate", format_date(start))
            .query("endDate", format_date(end));
        self.get_insights(endpoint, "retrieve Insights activity")
            .await
    }

    /// Supported activity monitors and their connection state.
    ///
    /// # Errors
    ///
    /// Fails if not logged in to Insights, or on transport, decode or
    /// service errors.
    pub async fn insights_providers(&self) -> Result<InsightProvidersStatus> {
        self.get_insights(Endpoint::path("providers/"), "retrieve Insights providers")
            .await
    }

    /// History of sleepers with similar sleep patterns.
    ///
    /// # Errors
    ///
    /// Fails if not logged in to Insights, `sleeper_id` is empty, or on
    /// transport, decode or service errors.
    pub async fn insights_like_me(
        &self,
        sleeper_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<RelativeInsights> {
        self.session.require_insights()?;
        let sleeper_id = require_id("sleeper_id", sleeper_id)?;
        self.get_insights(
            historical("likeme", sleeper_id, start, end),
            "retrieve Insights like me",
        )
        .await
    }

    /// History of sleepers nearby.
    ///
    /// # Errors
    ///
    /// Fails if not logged in to Insights, `sleeper_id` is empty, or on
    /// transport, decode or service errors.
    pub async fn insights_near_me(
        &self,
        sleeper_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<RelativeInsights> {
        self.session.require_insights()?;
        let sleeper_id = require_id("sleeper_id", sleeper_id)?;
        self.get_insights(
            historical("nearme", sleeper_id, start, end),
            "retrieve Insights near me",
        )
        .await
    }

    /// The sleeper's own history.
    ///
    /// # Errors
    ///
    /// Fails if not logged in to Insights, `sleeper_id` is empty, or on
    /// transport, decode or service errors.
    pub async fn insights_me(
        &self,
        sleeper_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<MyInsights> {
        self.session.require_insights()?;
        let sleeper_id = require_id("sleeper_id", sleeper_id)?;
        self.get_insights(
            historical("sleeper", sleeper_id, start, end),
            "retrieve Insights me",
        )
        .await
    }
}
