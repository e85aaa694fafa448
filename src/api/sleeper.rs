//! Sleeper profiles and sleep data.
//!
//! Dates passed as strings accept the aliases understood by
//! [`crate::util::time`]; dates passed as [`NaiveDate`] are sent as
//! `YYYY-MM-DD`.

use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::Value;

use super::{ServiceError, SleepIq, api_response, require_id};
use crate::core::endpoint::Endpoint;
use crate::error::Result;
use crate::util::time::{
    convert_date_alias, convert_monthly_date_alias, convert_time_length, format_date,
};

// =============================================================================
// Sleepers
// =============================================================================

/// Personal details of every sleeper on the account.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SleeperDetails {
    pub sleepers: Vec<Sleeper>,
    #[serde(rename = "Error")]
    pub error: ServiceError,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Sleeper {
    pub first_name: String,
    pub active: bool,
    pub email_validated: bool,
    pub is_child: bool,
    pub bed_id: String,
    pub birth_year: String,
    pub zip_code: String,
    pub timezone: String,
    pub is_male: bool,
    pub weight: i64,
    pub duration: Value,
    pub sleeper_id: String,
    pub height: i64,
    pub license_version: i64,
    pub username: String,
    pub birth_month: i64,
    pub sleep_goal: i64,
    pub is_account_owner: bool,
    pub account_id: String,
    pub email: String,
    pub avatar: String,
    pub last_login: String,
    /// See [`crate::api::bed::bed_side`].
    pub side: i64,
}

// =============================================================================
// Sleep sessions
// =============================================================================

/// One sleep session. Times are minutes unless noted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SleepSession {
    pub start_date: String,
    pub longest: bool,
    #[serde(rename = "sleepIQCalculating")]
    pub sleep_iq_calculating: bool,
    pub original_start_date: String,
    pub restful: i64,
    pub original_end_date: String,
    pub sleep_number: i64,
    pub total_sleep_session_time: i64,
    pub avg_heart_rate: i64,
    pub restless: i64,
    pub avg_respiration_rate: i64,
    pub is_finalized: bool,
    pub sleep_quotient: i64,
    pub end_date: String,
    pub out_of_bed: i64,
    pub in_bed: i64,
}

// =============================================================================
// Sleep activity
// =============================================================================

/// Sleep quality per sleeper for a date and interval.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SleeperActivityDetails {
    pub sleepers: Vec<SleeperActivity>,
    #[serde(rename = "Error")]
    pub error: ServiceError,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SleeperActivity {
    pub sleeper_id: String,
    pub message: String,
    pub tip: String,
    pub avg_heart_rate: i64,
    pub avg_respiration_rate: i64,
    pub total_sleep_session_time: i64,
    pub in_bed: i64,
    pub out_of_bed: i64,
    pub restful: i64,
    pub restless: i64,
    #[serde(rename = "avgSleepIQ")]
    pub avg_sleep_iq: i64,
    pub sleep_data: Vec<SleepDay>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SleepDay {
    pub tip: String,
    pub message: String,
    pub date: String,
    pub sessions: Vec<SleepSession>,
    pub goal_entry: Value,
    pub tags: Vec<Value>,
}

// =============================================================================
// Preferences
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SleeperPreferences {
    pub preferences: Preferences,
    pub sleeper_id: String,
    #[serde(rename = "Error")]
    pub error: ServiceError,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub notifications: Vec<Value>,
}

// =============================================================================
// Monthly summary
// =============================================================================

/// Day-by-day summary of one month for each sleeper.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SleeperMonthlySummaryDetails {
    pub month_sleep_data: MonthSleepData,
    #[serde(rename = "Error")]
    pub error: ServiceError,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MonthSleepData {
    pub date: String,
    pub days: Vec<MonthDay>,
    pub sleepers: Vec<MonthSleeperSummary>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MonthDay {
    pub date: String,
    pub sleepers: Vec<MonthDaySleeper>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MonthDaySleeper {
    pub sleeper_id: String,
    pub name: String,
    pub session: SleepSession,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MonthSleeperSummary {
    pub sleeper_id: String,
    pub message: String,
    #[serde(rename = "avgSleepIQ")]
    pub avg_sleep_iq: i64,
    pub restful: i64,
    pub tip: String,
    pub total_sleep_session_time: i64,
    pub avg_heart_rate: i64,
    pub restless: i64,
    pub avg_respiration_rate: i64,
    pub out_of_bed: i64,
    pub in_bed: i64,
}

// =============================================================================
// Edited sessions
// =============================================================================

/// Sleep sessions the sleeper edited or hid by hand.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct EditedSleepSessions {
    pub sleepers: Vec<SleeperEdits>,
    #[serde(rename = "Error")]
    pub error: ServiceError,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SleeperEdits {
    pub edited_sleep_sessions: Vec<EditedSession>,
    pub hidden_sleep_sessions: Vec<Value>,
    pub sleeper_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EditedSession {
    pub end_date: String,
    pub original_end_date: String,
    pub original_start_date: String,
    pub start_date: String,
}

// =============================================================================
// Nightly slices
// =============================================================================

/// Nightly activity split into fixed-size slices (600 per day).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SleeperNightlyTimeSeriesActivity {
    pub sleepers: Vec<SleeperSlices>,
    #[serde(rename = "Error")]
    pub error: ServiceError,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SleeperSlices {
    pub days: Vec<SliceDay>,
    pub sleeper_id: String,
    pub slice_size: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SliceDay {
    pub date: String,
    pub slice_list: Vec<Slice>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Slice {
    pub out_of_bed_time: i64,
    pub restful_time: i64,
    pub restless_time: i64,
    #[serde(rename = "type")]
    pub slice_type: i64,
}

api_response!(
    SleeperDetails,
    SleeperActivityDetails,
    SleeperPreferences,
    SleeperMonthlySummaryDetails,
    EditedSleepSessions,
    SleeperNightlyTimeSeriesActivity,
);

impl SleepIq {
    /// Every sleeper on the account.
    ///
    /// # Errors
    ///
    /// Fails if not logged in, or on transport, decode or service errors.
    pub async fn sleepers(&self) -> Result<SleeperDetails> {
        self.get_primary(Endpoint::path("sleeper"), "retrieve sleeper details")
            .await
    }

    /// Daily sleep quality.
    ///
    /// `date` is `YYYY-MM-DD`, `today`, `yesterday` or empty (today).
    /// `time_length` is `d1`, `w1` or `m1`, empty meaning one day.
    ///
    /// # Errors
    ///
    /// Fails if not logged in, or on transport, decode or service errors.
    pub async fn sleep_activity(
        &self,
        date: &str,
        time_length: &str,
    ) -> Result<SleeperActivityDetails> {
        let endpoint = Endpoint::path("sleepData/")
            .query("date", convert_date_alias(date))
            .query("interval", convert_time_length(time_length));
        self.get_primary(endpoint, "retrieve sleeper activity").await
    }

    /// # Errors
    ///
    /// Fails if not logged in, `sleeper_id` is empty, or on transport, decode
    /// or service errors.
    pub async fn sleeper_preference(&self, sleeper_id: &str) -> Result<SleeperPreferences> {
        self.session.require_primary()?;
        let sleeper_id = require_id("sleeper_id", sleeper_id)?;
        let endpoint = Endpoint::path("sleeper")
            .segment(sleeper_id)
            .segment("preferences");
        self.get_primary(endpoint, "retrieve sleeper preferences")
            .await
    }

    /// Monthly summary by day.
    ///
    /// `month` is `YYYY-MM`, `this`, `last` or a month name. A month name
    /// that has not been reached yet this year refers to last year.
    ///
    /// # Errors
    ///
    /// Fails if not logged in, or on transport, decode or service errors.
    pub async fn sleeper_monthly_summary(
        &self,
        month: &str,
    ) -> Result<SleeperMonthlySummaryDetails> {
        let endpoint =
            Endpoint::path("sleepData/byMonth").query("startDate", convert_monthly_date_alias(month));
        self.get_primary(endpoint, "retrieve sleeper monthly summary")
            .await
    }

    /// Manually edited sleep sessions in a date range.
    ///
    /// # Errors
    ///
    /// Fails if not logged in, `sleeper_id` is empty, or on transport, decode
    /// or service errors.
    pub async fn sleeper_edited_sessions(
        &self,
        sleeper_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<EditedSleepSessions> {
        self.session.require_primary()?;
        let sleeper_id = require_id("sleeper_id", sleeper_id)?;
        let endpoint = Endpoint::path("sleepData/editedHidden")
            .query("startDate", format_date(start))
            .query("endDate", format_date(end))
            .query("sleeperId", sleeper_id);
        self.get_primary(endpoint, "retrieve sleeper edited sessions")
            .await
    }

    /// Detailed nightly activity for one sleeper and night.
    ///
    /// # Errors
    ///
    /// Fails if not logged in, `sleeper_id` is empty, or on transport, decode
    /// or service errors.
    pub async fn sleeper_nightly_detailed_activity(
        &self,
        sleeper_id: &str,
        date: NaiveDate,
    ) -> Result<SleeperNightlyTimeSeriesActivity> {
        self.session.require_primary()?;
        let sleeper_id = require_id("sleeper_id", sleeper_id)?;
        let endpoint = Endpoint::path("sleepSliceData")
            .query("date", format_date(date))
            .query("sleeper", sleeper_id);
        self.get_primary(endpoint, "retrieve sleeper nightly activity")
            .await
    }
}
