//! Bed, foundation and lighting status.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

use super::{ServiceError, SleepIq, api_response, require_id};
use crate::core::endpoint::Endpoint;
use crate::error::Result;

/// Bed type codes reported in [`BedSystemStatus::bed_type`].
pub mod bed_type {
    pub const SINGLE: i64 = 0;
    pub const SPLIT_HEAD: i64 = 1;
    pub const SPLIT_KING: i64 = 2;
    pub const EASTERN_KING: i64 = 3;
}

/// Side codes reported in [`crate::api::sleeper::Sleeper::side`].
pub mod bed_side {
    pub const LEFT: i64 = 0;
    pub const RIGHT: i64 = 1;
}

// =============================================================================
// Beds
// =============================================================================

/// All beds on the account.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct BedsInfo {
    pub beds: Vec<Bed>,
    #[serde(rename = "Error")]
    pub error: ServiceError,
}

/// Registration details of one bed.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Bed {
    pub registration_date: Option<DateTime<Utc>>,
    pub sleeper_right_id: String,
    pub base: Value,
    pub return_request_status: i64,
    pub size: String,
    pub name: String,
    pub serial: String,
    pub is_kids_bed: bool,
    pub dual_sleep: bool,
    pub bed_id: String,
    pub status: i64,
    pub sleeper_left_id: String,
    pub version: String,
    pub account_id: String,
    pub timezone: String,
    pub generation: String,
    pub model: String,
    pub purchase_date: Option<DateTime<Utc>>,
    pub mac_address: String,
    pub sku: String,
    pub zipcode: String,
    pub reference: String,
}

// =============================================================================
// Privacy mode
// =============================================================================

/// Whether privacy (pause) mode is on for a bed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BedPrivacyModeDetails {
    pub account_id: String,
    pub bed_id: String,
    pub pause_mode: String,
    #[serde(rename = "Error")]
    pub error: ServiceError,
}

// =============================================================================
// Family status
// =============================================================================

/// Occupancy and sleep number per bed side for every bed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FamilyStatusDetails {
    pub beds: Vec<BedFamilyStatus>,
    #[serde(rename = "Error")]
    pub error: ServiceError,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BedFamilyStatus {
    pub status: i64,
    pub bed_id: String,
    pub left_side: SideStatus,
    pub right_side: SideStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SideStatus {
    pub is_in_bed: bool,
    pub alert_detailed_message: String,
    pub sleep_number: i64,
    pub alert_id: i64,
    pub last_link: String,
    pub pressure: i64,
}

// =============================================================================
// Detailed status
// =============================================================================

/// Chamber, foundation, pump and outlet detail for one bed. Mostly useful for
/// troubleshooting.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BedDetailedInfo {
    pub bed_id: String,
    pub chambers: Chambers,
    pub foundation: DetailedFoundation,
    pub pump: Pump,
    pub smartoutlets: Vec<SmartOutlet>,
    #[serde(rename = "Error")]
    pub error: ServiceError,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Chambers {
    pub left_chamber_occupancy: Value,
    pub left_chamber_refreshed_state: Value,
    pub left_chamber_type: i64,
    pub right_chamber_occupancy: Value,
    pub right_chamber_refreshed_state: Value,
    pub right_chamber_type: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct DetailedFoundation {
    #[serde(rename = "fsCurrentPositionPresetLeft")]
    pub current_position_preset_left: String,
    #[serde(rename = "fsCurrentPositionPresetRight")]
    pub current_position_preset_right: String,
    #[serde(rename = "fsType")]
    pub foundation_type: String,
    pub outlets: Vec<FoundationOutlet>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FoundationOutlet {
    pub outlet_id: i64,
    pub setting: Value,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Pump {
    pub active_task: i64,
    pub chamber_type: i64,
    pub left_side_sleep_number: i64,
    pub right_side_sleep_number: i64,
    pub sleep_number_favorite_left: i64,
    pub sleep_number_favorite_right: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SmartOutlet {
    pub name: String,
    pub outlet_id: i64,
    pub setting: i64,
}

// =============================================================================
// Nodes
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BedNodesDetails {
    pub bed_id: String,
    pub nodes: Vec<i64>,
    #[serde(rename = "Error")]
    pub error: ServiceError,
}

// =============================================================================
// Responsive air
// =============================================================================

/// Responsive air (automatic firmness adjustment) settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResponsiveAirSettings {
    pub adjustment_threshold: i64,
    pub in_bed_timeout: i64,
    pub left_side_enabled: bool,
    pub out_of_bed_timeout: i64,
    pub poll_frequency: i64,
    pub pref_sync_state: String,
    pub right_side_enabled: bool,
    #[serde(rename = "Error")]
    pub error: ServiceError,
}

// =============================================================================
// Foot warmer
// =============================================================================

/// Foot warmer temperature and remaining timer per side.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FootWarmingStatus {
    pub foot_warming_status_left: i64,
    pub foot_warming_status_right: i64,
    pub foot_warming_timer_left: i64,
    pub foot_warming_timer_right: i64,
    #[serde(rename = "Error")]
    pub error: ServiceError,
}

// =============================================================================
// System status
// =============================================================================

/// Control board and underbed lighting state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BedSystemStatus {
    #[serde(rename = "fsBedType")]
    pub bed_type: i64,
    #[serde(rename = "fsBoardFaults")]
    pub board_faults: i64,
    #[serde(rename = "fsBoardFeatures")]
    pub board_features: i64,
    #[serde(rename = "fsBoardHWRevisionCode")]
    pub board_hw_revision_code: i64,
    #[serde(rename = "fsBoardStatus")]
    pub board_status: i64,
    #[serde(rename = "fsLeftUnderbedLightPWM")]
    pub left_underbed_light_pwm: i64,
    #[serde(rename = "fsRightUnderbedLightPWM")]
    pub right_underbed_light_pwm: i64,
    #[serde(rename = "Error")]
    pub error: ServiceError,
}

/// Underbed lighting system state; served by the same resource as
/// [`BedSystemStatus`].
pub type UnderbedLightSystemStatus = BedSystemStatus;

// =============================================================================
// Pinch status
// =============================================================================

/// Pinch-hazard sensor flags and event counts per actuator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BedPinchStatus {
    pub continuous_pinch_left_foot: bool,
    pub continuous_pinch_left_head: bool,
    pub continuous_pinch_right_foot: bool,
    pub continuous_pinch_right_head: bool,
    pub pinch_events_left_foot: i64,
    pub pinch_events_left_head: i64,
    pub pinch_events_right_foot: i64,
    pub pinch_events_right_head: i64,
    pub pinch_sense_disconnected_left_foot: bool,
    pub pinch_sense_disconnected_left_head: bool,
    pub pinch_sense_disconnected_right_foot: bool,
    pub pinch_sense_disconnected_right_head: bool,
    #[serde(rename = "Error")]
    pub error: ServiceError,
}

impl BedPinchStatus {
    /// True if any actuator currently reports a continuous pinch.
    #[must_use]
    pub const fn any_pinch(&self) -> bool {
        self.continuous_pinch_left_foot
            || self.continuous_pinch_left_head
            || self.continuous_pinch_right_foot
            || self.continuous_pinch_right_head
    }
}

// =============================================================================
// Underbed light
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UnderbedLightStatus {
    pub enable_auto: bool,
    pub pref_sync_state: String,
    #[serde(rename = "Error")]
    pub error: ServiceError,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UnderbedLightOutletStatus {
    pub bed_id: String,
    pub outlet: i64,
    pub setting: i64,
    pub timer: Value,
    #[serde(rename = "Error")]
    pub error: ServiceError,
}

// =============================================================================
// Foundation status
// =============================================================================

/// Position, motor and outlet state of the adjustable base.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BedFoundationStatus {
    #[serde(rename = "fsCurrentPositionPresetRight")]
    pub current_position_preset_right: String,
    #[serde(rename = "fsNeedsHoming")]
    pub needs_homing: bool,
    #[serde(rename = "fsRightFootPosition")]
    pub right_foot_position: String,
    #[serde(rename = "fsLeftPositionTimerLSB")]
    pub left_position_timer_lsb: String,
    #[serde(rename = "fsTimerPositionPresetLeft")]
    pub timer_position_preset_left: String,
    #[serde(rename = "fsCurrentPositionPresetLeft")]
    pub current_position_preset_left: String,
    #[serde(rename = "fsLeftPositionTimerMSB")]
    pub left_position_timer_msb: String,
    #[serde(rename = "fsRightFootActuatorMotorStatus")]
    pub right_foot_actuator_motor_status: String,
    #[serde(rename = "fsCurrentPositionPreset")]
    pub current_position_preset: String,
    #[serde(rename = "fsTimerPositionPresetRight")]
    pub timer_position_preset_right: String,
    #[serde(rename = "fsType")]
    pub foundation_type: String,
    #[serde(rename = "fsOutletsOn")]
    pub outlets_on: bool,
    #[serde(rename = "fsLeftHeadPosition")]
    pub left_head_position: String,
    #[serde(rename = "fsIsMoving")]
    pub is_moving: bool,
    #[serde(rename = "fsRightHeadActuatorMotorStatus")]
    pub right_head_actuator_motor_status: String,
    #[serde(rename = "fsStatusSummary")]
    pub status_summary: String,
    #[serde(rename = "fsTimerPositionPreset")]
    pub timer_position_preset: String,
    #[serde(rename = "fsLeftFootPosition")]
    pub left_foot_position: String,
    #[serde(rename = "fsRightPositionTimerLSB")]
    pub right_position_timer_lsb: String,
    #[serde(rename = "fsTimedOutletsOn")]
    pub timed_outlets_on: bool,
    #[serde(rename = "fsRightHeadPosition")]
    pub right_head_position: String,
    #[serde(rename = "fsConfigured")]
    pub configured: bool,
    #[serde(rename = "fsRightPositionTimerMSB")]
    pub right_position_timer_msb: String,
    #[serde(rename = "fsLeftHeadActuatorMotorStatus")]
    pub left_head_actuator_motor_status: String,
    #[serde(rename = "fsLeftFootActuatorMotorStatus")]
    pub left_foot_actuator_motor_status: String,
    #[serde(rename = "Error")]
    pub error: ServiceError,
}

api_response!(
    BedsInfo,
    BedPrivacyModeDetails,
    FamilyStatusDetails,
    BedDetailedInfo,
    BedNodesDetails,
    ResponsiveAirSettings,
    FootWarmingStatus,
    BedSystemStatus,
    BedPinchStatus,
    UnderbedLightStatus,
    UnderbedLightOutletStatus,
    BedFoundationStatus,
);

fn bed_resource(bed_id: &str, resource: &str) -> Endpoint {
    Endpoint::path("bed").segment(bed_id).segment(resource)
}

fn foundation_resource(bed_id: &str, resource: &str) -> Endpoint {
    bed_resource(bed_id, "foundation").segment(resource)
}

impl SleepIq {
    /// All beds associated with the account.
    ///
    /// # Errors
    ///
    /// Fails if not logged in, or on transport, decode or service errors.
    pub async fn beds(&self) -> Result<BedsInfo> {
        self.get_primary(Endpoint::path("bed"), "retrieve bed details")
            .await
    }

    /// Privacy mode for a bed. Bed ids come from [`SleepIq::beds`].
    ///
    /// # Errors
    ///
    /// Fails if not logged in, `bed_id` is empty, or on transport, decode or
    /// service errors.
    pub async fn bed_privacy_mode(&self, bed_id: &str) -> Result<BedPrivacyModeDetails> {
        self.session.require_primary()?;
        let bed_id = require_id("bed_id", bed_id)?;
        self.get_primary(bed_resource(bed_id, "pauseMode"), "retrieve bed pause mode")
            .await
    }

    /// Occupancy and sleep number of every bed side.
    ///
    /// # Errors
    ///
    /// Fails if not logged in, or on transport, decode or service errors.
    pub async fn bed_family_status(&self) -> Result<FamilyStatusDetails> {
        self.get_primary(
            Endpoint::path("bed/familyStatus"),
            "retrieve bed family status",
        )
        .await
    }

    /// Detailed chamber, pump and foundation state.
    ///
    /// # Errors
    ///
    /// Fails if not logged in, `bed_id` is empty, or on transport, decode or
    /// service errors.
    pub async fn bed_detailed_status(&self, bed_id: &str) -> Result<BedDetailedInfo> {
        self.session.require_primary()?;
        let bed_id = require_id("bed_id", bed_id)?;
        self.get_primary(
            bed_resource(bed_id, "superStatus"),
            "retrieve bed detailed status",
        )
        .await
    }

    /// # Errors
    ///
    /// Fails if not logged in, `bed_id` is empty, or on transport, decode or
    /// service errors.
    pub async fn bed_nodes(&self, bed_id: &str) -> Result<BedNodesDetails> {
        self.session.require_primary()?;
        let bed_id = require_id("bed_id", bed_id)?;
        self.get_primary(bed_resource(bed_id, "nodes"), "retrieve bed nodes")
            .await
    }

    /// # Errors
    ///
    /// Fails if not logged in, `bed_id` is empty, or on transport, decode or
    /// service errors.
    pub async fn bed_responsive_air(&self, bed_id: &str) -> Result<ResponsiveAirSettings> {
        self.session.require_primary()?;
        let bed_id = require_id("bed_id", bed_id)?;
        self.get_primary(
            bed_resource(bed_id, "responsiveAir"),
            "retrieve bed responsive air settings",
        )
        .await
    }

    /// # Errors
    ///
    /// Fails if not logged in, `bed_id` is empty, or on transport, decode or
    /// service errors.
    pub async fn bed_foot_warmer_status(&self, bed_id: &str) -> Result<FootWarmingStatus> {
        self.session.require_primary()?;
        let bed_id = require_id("bed_id", bed_id)?;
        self.get_primary(
            foundation_resource(bed_id, "footwarming"),
            "retrieve bed foot warmer status",
        )
        .await
    }

    /// # Errors
    ///
    /// Fails if not logged in, `bed_id` is empty, or on transport, decode or
    /// service errors.
    pub async fn bed_system_status(&self, bed_id: &str) -> Result<BedSystemStatus> {
        self.session.require_primary()?;
        let bed_id = require_id("bed_id", bed_id)?;
        self.get_primary(
            foundation_resource(bed_id, "system"),
            "retrieve bed system status",
        )
        .await
    }

    /// # Errors
    ///
    /// Fails if not logged in, `bed_id` is empty, or on transport, decode or
    /// service errors.
    pub async fn bed_pinch_status(&self, bed_id: &str) -> Result<BedPinchStatus> {
        self.session.require_primary()?;
        let bed_id = require_id("bed_id", bed_id)?;
        self.get_primary(
            foundation_resource(bed_id, "pinch"),
            "retrieve bed pinch status",
        )
        .await
    }

    /// Underbed light auto mode.
    ///
    /// # Errors
    ///
    /// Fails if not logged in, `bed_id` is empty, or on transport, decode or
    /// service errors.
    pub async fn bed_light_status(&self, bed_id: &str) -> Result<UnderbedLightStatus> {
        self.session.require_primary()?;
        let bed_id = require_id("bed_id", bed_id)?;
        self.get_primary(
            foundation_resource(bed_id, "underbedLight"),
            "retrieve bed light status",
        )
        .await
    }

    /// Position and motor state of the foundation.
    ///
    /// # Errors
    ///
    /// Fails if not logged in, `bed_id` is empty, or on transport, decode or
    /// service errors.
    pub async fn bed_foundation_status(&self, bed_id: &str) -> Result<BedFoundationStatus> {
        self.session.require_primary()?;
        let bed_id = require_id("bed_id", bed_id)?;
        self.get_primary(
            foundation_resource(bed_id, "status"),
            "retrieve bed foundation status",
        )
        .await
    }

    /// State of one foundation outlet (the underbed light is outlet 3).
    ///
    /// # Errors
    ///
    /// Fails if not logged in, `bed_id` is empty, or on transport, decode or
    /// service errors.
    pub async fn bed_lighting_outlet_status(
        &self,
        bed_id: &str,
        outlet_id: u32,
    ) -> Result<UnderbedLightOutletStatus> {
        self.session.require_primary()?;
        let bed_id = require_id("bed_id", bed_id)?;
        self.get_primary(
            foundation_resource(bed_id, "outlet").query("outletId", outlet_id.to_string()),
            "retrieve bed lighting outlet status",
        )
        .await
    }

    /// # Errors
    ///
    /// Fails if not logged in, `bed_id` is empty, or on transport, decode or
    /// service errors.
    pub async fn bed_lighting_system_status(
        &self,
        bed_id: &str,
    ) -> Result<UnderbedLightSystemStatus> {
        self.session.require_primary()?;
        let bed_id = require_id("bed_id", bed_id)?;
        self.get_primary(
            foundation_resource(bed_id, "system"),
            "retrieve bed lighting system status",
        )
        .await
    }
}
