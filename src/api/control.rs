//! Bed control commands.
//!
//! Every command validates its arguments before checking the session, so a
//! bad argument never reaches the network. Commands that change observable
//! state return a fresh status read after the command is accepted.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use serde_json::{Map, Value};

use super::bed::{BedFoundationStatus, FootWarmingStatus};
use super::{SleepIq, require_id};
use crate::core::endpoint::Endpoint;
use crate::error::{Result, SleepIqError};

/// Foot warmer timer bounds, in minutes.
pub const FOOT_WARMER_DURATION: std::ops::RangeInclusive<u32> = 1..=360;

/// Underbed light timer bounds, in minutes. Zero leaves the light on.
pub const LIGHT_DURATION: std::ops::RangeInclusive<u32> = 0..=180;

/// Sleep number bounds.
pub const SLEEP_NUMBER_RANGE: std::ops::RangeInclusive<u32> = 1..=100;

/// Foundation outlet wired to the underbed light.
pub const UNDERBED_LIGHT_OUTLET: u32 = 3;

const FOOT_WARMER_OFF_DURATION: u32 = 120;

// =============================================================================
// Argument types
// =============================================================================

/// Side of the bed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Single-letter code used by position and sleep number commands.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Left => "L",
            Self::Right => "R",
        }
    }

    /// Capitalized name used in foot warmer field names.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Left => "Left",
            Self::Right => "Right",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Left => "left",
            Self::Right => "right",
        })
    }
}

impl FromStr for Side {
    type Err = SleepIqError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            _ => Err(SleepIqError::invalid(
                "side",
                format!("must be 'left' or 'right', got '{s}'"),
            )),
        }
    }
}

/// Foot warmer temperature setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FootWarmerTemp {
    Off,
    Low,
    Medium,
    High,
}

impl FootWarmerTemp {
    #[must_use]
    pub const fn value(self) -> u32 {
        match self {
            Self::Off => 0,
            Self::Low => 31,
            Self::Medium => 57,
            Self::High => 72,
        }
    }
}

impl TryFrom<u32> for FootWarmerTemp {
    type Error = SleepIqError;

    fn try_from(value: u32) -> Result<Self> {
        match value {
            0 => Ok(Self::Off),
            31 => Ok(Self::Low),
            57 => Ok(Self::Medium),
            72 => Ok(Self::High),
            other => Err(SleepIqError::invalid(
                "temperature",
                format!("must be 0, 31, 57 or 72, got {other}"),
            )),
        }
    }
}

/// Foundation position preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BedPreset {
    Favorite,
    Read,
    WatchTv,
    Flat,
    ZeroG,
    Snore,
}

impl BedPreset {
    #[must_use]
    pub const fn value(self) -> u32 {
        match self {
            Self::Favorite => 1,
            Self::Read => 2,
            Self::WatchTv => 3,
            Self::Flat => 4,
            Self::ZeroG => 5,
            Self::Snore => 6,
        }
    }
}

impl TryFrom<u32> for BedPreset {
    type Error = SleepIqError;

    fn try_from(value: u32) -> Result<Self> {
        match value {
            1 => Ok(Self::Favorite),
            2 => Ok(Self::Read),
            3 => Ok(Self::WatchTv),
            4 => Ok(Self::Flat),
            5 => Ok(Self::ZeroG),
            6 => Ok(Self::Snore),
            other => Err(SleepIqError::invalid(
                "preset",
                format!("must be between 1 and 6, got {other}"),
            )),
        }
    }
}

/// Underbed light brightness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LightLevel {
    Low,
    Medium,
    High,
}

impl LightLevel {
    #[must_use]
    pub const fn value(self) -> u32 {
        match self {
            Self::Low => 1,
            Self::Medium => 30,
            Self::High => 100,
        }
    }
}

impl TryFrom<u32> for LightLevel {
    type Error = SleepIqError;

    fn try_from(value: u32) -> Result<Self> {
        match value {
            1 => Ok(Self::Low),
            30 => Ok(Self::Medium),
            100 => Ok(Self::High),
            other => Err(SleepIqError::invalid(
                "level",
                format!("must be 1, 30 or 100, got {other}"),
            )),
        }
    }
}

fn check_range(
    name: &'static str,
    value: u32,
    range: &std::ops::RangeInclusive<u32>,
) -> Result<u32> {
    if range.contains(&value) {
        Ok(value)
    } else {
        Err(SleepIqError::invalid(
            name,
            format!(
                "must be between {} and {}, got {value}",
                range.start(),
                range.end()
            ),
        ))
    }
}

// =============================================================================
// Request bodies
// =============================================================================

#[derive(Serialize)]
struct PresetCommand {
    speed: u32,
    side: &'static str,
    preset: u32,
}

#[derive(Serialize)]
struct UnderbedLightPwm {
    #[serde(rename = "rightUnderbedLightPWM")]
    right: u32,
    #[serde(rename = "leftUnderbedLightPWM")]
    left: u32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct OutletCommand {
    outlet_id: u32,
    setting: &'static str,
    timer: u32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AutoModeCommand {
    enable_auto: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ResponsiveAirCommand {
    left_side_enabled: bool,
    right_side_enabled: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SleepNumberCommand {
    side: &'static str,
    sleep_number: u32,
}

fn foot_warmer_body(side: Side, temp: FootWarmerTemp, duration: u32) -> Value {
    let mut body = Map::new();
    body.insert(
        format!("footWarmingTemp{}", side.title()),
        Value::from(temp.value()),
    );
    body.insert(
        format!("footWarmingTimer{}", side.title()),
        Value::from(duration),
    );
    Value::Object(body)
}

fn bed_command(bed_id: &str, resource: &str) -> Endpoint {
    Endpoint::path("bed").segment(bed_id).segment(resource)
}

fn foundation_command(bed_id: &str, resource: &str) -> Endpoint {
    bed_command(bed_id, "foundation").segment(resource)
}

// =============================================================================
// Commands
// =============================================================================

impl SleepIq {
    /// Turn on the foot warmer for one side.
    ///
    /// `temperature` is 0 (off), 31 (low), 57 (medium) or 72 (high);
    /// `duration` is minutes in `1..=360`. Returns the foot warmer status
    /// read after the command.
    ///
    /// # Errors
    ///
    /// Returns a validation error for bad arguments, otherwise fails if not
    /// logged in or on transport, decode or service errors.
    pub async fn control_foot_warmer(
        &mut self,
        bed_id: &str,
        side: &str,
        temperature: u32,
        duration: u32,
    ) -> Result<FootWarmingStatus> {
        let side: Side = side.parse()?;
        let temp = FootWarmerTemp::try_from(temperature)?;
        let duration = check_range("duration", duration, &FOOT_WARMER_DURATION)?;
        self.session.require_primary()?;
        let bed_id = require_id("bed_id", bed_id)?;

        let body = foot_warmer_body(side, temp, duration);
        self.put_command(
            foundation_command(bed_id, "footwarming"),
            Some(&body),
            "control foot warmer",
        )
        .await?;
        tracing::info!(bed_id, %side, temperature, duration, "foot warmer set");

        self.bed_foot_warmer_status(bed_id).await
    }

    /// Turn off the foot warmer on both sides, left first.
    ///
    /// # Errors
    ///
    /// Fails if not logged in or either side's command fails.
    pub async fn control_foot_warmer_off(&mut self, bed_id: &str) -> Result<FootWarmingStatus> {
        let off = FootWarmerTemp::Off.value();
        self.control_foot_warmer(bed_id, "left", off, FOOT_WARMER_OFF_DURATION)
            .await?;
        self.control_foot_warmer(bed_id, "right", off, FOOT_WARMER_OFF_DURATION)
            .await
    }

    /// Move one side of the foundation to a preset (1 to 6).
    ///
    /// # Errors
    ///
    /// Returns a validation error for bad arguments, otherwise fails if not
    /// logged in or on transport, decode or service errors.
    pub async fn control_bed_position(
        &mut self,
        bed_id: &str,
        side: &str,
        preset: u32,
    ) -> Result<BedFoundationStatus> {
        let side: Side = side.parse()?;
        let preset = BedPreset::try_from(preset)?;
        self.session.require_primary()?;
        let bed_id = require_id("bed_id", bed_id)?;

        let body = PresetCommand {
            speed: 0,
            side: side.code(),
            preset: preset.value(),
        };
        self.put_command(
            foundation_command(bed_id, "preset"),
            Some(&body),
            "control bed position",
        )
        .await?;
        tracing::info!(bed_id, %side, ?preset, "bed position set");

        self.bed_foundation_status(bed_id).await
    }

    /// Turn on the underbed light.
    ///
    /// `level` is 1 (low), 30 (medium) or 100 (high); `duration` is minutes
    /// in `0..=180`, where 0 means no timer.
    ///
    /// # Errors
    ///
    /// Returns a validation error for bad arguments, otherwise fails if not
    /// logged in or either command fails.
    pub async fn control_underbed_light(
        &mut self,
        bed_id: &str,
        level: u32,
        duration: u32,
    ) -> Result<()> {
        let level = LightLevel::try_from(level)?;
        let duration = check_range("duration", duration, &LIGHT_DURATION)?;
        self.session.require_primary()?;
        let bed_id = require_id("bed_id", bed_id)?;

        let pwm = UnderbedLightPwm {
            right: level.value(),
            left: level.value(),
        };
        self.put_command(
            foundation_command(bed_id, "system"),
            Some(&pwm),
            "control underbed light",
        )
        .await?;

        let outlet = OutletCommand {
            outlet_id: UNDERBED_LIGHT_OUTLET,
            setting: "1",
            timer: duration,
        };
        self.put_command(
            foundation_command(bed_id, "outlet"),
            Some(&outlet),
            "control underbed light outlet",
        )
        .await?;
        tracing::info!(bed_id, ?level, duration, "underbed light set");
        Ok(())
    }

    /// Set the underbed light to its resting state: high level, no timer.
    ///
    /// # Errors
    ///
    /// Fails if not logged in or on transport, decode or service errors.
    pub async fn control_underbed_light_off(&mut self, bed_id: &str) -> Result<()> {
        self.control_underbed_light(bed_id, LightLevel::High.value(), 0)
            .await
    }

    /// # Errors
    ///
    /// Fails if not logged in or on transport, decode or service errors.
    pub async fn control_underbed_light_auto_mode(
        &mut self,
        bed_id: &str,
        enabled: bool,
    ) -> Result<()> {
        self.session.require_primary()?;
        let bed_id = require_id("bed_id", bed_id)?;

        self.put_command(
            foundation_command(bed_id, "underbedLight"),
            Some(&AutoModeCommand {
                enable_auto: enabled,
            }),
            "control underbed light auto mode",
        )
        .await?;
        tracing::info!(bed_id, enabled, "underbed light auto mode set");
        Ok(())
    }

    /// Enable or disable responsive air on both sides.
    ///
    /// # Errors
    ///
    /// Fails if not logged in or on transport, decode or service errors.
    pub async fn control_responsive_air_mode(
        &mut self,
        bed_id: &str,
        enabled: bool,
    ) -> Result<()> {
        self.session.require_primary()?;
        let bed_id = require_id("bed_id", bed_id)?;

        self.put_command(
            bed_command(bed_id, "responsiveAir"),
            Some(&ResponsiveAirCommand {
                left_side_enabled: enabled,
                right_side_enabled: enabled,
            }),
            "control responsive air",
        )
        .await?;
        tracing::info!(bed_id, enabled, "responsive air set");
        Ok(())
    }

    /// Set the sleep number (1 to 100) for one side.
    ///
    /// The pump is forced idle first; if that fails the sleep number is not
    /// sent.
    ///
    /// # Errors
    ///
    /// Returns a validation error for bad arguments, otherwise fails if not
    /// logged in or either command fails.
    pub async fn control_sleep_number(
        &mut self,
        bed_id: &str,
        side: &str,
        number: u32,
    ) -> Result<()> {
        let side: Side = side.parse()?;
        let number = check_range("sleep_number", number, &SLEEP_NUMBER_RANGE)?;
        self.session.require_primary()?;
        let bed_id = require_id("bed_id", bed_id)?;

        self.control_pump_force_idle(bed_id).await?;

        self.put_command(
            bed_command(bed_id, "sleepNumber"),
            Some(&SleepNumberCommand {
                side: side.code(),
                sleep_number: number,
            }),
            "control sleep number",
        )
        .await?;
        tracing::info!(bed_id, %side, number, "sleep number set");
        Ok(())
    }

    /// Stop any pump activity in progress.
    ///
    /// # Errors
    ///
    /// Fails if not logged in or on transport, decode or service errors.
    pub async fn control_pump_force_idle(&mut self, bed_id: &str) -> Result<()> {
        self.session.require_primary()?;
        let bed_id = require_id("bed_id", bed_id)?;

        self.put_command::<()>(
            Endpoint::path("bed")
                .segment(bed_id)
                .segment("pump")
                .segment("forceIdle"),
            None,
            "control pump force idle",
        )
        .await
    }
}
