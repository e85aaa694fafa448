//! Test utilities for sleepiq.
//!
//! Provides vendor payload factories, configuration pointing at a local mock
//! server, temporary directories and assertion macros.
//!
//! # Usage
//!
//! ```rust,ignore
//! use sleepiq::test_utils::*;
//!
//! let config = test_config(&server.uri());
//! let body = make_login_response("U1", "K1");
//! let dir = TestDir::new();
//! dir.create_file("config.toml", "timeout_seconds = 5");
//! ```

use std::fs;
use std::io::{self, Write as IoWrite};
use std::path::{Path, PathBuf};

use serde_json::{Value, json};

use crate::storage::{ClientConfig, DEFAULT_SUBSCRIPTION_KEY};

/// Path under the mock server root that stands in for the bed API base.
pub const TEST_API_PATH: &str = "/rest";

/// Path under the mock server root that stands in for the Insights base.
pub const TEST_INSIGHTS_PATH: &str = "/prod";

/// Bed id used by the payload factories.
pub const TEST_BED_ID: &str = "-9223372036854775807";

/// Sleeper id used by the payload factories.
pub const TEST_SLEEPER_ID: &str = "-9223372036854775806";

/// Session key returned by [`make_login_response`] when none is given.
pub const TEST_SESSION_KEY: &str = "test-session-key";

// =============================================================================
// Configuration
// =============================================================================

/// Configuration with both API bases on `server_uri` and a short timeout.
///
/// The bed API lives under [`TEST_API_PATH`] and Insights under
/// [`TEST_INSIGHTS_PATH`], mirroring the production layout.
#[must_use]
pub fn test_config(server_uri: &str) -> ClientConfig {
    let root = server_uri.trim_end_matches('/');
    ClientConfig {
        api_base: format!("{root}{TEST_API_PATH}"),
        insights_base: format!("{root}{TEST_INSIGHTS_PATH}"),
        timeout_seconds: 5,
        subscription_key: DEFAULT_SUBSCRIPTION_KEY.to_string(),
        user_agent: Some("sleepiq-tests".to_string()),
    }
}

// =============================================================================
// Payload Factories
// =============================================================================

/// Successful bed API login body.
#[must_use]
pub fn make_login_response(user_id: &str, key: &str) -> Value {
    json!({
        "userId": user_id,
        "key": key,
        "registrationState": 13,
        "edpLoginStatus": 200,
        "edpLoginMessage": "not used"
    })
}

/// Successful Insights login body.
#[must_use]
pub fn make_insights_login_response(token: &str) -> Value {
    json!({
        "token": token,
        "sleeperId": TEST_SLEEPER_ID
    })
}

/// A body carrying only a vendor error.
#[must_use]
pub fn make_service_error(code: i64, message: &str) -> Value {
    json!({ "Error": { "Code": code, "Message": message } })
}

/// Accepted control command body.
#[must_use]
pub fn make_command_ok() -> Value {
    json!({})
}

/// One dual-sleep bed.
#[must_use]
pub fn make_beds_response() -> Value {
    json!({
        "beds": [{
            "bedId": TEST_BED_ID,
            "name": "Bed",
            "accountId": "-9223372036854775805",
            "sleeperLeftId": TEST_SLEEPER_ID,
            "sleeperRightId": "0",
            "dualSleep": true,
            "isKidsBed": false,
            "size": "KING",
            "model": "P6",
            "generation": "360",
            "timezone": "US/Central",
            "status": 1,
            "returnRequestStatus": 0,
            "registrationDate": "2019-05-04T12:00:00Z",
            "purchaseDate": "2019-04-20T00:00:00Z",
            "base": { "type": "FlexFit 2" },
            "macAddress": "64DBA0000000",
            "serial": "",
            "sku": "QP6",
            "zipcode": "55401",
            "reference": "5000000000-1",
            "version": ""
        }]
    })
}

/// Foot warmer status with the given right-side temperature and timer.
#[must_use]
pub fn make_foot_warming_status(temp_right: u32, timer_right: u32) -> Value {
    json!({
        "footWarmingStatusLeft": 0,
        "footWarmingStatusRight": temp_right,
        "footWarmingTimerLeft": 0,
        "footWarmingTimerRight": timer_right
    })
}

/// Foundation status with the given preset on both sides.
#[must_use]
pub fn make_foundation_status(preset: &str) -> Value {
    json!({
        "fsCurrentPositionPresetRight": preset,
        "fsCurrentPositionPresetLeft": preset,
        "fsCurrentPositionPreset": "00",
        "fsNeedsHoming": false,
        "fsRightFootPosition": "00",
        "fsLeftFootPosition": "00",
        "fsRightHeadPosition": "00",
        "fsLeftHeadPosition": "00",
        "fsIsMoving": false,
        "fsType": "Split King",
        "fsConfigured": true,
        "fsOutletsOn": false,
        "fsTimedOutletsOn": false,
        "fsStatusSummary": "45"
    })
}

/// One sleeper on the left side of [`TEST_BED_ID`].
#[must_use]
pub fn make_sleepers_response() -> Value {
    json!({
        "sleepers": [{
            "firstName": "Ada",
            "sleeperId": TEST_SLEEPER_ID,
            "bedId": TEST_BED_ID,
            "accountId": "-9223372036854775805",
            "active": true,
            "emailValidated": true,
            "isChild": false,
            "isMale": false,
            "isAccountOwner": true,
            "birthYear": "1985",
            "birthMonth": 12,
            "height": 66,
            "weight": 140,
            "sleepGoal": 480,
            "side": 0,
            "duration": null,
            "licenseVersion": 6,
            "username": "ada@example.com",
            "email": "ada@example.com",
            "avatar": "",
            "lastLogin": "2024-06-01 07:00:00 CDT",
            "timezone": "US/Central",
            "zipCode": "55401"
        }]
    })
}

/// Relative insight history with a single data point.
#[must_use]
pub fn make_relative_insights(date: &str, siq_score: i64) -> Value {
    json!({
        "data": [{
            "count": 1200,
            "date": date,
            "siqScore": siq_score,
            "sleepNumber": 45,
            "timeInBed": 27000
        }]
    })
}

// =============================================================================
// Temporary Directories
// =============================================================================

/// A temporary directory that is removed when dropped.
///
/// # Examples
///
/// ```rust,ignore
/// use sleepiq::test_utils::TestDir;
///
/// let dir = TestDir::new();
/// dir.create_file("config.toml", "timeout_seconds = 5");
/// assert!(dir.file_exists("config.toml"));
/// ```
pub struct TestDir {
    inner: tempfile::TempDir,
}

impl TestDir {
    /// Create a new isolated temporary directory.
    ///
    /// # Panics
    ///
    /// Panics if the temporary directory cannot be created.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: tempfile::tempdir().expect("Failed to create temp directory"),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        self.inner.path()
    }

    /// Create a file with the given content, creating parent directories.
    ///
    /// # Panics
    ///
    /// Panics if the file cannot be created or written.
    pub fn create_file(&self, name: &str, content: &str) {
        let path = self.inner.path().join(name);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }

        let mut file = fs::File::create(&path).expect("Failed to create test file");
        file.write_all(content.as_bytes())
            .expect("Failed to write test file");
    }

    /// # Errors
    ///
    /// Returns error if the file cannot be read.
    pub fn read_file(&self, name: &str) -> io::Result<String> {
        fs::read_to_string(self.inner.path().join(name))
    }

    #[must_use]
    pub fn file_exists(&self, name: &str) -> bool {
        self.inner.path().join(name).exists()
    }

    #[must_use]
    pub fn file_path(&self, name: &str) -> PathBuf {
        self.inner.path().join(name)
    }
}

impl Default for TestDir {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Assertion Macros
// =============================================================================

/// Assert that a string contains a substring.
#[macro_export]
macro_rules! assert_contains {
    ($haystack:expr, $needle:expr) => {
        let haystack = $haystack;
        let needle = $needle;
        assert!(
            haystack.contains(needle),
            "Expected string to contain {:?}\n\nActual string:\n{:?}",
            needle,
            haystack
        );
    };
}

/// Assert that a string does NOT contain a substring.
#[macro_export]
macro_rules! assert_not_contains {
    ($haystack:expr, $needle:expr) => {
        let haystack = $haystack;
        let needle = $needle;
        assert!(
            !haystack.contains(needle),
            "Expected string NOT to contain {:?}\n\nActual string:\n{:?}",
            needle,
            haystack
        );
    };
}
