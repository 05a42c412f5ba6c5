//! Application constants
//!
//! Centralized location for all domain-level constants used throughout the
//! application.

use chrono::Weekday;

// Calendar grid configuration
/// First day of every week row. Range resolution and placement both read this
/// value so buckets never drift by a day.
pub const WEEK_START: Weekday = Weekday::Sun;
pub const DAYS_PER_WEEK: usize = 7;
pub const HOURS_PER_DAY: u32 = 24;
pub const MINUTES_PER_HOUR: i64 = 60;

// Placement configuration
pub const MONTH_CELL_EVENT_LIMIT: usize = 3;
/// Vertical scale of the day view; one hour slot is 60 px tall.
pub const PIXELS_PER_MINUTE: f64 = 1.0;

// Authoring defaults
pub const DEFAULT_EVENT_START_HOUR: u32 = 9;
pub const DEFAULT_EVENT_END_HOUR: u32 = 10;

// Credential storage
pub const CREDENTIAL_STORAGE_KEY: &str = "googleAccessToken";
pub const KEYCHAIN_SERVICE_NAME: &str = "Daybook.google";

// Google endpoints and scopes
pub const GOOGLE_CALENDAR_API_BASE: &str = "https://www.googleapis.com/calendar/v3";
pub const GOOGLE_AUTHORIZATION_ENDPOINT: &str = "https://accounts.google.com/o/oauth2/v2/auth";
pub const GOOGLE_TOKEN_ENDPOINT: &str = "https://oauth2.googleapis.com/token";
pub const GOOGLE_USERINFO_ENDPOINT: &str = "https://openidconnect.googleapis.com/v1/userinfo";
pub const GOOGLE_CALENDAR_SCOPES: &[&str] = &[
    "openid",
    "email",
    "profile",
    "https://www.googleapis.com/auth/calendar.events",
    "https://www.googleapis.com/auth/calendar.app.created",
];

// Video-link provisioning
pub const TEMP_MEETING_SUMMARY: &str = "Temporary Meeting - Will be deleted";
pub const TEMP_MEETING_DURATION_MINUTES: i64 = 60;
pub const CONFERENCE_SOLUTION_TYPE: &str = "hangoutsMeet";
pub const VIDEO_ENTRY_POINT_TYPE: &str = "video";

// Sign-in
pub const DEFAULT_SIGN_IN_TIMEOUT_SECS: u64 = 300;
