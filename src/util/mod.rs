//! Utility functions.

pub mod time;

pub use time::{
    convert_date_alias, convert_date_alias_at, convert_monthly_date_alias,
    convert_monthly_date_alias_at, convert_time_length, format_date,
};
