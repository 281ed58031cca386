//! Board manufacture date/time.
//!
//! The board info area records its manufacture time as a 24-bit count of minutes since
//! 1996-01-01 00:00 UTC.
//!
//! ## License
//!
//! Copyright (C) Microsoft Corporation.
//!
//! SPDX-License-Identifier: BSD-2-Clause-Patent
//!
use core::fmt;

/// 1996-01-01T00:00:00Z in seconds since the Unix epoch.
pub const FRU_EPOCH_UNIX_SECONDS: u64 = 820_454_400;

const SECONDS_PER_DAY: u64 = 86_400;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ManufactureTimestamp {
    minutes: u32,
}

/// Broken-down UTC calendar time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateTime {
    pub year: u32,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl ManufactureTimestamp {
    pub const fn from_minutes(minutes: u32) -> Self {
        Self { minutes }
    }

    /// Minutes since the 1996 epoch, as stored on the wire.
    pub const fn minutes(&self) -> u32 {
        self.minutes
    }

    pub const fn unix_seconds(&self) -> u64 {
        FRU_EPOCH_UNIX_SECONDS + self.minutes as u64 * 60
    }

    pub fn to_date_time(&self) -> DateTime {
        let seconds = self.unix_seconds();
        let (year, month, day) = civil_from_days(seconds / SECONDS_PER_DAY);
        let time_of_day = seconds % SECONDS_PER_DAY;
        DateTime {
            year,
            month,
            day,
            hour: (time_of_day / 3600) as u8,
            minute: (time_of_day % 3600 / 60) as u8,
            second: (time_of_day % 60) as u8,
        }
    }
}

impl fmt::Display for ManufactureTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dt = self.to_date_time();
        write!(
            f,
            "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}Z",
            dt.year, dt.month, dt.day, dt.hour, dt.minute, dt.second
        )
    }
}

// Days since 1970-01-01 to a proleptic Gregorian (year, month, day).
// Eras are 400 year cycles starting on March 1st so leap days fall at the end of a year.
fn civil_from_days(days: u64) -> (u32, u8, u8) {
    let z = days + 719_468;
    let era = z / 146_097;
    let doe = z - era * 146_097;
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = doy - (153 * mp + 2) / 5 + 1;
    let month = if mp < 10 { mp + 3 } else { mp - 9 };
    let year = yoe + era * 400 + u64::from(month <= 2);
    (year as u32, month as u8, day as u8)
}
