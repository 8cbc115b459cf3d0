//! Timezone name validation against the bundled IANA zone table.
//!
//! Matching is exact and case-sensitive: `"America/New_York"` is valid,
//! `"america/new_york"` and `"EDT"` are not.

mod zones;

use zones::ALL_TIMEZONES;

/// Returns true if `name` is a known zone or link name.
pub fn is_valid_timezone(name: &str) -> bool {
    ALL_TIMEZONES.binary_search(&name).is_ok()
}

/// All known zone names, sorted.
pub fn all_timezones() -> &'static [&'static str] {
    ALL_TIMEZONES
}
