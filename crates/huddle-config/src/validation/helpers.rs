//! Shared checks used by the section validators.

use std::ops::RangeInclusive;

/// Record an error when `value` falls outside `allowed`.
pub(crate) fn check_range(errors: &mut Vec<String>, name: &str, value: u32, allowed: RangeInclusive<u32>) {
    if !allowed.contains(&value) {
        errors.push(format!(
            "{name} = {value} is out of range [{}, {}]",
            allowed.start(),
            allowed.end()
        ));
    }
}
