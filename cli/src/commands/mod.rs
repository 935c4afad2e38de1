//! Command implementations and shared output helpers.

pub mod kinds;
pub mod send;

use anyhow::Result;
use serde::Serialize;

/// Types that can print themselves for a human reader.
pub trait HumanReadable {
    fn print_human(&self);
}

/// Print `value` as pretty JSON, or in human form when `human` is set.
pub fn output<T: Serialize + HumanReadable>(value: &T, human: bool) -> Result<()> {
    if human {
        value.print_human();
    } else {
        println!("{}", serde_json::to_string_pretty(value)?);
    }
    Ok(())
}
