//! Interval command implementation.

use tickbars_lib::prelude::*;

/// Print the width an interval string parses to.
pub(crate) fn show_interval(text: &str) {
    let interval = Interval::parse(text);

    println!("Input:     {text:?}");
    println!("Seconds:   {}", interval.seconds());
    println!("Canonical: {interval}");
    if interval.is_zero() {
        println!("Note: a zero interval cannot be used for aggregation");
    }
}
