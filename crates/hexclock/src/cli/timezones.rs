//! `timezones` subcommand — list the timezones the clock can display.

use super::{Result, TimezoneEntry, TimezonesOutput, print_json, time};

/// Entries whose id or label contains `filter`, case-insensitively.
fn filter_entries(entries: Vec<TimezoneEntry>, filter: Option<&str>) -> Vec<TimezoneEntry> {
    let Some(needle) = filter.map(|f| f.trim().to_lowercase()).filter(|f| !f.is_empty()) else {
        return entries;
    };
    entries
        .into_iter()
        .filter(|e| e.id.to_lowercase().contains(&needle) || e.label.to_lowercase().contains(&needle))
        .collect()
}

pub(super) fn cmd_timezones(filter: Option<&str>, json: bool) -> Result<()> {
    let host = time::host_timezone();
    let zones = filter_entries(time::timezones(), filter);

    if json {
        return print_json(&TimezonesOutput {
            count: zones.len(),
            host,
            timezones: zones,
        });
    }

    if zones.is_empty() {
        println!("No matching timezones.");
        return Ok(());
    }

    for zone in &zones {
        let marker = if zone.id == host { "*" } else { " " };
        println!("{marker} {:<34}{}", zone.id, zone.label);
    }
    println!();
    println!(
        "{} timezone{} (* = host)",
        zones.len(),
        if zones.len() == 1 { "" } else { "s" }
    );
    Ok(())
}
