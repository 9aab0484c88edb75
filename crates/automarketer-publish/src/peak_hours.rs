//! Per-platform peak posting hours, persisted as a JSON map.
//!
//! Hours are on the 24-hour UTC clock.

use crate::error::{SchedulerError, SchedulerResult};
use automarketer_core::Platform;
use chrono::{DateTime, Duration as ChronoDuration, NaiveTime, Timelike, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, warn};

/// Hours used for platforms without an entry.
pub const FALLBACK_PEAK_HOURS: [u32; 3] = [9, 12, 18];

fn default_table() -> BTreeMap<String, Vec<u32>> {
    BTreeMap::from([
        ("twitter".to_string(), vec![9, 10, 11, 17, 18, 21]),
        ("linkedin".to_string(), vec![7, 8, 12, 17, 18]),
        ("instagram".to_string(), vec![11, 12, 13, 19, 20, 21]),
        ("facebook".to_string(), vec![9, 13, 16, 19]),
    ])
}

fn normalize(mut hours: Vec<u32>) -> SchedulerResult<Vec<u32>> {
    if let Some(&bad) = hours.iter().find(|&&h| h > 23) {
        return Err(SchedulerError::InvalidHour(bad));
    }
    hours.sort_unstable();
    hours.dedup();
    Ok(hours)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PeakHours {
    table: BTreeMap<String, Vec<u32>>,
}

impl Default for PeakHours {
    fn default() -> Self {
        Self {
            table: default_table(),
        }
    }
}

impl PeakHours {
    /// Read the table at `path`, or the defaults if it is missing or invalid.
    pub fn load(path: &Path) -> Self {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(err) => {
                debug!(path = %path.display(), error = %err, "No peak hours file, using defaults");
                return Self::default();
            }
        };

        let parsed: BTreeMap<String, Vec<u32>> = match serde_json::from_str(&raw) {
            Ok(parsed) => parsed,
            Err(err) => {
                warn!(path = %path.display(), error = %err, "Invalid peak hours file, using defaults");
                return Self::default();
            }
        };

        let mut table = BTreeMap::new();
        for (platform, hours) in parsed {
            match normalize(hours) {
                Ok(hours) => {
                    table.insert(platform.to_lowercase(), hours);
                }
                Err(err) => {
                    warn!(path = %path.display(), %platform, error = %err, "Skipping invalid peak hours entry");
                }
            }
        }
        Self { table }
    }

    pub fn save(&self, path: &Path) -> SchedulerResult<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|e| SchedulerError::Persistence(format!("{}: {e}", parent.display())))?;
        }
        let json = serde_json::to_string_pretty(&self.table)
            .map_err(|e| SchedulerError::Persistence(e.to_string()))?;
        std::fs::write(path, json)
            .map_err(|e| SchedulerError::Persistence(format!("{}: {e}", path.display())))
    }

    /// Replace one platform's hours. Duplicates are dropped and the hours sorted.
    pub fn update(&mut self, platform: &Platform, hours: Vec<u32>) -> SchedulerResult<&[u32]> {
        let hours = normalize(hours)?;
        if hours.is_empty() {
            return Err(SchedulerError::InvalidSchedule(format!(
                "{platform} needs at least one peak hour"
            )));
        }
        let entry = self.table.entry(platform.id().to_lowercase()).or_default();
        *entry = hours;
        Ok(entry.as_slice())
    }

    /// Configured hours, empty for an unknown platform.
    pub fn hours(&self, platform: &Platform) -> &[u32] {
        self.table
            .get(&platform.id().to_lowercase())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn is_peak(&self, platform: &Platform, hour: u32) -> bool {
        self.hours(platform).contains(&hour)
    }

    /// First peak strictly after `hour`, wrapping to the earliest peak.
    pub fn next_peak_hour(&self, platform: &Platform, hour: u32) -> u32 {
        let hours = match self.hours(platform) {
            [] => &FALLBACK_PEAK_HOURS[..],
            hours => hours,
        };
        hours
            .iter()
            .copied()
            .find(|&h| h > hour)
            .unwrap_or(hours[0])
    }

    /// Start of the next peak hour after `now`, rolled to tomorrow when it has passed.
    pub fn next_peak_time(&self, platform: &Platform, now: DateTime<Utc>) -> DateTime<Utc> {
        let hour = self.next_peak_hour(platform, now.hour());
        let time = NaiveTime::from_hms_opt(hour, 0, 0).unwrap_or(NaiveTime::MIN);
        let candidate = now.date_naive().and_time(time).and_utc();
        if candidate <= now {
            candidate + ChronoDuration::days(1)
        } else {
            candidate
        }
    }

    pub fn as_map(&self) -> &BTreeMap<String, Vec<u32>> {
        &self.table
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_defaults() {
        let peaks = PeakHours::default();
        assert_eq!(peaks.hours(&Platform::LinkedIn), &[7, 8, 12, 17, 18]);
        assert!(peaks.is_peak(&Platform::Twitter, 21));
        assert!(!peaks.is_peak(&Platform::Twitter, 22));
        assert!(peaks.hours(&Platform::Email).is_empty());
    }

    #[test]
    fn test_next_peak_hour() {
        let peaks = PeakHours::default();
        assert_eq!(peaks.next_peak_hour(&Platform::Facebook, 10), 13);
        // Strictly after: the current hour does not count.
        assert_eq!(peaks.next_peak_hour(&Platform::Facebook, 13), 16);
        // Wraps to the earliest.
        assert_eq!(peaks.next_peak_hour(&Platform::Facebook, 19), 9);
        // Unknown platforms use the fallback.
        assert_eq!(peaks.next_peak_hour(&Platform::Blog, 12), 18);
        assert_eq!(peaks.next_peak_hour(&Platform::Blog, 20), 9);
    }

    #[test]
    fn test_next_peak_time_rolls_over() {
        let peaks = PeakHours::default();
        let now = Utc.with_ymd_and_hms(2026, 5, 4, 22, 15, 0).unwrap();
        assert_eq!(
            peaks.next_peak_time(&Platform::LinkedIn, now),
            Utc.with_ymd_and_hms(2026, 5, 5, 7, 0, 0).unwrap()
        );

        let morning = Utc.with_ymd_and_hms(2026, 5, 4, 7, 30, 0).unwrap();
        assert_eq!(
            peaks.next_peak_time(&Platform::LinkedIn, morning),
            Utc.with_ymd_and_hms(2026, 5, 4, 8, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_update_dedupes_and_sorts() {
        let mut peaks = PeakHours::default();
        let hours = peaks.update(&Platform::Email, vec![18, 9, 9, 12]).unwrap();
        assert_eq!(hours, &[9, 12, 18]);
        assert!(peaks.is_peak(&Platform::Email, 12));
    }

    #[test]
    fn test_update_rejects_bad_hours() {
        let mut peaks = PeakHours::default();
        assert!(matches!(
            peaks.update(&Platform::Twitter, vec![9, 24]),
            Err(SchedulerError::InvalidHour(24))
        ));
        assert!(peaks.update(&Platform::Twitter, vec![]).is_err());
        assert_eq!(peaks.hours(&Platform::Twitter), &[9, 10, 11, 17, 18, 21]);
    }
}
