//! Utility functions

use std::path::PathBuf;

/// App data directory (settings, logs)
pub fn get_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("Devotion Companion")
}

/// Human-readable date for the main window header, e.g. "Friday, August 8"
pub fn today_heading() -> String {
    chrono::Local::now().format("%A, %B %-d").to_string()
}

/// Modal title for the server's devotion_type hint
pub fn devotion_title(devotion_type: Option<&str>) -> &'static str {
    match devotion_type {
        Some("morning") => "Morning Devotion",
        Some("evening") => "Evening Devotion",
        _ => "Daily Devotion",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn devotion_title_maps_dayparts() {
        assert_eq!(devotion_title(Some("morning")), "Morning Devotion");
        assert_eq!(devotion_title(Some("evening")), "Evening Devotion");
        assert_eq!(devotion_title(Some("midday")), "Daily Devotion");
        assert_eq!(devotion_title(None), "Daily Devotion");
    }
}
