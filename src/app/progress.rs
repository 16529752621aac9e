//! Progress overview panel state and refresh logic

use std::sync::{Arc, Mutex};

use eframe::egui;
use tracing::{debug, warn};

use crate::api::{ApiClient, ApiError};
use crate::types::ProgressOverview;

#[derive(Debug, Clone, PartialEq)]
pub enum ProgressState {
    Loading,
    Loaded(ProgressOverview),
    Failed,
}

/// Read-only gamification overview shown in the main window. Fetched once
/// on startup and refreshed after each completed devotion.
pub struct ProgressPanel {
    state: ProgressState,
    generation: u64,
    slot: Arc<Mutex<Vec<(u64, Result<ProgressOverview, ApiError>)>>>,
}

impl ProgressPanel {
    pub fn new() -> Self {
        Self {
            state: ProgressState::Loading,
            generation: 0,
            slot: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn state(&self) -> &ProgressState {
        &self.state
    }

    pub fn refresh(&mut self, api: &ApiClient, runtime: &tokio::runtime::Runtime, ctx: &egui::Context) {
        let generation = self.begin_refresh();

        let api = api.clone();
        let slot = self.slot.clone();
        let ctx = ctx.clone();
        runtime.spawn(async move {
            let result = api.progress().await;
            slot.lock().unwrap().push((generation, result));
            ctx.request_repaint();
        });
    }

    pub fn poll(&mut self) {
        let results: Vec<_> = self.slot.lock().unwrap().drain(..).collect();
        for (generation, result) in results {
            self.apply_result(generation, result);
        }
    }

    fn begin_refresh(&mut self) -> u64 {
        self.generation += 1;
        if !matches!(self.state, ProgressState::Loaded(_)) {
            // First load shows the spinner; refreshes keep the current card
            self.state = ProgressState::Loading;
        }
        self.generation
    }

    fn apply_result(&mut self, generation: u64, result: Result<ProgressOverview, ApiError>) {
        if generation != self.generation {
            debug!(generation, current = self.generation, "Dropping stale progress response");
            return;
        }
        match result {
            Ok(progress) => self.state = ProgressState::Loaded(progress),
            Err(e) => {
                warn!(error = %e, "Progress fetch failed");
                if !matches!(self.state, ProgressState::Loaded(_)) {
                    self.state = ProgressState::Failed;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode_error() -> ApiError {
        serde_json::from_str::<crate::types::DevotionResponse>("{}")
            .unwrap_err()
            .into()
    }

    #[test]
    fn first_failure_shows_error_state() {
        let mut panel = ProgressPanel::new();
        let generation = panel.begin_refresh();
        panel.apply_result(generation, Err(decode_error()));
        assert_eq!(*panel.state(), ProgressState::Failed);
    }

    #[test]
    fn stale_result_is_dropped() {
        let mut panel = ProgressPanel::new();
        let stale = panel.begin_refresh();
        let _current = panel.begin_refresh();
        panel.apply_result(stale, Ok(ProgressOverview::default()));
        assert_eq!(*panel.state(), ProgressState::Loading);
    }

    #[test]
    fn failed_refresh_keeps_previous_data() {
        let mut panel = ProgressPanel::new();
        let generation = panel.begin_refresh();
        let loaded = ProgressOverview {
            level: "Disciple".to_string(),
            xp: 30,
            ..ProgressOverview::default()
        };
        panel.apply_result(generation, Ok(loaded));

        let generation = panel.begin_refresh();
        panel.apply_result(generation, Err(decode_error()));
        match panel.state() {
            ProgressState::Loaded(progress) => assert_eq!(progress.level, "Disciple"),
            other => panic!("expected loaded card, got {other:?}"),
        }
    }
}
