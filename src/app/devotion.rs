//! Devotion modal controller
//!
//! Owns the modal's presentation state and the two devotion network calls.
//! Requests run on the app's tokio runtime and deposit `(generation, result)`
//! pairs into shared slots; [`DevotionModal::poll`] drains the slots on the
//! UI thread each frame. A result whose generation no longer matches the
//! controller's is dropped without effect, so rapid reopening is
//! last-writer-wins and at most one overlay ever exists.

use std::sync::{Arc, Mutex};

use eframe::egui;
use tracing::{debug, error, info};

use crate::api::{ApiClient, ApiError};
use crate::types::{CompletionResult, DevotionResponse, ModalState};

/// User-facing notification sink. Production shows a blocking dialog;
/// tests inject a recording fake.
pub trait Notifier {
    fn notify(&self, message: &str);
}

/// Blocking message dialog, the desktop counterpart of a browser alert
pub struct DialogNotifier;

impl Notifier for DialogNotifier {
    fn notify(&self, message: &str) {
        rfd::MessageDialog::new()
            .set_title("Devotion Companion")
            .set_description(message)
            .set_buttons(rfd::MessageButtons::Ok)
            .show();
    }
}

type Slot<T> = Arc<Mutex<Vec<T>>>;

pub struct DevotionModal {
    state: ModalState,
    reflection_input: String,
    generation: u64,
    submitting: bool,
    fetch_slot: Slot<(u64, Result<DevotionResponse, ApiError>)>,
    submit_slot: Slot<Result<CompletionResult, ApiError>>,
    notifier: Box<dyn Notifier>,
}

impl DevotionModal {
    pub fn new(notifier: Box<dyn Notifier>) -> Self {
        Self {
            state: ModalState::Closed,
            reflection_input: String::new(),
            generation: 0,
            submitting: false,
            fetch_slot: Arc::new(Mutex::new(Vec::new())),
            submit_slot: Arc::new(Mutex::new(Vec::new())),
            notifier,
        }
    }

    pub fn state(&self) -> &ModalState {
        &self.state
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn reflection_input_mut(&mut self) -> &mut String {
        &mut self.reflection_input
    }

    /// Open the modal and fetch today's devotion. Any previous overlay and
    /// any in-flight fetch are discarded by the generation bump; the loading
    /// placeholder is visible before the request is spawned.
    pub fn open(&mut self, api: &ApiClient, runtime: &tokio::runtime::Runtime, ctx: &egui::Context) {
        let generation = self.begin_open();
        info!(generation, "Opening devotion modal");

        let api = api.clone();
        let slot = self.fetch_slot.clone();
        let ctx = ctx.clone();
        runtime.spawn(async move {
            let result = api.daily_devotion().await;
            slot.lock().unwrap().push((generation, result));
            ctx.request_repaint();
        });
    }

    /// Submit the current reflection. If no pending devotion is on screen
    /// the reflection is submitted as the empty string; this never fails on
    /// a missing input.
    pub fn complete(
        &mut self,
        api: &ApiClient,
        runtime: &tokio::runtime::Runtime,
        ctx: &egui::Context,
    ) {
        let reflection = self.begin_complete();
        info!(chars = reflection.len(), "Submitting devotion completion");

        let api = api.clone();
        let slot = self.submit_slot.clone();
        let ctx = ctx.clone();
        runtime.spawn(async move {
            let result = api.complete_devotion(&reflection).await;
            slot.lock().unwrap().push(result);
            ctx.request_repaint();
        });
    }

    /// Close the overlay. An in-flight request is not cancelled, only its
    /// visible effect: a late fetch result is dropped by the generation
    /// check, a late submit result still notifies.
    pub fn close(&mut self) {
        self.state = ModalState::Closed;
        self.submitting = false;
    }

    /// Drain completed requests. Returns the completion acknowledgement if
    /// a devotion was completed this frame (so the shell can refresh the
    /// progress panel).
    pub fn poll(&mut self) -> Option<CompletionResult> {
        let fetched: Vec<_> = self.fetch_slot.lock().unwrap().drain(..).collect();
        for (generation, result) in fetched {
            self.apply_fetch_result(generation, result);
        }

        let mut completed = None;
        let submitted: Vec<_> = self.submit_slot.lock().unwrap().drain(..).collect();
        for result in submitted {
            if let Some(ack) = self.apply_submit_result(result) {
                completed = Some(ack);
            }
        }
        completed
    }

    // ------------------------------------------------------------------
    // State transitions, free of I/O so they can be driven directly
    // ------------------------------------------------------------------

    fn begin_open(&mut self) -> u64 {
        self.generation += 1;
        self.state = ModalState::Loading;
        self.reflection_input.clear();
        self.submitting = false;
        self.generation
    }

    fn begin_complete(&mut self) -> String {
        let reflection = match &self.state {
            ModalState::Loaded(DevotionResponse::Pending { .. }) => self.reflection_input.clone(),
            _ => String::new(),
        };
        self.submitting = true;
        reflection
    }

    fn apply_fetch_result(&mut self, generation: u64, result: Result<DevotionResponse, ApiError>) {
        if generation != self.generation || self.state != ModalState::Loading {
            // Stale response for an overlay that no longer exists
            debug!(generation, current = self.generation, "Dropping stale devotion response");
            return;
        }
        match result {
            Ok(response) => self.state = ModalState::Loaded(response),
            Err(e) => {
                error!(error = %e, "Devotion fetch failed");
                self.state = ModalState::Failed;
            }
        }
    }

    fn apply_submit_result(
        &mut self,
        result: Result<CompletionResult, ApiError>,
    ) -> Option<CompletionResult> {
        self.submitting = false;
        match result {
            Ok(ack) => {
                let mut message = format!("Devotion completed! +{} XP earned!", ack.xp());
                if let Some(level) = &ack.new_level {
                    message.push_str(&format!("\nLevel: {}", level));
                }
                for badge in &ack.new_badges {
                    message.push_str(&format!("\nNew badge: {}", badge));
                }
                self.notifier.notify(&message);
                // Remove whatever overlay is present, if any
                self.state = ModalState::Closed;
                Some(ack)
            }
            Err(e) => {
                error!(error = %e, "Devotion completion failed");
                self.notifier.notify("Failed to complete devotion. Please try again.");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Devotion;

    struct RecordingNotifier(Arc<Mutex<Vec<String>>>);

    impl Notifier for RecordingNotifier {
        fn notify(&self, message: &str) {
            self.0.lock().unwrap().push(message.to_string());
        }
    }

    fn modal() -> (DevotionModal, Arc<Mutex<Vec<String>>>) {
        let messages = Arc::new(Mutex::new(Vec::new()));
        let modal = DevotionModal::new(Box::new(RecordingNotifier(messages.clone())));
        (modal, messages)
    }

    fn pending_response() -> DevotionResponse {
        DevotionResponse::Pending {
            devotion: Devotion {
                passage: "Psalm 46:10".to_string(),
                text: "Be still, and know that I am God.".to_string(),
                insight: "Stillness before the day begins.".to_string(),
                reflection: "Where do you need stillness?".to_string(),
            },
            current_streak: 3,
            devotion_type: None,
        }
    }

    fn decode_error() -> ApiError {
        serde_json::from_str::<DevotionResponse>("{}").unwrap_err().into()
    }

    #[test]
    fn open_shows_loading_before_any_response() {
        let (mut modal, _) = modal();
        modal.begin_open();
        assert_eq!(*modal.state(), ModalState::Loading);
    }

    #[test]
    fn reopening_discards_previous_overlay() {
        let (mut modal, _) = modal();
        let first = modal.begin_open();
        let second = modal.begin_open();
        assert_ne!(first, second);

        // The first request's response arrives after the reopen: dropped
        modal.apply_fetch_result(first, Ok(pending_response()));
        assert_eq!(*modal.state(), ModalState::Loading);

        modal.apply_fetch_result(second, Ok(pending_response()));
        assert!(matches!(modal.state(), ModalState::Loaded(_)));
    }

    #[test]
    fn stale_response_after_close_is_dropped() {
        let (mut modal, _) = modal();
        let generation = modal.begin_open();
        modal.close();
        modal.apply_fetch_result(generation, Ok(pending_response()));
        assert_eq!(*modal.state(), ModalState::Closed);
    }

    #[test]
    fn fetch_failure_is_terminal() {
        let (mut modal, _) = modal();
        let generation = modal.begin_open();
        modal.apply_fetch_result(generation, Err(decode_error()));
        assert_eq!(*modal.state(), ModalState::Failed);
    }

    #[test]
    fn already_completed_keeps_message_and_streak_verbatim() {
        let (mut modal, _) = modal();
        let generation = modal.begin_open();
        modal.apply_fetch_result(
            generation,
            Ok(DevotionResponse::AlreadyCompleted {
                message: "Come back tomorrow morning.".to_string(),
                streak: 7,
                devotion_type: None,
            }),
        );
        match modal.state() {
            ModalState::Loaded(DevotionResponse::AlreadyCompleted { message, streak, .. }) => {
                assert_eq!(message, "Come back tomorrow morning.");
                assert_eq!(*streak, 7);
            }
            other => panic!("unexpected state {other:?}"),
        }
    }

    #[test]
    fn reflection_starts_empty_and_is_sent_as_typed() {
        let (mut modal, _) = modal();
        let generation = modal.begin_open();
        modal.apply_fetch_result(generation, Ok(pending_response()));
        assert!(modal.reflection_input_mut().is_empty());

        modal.reflection_input_mut().push_str("Grateful for quiet mornings.");
        assert_eq!(modal.begin_complete(), "Grateful for quiet mornings.");
    }

    #[test]
    fn empty_reflection_is_permitted() {
        let (mut modal, _) = modal();
        let generation = modal.begin_open();
        modal.apply_fetch_result(generation, Ok(pending_response()));
        assert_eq!(modal.begin_complete(), "");
    }

    #[test]
    fn complete_without_pending_devotion_submits_empty_string() {
        let (mut modal, _) = modal();
        assert_eq!(modal.begin_complete(), "");

        let generation = modal.begin_open();
        modal.apply_fetch_result(generation, Err(decode_error()));
        modal.reflection_input_mut().push_str("typed into nothing");
        assert_eq!(modal.begin_complete(), "");
    }

    #[test]
    fn submit_success_notifies_with_xp_and_closes() {
        let (mut modal, messages) = modal();
        let generation = modal.begin_open();
        modal.apply_fetch_result(generation, Ok(pending_response()));

        modal.begin_complete();
        let ack = modal.apply_submit_result(Ok(CompletionResult {
            xp_earned: Some(5),
            ..CompletionResult::default()
        }));
        assert!(ack.is_some());
        assert_eq!(*modal.state(), ModalState::Closed);

        let messages = messages.lock().unwrap();
        assert_eq!(messages.len(), 1);
        assert!(messages[0].contains("+5 XP"));
    }

    #[test]
    fn submit_success_defaults_to_two_xp() {
        let (mut modal, messages) = modal();
        modal.begin_complete();
        modal.apply_submit_result(Ok(CompletionResult::default()));
        assert!(messages.lock().unwrap()[0].contains("+2 XP"));
    }

    #[test]
    fn submit_failure_notifies_and_leaves_overlay_in_place() {
        let (mut modal, messages) = modal();
        let generation = modal.begin_open();
        modal.apply_fetch_result(generation, Ok(pending_response()));

        modal.begin_complete();
        let ack = modal.apply_submit_result(Err(decode_error()));
        assert!(ack.is_none());
        assert!(matches!(modal.state(), ModalState::Loaded(_)));
        assert!(!modal.is_submitting());
        assert!(messages.lock().unwrap()[0].contains("Failed to complete"));
    }

    #[test]
    fn submit_result_after_manual_close_still_notifies() {
        let (mut modal, messages) = modal();
        let generation = modal.begin_open();
        modal.apply_fetch_result(generation, Ok(pending_response()));
        modal.begin_complete();
        modal.close();

        modal.apply_submit_result(Ok(CompletionResult::default()));
        assert_eq!(messages.lock().unwrap().len(), 1);
        assert_eq!(*modal.state(), ModalState::Closed);
    }

    #[test]
    fn poll_drains_slots_in_order() {
        let (mut modal, _) = modal();
        let stale = modal.begin_open();
        let current = modal.begin_open();
        {
            let mut slot = modal.fetch_slot.lock().unwrap();
            slot.push((stale, Ok(pending_response())));
            slot.push((current, Ok(pending_response())));
        }
        assert!(modal.poll().is_none());
        assert!(matches!(modal.state(), ModalState::Loaded(_)));
    }

    #[test]
    fn poll_reports_completion_acknowledgement() {
        let (mut modal, _) = modal();
        let generation = modal.begin_open();
        modal.apply_fetch_result(generation, Ok(pending_response()));
        modal.begin_complete();
        modal
            .submit_slot
            .lock()
            .unwrap()
            .push(Ok(CompletionResult { xp_earned: Some(2), ..CompletionResult::default() }));

        let ack = modal.poll().expect("completion should surface");
        assert_eq!(ack.xp(), 2);
    }
}
