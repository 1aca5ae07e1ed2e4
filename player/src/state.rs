//! Core view-state: step cursor, display mode, reveal bookkeeping.

use playbill_protocol::{Scenario, ScenarioError};

/// Which of the two dependent view trees is visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Step-by-step chat + activity view; navigation is live.
    #[default]
    Executive,
    /// Full tabular view of all steps at once; navigation is frozen.
    Sequence,
}

/// Progress of the sequential card reveal in the activity pane.
///
/// The browser original animated activity cards in one by one; here the
/// same effect is a discrete counter the front end advances on its tick.
/// Navigation re-triggered mid-reveal completes the reveal first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RevealState {
    /// Number of cards currently visible.
    pub shown: usize,
    /// Total cards for the current step.
    pub total: usize,
    /// True while `shown < total`.
    pub in_progress: bool,
}

impl RevealState {
    fn start(total: usize) -> Self {
        Self {
            shown: usize::from(total > 0),
            total,
            in_progress: total > 1,
        }
    }

    fn complete(total: usize) -> Self {
        Self {
            shown: total,
            total,
            in_progress: false,
        }
    }
}

/// The playback controller.
///
/// Invariant: whenever a scenario is loaded,
/// `current_step < scenario.timeline.len()`.
#[derive(Debug, Default)]
pub struct Player {
    scenario: Option<Scenario>,
    current_step: usize,
    mode: Mode,
    /// High-water mark of visited step indices, for marking transcript
    /// lines the viewer has not seen before.
    rendered_until: usize,
    reveal: RevealState,
    /// Phase highlighted in sequence mode, if any.
    sequence_highlight: Option<String>,
}

impl Player {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a scenario and reset to step 0 in executive mode.
    ///
    /// An invalid document is refused and leaves the player in the
    /// welcome state, mirroring the unknown-id path.
    pub fn load(&mut self, scenario: Scenario) -> Result<(), ScenarioError> {
        if let Err(err) = scenario.validate() {
            self.unload();
            return Err(err);
        }
        self.scenario = Some(scenario);
        self.current_step = 0;
        self.mode = Mode::Executive;
        self.rendered_until = 0;
        self.sequence_highlight = None;
        self.reveal = RevealState::start(self.cards_at(0));
        Ok(())
    }

    /// Drop the scenario and return to the welcome state.
    pub fn unload(&mut self) {
        *self = Self::default();
    }

    pub fn scenario(&self) -> Option<&Scenario> {
        self.scenario.as_ref()
    }

    pub fn is_loaded(&self) -> bool {
        self.scenario.is_some()
    }

    pub fn current_step(&self) -> usize {
        self.current_step
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn rendered_until(&self) -> usize {
        self.rendered_until
    }

    pub fn reveal(&self) -> RevealState {
        self.reveal
    }

    pub fn sequence_highlight(&self) -> Option<&str> {
        self.sequence_highlight.as_deref()
    }

    fn timeline_len(&self) -> usize {
        self.scenario.as_ref().map_or(0, |s| s.timeline.len())
    }

    fn cards_at(&self, step: usize) -> usize {
        self.scenario
            .as_ref()
            .and_then(|s| s.timeline.get(step))
            .and_then(|step| step.swimlane.as_ref())
            .map_or(0, |lane| lane.active_actors.len())
    }

    pub fn can_go_next(&self) -> bool {
        self.is_loaded()
            && self.mode == Mode::Executive
            && self.current_step + 1 < self.timeline_len()
    }

    pub fn can_go_prev(&self) -> bool {
        self.is_loaded() && self.mode == Mode::Executive && self.current_step > 0
    }

    /// Advance one step. No-op at the end, in sequence mode, or with no
    /// scenario loaded.
    pub fn next_step(&mut self) {
        if !self.can_go_next() {
            return;
        }
        self.skip_reveal();
        self.current_step += 1;
        self.rendered_until = self.rendered_until.max(self.current_step);
        self.reveal = RevealState::start(self.cards_at(self.current_step));
    }

    /// Go back one step. No-op at the start, in sequence mode, or with
    /// no scenario loaded.
    pub fn prev_step(&mut self) {
        if !self.can_go_prev() {
            return;
        }
        self.skip_reveal();
        self.current_step -= 1;
        self.reveal = RevealState::start(self.cards_at(self.current_step));
    }

    /// Seek to the first step of a phase. Executive mode only; returns
    /// whether the cursor moved.
    pub fn jump_to_phase(&mut self, phase_id: &str) -> bool {
        if !self.is_loaded() || self.mode != Mode::Executive {
            return false;
        }
        let Some(target) = self
            .scenario
            .as_ref()
            .and_then(|s| s.timeline.iter().position(|step| step.phase == phase_id))
        else {
            return false;
        };
        self.skip_reveal();
        self.current_step = target;
        self.rendered_until = self.rendered_until.max(self.current_step);
        self.reveal = RevealState::start(self.cards_at(self.current_step));
        true
    }

    /// Highlight a phase's rows in sequence mode (no cursor movement).
    pub fn highlight_phase(&mut self, phase_id: &str) {
        if self.mode == Mode::Sequence
            && self
                .scenario
                .as_ref()
                .is_some_and(|s| s.phase(phase_id).is_some())
        {
            self.sequence_highlight = Some(phase_id.to_string());
        }
    }

    pub fn switch_to_sequence(&mut self) {
        if !self.is_loaded() {
            return;
        }
        self.skip_reveal();
        self.mode = Mode::Sequence;
    }

    pub fn switch_to_executive(&mut self) {
        if !self.is_loaded() {
            return;
        }
        self.mode = Mode::Executive;
        self.sequence_highlight = None;
        self.reveal = RevealState::complete(self.cards_at(self.current_step));
    }

    /// Advance the card reveal by one; called from the front end's tick.
    pub fn tick_reveal(&mut self) {
        if !self.reveal.in_progress {
            return;
        }
        self.reveal.shown += 1;
        if self.reveal.shown >= self.reveal.total {
            self.reveal = RevealState::complete(self.reveal.total);
        }
    }

    /// Discard an in-flight reveal, showing all cards at once.
    pub fn skip_reveal(&mut self) {
        if self.reveal.in_progress {
            self.reveal = RevealState::complete(self.reveal.total);
        }
    }

    /// Definition lookup for the glossary overlay.
    pub fn glossary_definition(&self, term: &str) -> Option<&str> {
        self.scenario.as_ref()?.glossary.definition(term)
    }
}
