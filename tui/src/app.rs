//! Application state and key handling, kept free of rendering so the
//! interaction rules are testable without a terminal.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use playbill_player::{Mode, Player};

use crate::source::LoadedScenario;

/// Which top-level screen is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Scenario picker, shown until a scenario is chosen.
    Welcome,
    /// A scenario is loaded and the player drives the panes.
    Playing,
}

pub struct App {
    scenarios: Vec<LoadedScenario>,
    player: Player,
    screen: Screen,
    active: Option<usize>,
    glossary_open: bool,
    glossary_cursor: usize,
    quit: bool,
}

impl App {
    pub fn new(scenarios: Vec<LoadedScenario>) -> Self {
        Self {
            scenarios,
            player: Player::new(),
            screen: Screen::Welcome,
            active: None,
            glossary_open: false,
            glossary_cursor: 0,
            quit: false,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn scenarios(&self) -> &[LoadedScenario] {
        &self.scenarios
    }

    pub fn active_title(&self) -> Option<&str> {
        self.active
            .and_then(|i| self.scenarios.get(i))
            .map(|l| l.summary.title.as_str())
    }

    pub fn glossary_open(&self) -> bool {
        self.glossary_open
    }

    pub fn glossary_cursor(&self) -> usize {
        self.glossary_cursor
    }

    /// Select a scenario by catalogue position. Out-of-range selections
    /// reset to the welcome state, mirroring an unknown id.
    pub fn select_scenario(&mut self, index: usize) {
        let Some(entry) = self.scenarios.get(index) else {
            self.player.unload();
            self.active = None;
            self.screen = Screen::Welcome;
            return;
        };
        // Documents were validated at load time; a failure here means
        // the fixture changed under us, and welcome is the safe state.
        if self.player.load(entry.scenario.clone()).is_err() {
            self.active = None;
            self.screen = Screen::Welcome;
            return;
        }
        self.active = Some(index);
        self.screen = Screen::Playing;
        self.glossary_open = false;
        self.glossary_cursor = 0;
    }

    pub fn on_tick(&mut self) {
        self.player.tick_reveal();
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind == KeyEventKind::Release {
            return;
        }
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.quit = true;
            return;
        }

        if self.glossary_open {
            self.handle_glossary_key(key.code);
            return;
        }
        match self.screen {
            Screen::Welcome => self.handle_welcome_key(key.code),
            Screen::Playing => self.handle_playing_key(key.code),
        }
    }

    fn handle_welcome_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => self.quit = true,
            KeyCode::Char(c @ '1'..='9') => {
                let index = (c as usize) - ('1' as usize);
                self.select_scenario(index);
            }
            _ => {}
        }
    }

    fn handle_playing_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') => self.quit = true,
            KeyCode::Esc => {
                // Back to the picker.
                self.player.unload();
                self.active = None;
                self.screen = Screen::Welcome;
            }
            KeyCode::Right | KeyCode::Char(' ') => self.player.next_step(),
            KeyCode::Left => self.player.prev_step(),
            KeyCode::Char('s') => match self.player.mode() {
                Mode::Executive => self.player.switch_to_sequence(),
                Mode::Sequence => self.player.switch_to_executive(),
            },
            KeyCode::Char('g') => {
                let has_terms = self
                    .player
                    .scenario()
                    .is_some_and(|s| !s.glossary.is_empty());
                if has_terms {
                    self.glossary_open = true;
                    self.glossary_cursor = 0;
                }
            }
            KeyCode::Char(c @ '1'..='9') => {
                let index = (c as usize) - ('1' as usize);
                let phase_id = self
                    .player
                    .scenario()
                    .and_then(|s| s.phases.get(index))
                    .map(|p| p.id.clone());
                if let Some(phase_id) = phase_id {
                    match self.player.mode() {
                        Mode::Executive => {
                            self.player.jump_to_phase(&phase_id);
                        }
                        Mode::Sequence => self.player.highlight_phase(&phase_id),
                    }
                }
            }
            _ => {}
        }
    }

    fn handle_glossary_key(&mut self, code: KeyCode) {
        let term_count = self
            .player
            .scenario()
            .map_or(0, |s| s.glossary.len());
        match code {
            KeyCode::Esc | KeyCode::Char('g') | KeyCode::Char('q') => self.glossary_open = false,
            KeyCode::Up => self.glossary_cursor = self.glossary_cursor.saturating_sub(1),
            KeyCode::Down => {
                if self.glossary_cursor + 1 < term_count {
                    self.glossary_cursor += 1;
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use playbill_protocol::{Scenario, ScenarioSummary};
    use pretty_assertions::assert_eq;

    fn fixture() -> Vec<LoadedScenario> {
        let scenario: Scenario = serde_json::from_str(
            r##"{
              "meta": { "title": "Claims walkthrough" },
              "actors": [{ "id": "customer", "name": "Pat Doe", "color": "#3b82f6" }],
              "phases": [
                { "id": "report", "name": "Report", "description": "d" },
                { "id": "triage", "name": "Triage", "description": "d" }
              ],
              "glossary": { "FNOL": "First notice of loss" },
              "timeline": [
                { "step": 1, "phase": "report", "chat": { "actor": "customer", "message": "Hi" } },
                { "step": 2, "phase": "triage" }
              ]
            }"##,
        )
        .unwrap();
        vec![LoadedScenario {
            summary: ScenarioSummary {
                id: "claims".to_string(),
                title: "Claims walkthrough".to_string(),
                description: None,
            },
            scenario,
        }]
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn digit_selects_scenario_and_enters_playing() {
        let mut app = App::new(fixture());
        press(&mut app, KeyCode::Char('1'));
        assert_eq!(app.screen(), Screen::Playing);
        assert_eq!(app.active_title(), Some("Claims walkthrough"));
        assert!(app.player().is_loaded());
    }

    #[test]
    fn unknown_selection_stays_on_welcome() {
        let mut app = App::new(fixture());
        press(&mut app, KeyCode::Char('9'));
        assert_eq!(app.screen(), Screen::Welcome);
        assert!(!app.player().is_loaded());
    }

    #[test]
    fn arrows_navigate_and_stay_in_bounds() {
        let mut app = App::new(fixture());
        press(&mut app, KeyCode::Char('1'));
        press(&mut app, KeyCode::Right);
        assert_eq!(app.player().current_step(), 1);
        press(&mut app, KeyCode::Right);
        assert_eq!(app.player().current_step(), 1, "clamped at the end");
        press(&mut app, KeyCode::Left);
        press(&mut app, KeyCode::Left);
        assert_eq!(app.player().current_step(), 0);
    }

    #[test]
    fn s_toggles_sequence_mode_and_freezes_navigation() {
        let mut app = App::new(fixture());
        press(&mut app, KeyCode::Char('1'));
        press(&mut app, KeyCode::Char('s'));
        assert_eq!(app.player().mode(), Mode::Sequence);
        press(&mut app, KeyCode::Right);
        assert_eq!(app.player().current_step(), 0);
        press(&mut app, KeyCode::Char('s'));
        assert_eq!(app.player().mode(), Mode::Executive);
    }

    #[test]
    fn escape_returns_to_welcome_and_unloads() {
        let mut app = App::new(fixture());
        press(&mut app, KeyCode::Char('1'));
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.screen(), Screen::Welcome);
        assert!(!app.player().is_loaded());
    }

    #[test]
    fn glossary_overlay_opens_and_captures_keys() {
        let mut app = App::new(fixture());
        press(&mut app, KeyCode::Char('1'));
        press(&mut app, KeyCode::Char('g'));
        assert!(app.glossary_open());
        press(&mut app, KeyCode::Right);
        assert_eq!(app.player().current_step(), 0, "overlay swallows navigation");
        press(&mut app, KeyCode::Esc);
        assert!(!app.glossary_open());
    }

    #[test]
    fn digits_jump_to_phases_while_playing() {
        let mut app = App::new(fixture());
        press(&mut app, KeyCode::Char('1'));
        press(&mut app, KeyCode::Char('2'));
        assert_eq!(app.player().current_step(), 1, "jumped to first triage step");
    }

    #[test]
    fn q_quits_from_any_screen() {
        let mut app = App::new(fixture());
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit());
    }
}
