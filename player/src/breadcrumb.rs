//! Breadcrumb trail over the scenario's phases.
//!
//! Executive mode shows a progressive trail: only phases the viewer has
//! reached so far, with the current phase marked. Sequence mode shows
//! the full trail with every phase linkable.

use std::collections::HashSet;

use crate::state::{Mode, Player};

/// One breadcrumb entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Crumb {
    pub phase_id: String,
    pub name: String,
    /// Shown as a tooltip/hint by front ends.
    pub description: String,
    /// Phase of the current step (executive mode only).
    pub current: bool,
    /// Whether activating this crumb jumps/highlights.
    pub linkable: bool,
}

impl Player {
    /// The trail appropriate for the current mode.
    pub fn breadcrumb(&self) -> Vec<Crumb> {
        let Some(scenario) = self.scenario() else {
            return Vec::new();
        };
        match self.mode() {
            Mode::Executive => {
                let reached: HashSet<&str> = scenario
                    .timeline
                    .iter()
                    .take(self.current_step() + 1)
                    .map(|step| step.phase.as_str())
                    .collect();
                let current_phase = scenario
                    .timeline
                    .get(self.current_step())
                    .map(|step| step.phase.as_str());

                scenario
                    .phases
                    .iter()
                    .filter(|phase| reached.contains(phase.id.as_str()))
                    .map(|phase| {
                        let current = Some(phase.id.as_str()) == current_phase;
                        Crumb {
                            phase_id: phase.id.clone(),
                            name: phase.name.clone(),
                            description: phase.description.clone(),
                            current,
                            linkable: !current,
                        }
                    })
                    .collect()
            }
            Mode::Sequence => scenario
                .phases
                .iter()
                .map(|phase| Crumb {
                    phase_id: phase.id.clone(),
                    name: phase.name.clone(),
                    description: phase.description.clone(),
                    current: false,
                    linkable: true,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::tests::fixture;
    use pretty_assertions::assert_eq;

    #[test]
    fn progressive_trail_grows_with_the_cursor() {
        let mut player = Player::new();
        player.load(fixture()).unwrap();

        let trail = player.breadcrumb();
        assert_eq!(trail.len(), 1);
        assert_eq!(trail[0].phase_id, "report");
        assert!(trail[0].current);
        assert!(!trail[0].linkable);

        player.next_step();
        player.next_step(); // into the triage phase
        let trail = player.breadcrumb();
        assert_eq!(trail.len(), 2);
        assert!(trail[0].linkable, "earlier phases become jump links");
        assert!(trail[1].current);
    }

    #[test]
    fn sequence_trail_lists_every_phase_linkable() {
        let mut player = Player::new();
        player.load(fixture()).unwrap();
        player.switch_to_sequence();
        let trail = player.breadcrumb();
        assert_eq!(trail.len(), 2);
        assert!(trail.iter().all(|c| c.linkable && !c.current));
    }

    #[test]
    fn welcome_state_has_no_trail() {
        let player = Player::new();
        assert!(player.breadcrumb().is_empty());
    }
}
