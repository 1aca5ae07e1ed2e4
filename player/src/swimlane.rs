//! Activity ("swimlane") render model for the current step.

use crate::state::Player;

/// Badge kinds attached to a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeKind {
    Policy,
    Token,
    Handle,
}

impl BadgeKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Policy => "policy",
            Self::Token => "token",
            Self::Handle => "handle",
        }
    }
}

/// A rendering-only annotation badge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Badge {
    pub kind: BadgeKind,
    pub text: String,
}

/// One actor card in the activity pane.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityCard {
    pub actor_id: String,
    pub actor_name: String,
    pub initials: String,
    pub color: String,
    /// Action text; `None` renders the standing-by placeholder.
    pub action: Option<String>,
    /// False while the sequential reveal has not reached this card.
    pub visible: bool,
}

/// Placeholder for active actors without an action entry.
pub const STANDING_BY: &str = "Standing by...";

/// The activity pane for the current step: ordered cards with hand-off
/// arrows drawn between consecutive visible cards.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ActivityView {
    pub cards: Vec<ActivityCard>,
    pub badges: Vec<Badge>,
    /// True while cards are still being revealed one by one.
    pub revealing: bool,
}

impl ActivityView {
    /// Number of hand-off arrows currently drawable (between adjacent
    /// visible cards).
    pub fn visible_arrows(&self) -> usize {
        self.cards
            .iter()
            .filter(|c| c.visible)
            .count()
            .saturating_sub(1)
    }
}

impl Player {
    /// Activity view for the current step, or `None` when the step has
    /// no swimlane (the pane stays empty).
    pub fn activity(&self) -> Option<ActivityView> {
        let scenario = self.scenario()?;
        let step = scenario.timeline.get(self.current_step())?;
        let lane = step.swimlane.as_ref()?;
        let reveal = self.reveal();

        let cards = lane
            .active_actors
            .iter()
            .enumerate()
            .filter_map(|(i, actor_id)| {
                // Actors failing lookup are skipped, matching validation
                // being a load-time concern.
                let actor = scenario.actor(actor_id)?;
                Some(ActivityCard {
                    actor_id: actor.id.clone(),
                    actor_name: actor.name.clone(),
                    initials: crate::transcript::actor_initials(&actor.name),
                    color: actor.color.clone(),
                    action: lane.actions.get(actor_id).cloned(),
                    visible: i < reveal.shown,
                })
            })
            .collect();

        let mut badges = Vec::new();
        if let Some(policy) = &step.policy {
            badges.push(Badge { kind: BadgeKind::Policy, text: policy.clone() });
        }
        if let Some(token) = &step.token {
            badges.push(Badge { kind: BadgeKind::Token, text: token.clone() });
        }
        if let Some(handle) = &step.handle {
            badges.push(Badge { kind: BadgeKind::Handle, text: handle.clone() });
        }

        Some(ActivityView {
            cards,
            badges,
            revealing: reveal.in_progress,
        })
    }
}
