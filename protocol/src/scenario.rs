//! Scenario document model.
//!
//! A scenario is a static, pre-authored JSON document: display metadata,
//! the cast of actors, the phase breakdown, a glossary, and an ordered
//! timeline of steps. Documents are immutable once loaded; the player
//! only ever moves a cursor over them.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A complete scenario document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    pub meta: Meta,
    pub actors: Vec<Actor>,
    pub phases: Vec<Phase>,
    #[serde(default)]
    pub glossary: Glossary,
    pub timeline: Vec<TimelineStep>,
}

/// Display metadata for a scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meta {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// One participant in the narrative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Actor {
    pub id: String,
    pub name: String,
    /// CSS-style color string used for the actor's badge.
    pub color: String,
}

/// A named phase grouping a run of timeline steps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Phase {
    pub id: String,
    pub name: String,
    pub description: String,
}

/// One scripted beat of the narrative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineStep {
    /// 1-based display number.
    pub step: u32,
    /// Id of the phase this step belongs to.
    pub phase: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chat: Option<ChatLine>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub swimlane: Option<Swimlane>,
    /// Badge annotations. Rendering-only; never interpreted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub handle: Option<String>,
}

/// A chat transcript line attached to a step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatLine {
    /// Actor id of the speaker.
    pub actor: String,
    /// Markdown-lite message body (`**bold**`, `*italic*`, newlines).
    pub message: String,
}

/// Per-step actor activity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Swimlane {
    /// Actors active in this step, in hand-off order.
    pub active_actors: Vec<String>,
    /// Actor id → action text. Actors listed in `active_actors` without
    /// an entry here render a standing-by placeholder.
    #[serde(default)]
    pub actions: BTreeMap<String, String>,
}

/// Ordered term → definition list, serialized as a JSON object.
///
/// Authoring order is significant (it decides markup precedence when
/// terms overlap), so this is an entry list rather than a sorted map.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Glossary {
    entries: Vec<(String, String)>,
}

impl Glossary {
    pub fn new(entries: Vec<(String, String)>) -> Self {
        Self { entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Terms in authoring order.
    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(term, _)| term.as_str())
    }

    /// Case-insensitive definition lookup.
    pub fn definition(&self, term: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(t, _)| t.eq_ignore_ascii_case(term))
            .map(|(_, def)| def.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(t, d)| (t.as_str(), d.as_str()))
    }
}

impl Serialize for Glossary {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (term, def) in &self.entries {
            map.serialize_entry(term, def)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Glossary {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct GlossaryVisitor;

        impl<'de> Visitor<'de> for GlossaryVisitor {
            type Value = Glossary;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of glossary terms to definitions")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Glossary, A::Error> {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((term, def)) = access.next_entry::<String, String>()? {
                    entries.push((term, def));
                }
                Ok(Glossary { entries })
            }
        }

        deserializer.deserialize_map(GlossaryVisitor)
    }
}

/// Referential-integrity failure in a scenario document.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ScenarioError {
    #[error("scenario timeline is empty")]
    EmptyTimeline,
    #[error("duplicate actor id `{0}`")]
    DuplicateActor(String),
    #[error("duplicate phase id `{0}`")]
    DuplicatePhase(String),
    #[error("step {step} references unknown phase `{phase}`")]
    UnknownPhase { step: u32, phase: String },
    #[error("step {step} references unknown actor `{actor}`")]
    UnknownActor { step: u32, actor: String },
}

impl Scenario {
    /// Look up an actor by id.
    pub fn actor(&self, id: &str) -> Option<&Actor> {
        self.actors.iter().find(|a| a.id == id)
    }

    /// Look up a phase by id.
    pub fn phase(&self, id: &str) -> Option<&Phase> {
        self.phases.iter().find(|p| p.id == id)
    }

    /// Check referential integrity, reporting the first violation.
    ///
    /// Every phase and actor reference in the timeline must name a
    /// declared phase/actor, ids must be unique, and the timeline must
    /// be non-empty. Badge annotations are free-form and not checked.
    pub fn validate(&self) -> Result<(), ScenarioError> {
        if self.timeline.is_empty() {
            return Err(ScenarioError::EmptyTimeline);
        }
        let mut seen = std::collections::HashSet::new();
        for actor in &self.actors {
            if !seen.insert(actor.id.as_str()) {
                return Err(ScenarioError::DuplicateActor(actor.id.clone()));
            }
        }
        seen.clear();
        for phase in &self.phases {
            if !seen.insert(phase.id.as_str()) {
                return Err(ScenarioError::DuplicatePhase(phase.id.clone()));
            }
        }
        for step in &self.timeline {
            if self.phase(&step.phase).is_none() {
                return Err(ScenarioError::UnknownPhase {
                    step: step.step,
                    phase: step.phase.clone(),
                });
            }
            if let Some(chat) = &step.chat
                && self.actor(&chat.actor).is_none()
            {
                return Err(ScenarioError::UnknownActor {
                    step: step.step,
                    actor: chat.actor.clone(),
                });
            }
            if let Some(lane) = &step.swimlane {
                for id in lane.active_actors.iter().chain(lane.actions.keys()) {
                    if self.actor(id).is_none() {
                        return Err(ScenarioError::UnknownActor {
                            step: step.step,
                            actor: id.clone(),
                        });
                    }
                }
            }
        }
        Ok(())
    }
}
