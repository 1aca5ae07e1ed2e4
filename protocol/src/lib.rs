//! `playbill-protocol` — wire and document types for the walkthrough player.
//!
//! Everything that crosses a process boundary lives here: the scenario
//! document format (authored JSON consumed by both the server and the
//! terminal front end), the scenario index, and the login/logout API
//! bodies. Field names are camelCase on the wire.

pub mod api;
pub mod scenario;

pub use api::{ErrorBody, LoginRequest, LoginResponse, LogoutResponse, ScenarioIndex, ScenarioSummary};
pub use scenario::{
    Actor, ChatLine, Glossary, Meta, Phase, Scenario, ScenarioError, Swimlane, TimelineStep,
};
