//! `playbill-player` — the playback view-state machine.
//!
//! A [`Player`] holds an immutable scenario document and a cursor over
//! its timeline (current step, display mode, incremental-render
//! high-water mark, card-reveal progress). Every view a front end draws
//! is a pure function of that state: the chat transcript, the activity
//! swimlane for the current step, the full sequence table, and the
//! breadcrumb trail. No I/O and no UI toolkit types live in this crate,
//! which is what makes the navigation invariants unit-testable.

pub mod breadcrumb;
pub mod sequence;
pub mod state;
pub mod swimlane;
pub mod transcript;

pub use breadcrumb::Crumb;
pub use sequence::{SequenceCell, SequenceColumn, SequenceRow, SequenceTable};
pub use state::{Mode, Player, RevealState};
pub use swimlane::{ActivityCard, ActivityView, Badge, BadgeKind, STANDING_BY};
pub use transcript::{Fragment, TranscriptLine};
