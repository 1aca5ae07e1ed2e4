//! Sequence-mode render model: the full steps × actors table.

use crate::state::Player;

/// Column header: one declared actor.
#[derive(Debug, Clone, PartialEq)]
pub struct SequenceColumn {
    pub actor_id: String,
    pub name: String,
    pub color: String,
}

/// One cell of a sequence row.
#[derive(Debug, Clone, PartialEq)]
pub struct SequenceCell {
    /// True when the column's actor is active in this step.
    pub active: bool,
    /// Action text for an active actor; an active cell without text
    /// renders a bullet.
    pub text: Option<String>,
}

/// One row of the table: a timeline step across all actor columns.
#[derive(Debug, Clone, PartialEq)]
pub struct SequenceRow {
    pub step_index: usize,
    pub step_number: u32,
    pub phase_id: String,
    /// Row of the player's current step.
    pub current: bool,
    /// Row highlighted by a phase jump in sequence mode.
    pub highlighted: bool,
    pub cells: Vec<SequenceCell>,
    /// Hand-off arrow positions: (from column, to column) for each pair
    /// of consecutive active actors, in hand-off order.
    pub handoffs: Vec<(usize, usize)>,
}

/// The complete sequence table.
#[derive(Debug, Clone, PartialEq)]
pub struct SequenceTable {
    pub columns: Vec<SequenceColumn>,
    pub rows: Vec<SequenceRow>,
}

impl Player {
    /// Build the sequence table, or `None` with no scenario loaded.
    pub fn sequence_table(&self) -> Option<SequenceTable> {
        let scenario = self.scenario()?;
        let highlight = self.sequence_highlight();

        let columns: Vec<SequenceColumn> = scenario
            .actors
            .iter()
            .map(|actor| SequenceColumn {
                actor_id: actor.id.clone(),
                name: actor.name.clone(),
                color: actor.color.clone(),
            })
            .collect();

        let column_of = |actor_id: &str| columns.iter().position(|c| c.actor_id == actor_id);

        let rows = scenario
            .timeline
            .iter()
            .enumerate()
            .map(|(index, step)| {
                let mut cells: Vec<SequenceCell> = columns
                    .iter()
                    .map(|_| SequenceCell { active: false, text: None })
                    .collect();
                let mut handoffs = Vec::new();

                if let Some(lane) = &step.swimlane {
                    for actor_id in &lane.active_actors {
                        if let Some(col) = column_of(actor_id) {
                            cells[col] = SequenceCell {
                                active: true,
                                text: lane.actions.get(actor_id).cloned(),
                            };
                        }
                    }
                    let active_cols: Vec<usize> = lane
                        .active_actors
                        .iter()
                        .filter_map(|id| column_of(id))
                        .collect();
                    handoffs = active_cols.windows(2).map(|w| (w[0], w[1])).collect();
                }

                SequenceRow {
                    step_index: index,
                    step_number: step.step,
                    phase_id: step.phase.clone(),
                    current: index == self.current_step(),
                    highlighted: highlight.is_some_and(|p| p == step.phase),
                    cells,
                    handoffs,
                }
            })
            .collect();

        Some(SequenceTable { columns, rows })
    }
}
