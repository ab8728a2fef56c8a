//! Score side-tables.
//!
//! Scores never live in the markup. Each channel maps a node's `NodeId` to an
//! integer; a node is "scored" once it has an entry, and re-scoring only
//! increments. The content channel feeds the text engine, the image channel
//! the image engine, and the image engine reads content scores as one of its
//! inputs.

use std::collections::HashMap;

use dom_query::NodeId;

/// One integer score per node.
#[derive(Debug, Default, Clone)]
pub struct ScoreChannel {
    scores: HashMap<NodeId, i32>,
}

impl ScoreChannel {
    /// Score of `id`, `None` if it was never initialized.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<i32> {
        self.scores.get(&id).copied()
    }

    /// Score of `id`, 0 if it was never initialized.
    #[must_use]
    pub fn value(&self, id: NodeId) -> i32 {
        self.get(id).unwrap_or(0)
    }

    #[must_use]
    pub fn is_scored(&self, id: NodeId) -> bool {
        self.scores.contains_key(&id)
    }

    /// Set the initial score. Returns `false` and leaves the score untouched
    /// if the node was already initialized.
    pub fn init(&mut self, id: NodeId, score: i32) -> bool {
        if self.is_scored(id) {
            return false;
        }
        self.scores.insert(id, score);
        true
    }

    /// Add `delta`, initializing at 0 first if needed.
    pub fn add(&mut self, id: NodeId, delta: i32) {
        *self.scores.entry(id).or_insert(0) += delta;
    }

    /// Multiply by `factor`, truncating toward zero.
    pub fn scale(&mut self, id: NodeId, factor: f64) {
        if let Some(score) = self.scores.get_mut(&id) {
            *score = (f64::from(*score) * factor) as i32;
        }
    }

    /// Whether no node has been scored yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

/// Both score channels for one extraction attempt.
#[derive(Debug, Default, Clone)]
pub struct ScoreTable {
    pub content: ScoreChannel,
    pub image: ScoreChannel,
}

impl ScoreTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}
