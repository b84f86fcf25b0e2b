use crate::logic::board::{Board, Color, Location};
use serde::{Deserialize, Serialize};
use std::fmt;

pub mod config;
pub mod eval;
pub mod random;
pub mod search;


#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StepKind {
    Simple,
    Jump,
}

/// One atomic transition of a piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Step {
    pub from: Location,
    pub to: Location,
    pub kind: StepKind,
}

impl Step {
    #[must_use]
    pub const fn new(from: Location, to: Location, kind: StepKind) -> Self {
        Self { from, to, kind }
    }

    #[must_use]
    pub const fn is_jump(&self) -> bool {
        matches!(self.kind, StepKind::Jump)
    }

    /// Square of the captured piece, for jumps.
    #[must_use]
    pub const fn captured(&self) -> Option<Location> {
        match self.kind {
            StepKind::Jump => Some(self.from.midpoint(self.to)),
            StepKind::Simple => None,
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let how = match self.kind {
            StepKind::Simple => "move",
            StepKind::Jump => "jump",
        };
        write!(f, "{how} {} -> {}", self.from, self.to)
    }
}

/// Ordered steps, execution order. Either a list of independent candidates
/// (generator output) or a committed path where each step starts where the
/// previous one landed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Action {
    steps: Vec<Step>,
}

impl Action {
    #[must_use]
    pub const fn new() -> Self {
        Self { steps: Vec::new() }
    }

    pub fn push(&mut self, step: Step) {
        self.steps.push(step);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    #[must_use]
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Step> {
        self.steps.iter()
    }

    #[must_use]
    pub fn first(&self) -> Option<&Step> {
        self.steps.first()
    }

    #[must_use]
    pub fn last(&self) -> Option<&Step> {
        self.steps.last()
    }

    /// Squares whose pieces this path removes.
    pub fn captures(&self) -> impl Iterator<Item = Location> + '_ {
        self.steps.iter().filter_map(Step::captured)
    }

    /// True when consecutive steps chain (`steps[i].to == steps[i + 1].from`).
    #[must_use]
    pub fn is_chained(&self) -> bool {
        self.steps.windows(2).all(|w| match w {
            [a, b] => a.to == b.from,
            _ => true,
        })
    }
}

impl From<Vec<Step>> for Action {
    fn from(steps: Vec<Step>) -> Self {
        Self { steps }
    }
}

impl FromIterator<Step> for Action {
    fn from_iter<I: IntoIterator<Item = Step>>(iter: I) -> Self {
        Self {
            steps: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Action {
    type Item = Step;
    type IntoIter = std::vec::IntoIter<Step>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.into_iter()
    }
}

impl<'a> IntoIterator for &'a Action {
    type Item = &'a Step;
    type IntoIter = std::slice::Iter<'a, Step>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, step) in self.steps.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{step}")?;
        }
        Ok(())
    }
}

/// Diagnostics of one top-level search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    /// Max and min node invocations, leaves included.
    pub nodes: u64,
    /// Deepest ply reached, at most the cutoff depth.
    pub max_depth: u8,
    /// Beta cutoffs taken at maximizing nodes.
    pub max_prunings: u64,
    /// Alpha cutoffs taken at minimizing nodes.
    pub min_prunings: u64,
}

impl fmt::Display for SearchStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "max depth: {}, generated nodes: {}, {} prunings take place in max nodes and {} in min nodes",
            self.max_depth, self.nodes, self.max_prunings, self.min_prunings
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Best committed path; `None` when the side to move has nothing to play.
    pub action: Option<Action>,
    pub value: i32,
    pub stats: SearchStats,
}

pub trait Evaluator {
    /// Scores `board` from `perspective`'s point of view.
    fn evaluate(&self, board: &Board, perspective: Color) -> i32;
}

pub trait Searcher {
    fn search(&mut self, board: &Board, color: Color) -> SearchResult;
}
