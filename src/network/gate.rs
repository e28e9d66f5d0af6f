use smallvec::SmallVec;
use std::rc::Rc;

/// Stable index into a [`Network`](super::Network)'s gate arena.
///
/// Indices are recycled through the free list on [`remove_gate`](super::Network::remove_gate),
/// so holding onto one past removal and reusing it is a logic error, not a memory one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GateIndex(pub(crate) usize);

impl GateIndex {
    pub fn index(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for GateIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The three primitive gate kinds the propagator knows how to evaluate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GateKind {
    Tie,
    Switch,
    Nor,
}

impl GateKind {
    /// The lower-case token used both in cookie path segments and in `dump`.
    pub fn name(self) -> &'static str {
        match self {
            GateKind::Tie => "tie",
            GateKind::Switch => "switch",
            GateKind::Nor => "nor",
        }
    }
}

/// Most gates in practice have a handful of edges per side; inline storage avoids
/// a heap allocation for the common case.
pub(crate) const GATE_EDGES_INLINE: usize = 4;

#[derive(Debug, Clone)]
pub(crate) struct GateRecord {
    pub kind: GateKind,
    pub inputs: SmallVec<[GateIndex; GATE_EDGES_INLINE]>,
    pub outputs: SmallVec<[GateIndex; GATE_EDGES_INLINE]>,
    /// Root-relative construction-path provenance, see `crate::cookie`.
    pub cookies: SmallVec<[(GateIndex, Rc<str>); 2]>,
}

impl GateRecord {
    pub fn new(kind: GateKind) -> Self {
        Self {
            kind,
            inputs: SmallVec::new(),
            outputs: SmallVec::new(),
            cookies: SmallVec::new(),
        }
    }
}
