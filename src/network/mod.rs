//! The gate arena and the fixed-point NOR propagator that drives it.
//!
//! A [`Network`] is the single mutable store for a circuit: every gate, its
//! current boolean value, and the set of gates still waiting to be
//! re-evaluated. Nothing else in this crate owns gate storage; the façade in
//! [`crate::facade`] only ever holds `(Network, GateIndex)` handles.

mod gate;
mod slab;

pub use gate::{GateIndex, GateKind};

use gate::{GateRecord, GATE_EDGES_INLINE};
use indexmap::IndexSet;
use slab::Slab;
use smallvec::SmallVec;
use std::collections::BTreeMap;
use std::rc::Rc;

struct WatchEntry {
    name: String,
    index: GateIndex,
    negate: bool,
}

/// Snapshot returned by [`Network::get_stats`].
#[derive(Debug, Clone, Default)]
pub struct Stats {
    /// The arena's high-water mark (live gates plus recycled-but-unused
    /// slots), matching [`Network::get_size`] — not just the live count.
    pub total_size: usize,
    pub by_kind: BTreeMap<GateKind, usize>,
    pub by_kind_fan_in: BTreeMap<(GateKind, usize), usize>,
}

#[derive(Debug, Default)]
pub struct Network {
    gates: Slab<GateRecord>,
    values: Vec<bool>,
    pending: IndexSet<GateIndex>,
    watches: Vec<WatchEntry>,
    log: Vec<Vec<bool>>,
}

impl std::fmt::Debug for WatchEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WatchEntry")
            .field("name", &self.name)
            .field("index", &self.index)
            .field("negate", &self.negate)
            .finish()
    }
}

impl Network {
    pub fn new() -> Self {
        Self {
            gates: Slab::new(),
            values: Vec::new(),
            pending: IndexSet::new(),
            watches: Vec::new(),
            log: Vec::new(),
        }
    }

    fn initial_value(kind: GateKind) -> bool {
        matches!(kind, GateKind::Nor)
    }

    fn gate(&self, index: GateIndex) -> &GateRecord {
        self.gates
            .get(index.0)
            .unwrap_or_else(|| panic!("use of dead or out-of-range gate {}", index))
    }

    fn gate_mut(&mut self, index: GateIndex) -> &mut GateRecord {
        self.gates
            .get_mut(index.0)
            .unwrap_or_else(|| panic!("use of dead or out-of-range gate {}", index))
    }

    pub fn is_live(&self, index: GateIndex) -> bool {
        self.gates.get(index.0).is_some()
    }

    /// Allocates (or reclaims from the free list) a gate of `kind`, with an
    /// empty cookie set and the identity initial value for its kind.
    pub fn add_gate(&mut self, kind: GateKind) -> GateIndex {
        let slot = self.gates.insert(GateRecord::new(kind));
        if slot == self.values.len() {
            self.values.push(Self::initial_value(kind));
        } else {
            self.values[slot] = Self::initial_value(kind);
        }
        GateIndex(slot)
    }

    /// Fails if `index` still has any fan-in or fan-out.
    pub fn remove_gate(&mut self, index: GateIndex) {
        {
            let record = self.gate(index);
            assert!(
                record.inputs.is_empty() && record.outputs.is_empty(),
                "remove_gate({}): gate still has {} input edge(s) and {} output edge(s)",
                index,
                record.inputs.len(),
                record.outputs.len()
            );
        }
        self.gates.remove(index.0);
        self.pending.shift_remove(&index);
    }

    /// Fails if `dst` is not a nor gate. Multiplicity is preserved on both sides.
    pub fn add_link(&mut self, src: GateIndex, dst: GateIndex) {
        assert!(self.is_live(src), "add_link: source {} is not live", src);
        assert_eq!(
            self.gate(dst).kind,
            GateKind::Nor,
            "add_link: destination {} is not a nor gate, only nor gates may have fan-in",
            dst
        );
        self.gate_mut(dst).inputs.push(src);
        self.gate_mut(src).outputs.push(dst);
        self.pending.insert(dst);
    }

    /// Removes exactly one instance of the edge `(src, dst)`. Fails if no such edge exists.
    pub fn remove_link(&mut self, src: GateIndex, dst: GateIndex) {
        remove_one(&mut self.gate_mut(dst).inputs, src, "input", dst);
        remove_one(&mut self.gate_mut(src).outputs, dst, "output", src);
        self.pending.insert(dst);
    }

    pub fn read(&self, index: GateIndex) -> bool {
        assert!(self.is_live(index), "read: {} is not live", index);
        self.values[index.0]
    }

    /// Writes permitted on any kind, including nor (used to force initial
    /// conditions when closing a feedback loop).
    pub fn write(&mut self, index: GateIndex, value: bool) {
        assert!(self.is_live(index), "write: {} is not live", index);
        if self.values[index.0] == value {
            return;
        }
        self.values[index.0] = value;
        for out in self.gate(index).outputs.clone() {
            self.pending.insert(out);
        }
    }

    /// One synchronous round: every currently pending gate is re-evaluated
    /// against the value table as it stood when `step` was called, never
    /// against values changed earlier in this same round. Returns whether
    /// more work remains.
    pub fn step(&mut self) -> bool {
        let batch: Vec<GateIndex> = self.pending.drain(..).collect();
        let mut next = IndexSet::new();
        for idx in batch {
            let new_value = {
                let record = self.gate(idx);
                assert_eq!(
                    record.kind,
                    GateKind::Nor,
                    "step: {} is pending but is not a nor gate",
                    idx
                );
                !record.inputs.iter().any(|i| self.values[i.0])
            };
            if new_value != self.values[idx.0] {
                self.values[idx.0] = new_value;
                for out in self.gate(idx).outputs.clone() {
                    next.insert(out);
                }
            }
        }
        self.pending = next;
        !self.pending.is_empty()
    }

    /// Steps until the pending set is empty. Returns 0 if it was already
    /// empty on entry; unbounded otherwise — an astable network never
    /// returns, which is the caller's responsibility to avoid.
    pub fn drain(&mut self) -> usize {
        if self.pending.is_empty() {
            return 0;
        }
        let mut steps = 0;
        loop {
            steps += 1;
            if !self.step() {
                break;
            }
        }
        steps
    }

    /// Registers an output channel; `negate == false` logs `NOT value(index)`,
    /// `negate == true` logs `value(index)` as-is. Fails if any log row has
    /// already been recorded.
    pub fn watch(&mut self, index: GateIndex, name: impl Into<String>, negate: bool) {
        assert!(
            self.log.is_empty(),
            "watch: cannot register a new watch after record_log has been called"
        );
        self.watches.push(WatchEntry {
            name: name.into(),
            index,
            negate,
        });
    }

    /// Samples every watch; the row is only kept if it differs from the last one kept.
    pub fn record_log(&mut self) {
        let row: Vec<bool> = self
            .watches
            .iter()
            .map(|w| self.read(w.index) ^ !w.negate)
            .collect();
        if self.log.last() != Some(&row) {
            self.log.push(row);
        }
    }

    /// One line per watch: `<name padded to max width> <bitstring>`, columns
    /// in sample order, a blank line at the end.
    pub fn print_log(&self) -> String {
        let width = self.watches.iter().map(|w| w.name.len()).max().unwrap_or(0);
        let mut out = String::new();
        for (i, w) in self.watches.iter().enumerate() {
            let bits: String = self
                .log
                .iter()
                .map(|row| if row[i] { '1' } else { '0' })
                .collect();
            out.push_str(&format!("{:width$} {}\n", w.name, bits, width = width));
        }
        out.push('\n');
        out
    }

    pub fn get_stats(&self) -> Stats {
        let mut by_kind = BTreeMap::new();
        let mut by_kind_fan_in = BTreeMap::new();
        for (_, g) in self.gates.iter() {
            *by_kind.entry(g.kind).or_insert(0) += 1;
            *by_kind_fan_in.entry((g.kind, g.inputs.len())).or_insert(0) += 1;
        }
        Stats {
            total_size: self.gates.total_len(),
            by_kind,
            by_kind_fan_in,
        }
    }

    /// Live gate count plus recycled-but-unused slots — the arena's high-water mark.
    pub fn get_size(&self) -> usize {
        self.gates.total_len()
    }

    pub fn dump(&self) -> String {
        let mut out = String::new();
        for (i, g) in self.gates.iter() {
            out.push_str(&format!(
                "{:>6} {:<6} value={:<5} inputs={:?} outputs={:?} cookies={}\n",
                i,
                g.kind.name(),
                self.values[i],
                g.inputs.iter().map(|x| x.0).collect::<Vec<_>>(),
                g.outputs.iter().map(|x| x.0).collect::<Vec<_>>(),
                g.cookies.len(),
            ));
        }
        out
    }

    /// Appends one glyph byte per live gate (in index order) after `prefix`,
    /// selected by kind and current value. The only surface meant for a
    /// pixel-pushing front-end; it carries no gate internals back out.
    pub fn dump_values(
        &self,
        prefix: &[u8],
        nor_low: u8,
        nor_high: u8,
        other_low: u8,
        other_high: u8,
    ) -> Vec<u8> {
        let mut buf = Vec::with_capacity(prefix.len() + self.gates.len());
        buf.extend_from_slice(prefix);
        for (i, g) in self.gates.iter() {
            let value = self.values[i];
            let glyph = match (g.kind, value) {
                (GateKind::Nor, true) => nor_high,
                (GateKind::Nor, false) => nor_low,
                (_, true) => other_high,
                (_, false) => other_low,
            };
            buf.push(glyph);
        }
        buf
    }

    // --- cookie-layer accessors, used only by `crate::cookie` -------------

    pub(crate) fn cookies_of(&self, index: GateIndex) -> SmallVec<[(GateIndex, Rc<str>); 2]> {
        self.gate(index).cookies.clone()
    }

    pub(crate) fn add_cookie(&mut self, index: GateIndex, root: GateIndex, path: Rc<str>) {
        self.gate_mut(index).cookies.push((root, path));
    }

    pub(crate) fn set_cookies(
        &mut self,
        index: GateIndex,
        cookies: SmallVec<[(GateIndex, Rc<str>); 2]>,
    ) {
        self.gate_mut(index).cookies = cookies;
    }

    pub(crate) fn outputs_of(&self, index: GateIndex) -> SmallVec<[GateIndex; GATE_EDGES_INLINE]> {
        self.gate(index).outputs.clone()
    }

    pub(crate) fn merge_cookies(&mut self, from: GateIndex, into: GateIndex) {
        let extra = self.gate(from).cookies.clone();
        self.gate_mut(into).cookies.extend(extra);
    }

    pub(crate) fn live_indices(&self) -> Vec<GateIndex> {
        self.gates.iter().map(|(i, _)| GateIndex(i)).collect()
    }
}

fn remove_one(
    edges: &mut SmallVec<[GateIndex; GATE_EDGES_INLINE]>,
    target: GateIndex,
    side: &str,
    owner: GateIndex,
) {
    match edges.iter().position(|&x| x == target) {
        Some(pos) => {
            edges.remove(pos);
        }
        None => panic!("remove_link: gate {} has no {} edge to {}", owner, side, target),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nor0(net: &mut Network) -> GateIndex {
        net.add_gate(GateKind::Nor)
    }

    #[test]
    fn s1_solo_nor_reads_true() {
        let mut net = Network::new();
        let n = nor0(&mut net);
        assert!(net.read(n));
        net.drain();
        assert!(net.read(n));
    }

    #[test]
    fn s2_inverter() {
        let mut net = Network::new();
        let sw = net.add_gate(GateKind::Switch);
        let n = nor0(&mut net);
        net.add_link(sw, n);
        net.drain();

        net.write(sw, true);
        let steps = net.drain();
        assert_eq!(steps, 1);
        assert!(!net.read(n));

        net.write(sw, false);
        net.drain();
        assert!(net.read(n));
    }

    #[test]
    fn s3_two_stage_chain() {
        let mut net = Network::new();
        let sw = net.add_gate(GateKind::Switch);
        let a = nor0(&mut net);
        let b = nor0(&mut net);
        net.add_link(sw, a);
        net.add_link(a, b);

        net.drain();
        assert!(!net.read(sw));
        assert!(net.read(a));
        assert!(!net.read(b));

        net.write(sw, true);
        let steps = net.drain();
        assert_eq!(steps, 2);
        assert!(!net.read(a));
        assert!(net.read(b));
    }

    #[test]
    fn idempotent_second_drain_is_zero() {
        let mut net = Network::new();
        let sw = net.add_gate(GateKind::Switch);
        let n = nor0(&mut net);
        net.add_link(sw, n);
        net.drain();
        net.write(sw, true);
        net.drain();
        assert_eq!(net.drain(), 0);
    }

    #[test]
    fn edges_are_symmetric_with_multiplicity() {
        let mut net = Network::new();
        let sw = net.add_gate(GateKind::Switch);
        let n = nor0(&mut net);
        net.add_link(sw, n);
        net.add_link(sw, n);
        assert_eq!(net.gate(n).inputs.len(), 2);
        assert_eq!(net.gate(sw).outputs.len(), 2);
        net.remove_link(sw, n);
        assert_eq!(net.gate(n).inputs.len(), 1);
        assert_eq!(net.gate(sw).outputs.len(), 1);
    }

    #[test]
    #[should_panic(expected = "not a nor gate")]
    fn add_link_into_switch_panics() {
        let mut net = Network::new();
        let sw1 = net.add_gate(GateKind::Switch);
        let sw2 = net.add_gate(GateKind::Switch);
        net.add_link(sw1, sw2);
    }

    #[test]
    #[should_panic(expected = "still has")]
    fn remove_gate_with_edges_panics() {
        let mut net = Network::new();
        let sw = net.add_gate(GateKind::Switch);
        let n = nor0(&mut net);
        net.add_link(sw, n);
        net.remove_gate(n);
    }

    #[test]
    fn removed_slot_is_recycled_fresh() {
        let mut net = Network::new();
        let sw = net.add_gate(GateKind::Switch);
        let n = nor0(&mut net);
        net.add_link(sw, n);
        net.remove_link(sw, n);
        net.remove_gate(n);

        let n2 = nor0(&mut net);
        assert_eq!(n2, n, "free list should hand the slot back out");
        assert!(net.read(n2), "recycled nor gate should start at its initial value");
        assert!(net.cookies_of(n2).is_empty());
    }

    #[test]
    fn get_stats_total_size_matches_get_size_across_removal() {
        let mut net = Network::new();
        let sw = net.add_gate(GateKind::Switch);
        let n = nor0(&mut net);
        net.add_link(sw, n);
        net.remove_link(sw, n);
        net.remove_gate(n);

        assert_eq!(net.get_stats().total_size, net.get_size());
        assert_eq!(net.get_stats().total_size, 2, "the recycled slot still counts toward the high-water mark");
    }

    #[test]
    fn watch_after_log_started_panics() {
        let mut net = Network::new();
        let sw = net.add_gate(GateKind::Switch);
        net.watch(sw, "sw", false);
        net.record_log();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            net.watch(sw, "sw2", false);
        }));
        assert!(result.is_err());
    }

    #[test]
    fn print_log_format() {
        let mut net = Network::new();
        let sw = net.add_gate(GateKind::Switch);
        net.watch(sw, "sw", false);
        net.record_log();
        net.write(sw, true);
        net.drain();
        net.record_log();
        let rendered = net.print_log();
        assert_eq!(rendered, "sw 10\n\n");
    }
}
