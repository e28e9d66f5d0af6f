//! Value-typed gate handles that sit on top of [`Network`] and do the actual
//! circuit composing: `Gate::tie`/`switch`/`nor`/`not`/`and`/`or`/`xor`/`placeholder`,
//! plus `find`/`list` for cookie-path navigation (see [`crate::cookie`]).
//!
//! A [`Gate`] is a cheap, freely-copyable handle onto a [`Network`] that is
//! never frozen — there is no build/optimize phase to freeze it *out of*.
//! That's why the handle owns an `Rc<RefCell<Network>>` instead of borrowing
//! one: façade values need to live in `Vec<Gate>`s, struct fields and
//! closures for as long as the circuit exists, not just for the duration of
//! one builder call.

use crate::cookie::{self, FindError};
use crate::network::{GateIndex, GateKind, Network};
use std::cell::RefCell;
use std::rc::Rc;

pub type Net = Rc<RefCell<Network>>;

pub fn new_network() -> Net {
    Rc::new(RefCell::new(Network::new()))
}

/// A handle onto one gate: `(network, index)`, copyable, owns nothing.
#[derive(Clone)]
pub struct Gate {
    net: Net,
    pub(crate) index: GateIndex,
}

impl PartialEq for Gate {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.net, &other.net) && self.index == other.index
    }
}
impl Eq for Gate {}

impl std::fmt::Debug for Gate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Gate({})", self.index)
    }
}

impl Gate {
    pub fn network(&self) -> Net {
        self.net.clone()
    }

    pub fn index(&self) -> GateIndex {
        self.index
    }

    pub fn read(&self) -> bool {
        self.net.borrow().read(self.index)
    }

    pub fn write(&self, value: bool) {
        self.net.borrow_mut().write(self.index, value);
    }

    /// Unique reachable gate (rooted at `self`) whose cookie matches `path`.
    pub fn find(&self, path: &str) -> Result<Gate, FindError> {
        let idx = cookie::find(&self.net.borrow(), self.index, path)?;
        Ok(Gate {
            net: self.net.clone(),
            index: idx,
        })
    }

    /// Sorted, deduplicated one-segment extensions of `prefix` (rooted at `self`).
    pub fn list(&self, prefix: &str) -> Vec<String> {
        cookie::list(&self.net.borrow(), self.index, prefix)
    }

    /// Rewires every outgoing edge currently sourced at `self` onto `target`
    /// (remove_link then add_link, per edge instance, preserving multiplicity),
    /// unions the two gates' cookie sets onto `target`, then removes `self`.
    /// Used to close feedback loops: allocate a [`placeholder`], wire
    /// dependents as if the real gate already existed, build the real gate,
    /// then `replace` the placeholder with it.
    pub fn replace(&self, target: &Gate) {
        assert!(
            Rc::ptr_eq(&self.net, &target.net),
            "replace: placeholder and target belong to different networks"
        );
        let outs = self.net.borrow().outputs_of(self.index);
        let mut net = self.net.borrow_mut();
        for dst in outs {
            net.remove_link(self.index, dst);
            net.add_link(target.index, dst);
        }
        net.merge_cookies(self.index, target.index);
        net.remove_gate(self.index);
    }
}

fn build(net: &Net, inputs: &[Gate], op: &'static str) -> Gate {
    let idx = net.borrow_mut().add_gate(GateKind::Nor);
    let input_indices: Vec<GateIndex> = inputs.iter().map(|g| g.index).collect();
    for &i in &input_indices {
        net.borrow_mut().add_link(i, idx);
    }
    let cookies = cookie::propagate(&net.borrow(), &input_indices, op);
    {
        let mut n = net.borrow_mut();
        for (root, path) in cookies {
            n.add_cookie(idx, root, path);
        }
    }
    Gate {
        net: net.clone(),
        index: idx,
    }
}

impl Gate {
    /// Creates a tie gate pre-written to `value`.
    pub fn tie(net: &Net, value: bool) -> Gate {
        let idx = net.borrow_mut().add_gate(GateKind::Tie);
        net.borrow_mut().write(idx, value);
        Gate {
            net: net.clone(),
            index: idx,
        }
    }

    /// Creates a writable input, initially `false`.
    pub fn switch(net: &Net) -> Gate {
        let idx = net.borrow_mut().add_gate(GateKind::Switch);
        Gate {
            net: net.clone(),
            index: idx,
        }
    }

    /// A nor gate with one link per argument; duplicate arguments count twice.
    pub fn nor(net: &Net, inputs: &[Gate]) -> Gate {
        build(net, inputs, "nor")
    }

    /// Single-input nor.
    pub fn not(net: &Net, a: &Gate) -> Gate {
        build(net, std::slice::from_ref(a), "not")
    }

    /// `Not(Nor(Not(x) for x in inputs))` — OR of negations, negated.
    pub fn and(net: &Net, inputs: &[Gate]) -> Gate {
        assert!(
            !inputs.is_empty(),
            "and: requires at least one input, a 0-input and has no gate encoding of the AND identity `true` in this primitive set"
        );
        let negated: Vec<Gate> = inputs.iter().map(|g| Gate::not(net, g)).collect();
        Gate::not(net, &Gate::nor(net, &negated))
    }

    /// `Not(Nor(inputs))`.
    pub fn or(net: &Net, inputs: &[Gate]) -> Gate {
        Gate::not(net, &Gate::nor(net, inputs))
    }

    /// Canonical NOR expansion of XOR: `Or(And(a, Not(b)), And(Not(a), b))`.
    pub fn xor(net: &Net, a: &Gate, b: &Gate) -> Gate {
        let not_a = Gate::not(net, a);
        let not_b = Gate::not(net, b);
        let left = Gate::and(net, &[a.clone(), not_b]);
        let right = Gate::and(net, &[not_a, b.clone()]);
        Gate::or(net, &[left, right])
    }

    /// A nor gate with no inputs and no inherited cookies, later rehomed by [`Gate::replace`].
    pub fn placeholder(net: &Net) -> Gate {
        build(net, &[], "placeholder")
    }
}

/// Implemented for every return shape a `block`-wrapped constructor function
/// may hand back, so `block` can attach closing `retIndex)` cookie segments
/// to each one generically.
pub trait BlockReturn {
    fn gates(&self) -> Vec<Gate>;
}
impl BlockReturn for Gate {
    fn gates(&self) -> Vec<Gate> {
        vec![self.clone()]
    }
}
impl BlockReturn for (Gate, Gate) {
    fn gates(&self) -> Vec<Gate> {
        vec![self.0.clone(), self.1.clone()]
    }
}
impl BlockReturn for Vec<Gate> {
    fn gates(&self) -> Vec<Gate> {
        self.clone()
    }
}
impl BlockReturn for (Vec<Gate>, Gate) {
    fn gates(&self) -> Vec<Gate> {
        let mut v = self.0.clone();
        v.push(self.1.clone());
        v
    }
}

/// Wraps a gate-constructing function so every gate it creates (directly, or
/// via further nested `block` calls) picks up a cookie segment identifying
/// this call: `name(argIndex.` for each positional argument, closed by
/// `.retIndex)` on each of its return values. See [`crate::cookie`] for the
/// exact path language this builds up.
pub fn block<T: BlockReturn>(
    net: &Net,
    name: &str,
    args: &[Gate],
    f: impl FnOnce(&Net, &[Gate]) -> T,
) -> T {
    let mut saved = Vec::with_capacity(args.len());
    {
        let mut n = net.borrow_mut();
        for (i, a) in args.iter().enumerate() {
            let base = cookie::provenance_or_self(&n, a.index);
            let tagged = base
                .into_iter()
                .map(|(root, path)| (root, cookie::extend(&path, &cookie::enter_token(name, i))))
                .collect();
            saved.push((a.index, n.cookies_of(a.index)));
            n.set_cookies(a.index, tagged);
        }
    }

    let result = f(net, args);

    let result_indices: Vec<GateIndex> = result.gates().iter().map(|g| g.index).collect();
    {
        let mut n = net.borrow_mut();
        for (j, idx) in result_indices.iter().enumerate() {
            let entries = n.cookies_of(*idx);
            for (root, path) in entries {
                let closed = cookie::extend(&path, &cookie::exit_token(j));
                n.add_cookie(*idx, root, closed);
            }
        }
        for (idx, prev) in saved {
            if !result_indices.contains(&idx) {
                n.set_cookies(idx, prev);
            }
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_inverts() {
        let net = new_network();
        let sw = Gate::switch(&net);
        let n = Gate::not(&net, &sw);
        net.borrow_mut().drain();
        assert!(n.read());
        sw.write(true);
        net.borrow_mut().drain();
        assert!(!n.read());
    }

    #[test]
    fn and_or_truth_tables() {
        let net = new_network();
        let a = Gate::switch(&net);
        let b = Gate::switch(&net);
        let and = Gate::and(&net, &[a.clone(), b.clone()]);
        let or = Gate::or(&net, &[a.clone(), b.clone()]);
        net.borrow_mut().drain();
        assert!(!and.read());
        assert!(!or.read());

        a.write(true);
        net.borrow_mut().drain();
        assert!(!and.read());
        assert!(or.read());

        b.write(true);
        net.borrow_mut().drain();
        assert!(and.read());
        assert!(or.read());
    }

    #[test]
    fn xor_truth_table() {
        let net = new_network();
        let a = Gate::switch(&net);
        let b = Gate::switch(&net);
        let x = Gate::xor(&net, &a, &b);
        net.borrow_mut().drain();
        assert!(!x.read());

        a.write(true);
        net.borrow_mut().drain();
        assert!(x.read());

        b.write(true);
        net.borrow_mut().drain();
        assert!(!x.read());
    }

    #[test]
    fn placeholder_replace_closes_a_loop() {
        // SR latch: q = Nor(r, nq); nq = Nor(s, q), s/r pulsed low initially.
        let net = new_network();
        let s = Gate::switch(&net);
        let r = Gate::switch(&net);

        let q_placeholder = Gate::placeholder(&net);
        let nq = Gate::nor(&net, &[s.clone(), q_placeholder.clone()]);
        let q = Gate::nor(&net, &[r.clone(), nq.clone()]);
        q_placeholder.replace(&q);

        net.borrow_mut().drain();
        s.write(true);
        net.borrow_mut().drain();
        s.write(false);
        net.borrow_mut().drain();
        assert!(q.read());
        assert!(!nq.read());

        r.write(true);
        net.borrow_mut().drain();
        r.write(false);
        net.borrow_mut().drain();
        assert!(!q.read());
        assert!(nq.read());
    }

    #[test]
    fn block_cookies_support_find_and_list() {
        let net = new_network();
        let a = Gate::switch(&net);
        let b = Gate::switch(&net);

        let pair = block(&net, "both", &[a.clone(), b.clone()], |net, args| {
            Gate::and(net, args)
        });
        let _ = pair;

        // a was argument 0 of `both`; the returned AND gate's cookie rooted at
        // a should be reachable both by its full construction path and by the
        // `both(0.0)` shortcut.
        let listed = a.list("");
        assert_eq!(listed, vec!["both(0".to_string()]);

        let next = a.list("both(0");
        assert!(next.contains(&"not".to_string()) || next.contains(&"0)".to_string()));

        let via_shortcut = a.find("both(0.0)");
        assert!(via_shortcut.is_ok());
    }
}
