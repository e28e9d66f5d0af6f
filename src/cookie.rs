//! Root-relative construction-path provenance: the "cookie" that lets a
//! façade gate (see [`crate::facade`]) be re-found later by the path of
//! block/primitive calls that built the gates reachable from it.
//!
//! A gate's cookie set is a list of `(root, path)` pairs. `root` is some
//! façade gate that was, at some point, passed as a positional argument into
//! an enclosing [`crate::facade::block`] call; `path` is the dot-joined chain
//! of segments — `name(argIndex` for entering a nested block as its `argIndex`'th
//! argument, `retIndex)` for returning from one, or a bare gate-kind name
//! (`nor`, `not`) for a plain constructor — describing how to walk forward
//! from `root` to the gate that owns this cookie entry. `gate.find(path)` and
//! `gate.list(prefix)` only ever look at entries rooted at `gate` itself; that
//! restriction is the literal meaning of "DFS from the starting gate."

use crate::network::{GateIndex, Network};
use smallvec::SmallVec;
use std::fmt;
use std::rc::Rc;

pub(crate) type Provenance = SmallVec<[(GateIndex, Rc<str>); 2]>;

/// A gate with no recorded cookies is implicitly its own root with an empty
/// path — this is what lets a freshly-created `Switch`/`Tie` be queried right
/// after its first use as a block argument.
pub(crate) fn provenance_or_self(net: &Network, idx: GateIndex) -> Provenance {
    let stored = net.cookies_of(idx);
    if stored.is_empty() {
        SmallVec::from_buf([(idx, Rc::from("")); 1])
    } else {
        stored
    }
}

pub(crate) fn extend(path: &str, token: &str) -> Rc<str> {
    if path.is_empty() {
        Rc::from(token)
    } else {
        Rc::from(format!("{path}.{token}"))
    }
}

/// Cookie entries a newly-created plain gate (`nor`/`not`/...) should receive,
/// derived from the provenance its dependencies already carry.
pub(crate) fn propagate(net: &Network, inputs: &[GateIndex], op: &str) -> Vec<(GateIndex, Rc<str>)> {
    let mut out = Vec::new();
    for &input in inputs {
        for (root, path) in provenance_or_self(net, input) {
            out.push((root, extend(&path, op)));
        }
    }
    out
}

pub(crate) fn enter_token(name: &str, arg_index: usize) -> String {
    format!("{name}({arg_index}")
}

pub(crate) fn exit_token(ret_index: usize) -> String {
    format!("{ret_index})")
}

fn split(path: &str) -> Vec<&str> {
    if path.is_empty() {
        Vec::new()
    } else {
        path.split('.').collect()
    }
}

/// `name(i.j)` with nothing between the two tokens: match the gate whose
/// path both *opens* with a block-entry token for `name`/`i` and *closes*
/// with a return-index token `j)`, ignoring whatever happened in between.
fn is_shortcut(query_tokens: &[&str]) -> bool {
    query_tokens.len() == 2
        && query_tokens[0].ends_with(|c: char| c.is_ascii_digit())
        && query_tokens[0].contains('(')
        && query_tokens[1].ends_with(')')
}

fn path_matches(candidate_path: &str, query: &str) -> bool {
    let candidate_tokens = split(candidate_path);
    let query_tokens = split(query);
    if is_shortcut(&query_tokens) {
        return candidate_tokens.first() == Some(&query_tokens[0])
            && candidate_tokens.last() == Some(&query_tokens[1]);
    }
    candidate_tokens == query_tokens
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FindError {
    NoMatch,
    Ambiguous(usize),
}

impl fmt::Display for FindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FindError::NoMatch => write!(f, "find: no gate matches that path"),
            FindError::Ambiguous(n) => write!(f, "find: path is ambiguous, {n} gates match"),
        }
    }
}
impl std::error::Error for FindError {}

pub(crate) fn find(net: &Network, root: GateIndex, path: &str) -> Result<GateIndex, FindError> {
    let mut matches = Vec::new();
    for idx in net.live_indices() {
        for (entry_root, entry_path) in net.cookies_of(idx) {
            if entry_root == root && path_matches(&entry_path, path) {
                matches.push(idx);
                break;
            }
        }
    }
    matches.dedup();
    match matches.len() {
        1 => Ok(matches[0]),
        0 => Err(FindError::NoMatch),
        n => Err(FindError::Ambiguous(n)),
    }
}

pub(crate) fn list(net: &Network, root: GateIndex, prefix: &str) -> Vec<String> {
    let prefix_tokens = split(prefix);
    let mut next = std::collections::BTreeSet::new();
    for idx in net.live_indices() {
        for (entry_root, entry_path) in net.cookies_of(idx) {
            if entry_root != root {
                continue;
            }
            let tokens = split(&entry_path);
            if tokens.len() > prefix_tokens.len() && tokens[..prefix_tokens.len()] == prefix_tokens[..] {
                next.insert(tokens[prefix_tokens.len()].to_string());
            }
        }
    }
    next.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extend_joins_with_dot() {
        assert_eq!(&*extend("", "full_adder(0"), "full_adder(0");
        assert_eq!(&*extend("full_adder(0", "not"), "full_adder(0.not");
    }

    #[test]
    fn shortcut_matches_first_and_last_token_only() {
        assert!(path_matches(
            "full_adder(0.half_adder(0.not.nor.1).nor.not.1)",
            "full_adder(0.1)"
        ));
        assert!(!path_matches(
            "full_adder(0.half_adder(0.not.nor.1).nor.not.1)",
            "full_adder(0.0)"
        ));
    }

    #[test]
    fn exact_path_must_match_fully() {
        let full = "full_adder(0.half_adder(0.not.nor.1).nor.not.1)";
        assert!(path_matches(full, full));
        assert!(!path_matches(full, "full_adder(0.half_adder(0.not.nor.1)"));
    }
}
