//! Gated D latch, master-slave D flip-flop, and register bank.
//!
//! All three are cross-coupled NOR latches closed with [`Gate::placeholder`]
//! to break the feedback cycle before the real gate it feeds back from
//! exists.

use crate::facade::{block, Gate, Net};

/// The raw cross-coupled NOR pair: `q = NOT(a)` once `b` is low and the loop
/// has settled, holding its last value while `b` is high. `q_` is always
/// `NOT(q)`, for free, which is what lets [`ms_d_flop_pair`] chain two of
/// these without an extra inverter between stages.
fn nor_latch(net: &Net, a: &Gate, b: &Gate) -> (Gate, Gate) {
    let s_ = Gate::nor(net, &[a.clone(), b.clone()]);
    let r_ = Gate::nor(net, &[s_.clone(), b.clone()]);
    let q_placeholder = Gate::placeholder(net);
    let q = Gate::nor(net, &[q_placeholder.clone(), r_.clone()]);
    let q_ = Gate::nor(net, &[q.clone(), s_.clone()]);
    q_placeholder.replace(&q_);
    q.write(false);
    (q, q_)
}

/// While `clk` is high, `q` follows `d`; when `clk` falls, `q` holds the last
/// value `d` had just before the fall. `q` is forced to `false` at
/// construction (§4.1 "this is essential to let d-latches initialize
/// deterministically").
pub fn gated_d_latch(net: &Net, d: &Gate, clk: &Gate, name: &str) -> Gate {
    block(net, name, &[d.clone(), clk.clone()], |net, args| {
        let (d, clk) = (&args[0], &args[1]);
        let not_d = Gate::not(net, d);
        let not_clk = Gate::not(net, clk);
        nor_latch(net, &not_d, &not_clk).0
    })
}

/// Two [`nor_latch`]es on complementary gating lines: the master tracks `d`
/// while `clk` is high, the slave tracks the master's (already inverted,
/// gate-economy-free) `q_` output while `clk` is low, so the overall `q`
/// updates on the falling edge of `clk`.
fn ms_d_flop_pair(net: &Net, d: &Gate, clk: &Gate, name: &str) -> (Gate, Gate) {
    block(net, name, &[d.clone(), clk.clone()], |net, args| {
        let (d, clk) = (&args[0], &args[1]);
        let not_clk = Gate::not(net, clk);
        let not_d = Gate::not(net, d);
        let (_master_q, master_q_) = nor_latch(net, &not_d, &not_clk);
        nor_latch(net, &master_q_, clk)
    })
}

/// `q` is updated to `d` on the falling edge of `clk`.
pub fn ms_d_flop(net: &Net, d: &Gate, clk: &Gate, name: &str) -> Gate {
    ms_d_flop_pair(net, d, clk, name).0
}

/// A bank of [`ms_d_flop`]s sharing one clock line. `negate_in` accepts an
/// already-`NOT(d)` signal per bit instead of `d` (skipping the extra
/// inverter this function would otherwise insert); `negate_out` returns
/// `NOT(q)` per bit instead of `q`, for the symmetric reason on the output
/// side, so adjacent register stages can cancel inversions for gate economy.
pub fn register(
    net: &Net,
    bits: &[Gate],
    clk: &Gate,
    negate_in: bool,
    negate_out: bool,
    name: &str,
) -> Vec<Gate> {
    let mut args = Vec::with_capacity(bits.len() + 1);
    args.extend_from_slice(bits);
    args.push(clk.clone());
    block(net, name, &args, |net, args| {
        let (bits, clk) = args.split_at(args.len() - 1);
        let clk = &clk[0];
        let not_clk = Gate::not(net, clk);
        bits.iter()
            .map(|bit| {
                // `not_d` is NOT(real data), whether the caller already had
                // it on hand (`negate_in`) or we invert it here.
                let not_d = if negate_in {
                    bit.clone()
                } else {
                    Gate::not(net, bit)
                };
                let (_master_q, master_q_) = nor_latch(net, &not_d, &not_clk);
                let (slave_q, slave_q_) = nor_latch(net, &master_q_, clk);
                if negate_out {
                    slave_q_
                } else {
                    slave_q
                }
            })
            .collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facade::new_network;

    #[test]
    fn s5_gated_d_latch_tracks_while_high_holds_while_low() {
        let net = new_network();
        let d = Gate::switch(&net);
        let clk = Gate::switch(&net);
        let q = gated_d_latch(&net, &d, &clk, "latch");
        net.borrow_mut().drain();
        assert!(!q.read());

        // clk low: data changes don't propagate.
        d.write(true);
        net.borrow_mut().drain();
        assert!(!q.read());

        // clk high: q tracks d.
        clk.write(true);
        net.borrow_mut().drain();
        assert!(q.read());

        d.write(false);
        net.borrow_mut().drain();
        assert!(!q.read());

        d.write(true);
        net.borrow_mut().drain();
        assert!(q.read());

        // clk falls: q holds the value sampled just before the fall.
        clk.write(false);
        net.borrow_mut().drain();
        assert!(q.read());

        d.write(false);
        net.borrow_mut().drain();
        assert!(q.read(), "holds after clk falls regardless of d");
    }

    #[test]
    fn ms_d_flop_updates_on_falling_edge_only() {
        let net = new_network();
        let d = Gate::switch(&net);
        let clk = Gate::switch(&net);
        let q = ms_d_flop(&net, &d, &clk, "flop");
        net.borrow_mut().drain();
        assert!(!q.read());

        d.write(true);
        net.borrow_mut().drain();
        assert!(!q.read(), "no output change until a falling edge occurs");

        clk.write(true);
        net.borrow_mut().drain();
        assert!(!q.read(), "rising edge captures into the master, not the output");

        clk.write(false);
        net.borrow_mut().drain();
        assert!(q.read(), "falling edge releases the captured value");

        d.write(false);
        net.borrow_mut().drain();
        assert!(q.read(), "output holds while clk is low");

        clk.write(true);
        net.borrow_mut().drain();
        assert!(q.read(), "master recaptures, output still holds");

        clk.write(false);
        net.borrow_mut().drain();
        assert!(!q.read());
    }

    #[test]
    fn s6_eight_bit_register_round_trips_values() {
        let net = new_network();
        let clk = Gate::switch(&net);
        let bits: Vec<Gate> = (0..8).map(|_| Gate::switch(&net)).collect();
        let out = register(&net, &bits, &clk, false, false, "reg");
        net.borrow_mut().drain();

        let write_bits = |net: &Net, bits: &[Gate], v: u32| {
            for (i, b) in bits.iter().enumerate() {
                b.write((v >> i) & 1 != 0);
            }
            net.borrow_mut().drain();
        };
        let read_bits = |out: &[Gate]| -> u32 {
            out.iter()
                .enumerate()
                .fold(0u32, |acc, (i, g)| acc | ((g.read() as u32) << i))
        };

        let v1 = 0b1011_0110u32;
        write_bits(&net, &bits, v1);
        assert_eq!(read_bits(&out), 0, "not clocked in yet");

        clk.write(true);
        net.borrow_mut().drain();
        assert_eq!(read_bits(&out), 0, "still not visible until the clock falls");

        clk.write(false);
        net.borrow_mut().drain();
        assert_eq!(read_bits(&out), v1);

        let v2 = 0b0100_1001u32;
        write_bits(&net, &bits, v2);
        assert_eq!(read_bits(&out), v1, "reading between pulses still the old value");

        clk.write(true);
        net.borrow_mut().drain();
        assert_eq!(read_bits(&out), v1);

        clk.write(false);
        net.borrow_mut().drain();
        assert_eq!(read_bits(&out), v2);
    }

    #[test]
    fn register_negate_out_complements_every_bit() {
        let net = new_network();
        let clk = Gate::switch(&net);
        let bits: Vec<Gate> = (0..4).map(|_| Gate::switch(&net)).collect();
        let q = register(&net, &bits, &clk, false, false, "reg");
        let q_bar = register(&net, &bits, &clk, false, true, "reg_bar");
        net.borrow_mut().drain();

        for (i, b) in bits.iter().enumerate() {
            b.write((i % 2) == 0);
        }
        net.borrow_mut().drain();
        clk.write(true);
        net.borrow_mut().drain();
        clk.write(false);
        net.borrow_mut().drain();

        for (a, b) in q.iter().zip(q_bar.iter()) {
            assert_eq!(a.read(), !b.read());
        }
    }
}
