//! Half/full adders and a ripple-carry chain: the usual per-bit `xor`/`and`/`or`
//! shape, composed through the `(sum, carry)` two-input contract that larger
//! adders chain together.

use crate::facade::{block, Gate, Net};

/// `(sum, carry)` for `a + b`.
pub fn half_adder(net: &Net, a: &Gate, b: &Gate, name: &str) -> (Gate, Gate) {
    block(net, name, &[a.clone(), b.clone()], |net, args| {
        let (a, b) = (&args[0], &args[1]);
        let sum = Gate::xor(net, a, b);
        let carry = Gate::and(net, &[a.clone(), b.clone()]);
        (sum, carry)
    })
}

/// `(sum, carry_out)` for `a + b + carry_in`.
pub fn full_adder(net: &Net, a: &Gate, b: &Gate, cin: &Gate, name: &str) -> (Gate, Gate) {
    block(net, name, &[a.clone(), b.clone(), cin.clone()], |net, args| {
        let (a, b, cin) = (&args[0], &args[1], &args[2]);
        let (sum1, c1) = half_adder(net, a, b, "half_adder");
        let (sum, c2) = half_adder(net, &sum1, cin, "half_adder");
        let cout = Gate::or(net, &[c1, c2]);
        (sum, cout)
    })
}

/// Unsigned, little-endian ripple-carry addition: `a` and `b` must be the
/// same width; returns `(sum bits, carry_out)`.
pub fn ripple_add(net: &Net, a: &[Gate], b: &[Gate], cin: &Gate, name: &str) -> (Vec<Gate>, Gate) {
    assert_eq!(
        a.len(),
        b.len(),
        "ripple_add: operands must be the same width, got {} and {}",
        a.len(),
        b.len()
    );
    let mut args = Vec::with_capacity(a.len() * 2 + 1);
    args.extend_from_slice(a);
    args.extend_from_slice(b);
    args.push(cin.clone());
    block(net, name, &args, |net, args| {
        let (rest, cin) = args.split_at(args.len() - 1);
        let (a, b) = rest.split_at(rest.len() / 2);
        let mut carry = cin[0].clone();
        let mut sum = Vec::with_capacity(a.len());
        for i in 0..a.len() {
            let (s, c) = full_adder(net, &a[i], &b[i], &carry, &format!("{name}({i})"));
            sum.push(s);
            carry = c;
        }
        (sum, carry)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facade::new_network;

    fn bits_of(net: &Net, value: u8, width: usize) -> Vec<Gate> {
        (0..width).map(|i| Gate::tie(net, (value >> i) & 1 != 0)).collect()
    }
    fn read_u8(bits: &[Gate]) -> u8 {
        bits.iter().enumerate().fold(0u8, |acc, (i, g)| acc | ((g.read() as u8) << i))
    }

    #[test]
    fn half_adder_truth_table() {
        let net = new_network();
        for (a, b) in [(false, false), (false, true), (true, false), (true, true)] {
            let ga = Gate::tie(&net, a);
            let gb = Gate::tie(&net, b);
            let (sum, carry) = half_adder(&net, &ga, &gb, "ha");
            net.borrow_mut().drain();
            assert_eq!(sum.read(), a ^ b);
            assert_eq!(carry.read(), a && b);
        }
    }

    #[test]
    fn s7_four_bit_ripple_adder() {
        let net = new_network();
        let cin = Gate::tie(&net, false);
        let a = bits_of(&net, 0b0101, 4);
        let b = bits_of(&net, 0b0011, 4);
        let (sum, cout) = ripple_add(&net, &a, &b, &cin, "add");
        net.borrow_mut().drain();
        assert_eq!(read_u8(&sum), 0b1000);
        assert!(!cout.read());

        let net = new_network();
        let cin = Gate::tie(&net, false);
        let a = bits_of(&net, 0b1111, 4);
        let b = bits_of(&net, 0b0001, 4);
        let (sum, cout) = ripple_add(&net, &a, &b, &cin, "add");
        net.borrow_mut().drain();
        assert_eq!(read_u8(&sum), 0b0000);
        assert!(cout.read());
    }

    #[test]
    fn ripple_add_propagates_carry_in() {
        let net = new_network();
        let cin = Gate::tie(&net, true);
        let a = bits_of(&net, 1, 4);
        let b = bits_of(&net, 0, 4);
        let (sum, cout) = ripple_add(&net, &a, &b, &cin, "add");
        net.borrow_mut().drain();
        assert_eq!(read_u8(&sum), 2);
        assert!(!cout.read());
    }
}
