//! Multi-bit driver helpers for tests: pack an integer into a row of
//! [`Gate::switch`]es and read one back out of a row of gates, bit position
//! least-significant-first. Simplified to a plain `u64` since nothing here
//! needs an arbitrary-width `Copy` type.

use crate::facade::{Gate, Net};

/// A row of switches a test can `write` an integer into.
pub struct BinaryIn {
    switches: Vec<Gate>,
}

impl BinaryIn {
    pub fn new(net: &Net, width: usize) -> Self {
        Self {
            switches: (0..width).map(|_| Gate::switch(net)).collect(),
        }
    }

    /// Bit-decomposes `value` least-significant-first into the underlying switches.
    pub fn write(&self, value: u64) {
        for (i, s) in self.switches.iter().enumerate() {
            s.write((value >> i) & 1 != 0);
        }
    }

    pub fn bits(&self) -> &[Gate] {
        &self.switches
    }

    pub fn len(&self) -> usize {
        self.switches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.switches.is_empty()
    }
}

/// Reassembles an integer, least-significant-first, from a row of gates.
pub struct BinaryOut {
    gates: Vec<Gate>,
}

impl BinaryOut {
    pub fn new(gates: Vec<Gate>) -> Self {
        Self { gates }
    }

    /// Reads the current value. Callers are responsible for calling
    /// `Network::drain` first; this does not settle the network itself.
    pub fn read(&self) -> u64 {
        self.gates
            .iter()
            .enumerate()
            .fold(0u64, |acc, (i, g)| acc | ((g.read() as u64) << i))
    }

    pub fn len(&self) -> usize {
        self.gates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.gates.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facade::new_network;

    #[test]
    fn round_trips_through_a_chain_of_inverters() {
        let net = new_network();
        let input = BinaryIn::new(&net, 8);
        let inverted: Vec<Gate> = input.bits().iter().map(|b| Gate::not(&net, b)).collect();
        let output = BinaryOut::new(inverted);

        input.write(0b1011_0010);
        net.borrow_mut().drain();
        assert_eq!(output.read(), (!0b1011_0010u8) as u64);
    }
}
