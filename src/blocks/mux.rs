//! Address decoding and multiplexing: address bits decoded once into one-hot
//! enable lines, inputs then selected with a big OR of ANDs gated by those
//! lines.

use crate::facade::{block, Gate, Net};

/// One-hot enable: `true` iff `address_lines` currently reads `value`.
pub fn address_matches(net: &Net, value: usize, address_lines: &[Gate], name: &str) -> Gate {
    assert!(
        address_lines.len() < usize::BITS as usize,
        "address_matches: {} address lines overflow a usize",
        address_lines.len()
    );
    assert!(
        value < (1usize << address_lines.len()),
        "address_matches: value {} doesn't fit in {} address bits",
        value,
        address_lines.len()
    );
    block(net, name, address_lines, |net, lines| {
        let terms: Vec<Gate> = lines
            .iter()
            .enumerate()
            .map(|(i, line)| {
                if value & (1 << i) != 0 {
                    line.clone()
                } else {
                    Gate::not(net, line)
                }
            })
            .collect();
        Gate::and(net, &terms)
    })
}

/// Breaks an `address` out into `limit` (default `2^address.len()`) one-hot
/// enable lines, `address_decode(address)[i]` true iff the address currently
/// reads `i`.
pub fn address_decode(net: &Net, address: &[Gate], limit: Option<usize>, name: &str) -> Vec<Gate> {
    let limit = limit.unwrap_or_else(|| 1usize << address.len());
    block(net, name, address, |net, address| {
        (0..limit)
            .map(|i| address_matches(net, i, address, &format!("{name}({i})")))
            .collect()
    })
}

/// Selects the bit(s) from `data` whose matching `controls` line is high and
/// ORs them together — with a one-hot `controls`, this picks exactly one
/// `data` bit through.
pub fn bit_switch(net: &Net, controls: &[Gate], data: &[Gate], name: &str) -> Gate {
    assert!(
        controls.len() >= data.len(),
        "bit_switch: {} control lines can't address {} data bits",
        controls.len(),
        data.len()
    );
    let mut args = Vec::with_capacity(controls.len() + data.len());
    args.extend_from_slice(controls);
    args.extend_from_slice(data);
    block(net, name, &args, |net, args| {
        let (controls, data) = args.split_at(controls.len());
        let terms: Vec<Gate> = controls
            .iter()
            .zip(data)
            .map(|(c, d)| Gate::and(net, &[c.clone(), d.clone()]))
            .collect();
        Gate::or(net, &terms)
    })
}

/// [`bit_switch`] zipped across bit position for each word in `data`.
pub fn word_switch(net: &Net, controls: &[Gate], data: &[Vec<Gate>], name: &str) -> Vec<Gate> {
    let word_size = data.first().map_or(0, Vec::len);
    assert!(
        data.iter().all(|w| w.len() == word_size),
        "word_switch: every data word must be the same width"
    );
    (0..word_size)
        .map(|bit| {
            let column: Vec<Gate> = data.iter().map(|word| word[bit].clone()).collect();
            bit_switch(net, controls, &column, &format!("{name}({bit})"))
        })
        .collect()
}

/// Selects a single bit from `data` by `address`.
pub fn bit_mux(net: &Net, address: &[Gate], data: &[Gate], name: &str) -> Gate {
    assert!(
        (1usize << address.len()) >= data.len(),
        "bit_mux: {} address bits can't cover {} inputs",
        address.len(),
        data.len()
    );
    let controls = address_decode(net, address, Some(data.len()), &format!("{name}(decode)"));
    bit_switch(net, &controls, data, name)
}

/// Selects a single word from `data` by `address`.
pub fn word_mux(net: &Net, address: &[Gate], data: &[Vec<Gate>], name: &str) -> Vec<Gate> {
    assert!(
        (1usize << address.len()) >= data.len(),
        "word_mux: {} address bits can't cover {} words",
        address.len(),
        data.len()
    );
    let controls = address_decode(net, address, Some(data.len()), &format!("{name}(decode)"));
    word_switch(net, &controls, data, name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facade::new_network;

    fn set_bits(bits: &[Gate], value: usize) {
        for (i, b) in bits.iter().enumerate() {
            b.write((value >> i) & 1 != 0);
        }
    }

    #[test]
    fn address_decode_is_one_hot() {
        let net = new_network();
        let addr: Vec<Gate> = (0..2).map(|_| Gate::switch(&net)).collect();
        let lines = address_decode(&net, &addr, None, "decode");
        net.borrow_mut().drain();

        for value in 0..4 {
            set_bits(&addr, value);
            net.borrow_mut().drain();
            for (i, line) in lines.iter().enumerate() {
                assert_eq!(line.read(), i == value, "address={value} line={i}");
            }
        }
    }

    #[test]
    fn bit_mux_selects_addressed_input() {
        let net = new_network();
        let addr: Vec<Gate> = (0..2).map(|_| Gate::switch(&net)).collect();
        let data: Vec<Gate> = [true, false, true, true]
            .iter()
            .map(|&v| Gate::tie(&net, v))
            .collect();
        let out = bit_mux(&net, &addr, &data, "mux");
        net.borrow_mut().drain();

        for (value, expected) in [true, false, true, true].iter().enumerate() {
            set_bits(&addr, value);
            net.borrow_mut().drain();
            assert_eq!(out.read(), *expected);
        }
    }

    #[test]
    fn word_mux_selects_addressed_word() {
        let net = new_network();
        let addr: Vec<Gate> = (0..2).map(|_| Gate::switch(&net)).collect();
        let words: Vec<Vec<Gate>> = [7u8, 2, 5, 3]
            .iter()
            .map(|&v| (0..4).map(|i| Gate::tie(&net, (v >> i) & 1 != 0)).collect())
            .collect();
        let out = word_mux(&net, &addr, &words, "rom_mux");
        net.borrow_mut().drain();

        set_bits(&addr, 2);
        net.borrow_mut().drain();
        let value: u8 = out.iter().enumerate().fold(0, |acc, (i, g)| acc | ((g.read() as u8) << i));
        assert_eq!(value, 5);
    }
}
