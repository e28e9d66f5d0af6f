//! RAM and ROM: address-decode gates the write clock per cell, and read is
//! combinational through [`word_switch`] over one register per address.

use crate::blocks::latches::register;
use crate::blocks::mux::{address_decode, word_switch};
use crate::facade::{Gate, Net};

/// `2^addr_width` words of `data_in.len()`-bit storage. Each address's
/// register latches `data_in` on the AND of `clk`, `write_enable`, and that
/// address's decoded line; read is combinational via [`word_switch`] over
/// every cell, so the read address tracks `addr` continuously.
#[allow(clippy::too_many_arguments)]
pub fn ram(
    net: &Net,
    clk: &Gate,
    write_enable: &Gate,
    addr: &[Gate],
    data_in: &[Gate],
    addr_width: usize,
    name: &str,
) -> Vec<Gate> {
    assert_eq!(
        addr.len(),
        addr_width,
        "ram: addr has {} lines, addr_width says {}",
        addr.len(),
        addr_width
    );
    let decoded = address_decode(net, addr, Some(1 << addr_width), &format!("{name}(decode)"));
    let cells: Vec<Vec<Gate>> = decoded
        .iter()
        .enumerate()
        .map(|(i, line)| {
            let write_line = Gate::and(net, &[clk.clone(), write_enable.clone(), line.clone()]);
            register(net, data_in, &write_line, false, false, &format!("{name}(cell{i})"))
        })
        .collect();
    word_switch(net, &decoded, &cells, &format!("{name}(read)"))
}

/// `2^addr_width` constant words, one per entry of `data` (missing entries
/// read as zero), selected combinationally by `addr`.
pub fn rom(net: &Net, addr: &[Gate], addr_width: usize, data: &[u64], word_width: usize, name: &str) -> Vec<Gate> {
    assert_eq!(
        addr.len(),
        addr_width,
        "rom: addr has {} lines, addr_width says {}",
        addr.len(),
        addr_width
    );
    assert!(
        data.len() <= (1usize << addr_width),
        "rom: {} words don't fit in {} address bits",
        data.len(),
        addr_width
    );
    let words: Vec<Vec<Gate>> = data
        .iter()
        .map(|&word| (0..word_width).map(|bit| Gate::tie(net, (word >> bit) & 1 != 0)).collect())
        .collect();
    let decoded = address_decode(net, addr, Some(words.len()), &format!("{name}(decode)"));
    word_switch(net, &decoded, &words, name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facade::new_network;

    fn set_bits(bits: &[Gate], value: u64) {
        for (i, b) in bits.iter().enumerate() {
            b.write((value >> i) & 1 != 0);
        }
    }
    fn read_bits(bits: &[Gate]) -> u64 {
        bits.iter().enumerate().fold(0u64, |acc, (i, g)| acc | ((g.read() as u64) << i))
    }

    #[test]
    fn s8_rom_reads_addressed_word() {
        let net = new_network();
        let addr: Vec<Gate> = (0..2).map(|_| Gate::switch(&net)).collect();
        let out = rom(&net, &addr, 2, &[7, 2, 5, 3], 4, "rom");
        net.borrow_mut().drain();

        set_bits(&addr, 2);
        net.borrow_mut().drain();
        assert_eq!(read_bits(&out), 5);

        set_bits(&addr, 0);
        net.borrow_mut().drain();
        assert_eq!(read_bits(&out), 7);
    }

    #[test]
    fn s8_ram_write_then_read_leaves_other_addresses_alone() {
        let net = new_network();
        let clk = Gate::switch(&net);
        let write_enable = Gate::switch(&net);
        let addr: Vec<Gate> = (0..2).map(|_| Gate::switch(&net)).collect();
        let data_in: Vec<Gate> = (0..4).map(|_| Gate::switch(&net)).collect();
        let out = ram(&net, &clk, &write_enable, &addr, &data_in, 2, "ram");
        net.borrow_mut().drain();

        assert_eq!(read_bits(&out), 0);

        set_bits(&addr, 1);
        set_bits(&data_in, 9);
        write_enable.write(true);
        net.borrow_mut().drain();
        clk.write(true);
        net.borrow_mut().drain();
        clk.write(false);
        net.borrow_mut().drain();
        write_enable.write(false);
        net.borrow_mut().drain();

        assert_eq!(read_bits(&out), 9, "address 1 now holds 9");

        set_bits(&addr, 0);
        net.borrow_mut().drain();
        assert_eq!(read_bits(&out), 0, "address 0 is untouched");

        set_bits(&addr, 1);
        net.borrow_mut().drain();
        assert_eq!(read_bits(&out), 9, "address 1 still holds 9");
    }
}
