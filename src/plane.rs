/// A bit-packed boolean plane over every cell of the board.
///
/// One plane tracks one property per cell (occupancy by a color, or a
/// legal-move hint for a player). Storage is `ceil(cells / 8)` bytes so the
/// layout stays flat and compact at high dimension counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitPlane {
    bits: Vec<u8>,
}

impl BitPlane {
    pub fn zeroed(cells: usize) -> Self {
        Self {
            bits: vec![0x00; cells.div_ceil(8)],
        }
    }

    /// All bits set. Trailing bits past `cells` are set too, but callers
    /// only ever address indices below the cell count.
    pub fn filled(cells: usize) -> Self {
        Self {
            bits: vec![0xff; cells.div_ceil(8)],
        }
    }

    pub fn get(&self, index: usize) -> bool {
        (self.bits[index / 8] >> (index % 8)) & 1 == 1
    }

    pub fn set(&mut self, index: usize, value: bool) {
        let byte = &mut self.bits[index / 8];
        let mask = 1 << (index % 8);
        if value {
            *byte |= mask;
        } else {
            *byte &= !mask;
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bits
    }
}
