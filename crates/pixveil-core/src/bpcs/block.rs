use crate::media::{Channel, PixelBuffer};

pub const BLOCK_SIZE: u32 = 8;

/// transitions of an 8x8 block where every neighbour differs, `2 * 8 * 7`
pub const MAX_TRANSITIONS: u32 = 112;

/// cell (0, 0) flags a conjugated block, the other 63 cells carry data
pub const DATA_BITS_PER_BLOCK: usize = 63;

const CELLS: usize = (BLOCK_SIZE * BLOCK_SIZE) as usize;
const SIZE: usize = BLOCK_SIZE as usize;

pub fn binary_to_gray(n: u8) -> u8 {
    n ^ (n >> 1)
}

pub fn gray_to_binary(mut g: u8) -> u8 {
    let mut b = 0;
    while g > 0 {
        b ^= g;
        g >>= 1;
    }
    b
}

/// One bit plane of the Gray coded red channel of an 8x8 tile.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct BitPlaneBlock {
    cells: [[bool; SIZE]; SIZE],
}

impl BitPlaneBlock {
    /// reads bit `plane` of the Gray coded red samples of the tile at (`tile_x`, `tile_y`)
    pub fn extract(buffer: &PixelBuffer, tile_x: u32, tile_y: u32, plane: u8) -> Self {
        let mut block = Self::default();
        for (y, row) in block.cells.iter_mut().enumerate() {
            for (x, cell) in row.iter_mut().enumerate() {
                let red = buffer.sample(tile_x + x as u32, tile_y + y as u32, Channel::Red);
                *cell = (binary_to_gray(red) >> plane) & 1 == 1;
            }
        }
        block
    }

    /// replaces bit `plane` of the Gray coded red samples, all other bits and channels stay
    pub fn write_into(&self, buffer: &mut PixelBuffer, tile_x: u32, tile_y: u32, plane: u8) {
        for (y, row) in self.cells.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                let red = buffer.sample_mut(tile_x + x as u32, tile_y + y as u32, Channel::Red);
                let mut gray = binary_to_gray(*red);
                if *cell {
                    gray |= 1 << plane;
                } else {
                    gray &= !(1 << plane);
                }
                *red = gray_to_binary(gray);
            }
        }
    }

    /// a block holding the next 63 bits in cells 1..64, row-major, flag cell cleared
    pub fn from_data_bits<I: Iterator<Item = bool>>(bits: &mut I) -> Self {
        let mut block = Self::default();
        for (i, bit) in (1..CELLS).zip(bits) {
            block.cells[i / SIZE][i % SIZE] = bit;
        }
        block
    }

    /// the 63 data cells in the order `from_data_bits` fills them
    pub fn data_bits(&self) -> impl Iterator<Item = bool> + '_ {
        (1..CELLS).map(move |i| self.cells[i / SIZE][i % SIZE])
    }

    pub fn get(&self, x: usize, y: usize) -> bool {
        self.cells[y][x]
    }

    pub fn set(&mut self, x: usize, y: usize, bit: bool) {
        self.cells[y][x] = bit;
    }

    pub fn is_conjugated(&self) -> bool {
        self.cells[0][0]
    }

    pub fn set_conjugated(&mut self, conjugated: bool) {
        self.cells[0][0] = conjugated;
    }

    /// horizontal plus vertical neighbour pairs that differ
    pub fn transitions(&self) -> u32 {
        let mut changes = 0;
        for y in 0..SIZE {
            for x in 0..SIZE {
                if x + 1 < SIZE && self.cells[y][x] != self.cells[y][x + 1] {
                    changes += 1;
                }
                if y + 1 < SIZE && self.cells[y][x] != self.cells[y + 1][x] {
                    changes += 1;
                }
            }
        }
        changes
    }

    /// transitions normalized into `[0, 1]`
    pub fn complexity(&self) -> f64 {
        self.transitions() as f64 / MAX_TRANSITIONS as f64
    }

    /// XOR with a checkerboard, applying it twice restores the block
    pub fn conjugate(&mut self) {
        for (y, row) in self.cells.iter_mut().enumerate() {
            for (x, cell) in row.iter_mut().enumerate() {
                if (x + y) % 2 == 1 {
                    *cell = !*cell;
                }
            }
        }
    }
}
