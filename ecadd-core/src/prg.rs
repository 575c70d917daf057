//! Implement AES-based PRG.

use crate::{aes::AesEncryptor, Block};
use rand_core::{
    block::{BlockRng, BlockRngCore},
    CryptoRng, RngCore, SeedableRng,
};

/// Struct of PRG Core
#[derive(Clone)]
pub struct PrgCore {
    aes: AesEncryptor,
    state: u64,
}

impl BlockRngCore for PrgCore {
    type Item = u32;
    type Results = [u32; 4 * AesEncryptor::AES_BLOCK_COUNT];

    // Compute [AES(state)..AES(state+8)]
    #[inline]
    fn generate(&mut self, results: &mut Self::Results) {
        let states = [0; AesEncryptor::AES_BLOCK_COUNT].map(|_| {
            let block = Block::from_counter(self.state);
            self.state += 1;
            block
        });

        let blocks = self.aes.encrypt_many_blocks(states);
        for (chunk, block) in results.chunks_exact_mut(4).zip(blocks) {
            let bytes = block.to_bytes();
            for (word, bytes) in chunk.iter_mut().zip(bytes.chunks_exact(4)) {
                *word = u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
            }
        }
    }
}

impl SeedableRng for PrgCore {
    type Seed = Block;

    #[inline]
    fn from_seed(seed: Self::Seed) -> Self {
        let aes = AesEncryptor::new(seed);
        Self { aes, state: 0u64 }
    }
}

impl CryptoRng for PrgCore {}

/// Struct of PRG
#[derive(Clone)]
pub struct Prg(BlockRng<PrgCore>);

opaque_debug::implement!(Prg);

impl RngCore for Prg {
    #[inline]
    fn next_u32(&mut self) -> u32 {
        self.0.next_u32()
    }

    #[inline]
    fn next_u64(&mut self) -> u64 {
        self.0.next_u64()
    }

    #[inline]
    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.0.fill_bytes(dest)
    }

    #[inline]
    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand_core::Error> {
        self.0.try_fill_bytes(dest)
    }
}

impl SeedableRng for Prg {
    type Seed = <PrgCore as SeedableRng>::Seed;

    #[inline]
    fn from_seed(seed: Self::Seed) -> Self {
        Prg(BlockRng::<PrgCore>::from_seed(seed))
    }
}

impl CryptoRng for Prg {}

impl Prg {
    /// New Prg with random seed.
    pub fn new() -> Self {
        let seed: Block = rand::random();
        Prg::from_seed(seed)
    }

    /// Generate a random block.
    #[inline]
    pub fn random_block(&mut self) -> Block {
        let mut bytes = [0u8; 16];
        self.fill_bytes(&mut bytes);
        Block::new(bytes)
    }
}

impl Default for Prg {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prg_is_deterministic() {
        let mut a = Prg::from_seed(Block::ZERO);
        let mut b = Prg::from_seed(Block::ZERO);
        let mut c = Prg::from_seed(Block::ONES);

        let x: Vec<Block> = (0..20).map(|_| a.random_block()).collect();
        let y: Vec<Block> = (0..20).map(|_| b.random_block()).collect();
        let z: Vec<Block> = (0..20).map(|_| c.random_block()).collect();

        assert_eq!(x, y);
        assert_ne!(x, z);
    }

    #[test]
    fn test_prg_first_block_is_aes_of_zero_counter() {
        let mut prg = Prg::from_seed(Block::ONES);
        let expected = AesEncryptor::new(Block::ONES).encrypt_block(Block::ZERO);

        assert_eq!(prg.random_block(), expected);
    }
}
