//! Keyed AES cipher

use aes::Aes128Enc;
use cipher::{generic_array::GenericArray, BlockEncrypt, KeyInit};

use crate::{Block, Label};

/// A wrapper of aes, only for encryption.
#[derive(Clone)]
pub struct AesEncryptor(Aes128Enc);

impl AesEncryptor {
    /// Number of blocks the PRG encrypts per refill.
    pub const AES_BLOCK_COUNT: usize = 8;

    /// Initiate an AesEncryptor instance with key.
    #[inline]
    pub fn new(key: Block) -> Self {
        let key: [u8; 16] = key.into();
        AesEncryptor(Aes128Enc::new(&GenericArray::from(key)))
    }

    /// Encrypt a block.
    #[inline]
    pub fn encrypt_block(&self, blk: Block) -> Block {
        let mut ctxt = GenericArray::from(blk.to_bytes());
        self.0.encrypt_block(&mut ctxt);
        Block::new(ctxt.into())
    }

    /// Encrypt many blocks.
    #[inline]
    pub fn encrypt_many_blocks<const N: usize>(&self, blks: [Block; N]) -> [Block; N] {
        blks.map(|blk| self.encrypt_block(blk))
    }
}

opaque_debug::implement!(AesEncryptor);

/// Expands a label into 32 pseudorandom bytes.
///
/// The label keys AES which is applied to the counters `0` and `1`, so the output is a
/// deterministic function of the label alone.
pub fn expand_label(label: Label) -> [u8; 32] {
    let [lo, hi] =
        AesEncryptor::new(label).encrypt_many_blocks([Block::from_counter(0), Block::from_counter(1)]);

    let mut out = [0u8; 32];
    out[..16].copy_from_slice(&lo.to_bytes());
    out[16..].copy_from_slice(&hi.to_bytes());
    out
}
