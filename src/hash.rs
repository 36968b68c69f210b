// Position fingerprints for the transposition table.
//
// Not incremental: every state is hashed from its full byte image, which is
// only 19 bytes. The 32-bit half picks the table slot, the 64-bit half
// verifies the entry.
use crate::board::BoardState;

const FNV64_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV64_PRIME: u64 = 0x0000_0100_0000_01b3;
const FNV32_OFFSET: u32 = 0x811c_9dc5;
const FNV32_PRIME: u32 = 0x0100_0193;

/// 96-bit position fingerprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint {
    pub major: u64,
    pub minor: u32,
}

impl Fingerprint {
    fn seed() -> Self {
        Self {
            major: FNV64_OFFSET,
            minor: FNV32_OFFSET,
        }
    }

    fn add(&mut self, data: &[u8]) {
        for &byte in data {
            self.major ^= byte as u64;
            self.major = self.major.wrapping_mul(FNV64_PRIME);
            self.minor ^= byte as u32;
            self.minor = self.minor.wrapping_mul(FNV32_PRIME);
        }
    }
}

/// FNV-1a over the canonical byte image of a state.
pub fn fingerprint(state: &BoardState) -> Fingerprint {
    let mut h = Fingerprint::seed();
    h.add(&state.to_bytes());
    h
}

impl BoardState {
    #[inline]
    pub fn fingerprint(&self) -> Fingerprint {
        fingerprint(self)
    }
}
