use rand::{rngs::StdRng, seq::IndexedRandom, SeedableRng};
use trienode::ChildMap;

/// Node sizes covering a sparse node up to a full fan-out node.
pub const NODE_SIZES: &[usize] = &[1, 4, 16, 48, 128, 256];

/// Pick `size` distinct key bytes in random order.
pub fn random_keys(size: usize, seed: u64) -> Vec<u8> {
    let mut rng = StdRng::seed_from_u64(seed);
    let bytes: Vec<_> = (0..=255u8).collect();
    bytes.choose_multiple(&mut rng, size).copied().collect()
}

/// Build a node holding `size` children under random key bytes.
pub fn random_node(size: usize, seed: u64) -> ChildMap<u64> {
    let mut node = ChildMap::new();
    for key in random_keys(size, seed) {
        node.set(key, u64::from(key)).unwrap();
    }
    node
}
