use fnv::FnvBuildHasher;
use std::collections::{HashMap, HashSet};
use std::hash::Hash;

/// Grid coordinates are two small integers, which FNV hashes far faster than SipHash.
pub type FnvHashSet<T> = HashSet<T, FnvBuildHasher>;
pub type FnvHashMap<K, V> = HashMap<K, V, FnvBuildHasher>;

pub fn fnv_hashmap<K: Hash + Eq, V>(capacity: usize) -> FnvHashMap<K, V> {
    HashMap::with_capacity_and_hasher(capacity, FnvBuildHasher::default())
}
