use std::hash::BuildHasherDefault;
use indexmap::IndexMap;
use rustc_hash::FxHasher;


/// Use indexmap for fast lookups and rustc_hash for fast hashing
/// Insertion order is kept, so iteration over nodes and edges is deterministic
pub type FxIndexMap<K, V> = IndexMap<K, V, BuildHasherDefault<FxHasher>>;

/// Unordered map for lookups where order never leaks out (weight tables)
pub type FxHashMap<K, V> = rustc_hash::FxHashMap<K, V>;
