// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! The entry point that turns a config into Bloom sets and maps.

use crate::bits::BitStore;
use crate::config::BloomConfig;
use crate::error::Error;
use crate::error::Result;
use crate::hash::IndexHasher;
use crate::lattice::Lattice;
use crate::map::BloomMap;
use crate::set::BloomSet;
use crate::store::ValueStore;

/// Constructs [`BloomSet`]s and [`BloomMap`]s from one [`BloomConfig`].
///
/// Collections built from the same factory (or from equal configs) are
/// compatible and may be combined; see the compatibility notes on the
/// collection types.
///
/// # Examples
///
/// ```
/// use bloomkit::factory::Bloom;
/// use bloomkit::hash::IndexHasher;
/// use bloomkit::hash::Murmur3Hasher;
/// use bloomkit::lattice::OrderedLattice;
///
/// let hasher: Murmur3Hasher<u64> = Murmur3Hasher::new().sized(1000);
/// let bloom = Bloom::with_hasher(hasher, 10).unwrap();
///
/// let mut set = bloom.new_set();
/// set.insert(&42).unwrap();
/// assert!(set.contains(&42));
///
/// let mut map = bloom.new_map(OrderedLattice::new(10_000i64, 0));
/// map.insert(&42, 7).unwrap();
/// assert!(map.supremum(&42) >= 7);
/// ```
pub struct Bloom<E: ?Sized, H> {
    config: BloomConfig<E, H>,
}

impl<E: ?Sized, H: IndexHasher<E>> Bloom<E, H> {
    /// Creates a factory over a config derived from the hasher's modulus.
    ///
    /// # Errors
    ///
    /// Whatever [`BloomConfig::new`] rejects.
    pub fn with_hasher(hasher: H, hash_count: usize) -> Result<Self> {
        Ok(Self::with_config(BloomConfig::new(hasher, hash_count)?))
    }

    /// Creates a factory over an existing config.
    pub fn with_config(config: BloomConfig<E, H>) -> Self {
        Bloom { config }
    }

    /// The config every produced collection shares.
    pub fn config(&self) -> &BloomConfig<E, H> {
        &self.config
    }

    /// A new empty set over freshly allocated bits of the config's capacity.
    pub fn new_set(&self) -> BloomSet<E, H> {
        BloomSet::from_parts(self.config.clone(), BitStore::new(self.config.capacity()))
    }

    /// A new set adopting caller-supplied bits. The config is re-capacitied
    /// to the bit store's length; the bits are taken as-is (they may already
    /// carry marks).
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if the bits are not mutable or their length cannot
    /// serve as a capacity for this config's hasher.
    pub fn new_set_with(&self, bits: BitStore) -> Result<BloomSet<E, H>> {
        if !bits.is_mutable() {
            return Err(Error::invalid_argument("immutable bits"));
        }
        let config = self.config.resized(bits.len())?;
        Ok(BloomSet::from_parts(config, bits))
    }

    /// A new empty map over a freshly allocated store of the config's
    /// capacity, every cell at the lattice bottom.
    pub fn new_map<V, L>(&self, lattice: L) -> BloomMap<E, V, H, L>
    where
        V: Clone + 'static,
        L: Lattice<V>,
    {
        let values = ValueStore::filled(self.config.capacity(), lattice.bottom());
        BloomMap::from_parts(self.config.clone(), values, lattice.clone(), lattice)
    }

    /// A new map adopting a caller-supplied store, which is cleared to the
    /// lattice bottom.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if the store is not mutable or its length differs
    /// from the config's capacity.
    pub fn new_map_with<V, L>(
        &self,
        mut values: ValueStore<V>,
        lattice: L,
    ) -> Result<BloomMap<E, V, H, L>>
    where
        V: Clone + 'static,
        L: Lattice<V>,
    {
        if !values.is_mutable() {
            return Err(Error::invalid_argument("immutable values"));
        }
        if values.len() != self.config.capacity() {
            return Err(Error::invalid_argument("store length differs from capacity")
                .with_context("store_len", values.len())
                .with_context("capacity", self.config.capacity()));
        }
        values.fill(lattice.bottom())?;
        Ok(BloomMap::from_parts(
            self.config.clone(),
            values,
            lattice.clone(),
            lattice,
        ))
    }
}

pub(crate) fn check_compatible_configs<E: ?Sized, H: IndexHasher<E>>(
    expected: &BloomConfig<E, H>,
    actual: &BloomConfig<E, H>,
) -> Result<()> {
    if expected.hash_count() != actual.hash_count() {
        return Err(Error::incompatible(
            "collection",
            format!(
                "hash count was {}, expected {}",
                actual.hash_count(),
                expected.hash_count()
            ),
        ));
    }
    if expected.hasher() != actual.hasher() {
        return Err(Error::incompatible("collection", "hashers were not equal"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::hash::Murmur3Hasher;
    use crate::lattice::OrderedLattice;

    fn factory(capacity: usize, hash_count: usize) -> Bloom<u64, Murmur3Hasher<u64>> {
        Bloom::with_hasher(Murmur3Hasher::new().sized(capacity), hash_count).unwrap()
    }

    #[test]
    fn test_new_set_capacity() {
        let set = factory(1000, 10).new_set();
        assert_eq!(set.bits().len(), 1000);
        assert!(set.is_empty());
        assert!(set.is_mutable());
    }

    #[test]
    fn test_new_set_with_resizes_config() {
        let bloom = factory(1000, 10);
        let set = bloom.new_set_with(BitStore::new(500)).unwrap();
        assert_eq!(set.config().capacity(), 500);
        assert_eq!(set.config().hasher().size(), 500);
    }

    #[test]
    fn test_new_set_with_rejects_immutable_bits() {
        let bloom = factory(1000, 10);
        let err = bloom
            .new_set_with(BitStore::new(500).immutable_view())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn test_new_map_starts_at_bottom() {
        let map = factory(64, 2).new_map(OrderedLattice::new(100i64, 0));
        assert!(map.is_empty());
        assert!(map.values().iter().all(|v| v == 0));
    }

    #[test]
    fn test_new_map_with_checks() {
        let bloom = factory(64, 2);
        let lattice = OrderedLattice::new(100i64, 10);
        let err = bloom
            .new_map_with(ValueStore::filled(64, 0i64).immutable_view(), lattice.clone())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);

        let err = bloom
            .new_map_with(ValueStore::filled(63, 0i64), lattice.clone())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);

        // adopted stores are wiped down to the lattice bottom
        let map = bloom
            .new_map_with(ValueStore::filled(64, 55i64), lattice)
            .unwrap();
        assert!(map.is_empty());
        assert!(map.values().iter().all(|v| v == 10));
    }
}
