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

use std::borrow::Borrow;
use std::cell::RefCell;
use std::fmt;
use std::hash::Hash;
use std::hash::Hasher;
use std::rc::Rc;

use crate::bits::BitStore;
use crate::config::BloomConfig;
use crate::error::Error;
use crate::error::Result;
use crate::factory::check_compatible_configs;
use crate::hash::IndexHasher;
use crate::lattice::Lattice;
use crate::map::projections::KeysBits;
use crate::map::projections::TopBits;
use crate::set::BloomSet;
use crate::store::ValueStore;

/// A Bloom map: keys hash onto cells of a bounded lattice.
///
/// The map carries two lattices over its value type. The *store lattice*
/// `L_s` is where cells live: every write joins upward in it, every read
/// meets downward in it, and its bottom marks a cell as never written. The
/// *access lattice* `L_a` is the window through which this wrapper reads and
/// writes; it equals `L_s` for a freshly built map and narrows on the views
/// returned by [`bounded_above`](Self::bounded_above) and
/// [`restricted`](Self::restricted). Reads never report a value above
/// `L_a`'s top, and [`insert`](Self::insert) rejects values outside `L_a`.
///
/// Views share cells with the map they came from, in both directions: a
/// write through either is immediately visible through the other.
///
/// Equality compares configs, access lattices, and the access-projected
/// cells, using the value type's own `PartialEq` (not the lattice relation);
/// the `Hash` impl covers the same cells, keeping the pair consistent.
pub struct BloomMap<K: ?Sized, V, H, L> {
    config: BloomConfig<K, H>,
    store_lattice: L,
    access_lattice: L,
    values: ValueStore<V>,
    top_bits: RefCell<Option<BitStore>>,
}

impl<K, V, H, L> BloomMap<K, V, H, L>
where
    K: ?Sized,
    V: Clone + 'static,
    H: IndexHasher<K>,
    L: Lattice<V>,
{
    pub(crate) fn from_parts(
        config: BloomConfig<K, H>,
        values: ValueStore<V>,
        store_lattice: L,
        access_lattice: L,
    ) -> Self {
        BloomMap {
            config,
            store_lattice,
            access_lattice,
            values,
            top_bits: RefCell::new(None),
        }
    }

    /// The config this map was built from.
    pub fn config(&self) -> &BloomConfig<K, H> {
        &self.config
    }

    /// The lattice this wrapper reads and writes through (the access
    /// lattice). Part of the compatibility relation between maps.
    pub fn lattice(&self) -> &L {
        &self.access_lattice
    }

    /// The cells as this wrapper may see them: a live immutable view of the
    /// store, with every cell met with the access-lattice top when this is a
    /// narrowed view.
    pub fn values(&self) -> ValueStore<V>
    where
        V: 'static,
        L: 'static,
    {
        if self.access_lattice == self.store_lattice {
            self.values.immutable_view()
        } else {
            let lattice = self.store_lattice.clone();
            let top = self.access_lattice.top();
            self.values.transformed_by(move |v| lattice.meet(&top, v))
        }
    }

    /// Associates `value` with `key`, returning the supremum the key had
    /// before this write (what [`supremum`](Self::supremum) would have
    /// returned).
    ///
    /// Each of the key's cells is raised to its join with `value` in the
    /// store lattice; cells only ever move upward.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if the access lattice does not contain `value`;
    /// `Immutable` if this map cannot be mutated.
    pub fn insert(&mut self, key: &K, value: V) -> Result<V> {
        if !self.access_lattice.contains(&value) {
            return Err(Error::invalid_argument("value outside the lattice"));
        }
        if !self.is_mutable() {
            return Err(Error::immutable("bloom map"));
        }
        let hash_count = self.config.hash_count();
        let mut previous = self.access_lattice.top();
        for index in self.config.hasher().indices(key).take(hash_count) {
            let old = self.values.get(index);
            previous = self.store_lattice.meet(&previous, &old);
            self.values.set(index, self.store_lattice.join(&value, &old))?;
        }
        Ok(previous)
    }

    /// The tightest upper bound the map can prove for any value previously
    /// inserted against `key`: the store-lattice meet over the key's cells,
    /// starting from the access-lattice top.
    ///
    /// For a key never inserted the result sinks to the store bottom (unless
    /// collisions raised its cells).
    pub fn supremum(&self, key: &K) -> V {
        let hash_count = self.config.hash_count();
        let mut value = self.access_lattice.top();
        for index in self.config.hasher().indices(key).take(hash_count) {
            value = self.store_lattice.meet(&value, &self.values.get(index));
        }
        value
    }

    /// Whether the map might contain `key`: true iff none of the key's cells
    /// still holds the store bottom. Never false for an inserted key.
    pub fn contains_key(&self, key: &K) -> bool {
        let bottom = self.store_lattice.bottom();
        let hash_count = self.config.hash_count();
        self.config
            .hasher()
            .indices(key)
            .take(hash_count)
            .all(|index| !self.store_lattice.equivalent(&self.values.get(index), &bottom))
    }

    /// Whether the map might contain every key of the iterable. Stops at the
    /// first definite miss.
    pub fn contains_all_keys<I>(&self, keys: I) -> bool
    where
        I: IntoIterator,
        I::Item: Borrow<K>,
    {
        keys.into_iter().all(|key| self.contains_key(key.borrow()))
    }

    /// Resets every cell to the store bottom.
    ///
    /// # Errors
    ///
    /// `Immutable` if this map cannot be mutated.
    pub fn clear(&mut self) -> Result<()> {
        if !self.is_mutable() {
            return Err(Error::immutable("bloom map"));
        }
        self.values.fill(self.store_lattice.bottom())
    }

    /// Whether every cell holds the store bottom.
    pub fn is_empty(&self) -> bool {
        self.is_all(&self.store_lattice.bottom())
    }

    /// Whether every cell holds the store-lattice top (not merely the
    /// access cap).
    pub fn is_full(&self) -> bool {
        self.is_all(&self.store_lattice.top())
    }

    /// Whether this map bounds `other`: at every cell, `other`'s
    /// access-projected value lies at or below this map's.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if the maps are incompatible (unequal configs or
    /// access lattices).
    pub fn bounds(&self, other: &Self) -> Result<bool> {
        self.check_compatible(other)?;
        let capacity = self.values.len();
        for index in 0..capacity {
            let ordered = self
                .store_lattice
                .is_ordered(&other.access_value(index), &self.access_value(index));
            if !ordered {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// A live view of the same cells whose access lattice is this one's
    /// lowered to `upper`. Writes through either wrapper are visible through
    /// both; the view refuses values its narrower lattice does not contain.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if the access lattice does not contain `upper`.
    pub fn bounded_above(&self, upper: V) -> Result<Self> {
        if !self.access_lattice.contains(&upper) {
            return Err(Error::invalid_argument("upper bound outside the lattice"));
        }
        let sub = self.access_lattice.bounded_above(upper);
        Ok(self.with_access_lattice(sub))
    }

    /// A live view of the same cells through an arbitrary sub-lattice of the
    /// access lattice.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if `lattice`'s bounds escape the access lattice.
    pub fn restricted(&self, lattice: L) -> Result<Self> {
        let contained = self.access_lattice.contains(&lattice.top())
            && self.access_lattice.contains(&lattice.bottom());
        if !contained {
            return Err(Error::invalid_argument(
                "sub-lattice escapes the access lattice",
            ));
        }
        Ok(self.with_access_lattice(lattice))
    }

    /// The keys as a live, read-only Bloom set: bit `i` is set while cell
    /// `i` holds anything other than the store bottom. Mutate through the
    /// map (or [`as_set`](Self::as_set)) instead.
    pub fn keys(&self) -> BloomSet<K, H>
    where
        V: 'static,
        L: 'static,
    {
        let access = KeysBits::new(self.values.immutable_view(), self.store_lattice.clone());
        BloomSet::from_parts(self.config.clone(), BitStore::derived(Rc::new(access), false))
    }

    /// The map as a live Bloom set over the cells that attain the
    /// access-lattice top.
    ///
    /// Inserting a key through the returned set joins the top into the
    /// key's cells, exactly like `insert(key, top)`; clearing it clears the
    /// whole map. Individual bits cannot be cleared through it. The
    /// projection is memoized: every call shares the same derived bits.
    pub fn as_set(&self) -> BloomSet<K, H>
    where
        V: 'static,
        L: 'static,
    {
        let bits = self
            .top_bits
            .borrow_mut()
            .get_or_insert_with(|| {
                let access = TopBits::new(
                    self.values.clone(),
                    self.store_lattice.clone(),
                    self.access_lattice.top(),
                );
                BitStore::derived(Rc::new(access), true)
            })
            .clone();
        BloomSet::from_parts(self.config.clone(), bits)
    }

    // mutability methods

    /// Whether mutating operations are permitted on this wrapper.
    pub fn is_mutable(&self) -> bool {
        self.values.is_mutable()
    }

    /// A wrapper sharing these cells that refuses mutation. Writes through
    /// the original stay visible.
    pub fn immutable_view(&self) -> Self {
        Self::from_parts(
            self.config.clone(),
            self.values.immutable_view(),
            self.store_lattice.clone(),
            self.access_lattice.clone(),
        )
    }

    /// An immutable wrapper over a snapshot of the current cells.
    pub fn immutable_copy(&self) -> Self {
        Self::from_parts(
            self.config.clone(),
            self.values.immutable_copy(),
            self.store_lattice.clone(),
            self.access_lattice.clone(),
        )
    }

    /// An independently mutable wrapper over a snapshot of the current
    /// cells.
    pub fn mutable_copy(&self) -> Self {
        Self::from_parts(
            self.config.clone(),
            self.values.mutable_copy(),
            self.store_lattice.clone(),
            self.access_lattice.clone(),
        )
    }

    // private helpers

    fn with_access_lattice(&self, access_lattice: L) -> Self {
        Self::from_parts(
            self.config.clone(),
            self.values.clone(),
            self.store_lattice.clone(),
            access_lattice,
        )
    }

    fn access_value(&self, index: usize) -> V {
        let value = self.values.get(index);
        if self.access_lattice == self.store_lattice {
            value
        } else {
            self.store_lattice.meet(&self.access_lattice.top(), &value)
        }
    }

    fn is_all(&self, expected: &V) -> bool {
        self.values
            .iter()
            .all(|value| self.store_lattice.equivalent(&value, expected))
    }

    fn check_compatible(&self, other: &Self) -> Result<()> {
        check_compatible_configs(&self.config, &other.config)?;
        if self.access_lattice != other.access_lattice {
            return Err(Error::incompatible("bloom map", "lattices were not equal"));
        }
        Ok(())
    }
}

impl<K, V, H, L> PartialEq for BloomMap<K, V, H, L>
where
    K: ?Sized,
    V: Clone + PartialEq + 'static,
    H: IndexHasher<K>,
    L: Lattice<V>,
{
    fn eq(&self, other: &Self) -> bool {
        self.config == other.config
            && self.access_lattice == other.access_lattice
            && self.values.len() == other.values.len()
            && (0..self.values.len()).all(|index| self.access_value(index) == other.access_value(index))
    }
}

impl<K, V, H, L> Eq for BloomMap<K, V, H, L>
where
    K: ?Sized,
    V: Clone + Eq + 'static,
    H: IndexHasher<K> + Eq,
    L: Lattice<V>,
{
}

impl<K, V, H, L> Hash for BloomMap<K, V, H, L>
where
    K: ?Sized,
    V: Clone + Hash + 'static,
    H: IndexHasher<K>,
    L: Lattice<V>,
{
    fn hash<S: Hasher>(&self, state: &mut S) {
        let len = self.values.len();
        len.hash(state);
        for index in 0..len {
            self.access_value(index).hash(state);
        }
    }
}

impl<K, V, H, L> fmt::Debug for BloomMap<K, V, H, L>
where
    K: ?Sized,
    V: Clone + fmt::Debug + 'static,
    L: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BloomMap")
            .field("lattice", &self.access_lattice)
            .field("values", &self.values)
            .finish()
    }
}
