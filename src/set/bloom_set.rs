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
use std::fmt;
use std::hash::Hash;
use std::hash::Hasher;
use std::rc::Rc;

use crate::bits::BitAccess;
use crate::bits::BitStore;
use crate::config::BloomConfig;
use crate::error::Error;
use crate::error::Result;
use crate::factory::check_compatible_configs;
use crate::hash::IndexHasher;

/// A Bloom filter: an approximate set with no false negatives.
///
/// A set pairs a [`BloomConfig`] with a [`BitStore`] of the config's
/// capacity. Inserting an element sets the first `hash_count` bits of its
/// index stream; a membership probe checks them.
///
/// Most sets own word-backed bits, but a set can also sit over *derived*
/// bits computed from other live storage: [`bounded_by`](Self::bounded_by)
/// returns one, as do the projections of a
/// [`BloomMap`](crate::map::BloomMap). All set operations work uniformly
/// over either backing.
///
/// Mutability follows the bits: a set over an immutable handle refuses
/// `insert`, `union`, and `clear` with an `Immutable` error. See
/// [`immutable_view`](Self::immutable_view) and friends.
pub struct BloomSet<E: ?Sized, H> {
    config: BloomConfig<E, H>,
    bits: BitStore,
}

impl<E: ?Sized, H: IndexHasher<E>> BloomSet<E, H> {
    pub(crate) fn from_parts(config: BloomConfig<E, H>, bits: BitStore) -> Self {
        BloomSet { config, bits }
    }

    /// The config this set was built from.
    pub fn config(&self) -> &BloomConfig<E, H> {
        &self.config
    }

    /// The bits of the filter: a live view that mutates as elements are
    /// added, but cannot be mutated externally.
    pub fn bits(&self) -> BitStore {
        self.bits.immutable_view()
    }

    /// Whether the set might contain `element`.
    ///
    /// Returns `false` only if the element was never added; `true` means
    /// "possibly present" with probability [`estimated_fpp`](Self::estimated_fpp)
    /// of being wrong for an absent element.
    pub fn contains(&self, element: &E) -> bool {
        let hash_count = self.config.hash_count();
        self.config
            .hasher()
            .indices(element)
            .take(hash_count)
            .all(|index| self.bits.get(index))
    }

    /// Whether the set might contain every element of the iterable.
    /// Stops probing at the first definite miss.
    pub fn contains_all<I>(&self, elements: I) -> bool
    where
        I: IntoIterator,
        I::Item: Borrow<E>,
    {
        elements
            .into_iter()
            .all(|element| self.contains(element.borrow()))
    }

    /// Adds an element, returning whether the set's state changed.
    ///
    /// A `false` return means every position for this element was already
    /// marked; the element (or colliding ones) was effectively present.
    ///
    /// # Errors
    ///
    /// `Immutable` if this set cannot be mutated.
    pub fn insert(&mut self, element: &E) -> Result<bool> {
        if !self.is_mutable() {
            return Err(Error::immutable("bloom set"));
        }
        let hash_count = self.config.hash_count();
        let indices = self.config.hasher().indices(element).take(hash_count);
        let mut mutated = false;
        for index in indices {
            mutated |= !self.bits.get_then_set(index, true)?;
        }
        Ok(mutated)
    }

    /// Adds every element of the iterable, returning whether any addition
    /// changed state. Every element is visited even after a change is seen.
    ///
    /// # Errors
    ///
    /// `Immutable` if this set cannot be mutated.
    pub fn insert_all<I>(&mut self, elements: I) -> Result<bool>
    where
        I: IntoIterator,
        I::Item: Borrow<E>,
    {
        let mut mutated = false;
        for element in elements {
            mutated |= self.insert(element.borrow())?;
        }
        Ok(mutated)
    }

    /// Adds all elements of a compatible set, returning whether this set's
    /// state changed.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if the sets are incompatible; `Immutable` if this
    /// set cannot be mutated.
    pub fn union(&mut self, other: &BloomSet<E, H>) -> Result<bool> {
        check_compatible_configs(&self.config, &other.config)?;
        if !self.is_mutable() {
            return Err(Error::immutable("bloom set"));
        }
        if self.bits.contains(&other.bits) {
            return Ok(false);
        }
        self.bits.or_with(&other.bits)?;
        Ok(true)
    }

    /// Whether every element of a compatible set is necessarily contained in
    /// this one (bitwise superset).
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if the sets are incompatible.
    pub fn is_superset(&self, other: &BloomSet<E, H>) -> Result<bool> {
        check_compatible_configs(&self.config, &other.config)?;
        Ok(self.bits.contains(&other.bits))
    }

    /// An immutable set containing an element iff the element cannot be in
    /// this set without also being in `other`: the per-bit implication
    /// `self ⇒ other`.
    ///
    /// The returned set is a live view over both operands: if it is full,
    /// `other` bounds this set. Bounding is reflexive:
    /// `set.bounded_by(&set)` is always full.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if the sets are incompatible.
    pub fn bounded_by(&self, other: &BloomSet<E, H>) -> Result<BloomSet<E, H>> {
        check_compatible_configs(&self.config, &other.config)?;
        let access = ImpliedBits {
            antecedent: self.bits.immutable_view(),
            consequent: other.bits.immutable_view(),
        };
        Ok(BloomSet::from_parts(
            self.config.clone(),
            BitStore::derived(Rc::new(access), false),
        ))
    }

    /// Removes all elements.
    ///
    /// # Errors
    ///
    /// `Immutable` if this set cannot be mutated.
    pub fn clear(&mut self) -> Result<()> {
        if !self.is_mutable() {
            return Err(Error::immutable("bloom set"));
        }
        self.bits.clear()
    }

    /// Whether no element was ever added (all bits clear).
    pub fn is_empty(&self) -> bool {
        self.bits.all_zeros()
    }

    /// Whether every bit is set, at which point [`contains`](Self::contains)
    /// returns `true` for all elements.
    pub fn is_full(&self) -> bool {
        self.bits.all_ones()
    }

    /// An estimate of the probability that [`contains`](Self::contains)
    /// returns `true` for an element that was never added, assuming optimal
    /// hashing: `(ones / len) ^ hash_count`. Grows as elements are added.
    pub fn estimated_fpp(&self) -> f64 {
        let load = self.bits.count_ones() as f64 / self.bits.len() as f64;
        load.powf(self.config.hash_count() as f64)
    }

    // mutability methods

    /// Whether mutating operations are permitted on this wrapper.
    pub fn is_mutable(&self) -> bool {
        self.bits.is_mutable()
    }

    /// A wrapper sharing this storage that refuses mutation. Additions
    /// through the original stay visible.
    pub fn immutable_view(&self) -> BloomSet<E, H> {
        BloomSet::from_parts(self.config.clone(), self.bits.immutable_view())
    }

    /// An immutable wrapper over a snapshot of the current bits.
    pub fn immutable_copy(&self) -> BloomSet<E, H> {
        BloomSet::from_parts(self.config.clone(), self.bits.immutable_copy())
    }

    /// An independently mutable wrapper over a snapshot of the current bits.
    pub fn mutable_copy(&self) -> BloomSet<E, H> {
        BloomSet::from_parts(self.config.clone(), self.bits.mutable_copy())
    }
}

impl<E: ?Sized, H: Clone> Clone for BloomSet<E, H> {
    fn clone(&self) -> Self {
        BloomSet {
            config: self.config.clone(),
            bits: self.bits.clone(),
        }
    }
}

impl<E: ?Sized, H: PartialEq> PartialEq for BloomSet<E, H> {
    fn eq(&self, other: &Self) -> bool {
        self.config == other.config && self.bits == other.bits
    }
}

impl<E: ?Sized, H: Eq> Eq for BloomSet<E, H> {}

impl<E: ?Sized, H> Hash for BloomSet<E, H> {
    fn hash<S: Hasher>(&self, state: &mut S) {
        self.bits.hash(state);
    }
}

impl<E: ?Sized, H> fmt::Debug for BloomSet<E, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BloomSet").field("bits", &self.bits).finish()
    }
}

/// Per-bit implication over two live bit stores; backs
/// [`BloomSet::bounded_by`].
struct ImpliedBits {
    antecedent: BitStore,
    consequent: BitStore,
}

impl BitAccess for ImpliedBits {
    fn len(&self) -> usize {
        self.antecedent.len()
    }

    fn get(&self, index: usize) -> bool {
        !self.antecedent.get(index) || self.consequent.get(index)
    }

    fn set(&self, _index: usize, _value: bool) -> Result<bool> {
        Err(Error::immutable("bit view"))
    }

    fn clear_all(&self) -> Result<()> {
        Err(Error::immutable("bit view"))
    }

    fn is_mutable(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::factory::Bloom;
    use crate::hash::ModuloHasher;
    use crate::hash::Murmur3Hasher;

    fn int_factory(capacity: usize, hash_count: usize) -> Bloom<u64, Murmur3Hasher<u64>> {
        Bloom::with_hasher(Murmur3Hasher::new().sized(capacity), hash_count).unwrap()
    }

    #[test]
    fn test_insert_marks_membership() {
        let mut set = int_factory(1000, 10).new_set();
        assert!(!set.contains(&1));
        assert!(set.insert(&1).unwrap());
        assert!(set.contains(&1));
        // re-insertion changes nothing
        assert!(!set.insert(&1).unwrap());
    }

    #[test]
    fn test_insert_reports_mutation_per_bit() {
        // single hash over a tiny identity domain makes collisions exact
        let bloom: Bloom<i32, ModuloHasher<i32>> =
            Bloom::with_hasher(ModuloHasher::new(10), 1).unwrap();
        let mut set = bloom.new_set();
        assert!(set.insert(&3).unwrap());
        assert!(!set.insert(&13).unwrap()); // same cell
        assert_eq!(set.bits().count_ones(), 1);
    }

    #[test]
    fn test_clear_and_emptiness() {
        let mut set = int_factory(1000, 10).new_set();
        set.insert(&7).unwrap();
        assert!(!set.is_empty());
        set.clear().unwrap();
        assert!(set.is_empty());
        set.clear().unwrap();
        assert!(set.is_empty());
    }

    #[test]
    fn test_union_and_superset() {
        let bloom = int_factory(1000, 10);
        let mut a = bloom.new_set();
        let mut b = bloom.new_set();
        a.insert_all(0..10u64).unwrap();
        b.insert_all(5..15u64).unwrap();
        assert!(!a.is_superset(&b).unwrap());
        assert!(a.union(&b).unwrap());
        assert!(a.is_superset(&b).unwrap());
        assert!(!a.union(&b).unwrap()); // now a no-op
        assert!(a.contains_all(0..15u64));
    }

    #[test]
    fn test_incompatible_rejected() {
        let a = int_factory(1000, 10).new_set();
        let mut b = int_factory(1000, 9).new_set();
        assert_eq!(
            b.union(&a).unwrap_err().kind(),
            ErrorKind::InvalidArgument
        );
        assert_eq!(
            b.is_superset(&a).unwrap_err().kind(),
            ErrorKind::InvalidArgument
        );
        assert_eq!(
            b.bounded_by(&a).unwrap_err().kind(),
            ErrorKind::InvalidArgument
        );
    }

    #[test]
    fn test_bounded_by_is_live() {
        let bloom = int_factory(100, 4);
        let mut a = bloom.new_set();
        let b = bloom.new_set();
        // empty ⇒ empty: vacuously full
        assert!(a.bounded_by(&b).unwrap().is_full());
        let implied = a.bounded_by(&b).unwrap();
        a.insert(&1).unwrap();
        // a gained bits b lacks, and the existing view reflects it
        assert!(!implied.is_full());
        assert!(implied.bits().count_ones() < 100);
    }

    #[test]
    fn test_equality_and_hash() {
        let bloom = int_factory(1000, 5);
        let mut a = bloom.new_set();
        let mut b = bloom.new_set();
        assert_eq!(a, b);
        a.insert(&9).unwrap();
        assert_ne!(a, b);
        b.insert(&9).unwrap();
        assert_eq!(a, b);

        let hash_of = |set: &BloomSet<u64, Murmur3Hasher<u64>>| {
            let mut hasher = std::collections::hash_map::DefaultHasher::new();
            set.hash(&mut hasher);
            hasher.finish()
        };
        assert_eq!(hash_of(&a), hash_of(&b));
    }

    #[test]
    fn test_mutability_discipline() {
        let mut set = int_factory(100, 3).new_set();
        set.insert(&1).unwrap();

        let mut view = set.immutable_view();
        assert!(!view.is_mutable());
        assert_eq!(view.insert(&2).unwrap_err().kind(), ErrorKind::Immutable);
        assert_eq!(view.clear().unwrap_err().kind(), ErrorKind::Immutable);
        set.insert(&2).unwrap();
        assert!(view.contains(&2)); // view is live

        let frozen = set.immutable_copy();
        let ones_at_snapshot = frozen.bits().count_ones();
        set.insert_all(10..30u64).unwrap();
        assert_eq!(frozen.bits().count_ones(), ones_at_snapshot);
        assert!(!frozen.is_mutable());

        let mut copy = set.mutable_copy();
        assert_eq!(copy, set);
        copy.insert(&40).unwrap();
        assert!(copy.contains(&40));
    }
}
