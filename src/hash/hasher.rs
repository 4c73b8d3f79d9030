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

use std::fmt;
use std::hash::Hash;
use std::iter;
use std::marker::PhantomData;

use crate::hash::MurmurHash3X64128;
use crate::hash::DEFAULT_SEED;

/// Produces deterministic index streams for elements of type `E`.
///
/// A hasher is bound to a modulus, its [`size`](Self::size): every index it
/// yields lies in `[0, size)`. The stream for a given element is lazy,
/// deterministic, and at least [`quantity`](Self::quantity) indices long.
/// [`sized`](Self::sized) derives a hasher with the same identity but a
/// different modulus; a Bloom collection uses it to bind a hasher to its
/// capacity.
///
/// Equality of hashers is part of the compatibility relation between Bloom
/// collections, so implementations must compare their full identity (seed and
/// modulus for the murmur hasher).
pub trait IndexHasher<E: ?Sized>: Clone + PartialEq {
    /// The lazy index stream produced for one element.
    type Indices: Iterator<Item = usize>;

    /// Returns the index stream for `element`.
    ///
    /// The same (hasher, element) pair always yields the same stream, in the
    /// same order.
    fn indices(&self, element: &E) -> Self::Indices;

    /// The modulus: all yielded indices are below this value.
    fn size(&self) -> usize;

    /// The minimum number of indices a stream is good for.
    fn quantity(&self) -> usize;

    /// Derives a hasher with the modulus rebound to `size`.
    fn sized(&self, size: usize) -> Self;
}

/// General-purpose [`IndexHasher`] over any `E: Hash`, backed by a single
/// 128-bit MurmurHash3 computation per element.
///
/// The two 64-bit halves `(h0, h1)` seed an unbounded double-hashing stream
/// (`(h0 + i·h1) >> 1 mod size`), so [`quantity`](IndexHasher::quantity) is
/// effectively unlimited.
///
/// # Examples
///
/// ```
/// use bloomkit::hash::IndexHasher;
/// use bloomkit::hash::Murmur3Hasher;
///
/// let hasher = Murmur3Hasher::new().sized(1000);
/// let first: Vec<usize> = hasher.indices(&42u64).take(3).collect();
/// assert!(first.iter().all(|&i| i < 1000));
/// assert_eq!(first, hasher.indices(&42u64).take(3).collect::<Vec<_>>());
/// ```
pub struct Murmur3Hasher<E: ?Sized> {
    seed: u64,
    size: usize,
    _marker: PhantomData<fn(&E)>,
}

impl<E: ?Sized> Murmur3Hasher<E> {
    /// Creates a hasher with the default seed over the full index domain.
    pub fn new() -> Self {
        Self::with_seed(DEFAULT_SEED)
    }

    /// Creates a hasher with a custom seed over the full index domain.
    ///
    /// Collections built from hashers with different seeds are incompatible.
    pub fn with_seed(seed: u64) -> Self {
        Murmur3Hasher {
            seed,
            size: usize::MAX,
            _marker: PhantomData,
        }
    }

    /// The seed this hasher was created with.
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl<E: ?Sized> Default for Murmur3Hasher<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: ?Sized> Clone for Murmur3Hasher<E> {
    fn clone(&self) -> Self {
        Murmur3Hasher {
            seed: self.seed,
            size: self.size,
            _marker: PhantomData,
        }
    }
}

impl<E: ?Sized> PartialEq for Murmur3Hasher<E> {
    fn eq(&self, other: &Self) -> bool {
        self.seed == other.seed && self.size == other.size
    }
}

impl<E: ?Sized> Eq for Murmur3Hasher<E> {}

impl<E: ?Sized> fmt::Debug for Murmur3Hasher<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Murmur3Hasher")
            .field("seed", &self.seed)
            .field("size", &self.size)
            .finish()
    }
}

impl<E: Hash + ?Sized> IndexHasher<E> for Murmur3Hasher<E> {
    type Indices = Murmur3Indices;

    fn indices(&self, element: &E) -> Murmur3Indices {
        let mut hasher = MurmurHash3X64128::with_seed(self.seed);
        element.hash(&mut hasher);
        let (h0, h1) = hasher.finish128();
        Murmur3Indices {
            h0,
            h1,
            size: self.size as u64,
            i: 0,
        }
    }

    fn size(&self) -> usize {
        self.size
    }

    fn quantity(&self) -> usize {
        usize::MAX
    }

    fn sized(&self, size: usize) -> Self {
        Murmur3Hasher {
            seed: self.seed,
            size,
            _marker: PhantomData,
        }
    }
}

/// Unbounded index stream derived from one 128-bit murmur hash.
///
/// Index `i` (1-based) is `((h0 + i·h1) >> 1) mod size`; the shift improves
/// the bit distribution of the combined hash.
#[derive(Debug, Clone)]
pub struct Murmur3Indices {
    h0: u64,
    h1: u64,
    size: u64,
    i: u64,
}

impl Iterator for Murmur3Indices {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<usize> {
        self.i += 1;
        let hash = self.h0.wrapping_add(self.i.wrapping_mul(self.h1));
        Some(((hash >> 1) % self.size) as usize)
    }
}

/// Identity-style hasher for narrow integer domains: the element value itself,
/// reduced modulo [`size`](IndexHasher::size), is the single index.
///
/// Its [`quantity`](IndexHasher::quantity) is 1, so it only supports
/// collections with a hash count of 1. Chiefly useful in tests, where exact
/// control over which position an element marks makes saturation and
/// collision behavior reproducible.
pub struct ModuloHasher<E> {
    size: usize,
    _marker: PhantomData<fn(&E)>,
}

impl<E> ModuloHasher<E> {
    /// Creates a hasher reducing elements modulo `size`.
    ///
    /// # Panics
    ///
    /// Panics if `size` is 0.
    pub fn new(size: usize) -> Self {
        assert!(size > 0, "size must be at least 1");
        ModuloHasher {
            size,
            _marker: PhantomData,
        }
    }
}

impl<E> Clone for ModuloHasher<E> {
    fn clone(&self) -> Self {
        ModuloHasher {
            size: self.size,
            _marker: PhantomData,
        }
    }
}

impl<E> PartialEq for ModuloHasher<E> {
    fn eq(&self, other: &Self) -> bool {
        self.size == other.size
    }
}

impl<E> Eq for ModuloHasher<E> {}

impl<E> fmt::Debug for ModuloHasher<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModuloHasher")
            .field("size", &self.size)
            .finish()
    }
}

impl<E> IndexHasher<E> for ModuloHasher<E>
where
    E: Copy + Into<i64>,
{
    type Indices = iter::Repeat<usize>;

    fn indices(&self, element: &E) -> Self::Indices {
        let value: i64 = (*element).into();
        iter::repeat(value.rem_euclid(self.size as i64) as usize)
    }

    fn size(&self) -> usize {
        self.size
    }

    fn quantity(&self) -> usize {
        1
    }

    fn sized(&self, size: usize) -> Self {
        Self::new(size)
    }
}
