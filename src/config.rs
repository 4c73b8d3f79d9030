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

//! The validated configuration shared by every Bloom collection.

use std::fmt;
use std::marker::PhantomData;

use crate::error::Error;
use crate::error::Result;
use crate::hash::IndexHasher;

/// Binds an [`IndexHasher`] to a storage capacity and a hash multiplicity.
///
/// A config is immutable and fully determines how a Bloom collection maps
/// elements onto storage positions: each element marks (or probes) the first
/// `hash_count` indices of its hash stream. On construction the hasher is
/// rebound so that its modulus equals the capacity, which makes every index
/// it yields directly usable.
///
/// Two collections can only be combined when their configs are equal, and
/// configs compare on `hash_count` and hasher alone: the capacity is the
/// hasher's modulus, not an independent axis.
///
/// # Examples
///
/// ```
/// use bloomkit::config::BloomConfig;
/// use bloomkit::hash::IndexHasher;
/// use bloomkit::hash::Murmur3Hasher;
///
/// let hasher: Murmur3Hasher<u64> = Murmur3Hasher::new().sized(1000);
/// let config = BloomConfig::new(hasher, 10).unwrap();
/// assert_eq!(config.capacity(), 1000);
/// assert_eq!(config.hash_count(), 10);
/// ```
pub struct BloomConfig<E: ?Sized, H> {
    hasher: H,
    hash_count: usize,
    capacity: usize,
    _marker: PhantomData<fn(&E)>,
}

fn check_hasher<E: ?Sized, H: IndexHasher<E>>(hasher: &H, hash_count: usize) -> Result<()> {
    if hash_count < 1 {
        return Err(Error::invalid_argument("hash count not positive"));
    }
    if hash_count > hasher.quantity() {
        return Err(
            Error::invalid_argument("hash count exceeds hasher quantity")
                .with_context("hash_count", hash_count)
                .with_context("quantity", hasher.quantity()),
        );
    }
    Ok(())
}

impl<E: ?Sized, H: IndexHasher<E>> BloomConfig<E, H> {
    /// Creates a config whose capacity is the hasher's own modulus.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if `hash_count` is zero or exceeds the hasher's
    /// quantity; `InvalidState` if the hasher's modulus is zero and so cannot
    /// serve as a capacity.
    pub fn new(hasher: H, hash_count: usize) -> Result<Self> {
        check_hasher(&hasher, hash_count)?;
        let capacity = hasher.size();
        if capacity == 0 {
            return Err(Error::invalid_state("hasher size yields no capacity"));
        }
        Ok(BloomConfig {
            hasher,
            hash_count,
            capacity,
            _marker: PhantomData,
        })
    }

    /// Creates a config with an explicit capacity, rebinding the hasher down
    /// to it when the hasher's modulus is larger.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if `capacity` is zero, the hasher's modulus is
    /// smaller than `capacity`, or the hash count is out of range.
    pub fn with_capacity(capacity: usize, hasher: H, hash_count: usize) -> Result<Self> {
        check_hasher(&hasher, hash_count)?;
        if capacity == 0 {
            return Err(Error::invalid_argument("capacity not positive"));
        }
        if hasher.size() < capacity {
            return Err(Error::invalid_argument("hash size too small")
                .with_context("hash_size", hasher.size())
                .with_context("capacity", capacity));
        }
        let hasher = if hasher.size() > capacity {
            hasher.sized(capacity)
        } else {
            hasher
        };
        Ok(BloomConfig {
            hasher,
            hash_count,
            capacity,
            _marker: PhantomData,
        })
    }

    /// The number of storage positions backing the collection. Matches the
    /// length of the stores returned by set and map accessors.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// The hasher that generates index streams for the collection, already
    /// bound to [`capacity`](Self::capacity).
    pub fn hasher(&self) -> &H {
        &self.hasher
    }

    /// The number of indices marked or probed per element.
    pub fn hash_count(&self) -> usize {
        self.hash_count
    }

    /// Derives a config for a different capacity, rebinding the hasher.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` under the same conditions as
    /// [`with_capacity`](Self::with_capacity).
    pub fn resized(&self, capacity: usize) -> Result<Self> {
        if capacity == self.capacity {
            return Ok(self.clone());
        }
        Self::with_capacity(capacity, self.hasher.clone(), self.hash_count)
    }
}

impl<E: ?Sized, H: Clone> Clone for BloomConfig<E, H> {
    fn clone(&self) -> Self {
        BloomConfig {
            hasher: self.hasher.clone(),
            hash_count: self.hash_count,
            capacity: self.capacity,
            _marker: PhantomData,
        }
    }
}

impl<E: ?Sized, H: PartialEq> PartialEq for BloomConfig<E, H> {
    fn eq(&self, other: &Self) -> bool {
        self.hash_count == other.hash_count && self.hasher == other.hasher
    }
}

impl<E: ?Sized, H: Eq> Eq for BloomConfig<E, H> {}

impl<E: ?Sized, H: fmt::Debug> fmt::Debug for BloomConfig<E, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BloomConfig")
            .field("hasher", &self.hasher)
            .field("hash_count", &self.hash_count)
            .field("capacity", &self.capacity)
            .finish()
    }
}

impl<E: ?Sized, H: fmt::Debug> fmt::Display for BloomConfig<E, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hash count: {}, hasher: {:?}",
            self.hash_count, self.hasher
        )
    }
}
