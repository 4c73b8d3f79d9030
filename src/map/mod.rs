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

//! Lattice-valued Bloom maps, sometimes called compact approximators.
//!
//! A classical Bloom filter is the special case of a [`BloomMap`] whose
//! value space is the two-point lattice `{false ≤ true}`: inserting joins
//! cells up to `true`, and a membership probe checks that no cell is still
//! the bottom. Swapping in an arbitrary bounded lattice keeps the machinery
//! and changes what the structure remembers. Over an ordered integer
//! lattice, for instance, the map becomes an "approximate max": writes
//! raise cells with `join`, and [`supremum`](BloomMap::supremum) meets the
//! cells a key hashes to, yielding a provable upper bound on every value
//! ever written against that key, exact when no collision raised those
//! cells further.
//!
//! Because cells only move upward in the store lattice, the map never loses
//! information in the lattice sense; that monotonicity is what makes the
//! supremum a sound bound.
//!
//! # Compatibility
//!
//! Pairwise operations require equal configs *and* equal access lattices,
//! and fail with `InvalidArgument` otherwise.
//!
//! # Usage
//!
//! ```rust
//! use bloomkit::factory::Bloom;
//! use bloomkit::hash::IndexHasher;
//! use bloomkit::hash::Murmur3Hasher;
//! use bloomkit::lattice::OrderedLattice;
//!
//! let hasher: Murmur3Hasher<u64> = Murmur3Hasher::new().sized(1000);
//! let bloom = Bloom::with_hasher(hasher, 10).unwrap();
//! let mut map = bloom.new_map(OrderedLattice::new(10_000i64, 0));
//!
//! map.insert(&1, 50).unwrap();
//! assert_eq!(map.supremum(&1), 50);
//! assert!(map.contains_key(&1));
//!
//! // a live view that caps what reads report
//! let capped = map.bounded_above(40).unwrap();
//! assert_eq!(capped.supremum(&1), 40);
//! ```

mod bloom_map;
mod projections;

pub use self::bloom_map::BloomMap;
