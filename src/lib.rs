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

//! # bloomkit
//!
//! Probabilistic sets and maps built on one hash-and-bit-mark core: the
//! classical Bloom filter ([`set::BloomSet`]) and its generalization to
//! arbitrary bounded lattices ([`map::BloomMap`], sometimes called a compact
//! approximator). Both answer approximate containment questions with a
//! configurable false-positive probability and no false negatives.
//!
//! Everything starts from a [`config::BloomConfig`], which binds an index
//! hasher to a capacity and a hash multiplicity, and from the
//! [`factory::Bloom`] entry point that turns a config into collections:
//!
//! ```rust
//! use bloomkit::factory::Bloom;
//! use bloomkit::hash::IndexHasher;
//! use bloomkit::hash::Murmur3Hasher;
//! use bloomkit::lattice::OrderedLattice;
//!
//! let hasher: Murmur3Hasher<u64> = Murmur3Hasher::new().sized(10_000);
//! let bloom = Bloom::with_hasher(hasher, 7).unwrap();
//!
//! // the classical filter
//! let mut seen = bloom.new_set();
//! seen.insert(&1234).unwrap();
//! assert!(seen.contains(&1234));
//!
//! // the lattice generalization: an approximate max over keys
//! let mut highest = bloom.new_map(OrderedLattice::new(u32::MAX, 0));
//! highest.insert(&1234, 99).unwrap();
//! assert!(highest.supremum(&1234) >= 99);
//! ```
//!
//! The collections share a mutability discipline: wrappers are handles over
//! shared storage, `immutable_view` shares and protects, `immutable_copy`
//! and `mutable_copy` snapshot. Derived views (`bounded_by` on sets, `keys`,
//! `as_set`, and `bounded_above` on maps) stay live over the storage they
//! came from.
//!
//! The library is single-threaded by design: handles are `!Send`/`!Sync`,
//! and no locking is performed.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_docs)]

pub mod bits;
pub mod config;
pub mod error;
pub mod factory;
pub mod hash;
pub mod lattice;
pub mod map;
pub mod set;
pub mod store;
