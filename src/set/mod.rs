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

//! Bloom filter sets. See <https://en.wikipedia.org/wiki/Bloom_filter>.
//!
//! A [`BloomSet`] answers approximate membership questions over a bit store:
//! inserting an element marks its hashed positions, and
//! [`contains`](BloomSet::contains) may return `true` for elements never
//! inserted but never returns `false` for one that was.
//!
//! # Compatibility
//!
//! Operations involving two sets are only defined for *compatible* instances:
//! sets whose [`BloomConfig`](crate::config::BloomConfig)s are equal. They
//! fail with `InvalidArgument` otherwise. Two sets are equal when they are
//! compatible and their bits are equal.
//!
//! # Usage
//!
//! ```rust
//! use bloomkit::factory::Bloom;
//! use bloomkit::hash::IndexHasher;
//! use bloomkit::hash::Murmur3Hasher;
//!
//! let hasher: Murmur3Hasher<&str> = Murmur3Hasher::new().sized(10_000);
//! let bloom = Bloom::with_hasher(hasher, 7).unwrap();
//!
//! let mut set = bloom.new_set();
//! set.insert(&"apple").unwrap();
//! set.insert(&"banana").unwrap();
//!
//! assert!(set.contains(&"apple")); // definitely inserted
//! assert!(!set.is_empty());
//! assert!(set.estimated_fpp() > 0.0);
//!
//! let mut other = bloom.new_set();
//! other.insert(&"cherry").unwrap();
//! set.union(&other).unwrap();
//! assert!(set.contains(&"cherry"));
//! ```

mod bloom_set;

pub use self::bloom_set::BloomSet;
