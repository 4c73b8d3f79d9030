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

//! Hashers that turn elements into streams of storage indices.
//!
//! A Bloom collection never stores its elements; it marks positions derived
//! from them. The [`IndexHasher`] trait captures exactly that need: given an
//! element, produce a deterministic, lazy sequence of indices in
//! `[0, size)`. [`Murmur3Hasher`] is the general-purpose implementation,
//! deriving an unbounded index stream from a single 128-bit MurmurHash3
//! computation. [`ModuloHasher`] maps small integer domains directly onto
//! storage positions and is chiefly useful in tests and examples.

mod hasher;
mod murmurhash;

pub use self::hasher::IndexHasher;
pub use self::hasher::ModuloHasher;
pub use self::hasher::Murmur3Hasher;
pub use self::hasher::Murmur3Indices;
pub(crate) use self::murmurhash::MurmurHash3X64128;

/// The seed 9001 used by default is a prime number that was chosen very early
/// on in experimental testing of the MurmurHash family.
///
/// Choosing a seed is somewhat arbitrary. What matters is that two collections
/// can only be combined when their hashers (and therefore their seeds) are
/// equal, since otherwise the assumed 1:1 relationship between an element and
/// its marked positions would be violated.
pub const DEFAULT_SEED: u64 = 9001;
