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

//! Fixed-length bit containers with a sharing and mutability discipline.
//!
//! [`BitStore`] is the storage primitive under every Bloom set: a fixed-length
//! run of bits packed into `u64` words. A `BitStore` value is a *handle*;
//! cloning it yields another handle onto the same storage, so views stay live
//! as the underlying bits change. Immutability is a property of the handle:
//! [`immutable_view`](BitStore::immutable_view) shares storage but refuses
//! writes, while [`immutable_copy`](BitStore::immutable_copy) and
//! [`mutable_copy`](BitStore::mutable_copy) snapshot it.
//!
//! Stores may also be *derived*: computed bit-by-bit from other storage on
//! every read (see [`BitStore::flipped`], or the implication and projection
//! views the Bloom structures build). Derived stores compare, hash, and copy
//! exactly like word-backed ones.

mod store;

pub use self::store::BitStore;
pub use self::store::Ones;

pub(crate) use self::store::BitAccess;
