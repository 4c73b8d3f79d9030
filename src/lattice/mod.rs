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

//! Bounded lattices: the value spaces a Bloom map stores into.
//!
//! A classical Bloom filter stores into the two-point lattice
//! `{false ≤ true}`: inserting marks cells with the top, and a query checks
//! that no cell is still the bottom. A Bloom map keeps the same machinery but
//! stores into an arbitrary bounded lattice: writes `join` upward, reads
//! `meet` downward, and the bottom stays the "never written" marker. The
//! [`Lattice`] trait is what the map machinery needs of such a space;
//! [`OrderedLattice`] (any totally ordered interval) and [`BoolLattice`] (the
//! classical case) are the provided instances.
//!
//! Every lattice here is bounded: [`top`](Lattice::top) and
//! [`bottom`](Lattice::bottom) are total. That a store lattice must be
//! bounded below is therefore a property of the type, not a runtime check.

mod boolean;
mod ordered;

pub use self::boolean::BoolLattice;
pub use self::ordered::OrderedLattice;

/// A bounded lattice over values of type `V`.
///
/// Implementations are value objects: two maps are compatible only when
/// their lattices compare equal, so `PartialEq` must cover the full identity
/// (for an interval lattice, its bounds).
///
/// The laws the Bloom structures rely on:
/// - `join` and `meet` are commutative, associative, and idempotent;
/// - `bottom() ≤ v ≤ top()` for every contained `v`;
/// - `is_ordered(a, b)` agrees with `join(a, b) = b` and `meet(a, b) = a`.
pub trait Lattice<V>: Clone + PartialEq {
    /// The greatest element.
    fn top(&self) -> V;

    /// The least element.
    fn bottom(&self) -> V;

    /// The greatest lower bound of `a` and `b`.
    fn meet(&self, a: &V, b: &V) -> V;

    /// The least upper bound of `a` and `b`.
    fn join(&self, a: &V, b: &V) -> V;

    /// Whether `value` belongs to this lattice.
    fn contains(&self, value: &V) -> bool;

    /// Whether `a ≤ b`.
    fn is_ordered(&self, a: &V, b: &V) -> bool;

    /// The equality relation over values.
    fn equivalent(&self, a: &V, b: &V) -> bool;

    /// The sub-lattice with its top lowered to `upper`.
    ///
    /// Callers must pass an `upper` this lattice [`contains`](Self::contains);
    /// implementations may panic otherwise.
    fn bounded_above(&self, upper: V) -> Self;
}
