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

use crate::lattice::Lattice;

/// The interval `[bottom, top]` of a totally ordered type, with `min` as meet
/// and `max` as join.
///
/// A Bloom map over an ordered lattice is an "approximate max" structure:
/// [`supremum`](crate::map::BloomMap::supremum) reports an upper bound on
/// every value ever written against a key, exact in the absence of
/// collisions.
///
/// Note that meet and join are the order's own `min`/`max`; a sub-lattice
/// obtained from [`bounded`](Self::bounded) narrows what
/// [`contains`](Lattice::contains) accepts but does not clamp results.
///
/// # Examples
///
/// ```
/// use bloomkit::lattice::Lattice;
/// use bloomkit::lattice::OrderedLattice;
///
/// let lattice = OrderedLattice::new(10_000i64, 0);
/// assert_eq!(lattice.join(&3, &8), 8);
/// assert_eq!(lattice.meet(&3, &8), 3);
/// assert!(lattice.contains(&500));
///
/// let narrow = lattice.bounded(1000, 100);
/// assert!(!narrow.contains(&50));
/// assert_eq!(narrow, OrderedLattice::new(1000, 100));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderedLattice<V> {
    top: V,
    bottom: V,
}

impl<V: Ord + Clone> OrderedLattice<V> {
    /// Creates the lattice over `[bottom, top]`.
    ///
    /// # Panics
    ///
    /// Panics if `top < bottom`.
    pub fn new(top: V, bottom: V) -> Self {
        assert!(bottom <= top, "lattice bounds out of order");
        OrderedLattice { top, bottom }
    }

    /// The sub-lattice over `[bottom, top]`, which must lie within this one.
    ///
    /// # Panics
    ///
    /// Panics if the new interval is out of order or escapes this lattice.
    pub fn bounded(&self, top: V, bottom: V) -> Self {
        assert!(
            self.contains(&top) && self.contains(&bottom),
            "sub-lattice bounds escape the lattice"
        );
        Self::new(top, bottom)
    }
}

impl<V: Ord + Clone> Lattice<V> for OrderedLattice<V> {
    fn top(&self) -> V {
        self.top.clone()
    }

    fn bottom(&self) -> V {
        self.bottom.clone()
    }

    fn meet(&self, a: &V, b: &V) -> V {
        a.min(b).clone()
    }

    fn join(&self, a: &V, b: &V) -> V {
        a.max(b).clone()
    }

    fn contains(&self, value: &V) -> bool {
        self.bottom <= *value && *value <= self.top
    }

    fn is_ordered(&self, a: &V, b: &V) -> bool {
        a <= b
    }

    fn equivalent(&self, a: &V, b: &V) -> bool {
        a == b
    }

    fn bounded_above(&self, upper: V) -> Self {
        self.bounded(upper, self.bottom.clone())
    }
}
