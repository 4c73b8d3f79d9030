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

/// The two-point lattice `{false ≤ true}` with ∨ as join and ∧ as meet.
///
/// A Bloom map over this lattice behaves exactly like a Bloom set: writes
/// mark cells `true` and a key is possibly present when none of its cells is
/// still `false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoolLattice {
    top: bool,
}

impl BoolLattice {
    /// Creates the full two-point lattice.
    pub fn new() -> Self {
        BoolLattice { top: true }
    }
}

impl Default for BoolLattice {
    fn default() -> Self {
        Self::new()
    }
}

impl Lattice<bool> for BoolLattice {
    fn top(&self) -> bool {
        self.top
    }

    fn bottom(&self) -> bool {
        false
    }

    fn meet(&self, a: &bool, b: &bool) -> bool {
        *a && *b
    }

    fn join(&self, a: &bool, b: &bool) -> bool {
        *a || *b
    }

    fn contains(&self, value: &bool) -> bool {
        self.top || !*value
    }

    fn is_ordered(&self, a: &bool, b: &bool) -> bool {
        !*a || *b
    }

    fn equivalent(&self, a: &bool, b: &bool) -> bool {
        a == b
    }

    fn bounded_above(&self, upper: bool) -> Self {
        BoolLattice {
            top: self.top && upper,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_point_order() {
        let lattice = BoolLattice::new();
        assert!(lattice.is_ordered(&false, &true));
        assert!(!lattice.is_ordered(&true, &false));
        assert_eq!(lattice.join(&false, &true), true);
        assert_eq!(lattice.meet(&false, &true), false);
        assert!(lattice.contains(&true) && lattice.contains(&false));
    }

    #[test]
    fn test_degenerate_cap() {
        let capped = BoolLattice::new().bounded_above(false);
        assert_eq!(capped.top(), false);
        assert!(!capped.contains(&true));
        assert_ne!(capped, BoolLattice::new());
    }
}
