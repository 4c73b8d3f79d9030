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

use bloomkit::error::ErrorKind;
use bloomkit::factory::Bloom;
use bloomkit::hash::IndexHasher;
use bloomkit::hash::Murmur3Hasher;
use bloomkit::lattice::OrderedLattice;

fn int_bloom(capacity: usize, hash_count: usize) -> Bloom<i32, Murmur3Hasher<i32>> {
    Bloom::with_hasher(Murmur3Hasher::new().sized(capacity), hash_count).unwrap()
}

#[test]
fn test_set_wrappers() {
    let mut set = int_bloom(500, 5).new_set();
    set.insert_all(0..20).unwrap();
    assert!(set.is_mutable());

    // view: shared, live, write-protected
    let mut view = set.immutable_view();
    assert!(!view.is_mutable());
    assert_eq!(view.insert(&50).unwrap_err().kind(), ErrorKind::Immutable);
    assert_eq!(
        view.insert_all(50..52).unwrap_err().kind(),
        ErrorKind::Immutable
    );
    assert_eq!(view.clear().unwrap_err().kind(), ErrorKind::Immutable);
    set.insert(&50).unwrap();
    assert!(view.contains(&50));

    // a view of a view stays pinned to the same storage
    assert!(view.immutable_view().contains(&50));

    // frozen copy: equal now, detached from later mutation
    let frozen = set.immutable_copy();
    assert_eq!(frozen, set);
    assert!(!frozen.is_mutable());
    set.insert(&60).unwrap();
    assert_ne!(frozen.bits(), set.bits());

    // mutable copy: equal now, fully independent
    let mut copy = frozen.mutable_copy();
    assert!(copy.is_mutable());
    assert_eq!(copy, frozen);
    copy.insert(&70).unwrap();
    assert_ne!(copy.bits(), frozen.bits());
}

#[test]
fn test_map_wrappers() {
    let lattice = OrderedLattice::new(10_000i64, 0);
    let mut map = int_bloom(500, 5).new_map(lattice);
    map.insert(&1, 100).unwrap();

    let mut view = map.immutable_view();
    assert!(!view.is_mutable());
    assert_eq!(
        view.insert(&2, 5).unwrap_err().kind(),
        ErrorKind::Immutable
    );
    assert_eq!(view.clear().unwrap_err().kind(), ErrorKind::Immutable);
    map.insert(&2, 5).unwrap();
    assert!(view.contains_key(&2));
    assert_eq!(view.supremum(&1), 100);

    // projections of an immutable wrapper are immutable too
    let mut projected = view.as_set();
    assert!(!projected.is_mutable());
    assert_eq!(projected.insert(&9).unwrap_err().kind(), ErrorKind::Immutable);

    let supremum_at_snapshot = map.supremum(&3);
    let frozen = map.immutable_copy();
    map.insert(&3, 42).unwrap();
    assert_eq!(frozen.supremum(&3), supremum_at_snapshot);
    assert!(map.supremum(&3) >= 42);

    let mut copy = map.mutable_copy();
    assert_eq!(copy, map);
    copy.insert(&4, 9).unwrap();
    assert_ne!(copy, map);
}

#[test]
fn test_copies_of_restricted_views_keep_their_window() {
    let lattice = OrderedLattice::new(10_000i64, 0);
    let mut map = int_bloom(500, 5).new_map(lattice);
    map.insert(&1, 900).unwrap();

    let view = map.bounded_above(1000).unwrap();
    let mut copy = view.mutable_copy();

    // the copy is detached from the shared cells
    map.insert(&2, 800).unwrap();
    assert!(!copy.contains_key(&2));

    // but keeps the narrowed access lattice
    assert_eq!(copy.lattice(), view.lattice());
    assert_eq!(
        copy.insert(&3, 5000).unwrap_err().kind(),
        ErrorKind::InvalidArgument
    );
    copy.insert(&3, 750).unwrap();
    assert_eq!(copy.supremum(&3), 750);
    assert_eq!(copy.supremum(&1), 900);
}

#[test]
fn test_failed_operations_leave_state_unchanged() {
    let lattice = OrderedLattice::new(10_000i64, 0);
    let mut map = int_bloom(500, 5).new_map(lattice);
    map.insert(&1, 100).unwrap();
    let before = map.immutable_copy();

    // rejected value: no cell moves
    assert!(map.insert(&2, 20_000).is_err());
    assert_eq!(before, map);

    // rejected wrapper: no cell moves
    let mut view = map.immutable_view();
    assert!(view.insert(&2, 10).is_err());
    assert!(view.clear().is_err());
    assert_eq!(before, map);
}
