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
use bloomkit::hash::ModuloHasher;
use bloomkit::hash::Murmur3Hasher;

fn int_bloom(capacity: usize, hash_count: usize) -> Bloom<i32, Murmur3Hasher<i32>> {
    Bloom::with_hasher(Murmur3Hasher::new().sized(capacity), hash_count).unwrap()
}

#[test]
fn test_basic_containment() {
    let bloom = int_bloom(1000, 10);
    let mut set = bloom.new_set();
    assert_eq!(set.estimated_fpp(), 0.0);
    assert!(set.insert_all(0..10).unwrap());

    for i in 0..10 {
        assert!(set.contains(&i), "inserted element {i} must be contained");
    }
    assert!(set.contains_all(0..10));
    assert!(!set.is_empty());

    let fpp = set.estimated_fpp();
    assert!(fpp > 0.0 && fpp < 1.0, "fpp should be strictly between 0 and 1, got {fpp}");
}

#[test]
fn test_saturation_drives_fpp_to_one() {
    let bloom: Bloom<i32, ModuloHasher<i32>> =
        Bloom::with_hasher(ModuloHasher::new(10), 1).unwrap();
    let mut set = bloom.new_set();

    let mut fpp = set.estimated_fpp();
    assert_eq!(fpp, 0.0);
    for i in 0..10 {
        set.insert(&i).unwrap();
        let next = set.estimated_fpp();
        assert!(next > fpp, "fpp must be strictly increasing, {next} after {fpp}");
        fpp = next;
    }
    assert_eq!(fpp, 1.0);
    assert!(set.is_full());
}

#[test]
fn test_insertion_implies_containment() {
    let bloom = int_bloom(500, 7);
    let mut set = bloom.new_set();
    let mut ones = 0;
    for i in 0..50 {
        set.insert(&i).unwrap();
        assert!(set.contains(&i));
        let next = set.bits().count_ones();
        assert!(next >= ones, "set bits may never decrease");
        ones = next;
    }
}

#[test]
fn test_insert_all_idempotent_after_first_success() {
    let bloom = int_bloom(1000, 10);
    let mut set = bloom.new_set();
    assert!(set.insert_all(0..10).unwrap());
    let snapshot = set.bits().immutable_copy();
    assert!(!set.insert_all(0..10).unwrap());
    assert_eq!(set.bits(), snapshot);
}

#[test]
fn test_union_matches_element_wise_insertion() {
    let bloom = int_bloom(1000, 10);
    let mut by_union = bloom.new_set();
    let mut by_elements = bloom.new_set();
    let mut other = bloom.new_set();
    other.insert_all(0..10).unwrap();

    by_elements.insert_all(0..10).unwrap();
    assert!(by_union.union(&other).unwrap());
    assert_eq!(by_union, by_elements);
    assert!(!by_union.union(&other).unwrap());
    assert_eq!(by_union, by_elements);
}

#[test]
fn test_union_noop_iff_superset() {
    let bloom = int_bloom(1000, 10);
    let mut a = bloom.new_set();
    let mut b = bloom.new_set();
    a.insert_all(0..20).unwrap();
    b.insert_all(10..15).unwrap();

    // (a ∪ b).bits == a.bits exactly when a already contains b
    let mut merged = a.mutable_copy();
    let changed = merged.union(&b).unwrap();
    assert_eq!(a.is_superset(&b).unwrap(), !changed);
    assert_eq!(a.is_superset(&b).unwrap(), merged.bits() == a.bits());
}

#[test]
fn test_clear_is_idempotent() {
    let bloom = int_bloom(200, 5);
    let mut set = bloom.new_set();
    set.insert_all(0..10).unwrap();
    assert!(!set.is_empty());
    set.clear().unwrap();
    assert!(set.is_empty());
    set.clear().unwrap();
    assert!(set.is_empty());
    assert_eq!(set.estimated_fpp(), 0.0);
}

#[test]
fn test_bounded_by_reflexive_and_asymmetric() {
    let bloom = int_bloom(1000, 10);
    let mut a = bloom.new_set();
    a.insert_all(0..30).unwrap();
    assert!(a.bounded_by(&a).unwrap().is_full());

    let mut b = a.mutable_copy();
    b.insert_all(30..60).unwrap();

    // everything in a is necessarily in b
    let c = a.bounded_by(&b).unwrap();
    assert!(c.is_full());
    for i in 0..60 {
        assert!(c.contains(&i));
    }

    // but b has marks a lacks
    let d = b.bounded_by(&a).unwrap();
    for i in 0..30 {
        assert!(d.contains(&i));
    }
    assert!(!d.is_full());
    assert!((30..60).any(|i| !d.contains(&i)));
}

#[test]
fn test_compatibility_rejections() {
    let mut counted = int_bloom(1000, 10).new_set();
    let differently_counted = int_bloom(1000, 9).new_set();
    let differently_hashed =
        Bloom::<i32, _>::with_hasher(Murmur3Hasher::with_seed(7).sized(1000), 10)
            .unwrap()
            .new_set();

    for other in [&differently_counted, &differently_hashed] {
        assert_eq!(
            counted.union(other).unwrap_err().kind(),
            ErrorKind::InvalidArgument
        );
        assert_eq!(
            counted.is_superset(other).unwrap_err().kind(),
            ErrorKind::InvalidArgument
        );
        assert_eq!(
            counted.bounded_by(other).unwrap_err().kind(),
            ErrorKind::InvalidArgument
        );
    }
}

#[test]
fn test_equality_and_hash_consistency() {
    use std::collections::hash_map::DefaultHasher;
    use std::hash::Hash;
    use std::hash::Hasher;

    let bloom = int_bloom(1000, 10);
    let mut b1 = bloom.new_set();
    let mut b2 = bloom.new_set();
    let b3 = int_bloom(1000, 2).new_set();
    assert_eq!(b1, b2);
    assert_ne!(b1, b3);

    b1.insert(&1).unwrap();
    assert_ne!(b1, b2);
    b2.insert(&1).unwrap();
    assert_eq!(b1, b2);

    let digest = |set: &bloomkit::set::BloomSet<i32, Murmur3Hasher<i32>>| {
        let mut hasher = DefaultHasher::new();
        set.hash(&mut hasher);
        hasher.finish()
    };
    assert_eq!(digest(&b1), digest(&b2));
}

#[test]
fn test_copies_and_views() {
    let bloom = int_bloom(1000, 10);
    let mut set = bloom.new_set();
    set.insert_all(0..10).unwrap();

    assert_eq!(set.immutable_copy(), set);
    assert_eq!(set.mutable_copy(), set);

    // copies are independent
    let mut copy = set.mutable_copy();
    copy.insert(&99).unwrap();
    assert_ne!(copy.bits(), set.bits());

    // views are live and write-protected
    let mut view = set.immutable_view();
    assert_eq!(view.insert(&42).unwrap_err().kind(), ErrorKind::Immutable);
    set.insert(&42).unwrap();
    assert!(view.contains(&42));
}

#[test]
fn test_adopted_bits_and_resized_hashing() {
    let bloom = int_bloom(1000, 10);
    let set = bloom
        .new_set_with(bloomkit::bits::BitStore::new(500))
        .unwrap();
    assert_eq!(set.config().capacity(), 500);
    assert_eq!(set.bits().len(), 500);

    let mut set = set;
    set.insert(&123).unwrap();
    assert!(set.contains(&123));
}
