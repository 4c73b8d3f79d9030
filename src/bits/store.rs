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

use std::cell::RefCell;
use std::fmt;
use std::hash::Hash;
use std::hash::Hasher;
use std::rc::Rc;

use crate::error::Error;
use crate::error::Result;

/// Read/write access for derived bit stores.
///
/// A derived store computes its bits from other live storage. Implementations
/// decide whether writes are meaningful; read-only views return `Immutable`
/// from the write methods.
pub(crate) trait BitAccess {
    fn len(&self) -> usize;
    fn get(&self, index: usize) -> bool;
    /// Writes `value` at `index` and returns the previous bit.
    fn set(&self, index: usize, value: bool) -> Result<bool>;
    fn clear_all(&self) -> Result<()>;
    fn is_mutable(&self) -> bool;
}

#[derive(Clone)]
enum Repr {
    Words {
        data: Rc<RefCell<Vec<u64>>>,
        len: usize,
        mutable: bool,
    },
    Derived {
        access: Rc<dyn BitAccess>,
        writable: bool,
    },
}

/// A fixed-length, shareable bit container.
///
/// `BitStore` values are handles: `Clone` shares the underlying storage, and
/// mutations through any mutable handle are visible through every other
/// handle. Whether a given handle may mutate is decided at handle creation
/// (see [`immutable_view`](Self::immutable_view)); mutating calls on a
/// non-mutable handle fail with [`Immutable`](crate::error::ErrorKind).
///
/// Bits are packed into `u64` words; unused bits of the trailing word are
/// kept at zero so that equality, hashing, and popcounts can work word-wise.
///
/// # Examples
///
/// ```
/// use bloomkit::bits::BitStore;
///
/// let mut bits = BitStore::new(100);
/// assert!(!bits.get_then_set(41, true).unwrap());
/// assert!(bits.get(41));
/// assert_eq!(bits.count_ones(), 1);
///
/// let view = bits.immutable_view();
/// bits.set(7, true).unwrap();
/// assert!(view.get(7)); // live
/// assert!(view.immutable_copy().get(7));
/// ```
#[derive(Clone)]
pub struct BitStore {
    repr: Repr,
}

const WORD_BITS: usize = 64;

fn word_count(len: usize) -> usize {
    len.div_ceil(WORD_BITS)
}

#[inline]
fn word_index(index: usize) -> usize {
    index >> 6
}

#[inline]
fn bit_mask(index: usize) -> u64 {
    1u64 << (index & 63)
}

/// Mask selecting the in-range bits of the trailing word.
fn tail_mask(len: usize) -> u64 {
    match len % WORD_BITS {
        0 => u64::MAX,
        bits => (1u64 << bits) - 1,
    }
}

impl BitStore {
    /// Creates a mutable store of `len` zero bits.
    pub fn new(len: usize) -> Self {
        BitStore {
            repr: Repr::Words {
                data: Rc::new(RefCell::new(vec![0u64; word_count(len)])),
                len,
                mutable: true,
            },
        }
    }

    pub(crate) fn derived(access: Rc<dyn BitAccess>, writable: bool) -> Self {
        BitStore {
            repr: Repr::Derived { access, writable },
        }
    }

    /// The number of bits in the store.
    pub fn len(&self) -> usize {
        match &self.repr {
            Repr::Words { len, .. } => *len,
            Repr::Derived { access, .. } => access.len(),
        }
    }

    /// Whether the store holds no bits at all (zero length).
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether writes through this handle are permitted.
    pub fn is_mutable(&self) -> bool {
        match &self.repr {
            Repr::Words { mutable, .. } => *mutable,
            Repr::Derived { access, writable } => *writable && access.is_mutable(),
        }
    }

    /// Reads the bit at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn get(&self, index: usize) -> bool {
        self.check_index(index);
        match &self.repr {
            Repr::Words { data, .. } => {
                data.borrow()[word_index(index)] & bit_mask(index) != 0
            }
            Repr::Derived { access, .. } => access.get(index),
        }
    }

    /// Writes the bit at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn set(&mut self, index: usize, value: bool) -> Result<()> {
        self.get_then_set(index, value).map(|_| ())
    }

    /// Writes the bit at `index`, returning its previous value.
    ///
    /// A single traversal of this method is how a Bloom set detects whether an
    /// insertion changed state.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn get_then_set(&mut self, index: usize, value: bool) -> Result<bool> {
        self.check_index(index);
        match &self.repr {
            Repr::Words { data, mutable, .. } => {
                if !*mutable {
                    return Err(Error::immutable("bit store"));
                }
                let mut words = data.borrow_mut();
                let word = &mut words[word_index(index)];
                let mask = bit_mask(index);
                let previous = *word & mask != 0;
                if value {
                    *word |= mask;
                } else {
                    *word &= !mask;
                }
                Ok(previous)
            }
            Repr::Derived { access, writable } => {
                if !*writable {
                    return Err(Error::immutable("bit view"));
                }
                access.set(index, value)
            }
        }
    }

    /// Sets every bit to zero.
    pub fn clear(&mut self) -> Result<()> {
        match &self.repr {
            Repr::Words { data, mutable, .. } => {
                if !*mutable {
                    return Err(Error::immutable("bit store"));
                }
                data.borrow_mut().fill(0);
                Ok(())
            }
            Repr::Derived { access, writable } => {
                if !*writable {
                    return Err(Error::immutable("bit view"));
                }
                access.clear_all()
            }
        }
    }

    /// Sets every bit to `value`.
    pub fn fill(&mut self, value: bool) -> Result<()> {
        if !value {
            return self.clear();
        }
        if let Repr::Words { data, len, mutable } = &self.repr {
            if !*mutable {
                return Err(Error::immutable("bit store"));
            }
            let mut words = data.borrow_mut();
            words.fill(u64::MAX);
            if let Some(last) = words.last_mut() {
                *last &= tail_mask(*len);
            }
            return Ok(());
        }
        for index in 0..self.len() {
            self.set(index, true)?;
        }
        Ok(())
    }

    /// Counts the set bits.
    pub fn count_ones(&self) -> usize {
        match &self.repr {
            Repr::Words { data, .. } => data
                .borrow()
                .iter()
                .map(|word| word.count_ones() as usize)
                .sum(),
            Repr::Derived { .. } => self.ones().count(),
        }
    }

    /// Whether every bit is zero.
    pub fn all_zeros(&self) -> bool {
        match &self.repr {
            Repr::Words { data, .. } => data.borrow().iter().all(|&word| word == 0),
            Repr::Derived { .. } => (0..self.len()).all(|index| !self.get(index)),
        }
    }

    /// Whether every bit is one.
    pub fn all_ones(&self) -> bool {
        match &self.repr {
            Repr::Words { data, len, .. } => {
                let words = data.borrow();
                match words.split_last() {
                    None => true,
                    Some((last, body)) => {
                        body.iter().all(|&word| word == u64::MAX) && *last == tail_mask(*len)
                    }
                }
            }
            Repr::Derived { .. } => (0..self.len()).all(|index| self.get(index)),
        }
    }

    /// Whether every bit set in `other` is also set in this store.
    ///
    /// # Panics
    ///
    /// Panics if the stores differ in length.
    pub fn contains(&self, other: &BitStore) -> bool {
        self.check_len(other);
        if let (
            Repr::Words { data: a, .. },
            Repr::Words { data: b, .. },
        ) = (&self.repr, &other.repr)
        {
            if Rc::ptr_eq(a, b) {
                return true;
            }
            let a = a.borrow();
            let b = b.borrow();
            return a.iter().zip(b.iter()).all(|(x, y)| y & !x == 0);
        }
        (0..self.len()).all(|index| self.get(index) || !other.get(index))
    }

    /// Sets every bit that is set in `other`.
    ///
    /// # Panics
    ///
    /// Panics if the stores differ in length.
    pub fn or_with(&mut self, other: &BitStore) -> Result<()> {
        self.check_len(other);
        if !self.is_mutable() {
            return Err(Error::immutable("bit store"));
        }
        if let (
            Repr::Words { data: a, .. },
            Repr::Words { data: b, .. },
        ) = (&self.repr, &other.repr)
        {
            if !Rc::ptr_eq(a, b) {
                let mut a = a.borrow_mut();
                let b = b.borrow();
                for (x, y) in a.iter_mut().zip(b.iter()) {
                    *x |= y;
                }
            }
            return Ok(());
        }
        for index in 0..other.len() {
            if other.get(index) {
                self.set(index, true)?;
            }
        }
        Ok(())
    }

    /// A live, read-only view with every bit complemented.
    pub fn flipped(&self) -> BitStore {
        BitStore::derived(
            Rc::new(FlippedBits {
                source: self.immutable_view(),
            }),
            false,
        )
    }

    /// Iterates the positions of set bits, in increasing order.
    pub fn ones(&self) -> Ones<'_> {
        Ones {
            store: self,
            index: 0,
        }
    }

    /// A handle sharing this storage that refuses writes. Reads stay live.
    pub fn immutable_view(&self) -> BitStore {
        let repr = match &self.repr {
            Repr::Words { data, len, .. } => Repr::Words {
                data: Rc::clone(data),
                len: *len,
                mutable: false,
            },
            Repr::Derived { access, .. } => Repr::Derived {
                access: Rc::clone(access),
                writable: false,
            },
        };
        BitStore { repr }
    }

    /// A frozen snapshot of the current bits.
    pub fn immutable_copy(&self) -> BitStore {
        BitStore {
            repr: Repr::Words {
                data: Rc::new(RefCell::new(self.to_words())),
                len: self.len(),
                mutable: false,
            },
        }
    }

    /// An independently mutable snapshot of the current bits.
    pub fn mutable_copy(&self) -> BitStore {
        BitStore {
            repr: Repr::Words {
                data: Rc::new(RefCell::new(self.to_words())),
                len: self.len(),
                mutable: true,
            },
        }
    }

    /// Canonical word image of the bits, trailing bits zero.
    fn to_words(&self) -> Vec<u64> {
        match &self.repr {
            Repr::Words { data, .. } => data.borrow().clone(),
            Repr::Derived { .. } => {
                let len = self.len();
                let mut words = vec![0u64; word_count(len)];
                for index in self.ones() {
                    words[word_index(index)] |= bit_mask(index);
                }
                words
            }
        }
    }

    fn check_index(&self, index: usize) {
        let len = self.len();
        assert!(index < len, "bit index out of range: {index} >= {len}");
    }

    fn check_len(&self, other: &BitStore) {
        assert_eq!(
            self.len(),
            other.len(),
            "bit stores differ in length"
        );
    }
}

impl PartialEq for BitStore {
    fn eq(&self, other: &Self) -> bool {
        if self.len() != other.len() {
            return false;
        }
        if let (
            Repr::Words { data: a, .. },
            Repr::Words { data: b, .. },
        ) = (&self.repr, &other.repr)
        {
            return Rc::ptr_eq(a, b) || *a.borrow() == *b.borrow();
        }
        (0..self.len()).all(|index| self.get(index) == other.get(index))
    }
}

impl Eq for BitStore {}

impl Hash for BitStore {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        self.to_words().hash(state);
    }
}

impl fmt::Debug for BitStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BitStore")
            .field("len", &self.len())
            .field("ones", &self.count_ones())
            .field("mutable", &self.is_mutable())
            .finish()
    }
}

struct FlippedBits {
    source: BitStore,
}

impl BitAccess for FlippedBits {
    fn len(&self) -> usize {
        self.source.len()
    }

    fn get(&self, index: usize) -> bool {
        !self.source.get(index)
    }

    fn set(&self, _index: usize, _value: bool) -> Result<bool> {
        Err(Error::immutable("bit view"))
    }

    fn clear_all(&self) -> Result<()> {
        Err(Error::immutable("bit view"))
    }

    fn is_mutable(&self) -> bool {
        false
    }
}

/// Iterator over the positions of set bits. See [`BitStore::ones`].
pub struct Ones<'a> {
    store: &'a BitStore,
    index: usize,
}

impl Iterator for Ones<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        while self.index < self.store.len() {
            let index = self.index;
            self.index += 1;
            if self.store.get(index) {
                return Some(index);
            }
        }
        None
    }
}
