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

type Transform<V> = Rc<dyn Fn(&V) -> V>;

enum Repr<V> {
    Direct {
        data: Rc<RefCell<Vec<V>>>,
        mutable: bool,
    },
    Mapped {
        source: Rc<RefCell<Vec<V>>>,
        transform: Transform<V>,
    },
}

impl<V> Clone for Repr<V> {
    fn clone(&self) -> Self {
        match self {
            Repr::Direct { data, mutable } => Repr::Direct {
                data: Rc::clone(data),
                mutable: *mutable,
            },
            Repr::Mapped { source, transform } => Repr::Mapped {
                source: Rc::clone(source),
                transform: Rc::clone(transform),
            },
        }
    }
}

/// A fixed-length, shareable store of values.
///
/// `ValueStore` values are handles: `Clone` shares the underlying cells, and
/// mutations through any mutable handle are visible through every other
/// handle. Reads clone values out. Mutating calls on a non-mutable handle
/// fail with [`Immutable`](crate::error::ErrorKind).
///
/// A store produced by [`transformed_by`](Self::transformed_by) has no cells
/// of its own; it projects another store's cells through a function on every
/// read and is never mutable.
///
/// # Examples
///
/// ```
/// use bloomkit::store::ValueStore;
///
/// let mut store = ValueStore::filled(4, 0i64);
/// store.set(1, 9).unwrap();
///
/// let doubled = store.transformed_by(|v| v * 2);
/// assert_eq!(doubled.get(1), 18);
/// store.set(1, 10).unwrap();
/// assert_eq!(doubled.get(1), 20); // live
/// assert!(!doubled.is_mutable());
/// ```
pub struct ValueStore<V> {
    repr: Repr<V>,
}

impl<V> Clone for ValueStore<V> {
    fn clone(&self) -> Self {
        ValueStore {
            repr: self.repr.clone(),
        }
    }
}

impl<V: Clone + 'static> ValueStore<V> {
    /// Creates a mutable store of `len` cells, each holding `value`.
    pub fn filled(len: usize, value: V) -> Self {
        Self::from_vec(vec![value; len])
    }

    /// Creates a mutable store owning the given cells.
    pub fn from_vec(values: Vec<V>) -> Self {
        ValueStore {
            repr: Repr::Direct {
                data: Rc::new(RefCell::new(values)),
                mutable: true,
            },
        }
    }

    /// The number of cells.
    pub fn len(&self) -> usize {
        match &self.repr {
            Repr::Direct { data, .. } => data.borrow().len(),
            Repr::Mapped { source, .. } => source.borrow().len(),
        }
    }

    /// Whether the store holds no cells at all (zero length).
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether writes through this handle are permitted.
    pub fn is_mutable(&self) -> bool {
        match &self.repr {
            Repr::Direct { mutable, .. } => *mutable,
            Repr::Mapped { .. } => false,
        }
    }

    /// Reads the value at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn get(&self, index: usize) -> V {
        match &self.repr {
            Repr::Direct { data, .. } => data.borrow()[index].clone(),
            Repr::Mapped { source, transform } => (**transform)(&source.borrow()[index]),
        }
    }

    /// Writes the value at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn set(&mut self, index: usize, value: V) -> Result<()> {
        match &self.repr {
            Repr::Direct { data, mutable } => {
                if !*mutable {
                    return Err(Error::immutable("store"));
                }
                data.borrow_mut()[index] = value;
                Ok(())
            }
            Repr::Mapped { .. } => Err(Error::immutable("store view")),
        }
    }

    /// Writes `value` into every cell.
    pub fn fill(&mut self, value: V) -> Result<()> {
        match &self.repr {
            Repr::Direct { data, mutable } => {
                if !*mutable {
                    return Err(Error::immutable("store"));
                }
                data.borrow_mut().fill(value);
                Ok(())
            }
            Repr::Mapped { .. } => Err(Error::immutable("store view")),
        }
    }

    /// Iterates the cells in index order, cloning values out.
    pub fn iter(&self) -> Values<'_, V> {
        Values {
            store: self,
            index: 0,
        }
    }

    /// A live, read-only store projecting every cell through `transform`.
    pub fn transformed_by(&self, transform: impl Fn(&V) -> V + 'static) -> ValueStore<V> {
        let repr = match &self.repr {
            Repr::Direct { data, .. } => Repr::Mapped {
                source: Rc::clone(data),
                transform: Rc::new(transform),
            },
            Repr::Mapped {
                source,
                transform: inner,
            } => {
                let inner = Rc::clone(inner);
                Repr::Mapped {
                    source: Rc::clone(source),
                    transform: Rc::new(move |v| transform(&(*inner)(v))),
                }
            }
        };
        ValueStore { repr }
    }

    /// A handle sharing this storage that refuses writes. Reads stay live.
    pub fn immutable_view(&self) -> ValueStore<V> {
        let repr = match &self.repr {
            Repr::Direct { data, .. } => Repr::Direct {
                data: Rc::clone(data),
                mutable: false,
            },
            mapped => mapped.clone(),
        };
        ValueStore { repr }
    }

    /// A frozen snapshot of the current cells.
    pub fn immutable_copy(&self) -> ValueStore<V> {
        ValueStore {
            repr: Repr::Direct {
                data: Rc::new(RefCell::new(self.iter().collect())),
                mutable: false,
            },
        }
    }

    /// An independently mutable snapshot of the current cells.
    pub fn mutable_copy(&self) -> ValueStore<V> {
        ValueStore {
            repr: Repr::Direct {
                data: Rc::new(RefCell::new(self.iter().collect())),
                mutable: true,
            },
        }
    }
}

impl<V: Clone + PartialEq + 'static> PartialEq for ValueStore<V> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl<V: Clone + Eq + 'static> Eq for ValueStore<V> {}

impl<V: Clone + Hash + 'static> Hash for ValueStore<V> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        for value in self.iter() {
            value.hash(state);
        }
    }
}

impl<V: Clone + fmt::Debug + 'static> fmt::Debug for ValueStore<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Iterator over a store's cells. See [`ValueStore::iter`].
pub struct Values<'a, V> {
    store: &'a ValueStore<V>,
    index: usize,
}

impl<V: Clone + 'static> Iterator for Values<'_, V> {
    type Item = V;

    fn next(&mut self) -> Option<V> {
        if self.index >= self.store.len() {
            return None;
        }
        let value = self.store.get(self.index);
        self.index += 1;
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filled_and_set() {
        let mut store = ValueStore::filled(3, 7i64);
        assert_eq!(store.len(), 3);
        assert!(store.is_mutable());
        store.set(2, 9).unwrap();
        assert_eq!(store.iter().collect::<Vec<_>>(), vec![7, 7, 9]);
    }

    #[test]
    fn test_views_share_and_protect() {
        let mut store = ValueStore::filled(2, 0i32);
        let mut view = store.immutable_view();
        assert!(view.set(0, 1).is_err());
        store.set(0, 5).unwrap();
        assert_eq!(view.get(0), 5);

        let frozen = store.immutable_copy();
        store.set(0, 6).unwrap();
        assert_eq!(frozen.get(0), 5);

        let mut copy = store.mutable_copy();
        copy.set(1, 8).unwrap();
        assert_eq!(store.get(1), 0);
    }

    #[test]
    fn test_transformed_view_is_live_and_composes() {
        let mut store = ValueStore::filled(2, 2i64);
        let capped = store.transformed_by(|v| (*v).min(10));
        let doubled = capped.transformed_by(|v| v * 2);
        store.set(0, 50).unwrap();
        assert_eq!(capped.get(0), 10);
        assert_eq!(doubled.get(0), 20);
        assert_eq!(doubled.get(1), 4);
        assert!(!capped.is_mutable());
    }

    #[test]
    fn test_equality_across_views() {
        let store = ValueStore::filled(4, 1u8);
        assert_eq!(store, store.immutable_view());
        assert_eq!(store, store.immutable_copy());
        assert_eq!(store, store.transformed_by(|v| *v));
        assert_ne!(store, store.transformed_by(|v| v + 1));
        assert_ne!(store, ValueStore::filled(3, 1u8));
    }

    #[test]
    fn test_fill() {
        let mut store = ValueStore::filled(3, 1u8);
        store.fill(4).unwrap();
        assert!(store.iter().all(|v| v == 4));
    }
}
