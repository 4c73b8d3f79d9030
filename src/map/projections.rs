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

//! Derived bit accessors that present a map's value store as Bloom set bits.

use std::cell::RefCell;

use crate::bits::BitAccess;
use crate::error::Error;
use crate::error::Result;
use crate::lattice::Lattice;
use crate::store::ValueStore;

/// Read-only bits over a map's cells: bit `i` is set when cell `i` was ever
/// written, that is, no longer holds the store-lattice bottom.
pub(crate) struct KeysBits<V, L> {
    values: ValueStore<V>,
    lattice: L,
    bottom: V,
}

impl<V: Clone + 'static, L: Lattice<V>> KeysBits<V, L> {
    pub(crate) fn new(values: ValueStore<V>, lattice: L) -> Self {
        let bottom = lattice.bottom();
        KeysBits {
            values,
            lattice,
            bottom,
        }
    }
}

impl<V: Clone + 'static, L: Lattice<V>> BitAccess for KeysBits<V, L> {
    fn len(&self) -> usize {
        self.values.len()
    }

    fn get(&self, index: usize) -> bool {
        !self.lattice.equivalent(&self.values.get(index), &self.bottom)
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

/// Write-through bits over a map's cells: bit `i` is set when cell `i`
/// attains the access-lattice top. Setting a bit joins the top into the
/// cell; bits cannot be cleared individually, and clearing them all resets
/// the whole map to the store-lattice bottom.
pub(crate) struct TopBits<V, L> {
    values: RefCell<ValueStore<V>>,
    lattice: L,
    top: V,
    bottom: V,
}

impl<V: Clone + 'static, L: Lattice<V>> TopBits<V, L> {
    pub(crate) fn new(values: ValueStore<V>, lattice: L, top: V) -> Self {
        let bottom = lattice.bottom();
        TopBits {
            values: RefCell::new(values),
            lattice,
            top,
            bottom,
        }
    }
}

impl<V: Clone + 'static, L: Lattice<V>> BitAccess for TopBits<V, L> {
    fn len(&self) -> usize {
        self.values.borrow().len()
    }

    fn get(&self, index: usize) -> bool {
        self.lattice.is_ordered(&self.top, &self.values.borrow().get(index))
    }

    fn set(&self, index: usize, value: bool) -> Result<bool> {
        if !value {
            return Err(Error::invalid_argument("cannot clear bits"));
        }
        let mut values = self.values.borrow_mut();
        let old = values.get(index);
        let previous = self.lattice.is_ordered(&self.top, &old);
        values.set(index, self.lattice.join(&self.top, &old))?;
        Ok(previous)
    }

    fn clear_all(&self) -> Result<()> {
        self.values.borrow_mut().fill(self.bottom.clone())
    }

    fn is_mutable(&self) -> bool {
        self.values.borrow().is_mutable()
    }
}
