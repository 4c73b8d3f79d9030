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

//! Fixed-length typed stores with the same sharing and mutability discipline
//! as [`bits`](crate::bits).
//!
//! [`ValueStore`] backs every Bloom map: a fixed run of cells holding values
//! of one type. Like a bit store it is a handle; clones share storage, views
//! stay live, and copies snapshot. A store can also be a lazy
//! [`transformed_by`](ValueStore::transformed_by) view that projects another
//! store's cells through a function on every read. This is how a Bloom map
//! caps the values it exposes without rewriting what it stores.

mod typed;

pub use self::typed::ValueStore;
pub use self::typed::Values;
