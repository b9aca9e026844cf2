// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! I/O: durable storage, serialization and image loading.

pub mod media;
pub mod serialization;
pub mod storage;

pub use storage::{FileStorage, MemoryStorage, Storage};
