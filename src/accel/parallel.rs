// This file is part of LensKit.
// Copyright (C) 2018-2023 Boise State University.
// Copyright (C) 2023-2025 Drexel University.
// Licensed under the MIT license, see LICENSE.md for details.
// SPDX-License-Identifier: MIT

//! Thread pool control for parallel scoring.
use log::*;
use rayon::{current_num_threads, ThreadPoolBuilder};

use crate::errors::{KnnError, Result};

/// Initialize the global thread pool used for parallel scoring.
///
/// This can only succeed once per process, and only before the pool has been
/// used.
pub fn init_pool(n_threads: usize) -> Result<()> {
    debug!("initializing scoring thread pool with {} threads", n_threads);
    ThreadPoolBuilder::new()
        .num_threads(n_threads)
        .build_global()
        .map_err(|e| KnnError::InvalidConfig(format!("thread pool initialization error: {}", e)))
}

/// Get the number of threads available for parallel scoring.
pub fn thread_count() -> usize {
    current_num_threads()
}

#[test]
fn test_thread_count() {
    assert!(thread_count() >= 1);
}
