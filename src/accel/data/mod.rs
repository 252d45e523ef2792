// This file is part of LensKit.
// Copyright (C) 2018-2023 Boise State University.
// Copyright (C) 2023-2025 Drexel University.
// Licensed under the MIT license, see LICENSE.md for details.
// SPDX-License-Identifier: MIT

//! Rating data access.

mod batch;
mod matrix;
mod source;

pub use batch::ratings_from_batch;
pub use matrix::RatingMatrix;
pub use source::RatingSource;
