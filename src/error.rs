// Copyright (C) 2025 Dayton Fishell
// BytePusher Virtual Machine
// This file is part of BytePusher.
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version. See the LICENSE file in the project root for details.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Load-time failures. Once a machine is ticking nothing can fail.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while getting a program image into memory.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read program image {}", .path.display())]
    ImageUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("program image is {len} bytes but memory holds {capacity}")]
    ImageTooLarge { len: usize, capacity: usize },
}
