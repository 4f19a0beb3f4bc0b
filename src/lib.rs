// Copyright (C) 2025 Dayton Fishell
// BytePusher Virtual Machine
// This file is part of BytePusher.
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version. See the LICENSE file in the project root for details.
// SPDX-License-Identifier: GPL-3.0-or-later

//! BytePusher Virtual Machine
//!
//! This library provides the core of the BytePusher machine: a 16MB memory
//! image, the single copy-and-jump CPU, the fixed palette, and per-frame
//! video and audio extraction. Presentation and input are left to the host.

pub mod apu;
pub mod core;
pub mod cpu;
pub mod emulator;
pub mod error;
pub mod image;
pub mod keys;
pub mod palette;
pub mod vdp;

// Re-export commonly used types
pub use apu::Apu;
pub use crate::core::Memory;
pub use cpu::{Cpu, Instruction};
pub use emulator::{BytePusher, EmulatorStats};
pub use error::LoadError;
pub use keys::Keys;
pub use palette::Rgb;
pub use vdp::Vdp;
