// Copyright (C) 2025 Dayton Fishell
// BytePusher Virtual Machine
// This file is part of BytePusher.
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version. See the LICENSE file in the project root for details.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Video output
//!
//! The screen is a 256x256 page of palette indices. Its location is given by
//! the byte at address 5, which supplies bits 16..24 of the page address; the
//! page is re-read after every frame.

use crate::core::Memory;
use crate::palette::{self, Rgb};

pub struct Vdp {
    // RGB24, row-major
    frame: Vec<u8>,
}

impl Vdp {
    pub const WIDTH: usize = 256;
    pub const HEIGHT: usize = 256;
    pub const BYTES_PER_PIXEL: usize = 3;
    pub const FRAME_BYTES: usize = Self::WIDTH * Self::HEIGHT * Self::BYTES_PER_PIXEL;

    pub fn new() -> Self {
        Self {
            frame: vec![0; Self::FRAME_BYTES],
        }
    }

    /// Address of the first pixel of the video page
    pub fn page_address(memory: &Memory) -> u32 {
        (memory.read_u8(Memory::VIDEO_PAGE) as u32) << 16
    }

    /// Resolve the current video page through the palette into the frame buffer
    pub fn render(&mut self, memory: &Memory) {
        let page = memory.page(Self::page_address(memory), Self::WIDTH * Self::HEIGHT);
        for (pixel, &index) in self
            .frame
            .chunks_exact_mut(Self::BYTES_PER_PIXEL)
            .zip(page)
        {
            pixel.copy_from_slice(&palette::resolve(index).to_array());
        }
    }

    /// The last rendered frame
    pub fn frame(&self) -> &[u8] {
        &self.frame
    }

    /// Read back a single pixel
    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgb> {
        if x >= Self::WIDTH || y >= Self::HEIGHT {
            return None;
        }
        let offset = (y * Self::WIDTH + x) * Self::BYTES_PER_PIXEL;
        let px = &self.frame[offset..offset + Self::BYTES_PER_PIXEL];
        Some(Rgb::new(px[0], px[1], px[2]))
    }

    pub fn clear(&mut self) {
        self.frame.fill(0);
    }
}

impl Default for Vdp {
    fn default() -> Self {
        Self::new()
    }
}
