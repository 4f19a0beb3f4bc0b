// Copyright (C) 2025 Dayton Fishell
// BytePusher Virtual Machine
// This file is part of BytePusher.
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version. See the LICENSE file in the project root for details.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Audio output: one 256-sample page of signed 8-bit PCM per frame

use crate::core::Memory;

/// Samples produced per frame
pub const SAMPLES_PER_FRAME: usize = 256;

pub struct Apu {
    samples: [i8; SAMPLES_PER_FRAME],
}

impl Apu {
    /// Frames per second of machine time
    pub const FRAME_RATE: u32 = 60;

    /// Mono playback rate: one page per frame
    pub const SAMPLE_RATE: u32 = SAMPLES_PER_FRAME as u32 * Self::FRAME_RATE;

    pub fn new() -> Self {
        Self {
            samples: [0; SAMPLES_PER_FRAME],
        }
    }

    /// Address of the audio page; bytes 6 and 7 give bits 16..24 and 8..16
    pub fn page_address(memory: &Memory) -> u32 {
        (memory.read_u16(Memory::AUDIO_PAGE) as u32) << 8
    }

    /// Copy the current audio page into the sample buffer
    pub fn render(&mut self, memory: &Memory) {
        let page = memory.page(Self::page_address(memory), SAMPLES_PER_FRAME);
        for (sample, &byte) in self.samples.iter_mut().zip(page) {
            *sample = byte as i8;
        }
    }

    /// The last rendered samples
    pub fn samples(&self) -> &[i8] {
        &self.samples
    }

    /// Samples re-biased to unsigned 8-bit with silence at 0x80
    pub fn unsigned_samples(&self) -> [u8; SAMPLES_PER_FRAME] {
        self.samples.map(|s| (s as u8) ^ 0x80)
    }

    pub fn clear(&mut self) {
        self.samples = [0; SAMPLES_PER_FRAME];
    }
}

impl Default for Apu {
    fn default() -> Self {
        Self::new()
    }
}
