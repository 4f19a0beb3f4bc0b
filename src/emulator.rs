// Copyright (C) 2025 Dayton Fishell
// BytePusher Virtual Machine
// This file is part of BytePusher.
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version. See the LICENSE file in the project root for details.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Main BytePusher machine
//!
//! Ties the memory image, CPU and the two output extractors together. A host
//! loads a program image once, then calls [`BytePusher::tick`] sixty times a
//! second with the current key state and reads the frame and audio buffers
//! back before the next call.

use std::fs;
use std::path::Path;

use log::{debug, info};

use crate::apu::Apu;
use crate::core::Memory;
use crate::cpu::Cpu;
use crate::error::LoadError;
use crate::keys::Keys;
use crate::vdp::Vdp;

/// Main BytePusher machine state
pub struct BytePusher {
    memory: Memory,
    cpu: Cpu,
    vdp: Vdp,
    apu: Apu,

    frame_count: u64,
}

impl BytePusher {
    /// Target framerate: 60 Hz
    pub const TARGET_FPS: u64 = 60;

    pub fn new() -> Self {
        Self {
            memory: Memory::new(),
            cpu: Cpu::new(),
            vdp: Vdp::new(),
            apu: Apu::new(),
            frame_count: 0,
        }
    }

    /// Replace memory with a program image and reset all outputs and counters
    pub fn load(&mut self, image: &[u8]) -> Result<(), LoadError> {
        self.memory.reset_and_load(image)?;
        self.cpu.reset(&self.memory);
        self.vdp.clear();
        self.apu.clear();
        self.frame_count = 0;
        info!(
            "loaded {} byte program image, entry point 0x{:06X}",
            image.len(),
            self.cpu.pc
        );
        Ok(())
    }

    /// Read a program image from disk and load it
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<(), LoadError> {
        let path = path.as_ref();
        let image = fs::read(path).map_err(|source| LoadError::ImageUnreadable {
            path: path.to_path_buf(),
            source,
        })?;
        self.load(&image)
    }

    /// Run one frame: latch keys, execute the instruction cycle, extract video and audio
    pub fn tick(&mut self, keys: Keys) {
        self.memory.write_u16(Memory::KEYS, keys.bits());
        self.cpu.run_frame(&mut self.memory);
        self.vdp.render(&self.memory);
        self.apu.render(&self.memory);
        self.frame_count += 1;

        debug!(
            "frame {} done, pc 0x{:06X}, video page 0x{:06X}, audio page 0x{:06X}",
            self.frame_count,
            self.cpu.pc,
            Vdp::page_address(&self.memory),
            Apu::page_address(&self.memory)
        );
    }

    /// Run the machine for a number of frames with the same keys held
    pub fn run_frames(&mut self, num_frames: u64, keys: Keys) {
        for _ in 0..num_frames {
            self.tick(keys);
        }
    }

    /// RGB24 frame from the last tick, 256x256, row-major
    pub fn video_frame(&self) -> &[u8] {
        self.vdp.frame()
    }

    /// Signed 8-bit mono samples from the last tick
    pub fn audio_samples(&self) -> &[i8] {
        self.apu.samples()
    }

    pub fn vdp(&self) -> &Vdp {
        &self.vdp
    }

    pub fn apu(&self) -> &Apu {
        &self.apu
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    /// Get current execution statistics
    pub fn stats(&self) -> EmulatorStats {
        EmulatorStats {
            total_cycles: self.cpu.cycles,
            frame_count: self.frame_count,
            pc: self.cpu.pc,
        }
    }
}

impl Default for BytePusher {
    fn default() -> Self {
        Self::new()
    }
}

/// Emulator execution statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct EmulatorStats {
    pub total_cycles: u64,
    pub frame_count: u64,
    pub pc: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cpu::Instruction;
    use crate::image::ImageBuilder;

    fn idle_image(entry: u32) -> Vec<u8> {
        let mut image = ImageBuilder::new();
        image.entry_point(entry).instruction(
            entry,
            Instruction {
                source: 0x40,
                dest: 0x41,
                next: entry,
            },
        );
        image.build()
    }

    #[test]
    fn emulator_initialization() {
        let emu = BytePusher::new();
        let stats = emu.stats();
        assert_eq!(stats.frame_count, 0);
        assert_eq!(stats.total_cycles, 0);
        assert_eq!(emu.video_frame().len(), Vdp::FRAME_BYTES);
        assert_eq!(emu.audio_samples().len(), 256);
    }

    #[test]
    fn emulator_load_resets_state() {
        let mut emu = BytePusher::new();
        emu.load(&idle_image(0x100)).unwrap();
        emu.run_frames(2, Keys::empty());
        assert_eq!(emu.stats().frame_count, 2);

        emu.load(&idle_image(0x200)).unwrap();
        let stats = emu.stats();
        assert_eq!(stats.frame_count, 0);
        assert_eq!(stats.total_cycles, 0);
        assert_eq!(stats.pc, 0x200);
    }

    #[test]
    fn emulator_rejects_oversized_image() {
        let mut emu = BytePusher::new();
        let err = emu.load(&vec![0; Memory::CAPACITY + 1]).unwrap_err();
        assert!(matches!(err, LoadError::ImageTooLarge { .. }));
    }

    #[test]
    fn emulator_missing_file_is_unreadable() {
        let mut emu = BytePusher::new();
        let err = emu
            .load_file("/nonexistent/definitely/not/here.BytePusher")
            .unwrap_err();
        match err {
            LoadError::ImageUnreadable { path, .. } => {
                assert!(path.ends_with("here.BytePusher"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn emulator_latches_keys_big_endian() {
        let mut emu = BytePusher::new();
        emu.load(&idle_image(0x100)).unwrap();
        emu.tick(Keys::KEY_F | Keys::KEY_A | Keys::KEY_1);
        assert_eq!(emu.memory().read_u8(0), 0x84);
        assert_eq!(emu.memory().read_u8(1), 0x02);

        emu.tick(Keys::empty());
        assert_eq!(emu.memory().read_u16(Memory::KEYS), 0);
    }

    #[test]
    fn emulator_tick_counts_cycles() {
        let mut emu = BytePusher::new();
        emu.load(&idle_image(0x100)).unwrap();
        emu.run_frames(3, Keys::empty());

        let stats = emu.stats();
        assert_eq!(stats.frame_count, 3);
        assert_eq!(stats.total_cycles, 3 * Cpu::INSTRUCTIONS_PER_FRAME as u64);
        assert_eq!(stats.pc, 0x100);
    }

    #[test]
    fn emulator_program_can_read_keys() {
        // copy the low key byte into the first pixel of page 1
        let mut image = ImageBuilder::new();
        image.entry_point(0x100).video_page(0x01).instruction(
            0x100,
            Instruction {
                source: 1,
                dest: 0x01_0000,
                next: 0x100,
            },
        );
        let mut emu = BytePusher::new();
        emu.load(&image.build()).unwrap();

        emu.tick(Keys::from(0x0005));
        assert_eq!(&emu.video_frame()[..3], &[0x00, 0x00, 0xFF]);
    }

    #[test]
    fn emulator_demo_image_runs() {
        let mut emu = BytePusher::new();
        emu.load(&crate::image::demo_image()).unwrap();

        emu.tick(Keys::empty());
        assert!(emu.audio_samples().iter().all(|&s| s == 0));

        emu.tick(Keys::KEY_0);
        assert_eq!(emu.audio_samples()[0], 0x20);
        assert_eq!(emu.audio_samples()[255], -0x20);
    }
}
