// Copyright (C) 2025 Dayton Fishell
// BytePusher Virtual Machine
// This file is part of BytePusher.
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version. See the LICENSE file in the project root for details.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Program image construction.
//!
//! A program image is a raw memory dump loaded at address 0. [`ImageBuilder`]
//! lays out the header fields and chains of copy instructions so that images
//! can be produced in code, and [`demo_image`] builds the image the emulator
//! runs when started without a ROM.

use crate::core::Memory;
use crate::cpu::Instruction;

/// Incrementally assembles a program image
#[derive(Debug, Default, Clone)]
pub struct ImageBuilder {
    bytes: Vec<u8>,
}

impl ImageBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn ensure_len(&mut self, end: usize) {
        if self.bytes.len() < end {
            self.bytes.resize(end, 0);
        }
    }

    /// Store raw bytes at `addr`
    pub fn poke(&mut self, addr: u32, data: &[u8]) -> &mut Self {
        let start = addr as usize;
        self.ensure_len(start + data.len());
        self.bytes[start..start + data.len()].copy_from_slice(data);
        self
    }

    /// Fill `len` bytes at `addr` with `value`
    pub fn fill(&mut self, addr: u32, len: usize, value: u8) -> &mut Self {
        let start = addr as usize;
        self.ensure_len(start + len);
        self.bytes[start..start + len].fill(value);
        self
    }

    /// Program counter loaded at the start of every frame
    pub fn entry_point(&mut self, pc: u32) -> &mut Self {
        self.poke(Memory::PROGRAM_COUNTER, &pc.to_be_bytes()[1..])
    }

    /// Video page, as the high byte of its address
    pub fn video_page(&mut self, page: u8) -> &mut Self {
        self.poke(Memory::VIDEO_PAGE, &[page])
    }

    /// Audio page, as the upper two bytes of its address
    pub fn audio_page(&mut self, page: u16) -> &mut Self {
        self.poke(Memory::AUDIO_PAGE, &page.to_be_bytes())
    }

    pub fn instruction(&mut self, addr: u32, inst: Instruction) -> &mut Self {
        self.poke(addr, &inst.encode())
    }

    /// Lay out `copies` as consecutive instructions starting at `addr`.
    ///
    /// Each instruction falls through to the next one; the last jumps to
    /// `then`. Returns the address just past the chain.
    pub fn copy_chain(&mut self, addr: u32, copies: &[(u32, u32)], then: u32) -> u32 {
        let mut at = addr;
        for (i, &(source, dest)) in copies.iter().enumerate() {
            let next = if i + 1 == copies.len() {
                then
            } else {
                at + Instruction::SIZE
            };
            self.instruction(at, Instruction { source, dest, next });
            at += Instruction::SIZE;
        }
        at
    }

    /// Current image length
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn build(&self) -> Vec<u8> {
        self.bytes.clone()
    }
}

const DEMO_ENTRY: u32 = 0x00_0100;
const DEMO_VIDEO_PAGE: u8 = 0x01;
// 256 audio pages at 0x020000, one for every value of the low key byte
const DEMO_AUDIO_BANK: u16 = 0x0200;
const DEMO_AMPLITUDE: u8 = 0x20;

/// Built-in demo: a palette test card and a tone for each of keys 0-7.
///
/// A single looping instruction copies the low key byte into the middle byte
/// of the audio page address, so every combination of held keys selects its
/// own pre-rendered page. Page 0 is silence; otherwise the lowest held key
/// picks a square wave, higher keys giving higher pitches.
pub fn demo_image() -> Vec<u8> {
    let mut image = ImageBuilder::new();
    image
        .entry_point(DEMO_ENTRY)
        .video_page(DEMO_VIDEO_PAGE)
        .audio_page(DEMO_AUDIO_BANK);

    image.instruction(
        DEMO_ENTRY,
        Instruction {
            source: Memory::KEYS + 1,
            dest: Memory::AUDIO_PAGE + 1,
            next: DEMO_ENTRY,
        },
    );

    // 16x16 grid of palette swatches
    let card: Vec<u8> = (0..256 * 256)
        .map(|i| {
            let (x, y) = (i % 256, i / 256);
            ((y / 16) * 16 + x / 16) as u8
        })
        .collect();
    image.poke((DEMO_VIDEO_PAGE as u32) << 16, &card);

    let bank = (DEMO_AUDIO_BANK as u32) << 8;
    image.fill(bank, 256, 0);
    for held in 1..=255u32 {
        let half_period = 128 >> held.trailing_zeros();
        let page: Vec<u8> = (0..256u32)
            .map(|n| {
                if (n / half_period) % 2 == 0 {
                    DEMO_AMPLITUDE
                } else {
                    DEMO_AMPLITUDE.wrapping_neg()
                }
            })
            .collect();
        image.poke(bank + held * 256, &page);
    }

    image.build()
}
