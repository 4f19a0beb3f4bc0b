// Copyright (C) 2025 Dayton Fishell
// BytePusher Virtual Machine
// This file is part of BytePusher.
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version. See the LICENSE file in the project root for details.
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::error::LoadError;

/// Flat 24-bit address space: 16MB of RAM plus an 8-byte tail.
///
/// Multi-byte fields are big-endian. The tail lets a 3-byte field that starts
/// just below 0xFFFFFF be read without going out of bounds.
pub struct Memory {
    bytes: Vec<u8>,
}

impl Memory {
    /// Size of the addressable space (24 bits)
    pub const SIZE: usize = 0x100_0000;
    /// Bytes past `SIZE` that field reads may touch
    pub const OVERFLOW_MARGIN: usize = 8;
    /// Largest program image `reset_and_load` accepts
    pub const CAPACITY: usize = Self::SIZE + Self::OVERFLOW_MARGIN;

    const ADDRESS_MASK: u32 = 0x00FF_FFFF;

    // Header fields
    pub const KEYS: u32 = 0;
    pub const PROGRAM_COUNTER: u32 = 2;
    pub const VIDEO_PAGE: u32 = 5;
    pub const AUDIO_PAGE: u32 = 6;

    pub fn new() -> Self {
        Self {
            bytes: vec![0; Self::CAPACITY],
        }
    }

    /// Read a byte from the 24-bit address space
    pub fn read_u8(&self, addr: u32) -> u8 {
        self.bytes[(addr & Self::ADDRESS_MASK) as usize]
    }

    /// Write a byte to the 24-bit address space
    pub fn write_u8(&mut self, addr: u32, value: u8) {
        self.bytes[(addr & Self::ADDRESS_MASK) as usize] = value;
    }

    /// Read big-endian u16
    pub fn read_u16(&self, addr: u32) -> u16 {
        let hi = self.read_u8(addr) as u16;
        let lo = self.read_u8(addr.wrapping_add(1)) as u16;
        (hi << 8) | lo
    }

    /// Write big-endian u16
    pub fn write_u16(&mut self, addr: u32, v: u16) {
        self.write_u8(addr, (v >> 8) as u8);
        self.write_u8(addr.wrapping_add(1), (v & 0xFF) as u8);
    }

    /// Read a big-endian 24-bit field.
    ///
    /// `addr` is not masked: fields starting at up to `SIZE + 5` read into the
    /// overflow margin. Anything further out reads as zero.
    pub fn read_u24(&self, addr: u32) -> u32 {
        let start = addr as usize;
        match self.bytes.get(start..start + 3) {
            Some(&[hi, mid, lo]) => u32::from_be_bytes([0, hi, mid, lo]),
            _ => 0,
        }
    }

    /// Borrow `len` bytes starting at `addr`, clipped to the end of the backing store.
    pub fn page(&self, addr: u32, len: usize) -> &[u8] {
        let start = (addr & Self::ADDRESS_MASK) as usize;
        let end = (start + len).min(self.bytes.len());
        &self.bytes[start..end]
    }

    /// Clear the whole image and copy `image` in at address 0.
    ///
    /// An oversized image is rejected before anything is touched.
    pub fn reset_and_load(&mut self, image: &[u8]) -> Result<(), LoadError> {
        if image.len() > Self::CAPACITY {
            return Err(LoadError::ImageTooLarge {
                len: image.len(),
                capacity: Self::CAPACITY,
            });
        }
        self.bytes.fill(0);
        self.bytes[..image.len()].copy_from_slice(image);
        Ok(())
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_read_write_u8() {
        let mut mem = Memory::new();
        mem.write_u8(0x0000_0000, 0x12);
        assert_eq!(mem.read_u8(0), 0x12);
        mem.write_u8(0xFF_FFFF, 0x34);
        assert_eq!(mem.read_u8(0xFF_FFFF), 0x34);
        // addresses wrap at 24 bits
        assert_eq!(mem.read_u8(0x0100_0000), 0x12);
    }

    #[test]
    fn memory_u16_is_big_endian() {
        let mut mem = Memory::new();
        mem.write_u16(0x10, 0x1234);
        assert_eq!(mem.read_u8(0x10), 0x12);
        assert_eq!(mem.read_u8(0x11), 0x34);
        assert_eq!(mem.read_u16(0x10), 0x1234);
    }

    #[test]
    fn memory_u24_is_big_endian() {
        let mut mem = Memory::new();
        mem.reset_and_load(&[0x00, 0x00, 0x12, 0x34, 0x56]).unwrap();
        assert_eq!(mem.read_u24(2), 0x12_3456);
    }

    #[test]
    fn u24_reads_reach_into_overflow_margin() {
        let mem = Memory::new();
        // last instruction field of an instruction at 0xFFFFFF
        assert_eq!(mem.read_u24(0xFF_FFFF + 6), 0);
        // past the margin entirely
        assert_eq!(mem.read_u24(u32::MAX), 0);
    }

    #[test]
    fn load_clears_previous_contents() {
        let mut mem = Memory::new();
        mem.write_u8(0x8000, 0xAA);
        mem.reset_and_load(&[1, 2, 3]).unwrap();
        assert_eq!(mem.read_u8(0x8000), 0);
        assert_eq!(mem.page(0, 4), &[1, 2, 3, 0]);
    }

    #[test]
    fn load_accepts_exact_capacity() {
        let mut mem = Memory::new();
        let image = vec![0x5A; Memory::CAPACITY];
        assert!(mem.reset_and_load(&image).is_ok());
        assert_eq!(mem.read_u8(0xFF_FFFF), 0x5A);
    }

    #[test]
    fn load_rejects_oversized_image() {
        let mut mem = Memory::new();
        mem.write_u8(0x20, 0x77);
        let image = vec![0; Memory::CAPACITY + 1];
        let err = mem.reset_and_load(&image).unwrap_err();
        assert!(matches!(
            err,
            LoadError::ImageTooLarge { len, capacity }
                if len == Memory::CAPACITY + 1 && capacity == Memory::CAPACITY
        ));
        // rejected images leave memory alone
        assert_eq!(mem.read_u8(0x20), 0x77);
    }

    #[test]
    fn page_is_clipped_to_backing_store() {
        let mem = Memory::new();
        assert_eq!(mem.page(0xFF_FF00, 0x200).len(), 0x100 + Memory::OVERFLOW_MARGIN);
    }
}
