// Copyright (C) 2025 Dayton Fishell
// BytePusher Virtual Machine
// This file is part of BytePusher.
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version. See the LICENSE file in the project root for details.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Fixed 256-entry palette.
//!
//! Entries 0..216 form a 6x6x6 color cube, `index = 36 * r + 6 * g + b`, with
//! each component scaled by 0x33. The remaining 40 entries are black.

/// One palette entry
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

/// Number of populated cube entries
pub const CUBE_ENTRIES: usize = 216;

const COMPONENT_STEP: u8 = 0x33;

/// The full lookup table
pub static PALETTE: [Rgb; 256] = build_palette();

const fn build_palette() -> [Rgb; 256] {
    let mut table = [Rgb::BLACK; 256];
    let mut i = 0;
    while i < CUBE_ENTRIES {
        let r = (i / 36) as u8;
        let g = (i / 6 % 6) as u8;
        let b = (i % 6) as u8;
        table[i] = Rgb::new(r * COMPONENT_STEP, g * COMPONENT_STEP, b * COMPONENT_STEP);
        i += 1;
    }
    table
}

/// Look up the color for a palette index
#[inline]
pub fn resolve(index: u8) -> Rgb {
    PALETTE[index as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cube_entries_follow_component_formula() {
        for i in 0..CUBE_ENTRIES {
            let expected = Rgb::new(
                (i / 36) as u8 * 0x33,
                (i / 6 % 6) as u8 * 0x33,
                (i % 6) as u8 * 0x33,
            );
            assert_eq!(resolve(i as u8), expected, "palette index {i}");
        }
    }

    #[test]
    fn cube_corners() {
        assert_eq!(resolve(0), Rgb::BLACK);
        assert_eq!(resolve(5), Rgb::new(0x00, 0x00, 0xFF));
        assert_eq!(resolve(30), Rgb::new(0x00, 0xFF, 0x00));
        assert_eq!(resolve(180), Rgb::new(0xFF, 0x00, 0x00));
        assert_eq!(resolve(215), Rgb::new(0xFF, 0xFF, 0xFF));
    }

    #[test]
    fn entries_past_cube_are_black() {
        for i in CUBE_ENTRIES..256 {
            assert_eq!(resolve(i as u8), Rgb::BLACK, "palette index {i}");
        }
    }
}
