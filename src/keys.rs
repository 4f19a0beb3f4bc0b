// Copyright (C) 2025 Dayton Fishell
// BytePusher Virtual Machine
// This file is part of BytePusher.
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version. See the LICENSE file in the project root for details.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Sixteen-key hex keypad state, latched into memory at the start of every frame

use bitflags::bitflags;

bitflags! {
    /// Held keys; bit `n` is key `n` (0-9, then A-F).
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Keys: u16 {
        const KEY_0 = 1 << 0x0;
        const KEY_1 = 1 << 0x1;
        const KEY_2 = 1 << 0x2;
        const KEY_3 = 1 << 0x3;
        const KEY_4 = 1 << 0x4;
        const KEY_5 = 1 << 0x5;
        const KEY_6 = 1 << 0x6;
        const KEY_7 = 1 << 0x7;
        const KEY_8 = 1 << 0x8;
        const KEY_9 = 1 << 0x9;
        const KEY_A = 1 << 0xA;
        const KEY_B = 1 << 0xB;
        const KEY_C = 1 << 0xC;
        const KEY_D = 1 << 0xD;
        const KEY_E = 1 << 0xE;
        const KEY_F = 1 << 0xF;
    }
}

impl Keys {
    /// Number of keys on the keypad
    pub const COUNT: u8 = 16;

    /// Key for keypad position `index` (0x0..=0xF)
    pub fn from_index(index: u8) -> Option<Self> {
        (index < Self::COUNT).then(|| Self::from_bits_retain(1 << index))
    }

    /// Key printed with `label` on the keypad, case-insensitive.
    ///
    /// Hosts map both the digit row and the numeric keypad onto the same label.
    pub fn from_label(label: char) -> Option<Self> {
        let index = label.to_digit(16)?;
        Self::from_index(index as u8)
    }
}

impl From<u16> for Keys {
    fn from(bits: u16) -> Self {
        Self::from_bits_retain(bits)
    }
}

impl From<Keys> for u16 {
    fn from(keys: Keys) -> Self {
        keys.bits()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_maps_to_bit() {
        assert_eq!(Keys::from_index(0), Some(Keys::KEY_0));
        assert_eq!(Keys::from_index(9), Some(Keys::KEY_9));
        assert_eq!(Keys::from_index(0xA), Some(Keys::KEY_A));
        assert_eq!(Keys::from_index(0xF).map(|k| k.bits()), Some(0x8000));
        assert_eq!(Keys::from_index(16), None);
    }

    #[test]
    fn labels_cover_digits_and_letters() {
        assert_eq!(Keys::from_label('0'), Some(Keys::KEY_0));
        assert_eq!(Keys::from_label('7'), Some(Keys::KEY_7));
        assert_eq!(Keys::from_label('c'), Some(Keys::KEY_C));
        assert_eq!(Keys::from_label('F'), Some(Keys::KEY_F));
        assert_eq!(Keys::from_label('g'), None);
        assert_eq!(Keys::from_label(' '), None);
    }

    #[test]
    fn raw_bits_round_trip() {
        let keys = Keys::KEY_1 | Keys::KEY_A;
        assert_eq!(u16::from(keys), 0x0402);
        assert_eq!(Keys::from(0x0402), keys);
    }
}
