// Copyright (C) 2025 Dayton Fishell
// BytePusher Virtual Machine
// This file is part of BytePusher.
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version. See the LICENSE file in the project root for details.
// SPDX-License-Identifier: GPL-3.0-or-later

//! ByteByteJump CPU
//!
//! The machine has a single instruction made of three 24-bit big-endian
//! addresses: copy the byte at SOURCE to DEST, then jump to NEXT. There is no
//! halt; a frame is exactly [`Cpu::INSTRUCTIONS_PER_FRAME`] instructions,
//! starting from the program counter stored at address 2.

use log::trace;

use crate::core::Memory;

/// One decoded instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instruction {
    pub source: u32,
    pub dest: u32,
    pub next: u32,
}

impl Instruction {
    /// Encoded size in bytes
    pub const SIZE: u32 = 9;

    /// Decode the instruction stored at `pc`
    pub fn fetch(memory: &Memory, pc: u32) -> Self {
        Self {
            source: memory.read_u24(pc),
            dest: memory.read_u24(pc + 3),
            next: memory.read_u24(pc + 6),
        }
    }

    /// Big-endian encoding, as stored in a program image
    pub fn encode(&self) -> [u8; 9] {
        let mut out = [0u8; 9];
        for (chunk, field) in out.chunks_exact_mut(3).zip([self.source, self.dest, self.next]) {
            chunk.copy_from_slice(&field.to_be_bytes()[1..]);
        }
        out
    }
}

/// BytePusher CPU
pub struct Cpu {
    pub pc: u32, // Program counter (24-bit)

    // Instructions executed since reset
    pub cycles: u64,
}

impl Cpu {
    /// Copy operations per frame, fixed by the machine
    pub const INSTRUCTIONS_PER_FRAME: usize = 65_536;

    pub fn new() -> Self {
        Self { pc: 0, cycles: 0 }
    }

    /// Reset the CPU to initial state
    pub fn reset(&mut self, memory: &Memory) {
        self.pc = memory.read_u24(Memory::PROGRAM_COUNTER);
        self.cycles = 0;
    }

    /// Execute a single instruction
    pub fn step(&mut self, memory: &mut Memory) -> Instruction {
        let inst = Instruction::fetch(memory, self.pc);
        trace!(
            "{:06X}: [{:06X}] -> [{:06X}], next {:06X}",
            self.pc, inst.source, inst.dest, inst.next
        );

        let value = memory.read_u8(inst.source);
        memory.write_u8(inst.dest, value);
        self.pc = inst.next;
        self.cycles += 1;
        inst
    }

    /// Execute one frame worth of instructions, starting from the frame's entry point
    pub fn run_frame(&mut self, memory: &mut Memory) {
        self.pc = memory.read_u24(Memory::PROGRAM_COUNTER);
        for _ in 0..Self::INSTRUCTIONS_PER_FRAME {
            self.step(memory);
        }
    }
}

impl Default for Cpu {
    fn default() -> Self {
        Self::new()
    }
}
