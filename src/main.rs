// Copyright (C) 2025 Dayton Fishell
// BytePusher Virtual Machine
// This file is part of BytePusher.
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version. See the LICENSE file in the project root for details.
// SPDX-License-Identifier: GPL-3.0-or-later

// Command-line host for the BytePusher machine.
use std::path::PathBuf;

use anyhow::{Context, Result};
use argh::FromArgs;
use bytepusher_core::{BytePusher, EmulatorStats, Keys, image};

#[cfg(feature = "frontend")]
mod frontend;

#[derive(FromArgs)]
/// BytePusher virtual machine.
struct Args {
    /// program image to run; the built-in demo when omitted
    #[argh(positional)]
    rom: Option<PathBuf>,

    /// run headless for this many frames, then print statistics and exit
    #[argh(option)]
    frames: Option<u64>,

    /// key state (hex) held down during a headless run
    #[argh(option, default = "0", from_str_fn(parse_keys))]
    keys: u16,

    /// window scale factor
    #[argh(option, default = "3")]
    scale: u32,

    /// print headless statistics as JSON
    #[argh(switch)]
    json: bool,
}

fn parse_keys(value: &str) -> Result<u16, String> {
    let digits = value.trim_start_matches("0x").trim_start_matches("0X");
    u16::from_str_radix(digits, 16).map_err(|e| format!("invalid key state {value:?}: {e}"))
}

fn main() -> Result<()> {
    env_logger::init();
    let args: Args = argh::from_env();

    let mut machine = BytePusher::new();
    match &args.rom {
        Some(path) => machine
            .load_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => machine
            .load(&image::demo_image())
            .context("loading built-in demo")?,
    }

    match args.frames {
        Some(frames) => run_headless(&mut machine, frames, Keys::from(args.keys), args.json),
        None => run_interactive(machine, args.scale),
    }
}

fn run_headless(machine: &mut BytePusher, frames: u64, keys: Keys, json: bool) -> Result<()> {
    machine.run_frames(frames, keys);
    let stats = machine.stats();
    let checksum = frame_checksum(machine.video_frame());

    if json {
        return print_json(&stats);
    }

    println!("BytePusher");
    println!("==========");
    println!("  Frames:       {}", stats.frame_count);
    println!("  Instructions: {}", stats.total_cycles);
    println!("  PC:           0x{:06X}", stats.pc);
    println!("  Frame hash:   0x{:08X}", checksum);
    Ok(())
}

#[cfg(feature = "serde")]
fn print_json(stats: &EmulatorStats) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(stats)?);
    Ok(())
}

#[cfg(not(feature = "serde"))]
fn print_json(_stats: &EmulatorStats) -> Result<()> {
    anyhow::bail!("JSON output needs the `serde` feature")
}

/// FNV-1a over the frame, enough to compare runs by eye
fn frame_checksum(frame: &[u8]) -> u32 {
    frame.iter().fold(0x811C_9DC5, |hash, &byte| {
        (hash ^ byte as u32).wrapping_mul(0x0100_0193)
    })
}

#[cfg(feature = "frontend")]
fn run_interactive(machine: BytePusher, scale: u32) -> Result<()> {
    frontend::run(machine, scale)
}

#[cfg(not(feature = "frontend"))]
fn run_interactive(_machine: BytePusher, _scale: u32) -> Result<()> {
    anyhow::bail!("built without the `frontend` feature; pass --frames to run headless")
}
