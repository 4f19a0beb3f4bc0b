// Copyright (C) 2025 Dayton Fishell
// BytePusher Virtual Machine
// This file is part of BytePusher.
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version. See the LICENSE file in the project root for details.
// SPDX-License-Identifier: GPL-3.0-or-later

//! SDL2 window, audio queue and keyboard for the interactive host loop

use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result, anyhow};
use bytepusher_core::{Apu, BytePusher, Keys, Vdp};
use log::{debug, info};
use sdl2::audio::{AudioQueue, AudioSpecDesired};
use sdl2::event::Event;
use sdl2::keyboard::{KeyboardState, Scancode};
use sdl2::pixels::PixelFormatEnum;

// Frames of audio allowed to sit in the queue before new frames are dropped
const MAX_QUEUED_FRAMES: u32 = 4;

/// Keypad label for a host key. Digit row and numeric keypad share labels.
fn scancode_label(scancode: Scancode) -> Option<char> {
    let label = match scancode {
        Scancode::Num0 | Scancode::Kp0 => '0',
        Scancode::Num1 | Scancode::Kp1 => '1',
        Scancode::Num2 | Scancode::Kp2 => '2',
        Scancode::Num3 | Scancode::Kp3 => '3',
        Scancode::Num4 | Scancode::Kp4 => '4',
        Scancode::Num5 | Scancode::Kp5 => '5',
        Scancode::Num6 | Scancode::Kp6 => '6',
        Scancode::Num7 | Scancode::Kp7 => '7',
        Scancode::Num8 | Scancode::Kp8 => '8',
        Scancode::Num9 | Scancode::Kp9 => '9',
        Scancode::A => 'a',
        Scancode::B => 'b',
        Scancode::C => 'c',
        Scancode::D => 'd',
        Scancode::E => 'e',
        Scancode::F => 'f',
        _ => return None,
    };
    Some(label)
}

fn held_keys(keyboard: &KeyboardState) -> Keys {
    keyboard
        .pressed_scancodes()
        .filter_map(scancode_label)
        .filter_map(Keys::from_label)
        .fold(Keys::empty(), |held, key| held | key)
}

/// Open a window and run the machine at 60 frames per second until closed
pub fn run(mut machine: BytePusher, scale: u32) -> Result<()> {
    let sdl = sdl2::init().map_err(|e| anyhow!(e)).context("initialising SDL")?;
    let video = sdl.video().map_err(|e| anyhow!(e))?;
    let audio = sdl.audio().map_err(|e| anyhow!(e))?;

    let width = Vdp::WIDTH as u32;
    let height = Vdp::HEIGHT as u32;
    let window = video
        .window("BytePusher", width * scale, height * scale)
        .position_centered()
        .build()
        .context("creating window")?;
    let mut canvas = window.into_canvas().build().context("creating canvas")?;
    let texture_creator = canvas.texture_creator();
    let mut texture = texture_creator
        .create_texture_streaming(PixelFormatEnum::RGB24, width, height)
        .context("creating frame texture")?;

    let desired = AudioSpecDesired {
        freq: Some(Apu::SAMPLE_RATE as i32),
        channels: Some(1),
        samples: Some(256),
    };
    let queue: AudioQueue<u8> = audio
        .open_queue(None, &desired)
        .map_err(|e| anyhow!(e))
        .context("opening audio device")?;
    queue.resume();
    info!(
        "audio: {} Hz, {} channel(s)",
        queue.spec().freq,
        queue.spec().channels
    );

    let mut events = sdl.event_pump().map_err(|e| anyhow!(e))?;
    let frame_time = Duration::from_secs(1) / BytePusher::TARGET_FPS as u32;
    let mut deadline = Instant::now();

    'running: loop {
        for event in events.poll_iter() {
            match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    scancode: Some(Scancode::Escape),
                    ..
                } => break 'running,
                _ => {}
            }
        }

        let keys = held_keys(&events.keyboard_state());
        machine.tick(keys);

        texture
            .update(None, machine.video_frame(), Vdp::WIDTH * Vdp::BYTES_PER_PIXEL)
            .context("uploading frame")?;
        canvas.clear();
        canvas.copy(&texture, None, None).map_err(|e| anyhow!(e))?;
        canvas.present();

        let samples = machine.apu().unsigned_samples();
        if queue.size() < MAX_QUEUED_FRAMES * samples.len() as u32 {
            queue.queue_audio(&samples).map_err(|e| anyhow!(e))?;
        } else {
            debug!("audio queue full, dropping frame {}", machine.stats().frame_count);
        }

        deadline += frame_time;
        let now = Instant::now();
        if deadline > now {
            thread::sleep(deadline - now);
        } else {
            deadline = now;
        }
    }

    info!("stopped after {} frames", machine.stats().frame_count);
    Ok(())
}
