// src/main.rs

//! A 1980s home computer playing interactive fiction.
//!
//! The simulator spawns a Z-machine interpreter as a child process, strips
//! its terminal control codes, and retypes its output onto a scaled,
//! bordered, blue-screen character grid with keyboard clicks, as if a
//! machine from 1987 were playing the game by itself. Commands come from a
//! script file and are echoed keystroke by keystroke before being sent.

use std::env;
use std::path::Path;

use anyhow::Result;
use env_logger::Env;
use log::{info, warn};

mod ansi;
mod audio;
mod color;
mod config;
mod display;
mod font;
mod os;
mod pacer;
mod pump;
mod renderer;
mod script;
mod term;

use audio::{AudioSink, CpalSink, NullSink};
use config::Config;
use display::headless::HeadlessDriver;
use display::window::MinifbDriver;
use display::DisplayDriver;
use font::GlyphCache;
use os::PipeChild;
use pacer::{Chunking, Pacer};
use pump::OutputPump;
use renderer::render;
use script::{CommandSource, ScriptSource};
use term::{Style, TerminalGrid};

const DEFAULT_CONFIG_PATH: &str = "faketerm.json";

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp_micros()
        .init();

    let config_path = env::args().nth(1).unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
    let config = Config::load(Path::new(&config_path));

    let mut display = open_display(&config);
    let mut audio = open_audio(&config);

    let child = PipeChild::spawn(&config.game.program, &config.game.args)?;
    let mut pump = OutputPump::new(child);

    let mut source: Box<dyn CommandSource> = match &config.game.script {
        Some(path) => Box::new(ScriptSource::from_file(Path::new(path))?),
        None => {
            warn!("no command script configured; showing the intro only");
            Box::new(EmptySource)
        }
    };

    let mut grid = TerminalGrid::new(config.colors.foreground, config.colors.background);
    grid.set_status_bg(config.colors.status_background);
    let mut cache = GlyphCache::new();

    let beep = config.pacing.sound;
    let game_cadence = config.pacing.game.cadence();
    let echo_cadence = config.pacing.echo.cadence();

    display.present(&render(&grid, &mut cache, false))?;

    let mut awaiting_intro = true;
    loop {
        if display.poll_quit() {
            info!("quit requested");
            break;
        }

        let block = if awaiting_intro {
            pump.collect_intro()?
        } else {
            pump.collect_block()?
        };

        if let Some(status) = &block.status {
            grid.set_status(status);
        }

        if !block.text.is_empty() {
            let finished = Pacer {
                grid: &mut grid,
                cache: &mut cache,
                display: display.as_mut(),
                audio: audio.as_mut(),
            }
            .type_out(
                &format!("{}\n", block.text),
                Style::default(),
                game_cadence,
                Chunking::Word,
                beep,
            )?;
            if !finished {
                break;
            }
        } else {
            display.present(&render(&grid, &mut cache, false))?;
        }

        if awaiting_intro {
            awaiting_intro = false;
            continue;
        }

        if block.at_prompt {
            let Some(cmd) = source.next_command() else {
                info!("command script exhausted");
                break;
            };
            let sent = pump.send_command(&cmd)?;
            let finished = Pacer {
                grid: &mut grid,
                cache: &mut cache,
                display: display.as_mut(),
                audio: audio.as_mut(),
            }
            .type_out(
                &format!("\n>> {sent}\n"),
                Style::default(),
                echo_cadence,
                Chunking::Char,
                beep,
            )?;
            if !finished {
                break;
            }
        }
    }

    Ok(())
}

/// Opens the window, or falls back to the headless driver so the simulator
/// still runs on machines with no display.
fn open_display(config: &Config) -> Box<dyn DisplayDriver> {
    if config.display.headless {
        return Box::new(HeadlessDriver::new());
    }
    match MinifbDriver::new(&config.display, config.colors.border.to_argb()) {
        Ok(driver) => Box::new(driver),
        Err(e) => {
            warn!("no window available, running headless: {e:#}");
            Box::new(HeadlessDriver::new())
        }
    }
}

fn open_audio(config: &Config) -> Box<dyn AudioSink> {
    if !config.pacing.sound {
        return Box::new(NullSink);
    }
    match CpalSink::new() {
        Some(sink) => Box::new(sink),
        None => Box::new(NullSink),
    }
}

/// Source with no commands at all; the session ends at the first prompt.
struct EmptySource;

impl CommandSource for EmptySource {
    fn next_command(&mut self) -> Option<String> {
        None
    }
}
