//! Plays light shows on a connected controller in sync with the MIDI clock it receives.
//!
//! Usage: `cargo run --example startup_show [grid.toml] [show.toml]`
//!
//! The top right pad toggles between a main layout and a layout of faders.
//!
//! Without arguments a 10x10 grid and the built-in startup show are used, and the startup show
//! is replayed on the clock's start message. A show file given as second argument is registered
//! too and played on start instead.

use moundboard::launchpad::{Input, Message, Output};
use moundboard::{
    Action, Color, Grid, GridConfig, InputDevice as _, LightShow, MsgPollingWrapper as _,
    OutputDevice as _, OutputHandle, PlaybackController, Session,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => GridConfig::from_toml_str(&std::fs::read_to_string(path)?)?,
        None => GridConfig::default(),
    };

    let mut playback = PlaybackController::new();
    let start_show = match args.next() {
        Some(path) => {
            let show = LightShow::from_toml_str(&std::fs::read_to_string(path)?)?;
            let name = show.name().to_owned();
            playback.register(show);
            name
        }
        None => LightShow::STARTUP.to_owned(),
    };

    let mut grid = Grid::new(config)?;
    let (columns, rows) = (grid.columns(), grid.rows());
    let main = grid.add_layout("main");
    let faders = grid.add_layout("faders");

    // Every column but the last is a fader; the last column's top pad leads back to main
    let layout = grid.layout_mut(faders).unwrap();
    for x in 0..columns - 1 {
        layout.make_fader(x, Color::ALL[1 + (x as usize * 5) % 63]);
    }
    let mut back = layout.button_mut(columns - 1, rows - 1);
    back.set_color(Color::White);
    back.set_action(Action::SwitchLayout(main));

    let layout = grid.layout_mut(main).unwrap();
    let mut to_faders = layout.button_mut(columns - 1, rows - 1);
    to_faders.set_color(Color::White);
    to_faders.set_action(Action::SwitchLayout(faders));
    // Paint the bottom row with the palette's primary colors and let them cycle on press
    for (x, &color) in [Color::Red, Color::Yellow, Color::Green, Color::Blue]
        .iter()
        .enumerate()
    {
        let mut button = layout.button_mut(x as u8, 0);
        button.set_color(color);
        button.set_action(Action::NextColor);
    }
    grid.set_current_layout(main)?;

    let mut session = Session::new(grid, playback).with_clock_start_show(Some(&start_show));
    session.connect_output(OutputHandle::new(Output::guess()?))?;

    let input = Input::guess_polling()?;
    input.drain();
    session.on_input_connected()?;

    for message in input.iter() {
        if let Message::Start = message {
            println!("Clock started, playing {}", start_show);
        }
        session.handle_message(&message);
    }

    Ok(())
}
