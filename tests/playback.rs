use std::time::Duration;

use moundboard::launchpad::Input;
use moundboard::util::Array2d;
use moundboard::{
    Color, FrameStatus, Grid, GridConfig, LightShow, MockOutput, OutputHandle,
    PlaybackController, Player, PulseOutcome, Session, ShiftAnimation,
};

fn connected_session() -> (Session, MockOutput) {
    let output = MockOutput::new();
    let mut session = Session::new(
        Grid::new(GridConfig::default()).unwrap(),
        PlaybackController::new(),
    );
    session
        .connect_output(OutputHandle::new(output.clone()))
        .unwrap();
    (session, output)
}

#[test]
fn startup_show_from_raw_clock_bytes() {
    let (mut session, output) = connected_session();
    let main = session.grid_mut().add_layout("main");
    session.grid_mut().set_current_layout(main).unwrap();
    session.on_input_connected().unwrap();
    output.clear();

    let clock = Input::decode(&[0xF8]);
    let mut sent_per_pulse = Vec::new();
    for _ in 0..33 {
        sent_per_pulse.push(session.handle_message(&clock));
    }

    for (pulse, &sent) in sent_per_pulse.iter().enumerate() {
        let expected = if pulse % 8 == 0 { 26 } else { 0 };
        assert_eq!(sent, expected, "pulse {}", pulse);
    }

    // the logo starts at note 11 and ends at note 17
    let messages = output.messages();
    assert_eq!(messages[0], vec![0x90, 11, Color::Red.code()]);
    assert_eq!(messages.last().unwrap(), &vec![0x90, 17, 0]);

    // one more pulse ends the show and brings back the main layout
    assert_eq!(session.handle_message(&clock), 100);
    assert!(session.playback().is_idle());
    assert_eq!(session.grid().current_layout_id(), Some(main));
}

#[test]
fn custom_show_from_toml() {
    let show = LightShow::from_toml_str(
        r#"
        name = "corners"

        [[cue]]
        pulse = 0
        events = [
            { note = 0, velocity = 21 },
            { note = 9, velocity = 21 },
            { note = 90, velocity = 21 },
            { note = 99, velocity = 21 },
        ]

        [[cue]]
        pulse = 2
        events = [{ kind = "off", note = 99 }]
        "#,
    )
    .unwrap();

    let mut grid = Grid::new(GridConfig::default()).unwrap();
    let mut playback = PlaybackController::empty();
    playback.register(show);
    playback.enter("corners", &mut grid).unwrap();
    grid.take_updates();

    assert_eq!(playback.on_pulse(&mut grid), PulseOutcome::Advanced);
    let lit: Vec<u8> = grid
        .take_updates()
        .iter()
        .map(|update| update.note_index)
        .collect();
    // base-10 notes in, linear note indices out
    assert_eq!(lit, vec![0, 9, 90, 99]);

    playback.on_pulse(&mut grid);
    playback.on_pulse(&mut grid);
    assert_eq!(grid.take_updates().len(), 1);
    assert_eq!(playback.on_pulse(&mut grid), PulseOutcome::Finished);
}

#[test]
fn self_paced_banner_scrolls_through() {
    let output = MockOutput::new();
    let config = GridConfig {
        columns: 4,
        rows: 4,
        ..Default::default()
    };
    let mut grid = Grid::new(config).unwrap();
    grid.set_output(Some(OutputHandle::new(output.clone())));
    let layout = grid.add_layout("banner");
    grid.set_current_layout(layout).unwrap();
    grid.flush();
    output.clear();
    let grid = grid.into_shared();

    let bitmap = Array2d::from_fn(2, 4, |_, _| Color::Cyan);
    let animation = ShiftAnimation::new(Duration::from_millis(1), bitmap);
    let status = Player::start(animation, &grid, layout).unwrap().join();
    assert_eq!(status, FrameStatus::Finished);

    // every column was cyan at some point, and the layout ends up black again
    let messages = output.messages();
    for column in 0..4u8 {
        assert!(messages
            .iter()
            .any(|message| message[1] == column && message[2] == Color::Cyan.code()));
    }
    let grid = grid.lock().unwrap();
    assert!(grid
        .current_layout()
        .unwrap()
        .buttons()
        .all(|button| button.color() == Color::Black));
}
