//! Scrolls a randomly colored banner across the controller, without any clock.
//!
//! Usage: `cargo run --example banner [repetitions]`

use std::time::Duration;

use moundboard::launchpad::Output;
use moundboard::util::Array2d;
use moundboard::{
    Color, FrameStatus, Grid, GridConfig, OutputDevice as _, OutputHandle, Player,
    ShiftAnimation,
};

const BANNER: [&str; 5] = [
    "#   #  ###  #   # #   # ####  ",
    "## ## #   # #   # ##  # #   # ",
    "# # # #   # #   # # # # #   # ",
    "#   # #   # #   # #  ## #   # ",
    "#   #  ###   ###  #   # ####  ",
];

fn random_color() -> Color {
    use nanorand::Rng as _;
    let mut rng = nanorand::tls_rng();
    // skip black and the grays
    Color::ALL[rng.generate_range(4..Color::ALL.len())]
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let repetitions: usize = match std::env::args().nth(1) {
        Some(arg) => arg.parse()?,
        None => 1,
    };

    let config = GridConfig::default();
    // Center the glyphs vertically
    let top = (config.rows as usize).saturating_sub(BANNER.len()) / 2;
    let letter_color = random_color();
    let bitmap = Array2d::from_fn(BANNER[0].len(), config.rows as usize, |x, y| {
        match y.checked_sub(top).and_then(|row| BANNER.get(row)) {
            Some(line) if line.as_bytes()[x] == b'#' => letter_color,
            _ => Color::Black,
        }
    });

    let mut grid = Grid::new(config)?;
    let output = OutputHandle::new(Output::guess()?);
    output.send(&grid.config().revision.handshake_bytes())?;
    grid.set_output(Some(output));

    let layout = grid.add_layout("banner");
    grid.set_current_layout(layout)?;
    grid.flush();
    let grid = grid.into_shared();

    for _ in 0..repetitions {
        let animation = ShiftAnimation::new(Duration::from_millis(90), bitmap.clone());
        match Player::start(animation, &grid, layout)?.join() {
            FrameStatus::Finished => {}
            status => {
                println!("Banner stopped early: {:?}", status);
                break;
            }
        }
    }

    Ok(())
}
