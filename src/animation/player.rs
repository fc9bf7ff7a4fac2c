use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;

use super::Animation;
use crate::{Grid, GridError, LayoutId, SharedGrid};

/// Result of advancing a [`Player`] by one frame
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum FrameStatus {
    /// A frame was painted
    Applied,
    /// The animation has no frames left; nothing was painted
    Finished,
    /// The animation was stopped, or its layout stopped being current; nothing was painted
    Cancelled,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum PlayerState {
    Running,
    Finished,
    Cancelled,
}

/// Drives an [`Animation`] that is bound to one layout of a grid.
///
/// If the layout was current when the animation started, switching to another layout cancels
/// the player. An animation started on a layout in the background keeps painting into it; the
/// result becomes visible when the layout is made current.
pub struct Player {
    animation: Box<dyn Animation>,
    layout: LayoutId,
    bound_to_current: bool,
    state: PlayerState,
}

impl Player {
    /// Bind `animation` to `layout` without advancing it. Frames are applied by calling
    /// [`Player::tick`].
    pub fn start_manual(
        animation: impl Animation + 'static,
        grid: &Grid,
        layout: LayoutId,
    ) -> Result<Self, GridError> {
        let mut animation: Box<dyn Animation> = Box::new(animation);
        let target = grid.layout(layout).ok_or(GridError::UnknownLayout(layout))?;
        animation.on_start(target);

        Ok(Self {
            animation,
            layout,
            bound_to_current: grid.current_layout_id() == Some(layout),
            state: PlayerState::Running,
        })
    }

    /// Bind `animation` to `layout` and play it on a worker thread, one frame every
    /// [`Animation::delay`].
    ///
    /// ```no_run
    /// # use std::time::Duration;
    /// # use moundboard::{Color, Grid, GridConfig, Player, ShiftAnimation};
    /// # use moundboard::util::Array2d;
    /// let grid = Grid::new(GridConfig::default())?.into_shared();
    /// let layout = {
    ///     let mut grid = grid.lock().unwrap();
    ///     let layout = grid.add_layout("banner");
    ///     grid.set_current_layout(layout)?;
    ///     layout
    /// };
    ///
    /// let bitmap = Array2d::from_fn(20, 10, |x, _| if x % 2 == 0 { Color::Red } else { Color::Black });
    /// let animation = ShiftAnimation::new(Duration::from_millis(80), bitmap);
    /// let handle = Player::start(animation, &grid, layout)?;
    /// handle.join();
    /// # Ok::<(), moundboard::GridError>(())
    /// ```
    pub fn start(
        animation: impl Animation + 'static,
        grid: &SharedGrid,
        layout: LayoutId,
    ) -> Result<PlayerHandle, GridError> {
        let player = {
            let grid = grid.lock().unwrap_or_else(|e| e.into_inner());
            Self::start_manual(animation, &grid, layout)?
        };

        Ok(player.spawn(grid.clone()))
    }

    pub fn layout_id(&self) -> LayoutId {
        self.layout
    }

    pub fn state(&self) -> PlayerState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == PlayerState::Running
    }

    /// Apply the next frame, if there is one and the player wasn't cancelled
    pub fn tick(&mut self, grid: &mut Grid) -> FrameStatus {
        match self.state {
            PlayerState::Running => {}
            PlayerState::Finished => return FrameStatus::Finished,
            PlayerState::Cancelled => return FrameStatus::Cancelled,
        }

        if self.bound_to_current && grid.current_layout_id() != Some(self.layout) {
            log::info!("Layout {} is no longer current, cancelling animation", self.layout.index());
            self.state = PlayerState::Cancelled;
            return FrameStatus::Cancelled;
        }

        let layout = match grid.layout_mut(self.layout) {
            Some(layout) => layout,
            None => {
                self.state = PlayerState::Cancelled;
                return FrameStatus::Cancelled;
            }
        };

        if !self.animation.has_next() {
            self.state = PlayerState::Finished;
            return FrameStatus::Finished;
        }

        self.animation.apply_next_frame(layout);
        FrameStatus::Applied
    }

    /// Stop applying frames
    pub fn cancel(&mut self) {
        if self.state == PlayerState::Running {
            self.state = PlayerState::Cancelled;
        }
    }

    fn spawn(mut self, grid: SharedGrid) -> PlayerHandle {
        let (stop_sender, stop_receiver) = mpsc::channel();
        let delay = self.animation.delay();

        let worker = thread::spawn(move || loop {
            let mut shared = grid.lock().unwrap_or_else(|e| e.into_inner());
            let status = self.tick(&mut shared);
            let updates = shared.take_updates();
            let output = shared.output().cloned();

            // The output is locked before the grid is released, so a layout switch happening
            // in between can only be flushed after this frame went out
            if let Some(output) = output {
                let mut sink = output.lock();
                drop(shared);
                sink.send_updates(&updates);
            } else {
                drop(shared);
            }

            if status != FrameStatus::Applied {
                return status;
            }

            match stop_receiver.recv_timeout(delay) {
                Err(RecvTimeoutError::Timeout) => {}
                Ok(()) | Err(RecvTimeoutError::Disconnected) => {
                    log::debug!("Animation on layout {} stopped", self.layout.index());
                    self.cancel();
                    return FrameStatus::Cancelled;
                }
            }
        });

        PlayerHandle {
            stop: stop_sender,
            worker,
        }
    }
}

/// Handle to an animation playing on its own worker thread. Dropping the handle stops the
/// animation.
pub struct PlayerHandle {
    stop: mpsc::Sender<()>,
    worker: thread::JoinHandle<FrameStatus>,
}

impl PlayerHandle {
    /// Stop the animation after the current frame and wait for the worker to exit
    pub fn stop(self) -> FrameStatus {
        // Fails only if the worker already exited
        let _ = self.stop.send(());
        self.join()
    }

    /// Wait until the animation finishes on its own
    pub fn join(self) -> FrameStatus {
        let PlayerHandle { stop, worker } = self;
        let status = worker.join().unwrap_or(FrameStatus::Cancelled);
        drop(stop);
        status
    }

    pub fn is_finished(&self) -> bool {
        self.worker.is_finished()
    }
}
