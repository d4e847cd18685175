//! The main loop: tick, feed input to the controller, redraw when needed, sleep until the next tick.

use std::{io, thread};

use tracing::{debug, error, trace};

use crate::{
    controller::{Response, ScreenController},
    io::Action,
    render::RenderContext,
    timing::Timer,
    words::Fetch,
    Error, Result,
};

/// Handles running a [`ScreenController`] against a display at a steady rate.
#[must_use]
pub struct Runner<F: Fetch + Clone> {
    controller: ScreenController<F>,
    ctx: RenderContext,
    timer: Timer,
    tainted: bool,
}

impl<F: Fetch + Clone> Runner<F> {
    /// Prepare to run at `fps` ticks per second.
    pub fn new(controller: ScreenController<F>, ctx: RenderContext, fps: u32) -> Self {
        Self {
            controller,
            ctx,
            timer: Timer::per_second(fps),
            tainted: true,
        }
    }

    fn respond(&mut self, res: Response) -> bool {
        match res {
            Response::Nothing => (),
            Response::Redraw => self.tainted = true,
            Response::Quit => return true,
        }
        false
    }

    /// Do one tick's worth of work.
    ///
    /// Returns whether a stop was requested. A broken input stream is an error, not a stop.
    fn step(&mut self) -> Result<bool> {
        let res = self.controller.tick();
        if self.respond(res) {
            return Ok(true);
        }

        while let Some(action) = self.ctx.poll_input()? {
            match action {
                Action::Error(e) => {
                    error!("input failed, stopping: {}", e);
                    return Err(Error::Io(io::Error::new(
                        io::ErrorKind::Other,
                        format!("input failed: {}", e),
                    )));
                }
                Action::Unknown(what) => trace!(%what, "ignoring unknown input"),
                other => {
                    let res = self.controller.input(other);
                    if self.respond(res) {
                        return Ok(true);
                    }
                }
            }
        }

        if self.tainted || self.ctx.animating() {
            self.controller.render(&mut self.ctx)?;
            self.tainted = false;
        }
        Ok(false)
    }

    /// Run until the player quits. The display is released when this returns, whether or not it succeeded.
    pub fn run(mut self) -> Result<ScreenController<F>> {
        debug!("starting main loop");
        loop {
            if self.step()? {
                break;
            }
            self.timer.tick();
            thread::sleep(self.timer.remaining());
        }
        debug!("main loop done");
        Ok(self.controller)
    }
}
