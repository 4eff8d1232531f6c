//! The controller owns run/stop state, the active mode and the
//! fixed-timestep scheduler loop, and forwards commands to the active
//! generator.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Instant;

use crate::clock::{ShutdownSignal, TickClock};
use crate::config::PanelConfig;
use crate::error::{Result, SkyPanelError};
use crate::frame::{FrameBuffer, GridSpec, Rgb};
use crate::panel::{blank_pixels, PanelMapper, PixelSink};
use crate::registry::{ModeDescriptor, ModeRegistry};

/// Snapshot of the controller's mutable state, for inspection and logs.
#[derive(Debug, Clone, PartialEq)]
pub struct ControllerState {
    pub running: bool,
    pub active_mode: usize,
    pub t: f32,
    pub it: u64,
}

/// Everything a tick or a command needs to see atomically: the registry,
/// the clock and the run/mode flags live under one lock so a command can
/// never observe a half-applied mode switch.
struct Engine {
    registry: ModeRegistry,
    clock: TickClock,
    running: bool,
    active_mode: usize,
}

impl Engine {
    fn render_tick(&mut self) -> Result<FrameBuffer> {
        let (t, it) = (self.clock.t, self.clock.it);
        let active_mode = self.active_mode;
        let generator = self
            .registry
            .get_mut(active_mode)
            .ok_or_else(|| SkyPanelError::msg(format!("active mode {active_mode} vanished")))?;

        let mut frame = generator.generate(t, it);
        // Brightness pass, independent of the generator's own intensity
        // computation.
        frame.scale_intensity(generator.brightness());
        self.clock.advance();
        Ok(frame)
    }
}

/// Cloneable handle over the engine; the scheduler thread and the
/// command surface each hold one.
#[derive(Clone)]
pub struct Controller {
    engine: Arc<Mutex<Engine>>,
    sink: Arc<Mutex<Box<dyn PixelSink>>>,
    mapper: PanelMapper,
    grid: GridSpec,
}

impl Controller {
    /// Builds a controller with the full default mode catalog.
    pub fn new(config: &PanelConfig, sink: Box<dyn PixelSink>) -> Self {
        let grid = config.grid();
        Self::with_registry(grid, ModeRegistry::with_defaults(grid), sink)
    }

    /// Builds a controller over an explicit registry. The registry must
    /// not be empty; mode 0 starts active.
    pub fn with_registry(grid: GridSpec, registry: ModeRegistry, sink: Box<dyn PixelSink>) -> Self {
        Self {
            engine: Arc::new(Mutex::new(Engine {
                registry,
                clock: TickClock::new(grid.dt),
                running: false,
                active_mode: 0,
            })),
            sink: Arc::new(Mutex::new(sink)),
            mapper: PanelMapper::new(),
            grid,
        }
    }

    pub fn state(&self) -> Result<ControllerState> {
        let engine = self.lock_engine()?;
        Ok(ControllerState {
            running: engine.running,
            active_mode: engine.active_mode,
            t: engine.clock.t,
            it: engine.clock.it,
        })
    }

    pub fn modes(&self) -> Result<Vec<ModeDescriptor>> {
        Ok(self.lock_engine()?.registry.descriptors())
    }

    pub fn start(&self) -> Result<()> {
        self.lock_engine()?.running = true;
        Ok(())
    }

    /// Stops frame production and pushes one all-dark frame so the
    /// physical lights actually turn off.
    pub fn stop(&self) -> Result<()> {
        self.lock_engine()?.running = false;
        self.transmit(&blank_pixels(self.grid.cell_count()))
    }

    /// Rewinds `t` and `it` without changing the run state.
    pub fn reset(&self) -> Result<()> {
        self.lock_engine()?.clock.reset();
        Ok(())
    }

    /// Switches the active mode and rewinds the clock. An unknown id
    /// fails with [`SkyPanelError::InvalidMode`] and changes nothing.
    /// The target mode keeps whatever internal state it had last time.
    pub fn set_mode(&self, id: usize) -> Result<()> {
        let mut engine = self.lock_engine()?;
        if !engine.registry.contains(id) {
            return Err(SkyPanelError::InvalidMode {
                id,
                available: engine.registry.len(),
            });
        }
        engine.active_mode = id;
        engine.clock.reset();
        Ok(())
    }

    /// Sets a fixed color on the active mode. Picking a color explicitly
    /// also leaves random-color mode.
    pub fn set_color(&self, color: Rgb) -> Result<()> {
        self.with_active(|generator| {
            generator.set_random_mode(false);
            generator.set_color(color);
        })
    }

    pub fn set_random_mode(&self, enabled: bool) -> Result<()> {
        self.with_active(|generator| generator.set_random_mode(enabled))
    }

    pub fn set_speed(&self, raw: f32) -> Result<()> {
        self.with_active(|generator| generator.set_speed(raw))
    }

    pub fn set_brightness(&self, brightness: f32) -> Result<()> {
        self.with_active(|generator| generator.set_brightness(brightness))
    }

    /// The fixed-timestep scheduler loop. Runs until `shutdown` is
    /// signalled; while stopped it idles one period per turn instead of
    /// busy-spinning.
    pub fn run_loop(&self, shutdown: &ShutdownSignal) -> Result<()> {
        let period = TickClock::new(self.grid.dt).period();
        while !shutdown.is_shutdown() {
            let tick_started = Instant::now();

            let frame = {
                let mut engine = self.lock_engine()?;
                if engine.running {
                    Some(engine.render_tick()?)
                } else {
                    None
                }
            };
            if let Some(frame) = frame {
                let pixels = self.mapper.map(&frame);
                self.transmit(&pixels)?;
            }

            let remaining = period.saturating_sub(tick_started.elapsed());
            if shutdown.wait_timeout(remaining) {
                break;
            }
        }
        Ok(())
    }

    fn with_active(&self, apply: impl FnOnce(&mut dyn crate::generator::Generator)) -> Result<()> {
        let mut engine = self.lock_engine()?;
        let active_mode = engine.active_mode;
        let generator = engine
            .registry
            .get_mut(active_mode)
            .ok_or_else(|| SkyPanelError::msg(format!("active mode {active_mode} vanished")))?;
        apply(generator);
        Ok(())
    }

    fn transmit(&self, pixels: &[crate::panel::Pixel]) -> Result<()> {
        let mut sink = self.lock_sink()?;
        sink.set_pixels(pixels)?;
        sink.flush()
    }

    fn lock_engine(&self) -> Result<MutexGuard<'_, Engine>> {
        self.engine
            .lock()
            .map_err(|_| SkyPanelError::msg("controller engine has been poisoned"))
    }

    fn lock_sink(&self) -> Result<MutexGuard<'_, Box<dyn PixelSink>>> {
        self.sink
            .lock()
            .map_err(|_| SkyPanelError::msg("pixel sink has been poisoned"))
    }
}

impl std::fmt::Debug for Controller {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Controller").field("grid", &self.grid).finish()
    }
}
