//! Host frame loop

use crate::clock::FrameClock;
use crate::stats::FrameStats;
use crate::system::RuntimeSystem;
use fireworks_core::{FireworksError, Result, Viewport};

/// Drives registered systems once per frame on a single thread.
///
/// Systems run strictly in registration order, so a simulation registered
/// before a renderer always hands it a settled state.
pub struct HostLoop {
    pub clock: FrameClock,
    pub stats: FrameStats,
    viewport: Viewport,
    systems: Vec<Box<dyn RuntimeSystem>>,
    initialized: bool,
}

impl HostLoop {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            clock: FrameClock::new(),
            stats: FrameStats::default(),
            viewport,
            systems: Vec::new(),
            initialized: false,
        }
    }

    pub fn add_system(&mut self, system: Box<dyn RuntimeSystem>) {
        self.systems.push(system);
    }

    pub fn system_names(&self) -> Vec<&str> {
        self.systems.iter().map(|s| s.name()).collect()
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Update the bounds handed to systems, e.g. after a window resize
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn initialize(&mut self) -> Result<()> {
        if self.initialized {
            return Ok(());
        }
        for system in &mut self.systems {
            system.initialize(self.viewport).map_err(|e| {
                FireworksError::RuntimeError(format!(
                    "failed to initialize {}: {e}",
                    system.name()
                ))
            })?;
            log::debug!("[runtime] Initialized system '{}'", system.name());
        }
        self.initialized = true;
        Ok(())
    }

    /// Run one frame with a measured delta-time
    pub fn frame(&mut self) -> Result<f64> {
        let dt = self.clock.tick();
        self.update_systems(dt)?;
        Ok(dt)
    }

    /// Run one frame with an explicit delta-time
    pub fn step(&mut self, dt: f64) -> Result<()> {
        let dt = self.clock.advance(dt);
        self.update_systems(dt)
    }

    fn update_systems(&mut self, dt: f64) -> Result<()> {
        self.initialize()?;
        self.stats.record(dt);
        for system in &mut self.systems {
            if let Err(e) = system.update(self.viewport, dt) {
                log::error!("[runtime] {} update failed: {e}", system.name());
            }
        }
        Ok(())
    }

    /// Loop until `should_exit` returns true. The exit condition is checked
    /// once per frame, before the frame runs. Systems are shut down on exit.
    pub fn run<F>(&mut self, mut should_exit: F) -> Result<()>
    where
        F: FnMut(&FrameClock, &FrameStats) -> bool,
    {
        self.initialize()?;
        while !should_exit(&self.clock, &self.stats) {
            self.frame()?;
        }
        self.shutdown()
    }

    pub fn shutdown(&mut self) -> Result<()> {
        for system in &mut self.systems {
            system.shutdown()?;
            log::debug!("[runtime] Shut down system '{}'", system.name());
        }
        self.initialized = false;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    struct Log {
        events: Vec<String>,
    }

    struct Recorder {
        name: &'static str,
        log: Rc<RefCell<Log>>,
        fail_init: bool,
        fail_update: bool,
    }

    impl Recorder {
        fn boxed(name: &'static str, log: &Rc<RefCell<Log>>) -> Box<Self> {
            Box::new(Self {
                name,
                log: Rc::clone(log),
                fail_init: false,
                fail_update: false,
            })
        }
    }

    impl RuntimeSystem for Recorder {
        fn initialize(&mut self, viewport: Viewport) -> Result<()> {
            if self.fail_init {
                return Err(FireworksError::RuntimeError("boom".into()));
            }
            self.log
                .borrow_mut()
                .events
                .push(format!("{} init {}", self.name, viewport.width));
            Ok(())
        }

        fn update(&mut self, _viewport: Viewport, dt: f64) -> Result<()> {
            self.log
                .borrow_mut()
                .events
                .push(format!("{} update {dt}", self.name));
            if self.fail_update {
                return Err(FireworksError::RuntimeError("update".into()));
            }
            Ok(())
        }

        fn shutdown(&mut self) -> Result<()> {
            self.log
                .borrow_mut()
                .events
                .push(format!("{} shutdown", self.name));
            Ok(())
        }

        fn name(&self) -> &str {
            self.name
        }
    }

    #[test]
    fn systems_run_in_registration_order() {
        let log = Rc::new(RefCell::new(Log::default()));
        let mut host = HostLoop::new(Viewport::new(640.0, 480.0));
        host.add_system(Recorder::boxed("sim", &log));
        host.add_system(Recorder::boxed("render", &log));

        host.step(0.5).unwrap();

        assert_eq!(
            log.borrow().events,
            vec![
                "sim init 640",
                "render init 640",
                "sim update 0.25",
                "render update 0.25"
            ]
        );
        assert_eq!(host.system_names(), vec!["sim", "render"]);
    }

    #[test]
    fn run_checks_exit_before_each_frame() {
        let log = Rc::new(RefCell::new(Log::default()));
        let mut host = HostLoop::new(Viewport::PREVIEW);
        host.add_system(Recorder::boxed("sim", &log));

        host.run(|clock, _| clock.frame_count >= 3).unwrap();

        let events = &log.borrow().events;
        assert_eq!(events.iter().filter(|e| e.contains("update")).count(), 3);
        assert_eq!(events.last().unwrap(), "sim shutdown");
        assert_eq!(host.stats.len(), 3);
    }

    #[test]
    fn run_with_immediate_exit_runs_no_frames() {
        let log = Rc::new(RefCell::new(Log::default()));
        let mut host = HostLoop::new(Viewport::PREVIEW);
        host.add_system(Recorder::boxed("sim", &log));
        host.run(|_, _| true).unwrap();
        assert!(!log.borrow().events.iter().any(|e| e.contains("update")));
    }

    #[test]
    fn init_failure_is_reported() {
        let log = Rc::new(RefCell::new(Log::default()));
        let mut host = HostLoop::new(Viewport::PREVIEW);
        let mut system = Recorder::boxed("bad", &log);
        system.fail_init = true;
        host.add_system(system);
        let err = host.step(0.1).unwrap_err();
        assert!(err.to_string().contains("failed to initialize bad"));
    }

    #[test]
    fn update_failure_does_not_stop_other_systems() {
        let log = Rc::new(RefCell::new(Log::default()));
        let mut host = HostLoop::new(Viewport::PREVIEW);
        let mut flaky = Recorder::boxed("flaky", &log);
        flaky.fail_update = true;
        host.add_system(flaky);
        host.add_system(Recorder::boxed("steady", &log));

        host.step(0.1).unwrap();
        assert!(log
            .borrow()
            .events
            .contains(&"steady update 0.1".to_string()));
    }

    #[test]
    fn viewport_changes_reach_systems() {
        let mut host = HostLoop::new(Viewport::PREVIEW);
        host.set_viewport(Viewport::new(1920.0, 1080.0));
        assert_eq!(host.viewport(), Viewport::new(1920.0, 1080.0));
    }
}
