//! Collaborator contracts invoked by the engine's phases

use kiln_core::Result;
use std::time::Duration;

/// Instruction passed to the system runner for one phase.
///
/// `is_rendering` selects the phase. `delta_time` is the fixed step for
/// update phases and the wall-clock frame delta for render phases. The value
/// is not retained between phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunRequest {
    pub is_rendering: bool,
    pub delta_time: Duration,
}

/// Executes registered logic for one phase.
///
/// In a full engine this seam is the ECS; the core imposes no contract
/// beyond the request itself. Errors abort the current frame.
pub trait SystemRunner {
    fn run(&mut self, request: RunRequest) -> Result<()>;
}

/// A system ticked by [`SystemSet`].
pub trait RuntimeSystem {
    /// Human-readable name for this system
    fn name(&self) -> &str;

    /// Called once per fixed update step
    fn update(&mut self, dt: Duration) -> Result<()>;

    /// Called once per rendered frame
    fn render(&mut self, dt: Duration) -> Result<()>;
}

/// Registration-ordered [`SystemRunner`] over boxed systems.
#[derive(Default)]
pub struct SystemSet {
    systems: Vec<Box<dyn RuntimeSystem>>,
}

impl SystemSet {
    pub fn new() -> Self {
        Self {
            systems: Vec::new(),
        }
    }

    /// Add a system. Systems run in the order they were registered.
    pub fn register(&mut self, system: Box<dyn RuntimeSystem>) {
        self.systems.push(system);
    }

    pub fn len(&self) -> usize {
        self.systems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.systems.is_empty()
    }
}

impl SystemRunner for SystemSet {
    fn run(&mut self, request: RunRequest) -> Result<()> {
        for system in &mut self.systems {
            if request.is_rendering {
                system.render(request.delta_time)?;
            } else {
                system.update(request.delta_time)?;
            }
        }
        Ok(())
    }
}

/// Paints frames and owns asset loading for the render phase.
pub trait RenderBackend {
    fn init(&mut self) -> Result<()>;

    /// Load assets; returns once they are resident. Called during engine
    /// init, before the first frame is scheduled.
    fn load(&mut self) -> Result<()>;

    fn render(&mut self, delta: Duration) -> Result<()>;
}

/// Input polling hooks, invoked at the tail of each phase.
pub trait InputBackend {
    fn init(&mut self) -> Result<()>;
    fn update(&mut self) -> Result<()>;
    fn render(&mut self) -> Result<()>;
    fn stop(&mut self) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Tagged {
        tag: &'static str,
        trace: Rc<RefCell<Vec<String>>>,
    }

    impl RuntimeSystem for Tagged {
        fn name(&self) -> &str {
            self.tag
        }

        fn update(&mut self, dt: Duration) -> Result<()> {
            self.trace
                .borrow_mut()
                .push(format!("{} update {}", self.tag, dt.as_millis()));
            Ok(())
        }

        fn render(&mut self, dt: Duration) -> Result<()> {
            self.trace
                .borrow_mut()
                .push(format!("{} render {}", self.tag, dt.as_millis()));
            Ok(())
        }
    }

    #[test]
    fn set_dispatches_phase_in_registration_order() {
        let trace = Rc::new(RefCell::new(Vec::new()));
        let mut set = SystemSet::new();
        set.register(Box::new(Tagged {
            tag: "a",
            trace: trace.clone(),
        }));
        set.register(Box::new(Tagged {
            tag: "b",
            trace: trace.clone(),
        }));
        assert_eq!(set.len(), 2);

        set.run(RunRequest {
            is_rendering: false,
            delta_time: Duration::from_millis(33),
        })
        .unwrap();
        set.run(RunRequest {
            is_rendering: true,
            delta_time: Duration::from_millis(100),
        })
        .unwrap();

        assert_eq!(
            *trace.borrow(),
            vec!["a update 33", "b update 33", "a render 100", "b render 100"]
        );
    }

    struct Failing;

    impl RuntimeSystem for Failing {
        fn name(&self) -> &str {
            "failing"
        }

        fn update(&mut self, _dt: Duration) -> Result<()> {
            Err(kiln_core::KilnError::RuntimeError("boom".to_string()))
        }

        fn render(&mut self, _dt: Duration) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn first_failure_stops_the_run() {
        let trace = Rc::new(RefCell::new(Vec::new()));
        let mut set = SystemSet::new();
        set.register(Box::new(Failing));
        set.register(Box::new(Tagged {
            tag: "after",
            trace: trace.clone(),
        }));

        let result = set.run(RunRequest {
            is_rendering: false,
            delta_time: Duration::from_millis(33),
        });
        assert!(result.is_err());
        assert!(trace.borrow().is_empty());
    }
}
