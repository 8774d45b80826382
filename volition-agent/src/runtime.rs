use volition_core::{ActionCandidate, ActionStatus, StepAction};

/// Drives at most one running step at a time.
///
/// The environment behind the step is opaque; the runtime only relies on the
/// `StepAction` capability set (tick until success/failure, cancel).
pub struct StepRuntime<E> {
    current: Option<(ActionCandidate, Box<dyn StepAction<E>>)>,
}

impl<E> Default for StepRuntime<E> {
    fn default() -> Self {
        Self { current: None }
    }
}

impl<E: 'static> StepRuntime<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_idle(&self) -> bool {
        self.current.is_none()
    }

    pub fn current(&self) -> Option<&ActionCandidate> {
        self.current.as_ref().map(|(candidate, _)| candidate)
    }

    /// Begin a new step, cancelling any step still running.
    pub fn start(&mut self, candidate: ActionCandidate, step: Box<dyn StepAction<E>>, env: &mut E) {
        self.cancel(env);
        self.current = Some((candidate, step));
    }

    pub fn cancel(&mut self, env: &mut E) {
        if let Some((_, mut step)) = self.current.take() {
            step.cancel(env);
        }
    }

    /// Tick the running step. Returns the finished candidate and its outcome,
    /// or `None` while the step is still running (or nothing is running).
    pub fn tick(&mut self, env: &mut E) -> Option<(ActionCandidate, ActionStatus)> {
        let status = {
            let (_, step) = self.current.as_mut()?;
            step.tick(env)
        };
        if status == ActionStatus::Running {
            return None;
        }
        let (candidate, _) = self.current.take()?;
        Some((candidate, status))
    }
}
