use std::sync::Arc;

use crate::{
    config::ShowConfig,
    data::session::Session,
    foundation::core::{Millis, Viewport},
    foundation::error::SpreadResult,
    scene::builder::{RelayoutMode, SceneBuilder, SceneHandles},
    scene::graph::SceneGraph,
    timeline::animator::{AnimatorState, Cue, CueOutcome, Stage, TimelineAnimator},
    timeline::plan::TimelinePlan,
    timeline::scheduler::Scheduler,
};

/// The running three-panel visualization.
///
/// Owns the scene graph, the cue queue and the animator. Time only moves through
/// [`Show::advance_to`]; nothing happens between calls.
#[derive(Debug)]
pub struct Show {
    graph: SceneGraph,
    builder: SceneBuilder,
    handles: SceneHandles,
    animator: TimelineAnimator,
    scheduler: Scheduler<Cue>,
    viewport: Viewport,
    started: bool,
}

impl Show {
    /// Build the scene for `viewport`. The timeline stays idle until [`Show::start`].
    pub fn new(
        session: Arc<Session>,
        config: Arc<ShowConfig>,
        viewport: Viewport,
    ) -> SpreadResult<Self> {
        config.validate()?;
        let builder = SceneBuilder::new(session.clone(), config.clone());
        let mut graph = SceneGraph::new();
        let handles = builder.build(&mut graph, viewport)?;
        Ok(Self {
            graph,
            builder,
            handles,
            animator: TimelineAnimator::new(session, config),
            scheduler: Scheduler::new(),
            viewport,
            started: false,
        })
    }

    pub fn now(&self) -> Millis {
        self.graph.now()
    }

    pub fn scene(&self) -> &SceneGraph {
        &self.graph
    }

    pub fn handles(&self) -> &SceneHandles {
        &self.handles
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn state(&self) -> AnimatorState {
        self.animator.state()
    }

    /// Number of completed cycles.
    pub fn cycle(&self) -> u64 {
        self.animator.cycle()
    }

    pub fn plan(&self) -> TimelinePlan {
        self.animator.plan()
    }

    /// Schedule the first cycle one startup delay after `now`. Calling it again is a no-op.
    pub fn start(&mut self, now: Millis) -> SpreadResult<()> {
        if self.started {
            tracing::debug!("show already started");
            return Ok(());
        }
        self.advance_to(now)?;
        let delay = self.animator.config().timing.startup_delay_ms;
        self.scheduler
            .schedule(self.graph.now().saturating_add(delay), Cue::Start);
        self.started = true;
        Ok(())
    }

    /// Lay the scene out for a new viewport width without disturbing the animation.
    #[tracing::instrument(skip(self))]
    pub fn resize(&mut self, width: f64) -> SpreadResult<()> {
        let viewport = Viewport::new(width)?;
        self.builder.relayout(
            &mut self.graph,
            &self.handles,
            viewport,
            RelayoutMode::Preserve,
        )?;
        self.viewport = viewport;
        Ok(())
    }

    /// Dispatch every cue due at or before `t`, in time order, then sample the scene at `t`.
    ///
    /// The scene clock is moved to each cue's own time before it is dispatched, so transitions
    /// start where they would have in real time. Going backwards is ignored.
    pub fn advance_to(&mut self, t: Millis) -> SpreadResult<Vec<CueOutcome>> {
        let mut outcomes = Vec::new();
        if t < self.graph.now() {
            return Ok(outcomes);
        }
        while let Some((at, cue)) = self.scheduler.pop_due(t) {
            self.graph.advance_to(at)?;
            let outcome = self.animator.handle(
                at,
                cue,
                Stage {
                    builder: &self.builder,
                    surface: &mut self.graph,
                    handles: &self.handles,
                    viewport: self.viewport,
                    scheduler: &mut self.scheduler,
                },
            )?;
            outcomes.push(outcome);
        }
        self.graph.advance_to(t)?;
        Ok(outcomes)
    }
}

#[cfg(test)]
#[path = "../tests/unit/show.rs"]
mod tests;
