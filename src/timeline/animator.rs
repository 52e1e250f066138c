use std::sync::Arc;

use crate::{
    config::ShowConfig,
    data::session::Session,
    foundation::core::{Millis, Panel, Viewport},
    foundation::error::SpreadResult,
    foundation::math::dist,
    ident::key::{EdgeKey, InstitutionKey},
    scene::builder::{PanelHandles, RelayoutMode, SceneBuilder, SceneHandles},
    scene::surface::{DrawingSurface, Property, Transition, Value},
    timeline::plan::select_runs,
    timeline::scheduler::Scheduler,
};

/// A scheduled timeline event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum Cue {
    /// Begin a cycle: select runs and schedule its ticks and reset.
    Start,
    Tick(i32),
    Reset,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub enum AnimatorState {
    #[default]
    Idle,
    SelectingRuns,
    Playing {
        tick: i32,
    },
    Resetting,
}

/// What one tick did to one panel.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct PanelTickReport {
    /// Selected run, or `None` when the panel sits this cycle out.
    pub run: Option<usize>,
    pub nodes_recolored: usize,
    pub edges_drawn: usize,
    /// Entry parts skipped for a missing node, edge or coordinate.
    pub skipped: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct TickReport {
    pub cycle: u64,
    pub tick: i32,
    pub panels: [PanelTickReport; 3],
}

impl TickReport {
    pub fn panel(&self, panel: Panel) -> &PanelTickReport {
        &self.panels[panel.index()]
    }

    pub fn skipped(&self) -> usize {
        self.panels.iter().map(|p| p.skipped).sum()
    }
}

/// Result of dispatching one cue.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub enum CueOutcome {
    Started { cycle: u64 },
    Ticked(TickReport),
    Reset { cycle: u64 },
}

/// Everything a cue dispatch may touch besides the animator itself.
pub struct Stage<'a, S: DrawingSurface + ?Sized> {
    pub builder: &'a SceneBuilder,
    pub surface: &'a mut S,
    pub handles: &'a SceneHandles,
    pub viewport: Viewport,
    pub scheduler: &'a mut Scheduler<Cue>,
}

/// Drives the infection cycle: run selection, ticks, reset, repeat.
///
/// All three panels are processed inside the same cue dispatch. The recolour and draw-in
/// transitions it starts are owned by the surface and may still be running when the next tick
/// fires.
#[derive(Debug)]
pub struct TimelineAnimator {
    session: Arc<Session>,
    config: Arc<ShowConfig>,
    state: AnimatorState,
    cycle: u64,
    cycle_start: Millis,
    selected: [Option<usize>; 3],
}

impl TimelineAnimator {
    pub fn new(session: Arc<Session>, config: Arc<ShowConfig>) -> Self {
        Self {
            session,
            config,
            state: AnimatorState::Idle,
            cycle: 0,
            cycle_start: Millis::ZERO,
            selected: [None; 3],
        }
    }

    pub fn state(&self) -> AnimatorState {
        self.state
    }

    /// Number of completed cycles.
    pub fn cycle(&self) -> u64 {
        self.cycle
    }

    pub fn cycle_start(&self) -> Millis {
        self.cycle_start
    }

    pub fn selected(&self, panel: Panel) -> Option<usize> {
        self.selected[panel.index()]
    }

    pub(crate) fn session(&self) -> &Session {
        &self.session
    }

    pub(crate) fn config(&self) -> &ShowConfig {
        &self.config
    }

    pub fn handle<S: DrawingSurface + ?Sized>(
        &mut self,
        at: Millis,
        cue: Cue,
        stage: Stage<'_, S>,
    ) -> SpreadResult<CueOutcome> {
        match cue {
            Cue::Start => Ok(self.start_cycle(at, stage.scheduler)),
            Cue::Tick(tick) => self
                .tick(tick, stage.surface, stage.handles)
                .map(CueOutcome::Ticked),
            Cue::Reset => self.reset(at, stage),
        }
    }

    fn start_cycle(&mut self, at: Millis, scheduler: &mut Scheduler<Cue>) -> CueOutcome {
        self.state = AnimatorState::SelectingRuns;
        self.selected = select_runs(self.session.runs(), &self.config);
        self.cycle_start = at;

        let timing = &self.config.timing;
        for tick in timing.first_tick..=timing.last_tick {
            scheduler.schedule(at.saturating_add(timing.tick_offset_ms(tick)), Cue::Tick(tick));
        }
        scheduler.schedule(at.saturating_add(timing.reset_offset_ms()), Cue::Reset);

        tracing::debug!(cycle = self.cycle, at = at.0, "cycle started");
        self.state = AnimatorState::Playing {
            tick: timing.first_tick,
        };
        CueOutcome::Started { cycle: self.cycle }
    }

    /// Apply every transition of `tick` to all three panels.
    #[tracing::instrument(skip(self, surface, handles), fields(cycle = self.cycle))]
    pub fn tick<S: DrawingSurface + ?Sized>(
        &mut self,
        tick: i32,
        surface: &mut S,
        handles: &SceneHandles,
    ) -> SpreadResult<TickReport> {
        self.state = AnimatorState::Playing { tick };
        let mut report = TickReport {
            cycle: self.cycle,
            tick,
            panels: Default::default(),
        };

        for panel in Panel::ALL {
            let slot = &mut report.panels[panel.index()];
            slot.run = self.selected[panel.index()];
            if tick < 0 {
                continue;
            }
            if let Some(run) = slot.run {
                self.tick_panel(tick, run, panel, surface, handles.panel(panel), slot)?;
            }
        }

        tracing::debug!(
            tick,
            high = ?report.panel(Panel::High),
            mid = ?report.panel(Panel::Mid),
            low = ?report.panel(Panel::Low),
            "tick applied"
        );
        Ok(report)
    }

    fn tick_panel<S: DrawingSurface + ?Sized>(
        &self,
        tick: i32,
        run: usize,
        panel: Panel,
        surface: &mut S,
        handles: &PanelHandles,
        report: &mut PanelTickReport,
    ) -> SpreadResult<()> {
        let session = &self.session;
        let palette = &self.config.palette;
        let strokes = &self.config.strokes;
        let timing = &self.config.timing;
        let panel_source = self.config.sources.for_panel(panel);

        for (source, target) in session.run(run)?.entries_at(tick) {
            let source_key = InstitutionKey::from_name(source);
            let target_key = InstitutionKey::from_name(target);

            match handles.node(&target_key) {
                Some(node) => {
                    let fill = if target == panel_source {
                        palette.source
                    } else {
                        palette.lit
                    };
                    surface.begin_transition(
                        node.element,
                        Transition::new(
                            Property::Fill,
                            Value::Color(fill),
                            timing.recolor_ms,
                            timing.recolor_ease,
                        ),
                    )?;
                    surface.begin_transition(
                        node.element,
                        Transition::new(
                            Property::Stroke,
                            Value::Color(palette.lit_stroke),
                            timing.recolor_ms,
                            timing.recolor_ease,
                        ),
                    )?;
                    report.nodes_recolored += 1;
                }
                None => {
                    tracing::warn!(
                        panel = panel.label(),
                        infected = target,
                        "no node for infected institution"
                    );
                    report.skipped += 1;
                }
            }

            let Some(edge) = handles.edge(&EdgeKey::new(source_key.clone(), target_key.clone()))
            else {
                tracing::warn!(
                    panel = panel.label(),
                    from = source,
                    to = target,
                    "no edge for transmission"
                );
                report.skipped += 1;
                continue;
            };
            let (Some(a), Some(b)) = (
                session.coords_of(&source_key),
                session.coords_of(&target_key),
            ) else {
                tracing::warn!(
                    panel = panel.label(),
                    from = source,
                    to = target,
                    "missing coordinate for edge"
                );
                report.skipped += 1;
                continue;
            };

            // Dash length is the data-space distance, not the on-screen length.
            let length = dist(a.x, a.y, b.x, b.y);
            let el = edge.element;
            surface.raise_to_front(el)?;
            surface.set_number(el, Property::DashArray, length)?;
            surface.set_number(el, Property::DashOffset, length)?;
            surface.set_color(el, Property::Stroke, palette.lit_edge)?;
            surface.set_number(el, Property::StrokeWidth, strokes.active_edge)?;
            surface.set(el, Property::Flipped, Value::Flag(edge.row_source != source_key))?;
            surface.begin_transition(
                el,
                Transition::new(
                    Property::DashOffset,
                    Value::Number(0.0),
                    timing.draw_in_ms,
                    timing.draw_in_ease,
                ),
            )?;
            report.edges_drawn += 1;
        }
        Ok(())
    }

    fn reset<S: DrawingSurface + ?Sized>(
        &mut self,
        at: Millis,
        stage: Stage<'_, S>,
    ) -> SpreadResult<CueOutcome> {
        self.state = AnimatorState::Resetting;
        stage
            .builder
            .relayout(stage.surface, stage.handles, stage.viewport, RelayoutMode::Reset)?;

        let finished = self.cycle;
        self.cycle += 1;
        let stale = stage
            .scheduler
            .cancel_where(|_, cue| matches!(cue, Cue::Tick(_) | Cue::Reset));
        if stale > 0 {
            tracing::debug!(stale, "dropped cues of the finished cycle");
        }
        stage.scheduler.schedule(
            at.saturating_add(self.config.timing.startup_delay_ms),
            Cue::Start,
        );

        tracing::info!(cycle = finished, at = at.0, "cycle finished; scene reset");
        self.state = AnimatorState::Idle;
        Ok(CueOutcome::Reset { cycle: finished })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/animator.rs"]
mod tests;
