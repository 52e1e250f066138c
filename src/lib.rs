//! spreadviz animates precomputed epidemic runs over a university network, drawn three times side
//! by side (one panel per prestige tier), and renders the result to SVG or PNG.
//!
//! - Load a [`Session`] from the node table, the edge table and the epidemic dataset
//! - Create a [`Show`] for a viewport width and [`Show::start`] it
//! - Move virtual time with [`Show::advance_to`] and read the scene with [`to_svg`]
//! - Or record a frame range and stream it into a [`FrameSink`]
#![forbid(unsafe_code)]

mod foundation;

pub(crate) mod animation;
pub(crate) mod config;
pub(crate) mod data;
pub(crate) mod export;
pub(crate) mod ident;
pub(crate) mod layout;
pub(crate) mod render;
pub(crate) mod scene;
pub(crate) mod show;
pub(crate) mod timeline;

pub use crate::animation::ease::Ease;
pub use crate::config::{LayoutConfig, Palette, PanelSources, ShowConfig, StrokeWidths, Timing};
pub use crate::data::epidemic::{EpidemicRun, PathEntry, read_epidemics};
pub use crate::data::session::{DataPaths, Session};
pub use crate::data::tables::{EdgeRow, Institution, read_edge_table, read_node_table};
pub use crate::export::record::{
    RenderStats, RenderThreading, frame_time, record_svg_frames, render_frames,
};
pub use crate::export::sink::{FrameSink, InMemorySink, PngSequenceSink, SinkConfig, write_png};
pub use crate::foundation::color::Color;
pub use crate::foundation::core::{Millis, Panel, Point, Viewport};
pub use crate::foundation::error::{SpreadError, SpreadResult};
pub use crate::foundation::math::dist;
pub use crate::ident::key::{EdgeKey, InstitutionKey, edge_element_id, normalize_name};
pub use crate::layout::panels::{LegendLayout, PanelLayout};
pub use crate::render::frame::{FrameRGBA, RenderSettings};
pub use crate::render::raster::{SvgRasterizer, rasterize_svg};
pub use crate::render::svg::to_svg;
pub use crate::scene::builder::{
    EdgeHandle, LegendHandles, NodeHandle, PanelHandles, RelayoutMode, SceneBuilder, SceneHandles,
};
pub use crate::scene::graph::{Element, Geometry, Layer, SceneGraph, Style};
pub use crate::scene::surface::{
    DrawingSurface, ElementId, LayerId, Property, ShapeSpec, Transition, Value,
};
pub use crate::show::Show;
pub use crate::timeline::animator::{
    AnimatorState, Cue, CueOutcome, PanelTickReport, Stage, TickReport, TimelineAnimator,
};
pub use crate::timeline::plan::{PanelPlan, PlannedTransition, TickPlan, TimelinePlan, select_runs};
pub use crate::timeline::scheduler::{CueId, Scheduler};
