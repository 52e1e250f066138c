use std::{collections::HashMap, sync::Arc};

use crate::{
    config::ShowConfig,
    data::session::Session,
    data::tables::{EdgeRow, Institution},
    foundation::core::{Panel, Point, Viewport},
    foundation::error::{SpreadError, SpreadResult},
    ident::key::{EdgeKey, InstitutionKey, edge_element_id},
    layout::panels::{LEGEND_FONT_FAMILY, LEGEND_FONT_SIZE, LEGEND_SWATCH_RADIUS, PanelLayout},
    scene::surface::{DrawingSurface, ElementId, LayerId, Property, ShapeSpec, Value},
};

/// How [`SceneBuilder::relayout`] treats the current visual style.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RelayoutMode {
    /// Viewport resize: reposition and resize, keep whatever the animator has painted.
    Preserve,
    /// Loop reset: reposition, cancel in-flight transitions and restore default styling.
    Reset,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NodeHandle {
    pub element: ElementId,
    /// Row index into [`Session::institutions`].
    pub row: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EdgeHandle {
    pub element: ElementId,
    /// Row index into [`Session::edges`].
    pub row: usize,
    /// Source key in the row's own orientation.
    pub row_source: InstitutionKey,
}

/// Element handles for one panel, joined to the data by normalized key.
#[derive(Clone, Debug)]
pub struct PanelHandles {
    pub panel: Panel,
    pub edge_layer: LayerId,
    pub node_layer: LayerId,
    nodes: Vec<NodeHandle>,
    edges: Vec<EdgeHandle>,
    node_by_key: HashMap<InstitutionKey, usize>,
    edge_by_key: HashMap<EdgeKey, usize>,
}

impl PanelHandles {
    pub fn node(&self, key: &InstitutionKey) -> Option<&NodeHandle> {
        self.node_by_key.get(key).map(|&i| &self.nodes[i])
    }

    pub fn edge(&self, key: &EdgeKey) -> Option<&EdgeHandle> {
        self.edge_by_key.get(key).map(|&i| &self.edges[i])
    }

    pub fn nodes(&self) -> &[NodeHandle] {
        &self.nodes
    }

    pub fn edges(&self) -> &[EdgeHandle] {
        &self.edges
    }
}

#[derive(Clone, Debug)]
pub struct LegendHandles {
    pub layer: LayerId,
    pub source_swatch: ElementId,
    pub source_label: ElementId,
    pub infected_swatch: ElementId,
    pub infected_label: ElementId,
}

/// Everything the animator needs to reach scene elements without string lookups.
#[derive(Clone, Debug)]
pub struct SceneHandles {
    panels: [PanelHandles; 3],
    pub legend: LegendHandles,
}

impl SceneHandles {
    pub fn panel(&self, panel: Panel) -> &PanelHandles {
        &self.panels[panel.index()]
    }
}

/// Creates the three panels and the legend, and lays them out again on resize or reset.
#[derive(Clone, Debug)]
pub struct SceneBuilder {
    session: Arc<Session>,
    config: Arc<ShowConfig>,
}

impl SceneBuilder {
    pub fn new(session: Arc<Session>, config: Arc<ShowConfig>) -> Self {
        Self { session, config }
    }

    pub fn layout(&self, viewport: Viewport) -> SpreadResult<PanelLayout> {
        PanelLayout::new(viewport, &self.config.layout)
    }

    fn is_source(&self, inst: &Institution, panel: Panel) -> bool {
        inst.name == self.config.sources.for_panel(panel)
    }

    #[tracing::instrument(skip_all, fields(width = viewport.width))]
    pub fn build<S: DrawingSurface + ?Sized>(
        &self,
        surface: &mut S,
        viewport: Viewport,
    ) -> SpreadResult<SceneHandles> {
        let layout = self.layout(viewport)?;
        surface.set_canvas_size(viewport.width, layout.canvas_height());

        let mut panels = Vec::with_capacity(Panel::ALL.len());
        for panel in Panel::ALL {
            panels.push(self.build_panel(surface, &layout, panel)?);
        }
        let legend = self.build_legend(surface, &layout)?;

        let [high, mid, low]: [PanelHandles; 3] = panels
            .try_into()
            .map_err(|_| SpreadError::animation("expected exactly three panels"))?;
        tracing::debug!(
            nodes = self.session.institutions().len(),
            edges = self.session.edges().len(),
            "scene built"
        );
        Ok(SceneHandles {
            panels: [high, mid, low],
            legend,
        })
    }

    fn build_panel<S: DrawingSurface + ?Sized>(
        &self,
        surface: &mut S,
        layout: &PanelLayout,
        panel: Panel,
    ) -> SpreadResult<PanelHandles> {
        let edge_layer = surface.create_layer(&format!("{}-edges", panel.label()));
        let node_layer = surface.create_layer(&format!("{}-nodes", panel.label()));

        let mut nodes = Vec::with_capacity(self.session.institutions().len());
        let mut node_by_key = HashMap::with_capacity(nodes.capacity());
        for (row, inst) in self.session.institutions().iter().enumerate() {
            let center = layout.place(inst.position, panel);
            let element = surface.create_element(
                node_layer,
                ShapeSpec::Circle {
                    cx: center.x,
                    cy: center.y,
                    r: layout.node_radius(self.is_source(inst, panel)),
                },
            )?;
            surface.set_dom_id(element, format!("{}-{}", panel.label(), inst.key))?;
            self.apply_node_defaults(surface, element, inst, panel)?;
            node_by_key.entry(inst.key.clone()).or_insert(nodes.len());
            nodes.push(NodeHandle { element, row });
        }

        let mut edges = Vec::with_capacity(self.session.edges().len());
        let mut edge_by_key = HashMap::with_capacity(edges.capacity());
        for (row, edge) in self.session.edges().iter().enumerate() {
            let a = layout.place(edge.from, panel);
            let b = layout.place(edge.to, panel);
            let element = surface.create_element(
                edge_layer,
                ShapeSpec::Line {
                    x1: a.x,
                    y1: a.y,
                    x2: b.x,
                    y2: b.y,
                },
            )?;
            surface.set_dom_id(
                element,
                format!(
                    "{}-{}",
                    panel.label(),
                    edge_element_id(&edge.source_key(), &edge.target_key())
                ),
            )?;
            self.apply_edge_defaults(surface, element, edge)?;
            if edge_by_key.contains_key(&edge.key()) {
                tracing::debug!(row, "duplicate edge row; first row keeps the key");
            } else {
                edge_by_key.insert(edge.key(), edges.len());
            }
            edges.push(EdgeHandle {
                element,
                row,
                row_source: edge.source_key(),
            });
        }

        Ok(PanelHandles {
            panel,
            edge_layer,
            node_layer,
            nodes,
            edges,
            node_by_key,
            edge_by_key,
        })
    }

    fn build_legend<S: DrawingSurface + ?Sized>(
        &self,
        surface: &mut S,
        layout: &PanelLayout,
    ) -> SpreadResult<LegendHandles> {
        let palette = &self.config.palette;
        let pos = layout.legend();
        let layer = surface.create_layer("legend");

        let swatch = |surface: &mut S, at: Point| {
            surface.create_element(
                layer,
                ShapeSpec::Circle {
                    cx: at.x,
                    cy: at.y,
                    r: LEGEND_SWATCH_RADIUS,
                },
            )
        };
        let label = |surface: &mut S, at: Point, text: &str| {
            surface.create_element(
                layer,
                ShapeSpec::Text {
                    x: at.x,
                    y: at.y,
                    content: text.to_owned(),
                    font_family: LEGEND_FONT_FAMILY.to_owned(),
                    font_size: LEGEND_FONT_SIZE,
                },
            )
        };

        let source_swatch = swatch(surface, pos.source_swatch)?;
        surface.set_color(source_swatch, Property::Fill, palette.source)?;
        surface.set_number(source_swatch, Property::StrokeWidth, 0.0)?;
        let source_label = label(surface, pos.source_label, "Source institution")?;
        surface.set_color(source_label, Property::Fill, palette.legend_text)?;

        let infected_swatch = swatch(surface, pos.infected_swatch)?;
        surface.set_color(infected_swatch, Property::Fill, palette.lit)?;
        surface.set_number(infected_swatch, Property::StrokeWidth, 0.0)?;
        let infected_label = label(surface, pos.infected_label, "Infected universities")?;
        surface.set_color(infected_label, Property::Fill, palette.legend_text)?;

        Ok(LegendHandles {
            layer,
            source_swatch,
            source_label,
            infected_swatch,
            infected_label,
        })
    }

    fn apply_node_defaults<S: DrawingSurface + ?Sized>(
        &self,
        surface: &mut S,
        element: ElementId,
        inst: &Institution,
        panel: Panel,
    ) -> SpreadResult<()> {
        let palette = &self.config.palette;
        let strokes = &self.config.strokes;
        let (fill, stroke, width) = if self.is_source(inst, panel) {
            (palette.source, palette.source_stroke, strokes.source)
        } else {
            (palette.node_fill, palette.node_stroke, strokes.node)
        };
        surface.set_color(element, Property::Fill, fill)?;
        surface.set_color(element, Property::Stroke, stroke)?;
        surface.set_number(element, Property::StrokeWidth, width)
    }

    fn apply_edge_defaults<S: DrawingSurface + ?Sized>(
        &self,
        surface: &mut S,
        element: ElementId,
        edge: &EdgeRow,
    ) -> SpreadResult<()> {
        let palette = &self.config.palette;
        let strokes = &self.config.strokes;
        let (stroke, width) = if edge.spanning {
            (palette.spanning_edge, strokes.spanning_edge)
        } else {
            (palette.edge, strokes.edge)
        };
        surface.set_color(element, Property::Stroke, stroke)?;
        surface.set_number(element, Property::StrokeWidth, width)?;
        surface.set(element, Property::DashArray, Value::Unset)?;
        surface.set_number(element, Property::DashOffset, 0.0)?;
        surface.set(element, Property::Flipped, Value::Flag(false))
    }

    /// Recompute every position and size for `viewport`.
    ///
    /// In [`RelayoutMode::Preserve`] the current fill and stroke of every element are read back
    /// before repositioning and written again afterwards; nothing the animator painted is lost.
    /// [`RelayoutMode::Reset`] restores the default look of a freshly built scene instead.
    #[tracing::instrument(skip(self, surface, handles), fields(width = viewport.width))]
    pub fn relayout<S: DrawingSurface + ?Sized>(
        &self,
        surface: &mut S,
        handles: &SceneHandles,
        viewport: Viewport,
        mode: RelayoutMode,
    ) -> SpreadResult<()> {
        let layout = self.layout(viewport)?;
        surface.set_canvas_size(viewport.width, layout.canvas_height());

        for panel in Panel::ALL {
            let ph = handles.panel(panel);
            for node in ph.nodes() {
                let inst = &self.session.institutions()[node.row];
                let kept = match mode {
                    RelayoutMode::Preserve => Some((
                        surface.get(node.element, Property::Fill)?,
                        surface.get(node.element, Property::Stroke)?,
                    )),
                    RelayoutMode::Reset => None,
                };

                let center = layout.place(inst.position, panel);
                surface.set_number(node.element, Property::Cx, center.x)?;
                surface.set_number(node.element, Property::Cy, center.y)?;
                surface.set_number(
                    node.element,
                    Property::R,
                    layout.node_radius(self.is_source(inst, panel)),
                )?;

                match kept {
                    Some((fill, stroke)) => {
                        surface.set(node.element, Property::Fill, fill)?;
                        surface.set(node.element, Property::Stroke, stroke)?;
                    }
                    None => {
                        surface.cancel_transitions(node.element);
                        self.apply_node_defaults(surface, node.element, inst, panel)?;
                    }
                }
            }

            for edge in ph.edges() {
                let row = &self.session.edges()[edge.row];
                let kept = match mode {
                    RelayoutMode::Preserve => Some(surface.get(edge.element, Property::Stroke)?),
                    RelayoutMode::Reset => None,
                };

                let a = layout.place(row.from, panel);
                let b = layout.place(row.to, panel);
                surface.set_number(edge.element, Property::X1, a.x)?;
                surface.set_number(edge.element, Property::Y1, a.y)?;
                surface.set_number(edge.element, Property::X2, b.x)?;
                surface.set_number(edge.element, Property::Y2, b.y)?;

                match kept {
                    Some(stroke) => surface.set(edge.element, Property::Stroke, stroke)?,
                    None => {
                        surface.cancel_transitions(edge.element);
                        self.apply_edge_defaults(surface, edge.element, row)?;
                    }
                }
            }
        }

        let pos = layout.legend();
        let legend = &handles.legend;
        surface.set_number(legend.source_swatch, Property::Cx, pos.source_swatch.x)?;
        surface.set_number(legend.source_swatch, Property::Cy, pos.source_swatch.y)?;
        surface.set_number(legend.source_label, Property::X, pos.source_label.x)?;
        surface.set_number(legend.source_label, Property::Y, pos.source_label.y)?;
        surface.set_number(legend.infected_swatch, Property::Cx, pos.infected_swatch.x)?;
        surface.set_number(legend.infected_swatch, Property::Cy, pos.infected_swatch.y)?;
        surface.set_number(legend.infected_label, Property::X, pos.infected_label.x)?;
        surface.set_number(legend.infected_label, Property::Y, pos.infected_label.y)?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/builder.rs"]
mod tests;
