use crate::{
    foundation::color::Color,
    foundation::core::Millis,
    foundation::error::{SpreadError, SpreadResult},
    scene::surface::{
        DrawingSurface, ElementId, LayerId, Property, ShapeSpec, Transition, Value,
        unknown_element,
    },
};

#[derive(Clone, Debug, PartialEq)]
pub enum Geometry {
    Circle {
        cx: f64,
        cy: f64,
        r: f64,
    },
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        flipped: bool,
    },
    Text {
        x: f64,
        y: f64,
        content: String,
        font_family: String,
        font_size: f64,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Style {
    pub fill: Option<Color>,
    pub stroke: Option<Color>,
    pub stroke_width: f64,
    pub dash_array: Option<f64>,
    pub dash_offset: f64,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            fill: None,
            stroke: None,
            stroke_width: 1.0,
            dash_array: None,
            dash_offset: 0.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Element {
    pub layer: LayerId,
    pub dom_id: Option<String>,
    pub geometry: Geometry,
    pub style: Style,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Layer {
    pub name: String,
    /// Paint order, back to front.
    pub children: Vec<ElementId>,
}

#[derive(Clone, Debug)]
struct ActiveTransition {
    id: ElementId,
    from: Value,
    start: Millis,
    target: Transition,
}

/// In-memory scene graph with a virtual clock.
///
/// [`SceneGraph::advance_to`] samples every in-flight transition at the new time and retires the
/// ones that completed. Beginning a transition on an `(element, property)` pair that is already
/// animating interrupts the old one where it stands.
#[derive(Clone, Debug, Default)]
pub struct SceneGraph {
    width: f64,
    height: f64,
    layers: Vec<Layer>,
    elements: Vec<Element>,
    transitions: Vec<ActiveTransition>,
    now: Millis,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Millis {
        self.now
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn layer_by_name(&self, name: &str) -> Option<LayerId> {
        self.layers
            .iter()
            .position(|l| l.name == name)
            .map(|i| LayerId(i as u32))
    }

    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(id.0 as usize)
    }

    pub fn find_by_dom_id(&self, dom_id: &str) -> Option<ElementId> {
        self.elements
            .iter()
            .position(|e| e.dom_id.as_deref() == Some(dom_id))
            .map(|i| ElementId(i as u32))
    }

    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    pub fn in_flight(&self) -> usize {
        self.transitions.len()
    }

    /// Move the clock to `t` (never backwards) and apply transition progress.
    pub fn advance_to(&mut self, t: Millis) -> SpreadResult<()> {
        if t < self.now {
            return Ok(());
        }
        self.now = t;

        let mut updates = Vec::with_capacity(self.transitions.len());
        self.transitions.retain(|tr| {
            let elapsed = t.saturating_sub(tr.start);
            let progress = if tr.target.duration_ms == 0 {
                1.0
            } else {
                (elapsed as f64 / tr.target.duration_ms as f64).min(1.0)
            };
            let eased = tr.target.ease.apply(progress);
            updates.push((tr.id, tr.target.property, tr.from.interpolate(tr.target.to, eased)));
            progress < 1.0
        });

        for (id, property, value) in updates {
            self.write(id, property, value)?;
        }
        Ok(())
    }

    fn element_mut(&mut self, id: ElementId) -> SpreadResult<&mut Element> {
        self.elements
            .get_mut(id.0 as usize)
            .ok_or_else(|| unknown_element(id))
    }

    fn write(&mut self, id: ElementId, property: Property, value: Value) -> SpreadResult<()> {
        let el = self.element_mut(id)?;
        let mismatch = || {
            SpreadError::validation(format!(
                "property {property:?} cannot take {value:?} on element {}",
                id.0
            ))
        };

        match (property, &mut el.geometry) {
            (Property::Cx, Geometry::Circle { cx, .. }) => {
                *cx = value.as_number().ok_or_else(mismatch)?
            }
            (Property::Cy, Geometry::Circle { cy, .. }) => {
                *cy = value.as_number().ok_or_else(mismatch)?
            }
            (Property::R, Geometry::Circle { r, .. }) => {
                *r = value.as_number().ok_or_else(mismatch)?
            }
            (Property::X1, Geometry::Line { x1, .. }) => {
                *x1 = value.as_number().ok_or_else(mismatch)?
            }
            (Property::Y1, Geometry::Line { y1, .. }) => {
                *y1 = value.as_number().ok_or_else(mismatch)?
            }
            (Property::X2, Geometry::Line { x2, .. }) => {
                *x2 = value.as_number().ok_or_else(mismatch)?
            }
            (Property::Y2, Geometry::Line { y2, .. }) => {
                *y2 = value.as_number().ok_or_else(mismatch)?
            }
            (Property::Flipped, Geometry::Line { flipped, .. }) => match value {
                Value::Flag(v) => *flipped = v,
                _ => return Err(mismatch()),
            },
            (Property::X, Geometry::Text { x, .. }) => *x = value.as_number().ok_or_else(mismatch)?,
            (Property::Y, Geometry::Text { y, .. }) => *y = value.as_number().ok_or_else(mismatch)?,
            (Property::Fill, _) => el.style.fill = paint(value).ok_or_else(mismatch)?,
            (Property::Stroke, _) => el.style.stroke = paint(value).ok_or_else(mismatch)?,
            (Property::StrokeWidth, _) => {
                el.style.stroke_width = value.as_number().ok_or_else(mismatch)?
            }
            (Property::DashArray, _) => {
                el.style.dash_array = match value {
                    Value::Number(v) => Some(v),
                    Value::Unset => None,
                    _ => return Err(mismatch()),
                }
            }
            (Property::DashOffset, _) => {
                el.style.dash_offset = value.as_number().ok_or_else(mismatch)?
            }
            _ => {
                return Err(SpreadError::validation(format!(
                    "property {property:?} does not apply to element {}",
                    id.0
                )));
            }
        }
        Ok(())
    }

    fn read(&self, id: ElementId, property: Property) -> SpreadResult<Value> {
        let el = self.element(id).ok_or_else(|| unknown_element(id))?;
        let v = match (property, &el.geometry) {
            (Property::Cx, Geometry::Circle { cx, .. }) => Value::Number(*cx),
            (Property::Cy, Geometry::Circle { cy, .. }) => Value::Number(*cy),
            (Property::R, Geometry::Circle { r, .. }) => Value::Number(*r),
            (Property::X1, Geometry::Line { x1, .. }) => Value::Number(*x1),
            (Property::Y1, Geometry::Line { y1, .. }) => Value::Number(*y1),
            (Property::X2, Geometry::Line { x2, .. }) => Value::Number(*x2),
            (Property::Y2, Geometry::Line { y2, .. }) => Value::Number(*y2),
            (Property::Flipped, Geometry::Line { flipped, .. }) => Value::Flag(*flipped),
            (Property::X, Geometry::Text { x, .. }) => Value::Number(*x),
            (Property::Y, Geometry::Text { y, .. }) => Value::Number(*y),
            (Property::Fill, _) => el.style.fill.map_or(Value::Unset, Value::Color),
            (Property::Stroke, _) => el.style.stroke.map_or(Value::Unset, Value::Color),
            (Property::StrokeWidth, _) => Value::Number(el.style.stroke_width),
            (Property::DashArray, _) => el.style.dash_array.map_or(Value::Unset, Value::Number),
            (Property::DashOffset, _) => Value::Number(el.style.dash_offset),
            _ => {
                return Err(SpreadError::validation(format!(
                    "property {property:?} does not apply to element {}",
                    id.0
                )));
            }
        };
        Ok(v)
    }
}

fn paint(value: Value) -> Option<Option<Color>> {
    match value {
        Value::Color(c) => Some(Some(c)),
        Value::Unset => Some(None),
        _ => None,
    }
}

impl DrawingSurface for SceneGraph {
    fn set_canvas_size(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    fn create_layer(&mut self, name: &str) -> LayerId {
        self.layers.push(Layer {
            name: name.to_owned(),
            children: Vec::new(),
        });
        LayerId((self.layers.len() - 1) as u32)
    }

    fn create_element(&mut self, layer: LayerId, shape: ShapeSpec) -> SpreadResult<ElementId> {
        let id = ElementId(
            u32::try_from(self.elements.len())
                .map_err(|_| SpreadError::animation("element id overflow"))?,
        );
        let slot = self
            .layers
            .get_mut(layer.0 as usize)
            .ok_or_else(|| SpreadError::animation(format!("unknown layer {}", layer.0)))?;
        slot.children.push(id);

        let geometry = match shape {
            ShapeSpec::Circle { cx, cy, r } => Geometry::Circle { cx, cy, r },
            ShapeSpec::Line { x1, y1, x2, y2 } => Geometry::Line {
                x1,
                y1,
                x2,
                y2,
                flipped: false,
            },
            ShapeSpec::Text {
                x,
                y,
                content,
                font_family,
                font_size,
            } => Geometry::Text {
                x,
                y,
                content,
                font_family,
                font_size,
            },
        };
        self.elements.push(Element {
            layer,
            dom_id: None,
            geometry,
            style: Style::default(),
        });
        Ok(id)
    }

    fn set_dom_id(&mut self, id: ElementId, dom_id: String) -> SpreadResult<()> {
        self.element_mut(id)?.dom_id = Some(dom_id);
        Ok(())
    }

    fn set(&mut self, id: ElementId, property: Property, value: Value) -> SpreadResult<()> {
        self.write(id, property, value)
    }

    fn get(&self, id: ElementId, property: Property) -> SpreadResult<Value> {
        self.read(id, property)
    }

    fn begin_transition(&mut self, id: ElementId, transition: Transition) -> SpreadResult<()> {
        let from = self.read(id, transition.property)?;
        self.transitions
            .retain(|tr| !(tr.id == id && tr.target.property == transition.property));
        self.transitions.push(ActiveTransition {
            id,
            from,
            start: self.now,
            target: transition,
        });
        Ok(())
    }

    fn cancel_transitions(&mut self, id: ElementId) {
        self.transitions.retain(|tr| tr.id != id);
    }

    fn raise_to_front(&mut self, id: ElementId) -> SpreadResult<()> {
        let layer = self.element(id).ok_or_else(|| unknown_element(id))?.layer;
        let children = &mut self
            .layers
            .get_mut(layer.0 as usize)
            .ok_or_else(|| SpreadError::animation(format!("unknown layer {}", layer.0)))?
            .children;
        if let Some(pos) = children.iter().position(|c| *c == id) {
            children.remove(pos);
        }
        children.push(id);
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/graph.rs"]
mod tests;
