use crate::{
    animation::ease::Ease,
    foundation::color::Color,
    foundation::error::{SpreadError, SpreadResult},
};

/// Handle to a drawable element owned by a [`DrawingSurface`].
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct ElementId(pub u32);

/// Handle to an ordered group of elements. Later layers paint over earlier ones.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct LayerId(pub u32);

/// Initial geometry of a new element.
#[derive(Clone, Debug, PartialEq)]
pub enum ShapeSpec {
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
    },
    Text {
        x: f64,
        y: f64,
        content: String,
        font_family: String,
        font_size: f64,
    },
}

/// Addressable attribute or style of an element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
pub enum Property {
    Cx,
    Cy,
    R,
    X1,
    Y1,
    X2,
    Y2,
    X,
    Y,
    Fill,
    Stroke,
    StrokeWidth,
    /// Dash and gap length; unset means a solid stroke.
    DashArray,
    DashOffset,
    /// Lines only: paint from `(x2, y2)` toward `(x1, y1)`.
    Flipped,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub enum Value {
    Number(f64),
    Color(Color),
    Flag(bool),
    Unset,
}

impl Value {
    pub fn as_number(self) -> Option<f64> {
        match self {
            Self::Number(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_color(self) -> Option<Color> {
        match self {
            Self::Color(c) => Some(c),
            _ => None,
        }
    }

    /// Interpolate toward `to`. Non-interpolable pairs hold `self` until `t` reaches 1.
    pub fn interpolate(self, to: Self, t: f64) -> Self {
        match (self, to) {
            (Self::Number(a), Self::Number(b)) => Self::Number(a + (b - a) * t),
            (Self::Color(a), Self::Color(b)) => Self::Color(Color::lerp(a, b, t)),
            _ if t >= 1.0 => to,
            _ => self,
        }
    }
}

/// A timed change of one property toward a target value.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Transition {
    pub property: Property,
    pub to: Value,
    pub duration_ms: u64,
    pub ease: Ease,
}

impl Transition {
    pub fn new(property: Property, to: Value, duration_ms: u64, ease: Ease) -> Self {
        Self {
            property,
            to,
            duration_ms,
            ease,
        }
    }

    pub fn linear(property: Property, to: Value, duration_ms: u64) -> Self {
        Self::new(property, to, duration_ms, Ease::Linear)
    }
}

/// Retained-mode drawing API the scene builder and the timeline animator mutate.
///
/// Transitions start from the property's current value at the surface's current time and run
/// without any further involvement from the caller.
pub trait DrawingSurface {
    fn set_canvas_size(&mut self, width: f64, height: f64);

    fn create_layer(&mut self, name: &str) -> LayerId;

    fn create_element(&mut self, layer: LayerId, shape: ShapeSpec) -> SpreadResult<ElementId>;

    /// Attach a document-level identifier to `id`.
    fn set_dom_id(&mut self, id: ElementId, dom_id: String) -> SpreadResult<()>;

    fn set(&mut self, id: ElementId, property: Property, value: Value) -> SpreadResult<()>;

    fn get(&self, id: ElementId, property: Property) -> SpreadResult<Value>;

    fn begin_transition(&mut self, id: ElementId, transition: Transition) -> SpreadResult<()>;

    /// Drop every in-flight transition on `id`, leaving current values in place.
    fn cancel_transitions(&mut self, id: ElementId);

    /// Move `id` to the end of its layer so it paints over its siblings.
    fn raise_to_front(&mut self, id: ElementId) -> SpreadResult<()>;

    fn set_number(&mut self, id: ElementId, property: Property, v: f64) -> SpreadResult<()> {
        self.set(id, property, Value::Number(v))
    }

    fn set_color(&mut self, id: ElementId, property: Property, c: Color) -> SpreadResult<()> {
        self.set(id, property, Value::Color(c))
    }
}

pub(crate) fn unknown_element(id: ElementId) -> SpreadError {
    SpreadError::animation(format!("unknown element {}", id.0))
}
