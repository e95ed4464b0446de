// crates/rectweb-core/src/elements.rs
use glam::Vec4;
use std::fmt;

use crate::expression::{Dimension, Expression};
use crate::style::{normalize_color, StyleMap};
use crate::{BuildError, BuildResult};

/// Arena index of a node, assigned in creation order. `0` is the document body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    pub const ROOT: NodeId = NodeId(0);

    pub(crate) fn new(index: u32) -> Self {
        NodeId(index)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node#{}", self.0)
    }
}

/// The corner (or center) a node's position is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pivot {
    Center,
    #[default]
    TopLeft,
    TopRight,
    BottomRight,
    BottomLeft,
}

impl Pivot {
    /// Offset property used for the x component.
    pub fn horizontal_property(self) -> &'static str {
        match self {
            Pivot::TopRight | Pivot::BottomRight => "right",
            Pivot::Center | Pivot::TopLeft | Pivot::BottomLeft => "left",
        }
    }

    /// Offset property used for the y component.
    pub fn vertical_property(self) -> &'static str {
        match self {
            Pivot::BottomLeft | Pivot::BottomRight => "bottom",
            Pivot::Center | Pivot::TopLeft | Pivot::TopRight => "top",
        }
    }

    pub fn offset_property(self, axis: Dimension) -> &'static str {
        match axis {
            Dimension::Width => self.horizontal_property(),
            Dimension::Height => self.vertical_property(),
        }
    }
}

/// One of the four corners of a node's box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomRight,
    BottomLeft,
}

/// How a node lays out its own children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Flow {
    /// Children are absolutely positioned.
    #[default]
    None,
    Row,
    Column,
}

impl Flow {
    pub fn is_flex(self) -> bool {
        !matches!(self, Flow::None)
    }

    pub fn direction(self) -> Option<&'static str> {
        match self {
            Flow::None => None,
            Flow::Row => Some("row"),
            Flow::Column => Some("column"),
        }
    }

    /// Axis along which children are placed one after the other.
    pub fn main_axis(self) -> Option<Dimension> {
        match self {
            Flow::None => None,
            Flow::Row => Some(Dimension::Width),
            Flow::Column => Some(Dimension::Height),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Button,
    Checkbox,
    Color,
    Date,
    DatetimeLocal,
    Email,
    File,
    Hidden,
    Image,
    Month,
    Number,
    Password,
    Radio,
    Range,
    Reset,
    Search,
    Submit,
    Tel,
    Text,
    Time,
    Url,
    Week,
}

impl InputKind {
    /// Value of the `type` attribute.
    pub fn as_str(self) -> &'static str {
        match self {
            InputKind::Button => "button",
            InputKind::Checkbox => "checkbox",
            InputKind::Color => "color",
            InputKind::Date => "date",
            InputKind::DatetimeLocal => "datetime-local",
            InputKind::Email => "email",
            InputKind::File => "file",
            InputKind::Hidden => "hidden",
            InputKind::Image => "image",
            InputKind::Month => "month",
            InputKind::Number => "number",
            InputKind::Password => "password",
            InputKind::Radio => "radio",
            InputKind::Range => "range",
            InputKind::Reset => "reset",
            InputKind::Search => "search",
            InputKind::Submit => "submit",
            InputKind::Tel => "tel",
            InputKind::Text => "text",
            InputKind::Time => "time",
            InputKind::Url => "url",
            InputKind::Week => "week",
        }
    }

    pub fn is_checkable(self) -> bool {
        matches!(self, InputKind::Checkbox | InputKind::Radio)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ElementKind {
    #[default]
    Plain,
    Label,
    Form,
    Input(InputKind),
}

/// One rectangle of the document.
#[derive(Debug, Clone)]
pub struct Node {
    id: NodeId,
    kind: ElementKind,

    // Layout
    position: [Option<Expression>; 2],
    pivot: Pivot,
    size: [Option<Expression>; 2],
    flow: Flow,
    grow: Option<f64>,

    // Content
    text: Option<String>,
    link: Option<String>,
    image: Option<String>,

    // Presentation
    font: Option<String>,
    font_size: Option<f64>,
    fill_color: Option<Vec4>,
    text_color: Option<Vec4>,
    style: StyleMap,

    // Inputs
    input_value: Option<String>,
    checked: bool,
}

impl Node {
    pub(crate) fn new(id: NodeId, kind: ElementKind) -> Self {
        Self {
            id,
            kind,
            position: [None, None],
            pivot: Pivot::default(),
            size: [None, None],
            flow: Flow::default(),
            grow: None,
            text: None,
            link: None,
            image: None,
            font: None,
            font_size: None,
            fill_color: None,
            text_color: None,
            style: StyleMap::new(),
            input_value: None,
            checked: false,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    pub fn set_position(
        &mut self,
        x: impl Into<Expression>,
        y: impl Into<Expression>,
        pivot: Pivot,
    ) -> &mut Self {
        self.position = [Some(x.into()), Some(y.into())];
        self.pivot = pivot;
        self
    }

    pub fn set_x(&mut self, x: impl Into<Expression>) -> &mut Self {
        self.position[0] = Some(x.into());
        self
    }

    pub fn set_y(&mut self, y: impl Into<Expression>) -> &mut Self {
        self.position[1] = Some(y.into());
        self
    }

    pub fn set_pivot(&mut self, pivot: Pivot) -> &mut Self {
        self.pivot = pivot;
        self
    }

    pub fn position(&self, axis: Dimension) -> Option<&Expression> {
        self.position[axis.index()].as_ref()
    }

    pub fn has_position(&self) -> bool {
        self.position.iter().any(Option::is_some)
    }

    pub fn pivot(&self) -> Pivot {
        self.pivot
    }

    pub fn set_size(&mut self, width: impl Into<Expression>, height: impl Into<Expression>) -> &mut Self {
        self.size = [Some(width.into()), Some(height.into())];
        self
    }

    pub fn set_width(&mut self, width: impl Into<Expression>) -> &mut Self {
        self.size[0] = Some(width.into());
        self
    }

    pub fn set_height(&mut self, height: impl Into<Expression>) -> &mut Self {
        self.size[1] = Some(height.into());
        self
    }

    /// The explicitly assigned size component, if any.
    pub fn declared_size(&self, axis: Dimension) -> Option<&Expression> {
        self.size[axis.index()].as_ref()
    }

    /// Effective size. An unset component is this node's own rendered size,
    /// so other nodes can refer to it before it is known.
    pub fn size(&self) -> [Expression; 2] {
        [self.extent(Dimension::Width), self.extent(Dimension::Height)]
    }

    pub fn extent(&self, axis: Dimension) -> Expression {
        self.size[axis.index()]
            .clone()
            .unwrap_or_else(|| Expression::deferred(axis, self.id))
    }

    /// Where `corner` lies, measured from the node's position with its
    /// effective size. An unset position component counts as zero.
    pub fn corner_position(&self, corner: Corner) -> [Expression; 2] {
        let [width, height] = self.size();
        let origin = |axis: Dimension| self.position(axis).cloned();
        let shifted = |axis: Dimension, extent: Expression| match origin(axis) {
            Some(base) => base + extent,
            None => extent,
        };
        let at = |axis: Dimension| origin(axis).unwrap_or_else(|| Expression::from(0));

        match corner {
            Corner::TopLeft => [at(Dimension::Width), at(Dimension::Height)],
            Corner::TopRight => [shifted(Dimension::Width, width), at(Dimension::Height)],
            Corner::BottomRight => [shifted(Dimension::Width, width), shifted(Dimension::Height, height)],
            Corner::BottomLeft => [at(Dimension::Width), shifted(Dimension::Height, height)],
        }
    }

    pub fn set_layout(&mut self, flow: Flow) -> &mut Self {
        self.flow = flow;
        self
    }

    pub fn flow(&self) -> Flow {
        self.flow
    }

    pub fn set_grow(&mut self, weight: f64) -> BuildResult<&mut Self> {
        if !(0.0..=1.0).contains(&weight) {
            return Err(BuildError::GrowOutOfRange(weight));
        }
        self.grow = Some(weight);
        Ok(self)
    }

    pub fn grow(&self) -> Option<f64> {
        self.grow
    }

    pub fn set_text(&mut self, text: impl Into<String>) -> &mut Self {
        self.text = Some(text.into());
        self
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn set_link(&mut self, href: impl Into<String>) -> &mut Self {
        self.link = Some(href.into());
        self
    }

    pub fn link(&self) -> Option<&str> {
        self.link.as_deref()
    }

    pub fn set_image(&mut self, src: impl Into<String>) -> &mut Self {
        self.image = Some(src.into());
        self
    }

    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    pub fn set_font(&mut self, family: impl Into<String>) -> &mut Self {
        self.font = Some(family.into());
        self
    }

    pub fn font(&self) -> Option<&str> {
        self.font.as_deref()
    }

    pub fn set_font_size(&mut self, px: f64) -> &mut Self {
        self.font_size = Some(px);
        self
    }

    pub fn font_size(&self) -> Option<f64> {
        self.font_size
    }

    /// Background color from 3 or 4 components; malformed input clears it.
    pub fn set_fill_color(&mut self, components: &[f64]) -> &mut Self {
        self.fill_color = normalize_color(components);
        self
    }

    pub fn fill_color(&self) -> Option<Vec4> {
        self.fill_color
    }

    pub fn set_text_color(&mut self, components: &[f64]) -> &mut Self {
        self.text_color = normalize_color(components);
        self
    }

    pub fn text_color(&self) -> Option<Vec4> {
        self.text_color
    }

    pub fn set_style(&mut self, property: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.style.insert(property, value);
        self
    }

    pub fn style(&self) -> &StyleMap {
        &self.style
    }

    pub fn style_mut(&mut self) -> &mut StyleMap {
        &mut self.style
    }

    pub fn input_kind(&self) -> Option<InputKind> {
        match self.kind {
            ElementKind::Input(kind) => Some(kind),
            _ => None,
        }
    }

    pub fn set_input_value(&mut self, value: impl Into<String>) -> BuildResult<&mut Self> {
        if self.input_kind().is_none() {
            return Err(BuildError::NotAnInput { node: self.id });
        }
        self.input_value = Some(value.into());
        Ok(self)
    }

    pub fn input_value(&self) -> Option<&str> {
        self.input_value.as_deref()
    }

    pub fn set_checked(&mut self, checked: bool) -> BuildResult<&mut Self> {
        let kind = self.input_kind().ok_or(BuildError::NotAnInput { node: self.id })?;
        if !kind.is_checkable() {
            return Err(BuildError::NotCheckable { node: self.id, kind: kind.as_str() });
        }
        self.checked = checked;
        Ok(self)
    }

    pub fn checked(&self) -> bool {
        self.checked
    }
}
