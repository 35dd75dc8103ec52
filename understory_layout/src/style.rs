// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Node style: typed flexbox properties and their translation to the engine.

use taffy::style_helpers::{auto, length, percent};
use taffy::{
    AlignContent as TaffyAlignContent, AlignItems as TaffyAlignItems,
    BoxSizing as TaffyBoxSizing, Dimension, Display as TaffyDisplay,
    FlexDirection as TaffyFlexDirection, FlexWrap, LengthPercentage, LengthPercentageAuto,
    Overflow as TaffyOverflow, Position, Rect, Size, Style,
};

/// A style length.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Value {
    /// Not set. Sizes behave like [`Value::Auto`]; edges behave like zero.
    #[default]
    Undefined,
    /// Sized by the algorithm.
    Auto,
    /// Absolute length in points.
    Point(f32),
    /// Percentage of the containing block, in `0.0..=100.0`.
    Percent(f32),
}

impl Value {
    /// The length in points, with percentages taken of `basis`; `None` when
    /// unset or auto.
    pub(crate) fn resolve(self, basis: f32) -> Option<f32> {
        match self {
            Self::Undefined | Self::Auto => None,
            Self::Point(v) => Some(v),
            Self::Percent(p) => Some(p / 100.0 * basis),
        }
    }

    fn dimension(self) -> Dimension {
        match self {
            Self::Undefined | Self::Auto => auto(),
            Self::Point(v) => length(v),
            Self::Percent(p) => percent(p / 100.0),
        }
    }

    fn inset(self) -> LengthPercentageAuto {
        match self {
            Self::Undefined | Self::Auto => auto(),
            Self::Point(v) => length(v),
            Self::Percent(p) => percent(p / 100.0),
        }
    }

    fn margin(self) -> LengthPercentageAuto {
        match self {
            Self::Undefined => length(0.0_f32),
            Self::Auto => auto(),
            Self::Point(v) => length(v),
            Self::Percent(p) => percent(p / 100.0),
        }
    }

    fn spacing(self) -> LengthPercentage {
        match self {
            Self::Undefined | Self::Auto => length(0.0_f32),
            Self::Point(v) => length(v),
            Self::Percent(p) => percent(p / 100.0),
        }
    }
}

impl From<f32> for Value {
    fn from(points: f32) -> Self {
        Self::Point(points)
    }
}

/// Selects one or more sides of a box.
///
/// `Start`/`End` name the left/right sides; `Horizontal`, `Vertical` and
/// `All` write several sides at once.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Edge {
    /// Left side.
    Left,
    /// Top side.
    Top,
    /// Right side.
    Right,
    /// Bottom side.
    Bottom,
    /// Leading side (left).
    Start,
    /// Trailing side (right).
    End,
    /// Left and right.
    Horizontal,
    /// Top and bottom.
    Vertical,
    /// Every side.
    All,
}

/// Per-side values of a box.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Edges<T> {
    /// Left side.
    pub left: T,
    /// Top side.
    pub top: T,
    /// Right side.
    pub right: T,
    /// Bottom side.
    pub bottom: T,
}

impl<T: Copy> Edges<T> {
    /// The same value on every side.
    pub fn all(value: T) -> Self {
        Self {
            left: value,
            top: value,
            right: value,
            bottom: value,
        }
    }

    /// Read one side. Multi-side selectors read their first side.
    pub fn get(&self, edge: Edge) -> T {
        match edge {
            Edge::Left | Edge::Start | Edge::Horizontal | Edge::All => self.left,
            Edge::Top | Edge::Vertical => self.top,
            Edge::Right | Edge::End => self.right,
            Edge::Bottom => self.bottom,
        }
    }

    /// Write every side selected by `edge`.
    pub fn set(&mut self, edge: Edge, value: T) {
        match edge {
            Edge::Left | Edge::Start => self.left = value,
            Edge::Top => self.top = value,
            Edge::Right | Edge::End => self.right = value,
            Edge::Bottom => self.bottom = value,
            Edge::Horizontal => {
                self.left = value;
                self.right = value;
            }
            Edge::Vertical => {
                self.top = value;
                self.bottom = value;
            }
            Edge::All => *self = Self::all(value),
        }
    }

    fn map<U>(self, mut f: impl FnMut(T) -> U) -> Rect<U> {
        Rect {
            left: f(self.left),
            right: f(self.right),
            top: f(self.top),
            bottom: f(self.bottom),
        }
    }
}

impl Edges<f32> {
    pub(crate) fn from_rect(rect: Rect<f32>) -> Self {
        Self {
            left: rect.left,
            top: rect.top,
            right: rect.right,
            bottom: rect.bottom,
        }
    }
}

/// Selects the row gap, the column gap, or both.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Gutter {
    /// Space between columns.
    Column,
    /// Space between rows.
    Row,
    /// Both gaps.
    All,
}

/// Reading direction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Take the parent's direction.
    #[default]
    Inherit,
    /// Left to right.
    Ltr,
    /// Right to left: children are placed from the right edge.
    Rtl,
}

impl Direction {
    pub(crate) fn resolve(self, inherited: Self) -> Self {
        match self {
            Self::Inherit => inherited,
            resolved => resolved,
        }
    }
}

/// Main axis of a flex container.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FlexDirection {
    /// Top to bottom.
    #[default]
    Column,
    /// Bottom to top.
    ColumnReverse,
    /// Along the reading direction.
    Row,
    /// Against the reading direction.
    RowReverse,
}

/// Main-axis distribution of free space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Justify {
    /// Pack at the start.
    #[default]
    FlexStart,
    /// Pack in the middle.
    Center,
    /// Pack at the end.
    FlexEnd,
    /// Even gaps, none at the ends.
    SpaceBetween,
    /// Even gaps, half gaps at the ends.
    SpaceAround,
    /// Even gaps including the ends.
    SpaceEvenly,
}

/// Cross-axis alignment, for items, lines and single children.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Align {
    /// Defer to the container (only meaningful for `align_self`).
    #[default]
    Auto,
    /// Start of the cross axis.
    FlexStart,
    /// Middle of the cross axis.
    Center,
    /// End of the cross axis.
    FlexEnd,
    /// Fill the cross axis.
    Stretch,
    /// Align first baselines.
    Baseline,
    /// Lines only: even gaps, none at the ends.
    SpaceBetween,
    /// Lines only: even gaps, half gaps at the ends.
    SpaceAround,
    /// Lines only: even gaps including the ends.
    SpaceEvenly,
}

impl Align {
    fn items(self) -> Option<TaffyAlignItems> {
        match self {
            Self::FlexStart => Some(TaffyAlignItems::FlexStart),
            Self::Center => Some(TaffyAlignItems::Center),
            Self::FlexEnd => Some(TaffyAlignItems::FlexEnd),
            Self::Stretch => Some(TaffyAlignItems::Stretch),
            Self::Baseline => Some(TaffyAlignItems::Baseline),
            Self::Auto | Self::SpaceBetween | Self::SpaceAround | Self::SpaceEvenly => None,
        }
    }

    fn content(self) -> Option<TaffyAlignContent> {
        match self {
            Self::FlexStart => Some(TaffyAlignContent::FlexStart),
            Self::Center => Some(TaffyAlignContent::Center),
            Self::FlexEnd => Some(TaffyAlignContent::FlexEnd),
            Self::Stretch => Some(TaffyAlignContent::Stretch),
            Self::SpaceBetween => Some(TaffyAlignContent::SpaceBetween),
            Self::SpaceAround => Some(TaffyAlignContent::SpaceAround),
            Self::SpaceEvenly => Some(TaffyAlignContent::SpaceEvenly),
            Self::Auto | Self::Baseline => None,
        }
    }
}

/// How a node is positioned relative to its siblings.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PositionType {
    /// In flow; insets are ignored.
    Static,
    /// In flow, offset by insets.
    #[default]
    Relative,
    /// Out of flow, placed by insets against the parent.
    Absolute,
}

/// Line wrapping of a flex container.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Wrap {
    /// Single line.
    #[default]
    NoWrap,
    /// Wrap onto new lines.
    Wrap,
    /// Wrap onto new lines in reverse cross order.
    WrapReverse,
}

/// Overflow behavior.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Overflow {
    /// Content may spill out.
    #[default]
    Visible,
    /// Content is clipped.
    Hidden,
    /// Content is clipped and scrollable.
    Scroll,
}

/// Whether a node takes part in layout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Display {
    /// Laid out as a flex container.
    #[default]
    Flex,
    /// Removed from layout together with its subtree.
    None,
}

/// Which box `width`/`height` describe.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BoxSizing {
    /// Sizes include padding and border.
    #[default]
    BorderBox,
    /// Sizes exclude padding and border.
    ContentBox,
}

/// Kind of node, which affects rounding.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum NodeType {
    /// A plain box.
    #[default]
    Default,
    /// Holds text: rounding never shrinks its size.
    Text,
}

/// Style of one node.
///
/// All fields are plain data; write them through
/// [`Layout::update_style`](crate::Layout::update_style) or
/// [`Layout::set_style`](crate::Layout::set_style) so the layout engine sees
/// the change and the node is marked dirty.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeStyle {
    /// Reading direction.
    pub direction: Direction,
    /// Main axis.
    pub flex_direction: FlexDirection,
    /// Main-axis distribution.
    pub justify_content: Justify,
    /// Distribution of lines in a multi-line container.
    pub align_content: Align,
    /// Cross-axis alignment of children.
    pub align_items: Align,
    /// Cross-axis alignment override for this node.
    pub align_self: Align,
    /// Positioning scheme.
    pub position_type: PositionType,
    /// Line wrapping.
    pub flex_wrap: Wrap,
    /// Overflow behavior.
    pub overflow: Overflow,
    /// Participation in layout.
    pub display: Display,
    /// Shorthand: positive values grow, negative values shrink.
    pub flex: Option<f32>,
    /// Growth factor; falls back to a positive `flex`.
    pub flex_grow: Option<f32>,
    /// Shrink factor; falls back to a negative `flex`, then the default.
    pub flex_shrink: Option<f32>,
    /// Initial main size.
    pub flex_basis: Value,
    /// Insets, used by relative and absolute positioning.
    pub position: Edges<Value>,
    /// Outer spacing.
    pub margin: Edges<Value>,
    /// Inner spacing.
    pub padding: Edges<Value>,
    /// Border widths in points.
    pub border: Edges<f32>,
    /// Gap between rows.
    pub row_gap: Value,
    /// Gap between columns.
    pub column_gap: Value,
    /// Box measured by sizes.
    pub box_sizing: BoxSizing,
    /// Preferred width.
    pub width: Value,
    /// Preferred height.
    pub height: Value,
    /// Lower width bound.
    pub min_width: Value,
    /// Lower height bound.
    pub min_height: Value,
    /// Upper width bound.
    pub max_width: Value,
    /// Upper height bound.
    pub max_height: Value,
    /// Width divided by height.
    pub aspect_ratio: Option<f32>,
    /// Kind of node.
    pub node_type: NodeType,
}

impl Default for NodeStyle {
    fn default() -> Self {
        Self::classic()
    }
}

impl NodeStyle {
    /// Defaults of the classic engine: column direction, no shrinking,
    /// lines packed at the start.
    pub fn classic() -> Self {
        Self {
            direction: Direction::Inherit,
            flex_direction: FlexDirection::Column,
            justify_content: Justify::FlexStart,
            align_content: Align::FlexStart,
            align_items: Align::Stretch,
            align_self: Align::Auto,
            position_type: PositionType::Relative,
            flex_wrap: Wrap::NoWrap,
            overflow: Overflow::Visible,
            display: Display::Flex,
            flex: None,
            flex_grow: None,
            flex_shrink: None,
            flex_basis: Value::Auto,
            position: Edges::all(Value::Undefined),
            margin: Edges::all(Value::Undefined),
            padding: Edges::all(Value::Undefined),
            border: Edges::all(0.0),
            row_gap: Value::Undefined,
            column_gap: Value::Undefined,
            box_sizing: BoxSizing::BorderBox,
            width: Value::Auto,
            height: Value::Auto,
            min_width: Value::Undefined,
            min_height: Value::Undefined,
            max_width: Value::Undefined,
            max_height: Value::Undefined,
            aspect_ratio: None,
            node_type: NodeType::Default,
        }
    }

    /// CSS defaults: row direction and stretched lines.
    ///
    /// Shrinking defaults to `1.0` for nodes of a layout configured with
    /// [`Config::set_use_web_defaults`](crate::Config::set_use_web_defaults).
    pub fn web() -> Self {
        Self {
            flex_direction: FlexDirection::Row,
            align_content: Align::Stretch,
            ..Self::classic()
        }
    }

    pub(crate) fn for_defaults(web: bool) -> Self {
        if web { Self::web() } else { Self::classic() }
    }

    /// Set one or both gaps.
    pub fn set_gap(&mut self, gutter: Gutter, gap: Value) {
        match gutter {
            Gutter::Column => self.column_gap = gap,
            Gutter::Row => self.row_gap = gap,
            Gutter::All => {
                self.column_gap = gap;
                self.row_gap = gap;
            }
        }
    }

    /// Growth factor after applying the `flex` shorthand.
    pub fn resolved_flex_grow(&self) -> f32 {
        self.flex_grow
            .or(self.flex.filter(|flex| *flex > 0.0))
            .unwrap_or(0.0)
    }

    /// Shrink factor after applying the `flex` shorthand and the default family.
    pub fn resolved_flex_shrink(&self, web: bool) -> f32 {
        self.flex_shrink
            .or(self.flex.filter(|flex| *flex < 0.0).map(|flex| -flex))
            .unwrap_or(if web { 1.0 } else { 0.0 })
    }

    /// Translate to the engine's style.
    pub(crate) fn to_taffy(&self, web: bool) -> Style {
        // Classic engines treat `flex: N` as `flex-basis: 0` unless a basis is set.
        let flex_basis = match self.flex_basis {
            Value::Undefined | Value::Auto if !web && self.flex.is_some_and(|f| f > 0.0) => {
                length(0.0_f32)
            }
            basis => basis.dimension(),
        };
        let overflow = match self.overflow {
            Overflow::Visible => TaffyOverflow::Visible,
            Overflow::Hidden => TaffyOverflow::Hidden,
            Overflow::Scroll => TaffyOverflow::Scroll,
        };
        Style {
            display: match self.display {
                Display::Flex => TaffyDisplay::Flex,
                Display::None => TaffyDisplay::None,
            },
            box_sizing: match self.box_sizing {
                BoxSizing::BorderBox => TaffyBoxSizing::BorderBox,
                BoxSizing::ContentBox => TaffyBoxSizing::ContentBox,
            },
            position: match self.position_type {
                PositionType::Static | PositionType::Relative => Position::Relative,
                PositionType::Absolute => Position::Absolute,
            },
            inset: if self.position_type == PositionType::Static {
                Rect {
                    left: auto(),
                    right: auto(),
                    top: auto(),
                    bottom: auto(),
                }
            } else {
                self.position.map(Value::inset)
            },
            overflow: taffy::Point {
                x: overflow,
                y: overflow,
            },
            flex_direction: match self.flex_direction {
                FlexDirection::Column => TaffyFlexDirection::Column,
                FlexDirection::ColumnReverse => TaffyFlexDirection::ColumnReverse,
                FlexDirection::Row => TaffyFlexDirection::Row,
                FlexDirection::RowReverse => TaffyFlexDirection::RowReverse,
            },
            flex_wrap: match self.flex_wrap {
                Wrap::NoWrap => FlexWrap::NoWrap,
                Wrap::Wrap => FlexWrap::Wrap,
                Wrap::WrapReverse => FlexWrap::WrapReverse,
            },
            justify_content: Some(match self.justify_content {
                Justify::FlexStart => TaffyAlignContent::FlexStart,
                Justify::Center => TaffyAlignContent::Center,
                Justify::FlexEnd => TaffyAlignContent::FlexEnd,
                Justify::SpaceBetween => TaffyAlignContent::SpaceBetween,
                Justify::SpaceAround => TaffyAlignContent::SpaceAround,
                Justify::SpaceEvenly => TaffyAlignContent::SpaceEvenly,
            }),
            align_content: self.align_content.content(),
            align_items: self.align_items.items(),
            align_self: self.align_self.items(),
            flex_grow: self.resolved_flex_grow(),
            flex_shrink: self.resolved_flex_shrink(web),
            flex_basis,
            margin: self.margin.map(Value::margin),
            padding: self.padding.map(Value::spacing),
            border: self.border.map(|points| {
                length(if points.is_finite() { points } else { 0.0 })
            }),
            gap: Size {
                width: self.column_gap.spacing(),
                height: self.row_gap.spacing(),
            },
            size: Size {
                width: self.width.dimension(),
                height: self.height.dimension(),
            },
            min_size: Size {
                width: self.min_width.dimension(),
                height: self.min_height.dimension(),
            },
            max_size: Size {
                width: self.max_width.dimension(),
                height: self.max_height.dimension(),
            },
            aspect_ratio: self.aspect_ratio.filter(|ratio| ratio.is_finite() && *ratio > 0.0),
            ..Style::default()
        }
    }
}
