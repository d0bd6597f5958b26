//! Syntax tree of a gesture script

use crate::interaction::PointerButton;
use crate::layout::{Point, Vector};

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

/// A node with its source location
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned<T> {
    pub node: T,
    pub span: Span,
}

impl<T> Spanned<T> {
    pub fn new(node: T, span: Span) -> Self {
        Self { node, span }
    }
}

/// One pointer gesture
#[derive(Debug, Clone, PartialEq)]
pub enum Gesture {
    /// `press <sort> at <x>, <y> [primary|secondary]`
    Press {
        sort: Spanned<String>,
        at: Point,
        button: PointerButton,
    },
    /// `move <x>, <y>`
    Move { to: Point },
    /// `release <x>, <y> [primary|secondary]`
    Release { at: Point, button: PointerButton },
    /// `toggle <sort>`
    Toggle { sort: Spanned<String> },
    /// `hide <sort>`
    Hide { sort: Spanned<String> },
    /// `show <sort>`
    Show { sort: Spanned<String> },
    /// `drag <sort> by <dx>, <dy> [steps <n>]`
    ///
    /// Shorthand for a primary press at the container center, `steps` equal
    /// moves and a release.
    Drag {
        sort: Spanned<String>,
        by: Vector,
        steps: u32,
    },
}

/// A parsed script: gestures in replay order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Script {
    pub gestures: Vec<Spanned<Gesture>>,
}
