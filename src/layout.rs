//! Section layout through taffy.
//!
//! The page is a single flex column. Each section is a fixed-size leaf
//! (its content size is known up front), so taffy only has to place them:
//! padding, gap and per-block alignment.

use taffy::{
    AlignItems, AlignSelf, AvailableSpace, Dimension, Display, FlexDirection, LengthPercentage,
    Rect, Size, Style, TaffyTree,
};

use crate::error::Result;
use crate::types::ClipRect;

/// Horizontal placement of a block inside the column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Start,
    Center,
}

/// One block to place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block {
    pub width: u16,
    pub height: u16,
    pub align: Align,
}

impl Block {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            align: Align::Start,
        }
    }

    pub fn centered(mut self) -> Self {
        self.align = Align::Center;
        self
    }
}

/// Column spacing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StackStyle {
    /// Rows between blocks.
    pub gap: u16,
    /// Columns on the left and right.
    pub padding_x: u16,
    /// Rows above the first and below the last block.
    pub padding_y: u16,
}

impl Default for StackStyle {
    fn default() -> Self {
        Self {
            gap: 1,
            padding_x: 2,
            padding_y: 1,
        }
    }
}

/// Result of [`stack`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StackLayout {
    /// One rect per block, in order.
    pub rects: Vec<ClipRect>,
    /// Total height of the column including padding.
    pub content_height: u16,
}

fn length(v: u16) -> LengthPercentage {
    LengthPercentage::Length(v as f32)
}

/// Place `blocks` top to bottom in a column `width` cells wide.
///
/// The column is not height-constrained; the page scrolls over it.
pub fn stack(blocks: &[Block], width: u16, style: StackStyle) -> Result<StackLayout> {
    let mut tree: TaffyTree<()> = TaffyTree::new();

    let mut children = Vec::with_capacity(blocks.len());
    for block in blocks {
        let leaf = tree.new_leaf(Style {
            size: Size {
                width: Dimension::Length(block.width as f32),
                height: Dimension::Length(block.height as f32),
            },
            flex_shrink: 0.0,
            align_self: Some(match block.align {
                Align::Start => AlignSelf::FlexStart,
                Align::Center => AlignSelf::Center,
            }),
            ..Style::default()
        })?;
        children.push(leaf);
    }

    let root = tree.new_with_children(
        Style {
            display: Display::Flex,
            flex_direction: FlexDirection::Column,
            align_items: Some(AlignItems::FlexStart),
            size: Size {
                width: Dimension::Length(width as f32),
                height: Dimension::Auto,
            },
            padding: Rect {
                left: length(style.padding_x),
                right: length(style.padding_x),
                top: length(style.padding_y),
                bottom: length(style.padding_y),
            },
            gap: Size {
                width: length(0),
                height: length(style.gap),
            },
            ..Style::default()
        },
        &children,
    )?;

    tree.compute_layout(
        root,
        Size {
            width: AvailableSpace::Definite(width as f32),
            height: AvailableSpace::MaxContent,
        },
    )?;

    let mut rects = Vec::with_capacity(children.len());
    for node in children {
        let layout = tree.layout(node)?;
        rects.push(ClipRect::new(
            layout.location.x.round() as u16,
            layout.location.y.round() as u16,
            layout.size.width.round() as u16,
            layout.size.height.round() as u16,
        ));
    }
    let content_height = tree.layout(root)?.size.height.round() as u16;

    Ok(StackLayout {
        rects,
        content_height,
    })
}
