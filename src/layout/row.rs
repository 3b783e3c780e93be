//! Row layout - Positions a field's boxes with Taffy.
//!
//! One flex row container, padded by `props.padding`, holding `props.length`
//! fixed-size leaves separated by `props.spacing`. Boxes never shrink, so a
//! narrow terminal clips the row instead of squeezing the boxes.

use taffy::{
    AlignItems, AvailableSpace, Dimension, Display, FlexDirection, LengthPercentage, Rect, Size,
    Style, TaffyTree,
};

use crate::error::FieldError;
use crate::types::FieldProps;

/// Position and size of one box, in cells, relative to the row origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BoxRect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl BoxRect {
    /// Cell at the visual center of the box.
    pub fn center(&self) -> (u16, u16) {
        (
            self.x.saturating_add(self.width / 2),
            self.y.saturating_add(self.height / 2),
        )
    }
}

/// Result of laying out a row.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RowLayout {
    pub boxes: Vec<BoxRect>,
    /// Size of the whole row including padding.
    pub width: u16,
    pub height: u16,
}

fn cells(n: u16) -> LengthPercentage {
    LengthPercentage::Length(n as f32)
}

/// Lay out the boxes of a field described by `props`.
pub fn layout_row(props: &FieldProps) -> Result<RowLayout, FieldError> {
    let mut tree: TaffyTree<()> = TaffyTree::new();

    let box_style = Style {
        size: Size {
            width: Dimension::Length(props.box_width as f32),
            height: Dimension::Length(props.box_height as f32),
        },
        flex_shrink: 0.0,
        ..Default::default()
    };

    let children = (0..props.length)
        .map(|_| tree.new_leaf(box_style.clone()))
        .collect::<Result<Vec<_>, _>>()?;

    let root = tree.new_with_children(
        Style {
            display: Display::Flex,
            flex_direction: FlexDirection::Row,
            align_items: Some(AlignItems::Center),
            gap: Size {
                width: cells(props.spacing),
                height: cells(0),
            },
            padding: Rect {
                left: cells(props.padding),
                right: cells(props.padding),
                top: cells(props.padding),
                bottom: cells(props.padding),
            },
            ..Default::default()
        },
        &children,
    )?;

    tree.compute_layout(
        root,
        Size {
            width: AvailableSpace::MaxContent,
            height: AvailableSpace::MaxContent,
        },
    )?;

    let mut boxes = Vec::with_capacity(children.len());
    for node in children {
        let layout = tree.layout(node)?;
        boxes.push(BoxRect {
            x: layout.location.x.round() as u16,
            y: layout.location.y.round() as u16,
            width: layout.size.width.round() as u16,
            height: layout.size.height.round() as u16,
        });
    }

    let root_layout = tree.layout(root)?;
    Ok(RowLayout {
        boxes,
        width: root_layout.size.width.round() as u16,
        height: root_layout.size.height.round() as u16,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boxes_are_spaced_evenly() {
        let props = FieldProps {
            box_width: 5,
            box_height: 3,
            spacing: 1,
            padding: 1,
            ..FieldProps::digits(4)
        };
        let row = layout_row(&props).unwrap();

        assert_eq!(row.boxes.len(), 4);
        let xs: Vec<u16> = row.boxes.iter().map(|b| b.x).collect();
        assert_eq!(xs, vec![1, 7, 13, 19]);
        for b in &row.boxes {
            assert_eq!(b.y, 1);
            assert_eq!((b.width, b.height), (5, 3));
        }
        assert_eq!(row.width, 1 + 4 * 5 + 3 + 1);
        assert_eq!(row.height, 5);
    }

    #[test]
    fn test_single_box() {
        let props = FieldProps {
            padding: 0,
            ..FieldProps::characters(1)
        };
        let row = layout_row(&props).unwrap();
        assert_eq!(row.boxes, vec![BoxRect { x: 0, y: 0, width: 5, height: 3 }]);
        assert_eq!(row.boxes[0].center(), (2, 1));
    }
}
