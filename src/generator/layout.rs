//! Fixed slide geometry, in inches.

use crate::deck::{LayoutMode, Region};
use crate::generator::base::{Rect, VerticalAnchor};

pub const TITLE_RECT: Rect = Rect {
    left: 1.5,
    top: 0.6,
    width: CONTENT_AREA.width,
    height: 0.8,
};
pub const TITLE_FONT_SIZE: f64 = 32.0;

/// The area below the title that regions and images are placed in.
pub const CONTENT_AREA: Rect = Rect {
    left: 1.5,
    top: 1.5,
    width: 10.5,
    height: 5.0,
};
pub const COLUMN_GAP: f64 = 0.4;
pub const ROW_GAP: f64 = 0.3;
pub const COLUMN_WIDTH: f64 = (CONTENT_AREA.width - COLUMN_GAP) / 2.0;

/// Share of the content height given to the passage of a reading slide.
pub const READING_SHARE: f64 = 0.65;

pub const BODY_FONT_SIZE: f64 = 22.0;
/// Four boxes are dense, so they start smaller.
pub const FOUR_BOX_FONT_SIZE: f64 = 18.0;

/// Step boxes: height of each box and distance between their tops.
pub const STEP_HEIGHT: f64 = 0.6;
pub const STEP_ADVANCE: f64 = 0.65;

pub const DEFAULT_IMAGE_WIDTH: f64 = 4.0;

pub const FOOTER_FONT_SIZE: f64 = 12.0;

/// Where a region is drawn and with which requested font size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegionPlacement {
    pub region: Region,
    pub label: &'static str,
    pub rect: Rect,
    pub font_size: f64,
    pub anchor: VerticalAnchor,
}

impl RegionPlacement {
    fn new(region: Region, label: &'static str, rect: Rect, font_size: f64) -> Self {
        RegionPlacement {
            region,
            label,
            rect,
            font_size,
            anchor: VerticalAnchor::Top,
        }
    }
}

/// Computes the placement of every region a layout draws, in drawing order.
pub fn placements(mode: LayoutMode) -> Vec<RegionPlacement> {
    let area = CONTENT_AREA;
    let right_left = area.left + COLUMN_WIDTH + COLUMN_GAP;

    match mode {
        LayoutMode::Reading => {
            let reading_height = area.height * READING_SHARE;
            let questions_height = area.height * (1.0 - READING_SHARE) - ROW_GAP;
            vec![
                RegionPlacement::new(
                    Region::LeftTop,
                    "ReadingText",
                    Rect::new(area.left, area.top, area.width, reading_height),
                    BODY_FONT_SIZE,
                ),
                RegionPlacement::new(
                    Region::LeftBottom,
                    "ReadingQuestions",
                    Rect::new(
                        area.left,
                        area.top + reading_height + ROW_GAP,
                        area.width,
                        questions_height,
                    ),
                    BODY_FONT_SIZE,
                ),
            ]
        }
        LayoutMode::FourBox => {
            let half_height = (area.height - ROW_GAP) / 2.0;
            let bottom_top = area.top + half_height + ROW_GAP;
            [
                (Region::LeftTop, area.left, area.top),
                (Region::RightTop, right_left, area.top),
                (Region::LeftBottom, area.left, bottom_top),
                (Region::RightBottom, right_left, bottom_top),
            ]
            .into_iter()
            .map(|(region, left, top)| {
                RegionPlacement::new(
                    region,
                    region.label(),
                    Rect::new(left, top, COLUMN_WIDTH, half_height),
                    FOUR_BOX_FONT_SIZE,
                )
            })
            .collect()
        }
        LayoutMode::TwoColumn => [(Region::Left, area.left), (Region::Right, right_left)]
            .into_iter()
            .map(|(region, left)| {
                RegionPlacement::new(
                    region,
                    region.label(),
                    Rect::new(left, area.top, COLUMN_WIDTH, area.height),
                    BODY_FONT_SIZE,
                )
            })
            .collect(),
        LayoutMode::Single => vec![RegionPlacement::new(
            Region::Content,
            Region::Content.label(),
            area,
            BODY_FONT_SIZE,
        )],
    }
}

/// The slide-number footer box for a slide of the given size.
pub fn footer_rect(slide_width: f64, slide_height: f64) -> Rect {
    Rect::new(slide_width - 1.5, slide_height - 0.5, 1.0, 0.3)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_reading_split() {
        let p = placements(LayoutMode::Reading);
        assert_eq!(p.len(), 2);
        assert_eq!(p[0].label, "ReadingText");
        assert!(close(p[0].rect.height, 3.25));
        assert!(close(p[1].rect.top, 1.5 + 3.25 + 0.3));
        assert!(close(p[1].rect.height, 1.75 - 0.3));
        assert_eq!(p[1].region, Region::LeftBottom);
    }

    #[test]
    fn test_four_box_grid() {
        let p = placements(LayoutMode::FourBox);
        let labels: Vec<&str> = p.iter().map(|r| r.label).collect();
        assert_eq!(labels, vec!["LeftTop", "RightTop", "LeftBottom", "RightBottom"]);
        assert!(p.iter().all(|r| r.font_size == FOUR_BOX_FONT_SIZE));
        assert!(close(p[0].rect.width, 5.05));
        assert!(close(p[1].rect.left, 1.5 + 5.05 + 0.4));
        assert!(close(p[2].rect.top, 1.5 + 2.35 + 0.3));
        assert!(close(p[3].rect.height, 2.35));
    }

    #[test]
    fn test_two_column_and_single() {
        let p = placements(LayoutMode::TwoColumn);
        assert_eq!(p.len(), 2);
        assert!(close(p[1].rect.left, 6.95));
        assert!(close(p[1].rect.height, CONTENT_AREA.height));

        let p = placements(LayoutMode::Single);
        assert_eq!(p[0].rect, CONTENT_AREA);
        assert_eq!(p[0].font_size, BODY_FONT_SIZE);
    }

    #[test]
    fn test_footer_rect() {
        let r = footer_rect(13.33, 7.5);
        assert!(close(r.left, 11.83));
        assert!(close(r.top, 7.0));
    }
}
