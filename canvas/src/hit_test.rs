use uuid::Uuid;

use super::*;
use crate::doc::{Placement, Rotation};

fn placed(x: f64, y: f64, w: f64, h: f64, z: i64) -> Placement {
    Placement { id: Uuid::new_v4(), photo_id: "p".into(), x, y, width: w, height: h, rotation: Rotation::Deg0, z_index: z }
}

fn page_with(placements: Vec<Placement>) -> Page {
    let mut page = Page::new(1);
    page.photos = placements;
    page
}

const PAGE: Size = Size { width: 200.0, height: 300.0 };

// =============================================================
// HitPart
// =============================================================

#[test]
fn hit_part_variants_distinct() {
    assert_ne!(HitPart::Body, HitPart::ResizeHandle);
    assert_eq!(format!("{:?}", HitPart::Body), "Body");
}

// =============================================================
// hit_test
// =============================================================

#[test]
fn empty_page_hits_nothing() {
    let page = Page::new(1);
    assert!(hit_test(&page, PAGE, Point::new(10.0, 10.0), None).is_none());
}

#[test]
fn unmeasured_page_hits_nothing() {
    let page = page_with(vec![placed(0.0, 0.0, 50.0, 50.0, 1)]);
    assert!(hit_test(&page, Size::default(), Point::new(1.0, 1.0), None).is_none());
}

#[test]
fn body_hit_inside_placement() {
    let p = placed(10.0, 10.0, 20.0, 20.0, 1);
    let id = p.id;
    let page = page_with(vec![p]);
    // 15% of 200 = 30px, 15% of 300 = 45px.
    let hit = hit_test(&page, PAGE, Point::new(30.0, 45.0), None).unwrap();
    assert_eq!(hit, Hit { placement_id: id, part: HitPart::Body });
}

#[test]
fn miss_outside_placement() {
    let page = page_with(vec![placed(10.0, 10.0, 20.0, 20.0, 1)]);
    assert!(hit_test(&page, PAGE, Point::new(150.0, 250.0), None).is_none());
}

#[test]
fn overlapping_placements_hit_topmost() {
    let low = placed(0.0, 0.0, 50.0, 50.0, 1);
    let high = placed(10.0, 10.0, 50.0, 50.0, 9);
    let high_id = high.id;
    let page = page_with(vec![high, low]);
    let hit = hit_test(&page, PAGE, Point::new(40.0, 60.0), None).unwrap();
    assert_eq!(hit.placement_id, high_id);
}

#[test]
fn resize_handle_only_for_selected() {
    let p = placed(10.0, 10.0, 20.0, 20.0, 1);
    let id = p.id;
    let page = page_with(vec![p]);
    // Corner at (30%, 30%) = (60px, 90px).
    let corner = Point::new(60.0, 90.0);

    let unselected = hit_test(&page, PAGE, corner, None).unwrap();
    assert_eq!(unselected.part, HitPart::Body);

    let selected = hit_test(&page, PAGE, Point::new(64.0, 94.0), Some(id)).unwrap();
    assert_eq!(selected, Hit { placement_id: id, part: HitPart::ResizeHandle });
}

#[test]
fn resize_handle_wins_over_overlapping_body() {
    let below = placed(10.0, 10.0, 20.0, 20.0, 1);
    let below_id = below.id;
    let above = placed(25.0, 25.0, 40.0, 40.0, 5);
    let page = page_with(vec![below, above]);
    let hit = hit_test(&page, PAGE, Point::new(60.0, 90.0), Some(below_id)).unwrap();
    assert_eq!(hit, Hit { placement_id: below_id, part: HitPart::ResizeHandle });
}

#[test]
fn stale_selection_is_ignored() {
    let page = page_with(vec![placed(0.0, 0.0, 20.0, 20.0, 1)]);
    let hit = hit_test(&page, PAGE, Point::new(10.0, 10.0), Some(Uuid::new_v4())).unwrap();
    assert_eq!(hit.part, HitPart::Body);
}
