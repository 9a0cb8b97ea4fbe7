#![allow(clippy::float_cmp)]

use serde_json::json;
use uuid::Uuid;

use super::*;

fn make_placement(x: f64, y: f64, w: f64, h: f64, z: i64) -> Placement {
    Placement {
        id: Uuid::new_v4(),
        photo_id: "photo-1".into(),
        x,
        y,
        width: w,
        height: h,
        rotation: Rotation::Deg0,
        z_index: z,
    }
}

fn assert_inside_page(p: &Placement) {
    assert!(p.x >= 0.0, "x below zero: {p:?}");
    assert!(p.y >= 0.0, "y below zero: {p:?}");
    assert!(p.x + p.width <= PAGE_EXTENT + 1e-9, "overflows right edge: {p:?}");
    assert!(p.y + p.height <= PAGE_EXTENT + 1e-9, "overflows bottom edge: {p:?}");
    assert!(p.width >= MIN_PLACEMENT_SIZE, "width below minimum: {p:?}");
    assert!(p.height >= MIN_PLACEMENT_SIZE, "height below minimum: {p:?}");
}

// =============================================================
// Rotation
// =============================================================

#[test]
fn rotation_cycles_through_quarter_turns() {
    let mut r = Rotation::Deg0;
    let mut seen = Vec::new();
    for _ in 0..4 {
        r = r.next();
        seen.push(r.degrees());
    }
    assert_eq!(seen, vec![90, 180, 270, 0]);
}

#[test]
fn rotation_serializes_as_degrees() {
    assert_eq!(serde_json::to_string(&Rotation::Deg270).unwrap(), "270");
    assert_eq!(serde_json::to_string(&Rotation::Deg0).unwrap(), "0");
}

#[test]
fn rotation_deserialize_normalizes_multiples_of_90() {
    let cases = [("0", Rotation::Deg0), ("450", Rotation::Deg90), ("-90", Rotation::Deg270), ("720", Rotation::Deg0)];
    for (input, expected) in cases {
        let r: Rotation = serde_json::from_str(input).unwrap();
        assert_eq!(r, expected, "input {input}");
    }
}

#[test]
fn rotation_deserialize_rejects_non_quarter_turns() {
    assert!(serde_json::from_str::<Rotation>("45").is_err());
    assert!(Rotation::try_from(100).is_err());
    assert_eq!(Rotation::try_from(30), Err(InvalidRotation(30)));
}

#[test]
fn rotation_sideways_only_for_90_and_270() {
    assert!(!Rotation::Deg0.is_sideways());
    assert!(Rotation::Deg90.is_sideways());
    assert!(!Rotation::Deg180.is_sideways());
    assert!(Rotation::Deg270.is_sideways());
}

// =============================================================
// Placement geometry
// =============================================================

#[test]
fn placement_new_uses_default_size() {
    let p = Placement::new("p", 40.0, 40.0, 1);
    assert_eq!(p.width, DEFAULT_PLACEMENT_SIZE);
    assert_eq!(p.height, DEFAULT_PLACEMENT_SIZE);
    assert_eq!(p.x, 40.0);
    assert_eq!(p.y, 40.0);
    assert_eq!(p.rotation, Rotation::Deg0);
}

#[test]
fn placement_new_clamps_position_into_page() {
    let p = Placement::new("p", 95.0, -20.0, 1);
    assert_eq!(p.x, 75.0);
    assert_eq!(p.y, 0.0);
}

#[test]
fn placement_new_ids_are_unique() {
    let a = Placement::new("p", 0.0, 0.0, 1);
    let b = Placement::new("p", 0.0, 0.0, 1);
    assert_ne!(a.id, b.id);
}

#[test]
fn clamp_to_page_repairs_oversized_placement() {
    let mut p = make_placement(50.0, 50.0, 150.0, 5.0, 0);
    p.clamp_to_page();
    assert_eq!(p.width, 100.0);
    assert_eq!(p.height, MIN_PLACEMENT_SIZE);
    assert_eq!(p.x, 0.0);
    assert_eq!(p.y, 50.0);
    assert_inside_page(&p);
}

#[test]
fn clamp_to_page_replaces_non_finite_values() {
    let mut p = make_placement(f64::NAN, f64::INFINITY, f64::NAN, 30.0, 0);
    p.clamp_to_page();
    assert_eq!(p.x, 0.0);
    assert_eq!(p.width, DEFAULT_PLACEMENT_SIZE);
    assert_eq!(p.y, 0.0);
    assert_inside_page(&p);
}

#[test]
fn translate_accumulates_relative_deltas() {
    let mut p = make_placement(10.0, 10.0, 25.0, 25.0, 0);
    p.translate(Point::new(5.0, 2.0));
    p.translate(Point::new(5.0, 2.0));
    assert_eq!(p.x, 20.0);
    assert_eq!(p.y, 14.0);
}

#[test]
fn translate_clamps_at_far_edges() {
    let mut p = make_placement(70.0, 70.0, 25.0, 25.0, 0);
    p.translate(Point::new(40.0, 40.0));
    assert_eq!(p.x, 75.0);
    assert_eq!(p.y, 75.0);
    p.translate(Point::new(-500.0, -500.0));
    assert_eq!(p.x, 0.0);
    assert_eq!(p.y, 0.0);
}

#[test]
fn resize_caps_at_remaining_extent() {
    let mut p = make_placement(60.0, 20.0, 25.0, 25.0, 0);
    p.resize(Point::new(50.0, 100.0));
    assert_eq!(p.width, 40.0);
    assert_eq!(p.height, 80.0);
    assert_eq!(p.x, 60.0);
    assert_inside_page(&p);
}

#[test]
fn resize_floors_at_minimum() {
    let mut p = make_placement(10.0, 10.0, 25.0, 25.0, 0);
    p.resize(Point::new(-100.0, -20.0));
    assert_eq!(p.width, MIN_PLACEMENT_SIZE);
    assert_eq!(p.height, MIN_PLACEMENT_SIZE);
}

#[test]
fn mixed_drag_and_resize_sequence_preserves_invariant() {
    let mut p = make_placement(30.0, 30.0, 25.0, 25.0, 0);
    let deltas = [
        (Point::new(80.0, -3.0), Point::new(12.0, 40.0)),
        (Point::new(-200.0, 55.0), Point::new(90.0, -90.0)),
        (Point::new(33.3, 17.7), Point::new(-5.0, 70.0)),
        (Point::new(0.1, -0.1), Point::new(-1000.0, 1000.0)),
    ];
    for (mv, rs) in deltas {
        p.translate(mv);
        assert_inside_page(&p);
        p.resize(rs);
        assert_inside_page(&p);
    }
}

#[test]
fn duplicate_offsets_and_gets_new_identity() {
    let original = make_placement(10.0, 20.0, 25.0, 25.0, 3);
    let copy = original.duplicate(4);
    assert_ne!(copy.id, original.id);
    assert_eq!(copy.photo_id, original.photo_id);
    assert_eq!(copy.x, 15.0);
    assert_eq!(copy.y, 25.0);
    assert_eq!(copy.z_index, 4);
    assert_eq!(copy.width, original.width);
}

#[test]
fn duplicate_near_edge_stays_inside_page() {
    let original = make_placement(88.0, 89.0, 10.0, 10.0, 1);
    let copy = original.duplicate(2);
    assert_eq!(copy.x, 90.0);
    assert_eq!(copy.y, 90.0);
    assert_inside_page(&copy);

    let wide = make_placement(70.0, 70.0, 30.0, 30.0, 1);
    let copy = wide.duplicate(2);
    assert_eq!(copy.x, 70.0);
    assert_inside_page(&copy);
}

#[test]
fn contains_and_corner() {
    let p = make_placement(10.0, 10.0, 20.0, 30.0, 0);
    assert!(p.contains(Point::new(15.0, 35.0)));
    assert!(!p.contains(Point::new(31.0, 15.0)));
    assert_eq!(p.corner(), Point::new(30.0, 40.0));
}

#[test]
fn geometry_differs_respects_epsilon() {
    let a = make_placement(10.0, 10.0, 20.0, 20.0, 0);
    let mut b = a.clone();
    b.x += 0.001;
    assert!(!a.geometry_differs(&b, 0.01));
    b.height += 1.0;
    assert!(a.geometry_differs(&b, 0.01));
}

// =============================================================
// Placement serde
// =============================================================

#[test]
fn placement_wire_shape_is_camel_case() {
    let p = make_placement(1.0, 2.0, 30.0, 40.0, 7);
    let value = serde_json::to_value(&p).unwrap();
    let obj = value.as_object().unwrap();
    let mut keys: Vec<&str> = obj.keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(keys, vec!["height", "id", "photoId", "rotation", "width", "x", "y", "zIndex"]);
    assert_eq!(value["zIndex"], json!(7));
    assert_eq!(value["rotation"], json!(0));
}

#[test]
fn placement_missing_rotation_defaults_to_zero() {
    let value = json!({
        "id": Uuid::nil(),
        "photoId": "abc",
        "x": 5.0, "y": 5.0, "width": 20.0, "height": 20.0,
        "zIndex": 2,
    });
    let p: Placement = serde_json::from_value(value).unwrap();
    assert_eq!(p.rotation, Rotation::Deg0);
    assert_eq!(p.photo_id, "abc");
}

// =============================================================
// Page
// =============================================================

#[test]
fn page_new_is_empty_and_white() {
    let page = Page::new(3);
    assert_eq!(page.page_number, 3);
    assert!(page.photos.is_empty());
    assert_eq!(page.background_color, DEFAULT_BACKGROUND);
    assert!(page.id.is_none());
}

#[test]
fn page_max_z_index_empty_is_zero() {
    assert_eq!(Page::new(1).max_z_index(), 0);
}

#[test]
fn page_sorted_placements_orders_by_z() {
    let mut page = Page::new(1);
    page.photos.push(make_placement(0.0, 0.0, 20.0, 20.0, 5));
    page.photos.push(make_placement(0.0, 0.0, 20.0, 20.0, 1));
    page.photos.push(make_placement(0.0, 0.0, 20.0, 20.0, 3));
    let z: Vec<i64> = page.sorted_placements().iter().map(|p| p.z_index).collect();
    assert_eq!(z, vec![1, 3, 5]);
    assert_eq!(page.max_z_index(), 5);
}

#[test]
fn page_remove_returns_placement() {
    let mut page = Page::new(1);
    let p = make_placement(0.0, 0.0, 20.0, 20.0, 1);
    let id = p.id;
    page.photos.push(p);
    assert!(page.remove(&id).is_some());
    assert!(page.remove(&id).is_none());
    assert!(page.placement(&id).is_none());
}

#[test]
fn page_deserialize_defaults_background_and_photos() {
    let page: Page = serde_json::from_value(json!({ "pageNumber": 4 })).unwrap();
    assert_eq!(page.page_number, 4);
    assert!(page.photos.is_empty());
    assert_eq!(page.background_color, "#ffffff");
}

#[test]
fn page_serialize_omits_missing_id() {
    let value = serde_json::to_value(Page::new(1)).unwrap();
    assert!(value.get("id").is_none());
    assert_eq!(value["backgroundColor"], json!("#ffffff"));
}

// =============================================================
// PageStore
// =============================================================

#[test]
fn store_new_seeds_one_spread() {
    let store = PageStore::new();
    assert_eq!(store.len(), 2);
    let numbers: Vec<u32> = store.pages().iter().map(|p| p.page_number).collect();
    assert_eq!(numbers, vec![1, 2]);
    assert_eq!(store.placement_count(), 0);
}

#[test]
fn store_add_spread_keeps_count_even() {
    let mut store = PageStore::new();
    for i in 0..5 {
        let first = store.add_spread();
        assert_eq!(first, 2 + i * 2);
        assert_eq!(store.len() % 2, 0);
    }
    let numbers: Vec<u32> = store.pages().iter().map(|p| p.page_number).collect();
    assert_eq!(numbers, (1..=12).collect::<Vec<u32>>());
}

#[test]
fn store_from_pages_sorts_and_pads_odd_count() {
    let pages = vec![Page::new(3), Page::new(1), Page::new(2)];
    let store = PageStore::from_pages(pages);
    let numbers: Vec<u32> = store.pages().iter().map(|p| p.page_number).collect();
    assert_eq!(numbers, vec![1, 2, 3, 4]);
}

#[test]
fn store_from_empty_pages_seeds_spread() {
    let store = PageStore::from_pages(Vec::new());
    assert_eq!(store.len(), 2);
}

#[test]
fn store_from_pages_clamps_placements() {
    let mut page = Page::new(1);
    page.photos.push(make_placement(95.0, 95.0, 25.0, 25.0, 1));
    let store = PageStore::from_pages(vec![page, Page::new(2)]);
    let p = &store.pages()[0].photos[0];
    assert_eq!(p.x, 75.0);
    assert_eq!(p.y, 75.0);
}

#[test]
fn store_page_of_finds_placement() {
    let mut store = PageStore::new();
    let p = make_placement(0.0, 0.0, 20.0, 20.0, 1);
    let id = p.id;
    store.get_mut(1).unwrap().photos.push(p);
    assert_eq!(store.page_of(&id), Some(1));
    assert_eq!(store.page_of(&Uuid::new_v4()), None);
}

// =============================================================
// BookFormat / PhotobookStatus
// =============================================================

#[test]
fn format_serde_uses_dimension_names() {
    assert_eq!(serde_json::to_string(&BookFormat::Portrait20x30).unwrap(), "\"20x30\"");
    assert_eq!(serde_json::to_string(&BookFormat::Square30x30).unwrap(), "\"30x30\"");
    let f: BookFormat = serde_json::from_str("\"30x30\"").unwrap();
    assert_eq!(f, BookFormat::Square30x30);
    assert!(serde_json::from_str::<BookFormat>("\"a4\"").is_err());
}

#[test]
fn format_from_str_and_display_agree() {
    for format in [BookFormat::Portrait20x30, BookFormat::Square30x30] {
        assert_eq!(format.to_string().parse::<BookFormat>(), Ok(format));
    }
    assert_eq!("15x15".parse::<BookFormat>(), Err(UnknownFormat("15x15".into())));
}

#[test]
fn format_aspect_ratio_bounds_page_size() {
    let size = BookFormat::Portrait20x30.page_size_for_width(200.0);
    assert!((size.height - 300.0).abs() < 1e-9);
    let size = BookFormat::Square30x30.page_size_for_width(250.0);
    assert_eq!(size.height, 250.0);
}

#[test]
fn status_serde_is_lowercase() {
    assert_eq!(serde_json::to_string(&PhotobookStatus::Submitted).unwrap(), "\"submitted\"");
    assert_eq!(PhotobookStatus::default(), PhotobookStatus::Draft);
    assert!(PhotobookStatus::Draft.is_editable());
    assert!(!PhotobookStatus::Submitted.is_editable());
}
