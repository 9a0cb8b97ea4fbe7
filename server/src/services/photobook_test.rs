use super::*;
use crate::state::test_helpers;
use canvas::doc::BookFormat;

fn payloads(pages: &[Page]) -> Vec<PagePayload> {
    pages.iter().map(PagePayload::from).collect()
}

fn save_request(doc: &PhotobookDoc, pages: &[Page]) -> SavePhotobookRequest {
    SavePhotobookRequest::from_pages(doc.id, "Title", "Notes", pages)
}

// =========================================================================
// create / get
// =========================================================================

#[tokio::test]
async fn create_seeds_draft_with_two_empty_pages() {
    let state = test_helpers::test_app_state();
    let gallery_id = Uuid::new_v4();
    let request = CreatePhotobookRequest { gallery_id, format: BookFormat::Portrait20x30, title: String::new() };

    let doc = create_photobook(&state, request).await.unwrap();
    assert_eq!(doc.status, PhotobookStatus::Draft);
    assert_eq!(doc.pages.len(), 2);
    assert!(doc.pages.iter().all(|p| p.photos.is_empty()));
    assert!(doc.pages.iter().all(|p| p.id.is_some()));
    assert_ne!(doc.pages[0].id, doc.pages[1].id);
    assert_eq!(get_for_gallery(&state, gallery_id).await, Some(doc));
}

#[tokio::test]
async fn create_twice_for_same_gallery_conflicts() {
    let state = test_helpers::test_app_state();
    let gallery_id = Uuid::new_v4();
    let request = CreatePhotobookRequest { gallery_id, format: BookFormat::Square30x30, title: String::new() };

    create_photobook(&state, request.clone()).await.unwrap();
    let err = create_photobook(&state, request).await.unwrap_err();
    assert!(matches!(err, PhotobookError::AlreadyExists(id) if id == gallery_id));
    assert_eq!(err.error_code(), "E_PHOTOBOOK_EXISTS");
    assert_eq!(state.photobooks.read().await.by_id.len(), 1);
}

#[tokio::test]
async fn get_for_unknown_gallery_is_none() {
    let state = test_helpers::test_app_state();
    assert!(get_for_gallery(&state, Uuid::new_v4()).await.is_none());
}

// =========================================================================
// save / submit
// =========================================================================

#[tokio::test]
async fn save_replaces_pages_and_metadata() {
    let state = test_helpers::test_app_state();
    let doc = test_helpers::seed_photobook(&state, PhotobookStatus::Draft).await;
    let pages = test_helpers::dummy_pages();

    let saved = save_photobook(&state, doc.id, save_request(&doc, &pages)).await.unwrap();
    assert_eq!(saved.title, "Title");
    assert_eq!(saved.notes, "Notes");
    assert_eq!(test_helpers::without_ids(&saved.pages), pages);
    assert_eq!(saved.status, PhotobookStatus::Draft);
    assert_eq!(get_for_gallery(&state, doc.gallery_id).await.unwrap().pages, saved.pages);
}

#[tokio::test]
async fn save_keeps_page_ids_and_assigns_new_ones() {
    let state = test_helpers::test_app_state();
    let doc = test_helpers::seed_photobook(&state, PhotobookStatus::Draft).await;
    let mut pages = test_helpers::dummy_pages();
    pages.extend([Page::new(3), Page::new(4)]);

    let saved = save_photobook(&state, doc.id, save_request(&doc, &pages)).await.unwrap();
    assert_eq!(saved.pages[0].id, doc.pages[0].id);
    assert_eq!(saved.pages[1].id, doc.pages[1].id);
    assert!(saved.pages.iter().all(|p| p.id.is_some()));

    let ids: HashSet<_> = saved.pages.iter().filter_map(|p| p.id.clone()).collect();
    assert_eq!(ids.len(), 4);

    let resaved = save_photobook(&state, doc.id, save_request(&doc, &pages)).await.unwrap();
    assert_eq!(resaved.pages, saved.pages);
}

#[tokio::test]
async fn save_sorts_pages_by_number() {
    let state = test_helpers::test_app_state();
    let doc = test_helpers::seed_photobook(&state, PhotobookStatus::Draft).await;
    let pages = vec![Page::new(2), Page::new(1)];

    let saved = save_photobook(&state, doc.id, save_request(&doc, &pages)).await.unwrap();
    let numbers: Vec<u32> = saved.pages.iter().map(|p| p.page_number).collect();
    assert_eq!(numbers, vec![1, 2]);
}

#[tokio::test]
async fn save_unknown_photobook_is_not_found() {
    let state = test_helpers::test_app_state();
    let id = Uuid::new_v4();
    let request = SavePhotobookRequest::from_pages(id, "", "", &test_helpers::dummy_pages());
    let err = save_photobook(&state, id, request).await.unwrap_err();
    assert!(matches!(err, PhotobookError::NotFound(_)));
}

#[tokio::test]
async fn save_with_mismatched_id_is_rejected() {
    let state = test_helpers::test_app_state();
    let doc = test_helpers::seed_photobook(&state, PhotobookStatus::Draft).await;
    let err = save_photobook(&state, Uuid::new_v4(), save_request(&doc, &test_helpers::dummy_pages()))
        .await
        .unwrap_err();
    assert_eq!(err.error_code(), "E_ID_MISMATCH");
}

#[tokio::test]
async fn submit_then_save_is_locked() {
    let state = test_helpers::test_app_state();
    let doc = test_helpers::seed_photobook(&state, PhotobookStatus::Draft).await;
    let pages = test_helpers::dummy_pages();

    let submitted = submit_photobook(&state, doc.id, save_request(&doc, &pages)).await.unwrap();
    assert_eq!(submitted.status, PhotobookStatus::Submitted);

    let err = save_photobook(&state, doc.id, save_request(&doc, &[Page::new(1), Page::new(2)]))
        .await
        .unwrap_err();
    assert!(matches!(err, PhotobookError::Locked(_)));
    assert_eq!(get_for_gallery(&state, doc.gallery_id).await.unwrap().pages, submitted.pages);

    let err = submit_photobook(&state, doc.id, save_request(&doc, &pages)).await.unwrap_err();
    assert_eq!(err.error_code(), "E_PHOTOBOOK_LOCKED");
}

#[tokio::test]
async fn invalid_save_leaves_store_untouched() {
    let state = test_helpers::test_app_state();
    let doc = test_helpers::seed_photobook(&state, PhotobookStatus::Draft).await;

    let err = save_photobook(&state, doc.id, save_request(&doc, &[Page::new(1)])).await.unwrap_err();
    assert!(matches!(err, PhotobookError::InvalidPages(_)));
    let stored = get_for_gallery(&state, doc.gallery_id).await.unwrap();
    assert_eq!(stored, doc);
}

// =========================================================================
// validate_pages
// =========================================================================

#[test]
fn validate_accepts_whole_spreads() {
    let pages = test_helpers::dummy_pages();
    assert!(validate_pages(&payloads(&pages)).is_ok());
}

#[test]
fn validate_rejects_odd_and_empty_page_counts() {
    assert!(validate_pages(&payloads(&[Page::new(1)])).is_err());
    assert!(validate_pages(&[]).is_err());
    let three = [Page::new(1), Page::new(2), Page::new(3)];
    assert!(validate_pages(&payloads(&three)).is_err());
}

#[test]
fn validate_rejects_duplicate_page_numbers() {
    let err = validate_pages(&payloads(&[Page::new(1), Page::new(1)])).unwrap_err();
    assert!(err.to_string().contains("duplicate page number 1"));
}

#[test]
fn validate_rejects_duplicate_placement_ids() {
    let mut pages = test_helpers::dummy_pages();
    let copy = pages[0].photos[0].clone();
    pages[0].photos.push(copy);
    let err = validate_pages(&payloads(&pages)).unwrap_err();
    assert!(err.to_string().contains("duplicate placement"));
}

#[test]
fn validate_rejects_geometry_outside_page() {
    let mut pages = test_helpers::dummy_pages();
    pages[0].photos[0].x = 80.0;
    let err = validate_pages(&payloads(&pages)).unwrap_err();
    assert!(err.to_string().contains("horizontal"));

    let mut pages = test_helpers::dummy_pages();
    pages[0].photos[0].height = 5.0;
    assert!(validate_pages(&payloads(&pages)).is_err());

    let mut pages = test_helpers::dummy_pages();
    pages[0].photos[0].y = f64::NAN;
    assert!(validate_pages(&payloads(&pages)).is_err());
}

#[test]
fn validate_accepts_placement_flush_with_edges() {
    let mut pages = test_helpers::dummy_pages();
    let p = &mut pages[0].photos[0];
    p.x = 75.0;
    p.y = 75.0;
    assert!(validate_pages(&payloads(&pages)).is_ok());
}
