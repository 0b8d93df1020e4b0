//! Integration test: drive a workflow the way the browser controller
//! does, with the service responses given as raw status and body.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use sarscope_core::gallery::interpret_gallery_response;
use sarscope_core::service::interpret_process_response;
use sarscope_core::{
    ConvertError, GalleryListing, ImageKind, ServiceConfig, Settled, Status, Tick, Timestamp,
    UploadFile, Workflow,
};

fn scene_tif() -> UploadFile {
    UploadFile::new("scene.tif", vec![0x49u8; 2 * 1024 * 1024])
}

#[test]
fn successful_conversion_reaches_complete() {
    let config = ServiceConfig::default();
    let mut wf = Workflow::default();
    let mut seen = vec![wf.status()];

    let ticket = wf.submit(scene_tif()).expect("2 MB tif is accepted");
    seen.push(wf.status());

    let mut last = wf.progress();
    for _ in 0..4 {
        assert!(matches!(wf.tick(ticket.id), Tick::Advanced(_)));
        assert!(wf.progress() >= last, "progress never decreases");
        assert_ne!(wf.progress(), 100);
        last = wf.progress();
    }

    let outcome = interpret_process_response(
        200,
        r#"{"original": "/files/a.png", "processed": "/files/b.png"}"#,
        &config,
    );
    assert_eq!(wf.settle(ticket.id, outcome), Settled::Completed);
    seen.push(wf.status());

    assert_eq!(seen, vec![Status::Idle, Status::Uploading, Status::Complete]);
    assert_eq!(wf.progress(), 100);
    let download = wf.download(ImageKind::Processed).unwrap();
    assert_eq!(download.filename, "rgb_scene.tif");
    assert_eq!(download.url, "http://localhost:5000/files/b.png");
}

#[test]
fn service_failure_message_reaches_session() {
    let mut wf = Workflow::default();
    let ticket = wf.submit(scene_tif()).unwrap();
    let outcome = interpret_process_response(
        500,
        r#"{"error": "decoder failure"}"#,
        &ServiceConfig::default(),
    );
    assert_eq!(wf.settle(ticket.id, outcome), Settled::Failed);
    assert_eq!(wf.status(), Status::Error);
    assert_eq!(wf.error(), Some("decoder failure"));
    assert_ne!(wf.progress(), 100);
}

#[test]
fn transport_failure_has_generic_message() {
    let mut wf = Workflow::default();
    let ticket = wf.submit(scene_tif()).unwrap();
    let outcome = Err(ConvertError::Transport {
        detail: "TypeError: NetworkError when attempting to fetch resource.".into(),
    });
    wf.settle(ticket.id, outcome);
    assert_eq!(wf.status(), Status::Error);
    let message = wf.error().unwrap();
    assert!(!message.is_empty());
    assert!(!message.contains("TypeError"));
}

#[test]
fn reset_mid_upload_stops_progress() {
    let mut wf = Workflow::default();
    let ticket = wf.submit(scene_tif()).unwrap();
    wf.tick(ticket.id);
    wf.tick(ticket.id);
    wf.reset();

    // The interval fires again after the reset.
    for _ in 0..5 {
        assert_eq!(wf.tick(ticket.id), Tick::Stale);
        assert_eq!(wf.progress(), 0);
        assert_eq!(wf.status(), Status::Idle);
    }
}

#[test]
fn late_response_after_reset_is_discarded() {
    let config = ServiceConfig::default();
    let mut wf = Workflow::default();
    let stale = wf.submit(scene_tif()).unwrap();
    wf.reset();

    let late = interpret_process_response(
        200,
        r#"{"original": "/files/a.png", "processed": "/files/b.png"}"#,
        &config,
    );
    assert_eq!(wf.settle(stale.id, late), Settled::Stale);
    assert_eq!(wf.status(), Status::Idle);
    assert!(wf.result().is_none());
}

#[test]
fn late_response_does_not_touch_newer_session() {
    let config = ServiceConfig::default();
    let mut wf = Workflow::default();
    let stale = wf.submit(scene_tif()).unwrap();
    wf.reset();
    let fresh = wf.submit(UploadFile::new("other.png", vec![1u8; 10])).unwrap();
    wf.tick(fresh.id);
    let progress = wf.progress();

    let late = interpret_process_response(500, r#"{"error": "old failure"}"#, &config);
    assert_eq!(wf.settle(stale.id, late), Settled::Stale);
    assert_eq!(wf.tick(stale.id), Tick::Stale);

    assert_eq!(wf.status(), Status::Uploading);
    assert_eq!(wf.progress(), progress);
    assert_eq!(wf.file().map(UploadFile::name), Some("other.png"));
}

#[test]
fn empty_gallery_is_signalled() {
    let now = Timestamp {
        date: "2026-10-16".into(),
        time: "12:00:00".into(),
    };
    let listing = interpret_gallery_response(
        200,
        r#"{"success": true, "images": []}"#,
        &ServiceConfig::default(),
        &now,
    )
    .unwrap();
    assert_eq!(listing, GalleryListing::Empty);
}
