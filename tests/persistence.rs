mod common;

use std::path::PathBuf;
use std::time::{Duration, Instant};

use common::{context, recording_context, recording_context_with, scribble};
use egui::{Color32, pos2};
use ink_overlay::state::persistence::{
    INK_EXTENSION, QUICK_SAVE_PREFIX, generate_file_name, load_strokes, save_strokes,
};
use ink_overlay::geometry::DrawBounds;
use ink_overlay::state::{IoJobs, PendingTask, StrokeStore};
use ink_overlay::{EditorContext, OverlayConfig, OverlayEvent, PersistenceError, Stroke, StrokeStyle};

fn temp_dir() -> PathBuf {
    std::env::temp_dir().join(format!("ink_overlay_test_{}", uuid::Uuid::new_v4()))
}

fn wait_for(jobs: &mut IoJobs, context: &mut EditorContext) {
    let deadline = Instant::now() + Duration::from_secs(10);
    while jobs.is_busy() && Instant::now() < deadline {
        jobs.poll(context);
        std::thread::sleep(Duration::from_millis(10));
    }
    assert!(!jobs.is_busy(), "background job did not finish");
}

#[test]
fn test_strokes_survive_a_save_load_cycle() {
    let strokes = vec![
        Stroke::new_ref(vec![pos2(1.0, 2.0), pos2(3.5, 4.25)], StrokeStyle::new(Color32::RED, 5.0)).unwrap(),
        Stroke::new_ref(vec![pos2(9.0, 9.0)], StrokeStyle::new(Color32::from_rgb(1, 2, 3), 13.0)).unwrap(),
    ];
    let mut buffer = Vec::new();
    save_strokes(&mut buffer, &strokes).unwrap();

    let loaded = load_strokes(buffer.as_slice()).unwrap();
    assert_eq!(loaded.len(), 2);
    for (original, loaded) in strokes.iter().zip(&loaded) {
        assert_eq!(**original, **loaded);
    }
}

#[test]
fn test_empty_canvas_is_not_saved() {
    let mut buffer = Vec::new();
    assert!(matches!(save_strokes(&mut buffer, &[]), Err(PersistenceError::NothingToSave)));
    assert!(buffer.is_empty());
}

#[test]
fn test_garbage_file_is_an_error() {
    assert!(matches!(
        load_strokes(&b"not json"[..]),
        Err(PersistenceError::Serialization(_))
    ));
}

#[test]
fn test_quick_save_name_format() {
    let name = generate_file_name(QUICK_SAVE_PREFIX, INK_EXTENSION);
    let stamp = name
        .strip_prefix("QuickSave_")
        .and_then(|rest| rest.strip_suffix(".fdw"))
        .unwrap();
    assert_eq!(stamp.len(), "yyyyMMdd-HHmmss".len());
    assert_eq!(stamp.as_bytes()[8], b'-');
    assert!(stamp.chars().filter(|c| *c != '-').all(|c| c.is_ascii_digit()));
}

#[test]
fn test_pending_task_hands_back_result() {
    let task = PendingTask::spawn("test-task", || Ok(21 * 2));
    assert_eq!(task.wait().unwrap(), 42);
}

#[test]
fn test_store_finds_latest_save() {
    let dir = temp_dir();
    let store = StrokeStore::new(&dir);
    assert_eq!(store.find_latest().unwrap(), None);

    let stroke = Stroke::new_ref(vec![pos2(0.0, 0.0)], StrokeStyle::default()).unwrap();
    let path = dir.join("QuickSave_20240101-000000.fdw");
    store.save_to(&path, &[stroke]).unwrap();
    std::fs::write(dir.join("notes.txt"), "ignored").unwrap();

    assert_eq!(store.find_latest().unwrap(), Some(path.clone()));
    assert_eq!(StrokeStore::load_from(&path).unwrap().len(), 1);

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_quick_save_then_load_latest() {
    let dir = temp_dir();
    let config = OverlayConfig {
        save_dir: dir.clone(),
        ..OverlayConfig::default()
    };
    let mut context = EditorContext::new(config);
    let mut jobs = IoJobs::new(StrokeStore::new(&dir));

    scribble(&mut context, 10.0, 10.0);
    scribble(&mut context, 50.0, 10.0);
    assert!(context.is_unsaved());

    assert!(jobs.quick_save(&context));
    wait_for(&mut jobs, &mut context);
    assert!(!context.is_unsaved());

    context.clear();
    assert!(context.document().is_empty());

    jobs.load_latest();
    wait_for(&mut jobs, &mut context);
    assert_eq!(context.document().len(), 2);
    assert!(!context.can_undo());
    assert!(!context.is_unsaved());

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_load_latest_without_saves_notifies() {
    let dir = temp_dir();
    let (mut context, events) = recording_context();
    let mut jobs = IoJobs::new(StrokeStore::new(&dir));

    jobs.load_latest();
    wait_for(&mut jobs, &mut context);
    assert!(events.lock().contains(&OverlayEvent::Notice("No saved ink".to_owned())));
}

#[test]
fn test_unsaved_tracking() {
    let mut context = context();
    assert!(!context.is_unsaved());

    scribble(&mut context, 10.0, 10.0);
    assert!(context.is_unsaved());
    context.mark_saved();
    assert!(!context.is_unsaved());

    // A save snapshot taken before an edit leaves the edit unsaved
    let (revision, _) = context.snapshot();
    scribble(&mut context, 50.0, 10.0);
    context.mark_saved_at(revision);
    assert!(context.is_unsaved());
}

#[test]
fn test_exit_save_writes_unsaved_ink() {
    let dir = temp_dir();
    let mut context = context();
    let mut jobs = IoJobs::new(StrokeStore::new(&dir));

    jobs.save_on_exit(&mut context);
    assert!(!dir.exists());

    scribble(&mut context, 10.0, 10.0);
    jobs.save_on_exit(&mut context);
    let latest = jobs.store().find_latest().unwrap().unwrap();
    assert!(latest.file_name().unwrap().to_string_lossy().starts_with("ExitingAutoSave_"));
    assert!(!context.is_unsaved());

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_export_uses_configured_background() {
    let dir = temp_dir();
    let config = OverlayConfig {
        save_dir: dir.clone(),
        export_background: Some(Color32::WHITE),
        ..OverlayConfig::default()
    };
    let (mut context, events) = recording_context_with(config);
    context.set_bounds(DrawBounds::new(64.0, 48.0, 0.0));
    let mut jobs = IoJobs::new(StrokeStore::new(&dir));

    scribble(&mut context, 10.0, 10.0);
    assert!(jobs.export(&context));
    wait_for(&mut jobs, &mut context);
    assert!(events.lock().contains(&OverlayEvent::Notice("Image exported".to_owned())));

    let exported = std::fs::read_dir(&dir)
        .unwrap()
        .filter_map(|entry| entry.ok().map(|entry| entry.path()))
        .find(|path| path.to_string_lossy().ends_with(".png"))
        .unwrap();
    let image = image::open(&exported).unwrap().to_rgba8();
    assert_eq!(image.dimensions(), (64, 48));
    assert_eq!(image.get_pixel(63, 47).0, [255, 255, 255, 255]);

    std::fs::remove_dir_all(&dir).ok();
}
