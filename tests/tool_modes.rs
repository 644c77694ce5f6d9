mod common;

use common::recording_context;
use ink_overlay::tool::{CursorKind, EditingMode, EraserKind, UiEffect};
use ink_overlay::{OverlayEvent, PenMode, ToolAction, ToolState};

#[test]
fn test_eraser_from_parabola_forces_freehand() {
    let state = ToolState::default()
        .apply(ToolAction::SetMode(PenMode::Parabola))
        .state;
    let transition = state.apply(ToolAction::SetEraser(true));

    assert_eq!(transition.state.mode(), PenMode::Freehand);
    assert_eq!(transition.state.eraser(), Some(EraserKind::Stroke));
    assert!(transition.effects.contains(&UiEffect::Status("Eraser Mode")));
    assert!(transition.effects.contains(&UiEffect::Editing(EditingMode::EraseByStroke)));
}

#[test]
fn test_shape_mode_puts_eraser_away() {
    let state = ToolState::default().apply(ToolAction::SetEraser(true)).state;
    let transition = state.apply(ToolAction::SetMode(PenMode::Line));

    assert!(!transition.state.eraser_active());
    assert!(transition.effects.contains(&UiEffect::Cursor(CursorKind::Crosshair)));
    assert!(transition.effects.contains(&UiEffect::Editing(EditingMode::None)));
}

#[test]
fn test_parabola_toggle_cycles_direction() {
    let s0 = ToolState::default();
    let s1 = s0.apply(ToolAction::ToggleParabola).state;
    assert_eq!(s1.mode(), PenMode::Parabola);
    assert!(!s1.curve_reversed());

    let s2 = s1.apply(ToolAction::ToggleParabola).state;
    assert!(s2.curve_reversed());

    let s3 = s2.apply(ToolAction::ToggleParabola).state;
    assert_eq!(s3.mode(), PenMode::Freehand);
    assert!(!s3.curve_reversed());
}

#[test]
fn test_parabola_toggle_from_active_eraser() {
    let erasing = ToolState::default().apply(ToolAction::SetEraser(true)).state;
    assert_eq!(erasing.eraser(), Some(EraserKind::Stroke));

    let forward = erasing.apply(ToolAction::ToggleParabola);
    assert_eq!(forward.state.mode(), PenMode::Parabola);
    assert!(!forward.state.curve_reversed());
    assert!(!forward.state.eraser_active());
    assert!(forward.effects.contains(&UiEffect::Status("Parabola Mode")));

    let reversed = forward.state.apply(ToolAction::ToggleParabola).state;
    assert_eq!(reversed.mode(), PenMode::Parabola);
    assert!(reversed.curve_reversed());
    assert!(!reversed.eraser_active());

    let back = reversed.apply(ToolAction::ToggleParabola).state;
    assert_eq!(back.mode(), PenMode::Freehand);
    assert!(!back.curve_reversed());
    // The eraser does not come back on its own
    assert!(!back.eraser_active());
    assert_eq!(back.status_label(), "Draw Mode");
}

#[test]
fn test_leaving_parabola_resets_direction() {
    let reversed = ToolState::default()
        .apply(ToolAction::ToggleParabola)
        .state
        .apply(ToolAction::ToggleParabola)
        .state;
    let line = reversed.apply(ToolAction::SetMode(PenMode::Line)).state;
    let back = line.apply(ToolAction::SetMode(PenMode::Parabola)).state;
    assert!(!back.curve_reversed());
}

#[test]
fn test_lock_keeps_mode() {
    let line = ToolState::default().apply(ToolAction::SetMode(PenMode::Line)).state;
    let locked = line.apply(ToolAction::SetDrawingEnabled(false));
    assert_eq!(locked.state.mode(), PenMode::Line);
    assert!(locked.effects.contains(&UiEffect::Status("Locked")));
    assert!(locked.effects.contains(&UiEffect::Cursor(CursorKind::Default)));

    let unlocked = locked.state.apply(ToolAction::ToggleDrawing).state;
    assert_eq!(unlocked.status_label(), "Line Mode");
}

#[test]
fn test_context_broadcasts_changed_effects() {
    let (mut context, events) = recording_context();

    let effects = context.set_mode(PenMode::Line);
    assert!(effects.contains(&UiEffect::Cursor(CursorKind::Crosshair)));
    assert_eq!(
        *events.lock(),
        vec![
            OverlayEvent::StatusChanged("Line Mode"),
            OverlayEvent::CursorChanged(CursorKind::Crosshair),
            OverlayEvent::EditingChanged(EditingMode::None),
        ]
    );

    // Line -> Parabola keeps the crosshair and the editing mode
    events.lock().clear();
    context.set_mode(PenMode::Parabola);
    assert_eq!(*events.lock(), vec![OverlayEvent::StatusChanged("Parabola Mode")]);

    events.lock().clear();
    context.set_mode(PenMode::Parabola);
    assert!(events.lock().is_empty());

    context.apply(ToolAction::CycleEraser);
    assert!(events.lock().contains(&OverlayEvent::CursorChanged(CursorKind::Default)));
    assert!(events.lock().contains(&OverlayEvent::EditingChanged(EditingMode::EraseByStroke)));
}
