//! Divider geometry for the before/after comparison control.
//!
//! Pointer coordinates arrive in viewport space; [`Bounds`] is the
//! control's bounding box along the active [`Axis`]. The offset is a
//! percentage of that extent and is always clamped to `[0, 100]`,
//! whatever the pointer does.

/// Offset of a freshly mounted control.
pub const DEFAULT_OFFSET: f64 = 50.0;

/// Offset change for one arrow-key press.
pub const KEYBOARD_STEP: f64 = 5.0;

/// Direction the divider travels in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Axis {
    /// Vertical divider moved left and right.
    #[default]
    Horizontal,
    /// Horizontal divider moved up and down.
    Vertical,
}

/// How the after-image is cut at the divider.
///
/// Both give a hard edge at the offset with the after-image fully
/// visible on the leading side and hidden on the trailing side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RevealStrategy {
    /// Clip the full-size after layer with an inset rectangle.
    #[default]
    Clip,
    /// Shrink the after layer's container to the offset.
    Width,
}

/// The control's position and size along one axis, in viewport pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    /// Left (or top) edge.
    pub start: f64,
    /// Width (or height).
    pub extent: f64,
}

impl Bounds {
    /// Bounds from an edge and a length.
    #[must_use]
    pub const fn new(start: f64, extent: f64) -> Self {
        Self { start, extent }
    }
}

/// Percentage of `bounds` at which `position` falls, clamped.
///
/// Returns `None` when the bounds have no usable extent or the
/// position is not a finite number.
#[must_use]
pub fn offset_for(position: f64, bounds: Bounds) -> Option<f64> {
    if !position.is_finite() || !bounds.start.is_finite() || !bounds.extent.is_finite() {
        return None;
    }
    if bounds.extent <= 0.0 {
        return None;
    }
    let percent = (position - bounds.start) / bounds.extent * 100.0;
    Some(percent.clamp(0.0, 100.0))
}

/// Divider position and drag tracking.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComparisonState {
    offset_percent: f64,
    is_dragging: bool,
}

impl Default for ComparisonState {
    fn default() -> Self {
        Self {
            offset_percent: DEFAULT_OFFSET,
            is_dragging: false,
        }
    }
}

impl ComparisonState {
    /// A resting divider at [`DEFAULT_OFFSET`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current divider position in `[0, 100]`.
    #[must_use]
    pub const fn offset_percent(&self) -> f64 {
        self.offset_percent
    }

    /// Whether a press-and-move gesture is in progress.
    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        self.is_dragging
    }

    /// Pointer pressed inside the control: start dragging and jump the
    /// divider to the press position.
    pub fn press(&mut self, position: f64, bounds: Bounds) {
        self.is_dragging = true;
        if let Some(offset) = offset_for(position, bounds) {
            self.offset_percent = offset;
        }
    }

    /// Pointer moved anywhere in the window. Only has an effect while
    /// dragging. Returns whether the offset changed.
    pub fn drag_to(&mut self, position: f64, bounds: Bounds) -> bool {
        if !self.is_dragging {
            return false;
        }
        match offset_for(position, bounds) {
            Some(offset) if (offset - self.offset_percent).abs() > f64::EPSILON => {
                self.offset_percent = offset;
                true
            }
            _ => false,
        }
    }

    /// Pointer released anywhere: stop dragging, keep the offset.
    pub const fn release(&mut self) {
        self.is_dragging = false;
    }

    /// Move the divider by `delta` points, clamped.
    pub fn nudge(&mut self, delta: f64) {
        if delta.is_finite() {
            self.offset_percent = (self.offset_percent + delta).clamp(0.0, 100.0);
        }
    }

    /// Place the divider at `percent`, clamped.
    pub fn set_offset(&mut self, percent: f64) {
        if percent.is_finite() {
            self.offset_percent = percent.clamp(0.0, 100.0);
        }
    }
}

impl RevealStrategy {
    /// Inline style for the after-image layer at `offset` percent.
    #[must_use]
    pub fn after_layer_style(self, offset: f64, axis: Axis) -> String {
        let offset = offset.clamp(0.0, 100.0);
        let hidden = 100.0 - offset;
        match (self, axis) {
            (Self::Clip, Axis::Horizontal) => {
                format!("clip-path: inset(0 {hidden:.3}% 0 0);")
            }
            (Self::Clip, Axis::Vertical) => {
                format!("clip-path: inset(0 0 {hidden:.3}% 0);")
            }
            (Self::Width, Axis::Horizontal) => {
                format!("width: {offset:.3}%; overflow: hidden;")
            }
            (Self::Width, Axis::Vertical) => {
                format!("height: {offset:.3}%; overflow: hidden;")
            }
        }
    }
}

/// Inline style placing the divider handle at `offset` percent.
#[must_use]
pub fn divider_style(offset: f64, axis: Axis) -> String {
    let offset = offset.clamp(0.0, 100.0);
    match axis {
        Axis::Horizontal => format!("left: {offset:.3}%;"),
        Axis::Vertical => format!("top: {offset:.3}%;"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOX: Bounds = Bounds::new(100.0, 400.0);

    #[test]
    fn mounts_at_midpoint() {
        let state = ComparisonState::new();
        assert!((state.offset_percent() - 50.0).abs() < f64::EPSILON);
        assert!(!state.is_dragging());
    }

    #[test]
    fn offset_is_relative_to_bounds() {
        assert_eq!(offset_for(100.0, BOX), Some(0.0));
        assert_eq!(offset_for(300.0, BOX), Some(50.0));
        assert_eq!(offset_for(500.0, BOX), Some(100.0));
    }

    #[test]
    fn far_outside_pointer_is_clamped() {
        assert_eq!(offset_for(-500.0, BOX), Some(0.0));
        assert_eq!(offset_for(10_000.0, BOX), Some(100.0));
        assert_eq!(offset_for(f64::MAX, BOX), Some(100.0));
        assert_eq!(offset_for(f64::MIN, BOX), Some(0.0));
    }

    #[test]
    fn degenerate_input_is_rejected() {
        assert_eq!(offset_for(10.0, Bounds::new(0.0, 0.0)), None);
        assert_eq!(offset_for(10.0, Bounds::new(0.0, -5.0)), None);
        assert_eq!(offset_for(f64::NAN, BOX), None);
        assert_eq!(offset_for(f64::INFINITY, BOX), None);
        assert_eq!(offset_for(10.0, Bounds::new(0.0, f64::NAN)), None);
    }

    #[test]
    fn click_without_drag_moves_divider() {
        let mut state = ComparisonState::new();
        state.press(200.0, BOX);
        state.release();
        assert!((state.offset_percent() - 25.0).abs() < 1e-9);
        assert!(!state.is_dragging());
    }

    #[test]
    fn moves_are_ignored_unless_dragging() {
        let mut state = ComparisonState::new();
        assert!(!state.drag_to(100.0, BOX));
        assert!((state.offset_percent() - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn drag_tracks_pointer_beyond_bounds_and_stops_on_release() {
        let mut state = ComparisonState::new();
        state.press(300.0, BOX);
        assert!(state.drag_to(-500.0, BOX));
        assert!(state.offset_percent().abs() < f64::EPSILON);
        assert!(state.drag_to(10_000.0, BOX));
        assert!((state.offset_percent() - 100.0).abs() < f64::EPSILON);
        assert!(!state.drag_to(20_000.0, BOX), "already at 100");

        state.release();
        assert!(!state.drag_to(300.0, BOX));
        assert!((state.offset_percent() - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn press_on_degenerate_bounds_keeps_offset() {
        let mut state = ComparisonState::new();
        state.press(10.0, Bounds::new(0.0, 0.0));
        assert!(state.is_dragging());
        assert!((state.offset_percent() - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn offset_stays_in_range_for_any_pointer() {
        let mut state = ComparisonState::new();
        state.press(0.0, BOX);
        let mut x = -5_000.0;
        while x < 5_000.0 {
            state.drag_to(x, BOX);
            let offset = state.offset_percent();
            assert!((0.0..=100.0).contains(&offset), "x={x} offset={offset}");
            x += 37.5;
        }
    }

    #[test]
    fn nudge_and_set_clamp() {
        let mut state = ComparisonState::new();
        state.nudge(KEYBOARD_STEP);
        assert!((state.offset_percent() - 55.0).abs() < f64::EPSILON);
        state.nudge(1_000.0);
        assert!((state.offset_percent() - 100.0).abs() < f64::EPSILON);
        state.set_offset(-3.0);
        assert!(state.offset_percent().abs() < f64::EPSILON);
        state.set_offset(f64::NAN);
        assert!(state.offset_percent().abs() < f64::EPSILON);
    }

    #[test]
    fn reveal_styles() {
        assert_eq!(
            RevealStrategy::Clip.after_layer_style(25.0, Axis::Horizontal),
            "clip-path: inset(0 75.000% 0 0);"
        );
        assert_eq!(
            RevealStrategy::Clip.after_layer_style(25.0, Axis::Vertical),
            "clip-path: inset(0 0 75.000% 0);"
        );
        assert_eq!(
            RevealStrategy::Width.after_layer_style(140.0, Axis::Horizontal),
            "width: 100.000%; overflow: hidden;"
        );
        assert_eq!(
            RevealStrategy::Width.after_layer_style(40.0, Axis::Vertical),
            "height: 40.000%; overflow: hidden;"
        );
        assert_eq!(divider_style(12.5, Axis::Horizontal), "left: 12.500%;");
        assert_eq!(divider_style(-1.0, Axis::Vertical), "top: 0.000%;");
    }
}
