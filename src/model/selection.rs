/// Default minimum drag size (display pixels) below which a gesture is
/// treated as an accidental click and discarded
pub const MIN_SELECTION_SIZE: f32 = 5.0;

/// Axis-aligned rectangle in display-space pixels, origin relative to the
/// top-left of the selection surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectionRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl SelectionRect {
    /// Derive the rectangle spanned by two corner points. The result only
    /// depends on the pair, not on which point the drag started from, and
    /// width/height are never negative.
    pub fn from_points(a: (f32, f32), b: (f32, f32)) -> Self {
        Self {
            left: a.0.min(b.0),
            top: a.1.min(b.1),
            width: (a.0 - b.0).abs(),
            height: (a.1 - b.1).abs(),
        }
    }

    /// Map into source-image pixel space with independent per-axis factors.
    pub fn scaled(&self, scale_x: f32, scale_y: f32) -> Self {
        Self {
            left: self.left * scale_x,
            top: self.top * scale_y,
            width: self.width * scale_x,
            height: self.height * scale_y,
        }
    }
}

/// Per-axis factors mapping display coordinates to source-image pixels.
///
/// Only valid once the source image has decoded and is rendered with non-zero
/// dimensions; anything else is reported as an error so the caller can fail
/// loudly instead of producing an empty crop.
pub fn scale_factors(natural: (u32, u32), client: (f32, f32)) -> Result<(f32, f32), String> {
    if natural.0 == 0 || natural.1 == 0 {
        return Err("source image reports no natural dimensions (not loaded, or blocked)".into());
    }
    if client.0 <= 0.0 || client.1 <= 0.0 {
        return Err("source image has no rendered size yet".into());
    }
    Ok((natural.0 as f32 / client.0, natural.1 as f32 / client.1))
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Phase {
    Idle,
    Dragging { start: (f32, f32) },
    Committed,
}

/// Tracks one drag gesture over a displayed image and holds the resulting
/// rectangle until it is consumed or reset.
///
/// Gesture lifecycle: Idle -> Dragging -> Committed -> Idle. A release below
/// the minimum size discards the rectangle; a new gesture, an explicit reset,
/// or a new source image discards a committed one.
#[derive(Debug, Clone)]
pub struct RegionSelector {
    phase: Phase,
    rect: Option<SelectionRect>,
    min_size: f32,
}

impl Default for RegionSelector {
    fn default() -> Self {
        Self::new(MIN_SELECTION_SIZE)
    }
}

impl RegionSelector {
    pub fn new(min_size: f32) -> Self {
        Self {
            phase: Phase::Idle,
            rect: None,
            min_size,
        }
    }

    /// Pointer-down on the selection surface. `start` is relative to the
    /// surface origin. Any previous selection is replaced by a zero-size,
    /// visible rectangle at the start point.
    pub fn begin_drag(&mut self, start: (f32, f32)) {
        self.phase = Phase::Dragging { start };
        self.rect = Some(SelectionRect::from_points(start, start));
    }

    /// Pointer-move while the button is held. Recomputes the whole rectangle
    /// from the start point and the latest position, so updates are idempotent
    /// and order-safe. Ignored outside a drag.
    pub fn drag_to(&mut self, current: (f32, f32)) {
        if let Phase::Dragging { start } = self.phase {
            self.rect = Some(SelectionRect::from_points(start, current));
        }
    }

    /// Pointer-up, wherever it lands. Returns true if the gesture committed;
    /// sub-threshold drags are treated as accidental clicks and hidden.
    pub fn end_drag(&mut self) -> bool {
        let Phase::Dragging { .. } = self.phase else {
            return false;
        };
        match self.rect {
            Some(rect) if rect.width >= self.min_size && rect.height >= self.min_size => {
                self.phase = Phase::Committed;
                true
            }
            _ => {
                self.rect = None;
                self.phase = Phase::Idle;
                false
            }
        }
    }

    /// Discard any selection and return to Idle. Also used when a new source
    /// image invalidates the old coordinates.
    pub fn reset(&mut self) {
        self.phase = Phase::Idle;
        self.rect = None;
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, Phase::Dragging { .. })
    }

    /// Rectangle to draw, whether mid-drag or committed
    pub fn visible_rect(&self) -> Option<SelectionRect> {
        self.rect
    }

    /// Finalized rectangle, available only after a successful release
    pub fn committed_rect(&self) -> Option<SelectionRect> {
        match self.phase {
            Phase::Committed => self.rect,
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_from_points_is_normalized() {
        let rect = SelectionRect::from_points((120.0, 30.0), (40.0, 90.0));
        assert_eq!(rect.left, 40.0);
        assert_eq!(rect.top, 30.0);
        assert_eq!(rect.width, 80.0);
        assert_eq!(rect.height, 60.0);
    }

    #[test]
    fn test_rect_invariant_under_point_swap() {
        let a = (7.5, 200.0);
        let b = (310.0, 12.25);
        assert_eq!(
            SelectionRect::from_points(a, b),
            SelectionRect::from_points(b, a)
        );
    }

    #[test]
    fn test_drag_recomputes_from_start() {
        let mut sel = RegionSelector::default();
        sel.begin_drag((100.0, 100.0));
        sel.drag_to((300.0, 300.0));
        // Dragging back towards the start shrinks the rect; nothing accumulates
        sel.drag_to((110.0, 120.0));
        let rect = sel.visible_rect().unwrap();
        assert_eq!(rect.left, 100.0);
        assert_eq!(rect.top, 100.0);
        assert_eq!(rect.width, 10.0);
        assert_eq!(rect.height, 20.0);
    }

    #[test]
    fn test_tiny_drag_discarded_on_release() {
        let mut sel = RegionSelector::default();
        sel.begin_drag((10.0, 10.0));
        sel.drag_to((13.0, 13.0));
        assert!(!sel.end_drag());
        assert!(sel.visible_rect().is_none());
        assert!(sel.committed_rect().is_none());
    }

    #[test]
    fn test_threshold_drag_commits() {
        let mut sel = RegionSelector::default();
        sel.begin_drag((10.0, 10.0));
        sel.drag_to((20.0, 20.0));
        assert!(sel.end_drag());
        let rect = sel.committed_rect().unwrap();
        assert_eq!((rect.width, rect.height), (10.0, 10.0));
    }

    #[test]
    fn test_new_gesture_replaces_committed_rect() {
        let mut sel = RegionSelector::default();
        sel.begin_drag((0.0, 0.0));
        sel.drag_to((50.0, 50.0));
        assert!(sel.end_drag());

        sel.begin_drag((5.0, 5.0));
        assert!(sel.committed_rect().is_none());
        let rect = sel.visible_rect().unwrap();
        assert_eq!((rect.width, rect.height), (0.0, 0.0));
    }

    #[test]
    fn test_reset_clears_selection() {
        let mut sel = RegionSelector::default();
        sel.begin_drag((0.0, 0.0));
        sel.drag_to((40.0, 40.0));
        sel.end_drag();
        sel.reset();
        assert!(sel.visible_rect().is_none());
        assert!(!sel.is_dragging());
    }

    #[test]
    fn test_release_without_drag_is_a_noop() {
        let mut sel = RegionSelector::default();
        assert!(!sel.end_drag());
        assert!(sel.visible_rect().is_none());
    }

    #[test]
    fn test_scale_factors_reference_example() {
        // 1000x500 natural displayed at 500x250 -> factors (2, 2)
        let (sx, sy) = scale_factors((1000, 500), (500.0, 250.0)).unwrap();
        let rect = SelectionRect {
            left: 100.0,
            top: 50.0,
            width: 50.0,
            height: 25.0,
        };
        let scaled = rect.scaled(sx, sy);
        assert_eq!(scaled.left, 200.0);
        assert_eq!(scaled.top, 100.0);
        assert_eq!(scaled.width, 100.0);
        assert_eq!(scaled.height, 50.0);
    }

    #[test]
    fn test_scale_factors_reject_invalid_dimensions() {
        assert!(scale_factors((0, 0), (500.0, 250.0)).is_err());
        assert!(scale_factors((1000, 500), (0.0, 250.0)).is_err());
    }
}
