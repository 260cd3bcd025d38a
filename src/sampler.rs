const FALLBACK_VIEWPORT_WIDTH: f64 = 1280.0;
const FALLBACK_VIEWPORT_HEIGHT: f64 = 720.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportSize {
    pub width: f64,
    pub height: f64,
}

impl Default for ViewportSize {
    fn default() -> Self {
        Self {
            width: FALLBACK_VIEWPORT_WIDTH,
            height: FALLBACK_VIEWPORT_HEIGHT,
        }
    }
}

impl ViewportSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Half extents used as mapping domains. Zero or invalid dimensions count
    /// as one pixel so a map can always be built.
    pub fn half_extents(&self) -> (f64, f64) {
        (usable(self.width) / 2.0, usable(self.height) / 2.0)
    }

    pub fn center(&self) -> (f64, f64) {
        (self.width / 2.0, self.height / 2.0)
    }
}

fn usable(extent: f64) -> f64 {
    if extent.is_finite() && extent > 0.0 {
        extent
    } else {
        1.0
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ElementRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerOffset {
    pub x: f64,
    pub y: f64,
}

impl PointerOffset {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub fn from_viewport_center(viewport: ViewportSize, client_x: f64, client_y: f64) -> Self {
        let (center_x, center_y) = viewport.center();
        Self {
            x: client_x - center_x,
            y: client_y - center_y,
        }
    }

    /// Offset from the element center divided by its half extents, so the
    /// element edges sit at `±1`.
    pub fn relative_to(rect: ElementRect, client_x: f64, client_y: f64) -> Self {
        if rect.width <= 0.0 || rect.height <= 0.0 {
            return Self::ZERO;
        }

        let half_width = rect.width / 2.0;
        let half_height = rect.height / 2.0;
        Self {
            x: (client_x - (rect.left + half_width)) / half_width,
            y: (client_y - (rect.top + half_height)) / half_height,
        }
    }
}

/// Latest pointer position relative to the viewport center.
///
/// Raw events only overwrite a pending sample; [`PointerSampler::commit`]
/// applies it, so any number of events between two frames costs one update.
#[derive(Clone, Debug)]
pub struct PointerSampler {
    viewport: ViewportSize,
    latest: PointerOffset,
    pending: Option<(f64, f64)>,
    last_client: Option<(f64, f64)>,
}

impl PointerSampler {
    pub fn new(viewport: ViewportSize) -> Self {
        Self {
            viewport,
            latest: PointerOffset::ZERO,
            pending: None,
            last_client: None,
        }
    }

    pub fn record(&mut self, client_x: f64, client_y: f64) {
        if client_x.is_finite() && client_y.is_finite() {
            self.pending = Some((client_x, client_y));
        }
    }

    pub fn commit(&mut self) -> Option<PointerOffset> {
        let (client_x, client_y) = self.pending.take()?;
        self.last_client = Some((client_x, client_y));
        self.update(PointerOffset::from_viewport_center(
            self.viewport,
            client_x,
            client_y,
        ))
    }

    pub fn resize(&mut self, viewport: ViewportSize) -> Option<PointerOffset> {
        self.viewport = viewport;
        let (client_x, client_y) = self.last_client?;
        self.update(PointerOffset::from_viewport_center(
            viewport, client_x, client_y,
        ))
    }

    /// Pointer left the window: back to the neutral offset.
    pub fn reset(&mut self) -> Option<PointerOffset> {
        self.pending = None;
        self.last_client = None;
        self.update(PointerOffset::ZERO)
    }

    pub fn latest(&self) -> PointerOffset {
        self.latest
    }

    pub fn viewport(&self) -> ViewportSize {
        self.viewport
    }

    fn update(&mut self, next: PointerOffset) -> Option<PointerOffset> {
        if next == self.latest {
            return None;
        }
        self.latest = next;
        Some(next)
    }
}

pub fn scroll_progress(offset: f64, document_height: f64, viewport_height: f64) -> f64 {
    let scrollable = document_height - viewport_height;
    if !scrollable.is_finite() || scrollable <= 0.0 || !offset.is_finite() {
        return 0.0;
    }
    (offset / scrollable).clamp(0.0, 1.0)
}

#[derive(Clone, Debug)]
pub struct ScrollSampler {
    offset: f64,
    document_height: f64,
    viewport_height: f64,
    progress: f64,
    pending: Option<(f64, f64)>,
}

impl ScrollSampler {
    pub fn new(viewport_height: f64) -> Self {
        Self {
            offset: 0.0,
            document_height: viewport_height,
            viewport_height,
            progress: 0.0,
            pending: None,
        }
    }

    pub fn record(&mut self, offset: f64, document_height: f64) {
        self.pending = Some((offset, document_height));
    }

    /// Applies the pending sample. Returns `true` when offset or progress
    /// changed.
    pub fn commit(&mut self) -> bool {
        let Some((offset, document_height)) = self.pending.take() else {
            return false;
        };

        let offset = if offset.is_finite() { offset.max(0.0) } else { 0.0 };
        let changed = offset != self.offset || document_height != self.document_height;
        self.offset = offset;
        self.document_height = document_height;
        self.recompute() || changed
    }

    pub fn resize(&mut self, viewport_height: f64) -> bool {
        self.viewport_height = viewport_height;
        self.recompute()
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    fn recompute(&mut self) -> bool {
        let next = scroll_progress(self.offset, self.document_height, self.viewport_height);
        let changed = next != self.progress;
        self.progress = next;
        changed
    }
}
