//! Last observed natural size of the attached element.

use log::trace;

use crate::host::{Host, Size, StyleElement};
use crate::ids::Axis;

/// Natural size cache. Both axes are `None` until an element is attached;
/// callers must read that as "not yet measurable", never as zero.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SizeObserver {
    width: Option<f64>,
    height: Option<f64>,
}

impl SizeObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin observing `element` and take a first measurement.
    pub fn attach<H: Host>(&mut self, host: &mut H, element: &H::Element) {
        host.observe(element);
        self.measure(element);
    }

    /// Stop observing `element` and forget its size.
    pub fn detach<H: Host>(&mut self, host: &mut H, element: &H::Element) {
        host.unobserve(element);
        self.width = None;
        self.height = None;
    }

    /// Re-read the natural size. Returns true only if it changed.
    pub fn measure<E: StyleElement>(&mut self, element: &E) -> bool {
        let Size { width, height } = element.natural_size();
        let changed = self.width != Some(width) || self.height != Some(height);
        if changed {
            trace!("natural size {width}x{height}");
            self.width = Some(width);
            self.height = Some(height);
        }
        changed
    }

    pub fn get(&self, axis: Axis) -> Option<f64> {
        match axis {
            Axis::Width => self.width,
            Axis::Height => self.height,
        }
    }

    pub fn size(&self) -> Option<Size> {
        Some(Size::new(self.width?, self.height?))
    }
}
