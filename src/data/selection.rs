use super::bins::{Bucket, BUCKET_COUNT};

/// Label value shown for the upper end of the unbounded bucket.
pub const OPEN_RANGE_CAP: f64 = 10.0;

// ---------------------------------------------------------------------------
// SelectionState – which bucket the slider points at
// ---------------------------------------------------------------------------

/// Slider position plus the "show all" toggle.
///
/// Every transition wraps modulo [`BUCKET_COUNT`], so the arrow buttons
/// cycle endlessly through the buckets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectionState {
    index: usize,
    pub show_all: bool,
}

impl SelectionState {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn next(&mut self) {
        self.index = (self.index + 1) % BUCKET_COUNT;
    }

    pub fn previous(&mut self) {
        self.index = (self.index + BUCKET_COUNT - 1) % BUCKET_COUNT;
    }

    /// Raw slider value; the widget already clamps it, the modulo is a backstop.
    pub fn set_from_slider(&mut self, value: usize) {
        self.index = value % BUCKET_COUNT;
    }

    pub fn set_show_all(&mut self, show_all: bool) {
        self.show_all = show_all;
    }
}

/// `"Magnitude Range: {min} - {max}"`, with the open upper end shown as 10.
pub fn range_label(bucket: &Bucket) -> String {
    let max = if bucket.is_unbounded() {
        OPEN_RANGE_CAP
    } else {
        bucket.max
    };
    format!("Magnitude Range: {} - {}", bucket.min, max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seven_steps_forward_reach_the_last_bucket_then_wrap() {
        let mut sel = SelectionState::default();
        for _ in 0..7 {
            sel.next();
        }
        assert_eq!(sel.index(), 7);
        sel.next();
        assert_eq!(sel.index(), 0);
    }

    #[test]
    fn previous_from_zero_wraps_to_seven() {
        let mut sel = SelectionState::default();
        sel.previous();
        assert_eq!(sel.index(), 7);
        sel.previous();
        assert_eq!(sel.index(), 6);
    }

    #[test]
    fn slider_values_wrap() {
        let mut sel = SelectionState::default();
        sel.set_from_slider(5);
        assert_eq!(sel.index(), 5);
        sel.set_from_slider(9);
        assert_eq!(sel.index(), 1);
    }

    #[test]
    fn label_caps_open_bucket_at_ten() {
        let open = Bucket {
            min: 4.5,
            max: f64::INFINITY,
            members: vec![4.5],
        };
        assert_eq!(range_label(&open), "Magnitude Range: 4.5 - 10");

        let closed = Bucket {
            min: 1.0,
            max: 2.25,
            members: vec![],
        };
        assert_eq!(range_label(&closed), "Magnitude Range: 1 - 2.25");
    }
}
