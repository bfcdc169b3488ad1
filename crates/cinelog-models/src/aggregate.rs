use serde::{Deserialize, Serialize};

/// Count and mean rating over the current review set of one movie.
///
/// Derived on read; never persisted.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct AggregateRating {
    pub count: usize,
    pub mean: f64, // 0.0 when count is 0
}

impl AggregateRating {
    /// Mean with one decimal place, or "N/A" when there is nothing to average.
    pub fn display_mean(&self) -> String {
        if self.mean > 0.0 {
            format!("{:.1}", self.mean)
        } else {
            "N/A".to_string()
        }
    }

    /// Mean rounded to whole stars for a star bar.
    pub fn rounded_stars(&self) -> u8 {
        self.mean.round().clamp(0.0, 5.0) as u8
    }

    /// "1 review" / "N reviews".
    pub fn count_label(&self) -> String {
        if self.count == 1 {
            "1 review".to_string()
        } else {
            format!("{} reviews", self.count)
        }
    }
}
