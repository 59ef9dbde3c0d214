/// Maximum number of journeys returned by a single request.
pub const PAGE_SIZE: i32 = 3000;

/// A window of journeys: ids strictly greater than `after`, ascending, at
/// most `limit` of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JourneyPage {
    pub after: i32,
    pub limit: i32,
}

impl JourneyPage {
    /// Computes the page starting after `after`, given the highest stored
    /// journey id. Returns `None` if there is nothing left after `after`.
    pub fn new(after: i32, last_id: i32) -> Option<Self> {
        if after >= last_id {
            return None;
        }
        Some(Self {
            after,
            limit: PAGE_SIZE.min(last_id - after),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_page_from_start() {
        assert_eq!(
            JourneyPage::new(0, 3_126_264),
            Some(JourneyPage {
                after: 0,
                limit: PAGE_SIZE
            })
        );
    }

    #[test]
    fn last_page_is_capped_by_remaining_ids() {
        assert_eq!(
            JourneyPage::new(3_126_000, 3_126_264),
            Some(JourneyPage {
                after: 3_126_000,
                limit: 264
            })
        );
    }

    #[test]
    fn start_at_or_beyond_last_id_is_rejected() {
        assert_eq!(JourneyPage::new(3_126_264, 3_126_264), None);
        assert_eq!(JourneyPage::new(3_126_265, 3_126_264), None);
        assert_eq!(JourneyPage::new(0, 0), None);
    }
}
