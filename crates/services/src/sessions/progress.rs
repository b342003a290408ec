use quiz_core::model::percentage;

/// Aggregated view of session progress, useful for UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionProgress {
    pub total: usize,
    pub answered: usize,
    pub remaining: usize,
    pub score: usize,
    pub is_complete: bool,
}

impl SessionProgress {
    /// Share of questions answered so far, as a whole percent for a progress bar.
    #[must_use]
    pub fn percent_complete(&self) -> u8 {
        let answered = u32::try_from(self.answered).unwrap_or(u32::MAX);
        let total = u32::try_from(self.total).unwrap_or(u32::MAX);
        percentage(answered, total)
    }
}
