use crate::models::RecommendationRecord;

/// Ordered, fixed list of recommendations with a forward-only cursor
#[derive(Debug, Clone, Default)]
pub struct Deck {
    items: Vec<RecommendationRecord>,
    cursor: usize,
}

impl Deck {
    pub fn new(items: Vec<RecommendationRecord>) -> Self {
        Self { items, cursor: 0 }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_exhausted(&self) -> bool {
        self.cursor >= self.items.len()
    }

    pub fn current(&self) -> Option<&RecommendationRecord> {
        self.items.get(self.cursor)
    }

    /// The card rendered underneath the current one
    pub fn next(&self) -> Option<&RecommendationRecord> {
        self.items.get(self.cursor + 1)
    }

    /// Moves the cursor forward by exactly one. No-op once exhausted.
    pub fn advance(&mut self) {
        if !self.is_exhausted() {
            self.cursor += 1;
        }
    }
}
