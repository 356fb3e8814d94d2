/// A search hit: the recipe's position in its collection and its relevance.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    pub position: usize,
    pub relevance: f64,
}

impl SearchResult {
    pub(crate) fn new(position: usize) -> Self {
        Self {
            position,
            relevance: 0.0,
        }
    }

    pub(crate) fn add_score(&mut self, points: f64) {
        self.relevance += points;
    }
}
