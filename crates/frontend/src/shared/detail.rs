/// Result of a detail lookup. A missing id is a view state, not an error.
#[derive(Debug, Clone, PartialEq)]
pub enum DetailState<T> {
    Found(T),
    NotFound(String),
}

impl<T> DetailState<T> {
    pub fn found(&self) -> Option<&T> {
        match self {
            DetailState::Found(value) => Some(value),
            DetailState::NotFound(_) => None,
        }
    }
}
