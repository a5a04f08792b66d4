#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// `id` is rendered as text so both numeric ids and uuids fit.
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl CoreError {
    /// Shorthand for [`CoreError::NotFound`] with any displayable id.
    pub fn not_found(entity: &'static str, id: impl std::fmt::Display) -> Self {
        CoreError::NotFound {
            entity,
            id: id.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_display_includes_entity_and_id() {
        let err = CoreError::not_found("Content", 42);
        assert_eq!(err.to_string(), "Entity not found: Content with id 42");
    }

    #[test]
    fn conflict_display() {
        let err = CoreError::Conflict("stale version".into());
        assert_eq!(err.to_string(), "Conflict: stale version");
    }
}
