use serde::Deserialize;

/// Content limits, counted in characters.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct Limits {
    /// **Environment variables**:
    /// - `CHIRPER_LIMITS_POST_MAX_CHARACTERS`
    pub post_max_characters: usize,

    /// **Environment variables**:
    /// - `CHIRPER_LIMITS_COMMENT_MAX_CHARACTERS`
    pub comment_max_characters: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            post_max_characters: 280,
            comment_max_characters: 500,
        }
    }
}
