//! Migration run behaviour.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RunConfig {
    /// Stop the run at the first failed project instead of continuing.
    #[serde(default)]
    pub fail_fast: bool,
}
