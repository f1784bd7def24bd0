//! Plugin options
//!
//! The synthesis core has no tunables yet. `Options` still exists so hosts
//! and config files have a stable place to pass settings; unknown keys are
//! accepted and ignored.

use serde::{Deserialize, Serialize};

/// Options accepted by a scan session
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Options {}
