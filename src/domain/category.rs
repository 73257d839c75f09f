use serde::{Deserialize, Serialize};

use crate::domain::types::CategoryId;

/// Spending category used to classify outflows.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}
