use serde::Serialize;

use crate::domain::movement::{MovementRow, MovementTotals};

/// JSON body of `GET /api/v1/movimentos`.
#[derive(Debug, Serialize)]
pub struct MovementsResponse {
    pub rows: Vec<MovementRow>,
    pub totals: MovementTotals,
}
