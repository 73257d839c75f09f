use crate::domain::movement::MovementTotals;
use crate::dto::api::MovementsResponse;
use crate::forms::movements::MovementFilterQuery;
use crate::repository::MovementReader;
use crate::services::ServiceResult;

/// Returns the filtered movements with their totals for `/api/v1/movimentos`.
pub fn list_movements<R>(repo: &R, query: &MovementFilterQuery) -> ServiceResult<MovementsResponse>
where
    R: MovementReader + ?Sized,
{
    let rows = repo
        .list_movements(&query.to_filter().to_query())
        .map_err(|err| {
            log::error!("Failed to list movements: {err}");
            err
        })?;
    let totals = MovementTotals::from_rows(&rows);

    Ok(MovementsResponse { rows, totals })
}
