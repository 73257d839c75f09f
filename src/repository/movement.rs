use diesel::prelude::*;

use crate::domain::movement::{MovementRow, NewMovement, UpdateMovement};
use crate::db::fold_case;
use crate::domain::types::{MovementId, fold_text};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DieselRepository, MovementListQuery, MovementReader, MovementWriter};

/// Builds a `LIKE` pattern matching `term` anywhere, with wildcards in the
/// term itself escaped by `\`.
fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for ch in term.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

impl MovementReader for DieselRepository {
    fn list_movements(&self, query: &MovementListQuery) -> RepositoryResult<Vec<MovementRow>> {
        use crate::models::movement::MovementRow as DbMovementRow;
        use crate::schema::vw_movimentos_lista as lista;

        let mut conn = self.conn()?;
        let mut items = lista::table.into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(project_id) = query.project_id {
            items = items.filter(lista::projeto_id.eq(project_id.get()));
        }
        if let Some(kind) = query.kind {
            items = items.filter(lista::tipo.eq(kind.as_str()));
        }
        if let Some(month) = query.month {
            items = items
                .filter(lista::data_movimento.ge(month.first_day()))
                .filter(lista::data_movimento.lt(month.next_month_first_day()));
        }
        if let Some(term) = &query.search {
            // Both sides folded so accented letters match in any case.
            let pattern = contains_pattern(&fold_text(term));
            items = items.filter(fold_case(lista::descricao).like(pattern).escape('\\'));
        }

        let rows = items
            .order((lista::data_movimento.desc(), lista::created_at.desc()))
            .limit(query.limit)
            .select(DbMovementRow::as_select())
            .load::<DbMovementRow>(&mut conn)?;

        let rows = rows
            .into_iter()
            .map(MovementRow::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    fn get_movement_by_id(&self, id: MovementId) -> RepositoryResult<Option<MovementRow>> {
        use crate::models::movement::MovementRow as DbMovementRow;
        use crate::schema::vw_movimentos_lista as lista;

        let mut conn = self.conn()?;
        let row = lista::table
            .filter(lista::id.eq(id.get()))
            .select(DbMovementRow::as_select())
            .first::<DbMovementRow>(&mut conn)
            .optional()?;

        Ok(row.map(MovementRow::try_from).transpose()?)
    }
}

impl MovementWriter for DieselRepository {
    fn create_movement(&self, movement: &NewMovement) -> RepositoryResult<MovementId> {
        use crate::models::movement::NewMovement as DbNewMovement;
        use crate::schema::movimentos_financeiros;

        let mut conn = self.conn()?;
        let insertable: DbNewMovement = movement.into();

        let id = diesel::insert_into(movimentos_financeiros::table)
            .values(&insertable)
            .returning(movimentos_financeiros::id)
            .get_result::<i32>(&mut conn)?;

        Ok(MovementId::try_from(id)?)
    }

    fn update_movement(&self, id: MovementId, updates: &UpdateMovement) -> RepositoryResult<()> {
        use crate::models::movement::UpdateMovement as DbUpdateMovement;
        use crate::schema::movimentos_financeiros;

        let mut conn = self.conn()?;
        let changes: DbUpdateMovement = updates.into();

        let affected = diesel::update(movimentos_financeiros::table.find(id.get()))
            .set(&changes)
            .execute(&mut conn)?;

        if affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
