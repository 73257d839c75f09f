use diesel::prelude::*;

use crate::domain::category::Category;
use crate::repository::errors::RepositoryResult;
use crate::repository::{CategoryReader, DieselRepository};

impl CategoryReader for DieselRepository {
    fn list_categories(&self) -> RepositoryResult<Vec<Category>> {
        use crate::models::category::Category as DbCategory;
        use crate::schema::categorias_gasto;

        let mut conn = self.conn()?;
        let rows = categorias_gasto::table
            .order(categorias_gasto::nome.asc())
            .select(DbCategory::as_select())
            .load::<DbCategory>(&mut conn)?;

        let categories = rows
            .into_iter()
            .map(Category::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(categories)
    }
}
