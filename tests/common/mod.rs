#![allow(dead_code)]

use diesel::prelude::*;
use diesel::sql_query;
use diesel::sql_types::{Double, Integer, Nullable, Text};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use rkc_finance::db::{DbPool, establish_connection_pool};
use tempfile::TempDir;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// SQLite database in a temporary directory, migrated on creation and
/// removed on drop.
pub struct TestDb {
    _dir: TempDir,
    pool: DbPool,
}

impl TestDb {
    pub fn new(name: &str) -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join(name);
        let url = path.to_str().expect("utf-8 path").to_string();

        let pool = establish_connection_pool(&url).expect("build pool");
        let mut conn = pool.get().expect("get connection");
        conn.run_pending_migrations(MIGRATIONS)
            .expect("run migrations");

        Self { _dir: dir, pool }
    }

    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }

    pub fn seed_project(&self, name: &str, base_year: i32, line: Option<&str>) -> i32 {
        let mut conn = self.pool.get().expect("get connection");
        sql_query("INSERT INTO projetos (nome, ano_base, linha_programa) VALUES (?, ?, ?)")
            .bind::<Text, _>(name)
            .bind::<Integer, _>(base_year)
            .bind::<Nullable<Text>, _>(line)
            .execute(&mut conn)
            .expect("insert project");
        last_id(&mut conn)
    }

    pub fn seed_category(&self, name: &str) -> i32 {
        let mut conn = self.pool.get().expect("get connection");
        sql_query("INSERT INTO categorias_gasto (nome) VALUES (?)")
            .bind::<Text, _>(name)
            .execute(&mut conn)
            .expect("insert category");
        last_id(&mut conn)
    }

    pub fn seed_plan(&self, project_id: i32, category_id: i32, planned: f64) {
        let mut conn = self.pool.get().expect("get connection");
        sql_query(
            "INSERT INTO planejamento_itens (projeto_id, categoria_gasto_id, valor_planejado) \
             VALUES (?, ?, ?)",
        )
        .bind::<Integer, _>(project_id)
        .bind::<Integer, _>(category_id)
        .bind::<Double, _>(planned)
        .execute(&mut conn)
        .expect("insert plan item");
    }

    /// Inserts a movement with an explicit creation timestamp so ordering
    /// ties on the date can be asserted.
    #[allow(clippy::too_many_arguments)]
    pub fn seed_movement(
        &self,
        project_id: i32,
        kind: &str,
        date: &str,
        category_id: Option<i32>,
        description: &str,
        amount: f64,
        created_at: &str,
    ) -> i32 {
        let mut conn = self.pool.get().expect("get connection");
        sql_query(
            "INSERT INTO movimentos_financeiros \
             (projeto_id, tipo, data_movimento, categoria_gasto_id, descricao, valor_total, created_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind::<Integer, _>(project_id)
        .bind::<Text, _>(kind)
        .bind::<Text, _>(date)
        .bind::<Nullable<Integer>, _>(category_id)
        .bind::<Text, _>(description)
        .bind::<Double, _>(amount)
        .bind::<Text, _>(created_at)
        .execute(&mut conn)
        .expect("insert movement");
        last_id(&mut conn)
    }
}

#[derive(QueryableByName)]
struct LastId {
    #[diesel(sql_type = Integer)]
    id: i32,
}

fn last_id(conn: &mut SqliteConnection) -> i32 {
    sql_query("SELECT last_insert_rowid() AS id")
        .get_result::<LastId>(conn)
        .expect("read last id")
        .id
}
