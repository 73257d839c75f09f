use diesel::connection::SimpleConnection;

mod common;

#[test]
fn test_creates_and_removes_db_files() {
    let test_db = common::TestDb::new("test_in_memory_connection.db");
    let conn = test_db.pool().get();
    assert!(conn.is_ok());
}

#[test]
fn test_migrations_create_reporting_views() {
    let test_db = common::TestDb::new("test_reporting_views.db");
    let mut conn = test_db.pool().get().unwrap();

    conn.batch_execute(
        "SELECT * FROM vw_resumo_projetos;
         SELECT * FROM vw_executado_por_mes;
         SELECT * FROM vw_planejado_executado_categoria;
         SELECT * FROM vw_movimentos_lista;",
    )
    .unwrap();
}
