use tasks_core::{
    open_pool_in_memory, RepoError, SqliteTaskRepository, TaskRepository,
};

fn repo() -> SqliteTaskRepository {
    let pool = open_pool_in_memory().unwrap();
    SqliteTaskRepository::try_new(pool).unwrap()
}

#[test]
fn create_then_list_roundtrip() {
    let repo = repo();

    let id = repo.create_task("X", false).unwrap();
    let tasks = repo.list_tasks().unwrap();

    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].id, id);
    assert_eq!(tasks[0].title, "X");
    assert!(!tasks[0].completed);
    assert!(!tasks[0].created_at.is_empty());
}

#[test]
fn created_at_is_reported_as_rfc3339_utc() {
    let pool = open_pool_in_memory().unwrap();
    let repo = SqliteTaskRepository::try_new(pool.clone()).unwrap();

    let id = repo.create_task("stamped", false).unwrap();
    pool.get()
        .unwrap()
        .execute(
            "UPDATE tasks SET created_at = '2024-06-01 12:34:56' WHERE id = ?1;",
            [id],
        )
        .unwrap();

    let tasks = repo.list_tasks().unwrap();
    assert_eq!(tasks[0].created_at, "2024-06-01T12:34:56Z");
}

#[test]
fn fresh_created_at_has_rfc3339_shape() {
    let repo = repo();
    repo.create_task("now", false).unwrap();

    let created_at = repo.list_tasks().unwrap().remove(0).created_at;
    assert_eq!(created_at.len(), "2024-06-01T12:34:56Z".len());
    assert_eq!(&created_at[10..11], "T");
    assert!(created_at.ends_with('Z'));
}

#[test]
fn list_skips_rows_with_unparseable_timestamp() {
    let pool = open_pool_in_memory().unwrap();
    let repo = SqliteTaskRepository::try_new(pool.clone()).unwrap();

    repo.create_task("good", false).unwrap();
    pool.get()
        .unwrap()
        .execute(
            "INSERT INTO tasks (title, completed, created_at) VALUES ('bad', 0, 'yesterday');",
            [],
        )
        .unwrap();

    let tasks = repo.list_tasks().unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].title, "good");
}

#[test]
fn completed_flag_is_persisted() {
    let repo = repo();

    let id = repo.create_task("done already", true).unwrap();
    let tasks = repo.list_tasks().unwrap();

    assert_eq!(tasks[0].id, id);
    assert!(tasks[0].completed);
}

#[test]
fn first_id_in_fresh_store_is_one() {
    let repo = repo();
    assert_eq!(repo.create_task("Buy Groceries", false).unwrap(), 1);
}

#[test]
fn create_returns_strictly_increasing_ids() {
    let repo = repo();

    let ids = (0..5)
        .map(|index| repo.create_task(&format!("task {index}"), index % 2 == 0).unwrap())
        .collect::<Vec<_>>();

    assert!(ids.windows(2).all(|pair| pair[0] < pair[1]));
}

#[test]
fn ids_are_not_reused_after_delete() {
    let repo = repo();

    let first = repo.create_task("first", false).unwrap();
    let second = repo.create_task("second", false).unwrap();
    repo.delete_task(second).unwrap();

    let third = repo.create_task("third", false).unwrap();
    assert!(third > second);
    assert!(third > first);
}

#[test]
fn empty_title_is_accepted() {
    let repo = repo();

    let id = repo.create_task("", false).unwrap();
    let tasks = repo.list_tasks().unwrap();
    assert_eq!(tasks[0].id, id);
    assert_eq!(tasks[0].title, "");
}

#[test]
fn list_on_empty_store_returns_empty_vec() {
    let repo = repo();
    assert!(repo.list_tasks().unwrap().is_empty());
}

#[test]
fn list_orders_newest_first() {
    let pool = open_pool_in_memory().unwrap();
    let repo = SqliteTaskRepository::try_new(pool.clone()).unwrap();

    let old = repo.create_task("old", false).unwrap();
    let new = repo.create_task("new", false).unwrap();
    let tie = repo.create_task("tie", false).unwrap();

    // Pin timestamps so ordering does not depend on wall-clock resolution.
    let conn = pool.get().unwrap();
    conn.execute(
        "UPDATE tasks SET created_at = '2024-01-01 00:00:00' WHERE id = ?1;",
        [old],
    )
    .unwrap();
    conn.execute(
        "UPDATE tasks SET created_at = '2024-06-01 00:00:00' WHERE id IN (?1, ?2);",
        [new, tie],
    )
    .unwrap();
    drop(conn);

    let ids = repo
        .list_tasks()
        .unwrap()
        .into_iter()
        .map(|task| task.id)
        .collect::<Vec<_>>();
    assert_eq!(ids, vec![tie, new, old]);
}

#[test]
fn list_skips_rows_that_fail_to_decode() {
    let pool = open_pool_in_memory().unwrap();
    let repo = SqliteTaskRepository::try_new(pool.clone()).unwrap();

    repo.create_task("good one", false).unwrap();
    pool.get()
        .unwrap()
        .execute(
            "INSERT INTO tasks (title, completed) VALUES ('broken', 'not-a-bool');",
            [],
        )
        .unwrap();
    repo.create_task("good two", true).unwrap();

    let titles = repo
        .list_tasks()
        .unwrap()
        .into_iter()
        .map(|task| task.title)
        .collect::<Vec<_>>();

    assert_eq!(titles.len(), 2);
    assert!(titles.contains(&"good one".to_string()));
    assert!(titles.contains(&"good two".to_string()));
}

#[test]
fn delete_removes_only_matching_row() {
    let repo = repo();

    let keep = repo.create_task("keep", false).unwrap();
    let drop_id = repo.create_task("drop", false).unwrap();
    repo.delete_task(drop_id).unwrap();

    let tasks = repo.list_tasks().unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].id, keep);
}

#[test]
fn delete_missing_id_is_not_an_error() {
    let repo = repo();
    repo.create_task("survivor", false).unwrap();

    repo.delete_task(999).unwrap();
    repo.delete_task(-1).unwrap();

    assert_eq!(repo.list_tasks().unwrap().len(), 1);
}

#[test]
fn operations_on_missing_table_report_read_and_write_errors() {
    let pool = open_pool_in_memory().unwrap();
    let repo = SqliteTaskRepository::new(pool);

    let read_err = repo.list_tasks().unwrap_err();
    assert!(matches!(read_err, RepoError::StorageRead(_)));

    let write_err = repo.create_task("orphan", false).unwrap_err();
    assert!(matches!(write_err, RepoError::StorageWrite(_)));

    let delete_err = repo.delete_task(1).unwrap_err();
    assert!(matches!(delete_err, RepoError::StorageWrite(_)));
}

#[test]
fn init_schema_is_idempotent() {
    let repo = repo();
    repo.create_task("before", false).unwrap();

    repo.init_schema().unwrap();
    repo.init_schema().unwrap();

    assert_eq!(repo.list_tasks().unwrap().len(), 1);
}
