//! End-to-end genre flows through the controller
//!
//! Runs against an in-memory SQLite database, plus a store that fails on
//! demand for the error-propagation cases.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use catalog_core::catalog::view::{ViewData, GENRE_DELETE_TEMPLATE, GENRE_FORM_TEMPLATE};
use catalog_core::storage::models::{genre_url, Book, Genre, GenreId, NewGenre, GENRE_LIST_URL};
use catalog_core::storage::{queries, NewBook};
use catalog_core::{CatalogError, CatalogStore, Database, GenreController, GenreForm, Result};

async fn setup() -> GenreController<Database> {
    let db = Database::new_in_memory()
        .await
        .expect("Failed to create in-memory database");
    GenreController::new(Arc::new(db))
}

async fn genre_names(genres: &GenreController<Database>) -> Vec<String> {
    let outcome = genres.list().await.unwrap();
    match &outcome.view().expect("list renders").data {
        ViewData::GenreList { genre_list } => genre_list.iter().map(|g| g.name.clone()).collect(),
        other => panic!("unexpected view data: {:?}", other),
    }
}

/// Fantasy (referenced by one book) and Drama (unreferenced)
async fn example_catalog(genres: &GenreController<Database>) -> (Genre, Genre) {
    let pool = genres.store().pool();
    let fantasy = queries::insert_genre(pool, &NewGenre::new("Fantasy")).await.unwrap();
    let drama = queries::insert_genre(pool, &NewGenre::new("Drama")).await.unwrap();
    queries::insert_book(pool, &NewBook::new("The Hobbit").in_genre(fantasy.id))
        .await
        .unwrap();
    (fantasy, drama)
}

#[tokio::test]
async fn test_example_catalog_walkthrough() {
    let genres = setup().await;
    let (fantasy, drama) = example_catalog(&genres).await;

    assert_eq!(genre_names(&genres).await, vec!["Drama", "Fantasy"]);

    // Referenced genre is kept and the blocking books are shown
    let blocked = genres.delete_post(fantasy.id).await.unwrap();
    let view = blocked.view().expect("blocked delete renders");
    assert_eq!(view.template, GENRE_DELETE_TEMPLATE);
    match &view.data {
        ViewData::GenreDelete { genre, genre_books } => {
            assert_eq!(genre.id, fantasy.id);
            assert_eq!(genre_books.len(), 1);
            assert_eq!(genre_books[0].title, "The Hobbit");
        }
        other => panic!("unexpected view data: {:?}", other),
    }
    assert!(genres.store().find_genre_by_id(fantasy.id).await.unwrap().is_some());

    // Unreferenced genre is removed
    let removed = genres.delete_post(drama.id).await.unwrap();
    assert_eq!(removed.location(), Some(GENRE_LIST_URL));
    assert!(genres.store().find_genre_by_id(drama.id).await.unwrap().is_none());
    assert_eq!(genre_names(&genres).await, vec!["Fantasy"]);
}

#[tokio::test]
async fn test_create_new_name_inserts_exactly_one() {
    let genres = setup().await;

    for name in ["Poetry", "Horror", "Travel"] {
        let outcome = genres.create_post(GenreForm::new(name)).await.unwrap();

        let stored = genres.store().find_genre_by_name(name).await.unwrap().unwrap();
        assert_eq!(outcome.location(), Some(genre_url(stored.id).as_str()));
    }

    assert_eq!(genre_names(&genres).await, vec!["Horror", "Poetry", "Travel"]);
}

#[tokio::test]
async fn test_create_existing_name_redirects_without_insert() {
    let genres = setup().await;
    let (fantasy, _) = example_catalog(&genres).await;

    // Surrounding whitespace is trimmed before the lookup
    let outcome = genres.create_post(GenreForm::new("  Fantasy ")).await.unwrap();

    assert_eq!(outcome.location(), Some(genre_url(fantasy.id).as_str()));
    assert_eq!(genre_names(&genres).await, vec!["Drama", "Fantasy"]);
}

#[tokio::test]
async fn test_create_name_match_is_case_sensitive() {
    let genres = setup().await;
    example_catalog(&genres).await;

    genres.create_post(GenreForm::new("fantasy")).await.unwrap();

    assert_eq!(genre_names(&genres).await, vec!["Drama", "Fantasy", "fantasy"]);
}

#[tokio::test]
async fn test_create_blank_name_rerenders_form() {
    let genres = setup().await;

    for blank in ["", "   ", "\t\n"] {
        let outcome = genres.create_post(GenreForm::new(blank)).await.unwrap();
        let view = outcome.view().expect("blank name renders the form");

        assert_eq!(view.template, GENRE_FORM_TEMPLATE);
        assert_eq!(view.title, "Create Genre");
        match &view.data {
            ViewData::GenreForm { genre, errors } => {
                assert_eq!(genre.as_ref().map(|g| g.name.as_str()), Some(""));
                assert_eq!(errors.len(), 1);
                assert_eq!(errors[0].message, "Genre name required");
            }
            other => panic!("unexpected view data: {:?}", other),
        }
    }

    assert!(genre_names(&genres).await.is_empty());
}

#[tokio::test]
async fn test_delete_get_shows_confirmation() {
    let genres = setup().await;
    let (_, drama) = example_catalog(&genres).await;

    let outcome = genres.delete_get(drama.id).await.unwrap();
    let view = outcome.view().expect("confirmation renders");

    assert_eq!(view.title, "Delete Genre");
    match &view.data {
        ViewData::GenreDelete { genre, genre_books } => {
            assert_eq!(genre.name, "Drama");
            assert_eq!(genre.url, genre_url(drama.id));
            assert!(genre_books.is_empty());
        }
        other => panic!("unexpected view data: {:?}", other),
    }

    // Viewing the confirmation deletes nothing
    assert!(genres.store().find_genre_by_id(drama.id).await.unwrap().is_some());
}

#[tokio::test]
async fn test_update_changes_only_the_name() {
    let genres = setup().await;
    let (fantasy, drama) = example_catalog(&genres).await;

    let outcome = genres
        .update_post(drama.id, GenreForm::new("Tragedy"))
        .await
        .unwrap();
    assert_eq!(outcome.location(), Some(genre_url(drama.id).as_str()));

    let updated = genres.store().find_genre_by_id(drama.id).await.unwrap().unwrap();
    assert_eq!(updated, Genre { id: drama.id, name: "Tragedy".to_string() });

    let untouched = genres.store().find_genre_by_id(fantasy.id).await.unwrap().unwrap();
    assert_eq!(untouched, fantasy);
}

#[tokio::test]
async fn test_update_may_duplicate_another_name() {
    let genres = setup().await;
    let (fantasy, drama) = example_catalog(&genres).await;

    genres
        .update_post(drama.id, GenreForm::new("Fantasy"))
        .await
        .unwrap();

    assert_eq!(genre_names(&genres).await, vec!["Fantasy", "Fantasy"]);
    assert_ne!(fantasy.id, drama.id);
}

#[tokio::test]
async fn test_invalid_update_shows_stored_name() {
    let genres = setup().await;
    let (_, drama) = example_catalog(&genres).await;

    let outcome = genres.update_post(drama.id, GenreForm::new("  ")).await.unwrap();
    let view = outcome.view().expect("invalid update renders the form");

    assert_eq!(view.title, "Update Genre");
    match &view.data {
        ViewData::GenreForm { genre, errors } => {
            let genre = genre.as_ref().expect("stored genre shown");
            assert_eq!(genre.id, Some(drama.id));
            assert_eq!(genre.name, "Drama");
            assert_eq!(errors[0].message, "Name must not be empty");
        }
        other => panic!("unexpected view data: {:?}", other),
    }

    let stored = genres.store().find_genre_by_id(drama.id).await.unwrap().unwrap();
    assert_eq!(stored.name, "Drama");
}

#[tokio::test]
async fn test_detail_lists_books_and_rejects_missing_ids() {
    let genres = setup().await;
    let (fantasy, drama) = example_catalog(&genres).await;

    let outcome = genres.detail(fantasy.id).await.unwrap();
    match &outcome.view().expect("detail renders").data {
        ViewData::GenreDetail { genre, genre_books } => {
            assert_eq!(genre.name, "Fantasy");
            assert_eq!(genre_books.len(), 1);
        }
        other => panic!("unexpected view data: {:?}", other),
    }

    let missing = drama.id + 100;
    for id in [missing, -1, 0] {
        let err = genres.detail(id).await.unwrap_err();
        assert!(matches!(err, CatalogError::GenreNotFound(got) if got == id));
    }
}

// ============================================================================
// STORE FAILURES
// ============================================================================

/// Wraps a real database and fails chosen calls
struct FlakyStore {
    inner: Database,
    fail_books: AtomicBool,
    fail_insert: AtomicBool,
}

impl FlakyStore {
    async fn new() -> Self {
        Self {
            inner: Database::new_in_memory().await.unwrap(),
            fail_books: AtomicBool::new(false),
            fail_insert: AtomicBool::new(false),
        }
    }
}

fn store_down() -> CatalogError {
    CatalogError::DatabaseError("store unavailable".to_string())
}

#[async_trait]
impl CatalogStore for FlakyStore {
    async fn list_genres(&self) -> Result<Vec<Genre>> {
        self.inner.list_genres().await
    }

    async fn find_genre_by_id(&self, id: GenreId) -> Result<Option<Genre>> {
        self.inner.find_genre_by_id(id).await
    }

    async fn find_genre_by_name(&self, name: &str) -> Result<Option<Genre>> {
        self.inner.find_genre_by_name(name).await
    }

    async fn insert_genre(&self, genre: &NewGenre) -> Result<Genre> {
        if self.fail_insert.load(Ordering::SeqCst) {
            return Err(store_down());
        }
        self.inner.insert_genre(genre).await
    }

    async fn update_genre_name(&self, id: GenreId, name: &str) -> Result<Option<Genre>> {
        self.inner.update_genre_name(id, name).await
    }

    async fn delete_genre(&self, id: GenreId) -> Result<bool> {
        self.inner.delete_genre(id).await
    }

    async fn find_books_by_genre(&self, id: GenreId) -> Result<Vec<Book>> {
        if self.fail_books.load(Ordering::SeqCst) {
            return Err(store_down());
        }
        self.inner.find_books_by_genre(id).await
    }
}

#[tokio::test]
async fn test_fanout_failure_aborts_delete() {
    let store = Arc::new(FlakyStore::new().await);
    let genre = queries::insert_genre(store.inner.pool(), &NewGenre::new("Drama"))
        .await
        .unwrap();
    let genres = GenreController::new(Arc::clone(&store));

    store.fail_books.store(true, Ordering::SeqCst);

    let err = genres.delete_post(genre.id).await.unwrap_err();
    assert!(err.is_store_error());
    assert!(genres.detail(genre.id).await.unwrap_err().is_store_error());

    // Nothing was deleted even though the genre itself was found
    assert!(store.inner.find_genre_by_id(genre.id).await.unwrap().is_some());
}

#[tokio::test]
async fn test_failed_insert_leaves_no_record() {
    let store = Arc::new(FlakyStore::new().await);
    let genres = GenreController::new(Arc::clone(&store));

    store.fail_insert.store(true, Ordering::SeqCst);
    let err = genres.create_post(GenreForm::new("Noir")).await.unwrap_err();
    assert_eq!(err.status_code(), 500);
    assert!(store.inner.find_genre_by_name("Noir").await.unwrap().is_none());

    store.fail_insert.store(false, Ordering::SeqCst);
    let outcome = genres.create_post(GenreForm::new("Noir")).await.unwrap();
    let stored = store.inner.find_genre_by_name("Noir").await.unwrap().unwrap();
    assert_eq!(outcome.location(), Some(genre_url(stored.id).as_str()));
}
