//! Loading and saving the library, and the files shipped with the server

use axum::http::StatusCode;
use config::{Config, File};
use serde_json::json;
use tempfile::TempDir;

use bat_server::{
    api,
    config::{AppConfig, PolicyConfig},
    models::enums::{ItemCategory, PatronCategory},
    repository::{store::JsonStore, Repository},
    AppState,
};

use crate::common::{fixture_library, post};

fn store_in(dir: &TempDir) -> JsonStore {
    JsonStore::new(
        dir.path().join("data/catalogue.json"),
        dir.path().join("data/patrons.json"),
    )
}

#[tokio::test]
async fn test_session_changes_survive_restart() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    store.save(&fixture_library()).unwrap();

    let repository = Repository::new(store.load().unwrap());
    let app = api::create_router(AppState::new(AppConfig::default(), repository.clone()));
    let (status, _) = post(&app, "/api/v1/loans", json!({ "patron_id": 4, "item_id": 2 })).await;
    assert_eq!(status, StatusCode::CREATED);
    store.save(&repository.lock().unwrap()).unwrap();

    let reloaded = store.load().unwrap();
    assert_eq!(reloaded.items.get_by_id(2).unwrap().on_loan, 1);
    let zoe = reloaded.patrons.get_by_id(4).unwrap();
    assert_eq!(zoe.loans.len(), 1);
    assert_eq!(zoe.loans[0].item_name, "Spade");
}

#[test]
fn test_first_start_without_data_files() {
    let dir = TempDir::new().unwrap();

    let library = store_in(&dir).load().unwrap();

    assert!(library.items.is_empty());
    assert!(library.patrons.is_empty());
}

#[test]
fn test_inconsistent_data_is_refused() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    std::fs::create_dir_all(dir.path().join("data")).unwrap();
    std::fs::write(
        dir.path().join("data/catalogue.json"),
        r#"[{ "id": 1, "name": "Dune", "category": "book", "copies": 1, "on_loan": 2 }]"#,
    )
    .unwrap();

    assert!(store.load().is_err());
}

#[test]
fn test_loans_must_match_copies_on_loan() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    std::fs::create_dir_all(dir.path().join("data")).unwrap();
    std::fs::write(
        dir.path().join("data/catalogue.json"),
        r#"[{ "id": 1, "name": "Dune", "category": "book", "copies": 1, "on_loan": 0 }]"#,
    )
    .unwrap();
    std::fs::write(
        dir.path().join("data/patrons.json"),
        r#"[
            { "id": 1, "name": "Ada", "age": 30, "loans": [
                { "item_id": 1, "item_name": "Dune", "category": "book",
                  "start_date": "2024-09-01", "due_date": "2024-09-15" }
            ] },
            { "id": 2, "name": "Bob", "age": 40 }
        ]"#,
    )
    .unwrap();

    assert!(store.load().is_err());
}

#[test]
fn test_bundled_sample_data_loads() {
    let library = JsonStore::new("data/catalogue.json", "data/patrons.json")
        .load()
        .unwrap();

    assert_eq!(library.items.len(), 8);
    assert_eq!(library.patrons.len(), 3);
    assert_eq!(library.items.get_by_id(7).unwrap().category, ItemCategory::MakerspaceTool);
}

#[test]
fn test_default_config_file_matches_built_in_policy() {
    let config: AppConfig = Config::builder()
        .add_source(File::with_name("config/default"))
        .build()
        .and_then(|c| c.try_deserialize())
        .unwrap();
    let file = &config.policy;
    let built_in = PolicyConfig::default();

    assert_eq!(file.minor_age_limit, built_in.minor_age_limit);
    assert_eq!(file.elderly_age, built_in.elderly_age);
    assert_eq!(file.max_loans, built_in.max_loans);
    assert_eq!(file.fee_per_day, built_in.fee_per_day);
    assert_eq!(file.makerspace_min_age, built_in.makerspace_min_age);
    for item in ItemCategory::ALL {
        assert_eq!(file.minimum_age_for(item), built_in.minimum_age_for(item));
        for patron in [PatronCategory::Minor, PatronCategory::Regular, PatronCategory::Elderly] {
            assert_eq!(file.category_cap(patron, item), built_in.category_cap(patron, item));
            assert_eq!(
                file.loan_period_days(patron, item),
                built_in.loan_period_days(patron, item)
            );
        }
    }
    assert!(file.validate().is_ok());
}
