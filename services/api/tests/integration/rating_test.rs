use uuid::Uuid;

use ratewise_api::error::ApiError;
use ratewise_api::usecase::rating::{
    ListUserRatingsUseCase, RatingStatsUseCase, SubmitRatingUseCase, UpdateRatingUseCase,
};
use ratewise_api::usecase::store::GetStoreUseCase;
use ratewise_domain::role::Role;

use crate::helpers::{TestDb, test_store, test_user};

fn submit(db: &TestDb) -> SubmitRatingUseCase<crate::helpers::MockRatingRepo, crate::helpers::MockStoreRepo> {
    SubmitRatingUseCase {
        ratings: db.rating_repo(),
        stores: db.store_repo(),
    }
}

fn update(db: &TestDb) -> UpdateRatingUseCase<crate::helpers::MockRatingRepo, crate::helpers::MockStoreRepo> {
    UpdateRatingUseCase {
        ratings: db.rating_repo(),
        stores: db.store_repo(),
    }
}

#[tokio::test]
async fn a_pair_can_rate_once_and_resubmission_conflicts() {
    let db = TestDb::new();
    let user = db.insert_user(test_user(Role::User));
    let store = db.insert_store(test_store("Rated Store", None));

    submit(&db).execute(user.id, store.id, 4).await.unwrap();
    let err = submit(&db).execute(user.id, store.id, 5).await.unwrap_err();
    assert!(matches!(err, ApiError::AlreadyRated));
    assert_eq!(db.ratings.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn resubmitting_via_update_keeps_one_row_with_the_new_value() {
    let db = TestDb::new();
    let user = db.insert_user(test_user(Role::User));
    let store = db.insert_store(test_store("Rated Store", None));

    submit(&db).execute(user.id, store.id, 4).await.unwrap();
    update(&db).execute(user.id, store.id, 5).await.unwrap();

    let detail = GetStoreUseCase {
        stores: db.store_repo(),
        ratings: db.rating_repo(),
        users: db.user_repo(),
    }
    .execute(store.id, Some(user.id))
    .await
    .unwrap();
    assert_eq!(detail.aggregate.average, Some(5.0));
    assert_eq!(detail.aggregate.count, 1);
    assert_eq!(detail.user_rating, Some(5));
}

#[tokio::test]
async fn update_without_an_existing_rating_never_inserts() {
    let db = TestDb::new();
    let user = db.insert_user(test_user(Role::User));
    let store = db.insert_store(test_store("Unrated Store", None));

    let err = update(&db).execute(user.id, store.id, 5).await.unwrap_err();
    assert!(matches!(err, ApiError::RatingNotFound));
    assert!(db.ratings.lock().unwrap().is_empty());
}

#[tokio::test]
async fn rating_an_unknown_store_is_not_found() {
    let db = TestDb::new();
    let user = db.insert_user(test_user(Role::User));
    let err = submit(&db)
        .execute(user.id, Uuid::now_v7(), 3)
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::StoreNotFound));
}

#[tokio::test]
async fn out_of_range_values_fail_validation() {
    let db = TestDb::new();
    let user = db.insert_user(test_user(Role::User));
    let store = db.insert_store(test_store("Strict Store", None));

    for bad in [0u8, 6] {
        let err = submit(&db).execute(user.id, store.id, bad).await.unwrap_err();
        match err {
            ApiError::Validation(errors) => assert_eq!(errors[0].field, "rating"),
            other => panic!("expected Validation, got {other:?}"),
        }
    }
}

#[tokio::test]
async fn my_ratings_lists_the_callers_rows_with_store_summary() {
    let db = TestDb::new();
    let user = db.insert_user(test_user(Role::User));
    let other = db.insert_user(test_user(Role::User));
    let bakery = db.insert_store(test_store("Beacon Bakery", None));
    let cafe = db.insert_store(test_store("Corner Cafe", None));

    submit(&db).execute(user.id, bakery.id, 4).await.unwrap();
    submit(&db).execute(user.id, cafe.id, 2).await.unwrap();
    submit(&db).execute(other.id, bakery.id, 1).await.unwrap();

    let mine = ListUserRatingsUseCase {
        ratings: db.rating_repo(),
    }
    .execute(user.id)
    .await
    .unwrap();
    assert_eq!(mine.len(), 2);
    assert!(mine.iter().all(|r| !r.store_name.is_empty()));
}

#[tokio::test]
async fn stats_report_distribution_and_per_store_aggregates() {
    let db = TestDb::new();
    let bakery = db.insert_store(test_store("Beacon Bakery", None));
    let cafe = db.insert_store(test_store("Corner Cafe", None));

    for value in [5u8, 5, 3] {
        let rater = db.insert_user(test_user(Role::User));
        submit(&db).execute(rater.id, bakery.id, value).await.unwrap();
    }

    let stats = RatingStatsUseCase {
        ratings: db.rating_repo(),
        stores: db.store_repo(),
    }
    .execute()
    .await
    .unwrap();

    assert_eq!(stats.total, 3);
    assert_eq!(stats.distribution, [0, 0, 1, 0, 2]);

    let bakery_stats = stats
        .store_ratings
        .iter()
        .find(|s| s.store_id == bakery.id)
        .unwrap();
    // (5 + 5 + 3) / 3 = 4.333... -> 4.3
    assert_eq!(bakery_stats.average, Some(4.3));
    assert_eq!(bakery_stats.count, 3);

    let cafe_stats = stats
        .store_ratings
        .iter()
        .find(|s| s.store_id == cafe.id)
        .unwrap();
    assert_eq!(cafe_stats.average, None);
    assert_eq!(cafe_stats.count, 0);
}
