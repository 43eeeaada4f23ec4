use ratewise_api::usecase::dashboard::{
    AdminDashboardUseCase, OwnerDashboardUseCase, UserDashboardUseCase,
};
use ratewise_api::usecase::rating::SubmitRatingUseCase;
use ratewise_domain::role::Role;

use crate::helpers::{TestDb, test_store, test_user};

/// One owner with two stores of different sizes: store A rated [5] once,
/// store B rated [1, 1, 1]. Flat mean is 2.0; the owner's two-level mean is
/// 3.0. The three dashboards must disagree exactly this way.
async fn seed_asymmetric(db: &TestDb) -> uuid::Uuid {
    let owner = db.insert_user(test_user(Role::StoreOwner));
    let a = db.insert_store(test_store("Store A", Some(owner.id)));
    let b = db.insert_store(test_store("Store B", Some(owner.id)));

    let submit = SubmitRatingUseCase {
        ratings: db.rating_repo(),
        stores: db.store_repo(),
    };
    let rater = db.insert_user(test_user(Role::User));
    submit.execute(rater.id, a.id, 5).await.unwrap();
    for _ in 0..3 {
        let rater = db.insert_user(test_user(Role::User));
        submit.execute(rater.id, b.id, 1).await.unwrap();
    }
    owner.id
}

#[tokio::test]
async fn owner_dashboard_averages_per_store_averages() {
    let db = TestDb::new();
    let owner_id = seed_asymmetric(&db).await;

    let dashboard = OwnerDashboardUseCase {
        stores: db.store_repo(),
        ratings: db.rating_repo(),
    }
    .execute(owner_id)
    .await
    .unwrap();

    assert_eq!(dashboard.store_count, 2);
    assert_eq!(dashboard.total_ratings, 4);
    // (5.0 + 1.0) / 2, not (5 + 1 + 1 + 1) / 4
    assert_eq!(dashboard.average_rating, 3.0);
}

#[tokio::test]
async fn user_and_admin_dashboards_use_the_flat_mean_over_the_same_rows() {
    let db = TestDb::new();
    seed_asymmetric(&db).await;
    let observer = db.insert_user(test_user(Role::User));
    db.insert_user(test_user(Role::Admin));

    let user_dash = UserDashboardUseCase {
        stores: db.store_repo(),
        ratings: db.rating_repo(),
    }
    .execute(observer.id)
    .await
    .unwrap();
    // (5 + 1 + 1 + 1) / 4
    assert_eq!(user_dash.average_rating, 2.0);
    assert_eq!(user_dash.total_stores, 2);
    // only the caller's own ratings, and the observer has none
    assert_eq!(user_dash.total_ratings, 0);

    let admin_dash = AdminDashboardUseCase {
        users: db.user_repo(),
        stores: db.store_repo(),
        ratings: db.rating_repo(),
    }
    .execute()
    .await
    .unwrap();
    assert_eq!(admin_dash.average_rating, 2.0);
    assert_eq!(admin_dash.total_ratings, 4);
    assert_eq!(admin_dash.total_stores, 2);
    // 1 owner + 4 raters + observer + admin
    assert_eq!(admin_dash.total_users, 7);
    assert_eq!(admin_dash.users_by_role.store_owner, 1);
    assert_eq!(admin_dash.users_by_role.admin, 1);
    assert_eq!(admin_dash.users_by_role.user, 5);
}

#[tokio::test]
async fn owner_dashboard_counts_an_unrated_store_as_zero() {
    let db = TestDb::new();
    let owner = db.insert_user(test_user(Role::StoreOwner));
    let rated = db.insert_store(test_store("Rated", Some(owner.id)));
    db.insert_store(test_store("Unrated", Some(owner.id)));

    let rater = db.insert_user(test_user(Role::User));
    SubmitRatingUseCase {
        ratings: db.rating_repo(),
        stores: db.store_repo(),
    }
    .execute(rater.id, rated.id, 4)
    .await
    .unwrap();

    let dashboard = OwnerDashboardUseCase {
        stores: db.store_repo(),
        ratings: db.rating_repo(),
    }
    .execute(owner.id)
    .await
    .unwrap();
    // (4.0 + 0) / 2
    assert_eq!(dashboard.average_rating, 2.0);
}

#[tokio::test]
async fn dashboards_are_zero_valued_on_an_empty_system() {
    let db = TestDb::new();
    let user = db.insert_user(test_user(Role::User));

    let user_dash = UserDashboardUseCase {
        stores: db.store_repo(),
        ratings: db.rating_repo(),
    }
    .execute(user.id)
    .await
    .unwrap();
    assert_eq!(user_dash.total_stores, 0);
    assert_eq!(user_dash.average_rating, 0.0);

    let owner_dash = OwnerDashboardUseCase {
        stores: db.store_repo(),
        ratings: db.rating_repo(),
    }
    .execute(user.id)
    .await
    .unwrap();
    assert_eq!(owner_dash.store_count, 0);
    assert_eq!(owner_dash.average_rating, 0.0);
}
