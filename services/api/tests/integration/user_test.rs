use uuid::Uuid;

use ratewise_api::domain::types::UserFilter;
use ratewise_api::error::ApiError;
use ratewise_api::usecase::rating::SubmitRatingUseCase;
use ratewise_api::usecase::user::{
    ChangePasswordInput, ChangePasswordUseCase, CreateUserInput, CreateUserUseCase,
    DeleteUserUseCase, GetUserUseCase, ListUsersUseCase, UpdateProfileInput,
    UpdateProfileUseCase,
};
use ratewise_auth::password::verify_password;
use ratewise_domain::role::Role;

use crate::helpers::{TEST_PASSWORD, TestDb, test_store, test_user};

fn create_input(role: Role) -> CreateUserInput {
    CreateUserInput {
        name: "Bob".into(),
        email: "bob@example.com".into(),
        password: TEST_PASSWORD.into(),
        address: None,
        role,
    }
}

#[tokio::test]
async fn admin_can_create_accounts_with_any_role_and_short_names() {
    let db = TestDb::new();
    let usecase = CreateUserUseCase {
        users: db.user_repo(),
    };

    // 3-char name passes the 2-60 admin rule that registration would reject
    let owner = usecase.execute(create_input(Role::StoreOwner)).await.unwrap();
    assert_eq!(owner.role, Role::StoreOwner);
    assert_eq!(owner.name, "Bob");
}

#[tokio::test]
async fn admin_create_rejects_one_char_names() {
    let db = TestDb::new();
    let usecase = CreateUserUseCase {
        users: db.user_repo(),
    };
    let err = usecase
        .execute(CreateUserInput {
            name: "B".into(),
            ..create_input(Role::User)
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Validation(_)));
}

#[tokio::test]
async fn list_users_filters_by_role_and_name() {
    let db = TestDb::new();
    let owner = db.insert_user(test_user(Role::StoreOwner));
    db.insert_user(test_user(Role::User));
    db.insert_user(test_user(Role::Admin));

    let usecase = ListUsersUseCase {
        users: db.user_repo(),
    };

    let owners = usecase
        .execute(&UserFilter {
            role: Some(Role::StoreOwner),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(owners.len(), 1);
    assert_eq!(owners[0].id, owner.id);

    let none = usecase
        .execute(&UserFilter {
            name: Some("no such person".into()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert!(none.is_empty());
}

#[tokio::test]
async fn store_owner_detail_carries_their_store_and_aggregate() {
    let db = TestDb::new();
    let owner = db.insert_user(test_user(Role::StoreOwner));
    let store = db.insert_store(test_store("Owned Outlet", Some(owner.id)));
    let rater = db.insert_user(test_user(Role::User));
    SubmitRatingUseCase {
        ratings: db.rating_repo(),
        stores: db.store_repo(),
    }
    .execute(rater.id, store.id, 5)
    .await
    .unwrap();

    let usecase = GetUserUseCase {
        users: db.user_repo(),
        stores: db.store_repo(),
        ratings: db.rating_repo(),
    };

    let (_, info) = usecase.execute(owner.id).await.unwrap();
    let info = info.unwrap();
    assert_eq!(info.store.id, store.id);
    assert_eq!(info.aggregate.average, Some(5.0));

    // plain users never carry store info
    let (_, info) = usecase.execute(rater.id).await.unwrap();
    assert!(info.is_none());
}

#[tokio::test]
async fn profile_update_changes_name_and_address_but_not_email() {
    let db = TestDb::new();
    let user = db.insert_user(test_user(Role::User));
    let original_email = user.email.clone();

    let updated = UpdateProfileUseCase {
        users: db.user_repo(),
    }
    .execute(
        user.id,
        UpdateProfileInput {
            name: "An Updated Display Name".into(),
            address: Some("9 New Street".into()),
        },
    )
    .await
    .unwrap();

    assert_eq!(updated.name, "An Updated Display Name");
    assert_eq!(updated.address.as_deref(), Some("9 New Street"));
    assert_eq!(updated.email, original_email);
}

#[tokio::test]
async fn change_password_requires_the_current_password() {
    let db = TestDb::new();
    let user = db.insert_user(test_user(Role::User));

    let usecase = ChangePasswordUseCase {
        users: db.user_repo(),
    };

    let err = usecase
        .execute(
            &user,
            ChangePasswordInput {
                current_password: "WrongPass1!".into(),
                new_password: "NewSecret1!".into(),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::InvalidCredentials));

    usecase
        .execute(
            &user,
            ChangePasswordInput {
                current_password: TEST_PASSWORD.into(),
                new_password: "NewSecret1!".into(),
            },
        )
        .await
        .unwrap();

    let stored = db.users.lock().unwrap()[0].password_hash.clone();
    assert!(verify_password("NewSecret1!", &stored).unwrap());
    assert!(!verify_password(TEST_PASSWORD, &stored).unwrap());
}

#[tokio::test]
async fn change_password_validates_the_new_password() {
    let db = TestDb::new();
    let user = db.insert_user(test_user(Role::User));

    let err = ChangePasswordUseCase {
        users: db.user_repo(),
    }
    .execute(
        &user,
        ChangePasswordInput {
            current_password: TEST_PASSWORD.into(),
            new_password: "weak".into(),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, ApiError::Validation(_)));
}

#[tokio::test]
async fn deleting_a_user_cascades_their_ratings() {
    let db = TestDb::new();
    let user = db.insert_user(test_user(Role::User));
    let store = db.insert_store(test_store("Some Store", None));
    SubmitRatingUseCase {
        ratings: db.rating_repo(),
        stores: db.store_repo(),
    }
    .execute(user.id, store.id, 3)
    .await
    .unwrap();

    DeleteUserUseCase {
        users: db.user_repo(),
    }
    .execute(user.id)
    .await
    .unwrap();

    assert!(db.users.lock().unwrap().is_empty());
    assert!(db.ratings.lock().unwrap().is_empty());
}

#[tokio::test]
async fn admin_accounts_cannot_be_deleted() {
    let db = TestDb::new();
    let admin = db.insert_user(test_user(Role::Admin));

    let err = DeleteUserUseCase {
        users: db.user_repo(),
    }
    .execute(admin.id)
    .await
    .unwrap_err();
    assert!(matches!(err, ApiError::AdminProtected));
    assert_eq!(db.users.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn deleting_an_unknown_user_is_not_found() {
    let db = TestDb::new();
    let err = DeleteUserUseCase {
        users: db.user_repo(),
    }
    .execute(Uuid::now_v7())
    .await
    .unwrap_err();
    assert!(matches!(err, ApiError::UserNotFound));
}
