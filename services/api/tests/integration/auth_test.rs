use ratewise_api::error::ApiError;
use ratewise_api::usecase::auth::{
    AuthenticateUseCase, LoginInput, LoginUseCase, RegisterInput, RegisterUseCase,
};
use ratewise_auth::token::validate_token;
use ratewise_domain::role::Role;

use crate::helpers::{TEST_JWT_SECRET, TEST_PASSWORD, TestDb};

fn register_input() -> RegisterInput {
    RegisterInput {
        name: "Alice Example Registration Name".into(),
        email: "alice@example.com".into(),
        password: TEST_PASSWORD.into(),
        address: "1 Main St".into(),
    }
}

fn register_usecase(db: &TestDb) -> RegisterUseCase<crate::helpers::MockUserRepo> {
    RegisterUseCase {
        users: db.user_repo(),
        jwt_secret: TEST_JWT_SECRET.into(),
    }
}

fn login_usecase(db: &TestDb) -> LoginUseCase<crate::helpers::MockUserRepo> {
    LoginUseCase {
        users: db.user_repo(),
        jwt_secret: TEST_JWT_SECRET.into(),
    }
}

#[tokio::test]
async fn register_then_login_returns_token_for_the_same_account() {
    let db = TestDb::new();
    let registered = register_usecase(&db).execute(register_input()).await.unwrap();
    assert_eq!(registered.user.role, Role::User);

    let logged_in = login_usecase(&db)
        .execute(LoginInput {
            email: "alice@example.com".into(),
            password: TEST_PASSWORD.into(),
        })
        .await
        .unwrap();

    let info = validate_token(&logged_in.token, TEST_JWT_SECRET).unwrap();
    assert_eq!(info.user_id, registered.user.id);
    assert_eq!(info.role, Role::User);
}

#[tokio::test]
async fn registered_password_is_stored_hashed() {
    let db = TestDb::new();
    let out = register_usecase(&db).execute(register_input()).await.unwrap();
    assert_ne!(out.user.password_hash, TEST_PASSWORD);
    assert!(out.user.password_hash.starts_with("$argon2"));
}

#[tokio::test]
async fn register_rejects_duplicate_email_with_conflict() {
    let db = TestDb::new();
    register_usecase(&db).execute(register_input()).await.unwrap();
    let err = register_usecase(&db)
        .execute(register_input())
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::EmailTaken));
}

#[tokio::test]
async fn register_enforces_name_length_bounds() {
    let db = TestDb::new();

    let short = RegisterInput {
        name: "Too Short".into(),
        ..register_input()
    };
    let err = register_usecase(&db).execute(short).await.unwrap_err();
    assert!(matches!(err, ApiError::Validation(_)));

    let long = RegisterInput {
        name: "x".repeat(61),
        ..register_input()
    };
    let err = register_usecase(&db).execute(long).await.unwrap_err();
    assert!(matches!(err, ApiError::Validation(_)));
}

#[tokio::test]
async fn register_enforces_password_policy() {
    let db = TestDb::new();
    for bad in [
        "Sh0rt!",          // under 8 chars
        "alllowercase1!",  // no uppercase
        "NoSpecials123",   // no special character
        "Waaaaaaaytoolong!!", // over 16 chars
    ] {
        let input = RegisterInput {
            password: bad.into(),
            ..register_input()
        };
        let err = register_usecase(&db).execute(input).await.unwrap_err();
        match err {
            ApiError::Validation(errors) => {
                assert!(errors.iter().any(|e| e.field == "password"), "{bad}")
            }
            other => panic!("expected Validation for {bad:?}, got {other:?}"),
        }
    }
}

#[tokio::test]
async fn login_does_not_reveal_whether_the_email_exists() {
    let db = TestDb::new();
    register_usecase(&db).execute(register_input()).await.unwrap();

    let unknown_email = login_usecase(&db)
        .execute(LoginInput {
            email: "nobody@example.com".into(),
            password: TEST_PASSWORD.into(),
        })
        .await
        .unwrap_err();
    let wrong_password = login_usecase(&db)
        .execute(LoginInput {
            email: "alice@example.com".into(),
            password: "WrongPass1!".into(),
        })
        .await
        .unwrap_err();

    assert!(matches!(unknown_email, ApiError::InvalidCredentials));
    assert!(matches!(wrong_password, ApiError::InvalidCredentials));
    assert_eq!(unknown_email.to_string(), wrong_password.to_string());
}

#[tokio::test]
async fn token_for_a_deleted_account_no_longer_authenticates() {
    let db = TestDb::new();
    let out = register_usecase(&db).execute(register_input()).await.unwrap();

    db.users.lock().unwrap().clear();

    let auth = AuthenticateUseCase {
        users: db.user_repo(),
        jwt_secret: TEST_JWT_SECRET.into(),
    };
    let err = auth.execute(&out.token).await.unwrap_err();
    assert!(matches!(err, ApiError::Unauthorized));
}
