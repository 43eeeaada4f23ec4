use ratewise_api::access::{ANY_ROLE, authorize};
use ratewise_api::error::ApiError;
use ratewise_domain::role::Role;

use crate::helpers::test_user;

#[test]
fn every_route_class_enforces_its_exact_allow_set() {
    let cases: &[(&[Role], &[(Role, bool)])] = &[
        // admin-only routes
        (
            &[Role::Admin],
            &[
                (Role::User, false),
                (Role::StoreOwner, false),
                (Role::Admin, true),
            ],
        ),
        // store_owner-only routes
        (
            &[Role::StoreOwner],
            &[
                (Role::User, false),
                (Role::StoreOwner, true),
                (Role::Admin, false),
            ],
        ),
        // any authenticated account
        (
            ANY_ROLE,
            &[
                (Role::User, true),
                (Role::StoreOwner, true),
                (Role::Admin, true),
            ],
        ),
    ];

    for (allowed, expectations) in cases {
        for (role, expected) in *expectations {
            let result = authorize(&test_user(*role), allowed);
            assert_eq!(
                result.is_ok(),
                *expected,
                "role {role} against allow-set {allowed:?}"
            );
        }
    }
}

#[test]
fn admin_is_rejected_from_store_owner_only_routes() {
    let err = authorize(&test_user(Role::Admin), &[Role::StoreOwner]).unwrap_err();
    match err {
        ApiError::Forbidden { role, required } => {
            assert_eq!(role, Role::Admin);
            assert_eq!(required, "store_owner");
        }
        other => panic!("expected Forbidden, got {other:?}"),
    }
}

#[test]
fn forbidden_message_lists_the_required_roles() {
    let err = authorize(&test_user(Role::StoreOwner), &[Role::User, Role::Admin]).unwrap_err();
    assert_eq!(
        err.to_string(),
        "role store_owner is not authorized to access this route; required roles: user, admin"
    );
}
