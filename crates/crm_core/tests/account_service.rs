use crm_core::{
    require_admin, AccountService, AccountServiceError, MemStorage, ModelValidationError,
    NewUser, PublicUser, Storage, UserPatch, UserRole,
};

fn login_admin(store: &mut MemStorage) -> PublicUser {
    AccountService::new(store)
        .login("admin", "admin123")
        .unwrap()
}

fn sales_rep() -> NewUser {
    NewUser::new("rep", "pw", "Sales Rep", UserRole::Standard)
}

#[test]
fn login_accepts_seeded_admin_and_hides_password() {
    let mut store = MemStorage::seeded();
    let admin = login_admin(&mut store);

    assert_eq!(admin.id, 1);
    assert_eq!(admin.role, UserRole::Admin);
    let json = serde_json::to_value(&admin).unwrap();
    assert!(json.get("password").is_none());
    assert_eq!(json["fullName"], "Admin User");
}

#[test]
fn login_rejects_unknown_user_and_wrong_password() {
    let mut store = MemStorage::seeded();
    let service = AccountService::new(&mut store);

    assert_eq!(
        service.login("admin", "wrong"),
        Err(AccountServiceError::InvalidCredentials)
    );
    assert_eq!(
        service.login("nobody", "admin123"),
        Err(AccountServiceError::InvalidCredentials)
    );

    let blank = ModelValidationError::BlankField("username");
    assert_eq!(
        service.login(" ", "x"),
        Err(AccountServiceError::Validation(blank))
    );
}

#[test]
fn create_user_requires_admin_and_unique_username() {
    let mut store = MemStorage::seeded();
    let admin = login_admin(&mut store);
    let mut service = AccountService::new(&mut store);

    let rep = service.create_user(&admin, sales_rep()).unwrap();
    assert_eq!(rep.id, 2);

    let other = NewUser::new("other", "pw", "Other", UserRole::Standard);
    let err = service.create_user(&rep, other).unwrap_err();
    assert_eq!(err, AccountServiceError::Forbidden);

    let err = service.create_user(&admin, sales_rep()).unwrap_err();
    assert_eq!(err, AccountServiceError::UsernameTaken("rep".to_string()));

    let no_password = NewUser::new("blank", "", "No Password", UserRole::Standard);
    let err = service.create_user(&admin, no_password).unwrap_err();
    assert!(matches!(err, AccountServiceError::Validation(_)));
    assert_eq!(service.list_users().len(), 2);
}

#[test]
fn update_user_drops_blank_fields_and_checks_rename_collisions() {
    let mut store = MemStorage::seeded();
    let admin = login_admin(&mut store);
    let mut service = AccountService::new(&mut store);
    let rep = service.create_user(&admin, sales_rep()).unwrap();

    let renamed_to_self = service
        .update_user(
            &admin,
            rep.id,
            UserPatch {
                username: Some("rep".to_string()),
                full_name: Some(String::new()),
                role: Some(UserRole::Admin),
                ..UserPatch::default()
            },
        )
        .unwrap();
    assert_eq!(renamed_to_self.full_name, "Sales Rep");
    assert_eq!(renamed_to_self.role, UserRole::Admin);

    let collision = service.update_user(
        &admin,
        rep.id,
        UserPatch {
            username: Some("admin".to_string()),
            ..UserPatch::default()
        },
    );
    assert_eq!(
        collision,
        Err(AccountServiceError::UsernameTaken("admin".to_string()))
    );

    assert_eq!(
        service.update_user(&admin, 99, UserPatch::default()),
        Err(AccountServiceError::UserNotFound(99))
    );
}

#[test]
fn password_change_takes_effect_on_next_login() {
    let mut store = MemStorage::seeded();
    let admin = login_admin(&mut store);
    let mut service = AccountService::new(&mut store);

    service
        .update_user(
            &admin,
            admin.id,
            UserPatch {
                password: Some("n3w".to_string()),
                ..UserPatch::default()
            },
        )
        .unwrap();

    assert!(service.login("admin", "admin123").is_err());
    assert_eq!(service.login("admin", "n3w").unwrap().id, admin.id);
    assert_eq!(store.get_user(admin.id).unwrap().password, "n3w");
}

#[test]
fn delete_user_refuses_self_and_reports_missing() {
    let mut store = MemStorage::seeded();
    let admin = login_admin(&mut store);
    let mut service = AccountService::new(&mut store);
    let rep = service.create_user(&admin, sales_rep()).unwrap();

    assert_eq!(
        service.delete_user(&admin, admin.id),
        Err(AccountServiceError::CannotDeleteSelf)
    );
    assert_eq!(
        service.delete_user(&rep, admin.id),
        Err(AccountServiceError::Forbidden)
    );
    assert_eq!(service.delete_user(&admin, rep.id), Ok(()));
    assert_eq!(
        service.delete_user(&admin, rep.id),
        Err(AccountServiceError::UserNotFound(rep.id))
    );
    assert_eq!(
        service.get_user(rep.id),
        Err(AccountServiceError::UserNotFound(rep.id))
    );
}

#[test]
fn require_admin_checks_role_only() {
    let standard = PublicUser {
        id: 1,
        username: "admin".to_string(),
        full_name: "Not Really".to_string(),
        role: UserRole::Standard,
    };
    assert_eq!(
        require_admin(&standard),
        Err(AccountServiceError::Forbidden)
    );
}
