use chrono::{TimeZone, Utc};
use crm_core::{
    Customer, CustomerStatus, NewCustomer, NewTask, NewUser, TaskStatus, User, UserRole,
};

#[test]
fn customer_serializes_with_camel_case_fields() {
    let created_at = Utc.with_ymd_and_hms(2024, 5, 15, 10, 0, 0).unwrap();
    let mut input = NewCustomer::new("Acme", "Wile E.");
    input.sector = Some("Retail".to_string());
    input.created_by = Some(1);
    let customer = Customer::from_new(3, input, created_at);

    let json = serde_json::to_value(&customer).unwrap();
    assert_eq!(json["id"], 3);
    assert_eq!(json["companyName"], "Acme");
    assert_eq!(json["contactName"], "Wile E.");
    assert_eq!(json["status"], "active");
    assert_eq!(json["createdBy"], 1);
    assert!(json["phone"].is_null());
    assert_eq!(json["createdAt"], "2024-05-15T10:00:00Z");

    let decoded: Customer = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, customer);
}

#[test]
fn create_payloads_fill_defaults() {
    let task: NewTask = serde_json::from_str(r#"{"title":"Call","customerId":4}"#).unwrap();
    assert_eq!(task.status, TaskStatus::Pending);
    assert_eq!(task.customer_id, Some(4));
    assert_eq!(task.due_date, None);

    let user: NewUser =
        serde_json::from_str(r#"{"username":"u","password":"p","fullName":"U"}"#).unwrap();
    assert_eq!(user.role, UserRole::Standard);

    let customer: NewCustomer =
        serde_json::from_str(r#"{"companyName":"C","contactName":"D"}"#).unwrap();
    assert_eq!(customer.status, CustomerStatus::Active);
}

#[test]
fn stored_user_keeps_password_on_the_wire() {
    let user = User::from_new(1, NewUser::default_admin());
    let json = serde_json::to_value(&user).unwrap();
    assert_eq!(json["password"], "admin123");
    assert_eq!(json["role"], "admin");
}

#[test]
fn enum_parse_round_trips_as_str() {
    for status in [
        TaskStatus::Pending,
        TaskStatus::Completed,
        TaskStatus::Postponed,
    ] {
        assert_eq!(TaskStatus::parse(status.as_str()), Ok(status));
    }
    assert_eq!(
        CustomerStatus::parse(" inactive "),
        Ok(CustomerStatus::Inactive)
    );
    assert_eq!(UserRole::parse("admin"), Ok(UserRole::Admin));

    let err = TaskStatus::parse("cancelled").unwrap_err();
    assert_eq!(err.to_string(), "unsupported task status value `cancelled`");
}
