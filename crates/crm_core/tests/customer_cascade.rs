use crm_core::{
    MemStorage, NewCustomer, NewNote, NewPermission, NewTask, NewUser, Storage, UserRole,
};

#[test]
fn deleting_customer_removes_its_tasks_notes_and_permissions_only() {
    let mut store = MemStorage::seeded();
    let user = store.create_user(NewUser::new("sales", "pw", "Sales Rep", UserRole::Standard));
    let doomed = store.create_customer(NewCustomer::new("Doomed Ltd", "D"));
    let kept = store.create_customer(NewCustomer::new("Kept Ltd", "K"));

    for customer_id in [doomed.id, kept.id] {
        store.create_task(NewTask::for_customer("task", customer_id));
        store.create_task(NewTask::for_customer("another", customer_id));
        store.create_note(NewNote::new(customer_id, "note"));
        store.create_user_customer_permission(NewPermission {
            user_id: user.id,
            customer_id,
        });
    }
    let unlinked = store.create_task(NewTask::new("no customer"));

    assert!(store.delete_customer(doomed.id));

    assert!(store.get_customer(doomed.id).is_none());
    assert!(store.get_tasks_by_customer(doomed.id).is_empty());
    assert!(store.get_notes_by_customer(doomed.id).is_empty());
    assert!(store
        .list_permissions()
        .iter()
        .all(|permission| permission.customer_id != doomed.id));

    assert_eq!(store.get_tasks_by_customer(kept.id).len(), 2);
    assert_eq!(store.get_notes_by_customer(kept.id).len(), 1);
    assert_eq!(store.get_user_customer_permissions(user.id).len(), 1);
    assert!(store.get_task(unlinked.id).is_some());
    assert_eq!(store.list_tasks().len(), 3);
    assert!(store.get_user(user.id).is_some());
}

#[test]
fn deleted_customer_task_is_no_longer_reachable() {
    let mut store = MemStorage::seeded();
    let acme = store.create_customer(NewCustomer::new("Acme", "Wile E."));
    let task = store.create_task(NewTask::for_customer("Send quote", acme.id));

    assert!(store.delete_customer(acme.id));

    assert!(store.get_tasks_by_customer(acme.id).is_empty());
    assert!(store.get_task(task.id).is_none());
}

#[test]
fn deleting_unknown_customer_returns_false_and_keeps_everything() {
    let mut store = MemStorage::seeded();
    let acme = store.create_customer(NewCustomer::new("Acme", "Wile E."));
    store.create_task(NewTask::for_customer("Send quote", acme.id));

    assert!(!store.delete_customer(acme.id + 10));
    assert_eq!(store.list_customers().len(), 1);
    assert_eq!(store.list_tasks().len(), 1);
}

#[test]
fn deleting_task_or_note_does_not_touch_customer() {
    let mut store = MemStorage::seeded();
    let acme = store.create_customer(NewCustomer::new("Acme", "Wile E."));
    let task = store.create_task(NewTask::for_customer("Send quote", acme.id));
    let note = store.create_note(NewNote::new(acme.id, "hello"));

    assert!(store.delete_task(task.id));
    assert!(store.delete_note(note.id));
    assert!(!store.delete_note(note.id));
    assert_eq!(store.get_customer(acme.id), Some(acme));
}
