use atelier_core::MemoryStorage;
use atelier_engine::{is_authenticated, login, logout};

#[test]
fn wrong_password_leaves_the_session_closed() {
    let mut storage = MemoryStorage::new();
    assert!(!login(&mut storage, "studio-secret", "guess"));
    assert!(!is_authenticated(&storage));
}

#[test]
fn matching_password_opens_a_session_until_logout() {
    let mut storage = MemoryStorage::new();
    assert!(login(&mut storage, "studio-secret", "studio-secret"));
    assert!(is_authenticated(&storage));

    logout(&mut storage);
    assert!(!is_authenticated(&storage));
}
