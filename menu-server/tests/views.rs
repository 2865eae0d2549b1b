//! Headless view behaviour over the in-memory backend

use std::sync::Arc;
use std::time::Duration;

use menu_client::{AuthService, MemoryBackend, StoreOp};
use menu_server::views::category_manager::CATEGORY_NAME_REQUIRED;
use menu_server::views::login_form::CREDENTIALS_REQUIRED;
use menu_server::views::public_menu::{EMPTY_MENU, MENU_UNAVAILABLE};
use menu_server::views::{
    CategoryManager, Dashboard, LoginForm, MenuItemManager, PublicMenu, RouteSlot, SessionGate,
};
use rust_decimal::Decimal;
use shared::models::MenuItemDraft;
use shared::view::PublicMenuView;
use shared::{Credentials, ErrorCode, Route, Session};

const EMAIL: &str = "admin@example.com";
const PASSWORD: &str = "secret-pass";

async fn signed_in() -> (Arc<MemoryBackend>, Session) {
    let backend = Arc::new(MemoryBackend::new().with_user(EMAIL, PASSWORD));
    let session = backend
        .sign_in_with_password(&Credentials::new(EMAIL, PASSWORD))
        .await
        .unwrap();
    backend.reset_calls();
    (backend, session)
}

async fn wait_for(slot: &RouteSlot, route: Route) -> bool {
    for _ in 0..100 {
        if slot.requested(&route) {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    false
}

fn draft(name: &str, price: &str, category_id: &str) -> MenuItemDraft {
    MenuItemDraft {
        name: name.to_string(),
        price: price.to_string(),
        category_id: category_id.to_string(),
        ..MenuItemDraft::default()
    }
}

// ========== Session gate ==========

#[tokio::test]
async fn gate_without_session_redirects_to_login() {
    let backend = Arc::new(MemoryBackend::new());
    let slot = Arc::new(RouteSlot::new());
    let gate = SessionGate::new(backend.clone(), slot.clone());

    assert!(gate.mount(None).await.is_none());
    assert_eq!(slot.last(), Some(Route::Login));
    assert!(!gate.is_admitted());
    assert!(!gate.is_loading());
    assert_eq!(backend.calls(StoreOp::GetUser), 0);
}

#[tokio::test]
async fn gate_admits_live_session() {
    let (backend, session) = signed_in().await;
    let slot = Arc::new(RouteSlot::new());
    let gate = SessionGate::new(backend.clone(), slot.clone());

    let user = gate.mount(Some(&session)).await.unwrap();
    assert_eq!(user.email.as_deref(), Some(EMAIL));
    assert!(gate.is_admitted());
    assert!(gate.is_listening());
    assert_eq!(slot.count(), 0);
}

#[tokio::test]
async fn gate_refuses_expired_session() {
    let (backend, session) = signed_in().await;
    backend.expire_session(&session.access_token);
    let slot = Arc::new(RouteSlot::new());
    let gate = SessionGate::new(backend.clone(), slot.clone());

    assert!(gate.mount(Some(&session)).await.is_none());
    assert_eq!(slot.last(), Some(Route::Login));
}

#[tokio::test]
async fn gate_refuses_locally_expired_session_without_lookup() {
    let (backend, mut session) = signed_in().await;
    session.expires_at = Some(1);
    let slot = Arc::new(RouteSlot::new());
    let gate = SessionGate::new(backend.clone(), slot.clone());

    assert!(gate.mount(Some(&session)).await.is_none());
    assert_eq!(backend.calls(StoreOp::GetUser), 0);
    assert_eq!(slot.last(), Some(Route::Login));
}

#[tokio::test]
async fn gate_follows_sign_out_elsewhere() {
    let (backend, session) = signed_in().await;
    let slot = Arc::new(RouteSlot::new());
    let gate = SessionGate::new(backend.clone(), slot.clone());
    gate.mount(Some(&session)).await.unwrap();

    backend.revoke_session(&session.access_token);

    assert!(wait_for(&slot, Route::Login).await);
    assert!(!gate.is_admitted());
}

#[tokio::test]
async fn gate_ignores_other_users() {
    let (backend, session) = signed_in().await;
    backend.add_user("cook@example.com", "other-pass");
    let other = backend
        .sign_in_with_password(&Credentials::new("cook@example.com", "other-pass"))
        .await
        .unwrap();

    let slot = Arc::new(RouteSlot::new());
    let gate = SessionGate::new(backend.clone(), slot.clone());
    gate.mount(Some(&session)).await.unwrap();

    backend.revoke_session(&other.access_token);
    tokio::time::sleep(Duration::from_millis(50)).await;

    assert_eq!(slot.count(), 0);
    assert!(gate.is_admitted());
}

#[tokio::test]
async fn torn_down_gate_no_longer_navigates() {
    let (backend, session) = signed_in().await;
    let slot = Arc::new(RouteSlot::new());
    let gate = SessionGate::new(backend.clone(), slot.clone());
    gate.mount(Some(&session)).await.unwrap();

    gate.teardown();
    assert!(!gate.is_listening());

    backend.revoke_session(&session.access_token);
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(slot.count(), 0);
}

#[tokio::test]
async fn dropped_gate_no_longer_navigates() {
    let (backend, session) = signed_in().await;
    let slot = Arc::new(RouteSlot::new());
    {
        let gate = SessionGate::new(backend.clone(), slot.clone());
        gate.mount(Some(&session)).await.unwrap();
    }

    backend.revoke_session(&session.access_token);
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(slot.count(), 0);
}

// ========== Login form ==========

#[tokio::test]
async fn login_navigates_to_dashboard() {
    let backend = Arc::new(MemoryBackend::new().with_user(EMAIL, PASSWORD));
    let slot = Arc::new(RouteSlot::new());
    let form = LoginForm::new(backend.clone(), slot.clone());

    let session = form.submit(&Credentials::new(EMAIL, PASSWORD)).await.unwrap();
    assert!(!session.access_token.is_empty());
    assert_eq!(slot.last(), Some(Route::Dashboard));

    let view = form.snapshot();
    assert!(view.error.is_none());
    assert!(!view.loading);
}

#[tokio::test]
async fn login_shows_backend_message_on_bad_password() {
    let backend = Arc::new(MemoryBackend::new().with_user(EMAIL, PASSWORD));
    let slot = Arc::new(RouteSlot::new());
    let form = LoginForm::new(backend.clone(), slot.clone());

    let err = form
        .submit(&Credentials::new(EMAIL, "wrong"))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidCredentials);
    assert_eq!(form.snapshot().error.as_deref(), Some("Invalid login credentials"));
    assert_eq!(slot.count(), 0);
}

#[tokio::test]
async fn login_with_blank_fields_skips_backend() {
    let backend = Arc::new(MemoryBackend::new().with_user(EMAIL, PASSWORD));
    let slot = Arc::new(RouteSlot::new());
    let form = LoginForm::new(backend.clone(), slot.clone());

    let err = form.submit(&Credentials::new("  ", "")).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::RequiredField);
    assert_eq!(form.snapshot().error.as_deref(), Some(CREDENTIALS_REQUIRED));
    assert_eq!(backend.calls(StoreOp::SignIn), 0);
}

// ========== Category manager ==========

#[tokio::test]
async fn categories_are_listed_in_display_order() {
    let (backend, session) = signed_in().await;
    backend.seed_category("Desserts", 3);
    backend.seed_category("Soups", 1);
    backend.seed_category("Mains", 2);

    let manager = CategoryManager::new(backend.clone(), session);
    let names: Vec<String> = manager
        .list()
        .await
        .unwrap()
        .into_iter()
        .map(|c| c.name)
        .collect();
    assert_eq!(names, ["Soups", "Mains", "Desserts"]);
}

#[tokio::test]
async fn blank_category_name_is_rejected_locally() {
    let (backend, session) = signed_in().await;
    backend.seed_category("Soups", 1);
    let manager = CategoryManager::new(backend.clone(), session);
    manager.list().await.unwrap();

    let err = manager.add("   ").await.unwrap_err();
    assert_eq!(err.code, ErrorCode::CategoryNameRequired);
    assert_eq!(backend.calls(StoreOp::InsertCategory), 0);

    let panel = manager.snapshot();
    assert_eq!(panel.error.as_deref(), Some(CATEGORY_NAME_REQUIRED));
    assert_eq!(panel.categories.len(), 1);
}

#[tokio::test]
async fn added_category_appears_once_and_input_clears() {
    let (backend, session) = signed_in().await;
    let manager = CategoryManager::new(backend.clone(), session);

    manager.add("Soups").await.unwrap();

    let panel = manager.snapshot();
    assert_eq!(panel.categories.iter().filter(|c| c.name == "Soups").count(), 1);
    assert!(panel.name_input.is_empty());
    assert!(panel.error.is_none());
    assert_eq!(backend.calls(StoreOp::ListCategories), 1);
}

#[tokio::test]
async fn failed_insert_keeps_input_and_shows_error() {
    let (backend, session) = signed_in().await;
    let manager = CategoryManager::new(backend.clone(), session);
    backend.fail_next(StoreOp::InsertCategory, "database is read-only");

    let err = manager.add("Soups").await.unwrap_err();
    assert_eq!(err.message, "database is read-only");

    let panel = manager.snapshot();
    assert_eq!(panel.name_input, "Soups");
    assert_eq!(panel.error.as_deref(), Some("database is read-only"));
    assert!(backend.categories().is_empty());
}

#[tokio::test]
async fn confirmed_delete_removes_category() {
    let (backend, session) = signed_in().await;
    let soups = backend.seed_category("Soups", 1);
    backend.seed_category("Mains", 2);
    let manager = CategoryManager::new(backend.clone(), session);

    assert!(manager.delete(&soups.id, &true).await.unwrap());
    let panel = manager.snapshot();
    assert!(panel.categories.iter().all(|c| c.id != soups.id));
    assert_eq!(panel.categories.len(), 1);
}

#[tokio::test]
async fn declined_delete_makes_no_call() {
    let (backend, session) = signed_in().await;
    let soups = backend.seed_category("Soups", 1);
    let manager = CategoryManager::new(backend.clone(), session);

    let asked = std::sync::Mutex::new(Vec::new());
    let decline = |prompt: &str| {
        asked.lock().unwrap().push(prompt.to_string());
        false
    };

    assert!(!manager.delete(&soups.id, &decline).await.unwrap());
    assert_eq!(asked.lock().unwrap().len(), 1);
    assert_eq!(backend.total_calls(), 0);
    assert_eq!(backend.categories().len(), 1);
}

#[tokio::test]
async fn second_submission_while_busy_is_rejected() {
    let (backend, session) = signed_in().await;
    let manager = Arc::new(CategoryManager::new(backend.clone(), session));
    backend.set_latency(Some(Duration::from_millis(200)));

    let first = tokio::spawn({
        let manager = manager.clone();
        async move { manager.add("Soups").await }
    });
    tokio::time::sleep(Duration::from_millis(50)).await;

    assert!(manager.is_busy());
    let err = manager.add("Mains").await.unwrap_err();
    assert_eq!(err.code, ErrorCode::OperationInProgress);

    first.await.unwrap().unwrap();
    assert!(!manager.is_busy());
    assert_eq!(backend.calls(StoreOp::InsertCategory), 1);
}

// ========== Menu item manager ==========

#[tokio::test]
async fn load_defaults_draft_to_first_category() {
    let (backend, session) = signed_in().await;
    let mains = backend.seed_category("Mains", 2);
    let soups = backend.seed_category("Soups", 1);
    backend.seed_item(&mains.id, "Kebab", Decimal::new(150, 0), true);

    let manager = MenuItemManager::new(backend.clone(), session);
    manager.load().await.unwrap();

    let panel = manager.snapshot();
    assert_eq!(panel.draft.category_id, soups.id);
    assert_eq!(panel.categories.len(), 2);
    assert_eq!(panel.items.len(), 1);
    assert_eq!(panel.items[0].category_name(), Some("Mains"));
}

#[tokio::test]
async fn failed_category_fetch_stops_load_before_items() {
    let (backend, session) = signed_in().await;
    backend.seed_category("Soups", 1);
    backend.fail_next(StoreOp::ListCategoryOptions, "connection reset");

    let manager = MenuItemManager::new(backend.clone(), session);
    assert!(manager.load().await.is_err());
    assert_eq!(backend.calls(StoreOp::ListMenuItems), 0);
    assert_eq!(manager.snapshot().error.as_deref(), Some("connection reset"));
}

#[tokio::test]
async fn zero_price_is_rejected_locally() {
    let (backend, session) = signed_in().await;
    let soups = backend.seed_category("Soups", 1);
    let manager = MenuItemManager::new(backend.clone(), session);
    manager.load().await.unwrap();

    for price in ["0", "-3", "abc", ""] {
        let err = manager
            .add(draft("Lentil Soup", price, &soups.id))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::MenuItemInvalidPrice, "price {price:?}");
    }
    assert_eq!(backend.calls(StoreOp::InsertMenuItem), 0);
}

#[tokio::test]
async fn item_without_category_is_rejected() {
    let (backend, session) = signed_in().await;
    let manager = MenuItemManager::new(backend.clone(), session);
    manager.load().await.unwrap();

    let err = manager.add(draft("Lentil Soup", "12.5", "")).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::CategoryRequired);
    assert_eq!(backend.calls(StoreOp::InsertMenuItem), 0);
}

#[tokio::test]
async fn valid_item_is_added_and_draft_resets() {
    let (backend, session) = signed_in().await;
    let soups = backend.seed_category("Soups", 1);
    let mains = backend.seed_category("Mains", 2);
    let manager = MenuItemManager::new(backend.clone(), session);
    manager.load().await.unwrap();

    manager
        .add(draft("Lentil Soup", "12.5", &mains.id))
        .await
        .unwrap();

    let panel = manager.snapshot();
    assert_eq!(panel.items.len(), 1);
    assert_eq!(panel.items[0].price, Decimal::new(125, 1));
    assert!(panel.items[0].description.is_none());
    assert_eq!(panel.draft.category_id, soups.id);
    assert!(panel.draft.name.is_empty());
    assert!(panel.error.is_none());
}

#[tokio::test]
async fn toggling_twice_restores_availability() {
    let (backend, session) = signed_in().await;
    let soups = backend.seed_category("Soups", 1);
    let item = backend.seed_item(&soups.id, "Lentil Soup", Decimal::new(125, 1), true);
    let manager = MenuItemManager::new(backend.clone(), session);
    manager.load().await.unwrap();

    assert!(!manager.toggle_availability(&item.id).await.unwrap());
    assert!(!backend.menu_items()[0].is_available);
    assert!(manager.toggle_availability(&item.id).await.unwrap());
    assert!(backend.menu_items()[0].is_available);
}

#[tokio::test]
async fn toggling_unknown_item_fails() {
    let (backend, session) = signed_in().await;
    let manager = MenuItemManager::new(backend.clone(), session);
    manager.load().await.unwrap();

    let err = manager.toggle_availability("missing").await.unwrap_err();
    assert_eq!(err.code, ErrorCode::MenuItemNotFound);
    assert_eq!(backend.calls(StoreOp::SetAvailability), 0);
}

#[tokio::test]
async fn deleting_category_takes_its_items() {
    let (backend, session) = signed_in().await;
    let soups = backend.seed_category("Soups", 1);
    backend.seed_item(&soups.id, "Lentil Soup", Decimal::new(125, 1), true);
    let categories = CategoryManager::new(backend.clone(), session.clone());
    let items = MenuItemManager::new(backend.clone(), session);

    categories.delete(&soups.id, &true).await.unwrap();
    items.load().await.unwrap();
    assert!(items.items().is_empty());
}

// ========== Public menu ==========

#[tokio::test]
async fn public_menu_hides_unavailable_items() {
    let backend = Arc::new(MemoryBackend::new());
    let soups = backend.seed_category("Soups", 1);
    let drinks = backend.seed_category("Drinks", 2);
    backend.seed_item(&soups.id, "Lentil Soup", Decimal::new(125, 1), true);
    backend.seed_item(&soups.id, "Tripe Soup", Decimal::new(90, 0), false);
    backend.seed_item(&drinks.id, "Ayran", Decimal::new(15, 0), false);

    let menu = PublicMenu::new(backend.clone(), "TL");
    let PublicMenuView::Menu {
        restaurant_id,
        categories,
    } = menu.render("r-1").await
    else {
        panic!("expected a menu");
    };

    assert_eq!(restaurant_id, "r-1");
    assert_eq!(categories.len(), 1);
    assert_eq!(categories[0].name, "Soups");
    assert_eq!(categories[0].items.len(), 1);
    assert_eq!(categories[0].items[0].price_label, "12.50 TL");
}

#[tokio::test]
async fn public_menu_without_available_items_is_empty() {
    let backend = Arc::new(MemoryBackend::new());
    let soups = backend.seed_category("Soups", 1);
    backend.seed_item(&soups.id, "Tripe Soup", Decimal::new(90, 0), false);

    let view = PublicMenu::new(backend, "TL").render("r-1").await;
    assert_eq!(
        view,
        PublicMenuView::Empty {
            restaurant_id: "r-1".into(),
            message: EMPTY_MENU.into(),
        }
    );
}

#[tokio::test]
async fn public_menu_fetch_failure_shows_error() {
    let backend = Arc::new(MemoryBackend::new());
    backend.fail_next(StoreOp::FetchPublicMenu, "upstream timeout");

    let view = PublicMenu::new(backend, "TL").render("r-1").await;
    assert_eq!(
        view,
        PublicMenuView::Error {
            restaurant_id: "r-1".into(),
            message: MENU_UNAVAILABLE.into(),
        }
    );
}

// ========== Dashboard ==========

#[tokio::test]
async fn dashboard_mount_loads_both_panels() {
    let (backend, session) = signed_in().await;
    let soups = backend.seed_category("Soups", 1);
    backend.seed_item(&soups.id, "Lentil Soup", Decimal::new(125, 1), true);
    let slot = Arc::new(RouteSlot::new());

    let dashboard = Dashboard::mount(backend.clone(), backend.clone(), slot.clone(), session)
        .await
        .unwrap();

    let view = dashboard.snapshot();
    assert_eq!(view.user.email.as_deref(), Some(EMAIL));
    assert_eq!(view.categories.categories.len(), 1);
    assert_eq!(view.menu_items.items.len(), 1);
    assert_eq!(slot.count(), 0);
}

#[tokio::test]
async fn dashboard_logout_goes_to_login_and_ends_session() {
    let (backend, session) = signed_in().await;
    let slot = Arc::new(RouteSlot::new());
    let dashboard = Dashboard::mount(backend.clone(), backend.clone(), slot.clone(), session.clone())
        .await
        .unwrap();

    dashboard.logout().await.unwrap();

    assert!(slot.requested(&Route::Login));
    assert_eq!(backend.get_user(&session).await.unwrap(), None);
}

#[tokio::test]
async fn dashboard_logout_navigates_even_when_backend_fails() {
    let (backend, session) = signed_in().await;
    let slot = Arc::new(RouteSlot::new());
    let dashboard = Dashboard::mount(backend.clone(), backend.clone(), slot.clone(), session)
        .await
        .unwrap();
    backend.fail_next(StoreOp::SignOut, "auth service down");

    assert!(dashboard.logout().await.is_err());
    assert_eq!(slot.last(), Some(Route::Login));
}

#[tokio::test]
async fn dashboard_mount_without_live_session_redirects() {
    let backend = Arc::new(MemoryBackend::new());
    let slot = Arc::new(RouteSlot::new());

    let mounted = Dashboard::mount(
        backend.clone(),
        backend.clone(),
        slot.clone(),
        Session::from_access_token("stale"),
    )
    .await;

    assert!(mounted.is_none());
    assert_eq!(slot.last(), Some(Route::Login));
    assert_eq!(backend.calls(StoreOp::ListCategories), 0);
}

#[tokio::test]
async fn restricted_category_delete_reports_items() {
    let (backend, session) = signed_in().await;
    let soups = backend.seed_category("Soups", 1);
    backend.seed_item(&soups.id, "Lentil Soup", Decimal::new(125, 1), true);
    backend.restrict_category_deletes(true);
    let manager = CategoryManager::new(backend.clone(), session);
    manager.list().await.unwrap();

    let err = manager.delete(&soups.id, &true).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::CategoryHasItems);
    assert!(err.message.contains("foreign key"));

    let panel = manager.snapshot();
    assert_eq!(panel.categories.len(), 1);
    assert_eq!(panel.error.as_deref(), Some(err.message.as_str()));
}

#[tokio::test]
async fn dashboard_refresh_reports_rejected_session() {
    let (backend, session) = signed_in().await;
    let slot = Arc::new(RouteSlot::new());
    let dashboard = Dashboard::mount(backend.clone(), backend.clone(), slot.clone(), session.clone())
        .await
        .unwrap();

    backend.expire_session(&session.access_token);

    let err = dashboard.refresh().await.unwrap_err();
    assert!(err.is_session_ended());

    dashboard.end_session();
    assert_eq!(slot.last(), Some(Route::Login));
    assert!(!dashboard.is_admitted());
    assert!(!dashboard.is_listening());
}

#[tokio::test]
async fn dashboard_refresh_keeps_ordinary_failures_in_panels() {
    let (backend, session) = signed_in().await;
    let slot = Arc::new(RouteSlot::new());
    let dashboard = Dashboard::mount(backend.clone(), backend.clone(), slot.clone(), session)
        .await
        .unwrap();

    backend.fail_next(StoreOp::ListCategories, "connection reset");
    let view = dashboard.refresh().await.unwrap();
    assert_eq!(view.categories.error.as_deref(), Some("connection reset"));
    assert_eq!(slot.count(), 0);
}
