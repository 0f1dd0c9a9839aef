//! Integration tests for the screen flows: mount, delete, create, edit.
//!
//! Each test drives `App` the way the event loop does, running every issued
//! `Command` against a wiremock server and applying the outcome under the
//! generation it was issued with.

use catalog_admin::api::CatalogClient;
use catalog_admin::app::{App, Command, Screen};
use catalog_admin::keybindings::KeybindingRegistry;
use catalog_admin::route::Route;
use catalog_admin::screens::{FieldInput, SeriesField};
use catalog_admin::theme::ThemeVariant;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> CatalogClient {
    CatalogClient::new(&format!("{}/api", server.uri()), Duration::from_secs(5)).unwrap()
}

fn test_app(client: &CatalogClient) -> App {
    App::new(client.base_url(), ThemeVariant::Dark, KeybindingRegistry::new())
}

/// Run commands until the app stops asking for more.
async fn settle(app: &mut App, client: &CatalogClient, mut pending: Vec<Command>) {
    while !pending.is_empty() {
        let generation = app.generation;
        let mut follow_up = Vec::new();
        for command in pending {
            let outcome = command.run(client).await;
            follow_up.extend(app.apply(generation, outcome));
        }
        pending = follow_up;
    }
}

async fn mount_categories(server: &MockServer, body: serde_json::Value, times: u64) {
    Mock::given(method("GET"))
        .and(path("/api/categories/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(times)
        .mount(server)
        .await;
}

// ============================================================================
// List screens
// ============================================================================

#[tokio::test]
async fn test_category_list_loads_on_mount() {
    let server = MockServer::start().await;
    mount_categories(
        &server,
        json!([{"id": 1, "name": "Action", "description": "Explosions", "image_url": null}]),
        1,
    )
    .await;

    let client = client_for(&server);
    let mut app = test_app(&client);
    let commands = app.navigate(Route::Categories);
    settle(&mut app, &client, commands).await;

    match &app.screen {
        Screen::Categories(list) => {
            assert!(!list.loading);
            assert_eq!(list.error, None);
            assert_eq!(list.items.len(), 1);
            assert_eq!(list.items[0].name, "Action");
        }
        _ => panic!("expected category list"),
    }
}

#[tokio::test]
async fn test_category_list_failure_shows_fixed_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/categories/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut app = test_app(&client);
    let commands = app.navigate(Route::Categories);
    settle(&mut app, &client, commands).await;

    match &app.screen {
        Screen::Categories(list) => {
            assert!(!list.loading);
            assert!(list.items.is_empty());
            assert_eq!(
                list.error,
                Some("Could not load categories. Please try again.")
            );
        }
        _ => panic!("expected category list"),
    }
}

#[tokio::test]
async fn test_confirmed_delete_refetches_list() {
    let server = MockServer::start().await;
    mount_categories(&server, json!([{"id": 1, "name": "Action"}]), 2).await;
    Mock::given(method("DELETE"))
        .and(path("/api/categories/1/"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut app = test_app(&client);
    let commands = app.navigate(Route::Categories);
    settle(&mut app, &client, commands).await;

    app.request_delete();
    let delete = app.confirm_delete().expect("delete command");
    assert_eq!(delete, Command::DeleteCategory(1));
    settle(&mut app, &client, vec![delete]).await;

    match &app.screen {
        Screen::Categories(list) => {
            assert!(!list.loading);
            assert_eq!(list.error, None);
        }
        _ => panic!("expected category list"),
    }
}

#[tokio::test]
async fn test_declined_delete_sends_nothing() {
    let server = MockServer::start().await;
    mount_categories(&server, json!([{"id": 1, "name": "Action"}]), 1).await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut app = test_app(&client);
    let commands = app.navigate(Route::Categories);
    settle(&mut app, &client, commands).await;

    app.request_delete();
    app.cancel_confirm();
    assert_eq!(app.confirm_delete(), None);
}

#[tokio::test]
async fn test_failed_delete_keeps_items_and_shows_banner() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/series/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": 4,
            "title": "Dark",
            "release_date": "2017-12-01",
            "rating": 8.7,
            "category": 3
        }])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/series/4/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut app = test_app(&client);
    let commands = app.navigate(Route::Series);
    settle(&mut app, &client, commands).await;

    app.request_delete();
    let delete = app.confirm_delete().expect("delete command");
    settle(&mut app, &client, vec![delete]).await;

    match &app.screen {
        Screen::Series(list) => {
            assert_eq!(list.items.len(), 1);
            assert_eq!(list.error, Some("Could not delete the series."));
        }
        _ => panic!("expected series list"),
    }
}

#[tokio::test]
async fn test_series_category_names_resolve_from_both_shapes() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/series/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "title": "Dark", "release_date": "2017-12-01", "category": {"id": 3, "name": "Drama"}},
            {"id": 2, "title": "Lost", "release_date": "2004-09-22", "category": "3"},
            {"id": 3, "title": "Fargo", "release_date": "2014-04-15", "category": 8}
        ])))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut app = test_app(&client);
    let commands = app.navigate(Route::Series);
    settle(&mut app, &client, commands).await;

    let Screen::Series(list) = &app.screen else {
        panic!("expected series list");
    };
    let ids: Vec<i64> = list.items.iter().map(|s| s.category.id).collect();
    assert_eq!(ids, vec![3, 3, 8]);
    assert_eq!(app.category_display_name(&list.items[0]), "Drama");
    assert_eq!(app.category_display_name(&list.items[1]), "#3");
    assert_eq!(app.category_display_name(&list.items[2]), "#8");
}

#[tokio::test]
async fn test_stale_result_after_navigation_is_dropped() {
    let server = MockServer::start().await;
    mount_categories(&server, json!([{"id": 1, "name": "Action"}]), 1).await;

    let client = client_for(&server);
    let mut app = test_app(&client);
    let commands = app.navigate(Route::Categories);
    let issued_under = app.generation;
    app.navigate(Route::NewSeries);

    for command in commands {
        let outcome = command.run(&client).await;
        assert!(app.apply(issued_under, outcome).is_empty());
    }

    match &app.screen {
        Screen::SeriesForm(form) => {
            assert!(form.categories.is_empty());
            assert!(form.categories_loading);
        }
        _ => panic!("expected series form"),
    }
}

// ============================================================================
// Forms
// ============================================================================

#[tokio::test]
async fn test_create_category_posts_and_returns_to_list() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/categories/"))
        .and(body_json(json!({
            "name": "Sci-Fi",
            "description": "",
            "image_url": ""
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 9, "name": "Sci-Fi"})))
        .expect(1)
        .mount(&server)
        .await;
    mount_categories(&server, json!([{"id": 9, "name": "Sci-Fi"}]), 1).await;

    let client = client_for(&server);
    let mut app = test_app(&client);
    assert!(app.navigate(Route::NewCategory).is_empty());

    if let Screen::CategoryForm(form) = &mut app.screen {
        for c in "Sci-Fi".chars() {
            form.input(FieldInput::Char(c));
        }
    }
    let save = app.submit_form().expect("save command");
    settle(&mut app, &client, vec![save]).await;

    assert_eq!(app.route(), Route::Categories);
    match &app.screen {
        Screen::Categories(list) => assert_eq!(list.items[0].name, "Sci-Fi"),
        _ => panic!("expected category list"),
    }
}

#[tokio::test]
async fn test_missing_required_field_issues_no_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut app = test_app(&client);
    app.navigate(Route::NewCategory);
    if let Screen::CategoryForm(form) = &mut app.screen {
        form.fields.description = "No name given".to_string();
    }

    assert_eq!(app.submit_form(), None);
    match &app.screen {
        Screen::CategoryForm(form) => {
            assert_eq!(
                form.status.error.as_deref(),
                Some("Please fill in the Name field.")
            );
            assert_eq!(form.fields.description, "No name given");
        }
        _ => panic!("expected category form"),
    }
}

#[tokio::test]
async fn test_edit_series_populates_and_puts_update() {
    let server = MockServer::start().await;
    mount_categories(
        &server,
        json!([{"id": 3, "name": "Drama"}, {"id": 4, "name": "Thriller"}]),
        1,
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/api/series/5/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 5,
            "title": "Dark",
            "description": "Time travel",
            "release_date": "2017-12-01",
            "rating": "8.7",
            "category": {"id": 3, "name": "Drama"},
            "image_url": null
        })))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/series/5/"))
        .and(body_json(json!({
            "title": "Dark",
            "description": "Time travel",
            "release_date": "2017-12-01",
            "rating": null,
            "category": 4,
            "image_url": ""
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/series/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut app = test_app(&client);
    let commands = app.navigate(Route::EditSeries(5));
    settle(&mut app, &client, commands).await;

    let Screen::SeriesForm(form) = &mut app.screen else {
        panic!("expected series form");
    };
    assert!(!form.status.loading);
    assert_eq!(form.fields.title, "Dark");
    assert_eq!(form.fields.release_date, "2017-12-01");
    assert_eq!(form.fields.rating, "8.7");
    assert_eq!(form.fields.category, Some(3));
    assert_eq!(form.fields.image_url, "");
    assert_eq!(form.category_label(), "Drama");

    form.focus = SeriesField::Rating;
    form.input(FieldInput::Clear);
    form.focus = SeriesField::Category;
    form.cycle_category(true);
    assert_eq!(form.category_label(), "Thriller");

    let save = app.submit_form().expect("save command");
    settle(&mut app, &client, vec![save]).await;
    assert_eq!(app.route(), Route::Series);
}

#[tokio::test]
async fn test_failed_update_keeps_values_and_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/categories/2/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"id": 2, "name": "Comedy"})),
        )
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/categories/2/"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({"name": ["too short"]})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut app = test_app(&client);
    let commands = app.navigate(Route::EditCategory(2));
    settle(&mut app, &client, commands).await;

    if let Screen::CategoryForm(form) = &mut app.screen {
        form.input(FieldInput::Char('!'));
    }
    let save = app.submit_form().expect("save command");
    settle(&mut app, &client, vec![save]).await;

    assert_eq!(app.route(), Route::EditCategory(2));
    match &app.screen {
        Screen::CategoryForm(form) => {
            assert_eq!(form.fields.name, "Comedy!");
            assert!(!form.status.saving);
            assert_eq!(
                form.status.error.as_deref(),
                Some("Could not update the category. Check the data.")
            );
        }
        _ => panic!("expected category form"),
    }
}

#[tokio::test]
async fn test_edit_fetch_failure_shows_message() {
    let server = MockServer::start().await;
    mount_categories(&server, json!([]), 1).await;
    Mock::given(method("GET"))
        .and(path("/api/series/77/"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut app = test_app(&client);
    let commands = app.navigate(Route::EditSeries(77));
    settle(&mut app, &client, commands).await;

    match &app.screen {
        Screen::SeriesForm(form) => {
            assert!(!form.status.loading);
            assert_eq!(
                form.status.error.as_deref(),
                Some("Could not load the series.")
            );
        }
        _ => panic!("expected series form"),
    }
}
