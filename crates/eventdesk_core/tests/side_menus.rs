use eventdesk_core::db::open_db_in_memory;
use eventdesk_core::surveys::{on_event_management_menu, on_event_public_menu};
use eventdesk_core::{
    App, CatalogTranslator, Event, EventRepository, HookError, RouteError, SignalRegistry,
    SqliteEventRepository, SqliteSurveyRepository, SqliteUserRepository, Survey,
    SurveyRepository, UrlMap, User, UserRepository,
};
use rusqlite::Connection;

const EVENT_ID: i64 = 7;

fn seed(conn: &Connection) -> (Event, User, User) {
    let users = SqliteUserRepository::new(conn);
    let manager = User::new(1, "Manager");
    let attendee = User::new(2, "Attendee");
    users.create_user(&manager).unwrap();
    users.create_user(&attendee).unwrap();

    let mut event = Event::new(EVENT_ID, "Detector workshop", manager.id);
    event.manager_ids = vec![manager.id];
    let events = SqliteEventRepository::new(conn);
    events.create_event(&event).unwrap();
    (events.require_event(EVENT_ID).unwrap(), manager, attendee)
}

#[test]
fn management_entry_visible_for_manager_with_feature_on() {
    let conn = open_db_in_memory().unwrap();
    let (event, manager, _) = seed(&conn);
    let app = App::bootstrap().unwrap();
    let ctx = app.context(&conn, Some(&manager));

    let (key, item) = on_event_management_menu(&ctx, &event).unwrap().unwrap();
    assert_eq!(key, "surveys");
    assert_eq!(item.label.msgid(), "Surveys");
    assert_eq!(item.url, "/event/7/manage/surveys/");
    assert_eq!(item.event_feature, Some("surveys"));
    assert!(item.visible);

    let again = on_event_management_menu(&ctx, &event).unwrap().unwrap();
    assert_eq!(again.1, item);
}

#[test]
fn management_entry_visible_for_any_listed_manager_regardless_of_order() {
    let conn = open_db_in_memory().unwrap();
    let (_, creator, attendee) = seed(&conn);
    let users = SqliteUserRepository::new(&conn);
    for id in [5, 9] {
        users.create_user(&User::new(id, format!("Co-manager {id}"))).unwrap();
    }
    let app = App::bootstrap().unwrap();

    let mut event = Event::new(8, "Beam school", creator.id);
    event.manager_ids = vec![9, attendee.id, 5];
    let events = SqliteEventRepository::new(&conn);
    events.create_event(&event).unwrap();
    let stored = events.require_event(8).unwrap();

    for candidate in [&event, &stored] {
        for manager_id in [5, 9, attendee.id] {
            let manager = User::new(manager_id, "Co-manager");
            let ctx = app.context(&conn, Some(&manager));
            let (_, item) = on_event_management_menu(&ctx, candidate).unwrap().unwrap();
            assert!(item.visible, "manager {manager_id} should see the entry");
        }
        let outsider = User::new(42, "Outsider");
        let ctx = app.context(&conn, Some(&outsider));
        let (_, item) = on_event_management_menu(&ctx, candidate).unwrap().unwrap();
        assert!(!item.visible);
    }
}

#[test]
fn management_entry_hidden_without_permission() {
    let conn = open_db_in_memory().unwrap();
    let (event, _, attendee) = seed(&conn);
    let app = App::bootstrap().unwrap();

    for user in [Some(&attendee), None] {
        let ctx = app.context(&conn, user);
        let (_, item) = on_event_management_menu(&ctx, &event).unwrap().unwrap();
        assert!(!item.visible);
    }
}

#[test]
fn management_entry_hidden_when_feature_disabled() {
    let conn = open_db_in_memory().unwrap();
    let (event, manager, _) = seed(&conn);
    let app = App::bootstrap().unwrap();
    let ctx = app.context(&conn, Some(&manager));

    app.features()
        .set_enabled(&conn, &event, "surveys", false)
        .unwrap();
    let (_, item) = on_event_management_menu(&ctx, &event).unwrap().unwrap();
    assert!(!item.visible);

    app.features()
        .set_enabled(&conn, &event, "surveys", true)
        .unwrap();
    let (_, item) = on_event_management_menu(&ctx, &event).unwrap().unwrap();
    assert!(item.visible);
}

#[test]
fn management_entry_needs_a_route() {
    let conn = open_db_in_memory().unwrap();
    let (event, manager, _) = seed(&conn);
    let mut signals = SignalRegistry::new();
    App::register_builtin(&mut signals).unwrap();
    let app = App::from_registry(signals, UrlMap::new()).unwrap();
    let ctx = app.context(&conn, Some(&manager));

    let err = on_event_management_menu(&ctx, &event).unwrap_err();
    assert!(matches!(
        err,
        HookError::Route(RouteError::UnknownEndpoint(endpoint)) if endpoint == "survey.management"
    ));
}

#[test]
fn public_entry_tracks_visible_surveys() {
    let conn = open_db_in_memory().unwrap();
    let (event, _, attendee) = seed(&conn);
    let app = App::bootstrap().unwrap();
    let ctx = app.context(&conn, Some(&attendee));
    let surveys = SqliteSurveyRepository::new(&conn);

    let entry = on_event_public_menu(&ctx, &event);
    assert_eq!(entry.endpoint, "survey.display_survey_list");
    assert_eq!(entry.name, "surveys");
    assert_eq!(entry.label.msgid(), "Surveys");
    assert!(!entry.is_visible(&conn, &event).unwrap());

    let visible = Survey::new(event.id, "Feedback").visible();
    surveys.create_survey(&visible).unwrap();
    surveys
        .create_survey(&Survey::new(event.id, "Draft one"))
        .unwrap();
    surveys
        .create_survey(&Survey::new(event.id, "Draft two"))
        .unwrap();
    assert!(entry.is_visible(&conn, &event).unwrap());
    assert!(entry.is_visible(&conn, &event).unwrap());

    surveys.delete_survey(visible.uuid).unwrap();
    assert_eq!(surveys.list_for_event(event.id).unwrap().len(), 2);
    assert!(!entry.is_visible(&conn, &event).unwrap());
}

#[test]
fn rendered_event_menu_resolves_url_and_translation() {
    let conn = open_db_in_memory().unwrap();
    let (event, _, attendee) = seed(&conn);
    let app = App::bootstrap()
        .unwrap()
        .with_translator(CatalogTranslator::new().with_message("Surveys", "Sondages"));
    let ctx = app.context(&conn, Some(&attendee));

    assert!(app.event_menu(&ctx, &event).unwrap().is_empty());

    SqliteSurveyRepository::new(&conn)
        .create_survey(&Survey::new(event.id, "Feedback").visible())
        .unwrap();
    let menu = app.event_menu(&ctx, &event).unwrap();
    assert_eq!(menu.len(), 1);
    assert_eq!(menu[0].name, "surveys");
    assert_eq!(menu[0].label, "Sondages");
    assert_eq!(menu[0].url, "/event/7/surveys/");
}

#[test]
fn app_management_menu_collects_surveys_entry() {
    let conn = open_db_in_memory().unwrap();
    let (event, manager, _) = seed(&conn);
    let app = App::bootstrap().unwrap();
    let ctx = app.context(&conn, Some(&manager));

    let menu = app.management_menu(&ctx, &event).unwrap();
    let keys: Vec<&str> = menu.iter().map(|(key, _)| key.as_str()).collect();
    assert_eq!(keys, vec!["surveys"]);
    assert!(menu[0].1.visible);
}
