use eventdesk_core::db::open_db_in_memory;
use eventdesk_core::signals::{
    EVENT_FEATURE_DEFINITIONS, EVENT_MANAGEMENT_SIDEMENU, EVENT_SIDEMENU, USERS_MERGED,
};
use eventdesk_core::surveys::on_feature_catalog;
use eventdesk_core::{
    App, Event, EventFeature, EventRepository, FeatureCatalogError, SqliteEventRepository,
    SqliteUserRepository, User, UserRepository,
};

#[test]
fn feature_definition_is_surveys_and_default_on() {
    let feature = on_feature_catalog();
    assert_eq!(feature.name(), "surveys");
    assert_eq!(feature.friendly_name().msgid(), "Surveys");
    assert_eq!(
        feature.description().msgid(),
        "Gives event managers the opportunity to create surveys."
    );
    for id in [1, 2, 999] {
        assert!(feature.is_default_for_event(&Event::new(id, "Any", 1)));
    }
}

#[test]
fn bootstrap_connects_surveys_to_every_signal() {
    let app = App::bootstrap().unwrap();
    for signal in [
        USERS_MERGED,
        EVENT_MANAGEMENT_SIDEMENU,
        EVENT_SIDEMENU,
        EVENT_FEATURE_DEFINITIONS,
    ] {
        assert_eq!(app.signals().receivers(signal), vec!["surveys"]);
    }
    assert_eq!(app.features().names(), vec!["surveys"]);
}

#[test]
fn surveys_enabled_until_turned_off() {
    let conn = open_db_in_memory().unwrap();
    SqliteUserRepository::new(&conn)
        .create_user(&User::new(1, "Organizer"))
        .unwrap();
    let event = Event::new(3, "Colloquium", 1);
    SqliteEventRepository::new(&conn).create_event(&event).unwrap();
    let app = App::bootstrap().unwrap();

    assert!(app.features().is_enabled(&conn, &event, "surveys").unwrap());
    assert_eq!(
        app.features().enabled_features(&conn, &event).unwrap(),
        vec!["surveys"]
    );

    app.features()
        .set_enabled(&conn, &event, "surveys", false)
        .unwrap();
    assert!(!app.features().is_enabled(&conn, &event, "surveys").unwrap());
    assert!(app
        .features()
        .enabled_features(&conn, &event)
        .unwrap()
        .is_empty());
}

#[test]
fn unknown_features_are_never_enabled_and_cannot_be_toggled() {
    let conn = open_db_in_memory().unwrap();
    SqliteUserRepository::new(&conn)
        .create_user(&User::new(1, "Organizer"))
        .unwrap();
    let event = Event::new(3, "Colloquium", 1);
    SqliteEventRepository::new(&conn).create_event(&event).unwrap();
    let app = App::bootstrap().unwrap();

    assert!(!app.features().is_enabled(&conn, &event, "paper_reviewing").unwrap());
    let err = app
        .features()
        .set_enabled(&conn, &event, "paper_reviewing", true)
        .unwrap_err();
    assert!(matches!(err, FeatureCatalogError::UnknownFeature(name) if name == "paper_reviewing"));
}
