use std::cell::RefCell;
use std::rc::Rc;

use bookquiz::{
    dispatch, AppShell, BookEntry, Catalog, ClickTarget, LayoutState, MemoryStore, MountedShell,
    Question, ResizeEvents, ResizeHub, ResizePolicy, Route, ScoreRecord, ScoreStore, ScoreValue,
    ShellConfig, Viewport,
};

fn landscape() -> Viewport {
    Viewport::new(800.0, 400.0)
}

fn portrait() -> Viewport {
    Viewport::new(400.0, 800.0)
}

fn catalog() -> Catalog {
    Catalog::from_entries(vec![
        BookEntry {
            title: "Ownership".to_string(),
            url: "/ownership".to_string(),
            summary: "Moves and borrows".to_string(),
            content: "# Ownership".to_string(),
            questions: vec![
                Question::new("Who frees the value?", &["owner", "gc"], 0),
                Question::new("How many &mut at once?", &["one", "many"], 0),
            ],
        },
        BookEntry {
            title: "Traits".to_string(),
            url: "/traits".to_string(),
            summary: String::new(),
            content: String::new(),
            questions: vec![Question::new("dyn or impl?", &["both"], 0)],
        },
    ])
    .expect("valid catalog")
}

type Seen = Rc<RefCell<Vec<LayoutState>>>;

fn mount(
    store: MemoryStore,
    hub: &ResizeHub,
    policy: ResizePolicy,
) -> (MountedShell<MemoryStore, ResizeHub>, Seen) {
    let config = ShellConfig {
        resize_policy: policy,
        ..ShellConfig::default()
    };
    let shell = AppShell::new(&config, hub.current(), catalog().default_score(), store);
    let seen: Seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let mounted = MountedShell::mount(shell, hub.clone(), move |s| sink.borrow_mut().push(s.clone()));
    (mounted, seen)
}

#[test]
fn mount_merges_persisted_score_into_defaults() {
    let hub = ResizeHub::new(landscape());
    let (mounted, seen) = mount(
        MemoryStore::with_raw("score", r#"{"0:0": 1}"#),
        &hub,
        ResizePolicy::Sticky,
    );

    let score = mounted.state().score;
    assert_eq!(score.get("0:0"), Some(ScoreValue::Points(1.0)));
    assert_eq!(score.get("0:1"), Some(ScoreValue::Points(0.0)));
    assert_eq!(score.get("1:0"), Some(ScoreValue::Points(0.0)));
    assert_eq!(seen.borrow().len(), 1);
}

#[test]
fn mount_subscribes_once_and_unmount_unsubscribes_once() {
    let hub = ResizeHub::new(landscape());
    let (mut mounted, _) = mount(MemoryStore::new("score"), &hub, ResizePolicy::Sticky);
    assert_eq!(hub.listener_count(), 1);
    assert!(mounted.is_mounted());

    mounted.unmount();
    mounted.unmount();
    assert_eq!(hub.listener_count(), 0);
    assert!(!mounted.is_mounted());
}

#[test]
fn resize_updates_narrow_flag_only() {
    let hub = ResizeHub::new(landscape());
    let (mounted, seen) = mount(MemoryStore::new("score"), &hub, ResizePolicy::Sticky);
    let before = mounted.state();

    hub.resize(portrait());

    let after = mounted.state();
    assert!(after.is_narrow_screen);
    assert_eq!(after.sidebar_visible, before.sidebar_visible);
    assert_eq!(after.score, before.score);
    assert_eq!(seen.borrow().last(), Some(&after));
}

#[test]
fn resize_after_unmount_changes_nothing() {
    let hub = ResizeHub::new(landscape());
    let (mut mounted, seen) = mount(MemoryStore::new("score"), &hub, ResizePolicy::Sticky);
    mounted.unmount();
    let before = mounted.state();
    let notifications = seen.borrow().len();

    hub.resize(portrait());

    assert_eq!(mounted.state(), before);
    assert_eq!(seen.borrow().len(), notifications);
}

#[test]
fn dropping_the_shell_releases_the_listener() {
    let hub = ResizeHub::new(landscape());
    {
        let _mounted = mount(MemoryStore::new("score"), &hub, ResizePolicy::Sticky);
        assert_eq!(hub.listener_count(), 1);
    }
    assert_eq!(hub.listener_count(), 0);
    hub.resize(portrait());
}

#[test]
fn narrow_screen_backdrop_click_dismisses_sidebar() {
    let hub = ResizeHub::new(portrait());
    let (mounted, _) = mount(MemoryStore::new("score"), &hub, ResizePolicy::Sticky);
    assert!(!mounted.state().sidebar_visible);

    mounted.toggle_sidebar();
    mounted.click(ClickTarget::Sidebar);
    assert!(mounted.state().sidebar_visible);

    mounted.click(ClickTarget::Backdrop);
    assert!(!mounted.state().sidebar_visible);
}

#[test]
fn follow_policy_tracks_orientation() {
    let hub = ResizeHub::new(landscape());
    let (mounted, _) = mount(MemoryStore::new("score"), &hub, ResizePolicy::Follow);
    hub.resize(portrait());
    assert!(!mounted.state().sidebar_visible);
    hub.resize(landscape());
    assert!(mounted.state().sidebar_visible);
}

#[test]
fn answering_a_question_writes_through() {
    let hub = ResizeHub::new(landscape());
    let (mounted, _) = mount(MemoryStore::new("score"), &hub, ResizePolicy::Sticky);
    let c = catalog();
    let book = &c.books()[0];

    let next = mounted.state().score.record_answer(&book.question_key(1), true);
    mounted.update_score(next.clone());

    assert_eq!(mounted.state().score, next);
    mounted.with_shell(|shell| {
        assert_eq!(shell.store().read(), Some(next.clone()));
        assert_eq!(shell.store().writes(), 1);
    });
    let progress = mounted.state().score.progress_for(book);
    assert_eq!((progress.answered, progress.correct, progress.total), (1, 1, 2));
}

#[test]
fn reset_restores_catalog_defaults() {
    let hub = ResizeHub::new(landscape());
    let (mounted, _) = mount(
        MemoryStore::with_raw("score", r#"{"0:0": true, "1:0": false}"#),
        &hub,
        ResizePolicy::Sticky,
    );
    mounted.toggle_reset();
    assert!(mounted.state().show_reset);

    mounted.reset_score();

    let state = mounted.state();
    assert!(!state.show_reset);
    assert_eq!(state.score, catalog().default_score());
}

#[test]
fn install_button_follows_availability() {
    let hub = ResizeHub::new(landscape());
    let (mounted, _) = mount(MemoryStore::new("score"), &hub, ResizePolicy::Sticky);
    mounted.set_install_available(true);
    assert!(mounted.state().show_install_button);
    mounted.set_install_available(false);
    assert!(!mounted.state().show_install_button);
}

#[test]
fn routes_cover_home_books_and_misses() {
    let c = catalog();
    assert_eq!(dispatch("/", &c), Route::Home);
    assert_eq!(dispatch("/traits", &c), Route::Book(c.books()[1].id));
    assert_eq!(dispatch("/missing", &c), Route::NotFound);
    assert_eq!(c, catalog());
}

#[test]
fn default_score_scenario_from_two_questions() {
    let defaults: ScoreRecord = [("q1", 0.0), ("q2", 0.0)].into_iter().collect();
    let mut store = MemoryStore::new("score");
    let persisted: ScoreRecord = [("q1", 1.0)].into_iter().collect();
    store.write(&persisted).unwrap();

    let hub = ResizeHub::new(landscape());
    let shell = AppShell::new(&ShellConfig::default(), hub.current(), defaults, store);
    let mounted = MountedShell::mount(shell, hub.clone(), |_| {});

    let expected: ScoreRecord = [("q1", 1.0), ("q2", 0.0)].into_iter().collect();
    assert_eq!(mounted.state().score, expected);
}
