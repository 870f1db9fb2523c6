//! Search box behaviour driven through a session: debouncing, lookups,
//! stale responses and confirmation.

mod common;

use aemap::app::RouteTable;
use aemap::data::MemoryDataSource;
use aemap::{AppState, Event, MapSession, Theme};
use common::{point_layer, session, settle, ScriptedClient};
use std::time::Duration;

const OAKLAND: (&str, [f64; 2]) = ("Oakland, CA", [37.8, -122.27]);
const OAK_PARK: (&str, [f64; 2]) = ("Oak Park, IL", [41.88, -87.79]);

fn search_state() -> AppState {
    let routes = RouteTable {
        default_path: "/covid-19".to_string(),
        ..RouteTable::default()
    };
    AppState::new(Default::default(), routes, Theme::default())
}

fn data() -> MemoryDataSource {
    MemoryDataSource::new(vec![point_layer("rent", "Rent Strikes", 1, &[[-122.27, 37.8]])])
}

/// A session on the search route with its layers loaded.
async fn ready_session(client: &ScriptedClient) -> MapSession<ScriptedClient, MemoryDataSource> {
    let mut session = session(search_state(), client.clone(), data());
    session.dispatch(&Event::Mount);
    settle(&mut session).await;
    session
}

fn type_text<D: aemap::data::DataSource + 'static>(session: &mut MapSession<ScriptedClient, D>, text: &str) {
    for end in 1..=text.chars().count() {
        let prefix: String = text.chars().take(end).collect();
        session.dispatch(&Event::SearchInput(prefix));
    }
}

fn result_names(state: &AppState) -> Option<Vec<String>> {
    state
        .ui
        .search_results
        .as_ref()
        .map(|results| results.iter().map(|r| r.name.clone()).collect())
}

#[tokio::test(start_paused = true)]
async fn oakland_lookup_and_confirm() {
    let client = ScriptedClient::new([("Oakland", Duration::ZERO, vec![OAKLAND])]);
    let mut session = ready_session(&client).await;

    type_text(&mut session, "Oakland");
    assert_eq!(session.state().ui.search_term, "Oakland");
    settle(&mut session).await;

    assert_eq!(client.requested_terms(), vec!["Oakland".to_string()]);
    let url = client.urls.lock().unwrap()[0].clone();
    assert!(url.contains("q=Oakland"));
    assert!(url.contains("key=test-key"));
    assert!(!url.contains("culture="));
    assert_eq!(result_names(session.state()), Some(vec!["Oakland, CA".to_string()]));

    let scene = session.scene();
    let options = scene.content.as_ref().and_then(|c| c.search_box.as_ref()).map(|s| s.options.len());
    assert_eq!(options, Some(1));

    assert!(session.dispatch(&Event::SearchConfirm("Oakland, CA".to_string())));

    let state = session.state();
    assert_eq!(state.ui.search_term, "Oakland, CA");
    assert_eq!(state.ui.search_results, None);
    let popup = state.data.search_popup.as_ref().unwrap();
    assert_eq!(popup.coords, [37.8, -122.27]);
    assert_eq!(popup.content, "Oakland, CA");

    let popup_view = session.scene().content.and_then(|c| c.popup).unwrap();
    assert_eq!(popup_view.position, [37.8, -122.27]);
    assert!(session.render(80).contains("Oakland, CA"));
}

#[tokio::test(start_paused = true)]
async fn quiet_period_restarts_on_every_input() {
    let client = ScriptedClient::new([("Oakland", Duration::ZERO, vec![OAKLAND])]);
    let mut session = ready_session(&client).await;

    session.dispatch(&Event::SearchInput("Oak".to_string()));
    tokio::time::sleep(Duration::from_millis(150)).await;
    session.dispatch(&Event::SearchInput("Oakland".to_string()));
    tokio::time::sleep(Duration::from_millis(150)).await;

    assert!(!session.try_pump());
    assert!(session.search_pending());
    assert!(client.requested_terms().is_empty());

    tokio::time::sleep(Duration::from_millis(60)).await;
    settle(&mut session).await;

    assert_eq!(client.requested_terms(), vec!["Oakland".to_string()]);
}

#[tokio::test(start_paused = true)]
async fn stale_response_is_discarded() {
    let client = ScriptedClient::new([
        ("Oak", Duration::from_millis(800), vec![OAK_PARK]),
        ("Oakland", Duration::from_millis(10), vec![OAKLAND]),
    ]);
    let mut session = ready_session(&client).await;

    session.dispatch(&Event::SearchInput("Oak".to_string()));
    tokio::time::sleep(Duration::from_millis(250)).await;
    session.try_pump();
    session.dispatch(&Event::SearchInput("Oakland".to_string()));
    tokio::time::sleep(Duration::from_millis(250)).await;
    session.try_pump();

    settle(&mut session).await;

    assert_eq!(client.requested_terms(), vec!["Oak".to_string(), "Oakland".to_string()]);
    assert_eq!(result_names(session.state()), Some(vec!["Oakland, CA".to_string()]));
}

#[tokio::test(start_paused = true)]
async fn clearing_the_input_drops_results_without_a_request() {
    let client = ScriptedClient::new([("Oakland", Duration::ZERO, vec![OAKLAND])]);
    let mut session = ready_session(&client).await;

    session.dispatch(&Event::SearchInput("Oakland".to_string()));
    settle(&mut session).await;
    assert!(session.state().ui.search_results.is_some());

    session.dispatch(&Event::SearchInput(String::new()));
    settle(&mut session).await;

    assert_eq!(session.state().ui.search_results, None);
    assert_eq!(client.requested_terms().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn enter_without_results_does_nothing() {
    let client = ScriptedClient::new([]);
    let mut session = ready_session(&client).await;
    session.dispatch(&Event::SearchInput("Oak".to_string()));
    session.dispatch(&Event::SearchInput(String::new()));
    settle(&mut session).await;

    assert!(!session.dispatch(&Event::SearchConfirm("Oakland".to_string())));

    let state = session.state();
    assert_eq!(state.ui.search_term, "");
    assert_eq!(state.ui.search_results, None);
    assert!(state.data.search_popup.is_none());
}

#[tokio::test(start_paused = true)]
async fn unmatched_confirmation_uses_first_result() {
    let client = ScriptedClient::new([("Oak", Duration::ZERO, vec![OAK_PARK, OAKLAND])]);
    let mut session = ready_session(&client).await;
    session.dispatch(&Event::SearchInput("Oak".to_string()));
    settle(&mut session).await;

    session.dispatch(&Event::SearchConfirm("oak".to_string()));

    let popup = session.state().data.search_popup.clone().unwrap();
    assert_eq!(popup.coords, OAK_PARK.1);
    assert_eq!(popup.content, "oak");
}

#[tokio::test(start_paused = true)]
async fn confirming_cancels_the_pending_lookup() {
    let client = ScriptedClient::new([
        ("Oakland", Duration::ZERO, vec![OAKLAND]),
        ("Oakland, C", Duration::ZERO, vec![OAKLAND]),
    ]);
    let mut session = ready_session(&client).await;
    session.dispatch(&Event::SearchInput("Oakland".to_string()));
    settle(&mut session).await;

    session.dispatch(&Event::SearchInput("Oakland, C".to_string()));
    session.dispatch(&Event::SearchConfirm("Oakland, CA".to_string()));
    settle(&mut session).await;

    assert_eq!(client.requested_terms(), vec!["Oakland".to_string()]);
    assert_eq!(session.state().ui.search_results, None);
    assert_eq!(session.state().ui.search_term, "Oakland, CA");
}

#[tokio::test(start_paused = true)]
async fn failed_lookup_keeps_previous_results() {
    let client = ScriptedClient::new([("Oakland", Duration::ZERO, vec![OAKLAND])]);
    let mut session = ready_session(&client).await;
    session.dispatch(&Event::SearchInput("Oakland".to_string()));
    settle(&mut session).await;

    session.dispatch(&Event::SearchInput("Atlantis".to_string()));
    settle(&mut session).await;

    assert_eq!(client.requested_terms(), vec!["Oakland".to_string(), "Atlantis".to_string()]);
    assert_eq!(result_names(session.state()), Some(vec!["Oakland, CA".to_string()]));
}

#[tokio::test(start_paused = true)]
async fn input_is_ignored_off_the_search_route() {
    let client = ScriptedClient::new([("Oakland", Duration::ZERO, vec![OAKLAND])]);
    let mut session = session(AppState::default(), client.clone(), data());

    assert!(!session.dispatch(&Event::SearchInput("Oakland".to_string())));
    settle(&mut session).await;

    assert!(client.requested_terms().is_empty());
    assert_eq!(session.state().ui.search_term, "");
}

#[tokio::test(start_paused = true)]
async fn confirming_drops_a_term_that_already_settled() {
    let client = ScriptedClient::new([
        ("Oakland", Duration::ZERO, vec![OAKLAND]),
        ("Oakland, CA", Duration::ZERO, vec![OAKLAND]),
    ]);
    let mut session = ready_session(&client).await;
    session.dispatch(&Event::SearchInput("Oakland".to_string()));
    settle(&mut session).await;

    // The quiet period elapses, but the settled term is not handled before
    // Enter arrives.
    session.dispatch(&Event::SearchInput("Oakland, CA".to_string()));
    tokio::time::sleep(Duration::from_millis(201)).await;
    assert!(!session.search_pending());
    session.dispatch(&Event::SearchConfirm("Oakland, CA".to_string()));
    settle(&mut session).await;

    assert_eq!(client.requested_terms(), vec!["Oakland".to_string()]);
    assert_eq!(session.state().ui.search_results, None);
    assert_eq!(session.state().ui.search_term, "Oakland, CA");
}

#[tokio::test(start_paused = true)]
async fn input_is_ignored_until_layers_resolve() {
    let client = ScriptedClient::new([("Oakland", Duration::ZERO, vec![OAKLAND])]);
    let slow = common::DelayedSource::new(vec![(
        Duration::from_secs(1),
        point_layer("rent", "Rent Strikes", 1, &[[-122.27, 37.8]]),
    )]);
    let mut session = session(search_state(), client.clone(), slow);
    session.dispatch(&Event::Mount);
    session.pump().await;

    assert!(!session.dispatch(&Event::SearchInput("Oakland".to_string())));
    assert!(!session.search_pending());

    settle(&mut session).await;
    assert!(session.scene().content.and_then(|c| c.search_box).is_some());
    assert!(session.dispatch(&Event::SearchInput("Oakland".to_string())));
    settle(&mut session).await;

    assert_eq!(client.requested_terms(), vec!["Oakland".to_string()]);
}
