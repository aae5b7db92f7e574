use std::sync::Arc;

use super::common::{
    application, MemoryDisqualificationStore, UnavailableDisqualificationStore,
};
use crate::workflows::pipeline::disqualify::{
    DisqualificationFlow, DisqualifyError, FlowState, OTHER_SENTINEL,
};
use crate::workflows::pipeline::domain::{
    ApplicationStatus, CannedReason, DisqualificationReason,
};
use crate::workflows::pipeline::repository::StoreError;

#[test]
fn menu_lists_every_canned_reason_and_the_sentinel() {
    let menu = DisqualificationFlow::<MemoryDisqualificationStore>::menu();
    assert_eq!(menu.len(), CannedReason::ordered().len() + 1);
    assert_eq!(menu.last(), Some(&OTHER_SENTINEL));
    assert!(menu.contains(&"Lack of fit"));
}

#[test]
fn immediate_rejection_commits_with_an_empty_reason() {
    let store = Arc::new(MemoryDisqualificationStore::default());
    let mut flow = DisqualificationFlow::new(store.clone());
    let mut app = application(Some("s-screen"));

    flow.reject_immediately(&mut app)
        .expect("immediate rejection commits");

    assert_eq!(flow.state(), FlowState::Committed);
    assert_eq!(app.status, ApplicationStatus::Disqualified);
    let commits = store.commits();
    assert_eq!(commits.len(), 1);
    assert_eq!(commits[0].1, DisqualificationReason::Unspecified);
    assert_eq!(commits[0].1.as_text(), "");
}

#[test]
fn choosing_other_always_opens_custom_entry() {
    let store = Arc::new(MemoryDisqualificationStore::default());
    let mut flow = DisqualificationFlow::new(store.clone());
    let mut app = application(Some("s-screen"));

    flow.open_reason_menu().expect("menu opens from idle");
    let state = flow
        .choose_canned(&mut app, OTHER_SENTINEL)
        .expect("sentinel is accepted");

    assert_eq!(state, FlowState::CustomReasonEntry);
    assert_eq!(app.status, ApplicationStatus::Active);
    assert!(store.commits().is_empty());
}

#[test]
fn canned_selection_commits_directly() {
    let store = Arc::new(MemoryDisqualificationStore::default());
    let mut flow = DisqualificationFlow::new(store.clone());
    let mut app = application(Some("s-screen"));

    flow.open_reason_menu().expect("menu opens from idle");
    let state = flow
        .choose_canned(&mut app, "Position filled")
        .expect("canned reason commits");

    assert_eq!(state, FlowState::Committed);
    assert_eq!(
        app.disqualification,
        Some(DisqualificationReason::Canned(CannedReason::PositionFilled))
    );
}

#[test]
fn unknown_menu_entries_are_rejected() {
    let store = Arc::new(MemoryDisqualificationStore::default());
    let mut flow = DisqualificationFlow::new(store.clone());
    let mut app = application(Some("s-screen"));

    flow.open_reason_menu().expect("menu opens from idle");
    match flow.choose_canned(&mut app, "Bad vibes") {
        Err(DisqualifyError::UnknownReason(text)) => assert_eq!(text, "Bad vibes"),
        other => panic!("expected unknown reason, got {other:?}"),
    }
    assert_eq!(flow.state(), FlowState::ReasonSelection);
}

#[test]
fn blank_custom_text_is_correctable_in_place() {
    let store = Arc::new(MemoryDisqualificationStore::default());
    let mut flow = DisqualificationFlow::new(store.clone());
    let mut app = application(Some("s-screen"));

    flow.open_reason_menu().expect("menu opens from idle");
    flow.choose_canned(&mut app, OTHER_SENTINEL)
        .expect("sentinel accepted");

    for blank in ["", "   "] {
        match flow.submit_custom(&mut app, blank) {
            Err(DisqualifyError::EmptyReason) => {}
            other => panic!("expected empty reason, got {other:?}"),
        }
        assert_eq!(flow.state(), FlowState::CustomReasonEntry);
        assert_eq!(app.status, ApplicationStatus::Active);
    }

    flow.submit_custom(&mut app, "  Lack of fit  ")
        .expect("trimmed text commits");
    assert_eq!(
        app.disqualification,
        Some(DisqualificationReason::Custom("Lack of fit".to_string()))
    );
    assert_eq!(
        app.disqualification.as_ref().map(|r| r.as_text()),
        Some("Lack of fit")
    );
}

#[test]
fn cancel_returns_to_idle_from_any_pending_state() {
    let store = Arc::new(MemoryDisqualificationStore::default());
    let mut app = application(Some("s-screen"));

    let mut flow = DisqualificationFlow::new(store.clone());
    flow.open_reason_menu().expect("menu opens");
    flow.cancel().expect("cancel from selection");
    assert_eq!(flow.state(), FlowState::Idle);

    flow.open_reason_menu().expect("menu reopens");
    flow.choose_canned(&mut app, OTHER_SENTINEL)
        .expect("sentinel accepted");
    flow.cancel().expect("cancel from custom entry");
    assert_eq!(flow.state(), FlowState::Idle);

    assert!(store.commits().is_empty());
    assert_eq!(app.status, ApplicationStatus::Active);
}

#[test]
fn operations_out_of_sequence_are_invalid() {
    let store = Arc::new(MemoryDisqualificationStore::default());
    let mut flow = DisqualificationFlow::new(store.clone());
    let mut app = application(Some("s-screen"));

    // Custom submission requires passing through the menu first.
    assert!(matches!(
        flow.submit_custom(&mut app, "reason"),
        Err(DisqualifyError::InvalidState(FlowState::Idle))
    ));

    flow.reject_immediately(&mut app).expect("commits");
    assert!(matches!(
        flow.open_reason_menu(),
        Err(DisqualifyError::InvalidState(FlowState::Committed))
    ));
    assert!(matches!(
        flow.cancel(),
        Err(DisqualifyError::InvalidState(FlowState::Committed))
    ));
}

#[test]
fn commit_failure_keeps_state_so_the_caller_decides() {
    let mut flow = DisqualificationFlow::new(Arc::new(UnavailableDisqualificationStore));
    let mut app = application(Some("s-screen"));
    let before = app.clone();

    flow.open_reason_menu().expect("menu opens");
    flow.choose_canned(&mut app, OTHER_SENTINEL)
        .expect("sentinel accepted");

    match flow.submit_custom(&mut app, "Lack of fit") {
        Err(DisqualifyError::CommitFailed(StoreError::Unavailable(_))) => {}
        other => panic!("expected commit failure, got {other:?}"),
    }

    assert_eq!(flow.state(), FlowState::CustomReasonEntry);
    assert_eq!(app, before);
}
