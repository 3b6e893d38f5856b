use events::{Event, VotingEndedData};
use primitives::DAY;

mod common;

use common::{_identity, _options, _service};

#[tokio::test]
async fn each_committed_operation_is_announced() {
    let (service, clock) = _service();
    let mut events = service.subscribe();

    let (id, capability) = service
        .create_ballot("Lunch", "", _options(&["Yes", "No"]), DAY, _identity("creator"))
        .unwrap();
    service.cast_vote(id, 1, &_identity("alice")).unwrap();
    clock.advance(DAY);
    service.end_voting(id, &capability).unwrap();

    match events.recv().await.unwrap().event {
        Event::BallotCreated(created) => {
            assert_eq!(created.ballot_id, id);
            assert_eq!(created.title, "Lunch");
            assert_eq!(created.creator, _identity("creator"));
        },
        other => panic!("unexpected event: {other:?}"),
    }

    match events.recv().await.unwrap().event {
        Event::VoteCast(vote) => {
            assert_eq!(vote.voter, _identity("alice"));
            assert_eq!(vote.option_index, 1);
            assert_eq!(vote.option, "No");
        },
        other => panic!("unexpected event: {other:?}"),
    }

    assert_eq!(
        events.recv().await.unwrap().event,
        Event::VotingEnded(VotingEndedData {
            ballot_id: id,
            total_votes: 1,
            winning_option: "No".to_string(),
            winning_votes: 1,
        })
    );
}

#[tokio::test]
async fn rejected_operations_are_not_announced() {
    let (service, _) = _service();
    let (id, capability) = service
        .create_ballot("Lunch", "", _options(&["Yes"]), DAY, _identity("creator"))
        .unwrap();
    let mut events = service.subscribe();

    service.cast_vote(id, 3, &_identity("alice")).unwrap_err();
    service.end_voting(id, &capability).unwrap_err();

    assert!(events.try_recv().is_err());
}

#[test]
fn operations_succeed_without_subscribers() {
    let (service, clock) = _service();
    let (id, capability) = service
        .create_ballot("Lunch", "", _options(&["Yes"]), DAY, _identity("creator"))
        .unwrap();

    service.cast_vote(id, 0, &_identity("alice")).unwrap();
    clock.advance(DAY);

    let first = service.end_voting(id, &capability).unwrap();
    let second = service.end_voting(id, &capability).unwrap();
    assert_eq!(first, second);
}
