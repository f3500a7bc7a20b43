//! Room-level behaviour through the `Table` union.

mod common;

use card_table::{
    BlackjackMove, CardFace, Choice, Deck, EngineError, GameRng, IllegalReason, ParticipantId, Table, TableConfig,
    TableView, Turn, Variant, WarMove,
};
use common::{id, ids, init_logging, split, stacked};

fn blackjack(players: &[&str], deal: &[&str]) -> Table {
    init_logging();
    Table::with_deck(TableConfig::new(Variant::Blackjack), ids(players), stacked(deal)).unwrap()
}

#[test]
fn test_config_from_json() {
    init_logging();
    let config: TableConfig = serde_json::from_str(r#"{"variant": "War", "seed": 11, "starting_bank": 250}"#).unwrap();
    assert_eq!(config.war_commit, 4);

    let table = Table::new(config, ids(&["ana", "bo"])).unwrap();
    assert_eq!(table.variant(), Variant::War);
    assert_eq!(table.participant(&id("bo")).unwrap().bank(), 250);
}

#[test]
fn test_zero_war_commit_document_refused() {
    init_logging();
    let config: TableConfig = serde_json::from_str(r#"{"variant": "War", "war_commit": 0}"#).unwrap();

    let err = Table::with_deck(config, ids(&["ana", "bo"]), split(&[&["KH", "2H"], &["KS", "2S"]])).unwrap_err();
    assert!(matches!(err, EngineError::InvalidConfig(_)));
}

#[test]
fn test_house_id_cannot_be_seated() {
    init_logging();
    let err = Table::new(TableConfig::new(Variant::Blackjack), ids(&["ana", "Dealer"])).unwrap_err();
    assert_eq!(err, EngineError::ReservedParticipant(ParticipantId::dealer()));
}

#[test]
fn test_rng_checkpoint_replays_next_deal() {
    init_logging();
    let mut table = Table::new(TableConfig::new(Variant::Blackjack).with_seed(31), ids(&["ana"])).unwrap();
    let state = table.rng_state();

    table.reset_for_new_round();
    let replayed = Deck::shuffled(&mut GameRng::from_state(&state).fork());
    assert_eq!(table.as_blackjack().unwrap().deck(), &replayed);
}

#[test]
fn test_display_state_is_idempotent() {
    let mut table = blackjack(&["ana", "bo"], &["2H", "3H", "10S", "4H", "5H", "7S"]);
    table.initial_deal().unwrap();

    let first = table.display_state();
    let second = table.display_state();
    assert_eq!(first, second);
    assert_eq!(first.turn, Turn::Participant(id("ana")));
    assert_eq!(first.deck, 0);
}

#[test]
fn test_display_hides_hole_card_only() {
    let mut table = blackjack(&["ana"], &["2H", "10S", "4H", "7S"]);
    table.initial_deal().unwrap();

    let view = table.display_state();
    let ana = view.participant(&id("ana")).unwrap();
    assert!(ana.cards.iter().all(|c| matches!(c, CardFace::Up(_))));
    assert_eq!(ana.total, Some(6));

    let dealer = view.dealer.as_ref().unwrap();
    assert_eq!(dealer.cards[1], CardFace::Down);
    assert_eq!(dealer.visible_cards().count(), 1);
}

#[test]
fn test_snapshot_bytes_round_trip() {
    init_logging();
    let mut table = Table::with_deck(
        TableConfig::new(Variant::War),
        ids(&["ana", "bo"]),
        split(&[&["KH", "2H"], &["3C", "4C"]]),
    )
    .unwrap();
    table.initial_deal().unwrap();
    table.apply(&id("ana"), WarMove::Draw.into()).unwrap();

    let view = table.display_state();
    let decoded = TableView::from_bytes(&view.to_bytes().unwrap()).unwrap();
    assert_eq!(decoded, view);
    assert_eq!(decoded.stake, 1);

    let json = serde_json::to_string(&view).unwrap();
    assert_eq!(serde_json::from_str::<TableView>(&json).unwrap(), view);
}

#[test]
fn test_rejections_leave_state_untouched() {
    let mut table = blackjack(&["ana", "bo"], &["2H", "3H", "10S", "4H", "5H", "7S", "9C"]);
    table.initial_deal().unwrap();
    let before = table.display_state();

    let attempts: [(&str, Choice, EngineError); 3] = [
        ("bo", BlackjackMove::Hit.into(), IllegalReason::NotYourTurn(id("bo")).into()),
        ("ana", WarMove::Draw.into(), IllegalReason::WrongVariant.into()),
        ("zed", BlackjackMove::Stand.into(), EngineError::InvalidParticipant(id("zed"))),
    ];
    for (who, choice, expected) in attempts {
        assert_eq!(table.apply(&id(who), choice), Err(expected));
    }

    assert_eq!(table.display_state(), before);
    assert!(table.history().is_empty());
}

#[test]
fn test_remove_last_seat_hands_turn_to_dealer() {
    let mut table = blackjack(&["ana", "bo"], &["2H", "3H", "10S", "4H", "5H", "7S"]);
    table.initial_deal().unwrap();
    table.apply(&id("ana"), BlackjackMove::Stand.into()).unwrap();

    let removed = table.remove_participant(&id("bo")).unwrap();
    assert_eq!(removed.id(), &id("bo"));
    assert_eq!(table.current_turn(), Turn::Dealer);
    assert_eq!(
        table.remove_participant(&id("bo")).unwrap_err(),
        EngineError::InvalidParticipant(id("bo"))
    );
}

#[test]
fn test_remove_then_timeout_never_panics() {
    let mut table = blackjack(&["ana", "bo", "cy"], &["2H", "3H", "4H", "10S", "5H", "6H", "7H", "7S"]);
    table.initial_deal().unwrap();

    table.remove_participant(&id("ana")).unwrap();
    assert!(table.is_turn(&id("bo")));
    table.remove_participant(&id("cy")).unwrap();
    assert!(table.is_turn(&id("bo")));

    assert_eq!(table.default_move().unwrap(), Turn::Dealer);
    assert_eq!(table.advance_turn(), Turn::Dealer);
}

#[test]
fn test_war_removal_can_end_game() {
    init_logging();
    let mut table = Table::with_deck(
        TableConfig::new(Variant::War),
        ids(&["ana", "bo"]),
        split(&[&["KH", "2H"], &["3C", "4C"]]),
    )
    .unwrap();
    table.place_wager(&id("ana"), 10).unwrap();
    table.initial_deal().unwrap();

    table.remove_participant(&id("bo")).unwrap();
    assert!(!table.is_in_progress());
    assert_eq!(table.current_turn(), Turn::GameOver);
    assert!(table.compute_result().unwrap().is_winner(&id("ana")));
}

#[test]
fn test_reset_unseats_bankrupt_players() {
    let mut table = blackjack(&["ana", "bo"], &["10H", "10C", "10S", "7H", "6C", "9S"]);
    table.place_wager(&id("ana"), 100).unwrap();
    table.place_wager(&id("bo"), 40).unwrap();
    table.initial_deal().unwrap();
    while table.current_turn().participant().is_some() {
        table.default_move().unwrap();
    }
    while table.current_turn() == Turn::Dealer {
        table.tick().unwrap();
    }
    assert!(table.compute_result().unwrap().house_won());

    assert_eq!(table.reset_for_new_round(), vec![id("ana")]);
    assert_eq!(table.participants().len(), 1);
    assert_eq!(table.participant(&id("bo")).unwrap().bank(), 60);
    assert_eq!(table.current_turn(), Turn::NotStarted);
    assert!(table.is_in_progress());
}

#[test]
fn test_seeded_war_game_runs_to_completion() {
    init_logging();
    let config = TableConfig::new(Variant::War).with_seed(2024).with_reshuffled_winnings();
    let mut table = Table::new(config, ids(&["ana", "bo", "cy"])).unwrap();
    table.initial_deal().unwrap();

    let mut rounds = 0;
    while table.is_in_progress() && rounds < 5_000 {
        match table.current_turn() {
            Turn::Participant(_) => {
                table.default_move().unwrap();
            }
            Turn::RoundOver => {
                if table.tick().unwrap() != Turn::RoundOver {
                    rounds += 1;
                }
            }
            other => panic!("unexpected turn {other:?}"),
        }
    }

    let history = table.history();
    assert!(history.iter().all(|r| r.choice == Choice::War(WarMove::Draw)));
    assert!(table.round_result().is_some());
}
