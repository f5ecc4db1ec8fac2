use crate::domain::state::{Actor, GameStatus, SeatStatus};
use crate::domain::test_state_helpers::{cards, seats, GameBuilder, T0};
use crate::domain::tricks::{legal_moves, play_card, required_plays, TrickResolution};
use crate::domain::turns::leave_game;
use crate::domain::Suit;
use crate::errors::domain::DomainError;

#[test]
fn opening_trick_discards_after_every_seat_contributes() {
    let mut state = GameBuilder::new(seats(&[&["2S-0", "5H-0"], &["3S-0", "6H-0"], &["7D-0", "8H-0"]]))
        .first_trick()
        .trick(&[(Actor::Dealer, "AS-0")])
        .build();
    assert_eq!(required_plays(&state), 3);

    let r = play_card(&mut state, "p0", "2S-0", T0).unwrap();
    assert_eq!(r.resolution, None);
    assert_eq!(state.current_turn, Some(1));

    play_card(&mut state, "p1", "3S-0", T0).unwrap();
    assert_eq!(state.current_turn, Some(2));

    // Seat 2 has no spades; breaking suit on the opening trick is not a thulla.
    let r = play_card(&mut state, "p2", "7D-0", T0).unwrap();
    assert_eq!(r.resolution, Some(TrickResolution::OpeningDiscarded));
    assert_eq!(r.trick_number_after, 2);

    assert!(state.trick.is_empty());
    assert_eq!(state.waste_pile.len(), 4);
    assert_eq!(state.lead_suit, None);
    assert!(!state.is_first_trick);
    assert_eq!(state.power_holder, None);
    assert_eq!(state.current_turn, Some(1));
    assert!(state.seats.iter().all(|s| s.penalty_points == 0));
    assert_eq!(state.cards_in_play(), state.total_cards);
}

#[test]
fn opening_trick_must_still_follow_spades() {
    let mut state = GameBuilder::new(seats(&[&["2S-0", "5H-0"], &["3S-0"], &["7D-0"]]))
        .first_trick()
        .trick(&[(Actor::Dealer, "AS-0")])
        .build();
    let before = state.clone();
    assert_eq!(
        play_card(&mut state, "p0", "5H-0", T0),
        Err(DomainError::MustFollowSuit)
    );
    assert_eq!(state, before);
    assert_eq!(legal_moves(&state, 0), cards(&["2S-0"]));
}

#[test]
fn opening_trick_threshold_ignores_seats_that_left() {
    let mut state = GameBuilder::new(seats(&[&["2S-0"], &["3S-0", "4D-0"], &["5S-0", "6D-0"], &["7S-0", "8D-0"]]))
        .first_trick()
        .trick(&[(Actor::Dealer, "AS-0")])
        .build();
    leave_game(&mut state, "p3", T0).unwrap();
    assert_eq!(required_plays(&state), 3);

    play_card(&mut state, "p0", "2S-0", T0).unwrap();
    play_card(&mut state, "p1", "3S-0", T0).unwrap();
    let r = play_card(&mut state, "p2", "5S-0", T0).unwrap();
    assert_eq!(r.resolution, Some(TrickResolution::OpeningDiscarded));
    // Seat 0 emptied its hand on the opening trick.
    assert_eq!(state.seats[0].status, SeatStatus::Finished);
    assert_eq!(state.current_turn, Some(1));
}

#[test]
fn thulla_on_partial_trick_goes_to_highest_lead_card() {
    let mut state = GameBuilder::new(seats(&[&["TH-0", "2C-0"], &["KH-0", "4C-0"], &["3S-0", "5D-0"]])).build();

    play_card(&mut state, "p0", "TH-0", T0).unwrap();
    assert_eq!(state.lead_suit, Some(Suit::Hearts));
    play_card(&mut state, "p1", "KH-0", T0).unwrap();
    assert_eq!(legal_moves(&state, 2).len(), 2, "void in hearts, anything goes");

    let r = play_card(&mut state, "p2", "3S-0", T0).unwrap();
    assert_eq!(
        r.resolution,
        Some(TrickResolution::Thulla {
            winner: 1,
            picked_up: 3
        })
    );

    let hand = &state.seats[1].hand;
    assert_eq!(hand.len(), 4);
    for id in ["TH-0", "KH-0", "3S-0", "4C-0"] {
        assert!(hand.iter().any(|c| c.to_string() == id), "{id} missing");
    }
    assert_eq!(state.seats[1].penalty_points, 1);
    assert_eq!(state.power_holder, Some(1));
    assert_eq!(state.current_turn, Some(1));
    assert!(state.trick.is_empty());
    assert_eq!(state.lead_suit, None);
    assert!(!state.thulla_triggered);
    assert_eq!(state.trick_number, 3);
    assert_eq!(state.cards_in_play(), state.total_cards);
}

#[test]
fn thulla_never_hands_cards_to_a_finished_seat() {
    // Seat 0 led its last card and escaped; seat 1 followed low.
    let mut state = GameBuilder::new(seats(&[&[], &["4C-0"], &["3S-0", "5D-0"], &["9C-0"]]))
        .status_of(0, SeatStatus::Finished)
        .trick(&[(Actor::Seat(0), "AH-0"), (Actor::Seat(1), "2H-0")])
        .turn(2)
        .build();
    state.finish_order = vec![0];

    let r = play_card(&mut state, "p2", "3S-0", T0).unwrap();
    assert_eq!(
        r.resolution,
        Some(TrickResolution::Thulla {
            winner: 1,
            picked_up: 3
        })
    );
    assert!(state.seats[0].hand.is_empty());
    assert_eq!(state.seats[1].hand.len(), 4);
}

#[test]
fn equal_cards_from_two_decks_go_to_the_earlier_play() {
    let mut state =
        GameBuilder::new(seats(&[&["KH-0", "2C-0"], &["KH-1", "3C-0"], &["2H-0", "4C-0"]])).build();
    play_card(&mut state, "p0", "KH-0", T0).unwrap();
    play_card(&mut state, "p1", "KH-1", T0).unwrap();
    let r = play_card(&mut state, "p2", "2H-0", T0).unwrap();
    assert_eq!(r.resolution, Some(TrickResolution::Won { winner: 0 }));
    assert_eq!(state.power_holder, Some(0));
    assert_eq!(state.current_turn, Some(0));
    assert_eq!(state.waste_pile.len(), 3);
}

#[test]
fn winner_with_empty_hand_finishes_instead_of_leading() {
    let mut state =
        GameBuilder::new(seats(&[&["AH-0"], &["2H-0", "3C-0"], &["4H-0", "5C-0"], &["6H-0", "7C-0"]])).build();

    play_card(&mut state, "p0", "AH-0", T0).unwrap();
    assert_eq!(state.seats[0].status, SeatStatus::Finished);
    assert_eq!(state.finish_order, vec![0]);
    assert_eq!(state.current_turn, Some(1));

    // Three active seats remain and three cards are down once seat 2 plays.
    play_card(&mut state, "p1", "2H-0", T0).unwrap();
    let r = play_card(&mut state, "p2", "4H-0", T0).unwrap();
    assert_eq!(r.resolution, Some(TrickResolution::Won { winner: 0 }));

    assert_eq!(state.power_holder, Some(0));
    assert_eq!(state.current_turn, Some(1), "turn must skip the empty-handed winner");
    assert_eq!(state.finish_order, vec![0]);
}

#[test]
fn finishing_three_of_five_starts_shootout_then_fourth_names_bhabhi() {
    let mut state = GameBuilder::new(seats(&[
        &["AH-0"],
        &["2H-0"],
        &["3H-0"],
        &["4H-0", "9C-0"],
        &["5H-0", "TC-0"],
    ]))
    .build();

    play_card(&mut state, "p0", "AH-0", T0).unwrap();
    play_card(&mut state, "p1", "2H-0", T0).unwrap();
    let r = play_card(&mut state, "p2", "3H-0", T0).unwrap();
    assert_eq!(r.resolution, Some(TrickResolution::Won { winner: 0 }));
    assert_eq!(state.finish_order, vec![0, 1, 2]);
    assert_eq!(state.status, GameStatus::Shootout);
    assert_eq!(state.current_turn, Some(3));

    play_card(&mut state, "p3", "4H-0", T0).unwrap();
    let r = play_card(&mut state, "p4", "5H-0", T0).unwrap();
    assert_eq!(r.resolution, Some(TrickResolution::Won { winner: 4 }));
    assert_eq!(state.current_turn, Some(4));

    play_card(&mut state, "p4", "TC-0", T0).unwrap();
    assert_eq!(state.status, GameStatus::Ended);
    assert_eq!(state.current_turn, None);
    assert_eq!(state.turn_deadline, None);
    assert_eq!(state.seats[3].status, SeatStatus::Bhabhi);
    assert_eq!(state.finish_order, vec![0, 1, 2, 4, 3]);
    assert_eq!(state.cards_in_play(), state.total_cards);

    assert_eq!(
        play_card(&mut state, "p3", "9C-0", T0),
        Err(DomainError::GameNotActive)
    );
}

#[test]
fn leaving_sends_the_hand_to_waste_and_moves_the_turn() {
    let mut state = GameBuilder::new(seats(&[&["2C-0", "9H-0"], &["3C-0"], &["4C-0"], &["5C-0"]]))
        .trick(&[(Actor::Seat(3), "QC-0")])
        .build();
    let hands_before: Vec<usize> = state.seats.iter().map(|s| s.hand.len()).collect();

    leave_game(&mut state, "p0", T0).unwrap();
    assert_eq!(state.seats[0].status, SeatStatus::Left);
    assert_eq!(state.waste_pile, cards(&["2C-0", "9H-0"]));
    for seat in 1..4 {
        assert_eq!(state.seats[seat].hand.len(), hands_before[seat]);
    }
    assert_eq!(state.trick.len(), 1, "trick untouched");
    assert_eq!(state.current_turn, Some(1));
    assert_eq!(state.cards_in_play(), state.total_cards);
}

#[test]
fn rejections_follow_check_order_and_leave_state_untouched() {
    let build = || {
        GameBuilder::new(seats(&[&["2H-0", "5C-0"], &["3C-0"], &["4C-0"]]))
            .trick(&[(Actor::Seat(2), "9H-0")])
            .build()
    };
    let mut state = build();
    let before = state.clone();

    let cases = [
        ("ghost", "2H-0", DomainError::NotYourTurn),
        ("p1", "3C-0", DomainError::NotYourTurn),
        ("p0", "3C-0", DomainError::card_not_in_hand("3C-0")),
        ("p0", "not-a-card", DomainError::card_not_in_hand("not-a-card")),
        ("p0", "5C-0", DomainError::MustFollowSuit),
    ];
    for (player, card, expected) in cases {
        assert_eq!(play_card(&mut state, player, card, T0), Err(expected));
        assert_eq!(state, before);
    }

    let mut inactive = GameBuilder::new(seats(&[&["2H-0"], &["3C-0"], &["4C-0"]]))
        .status_of(0, SeatStatus::Finished)
        .build();
    assert_eq!(
        play_card(&mut inactive, "p0", "2H-0", T0),
        Err(DomainError::PlayerNotActive)
    );

    let mut ended = GameBuilder::new(seats(&[&["2H-0"], &["3C-0"], &["4C-0"]]))
        .game_status(GameStatus::Ended)
        .build();
    assert_eq!(
        play_card(&mut ended, "ghost", "2H-0", T0),
        Err(DomainError::GameNotActive)
    );
}

#[test]
fn leading_sets_the_suit_and_hands_on_the_turn() {
    let mut state = GameBuilder::new(seats(&[&["2D-0", "5C-0"], &["3C-0"], &["4C-0"]])).build();
    let seq = state.turn_seq;
    assert_eq!(legal_moves(&state, 0).len(), 2);

    play_card(&mut state, "p0", "2D-0", T0).unwrap();
    assert_eq!(state.lead_suit, Some(Suit::Diamonds));
    assert_eq!(state.current_turn, Some(1));
    assert_eq!(state.turn_seq, seq + 1);
    assert!(legal_moves(&state, 0).is_empty());
}
