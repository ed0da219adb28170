//! End-to-end game flows through the casino API.
//!
//! These tests verify that every chip debited or credited is accounted for
//! in the settlements, across all five games.

use casino_engine::{
    Casino, CasinoConfig, CasinoError, GameKind, GameParams, GameStatus, Ledger, Move,
    game::{
        BaccaratSide, Blackjack, Card, GameDetail, GameRng, LetterStatus, Shoe, Suit, Tower,
        Wordle,
        entities::{ACE, KING, QUEEN},
    },
    ledger::{AccountId, MemoryStore},
    session::SessionTimeouts,
};
use std::{sync::Arc, time::Duration};

fn casino_with_seed(seed: u64) -> Casino {
    Casino::with_seed(
        Arc::new(Ledger::in_memory(10_000)),
        CasinoConfig::default(),
        seed,
    )
}

fn hearts(values: &[u8]) -> Shoe {
    Shoe::stacked(values.iter().map(|&v| Card(v, Suit::Heart)).collect())
}

#[tokio::test]
async fn test_blackjack_natural_scenario() {
    let casino = casino_with_seed(1);
    let player = AccountId::from("42");
    let game = Blackjack::with_shoe(100, hearts(&[KING, ACE, 9, 9]), GameRng::seeded(0)).unwrap();

    let started = casino.start_prepared(&player, game.into()).await.unwrap();

    let settlement = started.settlement.expect("natural settles on the deal");
    assert_eq!(settlement.status, GameStatus::Won);
    assert_eq!(settlement.payout, 250);
    assert_eq!(
        casino.query_balance(&player).await.unwrap(),
        10_000 - 100 + 250
    );
}

#[tokio::test]
async fn test_blackjack_hit_then_stand() {
    let casino = casino_with_seed(2);
    let player = AccountId::from("43");
    // Player 5+6, dealer 10+7; player hits a 9 for 20 and stands.
    let game =
        Blackjack::with_shoe(200, hearts(&[5, 6, 10, 7, 9]), GameRng::seeded(0)).unwrap();
    casino.start_prepared(&player, game.into()).await.unwrap();

    let outcome = casino
        .apply_move(&player, GameKind::Blackjack, Move::Hit)
        .await
        .unwrap();
    assert!(outcome.settlement.is_none());
    let GameDetail::Blackjack(table) = &outcome.view.detail else {
        panic!("expected a blackjack view");
    };
    assert_eq!(table.player_total, 20);
    assert!(table.dealer_hole_hidden);
    assert_eq!(table.dealer_total, None);

    let outcome = casino
        .apply_move(&player, GameKind::Blackjack, Move::Stand)
        .await
        .unwrap();
    let settlement = outcome.settlement.unwrap();
    assert_eq!(settlement.payout, 400);
    assert_eq!(settlement.balance, 10_200);
}

#[tokio::test]
async fn test_blackjack_bust_pays_nothing() {
    let casino = casino_with_seed(3);
    let player = AccountId::from("44");
    let game =
        Blackjack::with_shoe(100, hearts(&[10, 6, 10, 7, QUEEN]), GameRng::seeded(0)).unwrap();
    casino.start_prepared(&player, game.into()).await.unwrap();

    let outcome = casino
        .apply_move(&player, GameKind::Blackjack, Move::Hit)
        .await
        .unwrap();
    let settlement = outcome.settlement.unwrap();
    assert_eq!(settlement.status, GameStatus::Lost);
    assert_eq!(settlement.balance, 9_900);
}

#[tokio::test]
async fn test_blackjack_max_bet_enforced() {
    let casino = casino_with_seed(4);
    let err = casino
        .start_game(&AccountId::from("45"), GameParams::Blackjack { bet: 10_001 })
        .await
        .unwrap_err();
    assert!(matches!(err, CasinoError::Validation(_)));
}

#[tokio::test]
async fn test_baccarat_natural_scenario() {
    let casino = casino_with_seed(5);
    let player = AccountId::from("46");
    let mut shoe = hearts(&[KING, 9, 3, 3]);
    let game = casino_engine::game::Baccarat::with_shoe(
        100,
        BaccaratSide::Player,
        &mut shoe,
        &mut GameRng::seeded(0),
    )
    .unwrap();

    let started = casino.start_prepared(&player, game.into()).await.unwrap();
    let settlement = started.settlement.unwrap();
    assert_eq!(settlement.payout, 200);
    assert_eq!(settlement.balance, 10_100);
}

#[tokio::test]
async fn test_mines_rejects_bad_mine_count() {
    let casino = casino_with_seed(6);
    let player = AccountId::from("47");
    let err = casino
        .start_game(&player, GameParams::Mines { bet: 100, mines: 11 })
        .await
        .unwrap_err();
    assert!(matches!(err, CasinoError::Validation(_)));
    assert_eq!(casino.query_balance(&player).await.unwrap(), 10_000);
    assert!(casino.sessions().is_empty().await);
}

#[tokio::test]
async fn test_tower_full_climb() {
    let casino = casino_with_seed(7);
    let player = AccountId::from("48");
    let game = Tower::with_bombs(100, vec![3; 10], GameRng::seeded(0)).unwrap();
    casino.start_prepared(&player, game.into()).await.unwrap();

    for level in 1..=9 {
        let outcome = casino
            .apply_move(&player, GameKind::Tower, Move::Climb { level, tile: 2 })
            .await
            .unwrap();
        assert!(outcome.settlement.is_none());
    }
    let outcome = casino
        .apply_move(&player, GameKind::Tower, Move::Climb { level: 10, tile: 1 })
        .await
        .unwrap();
    let settlement = outcome.settlement.unwrap();
    assert_eq!(settlement.payout, 550);
    assert_eq!(settlement.balance, 10_450);
}

#[tokio::test]
async fn test_wordle_exact_guess_scenario() {
    let casino = casino_with_seed(8);
    let player = AccountId::from("49");
    let game = Wordle::with_target("CRANE", GameRng::seeded(0));
    casino.start_prepared(&player, game.into()).await.unwrap();

    let outcome = casino
        .apply_move(
            &player,
            GameKind::Wordle,
            Move::Guess {
                word: "crane".to_string(),
            },
        )
        .await
        .unwrap();
    let GameDetail::Wordle(board) = &outcome.view.detail else {
        panic!("expected a wordle view");
    };
    assert_eq!(board.guesses[0].result, vec![LetterStatus::Correct; 5]);
    assert_eq!(board.target.as_deref(), Some("CRANE"));

    let settlement = outcome.settlement.unwrap();
    assert_eq!(settlement.status, GameStatus::Won);
    assert_eq!(settlement.bet, 0);
    assert_eq!(settlement.balance, 10_000);
}

#[tokio::test]
async fn test_wordle_bad_guess_keeps_game() {
    let casino = casino_with_seed(9);
    let player = AccountId::from("50");
    let game = Wordle::with_target("AB", GameRng::seeded(0));
    casino.start_prepared(&player, game.into()).await.unwrap();

    let err = casino
        .apply_move(
            &player,
            GameKind::Wordle,
            Move::Guess {
                word: "ABC".to_string(),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, CasinoError::Validation(_)));
    assert!(err.is_client_error());

    let outcome = casino
        .apply_move(&player, GameKind::Wordle, Move::NewWord)
        .await
        .unwrap();
    let GameDetail::Wordle(board) = &outcome.view.detail else {
        panic!("expected a wordle view");
    };
    assert!(board.guesses.is_empty());
    assert_eq!(board.target, None);
}

#[tokio::test]
async fn test_expired_game_is_not_refunded() {
    let config = CasinoConfig {
        timeouts: SessionTimeouts::uniform(Duration::from_millis(100)),
        ..CasinoConfig::default()
    };
    let casino = Casino::with_seed(Arc::new(Ledger::in_memory(10_000)), config, 10);
    let player = AccountId::from("51");
    casino
        .start_game(&player, GameParams::Mines { bet: 400, mines: 5 })
        .await
        .unwrap();

    tokio::time::sleep(Duration::from_millis(200)).await;
    let err = casino
        .apply_move(&player, GameKind::Mines, Move::Reveal { position: 0 })
        .await
        .unwrap_err();
    assert!(matches!(err, CasinoError::SessionExpired(GameKind::Mines)));
    assert_eq!(casino.query_balance(&player).await.unwrap(), 9_600);

    // The slot is free again.
    casino
        .start_game(&player, GameParams::Mines { bet: 100, mines: 5 })
        .await
        .unwrap();
}

#[tokio::test]
async fn test_pending_payout_survives_expiry() {
    let store = Arc::new(MemoryStore::new());
    let config = CasinoConfig {
        timeouts: SessionTimeouts::uniform(Duration::from_millis(300)),
        ..CasinoConfig::default()
    };
    let casino = Casino::with_seed(Arc::new(Ledger::new(store.clone(), 10_000)), config, 12);
    let player = AccountId::from("53");

    let game = Tower::with_bombs(100, vec![3, 3], GameRng::seeded(0)).unwrap();
    casino.start_prepared(&player, game.into()).await.unwrap();
    casino
        .apply_move(&player, GameKind::Tower, Move::Climb { level: 1, tile: 1 })
        .await
        .unwrap();

    store.set_fail_writes(true);
    let err = casino.cash_out(&player, GameKind::Tower).await.unwrap_err();
    assert!(matches!(err, CasinoError::Persistence(_)));
    store.set_fail_writes(false);

    tokio::time::sleep(Duration::from_millis(400)).await;
    assert_eq!(casino.sweep_expired().await, 0);

    let settlement = casino.cash_out(&player, GameKind::Tower).await.unwrap();
    assert_eq!(settlement.payout, 150);
    assert_eq!(settlement.balance, 10_050);
    assert!(casino.sessions().is_empty().await);
}

#[tokio::test]
async fn test_sweeper_task_evicts() {
    let config = CasinoConfig {
        timeouts: SessionTimeouts::uniform(Duration::from_millis(50)),
        ..CasinoConfig::default()
    };
    let casino = Arc::new(Casino::with_seed(
        Arc::new(Ledger::in_memory(10_000)),
        config,
        11,
    ));
    casino
        .start_game(&AccountId::from("52"), GameParams::Tower { bet: 100 })
        .await
        .unwrap();

    let sweeper = casino.spawn_sweeper(Duration::from_millis(25));
    tokio::time::sleep(Duration::from_millis(300)).await;
    sweeper.abort();

    assert!(casino.sessions().is_empty().await);
}

#[tokio::test]
async fn test_chips_are_conserved_across_random_games() {
    let casino = Arc::new(casino_with_seed(2024));
    let players: Vec<AccountId> = (0..8u64).map(AccountId::from).collect();

    let mut handles = Vec::new();
    for player in players.clone() {
        let casino = Arc::clone(&casino);
        handles.push(tokio::spawn(async move {
            let mut net = 0;
            for round in 0..10u8 {
                let side = [BaccaratSide::Player, BaccaratSide::Banker, BaccaratSide::Tie]
                    [usize::from(round % 3)];
                let started = casino
                    .start_game(&player, GameParams::Baccarat { bet: 100, side })
                    .await
                    .unwrap();
                net += started.settlement.unwrap().net;

                casino
                    .start_game(&player, GameParams::Mines { bet: 100, mines: 3 })
                    .await
                    .unwrap();
                let reveal = casino
                    .apply_move(
                        &player,
                        GameKind::Mines,
                        Move::Reveal {
                            position: usize::from(round),
                        },
                    )
                    .await
                    .unwrap();
                let settlement = match reveal.settlement {
                    Some(settlement) => settlement,
                    None => casino.cash_out(&player, GameKind::Mines).await.unwrap(),
                };
                net += settlement.net;
            }
            net
        }));
    }

    let mut total_net = 0;
    for handle in handles {
        total_net += handle.await.unwrap();
    }

    let mut total = 0;
    for player in &players {
        total += casino.query_balance(player).await.unwrap();
    }
    assert_eq!(total, 8 * 10_000 + total_net);
    assert!(casino.sessions().is_empty().await);
}
