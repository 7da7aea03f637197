mod common;

use common::*;
use freccette_app::Scorekeeper;
use freccette_persistence::{BlobStore, MemoryStore, SessionGateway};
use freccette_types::{
    GameError, InputMode, Intent, Outcome, PendingAction, SessionPhase, TargetPreset,
    TargetSelection, TurnResult,
};

const KEY: &str = "freccette_pro_v1";

#[test]
fn test_fresh_start_uses_config_defaults() {
    let store = MemoryStore::new();
    let mut config = test_config();
    config.default_target = 501;
    config.default_input_mode = InputMode::Granular;

    let keeper = Scorekeeper::open(store, &config);
    let view = keeper.view();
    assert_eq!(view.phase, SessionPhase::Setup);
    assert_eq!(view.target_score, 501);
    assert_eq!(view.input_mode, InputMode::Granular);
    assert!(view.players.is_empty());
}

#[test]
fn test_full_game_flow() {
    let (mut keeper, _) = memory_scorekeeper();
    let ids = add_players(&mut keeper, &["Anna", "Bruno"]);

    assert_eq!(
        keeper.handle(Intent::ConfigureSession {
            target: TargetSelection::Preset(TargetPreset::Points101),
            input_mode: InputMode::Total,
        }),
        Outcome::Updated
    );
    assert_eq!(keeper.handle(Intent::StartSession), Outcome::Updated);
    assert_eq!(keeper.view().active_player_id, Some(ids[0]));

    assert!(matches!(score(&mut keeper, 60), Outcome::Scored(_)));
    assert!(matches!(score(&mut keeper, 20), Outcome::Scored(_)));

    match score(&mut keeper, 50) {
        Outcome::Bust(report) => {
            assert_eq!(report.player_id, ids[0]);
            assert_eq!(report.score, 60);
            assert_eq!(report.result, TurnResult::Bust);
        }
        other => panic!("expected bust, got {other:?}"),
    }

    assert!(matches!(score(&mut keeper, 1), Outcome::Scored(_)));

    match score(&mut keeper, 41) {
        Outcome::Win(report) => {
            assert_eq!(report.player_name, "Anna");
            assert_eq!(report.score, 101);
        }
        other => panic!("expected win, got {other:?}"),
    }

    let view = keeper.view();
    assert!(view.players[0].is_winner);
    assert_eq!(view.players[0].history, vec![60, 0, 41]);
    assert!(!view.players[1].is_winner);
}

#[test]
fn test_every_mutation_is_saved() {
    let (mut keeper, store) = memory_scorekeeper();
    let ids = add_players(&mut keeper, &["Anna"]);
    keeper.handle(Intent::StartSession);
    score(&mut keeper, 45);

    let gateway = SessionGateway::new(store, KEY);
    let saved = gateway.load().unwrap();
    assert_eq!(saved, keeper.session().to_snapshot());
    assert_eq!(saved.players[0].id, ids[0]);
    assert_eq!(saved.players[0].history, vec![45]);
    assert!(saved.game_active);
}

#[test]
fn test_entry_edits_are_not_saved() {
    let (mut keeper, store) = memory_scorekeeper();
    add_players(&mut keeper, &["Anna"]);
    keeper.handle(Intent::StartSession);
    let saved_before = store.get(KEY).unwrap();

    keeper.handle(Intent::AppendDigit {
        slot: None,
        digit: 9,
    });
    keeper.handle(Intent::DeleteLastDigit { slot: None });
    assert_eq!(store.get(KEY).unwrap(), saved_before);
}

#[test]
fn test_reload_restores_committed_state_only() {
    let store = MemoryStore::new();
    let config = test_config();
    let ids = {
        let mut keeper = Scorekeeper::open(store.clone(), &config);
        let ids = add_players(&mut keeper, &["Anna", "Bruno"]);
        keeper.handle(Intent::StartSession);
        score(&mut keeper, 60);
        keeper.handle(Intent::AppendDigit {
            slot: None,
            digit: 7,
        });
        ids
    };

    let keeper = Scorekeeper::open(store, &config);
    let view = keeper.view();
    assert_eq!(view.phase, SessionPhase::Playing);
    assert_eq!(view.players[0].score, 60);
    assert_eq!(view.active_player_id, Some(ids[1]));
    assert_eq!(keeper.session().entry().unwrap().compute_value(), 0);
}

#[test]
fn test_corrupt_blob_starts_fresh() {
    let store = MemoryStore::with_blob(KEY, "{\"players\": [oops");
    let mut keeper = Scorekeeper::open(store.clone(), &test_config());

    let view = keeper.view();
    assert_eq!(view.phase, SessionPhase::Setup);
    assert!(view.players.is_empty());

    // The next save replaces the corrupt blob
    add_players(&mut keeper, &["Anna"]);
    let gateway = SessionGateway::new(store, KEY);
    assert_eq!(gateway.load().unwrap().players.len(), 1);
}

#[test]
fn test_unreadable_store_starts_fresh() {
    let keeper = Scorekeeper::open(UnreadableStore, &test_config());
    assert!(keeper.view().players.is_empty());
}

#[test]
fn test_failed_save_keeps_playing() {
    let mut keeper = Scorekeeper::open(FailingStore::default(), &test_config());
    let ids = add_players(&mut keeper, &["Anna", "Bruno"]);
    assert!(keeper.storage_warning().unwrap().contains("disk full"));

    keeper.handle(Intent::StartSession);
    assert!(matches!(score(&mut keeper, 60), Outcome::Scored(_)));

    let view = keeper.view();
    assert_eq!(view.players[0].score, 60);
    assert_eq!(view.active_player_id, Some(ids[1]));
    assert!(view.storage_warning.is_some());
    assert!(keeper.gateway().store().attempts >= 3);
}

#[test]
fn test_validation_errors_are_rejected() {
    let (mut keeper, _) = memory_scorekeeper();
    assert_eq!(
        keeper.handle(Intent::AddPlayer {
            name: "  ".to_string()
        }),
        Outcome::Rejected {
            error: GameError::EmptyPlayerName
        }
    );

    add_players(&mut keeper, &["A", "B", "C", "D", "E"]);
    assert!(!keeper.view().can_add_player);
    assert_eq!(
        keeper.handle(Intent::AddPlayer {
            name: "F".to_string()
        }),
        Outcome::Rejected {
            error: GameError::RegistryFull { max: 5 }
        }
    );
    assert_eq!(keeper.view().players.len(), 5);

    assert!(matches!(
        keeper.handle(Intent::ConfigureSession {
            target: TargetSelection::Custom(-1),
            input_mode: InputMode::Total,
        }),
        Outcome::Rejected {
            error: GameError::InvalidTargetScore { .. }
        }
    ));
}

#[test]
fn test_out_of_turn_selection_is_ignored() {
    let (mut keeper, _) = memory_scorekeeper();
    let ids = add_players(&mut keeper, &["A", "B"]);
    keeper.handle(Intent::StartSession);

    let outcome = keeper.handle(Intent::SelectPlayer { player_id: ids[1] });
    assert_eq!(
        outcome,
        Outcome::Ignored {
            reason: GameError::NotYourTurn { active: ids[0] }
        }
    );
    assert_eq!(keeper.view().active_player_id, Some(ids[0]));
}

#[test]
fn test_delete_requires_confirmation() {
    let (mut keeper, _) = memory_scorekeeper();
    let ids = add_players(&mut keeper, &["A", "B", "C"]);
    keeper.handle(Intent::SelectPlayer { player_id: ids[1] });

    let request = match keeper.handle(Intent::DeletePlayer { player_id: ids[1] }) {
        Outcome::ConfirmationRequired(request) => request,
        other => panic!("expected confirmation request, got {other:?}"),
    };
    assert_eq!(request.description, "Delete player B?");
    assert!(matches!(request.action, PendingAction::DeletePlayer { .. }));
    assert_eq!(keeper.view().players.len(), 3);
    assert_eq!(keeper.view().pending_confirmation, Some(request.clone()));

    assert_eq!(
        keeper.handle(Intent::Confirm {
            token: request.token
        }),
        Outcome::Updated
    );
    let view = keeper.view();
    assert_eq!(view.players.len(), 2);
    assert_eq!(view.active_player_id, Some(ids[2]));
    assert!(view.pending_confirmation.is_none());
}

#[test]
fn test_cancelled_confirmation_changes_nothing() {
    let (mut keeper, _) = memory_scorekeeper();
    add_players(&mut keeper, &["A"]);

    let token = match keeper.handle(Intent::ResetAll) {
        Outcome::ConfirmationRequired(request) => request.token,
        other => panic!("expected confirmation request, got {other:?}"),
    };
    assert_eq!(
        keeper.handle(Intent::CancelConfirmation { token }),
        Outcome::Updated
    );
    assert_eq!(keeper.view().players.len(), 1);
    assert_eq!(
        keeper.handle(Intent::Confirm { token }),
        Outcome::Rejected {
            error: GameError::ConfirmationNotFound
        }
    );
}

#[test]
fn test_delete_unknown_player_is_ignored() {
    let (mut keeper, _) = memory_scorekeeper();
    let ghost = uuid::Uuid::now_v7();
    assert_eq!(
        keeper.handle(Intent::DeletePlayer { player_id: ghost }),
        Outcome::Ignored {
            reason: GameError::PlayerNotFound { player_id: ghost }
        }
    );
}

#[test]
fn test_reset_scores_and_reset_all() {
    let (mut keeper, store) = memory_scorekeeper();
    add_players(&mut keeper, &["A", "B"]);
    keeper.handle(Intent::StartSession);
    score(&mut keeper, 60);

    assert_eq!(confirm(&mut keeper, Intent::ResetScores), Outcome::Updated);
    let view = keeper.view();
    assert_eq!(view.phase, SessionPhase::Playing);
    assert!(view.players.iter().all(|p| p.score == 0 && p.history.is_empty()));

    assert_eq!(confirm(&mut keeper, Intent::ResetAll), Outcome::Updated);
    let view = keeper.view();
    assert_eq!(view.phase, SessionPhase::Setup);
    assert!(view.players.is_empty());
    assert!(view.active_player_id.is_none());

    let saved = SessionGateway::new(store, KEY).load().unwrap();
    assert!(saved.players.is_empty());
    assert!(!saved.game_active);
}

#[test]
fn test_granular_entry_through_intents() {
    let (mut keeper, _) = memory_scorekeeper();
    add_players(&mut keeper, &["A"]);
    keeper.handle(Intent::ConfigureSession {
        target: TargetSelection::Preset(TargetPreset::Points301),
        input_mode: InputMode::Granular,
    });
    keeper.handle(Intent::StartSession);

    for (slot, digits) in [(0, "20"), (1, "5")] {
        for digit in digits.bytes() {
            keeper.handle(Intent::AppendDigit {
                slot: Some(slot),
                digit: digit - b'0',
            });
        }
    }
    assert_eq!(
        keeper.handle(Intent::SetActiveSlot { index: 3 }),
        Outcome::Rejected {
            error: GameError::InvalidSlot { index: 3 }
        }
    );

    match keeper.handle(Intent::CommitTurn) {
        Outcome::Scored(report) => assert_eq!(report.points, 25),
        other => panic!("expected scored turn, got {other:?}"),
    }
}

#[test]
fn test_commit_without_turn_is_rejected() {
    let (mut keeper, _) = memory_scorekeeper();
    assert_eq!(
        keeper.handle(Intent::CommitTurn),
        Outcome::Rejected {
            error: GameError::NoActiveTurn
        }
    );
    assert_eq!(
        keeper.handle(Intent::AppendDigit {
            slot: None,
            digit: 1
        }),
        Outcome::Rejected {
            error: GameError::NoActiveTurn
        }
    );
}

#[test]
fn test_cancel_turn_closes_entry() {
    let (mut keeper, _) = memory_scorekeeper();
    let ids = add_players(&mut keeper, &["A", "B"]);
    keeper.handle(Intent::SelectPlayer { player_id: ids[1] });
    keeper.handle(Intent::AppendDigit {
        slot: None,
        digit: 5,
    });

    assert_eq!(keeper.handle(Intent::CancelTurn), Outcome::Updated);
    let view = keeper.view();
    assert!(view.active_player_id.is_none());
    assert!(view.entry.is_none());
    assert!(view.players.iter().all(|p| p.score == 0));
}

#[test]
fn test_file_backed_scorekeeper() {
    let dir = std::env::temp_dir().join(format!("freccette-app-{}", uuid::Uuid::new_v4()));
    let mut config = test_config();
    config.storage_dir = dir.clone();

    {
        let mut keeper = Scorekeeper::open_from_config(&config).unwrap();
        add_players(&mut keeper, &["Anna"]);
        keeper.handle(Intent::StartSession);
        score(&mut keeper, 100);
    }

    let keeper = Scorekeeper::open_from_config(&config).unwrap();
    assert_eq!(keeper.view().players[0].score, 100);

    std::fs::remove_dir_all(dir).ok();
}
