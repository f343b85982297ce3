use std::sync::Arc;

use hotkeys_core::model::{
    Action, ActionKey, Answer, AnswerKind, AnswerToken, Catalog, GuessOutcome, LEARN_THRESHOLD,
    ProgressRecord,
};
use hotkeys_core::time::fixed_now;
use hotkeys_core::tracker::ProgressStore;
use services::{Clock, SessionLoopService, TutorError};
use storage::repository::{InMemoryRepository, ProgressRepository, StorageError};

fn catalog() -> Catalog {
    let actions = [
        Action::new(
            ActionKey::new("save"),
            "Save file",
            vec![AnswerKind::Command],
            vec![AnswerToken::from_raw(":w")],
        ),
        Action::new(
            ActionKey::new("delete_line"),
            "Delete line",
            Vec::new(),
            vec![AnswerToken::from_raw("dd")],
        ),
        Action::new(
            ActionKey::new("redo"),
            "Redo",
            Vec::new(),
            vec![AnswerToken::from_raw("Ctrl+r")],
        ),
    ];
    Catalog::new("Vim", actions.into_iter().map(Result::unwrap))
}

fn correct_answer(key: &ActionKey) -> Answer {
    match key.as_str() {
        "save" => Answer::parse_typed(":w"),
        "delete_line" => Answer::parse_typed("d,d"),
        "redo" => Answer::parse_typed("Ctrl+r"),
        other => panic!("unexpected key {other}"),
    }
}

fn loop_service(repo: &InMemoryRepository) -> SessionLoopService {
    SessionLoopService::new(
        Clock::fixed(fixed_now()),
        Arc::new(repo.clone()),
        Arc::new(repo.clone()),
    )
    .with_seed(42)
}

#[tokio::test]
async fn session_loop_learns_everything_and_saves_each_answer() {
    let repo = InMemoryRepository::with_catalog(catalog());
    let svc = loop_service(&repo);
    let mut session = svc.start_session().await.unwrap();
    assert_eq!(session.stats().total, 3);
    assert_eq!(session.stats().learned, 0);

    let mut answered = 0;
    while let Some(question) = svc.next_question(&mut session).unwrap() {
        let outcome = svc
            .answer(&mut session, &correct_answer(&question.key))
            .await
            .unwrap();
        answered += 1;
        assert!(outcome.is_correct());
        assert_eq!(repo.save_count(), answered);
        assert!(answered <= 9, "learning should take exactly three hits per action");
    }

    assert_eq!(answered, 9);
    assert!(session.all_learned());

    let saved = repo.load_progress().await.unwrap();
    for (_, record) in saved.iter() {
        assert!(record.learned);
        assert_eq!(record.correct_streak, LEARN_THRESHOLD);
        assert_eq!(record.guess_count, LEARN_THRESHOLD);
    }

    let summary = svc.finish(&session).unwrap();
    assert_eq!(summary.answered(), 9);
    assert_eq!(summary.newly_learned(), 3);
    assert_eq!(summary.wrong(), 0);
}

#[tokio::test]
async fn wrong_answer_is_scored_and_reports_correct_hotkeys() {
    let repo = InMemoryRepository::with_catalog(catalog());
    let svc = loop_service(&repo);
    let mut session = svc.start_session().await.unwrap();

    let question = svc.next_question(&mut session).unwrap().unwrap();
    let outcome = svc
        .answer(&mut session, &Answer::parse_typed("nope,nope"))
        .await
        .unwrap();

    assert_eq!(outcome.key, question.key);
    assert_eq!(outcome.outcome, GuessOutcome::Wrong);
    assert!(outcome.correct_answers.starts_with('"'));
    assert_eq!(outcome.stats.errors, 1);
    assert_eq!(outcome.stats.guesses, 1);
    assert!(!outcome.all_learned);
}

#[tokio::test]
async fn existing_progress_is_resumed() {
    let repo = InMemoryRepository::with_catalog(catalog());
    let learned = ProgressRecord {
        guess_count: 4,
        correct_streak: LEARN_THRESHOLD,
        error_count: 1,
        learned: true,
    };
    let store: ProgressStore = [
        (ActionKey::new("save"), learned),
        (ActionKey::new("redo"), learned),
    ]
    .into_iter()
    .collect();
    repo.seed_progress(store).unwrap();

    let svc = loop_service(&repo);
    let mut session = svc.start_session().await.unwrap();
    let stats = session.stats();
    assert_eq!(stats.learned, 2);
    assert_eq!(stats.to_learn(), 1);
    assert_eq!(stats.guesses, 8);

    for _ in 0..5 {
        let question = svc.next_question(&mut session).unwrap().unwrap();
        assert_eq!(question.key.as_str(), "delete_line");
        session.skip_pending();
    }
}

#[tokio::test]
async fn nothing_to_do_when_everything_is_learned() {
    let repo = InMemoryRepository::with_catalog(catalog());
    let learned = ProgressRecord {
        guess_count: 3,
        correct_streak: LEARN_THRESHOLD,
        error_count: 0,
        learned: true,
    };
    let store: ProgressStore = ["save", "delete_line", "redo"]
        .into_iter()
        .map(|k| (ActionKey::new(k), learned))
        .collect();
    repo.seed_progress(store).unwrap();

    let svc = loop_service(&repo);
    let mut session = svc.start_session().await.unwrap();
    assert!(session.all_learned());
    assert!(svc.next_question(&mut session).unwrap().is_none());
}

#[tokio::test]
async fn failed_save_is_fatal_for_the_answer() {
    let repo = InMemoryRepository::with_catalog(catalog());
    let svc = loop_service(&repo);
    let mut session = svc.start_session().await.unwrap();
    let question = svc.next_question(&mut session).unwrap().unwrap();

    repo.set_fail_saves(true);
    let err = svc
        .answer(&mut session, &correct_answer(&question.key))
        .await
        .unwrap_err();
    assert!(err.is_storage());
    assert!(matches!(err, TutorError::Storage(StorageError::Io { .. })));
    // Scored in memory even though nothing was written.
    assert_eq!(session.stats().guesses, 1);
    assert_eq!(repo.save_count(), 0);
}

#[tokio::test]
async fn missing_catalog_fails_to_start() {
    let repo = InMemoryRepository::new();
    let svc = loop_service(&repo);
    let err = svc.start_session().await.err().unwrap();
    assert!(matches!(err, TutorError::Storage(StorageError::NotFound)));
}
