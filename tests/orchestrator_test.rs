//! Integration tests for driving full matches.

use std::collections::VecDeque;
use std::io::Write;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use strictly_othello::{
    Board, Color, ConsoleObserver, Game, GameEvent, GreedyPlayer, HumanPlayer, LineInput,
    Orchestrator, Player, Position, Score,
};
use tokio::sync::mpsc;

fn pos(x: i8, y: i8) -> Position {
    Position::new(x, y)
}

/// Plays a fixed list of moves and counts how often it was asked.
struct Scripted {
    name: String,
    moves: VecDeque<Position>,
    asked: Arc<AtomicUsize>,
}

impl Scripted {
    fn new(name: &str, moves: &[Position]) -> (Self, Arc<AtomicUsize>) {
        let asked = Arc::new(AtomicUsize::new(0));
        let player = Self {
            name: name.to_string(),
            moves: moves.iter().copied().collect(),
            asked: Arc::clone(&asked),
        };
        (player, asked)
    }
}

#[async_trait::async_trait]
impl Player for Scripted {
    async fn get_move(&mut self, _game: &Game) -> anyhow::Result<Position> {
        self.asked.fetch_add(1, Ordering::SeqCst);
        self.moves
            .pop_front()
            .ok_or_else(|| anyhow::anyhow!("{} ran out of moves", self.name))
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Black at (0,0), white at (1,0): only black can ever move.
fn lone_pair(turn: Color) -> Game {
    let layout = "BW......\n".to_string() + &"........\n".repeat(7);
    let board: Board = layout.parse().unwrap();
    Game::with_board(board, turn)
}

/// Writer the test keeps a handle to after the observer is moved away.
struct SharedBuffer(Arc<std::sync::Mutex<Vec<u8>>>);

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

fn drain(rx: &mut mpsc::UnboundedReceiver<GameEvent>) -> Vec<GameEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

#[tokio::test]
async fn test_greedy_match_runs_to_completion() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut orchestrator = Orchestrator::new(
        Box::new(GreedyPlayer::seeded("black", 1)),
        Box::new(GreedyPlayer::seeded("white", 2)),
        Box::new(tx),
    );

    let score = orchestrator.run().await.unwrap();

    let game = orchestrator.game();
    assert!(game.is_over());
    assert!(game.plies() <= 60);
    assert!((4..=64).contains(&score.total()));
    assert_eq!(score, game.board().results());
    assert!(game.board().valid_moves(Color::Black).is_empty());
    assert!(game.board().valid_moves(Color::White).is_empty());

    let events = drain(&mut rx);
    let moves = events
        .iter()
        .filter(|e| matches!(e, GameEvent::MoveMade { .. }))
        .count();
    assert_eq!(moves, game.plies());
    assert!(!events.iter().any(|e| matches!(e, GameEvent::InvalidMove { .. })));
    assert_eq!(events.last(), Some(&GameEvent::GameOver { board: game.board().clone(), score }));
}

#[tokio::test]
async fn test_forced_pass_skips_player() {
    let (black, _) = Scripted::new("black", &[pos(2, 0)]);
    let (white, white_asked) = Scripted::new("white", &[]);
    let (tx, mut rx) = mpsc::unbounded_channel();

    let mut orchestrator = Orchestrator::new(Box::new(black), Box::new(white), Box::new(tx))
        .with_game(lone_pair(Color::White));
    let score = orchestrator.run().await.unwrap();

    assert_eq!(score, Score::new(0, 3));
    assert_eq!(white_asked.load(Ordering::SeqCst), 0);

    let events = drain(&mut rx);
    assert_eq!(events[0], GameEvent::Passed(Color::White));
    assert!(matches!(events[1], GameEvent::TurnStarted { color: Color::Black, .. }));
    assert!(matches!(
        &events[2],
        GameEvent::MoveMade { position, flipped, .. }
            if *position == pos(2, 0) && *flipped == vec![pos(1, 0)]
    ));
    assert!(matches!(events[3], GameEvent::GameOver { .. }));
    assert_eq!(events.len(), 4);
}

#[tokio::test]
async fn test_invalid_move_is_rerequested() {
    let (black, black_asked) = Scripted::new("black", &[pos(0, 7), pos(2, 0)]);
    let (white, _) = Scripted::new("white", &[]);
    let (tx, mut rx) = mpsc::unbounded_channel();

    let mut orchestrator = Orchestrator::new(Box::new(black), Box::new(white), Box::new(tx))
        .with_game(lone_pair(Color::Black));
    let score = orchestrator.run().await.unwrap();

    assert_eq!(score, Score::new(0, 3));
    assert_eq!(black_asked.load(Ordering::SeqCst), 2);

    let events = drain(&mut rx);
    assert!(events.contains(&GameEvent::InvalidMove {
        color: Color::Black,
        player: "black".to_string(),
        position: pos(0, 7),
    }));
    let asks = events
        .iter()
        .filter(|e| matches!(e, GameEvent::TurnStarted { .. }))
        .count();
    assert_eq!(asks, 2);
}

#[tokio::test]
async fn test_rejection_limit_aborts() {
    let (black, black_asked) = Scripted::new("black", &[pos(0, 7), pos(0, 7), pos(0, 7)]);
    let (white, _) = Scripted::new("white", &[]);
    let (tx, _rx) = mpsc::unbounded_channel();

    let mut orchestrator = Orchestrator::new(Box::new(black), Box::new(white), Box::new(tx))
        .with_max_rejections(Some(2));
    let err = orchestrator.run().await.unwrap_err();

    assert!(err.to_string().contains("invalid moves"));
    assert_eq!(black_asked.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_scripted_shortest_game() {
    let (black, _) = Scripted::new(
        "black",
        &[pos(4, 5), pos(4, 2), pos(2, 4), pos(4, 6), pos(6, 4)],
    );
    let (white, _) = Scripted::new("white", &[pos(5, 3), pos(3, 5), pos(5, 5), pos(5, 4)]);
    let (tx, _rx) = mpsc::unbounded_channel();

    let mut orchestrator = Orchestrator::new(Box::new(black), Box::new(white), Box::new(tx));
    let score = orchestrator.run().await.unwrap();

    assert_eq!(score, Score::new(0, 13));
    assert_eq!(orchestrator.game().plies(), 9);
}

#[tokio::test]
async fn test_human_over_line_channel() {
    // Off-board but well-formed, then unreadable, then legal.
    let input = LineInput::new(&b"[9,9]\nc4\n[2,0]\n"[..], Vec::new());
    let human = HumanPlayer::new("Ada", input);
    let (white, _) = Scripted::new("white", &[]);
    let (tx, mut rx) = mpsc::unbounded_channel();

    let mut orchestrator = Orchestrator::new(Box::new(human), Box::new(white), Box::new(tx))
        .with_game(lone_pair(Color::Black));
    let score = orchestrator.run().await.unwrap();

    assert_eq!(score, Score::new(0, 3));
    let events = drain(&mut rx);
    let rejected: Vec<_> = events
        .iter()
        .filter_map(|e| match e {
            GameEvent::InvalidMove { position, .. } => Some(*position),
            _ => None,
        })
        .collect();
    assert_eq!(rejected, vec![pos(9, 9)]);
}

#[tokio::test]
async fn test_console_transcript() {
    let (black, _) = Scripted::new("black", &[pos(2, 0)]);
    let (white, _) = Scripted::new("white", &[]);
    let buffer = Arc::new(std::sync::Mutex::new(Vec::new()));
    let observer = ConsoleObserver::new(SharedBuffer(Arc::clone(&buffer)));

    let mut orchestrator = Orchestrator::new(Box::new(black), Box::new(white), Box::new(observer))
        .with_game(lone_pair(Color::White));
    orchestrator.run().await.unwrap();

    let transcript = String::from_utf8(buffer.lock().unwrap().clone()).unwrap();
    let lines: Vec<_> = transcript.lines().collect();
    assert_eq!(lines[0], "white has no move!");
    assert_eq!(lines[1], "  0 1 2 3 4 5 6 7");
    assert_eq!(lines[2], "0 B W _ _ _ _ _ _");
    assert_eq!(lines[10], "black move: [2,0]");
    assert_eq!(lines[12], "0 B B B _ _ _ _ _");
    assert_eq!(lines[20], "The game is over!");
    assert_eq!(lines[21], "Final score - White: 0 Black: 3");
}
