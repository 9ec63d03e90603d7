use std::{fs, path::Path};

use tempfile::{TempDir, tempdir};

use fenboard::{FenboardError, color::Color, raster::Canvas};
use fenboard_cli::{Args, error_adapter::to_reportables};

const START: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

fn write_png(path: &Path, width: u32, height: u32, color: &str) {
    Canvas::filled(width, height, Color::new(color).unwrap())
        .unwrap()
        .save_png(path)
        .expect("Failed to write PNG");
}

fn resources() -> TempDir {
    let dir = tempdir().expect("Failed to create temp directory");
    for side in ["white", "black"] {
        let side_dir = dir.path().join("pieces").join(side);
        fs::create_dir_all(&side_dir).unwrap();
        for kind in ["Pawn", "Rook", "Knight", "Bishop", "Queen", "King"] {
            write_png(&side_dir.join(format!("{kind}.png")), 32, 32, side);
        }
    }
    let arrows = dir.path().join("arrows");
    fs::create_dir(&arrows).unwrap();
    write_png(&arrows.join("Knight.png"), 48, 32, "blue");
    write_png(&arrows.join("Up.png"), 16, 48, "blue");

    fs::write(dir.path().join("config.toml"), "[board]\ntile_size = 16\n").unwrap();
    dir
}

fn args(dir: &TempDir, fen: &str) -> Args {
    let path = |name: &str| dir.path().join(name).to_string_lossy().to_string();
    Args {
        fen: fen.to_string(),
        output: path("board.png"),
        config: Some(path("config.toml")),
        pieces: Some(path("pieces")),
        arrows_dir: Some(path("arrows")),
        arrows: Vec::new(),
        flipped: false,
        last_move: None,
        coordinates: None,
        font: None,
        highlights: Vec::new(),
        tile_size: None,
        log_level: "off".to_string(),
    }
}

#[test]
fn test_run_writes_png() {
    let dir = resources();
    let mut args = args(&dir, START);
    args.arrows = vec!["e2e4".to_string(), "g1-f3".to_string()];
    args.last_move = Some("d2d4".to_string());
    args.highlights = vec!["red:e5,d5".to_string()];
    args.flipped = true;

    fenboard_cli::run(&args).expect("Failed to render");

    let board = Canvas::load_png(&args.output).expect("Failed to read output");
    assert_eq!((board.width(), board.height()), (128, 128));
}

#[test]
fn test_tile_size_argument_overrides_config() {
    let dir = resources();
    let mut args = args(&dir, START);
    args.tile_size = Some(24);

    fenboard_cli::run(&args).unwrap();

    let board = Canvas::load_png(&args.output).unwrap();
    assert_eq!(board.width(), 192);
}

#[test]
fn test_malformed_fen_reports_each_rank() {
    let dir = resources();
    let args = args(&dir, "rnbqkbnr/ppppppppp/8/8/8/8/PPPPPPPP/RNBQKBN? w - - 0 1");

    let err = fenboard_cli::run(&args).unwrap_err();
    assert!(matches!(err, FenboardError::Parse { .. }));
    assert_eq!(to_reportables(&err).len(), 2);
    assert!(!Path::new(&args.output).exists());
}

#[test]
fn test_invalid_arrow_fails() {
    let dir = resources();
    let mut args = args(&dir, START);
    args.arrows = vec!["a1c4".to_string()];

    let err = fenboard_cli::run(&args).unwrap_err();
    assert!(matches!(err, FenboardError::InvalidArrow { .. }));
}

#[test]
fn test_arrow_without_templates_fails() {
    let dir = resources();
    let mut args = args(&dir, START);
    args.arrows_dir = None;
    args.arrows = vec!["e2e4".to_string()];

    let err = fenboard_cli::run(&args).unwrap_err();
    assert!(matches!(err, FenboardError::Config(_)));
}

#[test]
fn test_missing_piece_folder_fails() {
    let dir = resources();
    let mut args = args(&dir, START);
    args.pieces = Some(dir.path().join("nowhere").to_string_lossy().to_string());

    let err = fenboard_cli::run(&args).unwrap_err();
    assert!(matches!(err, FenboardError::Resource { .. }));
}
