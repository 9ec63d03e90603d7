//! Integration tests for the folder and font loaders.

use std::{fs, path::Path, sync::Arc};

use fenboard::{
    Arrow, BoardRenderer, FenboardError, Piece,
    color::Color,
    config::AppConfig,
    loaders::{ArrowFolder, FontFile, PieceFolder},
    raster::Canvas,
    sprites::{ArrowSet, PieceSet},
};
use tempfile::{TempDir, tempdir};

const KINDS: [&str; 6] = ["Pawn", "Rook", "Knight", "Bishop", "Queen", "King"];

fn write_png(path: &Path, width: u32, height: u32, color: &str) {
    let canvas = Canvas::filled(width, height, Color::new(color).unwrap()).unwrap();
    canvas.save_png(path).expect("Failed to write PNG");
}

/// A piece folder whose sprites are 64px squares, white or black by side.
fn piece_folder() -> TempDir {
    let dir = tempdir().expect("Failed to create temp directory");
    for side in ["white", "black"] {
        let side_dir = dir.path().join(side);
        fs::create_dir(&side_dir).unwrap();
        for kind in KINDS {
            write_png(&side_dir.join(format!("{kind}.png")), 64, 64, side);
        }
    }
    dir
}

fn arrow_folder() -> TempDir {
    let dir = tempdir().expect("Failed to create temp directory");
    write_png(&dir.path().join("Knight.png"), 90, 60, "blue");
    write_png(&dir.path().join("Up.png"), 30, 90, "blue");
    dir
}

#[test]
fn test_piece_folder_scales_to_tile_size() {
    let dir = piece_folder();
    let folder = PieceFolder::open(dir.path()).expect("Failed to open piece folder");

    let sprites = folder.sprites(20).unwrap();
    assert_eq!(sprites.tile_size(), 20);
    for c in "kqbnrpKQBNRP".chars() {
        let sprite = sprites.get(Piece::from_fen_char(c).unwrap()).unwrap();
        assert_eq!((sprite.width(), sprite.height()), (20, 20), "{c}");
    }
}

#[test]
fn test_piece_folder_caches_per_tile_size() {
    let dir = piece_folder();
    let folder = PieceFolder::open(dir.path()).unwrap();

    let first = folder.sprites(16).unwrap();
    let second = folder.sprites(16).unwrap();
    let other = folder.sprites(32).unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert!(!Arc::ptr_eq(&first, &other));
}

#[test]
fn test_piece_folder_missing_file() {
    let dir = piece_folder();
    fs::remove_file(dir.path().join("black").join("Queen.png")).unwrap();

    let err = PieceFolder::open(dir.path()).unwrap_err();
    match err {
        FenboardError::Resource { path, .. } => {
            assert!(path.ends_with("black/Queen.png"), "{}", path.display());
        }
        other => panic!("Expected resource error, got {other}"),
    }
}

#[test]
fn test_arrow_folder_scales_templates() {
    let dir = arrow_folder();
    let folder = ArrowFolder::open(dir.path()).expect("Failed to open arrow folder");

    let sprites = folder.sprites(12).unwrap();
    assert_eq!(
        (sprites.knight().width(), sprites.knight().height()),
        (36, 24)
    );
    assert_eq!(
        (sprites.straight().width(), sprites.straight().height()),
        (12, 36)
    );
    assert!(Arc::ptr_eq(&sprites, &folder.sprites(12).unwrap()));
}

#[test]
fn test_arrow_folder_missing_template() {
    let dir = tempdir().unwrap();
    write_png(&dir.path().join("Knight.png"), 90, 60, "blue");

    let err = ArrowFolder::open(dir.path()).unwrap_err();
    assert!(matches!(err, FenboardError::Resource { .. }));
}

#[test]
fn test_font_file_rejects_missing_and_invalid_files() {
    let dir = tempdir().unwrap();

    let missing = FontFile::open(dir.path().join("missing.ttf")).unwrap_err();
    assert!(matches!(missing, FenboardError::Resource { .. }));

    let bogus = dir.path().join("bogus.ttf");
    fs::write(&bogus, b"definitely not a font").unwrap();
    let invalid = FontFile::open(&bogus).unwrap_err();
    assert!(matches!(invalid, FenboardError::Resource { .. }));
}

#[test]
fn test_loaded_sets_render_a_board() {
    let pieces_dir = piece_folder();
    let arrows_dir = arrow_folder();
    let pieces = PieceFolder::open(pieces_dir.path()).unwrap();
    let arrows = ArrowFolder::open(arrows_dir.path()).unwrap();

    let config: AppConfig = toml::from_str("[board]\ntile_size = 24").unwrap();
    let renderer = BoardRenderer::new(config);
    let request = renderer
        .request("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1")
        .unwrap()
        .with_pieces(&pieces)
        .with_arrows(&arrows, [Arrow::new("e7", "e5")])
        .with_last_move(renderer.last_move("e2", "e4").unwrap());

    let board = renderer.render(&request).expect("Failed to render");
    assert_eq!((board.width(), board.height()), (192, 192));
}
