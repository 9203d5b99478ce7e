pub mod board;
pub mod renderer;

pub use board::{BoardView, CELL_COLUMNS, CELL_ROWS, cell_origin};
pub use renderer::{Renderer, board_for_terminal};
