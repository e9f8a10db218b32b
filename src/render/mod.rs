pub mod table;  // pure rows -> TableBody
pub mod text;   // plain text + CSV for `print`
pub mod tui;    // ratatui frame

pub use table::{render_rows, TableBody, TableRow};
