use ratatui::style::Color;

pub const TITLE: &str = "Bookhound: Books & Dog Viewer";

pub const BOOKS_HEADING: &str = "📚 Book Lists";
pub const DOG_HEADING: &str = "🐕 Dog Picture";

pub const BOOKS_LOADING: &str = "Gathering the books...";
pub const BOOKS_REFRESHING: &str = "📚 Refreshing books...";
pub const BOOKS_EMPTY: &str = "All the books poofed:C";
pub const DOGS_LOADING: &str = "Gathering the dogs...";
pub const DOGS_FALLBACK: &str = "All the dogs had run away!";
pub const ERROR_ICON: &str = "❌";
pub const ERROR_HINT: &str = "Try using the refresh button above";

pub const KEY_REFRESH_BOOKS: char = 'b';
pub const KEY_REFRESH_DOGS: char = 'd';
pub const KEY_REFRESH_BOTH: char = 'r';
pub const KEY_EMPTY_ALL: char = 'e';
pub const KEY_QUIT: char = 'q';

// Books, dogs and utility actions.
pub const COLOR_PRIMARY: Color = Color::Rgb(0xbf, 0x54, 0x4a);
pub const COLOR_SECONDARY: Color = Color::Rgb(0x98, 0xdb, 0xb8);
pub const COLOR_ACCENT: Color = Color::Rgb(0x76, 0xb2, 0xcf);
pub const COLOR_DIM: Color = Color::DarkGray;
