#![allow(dead_code)]

use std::sync::Once;

use bookhound_core::{Book, DogImageRef};

pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(engine_logging::initialize_for_tests);
}

pub fn book(id: u64, title: &str) -> Book {
    Book {
        id,
        title: title.to_string(),
        author: format!("Author of {title}"),
        genre: "Fantasy".to_string(),
        publisher: "Tor".to_string(),
        published: "1999-04-01".to_string(),
        description: format!("A book called {title}."),
        isbn: Some("9781234567897".to_string()),
    }
}

pub fn four_books(prefix: &str) -> Vec<Book> {
    (1..=4).map(|id| book(id, &format!("{prefix} {id}"))).collect()
}

pub fn dog(name: &str) -> DogImageRef {
    DogImageRef::new(format!("https://images.dog.ceo/breeds/{name}.jpg")).expect("non-empty url")
}
