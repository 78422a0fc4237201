use bookhound_core::{ActionKey, Book, DogImageRef, Effect, LoadFailed, Msg};
use bookhound_engine::{BookRecord, BooksAndDog, EngineConfig, EngineEvent, EngineHandle};
use engine_logging::{engine_info, engine_warn};

/// Executes core effects on the engine and turns engine events back into messages.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(config: EngineConfig) -> anyhow::Result<Self> {
        let engine = EngineHandle::new(config)?;
        Ok(Self { engine })
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::StartInitialLoad => {
                    engine_info!("Starting initial load");
                    self.engine.start_initial_load();
                }
                Effect::Trigger(key) => {
                    engine_info!("Trigger {}", key.label());
                    self.engine.trigger(map_key(key));
                }
                Effect::ProbeImage(image) => {
                    self.engine.probe_image(image.as_str());
                }
                Effect::Shutdown => {
                    engine_info!("Shutting down engine");
                    self.engine.shutdown();
                }
            }
        }
    }

    /// Drains every event that arrived since the last call.
    pub fn drain(&self) -> Vec<Msg> {
        std::iter::from_fn(|| self.engine.try_recv())
            .map(map_event)
            .collect()
    }
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::ActionStarted(key) => Msg::ActionStarted(map_engine_key(key)),
        EngineEvent::InitialLoadCompleted(result) => Msg::InitialLoadDone(
            result
                .map(map_both)
                .map_err(|err| log_failure("initial load", &err)),
        ),
        EngineEvent::BooksRefreshed(result) => Msg::BooksRefreshed(
            result
                .map(map_books)
                .map_err(|err| log_failure("books refresh", &err)),
        ),
        EngineEvent::DogRefreshed(result) => Msg::DogRefreshed(
            result
                .map(|url| url.and_then(DogImageRef::new))
                .map_err(|err| log_failure("dog refresh", &err)),
        ),
        EngineEvent::BothRefreshed(result) => Msg::BothRefreshed(
            result
                .map(map_both)
                .map_err(|err| log_failure("combined refresh", &err)),
        ),
        EngineEvent::AllEmptied => Msg::AllEmptied,
        EngineEvent::ImageProbed { url, resolved } => match DogImageRef::new(url) {
            Some(image) => Msg::DogImageProbed { image, resolved },
            None => Msg::NoOp,
        },
    }
}

fn log_failure(what: &str, err: &impl std::fmt::Display) -> LoadFailed {
    engine_warn!("{} failed: {}", what, err);
    LoadFailed
}

fn map_both(both: BooksAndDog) -> (Vec<Book>, Option<DogImageRef>) {
    (
        map_books(both.books),
        both.dog_image.and_then(DogImageRef::new),
    )
}

fn map_books(records: Vec<BookRecord>) -> Vec<Book> {
    records
        .into_iter()
        .map(|record| Book {
            id: record.id,
            title: record.title,
            author: record.author,
            genre: record.genre,
            publisher: record.publisher,
            published: record.published,
            description: record.description,
            isbn: record.isbn,
        })
        .collect()
}

fn map_key(key: ActionKey) -> bookhound_engine::ActionKey {
    match key {
        ActionKey::Books => bookhound_engine::ActionKey::Books,
        ActionKey::Dogs => bookhound_engine::ActionKey::Dogs,
        ActionKey::Both => bookhound_engine::ActionKey::Both,
        ActionKey::Empty => bookhound_engine::ActionKey::Empty,
    }
}

fn map_engine_key(key: bookhound_engine::ActionKey) -> ActionKey {
    match key {
        bookhound_engine::ActionKey::Books => ActionKey::Books,
        bookhound_engine::ActionKey::Dogs => ActionKey::Dogs,
        bookhound_engine::ActionKey::Both => ActionKey::Both,
        bookhound_engine::ActionKey::Empty => ActionKey::Empty,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bookhound_engine::GatewayError;
    use pretty_assertions::assert_eq;

    fn record(id: u64) -> BookRecord {
        BookRecord {
            id,
            title: "Emma".to_string(),
            author: "Jane Austen".to_string(),
            genre: "Novel".to_string(),
            publisher: "John Murray".to_string(),
            published: "1815-12-23".to_string(),
            description: "Matchmaking.".to_string(),
            isbn: None,
        }
    }

    #[test]
    fn keys_round_trip_between_crates() {
        for key in ActionKey::ALL {
            assert_eq!(map_engine_key(map_key(key)), key);
        }
    }

    #[test]
    fn failures_become_load_failed() {
        let msg = map_event(EngineEvent::BooksRefreshed(Err(GatewayError::HttpStatus(502))));
        assert_eq!(msg, Msg::BooksRefreshed(Err(LoadFailed)));
    }

    #[test]
    fn blank_dog_url_maps_to_no_image() {
        let msg = map_event(EngineEvent::BothRefreshed(Ok(BooksAndDog {
            books: vec![record(9)],
            dog_image: Some("  ".to_string()),
        })));
        match msg {
            Msg::BothRefreshed(Ok((books, image))) => {
                assert_eq!(books[0].id, 9);
                assert_eq!(books[0].author, "Jane Austen");
                assert_eq!(image, None);
            }
            other => panic!("unexpected message {other:?}"),
        }
    }
}
