#![allow(dead_code)]

use std::sync::{Arc, Mutex, Once};
use std::time::Duration;

use bookhound_engine::{
    BookRecord, EngineEvent, EventSink, FailurePolicy, Gateway, GatewayError,
};

pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(engine_logging::initialize_for_tests);
}

pub const DOG_URL: &str = "https://images.dog.ceo/breeds/hound-afghan/n02088094_1003.jpg";

pub fn book_record(id: u64) -> BookRecord {
    BookRecord {
        id,
        title: format!("Book {id}"),
        author: format!("Author {id}"),
        genre: "Mystery".to_string(),
        publisher: "Penguin".to_string(),
        published: "2004-09-12".to_string(),
        description: "Twists all the way down.".to_string(),
        isbn: None,
    }
}

pub fn book_records(quantity: u32) -> Vec<BookRecord> {
    (1..=u64::from(quantity)).map(book_record).collect()
}

/// How a fake endpoint answers.
#[derive(Debug, Clone, Copy)]
pub enum Behaviour {
    Succeed,
    Fail,
    Panic,
    Slow(Duration),
}

pub struct FakeGateway {
    books: Behaviour,
    dog: Behaviour,
    policy: FailurePolicy,
    calls: Mutex<Vec<&'static str>>,
}

impl FakeGateway {
    pub fn new(books: Behaviour, dog: Behaviour) -> Self {
        Self {
            books,
            dog,
            policy: FailurePolicy::Absorb,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn healthy() -> Self {
        Self::new(Behaviour::Succeed, Behaviour::Succeed)
    }

    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, call: &str) -> usize {
        self.calls().iter().filter(|c| **c == call).count()
    }

    fn record(&self, call: &'static str) {
        self.calls.lock().unwrap().push(call);
    }
}

async fn answer<T>(behaviour: Behaviour, value: T) -> Result<T, GatewayError> {
    match behaviour {
        Behaviour::Succeed => Ok(value),
        Behaviour::Fail => Err(GatewayError::HttpStatus(500)),
        Behaviour::Panic => panic!("gateway blew up"),
        Behaviour::Slow(delay) => {
            tokio::time::sleep(delay).await;
            Ok(value)
        }
    }
}

#[async_trait::async_trait]
impl Gateway for FakeGateway {
    async fn fetch_books(&self, quantity: u32) -> Result<Vec<BookRecord>, GatewayError> {
        self.record("books");
        answer(self.books, book_records(quantity)).await
    }

    async fn fetch_dog_image(&self) -> Result<Option<String>, GatewayError> {
        self.record("dog");
        answer(self.dog, Some(DOG_URL.to_string())).await
    }

    async fn probe_image(&self, url: &str) -> bool {
        self.record("probe");
        url == DOG_URL
    }

    fn failure_policy(&self) -> FailurePolicy {
        self.policy
    }
}

#[derive(Default)]
pub struct CollectingSink {
    events: Arc<Mutex<Vec<EngineEvent>>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<EngineEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl EventSink for CollectingSink {
    fn emit(&self, event: EngineEvent) {
        self.events.lock().unwrap().push(event);
    }
}
