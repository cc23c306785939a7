//! Sample actions and the stand-in collaborators they are wired with
//!
//! These exist to exercise the engine from the command line. Each action
//! pauses for a random delay to simulate latency before producing its
//! outcome.

use actionflow::{Action, InputAction, Outcome};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

/// Storage stand-in that accepts entities
pub trait Repository<T> {
    /// Try to store `entity`, returning whether it was accepted
    fn try_add(&self, entity: T) -> bool;
}

/// Accepts every resource
#[derive(Debug, Default, Clone)]
pub struct ResourceRepository;

impl Repository<String> for ResourceRepository {
    fn try_add(&self, entity: String) -> bool {
        tracing::trace!("Stored resource {:?}", entity);
        true
    }
}

/// Holds the one secret the demo looks up
#[derive(Debug, Default, Clone)]
pub struct SecretRepository;

impl SecretRepository {
    /// Read the secret
    pub fn get(&self) -> String {
        "shhh".to_string()
    }
}

impl Repository<String> for SecretRepository {
    fn try_add(&self, _entity: String) -> bool {
        true
    }
}

/// Service stand-in required by [`GreetingAction`]
#[derive(Debug, Default, Clone)]
pub struct SomeService;

/// Service stand-in required by [`FailingAction`]
#[derive(Debug, Default, Clone)]
pub struct OtherService;

/// Simulated latency shared by all sample actions
#[derive(Debug)]
pub struct Latency {
    max_delay: Duration,
    rng: RefCell<StdRng>,
}

impl Latency {
    /// Random delays up to `max_delay`; a seed makes the sequence repeatable
    pub fn new(max_delay: Duration, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            max_delay,
            rng: RefCell::new(rng),
        }
    }

    /// Draw a random number from the shared generator
    pub fn next_number(&self) -> u32 {
        self.rng.borrow_mut().gen()
    }

    /// Block the current thread for a random delay
    pub fn pause(&self) {
        let max_millis = self.max_delay.as_millis() as u64;
        if max_millis == 0 {
            return;
        }
        let millis = self.rng.borrow_mut().gen_range(0..=max_millis);
        std::thread::sleep(Duration::from_millis(millis));
    }
}

/// Greets its input after a random delay
pub struct GreetingAction {
    repository: Box<dyn Repository<String>>,
    _service: SomeService,
    latency: Rc<Latency>,
}

impl InputAction<String> for GreetingAction {
    type Output = String;

    fn kind(&self) -> &'static str {
        "Greeting"
    }

    fn run(&self, input: String) -> Outcome<String> {
        self.latency.pause();
        if !self.repository.try_add(input.clone()) {
            return Outcome::failure();
        }
        Outcome::success(format!("winner winner chicken dinner; {input}"))
    }
}

/// Always fails after a random delay
pub struct FailingAction {
    _secrets: SecretRepository,
    _service: OtherService,
    latency: Rc<Latency>,
}

impl Action for FailingAction {
    type Output = String;

    fn kind(&self) -> &'static str {
        "Failing"
    }

    fn run(&self) -> Outcome<String> {
        self.latency.pause();
        Outcome::failure()
    }
}

/// Value produced by [`SecretLookupAction`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecretRecord {
    /// The secret read from the repository
    pub prop: String,
    /// A random number drawn with the lookup
    pub thing: u32,
}

/// Reads the secret from a [`SecretRepository`] after a random delay
pub struct SecretLookupAction {
    repository: SecretRepository,
    latency: Rc<Latency>,
}

impl Action for SecretLookupAction {
    type Output = SecretRecord;

    fn kind(&self) -> &'static str {
        "SecretLookup"
    }

    fn run(&self) -> Outcome<SecretRecord> {
        self.latency.pause();
        Outcome::success(SecretRecord {
            prop: self.repository.get(),
            thing: self.latency.next_number(),
        })
    }
}

/// Builds sample actions with their collaborators
#[derive(Debug, Clone)]
pub struct Wiring {
    latency: Rc<Latency>,
}

impl Wiring {
    /// Wire actions that share `latency`
    pub fn new(latency: Latency) -> Self {
        Self {
            latency: Rc::new(latency),
        }
    }

    /// Wire actions with no delay and a fixed seed
    pub fn instant() -> Self {
        Self::new(Latency::new(Duration::ZERO, Some(0)))
    }

    /// Build a greeting action
    pub fn greeting(&self) -> GreetingAction {
        GreetingAction {
            repository: Box::new(ResourceRepository),
            _service: SomeService,
            latency: self.latency.clone(),
        }
    }

    /// Build a failing action
    pub fn failing(&self) -> FailingAction {
        FailingAction {
            _secrets: SecretRepository,
            _service: OtherService,
            latency: self.latency.clone(),
        }
    }

    /// Build a secret lookup action
    pub fn secret_lookup(&self) -> SecretLookupAction {
        SecretLookupAction {
            repository: SecretRepository,
            latency: self.latency.clone(),
        }
    }
}
