use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::EnvFilter;

///
/// Installs a global `tracing` subscriber that prints the events emitted by the algorithms
/// of this crate, e.g. progress of the randomized factorization.
///
/// The algorithms only emit events on levels `DEBUG` and `TRACE`, and open `TRACE` spans
/// around the heavier operations (division, gcd, the factorization steps).
///
pub struct LogAlgorithmSubscriber;

impl LogAlgorithmSubscriber {

    /// Environment variable read by [`LogAlgorithmSubscriber::init_from_env()`] and
    /// [`LogAlgorithmSubscriber::init_test()`], in the syntax of [`EnvFilter`].
    pub const FILTER_ENV: &'static str = "GF2_LOG";

    ///
    /// Installs the subscriber with the given filter directives, e.g. `"gf2_math=debug"`.
    /// Fails if a global subscriber has already been set.
    ///
    pub fn init(filter: &str) -> Result<(), TryInitError> {
        tracing_subscriber::registry()
            .with(fmt::layer().compact())
            .with(EnvFilter::new(filter))
            .try_init()
    }

    ///
    /// Installs the subscriber with the filter directives given in the environment variable
    /// [`LogAlgorithmSubscriber::FILTER_ENV`]. If it is not set, only errors are printed.
    ///
    pub fn init_from_env() -> Result<(), TryInitError> {
        tracing_subscriber::registry()
            .with(fmt::layer().compact())
            .with(EnvFilter::from_env(Self::FILTER_ENV))
            .try_init()
    }

    ///
    /// Installs a subscriber whose output is captured by the test harness. Can be called
    /// by every test; all but the first call do nothing.
    ///
    pub fn init_test() {
        _ = tracing_subscriber::registry()
            .with(fmt::layer().compact().with_test_writer())
            .with(EnvFilter::from_env(Self::FILTER_ENV))
            .try_init();
    }
}

#[test]
fn test_init_test_twice() {
    LogAlgorithmSubscriber::init_test();
    LogAlgorithmSubscriber::init_test();
    assert!(LogAlgorithmSubscriber::init("gf2_math=debug").is_err());
}
