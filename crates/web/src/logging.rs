//! Process-wide log output.

use tracing::Level;
use tracing::subscriber::SetGlobalDefaultError;
use tracing_subscriber::FmtSubscriber;

/// Installs a formatting subscriber that prints events at `level` and above.
///
/// Fails when a global subscriber is already set.
pub fn init(level: Level) -> Result<(), SetGlobalDefaultError> {
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)
}

#[cfg(test)]
mod tests {
    use tracing::Level;

    #[test]
    fn second_init_fails() {
        // another test may have installed it already
        let _ = super::init(Level::DEBUG);
        assert!(super::init(Level::INFO).is_err());
    }
}
