//! Logging port for the application layer.

/// Minimal logging interface the game loop reports through.
pub trait Logger {
    fn info(&self, message: &str);
    fn error(&self, message: &str);
    fn debug(&self, message: &str);
}

/// Forwards to the `log` facade under a fixed target, so `RUST_LOG=<target>=debug`
/// selects these messages.
#[derive(Clone, Debug)]
pub struct LogLogger {
    target: &'static str,
}

impl LogLogger {
    pub const DEFAULT_TARGET: &'static str = "twenty48::session";

    pub fn new(target: &'static str) -> Self {
        LogLogger { target }
    }

    pub fn target(&self) -> &'static str {
        self.target
    }
}

impl Default for LogLogger {
    fn default() -> Self {
        LogLogger::new(Self::DEFAULT_TARGET)
    }
}

impl Logger for LogLogger {
    fn info(&self, message: &str) {
        log::info!(target: self.target, "{}", message);
    }

    fn error(&self, message: &str) {
        log::error!(target: self.target, "{}", message);
    }

    fn debug(&self, message: &str) {
        log::debug!(target: self.target, "{}", message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_target() {
        assert_eq!(LogLogger::default().target(), LogLogger::DEFAULT_TARGET);
        assert_eq!(LogLogger::new("custom").target(), "custom");
    }

    #[test]
    fn test_logging_without_a_backend_is_a_no_op() {
        let logger = LogLogger::default();
        logger.info("info");
        logger.error("error");
        logger.debug("debug");
    }
}
