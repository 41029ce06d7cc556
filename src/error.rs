use thiserror::Error;

macro_rules! malformed_error {
    // Single string version
    ($msg:expr) => {
        crate::Error::Malformed {
            message: $msg.to_string(),
            file: file!(),
            line: line!(),
        }
    };

    // Format string with arguments version
    ($fmt:expr, $($arg:tt)*) => {
        crate::Error::Malformed {
            message: format!($fmt, $($arg)*),
            file: file!(),
            line: line!(),
        }
    };
}

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// # Error Categories
///
/// ## State Errors
/// - [`Error::NotBuilt`] - A query was issued before the index was built
/// - [`Error::AlreadyBuilt`] - The index was asked to build a second time
///
/// ## Cancellation
/// - [`Error::Cancelled`] - A batch query was aborted by its caller or its deadline expired
///
/// ## Build Failures
/// - [`Error::Malformed`] - The graph view returned inconsistent data
/// - [`Error::GraphError`] - An in-memory graph could not be constructed
///
/// ## Concurrency
/// - [`Error::WorkerPool`] - The dedicated batch worker pool could not be started
///
/// State errors and cancellation are recoverable: build the index, or retry with a longer
/// deadline. A cancelled batch must never be read as "not reachable".
///
/// # Examples
///
/// ```rust
/// use ontoreach::{Error, LabeledGraph, ReachabilityIndex};
///
/// let mut graph: LabeledGraph<()> = LabeledGraph::new();
/// let a = graph.add_node(());
/// let index = ReachabilityIndex::new(&graph);
///
/// match index.can_reach(a, a) {
///     Err(Error::NotBuilt) => println!("build the index first"),
///     Ok(answer) => println!("reachable: {answer}"),
///     Err(e) => eprintln!("other error: {e}"),
/// }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// A query was issued against an index that has not been built.
    ///
    /// Call [`crate::ReachabilityIndex::create_index`] first.
    #[error("Reachability index has not been built")]
    NotBuilt,

    /// `create_index` was called on an index that is already built.
    ///
    /// The `Uninitialized -> Built` transition happens once per index instance; construct a
    /// new index to capture a newer snapshot of the graph.
    #[error("Reachability index has already been built")]
    AlreadyBuilt,

    /// A batch query was cancelled before it could produce a complete answer.
    #[error("Batch query was cancelled")]
    Cancelled,

    /// The graph view returned data that is internally inconsistent.
    ///
    /// The error includes the source location where the inconsistency was detected.
    ///
    /// # Fields
    ///
    /// * `message` - Detailed description of what was malformed
    /// * `file` - Source file where the error was detected
    /// * `line` - Source line where the error was detected
    #[error("Malformed - {file}:{line}: {message}")]
    Malformed {
        /// The message to be printed for the Malformed error
        message: String,
        /// The source file in which this error occured
        file: &'static str,
        /// The source line in which this error occured
        line: u32,
    },

    /// In-memory graph construction error.
    ///
    /// Raised when an edge references a node that does not exist.
    #[error("{0}")]
    GraphError(String),

    /// The dedicated batch worker pool could not be started.
    ///
    /// Only raised by `create_index` when [`crate::IndexConfig::worker_threads`] is set.
    #[error("Worker pool unavailable: {0}")]
    WorkerPool(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_error_captures_location() {
        let err = malformed_error!("node {} missing", 7);
        match err {
            Error::Malformed {
                message,
                file,
                line,
            } => {
                assert_eq!(message, "node 7 missing");
                assert!(file.ends_with("error.rs"));
                assert!(line > 0);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_state_errors_are_distinct_from_cancellation() {
        assert_ne!(Error::NotBuilt.to_string(), Error::Cancelled.to_string());
        assert!(Error::AlreadyBuilt.to_string().contains("already"));
    }

    #[test]
    fn test_worker_pool_error_names_the_pool() {
        let err = Error::WorkerPool("failed to start 4 batch workers: spawn refused".into());
        assert_eq!(
            err.to_string(),
            "Worker pool unavailable: failed to start 4 batch workers: spawn refused"
        );
    }
}
