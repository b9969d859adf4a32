//! Small QoL macros.
//!

/// Create a `PathBuf` out of any number of path components.
///
#[macro_export]
macro_rules! makepath {
    ($($comp:expr),+ $(,)?) => {
        [$($comp.to_string(),)+]
            .iter()
            .collect::<std::path::PathBuf>()
    };
}
