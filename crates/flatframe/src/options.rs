/// Configuration for a [`Builder`](crate::Builder).
///
/// # Examples
///
/// ```rust
/// use flatframe::{Builder, BuilderOptions};
///
/// let options = BuilderOptions {
///     initial_capacity: 64,
///     force_defaults: true,
/// };
/// let builder = Builder::with_options(options);
/// assert_eq!(builder.capacity(), 64);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BuilderOptions {
    /// Initial size of the builder's backing buffer, in bytes.
    ///
    /// The buffer grows on demand, so this only trades a few reallocations
    /// against up-front memory.
    ///
    /// # Default
    ///
    /// `1024`
    pub initial_capacity: usize,

    /// Whether scalar fields equal to their default are still written.
    ///
    /// Normally a field whose value matches the schema default is omitted and
    /// gets a zero vtable entry; readers return the default either way. Set
    /// this when readers must be able to tell "explicitly set to the default"
    /// from "never set", or when the value will be mutated in place later.
    ///
    /// # Default
    ///
    /// `false`
    pub force_defaults: bool,
}

impl Default for BuilderOptions {
    fn default() -> Self {
        Self {
            initial_capacity: 1024,
            force_defaults: false,
        }
    }
}
